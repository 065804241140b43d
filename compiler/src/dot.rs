//! Renders a compiled automaton as a Graphviz `digraph`.
//!
//! Every state is declared by the quoted, ascending list of the positions that
//! identify it. An invisible `start` node points at the start state and
//! accepting states are drawn with a double border.

use std::io::{self, Write};

use regex_dfa_runtime::{Dfa, StateId};

/// Returns the DOT description of an automaton.
///
/// # Example
///
/// ```
/// use regex_dfa_compiler::{compile, parse_expression, to_dot};
///
/// let input = "a.b".chars().enumerate().collect::<Vec<_>>();
/// let dfa = parse_expression(&input)
///     .map_err(|e| e.to_string())
///     .and_then(|tokens| compile(&tokens).map_err(|e| e.to_string()))
///     .unwrap();
///
/// assert_eq!(
///     "digraph {
///     rankdir=LR;
///     start [shape=none, label=\"\", height=0, width=0];
///     start -> \"1\";
///     \"1\";
///     \"2\";
///     \"3\" [peripheries=2];
///     \"1\" -> \"2\" [label=\"a\"];
///     \"2\" -> \"3\" [label=\"b\"];
/// }
/// ",
///     to_dot(&dfa)
/// );
/// ```
pub fn to_dot(dfa: &Dfa) -> String {
    let mut buffer = Vec::new();

    // writes into a Vec never fail.
    let _ = write_dot(dfa, &mut buffer);
    String::from_utf8_lossy(&buffer).into_owned()
}

/// Writes the DOT description of an automaton to `out`.
pub fn write_dot<W: Write>(dfa: &Dfa, mut out: W) -> io::Result<()> {
    let states: Vec<StateId> = dfa.states_breadth_first().collect();

    writeln!(out, "digraph {{")?;
    writeln!(out, "    rankdir=LR;")?;
    writeln!(out, "    start [shape=none, label=\"\", height=0, width=0];")?;
    writeln!(out, "    start -> {};", node_id(dfa, dfa.start()))?;

    for &state in &states {
        if dfa.is_accepting(state) {
            writeln!(out, "    {} [peripheries=2];", node_id(dfa, state))?;
        } else {
            writeln!(out, "    {};", node_id(dfa, state))?;
        }
    }

    for &state in &states {
        for transition in dfa.transitions_from(state) {
            writeln!(
                out,
                "    {} -> {} [label=\"{}\"];",
                node_id(dfa, transition.from),
                node_id(dfa, transition.to),
                escape(transition.symbol)
            )?;
        }
    }

    writeln!(out, "}}")?;
    out.flush()
}

/// A state's identifier, its position set quoted.
fn node_id(dfa: &Dfa, state: StateId) -> String {
    let positions = dfa
        .positions(state)
        .map(|positions| positions.to_string())
        .unwrap_or_default();

    format!("\"{}\"", positions)
}

fn escape(symbol: char) -> String {
    match symbol {
        '"' | '\\' => format!("\\{}", symbol),
        _ => symbol.to_string(),
    }
}
