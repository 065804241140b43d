use regex_dfa_compiler::{compile, parse, to_dot, CompileError, ParseErr};
use regex_dfa_runtime::{run, Dfa};

#[derive(Debug)]
enum PipelineErr {
    Parse(ParseErr),
    Compile(CompileError),
}

fn compile_source(input: &str) -> Result<Dfa, PipelineErr> {
    parse(input)
        .map_err(PipelineErr::Parse)
        .and_then(|source| compile(&source.expression).map_err(PipelineErr::Compile))
}

/// Enumerates every string over `alphabet` up to and including `max_len`.
fn strings_up_to(alphabet: &[char], max_len: usize) -> Vec<String> {
    (0..max_len).fold(vec![String::new()], |mut acc, len| {
        let longest: Vec<String> = acc
            .iter()
            .filter(|s| s.chars().count() == len)
            .cloned()
            .collect();

        for prefix in longest {
            for c in alphabet {
                acc.push(format!("{}{}", prefix, c));
            }
        }
        acc
    })
}

#[test]
fn should_accept_exactly_strings_ending_in_abb() {
    let dfa = compile_source("a b\n(a|b)*.a.b.b\n").unwrap();

    for input in strings_up_to(&['a', 'b'], 7) {
        assert_eq!(
            (input.as_str(), input.ends_with("abb")),
            (input.as_str(), run(&dfa, &input))
        )
    }
}

#[test]
fn should_accept_empty_and_repeated_input_for_star() {
    let dfa = compile_source("a\na*\n").unwrap();

    assert!(dfa.is_accepting(dfa.start()));
    for input in strings_up_to(&['a'], 6) {
        assert!(run(&dfa, &input), "expected {:?} to match", input)
    }
}

#[test]
fn should_compile_concatenation_into_three_states() {
    let dfa = compile_source("a b\na.b\n").unwrap();

    assert_eq!(3, dfa.state_cnt());
    assert_eq!(2, dfa.transition_cnt());

    let accepting: Vec<_> = dfa.accepting_states().collect();
    assert_eq!(1, accepting.len());
    assert!(dfa.transitions_from(accepting[0]).is_empty());

    for input in strings_up_to(&['a', 'b'], 4) {
        assert_eq!(
            (input.as_str(), input == "ab"),
            (input.as_str(), run(&dfa, &input))
        )
    }
}

#[test]
fn should_reject_symbols_outside_expression() {
    // `c` is declared but never used, leaving no transition for it.
    let dfa = compile_source("a b c\n(a|b)*\n").unwrap();

    assert!(run(&dfa, "abab"));
    assert!(!run(&dfa, "abc"));
}

#[test]
fn should_match_union_of_alternating_pairs() {
    let dfa = compile_source("a b\n(a.b|b.a)*\n").unwrap();

    let input_output = [
        ("", true),
        ("ab", true),
        ("ba", true),
        ("abba", true),
        ("aa", false),
        ("aba", false),
        ("baab", true),
    ];

    for (input, expected) in input_output {
        assert_eq!((input, expected), (input, run(&dfa, input)))
    }
}

#[test]
fn should_render_dot_for_compiled_source() {
    let dfa = compile_source("a b\na|b\n").unwrap();
    let dot = to_dot(&dfa);

    assert!(dot.starts_with("digraph {"));
    assert!(dot.contains("start -> \"1 2\";"));
    assert!(dot.contains("\"1 2\" -> \"3\" [label=\"a\"];"));
    assert!(dot.contains("\"1 2\" -> \"3\" [label=\"b\"];"));
    assert!(dot.contains("\"3\" [peripheries=2];"));
}

#[test]
fn should_fail_fast_on_malformed_input() {
    let inputs = [
        "a b\n(a|b\n",
        "a b\na.|b\n",
        "a b\na.b)\n",
        "a b\nab\n",
        "a b\n*a\n",
        "a b\na|*b\n",
        "a b\n(*a)\n",
        "a b\na.(*b)\n",
    ];

    for input in inputs {
        assert!(
            matches!(compile_source(input), Err(PipelineErr::Compile(_))),
            "expected {:?} to fail compilation",
            input
        )
    }

    assert!(matches!(
        compile_source("a b\na.c\n"),
        Err(PipelineErr::Parse(ParseErr::UndeclaredSymbol('c')))
    ));
}
