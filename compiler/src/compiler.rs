//! Provides methods and types to facilitate the compilation of an infix token
//! stream into a deterministic finite automaton, without an intermediate NFA.
//!
//! # Example
//!
//! ```
//! use regex_dfa_compiler::ast::*;
//! use regex_dfa_compiler::compile;
//! use regex_dfa_runtime::PositionSet;
//!
//! // approximate to `a.b`
//! let tokens = [
//!     Token::Symbol('a'),
//!     Token::Operator(Operator::Concatenation),
//!     Token::Symbol('b'),
//! ];
//!
//! let dfa = compile(&tokens).unwrap();
//!
//! assert_eq!(3, dfa.state_cnt());
//! assert_eq!(Some(&PositionSet::from([1])), dfa.positions(dfa.start()));
//! assert!(regex_dfa_runtime::run(&dfa, "ab"));
//! ```

use std::collections::{BTreeMap, VecDeque};

use regex_dfa_runtime::{Dfa, Position, PositionSet, StateId};

use super::ast::{Operator, Symbol, Token};
use super::postfix::to_postfix;
use super::tree::{build, AugmentedTree};

/// Represents the ways an expression can fail to compile. Every variant is
/// fatal, no partially built automaton is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    #[error("expression contains no symbols")]
    EmptyExpression,

    #[error("unbalanced parenthesis in expression")]
    UnbalancedParenthesis,

    #[error("operator `{0}` is missing an operand")]
    MissingOperand(Operator),

    #[error("operator `{0}` does not follow an operand")]
    StrayOperator(Operator),

    #[error("expression leaves {0} operand(s) without an operator")]
    DanglingOperand(usize),

    #[error("position {0} has no symbol or followpos entry")]
    UnresolvedPosition(Position),

    #[error("state {0} is not defined")]
    UnresolvedState(StateId),

    #[error("state {0} already has a transition on `{1}`")]
    ConflictingTransition(StateId, char),
}

/// Accepts an infix token stream and compiles it into its corresponding
/// automaton.
pub fn compile(tokens: &[Token]) -> Result<Dfa, CompileError> {
    let postfix = to_postfix(tokens)?;
    let tree = build(postfix.as_ref())?;

    synthesize(&tree)
}

/// Explores every position set reachable from the root's firstpos in
/// breadth-first order, producing one state per distinct set.
pub fn synthesize(tree: &AugmentedTree) -> Result<Dfa, CompileError> {
    let mut dfa = Dfa::new(tree.root().firstpos.clone());
    let mut processed = vec![false];
    let mut frontier = VecDeque::from([dfa.start()]);

    while let Some(current) = frontier.pop_front() {
        if processed[current.as_usize()] {
            continue;
        }
        processed[current.as_usize()] = true;

        for (successor, created) in expand_state(tree, &mut dfa, current)? {
            if created {
                processed.push(false);
                frontier.push_back(successor);
            }
        }
    }

    Ok(dfa)
}

/// Records the transitions and acceptance of a single state, returning each
/// successor and whether it was newly created.
fn expand_state(
    tree: &AugmentedTree,
    dfa: &mut Dfa,
    current: StateId,
) -> Result<Vec<(StateId, bool)>, CompileError> {
    let positions = dfa
        .positions(current)
        .cloned()
        .ok_or(CompileError::UnresolvedState(current))?;
    let partitions = partition_by_symbol(tree, &positions)?;
    let mut successors = Vec::with_capacity(partitions.len());

    for (symbol, partition) in partitions {
        let c = match symbol {
            // acceptance is not a consumable input.
            Symbol::EndMarker => {
                dfa.mark_accepting(current);
                continue;
            }
            Symbol::Char(c) => c,
        };

        let next_positions = tree.followpos().union_of(&partition)?;
        let (successor, created) = dfa.insert_state(next_positions);
        dfa.insert_transition(current, c, successor)
            .ok_or(CompileError::ConflictingTransition(current, c))?;
        successors.push((successor, created));
    }

    Ok(successors)
}

/// Groups a state's positions by the symbol each was assigned.
fn partition_by_symbol(
    tree: &AugmentedTree,
    positions: &PositionSet,
) -> Result<BTreeMap<Symbol, PositionSet>, CompileError> {
    positions
        .iter()
        .try_fold(BTreeMap::new(), |mut partitions, pos| {
            let symbol = tree
                .symbols()
                .get(pos)
                .ok_or(CompileError::UnresolvedPosition(*pos))?;

            partitions
                .entry(symbol)
                .or_insert_with(PositionSet::new)
                .insert(*pos);
            Ok(partitions)
        })
}
