//! Provides the deterministic finite automaton produced by the
//! `regex-dfa-compiler` crate, along with the position types that identify
//! its states, and a matcher for evaluating input against it.
//!
//! # Example
//!
//! ```
//! use regex_dfa_runtime::{run, Dfa, PositionSet};
//!
//! // approximate to `a*`, a single state looping on `a` that also accepts.
//! let mut dfa = Dfa::new(PositionSet::from([1, 2]));
//! let start = dfa.start();
//! dfa.insert_transition(start, 'a', start);
//! dfa.mark_accepting(start);
//!
//! assert!(run(&dfa, ""));
//! assert!(run(&dfa, "aaa"));
//! assert!(!run(&dfa, "ab"));
//! ```

mod dfa;
mod graph;
pub mod matcher;
mod position;

pub use dfa::{Dfa, StateId, Transition};
pub use position::{Position, PositionSet};

use matcher::{DfaEvaluator, PatternEvaluatorMut};

/// Evaluates `input` against a compiled automaton, returning `true` if the
/// whole input is accepted.
///
/// Characters without a defined transition, including characters that never
/// appeared in the source expression, reject the input.
pub fn run(dfa: &Dfa, input: &str) -> bool {
    DfaEvaluator::new(dfa).initial_state().matches(input.chars())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_accept_only_complete_matches() {
        // approximate to `a.b`
        let mut dfa = Dfa::new(PositionSet::from([1]));
        let start = dfa.start();
        let (after_a, _) = dfa.insert_state(PositionSet::from([2]));
        let (after_b, _) = dfa.insert_state(PositionSet::from([3]));
        dfa.insert_transition(start, 'a', after_a);
        dfa.insert_transition(after_a, 'b', after_b);
        dfa.mark_accepting(after_b);

        let input_output = [
            ("", false),
            ("a", false),
            ("ab", true),
            ("abb", false),
            ("ba", false),
            ("ac", false),
        ];

        for (input, expected) in input_output {
            assert_eq!((input, expected), (input, run(&dfa, input)))
        }
    }
}
