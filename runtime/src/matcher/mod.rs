use crate::dfa::{Dfa, StateId};

pub trait PatternEvaluatorMut: Sized {
    /// The input interable type to be compared.
    type Item;

    fn initial_state(mut self) -> Self {
        self.initial_state_mut();
        self
    }

    /// Resets the evaluator to its initial state.
    fn initial_state_mut(&mut self);

    /// Returns a boolean signifying if the match is in a final state.
    fn is_in_accept_state(&self) -> bool;

    /// Attempts to advance to the next state, returning an [Option] signifying
    /// the success of that advance.
    fn advance_mut<'a>(&mut self, next: &'a Self::Item) -> Option<&'a Self::Item>;

    fn matches<I>(&mut self, iter: I) -> bool
    where
        I: Iterator<Item = Self::Item>,
    {
        iter.fold(self.is_in_accept_state(), |_, item| {
            self.advance_mut(&item);

            self.is_in_accept_state()
        })
    }
}

/// Evaluates input one character at a time against a [Dfa].
///
/// # Examples
///
/// ```
/// use regex_dfa_runtime::matcher::*;
/// use regex_dfa_runtime::{Dfa, PositionSet};
///
/// // a single `a` transition into an accepting state.
/// let mut dfa = Dfa::new(PositionSet::from([1]));
/// let (accept, _) = dfa.insert_state(PositionSet::from([2]));
/// dfa.insert_transition(dfa.start(), 'a', accept);
/// dfa.mark_accepting(accept);
///
/// let mut evaluator = DfaEvaluator::new(&dfa).initial_state();
/// assert_eq!(Some(&'a'), evaluator.advance_mut(&'a'));
/// assert!(evaluator.is_in_accept_state());
///
/// // no further transitions exist, leaving the evaluator dead.
/// assert!(evaluator.advance_mut(&'a').is_none());
/// assert!(!evaluator.is_in_accept_state());
///
/// evaluator.initial_state_mut();
/// assert!(evaluator.matches("a".chars()));
///
/// evaluator.initial_state_mut();
/// assert!(!evaluator.matches("ab".chars()));
/// ```
pub struct DfaEvaluator<'a> {
    dfa: &'a Dfa,
    /// `None` once a character without a transition has been consumed.
    current: Option<StateId>,
}

impl<'a> DfaEvaluator<'a> {
    #[must_use]
    pub fn new(dfa: &'a Dfa) -> Self {
        Self {
            dfa,
            current: Some(dfa.start()),
        }
    }

    /// Returns the current state, or `None` if the evaluator is dead.
    pub fn current_state(&self) -> Option<StateId> {
        self.current
    }
}

impl<'d> PatternEvaluatorMut for DfaEvaluator<'d> {
    type Item = char;

    fn initial_state_mut(&mut self) {
        self.current = Some(self.dfa.start());
    }

    fn is_in_accept_state(&self) -> bool {
        self.current
            .map(|state| self.dfa.is_accepting(state))
            .unwrap_or(false)
    }

    fn advance_mut<'a>(&mut self, next: &'a Self::Item) -> Option<&'a Self::Item> {
        self.current = self
            .current
            .and_then(|state| self.dfa.transition(state, *next));

        self.current.map(|_| next)
    }
}
