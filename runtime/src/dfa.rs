//! Provides the deterministic finite automaton produced by the compiler.
//!
//! All states are owned by value in an arena and refer to one another by
//! [StateId], so a state may transition back to itself or to an earlier state
//! without any ownership cycle.

use std::collections::{BTreeSet, HashMap};
use std::fmt::Display;

use crate::graph::{Graph, Node};
use crate::position::PositionSet;

/// An index for a state in a [Dfa].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateId(usize);

impl StateId {
    pub const fn as_usize(&self) -> usize {
        self.0
    }
}

impl From<usize> for StateId {
    fn from(id: usize) -> Self {
        Self(id)
    }
}

impl Display for StateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "s{}", self.0)
    }
}

/// A single labeled transition between two states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Transition {
    pub from: StateId,
    pub symbol: char,
    pub to: StateId,
}

impl Transition {
    pub fn new(from: StateId, symbol: char, to: StateId) -> Self {
        Self { from, symbol, to }
    }
}

/// A deterministic finite automaton whose states are identified by the set
/// of positions they represent.
pub struct Dfa {
    graph: Graph<PositionSet>,
    /// Maps a state's canonical position set back to its index.
    registry: HashMap<PositionSet, StateId>,
    start: StateId,
    accepting: BTreeSet<StateId>,
}

impl Dfa {
    /// Instantiates an automaton with a single, non-accepting, start state.
    pub fn new(start_positions: PositionSet) -> Self {
        let mut graph = Graph::default();
        let start = StateId(graph.insert_node_mut(Node::new(start_positions.clone())));
        let registry = [(start_positions, start)].into_iter().collect();

        Self {
            graph,
            registry,
            start,
            accepting: BTreeSet::new(),
        }
    }

    pub fn start(&self) -> StateId {
        self.start
    }

    /// Returns the number of states in the automaton.
    pub fn state_cnt(&self) -> usize {
        self.graph.node_cnt()
    }

    /// Returns the number of transitions in the automaton.
    pub fn transition_cnt(&self) -> usize {
        self.graph.edge_cnt()
    }

    /// Borrows the position set that identifies a state.
    pub fn positions(&self, state: StateId) -> Option<&PositionSet> {
        self.graph.get_node(state.0).map(|node| node.as_ref())
    }

    /// Looks up a state by its position set.
    pub fn find_state(&self, positions: &PositionSet) -> Option<StateId> {
        self.registry.get(positions).copied()
    }

    /// Returns the state identified by `positions`, creating it if it does not
    /// exist yet. The returned flag is `true` when the state was created.
    pub fn insert_state(&mut self, positions: PositionSet) -> (StateId, bool) {
        if let Some(existing) = self.find_state(&positions) {
            return (existing, false);
        }

        let state = StateId(self.graph.insert_node_mut(Node::new(positions.clone())));
        self.registry.insert(positions, state);
        (state, true)
    }

    /// Records a transition, returning `None` if either state is undefined or
    /// if `from` already has a transition on `symbol`.
    pub fn insert_transition(&mut self, from: StateId, symbol: char, to: StateId) -> Option<()> {
        if self.transition(from, symbol).is_some() {
            return None;
        }

        self.graph
            .insert_edge_mut(from.0, to.0, symbol)
            .map(|_| ())
    }

    /// Marks a state as accepting, returning `false` if the state is
    /// undefined.
    pub fn mark_accepting(&mut self, state: StateId) -> bool {
        if state.0 < self.state_cnt() {
            self.accepting.insert(state);
            true
        } else {
            false
        }
    }

    pub fn is_accepting(&self, state: StateId) -> bool {
        self.accepting.contains(&state)
    }

    /// Iterates all accepting states in ascending index order.
    pub fn accepting_states(&self) -> impl Iterator<Item = StateId> + '_ {
        self.accepting.iter().copied()
    }

    /// Returns the state reached by consuming `symbol` from `state`, if a
    /// transition exists.
    pub fn transition(&self, state: StateId, symbol: char) -> Option<StateId> {
        self.graph
            .successors(state.0)
            .find(|(label, _)| *label == symbol)
            .map(|(_, target)| StateId(target))
    }

    /// Returns every outgoing transition of a state ordered by symbol.
    pub fn transitions_from(&self, state: StateId) -> Vec<Transition> {
        let mut transitions: Vec<_> = self
            .graph
            .successors(state.0)
            .map(|(symbol, target)| Transition::new(state, symbol, StateId(target)))
            .collect();
        transitions.sort_unstable();
        transitions
    }

    /// Iterates the states reachable from the start state in breadth-first
    /// order, following transitions in ascending symbol order.
    pub fn states_breadth_first(&self) -> impl Iterator<Item = StateId> + '_ {
        self.graph
            .breadth_first_traversal(self.start.0)
            .map(StateId)
    }

    /// Follows `input` from the start state, returning the final state or
    /// `None` if some character has no transition.
    pub fn walk(&self, input: &str) -> Option<StateId> {
        input
            .chars()
            .try_fold(self.start, |state, c| self.transition(state, c))
    }
}

impl Display for Dfa {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for state in self.states_breadth_first() {
            let marker = match (state == self.start, self.is_accepting(state)) {
                (true, true) => "->*",
                (true, false) => "-> ",
                (false, true) => "  *",
                (false, false) => "   ",
            };
            let positions = self.positions(state).cloned().unwrap_or_default();

            writeln!(f, "{} {}: {{{}}}", marker, state, positions)?;
            for transition in self.transitions_from(state) {
                writeln!(f, "      {} -> {}", transition.symbol, transition.to)?;
            }
        }

        Ok(())
    }
}
