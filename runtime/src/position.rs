//! Provides the position types that identify leaf occurrences in an augmented
//! expression, and the canonical set of positions that names a DFA state.

use std::collections::btree_set::{self, BTreeSet};
use std::fmt::Display;

/// A unique, 1-based index for a single symbol occurrence in an augmented
/// expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position(usize);

impl Position {
    /// The first position handed out for an expression.
    pub const FIRST: Position = Position(1);

    #[must_use]
    pub const fn new(pos: usize) -> Self {
        Self(pos)
    }

    pub const fn as_usize(&self) -> usize {
        self.0
    }

    /// Returns the position directly following this one.
    #[must_use]
    pub const fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl From<usize> for Position {
    fn from(pos: usize) -> Self {
        Self::new(pos)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An ordered set of positions.
///
/// Ordering is what makes this usable as a canonical key: two sets are equal,
/// hash equally and render identically exactly when they hold the same
/// positions, regardless of insertion order.
///
/// # Example
///
/// ```
/// use regex_dfa_runtime::{Position, PositionSet};
///
/// let mut set = PositionSet::from([3, 1]);
/// set.insert(Position::new(2));
///
/// assert_eq!(PositionSet::from([1, 2, 3]), set);
/// assert_eq!("1 2 3", set.to_string());
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PositionSet(BTreeSet<Position>);

impl PositionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Instantiates a set holding only the passed position.
    #[must_use]
    pub fn singleton(pos: Position) -> Self {
        Self([pos].into_iter().collect())
    }

    /// Inserts a position, returning `true` if it was not already present.
    pub fn insert(&mut self, pos: Position) -> bool {
        self.0.insert(pos)
    }

    /// Merges every position of `other` into the set.
    pub fn union_mut(&mut self, other: &PositionSet) {
        self.0.extend(other.0.iter().copied())
    }

    /// Returns a new set containing the positions of both sets.
    #[must_use]
    pub fn union(&self, other: &PositionSet) -> Self {
        let mut merged = self.clone();
        merged.union_mut(other);
        merged
    }

    pub fn contains(&self, pos: &Position) -> bool {
        self.0.contains(pos)
    }

    /// Returns `true` if every position in the set is also in `other`.
    pub fn is_subset(&self, other: &PositionSet) -> bool {
        self.0.is_subset(&other.0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates the positions in ascending order.
    pub fn iter(&self) -> btree_set::Iter<'_, Position> {
        self.0.iter()
    }
}

impl FromIterator<Position> for PositionSet {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[usize; N]> for PositionSet {
    fn from(positions: [usize; N]) -> Self {
        positions.into_iter().map(Position::from).collect()
    }
}

impl<'a> IntoIterator for &'a PositionSet {
    type Item = &'a Position;
    type IntoIter = btree_set::Iter<'a, Position>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for PositionSet {
    type Item = Position;
    type IntoIter = btree_set::IntoIter<Position>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Display for PositionSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rendered = self
            .iter()
            .map(|pos| pos.to_string())
            .collect::<Vec<_>>()
            .join(" ");

        write!(f, "{}", rendered)
    }
}
