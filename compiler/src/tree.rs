//! Evaluates the `nullable`, `firstpos` and `lastpos` attributes of an
//! augmented postfix expression in a single pass, accumulating the
//! `followpos` table as it goes.
//!
//! The syntax tree is never materialized. Each node's attributes are pushed
//! onto a value stack as soon as they are known, and an operator consumes the
//! records of its operands.

use std::collections::BTreeMap;
use std::fmt::Display;

use regex_dfa_runtime::{Position, PositionSet};

use super::ast::{Operator, PostfixToken, Symbol};
use super::compiler::CompileError;

/// The attributes of one syntax tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeRecord {
    pub firstpos: PositionSet,
    pub lastpos: PositionSet,
    pub nullable: bool,
}

impl AttributeRecord {
    /// The record for a leaf at `pos`.
    pub fn leaf(pos: Position) -> Self {
        Self {
            firstpos: PositionSet::singleton(pos),
            lastpos: PositionSet::singleton(pos),
            nullable: false,
        }
    }

    pub fn kleene_star(child: &AttributeRecord) -> Self {
        Self {
            firstpos: child.firstpos.clone(),
            lastpos: child.lastpos.clone(),
            nullable: true,
        }
    }

    pub fn union(left: &AttributeRecord, right: &AttributeRecord) -> Self {
        Self {
            firstpos: left.firstpos.union(&right.firstpos),
            lastpos: left.lastpos.union(&right.lastpos),
            nullable: left.nullable || right.nullable,
        }
    }

    pub fn concatenation(left: &AttributeRecord, right: &AttributeRecord) -> Self {
        let firstpos = if left.nullable {
            left.firstpos.union(&right.firstpos)
        } else {
            left.firstpos.clone()
        };
        let lastpos = if right.nullable {
            left.lastpos.union(&right.lastpos)
        } else {
            right.lastpos.clone()
        };

        Self {
            firstpos,
            lastpos,
            nullable: left.nullable && right.nullable,
        }
    }
}

/// The followpos value of a single position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FollowEntry {
    Positions(PositionSet),
    /// Held only by the end marker. It contributes no positions to a union.
    Accept,
}

impl Display for FollowEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FollowEntry::Positions(positions) => write!(f, "{{{}}}", positions),
            FollowEntry::Accept => write!(f, "accept"),
        }
    }
}

/// An accumulator of followpos sets. Entries only ever grow.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FollowposTable(BTreeMap<Position, FollowEntry>);

impl FollowposTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unions `positions` into the followpos of `pos`, creating the entry if
    /// it is absent.
    pub fn extend(&mut self, pos: Position, positions: &PositionSet) {
        match self.0.get_mut(&pos) {
            Some(FollowEntry::Positions(existing)) => existing.union_mut(positions),
            // the end marker never precedes anything.
            Some(FollowEntry::Accept) => (),
            None => {
                self.0
                    .insert(pos, FollowEntry::Positions(positions.clone()));
            }
        }
    }

    /// Defines `pos` as the accepting position.
    pub fn set_accept(&mut self, pos: Position) {
        self.0.insert(pos, FollowEntry::Accept);
    }

    pub fn get(&self, pos: &Position) -> Option<&FollowEntry> {
        self.0.get(pos)
    }

    /// Returns the union of the followpos sets of every position in
    /// `positions`, ignoring the accept sentinel.
    pub fn union_of(&self, positions: &PositionSet) -> Result<PositionSet, CompileError> {
        positions
            .iter()
            .try_fold(PositionSet::new(), |mut acc, pos| match self.get(pos) {
                Some(FollowEntry::Positions(follow)) => {
                    acc.union_mut(follow);
                    Ok(acc)
                }
                Some(FollowEntry::Accept) => Ok(acc),
                None => Err(CompileError::UnresolvedPosition(*pos)),
            })
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Position, &FollowEntry)> {
        self.0.iter()
    }
}

/// Maps every position to the symbol it was assigned.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SymbolTable(BTreeMap<Position, Symbol>);

impl SymbolTable {
    pub fn get(&self, pos: &Position) -> Option<Symbol> {
        self.0.get(pos).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Position, &Symbol)> {
        self.0.iter()
    }

    fn insert(&mut self, pos: Position, symbol: Symbol) {
        self.0.insert(pos, symbol);
    }
}

/// The result of attribute evaluation over `(expr).#`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AugmentedTree {
    root: AttributeRecord,
    symbols: SymbolTable,
    followpos: FollowposTable,
    end_marker: Position,
}

impl AugmentedTree {
    pub fn root(&self) -> &AttributeRecord {
        &self.root
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn followpos(&self) -> &FollowposTable {
        &self.followpos
    }

    /// The position assigned to the appended end marker.
    pub fn end_marker(&self) -> Position {
        self.end_marker
    }
}

impl Display for AugmentedTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "root: firstpos={{{}}} lastpos={{{}}} nullable={}",
            self.root.firstpos, self.root.lastpos, self.root.nullable
        )?;
        writeln!(f, "pos\tsymbol\tfollowpos")?;
        for (pos, symbol) in self.symbols.iter() {
            let follow = self
                .followpos
                .get(pos)
                .map(|entry| entry.to_string())
                .unwrap_or_else(|| "{}".to_string());

            writeln!(f, "{}\t{}\t{}", pos, symbol, follow)?;
        }

        Ok(())
    }
}

/// Builds the attributes of `(expr).#` from the postfix order of `expr`.
///
/// # Example
///
/// ```
/// use regex_dfa_compiler::ast::*;
/// use regex_dfa_compiler::tree::{build, FollowEntry};
/// use regex_dfa_runtime::{Position, PositionSet};
///
/// // approximate to `a*`
/// let postfix = [
///     PostfixToken::Leaf(Symbol::Char('a')),
///     PostfixToken::Operator(Operator::KleeneStar),
/// ];
///
/// let tree = build(&postfix).unwrap();
///
/// assert_eq!(Position::new(2), tree.end_marker());
/// assert_eq!(&PositionSet::from([1, 2]), &tree.root().firstpos);
/// assert_eq!(
///     Some(&FollowEntry::Positions(PositionSet::from([1, 2]))),
///     tree.followpos().get(&Position::new(1))
/// );
/// ```
pub fn build(postfix: &[PostfixToken]) -> Result<AugmentedTree, CompileError> {
    if postfix.is_empty() {
        return Err(CompileError::EmptyExpression);
    }

    let augmentation = [
        PostfixToken::Leaf(Symbol::EndMarker),
        PostfixToken::Operator(Operator::Concatenation),
    ];

    let mut builder = TreeBuilder::with_capacity(postfix.len() + augmentation.len());
    for token in postfix.iter().chain(augmentation.iter()) {
        builder.consume(token)?;
    }

    builder.finish()
}

/// Holds the value stack and the accumulated tables across a single pass.
struct TreeBuilder {
    stack: Vec<AttributeRecord>,
    symbols: SymbolTable,
    followpos: FollowposTable,
    next_position: Position,
}

impl TreeBuilder {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            stack: Vec::with_capacity(capacity),
            symbols: SymbolTable::default(),
            followpos: FollowposTable::new(),
            next_position: Position::FIRST,
        }
    }

    fn consume(&mut self, token: &PostfixToken) -> Result<(), CompileError> {
        let record = match token {
            PostfixToken::Leaf(symbol) => self.leaf(*symbol),
            PostfixToken::Operator(op) => self.operator(*op)?,
        };

        self.stack.push(record);
        Ok(())
    }

    fn leaf(&mut self, symbol: Symbol) -> AttributeRecord {
        let pos = self.next_position;
        self.symbols.insert(pos, symbol);
        self.next_position = pos.next();

        AttributeRecord::leaf(pos)
    }

    /// Pops the operands of `op`, returning the combined record.
    fn operator(&mut self, op: Operator) -> Result<AttributeRecord, CompileError> {
        if self.stack.len() < op.arity() {
            return Err(CompileError::MissingOperand(op));
        }

        let mut operands = self.stack.split_off(self.stack.len() - op.arity());
        let record = match (op, operands.pop(), operands.pop()) {
            (Operator::KleeneStar, Some(child), None) => {
                for pos in child.lastpos.iter() {
                    self.followpos.extend(*pos, &child.firstpos);
                }

                AttributeRecord::kleene_star(&child)
            }
            (Operator::Union, Some(right), Some(left)) => AttributeRecord::union(&left, &right),
            (Operator::Concatenation, Some(right), Some(left)) => {
                for pos in left.lastpos.iter() {
                    self.followpos.extend(*pos, &right.firstpos);
                }

                AttributeRecord::concatenation(&left, &right)
            }
            _ => return Err(CompileError::MissingOperand(op)),
        };

        Ok(record)
    }

    fn finish(mut self) -> Result<AugmentedTree, CompileError> {
        let root = match self.stack.len() {
            1 => self.stack.pop(),
            0 => None,
            remaining => return Err(CompileError::DanglingOperand(remaining - 1)),
        }
        .ok_or(CompileError::EmptyExpression)?;

        // the last leaf consumed is always the appended end marker.
        let end_marker = Position::new(self.next_position.as_usize() - 1);
        self.followpos.set_accept(end_marker);

        Ok(AugmentedTree {
            root,
            symbols: self.symbols,
            followpos: self.followpos,
            end_marker,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_expression;
    use crate::postfix::to_postfix;

    fn tree_of(expr: &str) -> Result<AugmentedTree, CompileError> {
        let input = expr.chars().enumerate().collect::<Vec<(usize, char)>>();
        let tokens = parse_expression(&input).unwrap();

        to_postfix(&tokens).and_then(|postfix| build(postfix.as_ref()))
    }

    fn follow(tree: &AugmentedTree, pos: usize) -> Option<&FollowEntry> {
        tree.followpos().get(&Position::new(pos))
    }

    #[test]
    fn should_assign_positions_left_to_right() {
        let tree = tree_of("(a|b)*.a.b.b").unwrap();

        let symbols: Vec<_> = tree
            .symbols()
            .iter()
            .map(|(pos, symbol)| (pos.as_usize(), *symbol))
            .collect();

        assert_eq!(
            vec![
                (1, Symbol::Char('a')),
                (2, Symbol::Char('b')),
                (3, Symbol::Char('a')),
                (4, Symbol::Char('b')),
                (5, Symbol::Char('b')),
                (6, Symbol::EndMarker),
            ],
            symbols
        );
        assert_eq!(Position::new(6), tree.end_marker());
    }

    #[test]
    fn should_compute_followpos_for_textbook_expression() {
        let tree = tree_of("(a|b)*.a.b.b").unwrap();

        let expected = [
            (1, FollowEntry::Positions(PositionSet::from([1, 2, 3]))),
            (2, FollowEntry::Positions(PositionSet::from([1, 2, 3]))),
            (3, FollowEntry::Positions(PositionSet::from([4]))),
            (4, FollowEntry::Positions(PositionSet::from([5]))),
            (5, FollowEntry::Positions(PositionSet::from([6]))),
            (6, FollowEntry::Accept),
        ];

        for (pos, entry) in expected {
            assert_eq!((pos, Some(&entry)), (pos, follow(&tree, pos)))
        }

        assert_eq!(6, tree.followpos().len());
        assert_eq!(&PositionSet::from([1, 2, 3]), &tree.root().firstpos);
        assert_eq!(&PositionSet::from([6]), &tree.root().lastpos);
        assert!(!tree.root().nullable);
    }

    #[test]
    fn should_define_leaf_attributes_by_position() {
        let leaf = AttributeRecord::leaf(Position::new(4));

        assert_eq!(PositionSet::from([4]), leaf.firstpos);
        assert_eq!(PositionSet::from([4]), leaf.lastpos);
        assert!(!leaf.nullable);
    }

    #[test]
    fn should_always_mark_star_nodes_nullable() {
        let leaf = AttributeRecord::leaf(Position::new(1));
        let star = AttributeRecord::kleene_star(&leaf);
        let nested = AttributeRecord::kleene_star(&star);

        assert!(star.nullable && nested.nullable);
        assert_eq!(leaf.firstpos, star.firstpos);
        assert_eq!(leaf.lastpos, star.lastpos);
    }

    #[test]
    fn should_exclude_right_firstpos_from_non_nullable_concatenation() {
        let a = AttributeRecord::leaf(Position::new(1));
        let b = AttributeRecord::leaf(Position::new(2));
        let a_star = AttributeRecord::kleene_star(&a);
        let b_star = AttributeRecord::kleene_star(&b);

        let input_output = [
            // a.b
            ((&a, &b), (PositionSet::from([1]), PositionSet::from([2]), false)),
            // a*.b
            ((&a_star, &b), (PositionSet::from([1, 2]), PositionSet::from([2]), false)),
            // a.b*
            ((&a, &b_star), (PositionSet::from([1]), PositionSet::from([1, 2]), false)),
            // a*.b*
            ((&a_star, &b_star), (PositionSet::from([1, 2]), PositionSet::from([1, 2]), true)),
        ];

        for (test_id, ((left, right), (firstpos, lastpos, nullable))) in
            input_output.into_iter().enumerate()
        {
            let record = AttributeRecord::concatenation(left, right);
            assert_eq!(
                (test_id, firstpos, lastpos, nullable),
                (test_id, record.firstpos, record.lastpos, record.nullable)
            )
        }
    }

    #[test]
    fn should_union_attributes_of_both_branches() {
        let a = AttributeRecord::leaf(Position::new(1));
        let b = AttributeRecord::leaf(Position::new(2));
        let b_star = AttributeRecord::kleene_star(&b);

        let either = AttributeRecord::union(&a, &b);
        assert_eq!(PositionSet::from([1, 2]), either.firstpos);
        assert_eq!(PositionSet::from([1, 2]), either.lastpos);
        assert!(!either.nullable);

        assert!(AttributeRecord::union(&a, &b_star).nullable);
    }

    #[test]
    fn should_merge_rather_than_overwrite_followpos() {
        // position 1 gains {1} from the star and {2} from the concatenation.
        let tree = tree_of("a*.b").unwrap();

        assert_eq!(
            Some(&FollowEntry::Positions(PositionSet::from([1, 2]))),
            follow(&tree, 1)
        );
        assert_eq!(
            Some(&FollowEntry::Positions(PositionSet::from([3]))),
            follow(&tree, 2)
        );
        assert_eq!(Some(&FollowEntry::Accept), follow(&tree, 3));
    }

    #[test]
    fn should_only_grow_followpos_entries() {
        let mut table = FollowposTable::new();
        let pos = Position::new(1);

        table.extend(pos, &PositionSet::from([2, 3]));
        table.extend(pos, &PositionSet::from([1]));
        table.extend(pos, &PositionSet::new());

        assert_eq!(
            Some(&FollowEntry::Positions(PositionSet::from([1, 2, 3]))),
            table.get(&pos)
        );
    }

    #[test]
    fn should_exclude_accept_sentinel_from_unions() {
        let mut table = FollowposTable::new();
        table.extend(Position::new(1), &PositionSet::from([1, 2]));
        table.set_accept(Position::new(2));

        assert_eq!(
            Ok(PositionSet::from([1, 2])),
            table.union_of(&PositionSet::from([1, 2]))
        );
        assert_eq!(Ok(PositionSet::new()), table.union_of(&PositionSet::from([2])));
        assert_eq!(
            Err(CompileError::UnresolvedPosition(Position::new(3))),
            table.union_of(&PositionSet::from([1, 3]))
        );
    }

    #[test]
    fn should_fail_on_malformed_postfix() {
        let a = PostfixToken::Leaf(Symbol::Char('a'));
        let b = PostfixToken::Leaf(Symbol::Char('b'));

        let input_output = [
            (vec![], CompileError::EmptyExpression),
            (
                vec![PostfixToken::Operator(Operator::KleeneStar)],
                CompileError::MissingOperand(Operator::KleeneStar),
            ),
            (
                vec![a, PostfixToken::Operator(Operator::Union)],
                CompileError::MissingOperand(Operator::Union),
            ),
            // the appended concatenation absorbs one operand, leaving `a`.
            (vec![a, b], CompileError::DanglingOperand(1)),
        ];

        for (test_id, (postfix, expected)) in input_output.into_iter().enumerate() {
            assert_eq!((test_id, Err(expected)), (test_id, build(&postfix)))
        }
    }
}
