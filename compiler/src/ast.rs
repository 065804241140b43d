//! Defines the token types shared by the parser and each compilation stage.

use std::collections::BTreeSet;
use std::fmt::Display;

/// The binary and unary operators of an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `.`
    Concatenation,
    /// `|`
    Union,
    /// `*`, a postfix unary operator.
    KleeneStar,
}

impl Operator {
    /// Returns `true` if an operator already on the stack must be emitted
    /// before `incoming` is pushed.
    ///
    /// `*` always yields, `.` yields to everything but `*` and `|` only yields
    /// to another `|`. Equal precedence yields, making every binary operator
    /// left-associative.
    pub fn yields_to(&self, incoming: &Operator) -> bool {
        match self {
            Operator::KleeneStar => true,
            Operator::Concatenation => !matches!(incoming, Operator::KleeneStar),
            Operator::Union => matches!(incoming, Operator::Union),
        }
    }

    /// The number of operands the operator consumes.
    pub fn arity(&self) -> usize {
        match self {
            Operator::KleeneStar => 1,
            Operator::Concatenation | Operator::Union => 2,
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let repr = match self {
            Operator::Concatenation => '.',
            Operator::Union => '|',
            Operator::KleeneStar => '*',
        };

        write!(f, "{}", repr)
    }
}

/// An infix token as read from the expression line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Symbol(char),
    Operator(Operator),
    LeftParen,
    RightParen,
}

impl From<Operator> for Token {
    fn from(op: Operator) -> Self {
        Token::Operator(op)
    }
}

/// A leaf symbol in the augmented expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    Char(char),
    /// Appended to the end of every expression. Reaching it means the input
    /// consumed so far is accepted.
    EndMarker,
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::Char(c) => write!(f, "{}", c),
            Symbol::EndMarker => write!(f, "#"),
        }
    }
}

/// A token of a postfix-ordered expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostfixToken {
    Leaf(Symbol),
    Operator(Operator),
}

impl From<Operator> for PostfixToken {
    fn from(op: Operator) -> Self {
        PostfixToken::Operator(op)
    }
}

impl Display for PostfixToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PostfixToken::Leaf(symbol) => write!(f, "{}", symbol),
            PostfixToken::Operator(op) => write!(f, "{}", op),
        }
    }
}

/// A postfix token stream, rendered without separators, e.g. `ab|*a.`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Postfix(pub Vec<PostfixToken>);

impl AsRef<[PostfixToken]> for Postfix {
    fn as_ref(&self) -> &[PostfixToken] {
        &self.0
    }
}

impl Display for Postfix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.iter().try_for_each(|token| write!(f, "{}", token))
    }
}

/// The declared set of input characters.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Alphabet(pub BTreeSet<char>);

impl Alphabet {
    pub fn contains(&self, c: &char) -> bool {
        self.0.contains(c)
    }
}

impl FromIterator<char> for Alphabet {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
