use parcel::parsers::character::{alphabetic, digit, expect_character};
use parcel::prelude::v1::*;

use super::ast::{Alphabet, Operator, Token};

/// Represents the ways the alphabet and expression lines can fail to parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseErr {
    #[error("expected an alphabet line followed by an expression line")]
    MissingLine,

    #[error("alphabet must list single symbols separated by spaces")]
    InvalidAlphabet,

    #[error("expression is empty")]
    EmptyExpression,

    #[error("unexpected character `{found}` at offset {offset}")]
    UnexpectedCharacter { offset: usize, found: char },

    #[error("symbol `{0}` is not declared in the alphabet")]
    UndeclaredSymbol(char),

    #[error("unspecified parse error occurred: {0}")]
    Undefined(String),
}

/// A parsed input, the declared alphabet and the infix expression over it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub alphabet: Alphabet,
    pub expression: Vec<Token>,
}

/// Parses a two line input, the first line being a space-separated alphabet
/// and the second an expression written with explicit operators.
///
/// # Example
///
/// ```
/// use regex_dfa_compiler::ast::*;
/// use regex_dfa_compiler::parse;
///
/// let source = parse("a b\n(a|b)*.a\n").unwrap();
///
/// assert_eq!(Alphabet::from_iter(['a', 'b']), source.alphabet);
/// assert_eq!(8, source.expression.len());
/// ```
pub fn parse(input: &str) -> Result<Source, ParseErr> {
    let mut lines = input.lines();
    let alphabet_line = lines.next().ok_or(ParseErr::MissingLine)?;
    let expression_line = lines.next().ok_or(ParseErr::MissingLine)?;

    let alphabet = parse_alphabet(&enumerate_trimmed(alphabet_line))?;
    let expression = parse_expression(&enumerate_trimmed(expression_line))?;

    let undeclared = expression.iter().find_map(|token| match token {
        Token::Symbol(c) if !alphabet.contains(c) => Some(*c),
        _ => None,
    });

    match undeclared {
        Some(c) => Err(ParseErr::UndeclaredSymbol(c)),
        None => Ok(Source {
            alphabet,
            expression,
        }),
    }
}

/// Parses a line of single symbols separated by one or more spaces.
pub fn parse_alphabet(input: &[(usize, char)]) -> Result<Alphabet, ParseErr> {
    parse_complete(alphabet(), input)?.ok_or(ParseErr::InvalidAlphabet)
}

/// Parses an expression into its infix tokens.
pub fn parse_expression(input: &[(usize, char)]) -> Result<Vec<Token>, ParseErr> {
    parse_complete(expression(), input)?.ok_or(ParseErr::EmptyExpression)
}

fn enumerate_trimmed(line: &str) -> Vec<(usize, char)> {
    line.trim().chars().enumerate().collect()
}

/// Runs a parser, requiring that it consumes the entire input.
fn parse_complete<'a, T>(
    parser: impl Parser<'a, &'a [(usize, char)], T>,
    input: &'a [(usize, char)],
) -> Result<Option<T>, ParseErr> {
    match parser.parse(input) {
        Ok(MatchStatus::Match {
            remainder, inner, ..
        }) => match remainder.first() {
            None => Ok(Some(inner)),
            Some(&(offset, found)) => Err(ParseErr::UnexpectedCharacter { offset, found }),
        },
        // nothing was consumed, an empty line is left for the caller to name.
        Ok(MatchStatus::NoMatch(..)) => match input.first() {
            None => Ok(None),
            Some(&(offset, found)) => Err(ParseErr::UnexpectedCharacter { offset, found }),
        },
        Err(err) => Err(ParseErr::Undefined(err.to_string())),
    }
}

// Alphabet

fn alphabet<'a>() -> impl Parser<'a, &'a [(usize, char)], Alphabet> {
    parcel::join(
        symbol(),
        parcel::zero_or_more(parcel::right(parcel::join(
            parcel::one_or_more(expect_character(' ')),
            symbol(),
        ))),
    )
    .map(|(head, tail)| vec![head].into_iter().chain(tail).collect::<Alphabet>())
}

// Expression

fn expression<'a>() -> impl Parser<'a, &'a [(usize, char)], Vec<Token>> {
    parcel::one_or_more(token())
}

fn token<'a>() -> impl Parser<'a, &'a [(usize, char)], Token> {
    parcel::or(symbol().map(Token::Symbol), || {
        parcel::or(operator().map(Token::Operator), || group_delimiter())
    })
}

fn operator<'a>() -> impl Parser<'a, &'a [(usize, char)], Operator> {
    parcel::or(
        expect_character('.').map(|_| Operator::Concatenation),
        || {
            parcel::or(expect_character('|').map(|_| Operator::Union), || {
                expect_character('*').map(|_| Operator::KleeneStar)
            })
        },
    )
}

fn group_delimiter<'a>() -> impl Parser<'a, &'a [(usize, char)], Token> {
    parcel::or(expect_character('(').map(|_| Token::LeftParen), || {
        expect_character(')').map(|_| Token::RightParen)
    })
}

// Terminals

fn symbol<'a>() -> impl Parser<'a, &'a [(usize, char)], char> {
    parcel::or(alphabetic(), || digit(10))
}
