//! Translates an infix token stream into postfix order with an
//! operator-precedence (shunting-yard) scan.

use super::ast::{Operator, Postfix, PostfixToken, Symbol, Token};
use super::compiler::CompileError;

/// An entry on the operator stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stacked {
    LeftParen,
    Operator(Operator),
}

/// Converts an infix expression with explicit operators into postfix order.
///
/// No implicit concatenation is inserted, adjacent symbols must be joined
/// with an explicit `.`. Every operator must follow a complete operand and a
/// binary operator must also be followed by one, otherwise the expression is
/// rejected rather than reordered into a different one.
///
/// # Example
///
/// ```
/// use regex_dfa_compiler::ast::*;
/// use regex_dfa_compiler::to_postfix;
///
/// // approximate to `(a|b)*.a`
/// let infix = [
///     Token::LeftParen,
///     Token::Symbol('a'),
///     Token::Operator(Operator::Union),
///     Token::Symbol('b'),
///     Token::RightParen,
///     Token::Operator(Operator::KleeneStar),
///     Token::Operator(Operator::Concatenation),
///     Token::Symbol('a'),
/// ];
///
/// assert_eq!(
///     "ab|*a.",
///     to_postfix(&infix).map(|postfix| postfix.to_string()).unwrap()
/// );
/// ```
pub fn to_postfix(tokens: &[Token]) -> Result<Postfix, CompileError> {
    let mut operators: Vec<Stacked> = Vec::with_capacity(tokens.len());
    let mut output: Vec<PostfixToken> = Vec::with_capacity(tokens.len());
    let mut previous: Option<&Token> = None;

    for token in tokens {
        match token {
            Token::Operator(op) if !ends_operand(previous) => {
                return Err(CompileError::StrayOperator(*op))
            }
            Token::RightParen => check_right_operand(previous)?,
            _ => (),
        }
        previous = Some(token);

        match token {
            Token::Symbol(c) => output.push(PostfixToken::Leaf(Symbol::Char(*c))),
            Token::LeftParen => operators.push(Stacked::LeftParen),
            Token::RightParen => close_group(&mut operators, &mut output)?,
            // group boundaries are protected from precedence comparison.
            Token::Operator(op) if operators.last() == Some(&Stacked::LeftParen) => {
                operators.push(Stacked::Operator(*op))
            }
            Token::Operator(op) => {
                while let Some(&Stacked::Operator(top)) = operators.last() {
                    if !top.yields_to(op) {
                        break;
                    }

                    output.push(top.into());
                    operators.pop();
                }

                operators.push(Stacked::Operator(*op));
            }
        }
    }

    check_right_operand(previous)?;

    while let Some(stacked) = operators.pop() {
        match stacked {
            Stacked::Operator(op) => output.push(op.into()),
            Stacked::LeftParen => return Err(CompileError::UnbalancedParenthesis),
        }
    }

    Ok(Postfix(output))
}

/// Returns true if the token closes an operand: a symbol, a group or a star.
fn ends_operand(previous: Option<&Token>) -> bool {
    matches!(
        previous,
        Some(Token::Symbol(_) | Token::RightParen | Token::Operator(Operator::KleeneStar))
    )
}

/// Fails if a binary operator is left without its right operand.
fn check_right_operand(previous: Option<&Token>) -> Result<(), CompileError> {
    match previous {
        Some(Token::Operator(op)) if op.arity() == 2 => Err(CompileError::MissingOperand(*op)),
        _ => Ok(()),
    }
}

/// Emits every operator back to the nearest open group, discarding the `(`.
fn close_group(
    operators: &mut Vec<Stacked>,
    output: &mut Vec<PostfixToken>,
) -> Result<(), CompileError> {
    loop {
        match operators.pop() {
            Some(Stacked::Operator(op)) => output.push(op.into()),
            Some(Stacked::LeftParen) => return Ok(()),
            None => return Err(CompileError::UnbalancedParenthesis),
        }
    }
}
