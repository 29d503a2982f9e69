//! Infix to postfix conversion.
//!
//! Patterns are written in the usual infix form, where concatenation is
//! implicit (`ab` means `a` followed by `b`). Before the automaton can be
//! built, [`insert_concat_operator`] makes every concatenation explicit with
//! the [`CONCAT`] marker, and [`to_postfix`] reorders the tokens into reverse
//! polish notation with the shunting-yard algorithm, so that the builder can
//! evaluate them with a single operand stack and no notion of precedence.

use thiserror::Error;

/// The explicit concatenation marker. It is reserved: a pattern may not use
/// it as a literal.
pub const CONCAT: char = '.';

/// Errors detected while turning a pattern into postfix form. Positions
/// count chars of the expression being looked at.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A `)` without a matching `(`, or a `(` that is never closed.
    #[error("unbalanced parenthesis at position {position}")]
    UnbalancedParenthesis { position: usize },
    #[error("reserved symbol {symbol:?} at position {position} cannot be used as a literal")]
    ReservedSymbol { symbol: char, position: usize },
}

/// A single symbol of a pattern, in either infix or postfix form.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Token {
    Literal(char),
    Concat,
    Union,
    Star,
    OpenParen,
    CloseParen,
}

impl Token {
    pub fn from_char(c: char) -> Self {
        match c {
            CONCAT => Token::Concat,
            '|' => Token::Union,
            '*' => Token::Star,
            '(' => Token::OpenParen,
            ')' => Token::CloseParen,
            c => Token::Literal(c),
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Token::Literal(c) => c,
            Token::Concat => CONCAT,
            Token::Union => '|',
            Token::Star => '*',
            Token::OpenParen => '(',
            Token::CloseParen => ')',
        }
    }

    /// Binding strength of an operator, `None` for everything else.
    pub fn precedence(self) -> Option<u8> {
        match self {
            Token::Union => Some(0),
            Token::Concat => Some(1),
            Token::Star => Some(2),
            _ => None,
        }
    }
}

/// Rejects patterns that use the concatenation marker as a literal.
pub fn check_literals(exp: &str) -> Result<(), ParseError> {
    match exp.chars().position(|c| c == CONCAT) {
        Some(position) => Err(ParseError::ReservedSymbol {
            symbol: CONCAT,
            position,
        }),
        None => Ok(()),
    }
}

/// Returns `exp` with a [`CONCAT`] marker between every pair of tokens that
/// are implicitly concatenated, e.g. `a(bb)*a` becomes `a.(b.b)*.a`.
pub fn insert_concat_operator(exp: &str) -> String {
    let tokens: Vec<char> = exp.chars().collect();
    let mut output = String::with_capacity(2 * exp.len());

    for (i, &token) in tokens.iter().enumerate() {
        output.push(token);

        if matches!(Token::from_char(token), Token::OpenParen | Token::Union) {
            continue;
        }

        let Some(&lookahead) = tokens.get(i + 1) else {
            continue;
        };
        match Token::from_char(lookahead) {
            Token::Star | Token::Union | Token::CloseParen => (),
            _ => output.push(CONCAT),
        }
    }

    output
}

/// Converts a concat-annotated infix expression into postfix form.
///
/// All three operators are left associative; `*` binds tighter than `.`,
/// which binds tighter than `|`.
pub fn to_postfix(exp: &str) -> Result<String, ParseError> {
    let mut output = String::with_capacity(exp.len());
    // Open parentheses keep their position for error reporting.
    let mut operators: Vec<(Token, usize)> = Vec::new();

    for (position, c) in exp.chars().enumerate() {
        let token = Token::from_char(c);
        match token {
            Token::Literal(c) => output.push(c),
            Token::OpenParen => operators.push((token, position)),
            Token::CloseParen => loop {
                match operators.pop() {
                    Some((Token::OpenParen, _)) => break,
                    Some((op, _)) => output.push(op.as_char()),
                    None => return Err(ParseError::UnbalancedParenthesis { position }),
                }
            },
            Token::Concat | Token::Union | Token::Star => {
                let incoming = token.precedence();
                while let Some(&(top, _)) = operators.last() {
                    if top == Token::OpenParen || top.precedence() < incoming {
                        break;
                    }
                    output.push(top.as_char());
                    operators.pop();
                }
                operators.push((token, position));
            }
        }
    }

    while let Some((op, position)) = operators.pop() {
        if op == Token::OpenParen {
            return Err(ParseError::UnbalancedParenthesis { position });
        }
        output.push(op.as_char());
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_insert_concat() {
        assert_eq!(insert_concat_operator("ab"), "a.b");
        assert_eq!(insert_concat_operator("a*b"), "a*.b");
        assert_eq!(insert_concat_operator("a(bb)*a"), "a.(b.b)*.a");
        assert_eq!(insert_concat_operator("a|b"), "a|b");
        assert_eq!(insert_concat_operator("(a|b)*abb"), "(a|b)*.a.b.b");
        assert_eq!(insert_concat_operator("(a)(b)"), "(a).(b)");
        assert_eq!(insert_concat_operator(""), "");
    }

    #[test]
    fn test_insert_concat_multibyte() {
        assert_eq!(insert_concat_operator("éà*"), "é.à*");
    }

    #[test]
    fn test_to_postfix() {
        assert_eq!(to_postfix("a.b").unwrap(), "ab.");
        assert_eq!(to_postfix("a|b").unwrap(), "ab|");
        assert_eq!(to_postfix("a.b*").unwrap(), "ab*.");
        assert_eq!(to_postfix("(a.b)|c").unwrap(), "ab.c|");
        assert_eq!(to_postfix("(a|b)*.a.b.b").unwrap(), "ab|*a.b.b.");
        assert_eq!(to_postfix("a|b|c").unwrap(), "ab|c|");
        assert_eq!(to_postfix("").unwrap(), "");
    }

    #[test]
    fn test_unbalanced() {
        assert_eq!(
            to_postfix("a)"),
            Err(ParseError::UnbalancedParenthesis { position: 1 })
        );
        assert_eq!(
            to_postfix("(a.(b)"),
            Err(ParseError::UnbalancedParenthesis { position: 0 })
        );
        assert_eq!(
            to_postfix(")("),
            Err(ParseError::UnbalancedParenthesis { position: 0 })
        );
    }

    #[test]
    fn test_reserved_literal() {
        assert_eq!(check_literals("ab*|c"), Ok(()));
        assert_eq!(
            check_literals("ab.c"),
            Err(ParseError::ReservedSymbol {
                symbol: '.',
                position: 2
            })
        );
    }
}
