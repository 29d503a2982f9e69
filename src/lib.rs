//! A small regular expression engine built on Thompson's construction.
//!
//! Patterns are made of literal characters, `|`, `*` and parentheses. A
//! pattern goes through three stages: [`insert_concat_operator`] and
//! [`to_postfix`] turn it into reverse polish notation, [`to_nfa`] assembles
//! an automaton out of it, and [`recognize`] decides whether a string is in
//! its language. [`compile`] runs the whole pipeline at once.
//!
//! ```
//! let re = thompson_re::compile("(a|b)*abb").unwrap();
//! assert!(re.is_match("babb"));
//! assert!(!re.is_match("ab"));
//! ```

use thiserror::Error;

pub mod parser;
pub mod regex;
pub mod thompson;

pub use parser::{ParseError, insert_concat_operator, to_postfix};
pub use regex::{Builder, Config, Regex};
pub use thompson::backtrack::{Backtracker, MatchError, recognize};
pub use thompson::nfa::{BuildError, Nfa, to_nfa};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Build(#[from] BuildError),
}

/// Compiles an infix pattern into a [`Regex`], ready to be matched against
/// any number of inputs.
pub fn compile(pattern: &str) -> Result<Regex, CompileError> {
    Regex::new(pattern)
}
