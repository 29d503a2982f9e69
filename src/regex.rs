//! Types and API for Regex matching
//!
//! This module defines the [`Regex`] struct, which bundles a compiled
//! [`Nfa`] with the configuration used to search it.

use std::fmt;

use log::debug;

use crate::CompileError;
use crate::parser::{check_literals, insert_concat_operator, to_postfix};
use crate::thompson::backtrack::{Backtracker, MatchError, recognize};
use crate::thompson::nfa::{Nfa, to_nfa};

/// A compiled regular expression.
///
/// A `Regex` is immutable, so it can be shared between threads and matched
/// against any number of inputs.
#[derive(Debug, Clone)]
pub struct Regex {
    pattern: String,
    postfix: String,
    nfa: Nfa,
    config: Config,
}

impl Regex {
    pub fn new(pattern: &str) -> Result<Self, CompileError> {
        Builder::new(pattern).build()
    }

    pub fn builder(pattern: &str) -> Builder<'_> {
        Builder::new(pattern)
    }

    /// Returns true if the whole input belongs to the language of the regex.
    /// Ignores the configured step limit.
    pub fn is_match(&self, input: &str) -> bool {
        recognize(&self.nfa, input)
    }

    /// Same as [`Regex::is_match`], but gives up with an error once the
    /// configured step limit is reached.
    pub fn try_is_match(&self, input: &str) -> Result<bool, MatchError> {
        Backtracker::new()
            .step_limit(self.config.step_limit)
            .search(&self.nfa, input)
    }

    /// Returns a matching function bound to this regex.
    pub fn matcher(&self) -> impl Fn(&str) -> bool + '_ {
        move |input: &str| self.is_match(input)
    }

    pub fn nfa(&self) -> &Nfa {
        &self.nfa
    }

    /// The pattern in postfix form, with explicit concatenations.
    pub fn postfix(&self) -> &str {
        &self.postfix
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl fmt::Display for Regex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pattern)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Maximum number of search steps taken by [`Regex::try_is_match`].
    /// Default: None
    pub step_limit: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct Builder<'p> {
    pattern: &'p str,
    config: Config,
}

impl<'p> Builder<'p> {
    pub fn new(pattern: &'p str) -> Self {
        Self {
            pattern,
            config: Config::default(),
        }
    }

    pub fn step_limit(mut self, value: Option<usize>) -> Self {
        self.config.step_limit = value;
        self
    }

    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<Regex, CompileError> {
        check_literals(self.pattern)?;
        let annotated = insert_concat_operator(self.pattern);
        debug!("{:?} with explicit concatenation: {annotated:?}", self.pattern);
        let postfix = to_postfix(&annotated)?;
        debug!("{:?} in postfix form: {postfix:?}", self.pattern);
        let nfa = to_nfa(&postfix)?;

        Ok(Regex {
            pattern: self.pattern.to_string(),
            postfix,
            nfa,
            config: self.config,
        })
    }
}
