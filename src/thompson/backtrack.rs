//! A backtracking simulation of [`crate::thompson::nfa`].
//!
//! The search explores (state, position) pairs depth-first, following the
//! symbol transition when the next character matches and every epsilon
//! transition otherwise. It is driven by an explicit stack of frames rather
//! than recursion, so long inputs cannot overflow the call stack.
//!
//! Epsilon cycles (introduced by `*`) are cut with a visited set scoped to a
//! position: every frame reached from the same symbol step shares one set,
//! and consuming a character starts a fresh one. Nothing is memoized across
//! sets, so the worst case is exponential in the number of states. Use
//! [`Backtracker::step_limit`] when matching untrusted patterns.

use std::collections::HashSet;

use log::{debug, trace};
use thiserror::Error;

use crate::thompson::nfa::{Nfa, StateId};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error("search gave up after {limit} steps")]
    StepLimitExceeded { limit: usize },
}

#[derive(Debug)]
struct Frame {
    state: StateId,
    /// Position in the input, in chars.
    pos: usize,
    /// Index of the visited set this frame belongs to.
    segment: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Backtracker {
    step_limit: Option<usize>,
}

impl Backtracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Give up once this many frames have been explored.
    pub fn step_limit(mut self, limit: Option<usize>) -> Self {
        self.step_limit = limit;
        self
    }

    /// Returns whether the whole of `word` is accepted by `nfa`.
    pub fn search(&self, nfa: &Nfa, word: &str) -> Result<bool, MatchError> {
        let input: Vec<char> = word.chars().collect();
        let mut stack = vec![Frame {
            state: nfa.start(),
            pos: 0,
            segment: 0,
        }];
        let mut segments: Vec<HashSet<StateId>> = vec![HashSet::new()];
        let mut steps = 0usize;

        while let Some(Frame {
            state: id,
            pos,
            segment,
        }) = stack.pop()
        {
            if let Some(limit) = self.step_limit {
                if steps >= limit {
                    debug!("step limit of {limit} reached at position {pos}");
                    return Err(MatchError::StepLimitExceeded { limit });
                }
            }
            steps += 1;

            // Segments above this one belong to frames that were all popped.
            segments.truncate(segment + 1);
            if !segments[segment].insert(id) {
                continue;
            }
            trace!("visiting state {} at position {pos}", id.index());

            let state = nfa.state(id);
            match input.get(pos) {
                None if state.is_end() => return Ok(true),
                Some(&c) => {
                    if let Some(next) = state.next(c) {
                        segments.push(HashSet::new());
                        stack.push(Frame {
                            state: next,
                            pos: pos + 1,
                            segment: segments.len() - 1,
                        });
                        continue;
                    }
                }
                None => (),
            }

            // Reversed so the first epsilon is explored first.
            for &next in state.epsilon().iter().rev() {
                stack.push(Frame {
                    state: next,
                    pos,
                    segment,
                });
            }
        }

        Ok(false)
    }
}

/// Returns whether the whole of `word` is accepted by `nfa`.
pub fn recognize(nfa: &Nfa, word: &str) -> bool {
    // Without a step limit the search always runs to completion.
    matches!(Backtracker::new().search(nfa, word), Ok(true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{insert_concat_operator, to_postfix};
    use crate::thompson::nfa::to_nfa;

    fn build(pattern: &str) -> Nfa {
        let postfix = to_postfix(&insert_concat_operator(pattern)).unwrap();
        to_nfa(&postfix).unwrap()
    }

    #[test]
    fn test_literal() {
        let nfa = build("a");
        assert!(recognize(&nfa, "a"));
        assert!(!recognize(&nfa, "b"));
        assert!(!recognize(&nfa, ""));
        assert!(!recognize(&nfa, "aa"));
    }

    #[test]
    fn test_closure() {
        let nfa = build("a*");
        assert!(recognize(&nfa, ""));
        assert!(recognize(&nfa, "a"));
        assert!(recognize(&nfa, "aaa"));
        assert!(!recognize(&nfa, "b"));
        assert!(!recognize(&nfa, "aab"));
    }

    #[test]
    fn test_union() {
        let nfa = build("a|b");
        assert!(recognize(&nfa, "a"));
        assert!(recognize(&nfa, "b"));
        assert!(!recognize(&nfa, "ab"));
        assert!(!recognize(&nfa, ""));
    }

    #[test]
    fn test_nested_closure_terminates() {
        let nfa = build("(a*)*");
        assert!(recognize(&nfa, ""));
        assert!(recognize(&nfa, "aaaa"));
        assert!(!recognize(&nfa, "aaab"));

        let nfa = build("((a*)*|b*)*");
        assert!(recognize(&nfa, "abba"));
        assert!(!recognize(&nfa, "abca"));
    }

    #[test]
    fn test_long_input() {
        let nfa = build("(a|b)*c");
        let word = format!("{}c", "ab".repeat(50_000));
        assert!(recognize(&nfa, &word));
        assert!(!recognize(&nfa, &word[..word.len() - 1]));
    }

    #[test]
    fn test_multibyte_symbols() {
        let nfa = build("é(à|ü)*");
        assert!(recognize(&nfa, "éàüà"));
        assert!(!recognize(&nfa, "e"));
    }

    #[test]
    fn test_step_limit() {
        let nfa = build("(a*)*b");
        let word = "a".repeat(40);
        let limited = Backtracker::new().step_limit(Some(50));
        assert_eq!(
            limited.search(&nfa, &word),
            Err(MatchError::StepLimitExceeded { limit: 50 })
        );
        assert_eq!(Backtracker::new().search(&nfa, "aab"), Ok(true));
    }
}
