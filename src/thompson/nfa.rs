//! A Thompson NFA and the compiler building it from a postfix pattern.
//!
//! States live in an arena and refer to each other through [`StateId`]
//! indices, so the back-edges introduced by `*` need no special ownership
//! handling. Following Thompson's construction, every state has either a
//! single symbol transition or up to two epsilon transitions, never both.
//! Each sub-automaton produced during compilation (a [`Fragment`]) has
//! exactly one entry and one exit state.
use std::fmt;

use log::debug;
use thiserror::Error;

use crate::parser::Token;

/// Index of a [`State`] in its [`Nfa`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(usize);

impl StateId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct State {
    is_end: bool,
    symbol: Option<(char, StateId)>,
    epsilon: Vec<StateId>,
}

impl State {
    fn new(is_end: bool) -> Self {
        Self {
            is_end,
            ..Default::default()
        }
    }

    pub fn is_end(&self) -> bool {
        self.is_end
    }

    /// The symbol transition of this state, if any.
    pub fn symbol(&self) -> Option<(char, StateId)> {
        self.symbol
    }

    /// Target of the transition labeled `c`.
    pub fn next(&self, c: char) -> Option<StateId> {
        match self.symbol {
            Some((symbol, target)) if symbol == c => Some(target),
            _ => None,
        }
    }

    /// Epsilon transitions, in the order they were added.
    pub fn epsilon(&self) -> &[StateId] {
        &self.epsilon
    }
}

/// A compiled automaton. Immutable once built.
#[derive(Debug, Clone)]
pub struct Nfa {
    states: Vec<State>,
    start: StateId,
    end: StateId,
}

impl Nfa {
    pub fn start(&self) -> StateId {
        self.start
    }

    /// The unique accepting state.
    pub fn end(&self) -> StateId {
        self.end
    }

    pub fn state(&self, id: StateId) -> &State {
        &self.states[id.0]
    }

    pub fn states(&self) -> impl Iterator<Item = (StateId, &State)> {
        self.states
            .iter()
            .enumerate()
            .map(|(i, state)| (StateId(i), state))
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl fmt::Display for Nfa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (id, state) in self.states() {
            let marker = match (id == self.start, state.is_end) {
                (true, true) => "<>",
                (true, false) => "> ",
                (false, true) => " <",
                (false, false) => "  ",
            };
            write!(f, "{marker} {:>3}:", id.0)?;
            if let Some((c, target)) = state.symbol {
                write!(f, " {c:?} -> {}", target.0)?;
            }
            for target in &state.epsilon {
                write!(f, " e -> {}", target.0)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Errors raised while evaluating a postfix pattern.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// A binary operator found a single operand on the stack.
    #[error("operator {operator:?} at position {position} is missing an operand")]
    MalformedPostfix { operator: char, position: usize },
    /// An operator found no operand at all.
    #[error("operator {operator:?} at position {position} has no operands")]
    EmptyOperandStack { operator: char, position: usize },
    #[error("{count} operands left without an operator joining them")]
    DanglingOperands { count: usize },
    #[error("parenthesis at position {position} in postfix pattern")]
    UnexpectedParenthesis { position: usize },
}

/// Entry and exit of a partially built automaton.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub start: StateId,
    pub end: StateId,
}

/// Builds [`Nfa`]s out of the Thompson primitives.
///
/// All fragments returned by one compiler share its arena, and must only be
/// composed with fragments from the same compiler. Each fragment should be
/// composed at most once.
#[derive(Debug, Default)]
pub struct Compiler {
    states: Vec<State>,
}

impl Compiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluates a postfix pattern, as produced by
    /// [`crate::parser::to_postfix`], into an automaton.
    pub fn compile(postfix: &str) -> Result<Nfa, BuildError> {
        let mut compiler = Compiler::new();
        if postfix.is_empty() {
            let fragment = compiler.epsilon();
            return Ok(compiler.finish(fragment));
        }

        let mut stack: Vec<Fragment> = Vec::new();
        for (position, c) in postfix.chars().enumerate() {
            let fragment = match Token::from_char(c) {
                Token::Literal(c) => compiler.symbol(c),
                Token::Star => {
                    let operand = stack.pop().ok_or(BuildError::EmptyOperandStack {
                        operator: c,
                        position,
                    })?;
                    compiler.closure(operand)
                }
                op @ (Token::Union | Token::Concat) => {
                    let (left, right) = match (stack.pop(), stack.pop()) {
                        (Some(right), Some(left)) => (left, right),
                        (Some(_), None) => {
                            return Err(BuildError::MalformedPostfix {
                                operator: c,
                                position,
                            });
                        }
                        (None, _) => {
                            return Err(BuildError::EmptyOperandStack {
                                operator: c,
                                position,
                            });
                        }
                    };
                    if op == Token::Union {
                        compiler.union(left, right)
                    } else {
                        compiler.concat(left, right)
                    }
                }
                Token::OpenParen | Token::CloseParen => {
                    return Err(BuildError::UnexpectedParenthesis { position });
                }
            };
            stack.push(fragment);
        }

        match (stack.pop(), stack.len()) {
            (Some(fragment), 0) => Ok(compiler.finish(fragment)),
            (Some(_), rest) => Err(BuildError::DanglingOperands { count: rest + 1 }),
            // Every token pushes a fragment, so a non-empty pattern can't
            // leave the stack empty without erroring first.
            (None, _) => Err(BuildError::DanglingOperands { count: 0 }),
        }
    }

    /// Turns the compiler into an automaton whose entry and exit are those of
    /// `fragment`.
    pub fn finish(self, fragment: Fragment) -> Nfa {
        debug!("built nfa with {} states", self.states.len());
        Nfa {
            states: self.states,
            start: fragment.start,
            end: fragment.end,
        }
    }

    fn push(&mut self, is_end: bool) -> StateId {
        let id = StateId(self.states.len());
        self.states.push(State::new(is_end));
        id
    }

    fn add_epsilon(&mut self, from: StateId, to: StateId) {
        let state = &mut self.states[from.0];
        debug_assert!(state.symbol.is_none(), "state {} has a symbol edge", from.0);
        debug_assert!(state.epsilon.len() < 2, "state {} has two epsilons", from.0);
        state.epsilon.push(to);
    }

    fn add_symbol(&mut self, from: StateId, to: StateId, c: char) {
        let state = &mut self.states[from.0];
        debug_assert!(state.epsilon.is_empty(), "state {} has epsilons", from.0);
        state.symbol = Some((c, to));
    }

    fn demote(&mut self, id: StateId) {
        self.states[id.0].is_end = false;
    }

    /// An automaton recognizing only the empty string.
    pub fn epsilon(&mut self) -> Fragment {
        let start = self.push(false);
        let end = self.push(true);
        self.add_epsilon(start, end);
        Fragment { start, end }
    }

    /// An automaton recognizing only `c`.
    pub fn symbol(&mut self, c: char) -> Fragment {
        let start = self.push(false);
        let end = self.push(true);
        self.add_symbol(start, end, c);
        Fragment { start, end }
    }

    pub fn concat(&mut self, first: Fragment, second: Fragment) -> Fragment {
        self.add_epsilon(first.end, second.start);
        self.demote(first.end);
        Fragment {
            start: first.start,
            end: second.end,
        }
    }

    pub fn union(&mut self, first: Fragment, second: Fragment) -> Fragment {
        let start = self.push(false);
        self.add_epsilon(start, first.start);
        self.add_epsilon(start, second.start);

        let end = self.push(true);
        self.add_epsilon(first.end, end);
        self.demote(first.end);
        self.add_epsilon(second.end, end);
        self.demote(second.end);

        Fragment { start, end }
    }

    /// Kleene closure.
    pub fn closure(&mut self, fragment: Fragment) -> Fragment {
        let start = self.push(false);
        let end = self.push(true);

        // Skip, or enter the loop.
        self.add_epsilon(start, end);
        self.add_epsilon(start, fragment.start);

        // Leave, or go around once more.
        self.add_epsilon(fragment.end, end);
        self.add_epsilon(fragment.end, fragment.start);
        self.demote(fragment.end);

        Fragment { start, end }
    }
}

/// Shorthand for [`Compiler::compile`].
pub fn to_nfa(postfix: &str) -> Result<Nfa, BuildError> {
    Compiler::compile(postfix)
}
