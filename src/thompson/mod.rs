//! Thompson's construction and its simulation.
pub mod backtrack;
pub mod nfa;
