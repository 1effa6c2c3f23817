//! # pegma
//!
//! A PEG-style grammar matching engine.
//!
//! Grammars are built from a small closed set of matching expressions
//! (literals, character ranges, anchors, sequences, ordered choices, greedy
//! repetition) plus named rules that may reference each other recursively.
//! Matching reports only success with a consumed character count, or failure;
//! there is no AST construction and no diagnostic reporting.
//!
//! ## Testing
//!
//! Unit tests live next to each module; end-to-end and property tests live in
//! the `tests/` directory and assert on consumed lengths, never on internal
//! engine state.

pub mod peg;

pub use peg::expr::Expr;
pub use peg::grammar::{Grammar, GrammarBuilder, GrammarError, MatchReport};
pub use peg::matcher::match_expr;
