//! Main module for the grammar matching engine

pub mod arith;
pub mod expr;
pub mod grammar;
pub mod matcher;
