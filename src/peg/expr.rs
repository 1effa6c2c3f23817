//! Matching expressions - the grammar as data
//!
//! A grammar body is a tree of `Expr` values: a closed set of combinator
//! variants rather than one type per grammar shape. Leaf variants (anchors,
//! literals, character ranges) inspect the input directly; structural
//! variants (sequence, ordered choice, repetition) wrap sub-expressions; the
//! `Rule` variant is a by-name reference resolved through the grammar
//! registry at match time, which is what allows rule graphs to contain
//! cycles without unbounded structural nesting.

use serde::Serialize;
use std::fmt;

/// One node of a grammar expression tree.
///
/// Construction helpers (`lit`, `range`, `seq`, ...) are preferred over the
/// variants themselves; they keep grammar definitions close to PEG notation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Expr {
    /// Zero-width anchor: succeeds only at index 0.
    Start,
    /// Zero-width anchor: succeeds only at or past the end of the input.
    End,
    /// A single exact character, consuming 1.
    Literal(char),
    /// A single character in the inclusive range, consuming 1.
    Range(char, char),
    /// All clauses in order, each starting where the previous one ended.
    Sequence(Vec<Expr>),
    /// Alternatives tried in declaration order; first success wins.
    Choice(Vec<Expr>),
    /// Greedy repetition, at least one occurrence.
    OneOrMore(Box<Expr>),
    /// Greedy repetition, zero or more occurrences; always succeeds.
    ZeroOrMore(Box<Expr>),
    /// By-name reference to a rule in the enclosing grammar.
    Rule(String),
}

impl Expr {
    pub fn start() -> Expr {
        Expr::Start
    }

    pub fn end() -> Expr {
        Expr::End
    }

    pub fn lit(c: char) -> Expr {
        Expr::Literal(c)
    }

    /// Inclusive character range `[lo-hi]`.
    pub fn range(lo: char, hi: char) -> Expr {
        Expr::Range(lo, hi)
    }

    pub fn seq(clauses: Vec<Expr>) -> Expr {
        Expr::Sequence(clauses)
    }

    pub fn choice(alternatives: Vec<Expr>) -> Expr {
        Expr::Choice(alternatives)
    }

    pub fn one_or_more(clause: Expr) -> Expr {
        Expr::OneOrMore(Box::new(clause))
    }

    pub fn zero_or_more(clause: Expr) -> Expr {
        Expr::ZeroOrMore(Box::new(clause))
    }

    pub fn rule(name: impl Into<String>) -> Expr {
        Expr::Rule(name.into())
    }
}

/// PEG-like notation: `^`, `$`, `'c'`, `[a-z]`, `(a b)`, `(a / b)`, `x+`, `x*`.
///
/// Sequences and choices are always parenthesized, so repetition suffixes
/// never need extra grouping.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Start => write!(f, "^"),
            Expr::End => write!(f, "$"),
            Expr::Literal(c) => write!(f, "'{}'", c),
            Expr::Range(lo, hi) => write!(f, "[{}-{}]", lo, hi),
            Expr::Sequence(clauses) => {
                write!(f, "(")?;
                for (i, clause) in clauses.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", clause)?;
                }
                write!(f, ")")
            }
            Expr::Choice(alternatives) => {
                write!(f, "(")?;
                for (i, alternative) in alternatives.iter().enumerate() {
                    if i > 0 {
                        write!(f, " / ")?;
                    }
                    write!(f, "{}", alternative)?;
                }
                write!(f, ")")
            }
            Expr::OneOrMore(clause) => write!(f, "{}+", clause),
            Expr::ZeroOrMore(clause) => write!(f, "{}*", clause),
            Expr::Rule(name) => write!(f, "{}", name),
        }
    }
}
