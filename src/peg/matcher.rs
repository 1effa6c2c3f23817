//! Recursive-descent evaluator for matching expressions
//!
//! One `MatchRun` exists per top-level match call. It walks the expression
//! tree and returns, for every sub-expression, either the number of
//! characters consumed or `None` for no match. Failure is an ordinary value
//! here, never an error: ordered choice relies on sub-matches failing
//! cheaply and frequently.
//!
//! Rule evaluations are memoized per run, keyed by `(rule id, index)`
//! (packrat style), which bounds matching time linearly in
//! `rules x input length` even for grammars whose shared sub-expressions are
//! reachable through many paths. The memo table lives and dies with the run,
//! so the grammar itself stays immutable and freely shareable across
//! concurrent matches.

use crate::peg::expr::Expr;
use crate::peg::grammar::{Grammar, RuleId};
use std::collections::HashMap;

/// State for a single top-level match invocation.
///
/// Holds the read-only input as a character slice, an optional grammar for
/// resolving `Rule` references, and the per-run memo table.
pub(crate) struct MatchRun<'a> {
    grammar: Option<&'a Grammar>,
    context: &'a [char],
    memo: HashMap<(RuleId, usize), Option<usize>>,
}

impl<'a> MatchRun<'a> {
    pub(crate) fn new(grammar: &'a Grammar, context: &'a [char]) -> MatchRun<'a> {
        MatchRun {
            grammar: Some(grammar),
            context,
            memo: HashMap::new(),
        }
    }

    /// A run without a rule registry. `Rule` references fail to match.
    pub(crate) fn detached(context: &'a [char]) -> MatchRun<'a> {
        MatchRun {
            grammar: None,
            context,
            memo: HashMap::new(),
        }
    }

    /// Evaluate `expr` at `index`, returning the consumed character count.
    ///
    /// Every primitive that inspects a character checks bounds first; an
    /// index at or past the end of the input is a plain no-match.
    pub(crate) fn eval(&mut self, expr: &Expr, index: usize) -> Option<usize> {
        match expr {
            Expr::Start => (index == 0).then_some(0),
            Expr::End => (index >= self.context.len()).then_some(0),
            Expr::Literal(expected) => {
                (self.context.get(index)? == expected).then_some(1)
            }
            Expr::Range(lo, hi) => {
                let &c = self.context.get(index)?;
                (*lo <= c && c <= *hi).then_some(1)
            }
            Expr::Sequence(clauses) => {
                let mut consumed = 0;
                for clause in clauses {
                    consumed += self.eval(clause, index + consumed)?;
                }
                Some(consumed)
            }
            Expr::Choice(alternatives) => alternatives
                .iter()
                .find_map(|alternative| self.eval(alternative, index)),
            Expr::OneOrMore(clause) => {
                let first = self.eval(clause, index)?;
                if first == 0 {
                    // Zero-width success: repeating would never advance.
                    return Some(0);
                }
                Some(first + self.repeat(clause, index + first))
            }
            Expr::ZeroOrMore(clause) => Some(self.repeat(clause, index)),
            Expr::Rule(name) => {
                let grammar = self.grammar?;
                let id = grammar.lookup(name)?;
                self.eval_rule(id, index)
            }
        }
    }

    /// Evaluate a rule body at `index`, consulting the memo table.
    pub(crate) fn eval_rule(&mut self, id: RuleId, index: usize) -> Option<usize> {
        if let Some(&cached) = self.memo.get(&(id, index)) {
            return cached;
        }
        let grammar = self.grammar?;
        let outcome = self.eval(grammar.body(id), index);
        self.memo.insert((id, index), outcome);
        outcome
    }

    /// Greedy repetition tail: keep matching `clause` at the cumulative
    /// index until it fails, returning the total consumed. A zero-length
    /// success counts as the terminal iteration, otherwise any nullable
    /// clause would loop forever.
    fn repeat(&mut self, clause: &Expr, start: usize) -> usize {
        let mut consumed = 0;
        while let Some(step) = self.eval(clause, start + consumed) {
            consumed += step;
            if step == 0 {
                break;
            }
        }
        consumed
    }
}

/// Match a rule-free expression against the whole input, from index 0.
///
/// Convenience for expressions that do not reference named rules; a `Rule`
/// reference inside `expr` simply fails to match. Returns the consumed
/// character count, which may be less than the input length unless the
/// expression is anchored with [`Expr::End`].
pub fn match_expr(expr: &Expr, input: &str) -> Option<usize> {
    let context: Vec<char> = input.chars().collect();
    MatchRun::detached(&context).eval(expr, 0)
}
