//! Grammar registry and top-level match driver
//!
//! A `Grammar` is the validated, immutable set of named rules plus a root.
//! Rules reference each other by name through [`Expr::Rule`], and the
//! reference graph may contain cycles (self- or mutual recursion); nothing
//! is resolved structurally, so recursive grammars stay finite in size.
//!
//! Validation happens once, in [`GrammarBuilder::build`]: unknown rule
//! names, duplicate definitions, empty clause lists and inverted character
//! ranges are construction errors, never match-time surprises. After
//! `build()` the grammar is never mutated, which makes it safe to share
//! across threads and concurrent match calls without locking.

use crate::peg::expr::Expr;
use crate::peg::matcher::MatchRun;
use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;

/// Dense rule identifier, assigned in definition order at build time.
/// Memoization keys on `(RuleId, index)` rather than on rule names.
pub(crate) type RuleId = usize;

/// Errors detected while building a grammar.
///
/// Matching itself never produces errors; a failed match is `None`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GrammarError {
    #[error("rule `{0}` is defined more than once")]
    DuplicateRule(String),

    #[error("rule `{referenced_in}` references unknown rule `{rule}`")]
    UnknownRule { rule: String, referenced_in: String },

    #[error("{combinator} in rule `{rule}` has no clauses")]
    EmptyClauses {
        combinator: &'static str,
        rule: String,
    },

    #[error("character range [{lo}-{hi}] in rule `{rule}` is inverted")]
    InvertedRange { lo: char, hi: char, rule: String },

    #[error("root rule `{0}` is not defined")]
    UnknownRoot(String),
}

#[derive(Debug, Clone)]
struct RuleDef {
    name: String,
    body: Expr,
}

/// An immutable, validated grammar: rule bodies, a name lookup table and a
/// designated root rule.
#[derive(Debug, Clone)]
pub struct Grammar {
    rules: Vec<RuleDef>,
    index: HashMap<String, RuleId>,
    root: RuleId,
}

/// Collects named rules, then validates the whole reference graph at once.
///
/// Rules may reference rules defined later (or themselves); order only
/// matters for rule ids and for the order `Grammar::rules` iterates in.
#[derive(Debug, Default)]
pub struct GrammarBuilder {
    rules: Vec<RuleDef>,
}

impl GrammarBuilder {
    pub fn new() -> GrammarBuilder {
        GrammarBuilder { rules: Vec::new() }
    }

    /// Add a named rule. Duplicates are reported by `build`, not here.
    pub fn rule(mut self, name: impl Into<String>, body: Expr) -> GrammarBuilder {
        self.rules.push(RuleDef {
            name: name.into(),
            body,
        });
        self
    }

    /// Validate every rule body and resolve the root rule.
    pub fn build(self, root: &str) -> Result<Grammar, GrammarError> {
        let mut index = HashMap::new();
        for (id, rule) in self.rules.iter().enumerate() {
            if index.insert(rule.name.clone(), id).is_some() {
                return Err(GrammarError::DuplicateRule(rule.name.clone()));
            }
        }

        for rule in &self.rules {
            validate_expr(&rule.body, &rule.name, &index)?;
        }

        let root_id = *index
            .get(root)
            .ok_or_else(|| GrammarError::UnknownRoot(root.to_string()))?;

        Ok(Grammar {
            rules: self.rules,
            index,
            root: root_id,
        })
    }
}

/// Walk one rule body, checking reference and shape constraints.
fn validate_expr(
    expr: &Expr,
    rule: &str,
    index: &HashMap<String, RuleId>,
) -> Result<(), GrammarError> {
    match expr {
        Expr::Start | Expr::End | Expr::Literal(_) => Ok(()),
        Expr::Range(lo, hi) => {
            if lo > hi {
                Err(GrammarError::InvertedRange {
                    lo: *lo,
                    hi: *hi,
                    rule: rule.to_string(),
                })
            } else {
                Ok(())
            }
        }
        Expr::Sequence(clauses) => {
            if clauses.is_empty() {
                return Err(GrammarError::EmptyClauses {
                    combinator: "sequence",
                    rule: rule.to_string(),
                });
            }
            for clause in clauses {
                validate_expr(clause, rule, index)?;
            }
            Ok(())
        }
        Expr::Choice(alternatives) => {
            if alternatives.is_empty() {
                return Err(GrammarError::EmptyClauses {
                    combinator: "ordered choice",
                    rule: rule.to_string(),
                });
            }
            for alternative in alternatives {
                validate_expr(alternative, rule, index)?;
            }
            Ok(())
        }
        Expr::OneOrMore(clause) | Expr::ZeroOrMore(clause) => validate_expr(clause, rule, index),
        Expr::Rule(name) => {
            if index.contains_key(name) {
                Ok(())
            } else {
                Err(GrammarError::UnknownRule {
                    rule: name.clone(),
                    referenced_in: rule.to_string(),
                })
            }
        }
    }
}

/// Outcome of one top-level match, in CLI/serialization-friendly form.
/// Lengths count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchReport {
    pub matched: bool,
    pub consumed: usize,
    pub input_len: usize,
}

impl Grammar {
    /// Match the root rule against the whole input starting at index 0.
    ///
    /// Returns the consumed character count on success. For a root anchored
    /// with `Start` and `End` this equals the full input length; an
    /// unanchored root may succeed on a proper prefix.
    pub fn matches(&self, input: &str) -> Option<usize> {
        let context: Vec<char> = input.chars().collect();
        MatchRun::new(self, &context).eval_rule(self.root, 0)
    }

    /// Match a specific rule (rather than the root) against the input.
    ///
    /// Returns `None` both for a failed match and for an unknown rule name;
    /// rule names are fixed at build time, so the latter is a caller bug.
    pub fn match_rule(&self, name: &str, input: &str) -> Option<usize> {
        let id = self.lookup(name)?;
        let context: Vec<char> = input.chars().collect();
        MatchRun::new(self, &context).eval_rule(id, 0)
    }

    /// Match the root rule and fold the outcome into a [`MatchReport`].
    pub fn report(&self, input: &str) -> MatchReport {
        let input_len = input.chars().count();
        let outcome = self.matches(input);
        MatchReport {
            matched: outcome.is_some(),
            consumed: outcome.unwrap_or(0),
            input_len,
        }
    }

    pub fn root_name(&self) -> &str {
        &self.rules[self.root].name
    }

    /// Rules in definition order, as `(name, body)` pairs.
    pub fn rules(&self) -> impl Iterator<Item = (&str, &Expr)> {
        self.rules.iter().map(|r| (r.name.as_str(), &r.body))
    }

    pub(crate) fn lookup(&self, name: &str) -> Option<RuleId> {
        self.index.get(name).copied()
    }

    pub(crate) fn body(&self, id: RuleId) -> &Expr {
        &self.rules[id].body
    }
}
