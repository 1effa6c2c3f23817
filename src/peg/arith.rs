//! Built-in arithmetic expression grammar
//!
//! The canonical demonstration grammar for the engine: nested additive and
//! multiplicative expressions with parenthesized sub-expressions, e.g.
//! `(1+1)+1*(5+5)`. Right recursion throughout (PEG matching does not
//! support left recursion), anchored so a successful match always spans the
//! whole input:
//!
//!     Toplevel       <- ^ Additive $
//!     Additive       <- Multiplicative '+' Additive / Multiplicative
//!     Multiplicative <- Primary '*' Multiplicative / Primary
//!     Primary        <- '(' Additive ')' / Number
//!     Number         <- Digit+
//!     Digit          <- [0-9]

use crate::peg::expr::Expr;
use crate::peg::grammar::{Grammar, GrammarBuilder};
use once_cell::sync::Lazy;

static GRAMMAR: Lazy<Grammar> = Lazy::new(|| {
    GrammarBuilder::new()
        .rule("Digit", Expr::range('0', '9'))
        .rule("Number", Expr::one_or_more(Expr::rule("Digit")))
        .rule(
            "Primary",
            Expr::choice(vec![
                Expr::seq(vec![Expr::lit('('), Expr::rule("Additive"), Expr::lit(')')]),
                Expr::rule("Number"),
            ]),
        )
        .rule(
            "Multiplicative",
            Expr::choice(vec![
                Expr::seq(vec![
                    Expr::rule("Primary"),
                    Expr::lit('*'),
                    Expr::rule("Multiplicative"),
                ]),
                Expr::rule("Primary"),
            ]),
        )
        .rule(
            "Additive",
            Expr::choice(vec![
                Expr::seq(vec![
                    Expr::rule("Multiplicative"),
                    Expr::lit('+'),
                    Expr::rule("Additive"),
                ]),
                Expr::rule("Multiplicative"),
            ]),
        )
        .rule(
            "Toplevel",
            Expr::seq(vec![Expr::start(), Expr::rule("Additive"), Expr::end()]),
        )
        .build("Toplevel")
        .expect("arithmetic grammar is well formed")
});

/// The shared arithmetic grammar instance, built on first use.
pub fn grammar() -> &'static Grammar {
    &GRAMMAR
}
