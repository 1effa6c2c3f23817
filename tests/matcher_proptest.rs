//! Property-based tests for the matching engine
//!
//! These pin down the engine's structural laws rather than individual
//! examples:
//! - consumed length never exceeds the input length
//! - sequence consumption is the sum of contiguous sub-consumptions
//! - ordered choice returns the first success, not the longest
//! - greedy repetition consumes the maximal leading run
//! - memoized rule matching agrees with plain expression matching

use pegma::peg::arith;
use pegma::{match_expr, Expr, GrammarBuilder};
use proptest::prelude::*;

/// Turn a string into a sequence of literal matchers for its characters.
fn literal_seq(text: &str) -> Vec<Expr> {
    text.chars().map(Expr::lit).collect()
}

/// Generate short lowercase words (non-empty so sequences have clauses).
fn word_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,10}"
}

/// Generate arbitrary printable-ASCII inputs, including empty.
fn ascii_input_strategy() -> impl Strategy<Value = String> {
    "[ -~]{0,30}"
}

#[cfg(test)]
mod proptest_tests {
    use super::*;

    proptest! {
        #[test]
        fn test_consumed_never_exceeds_input_length(input in ascii_input_strategy()) {
            let digits = Expr::zero_or_more(Expr::range('0', '9'));
            let consumed = match_expr(&digits, &input);
            prop_assert!(consumed.is_some());
            prop_assert!(consumed.unwrap_or(0) <= input.chars().count());
        }

        #[test]
        fn test_greedy_repetition_takes_maximal_digit_run(input in ascii_input_strategy()) {
            let run = input.chars().take_while(|c| c.is_ascii_digit()).count();

            let one_or_more = Expr::one_or_more(Expr::range('0', '9'));
            let expected = if run == 0 { None } else { Some(run) };
            prop_assert_eq!(match_expr(&one_or_more, &input), expected);

            let zero_or_more = Expr::zero_or_more(Expr::range('0', '9'));
            prop_assert_eq!(match_expr(&zero_or_more, &input), Some(run));
        }

        #[test]
        fn test_sequence_consumes_sum_of_parts(a in word_strategy(), b in word_strategy()) {
            let mut clauses = literal_seq(&a);
            clauses.extend(literal_seq(&b));
            let seq = Expr::seq(clauses);

            let joined = format!("{}{}", a, b);
            let expected = a.chars().count() + b.chars().count();
            prop_assert_eq!(match_expr(&seq, &joined), Some(expected));

            // Sequence fails as a whole when the tail is missing.
            prop_assert_eq!(match_expr(&seq, &a), None);
        }

        #[test]
        fn test_choice_returns_first_success_not_longest(word in word_strategy()) {
            // Both alternatives succeed on `word + word`; the short one is
            // declared first and must win even though the long one consumes
            // more.
            let doubled = format!("{}{}", word, word);
            let short_first = Expr::choice(vec![
                Expr::seq(literal_seq(&word)),
                Expr::seq(literal_seq(&doubled)),
            ]);
            prop_assert_eq!(match_expr(&short_first, &doubled), Some(word.chars().count()));

            let long_first = Expr::choice(vec![
                Expr::seq(literal_seq(&doubled)),
                Expr::seq(literal_seq(&word)),
            ]);
            prop_assert_eq!(match_expr(&long_first, &doubled), Some(doubled.chars().count()));
        }

        #[test]
        fn test_rule_matching_agrees_with_expression_matching(input in ascii_input_strategy()) {
            // The memoized rule path and the plain expression path are the
            // same function on the same grammar shape.
            let grammar = GrammarBuilder::new()
                .rule("Digit", Expr::range('0', '9'))
                .rule("Number", Expr::one_or_more(Expr::rule("Digit")))
                .build("Number")
                .expect("grammar is well formed");

            let plain = Expr::one_or_more(Expr::range('0', '9'));
            prop_assert_eq!(grammar.matches(&input), match_expr(&plain, &input));
        }

        #[test]
        fn test_arith_match_is_all_or_nothing(input in ascii_input_strategy()) {
            // Toplevel is anchored by Start/End: success must span the whole
            // input, and no outcome may over-consume.
            let report = arith::grammar().report(&input);
            prop_assert!(report.consumed <= report.input_len);
            if report.matched {
                prop_assert_eq!(report.consumed, report.input_len);
            }
        }
    }
}
