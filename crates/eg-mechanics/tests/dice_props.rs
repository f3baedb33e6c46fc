//! Property-based tests for the dice-expression language.
//!
//! Invariants:
//! - Canonicalization is idempotent
//! - Canonicalization never widens the value range
//! - Every roll lands inside that range

use eg_mechanics::{DiceExpr, NoSymbols, canonicalize};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// A single signed term: constant, die group or symbol.
fn arb_term() -> impl Strategy<Value = String> {
    let sign = prop_oneof![Just("+"), Just("-")];
    let operand = prop_oneof![
        (0u32..500).prop_map(|n| n.to_string()),
        (0u32..12, 1u32..=100).prop_map(|(count, sides)| match count {
            1 => format!("d{sides}"),
            _ => format!("{count}d{sides}"),
        }),
        prop_oneof![Just("STR"), Just("dex"), Just("Pow")].prop_map(str::to_string),
    ];
    (sign, operand).prop_map(|(sign, operand)| format!("{sign}{operand}"))
}

/// A whole expression, optionally without a leading sign.
fn arb_expression() -> impl Strategy<Value = String> {
    (prop::collection::vec(arb_term(), 0..8), any::<bool>()).prop_map(|(terms, trim)| {
        let text = terms.concat();
        match text.strip_prefix('+') {
            Some(rest) if trim => rest.to_string(),
            _ => text,
        }
    })
}

proptest! {
    #[test]
    fn canonical_form_is_idempotent(text in arb_expression()) {
        let once = canonicalize(&text).unwrap();
        let twice = canonicalize(&once).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn canonical_range_is_nested(text in arb_expression()) {
        let expr = DiceExpr::parse(&text).unwrap();
        let canonical = expr.canonical();
        prop_assert!(expr.min_value() <= canonical.min_value());
        prop_assert!(canonical.max_value() <= expr.max_value());
    }

    #[test]
    fn constant_expressions_canonicalize_to_their_value(n in -500i32..500) {
        let mut rng = StdRng::seed_from_u64(0);
        let canonical = DiceExpr::parse(&n.to_string()).unwrap().canonical();
        prop_assert_eq!(canonical.evaluate(&NoSymbols, &mut rng), n);
    }

    #[test]
    fn rolls_stay_in_range(text in arb_expression(), seed in any::<u64>()) {
        let expr = DiceExpr::parse(&text).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        let value = expr.evaluate(&NoSymbols, &mut rng);
        prop_assert!(expr.min_value() <= value && value <= expr.max_value());
    }
}
