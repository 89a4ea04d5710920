//! Unit tests for the Price module
//!
//! Tests cover two-decimal rounding, range checks, percentage adjustment
//! and serialization.

use core_kernel::{Price, PriceError};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

mod creation {
    use super::*;

    #[test]
    fn test_new_keeps_two_decimals() {
        let p = Price::new(dec!(19.99)).unwrap();
        assert_eq!(p.amount(), dec!(19.99));
        assert_eq!(p.amount().scale(), 2);
    }

    #[test]
    fn test_new_pads_integers_to_two_decimals() {
        let p = Price::new(dec!(7)).unwrap();
        assert_eq!(p.amount().scale(), 2);
        assert_eq!(p.to_string(), "7.00");
    }

    #[test]
    fn test_new_rounds_extra_digits() {
        assert_eq!(Price::new(dec!(1.234)).unwrap().amount(), dec!(1.23));
        assert_eq!(Price::new(dec!(1.235)).unwrap().amount(), dec!(1.24));
    }

    #[test]
    fn test_from_cents() {
        let p = Price::from_cents(129_999).unwrap();
        assert_eq!(p.amount(), dec!(1299.99));
    }

    #[test]
    fn test_largest_allowed_value() {
        let max = dec!(9999999999999999.99);
        assert_eq!(Price::new(max).unwrap().amount(), max);
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert_eq!(
            Price::new(dec!(10000000000000000.00)),
            Err(PriceError::OutOfRange(dec!(10000000000000000.00)))
        );
    }
}

mod percentage {
    use super::*;

    #[test]
    fn test_ten_percent_increase() {
        let p = Price::new(dec!(100.00)).unwrap();
        assert_eq!(p.apply_percentage(dec!(10)).unwrap().amount(), dec!(110.00));
    }

    #[test]
    fn test_negative_percentage_decreases() {
        let p = Price::new(dec!(80.00)).unwrap();
        assert_eq!(p.apply_percentage(dec!(-25)).unwrap().amount(), dec!(60.00));
    }

    #[test]
    fn test_fractional_result_is_rounded() {
        let p = Price::new(dec!(19.99)).unwrap();
        // 19.99 * 1.075 = 21.48925
        assert_eq!(p.apply_percentage(dec!(7.5)).unwrap().amount(), dec!(21.49));
    }

    #[test]
    fn test_zero_percentage_is_identity() {
        let p = Price::new(dec!(42.42)).unwrap();
        assert_eq!(p.apply_percentage(Decimal::ZERO).unwrap(), p);
    }
}

mod serde_format {
    use super::*;

    #[test]
    fn test_deserialize_rounds_through_constructor() {
        let p: Price = serde_json::from_str("12.345").unwrap();
        assert_eq!(p.amount(), dec!(12.35));
    }

    #[test]
    fn test_deserialize_from_string() {
        let p: Price = serde_json::from_str("\"899.5\"").unwrap();
        assert_eq!(p.amount(), dec!(899.50));
    }

    #[test]
    fn test_deserialize_out_of_range_fails() {
        let result: Result<Price, _> = serde_json::from_str("\"100000000000000000\"");
        assert!(result.is_err());
    }
}

proptest! {
    #[test]
    fn prop_price_always_has_two_decimals(cents in -1_000_000_000i64..1_000_000_000i64) {
        let p = Price::from_cents(cents).unwrap();
        prop_assert_eq!(p.amount().scale(), 2);
    }

    #[test]
    fn prop_percentage_matches_decimal_formula(
        cents in 1i64..10_000_000i64,
        pct in -99i64..500i64,
    ) {
        let p = Price::from_cents(cents).unwrap();
        let pct = Decimal::from(pct);
        let expected = (p.amount() * (Decimal::ONE + pct / dec!(100)))
            .round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero);
        prop_assert_eq!(p.apply_percentage(pct).unwrap().amount(), expected);
    }
}
