//! Money calculation utilities using rust_decimal for precision
//!
//! All calculations are done using `Decimal` internally, then converted to
//! `f64` for storage/serialization. Wire amounts stay `f64`.

use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Per-unit share of the bill including proportional tax and tip
///
/// Formula: `unit_price * (1 + tax/subtotal + tip/subtotal)` when
/// `subtotal > 0`; otherwise just `unit_price` (no proportional share can
/// be attributed against a zero subtotal).
pub fn unit_share(unit_price: f64, subtotal: f64, tax: f64, tip: f64) -> Decimal {
    let price = to_decimal(unit_price).max(Decimal::ZERO);
    let subtotal = to_decimal(subtotal);

    if subtotal <= Decimal::ZERO {
        return price;
    }

    let tax_share = price * to_decimal(tax).max(Decimal::ZERO) / subtotal;
    let tip_share = price * to_decimal(tip).max(Decimal::ZERO) / subtotal;
    price + tax_share + tip_share
}

/// Sum unit shares into a displayable owed amount, rounded to 2 decimal places
pub fn sum_shares<I>(shares: I) -> f64
where
    I: IntoIterator<Item = Decimal>,
{
    let total: Decimal = shares.into_iter().sum();
    to_f64(total.max(Decimal::ZERO))
}

/// Whether an owed amount is worth submitting a payment for
///
/// Returns false for zero or sub-cent amounts so no spurious payment call
/// is ever issued.
pub fn is_payable(owed: f64) -> bool {
    to_decimal(owed) > MONEY_TOLERANCE
}

/// Compare two monetary values for equality (within 0.01 tolerance)
pub fn money_eq(a: f64, b: f64) -> bool {
    let diff = (to_decimal(a) - to_decimal(b)).abs();
    diff < MONEY_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_decimal_precision() {
        // Classic floating point problem: 0.1 + 0.2 != 0.3
        let sum_f64 = 0.1_f64 + 0.2_f64;
        assert_ne!(sum_f64, 0.3);

        let sum_dec = to_decimal(0.1) + to_decimal(0.2);
        assert_eq!(to_f64(sum_dec), 0.3);
    }

    #[test]
    fn test_unit_share_proportional() {
        // 5.00 on a 30.00 subtotal with 3.00 tax and 6.00 tip:
        // 5 * (1 + 0.1 + 0.2) = 6.50
        let share = unit_share(5.0, 30.0, 3.0, 6.0);
        assert_eq!(to_f64(share), 6.5);
    }

    #[test]
    fn test_unit_share_zero_subtotal() {
        let share = unit_share(5.0, 0.0, 3.0, 6.0);
        assert_eq!(to_f64(share), 5.0);
    }

    #[test]
    fn test_unit_share_negative_price_clamped() {
        let share = unit_share(-5.0, 30.0, 3.0, 6.0);
        assert_eq!(share, Decimal::ZERO);
    }

    #[test]
    fn test_sum_shares_rounds_half_up() {
        // 3.333... + 3.333... style accumulation stays exact in Decimal
        let shares = vec![unit_share(10.0, 30.0, 1.0, 0.0); 3];
        // each share = 10 * (1 + 1/30) = 10.3333..., sum = 31.0
        assert_eq!(sum_shares(shares), 31.0);
    }

    #[test]
    fn test_is_payable() {
        assert!(!is_payable(0.0));
        assert!(!is_payable(0.01));
        assert!(!is_payable(-3.0));
        assert!(is_payable(0.02));
        assert!(is_payable(13.0));
    }

    #[test]
    fn test_money_eq() {
        assert!(money_eq(100.0, 100.0));
        assert!(money_eq(100.004, 100.006));
        assert!(!money_eq(100.0, 100.02));
    }
}
