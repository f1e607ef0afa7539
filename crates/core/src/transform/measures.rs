use rust_decimal::{Decimal, RoundingStrategy};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Measures derived for a single sold item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measures {
    pub final_price: Decimal,
    pub discount_percentage: Decimal,
    pub profit_margin: Decimal,
}

/// Rounds half away from zero to two decimal places.
///
/// The result always carries a scale of 2, so `10` renders as `10.00`.
pub fn round2(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// `part / whole * 100`, rounded. `None` when `whole` is zero.
pub fn percentage(part: Decimal, whole: Decimal) -> Option<Decimal> {
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(HUNDRED))
        .map(round2)
}

/// Computes the measures of an item sold at `price` with `discount` off.
///
/// Returns `None` when the price is zero, since both percentages would be
/// undefined.
pub fn compute_measures(price: Decimal, discount: Decimal) -> Option<Measures> {
    if price.is_zero() {
        return None;
    }
    let final_price = round2(price - discount);
    Some(Measures {
        final_price,
        discount_percentage: percentage(discount, price)?,
        profit_margin: percentage(final_price, price)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_reference_item() {
        let m = compute_measures(d("5.0"), d("0.5")).unwrap();
        assert_eq!(m.final_price, d("4.50"));
        assert_eq!(m.discount_percentage, d("10.0"));
        assert_eq!(m.profit_margin, d("90.0"));
    }

    #[test]
    fn test_no_discount() {
        let m = compute_measures(d("4.5"), d("0")).unwrap();
        assert_eq!(m.final_price, d("4.5"));
        assert_eq!(m.discount_percentage, Decimal::ZERO);
        assert_eq!(m.profit_margin, d("100"));
    }

    #[test]
    fn test_repeating_fraction_is_rounded() {
        // 0.25 / 5.5 = 4.5454..%
        let m = compute_measures(d("5.5"), d("0.25")).unwrap();
        assert_eq!(m.final_price, d("5.25"));
        assert_eq!(m.discount_percentage, d("4.55"));
        assert_eq!(m.profit_margin, d("95.45"));
    }

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(round2(d("1.005")), d("1.01"));
        assert_eq!(round2(d("1.004")), d("1.00"));
        assert_eq!(round2(d("2.675")), d("2.68"));
        assert_eq!(round2(d("10")).to_string(), "10.00");
    }

    #[test]
    fn test_zero_price_is_undefined() {
        assert_eq!(compute_measures(Decimal::ZERO, Decimal::ZERO), None);
        assert_eq!(percentage(d("1"), Decimal::ZERO), None);
    }

    #[test]
    fn test_full_discount() {
        let m = compute_measures(d("6.0"), d("6.0")).unwrap();
        assert_eq!(m.final_price, Decimal::ZERO);
        assert_eq!(m.discount_percentage, d("100"));
        assert_eq!(m.profit_margin, Decimal::ZERO);
    }
}
