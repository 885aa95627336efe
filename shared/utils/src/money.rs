use rust_decimal::{Decimal, RoundingStrategy};

/// Number of fractional digits used for money amounts (subtotal, tax, total).
pub const MONEY_SCALE: u32 = 2;

/// Number of fractional digits used for tax rates and the composite rate.
pub const RATE_SCALE: u32 = 4;

/// Quantizes a money amount to two fractional digits, rounding half away from
/// zero. This is the rounding discipline used throughout tax computation; it is
/// deliberately not `MidpointNearestEven` (banker's rounding).
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Quantizes a rate to four fractional digits, rounding half away from zero.
pub fn round_rate(rate: Decimal) -> Decimal {
    rate.round_dp_with_strategy(RATE_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn rounds_half_away_from_zero_not_to_even() {
        // 4.99975 would round to 5.00 either way, but 0.005 distinguishes the
        // strategies: away-from-zero rounds up, nearest-even rounds down.
        assert_eq!(round_money(dec!(0.005)), dec!(0.01));
        assert_eq!(round_money(dec!(0.015)), dec!(0.02));
    }

    #[test]
    fn matches_spec_scenarios() {
        assert_eq!(round_money(dec!(100.01) * dec!(0.0875)), dec!(8.75));
        assert_eq!(round_money(dec!(100.03) * dec!(0.0875)), dec!(8.75));
        assert_eq!(round_money(dec!(57.14) * dec!(0.0875)), dec!(5.00));
    }
}
