//! Common helpers for turning decimal amounts into whole rupees and for
//! displaying them the way the site does.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Rounds a non-negative amount down to a whole number of rupees.
///
/// Values beyond `u64::MAX` saturate; the default pricing table can never
/// produce one.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use studio_core::calculations::common::floor_to_whole;
///
/// assert_eq!(floor_to_whole(dec!(2925000.0)), 2_925_000);
/// assert_eq!(floor_to_whole(dec!(99.99)), 99);
/// ```
pub fn floor_to_whole(value: Decimal) -> u64 {
    to_u64_saturating(value.floor())
}

/// Rounds a non-negative amount up to a whole number of rupees. An amount
/// that is already whole is returned unchanged.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use studio_core::calculations::common::ceil_to_whole;
///
/// assert_eq!(ceil_to_whole(dec!(10560000.0)), 10_560_000);
/// assert_eq!(ceil_to_whole(dec!(0.01)), 1);
/// ```
pub fn ceil_to_whole(value: Decimal) -> u64 {
    to_u64_saturating(value.ceil())
}

fn to_u64_saturating(value: Decimal) -> u64 {
    if value.is_sign_negative() {
        return 0;
    }
    value.to_u64().unwrap_or(u64::MAX)
}

/// Formats an amount in rupees with Indian digit grouping (lakh/crore):
/// the last three digits form one group, every group before it has two.
///
/// # Examples
///
/// ```
/// use studio_core::calculations::common::format_inr;
///
/// assert_eq!(format_inr(2_925_000), "₹29,25,000");
/// assert_eq!(format_inr(950), "₹950");
/// ```
pub fn format_inr(amount: u64) -> String {
    let digits = amount.to_string();
    if digits.len() <= 3 {
        return format!("₹{digits}");
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();

    format!("₹{},{}", groups.join(","), tail)
}

/// Formats a quote range, e.g. `₹29,25,000 – ₹35,75,000`.
pub fn format_inr_range(
    min: u64,
    max: u64,
) -> String {
    format!("{} – {}", format_inr(min), format_inr(max))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // floor_to_whole / ceil_to_whole
    // =========================================================================

    #[test]
    fn floor_to_whole_drops_fraction() {
        assert_eq!(floor_to_whole(dec!(8640000.9)), 8_640_000);
    }

    #[test]
    fn ceil_to_whole_rounds_fraction_up() {
        assert_eq!(ceil_to_whole(dec!(3574999.1)), 3_575_000);
    }

    #[test]
    fn ceil_to_whole_keeps_exact_values() {
        assert_eq!(ceil_to_whole(dec!(10560000.00)), 10_560_000);
    }

    #[test]
    fn negative_values_clamp_to_zero() {
        assert_eq!(floor_to_whole(dec!(-5.5)), 0);
        assert_eq!(ceil_to_whole(dec!(-0.5)), 0);
    }

    #[test]
    fn oversized_values_saturate() {
        let huge = Decimal::from(u64::MAX) * dec!(10);

        assert_eq!(floor_to_whole(huge), u64::MAX);
    }

    // =========================================================================
    // format_inr
    // =========================================================================

    #[test]
    fn format_inr_small_amounts_have_no_separator() {
        assert_eq!(format_inr(0), "₹0");
        assert_eq!(format_inr(999), "₹999");
    }

    #[test]
    fn format_inr_thousands() {
        assert_eq!(format_inr(1_000), "₹1,000");
        assert_eq!(format_inr(50_000), "₹50,000");
    }

    #[test]
    fn format_inr_lakhs_and_crores() {
        assert_eq!(format_inr(1_00_000), "₹1,00,000");
        assert_eq!(format_inr(35_75_000), "₹35,75,000");
        assert_eq!(format_inr(1_05_60_000), "₹1,05,60,000");
        assert_eq!(format_inr(12_34_56_78_901), "₹12,34,56,78,901");
    }

    #[test]
    fn format_inr_range_joins_with_en_dash() {
        assert_eq!(
            format_inr_range(2_925_000, 3_575_000),
            "₹29,25,000 – ₹35,75,000"
        );
    }
}
