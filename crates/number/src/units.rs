//! Conversion between human-readable token amounts and base-unit integers.
//!
//! All tokens handled by the gateway use the same fixed denomination of 10^18
//! base units per whole token.

use {
    crate::conversions,
    alloy::primitives::U256,
    anyhow::{Context, Result, ensure},
    bigdecimal::{BigDecimal, RoundingMode, Zero},
    num::{BigInt, bigint::Sign},
};

/// Decimal exponent of the base-unit denomination (one token = 10^18 base
/// units).
pub const BASE_UNIT_EXP: i64 = 18;

fn base_unit_multiplier() -> BigDecimal {
    BigDecimal::new(BigInt::from(1), -BASE_UNIT_EXP)
}

/// Scales a human-readable amount to base units.
///
/// Fractions finer than one base unit are truncated toward zero. This is the
/// one lossy direction of the codec: `from_base_units(to_base_units(x))` is
/// not guaranteed to equal `x` exactly, but the difference is always smaller
/// than one base unit.
pub fn to_base_units(amount: &BigDecimal) -> Result<U256> {
    ensure!(amount.sign() != Sign::Minus, "negative amount");
    let scaled = (amount * base_unit_multiplier()).with_scale_round(0, RoundingMode::Down);
    conversions::big_decimal_to_u256(&scaled).context("amount does not fit 256 bits")
}

/// Scales a base-unit amount back to a human-readable decimal. Exact.
pub fn from_base_units(raw: U256) -> BigDecimal {
    BigDecimal::new(conversions::u256_to_big_int(&raw), BASE_UNIT_EXP)
}

/// Renders a decimal truncated to the given number of significant digits.
///
/// Trailing zeros are kept so the output always carries exactly `digits`
/// significant digits ("150" with 8 digits renders as "150.00000"). Leading
/// zeros of sub-unity values are not significant.
pub fn to_significant(value: &BigDecimal, digits: u64) -> String {
    if value.is_zero() {
        return "0".to_owned();
    }
    let mantissa_digits = i64::try_from(value.digits()).unwrap_or(i64::MAX);
    let (_, exponent) = value.as_bigint_and_exponent();
    let integer_digits = mantissa_digits - exponent;
    let scale = i64::try_from(digits).unwrap_or(i64::MAX) - integer_digits;
    value.with_scale_round(scale, RoundingMode::Down).to_string()
}
