use {
    alloy::primitives::U256,
    anyhow::{Result, ensure},
    bigdecimal::{BigDecimal, num_bigint::ToBigInt},
    num::{BigInt, BigUint, bigint::Sign},
};

pub fn u256_to_big_uint(input: &U256) -> BigUint {
    BigUint::from_bytes_be(&input.to_be_bytes::<32>())
}

pub fn u256_to_big_int(input: &U256) -> BigInt {
    BigInt::from_biguint(Sign::Plus, u256_to_big_uint(input))
}

pub fn u256_to_big_decimal(input: &U256) -> BigDecimal {
    BigDecimal::from(u256_to_big_int(input))
}

pub fn big_uint_to_u256(input: &BigUint) -> Result<U256> {
    let bytes = input.to_bytes_be();
    ensure!(bytes.len() <= 32, "too large");
    Ok(U256::from_be_slice(&bytes))
}

pub fn big_int_to_u256(input: &BigInt) -> Result<U256> {
    ensure!(input.sign() != Sign::Minus, "negative");
    big_uint_to_u256(input.magnitude())
}

/// Converts an integer-valued `BigDecimal` into a `U256`. Returns `None` for
/// fractional or negative values and values that do not fit 256 bits.
pub fn big_decimal_to_u256(big_decimal: &BigDecimal) -> Option<U256> {
    if !big_decimal.is_integer() {
        return None;
    }
    let big_int = big_decimal.to_bigint()?;
    big_int_to_u256(&big_int).ok()
}
