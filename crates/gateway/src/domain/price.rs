use {
    crate::domain::swap::Side,
    bigdecimal::{BigDecimal, One},
};

/// The price of one base token denominated in quote tokens. Every price
/// that is compared against a bound or rendered in a response has this
/// orientation.
#[derive(Debug, Clone, PartialEq, PartialOrd)]
pub struct Price(BigDecimal);

impl Price {
    /// Normalizes a routed marginal price to quote-per-base terms.
    ///
    /// Routers report prices in token-out per token-in for the queried
    /// direction: a sell queries base into quote and the price passes
    /// through unchanged, while a buy queries quote into base and the
    /// price must be inverted.
    pub fn from_routed(marginal_price: &BigDecimal, side: Side) -> Result<Self, InvalidPrice> {
        if marginal_price <= &BigDecimal::from(0) {
            return Err(InvalidPrice(marginal_price.clone()));
        }
        Ok(Self(match side {
            Side::Sell => marginal_price.clone(),
            Side::Buy => BigDecimal::one() / marginal_price,
        }))
    }

    pub fn as_decimal(&self) -> &BigDecimal {
        &self.0
    }

    /// The quote-token amount corresponding to a base-token amount at this
    /// price: the expected proceeds of a sell, or the expected cost of a buy.
    pub fn quote_amount(&self, base_amount: &BigDecimal) -> BigDecimal {
        base_amount * &self.0
    }
}

#[derive(Debug, thiserror::Error)]
#[error("router returned non-positive marginal price {0}")]
pub struct InvalidPrice(BigDecimal);
