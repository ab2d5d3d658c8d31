//! The slippage guard: decides whether a routed price satisfies the caller's
//! bound before any funds are committed.

use {
    crate::domain::{price::Price, swap::Side},
    bigdecimal::BigDecimal,
};

/// Rejection reason for a sell quoted below the caller's floor. Part of the
/// client contract; the wording must not change.
pub const SELL_BELOW_BOUND: &str = "Swap price lower than maxPrice";

/// Rejection reason for a buy quoted above the caller's ceiling. Part of the
/// client contract; the wording must not change.
pub const BUY_ABOVE_BOUND: &str = "Swap price exceeds maxPrice";

/// Outcome of checking a quoted price against the caller's bound. Derived per
/// request, never persisted.
#[derive(Debug, Clone)]
pub struct Decision {
    pub passed: bool,
    pub observed: BigDecimal,
    pub bound: Option<BigDecimal>,
    pub reason: Option<&'static str>,
}

/// Checks the observed price against the bound. Without a bound the guard
/// always passes. A sell requires at least the bound (it is a floor), a buy
/// at most the bound (it is a ceiling).
pub fn check(observed: &Price, bound: Option<&BigDecimal>, side: Side) -> Decision {
    let observed = observed.as_decimal().clone();
    let Some(bound) = bound else {
        return Decision {
            passed: true,
            observed,
            bound: None,
            reason: None,
        };
    };
    let passed = match side {
        Side::Sell => &observed >= bound,
        Side::Buy => &observed <= bound,
    };
    Decision {
        passed,
        observed,
        bound: Some(bound.clone()),
        reason: (!passed).then(|| match side {
            Side::Sell => SELL_BELOW_BOUND,
            Side::Buy => BUY_ABOVE_BOUND,
        }),
    }
}
