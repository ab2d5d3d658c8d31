use {
    crate::domain::{eth, swap},
    serde::{Deserialize, Serialize},
};

/// An SOR quote query.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Query {
    /// The token to swap out of.
    pub sell_token: eth::Address,
    /// The token to swap into.
    pub buy_token: eth::Address,
}

/// The swap route found by the smart order router.
///
/// The SOR responds with an empty swap list when it fails to find a route for
/// whatever reason (not enough liquidity, no trading path, etc.). We don't
/// consider this an error case.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// The swap route.
    #[serde(default)]
    pub swaps: Vec<Swap>,
    /// The marginal spot price in token-out per token-in, as a decimal
    /// string.
    #[serde(default)]
    pub market_sp: String,
}

/// A swap included in a larger batched swap.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Swap {
    /// The ID of the pool swapping in this step.
    pub pool_id: String,
}

impl Quote {
    pub fn is_empty(&self) -> bool {
        self.swaps.is_empty()
    }

    pub fn into_domain(self) -> Result<swap::Route, InvalidQuote> {
        let marginal_price = self
            .market_sp
            .parse()
            .map_err(|_| InvalidQuote(self.market_sp.clone()))?;
        Ok(swap::Route {
            path: self
                .swaps
                .into_iter()
                .map(|swap| eth::PoolId(swap.pool_id))
                .collect(),
            marginal_price,
        })
    }
}

#[derive(Debug, thiserror::Error)]
#[error("SOR returned unparseable market price {0:?}")]
pub struct InvalidQuote(String);
