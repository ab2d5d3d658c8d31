use {
    crate::domain::{eth, swap},
    serde::{Deserialize, Serialize},
};

/// A route query against the pair router.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Query {
    pub token_in: eth::Address,
    pub token_out: eth::Address,
}

/// The best route found by the router.
///
/// The router returns an empty object when no pool can serve the pair. We
/// don't consider this an error case.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    /// Identifiers of the pools the swap hops through, in order.
    #[serde(default)]
    pub pairs: Vec<String>,
    /// The marginal price in token-out per token-in, as a decimal string.
    #[serde(default)]
    pub mid_price: String,
}

impl Route {
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn into_domain(self) -> Result<swap::Route, InvalidRoute> {
        let marginal_price = self
            .mid_price
            .parse()
            .map_err(|_| InvalidRoute(self.mid_price.clone()))?;
        Ok(swap::Route {
            path: self.pairs.into_iter().map(eth::PoolId).collect(),
            marginal_price,
        })
    }
}

#[derive(Debug, thiserror::Error)]
#[error("router returned unparseable mid price {0:?}")]
pub struct InvalidRoute(String);
