use {
    crate::domain::eth,
    std::time::Duration,
    url::Url,
};

pub mod file;

#[derive(Debug)]
pub struct Config {
    /// Name of the network the gateway trades on, echoed in every response.
    pub network: String,

    /// How long to wait for a submitted swap to confirm before giving up
    /// with an unknown on-chain outcome.
    pub confirmation_timeout: Duration,

    /// The token registry: symbols clients may trade, with their addresses.
    pub tokens: Vec<(String, eth::TokenAddress)>,

    pub amm: Backend,
    pub weighted: Backend,
}

/// Endpoints of one routing backend.
#[derive(Debug)]
pub struct Backend {
    /// The route query API of this backend's smart order router.
    pub router: Url,

    /// The execution proxy that signs, submits and awaits swaps routed
    /// through this backend.
    pub executor: Url,
}
