//! Types around quoting and executing single swaps, and the capability traits
//! implemented by each routing backend.

use {
    crate::domain::eth,
    bigdecimal::BigDecimal,
    std::time::Duration,
};

/// The trade direction, seen from the base token: a sell converts base into
/// quote, a buy acquires base with quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Sell,
    Buy,
}

/// A token as referenced by a request: the client-facing symbol together with
/// the on-chain address it resolved to.
#[derive(Debug, Clone)]
pub struct Token {
    pub symbol: String,
    pub address: eth::TokenAddress,
}

/// A fully validated quote request. Immutable, constructed per request by the
/// API boundary.
#[derive(Debug, Clone)]
pub struct QuoteRequest {
    pub base: Token,
    pub quote: Token,
    /// Human-readable base token amount, strictly positive.
    pub amount: BigDecimal,
    pub side: Side,
}

impl QuoteRequest {
    /// The token pair in router terms for this request's direction. Sells
    /// swap base into quote; buys swap quote into base.
    pub fn router_pair(&self) -> (eth::TokenAddress, eth::TokenAddress) {
        match self.side {
            Side::Sell => (self.base.address, self.quote.address),
            Side::Buy => (self.quote.address, self.base.address),
        }
    }
}

/// A trade request: a quote request plus everything needed to commit funds.
#[derive(Debug, Clone)]
pub struct TradeRequest {
    pub swap: QuoteRequest,
    pub signer: eth::SignerKey,
    /// Worst acceptable price in quote tokens per base token: a floor for
    /// sells, a ceiling for buys.
    pub max_price: Option<BigDecimal>,
    /// Gas price override in wei.
    pub gas_price: Option<BigDecimal>,
}

/// The route a backend found for one request: the pool path and the marginal
/// price, denominated in token-out per token-in for the queried direction.
/// Never cached or shared across requests.
#[derive(Debug, Clone)]
pub struct Route {
    pub path: Vec<eth::PoolId>,
    pub marginal_price: BigDecimal,
}

/// A read-only projection of the on-chain receipt for a submitted swap.
#[derive(Debug, Clone)]
pub struct Receipt {
    pub tx_hash: eth::TxHash,
    pub gas_used: u64,
    pub status: ExecutionStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStatus {
    Success,
    Failure,
}

/// Everything the execution proxy needs to submit a swap.
#[derive(Debug)]
pub struct Execution {
    pub route: Route,
    pub token_in: eth::TokenAddress,
    pub token_out: eth::TokenAddress,
    pub side: Side,
    /// Base-unit amount: given-in for sells, given-out for buys.
    pub amount: eth::U256,
    pub signer: eth::SignerKey,
    pub gas_price: Option<BigDecimal>,
}

/// Queries a routing backend for the best available route.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RouteProviding: Send + Sync + 'static {
    /// The best route for swapping `token_in` into `token_out`. Returns
    /// `Ok(None)` when no liquidity path exists, which is a regular outcome
    /// and not an error.
    async fn route(
        &self,
        token_in: eth::TokenAddress,
        token_out: eth::TokenAddress,
    ) -> Result<Option<Route>, RouteError>;
}

/// Submits swaps through an execution proxy and awaits their receipts.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait SwapExecuting: Send + Sync + 'static {
    /// Submits the swap and awaits its confirmed on-chain receipt, not just
    /// broadcast acceptance. Not idempotent: a swap must never be resubmitted
    /// after an ambiguous failure.
    async fn execute(&self, execution: Execution) -> Result<Receipt, ExecuteError>;
}

/// Route query failure.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct RouteError(Box<dyn std::error::Error + Send + Sync>);

impl RouteError {
    pub fn new<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self(Box::new(err))
    }
}

/// Execution failure.
#[derive(Debug, thiserror::Error)]
pub enum ExecuteError {
    /// The transaction was mined but reverted on-chain. The reason string is
    /// surfaced verbatim to the client.
    #[error("{reason}")]
    Reverted { reason: String },
    /// No confirmation arrived within the configured bound. The on-chain
    /// outcome is unknown and the swap must not be resubmitted.
    #[error("transaction unconfirmed after {timeout:?}, on-chain outcome unknown")]
    ConfirmationTimeout { timeout: Duration },
    #[error(transparent)]
    Other(anyhow::Error),
}
