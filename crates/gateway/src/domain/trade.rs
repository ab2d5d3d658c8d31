//! The guarded swap pipeline.
//!
//! One orchestrator serves both routing backends: it is parameterized over
//! the [`swap::RouteProviding`] and [`swap::SwapExecuting`] capability pair
//! and instantiated once per backend at startup.
//!
//! A request moves through the states route-fetched, priced, guard-checked,
//! submitted and confirmed; quotes stop once priced. The terminal states map
//! one-to-one onto [`Outcome`] variants, and any step may fail into
//! [`Error`].

use {
    crate::domain::{
        eth,
        guard,
        price::{self, Price},
        swap::{self, Execution, QuoteRequest, Receipt, Route, TradeRequest},
    },
    bigdecimal::BigDecimal,
    std::sync::Arc,
};

pub struct Pipeline {
    routes: Arc<dyn swap::RouteProviding>,
    executor: Arc<dyn swap::SwapExecuting>,
}

/// Terminal state of one pipeline run.
#[derive(Debug)]
pub enum Outcome {
    /// A price was computed; quote requests stop here.
    Quoted(Quoted),
    /// The swap was submitted and confirmed on-chain.
    Traded(Traded),
    /// No liquidity path exists for the pair. A regular outcome, not an
    /// error.
    NoRoute,
    /// The routed price violates the caller's bound; no funds were committed.
    Rejected(guard::Decision),
}

#[derive(Debug)]
pub struct Quoted {
    /// Quote-per-base price of the route.
    pub price: Price,
    /// Expected quote-token proceeds of a sell, or cost of a buy.
    pub expected: BigDecimal,
    pub path: Vec<eth::PoolId>,
}

#[derive(Debug)]
pub struct Traded {
    pub quoted: Quoted,
    pub receipt: Receipt,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Route(#[from] swap::RouteError),
    #[error(transparent)]
    Price(#[from] price::InvalidPrice),
    #[error("amount conversion failed: {0}")]
    Amount(anyhow::Error),
    #[error(transparent)]
    Execute(#[from] swap::ExecuteError),
}

impl Pipeline {
    pub fn new(routes: Arc<dyn swap::RouteProviding>, executor: Arc<dyn swap::SwapExecuting>) -> Self {
        Self { routes, executor }
    }

    /// Computes a quote: fetches the route and normalizes its price. Never
    /// commits funds.
    pub async fn quote(&self, request: &QuoteRequest) -> Result<Outcome, Error> {
        let Some((quoted, _)) = self.price(request).await? else {
            return Ok(Outcome::NoRoute);
        };
        Ok(Outcome::Quoted(quoted))
    }

    /// Runs the full pipeline: route, guard, convert, execute. The executor
    /// is only invoked once the guard has passed.
    pub async fn trade(&self, request: &TradeRequest) -> Result<Outcome, Error> {
        let Some((quoted, route)) = self.price(&request.swap).await? else {
            return Ok(Outcome::NoRoute);
        };

        let decision = guard::check(&quoted.price, request.max_price.as_ref(), request.swap.side);
        if !decision.passed {
            tracing::debug!(?decision, "rejecting swap outside the caller's price bound");
            return Ok(Outcome::Rejected(decision));
        }

        let amount = number::units::to_base_units(&request.swap.amount).map_err(Error::Amount)?;
        let (token_in, token_out) = request.swap.router_pair();
        let receipt = self
            .executor
            .execute(Execution {
                route,
                token_in,
                token_out,
                side: request.swap.side,
                amount,
                signer: request.signer.clone(),
                gas_price: request.gas_price.clone(),
            })
            .await?;
        tracing::info!(tx = ?receipt.tx_hash, "swap confirmed");
        Ok(Outcome::Traded(Traded { quoted, receipt }))
    }

    async fn price(&self, request: &QuoteRequest) -> Result<Option<(Quoted, Route)>, Error> {
        let (token_in, token_out) = request.router_pair();
        let Some(route) = self.routes.route(token_in, token_out).await? else {
            return Ok(None);
        };
        let price = Price::from_routed(&route.marginal_price, request.side)?;
        let expected = price.quote_amount(&request.amount);
        let quoted = Quoted {
            price,
            expected,
            path: route.path.clone(),
        };
        Ok(Some((quoted, route)))
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::domain::swap::{
            ExecutionStatus,
            MockRouteProviding,
            MockSwapExecuting,
            Side,
            Token,
        },
        std::str::FromStr,
    };

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    fn token(symbol: &str, fill: u8) -> Token {
        Token {
            symbol: symbol.to_owned(),
            address: eth::TokenAddress(eth::Address::repeat_byte(fill)),
        }
    }

    fn quote_request(side: Side, amount: &str) -> QuoteRequest {
        QuoteRequest {
            base: token("TOKEN_A", 0x11),
            quote: token("TOKEN_B", 0x22),
            amount: dec(amount),
            side,
        }
    }

    fn routed(marginal_price: &str) -> Route {
        Route {
            path: vec![eth::PoolId("0x0101".to_owned())],
            marginal_price: dec(marginal_price),
        }
    }

    #[tokio::test]
    async fn guard_rejection_never_reaches_the_executor() {
        let mut routes = MockRouteProviding::new();
        routes
            .expect_route()
            .returning(|_, _| Ok(Some(routed("95"))));
        let mut executor = MockSwapExecuting::new();
        executor.expect_execute().times(0);

        let pipeline = Pipeline::new(Arc::new(routes), Arc::new(executor));
        let request = TradeRequest {
            swap: quote_request(Side::Sell, "1"),
            signer: eth::SignerKey::new("0xkey".into()),
            max_price: Some(dec("100")),
            gas_price: None,
        };
        match pipeline.trade(&request).await.unwrap() {
            Outcome::Rejected(decision) => {
                assert_eq!(decision.reason, Some(guard::SELL_BELOW_BOUND));
                assert_eq!(decision.observed, dec("95"));
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_bound_auto_passes_and_executes_base_units() {
        let mut routes = MockRouteProviding::new();
        routes
            .expect_route()
            .returning(|_, _| Ok(Some(routed("0.005"))));
        let mut executor = MockSwapExecuting::new();
        executor
            .expect_execute()
            .times(1)
            .withf(|execution| {
                execution.amount == eth::U256::from(10).pow(eth::U256::from(18))
                    && execution.side == Side::Buy
            })
            .returning(|_| {
                Ok(Receipt {
                    tx_hash: eth::TxHash::repeat_byte(0xab),
                    gas_used: 21_000,
                    status: ExecutionStatus::Success,
                })
            });

        let pipeline = Pipeline::new(Arc::new(routes), Arc::new(executor));
        let request = TradeRequest {
            swap: quote_request(Side::Buy, "1"),
            signer: eth::SignerKey::new("0xkey".into()),
            max_price: None,
            gas_price: None,
        };
        match pipeline.trade(&request).await.unwrap() {
            Outcome::Traded(traded) => {
                // Marginal price 0.005 base per quote inverts to 200.
                assert_eq!(traded.quoted.price.as_decimal(), &dec("200"));
                assert_eq!(traded.receipt.gas_used, 21_000);
            }
            other => panic!("expected trade, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn no_route_is_terminal_for_trades() {
        let mut routes = MockRouteProviding::new();
        routes.expect_route().returning(|_, _| Ok(None));
        let mut executor = MockSwapExecuting::new();
        executor.expect_execute().times(0);

        let pipeline = Pipeline::new(Arc::new(routes), Arc::new(executor));
        let request = TradeRequest {
            swap: quote_request(Side::Sell, "1"),
            signer: eth::SignerKey::new("0xkey".into()),
            max_price: None,
            gas_price: None,
        };
        assert!(matches!(
            pipeline.trade(&request).await.unwrap(),
            Outcome::NoRoute
        ));
    }

    #[tokio::test]
    async fn quotes_stop_at_priced() {
        let mut routes = MockRouteProviding::new();
        routes
            .expect_route()
            .returning(|_, _| Ok(Some(routed("150.00000"))));
        let mut executor = MockSwapExecuting::new();
        executor.expect_execute().times(0);

        let pipeline = Pipeline::new(Arc::new(routes), Arc::new(executor));
        match pipeline.quote(&quote_request(Side::Sell, "0.1")).await.unwrap() {
            Outcome::Quoted(quoted) => {
                assert_eq!(quoted.expected, dec("15.000000"));
            }
            other => panic!("expected quote, got {other:?}"),
        }
    }
}
