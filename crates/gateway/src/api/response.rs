//! The outward-facing response contract, uniform across both backends and
//! all four operation modes.

use {
    crate::{
        api::error,
        domain::{swap, trade},
    },
    axum::{
        http::StatusCode,
        response::{IntoResponse, Json, Response},
    },
    chrono::Utc,
    serde::Serialize,
    std::time::Instant,
};

/// Number of significant digits for outward prices and derived amounts.
const PRICE_DIGITS: u64 = 8;

/// Request-scoped clock. The timestamp is taken at handler entry; latency is
/// measured against the monotonic instant captured at the same moment, so it
/// cannot be negative.
pub struct Clock {
    started: Instant,
    timestamp: i64,
}

impl Clock {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Elapsed wall time in seconds, computed at formatting time.
    pub fn latency(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub network: String,
    pub timestamp: i64,
    pub latency: f64,
    pub base: String,
    pub quote: String,
    pub amount: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_out: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_in: Option<String>,
    pub price: String,
    pub swaps: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    #[serde(flatten)]
    pub quote: Quote,
    pub gas_used: u64,
    pub tx_hash: String,
    pub status: Status,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Success,
    Failure,
}

impl Quote {
    fn new(
        clock: &Clock,
        network: &str,
        request: &swap::QuoteRequest,
        quoted: &trade::Quoted,
    ) -> Self {
        let expected = number::units::to_significant(&quoted.expected, PRICE_DIGITS);
        let (expected_out, expected_in) = match request.side {
            swap::Side::Sell => (Some(expected), None),
            swap::Side::Buy => (None, Some(expected)),
        };
        Self {
            network: network.to_owned(),
            timestamp: clock.timestamp(),
            latency: clock.latency(),
            base: request.base.symbol.clone(),
            quote: request.quote.symbol.clone(),
            amount: request.amount.to_string(),
            expected_out,
            expected_in,
            price: number::units::to_significant(quoted.price.as_decimal(), PRICE_DIGITS),
            swaps: quoted.path.iter().map(|pool| pool.0.clone()).collect(),
        }
    }
}

impl Trade {
    fn new(
        clock: &Clock,
        network: &str,
        request: &swap::QuoteRequest,
        traded: &trade::Traded,
    ) -> Self {
        Self {
            quote: Quote::new(clock, network, request, &traded.quoted),
            gas_used: traded.receipt.gas_used,
            tx_hash: traded.receipt.tx_hash.to_string(),
            status: match traded.receipt.status {
                swap::ExecutionStatus::Success => Status::Success,
                swap::ExecutionStatus::Failure => Status::Failure,
            },
        }
    }
}

/// Renders a terminal pipeline outcome. Each terminal state maps to exactly
/// one response variant.
pub fn outcome(
    clock: &Clock,
    network: &str,
    request: &swap::QuoteRequest,
    outcome: Result<trade::Outcome, trade::Error>,
) -> Response {
    match outcome {
        Ok(trade::Outcome::Quoted(quoted)) => (
            StatusCode::OK,
            Json(Quote::new(clock, network, request, &quoted)),
        )
            .into_response(),
        Ok(trade::Outcome::Traded(traded)) => (
            StatusCode::OK,
            Json(Trade::new(clock, network, request, &traded)),
        )
            .into_response(),
        Ok(trade::Outcome::NoRoute) => error::no_route(),
        Ok(trade::Outcome::Rejected(decision)) => error::guard_rejection(&decision),
        Err(err) => error::classify(&err),
    }
}
