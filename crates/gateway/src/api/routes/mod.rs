use crate::api::response;

mod dto;
mod quote;
mod trade;

pub(super) use {quote::quote, trade::trade};

pub(super) fn healthz(app: axum::Router<()>) -> axum::Router<()> {
    app.route("/healthz", axum::routing::get(healthz_route))
}

async fn healthz_route() -> axum::http::StatusCode {
    axum::http::StatusCode::OK
}

pub(super) fn metrics(app: axum::Router<()>) -> axum::Router<()> {
    app.route("/metrics", axum::routing::get(metrics_route))
}

async fn metrics_route() -> String {
    observe::metrics::encode(observe::metrics::get_registry())
}

/// Gateway status: which network it trades on and that it is responsive.
pub(super) fn status(app: axum::Router<()>, network: String) -> axum::Router<()> {
    app.route(
        "/",
        axum::routing::get(move || {
            let network = network.clone();
            async move {
                let clock = response::Clock::start();
                axum::Json(serde_json::json!({
                    "network": network,
                    "timestamp": clock.timestamp(),
                    "latency": clock.latency(),
                }))
            }
        }),
    )
}
