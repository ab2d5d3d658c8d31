use {
    super::dto,
    crate::{
        api::{State, response},
        domain::swap::Side,
    },
    axum::response::{IntoResponse, Response},
};

pub(in crate::api) fn trade(router: axum::Router<State>) -> axum::Router<State> {
    router
        .route("/sell", axum::routing::post(sell))
        .route("/buy", axum::routing::post(buy))
}

async fn sell(
    state: axum::extract::State<State>,
    body: axum::extract::Json<dto::Trade>,
) -> Response {
    handle(state.0, body.0, Side::Sell).await
}

async fn buy(
    state: axum::extract::State<State>,
    body: axum::extract::Json<dto::Trade>,
) -> Response {
    handle(state.0, body.0, Side::Buy).await
}

async fn handle(state: State, body: dto::Trade, side: Side) -> Response {
    let clock = response::Clock::start();
    let request = match body.into_domain(side, state.tokens()) {
        Ok(request) => request,
        Err(err) => {
            tracing::debug!(%err, "invalid trade request");
            return err.into_response();
        }
    };
    let outcome = state.pipeline().trade(&request).await;
    response::outcome(&clock, state.network(), &request.swap, outcome)
}
