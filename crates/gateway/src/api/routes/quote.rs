use {
    super::dto,
    crate::{
        api::{State, response},
        domain::swap::Side,
    },
    axum::response::{IntoResponse, Response},
};

pub(in crate::api) fn quote(router: axum::Router<State>) -> axum::Router<State> {
    router
        .route("/sell-quote", axum::routing::post(sell))
        .route("/buy-quote", axum::routing::post(buy))
}

async fn sell(
    state: axum::extract::State<State>,
    body: axum::extract::Json<dto::Quote>,
) -> Response {
    handle(state.0, body.0, Side::Sell).await
}

async fn buy(
    state: axum::extract::State<State>,
    body: axum::extract::Json<dto::Quote>,
) -> Response {
    handle(state.0, body.0, Side::Buy).await
}

async fn handle(state: State, body: dto::Quote, side: Side) -> Response {
    let clock = response::Clock::start();
    let request = match body.into_domain(side, state.tokens()) {
        Ok(request) => request,
        Err(err) => {
            tracing::debug!(%err, "invalid quote request");
            return err.into_response();
        }
    };
    let outcome = state.pipeline().quote(&request).await;
    response::outcome(&clock, state.network(), &request, outcome)
}
