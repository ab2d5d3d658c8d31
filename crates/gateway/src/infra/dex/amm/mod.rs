use {
    crate::domain::{eth, swap},
    std::sync::atomic::{self, AtomicU64},
    tracing::Instrument,
};

mod dto;

/// Client for the constant-product pool router API.
pub struct Router {
    client: reqwest::Client,
    endpoint: reqwest::Url,
}

pub struct Config {
    /// The URL of the route query endpoint.
    pub endpoint: reqwest::Url,
}

impl Router {
    pub fn new(config: Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: config.endpoint,
        }
    }

    async fn best_route(&self, query: &dto::Query) -> Result<dto::Route, Error> {
        let request = serde_json::to_string(query)?;
        tracing::trace!(endpoint = %self.endpoint, %request, "querying route");
        let response = self
            .client
            .post(self.endpoint.clone())
            .header("content-type", "application/json")
            .body(request)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        tracing::trace!(%response, "routed");
        let route = serde_json::from_str(&response)?;
        Ok(route)
    }
}

#[async_trait::async_trait]
impl swap::RouteProviding for Router {
    async fn route(
        &self,
        token_in: eth::TokenAddress,
        token_out: eth::TokenAddress,
    ) -> Result<Option<swap::Route>, swap::RouteError> {
        let query = dto::Query {
            token_in: token_in.0,
            token_out: token_out.0,
        };
        let route = {
            // Set up a tracing span to make debugging of API requests easier.
            static ID: AtomicU64 = AtomicU64::new(0);
            let id = ID.fetch_add(1, atomic::Ordering::Relaxed);
            self.best_route(&query)
                .instrument(tracing::trace_span!("route", id = %id))
                .await
                .map_err(swap::RouteError::new)?
        };
        if route.is_empty() {
            return Ok(None);
        }
        route.into_domain().map(Some).map_err(swap::RouteError::new)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}
