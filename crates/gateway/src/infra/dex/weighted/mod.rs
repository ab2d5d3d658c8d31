use {
    crate::domain::{eth, swap},
    std::sync::atomic::{self, AtomicU64},
    tracing::Instrument,
};

mod dto;

/// Client for the weighted-pool smart order router API.
pub struct Sor {
    client: reqwest::Client,
    endpoint: reqwest::Url,
}

pub struct Config {
    /// The URL of the SOR quote endpoint.
    pub endpoint: reqwest::Url,
}

impl Sor {
    pub fn new(config: Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: config.endpoint,
        }
    }

    async fn quote(&self, query: &dto::Query) -> Result<dto::Quote, Error> {
        let request = serde_json::to_string(query)?;
        tracing::trace!(endpoint = %self.endpoint, %request, "quoting");
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
        tracing::trace!(%response, "quoted");
        let quote = serde_json::from_str(&response)?;
        Ok(quote)
    }
}

#[async_trait::async_trait]
impl swap::RouteProviding for Sor {
    async fn route(
        &self,
        token_in: eth::TokenAddress,
        token_out: eth::TokenAddress,
    ) -> Result<Option<swap::Route>, swap::RouteError> {
        let query = dto::Query {
            sell_token: token_in.0,
            buy_token: token_out.0,
        };
        let quote = {
            // Set up a tracing span to make debugging of API requests easier.
            static ID: AtomicU64 = AtomicU64::new(0);
            let id = ID.fetch_add(1, atomic::Ordering::Relaxed);
            self.quote(&query)
                .instrument(tracing::trace_span!("quote", id = %id))
                .await
                .map_err(swap::RouteError::new)?
        };
        if quote.is_empty() {
            return Ok(None);
        }
        quote.into_domain().map(Some).map_err(swap::RouteError::new)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}
