use {
    crate::domain::eth,
    serde::Deserialize,
    std::{path::Path, time::Duration},
    tokio::fs,
    url::Url,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct Config {
    network: String,

    /// Bound on the confirmation wait for submitted swaps.
    #[serde(
        with = "humantime_serde",
        default = "default_confirmation_timeout",
        rename = "trade-confirmation-timeout"
    )]
    confirmation_timeout: Duration,

    #[serde(default)]
    tokens: Vec<Token>,

    amm: Backend,
    weighted: Backend,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct Token {
    symbol: String,
    address: eth::Address,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct Backend {
    router: Url,
    executor: Url,
}

fn default_confirmation_timeout() -> Duration {
    Duration::from_secs(60)
}

/// Load the gateway configuration from a TOML file.
///
/// # Panics
///
/// This method panics if the config is invalid or on I/O errors.
pub async fn load(path: &Path) -> super::Config {
    let data = fs::read_to_string(path)
        .await
        .unwrap_or_else(|e| panic!("I/O error while reading {path:?}: {e:?}"));
    parse(&data).unwrap_or_else(|e| panic!("configuration error while reading {path:?}: {e:?}"))
}

fn parse(data: &str) -> Result<super::Config, toml::de::Error> {
    let config = toml::de::from_str::<Config>(data)?;
    Ok(super::Config {
        network: config.network,
        confirmation_timeout: config.confirmation_timeout,
        tokens: config
            .tokens
            .into_iter()
            .map(|token| (token.symbol, eth::TokenAddress(token.address)))
            .collect(),
        amm: super::Backend {
            router: config.amm.router,
            executor: config.amm.executor,
        },
        weighted: super::Backend {
            router: config.weighted.router,
            executor: config.weighted.executor,
        },
    })
}
