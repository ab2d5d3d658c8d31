use {
    crate::domain::swap,
    anyhow::anyhow,
    std::time::Duration,
};

/// Client for the execution proxy: the external service that signs a swap
/// with the request's key, broadcasts it and awaits the on-chain receipt.
///
/// Submission is not idempotent. The client never retries; when the
/// confirmation wait expires the on-chain outcome is unknown and the failure
/// is reported as such.
pub struct Executor {
    client: reqwest::Client,
    endpoint: reqwest::Url,
    confirmation_timeout: Duration,
}

pub struct Config {
    /// The URL of the swap submission endpoint.
    pub endpoint: reqwest::Url,

    /// Bound on the combined submission and confirmation wait.
    pub confirmation_timeout: Duration,
}

impl Executor {
    pub fn new(config: Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: config.endpoint,
            confirmation_timeout: config.confirmation_timeout,
        }
    }

    async fn submit(&self, request: &dto::Request) -> Result<dto::Receipt, swap::ExecuteError> {
        // The request body carries the signer key, so it is deliberately not
        // logged.
        tracing::debug!(endpoint = %self.endpoint, "submitting swap");
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await
            .map_err(other)?;
        let status = response.status();
        let body = response.text().await.map_err(other)?;
        if !status.is_success() {
            // The proxy reports on-chain reverts as {"error": <reason>}.
            if let Ok(failure) = serde_json::from_str::<dto::Failure>(&body) {
                return Err(swap::ExecuteError::Reverted {
                    reason: failure.error,
                });
            }
            return Err(swap::ExecuteError::Other(anyhow!(
                "execution proxy returned {status}: {body}"
            )));
        }
        serde_json::from_str(&body)
            .map_err(|err| swap::ExecuteError::Other(anyhow!("invalid receipt {body:?}: {err}")))
    }
}

fn other(err: reqwest::Error) -> swap::ExecuteError {
    swap::ExecuteError::Other(err.into())
}

#[async_trait::async_trait]
impl swap::SwapExecuting for Executor {
    async fn execute(
        &self,
        execution: swap::Execution,
    ) -> Result<swap::Receipt, swap::ExecuteError> {
        let request = dto::Request::from_domain(&execution);
        let receipt = tokio::time::timeout(self.confirmation_timeout, self.submit(&request))
            .await
            .map_err(|_| swap::ExecuteError::ConfirmationTimeout {
                timeout: self.confirmation_timeout,
            })??;
        receipt.into_domain()
    }
}

mod dto {
    use {
        crate::domain::{eth, swap},
        serde::{Deserialize, Serialize},
        serde_with::serde_as,
    };

    #[derive(Debug, Serialize)]
    #[serde(rename_all = "lowercase")]
    pub enum Kind {
        Sell,
        Buy,
    }

    /// Instructions for the execution proxy. Carries the signer key, so the
    /// type intentionally does not implement Debug.
    #[serde_as]
    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Request {
        pub kind: Kind,
        pub token_in: eth::Address,
        pub token_out: eth::Address,
        /// Base-unit amount: given-in for sells, given-out for buys.
        #[serde_as(as = "number::serialization::U256")]
        pub amount: eth::U256,
        /// The pool path the router selected.
        pub swaps: Vec<String>,
        pub signer_key: String,
        /// Gas price override in wei, as a decimal string.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub gas_price: Option<String>,
    }

    impl Request {
        pub fn from_domain(execution: &swap::Execution) -> Self {
            Self {
                kind: match execution.side {
                    swap::Side::Sell => Kind::Sell,
                    swap::Side::Buy => Kind::Buy,
                },
                token_in: execution.token_in.0,
                token_out: execution.token_out.0,
                amount: execution.amount,
                swaps: execution
                    .route
                    .path
                    .iter()
                    .map(|pool| pool.0.clone())
                    .collect(),
                signer_key: execution.signer.expose().to_owned(),
                gas_price: execution.gas_price.as_ref().map(ToString::to_string),
            }
        }
    }

    /// The confirmed receipt reported by the proxy.
    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Receipt {
        pub tx_hash: eth::TxHash,
        pub gas_used: u64,
        pub status: Status,
        #[serde(default)]
        pub revert_reason: Option<String>,
    }

    #[derive(Debug, Deserialize, PartialEq, Eq)]
    #[serde(rename_all = "lowercase")]
    pub enum Status {
        Success,
        Failure,
    }

    /// Failure body returned by the proxy for reverted submissions.
    #[derive(Debug, Deserialize)]
    pub struct Failure {
        pub error: String,
    }

    impl Receipt {
        /// Projects the proxy receipt into the domain. Receipts whose
        /// on-chain status is a revert are execution failures, with the
        /// revert reason attached when the proxy recovered one.
        pub fn into_domain(self) -> Result<swap::Receipt, swap::ExecuteError> {
            let status = match self.status {
                Status::Success => swap::ExecutionStatus::Success,
                Status::Failure => swap::ExecutionStatus::Failure,
            };
            if status == swap::ExecutionStatus::Failure {
                return Err(swap::ExecuteError::Reverted {
                    reason: self
                        .revert_reason
                        .unwrap_or_else(|| "execution reverted".to_owned()),
                });
            }
            Ok(swap::Receipt {
                tx_hash: self.tx_hash,
                gas_used: self.gas_used,
                status,
            })
        }
    }
}
