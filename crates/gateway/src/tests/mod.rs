//! End-to-end tests driving the gateway's public HTTP surface against mocked
//! external APIs (the backend routers and the execution proxy).

use {
    crate::{
        api,
        domain::{eth, trade},
        infra::{dex, executor, tokens},
    },
    std::{net::SocketAddr, sync::Arc, time::Duration},
};

mod trade_execution;

/// Address of the TOKEN_A test token.
pub fn base_token() -> eth::Address {
    eth::Address::repeat_byte(0x11)
}

/// Address of the TOKEN_B test token.
pub fn quote_token() -> eth::Address {
    eth::Address::repeat_byte(0x22)
}

/// A gateway serving both backends, with all external APIs pointed at the
/// given mock server.
pub struct Gateway {
    client: reqwest::Client,
    addr: SocketAddr,
}

impl Gateway {
    pub async fn start(external: SocketAddr, confirmation_timeout: Duration) -> Self {
        observe::tracing::initialize_reentrant("debug");

        let tokens = Arc::new(tokens::Registry::new([
            ("TOKEN_A".to_owned(), eth::TokenAddress(base_token())),
            ("TOKEN_B".to_owned(), eth::TokenAddress(quote_token())),
        ]));
        let url = |path: &str| {
            format!("http://{external}{path}")
                .parse()
                .expect("valid mock url")
        };
        let execution_proxy = || {
            Arc::new(executor::Executor::new(executor::Config {
                endpoint: url("/execute"),
                confirmation_timeout,
            }))
        };
        let amm = api::Backend {
            pipeline: trade::Pipeline::new(
                Arc::new(dex::amm::Router::new(dex::amm::Config {
                    endpoint: url("/route"),
                })),
                execution_proxy(),
            ),
            tokens: tokens.clone(),
        };
        let weighted = api::Backend {
            pipeline: trade::Pipeline::new(
                Arc::new(dex::weighted::Sor::new(dex::weighted::Config {
                    endpoint: url("/sor"),
                })),
                execution_proxy(),
            ),
            tokens,
        };

        let (addr_sender, addr_receiver) = tokio::sync::oneshot::channel();
        let api = api::Api {
            addr: "127.0.0.1:0".parse().unwrap(),
            network: "mainnet".to_owned(),
            amm,
            weighted,
            addr_sender: Some(addr_sender),
        };
        tokio::spawn(async move { api.serve(std::future::pending()).await.unwrap() });
        let addr = addr_receiver.await.unwrap();

        Self {
            client: reqwest::Client::new(),
            addr,
        }
    }

    pub async fn post(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> (reqwest::StatusCode, serde_json::Value) {
        let response = self
            .client
            .post(format!("http://{}{path}", self.addr))
            .json(&body)
            .send()
            .await
            .unwrap();
        let status = response.status();
        let body = response.json().await.unwrap();
        (status, body)
    }
}
