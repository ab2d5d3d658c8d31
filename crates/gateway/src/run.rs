#[cfg(unix)]
use tokio::signal::unix::{self, SignalKind};
use {
    crate::{
        api,
        domain::trade,
        infra::{cli, config, dex, executor, tokens},
    },
    clap::Parser,
    std::{net::SocketAddr, sync::Arc},
    tokio::sync::oneshot,
};

pub async fn start(args: impl Iterator<Item = String>) {
    run(args, None).await;
}

pub async fn run(args: impl Iterator<Item = String>, bind: Option<oneshot::Sender<SocketAddr>>) {
    let args = cli::Args::parse_from(args);
    observe::tracing::initialize(&args.log_filter);
    observe::metrics::setup_registry_reentrant(Some("gateway".to_owned()), None);
    tracing::info!("running gateway with {args:#?}");

    let config = config::file::load(&args.config).await;
    let tokens = Arc::new(tokens::Registry::new(config.tokens));

    api::Api {
        addr: args.addr,
        network: config.network,
        amm: amm_backend(&config.amm, config.confirmation_timeout, tokens.clone()),
        weighted: weighted_backend(&config.weighted, config.confirmation_timeout, tokens),
        addr_sender: bind,
    }
    .serve(shutdown_signal())
    .await
    .unwrap();
}

fn amm_backend(
    config: &config::Backend,
    confirmation_timeout: std::time::Duration,
    tokens: Arc<tokens::Registry>,
) -> api::Backend {
    api::Backend {
        pipeline: trade::Pipeline::new(
            Arc::new(dex::amm::Router::new(dex::amm::Config {
                endpoint: config.router.clone(),
            })),
            Arc::new(executor::Executor::new(executor::Config {
                endpoint: config.executor.clone(),
                confirmation_timeout,
            })),
        ),
        tokens,
    }
}

fn weighted_backend(
    config: &config::Backend,
    confirmation_timeout: std::time::Duration,
    tokens: Arc<tokens::Registry>,
) -> api::Backend {
    api::Backend {
        pipeline: trade::Pipeline::new(
            Arc::new(dex::weighted::Sor::new(dex::weighted::Config {
                endpoint: config.router.clone(),
            })),
            Arc::new(executor::Executor::new(executor::Config {
                endpoint: config.executor.clone(),
                confirmation_timeout,
            })),
        ),
        tokens,
    }
}

#[cfg(unix)]
async fn shutdown_signal() {
    // Intercept main signals for graceful shutdown. Kubernetes sends sigterm,
    // whereas locally sigint (ctrl-c) is most common.
    let mut interrupt = unix::signal(SignalKind::interrupt()).unwrap();
    let mut terminate = unix::signal(SignalKind::terminate()).unwrap();
    tokio::select! {
        _ = interrupt.recv() => (),
        _ = terminate.recv() => (),
    };
}

#[cfg(windows)]
async fn shutdown_signal() {
    // We don't support signal handling on Windows.
    std::future::pending().await
}
