//! Serve the gateway API.

use {
    crate::{domain::trade, infra::tokens},
    std::{future::Future, net::SocketAddr, sync::Arc, time::Instant},
    tokio::sync::oneshot,
};

mod error;
mod response;
mod routes;

pub struct Api {
    pub addr: SocketAddr,
    pub network: String,
    pub amm: Backend,
    pub weighted: Backend,
    /// If this channel is specified, the bound address will be sent to it.
    /// This allows binding to 0.0.0.0:0 during testing.
    pub addr_sender: Option<oneshot::Sender<SocketAddr>>,
}

/// One routing backend wired to its guarded pipeline.
pub struct Backend {
    pub pipeline: trade::Pipeline,
    pub tokens: Arc<tokens::Registry>,
}

/// State shared by one backend's route handlers.
#[derive(Clone)]
pub struct State(Arc<Inner>);

struct Inner {
    network: String,
    pipeline: trade::Pipeline,
    tokens: Arc<tokens::Registry>,
}

impl State {
    fn network(&self) -> &str {
        &self.0.network
    }

    fn pipeline(&self) -> &trade::Pipeline {
        &self.0.pipeline
    }

    fn tokens(&self) -> &tokens::Registry {
        &self.0.tokens
    }
}

impl Api {
    pub async fn serve(
        self,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> Result<(), std::io::Error> {
        let mut app = axum::Router::new();
        app = routes::healthz(app);
        app = routes::metrics(app);
        app = routes::status(app, self.network.clone());

        // Multiplex both pool families on the same gateway. Each backend gets
        // its own sub-router wired to its own pipeline.
        for (path, backend) in [("/amm", self.amm), ("/weighted", self.weighted)] {
            let router = axum::Router::new();
            let router = routes::quote(router);
            let router = routes::trade(router);
            let router = router.with_state(State(Arc::new(Inner {
                network: self.network.clone(),
                pipeline: backend.pipeline,
                tokens: backend.tokens,
            })));
            tracing::info!(%path, "mounting backend");
            app = app.nest(path, router);
        }

        app = app
            .layer(axum::middleware::from_fn(track_request_metrics))
            .layer(
                tower::ServiceBuilder::new().layer(tower_http::trace::TraceLayer::new_for_http()),
            );

        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(port = local_addr.port(), "serving gateway");
        if let Some(addr_sender) = self.addr_sender {
            let _ = addr_sender.send(local_addr);
        }
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
    }
}

#[derive(prometheus_metric_storage::MetricStorage, Clone, Debug)]
#[metric(subsystem = "api")]
struct Metrics {
    /// Number of completed API requests.
    #[metric(labels("endpoint", "status_code"))]
    requests_complete: prometheus::IntCounterVec,

    /// Execution time for each API request.
    #[metric(labels("endpoint"), buckets(0.05, 0.1, 0.5, 1, 2, 4, 8, 30, 60))]
    requests_duration_seconds: prometheus::HistogramVec,
}

/// Middleware that tracks per-endpoint request metrics using the matched
/// route as the label rather than the raw path.
async fn track_request_metrics(
    req: axum::extract::Request,
    next: axum::middleware::Next,
) -> axum::response::Response {
    let metrics = Metrics::instance(observe::metrics::get_storage_registry()).unwrap();

    let method = req.method().clone();
    let endpoint = req
        .extensions()
        .get::<axum::extract::MatchedPath>()
        .map(|path| path.as_str().to_owned())
        .unwrap_or_else(|| "unknown".to_owned());
    let label = format!("{method} {endpoint}");

    let timer = Instant::now();
    let response = next.run(req).await;

    metrics
        .requests_complete
        .with_label_values(&[&label, response.status().as_str()])
        .inc();
    metrics
        .requests_duration_seconds
        .with_label_values(&[&label])
        .observe(timer.elapsed().as_secs_f64());

    response
}
