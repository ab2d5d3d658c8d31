//! The single mapping from pipeline failures onto the stable `{error,
//! message}` contract. New failure sources must be routed through this
//! module rather than allowed to escape unclassified.

use {
    crate::domain::{guard, swap, trade},
    axum::{
        http::StatusCode,
        response::{IntoResponse, Json, Response},
    },
    serde::Serialize,
};

/// The stable outward failure body.
#[derive(Debug, Serialize)]
pub struct Rejection {
    pub error: String,
    pub message: String,
}

/// No liquidity path exists. A regular answer, so the status code is
/// success-class.
pub fn no_route() -> Response {
    (
        StatusCode::OK,
        Json(Rejection {
            error: "no_pool_available".to_owned(),
            message: String::new(),
        }),
    )
        .into_response()
}

/// The guard rejected the quoted price. A business rejection clients are
/// expected to handle, not a system error, hence the success-class status.
pub fn guard_rejection(decision: &guard::Decision) -> Response {
    let bound = decision
        .bound
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_default();
    (
        StatusCode::OK,
        Json(Rejection {
            error: decision.reason.unwrap_or_default().to_owned(),
            message: format!(
                "swap price {} violates the maxPrice bound {}",
                decision.observed, bound
            ),
        }),
    )
        .into_response()
}

/// A malformed request, rejected at the boundary before the pipeline starts.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct Validation(pub String);

impl IntoResponse for Validation {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(Rejection {
                error: "validation_error".to_owned(),
                message: self.0,
            }),
        )
            .into_response()
    }
}

/// Classifies a pipeline failure: failures carrying an on-chain revert
/// reason surface it verbatim as the error code, everything else falls back
/// to the generic `operation_error` with the raw failure as message.
pub fn classify(err: &trade::Error) -> Response {
    tracing::warn!(?err, "pipeline failed");
    let rejection = match err {
        trade::Error::Execute(swap::ExecuteError::Reverted { reason }) => Rejection {
            error: reason.clone(),
            message: "swap reverted on-chain".to_owned(),
        },
        other => Rejection {
            error: "operation_error".to_owned(),
            message: other.to_string(),
        },
    };
    (StatusCode::INTERNAL_SERVER_ERROR, Json(rejection)).into_response()
}
