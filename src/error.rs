use serde::Serialize;
use thiserror::Error;

/// Failure of a single scanner call. Absorbed by the scope scan task;
/// never aborts siblings.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("credentials unavailable: {0}")]
    Credentials(String),

    #[error("{service} call failed: {cause}")]
    Api {
        service: &'static str,
        cause: anyhow::Error,
    },
}

impl ScanError {
    pub fn api(service: &'static str, err: impl Into<anyhow::Error>) -> Self {
        ScanError::Api {
            service,
            cause: err.into(),
        }
    }
}

/// Top-level failure of a whole inventory operation. Everything below
/// this level degrades the result instead of failing it.
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("no scopes available")]
    NoScopes,

    #[error("credentials not configured: {0}")]
    Credentials(String),
}

/// A scanner failure recorded against one scope. Diagnostic output; the
/// records the scanner would have produced are simply missing.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScannerFailure {
    pub scope: String,
    pub scanner: String,
    pub message: String,
}

/// A scope task that failed at the orchestration level (task panic),
/// as opposed to scanner errors already absorbed inside the task.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScopeError {
    pub scope: String,
    pub message: String,
}
