use crate::services::auth::AuthError;

/// errors surfaced by the backing object store
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("{kind} '{name}' was not found")]
    NotFound { kind: &'static str, name: String },
    /// optimistic concurrency rejection, the object changed under the writer
    #[error("conflict writing {kind} '{name}'")]
    Conflict { kind: &'static str, name: String },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

/// errors returned synchronously to API store callers
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("template spec rejected: {0}")]
    SpecRejected(String),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
