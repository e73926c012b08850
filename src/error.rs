//! Error types shared by the graph, store and mutation layers

use crate::model::UserId;
use thiserror::Error;

/// Failures surfaced by core operations and store collaborators
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Malformed request, rejected before any write
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// The caller may not act on this record
    #[error("{caller} is not authorized to {action}")]
    NotAuthorized { caller: UserId, action: String },

    /// Backend error on read or write; never retried here
    #[error("store failure: {0}")]
    TransientStoreFailure(String),

    /// Another mutation for the same target has not finished yet
    #[error("a friendship change for {0} is already in flight")]
    MutationInFlight(UserId),

    #[error("unknown user: {0}")]
    UnknownUser(UserId),
}

pub type Result<T> = std::result::Result<T, Error>;
