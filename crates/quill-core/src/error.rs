//! Error types shared by the ports.

use thiserror::Error;

/// What a repository implementation can fail with.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("storage connection failed: {0}")]
    Connection(String),

    #[error("query failed: {0}")]
    Query(String),

    #[error("entity does not exist")]
    NotFound,

    #[error("constraint violated: {0}")]
    Constraint(String),
}
