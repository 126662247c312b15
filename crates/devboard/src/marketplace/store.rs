//! Shared failure surface of the record-store collaborator.
//!
//! The repositories in `jobs`, `applications`, and `users` are narrow
//! traits over whatever durable store the deployment chooses; they all
//! report failures through this enumeration.

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("record store unavailable: {0}")]
    Unavailable(String),
}
