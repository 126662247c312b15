use axum::http::{header, HeaderMap};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for registered users.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub String);

/// Closed set of roles recognized by the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Developer,
    Employer,
    Admin,
}

impl Role {
    pub const fn label(self) -> &'static str {
        match self {
            Role::Developer => "DEVELOPER",
            Role::Employer => "EMPLOYER",
            Role::Admin => "ADMIN",
        }
    }
}

/// Verified `{user, role}` pair attached to every inbound request.
///
/// Produced by the external [`AuthService`]; the core trusts it and never
/// re-derives it from the credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: UserId,
    pub role: Role,
}

impl Identity {
    pub fn new(user_id: impl Into<String>, role: Role) -> Self {
        Self {
            user_id: UserId(user_id.into()),
            role,
        }
    }
}

/// Credential verification boundary. Token formats, signatures, and
/// password storage live behind this trait; the core only consumes the
/// verified identity it yields.
pub trait AuthService: Send + Sync {
    fn verify(&self, credential: &str) -> Result<Identity, AuthError>;
}

/// Failure surface of credential verification.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("authorization credential missing or malformed")]
    MissingCredential,
    #[error("authorization credential rejected")]
    InvalidCredential,
}

/// Resolve the request identity from a `Bearer` authorization header.
pub fn bearer_identity(
    auth: &dyn AuthService,
    headers: &HeaderMap,
) -> Result<Identity, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(AuthError::MissingCredential)?;
    let token = value
        .strip_prefix("Bearer ")
        .ok_or(AuthError::MissingCredential)?
        .trim();
    if token.is_empty() {
        return Err(AuthError::MissingCredential);
    }
    auth.verify(token)
}
