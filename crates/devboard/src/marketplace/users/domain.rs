use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::marketplace::identity::{Role, UserId};
use crate::marketplace::validate::{bounded_text, ValidationError};

/// Identifier wrapper for company profiles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompanyId(pub String);

/// A registered account. Credentials live with the external auth
/// collaborator; this record only carries profile data and the role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    /// Opaque URL, stored and returned verbatim.
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Raw registration payload.
#[derive(Debug, Clone, Deserialize)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Validated registration content. Admin accounts are provisioned out of
/// band, never through self-registration.
#[derive(Debug, Clone)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub avatar: Option<String>,
}

impl UserProfile {
    pub fn parse(draft: UserDraft) -> Result<Self, ValidationError> {
        if draft.role == Role::Admin {
            return Err(ValidationError::BadValue { field: "role" });
        }
        let name = bounded_text("name", &draft.name, 2, 100)?;
        let email = bounded_text("email", &draft.email, 3, 200)?;
        if !email.contains('@') {
            return Err(ValidationError::BadValue { field: "email" });
        }
        Ok(Self {
            name,
            email,
            role: draft.role,
            avatar: draft.avatar,
        })
    }
}

/// Raw company-profile payload.
#[derive(Debug, Clone, Deserialize)]
pub struct CompanyDraft {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
}

/// Validated company-profile content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanyProfile {
    pub name: String,
    pub description: Option<String>,
    pub website: Option<String>,
    /// Opaque URL, stored and returned verbatim.
    pub logo: Option<String>,
}

impl CompanyProfile {
    pub fn parse(draft: CompanyDraft) -> Result<Self, ValidationError> {
        let name = bounded_text("company name", &draft.name, 2, 100)?;
        let description = draft
            .description
            .as_deref()
            .map(|value| bounded_text("company description", value, 1, 2000))
            .transpose()?;
        let website = draft
            .website
            .as_deref()
            .map(|value| bounded_text("website", value, 1, 200))
            .transpose()?;
        Ok(Self {
            name,
            description,
            website,
            logo: draft.logo,
        })
    }
}

/// A company profile owned by exactly one employer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Company {
    pub id: CompanyId,
    pub owner: UserId,
    pub profile: CompanyProfile,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
