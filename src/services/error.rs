/*
 * Responsibility
 * - Resource service contract のエラー分類
 * - RepoError を contract の意味 (Conflict / Reference) に変換する
 */
use thiserror::Error;

use crate::repos::error::RepoError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{kind} with id {id} doesn't exist")]
    NotFound { kind: &'static str, id: String },

    #[error("{0}")]
    Validation(String),

    #[error("the {field} you entered has been used")]
    Conflict { field: &'static str },

    #[error("{kind} with id {id} doesn't exist")]
    Reference { kind: &'static str, id: String },

    #[error("{operation} exceeded the persistence deadline")]
    Timeout { operation: &'static str },

    #[error("the credential you entered are wrong")]
    InvalidCredentials,

    #[error("password hashing failed")]
    Hashing,

    #[error("token signing failed")]
    Signing,

    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl ServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }
}

/// Column a unique constraint guards, as named in the schema (`users_username_key`).
pub fn conflict_field(constraint: &str) -> &'static str {
    if constraint.contains("username") {
        "username"
    } else if constraint.contains("email") {
        "email"
    } else {
        "value"
    }
}
