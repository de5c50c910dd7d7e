/*
 * Responsibility
 * - 4 種類のリソース (user / photo / comment / socialmedia) の domain 型
 * - Resource trait: generic な service / ownership gate が必要とする契約
 * - partial update と validation の共通 helper
 */
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::services::auth::Passwords;
use crate::services::error::{ServiceError, ServiceResult};

pub mod comment;
pub mod photo;
pub mod social_media;
pub mod user;

pub use comment::{Comment, CommentListing, CommentPatch};
pub use photo::{Photo, PhotoListing, PhotoPatch, PhotoSummary};
pub use social_media::{SocialMedia, SocialMediaListing, SocialMediaPatch};
pub use user::{User, UserPatch, UserProfile, UserSummary};

/// Contract shared by every persisted resource.
///
/// `KIND` doubles as the identifier prefix (`photo-…`), `LABEL` is the
/// human-readable name used in error messages.
pub trait Resource: Clone + Send + Sync + 'static {
    const KIND: &'static str;
    const LABEL: &'static str;

    /// Row shape returned by `Fetch`, with associated data already joined.
    type Listing: Send + 'static;

    /// Partial update payload. `None` means "not submitted".
    type Patch: Send + 'static;

    fn id(&self) -> &str;

    fn owner_id(&self) -> &str;

    fn assign_id(&mut self, id: String);

    fn timestamps_mut(&mut self) -> &mut Timestamps;

    fn validate(&self) -> ServiceResult<()>;

    fn apply(&mut self, patch: Self::Patch);

    /// Runs once, after validation and before the first insert.
    fn before_store(&mut self, _passwords: &Passwords) -> ServiceResult<()> {
        Ok(())
    }

    /// Which reference a violated foreign key constraint points at.
    fn dangling_reference(&self, _constraint: &str) -> (&'static str, String) {
        (User::LABEL, self.owner_id().to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Timestamps {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Timestamps {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            created_at: now,
            updated_at: now,
        }
    }
}

impl Default for Timestamps {
    fn default() -> Self {
        Self::at(Utc::now())
    }
}

/// Overwrite `slot` only when a non-blank value was submitted.
pub(crate) fn merge(slot: &mut String, submitted: Option<String>) {
    if let Some(value) = submitted
        && !value.trim().is_empty()
    {
        *slot = value;
    }
}

pub(crate) fn require(value: &str, field: &'static str) -> ServiceResult<()> {
    if value.trim().is_empty() {
        return Err(ServiceError::validation(format!("{field} is required")));
    }
    Ok(())
}

pub(crate) fn max_chars(value: &str, field: &'static str, max: usize) -> ServiceResult<()> {
    if value.chars().count() > max {
        return Err(ServiceError::validation(format!(
            "{field} must be <= {max} chars"
        )));
    }
    Ok(())
}

pub(crate) fn require_url(value: &str, field: &'static str) -> ServiceResult<()> {
    require(value, field)?;
    match url::Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
        _ => Err(ServiceError::validation(format!(
            "{field} must be a valid http(s) url"
        ))),
    }
}
