/*
 * Responsibility
 * - 永続化境界の trait 定義 (resource 種別ごとに 1 実装)
 * - Postgres 実装と test 用 in-memory 実装を切り替え可能にする
 */
use async_trait::async_trait;

use crate::models::{Resource, User};
use crate::repos::error::RepoResult;

pub mod comment_repo;
pub mod error;
pub mod photo_repo;
pub mod social_media_repo;
pub mod user_repo;

#[cfg(test)]
pub mod memory;

pub use comment_repo::CommentRepo;
pub use photo_repo::PhotoRepo;
pub use social_media_repo::SocialMediaRepo;
pub use user_repo::UserRepo;

/// Storage for one resource kind. Identifiers arrive already generated.
#[async_trait]
pub trait Repository<R: Resource>: Send + Sync {
    /// Listings newest first, restricted to `owner_id` when given.
    async fn list(&self, owner_id: Option<&str>) -> RepoResult<Vec<R::Listing>>;

    async fn insert(&self, resource: &R) -> RepoResult<R>;

    async fn get(&self, id: &str) -> RepoResult<Option<R>>;

    /// `None` when the row vanished between load and write.
    async fn update(&self, resource: &R) -> RepoResult<Option<R>>;

    /// `false` when nothing was deleted.
    async fn delete(&self, id: &str) -> RepoResult<bool>;
}

#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;
}
