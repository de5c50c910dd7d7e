/*
 * Responsibility
 * - Fetch / Store / GetByID / Update / Delete を resource 種別に依らず 1 回だけ実装
 * - 識別子の採番 (`<kind>-<random>`) は Store 時に 1 度だけ
 * - 永続化呼び出しはすべて deadline 付き
 * - RepoError の conflict / reference を contract のエラーへ変換
 */
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use rand_core::{OsRng, RngCore};
use tracing::debug;

use crate::models::{Resource, Timestamps};
use crate::repos::Repository;
use crate::repos::error::RepoError;
use crate::services::auth::Passwords;
use crate::services::deadline::bounded;
use crate::services::error::{ServiceError, ServiceResult, conflict_field};

const ID_RANDOM_BYTES: usize = 12;

/// `photo-3q2Jx0...`: kind prefix plus 16 url-safe characters.
pub fn generate_id(kind: &str) -> String {
    let mut bytes = [0u8; ID_RANDOM_BYTES];
    OsRng.fill_bytes(&mut bytes);
    format!("{kind}-{}", URL_SAFE_NO_PAD.encode(bytes))
}

/// Load-one capability the ownership gate is parameterized by.
#[async_trait]
pub trait Lookup<R: Resource>: Send + Sync {
    async fn get_by_id(&self, id: &str) -> ServiceResult<R>;
}

pub struct ResourceService<R: Resource> {
    repo: Arc<dyn Repository<R>>,
    deadline: Duration,
    passwords: Arc<Passwords>,
}

impl<R: Resource> std::fmt::Debug for ResourceService<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceService")
            .field("kind", &R::KIND)
            .field("deadline", &self.deadline)
            .finish()
    }
}

impl<R: Resource> ResourceService<R> {
    pub fn new(repo: Arc<dyn Repository<R>>, deadline: Duration) -> Self {
        Self {
            repo,
            deadline,
            passwords: Arc::new(Passwords::default()),
        }
    }

    /// Replace the hasher used by `before_store`.
    pub fn with_passwords(mut self, passwords: Arc<Passwords>) -> Self {
        self.passwords = passwords;
        self
    }

    /// Listings, scoped to `owner_id` when given.
    pub async fn fetch(&self, owner_id: Option<&str>) -> ServiceResult<Vec<R::Listing>> {
        bounded(self.deadline, "list", self.repo.list(owner_id)).await
    }

    pub async fn store(&self, mut resource: R) -> ServiceResult<R> {
        resource.validate()?;
        resource.before_store(&self.passwords)?;
        resource.assign_id(generate_id(R::KIND));
        *resource.timestamps_mut() = Timestamps::at(Utc::now());

        debug!(kind = R::KIND, id = %resource.id(), owner_id = %resource.owner_id(), "Storing resource");

        bounded(self.deadline, "insert", self.repo.insert(&resource))
            .await
            .map_err(|e| constraint_error(&resource, e))
    }

    pub async fn get_by_id(&self, id: &str) -> ServiceResult<R> {
        bounded(self.deadline, "get", self.repo.get(id))
            .await?
            .ok_or_else(|| ServiceError::not_found(R::LABEL, id))
    }

    /// Applies only the submitted fields, then re-validates the whole resource.
    pub async fn update(&self, patch: R::Patch, id: &str) -> ServiceResult<R> {
        let mut resource = self.get_by_id(id).await?;
        resource.apply(patch);
        resource.validate()?;
        resource.timestamps_mut().updated_at = Utc::now();

        bounded(self.deadline, "update", self.repo.update(&resource))
            .await
            .map_err(|e| constraint_error(&resource, e))?
            .ok_or_else(|| ServiceError::not_found(R::LABEL, id))
    }

    pub async fn delete(&self, id: &str) -> ServiceResult<()> {
        let deleted = bounded(self.deadline, "delete", self.repo.delete(id)).await?;
        if !deleted {
            return Err(ServiceError::not_found(R::LABEL, id));
        }

        debug!(kind = R::KIND, id = %id, "Deleted resource");
        Ok(())
    }
}

#[async_trait]
impl<R: Resource> Lookup<R> for ResourceService<R> {
    async fn get_by_id(&self, id: &str) -> ServiceResult<R> {
        ResourceService::get_by_id(self, id).await
    }
}

fn constraint_error<R: Resource>(resource: &R, err: ServiceError) -> ServiceError {
    match err {
        ServiceError::Repo(RepoError::Conflict(constraint)) => ServiceError::Conflict {
            field: conflict_field(&constraint),
        },
        ServiceError::Repo(RepoError::Reference(constraint)) => {
            let (kind, id) = resource.dangling_reference(&constraint);
            ServiceError::Reference { kind, id }
        }
        other => other,
    }
}
