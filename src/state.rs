/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - resource 種別ごとの ResourceService, login, token codec
 * - Clone 前提で持つ (内部は Arc で cheap)
 */
use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;

use crate::models::{Comment, Photo, Resource, SocialMedia, User};
use crate::repos::{CommentRepo, PhotoRepo, SocialMediaRepo, UserRepo};
use crate::services::auth::{LoginService, Passwords, TokenCodec};
use crate::services::resource::ResourceService;

#[derive(Clone, Debug)]
pub struct AppState {
    pub users: Arc<ResourceService<User>>,
    pub photos: Arc<ResourceService<Photo>>,
    pub comments: Arc<ResourceService<Comment>>,
    pub social_medias: Arc<ResourceService<SocialMedia>>,
    pub login: Arc<LoginService>,
    pub tokens: Arc<TokenCodec>,
}

impl AppState {
    pub fn new(
        pool: PgPool,
        tokens: Arc<TokenCodec>,
        passwords: Arc<Passwords>,
        deadline: Duration,
    ) -> Self {
        let users = Arc::new(UserRepo::new(pool.clone()));

        Self {
            users: Arc::new(
                ResourceService::<User>::new(users.clone(), deadline)
                    .with_passwords(passwords.clone()),
            ),
            photos: Arc::new(ResourceService::<Photo>::new(
                Arc::new(PhotoRepo::new(pool.clone())),
                deadline,
            )),
            comments: Arc::new(ResourceService::<Comment>::new(
                Arc::new(CommentRepo::new(pool.clone())),
                deadline,
            )),
            social_medias: Arc::new(ResourceService::<SocialMedia>::new(
                Arc::new(SocialMediaRepo::new(pool)),
                deadline,
            )),
            login: Arc::new(LoginService::new(users, tokens.clone(), passwords, deadline)),
            tokens,
        }
    }

    /// State backed by `MemoryStore`, for router tests.
    #[cfg(test)]
    pub fn in_memory(tokens: Arc<TokenCodec>, deadline: Duration) -> Self {
        let store = Arc::new(crate::repos::memory::MemoryStore::new());
        let passwords = crate::services::auth::password::cheap();

        Self {
            users: Arc::new(
                ResourceService::<User>::new(store.clone(), deadline)
                    .with_passwords(passwords.clone()),
            ),
            photos: Arc::new(ResourceService::<Photo>::new(store.clone(), deadline)),
            comments: Arc::new(ResourceService::<Comment>::new(store.clone(), deadline)),
            social_medias: Arc::new(ResourceService::<SocialMedia>::new(store.clone(), deadline)),
            login: Arc::new(LoginService::new(store, tokens.clone(), passwords, deadline)),
            tokens,
        }
    }
}

/// Picks the service for one resource kind out of the shared state.
pub trait ServiceOf<R: Resource> {
    fn service(&self) -> &ResourceService<R>;
}

impl ServiceOf<Photo> for AppState {
    fn service(&self) -> &ResourceService<Photo> {
        &self.photos
    }
}

impl ServiceOf<Comment> for AppState {
    fn service(&self) -> &ResourceService<Comment> {
        &self.comments
    }
}

impl ServiceOf<SocialMedia> for AppState {
    fn service(&self) -> &ResourceService<SocialMedia> {
        &self.social_medias
    }
}
