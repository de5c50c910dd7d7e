//! In-memory storage for unit and router tests.
//!
//! Mirrors the Postgres schema rules the services rely on: unique
//! username/email, owner and photo foreign keys, cascading deletes.
//! Violations carry the same constraint names as the migration.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::models::{
    Comment, CommentListing, Photo, PhotoListing, PhotoSummary, SocialMedia, SocialMediaListing,
    User, UserProfile, UserSummary,
};
use crate::repos::error::{RepoError, RepoResult};
use crate::repos::{CredentialStore, Repository};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    photos: Vec<Photo>,
    comments: Vec<Comment>,
    social_medias: Vec<SocialMedia>,
}

impl Tables {
    fn user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    fn photo(&self, id: &str) -> Option<&Photo> {
        self.photos.iter().find(|p| p.id == id)
    }

    fn check_user_unique(&self, user: &User) -> RepoResult<()> {
        let others = || self.users.iter().filter(|u| u.id != user.id);
        if others().any(|u| u.username == user.username) {
            return Err(RepoError::Conflict("users_username_key".into()));
        }
        if others().any(|u| u.email == user.email) {
            return Err(RepoError::Conflict("users_email_key".into()));
        }
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first<T: Clone>(rows: &[T], keep: impl Fn(&T) -> bool) -> Vec<T> {
    rows.iter().rev().filter(|r| keep(r)).cloned().collect()
}

fn replace<T>(rows: &mut [T], id_of: impl Fn(&T) -> &str, updated: T) -> Option<()> {
    let slot = rows.iter_mut().find(|r| id_of(r) == id_of(&updated))?;
    *slot = updated;
    Some(())
}

#[async_trait]
impl Repository<User> for MemoryStore {
    async fn list(&self, owner_id: Option<&str>) -> RepoResult<Vec<UserProfile>> {
        let t = self.tables.lock().await;
        let rows = newest_first(&t.users, |u| owner_id.is_none_or(|id| u.id == id));
        Ok(rows.iter().map(User::profile).collect())
    }

    async fn insert(&self, user: &User) -> RepoResult<User> {
        let mut t = self.tables.lock().await;
        if t.user(&user.id).is_some() {
            return Err(RepoError::Conflict("users_pkey".into()));
        }
        t.check_user_unique(user)?;
        t.users.push(user.clone());
        Ok(user.clone())
    }

    async fn get(&self, id: &str) -> RepoResult<Option<User>> {
        Ok(self.tables.lock().await.user(id).cloned())
    }

    async fn update(&self, user: &User) -> RepoResult<Option<User>> {
        let mut t = self.tables.lock().await;
        t.check_user_unique(user)?;
        Ok(replace(&mut t.users, |u| u.id.as_str(), user.clone()).map(|()| user.clone()))
    }

    async fn delete(&self, id: &str) -> RepoResult<bool> {
        let mut t = self.tables.lock().await;
        let before = t.users.len();
        t.users.retain(|u| u.id != id);
        if t.users.len() == before {
            return Ok(false);
        }

        t.social_medias.retain(|s| s.user_id != id);
        let orphaned: Vec<String> = t
            .photos
            .iter()
            .filter(|p| p.user_id == id)
            .map(|p| p.id.clone())
            .collect();
        t.photos.retain(|p| p.user_id != id);
        t.comments
            .retain(|c| c.user_id != id && !orphaned.contains(&c.photo_id));
        Ok(true)
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let t = self.tables.lock().await;
        Ok(t.users.iter().find(|u| u.email == email).cloned())
    }
}

#[async_trait]
impl Repository<Photo> for MemoryStore {
    async fn list(&self, owner_id: Option<&str>) -> RepoResult<Vec<PhotoListing>> {
        let t = self.tables.lock().await;
        let rows = newest_first(&t.photos, |p| owner_id.is_none_or(|id| p.user_id == id));

        Ok(rows
            .into_iter()
            .filter_map(|p| {
                let owner = t.user(&p.user_id)?;
                let owner = UserSummary {
                    id: owner.id.clone(),
                    username: owner.username.clone(),
                    email: owner.email.clone(),
                };
                Some(PhotoListing {
                    id: p.id,
                    title: p.title,
                    caption: p.caption,
                    photo_url: p.photo_url,
                    user_id: p.user_id,
                    timestamps: p.timestamps,
                    user: owner,
                })
            })
            .collect())
    }

    async fn insert(&self, photo: &Photo) -> RepoResult<Photo> {
        let mut t = self.tables.lock().await;
        if t.user(&photo.user_id).is_none() {
            return Err(RepoError::Reference("photos_user_id_fkey".into()));
        }
        t.photos.push(photo.clone());
        Ok(photo.clone())
    }

    async fn get(&self, id: &str) -> RepoResult<Option<Photo>> {
        Ok(self.tables.lock().await.photo(id).cloned())
    }

    async fn update(&self, photo: &Photo) -> RepoResult<Option<Photo>> {
        let mut t = self.tables.lock().await;
        Ok(replace(&mut t.photos, |p| p.id.as_str(), photo.clone()).map(|()| photo.clone()))
    }

    async fn delete(&self, id: &str) -> RepoResult<bool> {
        let mut t = self.tables.lock().await;
        let before = t.photos.len();
        t.photos.retain(|p| p.id != id);
        if t.photos.len() == before {
            return Ok(false);
        }
        t.comments.retain(|c| c.photo_id != id);
        Ok(true)
    }
}

#[async_trait]
impl Repository<Comment> for MemoryStore {
    async fn list(&self, owner_id: Option<&str>) -> RepoResult<Vec<CommentListing>> {
        let t = self.tables.lock().await;
        let rows = newest_first(&t.comments, |c| owner_id.is_none_or(|id| c.user_id == id));

        Ok(rows
            .into_iter()
            .filter_map(|c| {
                let user = t.user(&c.user_id)?.profile();
                let photo = t.photo(&c.photo_id)?;
                let photo = PhotoSummary {
                    id: photo.id.clone(),
                    user_id: photo.user_id.clone(),
                    title: photo.title.clone(),
                    photo_url: photo.photo_url.clone(),
                    caption: photo.caption.clone(),
                };
                Some(CommentListing {
                    id: c.id,
                    user_id: c.user_id,
                    photo_id: c.photo_id,
                    message: c.message,
                    timestamps: c.timestamps,
                    user,
                    photo,
                })
            })
            .collect())
    }

    async fn insert(&self, comment: &Comment) -> RepoResult<Comment> {
        let mut t = self.tables.lock().await;
        if t.photo(&comment.photo_id).is_none() {
            return Err(RepoError::Reference("comments_photo_id_fkey".into()));
        }
        if t.user(&comment.user_id).is_none() {
            return Err(RepoError::Reference("comments_user_id_fkey".into()));
        }
        t.comments.push(comment.clone());
        Ok(comment.clone())
    }

    async fn get(&self, id: &str) -> RepoResult<Option<Comment>> {
        let t = self.tables.lock().await;
        Ok(t.comments.iter().find(|c| c.id == id).cloned())
    }

    async fn update(&self, comment: &Comment) -> RepoResult<Option<Comment>> {
        let mut t = self.tables.lock().await;
        Ok(replace(&mut t.comments, |c| c.id.as_str(), comment.clone()).map(|()| comment.clone()))
    }

    async fn delete(&self, id: &str) -> RepoResult<bool> {
        let mut t = self.tables.lock().await;
        let before = t.comments.len();
        t.comments.retain(|c| c.id != id);
        Ok(t.comments.len() < before)
    }
}

#[async_trait]
impl Repository<SocialMedia> for MemoryStore {
    async fn list(&self, owner_id: Option<&str>) -> RepoResult<Vec<SocialMediaListing>> {
        let t = self.tables.lock().await;
        let rows = newest_first(&t.social_medias, |s| {
            owner_id.is_none_or(|id| s.user_id == id)
        });

        Ok(rows
            .into_iter()
            .filter_map(|s| {
                let user = t.user(&s.user_id)?.profile();
                Some(SocialMediaListing {
                    id: s.id,
                    name: s.name,
                    social_media_url: s.social_media_url,
                    user_id: s.user_id,
                    timestamps: s.timestamps,
                    user,
                })
            })
            .collect())
    }

    async fn insert(&self, link: &SocialMedia) -> RepoResult<SocialMedia> {
        let mut t = self.tables.lock().await;
        if t.user(&link.user_id).is_none() {
            return Err(RepoError::Reference("socialmedias_user_id_fkey".into()));
        }
        t.social_medias.push(link.clone());
        Ok(link.clone())
    }

    async fn get(&self, id: &str) -> RepoResult<Option<SocialMedia>> {
        let t = self.tables.lock().await;
        Ok(t.social_medias.iter().find(|s| s.id == id).cloned())
    }

    async fn update(&self, link: &SocialMedia) -> RepoResult<Option<SocialMedia>> {
        let mut t = self.tables.lock().await;
        Ok(replace(&mut t.social_medias, |s| s.id.as_str(), link.clone()).map(|()| link.clone()))
    }

    async fn delete(&self, id: &str) -> RepoResult<bool> {
        let mut t = self.tables.lock().await;
        let before = t.social_medias.len();
        t.social_medias.retain(|s| s.id != id);
        Ok(t.social_medias.len() < before)
    }
}
