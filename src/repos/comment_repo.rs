/*
 * Responsibility
 * - comments テーブル向け SQLx 操作
 * - 一覧は投稿者と対象 photo を join して返す
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::models::{Comment, CommentListing, PhotoSummary, Timestamps, UserProfile};
use crate::repos::Repository;
use crate::repos::error::{RepoError, RepoResult};

#[derive(Debug, FromRow)]
struct CommentRow {
    id: String,
    user_id: String,
    photo_id: String,
    message: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Comment {
            id: row.id,
            user_id: row.user_id,
            photo_id: row.photo_id,
            message: row.message,
            timestamps: Timestamps {
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
        }
    }
}

#[derive(Debug, FromRow)]
struct CommentListingRow {
    id: String,
    user_id: String,
    photo_id: String,
    message: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    owner_username: String,
    owner_email: String,
    owner_profile_image_url: Option<String>,
    photo_owner_id: String,
    photo_title: String,
    photo_caption: String,
    photo_url: String,
}

impl From<CommentListingRow> for CommentListing {
    fn from(row: CommentListingRow) -> Self {
        CommentListing {
            user: UserProfile {
                id: row.user_id.clone(),
                email: row.owner_email,
                username: row.owner_username,
                profile_image_url: row.owner_profile_image_url,
            },
            photo: PhotoSummary {
                id: row.photo_id.clone(),
                user_id: row.photo_owner_id,
                title: row.photo_title,
                photo_url: row.photo_url,
                caption: row.photo_caption,
            },
            id: row.id,
            user_id: row.user_id,
            photo_id: row.photo_id,
            message: row.message,
            timestamps: Timestamps {
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
        }
    }
}

#[derive(Clone, Debug)]
pub struct CommentRepo {
    pool: PgPool,
}

impl CommentRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<Comment> for CommentRepo {
    async fn list(&self, owner_id: Option<&str>) -> RepoResult<Vec<CommentListing>> {
        let rows = sqlx::query_as::<_, CommentListingRow>(
            r#"
            SELECT
                c.id, c.user_id, c.photo_id, c.message, c.created_at, c.updated_at,
                u.username AS owner_username,
                u.email AS owner_email,
                u.profile_image_url AS owner_profile_image_url,
                p.user_id AS photo_owner_id,
                p.title AS photo_title,
                p.caption AS photo_caption,
                p.photo_url AS photo_url
            FROM comments c
            JOIN users u ON u.id = c.user_id
            JOIN photos p ON p.id = c.photo_id
            WHERE $1::VARCHAR IS NULL OR c.user_id = $1
            ORDER BY c.created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, comment: &Comment) -> RepoResult<Comment> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            INSERT INTO comments (id, user_id, photo_id, message, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, photo_id, message, created_at, updated_at
            "#,
        )
        .bind(&comment.id)
        .bind(&comment.user_id)
        .bind(&comment.photo_id)
        .bind(&comment.message)
        .bind(comment.timestamps.created_at)
        .bind(comment.timestamps.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row.into())
    }

    async fn get(&self, id: &str) -> RepoResult<Option<Comment>> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT id, user_id, photo_id, message, created_at, updated_at
            FROM comments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row.map(Into::into))
    }

    async fn update(&self, comment: &Comment) -> RepoResult<Option<Comment>> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            UPDATE comments
            SET message = $2, updated_at = $3
            WHERE id = $1
            RETURNING id, user_id, photo_id, message, created_at, updated_at
            "#,
        )
        .bind(&comment.id)
        .bind(&comment.message)
        .bind(comment.timestamps.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row.map(Into::into))
    }

    async fn delete(&self, id: &str) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(RepoError::from_sqlx)?;

        Ok(result.rows_affected() > 0)
    }
}
