use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Comment, CommentPatch};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateCommentRequest {
    pub message: String,
    pub photo_id: String,
}

impl CreateCommentRequest {
    pub fn into_comment(self, user_id: &str) -> Comment {
        Comment::new(user_id, self.photo_id, self.message)
    }
}

#[derive(Debug, Serialize)]
pub struct CommentCreatedResponse {
    pub id: String,
    pub message: String,
    pub photo_id: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<Comment> for CommentCreatedResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            message: comment.message,
            photo_id: comment.photo_id,
            user_id: comment.user_id,
            created_at: comment.timestamps.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateCommentRequest {
    pub message: Option<String>,
}

impl From<UpdateCommentRequest> for CommentPatch {
    fn from(req: UpdateCommentRequest) -> Self {
        CommentPatch {
            message: req.message,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CommentUpdatedResponse {
    pub id: String,
    pub message: String,
    pub photo_id: String,
    pub user_id: String,
    pub updated_at: DateTime<Utc>,
}

impl From<Comment> for CommentUpdatedResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            message: comment.message,
            photo_id: comment.photo_id,
            user_id: comment.user_id,
            updated_at: comment.timestamps.updated_at,
        }
    }
}
