/*
 * Responsibility
 * - /comments 系 handler
 * - 一覧は actor 自身の comment のみ
 */
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::{
    api::v1::{
        dto::{
            MessageResponse,
            comments::{
                CommentCreatedResponse, CommentUpdatedResponse, CreateCommentRequest,
                UpdateCommentRequest,
            },
        },
        extractors::AuthCtxExtractor,
    },
    error::AppError,
    models::{Comment, CommentListing, Resource},
    state::AppState,
};

pub async fn list_comments(
    State(state): State<AppState>,
    AuthCtxExtractor(actor): AuthCtxExtractor,
) -> Result<Json<Vec<CommentListing>>, AppError> {
    Ok(Json(state.comments.fetch(Some(&actor.user_id)).await?))
}

pub async fn create_comment(
    State(state): State<AppState>,
    AuthCtxExtractor(actor): AuthCtxExtractor,
    payload: Result<Json<CreateCommentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CommentCreatedResponse>), AppError> {
    let Json(req) = payload?;
    let comment = state.comments.store(req.into_comment(&actor.user_id)).await?;

    Ok((StatusCode::CREATED, Json(comment.into())))
}

pub async fn update_comment(
    State(state): State<AppState>,
    Path(comment_id): Path<String>,
    payload: Result<Json<UpdateCommentRequest>, JsonRejection>,
) -> Result<Json<CommentUpdatedResponse>, AppError> {
    let Json(req) = payload?;
    let comment = state.comments.update(req.into(), &comment_id).await?;

    Ok(Json(comment.into()))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    Path(comment_id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    state.comments.delete(&comment_id).await?;

    Ok(Json(MessageResponse::deleted(Comment::LABEL)))
}
