/*
 * Responsibility
 * - /socialmedias 系 handler
 * - 一覧は actor 自身の link のみ、`{"social_medias": [...]}` で包む
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
            social_medias::{
                CreateSocialMediaRequest, SocialMediaCreatedResponse, SocialMediaListResponse,
                SocialMediaUpdatedResponse, UpdateSocialMediaRequest,
            },
        },
        extractors::AuthCtxExtractor,
    },
    error::AppError,
    models::{Resource, SocialMedia},
    state::AppState,
};

pub async fn list_social_medias(
    State(state): State<AppState>,
    AuthCtxExtractor(actor): AuthCtxExtractor,
) -> Result<Json<SocialMediaListResponse>, AppError> {
    let social_medias = state.social_medias.fetch(Some(&actor.user_id)).await?;

    Ok(Json(SocialMediaListResponse { social_medias }))
}

pub async fn create_social_media(
    State(state): State<AppState>,
    AuthCtxExtractor(actor): AuthCtxExtractor,
    payload: Result<Json<CreateSocialMediaRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SocialMediaCreatedResponse>), AppError> {
    let Json(req) = payload?;
    let link = state
        .social_medias
        .store(req.into_social_media(&actor.user_id))
        .await?;

    Ok((StatusCode::CREATED, Json(link.into())))
}

pub async fn update_social_media(
    State(state): State<AppState>,
    Path(social_media_id): Path<String>,
    payload: Result<Json<UpdateSocialMediaRequest>, JsonRejection>,
) -> Result<Json<SocialMediaUpdatedResponse>, AppError> {
    let Json(req) = payload?;
    let link = state
        .social_medias
        .update(req.into(), &social_media_id)
        .await?;

    Ok(Json(link.into()))
}

pub async fn delete_social_media(
    State(state): State<AppState>,
    Path(social_media_id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    state.social_medias.delete(&social_media_id).await?;

    Ok(Json(MessageResponse::deleted(SocialMedia::LABEL)))
}
