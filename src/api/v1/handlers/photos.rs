/*
 * Responsibility
 * - /photos 系 handler
 * - PUT / DELETE は ownership gate を通過済み (所有者確認はここでは行わない)
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
            photos::{
                CreatePhotoRequest, PhotoCreatedResponse, PhotoUpdatedResponse, UpdatePhotoRequest,
            },
        },
        extractors::AuthCtxExtractor,
    },
    error::AppError,
    models::{Photo, PhotoListing, Resource},
    state::AppState,
};

/// Photos are listed for every caller, not only the owner.
pub async fn list_photos(State(state): State<AppState>) -> Result<Json<Vec<PhotoListing>>, AppError> {
    Ok(Json(state.photos.fetch(None).await?))
}

pub async fn create_photo(
    State(state): State<AppState>,
    AuthCtxExtractor(actor): AuthCtxExtractor,
    payload: Result<Json<CreatePhotoRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PhotoCreatedResponse>), AppError> {
    let Json(req) = payload?;
    let photo = state.photos.store(req.into_photo(&actor.user_id)).await?;

    Ok((StatusCode::CREATED, Json(photo.into())))
}

pub async fn update_photo(
    State(state): State<AppState>,
    Path(photo_id): Path<String>,
    payload: Result<Json<UpdatePhotoRequest>, JsonRejection>,
) -> Result<Json<PhotoUpdatedResponse>, AppError> {
    let Json(req) = payload?;
    let photo = state.photos.update(req.into(), &photo_id).await?;

    Ok(Json(photo.into()))
}

pub async fn delete_photo(
    State(state): State<AppState>,
    Path(photo_id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    state.photos.delete(&photo_id).await?;

    Ok(Json(MessageResponse::deleted(Photo::LABEL)))
}
