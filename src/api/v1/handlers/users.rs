/*
 * Responsibility
 * - /users 系 handler (register / login は公開、update / delete は本人のアカウントのみ)
 * - Json を extractor で受け、service 呼び出し → DTO に詰め替え
 */
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::{
    api::v1::{
        dto::{
            MessageResponse,
            users::{
                LoginRequest, LoginResponse, RegisterRequest, RegisteredResponse,
                UpdateUserRequest, UpdatedUserResponse,
            },
        },
        extractors::AuthCtxExtractor,
    },
    error::AppError,
    state::AppState,
};

pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisteredResponse>), AppError> {
    let Json(req) = payload?;
    let user = state.users.store(req.into()).await?;

    tracing::info!(user_id = %user.id, "Registered account");
    Ok((StatusCode::CREATED, Json(user.into())))
}

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let Json(req) = payload?;
    let token = state.login.login(&req.email, &req.password).await?;

    Ok(Json(LoginResponse { token }))
}

pub async fn update_account(
    State(state): State<AppState>,
    AuthCtxExtractor(actor): AuthCtxExtractor,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<Json<UpdatedUserResponse>, AppError> {
    let Json(req) = payload?;
    let user = state.users.update(req.into(), &actor.user_id).await?;

    Ok(Json(user.into()))
}

pub async fn delete_account(
    State(state): State<AppState>,
    AuthCtxExtractor(actor): AuthCtxExtractor,
) -> Result<Json<MessageResponse>, AppError> {
    state.users.delete(&actor.user_id).await?;

    tracing::info!(user_id = %actor.user_id, "Deleted account");
    Ok(Json(MessageResponse::deleted("account")))
}
