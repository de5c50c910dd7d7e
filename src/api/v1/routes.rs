/*
 * Responsibility
 * - URL 構造を定義
 * - /health, /users/register, /users/login は公開
 * - それ以外は access gate (route_layer)、PUT/DELETE /{kind}/{id} はさらに ownership gate
 */
use axum::{
    Router,
    routing::{get, post, put},
};

use crate::api::v1::handlers::{
    comments::{create_comment, delete_comment, list_comments, update_comment},
    health::health,
    photos::{create_photo, delete_photo, list_photos, update_photo},
    social_medias::{
        create_social_media, delete_social_media, list_social_medias, update_social_media,
    },
    users::{delete_account, login, register, update_account},
};
use crate::middleware::auth::{access, ownership};
use crate::models::{Comment, Photo, SocialMedia};
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/health", get(health))
        .route("/users/register", post(register))
        .route("/users/login", post(login));

    let owned_photos = ownership::apply::<Photo>(
        Router::new().route("/photos/{photo_id}", put(update_photo).delete(delete_photo)),
        state.clone(),
    );
    let owned_comments = ownership::apply::<Comment>(
        Router::new().route(
            "/comments/{comment_id}",
            put(update_comment).delete(delete_comment),
        ),
        state.clone(),
    );
    let owned_social_medias = ownership::apply::<SocialMedia>(
        Router::new().route(
            "/socialmedias/{social_media_id}",
            put(update_social_media).delete(delete_social_media),
        ),
        state.clone(),
    );

    // ownership gate より外側に access gate を掛ける (AuthCtx が先に入る)
    let protected = Router::new()
        .route("/users", put(update_account).delete(delete_account))
        .route("/photos", get(list_photos).post(create_photo))
        .route("/comments", get(list_comments).post(create_comment))
        .route(
            "/socialmedias",
            get(list_social_medias).post(create_social_media),
        )
        .merge(owned_photos)
        .merge(owned_comments)
        .merge(owned_social_medias);

    public.merge(access::apply(protected, state))
}
