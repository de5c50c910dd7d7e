//! Ownership gate: path の resource id を読み込み、所有者が actor 本人か確認する
//!
//! - resource 種別に依らず 1 実装 (`Lookup<R>` で parameterize)
//! - 存在しなければ 404、所有者が違えば 401 (UNAUTHORIZED)
//! - not found は常に ownership より先に判定する
//! - access gate の後に走る前提 (AuthCtx が必要)

use axum::{
    Router,
    body::Body,
    extract::{Path, State},
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::{AuthCtx, AuthCtxExtractor};
use crate::error::AppError;
use crate::models::Resource;
use crate::services::resource::Lookup;
use crate::state::{AppState, ServiceOf};

/// router 内の全 route を `R` の ownership gate で守る。
pub fn apply<R>(router: Router<AppState>, state: AppState) -> Router<AppState>
where
    R: Resource,
    AppState: ServiceOf<R>,
{
    router.route_layer(middleware::from_fn_with_state(state, require_owner::<R>))
}

/// Load `id` and check that `actor` owns it.
pub async fn authorize<R, L>(lookup: &L, id: &str, actor: &AuthCtx) -> Result<R, AppError>
where
    R: Resource,
    L: Lookup<R> + ?Sized,
{
    let resource = lookup.get_by_id(id).await?;

    if resource.owner_id() != actor.user_id {
        tracing::warn!(
            kind = R::KIND,
            id = %id,
            owner_id = %resource.owner_id(),
            user_id = %actor.user_id,
            "ownership check failed"
        );
        return Err(AppError::Unauthorized(format!(
            "you don't have permission to view or edit this {}",
            R::LABEL
        )));
    }

    Ok(resource)
}

async fn require_owner<R>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AuthCtxExtractor(actor): AuthCtxExtractor,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError>
where
    R: Resource,
    AppState: ServiceOf<R>,
{
    authorize::<R, _>(<AppState as ServiceOf<R>>::service(&state), &id, &actor).await?;

    Ok(next.run(req).await)
}
