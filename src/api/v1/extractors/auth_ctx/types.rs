/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - middleware が token を検証して request extensions に格納し、handler はこの型だけを受け取る
 */

use crate::services::auth::TokenClaims;

/// 認証済みのリクエストに付与されるコンテキスト
///
/// - `user_id` は token の subject (`user-…`)
/// - `email` は発行時点の email (ログ相関用)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthCtx {
    pub user_id: String,
    pub email: String,
}

impl From<TokenClaims> for AuthCtx {
    fn from(claims: TokenClaims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email,
        }
    }
}
