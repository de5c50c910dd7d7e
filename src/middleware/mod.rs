/*
 * Responsibility
 * - middleware の公開インターフェース (re-export)
 * - http (request id / trace / limit / timeout), cors, auth (authentication / ownership)
 */
pub mod auth;
pub mod cors;
pub mod http;
