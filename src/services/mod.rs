/*
 * Responsibility
 * - 認証 (token / password / login) と resource service contract
 * - 永続化呼び出しの deadline
 */
pub mod auth;
pub mod deadline;
pub mod error;
pub mod resource;
