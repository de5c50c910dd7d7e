/*
 * Responsibility
 * - repo が上位に伝える意味の定義
 * - Postgres SQLSTATE を conflict / reference に振り分ける
 */
use thiserror::Error;

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("db error")]
    Db(#[from] sqlx::Error),
    #[error("unique constraint violated: {0}")]
    Conflict(String),
    #[error("foreign key constraint violated: {0}")]
    Reference(String),
}

impl RepoError {
    pub fn from_sqlx(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(dbe) = &e {
            let constraint = dbe.constraint().unwrap_or_default().to_string();
            match dbe.code().as_deref() {
                Some("23505") => return RepoError::Conflict(constraint),
                Some("23503") => return RepoError::Reference(constraint),
                _ => {}
            }
        }
        RepoError::Db(e)
    }
}
