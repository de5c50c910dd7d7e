use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::repos::error::RepoResult;
use crate::services::error::{ServiceError, ServiceResult};

/// Run one persistence call under `deadline`.
///
/// The inner future is dropped on expiry, which cancels the in-flight query.
pub async fn bounded<T, F>(deadline: Duration, operation: &'static str, call: F) -> ServiceResult<T>
where
    F: Future<Output = RepoResult<T>>,
{
    match tokio::time::timeout(deadline, call).await {
        Ok(result) => result.map_err(ServiceError::from),
        Err(_) => {
            warn!(
                operation,
                deadline_ms = millis(deadline),
                "Persistence call exceeded deadline"
            );
            Err(ServiceError::Timeout { operation })
        }
    }
}

fn millis(deadline: Duration) -> u64 {
    u64::try_from(deadline.as_millis()).unwrap_or(u64::MAX)
}
