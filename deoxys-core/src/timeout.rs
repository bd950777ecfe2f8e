//! Deadline wrapper shared by every adapter call.

use crate::error::AiError;
use std::future::Future;
use std::time::Duration;

/// Default deadline for a single upstream call
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);

/// Race `operation` against `deadline`.
///
/// If the deadline fires first the operation is dropped, so a late result is
/// never observed. The timer belongs to the race and is released on every
/// path.
pub async fn with_timeout<T, F>(deadline: Duration, operation: F) -> Result<T, AiError>
where
    F: Future<Output = Result<T, AiError>>,
{
    match tokio::time::timeout(deadline, operation).await {
        Ok(result) => result,
        Err(_) => Err(AiError::Timeout(deadline)),
    }
}
