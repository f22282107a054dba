use std::time::Duration;

use poise::serenity_prelude as serenity;
use tracing::warn;

/// How many times a rate-limited platform call is attempted in total.
pub const RATE_LIMIT_MAX_ATTEMPTS: u32 = 3;

/// Fixed pause between attempts.
pub const RATE_LIMIT_BACKOFF: Duration = Duration::from_millis(1300);

pub fn is_rate_limited_error(source: &serenity::Error) -> bool {
    matches!(
        source,
        serenity::Error::Http(serenity::HttpError::UnsuccessfulRequest(response))
            if response.status_code.as_u16() == 429
    )
}

/// Run `operation` until it succeeds, the error stops matching
/// `should_retry`, or `max_attempts` is exhausted. The final error is
/// returned as-is.
pub async fn retry_with_backoff<T, E, F, Fut>(
    max_attempts: u32,
    backoff: Duration,
    should_retry: impl Fn(&E) -> bool,
    operation: F,
) -> Result<T, E>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut attempt = 1;
    loop {
        match operation().await {
            Err(source) if attempt < max_attempts && should_retry(&source) => {
                warn!(attempt, "platform call rate limited; backing off");
                tokio::time::sleep(backoff).await;
                attempt += 1;
            }
            other => return other,
        }
    }
}

/// Retry a serenity call on HTTP 429, at most three attempts with a fixed
/// ~1.3s pause. Any other error surfaces immediately.
pub async fn retry_rate_limited<T, F, Fut>(operation: F) -> Result<T, serenity::Error>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, serenity::Error>>,
{
    retry_with_backoff(
        RATE_LIMIT_MAX_ATTEMPTS,
        RATE_LIMIT_BACKOFF,
        is_rate_limited_error,
        operation,
    )
    .await
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    #[derive(Debug, PartialEq)]
    enum FakeError {
        Retryable,
        Fatal,
    }

    #[tokio::test(start_paused = true)]
    async fn retries_until_success() {
        let calls = AtomicU32::new(0);

        let result = retry_with_backoff(
            3,
            Duration::from_millis(10),
            |err| *err == FakeError::Retryable,
            || async {
                if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(FakeError::Retryable)
                } else {
                    Ok(7)
                }
            },
        )
        .await;

        assert_eq!(result, Ok(7));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_after_max_attempts() {
        let calls = AtomicU32::new(0);

        let result: Result<u32, _> = retry_with_backoff(
            3,
            Duration::from_millis(10),
            |err| *err == FakeError::Retryable,
            || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(FakeError::Retryable)
            },
        )
        .await;

        assert_eq!(result, Err(FakeError::Retryable));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn non_retryable_errors_surface_immediately() {
        let calls = AtomicU32::new(0);

        let result: Result<u32, _> = retry_with_backoff(
            3,
            Duration::from_millis(10),
            |err| *err == FakeError::Retryable,
            || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(FakeError::Fatal)
            },
        )
        .await;

        assert_eq!(result, Err(FakeError::Fatal));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
