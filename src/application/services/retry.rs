use std::future::Future;
use std::time::Duration;

/// Classifies an error as worth another attempt against the same remote
/// endpoint.
pub trait TransientError {
    fn is_transient(&self) -> bool;
}

/// Bounded retry for remote calls: a fixed number of attempts with a fixed
/// pause in between, retrying only errors the error type marks as transient.
///
/// Passed into each remote-call wrapper as a value so the retry behavior is a
/// reviewable policy choice rather than a loop baked into the call site.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    max_attempts: u32,
    pause: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, pause: Duration) -> Self {
        debug_assert!(max_attempts >= 1);
        Self {
            max_attempts,
            pause,
        }
    }

    /// Policy used for both remote APIs: up to 7 attempts, 6 ms apart.
    pub fn remote_api() -> Self {
        Self::new(7, Duration::from_millis(6))
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn pause(&self) -> Duration {
        self.pause
    }

    /// Run `op` until it succeeds, fails with a non-transient error, or the
    /// attempt budget is exhausted.
    pub async fn run<T, E, F, Fut>(&self, mut op: F) -> Result<T, RetryError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: TransientError + std::error::Error + 'static,
    {
        let mut attempt: u32 = 0;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_transient() => {
                    attempt += 1;
                    if attempt >= self.max_attempts {
                        return Err(RetryError::Exhausted {
                            attempts: self.max_attempts,
                            source: e,
                        });
                    }
                    tracing::warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        error = %e,
                        "Transient remote error, retrying"
                    );
                    tokio::time::sleep(self.pause).await;
                }
                Err(e) => return Err(RetryError::Fatal(e)),
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RetryError<E>
where
    E: std::error::Error + 'static,
{
    #[error("reached maximum number of retries ({attempts}): {source}")]
    Exhausted {
        attempts: u32,
        #[source]
        source: E,
    },
    #[error(transparent)]
    Fatal(E),
}
