use std::future::Future;
use std::time::Duration;
use tracing::{info, warn};

/// How long to keep knocking on a database that is still starting up
///
/// The wait doubles after every failed attempt and never exceeds `ceiling`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backoff {
    pub attempts: u32,
    pub first_wait: Duration,
    pub ceiling: Duration,
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            attempts: 6,
            first_wait: Duration::from_millis(250),
            ceiling: Duration::from_secs(5),
        }
    }
}

impl Backoff {
    /// Waits between consecutive attempts, `attempts - 1` of them
    pub fn waits(&self) -> impl Iterator<Item = Duration> + '_ {
        std::iter::successors(Some(self.first_wait), |wait| Some((*wait * 2).min(self.ceiling)))
            .map(|wait| wait.min(self.ceiling))
            .take(self.attempts.saturating_sub(1) as usize)
    }
}

/// Await `attempt` until it succeeds or `backoff` runs out, returning the
/// last error in the latter case.
pub async fn with_backoff<F, Fut, T, E>(backoff: Backoff, mut attempt: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut waits = backoff.waits();
    let mut tries = 1u32;

    loop {
        let err = match attempt().await {
            Ok(value) => {
                if tries > 1 {
                    info!(tries, "Database reachable");
                }
                return Ok(value);
            }
            Err(err) => err,
        };

        let Some(wait) = waits.next() else {
            warn!(tries, error = %err, "Database still unreachable, giving up");
            return Err(err);
        };

        warn!(tries, wait_ms = wait.as_millis() as u64, error = %err, "Database unreachable");
        tokio::time::sleep(wait).await;
        tries += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn quick(attempts: u32) -> Backoff {
        Backoff {
            attempts,
            first_wait: Duration::from_millis(1),
            ceiling: Duration::from_millis(2),
        }
    }

    #[test]
    fn test_waits_double_up_to_ceiling() {
        let backoff = Backoff {
            attempts: 5,
            first_wait: Duration::from_millis(100),
            ceiling: Duration::from_millis(300),
        };
        let waits: Vec<u128> = backoff.waits().map(|w| w.as_millis()).collect();
        assert_eq!(waits, vec![100, 200, 300, 300]);
    }

    #[test]
    fn test_single_attempt_never_waits() {
        assert_eq!(quick(1).waits().count(), 0);
        assert_eq!(quick(0).waits().count(), 0);
    }

    #[tokio::test]
    async fn test_recovers_once_database_comes_up() {
        let calls = AtomicU32::new(0);

        let result = with_backoff(quick(5), || async {
            match calls.fetch_add(1, Ordering::SeqCst) {
                0 | 1 => Err("connection refused"),
                _ => Ok("pool"),
            }
        })
        .await;

        assert_eq!(result, Ok("pool"));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_returns_last_error_when_attempts_run_out() {
        let calls = AtomicU32::new(0);

        let result: Result<(), String> = with_backoff(quick(3), || async {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            Err(format!("refused #{n}"))
        })
        .await;

        assert_eq!(result, Err("refused #2".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
