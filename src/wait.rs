//! Bounded cooperative polling.
//!
//! The host page exposes no readiness signal, so the overlay polls on a
//! fixed interval with a hard bound instead of subscribing. The poll is a
//! cooperative suspension point; the event loop stays responsive while the
//! wait is pending.

use std::time::Duration;

use tokio::time::{interval, timeout};

use crate::error::WaitError;

/// Poll `probe` every `poll_interval` until it yields a value or `bound`
/// elapses. The first probe runs immediately.
pub async fn wait_for<T>(
    poll_interval: Duration,
    bound: Duration,
    what: &'static str,
    mut probe: impl FnMut() -> Option<T>,
) -> Result<T, WaitError> {
    let poll = async {
        let mut ticker = interval(poll_interval);
        loop {
            ticker.tick().await;
            if let Some(value) = probe() {
                return value;
            }
        }
    };

    timeout(bound, poll)
        .await
        .map_err(|_| WaitError::Timeout { bound, what })
}
