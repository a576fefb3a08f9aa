#[cfg(test)]
#[path = "shutdown_test.rs"]
mod tests;

use std::sync::{Arc, atomic};
use std::time::Duration;

use eyre::{Result, eyre};

use crate::config::constants::SHUTDOWN_TIMEOUT;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Holds the process open until the requests counted by the
/// [`ActionService`](super::ActionService) are answered, so a write sent
/// right before quitting still reaches the remote.
pub struct ShutdownCoordinator {
    pending_tasks: Arc<atomic::AtomicUsize>,
    timeout: Duration,
}

impl ShutdownCoordinator {
    pub fn new(pending_tasks: Arc<atomic::AtomicUsize>) -> ShutdownCoordinator {
        ShutdownCoordinator {
            pending_tasks,
            timeout: SHUTDOWN_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> ShutdownCoordinator {
        self.timeout = timeout;
        self
    }

    fn pending(&self) -> usize {
        self.pending_tasks.load(atomic::Ordering::SeqCst)
    }

    /// Resolves once nothing is in flight. Errors when the timeout passes
    /// first, the requests left over are abandoned.
    pub async fn wait(self) -> Result<()> {
        let drained = async {
            while self.pending() > 0 {
                log::debug!("Waiting for {} pending requests", self.pending());
                tokio::time::sleep(POLL_INTERVAL).await;
            }
        };

        tokio::time::timeout(self.timeout, drained)
            .await
            .map_err(|_| {
                eyre!(
                    "{} requests still pending after {:?}",
                    self.pending(),
                    self.timeout
                )
            })
    }
}
