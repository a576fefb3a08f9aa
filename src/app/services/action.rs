#[cfg(test)]
#[path = "action_test.rs"]
mod tests;

use std::sync::{Arc, atomic};

use crate::models::{Action, ArcEventTx, Event};
use crate::remote::{ArcRemote, RemoteError};
use eyre::Result;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Runs actions against the remote. Every action gets its own task, so
/// results come back in whatever order the remote answers.
pub struct ActionService {
    event_tx: ArcEventTx,
    action_rx: mpsc::UnboundedReceiver<Action>,
    cancel_token: CancellationToken,
    remote: ArcRemote,
    pending_tasks: Arc<atomic::AtomicUsize>,
}

impl ActionService {
    pub fn new(
        event_tx: ArcEventTx,
        action_rx: mpsc::UnboundedReceiver<Action>,
        remote: ArcRemote,
        cancel_token: CancellationToken,
        pending_tasks: Arc<atomic::AtomicUsize>,
    ) -> ActionService {
        ActionService {
            cancel_token,
            event_tx,
            action_rx,
            remote,
            pending_tasks,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        loop {
            tokio::select! {
                _ = self.cancel_token.cancelled() => {
                    log::debug!("Action service cancelled");
                    return Ok(());
                }

                action = self.action_rx.recv() => {
                    let Some(action) = action else {
                        log::debug!("Action channel closed");
                        return Ok(());
                    };
                    self.spawn(action);
                }
            }
        }
    }

    fn spawn(&self, action: Action) {
        let remote = Arc::clone(&self.remote);
        let event_tx = Arc::clone(&self.event_tx);
        let pending_tasks = Arc::clone(&self.pending_tasks);

        pending_tasks.fetch_add(1, atomic::Ordering::SeqCst);
        tokio::spawn(async move {
            let name = action.name();
            let event = perform(&remote, action).await;
            if let Err(err) = event_tx.send(event).await {
                log::error!("Failed to report {} result: {}", name, err);
            }
            pending_tasks.fetch_sub(1, atomic::Ordering::SeqCst);
        });
    }
}

/// One round trip for `action`, folded into the event the UI loop applies.
pub(crate) async fn perform(remote: &ArcRemote, action: Action) -> Event {
    let name = action.name();
    log::debug!("Performing {} action", name);
    match action {
        Action::LoadTasks => match remote.list_tasks().await {
            Ok(tasks) => Event::TasksLoaded(tasks),
            Err(err) => Event::TasksLoadFailed(failure_reason(name, err)),
        },

        Action::CreateTask(draft) => match remote.create_task(&draft).await {
            Ok(created) => Event::TaskCreated { draft, created },
            Err(err) => Event::TaskCreateFailed {
                draft,
                reason: failure_reason(name, err),
            },
        },

        Action::UpdateTask { id, draft } => match remote.update_task(&id, &draft).await {
            Ok(()) => Event::TaskUpdated { id, draft },
            Err(err) => Event::TaskUpdateFailed {
                id,
                reason: failure_reason(name, err),
            },
        },

        Action::DeleteTask(id) => match remote.delete_task(&id).await {
            Ok(()) => Event::TaskDeleted(id),
            Err(err) => Event::TaskDeleteFailed {
                id,
                reason: failure_reason(name, err),
            },
        },
    }
}

/// Logs the failure with its status and returns the reason carried by the
/// event.
fn failure_reason(action: &str, err: RemoteError) -> String {
    match err.status() {
        Some(status) if err.is_rejected() => {
            log::warn!("{} rejected by the remote with status {}", action, status)
        }
        Some(status) => log::warn!("{} failed with status {}: {}", action, status, err),
        None => log::warn!("{} failed: {}", action, err),
    }
    err.to_string()
}
