#[cfg(test)]
#[path = "list_sync_test.rs"]
mod tests;

use std::collections::HashSet;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;

use crate::config::constants::NOTICE_DURATION_MS;
use crate::models::{Action, EditSlot, Event, NoticeMessage, Task, TaskDraft};
use crate::{error_notice, success_notice};

const CREATE_SUCCESS: &str = "Item added successfully";
const CREATE_FAILURE: &str = "Unable to add ToDo item";
const UPDATE_SUCCESS: &str = "Item updated successfully";
const UPDATE_FAILURE: &str = "Unable to edit ToDo item";
const DELETE_FAILURE: &str = "Unable to delete ToDo item";
const LOAD_FAILURE: &str = "Unable to load ToDo items";

/// What a remote result did to the local state, so the view can follow up
/// (reset the form, close the edit popup).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    Loaded,
    LoadFailed,
    /// Carries the submitted draft, which may be older than the current one.
    Created(TaskDraft),
    CreateFailed,
    Updated,
    UpdateFailed,
    Deleted,
    DeleteFailed,
}

struct Notification {
    message: NoticeMessage,
    expires_at: Instant,
}

/// Local mirror of the remote task collection.
///
/// Operations only queue an [`Action`] and return; the matching mutation is
/// applied by [`ListSyncClient::handle_event`] once the result arrives, in
/// arrival order.
pub struct ListSyncClient {
    action_tx: mpsc::UnboundedSender<Action>,

    items: Vec<Task>,
    draft: TaskDraft,
    editing: Option<EditSlot>,
    pending_delete: Option<String>,

    notification: Option<Notification>,
    notice_duration: Duration,
}

impl ListSyncClient {
    pub fn new(action_tx: mpsc::UnboundedSender<Action>) -> ListSyncClient {
        ListSyncClient {
            action_tx,
            items: vec![],
            draft: TaskDraft::default(),
            editing: None,
            pending_delete: None,
            notification: None,
            notice_duration: Duration::from_millis(NOTICE_DURATION_MS),
        }
    }

    pub fn with_notice_duration(mut self, duration: Duration) -> ListSyncClient {
        self.notice_duration = duration;
        self
    }

    pub fn items(&self) -> &[Task] {
        &self.items
    }

    pub fn find(&self, id: &str) -> Option<&Task> {
        self.items.iter().find(|t| t.id() == id)
    }

    #[cfg(test)]
    pub fn draft(&self) -> &TaskDraft {
        &self.draft
    }

    pub fn editing(&self) -> Option<&EditSlot> {
        self.editing.as_ref()
    }

    pub fn edit_draft_mut(&mut self) -> Option<&mut TaskDraft> {
        self.editing.as_mut().map(|slot| &mut slot.draft)
    }

    /// The record waiting on the delete confirmation.
    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    pub fn load(&mut self) {
        self.dispatch(Action::LoadTasks);
    }

    /// Records the submitted pair as the create draft and sends it when both
    /// fields are non-blank. Returns whether a request went out.
    pub fn create(&mut self, title: impl Into<String>, description: impl Into<String>) -> bool {
        self.draft = TaskDraft::new(title, description);
        if !self.draft.is_submittable() {
            log::debug!("Skip create, draft has blank fields");
            return false;
        }
        self.dispatch(Action::CreateTask(self.draft.clone()))
    }

    /// Puts the record into the edit slot, dropping whatever was being
    /// edited before. Unknown identifiers leave the slot untouched.
    pub fn begin_edit(&mut self, id: &str) -> bool {
        let Some(slot) = self.find(id).map(EditSlot::new) else {
            log::warn!("Cannot edit unknown task {}", id);
            return false;
        };
        if let Some(prev) = self.editing.as_ref().filter(|prev| prev.id() != id) {
            log::debug!("Discarding unsaved edits of task {}", prev.id());
        }
        self.editing = Some(slot);
        true
    }

    pub fn update(&mut self) -> bool {
        let Some(slot) = self.editing.as_ref() else {
            return false;
        };
        if !slot.draft.is_submittable() {
            log::debug!("Skip update of task {}, draft has blank fields", slot.id());
            return false;
        }
        let action = Action::UpdateTask {
            id: slot.id().to_string(),
            draft: slot.draft.clone(),
        };
        self.dispatch(action)
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// First half of a delete: remembers the record until the confirmation
    /// is answered.
    pub fn request_delete(&mut self, id: &str) -> bool {
        if self.find(id).is_none() {
            log::warn!("Cannot delete unknown task {}", id);
            return false;
        }
        self.pending_delete = Some(id.to_string());
        true
    }

    /// Second half of a delete. Declining drops the pending record without
    /// any request.
    pub fn confirm_delete(&mut self, confirmed: bool) -> bool {
        let Some(id) = self.pending_delete.take() else {
            return false;
        };
        if !confirmed {
            log::debug!("Delete of task {} declined", id);
            return false;
        }
        self.dispatch(Action::DeleteTask(id))
    }

    pub fn notify(&mut self, message: NoticeMessage) {
        let duration = message.duration().unwrap_or(self.notice_duration);
        self.notification = Some(Notification {
            message,
            expires_at: Instant::now() + duration,
        });
    }

    pub fn notification(&self) -> Option<&NoticeMessage> {
        self.notification_at(Instant::now())
    }

    pub fn notification_at(&self, now: Instant) -> Option<&NoticeMessage> {
        self.notification
            .as_ref()
            .filter(|n| now < n.expires_at)
            .map(|n| &n.message)
    }

    /// Drops the notification once its expiry has passed.
    pub fn expire_notification(&mut self, now: Instant) {
        if self.notification.as_ref().is_some_and(|n| now >= n.expires_at) {
            self.notification = None;
        }
    }

    /// Applies a remote result. Events that are not remote results are
    /// ignored.
    pub fn handle_event(&mut self, event: &Event) -> Option<SyncOutcome> {
        let outcome = match event {
            Event::TasksLoaded(tasks) => {
                self.replace_items(tasks.clone());
                SyncOutcome::Loaded
            }

            Event::TasksLoadFailed(reason) => {
                log::error!("Failed to load tasks: {}", reason);
                self.notify(error_notice!(LOAD_FAILURE));
                SyncOutcome::LoadFailed
            }

            Event::TaskCreated { draft, created } => {
                match created {
                    Some(task) => self.insert_created(task.id(), draft.clone()),
                    None => {
                        log::info!("Create response has no identifier, reloading tasks");
                        self.load();
                    }
                }
                // A later submission may already own the draft
                if self.draft == *draft {
                    self.draft.clear();
                }
                self.notify(success_notice!(CREATE_SUCCESS));
                SyncOutcome::Created(draft.clone())
            }

            Event::TaskCreateFailed { reason, .. } => {
                log::error!("Failed to create task: {}", reason);
                self.notify(error_notice!(CREATE_FAILURE));
                SyncOutcome::CreateFailed
            }

            Event::TaskUpdated { id, draft } => {
                match self.items.iter_mut().find(|t| t.id() == id) {
                    Some(task) => task.apply(draft),
                    None => log::warn!("Updated task {} is no longer listed", id),
                }
                if self.editing.as_ref().is_some_and(|slot| slot.id() == id) {
                    self.editing = None;
                }
                self.notify(success_notice!(UPDATE_SUCCESS));
                SyncOutcome::Updated
            }

            Event::TaskUpdateFailed { id, reason } => {
                log::error!("Failed to update task {}: {}", id, reason);
                self.notify(error_notice!(UPDATE_FAILURE));
                SyncOutcome::UpdateFailed
            }

            Event::TaskDeleted(id) => {
                self.items.retain(|t| t.id() != id);
                if self.editing.as_ref().is_some_and(|slot| slot.id() == id) {
                    self.editing = None;
                }
                SyncOutcome::Deleted
            }

            Event::TaskDeleteFailed { id, reason } => {
                log::error!("Failed to delete task {}: {}", id, reason);
                self.notify(error_notice!(DELETE_FAILURE));
                SyncOutcome::DeleteFailed
            }

            _ => return None,
        };
        Some(outcome)
    }

    fn replace_items(&mut self, tasks: Vec<Task>) {
        let mut seen = HashSet::new();
        self.items = tasks
            .into_iter()
            .filter(|t| {
                let fresh = seen.insert(t.id().to_string());
                if !fresh {
                    log::warn!("Dropping duplicate task {} from list response", t.id());
                }
                fresh
            })
            .collect();

        // The slot must keep pointing at a listed record
        let orphaned = self
            .editing
            .as_ref()
            .is_some_and(|slot| self.find(slot.id()).is_none());
        if orphaned {
            self.editing = None;
        }
        if let Some(id) = self.pending_delete.take() {
            if self.find(&id).is_some() {
                self.pending_delete = Some(id);
            }
        }
        log::debug!("Loaded {} tasks", self.items.len());
    }

    fn insert_created(&mut self, id: &str, draft: TaskDraft) {
        match self.items.iter_mut().find(|t| t.id() == id) {
            Some(existing) => existing.apply(&draft),
            None => self.items.push(Task::from_draft(id, draft)),
        }
    }

    fn dispatch(&self, action: Action) -> bool {
        let name = action.name();
        if let Err(err) = self.action_tx.send(action) {
            log::error!("Failed to dispatch {} action: {}", name, err);
            return false;
        }
        true
    }
}
