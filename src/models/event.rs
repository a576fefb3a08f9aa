use std::sync::Arc;

use tokio::sync::mpsc;
use tui_textarea::Input;

use super::{Task, TaskDraft};

#[derive(Debug)]
pub enum Event {
    TasksLoaded(Vec<Task>),
    TasksLoadFailed(String),
    TaskCreated {
        draft: TaskDraft,
        created: Option<Task>,
    },
    TaskCreateFailed {
        draft: TaskDraft,
        reason: String,
    },
    TaskUpdated {
        id: String,
        draft: TaskDraft,
    },
    TaskUpdateFailed {
        id: String,
        reason: String,
    },
    TaskDeleted(String),
    TaskDeleteFailed {
        id: String,
        reason: String,
    },

    KeyboardCharInput(Input),
    KeyboardEsc,
    KeyboardEnter,
    KeyboardTab,
    KeyboardBackTab,
    KeyboardF1,
    KeyboardPaste(String),

    Quit,

    UiTick,
    UiScrollUp,
    UiScrollDown,
    UiScrollPageUp,
    UiScrollPageDown,
}

impl Event {
    pub fn is_remote_event(&self) -> bool {
        matches!(
            self,
            Event::TasksLoaded(_)
                | Event::TasksLoadFailed(_)
                | Event::TaskCreated { .. }
                | Event::TaskCreateFailed { .. }
                | Event::TaskUpdated { .. }
                | Event::TaskUpdateFailed { .. }
                | Event::TaskDeleted(_)
                | Event::TaskDeleteFailed { .. }
        )
    }
}

#[async_trait::async_trait]
pub trait EventTx {
    async fn send(&self, event: Event) -> Result<(), mpsc::error::SendError<Event>>;
}

#[async_trait::async_trait]
impl EventTx for mpsc::Sender<Event> {
    async fn send(&self, event: Event) -> Result<(), mpsc::error::SendError<Event>> {
        self.send(event).await
    }
}

#[async_trait::async_trait]
impl EventTx for mpsc::UnboundedSender<Event> {
    async fn send(&self, event: Event) -> Result<(), mpsc::error::SendError<Event>> {
        self.send(event)
    }
}

pub type ArcEventTx = Arc<dyn EventTx + Send + Sync>;
