pub mod action;
pub mod event;
pub mod notice;
pub mod task;

pub use action::Action;
pub use event::{ArcEventTx, Event, EventTx};
pub use notice::*;
pub use task::{EditSlot, Task, TaskDraft};
