use super::TaskDraft;

/// Work the UI loop hands to the action service. Every variant is exactly
/// one request against the remote collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    LoadTasks,
    CreateTask(TaskDraft),
    UpdateTask { id: String, draft: TaskDraft },
    DeleteTask(String), // Task ID
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::LoadTasks => "load",
            Action::CreateTask(_) => "create",
            Action::UpdateTask { .. } => "update",
            Action::DeleteTask(_) => "delete",
        }
    }
}
