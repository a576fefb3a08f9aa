#[cfg(test)]
#[path = "task_test.rs"]
mod tests;

use serde::{Deserialize, Serialize};

/// A task record as held by the remote collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "_id")]
    id: String,
    title: String,
    description: String,
}

/// User input for a task that has not been sent to the remote yet. The same
/// shape is used as the request body for create and update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
}

/// The single record currently being edited in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSlot {
    id: String,
    pub draft: TaskDraft,
}

impl Task {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Task {
        Task {
            id: id.into(),
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn from_draft(id: impl Into<String>, draft: TaskDraft) -> Task {
        Task {
            id: id.into(),
            title: draft.title,
            description: draft.description,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn apply(&mut self, draft: &TaskDraft) {
        self.title = draft.title.clone();
        self.description = draft.description.clone();
    }
}

impl TaskDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> TaskDraft {
        TaskDraft {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Both fields must carry something other than whitespace.
    pub fn is_submittable(&self) -> bool {
        !self.title.trim().is_empty() && !self.description.trim().is_empty()
    }

    pub fn clear(&mut self) {
        self.title.clear();
        self.description.clear();
    }
}

impl From<&Task> for TaskDraft {
    fn from(task: &Task) -> Self {
        TaskDraft::new(task.title(), task.description())
    }
}

impl EditSlot {
    pub fn new(task: &Task) -> EditSlot {
        EditSlot {
            id: task.id().to_string(),
            draft: task.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}
