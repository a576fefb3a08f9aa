use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};
use tui_textarea::Input;

use crate::models::TaskDraft;

use super::textarea::{self, TextArea};

pub const FORM_HEIGHT: u16 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
}

/// Title + description inputs, shared by the create form and the edit popup.
pub struct TaskForm<'a> {
    title: tui_textarea::TextArea<'a>,
    description: tui_textarea::TextArea<'a>,
    active: FormField,
}

impl<'a> TaskForm<'a> {
    pub fn new() -> TaskForm<'a> {
        Self::with_draft(&TaskDraft::default())
    }

    pub fn with_draft(draft: &TaskDraft) -> TaskForm<'a> {
        TaskForm {
            title: TextArea::new(" Title ")
                .with_placeholder("Title")
                .with_text(&draft.title)
                .build(),
            description: TextArea::new(" Description ")
                .with_placeholder("Description")
                .with_text(&draft.description)
                .build(),
            active: FormField::Title,
        }
    }

    pub fn active(&self) -> FormField {
        self.active
    }

    pub fn set_active(&mut self, field: FormField) {
        self.active = field;
    }

    /// Moves to the other field. Returns true when focus leaves the form
    /// past the last field.
    pub fn next_field(&mut self) -> bool {
        match self.active {
            FormField::Title => {
                self.active = FormField::Description;
                false
            }
            FormField::Description => true,
        }
    }

    /// Same as `next_field` but backwards.
    pub fn prev_field(&mut self) -> bool {
        match self.active {
            FormField::Description => {
                self.active = FormField::Title;
                false
            }
            FormField::Title => true,
        }
    }

    pub fn input(&mut self, input: Input) {
        self.active_mut().input(input);
    }

    pub fn paste(&mut self, text: &str) {
        let text = text.replace(['\r', '\n'], " ");
        self.active_mut().insert_str(text);
    }

    pub fn draft(&self) -> TaskDraft {
        TaskDraft::new(self.title.lines().join(" "), self.description.lines().join(" "))
    }

    pub fn clear(&mut self) {
        *self = TaskForm::new();
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, focused: bool) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Length(3)])
            .split(area);

        textarea::set_focus(&mut self.title, focused && self.active == FormField::Title);
        textarea::set_focus(
            &mut self.description,
            focused && self.active == FormField::Description,
        );

        f.render_widget(&self.title, layout[0]);
        f.render_widget(&self.description, layout[1]);
    }

    fn active_mut(&mut self) -> &mut tui_textarea::TextArea<'a> {
        match self.active {
            FormField::Title => &mut self.title,
            FormField::Description => &mut self.description,
        }
    }
}

impl Default for TaskForm<'_> {
    fn default() -> Self {
        Self::new()
    }
}
