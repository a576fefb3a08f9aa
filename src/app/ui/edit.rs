use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Block, BorderType, Borders, Clear, Padding},
};
use ratatui_macros::span;
use tui_textarea::Input;

use crate::models::{EditSlot, TaskDraft};

use super::task_form::{FORM_HEIGHT, TaskForm};

/// Popup holding the edit draft of the record in the edit slot.
#[derive(Default)]
pub struct EditScreen<'a> {
    task_id: Option<String>,
    form: TaskForm<'a>,
}

impl EditScreen<'_> {
    pub fn showing(&self) -> bool {
        self.task_id.is_some()
    }

    pub fn task_id(&self) -> Option<&str> {
        self.task_id.as_deref()
    }

    pub fn open(&mut self, slot: &EditSlot) {
        self.task_id = Some(slot.id().to_string());
        self.form = TaskForm::with_draft(&slot.draft);
    }

    pub fn close(&mut self) {
        self.task_id = None;
        self.form.clear();
    }

    /// Closes the popup once the slot it was opened for is gone.
    pub fn follow(&mut self, slot: Option<&EditSlot>) {
        if slot.map(|s| s.id()) != self.task_id() {
            self.close();
        }
    }

    pub fn toggle_field(&mut self) {
        if self.form.next_field() {
            self.form.prev_field();
        }
    }

    pub fn input(&mut self, input: Input) {
        self.form.input(input);
    }

    pub fn paste(&mut self, text: &str) {
        self.form.paste(text);
    }

    pub fn draft(&self) -> TaskDraft {
        self.form.draft()
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        if !self.showing() {
            return;
        }

        let instructions = vec![
            span!(" "),
            span!("Enter").green().bold(),
            span!(" to update, ").white(),
            span!("Tab").green().bold(),
            span!(" to switch field, ").white(),
            span!("Esc").green().bold(),
            span!(" to cancel ").white(),
        ];

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::LightBlue))
            .padding(Padding::symmetric(1, 0))
            .title(Line::from(" Edit Item ").bold())
            .title_alignment(Alignment::Center)
            .title_bottom(Line::from(instructions))
            .style(Style::default());

        let height = (FORM_HEIGHT + 2).min(area.height);
        let y = area.y + (area.height - height) / 2;
        let area = Rect::new(area.x, y, area.width, height);

        frame.render_widget(Clear, area);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        self.form.render(frame, inner, true);
    }
}
