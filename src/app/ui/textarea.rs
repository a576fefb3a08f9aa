use ratatui::{
    layout::Alignment,
    style::{Color, Style},
    widgets::{Block, BorderType, Borders, Padding},
};
use tui_textarea::CursorMove;

/// Builder for the single-line inputs used by the form and the edit popup.
pub struct TextArea {
    title: String,
    placeholder: String,
    text: String,
}

impl TextArea {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn build<'a>(&self) -> tui_textarea::TextArea<'a> {
        let mut textarea = tui_textarea::TextArea::new(vec![self.text.clone()]);
        textarea.set_block(
            Block::default()
                .title(self.title.clone())
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title_alignment(Alignment::Left)
                .padding(Padding::new(1, 1, 0, 0)),
        );
        textarea.set_placeholder_text(self.placeholder.clone());
        textarea.set_cursor_line_style(Style::default());
        textarea.move_cursor(CursorMove::End);
        textarea
    }
}

impl Default for TextArea {
    fn default() -> Self {
        Self {
            title: " Input ".to_string(),
            placeholder: "Type here...".to_string(),
            text: String::new(),
        }
    }
}

/// Highlights the block of the focused input and hides the cursor of the
/// others.
pub fn set_focus(textarea: &mut tui_textarea::TextArea<'_>, focused: bool) {
    let (border, cursor) = if focused {
        (
            Style::default().fg(Color::LightGreen),
            Style::default().add_modifier(ratatui::style::Modifier::REVERSED),
        )
    } else {
        (Style::default().fg(Color::DarkGray), Style::default())
    };
    if let Some(block) = textarea.block().cloned() {
        textarea.set_block(block.border_style(border));
    }
    textarea.set_cursor_style(cursor);
}
