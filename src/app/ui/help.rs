#[cfg(test)]
#[path = "help_test.rs"]
mod tests;

use once_cell::sync::Lazy;
use ratatui_macros::span;
use std::fmt::Display;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Text},
    widgets::{Block, BorderType, Borders, Cell, Clear, Padding, Row, Table, TableState},
};
use tui_textarea::Key;

use crate::models::Event;

use super::utils;

pub static KEY_BINDINGS: Lazy<Vec<KeyBinding>> = Lazy::new(build_key_bindings);

pub struct HelpScreen<'a> {
    showing: bool,
    state: TableState,
    rows: Vec<Row<'a>>,
    last_known_width: usize,
}

impl Default for HelpScreen<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> HelpScreen<'a> {
    pub fn new() -> HelpScreen<'a> {
        HelpScreen {
            showing: false,
            state: TableState::default().with_selected(0),
            rows: vec![],
            last_known_width: 0,
        }
    }

    pub fn showing(&self) -> bool {
        self.showing
    }

    pub fn toggle_showing(&mut self) {
        self.showing = !self.showing;
    }

    fn next_row(&mut self) {
        let last = KEY_BINDINGS.len().saturating_sub(1);
        let i = self.state.selected().map_or(0, |i| (i + 1).min(last));
        self.state.select(Some(i));
    }

    fn prev_row(&mut self) {
        let i = self.state.selected().map_or(0, |i| i.saturating_sub(1));
        self.state.select(Some(i));
    }

    /// Handles key events while the help popup is open.
    /// Returns true when the user asked to quit.
    pub fn handle_key_event(&mut self, event: &Event) -> bool {
        match event {
            Event::KeyboardF1 | Event::KeyboardEsc => self.showing = false,
            Event::Quit => {
                self.showing = false;
                return true;
            }
            Event::KeyboardCharInput(input) => match input.key {
                Key::Char('j') | Key::Down => self.next_row(),
                Key::Char('k') | Key::Up => self.prev_row(),
                Key::Char('q') => self.showing = false,
                _ => {}
            },
            Event::UiScrollDown => self.next_row(),
            Event::UiScrollUp => self.prev_row(),
            _ => {}
        }
        false
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        if !self.showing {
            return;
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::LightBlue))
            .padding(Padding::symmetric(1, 0))
            .title(Line::from(" Help ").bold())
            .title_alignment(Alignment::Center)
            .title_bottom(Line::from(vec![
                " ".into(),
                span!(Style::default().fg(Color::LightGreen).add_modifier(Modifier::BOLD); "q"),
                " to close ".into(),
                span!(Style::default().fg(Color::LightGreen).add_modifier(Modifier::BOLD); "↑/k/↓/j"),
                " to move up/down ".into(),
            ]));
        frame.render_widget(Clear, area);

        if self.last_known_width != area.width as usize {
            self.last_known_width = area.width as usize;
            self.rows = build_rows((area.width as f32 * 0.75).ceil() as usize);
        }

        let table = Table::new(
            self.rows.clone(),
            [Constraint::Percentage(25), Constraint::Percentage(75)],
        )
        .block(block)
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        frame.render_stateful_widget(table, area, &mut self.state);
    }

    pub fn render_help_line(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(help_line(), area);
    }
}

/// Short bindings joined into a single status line.
pub(crate) fn help_line<'a>() -> Line<'a> {
    let mut instructions = KEY_BINDINGS
        .iter()
        .filter(|b| !b.short_description.is_empty())
        .flat_map(|b| {
            vec![
                span!(Style::default().fg(Color::LightGreen).add_modifier(Modifier::BOLD); b.key().to_string()),
                " ".into(),
                span!(Style::default().fg(Color::White); b.short_description.clone()),
                " | ".into(),
            ]
        })
        .collect::<Vec<_>>();
    instructions.pop(); // trailing " | "

    Line::from(instructions)
}

fn build_rows<'a>(max_width: usize) -> Vec<Row<'a>> {
    KEY_BINDINGS
        .iter()
        .map(|binding| {
            let key = Cell::from(binding.key().to_string());
            let desc = utils::split_to_lines(binding.long_description().to_string(), max_width);
            let height = desc.len().max(1) as u16;
            Row::new(vec![key, Cell::from(Text::from(desc))]).height(height)
        })
        .collect()
}

fn build_key_bindings() -> Vec<KeyBinding> {
    vec![
        KeyBinding::new(Input::new(Key::F(1)), "Show Help").with_short_desc("Help"),
        KeyBinding::new(Input::new(Key::Char('q')).ctrl(), "[Q]uit").with_short_desc("Quit"),
        KeyBinding::new(Input::new(Key::Tab), "Move focus to the next field")
            .with_short_desc("Focus"),
        KeyBinding::new(Input::new(Key::Tab).shift(), "Move focus to the previous field"),
        KeyBinding::new(Input::new(Key::Enter), "Add the task in the form").with_short_desc("Add"),
        KeyBinding::new(Input::new(Key::Char('e')), "[E]dit the selected task")
            .with_short_desc("Edit"),
        KeyBinding::new(Input::new(Key::Char('d')), "[D]elete the selected task")
            .with_short_desc("Delete"),
        KeyBinding::new(Input::new(Key::Char('j')), "Select the next task"),
        KeyBinding::new(Input::new(Key::Char('k')), "Select the previous task"),
        KeyBinding::new(Input::new(Key::Esc), "Cancel editing/Close popup"),
        KeyBinding::new(Input::new(Key::Char('y')), "Confirm a question"),
        KeyBinding::new(Input::new(Key::Char('n')), "Reject a question"),
    ]
}

pub struct Input {
    key: Key,
    shift: bool,
    ctrl: bool,
}

impl Input {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            shift: false,
            ctrl: false,
        }
    }

    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }
}

pub struct KeyBinding {
    key: Input,
    long_description: String,
    short_description: String,
}

impl KeyBinding {
    fn new(key: Input, description: &str) -> Self {
        Self {
            key,
            long_description: description.to_string(),
            short_description: String::new(),
        }
    }

    fn with_short_desc(mut self, short_description: &str) -> Self {
        self.short_description = short_description.to_string();
        self
    }

    pub fn key(&self) -> &Input {
        &self.key
    }

    pub fn long_description(&self) -> &str {
        &self.long_description
    }

    pub fn short_description(&self) -> &str {
        &self.short_description
    }
}

impl Display for Input {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut modifier = String::new();
        if self.ctrl {
            modifier.push_str("Ctrl+");
        }
        if self.shift {
            modifier.push_str("Shift+");
        }

        let key = match self.key {
            Key::Char(c) => c.to_string(),
            Key::F(n) => format!("F{}", n),
            Key::Enter => "Enter".to_string(),
            Key::Up => "Up".to_string(),
            Key::Down => "Down".to_string(),
            Key::Tab => "Tab".to_string(),
            Key::Esc => "Esc".to_string(),
            _ => "Unknown".to_string(),
        };

        write!(f, "{}{}", modifier, key)
    }
}
