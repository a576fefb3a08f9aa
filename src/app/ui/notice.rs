use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use crate::models::NoticeMessage;

use super::utils;

/// Toast in the corner of the screen. Holds no state of its own, the
/// message and its expiry live with the task list.
#[derive(Default)]
pub struct Notice;

impl Notice {
    pub fn render(&self, f: &mut Frame, area: Rect, message: Option<&NoticeMessage>) {
        let Some(message) = message else {
            return;
        };
        if area.width < 6 || area.height < 3 {
            return;
        }

        let max_width = area.width as usize - 2;
        let lines = build_bubble(message, max_width);
        let height = (lines.len() as u16).min(area.height);
        let area = Rect::new(area.x, area.y, area.width, height);

        f.render_widget(Clear, area);
        f.render_widget(Paragraph::new(lines), area);
    }
}

fn build_bubble<'a>(message: &NoticeMessage, max_width: usize) -> Vec<Line<'a>> {
    // build lines from message based on max_width
    let mut lines = vec![];

    let mut line = String::new();
    for word in message.message().replace('\n', " ").split(' ') {
        if !line.is_empty() && line.width() + word.width() > max_width - 2 {
            lines.push(line.trim().to_string());
            line = String::new();
        }
        line.push_str(word);
        line.push(' ');
    }

    if !line.trim().is_empty() {
        lines.push(line.trim().to_string());
    }

    let kind = message.kind();
    wrap_bubble(lines, max_width, kind.border_color(), kind.text_color())
}

fn wrap_bubble<'a>(
    lines: Vec<String>,
    max_width: usize,
    border_color: Color,
    text_color: Color,
) -> Vec<Line<'a>> {
    let top_bar = highlight_line(format!("╭{}╮", "─".repeat(max_width)), border_color);
    let bottom_bar = highlight_line(format!("╰{}╯", "─".repeat(max_width)), border_color);

    let mut wrapped_lines = vec![top_bar];
    for line in lines {
        let line = utils::truncate(&line, max_width - 2);
        let fill = utils::repeat_from_substactions(" ", vec![max_width - 2, line.width()]);
        wrapped_lines.push(Line::from(vec![
            highlight_span("│ ".to_string(), border_color),
            highlight_span(format!("{line}{fill}"), text_color),
            highlight_span(" │".to_string(), border_color),
        ]));
    }

    wrapped_lines.push(bottom_bar);
    wrapped_lines
}

fn highlight_span<'a>(text: String, color: Color) -> Span<'a> {
    Span::styled(
        text,
        Style {
            fg: Some(color),
            ..Default::default()
        },
    )
}

fn highlight_line<'a>(text: String, color: Color) -> Line<'a> {
    Line::from(highlight_span(text, color))
}
