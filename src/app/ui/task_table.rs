#[cfg(test)]
#[path = "task_table_test.rs"]
mod tests;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::Line,
    widgets::{Block, BorderType, Borders, Cell, Padding, Paragraph, Row, Table, TableState},
};

use crate::models::Task;

use super::utils;

const NO_TASKS: &str = "No tasks yet";
const PAGE_SIZE: usize = 10;

const TITLE_PERCENT: u16 = 35;
const DESCRIPTION_PERCENT: u16 = 45;
const ACTIONS_PERCENT: u16 = 20;

#[derive(Default)]
pub struct TaskTable {
    state: TableState,
}

impl TaskTable {
    #[cfg(test)]
    pub fn selected(&self) -> Option<usize> {
        self.state.selected()
    }

    pub fn selected_task<'t>(&self, items: &'t [Task]) -> Option<&'t Task> {
        self.state.selected().and_then(|i| items.get(i))
    }

    #[cfg(test)]
    pub fn select(&mut self, index: Option<usize>) {
        self.state.select(index);
    }

    pub fn next_row(&mut self, len: usize) {
        self.move_by(len, 1);
    }

    pub fn prev_row(&mut self, len: usize) {
        self.move_by(len, -1);
    }

    pub fn page_down(&mut self, len: usize) {
        self.move_by(len, PAGE_SIZE as isize);
    }

    pub fn page_up(&mut self, len: usize) {
        self.move_by(len, -(PAGE_SIZE as isize));
    }

    /// Keeps the selection inside the list after it grew or shrank.
    pub fn clamp(&mut self, len: usize) {
        match self.state.selected() {
            _ if len == 0 => self.state.select(None),
            Some(i) if i >= len => self.state.select(Some(len - 1)),
            None => self.state.select(Some(0)),
            _ => {}
        }
    }

    fn move_by(&mut self, len: usize, delta: isize) {
        if len == 0 {
            self.state.select(None);
            return;
        }
        let current = self.state.selected().unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, len as isize - 1);
        self.state.select(Some(next as usize));
    }

    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        items: &[Task],
        editing: Option<&str>,
        focused: bool,
    ) {
        let border_color = if focused {
            Color::LightGreen
        } else {
            Color::DarkGray
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color))
            .padding(Padding::symmetric(1, 0))
            .title(Line::from(" Tasks ").bold())
            .title_alignment(Alignment::Left);

        if items.is_empty() {
            let empty = Paragraph::new(NO_TASKS)
                .style(Style::default().fg(Color::DarkGray).italic())
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let inner_width = block.inner(area).width as usize;
        let header = Row::new(vec!["Title", "Description", "Actions"])
            .style(Style::default().add_modifier(Modifier::BOLD))
            .bottom_margin(1);

        let highlight = if focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };

        let table = Table::new(
            build_rows(items, editing, inner_width),
            [
                Constraint::Percentage(TITLE_PERCENT),
                Constraint::Percentage(DESCRIPTION_PERCENT),
                Constraint::Percentage(ACTIONS_PERCENT),
            ],
        )
        .header(header)
        .block(block)
        .row_highlight_style(highlight);

        frame.render_stateful_widget(table, area, &mut self.state);
    }
}

/// One row per task, striped, the row under edit marked.
pub(crate) fn build_rows<'a>(items: &[Task], editing: Option<&str>, width: usize) -> Vec<Row<'a>> {
    let title_width = width * TITLE_PERCENT as usize / 100;
    let description_width = width * DESCRIPTION_PERCENT as usize / 100;

    items
        .iter()
        .enumerate()
        .map(|(i, task)| {
            let under_edit = editing == Some(task.id());
            let actions = if under_edit {
                Cell::from("editing…").style(Style::default().fg(Color::Yellow).italic())
            } else {
                Cell::from("e edit · d delete").style(Style::default().fg(Color::DarkGray))
            };

            let style = if under_edit {
                Style::default().fg(Color::Yellow)
            } else if i % 2 == 1 {
                Style::default().bg(Color::Rgb(30, 30, 30))
            } else {
                Style::default()
            };

            Row::new(vec![
                Cell::from(utils::truncate(task.title(), title_width.saturating_sub(1))),
                Cell::from(utils::truncate(
                    task.description(),
                    description_width.saturating_sub(1),
                )),
                actions,
            ])
            .style(style)
        })
        .collect()
}
