#[cfg(test)]
#[path = "app_test.rs"]
mod tests;

use std::io;
use std::time::Instant;

use crossterm::{
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen},
};
use eyre::Result;
use ratatui::crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    layout::{Alignment, Constraint, Direction, Layout},
    prelude::{Backend, CrosstermBackend},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Block, BorderType, Borders, Padding, Paragraph},
};
use tokio_util::sync::CancellationToken;
use tui_textarea::Key;

use crate::app::ui::{
    Dim, EditScreen, FORM_HEIGHT, HelpScreen, Notice, Question, TaskForm, TaskTable,
    task_form::FormField, utils,
};
use crate::models::Event;
use crate::sync::{ListSyncClient, SyncOutcome};
use crate::warn_notice;

use super::services::EventService;

const MIN_WIDTH: u16 = 60;
const DELETE_QUESTION: &str = "Are you sure you want to delete?";
const NO_SELECTION: &str = "Select a task first";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Form,
    Table,
}

pub struct App<'a> {
    events: &'a mut EventService,
    sync: ListSyncClient,

    focus: Focus,
    form: TaskForm<'a>,
    table: TaskTable,

    edit_screen: EditScreen<'a>,
    help_screen: HelpScreen<'a>,
    question: Question<'a>,
    notice: Notice,

    cancel_token: CancellationToken,
}

impl<'a> App<'a> {
    pub fn new(
        events: &'a mut EventService,
        sync: ListSyncClient,
        cancel_token: CancellationToken,
    ) -> App<'a> {
        App {
            events,
            sync,
            focus: Focus::Form,
            form: TaskForm::new(),
            table: TaskTable::default(),
            edit_screen: EditScreen::default(),
            help_screen: HelpScreen::new(),
            question: Question::default().with_title(Line::from(" Delete Task ").bold()),
            notice: Notice,
            cancel_token,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let stdout = io::stdout();
        let mut stdout = stdout.lock();

        enable_raw_mode()?;
        execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableBracketedPaste
        )?;

        let term_backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(term_backend)?;
        let result = self.start_loop(&mut terminal).await;

        self.cancel_token.cancel();

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            DisableBracketedPaste
        )?;

        terminal.show_cursor()?;
        result
    }

    async fn start_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            self.render(terminal)?;
            let event = self.events.next().await;
            if self.handle_event(event) {
                return Ok(());
            }
        }
    }

    /// Returns true when the app should stop.
    fn handle_event(&mut self, event: Event) -> bool {
        // Handle critical events first
        match &event {
            Event::Quit => return true,

            Event::UiTick => {
                self.sync.expire_notification(Instant::now());
                return false;
            }

            e if e.is_remote_event() => {
                self.handle_remote_event(e);
                return false;
            }

            _ => {}
        }

        // Popups take the keys in the order they are drawn on top
        if self.question.showing() {
            if let Some(answer) = self.question.handle_key_event(&event) {
                self.sync.confirm_delete(answer);
            }
            return false;
        }

        if self.help_screen.showing() {
            return self.help_screen.handle_key_event(&event);
        }

        if self.edit_screen.showing() {
            self.handle_edit_event(event);
            return false;
        }

        if let Event::KeyboardF1 = event {
            self.help_screen.toggle_showing();
            return false;
        }

        match self.focus {
            Focus::Form => self.handle_form_event(event),
            Focus::Table => self.handle_table_event(event),
        }
        false
    }

    fn handle_remote_event(&mut self, event: &Event) {
        let Some(outcome) = self.sync.handle_event(event) else {
            return;
        };
        log::trace!("Remote result applied: {:?}", outcome);

        // Keep whatever was typed after the submitted draft
        if let SyncOutcome::Created(draft) = &outcome {
            if self.form.draft() == *draft {
                self.form.clear();
            }
        }
        self.edit_screen.follow(self.sync.editing());
        if self.question.showing() && self.sync.pending_delete().is_none() {
            // The record went away with a reload
            self.question.close();
        }
        self.table.clamp(self.sync.items().len());
    }

    fn handle_form_event(&mut self, event: Event) {
        match event {
            Event::KeyboardCharInput(input) => self.form.input(input),
            Event::KeyboardPaste(text) => self.form.paste(&text),
            Event::KeyboardEnter => {
                let draft = self.form.draft();
                self.sync.create(draft.title, draft.description);
            }
            Event::KeyboardTab => {
                if self.form.next_field() {
                    self.focus_table();
                }
            }
            Event::KeyboardBackTab => {
                if self.form.prev_field() {
                    self.focus_table();
                }
            }
            _ => {}
        }
    }

    fn handle_table_event(&mut self, event: Event) {
        let len = self.sync.items().len();
        match event {
            Event::KeyboardTab => self.focus_form(FormField::Title),
            Event::KeyboardBackTab => self.focus_form(FormField::Description),
            Event::UiScrollDown => self.table.next_row(len),
            Event::UiScrollUp => self.table.prev_row(len),
            Event::UiScrollPageDown => self.table.page_down(len),
            Event::UiScrollPageUp => self.table.page_up(len),
            Event::KeyboardCharInput(input) => match input.key {
                Key::Char('j') => self.table.next_row(len),
                Key::Char('k') => self.table.prev_row(len),
                Key::Char('e') => self.begin_edit(),
                Key::Char('d') => self.request_delete(),
                _ => {}
            },
            _ => {}
        }
    }

    fn handle_edit_event(&mut self, event: Event) {
        match event {
            Event::KeyboardEsc => {
                self.sync.cancel_edit();
                self.edit_screen.close();
            }
            Event::KeyboardEnter => {
                let draft = self.edit_screen.draft();
                if let Some(slot) = self.sync.edit_draft_mut() {
                    *slot = draft;
                }
                self.sync.update();
            }
            Event::KeyboardTab | Event::KeyboardBackTab => self.edit_screen.toggle_field(),
            Event::KeyboardCharInput(input) => self.edit_screen.input(input),
            Event::KeyboardPaste(text) => self.edit_screen.paste(&text),
            _ => {}
        }
    }

    fn begin_edit(&mut self) {
        let Some(id) = self
            .table
            .selected_task(self.sync.items())
            .map(|t| t.id().to_string())
        else {
            self.sync.notify(warn_notice!(NO_SELECTION));
            return;
        };
        if self.sync.begin_edit(&id) {
            if let Some(slot) = self.sync.editing() {
                self.edit_screen.open(slot);
            }
        }
    }

    fn request_delete(&mut self) {
        let Some(id) = self
            .table
            .selected_task(self.sync.items())
            .map(|t| t.id().to_string())
        else {
            self.sync.notify(warn_notice!(NO_SELECTION));
            return;
        };
        if self.sync.request_delete(&id) {
            self.question.open(DELETE_QUESTION);
        }
    }

    fn focus_table(&mut self) {
        self.focus = Focus::Table;
        self.table.clamp(self.sync.items().len());
    }

    fn focus_form(&mut self, field: FormField) {
        self.focus = Focus::Form;
        self.form.set_active(field);
    }

    fn render<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let popup_showing = self.popup_showing();
        let form_focused = self.focus == Focus::Form && !popup_showing;
        let table_focused = self.focus == Focus::Table && !popup_showing;

        terminal.draw(|f| {
            let current_width = f.area().width;
            if !is_line_width_sufficient(current_width) {
                f.render_widget(
                    Paragraph::new(utils::split_to_lines(
                        format!(
                            "I'm too small, make me bigger! I need at least {} cells (current: {})",
                            MIN_WIDTH, current_width
                        ),
                        current_width.saturating_sub(2) as usize,
                    ))
                    .alignment(Alignment::Left),
                    f.area(),
                );
                return;
            }

            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints(vec![
                    Constraint::Length(1),
                    Constraint::Length(FORM_HEIGHT + 2),
                    Constraint::Min(3),
                    Constraint::Length(1),
                ])
                .split(f.area());

            f.render_widget(
                Line::from(" Todo App ").bold().alignment(Alignment::Center),
                layout[0],
            );

            let form_block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::DarkGray))
                .padding(Padding::symmetric(1, 0))
                .title(Line::from(" Add Item ").bold());
            let form_area = form_block.inner(layout[1]);
            f.render_widget(form_block, layout[1]);
            self.form.render(f, form_area, form_focused);

            self.table.render(
                f,
                layout[2],
                self.sync.items(),
                self.sync.editing().map(|slot| slot.id()),
                table_focused,
            );

            self.help_screen.render_help_line(f, layout[3]);

            if popup_showing {
                f.dim_bg();
            }
            self.edit_screen
                .render(f, utils::popup_area(f.area(), 70, 60));
            self.question.render(f, utils::popup_area(f.area(), 50, 40));
            self.help_screen
                .render(f, utils::popup_area(f.area(), 60, 60));

            self.notice.render(
                f,
                utils::notice_area(f.area(), 30),
                self.sync.notification(),
            );
        })?;
        Ok(())
    }

    fn popup_showing(&self) -> bool {
        self.edit_screen.showing() || self.question.showing() || self.help_screen.showing()
    }
}

fn is_line_width_sufficient(line_width: u16) -> bool {
    line_width >= MIN_WIDTH
}
