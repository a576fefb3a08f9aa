#[cfg(test)]
#[path = "events_test.rs"]
mod tests;

use crate::{config::constants::FRAME_DURATION, models::Event};
use crossterm::event::{
    Event as CrosstermEvent, EventStream, KeyCode, KeyEventKind, MouseEventKind,
};
use futures::{FutureExt, StreamExt};
use tokio::sync::mpsc;
use tokio::time;
use tui_textarea::{Input, Key};

pub struct EventService {
    crossterm_events: EventStream,
    event_rx: mpsc::UnboundedReceiver<Event>,
    event_tx: mpsc::UnboundedSender<Event>,
}

impl EventService {
    pub fn new() -> EventService {
        Self::default()
    }

    fn handle_crossterm(&self, event: CrosstermEvent) -> Option<Event> {
        match event {
            CrosstermEvent::Paste(text) => Some(Event::KeyboardPaste(text)),
            CrosstermEvent::Mouse(mouse_event) => match mouse_event.kind {
                MouseEventKind::ScrollUp => Some(Event::UiScrollUp),
                MouseEventKind::ScrollDown => Some(Event::UiScrollDown),
                _ => None,
            },
            CrosstermEvent::Key(key_event) => {
                if key_event.kind == KeyEventKind::Release {
                    return None;
                }
                if key_event.code == KeyCode::BackTab {
                    return Some(Event::KeyboardBackTab);
                }
                map_input(key_event.into())
            }
            _ => None,
        }
    }

    pub fn event_tx(&self) -> mpsc::UnboundedSender<Event> {
        self.event_tx.clone()
    }

    pub async fn next(&mut self) -> Event {
        loop {
            let e = tokio::select! {
                event = self.event_rx.recv() => event,
                event = self.crossterm_events.next().fuse() => match event {
                    Some(Ok(input)) => self.handle_crossterm(input),
                    Some(Err(_)) => None,
                    None => None
                },
                _ = time::sleep(FRAME_DURATION) => Some(Event::UiTick)
            };

            if let Some(event) = e {
                return event;
            }
        }
    }
}

pub(crate) fn map_input(input: Input) -> Option<Event> {
    // Map ctrl events
    if input.ctrl {
        return match input.key {
            Key::Char('q') | Key::Char('c') => Some(Event::Quit),
            Key::Char('u') => Some(Event::UiScrollPageUp),
            Key::Char('d') => Some(Event::UiScrollPageDown),
            // Leave the rest to the text inputs (ctrl+a, ctrl+e, ...)
            _ => Some(Event::KeyboardCharInput(input)),
        };
    }

    match input.key {
        Key::Esc => Some(Event::KeyboardEsc),
        Key::F(1) => Some(Event::KeyboardF1),
        Key::Enter => Some(Event::KeyboardEnter),
        Key::Tab if input.shift => Some(Event::KeyboardBackTab),
        Key::Tab => Some(Event::KeyboardTab),
        Key::Up => Some(Event::UiScrollUp),
        Key::Down => Some(Event::UiScrollDown),
        Key::MouseScrollUp => Some(Event::UiScrollUp),
        Key::MouseScrollDown => Some(Event::UiScrollDown),
        Key::PageUp => Some(Event::UiScrollPageUp),
        Key::PageDown => Some(Event::UiScrollPageDown),
        Key::Null => None,
        _ => Some(Event::KeyboardCharInput(input)),
    }
}

impl Default for EventService {
    fn default() -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel::<Event>();
        Self {
            crossterm_events: EventStream::new(),
            event_rx,
            event_tx,
        }
    }
}
