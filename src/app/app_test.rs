use tokio::sync::mpsc::{self, UnboundedReceiver};
use tui_textarea::Input;

use crate::models::{Action, Task, TaskDraft};

use super::*;

fn sample_tasks() -> Vec<Task> {
    vec![
        Task::new("a", "Buy milk", "2 liters"),
        Task::new("b", "Walk dog", "Before dinner"),
    ]
}

fn new_sync(tasks: Vec<Task>) -> (ListSyncClient, UnboundedReceiver<Action>) {
    let (action_tx, action_rx) = mpsc::unbounded_channel();
    let mut sync = ListSyncClient::new(action_tx);
    sync.handle_event(&Event::TasksLoaded(tasks));
    (sync, action_rx)
}

fn key(c: char) -> Event {
    Event::KeyboardCharInput(Input {
        key: Key::Char(c),
        ..Default::default()
    })
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        assert!(!app.handle_event(key(c)));
    }
}

fn drain(rx: &mut UnboundedReceiver<Action>) -> Vec<Action> {
    let mut actions = vec![];
    while let Ok(action) = rx.try_recv() {
        actions.push(action);
    }
    actions
}

/// Moves focus from the title input past the description to the table.
fn focus_table(app: &mut App) {
    app.handle_event(Event::KeyboardTab);
    app.handle_event(Event::KeyboardTab);
    assert_eq!(app.focus, Focus::Table);
}

#[test]
fn test_enter_in_form_creates_task() {
    let mut events = EventService::new();
    let (sync, mut rx) = new_sync(vec![]);
    let mut app = App::new(&mut events, sync, CancellationToken::new());

    type_text(&mut app, "Write");
    app.handle_event(Event::KeyboardTab);
    type_text(&mut app, "report");
    app.handle_event(Event::KeyboardEnter);

    let draft = TaskDraft::new("Write", "report");
    assert_eq!(drain(&mut rx), vec![Action::CreateTask(draft.clone())]);

    app.handle_event(Event::TaskCreated {
        draft,
        created: Some(Task::new("1", "Write", "report")),
    });
    assert_eq!(app.form.draft(), TaskDraft::default());
    assert_eq!(app.sync.items().len(), 1);
}

#[test]
fn test_enter_with_blank_field_sends_nothing() {
    let mut events = EventService::new();
    let (sync, mut rx) = new_sync(vec![]);
    let mut app = App::new(&mut events, sync, CancellationToken::new());

    type_text(&mut app, "Only a title");
    app.handle_event(Event::KeyboardEnter);
    assert!(drain(&mut rx).is_empty());
}

#[test]
fn test_late_create_success_keeps_newer_form_input() {
    let mut events = EventService::new();
    let (sync, mut rx) = new_sync(vec![]);
    let mut app = App::new(&mut events, sync, CancellationToken::new());

    type_text(&mut app, "A");
    app.handle_event(Event::KeyboardTab);
    type_text(&mut app, "a");
    app.handle_event(Event::KeyboardEnter);
    type_text(&mut app, "b");
    assert_eq!(drain(&mut rx).len(), 1);

    app.handle_event(Event::TaskCreated {
        draft: TaskDraft::new("A", "a"),
        created: Some(Task::new("1", "A", "a")),
    });
    assert_eq!(app.form.draft(), TaskDraft::new("A", "ab"));
}

#[test]
fn test_edit_popup_follows_edit_slot() {
    let mut events = EventService::new();
    let (sync, mut rx) = new_sync(sample_tasks());
    let mut app = App::new(&mut events, sync, CancellationToken::new());

    focus_table(&mut app);
    app.handle_event(key('j'));
    app.handle_event(key('e'));
    assert_eq!(app.edit_screen.task_id(), Some("b"));
    assert_eq!(app.sync.editing().map(|slot| slot.id()), Some("b"));

    // The popup owns the keys now, `d` goes into the title
    type_text(&mut app, "d");
    app.handle_event(Event::KeyboardEnter);
    let draft = TaskDraft::new("Walk dogd", "Before dinner");
    assert_eq!(
        drain(&mut rx),
        vec![Action::UpdateTask {
            id: "b".to_string(),
            draft: draft.clone(),
        }]
    );
    assert!(!app.question.showing());

    app.handle_event(Event::TaskUpdateFailed {
        id: "b".to_string(),
        reason: "status 500".to_string(),
    });
    assert!(app.edit_screen.showing());

    app.handle_event(Event::TaskUpdated {
        id: "b".to_string(),
        draft,
    });
    assert!(!app.edit_screen.showing());
    assert!(app.sync.editing().is_none());
    assert_eq!(app.sync.items()[1].title(), "Walk dogd");
}

#[test]
fn test_esc_cancels_edit() {
    let mut events = EventService::new();
    let (sync, mut rx) = new_sync(sample_tasks());
    let mut app = App::new(&mut events, sync, CancellationToken::new());

    focus_table(&mut app);
    app.handle_event(key('e'));
    assert!(app.edit_screen.showing());

    type_text(&mut app, "xyz");
    app.handle_event(Event::KeyboardEsc);

    assert!(!app.edit_screen.showing());
    assert!(app.sync.editing().is_none());
    assert_eq!(app.sync.items(), sample_tasks().as_slice());
    assert!(drain(&mut rx).is_empty());
}

#[test]
fn test_delete_asks_before_sending() {
    let mut events = EventService::new();
    let (sync, mut rx) = new_sync(sample_tasks());
    let mut app = App::new(&mut events, sync, CancellationToken::new());

    focus_table(&mut app);
    app.handle_event(key('d'));
    assert!(app.question.showing());
    assert_eq!(app.sync.pending_delete(), Some("a"));

    // Keys other than an answer keep the question open
    app.handle_event(key('j'));
    assert!(app.question.showing());

    app.handle_event(key('n'));
    assert!(!app.question.showing());
    assert!(app.sync.pending_delete().is_none());
    assert!(drain(&mut rx).is_empty());

    app.handle_event(key('d'));
    app.handle_event(key('y'));
    assert_eq!(drain(&mut rx), vec![Action::DeleteTask("a".to_string())]);

    app.handle_event(Event::TaskDeleted("a".to_string()));
    assert_eq!(app.sync.items().len(), 1);
    assert_eq!(app.table.selected(), Some(0));
}

#[test]
fn test_reload_closes_question_of_vanished_task() {
    let mut events = EventService::new();
    let (sync, mut rx) = new_sync(sample_tasks());
    let mut app = App::new(&mut events, sync, CancellationToken::new());

    focus_table(&mut app);
    app.handle_event(key('d'));
    app.handle_event(Event::TasksLoaded(vec![Task::new("b", "Walk dog", "")]));

    assert!(!app.question.showing());
    app.handle_event(key('y'));
    assert!(drain(&mut rx).is_empty());
}

#[test]
fn test_table_keys_without_selection_warn() {
    let mut events = EventService::new();
    let (sync, mut rx) = new_sync(vec![]);
    let mut app = App::new(&mut events, sync, CancellationToken::new());

    focus_table(&mut app);
    app.handle_event(key('e'));
    app.handle_event(key('d'));

    assert!(!app.edit_screen.showing());
    assert!(!app.question.showing());
    assert_eq!(
        app.sync.notification().map(|n| n.message()),
        Some(NO_SELECTION)
    );
    assert!(drain(&mut rx).is_empty());
}

#[test]
fn test_quit_and_help() {
    let mut events = EventService::new();
    let (sync, _rx) = new_sync(vec![]);
    let mut app = App::new(&mut events, sync, CancellationToken::new());

    assert!(!app.handle_event(Event::KeyboardF1));
    assert!(app.help_screen.showing());
    assert!(!app.handle_event(Event::KeyboardEsc));
    assert!(!app.help_screen.showing());

    assert!(app.handle_event(Event::Quit));
}
