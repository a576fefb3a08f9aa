use tokio::sync::mpsc::UnboundedReceiver;

use crate::models::NoticeKind;

use super::*;

fn sample_tasks() -> Vec<Task> {
    vec![
        Task::new("a", "Buy milk", "2 liters"),
        Task::new("b", "Walk dog", "Before dinner"),
        Task::new("c", "Read", "One chapter"),
    ]
}

fn setup(tasks: Vec<Task>) -> (ListSyncClient, UnboundedReceiver<Action>) {
    let (action_tx, action_rx) = mpsc::unbounded_channel();
    let mut client = ListSyncClient::new(action_tx);
    client.handle_event(&Event::TasksLoaded(tasks));
    (client, action_rx)
}

fn drain(rx: &mut UnboundedReceiver<Action>) -> Vec<Action> {
    let mut actions = vec![];
    while let Ok(action) = rx.try_recv() {
        actions.push(action);
    }
    actions
}

#[test]
fn test_load_dispatches_list_request() {
    let (mut client, mut rx) = setup(vec![]);
    client.load();
    assert_eq!(drain(&mut rx), vec![Action::LoadTasks]);
}

#[test]
fn test_loaded_items_match_server_list() {
    let (client, mut rx) = setup(sample_tasks());
    assert_eq!(client.items(), sample_tasks().as_slice());
    assert!(drain(&mut rx).is_empty());
    assert!(client.notification().is_none());
}

#[test]
fn test_load_drops_duplicate_identifiers() {
    let mut tasks = sample_tasks();
    tasks.push(Task::new("a", "Buy milk again", "dup"));
    let (client, _rx) = setup(tasks);

    assert_eq!(client.items().len(), 3);
    assert_eq!(client.find("a").map(|t| t.title()), Some("Buy milk"));
}

#[test]
fn test_load_failure_is_surfaced() {
    let (mut client, _rx) = setup(vec![]);
    let outcome = client.handle_event(&Event::TasksLoadFailed("dns error".to_string()));

    assert_eq!(outcome, Some(SyncOutcome::LoadFailed));
    let notice = client.notification().expect("expected a notice");
    assert_eq!(notice.kind(), NoticeKind::Error);
    assert_eq!(notice.message(), "Unable to load ToDo items");
}

#[test]
fn test_create_then_success_adds_one_row() {
    let (mut client, mut rx) = setup(sample_tasks());

    assert!(client.create(" Write report", "Due friday "));
    let draft = TaskDraft::new(" Write report", "Due friday ");
    assert_eq!(drain(&mut rx), vec![Action::CreateTask(draft.clone())]);
    // Nothing changes before the response arrives
    assert_eq!(client.items().len(), 3);

    let outcome = client.handle_event(&Event::TaskCreated {
        draft: draft.clone(),
        created: Some(Task::new("d", "ignored", "ignored")),
    });
    let shown_at = Instant::now();

    assert_eq!(outcome, Some(SyncOutcome::Created(draft.clone())));
    assert_eq!(client.items().len(), 4);
    assert_eq!(client.items()[3], Task::new("d", " Write report", "Due friday "));
    assert_eq!(client.draft(), &TaskDraft::default());

    let notice = client.notification_at(shown_at).expect("expected a notice");
    assert_eq!(notice.kind(), NoticeKind::Success);
    assert_eq!(notice.message(), "Item added successfully");
    assert!(
        client
            .notification_at(shown_at + Duration::from_millis(2001))
            .is_none()
    );
}

#[test]
fn test_create_with_blank_fields_is_skipped() {
    let (mut client, mut rx) = setup(sample_tasks());

    for (title, description) in [("", ""), ("title", ""), ("", "desc"), ("  ", "desc"), ("t", "\t\n")] {
        assert!(!client.create(title, description));
    }

    assert!(drain(&mut rx).is_empty());
    assert_eq!(client.items(), sample_tasks().as_slice());
    assert!(client.notification().is_none());
}

#[test]
fn test_create_failure_keeps_draft() {
    let (mut client, mut rx) = setup(sample_tasks());
    assert!(client.create("Write report", "Due friday"));
    drain(&mut rx);

    let outcome = client.handle_event(&Event::TaskCreateFailed {
        draft: TaskDraft::new("Write report", "Due friday"),
        reason: "status 500".to_string(),
    });

    assert_eq!(outcome, Some(SyncOutcome::CreateFailed));
    assert_eq!(client.draft(), &TaskDraft::new("Write report", "Due friday"));
    assert_eq!(client.items().len(), 3);
    let notice = client.notification().expect("expected a notice");
    assert_eq!(notice.kind(), NoticeKind::Error);
    assert_eq!(notice.message(), "Unable to add ToDo item");
}

#[test]
fn test_late_create_success_keeps_newer_draft() {
    let (mut client, mut rx) = setup(vec![]);
    assert!(client.create("A", "a"));
    assert!(client.create("B", "b"));
    assert_eq!(drain(&mut rx).len(), 2);

    let outcome = client.handle_event(&Event::TaskCreated {
        draft: TaskDraft::new("A", "a"),
        created: Some(Task::new("1", "A", "a")),
    });
    assert_eq!(outcome, Some(SyncOutcome::Created(TaskDraft::new("A", "a"))));
    assert_eq!(client.draft(), &TaskDraft::new("B", "b"));

    client.handle_event(&Event::TaskCreateFailed {
        draft: TaskDraft::new("B", "b"),
        reason: "status 500".to_string(),
    });
    assert_eq!(client.draft(), &TaskDraft::new("B", "b"));
    assert_eq!(client.items(), &[Task::new("1", "A", "a")]);
}

#[test]
fn test_create_without_identifier_reloads() {
    let (mut client, mut rx) = setup(sample_tasks());
    assert!(client.create("Write report", "Due friday"));
    drain(&mut rx);

    client.handle_event(&Event::TaskCreated {
        draft: TaskDraft::new("Write report", "Due friday"),
        created: None,
    });

    assert_eq!(client.items().len(), 3);
    assert_eq!(drain(&mut rx), vec![Action::LoadTasks]);
    assert_eq!(
        client.notification().map(|n| n.message()),
        Some("Item added successfully")
    );
}

#[test]
fn test_repeated_create_sends_repeated_requests() {
    let (mut client, mut rx) = setup(vec![]);
    assert!(client.create("a", "b"));
    assert!(client.create("a", "b"));
    assert_eq!(drain(&mut rx).len(), 2);
}

#[test]
fn test_begin_edit_replaces_previous_slot() {
    let (mut client, _rx) = setup(sample_tasks());

    assert!(client.begin_edit("a"));
    if let Some(draft) = client.edit_draft_mut() {
        draft.title = "Unsaved".to_string();
    }
    assert!(client.begin_edit("b"));

    let slot = client.editing().expect("expected an edit slot");
    assert_eq!(slot.id(), "b");
    assert_eq!(slot.draft, TaskDraft::new("Walk dog", "Before dinner"));
    assert_eq!(client.find("a"), Some(&Task::new("a", "Buy milk", "2 liters")));
}

#[test]
fn test_begin_edit_unknown_task() {
    let (mut client, _rx) = setup(sample_tasks());
    assert!(client.begin_edit("a"));
    assert!(!client.begin_edit("zzz"));
    assert_eq!(client.editing().map(|s| s.id()), Some("a"));
}

#[test]
fn test_cancel_edit() {
    let (mut client, mut rx) = setup(sample_tasks());
    client.begin_edit("a");
    client.cancel_edit();

    assert!(client.editing().is_none());
    assert!(!client.update());
    assert!(drain(&mut rx).is_empty());
    assert_eq!(client.items(), sample_tasks().as_slice());
}

#[test]
fn test_update_with_blank_fields_is_skipped() {
    let (mut client, mut rx) = setup(sample_tasks());
    client.begin_edit("b");
    if let Some(draft) = client.edit_draft_mut() {
        draft.description = "   ".to_string();
    }

    assert!(!client.update());
    assert!(drain(&mut rx).is_empty());
    assert!(client.editing().is_some());
    assert_eq!(client.items(), sample_tasks().as_slice());
}

#[test]
fn test_update_success_replaces_in_place() {
    let (mut client, mut rx) = setup(sample_tasks());
    client.begin_edit("b");
    if let Some(draft) = client.edit_draft_mut() {
        draft.title = "Walk cat".to_string();
    }

    assert!(client.update());
    let draft = TaskDraft::new("Walk cat", "Before dinner");
    assert_eq!(
        drain(&mut rx),
        vec![Action::UpdateTask {
            id: "b".to_string(),
            draft: draft.clone()
        }]
    );

    let outcome = client.handle_event(&Event::TaskUpdated {
        id: "b".to_string(),
        draft,
    });

    assert_eq!(outcome, Some(SyncOutcome::Updated));
    assert_eq!(
        client.items(),
        &[
            Task::new("a", "Buy milk", "2 liters"),
            Task::new("b", "Walk cat", "Before dinner"),
            Task::new("c", "Read", "One chapter"),
        ]
    );
    assert!(client.editing().is_none());
    assert_eq!(
        client.notification().map(|n| n.message()),
        Some("Item updated successfully")
    );
}

#[test]
fn test_update_success_keeps_slot_of_other_record() {
    let (mut client, _rx) = setup(sample_tasks());
    client.begin_edit("a");
    client.update();
    client.begin_edit("c");

    client.handle_event(&Event::TaskUpdated {
        id: "a".to_string(),
        draft: TaskDraft::new("Buy milk", "2 liters"),
    });

    assert_eq!(client.editing().map(|s| s.id()), Some("c"));
}

#[test]
fn test_update_failure_keeps_slot() {
    let (mut client, _rx) = setup(sample_tasks());
    client.begin_edit("a");
    if let Some(draft) = client.edit_draft_mut() {
        draft.title = "Buy bread".to_string();
    }
    client.update();

    let outcome = client.handle_event(&Event::TaskUpdateFailed {
        id: "a".to_string(),
        reason: "timeout".to_string(),
    });

    assert_eq!(outcome, Some(SyncOutcome::UpdateFailed));
    let slot = client.editing().expect("expected an edit slot");
    assert_eq!(slot.draft.title, "Buy bread");
    assert_eq!(client.find("a").map(|t| t.title()), Some("Buy milk"));
    assert_eq!(
        client.notification().map(|n| (n.kind(), n.message())),
        Some((NoticeKind::Error, "Unable to edit ToDo item"))
    );
}

#[test]
fn test_concurrent_updates_apply_in_arrival_order() {
    let (mut client, mut rx) = setup(sample_tasks());

    client.begin_edit("a");
    if let Some(draft) = client.edit_draft_mut() {
        draft.title = "first".to_string();
    }
    client.update();
    client.begin_edit("a");
    if let Some(draft) = client.edit_draft_mut() {
        draft.title = "second".to_string();
    }
    client.update();
    assert_eq!(drain(&mut rx).len(), 2);

    // The second submission answers first
    client.handle_event(&Event::TaskUpdated {
        id: "a".to_string(),
        draft: TaskDraft::new("second", "2 liters"),
    });
    client.handle_event(&Event::TaskUpdated {
        id: "a".to_string(),
        draft: TaskDraft::new("first", "2 liters"),
    });

    assert_eq!(client.find("a").map(|t| t.title()), Some("first"));
    assert_eq!(client.items().len(), 3);
}

#[test]
fn test_delete_declined() {
    let (mut client, mut rx) = setup(sample_tasks());

    assert!(client.request_delete("b"));
    assert_eq!(client.pending_delete(), Some("b"));
    assert!(!client.confirm_delete(false));

    assert!(client.pending_delete().is_none());
    assert!(drain(&mut rx).is_empty());
    assert_eq!(client.items(), sample_tasks().as_slice());
}

#[test]
fn test_delete_confirmed() {
    let (mut client, mut rx) = setup(sample_tasks());

    assert!(client.request_delete("b"));
    assert!(client.confirm_delete(true));
    assert_eq!(drain(&mut rx), vec![Action::DeleteTask("b".to_string())]);
    assert_eq!(client.items().len(), 3);

    let outcome = client.handle_event(&Event::TaskDeleted("b".to_string()));
    assert_eq!(outcome, Some(SyncOutcome::Deleted));
    assert_eq!(
        client.items(),
        &[
            Task::new("a", "Buy milk", "2 liters"),
            Task::new("c", "Read", "One chapter"),
        ]
    );
}

#[test]
fn test_delete_unknown_task_is_ignored() {
    let (mut client, mut rx) = setup(sample_tasks());
    assert!(!client.request_delete("zzz"));
    assert!(!client.confirm_delete(true));
    assert!(drain(&mut rx).is_empty());
}

#[test]
fn test_delete_failure_is_surfaced() {
    let (mut client, _rx) = setup(sample_tasks());
    client.request_delete("c");
    client.confirm_delete(true);

    let outcome = client.handle_event(&Event::TaskDeleteFailed {
        id: "c".to_string(),
        reason: "status 503".to_string(),
    });

    assert_eq!(outcome, Some(SyncOutcome::DeleteFailed));
    assert!(client.find("c").is_some());
    assert_eq!(
        client.notification().map(|n| n.message()),
        Some("Unable to delete ToDo item")
    );
}

#[test]
fn test_deleting_edited_task_clears_slot() {
    let (mut client, _rx) = setup(sample_tasks());
    client.begin_edit("a");
    client.handle_event(&Event::TaskDeleted("a".to_string()));
    assert!(client.editing().is_none());
}

#[test]
fn test_reload_clears_orphaned_slot() {
    let (mut client, _rx) = setup(sample_tasks());
    client.begin_edit("c");
    client.handle_event(&Event::TasksLoaded(vec![Task::new("a", "Buy milk", "2 liters")]));
    assert!(client.editing().is_none());
}

#[test]
fn test_newer_notice_replaces_older() {
    let (mut client, _rx) = setup(vec![]);
    client.notify(NoticeMessage::error("first"));
    client.notify(NoticeMessage::success("second"));

    assert_eq!(client.notification().map(|n| n.message()), Some("second"));
}

#[test]
fn test_notice_expires() {
    let (action_tx, _rx) = mpsc::unbounded_channel();
    let mut client = ListSyncClient::new(action_tx).with_notice_duration(Duration::from_millis(500));
    client.notify(NoticeMessage::info("hello"));
    let now = Instant::now();

    client.expire_notification(now);
    assert!(client.notification_at(now).is_some());

    let later = now + Duration::from_millis(501);
    client.expire_notification(later);
    assert!(client.notification_at(now).is_none());
}

#[test]
fn test_non_remote_events_are_ignored() {
    let (mut client, _rx) = setup(sample_tasks());
    assert_eq!(client.handle_event(&Event::UiTick), None);
    assert_eq!(client.handle_event(&Event::Quit), None);
    assert_eq!(client.items(), sample_tasks().as_slice());
}
