use crate::models::Role;

use super::*;

fn thinking(content: &str) -> ServerEvent {
    ServerEvent::Thinking {
        content: content.to_string(),
    }
}

fn task_update(tasks: Vec<Task>) -> ServerEvent {
    ServerEvent::TaskUpdate { tasks }
}

fn full_message(content: &str) -> ServerEvent {
    ServerEvent::Message {
        content: Some(content.to_string()),
        delta: None,
        turn_id: None,
    }
}

fn turn_message(turn_id: &str, content: Option<&str>, delta: Option<&str>) -> ServerEvent {
    ServerEvent::Message {
        content: content.map(str::to_string),
        delta: delta.map(str::to_string),
        turn_id: Some(turn_id.to_string()),
    }
}

#[test]
fn test_deltas_extend_open_assistant_message() {
    let mut convo = Conversation::new("c1");
    convo.begin_turn("hi");
    convo.apply(ServerEvent::delta("Hel"));
    convo.apply(ServerEvent::delta("lo"));

    assert_eq!(convo.len(), 2);
    let assistants: Vec<_> = convo.messages().iter().filter(|m| m.is_assistant()).collect();
    assert_eq!(assistants.len(), 1);
    assert_eq!(assistants[0].content(), "Hello");
}

#[test]
fn test_task_update_before_message_only_touches_accumulator() {
    let mut convo = Conversation::new("c1");
    convo.begin_turn("plan something");

    let tasks = vec![Task::new("search", "running"), Task::new("write", "pending")];
    convo.apply(task_update(tasks.clone()));

    assert_eq!(convo.len(), 1);
    assert_eq!(convo.messages()[0].role(), Role::User);
    assert!(convo.messages()[0].tasks().is_empty());
    assert_eq!(convo.stream().current_tasks, tasks);

    convo.apply(ServerEvent::delta("On it"));
    let last = convo.last_message().unwrap();
    assert!(last.is_assistant());
    assert_eq!(last.tasks(), tasks.as_slice());
}

#[test]
fn test_task_update_rewrites_open_assistant_message() {
    let mut convo = Conversation::new("c1");
    convo.begin_turn("go");
    convo.apply(task_update(vec![Task::new("search", "running")]));
    convo.apply(ServerEvent::delta("Working"));

    let updated = vec![Task::new("search", "completed")];
    convo.apply(task_update(updated.clone()));

    assert_eq!(convo.len(), 2);
    let last = convo.last_message().unwrap();
    assert_eq!(last.tasks(), updated.as_slice());
    assert!(last.tasks()[0].is_done());
    assert_eq!(convo.stream().current_tasks, updated);
}

#[test]
fn test_message_end_and_new_turn_reset() {
    let mut convo = Conversation::new("c1");
    convo.begin_turn("first");
    assert_eq!(convo.is_thinking(), true);

    convo.apply(thinking("considering"));
    convo.apply(task_update(vec![Task::new("a", "running")]));
    convo.apply(ServerEvent::delta("answer"));
    convo.apply(ServerEvent::MessageEnd);
    assert_eq!(convo.is_thinking(), false);
    assert_eq!(convo.last_message().unwrap().content(), "answer");

    // A second turn starts clean even though the first never ended
    convo.begin_turn("second");
    convo.apply(thinking("more"));
    convo.begin_turn("third");
    assert_eq!(
        convo.stream(),
        &StreamState {
            is_thinking: true,
            ..Default::default()
        }
    );
}

#[test]
fn test_thinking_replay_is_idempotent() {
    let mut convo = Conversation::new("c1");
    convo.begin_turn("q");
    convo.apply(thinking("step 1"));
    convo.apply(ServerEvent::delta("a"));
    let once = convo.clone();

    convo.apply(thinking("step 1"));
    assert_eq!(convo.messages(), once.messages());
    assert_eq!(convo.stream(), once.stream());
    assert_eq!(convo.last_message().unwrap().thinking(), Some("step 1"));
}

#[test]
fn test_thinking_refreshes_open_message_while_in_flight() {
    let mut convo = Conversation::new("c1");
    convo.begin_turn("q");
    convo.apply(thinking("step 1"));
    convo.apply(ServerEvent::delta("a"));
    convo.apply(thinking("step 1, step 2"));
    assert_eq!(
        convo.last_message().unwrap().thinking(),
        Some("step 1, step 2")
    );

    convo.apply(ServerEvent::MessageEnd);
    convo.apply(thinking("late"));
    assert_eq!(
        convo.last_message().unwrap().thinking(),
        Some("step 1, step 2")
    );
    assert_eq!(convo.stream().current_thinking, "late");
}

#[test]
fn test_deltas_on_idle_conversation() {
    let mut convo = Conversation::new("c1");
    convo.apply(ServerEvent::delta("A"));
    convo.apply(ServerEvent::delta("B"));
    convo.apply(ServerEvent::MessageEnd);

    assert_eq!(convo.len(), 1);
    assert_eq!(convo.messages()[0].content(), "AB");
    assert!(convo.messages()[0].is_assistant());
    assert_eq!(convo.is_thinking(), false);
}

#[test]
fn test_new_message_takes_accumulators() {
    let mut convo = Conversation::new("c1");
    convo.begin_turn("q");
    convo.apply(thinking("why"));
    convo.apply(full_message("Full text"));

    let last = convo.last_message().unwrap();
    assert_eq!(last.content(), "Full text");
    assert_eq!(last.thinking(), Some("why"));
    assert!(last.tasks().is_empty());

    // Non-empty content always opens another bubble under the legacy rule
    convo.apply(full_message("Second"));
    assert_eq!(convo.len(), 3);

    // Delta wins over content on a new bubble
    convo.begin_turn("again");
    convo.apply(ServerEvent::Message {
        content: Some("ignored".to_string()),
        delta: Some("used".to_string()),
        turn_id: None,
    });
    assert_eq!(convo.last_message().unwrap().content(), "used");

    convo.begin_turn("empty");
    convo.apply(ServerEvent::Message {
        content: None,
        delta: None,
        turn_id: None,
    });
    assert_eq!(convo.last_message().unwrap().content(), "");
    assert!(convo.last_message().unwrap().is_assistant());
}

#[test]
fn test_turn_id_discriminates_bubbles() {
    let mut convo = Conversation::new("c1");
    convo.begin_turn("q");
    convo.apply(turn_message("t1", Some("Hel"), None));
    convo.apply(turn_message("t1", None, Some("lo")));
    assert_eq!(convo.len(), 2);
    assert_eq!(convo.last_message().unwrap().content(), "Hello");
    assert_eq!(convo.last_message().unwrap().id(), Some("t1"));

    // Full content for the same turn replaces the text
    convo.apply(turn_message("t1", Some("Hello, world"), None));
    assert_eq!(convo.len(), 2);
    assert_eq!(convo.last_message().unwrap().content(), "Hello, world");

    // A different turn opens a new bubble even for a bare delta
    convo.apply(turn_message("t2", None, Some("Next")));
    assert_eq!(convo.len(), 3);
    assert_eq!(convo.last_message().unwrap().content(), "Next");
    assert_eq!(convo.last_message().unwrap().id(), Some("t2"));
}

#[test]
fn test_turn_error_closes_turn() {
    let mut convo = Conversation::new("c1");
    convo.begin_turn("q");
    convo.apply(ServerEvent::delta("partial"));
    convo.apply(ServerEvent::TurnError {
        reason: "model unavailable".to_string(),
    });

    assert_eq!(convo.is_thinking(), false);
    assert_eq!(convo.len(), 3);
    let last = convo.last_message().unwrap();
    assert_eq!(last.role(), Role::System);
    assert!(last.content().contains("model unavailable"));

    // The next delta opens a fresh assistant message
    convo.apply(ServerEvent::delta("new"));
    assert_eq!(convo.len(), 4);
    assert_eq!(convo.messages()[1].content(), "partial");
}

#[test]
fn test_abort_turn_only_when_in_flight() {
    let mut convo = Conversation::new("c1");
    assert_eq!(convo.abort_turn("connection closed"), false);
    assert!(convo.is_empty());

    convo.begin_turn("q");
    assert_eq!(convo.abort_turn("connection closed"), true);
    assert_eq!(convo.is_thinking(), false);
    assert_eq!(convo.last_message().unwrap().role(), Role::System);

    assert_eq!(convo.abort_turn("connection closed"), false);
    assert_eq!(convo.len(), 2);
}
