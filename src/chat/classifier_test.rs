use super::*;

#[test]
fn test_classify_known_types() {
    let event = classify(r#"{"type":"thinking","content":"planning"}"#).unwrap();
    assert_eq!(
        event,
        Some(ServerEvent::Thinking {
            content: "planning".to_string()
        })
    );

    let event = classify(r#"{"type":"message","delta":"Hel"}"#).unwrap();
    assert_eq!(event, Some(ServerEvent::delta("Hel")));

    let event = classify(r#"{"type":"message","content":"Hi","turn_id":"t1"}"#).unwrap();
    assert_eq!(
        event,
        Some(ServerEvent::Message {
            content: Some("Hi".to_string()),
            delta: None,
            turn_id: Some("t1".to_string()),
        })
    );

    let event = classify(r#"{"type":"message_end"}"#).unwrap();
    assert_eq!(event, Some(ServerEvent::MessageEnd));
}

#[test]
fn test_classify_task_update() {
    let event = classify(
        r#"{"type":"task_update","tasks":[{"name":"search","status":"running","progress":0.5}]}"#,
    )
    .unwrap();
    match event {
        Some(ServerEvent::TaskUpdate { tasks }) => {
            assert_eq!(tasks.len(), 1);
            assert_eq!(tasks[0].name, "search");
            assert_eq!(tasks[0].status, "running");
            assert_eq!(tasks[0].extra["progress"], 0.5);
        }
        event => panic!("unexpected event: {event:?}"),
    }

    let event = classify(r#"{"type":"task_update","tasks":null}"#).unwrap();
    assert_eq!(event, Some(ServerEvent::TaskUpdate { tasks: vec![] }));
}

#[test]
fn test_classify_turn_error() {
    let event = classify(r#"{"type":"turn_error","content":"model unavailable"}"#).unwrap();
    assert_eq!(
        event,
        Some(ServerEvent::TurnError {
            reason: "model unavailable".to_string()
        })
    );

    let event = classify(r#"{"type":"turn_error"}"#).unwrap();
    assert!(matches!(event, Some(ServerEvent::TurnError { .. })));
}

#[test]
fn test_classify_ignores_unknown_types() {
    assert_eq!(classify(r#"{"type":"heartbeat"}"#).unwrap(), None);
    assert_eq!(classify(r#"{"content":"no type"}"#).unwrap(), None);
    assert_eq!(classify(r#"{}"#).unwrap(), None);
}

#[test]
fn test_classify_malformed() {
    assert!(classify("not json").is_err());
    assert!(classify("").is_err());
    assert_eq!(classify("[1,2]").unwrap(), None);
    assert_eq!(classify(r#"{"type":7}"#).unwrap(), None);
}

#[test]
fn test_classify_tolerates_mistyped_fields() {
    let event = classify(r#"{"type":"message_end","tasks":{"done":true}}"#).unwrap();
    assert_eq!(event, Some(ServerEvent::MessageEnd));

    let event = classify(r#"{"type":"message","delta":42,"content":"Hi"}"#).unwrap();
    assert_eq!(
        event,
        Some(ServerEvent::Message {
            content: Some("Hi".to_string()),
            delta: None,
            turn_id: None,
        })
    );

    let event = classify(r#"{"type":"turn_error","content":null,"error":"boom"}"#).unwrap();
    assert_eq!(
        event,
        Some(ServerEvent::TurnError {
            reason: "boom".to_string()
        })
    );

    let event = classify(r#"{"type":"task_update","tasks":"soon"}"#).unwrap();
    assert_eq!(event, Some(ServerEvent::TaskUpdate { tasks: vec![] }));
}

#[test]
fn test_classify_tasks_with_odd_values() {
    let event = classify(
        r#"{"type":"task_update","tasks":[
            {"name":"a","status":null},
            {"name":3,"status":true,"description":["x"]},
            "not a task",
            {"status":"completed"}
        ]}"#,
    )
    .unwrap();
    match event {
        Some(ServerEvent::TaskUpdate { tasks }) => {
            assert_eq!(tasks.len(), 3);
            assert_eq!(tasks[0].name, "a");
            assert_eq!(tasks[0].status, "");
            assert_eq!(tasks[1].name, "3");
            assert_eq!(tasks[1].status, "true");
            assert_eq!(tasks[1].description, r#"["x"]"#);
            assert_eq!(tasks[2].name, "");
            assert!(tasks[2].is_done());
        }
        event => panic!("unexpected event: {event:?}"),
    }
}
