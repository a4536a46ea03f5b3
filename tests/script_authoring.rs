use chatreel::{Role, Script, ScriptError, Turn};

#[test]
fn test_rejects_empty_script() {
    assert_eq!(Script::new("empty", vec![]), Err(ScriptError::EmptyScript));
}

#[test]
fn test_rejects_empty_text_with_index() {
    let err = Script::new("bad", vec![Turn::initiator("hi"), Turn::agent("")]).unwrap_err();
    assert_eq!(err, ScriptError::EmptyTurnText { index: 1 });
}

#[test]
fn test_char_len_counts_chars_not_bytes() {
    assert_eq!(Turn::agent("héllo").char_len(), 5);
}

#[test]
fn test_deserializes_and_validates_json() {
    let json = r#"{
        "key": "churn",
        "turns": [
            { "role": "initiator", "text": "Why?" },
            {
                "role": "outcome",
                "text": "Done.",
                "metrics": [{ "label": "Resolved", "value": "Yes" }],
                "action_label": "Open report"
            }
        ]
    }"#;
    let script: Script = serde_json::from_str(json).unwrap();
    assert_eq!(script.key().0, "churn");
    assert_eq!(script.len(), 2);
    assert_eq!(script.turns()[1].role, Role::Outcome);
    assert_eq!(script.turns()[1].action_label.as_deref(), Some("Open report"));

    let bad = r#"{ "key": "x", "turns": [] }"#;
    assert!(serde_json::from_str::<Script>(bad).is_err());
}
