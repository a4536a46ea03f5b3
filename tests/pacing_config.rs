use chatreel::kernel::config::{PacingConfig, PostDelayConfig};
use chatreel::{ConfigError, Turn};

#[test]
fn test_typing_duration_is_monotonic_and_capped() {
    let config = PacingConfig::default();
    let mut last = 0;
    for chars in 1..200 {
        let d = config.typing_duration_ms(chars);
        assert!(d >= last);
        assert!(d <= config.cap_ms);
        last = d;
    }
    assert_eq!(config.typing_duration_ms(10_000), config.cap_ms);
    assert_eq!(config.typing_duration_ms(5_000), config.typing_duration_ms(9_000));
}

#[test]
fn test_outcome_lingers_longest_and_actions_add_time() {
    let config = PacingConfig::default();
    let plain = Turn::agent("ok");
    let action = Turn::agent("ok").with_action("Open");
    let outcome = Turn::outcome("done");
    assert!(config.post_delay_ms(&action) > config.post_delay_ms(&plain));
    assert!(config.post_delay_ms(&outcome) > config.post_delay_ms(&plain));
    assert!(config.post_delay_ms(&outcome) > config.post_delay_ms(&Turn::initiator("q")));
}

#[test]
fn test_partial_json_keeps_defaults() {
    let json = r#"{ "loop_delay_ms": 100, "post_delay": { "initiator_ms": 3500 } }"#;
    let config = PacingConfig::from_json_str(json).unwrap();
    assert_eq!(config.loop_delay_ms, 100);
    assert_eq!(config.post_delay.initiator_ms, 3_500);
    assert_eq!(config.post_delay.agent_ms, PostDelayConfig::default().agent_ms);
    assert_eq!(config.per_char_ms, PacingConfig::default().per_char_ms);
}

#[test]
fn test_rejects_zero_rates() {
    assert!(matches!(
        PacingConfig::from_json_str(r#"{ "per_char_ms": 0 }"#),
        Err(ConfigError::ZeroPerChar)
    ));
    assert!(matches!(
        PacingConfig::from_json_str(r#"{ "reveal": { "char_ms": 0 } }"#),
        Err(ConfigError::ZeroCharRate)
    ));
}
