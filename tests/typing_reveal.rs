use chatreel::kernel::config::{PacingConfig, PostDelayConfig, RevealConfig};
use chatreel::kernel::event::PlaybackEvent;
use chatreel::kernel::time::Tick;
use chatreel::script::demo;
use chatreel::{Role, Scheduler};

fn pacing(char_ms: u64) -> PacingConfig {
    PacingConfig {
        per_char_ms: 10,
        cap_ms: 300,
        post_delay: PostDelayConfig {
            initiator_ms: 100,
            agent_ms: 200,
            outcome_ms: 400,
            action_extra_ms: 50,
        },
        loop_delay_ms: 1_000,
        reveal: Some(RevealConfig {
            char_ms,
            initial_delay_ms: 0,
            roles: vec![Role::Initiator],
        }),
    }
}

#[test]
fn test_draft_grows_then_clears_on_commit() {
    let mut s = Scheduler::new(pacing(10)).unwrap();
    s.start(demo::churn().unwrap(), Tick::ZERO).unwrap();

    let events = s.advance_to(Tick::ZERO);
    assert_eq!(events, vec![PlaybackEvent::DraftGrew { cursor: 0, chars: 1 }]);
    assert_eq!(s.state().draft(), "W");

    s.advance_to(Tick::at(50));
    assert_eq!(s.state().draft(), "Why ar");

    s.advance_to(Tick::at(260));
    assert_eq!(s.state().draft(), "Why are churn rates rising?");
    assert!(s.state().typing());
    assert!(s.state().revealed().is_empty());

    s.advance_to(Tick::at(270));
    assert_eq!(s.state().draft(), "");
    assert_eq!(s.state().revealed().len(), 1);
}

#[test]
fn test_roles_without_reveal_have_no_draft() {
    let mut s = Scheduler::new(pacing(10)).unwrap();
    s.start(demo::churn().unwrap(), Tick::ZERO).unwrap();

    // Agent turn types from 370 to 670.
    s.advance_to(Tick::at(500));
    assert_eq!(s.state().cursor(), 1);
    assert!(s.state().typing());
    assert_eq!(s.state().draft(), "");
}

#[test]
fn test_commit_cancels_slow_reveal_as_group() {
    let mut s = Scheduler::new(pacing(100)).unwrap();
    s.start(demo::churn().unwrap(), Tick::ZERO).unwrap();
    assert_eq!(s.pending_timers(), 27 + 1);

    s.advance_to(Tick::at(269));
    assert_eq!(s.state().draft(), "Why");

    s.advance_to(Tick::at(270));
    assert_eq!(s.state().revealed().len(), 1);
    assert_eq!(s.state().draft(), "");
    // Only the post-delay timer is left.
    assert_eq!(s.pending_timers(), 1);
}

#[test]
fn test_cancel_mid_reveal_freezes_draft() {
    let mut s = Scheduler::new(pacing(10)).unwrap();
    s.start(demo::churn().unwrap(), Tick::ZERO).unwrap();
    s.advance_to(Tick::at(50));
    s.cancel();

    s.advance_to(Tick::at(5_000));
    assert_eq!(s.state().draft(), "Why ar");
    assert!(s.state().revealed().is_empty());
}

#[test]
fn test_initial_delay_holds_first_char() {
    let mut config = pacing(10);
    if let Some(reveal) = config.reveal.as_mut() {
        reveal.initial_delay_ms = 40;
    }
    let mut s = Scheduler::new(config).unwrap();
    s.start(demo::churn().unwrap(), Tick::ZERO).unwrap();

    s.advance_to(Tick::at(39));
    assert_eq!(s.state().draft(), "");
    s.advance_to(Tick::at(40));
    assert_eq!(s.state().draft(), "W");
}

#[test]
fn test_huge_char_rate_saturates_instead_of_overflowing() {
    let json = r#"{ "per_char_ms": 10, "cap_ms": 300,
        "reveal": { "char_ms": 10000000000000000000, "roles": ["initiator"] } }"#;
    let config = PacingConfig::from_json_str(json).unwrap();
    let mut s = Scheduler::new(config).unwrap();
    s.start(demo::churn().unwrap(), Tick::ZERO).unwrap();

    // First char lands at start; the rest sit at the far end of the clock.
    s.advance_to(Tick::ZERO);
    assert_eq!(s.state().draft(), "W");
    assert!(s.next_deadline().unwrap() >= Tick::ZERO);

    s.advance_to(Tick::at(270));
    assert_eq!(s.state().revealed().len(), 1);
    assert_eq!(s.state().draft(), "");
    assert_eq!(s.pending_timers(), 1);
}
