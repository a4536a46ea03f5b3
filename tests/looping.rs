use chatreel::kernel::config::{PacingConfig, PostDelayConfig};
use chatreel::kernel::event::PlaybackEvent;
use chatreel::kernel::time::Tick;
use chatreel::script::demo;
use chatreel::Scheduler;

const CYCLE_MS: u64 = 2_020;

fn pacing() -> PacingConfig {
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
        reveal: None,
    }
}

#[test]
fn test_loop_resets_after_exact_delay_for_several_cycles() {
    let mut s = Scheduler::new(pacing()).unwrap();
    s.start(demo::churn().unwrap(), Tick::ZERO).unwrap();

    let mut commits = Vec::new();
    let mut resets = Vec::new();
    for ms in 1..=(CYCLE_MS * 4) {
        for event in s.advance_to(Tick::at(ms)) {
            match event {
                PlaybackEvent::TurnCommitted { index } => commits.push((ms, index)),
                PlaybackEvent::LoopReset { loops } => resets.push((ms, loops)),
                _ => {}
            }
        }
    }

    assert_eq!(resets, vec![(2_020, 1), (4_040, 2), (6_060, 3), (8_080, 4)]);

    let expected: Vec<(u64, usize)> = (0..4)
        .flat_map(|k| {
            let base = k * CYCLE_MS;
            [(base + 270, 0), (base + 670, 1), (base + 1_020, 2)]
        })
        .collect();
    assert_eq!(commits, expected);
}

#[test]
fn test_loop_pause_spans_exactly_loop_delay() {
    let mut s = Scheduler::new(pacing()).unwrap();
    s.start(demo::churn().unwrap(), Tick::ZERO).unwrap();

    for cycle in 0..3 {
        let last_commit = cycle * CYCLE_MS + 1_020;
        s.advance_to(Tick::at(last_commit));
        assert_eq!(s.state().revealed().len(), 3);

        s.advance_to(Tick::at(last_commit + 999));
        assert_eq!(s.state().revealed().len(), 3);
        assert!(!s.state().typing());

        s.advance_to(Tick::at(last_commit + 1_000));
        assert!(s.state().revealed().is_empty());
        assert_eq!(s.state().cursor(), 0);
        assert!(s.state().typing());
        assert_eq!(s.state().loops(), cycle + 1);
    }

    let snap = s.telemetry().snapshot();
    assert_eq!(snap.playback.loops_completed, 3);
    assert_eq!(snap.playback.turns_committed, 9);
    assert_eq!(snap.anomalies.reentrancy_rejects, 0);
    assert_eq!(snap.anomalies.stale_timers, 0);
}

#[test]
fn test_late_driver_does_not_drift() {
    let mut s = Scheduler::new(pacing()).unwrap();
    s.start(demo::churn().unwrap(), Tick::ZERO).unwrap();

    // Wake up late every time; deadlines are still honoured exactly.
    s.advance_to(Tick::at(500));
    s.advance_to(Tick::at(2_500));
    s.advance_to(Tick::at(CYCLE_MS * 3 + 269));
    assert_eq!(s.state().loops(), 3);
    assert!(s.state().revealed().is_empty());

    s.advance_to(Tick::at(CYCLE_MS * 3 + 270));
    assert_eq!(s.state().revealed().len(), 1);
}
