// Integration tests for playback over generated walkthroughs

use std::time::{Duration, Instant};
use stepviz::playback::session::{Algorithm, Session, SessionSettings, Walkthrough};
use stepviz::playback::{Autoplay, Cursor, Tick, Timeline};
use stepviz::steps::factors;

fn settings(number: i64) -> SessionSettings {
    SessionSettings {
        number,
        interval: Duration::from_millis(100),
        ..SessionSettings::default()
    }
}

#[test]
fn test_autoplay_runs_to_end_and_stops() {
    let steps = factors::generate(12, true).expect("12 is valid");
    let len = steps.len();
    let mut timeline = Timeline::new(steps);
    let mut autoplay = Autoplay::new(Duration::from_millis(100));

    let t0 = Instant::now();
    autoplay.start(t0);
    let mut finished_at = None;
    for i in 1..=len + 5 {
        let now = t0 + Duration::from_millis(100) * i as u32;
        if autoplay.poll(now, &mut timeline) == Tick::Finished {
            finished_at = Some(i);
            break;
        }
    }

    assert_eq!(finished_at, Some(len - 1));
    assert!(timeline.is_at_end());
    assert!(!autoplay.is_playing());
    assert_eq!(
        timeline.current().map(|s| s.stage),
        Some(factors::FactorStage::Result)
    );
}

#[test]
fn test_regenerating_shorter_sequence_cancels_pending_tick() {
    let t0 = Instant::now();
    let mut session = Session::new(SessionSettings {
        optimized: false,
        ..settings(100)
    })
    .expect("valid settings");

    // Deep into a long naive walkthrough with autoplay pending
    assert_eq!(session.step_forward_by(200), 200);
    session.toggle_play(t0);
    assert!(session.is_playing());

    session.set_number(2).expect("2 is valid");
    let short_len = session.len();
    assert!(!session.is_playing());
    assert_eq!(session.position(), 0);

    for i in 1..10 {
        assert_eq!(session.tick(t0 + Duration::from_secs(i)), Tick::Idle);
    }
    assert!(session.position() < short_len);
}

#[test]
fn test_manual_step_pauses_autoplay() {
    let t0 = Instant::now();
    let mut session = Session::new(settings(24)).expect("valid settings");
    session.toggle_play(t0);
    assert_eq!(session.tick(t0 + Duration::from_millis(100)), Tick::Advanced);

    session.step_backward().expect("not at start");
    assert!(!session.is_playing());
    assert_eq!(session.position(), 0);
}

#[test]
fn test_walkthrough_records_match_timeline() {
    let session = Session::new(settings(18)).expect("valid settings");
    let walkthrough = session.walkthrough();
    let records = walkthrough.records();
    assert_eq!(records.len(), session.len());
    assert_eq!(records[0].stage_tag(), "init");
    assert_eq!(records[records.len() - 1].stage_tag(), "result");
    assert_eq!(
        walkthrough.current_record().map(|r| r.description().to_string()),
        Some(records[0].description().to_string())
    );
}

#[test]
fn test_find_max_session() {
    let mut session = Session::new(SessionSettings {
        algorithm: Algorithm::FindMax,
        values: vec![4, 11, 2],
        ..settings(24)
    })
    .expect("valid settings");
    session.jump_to_end().expect("non-empty");

    match session.walkthrough() {
        Walkthrough::FindMax { timeline, .. } => {
            let last = timeline.current().expect("cursor in range");
            assert_eq!(last.current_max, 11);
            assert_eq!(last.max_index, 1);
        }
        other => panic!("expected find-max walkthrough, got {:?}", other.algorithm()),
    }

    assert!(session.set_values(Vec::new()).is_err());
    assert_eq!(session.values(), &[4, 11, 2]);
}
