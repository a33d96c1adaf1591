//! Queue store integration tests
//!
//! Walks the store through real listening scenarios: building a queue,
//! playing it out, mutating it mid-playback, and exercising the shuffle
//! and repeat edges.

use std::collections::HashSet;
use std::time::Duration;
use tuner_playback::{MediaDirective, QueueStore, RepeatMode, Track};

// ===== Test Helpers =====

fn track(id: &str) -> Track {
    Track::new(
        id,
        format!("Track {id}"),
        "Test Artist",
        format!("/stream/{id}"),
        format!("/art/{id}"),
    )
}

fn load_target(directive: &MediaDirective) -> Option<&str> {
    match directive {
        MediaDirective::LoadAndPlay(track) => Some(track.id.as_str()),
        _ => None,
    }
}

// ===== Playing a queue to exhaustion =====

#[test]
fn play_next_queue_plays_out_and_stops() {
    let mut store = QueueStore::default();

    // Build [A, B] from an empty queue: A starts immediately
    let directive = store.play_next(vec![track("a"), track("b")]);
    assert_eq!(load_target(&directive), Some("a"));
    assert_eq!(store.current_index(), Some(0));
    assert_eq!(
        store.tracks().iter().map(|t| t.id.as_str()).collect::<Vec<_>>(),
        vec!["a", "b"]
    );

    // A ends naturally: B loads
    let directive = store.on_track_ended();
    assert_eq!(load_target(&directive), Some("b"));
    assert_eq!(store.current_index(), Some(1));

    // B ends with repeat off: nothing loads, cursor stays put
    assert_eq!(store.on_track_ended(), MediaDirective::None);
    assert_eq!(store.current_index(), Some(1));
}

#[test]
fn repeat_all_wraps_at_exhaustion() {
    let mut store = QueueStore::new(false, RepeatMode::All);
    store.play_all(vec![track("a"), track("b")], 1);

    let directive = store.on_track_ended();
    assert_eq!(load_target(&directive), Some("a"));
    assert_eq!(store.current_index(), Some(0));
}

#[test]
fn repeat_one_replays_without_consuming_a_step() {
    let mut store = QueueStore::new(true, RepeatMode::One);
    store.play_all(vec![track("a"), track("b"), track("c")], 0);
    let position_before = store.shuffle_position();

    assert_eq!(store.on_track_ended(), MediaDirective::RestartCurrent);
    assert_eq!(store.current_index(), Some(0));
    assert_eq!(store.shuffle_position(), position_before);
}

// ===== Shuffle pass lifecycle =====

#[test]
fn shuffle_pass_visits_every_track_once() {
    let mut store = QueueStore::new(true, RepeatMode::Off);
    store.play_all(
        vec![track("a"), track("b"), track("c"), track("d")],
        0,
    );

    let mut visited = vec![store.current_index().unwrap()];
    loop {
        match store.advance() {
            MediaDirective::LoadAndPlay(_) => {
                visited.push(store.current_index().unwrap());
            }
            MediaDirective::None => break,
            other => panic!("unexpected directive: {other:?}"),
        }
    }

    assert_eq!(visited.len(), 4);
    let unique: HashSet<usize> = visited.iter().copied().collect();
    assert_eq!(unique.len(), 4, "a shuffle pass repeated a track");
}

#[test]
fn repeat_all_starts_fresh_shuffle_pass() {
    let mut store = QueueStore::new(true, RepeatMode::All);
    store.play_all(vec![track("a"), track("b"), track("c")], 0);

    store.advance();
    store.advance();
    assert_eq!(store.shuffle_position(), Some(2));

    // Exhausting the pass regenerates instead of stopping
    let directive = store.advance();
    assert!(matches!(directive, MediaDirective::LoadAndPlay(_)));
    assert_eq!(store.shuffle_position(), Some(0));
    assert_eq!(
        store.current_index(),
        Some(store.shuffle_order().unwrap()[0])
    );
}

#[test]
fn removal_mid_shuffle_keeps_current_pinned() {
    // B is playing with shuffle on; dropping C must not change what is
    // playing or what plays next from the listener's point of view.
    let mut store = QueueStore::default();
    store.play_all(vec![track("a"), track("b"), track("c")], 1);
    store.toggle_shuffle();
    assert_eq!(store.shuffle_order().unwrap()[0], 1);

    let removed = store.remove(2).unwrap();
    assert_eq!(removed.id, "c");

    let order = store.shuffle_order().unwrap();
    assert_eq!(order.len(), 2);
    let values: HashSet<usize> = order.iter().copied().collect();
    assert_eq!(values, HashSet::from([0, 1]));

    let position = store.shuffle_position().unwrap();
    assert_eq!(order[position], store.current_index().unwrap());
    assert_eq!(store.current_track().unwrap().id, "b");
}

#[test]
fn toggling_shuffle_off_resumes_queue_order() {
    let mut store = QueueStore::default();
    store.play_all(vec![track("a"), track("b"), track("c")], 0);

    store.toggle_shuffle();
    store.toggle_shuffle();
    assert!(!store.shuffle_enabled());

    // Navigation is back to plain queue order from the current index
    let directive = store.advance();
    assert_eq!(load_target(&directive), Some("b"));
}

// ===== Previous-button semantics =====

#[test]
fn previous_late_in_track_always_restarts() {
    for (shuffle, repeat) in [
        (false, RepeatMode::Off),
        (false, RepeatMode::All),
        (true, RepeatMode::One),
    ] {
        let mut store = QueueStore::new(shuffle, repeat);
        store.play_all(vec![track("a"), track("b")], 1);

        let directive = store.retreat(Duration::from_secs(4));
        assert_eq!(directive, MediaDirective::RestartCurrent);
        assert_eq!(store.current_index(), Some(1));
    }
}

#[test]
fn previous_early_steps_back_then_restarts_at_front() {
    let mut store = QueueStore::default();
    store.play_all(vec![track("a"), track("b")], 1);

    let directive = store.retreat(Duration::from_secs(1));
    assert_eq!(load_target(&directive), Some("a"));

    // Already at the first position: restart rather than wrap
    let directive = store.retreat(Duration::from_secs(1));
    assert_eq!(directive, MediaDirective::RestartCurrent);
    assert_eq!(store.current_index(), Some(0));
}

// ===== Explicit queue interplay =====

#[test]
fn row_click_inserts_into_explicit_queue() {
    let mut store = QueueStore::default();
    store.play_next(vec![track("a"), track("b")]);

    // With an explicit queue, clicking a row inserts instead of replacing
    let directive = store.play_single(track("c"));
    assert_eq!(load_target(&directive), Some("c"));
    assert_eq!(
        store.tracks().iter().map(|t| t.id.as_str()).collect::<Vec<_>>(),
        vec!["a", "c", "b"]
    );

    // Draining the queue does not flip back to ambient mode
    store.on_track_ended();
    store.on_track_ended();
    assert!(store.is_explicit());

    // Only clear() resets to ambient
    store.clear();
    assert!(!store.is_explicit());
    let directive = store.play_single(track("d"));
    assert_eq!(load_target(&directive), Some("d"));
    assert_eq!(store.len(), 1);
}

#[test]
fn cycle_repeat_three_times_returns_to_start() {
    let mut store = QueueStore::default();
    let original = store.repeat();

    store.cycle_repeat();
    store.cycle_repeat();
    store.cycle_repeat();
    assert_eq!(store.repeat(), original);
}
