// Headless integration tests driving the library directly: scripted window
// source, recording sink, no OS input queue involved.

use ghosttype::config::{Config, ConfigFile, LoadStatus};
use ghosttype::error::Error;
use ghosttype::injector::{RecordingSink, SinkEvent};
use ghosttype::session::Session;
use ghosttype::window::FakeWindows;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// All durations zero so sessions finish instantly; probabilities set per
/// test.
fn zeroed_config() -> Config {
    let mut config = Config::default();
    config.typing_speed.min_delay = 0.0;
    config.typing_speed.max_delay = 0.0;
    config.typing_speed.mistake_probability = 0.0;
    config.typing_speed.correction_delay = 0.0;
    config.human_behavior.pause_probability = 0.0;
    config.human_behavior.min_pause_duration = 0.0;
    config.human_behavior.max_pause_duration = 0.0;
    config.human_behavior.paragraph_pause = 0.0;
    config.target.window_title = "Editor".into();
    config.target.focus_delay = 0.0;
    config
}

fn editor_windows() -> FakeWindows {
    FakeWindows::with_titles(&["draft.md - Editor", "notes.md - Editor", "Terminal"])
}

#[test]
fn randomized_session_still_lands_the_exact_text() {
    let mut config = zeroed_config();
    config.typing_speed.mistake_probability = 0.5;
    config.human_behavior.pause_probability = 0.5;

    let text = "Dear Ms. Hill,\n\nthe Q3 numbers look fine.\n\tregards";
    let windows = editor_windows();
    let mut sink = RecordingSink::new();
    let mut rng = StdRng::seed_from_u64(2024);

    let summary = Session::new(config)
        .quiet(true)
        .run_with_rng(text, Some(&windows), &mut sink, &mut rng)
        .unwrap();

    assert_eq!(sink.rendered(), text);
    assert_eq!(summary.chars_typed, text.chars().count());

    let backspaces = sink
        .events
        .iter()
        .filter(|e| matches!(e, SinkEvent::Control(_)))
        .count();
    assert_eq!(summary.typos, backspaces);
    // Slips all come from somewhere on the board, so more chars went out
    // than landed.
    assert_eq!(sink.chars().len(), text.chars().count() + summary.typos);
}

#[test]
fn same_seed_replays_the_same_event_stream() {
    let text = "replay me twice";
    let run = |seed: u64| {
        let mut config = zeroed_config();
        config.typing_speed.mistake_probability = 0.3;
        config.human_behavior.pause_probability = 0.3;
        let windows = editor_windows();
        let mut sink = RecordingSink::new();
        let mut rng = StdRng::seed_from_u64(seed);
        Session::new(config)
            .quiet(true)
            .run_with_rng(text, Some(&windows), &mut sink, &mut rng)
            .unwrap();
        sink.events
    };

    assert_eq!(run(7), run(7));
}

#[test]
fn config_file_settings_reach_the_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{
            "typing_speed": {
                "min_delay": 0.0,
                "max_delay": 0.0,
                "mistake_probability": 1.0,
                "correction_delay": 0.0
            },
            "human_behavior": { "pause_probability": 0.0 },
            "browser": { "window_title": "Editor", "focus_delay": 0.0 }
        }"#,
    )
    .unwrap();

    let (mut config, status) = ConfigFile::with_path(&path).load();
    assert_eq!(status, LoadStatus::File);
    // Fields the file never mentions keep their defaults.
    assert_eq!(config.human_behavior.paragraph_pause, 1.0);
    config.human_behavior.min_pause_duration = 0.0;
    config.human_behavior.max_pause_duration = 0.0;
    config.human_behavior.paragraph_pause = 0.0;

    let windows = editor_windows();
    let mut sink = RecordingSink::new();
    let mut rng = StdRng::seed_from_u64(5);
    let summary = Session::new(config)
        .quiet(true)
        .run_with_rng("abc", Some(&windows), &mut sink, &mut rng)
        .unwrap();

    // mistake_probability 1.0 forces a slip for every mapped character.
    assert_eq!(summary.typos, 3);
    assert_eq!(sink.rendered(), "abc");
}

#[test]
fn no_matching_window_aborts_with_nothing_sent() {
    let windows = FakeWindows::with_titles(&["Terminal"]);
    let mut sink = RecordingSink::new();
    let err = Session::new(zeroed_config())
        .quiet(true)
        .run("never typed", Some(&windows), &mut sink)
        .unwrap_err();

    assert!(matches!(err, Error::WindowNotFound(_)));
    assert!(sink.events.is_empty());
    assert!(windows.activated().is_empty());
}

#[test]
fn configured_index_picks_among_matches() {
    let mut config = zeroed_config();
    config.target.window_index = 1;
    let windows = editor_windows();
    let mut sink = RecordingSink::new();

    Session::new(config)
        .quiet(true)
        .run("x", Some(&windows), &mut sink)
        .unwrap();

    // Second match is "notes.md - Editor", handle 2.
    assert_eq!(windows.activated(), vec![2]);
}

#[test]
fn summary_speed_is_positive_for_real_sessions() {
    let windows = editor_windows();
    let mut sink = RecordingSink::new();
    let summary = Session::new(zeroed_config())
        .quiet(true)
        .run("some text", Some(&windows), &mut sink)
        .unwrap();

    assert!(summary.chars_per_sec() > 0.0);
}
