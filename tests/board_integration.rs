//! Integration tests for a mounted board backed by files on disk.

// Integration tests use expect/unwrap for simplicity - panics are acceptable in tests
#![allow(clippy::expect_used, clippy::unwrap_used)]

use digestdeck::board::{Board, Page};
use digestdeck::config::DeckConfig;
use digestdeck::io::{DirectoryDownloadSink, parse_deck};
use digestdeck::models::{Controls, EventRecord, FeedbackButton, LinkClick, LogKind};
use digestdeck::storage::{FilesystemLogStore, LogStore};
use digestdeck::tracking::{FixedClock, NoopReporter, RecordingReporter};
use std::sync::Arc;
use tempfile::TempDir;

const DECK: &str = r#"[
    {"id": "a", "title": "Compiler notes", "source": "Source: Blog", "link": "https://blog.example/a", "score": "5"},
    {"id": "b", "title": "GitHub release of toolkit", "source": "GitHub", "score": "9", "has_github": "true"},
    {"id": "c", "title": "Policy roundup", "source": "News", "score": "9", "tier": "backfill"}
]"#;

fn clock() -> FixedClock {
    FixedClock::parse("2026-10-16T14:00:00+08:00").unwrap()
}

fn mount(
    dir: &TempDir,
    reporter: Arc<RecordingReporter>,
) -> Board<FilesystemLogStore, Arc<RecordingReporter>, FixedClock> {
    let config = DeckConfig::default().with_data_dir(dir.path().join("data"));
    let page = Page::with_cards(parse_deck(DECK).unwrap());
    Board::mount_with_clock(
        page,
        FilesystemLogStore::new(&config.data_dir),
        reporter,
        clock(),
        &config,
    )
    .unwrap()
}

#[test]
fn test_initial_order_and_counter() {
    let dir = TempDir::new().unwrap();
    let board = mount(&dir, Arc::new(RecordingReporter::new()));

    let order: Vec<_> = board.controller().order().iter().map(|id| id.as_str()).collect();
    assert_eq!(order, ["b", "c", "a"]);
    assert_eq!(board.controller().visible_count(), 3);
}

#[test]
fn test_query_matches_case_insensitively() {
    let dir = TempDir::new().unwrap();
    let mut board = mount(&dir, Arc::new(RecordingReporter::new()));

    let visible = board.on_controls_changed(&Controls::new().with_query("github"));

    assert_eq!(visible, 1);
    let shown: Vec<_> = board
        .controller()
        .grid()
        .visible_cards()
        .iter()
        .map(|c| c.id.as_str())
        .collect();
    assert_eq!(shown, ["b"]);
}

#[test]
fn test_hidden_cards_are_still_sorted() {
    let dir = TempDir::new().unwrap();
    let mut board = mount(&dir, Arc::new(RecordingReporter::new()));

    board.on_controls_changed(
        &Controls::new()
            .with_tier("backfill")
            .with_sort("score_asc"),
    );

    let order: Vec<_> = board.controller().order().iter().map(|id| id.as_str()).collect();
    assert_eq!(order, ["a", "b", "c"]);
    assert_eq!(board.controller().visible_count(), 1);
}

#[test]
fn test_clicks_persist_across_mounts() {
    let dir = TempDir::new().unwrap();
    let reporter = Arc::new(RecordingReporter::new());
    {
        let mut board = mount(&dir, Arc::clone(&reporter));
        assert!(board.on_link_click(&LinkClick::new("a", "https://anchor.example")));
        assert!(board.on_link_click(&LinkClick::new("b", "https://github.com/x/y")));
    }

    let board = mount(&dir, Arc::clone(&reporter));
    let clicks = board.logger().records(LogKind::Click);

    assert_eq!(clicks.len(), 2);
    assert_eq!(clicks[0].link, "https://blog.example/a");
    assert_eq!(clicks[1].link, "https://github.com/x/y");
    assert_eq!(board.logger().local_counts().today_clicks, 2);
    assert!(dir.path().join("data").join("anm_click_events.json").exists());

    let events = reporter.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].0, "open_link");
    assert_eq!(events[0].1.source, "Blog");
}

#[test]
fn test_today_count_ignores_yesterday() {
    let dir = TempDir::new().unwrap();
    let store = FilesystemLogStore::new(dir.path().join("data"));
    let mut seeded: Vec<EventRecord> = ["2026-10-16T01:00:00.000+08:00"; 3]
        .iter()
        .map(|ts| EventRecord {
            timestamp: (*ts).to_string(),
            label: "open".to_string(),
            ..EventRecord::default()
        })
        .collect();
    seeded.insert(
        0,
        EventRecord {
            timestamp: "2026-10-15T23:00:00.000+08:00".to_string(),
            ..EventRecord::default()
        },
    );
    store.write("anm_click_events", &seeded).unwrap();

    let board = mount(&dir, Arc::new(RecordingReporter::new()));

    assert_eq!(board.logger().click_counter().map(|c| c.text().to_string()), Some("3".to_string()));
}

#[test]
fn test_unlabeled_feedback_changes_nothing() {
    let dir = TempDir::new().unwrap();
    let reporter = Arc::new(RecordingReporter::new());
    let mut board = mount(&dir, Arc::clone(&reporter));

    assert!(!board.on_feedback(&FeedbackButton::unlabeled("a")));
    assert!(!board.on_feedback(&FeedbackButton::new("a", "")));

    assert!(board.logger().records(LogKind::Feedback).is_empty());
    assert_eq!(board.logger().feedback_counter().map(|c| c.text().to_string()), Some("0".to_string()));
    assert!(reporter.events().is_empty());
}

#[test]
fn test_feedback_export_to_directory() {
    let dir = TempDir::new().unwrap();
    let mut board = mount(&dir, Arc::new(RecordingReporter::new()));
    board.on_feedback(&FeedbackButton::new("a", "like"));
    board.on_feedback(&FeedbackButton::new("c", "dislike"));

    let out = dir.path().join("downloads");
    let mut sink = DirectoryDownloadSink::new(&out);
    assert_eq!(board.on_export(&mut sink), Some(2));

    let text = std::fs::read_to_string(out.join("anm_feedback_export.json")).unwrap();
    assert!(text.contains("\n  {\n"));
    let exported: Vec<EventRecord> = serde_json::from_str(&text).unwrap();
    assert_eq!(exported.len(), 2);
    assert_eq!(exported[0].label, "like");
    assert_eq!(exported[0].channel, "web");
    assert_eq!(exported[1].id, "c");
    assert_eq!(std::fs::read_dir(&out).unwrap().count(), 1);
}

#[test]
fn test_corrupt_log_file_treated_as_empty() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("data");
    std::fs::create_dir_all(&data).unwrap();
    std::fs::write(data.join("anm_feedback_events.json"), "{oops").unwrap();

    let mut board = mount(&dir, Arc::new(RecordingReporter::new()));
    assert_eq!(board.logger().local_counts().total_feedback, 0);

    assert!(board.on_feedback(&FeedbackButton::new("b", "upvote")));
    assert_eq!(board.logger().local_counts().total_feedback, 1);
}

#[test]
fn test_inert_without_cards() {
    let dir = TempDir::new().unwrap();
    let board = Board::mount(
        Page::with_cards(Vec::new()),
        FilesystemLogStore::new(dir.path()),
        NoopReporter,
        &DeckConfig::default(),
    );
    assert!(board.is_none());
}
