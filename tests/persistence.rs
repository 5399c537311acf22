mod common;

use std::collections::HashSet;

use chrono::{TimeZone, Utc};

use league_suggest::storage::sqlite::SqliteSuggestionStore;
use league_suggest::{run_pass, JsonSnapshotStore, PassOptions, SuggestionEmitter, SuggestionStore};

use common::{classifier_for, team_rows};

fn sample_pass() -> league_suggest::PassOutcome {
    let mut rows = team_rows("M1", 100, ["A", "B", "C", "D", "E"], 3);
    rows.extend(team_rows("M1", 200, ["F", "G", "H", "I", "J"], 0));
    let confidences = [0.9, 0.8, 0.7, 0.6, 0.5, 0.4, 0.3, 0.2, 0.1, 0.1];
    let classes = ["A", "B", "C", "D", "E", "F", "G", "H", "I", "J"];
    let classifier = classifier_for(&rows, &classes, &confidences);
    run_pass(rows, &classifier, &PassOptions::default()).unwrap()
}

#[test]
fn records_are_unscoped_ranked_and_uniquely_identified() {
    let outcome = sample_pass();
    let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let records = SuggestionEmitter::new("RANKED_FLEX_SR").to_records(&outcome.suggestions, at);

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].rank, 1);
    assert_eq!(records[1].rank, 2);
    assert!(records.iter().all(|r| r.user_id.is_none() && r.tier.is_none()));
    assert!(records.iter().all(|r| r.game_mode == "RANKED_FLEX_SR"));
    assert!(records.iter().all(|r| r.updated_at == at));
    assert_eq!(records[0].suggested_champion, "A");
    assert_eq!(records[0].team_champions, ["A", "B", "C", "D", "E"]);

    let ids: HashSet<&str> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids.len(), 2);
    assert!(records.iter().all(|r| r.id.len() == 32));
}

#[test]
fn re_emitting_the_same_pass_differs_only_by_id() {
    let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let emitter = SuggestionEmitter::default();
    let mut first = emitter.to_records(&sample_pass().suggestions, at);
    let mut second = emitter.to_records(&sample_pass().suggestions, at);
    assert_ne!(first[0].id, second[0].id);

    for record in first.iter_mut().chain(second.iter_mut()) {
        record.id.clear();
    }
    assert_eq!(first, second);
}

#[test]
fn emit_replaces_the_sqlite_set() {
    let outcome = sample_pass();
    let mut store = SqliteSuggestionStore::in_memory().unwrap();
    let emitter = SuggestionEmitter::default();

    emitter.emit(&mut store, &outcome.suggestions, Utc::now()).unwrap();
    let written = emitter.emit(&mut store, &outcome.suggestions[..1], Utc::now()).unwrap();

    let stored = store.load_unscoped_suggestions(50).unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, written[0].id);
    assert_eq!(stored[0].reasoning, written[0].reasoning);
    assert_eq!(stored[0].game_mode, "RANKED_SOLO_5x5");
    assert_eq!(store.latest_run().unwrap().unwrap().status, "completed");
}

#[test]
fn emit_writes_the_snapshot_payload() {
    let outcome = sample_pass();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("suggestions.json");
    let mut store = JsonSnapshotStore::new(&path);

    SuggestionEmitter::default()
        .emit(&mut store, &outcome.suggestions, Utc::now())
        .unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["total"], 2);
    assert!(raw["generatedAt"].is_string());
    assert_eq!(raw["compositions"][0]["userId"], serde_json::Value::Null);
    assert_eq!(raw["compositions"][0]["suggestedChampion"], "A");
}
