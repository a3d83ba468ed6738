// Integration tests for the persisted history log
use reviewiq::analysis::{
    ActionSuggestions, AnalysisResult, IndividualAnalysis, OverallSentiment, Sentiment, Theme,
    TopKeywords,
};
use reviewiq::history::{
    HistoryLog, HistoryRecord, HistoryStore, InMemoryHistoryStore, SqliteHistoryStore,
};
use reviewiq::storage;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

const KEY: &str = "reviewiq_history";

fn result(score: f64) -> AnalysisResult {
    AnalysisResult {
        summary: "Guests enjoy the rooms but dislike the breakfast.".to_string(),
        overall_sentiment: OverallSentiment::Positive,
        sentiment_score: score,
        themes: vec![Theme {
            name: "Breakfast".to_string(),
            count: 3.0,
            sentiment: Sentiment::Negative,
        }],
        top_keywords: TopKeywords {
            positive: vec!["clean".to_string()],
            negative: vec!["cold eggs".to_string()],
        },
        emotion_distribution: vec![],
        repeated_complaints: vec!["Breakfast quality".to_string()],
        repeated_highlights: vec!["Room cleanliness".to_string()],
        action_suggestions: ActionSuggestions::default(),
        individual_analysis: vec![IndividualAnalysis {
            index: 0,
            sentiment: Sentiment::Positive,
            category: "Rooms".to_string(),
            emotions: vec!["satisfaction".to_string()],
        }],
    }
}

fn sqlite_store(dir: &Path) -> SqliteHistoryStore {
    SqliteHistoryStore::new(storage::open(dir).unwrap(), KEY)
}

fn write_and_reload(k: usize) -> (Vec<HistoryRecord>, Vec<HistoryRecord>) {
    let temp_dir = TempDir::new().unwrap();

    let written: Vec<HistoryRecord> = {
        let store = sqlite_store(temp_dir.path());
        let mut written = Vec::new();
        for i in 0..k {
            let record = HistoryRecord::new(format!("Hotel {}", i), i + 1, result(50.0 + i as f64));
            store.append(record.clone()).unwrap();
            written.push(record);
        }
        written
    };

    // Reopen from disk
    let reloaded = sqlite_store(temp_dir.path()).get_all().unwrap();
    (written, reloaded)
}

#[test]
fn test_roundtrip_zero_records() {
    let (_, reloaded) = write_and_reload(0);
    assert!(reloaded.is_empty());
}

#[test]
fn test_roundtrip_one_record() {
    let (written, reloaded) = write_and_reload(1);
    assert_eq!(reloaded, written);
}

#[test]
fn test_roundtrip_three_records_most_recent_first() {
    let (mut written, reloaded) = write_and_reload(3);
    written.reverse();
    assert_eq!(reloaded, written);
    assert_eq!(reloaded[0].business_name, "Hotel 2");
    assert_eq!(reloaded[2].business_name, "Hotel 0");
}

#[test]
fn test_score_bounds_are_not_clamped() {
    let temp_dir = TempDir::new().unwrap();
    let log = HistoryLog::new(Arc::new(sqlite_store(temp_dir.path())));

    log.record("Zero Inn", 1, &result(0.0)).unwrap();
    log.record("Perfect Place", 1, &result(100.0)).unwrap();

    let reloaded = sqlite_store(temp_dir.path()).get_all().unwrap();
    assert_eq!(reloaded[0].result.sentiment_score, 100.0);
    assert_eq!(reloaded[1].result.sentiment_score, 0.0);
}

#[test]
fn test_out_of_range_score_kept_as_given() {
    let store = InMemoryHistoryStore::new();
    store
        .append(HistoryRecord::new("Odd", 1, result(104.5)))
        .unwrap();
    assert_eq!(store.get_all().unwrap()[0].result.sentiment_score, 104.5);
}

#[test]
fn test_in_memory_matches_sqlite_ordering() {
    let temp_dir = TempDir::new().unwrap();
    let stores: Vec<Box<dyn HistoryStore>> = vec![
        Box::new(InMemoryHistoryStore::new()),
        Box::new(sqlite_store(temp_dir.path())),
    ];

    for store in &stores {
        for name in ["a", "b", "c"] {
            store
                .append(HistoryRecord::new(name, 1, result(10.0)))
                .unwrap();
        }
        let names: Vec<String> = store
            .get_all()
            .unwrap()
            .into_iter()
            .map(|r| r.business_name)
            .collect();
        assert_eq!(names, vec!["c", "b", "a"]);
    }
}

#[test]
fn test_separate_keys_do_not_mix() {
    let temp_dir = TempDir::new().unwrap();
    let db_dir = temp_dir.path();

    let main = SqliteHistoryStore::new(storage::open(db_dir).unwrap(), KEY);
    main.append(HistoryRecord::new("Main", 1, result(60.0)))
        .unwrap();
    drop(main);

    let other = SqliteHistoryStore::new(storage::open(db_dir).unwrap(), "other_history");
    assert!(other.get_all().unwrap().is_empty());
}
