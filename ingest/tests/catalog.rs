mod support;

use common::MatchId;
use ingest::catalog::{self, DirectoryCatalog, MatchCatalog, MatchRef};
use ingest::results::{FileResultStore, MemoryResultStore, ResultStore};
use pretty_assertions::assert_eq;
use support::*;
use tracing_test::traced_test;

#[tokio::test]
#[traced_test]
async fn lists_recordings_by_file_name() {
    let dir = tempfile::tempdir().unwrap();
    place(
        dir.path(),
        NUKE,
        &[
            "20.jsonl",
            "3.jsonl",
            "003661234567890123456_0123456789.jsonl",
            "match730_000000000000000000042_0123456789_137.jsonl",
            "nuke.jsonl",
            "3.dem",
            "7.jsonl.tmp",
        ],
    );
    std::fs::create_dir(dir.path().join("11.jsonl")).unwrap();

    let catalog = DirectoryCatalog::new(dir.path());
    let recordings = catalog.recordings().await.unwrap();

    assert_eq!(
        vec![
            MatchRef {
                id: MatchId(3),
                filename: "3.jsonl".to_owned()
            },
            MatchRef {
                id: MatchId(20),
                filename: "20.jsonl".to_owned()
            },
            MatchRef {
                id: MatchId(42),
                filename: "match730_000000000000000000042_0123456789_137.jsonl".to_owned()
            },
            MatchRef {
                id: MatchId(3_661_234_567_890_123_456),
                filename: "003661234567890123456_0123456789.jsonl".to_owned()
            },
        ],
        recordings
    );
}

#[tokio::test]
#[traced_test]
async fn missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = DirectoryCatalog::new(dir.path().join("missing"));

    assert!(catalog.recordings().await.is_err());
}

#[tokio::test]
#[traced_test]
async fn unavailable_recordings_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    place(dir.path(), NUKE, &["1.jsonl", "2.jsonl"]);

    let catalog = DirectoryCatalog::new(dir.path());
    let first = catalog.recordings().await.unwrap().remove(0);
    catalog.mark_unavailable(&first).await;

    let remaining = catalog.recordings().await.unwrap();
    assert_eq!(vec![MatchId(2)], remaining.iter().map(|r| r.id).collect::<Vec<_>>());
}

#[tokio::test]
#[traced_test]
async fn eligibility_by_parser_version() {
    let dir = tempfile::tempdir().unwrap();
    place(dir.path(), NUKE, &["1.jsonl", "2.jsonl", "3.jsonl"]);

    let mut stored = analysis::parse_one(&analysis::ParserConfig { parser_version: 2 }, &nuke()).unwrap();
    let results = MemoryResultStore::new();
    results.persist_result(MatchId(1), &stored).await.unwrap();
    stored.parser_version = 1;
    results.persist_result(MatchId(2), &stored).await.unwrap();

    let catalog = DirectoryCatalog::new(dir.path());

    let eligible = catalog::parseable(&catalog, &results, 2).await.unwrap();
    assert_eq!(
        vec![MatchId(2), MatchId(3)],
        eligible.iter().map(|r| r.id).collect::<Vec<_>>()
    );

    let eligible = catalog::parseable(&catalog, &results, 3).await.unwrap();
    assert_eq!(3, eligible.len());

    let eligible = catalog::parseable(&catalog, &results, 1).await.unwrap();
    assert_eq!(
        vec![MatchId(3)],
        eligible.iter().map(|r| r.id).collect::<Vec<_>>()
    );
}

#[tokio::test]
#[traced_test]
async fn unreadable_result_only_skips_its_match() {
    let dir = tempfile::tempdir().unwrap();
    place(dir.path(), NUKE, &["1.jsonl", "2.jsonl", "3.jsonl"]);

    let results_dir = tempfile::tempdir().unwrap();
    let results = FileResultStore::new(results_dir.path());
    // reading a directory fails with something other than NotFound
    std::fs::create_dir_all(results.match_path(MatchId(2))).unwrap();
    assert!(results.parser_version(MatchId(2)).await.is_err());

    let catalog = DirectoryCatalog::new(dir.path());
    let eligible = catalog::parseable(&catalog, &results, 1).await.unwrap();

    assert_eq!(
        vec![MatchId(1), MatchId(3)],
        eligible.iter().map(|r| r.id).collect::<Vec<_>>()
    );
    assert!(logs_contain("Checking stored result"));
}
