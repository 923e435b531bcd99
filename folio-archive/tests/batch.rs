mod common;

use common::{FakeElement, FakeSession, pipeline};
use folio_archive::links::parse_links;
use folio_archive::{ArticleId, ArticleStatus, BatchRunner, read_links};
use folio_common::FolioError;
use std::fs;
use tempfile::TempDir;

#[tokio::test]
async fn two_links_make_two_hash_named_folders() {
    let tmp = TempDir::new().unwrap();
    let links = tmp.path().join("links.txt");
    fs::write(&links, "https://example.com/a\nhttps://example.com/b\n").unwrap();
    let archive_root = tmp.path().join("savedArticles");

    let mut session = FakeSession::default()
        .with_page("https://example.com/a", Some(FakeElement::region(&[])))
        .with_page("https://example.com/b", Some(FakeElement::region(&[])));
    let pipeline = pipeline(&archive_root);

    let entries = read_links(&links).await.unwrap();
    let report = BatchRunner::new(&pipeline)
        .run_all(&mut session, entries)
        .await;

    assert_eq!(report.archived(), 2);
    assert_eq!(report.failed(), 0);

    let mut folders: Vec<String> = fs::read_dir(&archive_root)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    folders.sort();
    let mut expected = vec![
        ArticleId::from_url("https://example.com/a").to_string(),
        ArticleId::from_url("https://example.com/b").to_string(),
    ];
    expected.sort();
    assert_eq!(folders, expected);
}

#[tokio::test]
async fn unreachable_url_does_not_stop_the_batch() {
    let tmp = TempDir::new().unwrap();
    let mut session = FakeSession::default()
        .with_page("https://example.com/first", Some(FakeElement::region(&[])))
        .with_page("https://example.com/third", Some(FakeElement::region(&[])));
    let pipeline = pipeline(tmp.path());

    let entries = parse_links(
        "https://example.com/first\nhttps://unreachable.invalid/second\nhttps://example.com/third\n",
    );
    let report = BatchRunner::new(&pipeline)
        .run_all(&mut session, entries)
        .await;

    assert_eq!(session.visited.len(), 3);
    assert_eq!(report.outcomes.len(), 3);
    assert!(report.outcomes[0].is_archived());
    assert!(matches!(
        report.outcomes[1].status,
        ArticleStatus::Failed(FolioError::Navigation { .. })
    ));
    assert!(report.outcomes[2].is_archived());
    assert_eq!(report.failed(), 1);
    assert!(
        tmp.path()
            .join(ArticleId::from_url("https://example.com/third").as_str())
            .join("article.html")
            .exists()
    );
}

#[tokio::test]
async fn malformed_lines_are_reported_and_skipped() {
    let tmp = TempDir::new().unwrap();
    let mut session = FakeSession::default()
        .with_page("https://example.com/ok", Some(FakeElement::region(&[])));
    let pipeline = pipeline(tmp.path());

    let entries = parse_links("definitely not a url\nhttps://example.com/ok");
    let report = BatchRunner::new(&pipeline)
        .run_all(&mut session, entries)
        .await;

    assert_eq!(session.visited, vec!["https://example.com/ok".to_string()]);
    let failures: Vec<_> = report.failures().collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].0.line, 1);
    assert!(failures[0].1.is_input_error());
    assert!(failures[0].0.to_string().starts_with("failed"));
    assert!(report.outcomes[1].to_string().starts_with("archived"));
}

#[tokio::test]
async fn missing_region_fails_only_that_article() {
    let tmp = TempDir::new().unwrap();
    let mut session = FakeSession::default()
        .with_page("https://example.com/empty", None)
        .with_page("https://example.com/full", Some(FakeElement::region(&[])));
    let pipeline = pipeline(tmp.path());

    let entries = parse_links("https://example.com/empty\nhttps://example.com/full\n");
    let report = BatchRunner::new(&pipeline)
        .run_all(&mut session, entries)
        .await;

    assert!(matches!(
        report.outcomes[0].status,
        ArticleStatus::Failed(FolioError::NotFound { .. })
    ));
    assert!(report.outcomes[1].is_archived());
}
