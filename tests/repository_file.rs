use std::io::Write;

use tempfile::TempDir;
use urlcut::domain::entities::BatchItem;
use urlcut::domain::repositories::{SaveOutcome, UrlRepository};
use urlcut::infrastructure::persistence::FileRepository;

fn storage_path(dir: &TempDir) -> std::path::PathBuf {
    dir.path().join("records.jsonl")
}

#[tokio::test]
async fn test_open_creates_missing_file() {
    let dir = TempDir::new().unwrap();
    let path = storage_path(&dir);

    let repository = FileRepository::open(&path).await.unwrap();

    assert!(path.exists());
    assert!(repository.list_by_owner("user-1").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_records_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let path = storage_path(&dir);

    {
        let repository = FileRepository::open(&path).await.unwrap();
        repository
            .save_url("https://example.com/a", "aaa111", "user-1")
            .await
            .unwrap();
        repository
            .save_url("https://example.com/b", "bbb222", "user-1")
            .await
            .unwrap();
    }

    let reopened = FileRepository::open(&path).await.unwrap();

    assert_eq!(
        reopened.get_original_url("aaa111").await.unwrap().as_deref(),
        Some("https://example.com/a")
    );
    assert_eq!(
        reopened.get_original_url("bbb222").await.unwrap().as_deref(),
        Some("https://example.com/b")
    );

    // Conflict detection works against the rebuilt index.
    let outcome = reopened
        .save_url("https://example.com/a", "zzz999", "user-2")
        .await
        .unwrap();
    assert!(outcome.is_conflict());
    assert_eq!(outcome.record().short_code, "aaa111");
}

#[tokio::test]
async fn test_conflicting_save_appends_nothing() {
    let dir = TempDir::new().unwrap();
    let path = storage_path(&dir);

    let repository = FileRepository::open(&path).await.unwrap();
    repository
        .save_url("https://example.com", "abc123", "user-1")
        .await
        .unwrap();
    repository
        .save_url("https://example.com", "zzz999", "user-2")
        .await
        .unwrap();
    drop(repository);

    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents.lines().count(), 1);
}

#[tokio::test]
async fn test_malformed_line_aborts_open() {
    let dir = TempDir::new().unwrap();
    let path = storage_path(&dir);

    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(
        file,
        r#"{{"uuid":"2f7c54a2-9c2b-4f6e-8a0f-0a4f3f1c9d6e","short_url":"abc123","original_url":"https://example.com","user_id":"user-1"}}"#
    )
    .unwrap();
    writeln!(file, "this is not json").unwrap();

    let result = FileRepository::open(&path).await;

    assert!(result.is_err());
    let message = format!("{:#}", result.err().unwrap());
    assert!(message.contains("malformed record"));
}

#[tokio::test]
async fn test_empty_lines_are_skipped() {
    let dir = TempDir::new().unwrap();
    let path = storage_path(&dir);

    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(
        file,
        r#"{{"uuid":"2f7c54a2-9c2b-4f6e-8a0f-0a4f3f1c9d6e","short_url":"abc123","original_url":"https://example.com","user_id":"user-1"}}"#
    )
    .unwrap();
    writeln!(file).unwrap();

    let repository = FileRepository::open(&path).await.unwrap();

    assert_eq!(
        repository.get_original_url("abc123").await.unwrap().as_deref(),
        Some("https://example.com")
    );
}

#[tokio::test]
async fn test_batch_is_persisted() {
    let dir = TempDir::new().unwrap();
    let path = storage_path(&dir);

    let items = vec![
        BatchItem {
            correlation_id: "1".to_string(),
            original_url: "https://example.com/a".to_string(),
        },
        BatchItem {
            correlation_id: "2".to_string(),
            original_url: "https://example.com/b".to_string(),
        },
    ];

    let results = {
        let repository = FileRepository::open(&path).await.unwrap();
        repository.save_batch(&items, "user-1").await.unwrap()
    };

    let reopened = FileRepository::open(&path).await.unwrap();
    for result in &results {
        assert!(
            reopened
                .get_original_url(&result.short_code)
                .await
                .unwrap()
                .is_some()
        );
    }

    let urls = reopened.list_by_owner("user-1").await.unwrap();
    assert_eq!(urls.len(), 2);
}

#[tokio::test]
async fn test_ping_succeeds_on_open_file() {
    let dir = TempDir::new().unwrap();

    let repository = FileRepository::open(storage_path(&dir)).await.unwrap();

    assert!(repository.ping().await.is_ok());
}

#[tokio::test]
async fn test_created_outcome_carries_new_record() {
    let dir = TempDir::new().unwrap();

    let repository = FileRepository::open(storage_path(&dir)).await.unwrap();
    let outcome = repository
        .save_url("https://example.com", "abc123", "user-1")
        .await
        .unwrap();

    match outcome {
        SaveOutcome::Created(record) => {
            assert_eq!(record.short_code, "abc123");
            assert_eq!(record.owner_id, "user-1");
        }
        SaveOutcome::Conflict(_) => panic!("fresh store reported a conflict"),
    }
}
