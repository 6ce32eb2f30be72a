//! Storage backend tests
//!
//! Runs the same repository checks against SeaOrmStorage on a temporary
//! SQLite database and against MemoryStorage.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tempfile::TempDir;

use tinylink::config::DatabaseConfig;
use tinylink::errors::TinylinkError;
use tinylink::storage::backend::infer_backend_from_url;
use tinylink::storage::{LinkRepository, MemoryStorage, NewShortUrl, SeaOrmStorage, StorageFactory};

/// 创建临时 SQLite 数据库的存储实例
async fn create_temp_storage() -> (Arc<dyn LinkRepository>, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let config = DatabaseConfig {
        database_url: format!("sqlite://{}?mode=rwc", db_path.display()),
        ..DatabaseConfig::default()
    };

    let storage = SeaOrmStorage::new(&config, "sqlite")
        .await
        .expect("Failed to create storage");

    (Arc::new(storage), temp_dir)
}

fn new_link(code: &str, expires_at: Option<DateTime<Utc>>) -> NewShortUrl {
    NewShortUrl {
        original_url: format!("https://{}.example.com/", code),
        short_code: code.to_string(),
        created_at: Utc::now(),
        expires_at,
    }
}

async fn check_create_and_find(repo: &dyn LinkRepository) {
    let expires_at = Utc::now() + Duration::days(30);
    let id = repo.create(new_link("find", Some(expires_at))).await.unwrap();

    let record = repo.find_by_code("find").await.unwrap().unwrap();
    assert_eq!(record.id, id);
    assert_eq!(record.original_url, "https://find.example.com/");
    assert_eq!(record.visit_count, 0);
    assert_eq!(
        record.expires_at.map(|t| t.timestamp()),
        Some(expires_at.timestamp())
    );

    assert!(repo.find_by_code("missing").await.unwrap().is_none());
}

async fn check_unique_codes(repo: &dyn LinkRepository) {
    repo.create(new_link("same", None)).await.unwrap();
    let err = repo.create(new_link("same", None)).await.unwrap_err();
    assert!(matches!(err, TinylinkError::DuplicateCode(_)), "{:?}", err);
    assert_eq!(repo.count().await.unwrap(), 1);
}

async fn check_increment(repo: &dyn LinkRepository) {
    let id = repo.create(new_link("hits", None)).await.unwrap();
    for _ in 0..5 {
        repo.increment_visit(id).await.unwrap();
    }
    assert_eq!(
        repo.find_by_code("hits").await.unwrap().unwrap().visit_count,
        5
    );
}

async fn check_delete(repo: &dyn LinkRepository) {
    let id = repo.create(new_link("bye", None)).await.unwrap();
    assert!(repo.delete(id).await.unwrap());
    assert!(!repo.delete(id).await.unwrap());
    assert!(repo.find_by_code("bye").await.unwrap().is_none());
}

async fn check_sweep(repo: &dyn LinkRepository) {
    let now = Utc::now();
    for i in 0..3 {
        repo.create(new_link(&format!("past{}", i), Some(now - Duration::hours(i + 1))))
            .await
            .unwrap();
    }
    for i in 0..2 {
        repo.create(new_link(&format!("future{}", i), Some(now + Duration::hours(i + 1))))
            .await
            .unwrap();
    }
    repo.create(new_link("forever", None)).await.unwrap();

    assert_eq!(repo.sweep_expired(now).await.unwrap(), 3);
    assert_eq!(repo.count().await.unwrap(), 3);
    assert!(repo.find_by_code("past0").await.unwrap().is_none());
    assert!(repo.find_by_code("future1").await.unwrap().is_some());
    assert!(repo.find_by_code("forever").await.unwrap().is_some());

    assert_eq!(repo.sweep_expired(now).await.unwrap(), 0);
}

// =============================================================================
// SQLite
// =============================================================================

#[cfg(test)]
mod sqlite_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_find() {
        let (repo, _dir) = create_temp_storage().await;
        check_create_and_find(repo.as_ref()).await;
    }

    #[tokio::test]
    async fn test_unique_codes() {
        let (repo, _dir) = create_temp_storage().await;
        check_unique_codes(repo.as_ref()).await;
    }

    #[tokio::test]
    async fn test_increment_visit() {
        let (repo, _dir) = create_temp_storage().await;
        check_increment(repo.as_ref()).await;
    }

    #[tokio::test]
    async fn test_increment_missing_record() {
        let (repo, _dir) = create_temp_storage().await;
        assert!(matches!(
            repo.increment_visit(4242).await,
            Err(TinylinkError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete() {
        let (repo, _dir) = create_temp_storage().await;
        check_delete(repo.as_ref()).await;
    }

    #[tokio::test]
    async fn test_sweep_expired() {
        let (repo, _dir) = create_temp_storage().await;
        check_sweep(repo.as_ref()).await;
    }

    #[tokio::test]
    async fn test_concurrent_increments_are_not_lost() {
        let (repo, _dir) = create_temp_storage().await;
        let id = repo.create(new_link("busy", None)).await.unwrap();

        let tasks: Vec<_> = (0..20)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.increment_visit(id).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(
            repo.find_by_code("busy").await.unwrap().unwrap().visit_count,
            20
        );
    }

    #[tokio::test]
    async fn test_reopen_keeps_data() {
        let temp_dir = TempDir::new().unwrap();
        let config = DatabaseConfig {
            database_url: format!(
                "sqlite://{}?mode=rwc",
                temp_dir.path().join("persist.db").display()
            ),
            ..DatabaseConfig::default()
        };

        {
            let repo = StorageFactory::create(&config).await.unwrap();
            assert_eq!(repo.backend_name(), "sqlite");
            repo.create(new_link("kept", None)).await.unwrap();
        }

        let repo = StorageFactory::create(&config).await.unwrap();
        assert!(repo.find_by_code("kept").await.unwrap().is_some());
    }
}

// =============================================================================
// Memory
// =============================================================================

#[cfg(test)]
mod memory_tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_backend_behaves_the_same() {
        check_create_and_find(&MemoryStorage::new()).await;
        check_unique_codes(&MemoryStorage::new()).await;
        check_increment(&MemoryStorage::new()).await;
        check_delete(&MemoryStorage::new()).await;
        check_sweep(&MemoryStorage::new()).await;
    }

    #[tokio::test]
    async fn test_factory_selects_memory() {
        let config = DatabaseConfig {
            database_url: "memory://".to_string(),
            ..DatabaseConfig::default()
        };
        let repo = StorageFactory::create(&config).await.unwrap();
        assert_eq!(repo.backend_name(), "memory");
    }
}

// =============================================================================
// URL 推断
// =============================================================================

#[cfg(test)]
mod url_inference_tests {
    use super::*;

    #[test]
    fn test_infer_backend() {
        assert_eq!(infer_backend_from_url("sqlite://links.db").unwrap(), "sqlite");
        assert_eq!(infer_backend_from_url("links.db").unwrap(), "sqlite");
        assert_eq!(infer_backend_from_url("mysql://u:p@h/db").unwrap(), "mysql");
        assert_eq!(
            infer_backend_from_url("postgres://u:p@h/db").unwrap(),
            "postgres"
        );
        assert_eq!(infer_backend_from_url("memory://").unwrap(), "memory");
        assert!(infer_backend_from_url("redis://localhost").is_err());
    }
}
