// ═══════════════════════════════════════════════════════════════════
// Storage Tests — MemoryStore, FileStore, seed data
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;
use rust_decimal::Decimal;

use farm_ledger_core::errors::CoreError;
use farm_ledger_core::models::transaction::{Category, TransactionType};
use farm_ledger_core::storage::file::FileStore;
use farm_ledger_core::storage::memory::MemoryStore;
use farm_ledger_core::storage::seed::seed_transactions;
use farm_ledger_core::storage::traits::KeyValueStore;

// ═══════════════════════════════════════════════════════════════════
// MemoryStore
// ═══════════════════════════════════════════════════════════════════

mod memory_store {
    use super::*;

    #[tokio::test]
    async fn get_missing_is_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get("farmer_transactions").await.unwrap(), None);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn set_then_get() {
        let store = MemoryStore::new();
        store.set("k", b"[1,2,3]").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some(&b"[1,2,3]"[..]));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn set_overwrites() {
        let store = MemoryStore::new();
        store.set("k", b"old").await.unwrap();
        store.set("k", b"new").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().unwrap(), b"new".to_vec());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn remove_existing_and_missing() {
        let store = MemoryStore::new();
        store.set("k", b"v").await.unwrap();
        store.remove("k").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);
        // Removing again is fine
        store.remove("k").await.unwrap();
    }

    #[tokio::test]
    async fn keys_are_independent() {
        let store = MemoryStore::new();
        store.set("a", b"1").await.unwrap();
        store.set("b", b"2").await.unwrap();
        store.remove("a").await.unwrap();
        assert_eq!(store.get("b").await.unwrap().unwrap(), b"2".to_vec());
    }

    #[test]
    fn name() {
        assert_eq!(MemoryStore::new().name(), "memory");
    }
}

// ═══════════════════════════════════════════════════════════════════
// FileStore
// ═══════════════════════════════════════════════════════════════════

mod file_store {
    use super::*;

    #[test]
    fn path_for_valid_key() {
        let store = FileStore::new("/tmp/ledger");
        let path = store.path_for("farmer_transactions").unwrap();
        assert_eq!(path, std::path::PathBuf::from("/tmp/ledger/farmer_transactions.json"));
    }

    #[test]
    fn path_for_rejects_traversal() {
        let store = FileStore::new("/tmp/ledger");
        for key in ["", "../etc/passwd", "a/b", "a.b", "key with space"] {
            let err = store.path_for(key).unwrap_err();
            assert!(matches!(err, CoreError::ValidationError(_)), "key {key:?}");
        }
    }

    #[tokio::test]
    async fn get_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert_eq!(store.get("farmer").await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("app").join("data");
        let store = FileStore::new(&nested);

        store.set("farmer", b"{}").await.unwrap();

        assert!(nested.join("farmer.json").exists());
        assert_eq!(store.dir(), nested.as_path());
    }

    #[tokio::test]
    async fn set_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.set("farmer_transactions", b"[]").await.unwrap();
        assert_eq!(store.get("farmer_transactions").await.unwrap().unwrap(), b"[]".to_vec());
    }

    #[tokio::test]
    async fn overwrite_replaces_whole_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.set("k", b"a much longer first value").await.unwrap();
        store.set("k", b"short").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().unwrap(), b"short".to_vec());
    }

    #[tokio::test]
    async fn no_temp_files_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.set("k", b"1").await.unwrap();
        store.set("k", b"2").await.unwrap();

        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["k.json".to_string()]);
    }

    #[tokio::test]
    async fn remove_missing_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.remove("nothing").await.unwrap();
    }

    #[tokio::test]
    async fn remove_deletes_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.set("farmer", b"{}").await.unwrap();
        store.remove("farmer").await.unwrap();
        assert_eq!(store.get("farmer").await.unwrap(), None);
        assert!(!dir.path().join("farmer.json").exists());
    }

    #[tokio::test]
    async fn survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        FileStore::new(dir.path()).set("k", b"persisted").await.unwrap();

        let reopened = FileStore::new(dir.path());
        assert_eq!(reopened.get("k").await.unwrap().unwrap(), b"persisted".to_vec());
    }

    #[tokio::test]
    async fn invalid_key_rejected_on_io() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert!(store.set("../x", b"1").await.unwrap_err().is_validation());
        assert!(store.get("../x").await.unwrap_err().is_validation());
        assert!(store.remove("../x").await.unwrap_err().is_validation());
    }

    #[tokio::test]
    async fn unreadable_path_is_file_io() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the value file should be makes reads fail.
        std::fs::create_dir(dir.path().join("k.json")).unwrap();
        let store = FileStore::new(dir.path());
        let err = store.get("k").await.unwrap_err();
        assert!(matches!(err, CoreError::FileIO(_)));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Seed data
// ═══════════════════════════════════════════════════════════════════

mod seed {
    use super::*;

    #[test]
    fn four_entries() {
        let seed = seed_transactions();
        assert_eq!(seed.len(), 4);
        let ids: Vec<&str> = seed.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn contents() {
        let seed = seed_transactions();
        assert_eq!(seed[0].amount, Decimal::from(2000));
        assert_eq!(seed[0].category, Category::Seeds);
        assert_eq!(seed[0].description, "Winter wheat seeds");
        assert_eq!(seed[0].date, NaiveDate::from_ymd_opt(2025, 5, 1).unwrap());

        assert_eq!(seed[2].transaction_type, TransactionType::Income);
        assert_eq!(seed[2].amount, Decimal::from(10000));
        assert_eq!(seed[2].category, Category::CropSale);

        assert_eq!(seed[3].category, Category::Labor);
        assert_eq!(seed[3].date, NaiveDate::from_ymd_opt(2025, 5, 4).unwrap());
    }

    #[test]
    fn entries_are_valid() {
        for t in seed_transactions() {
            assert!(t.amount > Decimal::ZERO);
            assert!(t.category.belongs_to(t.transaction_type));
            assert!(!t.description.trim().is_empty());
        }
    }
}
