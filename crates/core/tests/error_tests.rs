// ═══════════════════════════════════════════════════════════════════
// Error Tests — CoreError variants, Display formatting, From impls
// ═══════════════════════════════════════════════════════════════════

use farm_ledger_core::errors::CoreError;

// ── Display formatting ──────────────────────────────────────────────

mod display {
    use super::*;

    #[test]
    fn validation_error() {
        let err = CoreError::ValidationError("Please enter a valid amount".into());
        assert_eq!(err.to_string(), "Validation failed: Please enter a valid amount");
    }

    #[test]
    fn persistence_error() {
        let err = CoreError::PersistenceError("disk full".into());
        assert_eq!(err.to_string(), "Persistence error: disk full");
    }

    #[test]
    fn serialization() {
        let err = CoreError::Serialization("bad float".into());
        assert_eq!(err.to_string(), "Serialization error: bad float");
    }

    #[test]
    fn deserialization() {
        let err = CoreError::Deserialization("unexpected EOF".into());
        assert_eq!(err.to_string(), "Deserialization error: unexpected EOF");
    }

    #[test]
    fn file_io() {
        let err = CoreError::FileIO("permission denied".into());
        assert_eq!(err.to_string(), "File I/O error: permission denied");
    }

    #[test]
    fn remote_error() {
        let err = CoreError::RemoteError {
            function: "login_farmer".into(),
            message: "HTTP 500".into(),
        };
        assert_eq!(err.to_string(), "Remote error (login_farmer): HTTP 500");
    }

    #[test]
    fn network() {
        let err = CoreError::Network("connection refused".into());
        assert_eq!(err.to_string(), "Network error: connection refused");
    }
}

// ── Classification helpers ──────────────────────────────────────────

mod classification {
    use super::*;

    #[test]
    fn is_validation_only_for_validation_errors() {
        assert!(CoreError::ValidationError("x".into()).is_validation());
        assert!(!CoreError::PersistenceError("x".into()).is_validation());
        assert!(!CoreError::Network("x".into()).is_validation());
    }

    #[test]
    fn into_persistence_collapses_storage_errors() {
        for err in [
            CoreError::Serialization("a".into()),
            CoreError::Deserialization("b".into()),
            CoreError::FileIO("c".into()),
        ] {
            assert!(matches!(err.into_persistence(), CoreError::PersistenceError(_)));
        }
    }

    #[test]
    fn into_persistence_keeps_message() {
        let err = CoreError::FileIO("read-only filesystem".into()).into_persistence();
        assert_eq!(err.to_string(), "Persistence error: read-only filesystem");
    }

    #[test]
    fn into_persistence_leaves_other_errors() {
        let err = CoreError::ValidationError("bad key".into()).into_persistence();
        assert!(matches!(err, CoreError::ValidationError(_)));

        let err = CoreError::Network("down".into()).into_persistence();
        assert!(matches!(err, CoreError::Network(_)));
    }
}

// ── From conversions ────────────────────────────────────────────────

mod conversions {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.json");
        let err: CoreError = io.into();
        match err {
            CoreError::FileIO(msg) => assert!(msg.contains("missing.json")),
            other => panic!("expected FileIO, got {other:?}"),
        }
    }

    #[test]
    fn from_serde_json_error() {
        let json_err = serde_json::from_str::<Vec<u8>>("not json").unwrap_err();
        let err: CoreError = json_err.into();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }

    #[test]
    fn from_decimal_error_is_validation() {
        let dec_err = rust_decimal::Decimal::from_str("12abc").unwrap_err();
        let err: CoreError = dec_err.into();
        assert!(err.is_validation());
        assert!(err.to_string().starts_with("Validation failed: Invalid amount"));
    }

    #[test]
    fn question_mark_propagation() {
        fn read() -> Result<Vec<u8>, CoreError> {
            let bytes = std::fs::read("/definitely/not/here/farm.json")?;
            Ok(bytes)
        }
        assert!(matches!(read(), Err(CoreError::FileIO(_))));
    }
}
