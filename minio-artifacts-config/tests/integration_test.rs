//! Integration tests for minio-artifacts-config

use minio_artifacts_config::*;
use serde_json::json;
use std::env;

#[test]
fn test_file_store_from_env() {
    let dir = tempfile::tempdir().unwrap();

    unsafe {
        env::set_var("MINIO_ARTIFACTS_CONFIG_DIR", dir.path());
        env::set_var("MINIO_ARTIFACTS_CONFIG_FORMAT", "json");
    }

    let store = FileConfigStore::from_env().unwrap();
    assert_eq!(store.directory(), dir.path());

    store.save("minio-s3", &json!({"endpoint": "http://localhost:9000"})).unwrap();
    assert!(dir.path().join("minio-s3.json").exists());

    unsafe {
        env::set_var("MINIO_ARTIFACTS_CONFIG_FORMAT", "yaml");
    }
    assert!(matches!(
        FileConfigStore::from_env(),
        Err(ConfigError::UnsupportedFormat(_))
    ));

    // Cleanup
    unsafe {
        env::remove_var("MINIO_ARTIFACTS_CONFIG_DIR");
        env::remove_var("MINIO_ARTIFACTS_CONFIG_FORMAT");
    }
}

#[test]
fn test_env_loader_with_prefix() {
    let loader = EnvLoader::scoped();

    unsafe {
        env::set_var("MINIO_ARTIFACTS_INTEGRATION_VALUE", "from-env");
    }

    assert_eq!(loader.load_var("integration_value").unwrap(), "from-env");

    unsafe {
        env::remove_var("MINIO_ARTIFACTS_INTEGRATION_VALUE");
    }
}

#[test]
fn test_stores_are_interchangeable() {
    let dir = tempfile::tempdir().unwrap();
    let stores: Vec<Box<dyn ConfigStore>> = vec![
        Box::new(FileConfigStore::new(dir.path(), FileFormat::Toml)),
        Box::new(MemoryConfigStore::new()),
    ];

    for store in stores {
        let doc = json!({"container": "artifacts", "delete_stashes": false});
        store.save("minio-s3", &doc).unwrap();
        assert_eq!(store.load("minio-s3").unwrap(), Some(doc));
    }
}

#[test]
fn test_config_error_display() {
    let err = ConfigError::SaveError {
        id: "minio-s3".to_string(),
        reason: "disk full".to_string(),
    };
    let display = format!("{}", err);
    assert!(display.contains("minio-s3"));
    assert!(display.contains("disk full"));
}
