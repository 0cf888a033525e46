//! Config loading and defaults integration tests

use std::io::Write;

use advocacy_cms::config::{Config, ConfigError, StoreKind};
use advocacy_cms::store;

#[test]
fn test_missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config.server.listen.port(), 8080);
    assert_eq!(config.store.kind, StoreKind::Memory);
}

#[test]
fn test_config_with_all_fields() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[server]
listen = "127.0.0.1:3000"
static_dir = "/srv/advocacy/static"

[store]
kind = "rest"
base_url = "https://example.supabase.co"
api_key = "anon"
timeout_secs = 10

[logging]
filter = "advocacy_cms=debug"
json = true
"#
    )
    .unwrap();

    let config = Config::load(file.path()).unwrap();
    assert_eq!(config.server.listen.to_string(), "127.0.0.1:3000");
    assert_eq!(config.store.kind, StoreKind::Rest);
    assert_eq!(config.store.api_key.as_deref(), Some("anon"));
    assert_eq!(config.store.timeout_secs, Some(10));
    assert_eq!(config.logging.filter, "advocacy_cms=debug");
    assert!(config.logging.json);
    assert!(config.validate().is_ok());
}

#[test]
fn test_malformed_file_is_a_parse_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "[store]\nkind = \"sqlite\"\n").unwrap();

    let err = Config::load(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[tokio::test]
async fn test_seeded_memory_store_opens() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"stats_cards": [{{"label": "Reach", "value": "2.3M", "icon": "Users", "display_order": 1}}]}}"#
    )
    .unwrap();

    let mut config = Config::default();
    config.store.seed_path = Some(file.path().to_path_buf());

    let store = store::open(&config.store).await.unwrap();
    assert_eq!(store.name(), "memory");
    let content = advocacy_cms::load_content(store.as_ref()).await.unwrap();
    assert_eq!(content.stats.len(), 1);
    assert_eq!(content.stats[0].label, "Reach");
}
