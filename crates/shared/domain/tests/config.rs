use hustler_domain::config::{BackendConfig, ClientConfig, WindowConfig};
use serde_json::json;

#[test]
fn config_defaults_match_the_registration_flow() {
    let backend = BackendConfig::default();
    assert_eq!(backend.url, "http://localhost:5000");
    assert_eq!(backend.timeout_seconds, 15);

    let cfg = ClientConfig::default();
    assert_eq!(cfg.log.level, "info");
    assert!(cfg.log.directory.is_none());
}

#[test]
fn client_config_deserializes_partial_documents() {
    let raw = json!({
        "backend": { "url": "https://api.example.test" },
        "window": { "title": "Hustler" },
        "log": { "level": "debug", "directory": "/tmp/hustler-logs", "json": true }
    });

    let cfg: ClientConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.backend.url, "https://api.example.test");
    assert_eq!(cfg.backend.timeout_seconds, 15, "missing keys fall back to defaults");
    assert_eq!(cfg.window.title, "Hustler");
    assert_eq!(cfg.window.width, WindowConfig::default().width);
    assert_eq!(cfg.log.directory, Some(std::path::PathBuf::from("/tmp/hustler-logs")));
    assert!(cfg.log.json);
}

#[test]
fn cloned_config_is_copy_on_write() {
    let original = ClientConfig::default();
    let mut edited = original.clone();
    edited.backend.url = "http://10.0.0.2:8000".to_owned();

    assert_eq!(original.backend.url, "http://localhost:5000");
    assert_eq!(edited.backend.url, "http://10.0.0.2:8000");
}
