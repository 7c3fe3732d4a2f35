//! Tests for configuration loading and the session store.

use std::fs;
use tempfile::TempDir;

use crossword_server::{DEFAULT_MAX_SESSIONS, LlmProvider, ServerConfig, SessionStore};

#[test]
fn test_missing_config_uses_defaults() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = ServerConfig::load(dir.path().join("absent.toml")).expect("Load failed");

    assert_eq!(config, ServerConfig::default());
    assert_eq!(config.host(), "127.0.0.1");
    assert_eq!(*config.port(), 8000);
    assert_eq!(*config.llm_provider(), LlmProvider::OpenAI);
    assert_eq!(config.llm_model(), "gpt-4o-mini");
    assert_eq!(*config.llm_max_tokens(), 150);
    assert_eq!(*config.max_sessions(), DEFAULT_MAX_SESSIONS);
    assert_eq!(config.session_store().max_sessions(), DEFAULT_MAX_SESSIONS);
}

#[test]
fn test_partial_config_fills_defaults() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("crossword.toml");
    fs::write(
        &path,
        r#"port = 9100
llm_provider = "anthropic"
llm_model = "claude-3-5-haiku-20241022"
max_sessions = 2
"#,
    )
    .expect("Failed to write TOML");

    let config = ServerConfig::load(&path).expect("Load failed");
    assert_eq!(*config.port(), 9100);
    assert_eq!(config.host(), "127.0.0.1");
    assert_eq!(*config.llm_provider(), LlmProvider::Anthropic);
    assert_eq!(config.session_store().max_sessions(), 2);

    let settings = config.completion_settings();
    assert_eq!(settings.model(), "claude-3-5-haiku-20241022");
    assert_eq!(*settings.max_tokens(), 150);
}

#[test]
fn test_invalid_config_is_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("bad.toml");
    fs::write(&path, "llm_provider = \"mystery\"").expect("Write failed");

    let err = ServerConfig::load(&path).unwrap_err();
    assert!(err.message.contains("Failed to parse config"));
}

#[test]
fn test_bind_overrides() {
    let config = ServerConfig::default().with_bind(Some("0.0.0.0".to_string()), None);
    assert_eq!(config.host(), "0.0.0.0");
    assert_eq!(*config.port(), 8000);

    let config = config.with_bind(None, Some(3000));
    assert_eq!(*config.port(), 3000);
}

#[test]
fn test_provider_api_key_vars() {
    assert_eq!(LlmProvider::OpenAI.api_key_var(), "OPENAI_API_KEY");
    assert_eq!(LlmProvider::Anthropic.api_key_var(), "ANTHROPIC_API_KEY");
    assert_eq!(LlmProvider::Anthropic.to_string(), "anthropic");
}

#[test]
fn test_session_store_overwrites_and_isolates() {
    let store = SessionStore::new();
    assert!(store.is_empty());
    assert_eq!(store.verified_word("default"), None);

    assert_eq!(store.store_verified_word("default", "CATCH"), None);
    assert_eq!(
        store.store_verified_word("default", "COTES").as_deref(),
        Some("CATCH")
    );
    store.store_verified_word("other", "ABC");

    assert_eq!(store.verified_word("default").as_deref(), Some("COTES"));
    assert_eq!(store.verified_word("other").as_deref(), Some("ABC"));
    assert_eq!(store.len(), 2);
}

#[test]
fn test_session_store_clones_share_slots() {
    let store = SessionStore::new();
    let handle = store.clone();
    handle.store_verified_word("default", "CATCH");
    assert_eq!(store.verified_word("default").as_deref(), Some("CATCH"));
}

#[test]
fn test_session_store_evicts_least_recently_written() {
    let store = SessionStore::with_max_sessions(2);
    store.store_verified_word("a", "ONE");
    store.store_verified_word("b", "TWO");
    // Rewriting "a" makes "b" the oldest.
    store.store_verified_word("a", "UNO");
    store.store_verified_word("c", "THREE");

    assert_eq!(store.len(), 2);
    assert_eq!(store.verified_word("a").as_deref(), Some("UNO"));
    assert_eq!(store.verified_word("b"), None);
    assert_eq!(store.verified_word("c").as_deref(), Some("THREE"));
}

#[test]
fn test_session_store_zero_limit_keeps_one() {
    let store = SessionStore::with_max_sessions(0);
    store.store_verified_word("a", "ONE");
    store.store_verified_word("b", "TWO");
    assert_eq!(store.max_sessions(), 1);
    assert_eq!(store.len(), 1);
    assert_eq!(store.verified_word("b").as_deref(), Some("TWO"));
}
