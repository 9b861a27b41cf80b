use booktape::domain::tts::DEFAULT_MAX_CHUNK_LENGTH;
use booktape::infrastructure::config::{Config, Environment, LogFormat, DEFAULT_TTS_MODEL};
use pretty_assertions::assert_eq;
use serial_test::serial;
use std::env;

const VARS: [&str; 9] = [
    "GEMINI_API_KEY",
    "GEMINI_BASE_URL",
    "GEMINI_TTS_MODEL",
    "REQUEST_TIMEOUT_SECS",
    "TTS_MAX_CHUNK_LENGTH",
    "TTS_CACHE_ENABLED",
    "LOCAL_TEXT_EXTRACTION",
    "ENVIRONMENT",
    "LOG_FORMAT",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn it_should_load_defaults_with_only_api_key() {
    clear_env();
    env::set_var("GEMINI_API_KEY", "key-from-env");

    let config = Config::from_env().unwrap();

    assert_eq!(config.gemini_api_key, "key-from-env");
    assert_eq!(config.gemini_tts_model, DEFAULT_TTS_MODEL);
    assert_eq!(config.tts_max_chunk_length, DEFAULT_MAX_CHUNK_LENGTH);
    assert!(!config.tts_cache_enabled);
    assert!(config.local_text_extraction);
    assert_eq!(config.environment, Environment::Development);
    assert_eq!(config.log_format, LogFormat::Pretty);
    clear_env();
}

#[test]
#[serial]
fn it_should_read_overrides() {
    clear_env();
    env::set_var("GEMINI_API_KEY", "key");
    env::set_var("GEMINI_BASE_URL", "http://127.0.0.1:9999");
    env::set_var("TTS_MAX_CHUNK_LENGTH", "500");
    env::set_var("TTS_CACHE_ENABLED", "true");
    env::set_var("ENVIRONMENT", "production");
    env::set_var("LOG_FORMAT", "json");

    let config = Config::from_env().unwrap();

    assert_eq!(config.gemini_base_url, "http://127.0.0.1:9999");
    assert_eq!(config.tts_max_chunk_length, 500);
    assert!(config.tts_cache_enabled);
    assert!(!config.is_development());
    assert_eq!(config.log_format, LogFormat::Json);
    clear_env();
}

#[test]
#[serial]
fn it_should_require_api_key() {
    clear_env();

    assert!(Config::from_env().is_err());
}

#[test]
#[serial]
fn it_should_reject_zero_chunk_length() {
    clear_env();
    env::set_var("GEMINI_API_KEY", "key");
    env::set_var("TTS_MAX_CHUNK_LENGTH", "0");

    assert!(Config::from_env().is_err());
    clear_env();
}
