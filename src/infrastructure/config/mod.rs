use serde::Deserialize;
use std::env;
use std::time::Duration;

use crate::domain::tts::DEFAULT_MAX_CHUNK_LENGTH;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_TTS_MODEL: &str = "gemini-2.5-flash-preview-tts";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // Gemini
    pub gemini_api_key: String,
    pub gemini_base_url: String,
    pub gemini_text_model: String,
    pub gemini_tts_model: String,
    pub request_timeout_secs: u64,
    // TTS
    pub tts_max_chunk_length: usize,
    pub tts_cache_enabled: bool,
    // Extraction
    pub local_text_extraction: bool,
    pub environment: Environment,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            gemini_api_key: env::var("GEMINI_API_KEY")
                .map_err(|_| "GEMINI_API_KEY must be set")?,
            gemini_base_url: env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.to_string()),
            gemini_text_model: env::var("GEMINI_TEXT_MODEL")
                .unwrap_or_else(|_| DEFAULT_TEXT_MODEL.to_string()),
            gemini_tts_model: env::var("GEMINI_TTS_MODEL")
                .unwrap_or_else(|_| DEFAULT_TTS_MODEL.to_string()),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "120".to_string())
                .parse()?,
            tts_max_chunk_length: env::var("TTS_MAX_CHUNK_LENGTH")
                .unwrap_or_else(|_| DEFAULT_MAX_CHUNK_LENGTH.to_string())
                .parse()?,
            tts_cache_enabled: parse_flag(env::var("TTS_CACHE_ENABLED").ok(), false),
            local_text_extraction: parse_flag(env::var("LOCAL_TEXT_EXTRACTION").ok(), true),
            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "production" => Environment::Production,
                    _ => Environment::Development,
                })?,
            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "json" => LogFormat::Json,
                    _ => LogFormat::Pretty,
                })?,
        };

        if config.tts_max_chunk_length == 0 {
            return Err("TTS_MAX_CHUNK_LENGTH must be greater than zero".into());
        }

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn parse_flag(value: Option<String>, default: bool) -> bool {
    match value.map(|s| s.trim().to_lowercase()) {
        Some(s) if s == "true" || s == "1" => true,
        Some(s) if s == "false" || s == "0" => false,
        _ => default,
    }
}
