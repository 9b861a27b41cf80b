use lingua::{Language, LanguageDetector, LanguageDetectorBuilder};
use serde::{Deserialize, Serialize};

/// Languages the narrator can read in, keyed by ISO 639-1 code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LanguageCode {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "es")]
    Spanish,
    #[serde(rename = "fr")]
    French,
    #[serde(rename = "de")]
    German,
    #[serde(rename = "it")]
    Italian,
    #[serde(rename = "pt")]
    Portuguese,
    #[serde(rename = "hi")]
    Hindi,
    #[serde(rename = "ja")]
    Japanese,
}

pub const SUPPORTED_LANGUAGES: [LanguageCode; 8] = [
    LanguageCode::English,
    LanguageCode::Spanish,
    LanguageCode::French,
    LanguageCode::German,
    LanguageCode::Italian,
    LanguageCode::Portuguese,
    LanguageCode::Hindi,
    LanguageCode::Japanese,
];

impl LanguageCode {
    /// Get the ISO 639-1 code as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageCode::English => "en",
            LanguageCode::Spanish => "es",
            LanguageCode::French => "fr",
            LanguageCode::German => "de",
            LanguageCode::Italian => "it",
            LanguageCode::Portuguese => "pt",
            LanguageCode::Hindi => "hi",
            LanguageCode::Japanese => "ja",
        }
    }

    /// English display name, as sent to the translation collaborator
    pub fn name(&self) -> &'static str {
        match self {
            LanguageCode::English => "English",
            LanguageCode::Spanish => "Spanish",
            LanguageCode::French => "French",
            LanguageCode::German => "German",
            LanguageCode::Italian => "Italian",
            LanguageCode::Portuguese => "Portuguese",
            LanguageCode::Hindi => "Hindi",
            LanguageCode::Japanese => "Japanese",
        }
    }

    /// Prebuilt voice the speech collaborator narrates this language with
    pub fn voice(&self) -> &'static str {
        match self {
            LanguageCode::English => "Kore",
            LanguageCode::Spanish => "Puck",
            LanguageCode::French => "Aoede",
            LanguageCode::German => "Charon",
            LanguageCode::Italian => "Leda",
            LanguageCode::Portuguese => "Orus",
            LanguageCode::Hindi => "Zephyr",
            LanguageCode::Japanese => "Fenrir",
        }
    }

    /// Resolve a display name or ISO code, case-insensitively
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        SUPPORTED_LANGUAGES.into_iter().find(|code| {
            code.as_str().eq_ignore_ascii_case(value) || code.name().eq_ignore_ascii_case(value)
        })
    }

    /// Convert lingua Language to LanguageCode
    #[allow(unreachable_patterns)]
    pub fn from_lingua(language: Language) -> Option<Self> {
        match language {
            Language::English => Some(LanguageCode::English),
            Language::Spanish => Some(LanguageCode::Spanish),
            Language::French => Some(LanguageCode::French),
            Language::German => Some(LanguageCode::German),
            Language::Italian => Some(LanguageCode::Italian),
            Language::Portuguese => Some(LanguageCode::Portuguese),
            Language::Hindi => Some(LanguageCode::Hindi),
            Language::Japanese => Some(LanguageCode::Japanese),
            // Only reachable if another crate enables more lingua languages
            _ => None,
        }
    }
}

impl std::fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Voice for a language name or code. Unknown languages use the English voice.
pub fn voice_for_language(language: &str) -> &'static str {
    LanguageCode::parse(language)
        .unwrap_or(LanguageCode::English)
        .voice()
}

/// Build a detector over the languages enabled for lingua
pub fn build_detector() -> LanguageDetector {
    LanguageDetectorBuilder::from_all_languages().build()
}

/// Detect the language of the given text.
/// Returns None when the detector cannot decide.
pub fn detect_language(detector: &LanguageDetector, text: &str) -> Option<LanguageCode> {
    detector
        .detect_language_of(text)
        .and_then(LanguageCode::from_lingua)
}
