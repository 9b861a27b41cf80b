use super::document_repository::DocumentRepository;
use super::speech_repository::{SpeechRequest, SpeechRepository};
use super::translation_repository::TranslationRepository;
use crate::domain::audio::bytes_to_base64;
use crate::domain::document::{Document, DocumentFile};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

static RATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"rate=(\d+)").expect("rate pattern is valid"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    fn inline(mime_type: &str, bytes: &[u8]) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: mime_type.to_string(),
                data: bytes_to_base64(bytes),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    #[serde(default)]
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_modalities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speech_config: Option<SpeechConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechConfig {
    pub voice_config: VoiceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceConfig {
    pub prebuilt_voice_config: PrebuiltVoiceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrebuiltVoiceConfig {
    pub voice_name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    pub finish_reason: Option<String>,
}

impl GenerateContentResponse {
    fn first_parts(&self) -> &[Part] {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| content.parts.as_slice())
            .unwrap_or(&[])
    }

    /// Text of the first candidate, all text parts joined
    pub fn text(&self) -> Option<String> {
        let text: String = self
            .first_parts()
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// First inline payload of the first candidate
    pub fn inline_data(&self) -> Option<&InlineData> {
        self.first_parts()
            .iter()
            .find_map(|part| part.inline_data.as_ref())
    }
}

/// Gemini REST implementation of the document, translation and speech repositories
pub struct GeminiRepository {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
    text_model: String,
    tts_model: String,
}

impl GeminiRepository {
    pub fn new(
        base_url: String,
        api_key: String,
        text_model: String,
        tts_model: String,
        request_timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            text_model,
            tts_model,
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url,
            urlencoding::encode(model)
        )
    }

    /// Send a generateContent request and parse the response
    async fn generate(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, String> {
        let response = self
            .http_client
            .post(self.endpoint(model))
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, model = model, timeout = e.is_timeout(), "Gemini request failed");
                format!("Gemini request failed: {}", e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!(
                status = status.as_u16(),
                model = model,
                body = %error_text,
                "Gemini API returned an error"
            );
            return Err(format!("Gemini API error ({}): {}", status, error_text));
        }

        response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| format!("Failed to parse Gemini response: {}", e))
    }
}

#[async_trait]
impl DocumentRepository for GeminiRepository {
    async fn extract(&self, file: &DocumentFile, instruction: &str) -> Result<Document, String> {
        tracing::info!(
            model = %self.text_model,
            mime_type = %file.mime_type,
            size_bytes = file.bytes.len(),
            "Calling Gemini extraction"
        );

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![
                    Part::inline(&file.mime_type, &file.bytes),
                    Part::text(instruction),
                ],
            }],
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(json!({
                    "type": "OBJECT",
                    "properties": {
                        "text": { "type": "STRING" },
                        "detectedLanguage": { "type": "STRING" }
                    },
                    "required": ["text", "detectedLanguage"]
                })),
                ..Default::default()
            }),
        };

        let response = self.generate(&self.text_model, &request).await?;
        let body = response
            .text()
            .ok_or_else(|| "Gemini extraction returned no text".to_string())?;

        serde_json::from_str::<Document>(&body)
            .map_err(|e| format!("Gemini extraction returned malformed JSON: {}", e))
    }
}

#[async_trait]
impl TranslationRepository for GeminiRepository {
    async fn translate(&self, text: &str, instruction: &str) -> Result<String, String> {
        tracing::info!(
            model = %self.text_model,
            text_length = text.len(),
            "Calling Gemini translation"
        );

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part::text(format!("{}\n\n{}", instruction, text))],
            }],
            generation_config: None,
        };

        let response = self.generate(&self.text_model, &request).await?;
        response
            .text()
            .ok_or_else(|| "Gemini translation returned no text".to_string())
    }
}

#[async_trait]
impl SpeechRepository for GeminiRepository {
    async fn synthesize_chunk(&self, request: &SpeechRequest) -> Result<Option<String>, String> {
        tracing::debug!(
            model = %self.tts_model,
            voice = %request.voice,
            text_length = request.text.len(),
            text_preview = %request.text.chars().take(200).collect::<String>(),
            "Calling Gemini speech synthesis"
        );

        let body = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part::text(request.text.clone())],
            }],
            generation_config: Some(GenerationConfig {
                response_modalities: Some(vec!["AUDIO".to_string()]),
                speech_config: Some(SpeechConfig {
                    voice_config: VoiceConfig {
                        prebuilt_voice_config: PrebuiltVoiceConfig {
                            voice_name: request.voice.clone(),
                        },
                    },
                }),
                ..Default::default()
            }),
        };

        let response = self.generate(&self.tts_model, &body).await?;

        let Some(inline_data) = response.inline_data() else {
            tracing::debug!(
                finish_reason = ?response.candidates.first().and_then(|c| c.finish_reason.clone()),
                "Gemini speech response carried no audio"
            );
            return Ok(None);
        };

        if let Some(rate) = payload_sample_rate(&inline_data.mime_type) {
            if rate != request.sample_rate {
                tracing::warn!(
                    expected_rate = request.sample_rate,
                    payload_rate = rate,
                    mime_type = %inline_data.mime_type,
                    "Speech payload sample rate differs from requested rate"
                );
            }
        }

        Ok(Some(inline_data.data.clone()))
    }

    fn provider(&self) -> &'static str {
        "gemini"
    }
}

/// Sample rate advertised in a payload MIME type such as `audio/L16;codec=pcm;rate=24000`
fn payload_sample_rate(mime_type: &str) -> Option<u32> {
    RATE_PATTERN
        .captures(mime_type)
        .and_then(|captures| captures.get(1))
        .and_then(|rate| rate.as_str().parse().ok())
}
