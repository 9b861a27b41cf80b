use booktape::domain::audiobook::AudiobookService;
use booktape::domain::document::DocumentService;
use booktape::domain::translation::TranslationService;
use booktape::domain::tts::{TtsService, DEFAULT_MAX_CHUNK_LENGTH};
use booktape::infrastructure::config::{
    Config, Environment, LogFormat, DEFAULT_TEXT_MODEL, DEFAULT_TTS_MODEL,
};
use booktape::infrastructure::repositories::GeminiRepository;
use std::sync::Arc;
use tempfile::TempDir;
use test_context::AsyncTestContext;
use wiremock::MockServer;

pub mod fixtures;
pub mod gemini_mocks;

pub const TEST_API_KEY: &str = "test-gemini-key";

pub struct TestContext {
    pub server: MockServer,
    pub config: Config,
    pub repository: Arc<GeminiRepository>,
    pub tts_service: Arc<TtsService>,
    pub audiobook_service: AudiobookService,
    pub output_dir: TempDir,
}

impl AsyncTestContext for TestContext {
    fn setup() -> impl std::future::Future<Output = Self> + Send {
        async {
            let server = MockServer::start().await;

            // Create test configuration pointing at the mock server
            let config = Config {
                gemini_api_key: TEST_API_KEY.to_string(),
                gemini_base_url: server.uri(),
                gemini_text_model: DEFAULT_TEXT_MODEL.to_string(),
                gemini_tts_model: DEFAULT_TTS_MODEL.to_string(),
                request_timeout_secs: 5,
                tts_max_chunk_length: DEFAULT_MAX_CHUNK_LENGTH,
                tts_cache_enabled: false, // Disable cache in tests to avoid test pollution
                local_text_extraction: true,
                environment: Environment::Development,
                log_format: LogFormat::Pretty,
            };

            let repository = Arc::new(
                GeminiRepository::new(
                    config.gemini_base_url.clone(),
                    config.gemini_api_key.clone(),
                    config.gemini_text_model.clone(),
                    config.gemini_tts_model.clone(),
                    config.request_timeout(),
                )
                .expect("Failed to build Gemini client"),
            );

            let document_service = Arc::new(DocumentService::new(
                repository.clone(),
                config.local_text_extraction,
            ));
            let translation_service = Arc::new(TranslationService::new(repository.clone()));
            let tts_service = Arc::new(TtsService::new(
                repository.clone(),
                config.tts_cache_enabled,
            ));
            let audiobook_service = AudiobookService::new(
                document_service,
                translation_service,
                tts_service.clone(),
            );

            let output_dir = tempfile::tempdir().expect("Failed to create output dir");

            Self {
                server,
                config,
                repository,
                tts_service,
                audiobook_service,
                output_dir,
            }
        }
    }

    fn teardown(self) -> impl std::future::Future<Output = ()> + Send {
        async {
            // Mock server and output dir are cleaned up on drop
        }
    }
}

impl TestContext {
    /// Requests the mock server received for `model`, in arrival order
    pub async fn requests_for(&self, model: &str) -> Vec<serde_json::Value> {
        let suffix = format!("/models/{}:generateContent", model);
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|request| request.url.path().ends_with(&suffix))
            .map(|request| {
                serde_json::from_slice(&request.body).expect("Request body is not JSON")
            })
            .collect()
    }

    /// Text sent in each speech request, in order
    pub async fn spoken_chunks(&self) -> Vec<String> {
        self.requests_for(&self.config.gemini_tts_model)
            .await
            .iter()
            .map(|body| {
                body["contents"][0]["parts"][0]["text"]
                    .as_str()
                    .unwrap_or_default()
                    .to_string()
            })
            .collect()
    }
}
