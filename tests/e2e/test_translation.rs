use crate::e2e::helpers;

use booktape::domain::translation::{TranslationError, TranslationServiceApi, TranslationService};
use helpers::gemini_mocks::{mount_model, ok_json, text_response};
use helpers::TestContext;
use pretty_assertions::assert_eq;
use test_context::test_context;
use wiremock::ResponseTemplate;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_translate_through_gemini(ctx: &TestContext) {
    let model = ctx.config.gemini_text_model.clone();
    mount_model(&ctx.server, &model, ok_json(text_response("  Hola mundo.\n"))).await;
    let service = TranslationService::new(ctx.repository.clone());

    let translated = service
        .translate("Hello world.", "English", "Spanish")
        .await
        .unwrap();

    assert_eq!(translated, "Hola mundo.");
    let requests = ctx.requests_for(&model).await;
    let prompt = requests[0]["contents"][0]["parts"][0]["text"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(prompt.contains("into Spanish"));
    assert!(prompt.ends_with("Hello world."));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_ask_for_informal_hindi(ctx: &TestContext) {
    let model = ctx.config.gemini_text_model.clone();
    mount_model(&ctx.server, &model, ok_json(text_response("नमस्ते दुनिया"))).await;
    let service = TranslationService::new(ctx.repository.clone());

    service
        .translate("Hello world.", "English", "Hindi")
        .await
        .unwrap();

    let requests = ctx.requests_for(&model).await;
    let prompt = requests[0]["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.contains("conversational"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_skip_translation_into_same_language(ctx: &TestContext) {
    let service = TranslationService::new(ctx.repository.clone());

    let translated = service
        .translate("Hello world.", "English", "english")
        .await
        .unwrap();

    assert_eq!(translated, "Hello world.");
    assert!(ctx.server.received_requests().await.unwrap_or_default().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_fail_on_gemini_error(ctx: &TestContext) {
    let model = ctx.config.gemini_text_model.clone();
    mount_model(&ctx.server, &model, ResponseTemplate::new(429).set_body_string("quota")).await;
    let service = TranslationService::new(ctx.repository.clone());

    let err = service
        .translate("Hello world.", "English", "French")
        .await
        .unwrap_err();

    match err {
        TranslationError::Dependency(message) => assert!(message.contains("429")),
        other => panic!("Expected dependency error, got {:?}", other),
    }
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_empty_translation(ctx: &TestContext) {
    let model = ctx.config.gemini_text_model.clone();
    mount_model(&ctx.server, &model, ok_json(text_response("   "))).await;
    let service = TranslationService::new(ctx.repository.clone());

    let err = service
        .translate("Hello world.", "English", "French")
        .await
        .unwrap_err();

    assert!(matches!(err, TranslationError::EmptyTranslation));
}
