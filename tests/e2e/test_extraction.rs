use crate::e2e::helpers;

use booktape::domain::audio::bytes_to_base64;
use booktape::domain::audiobook::{Session, SessionState};
use booktape::domain::document::ExtractionError;
use booktape::error::AppError;
use helpers::fixtures::{pdf_file, text_file};
use helpers::gemini_mocks::{extraction_response, mount_model, ok_json, text_response};
use helpers::TestContext;
use pretty_assertions::assert_eq;
use test_context::test_context;
use wiremock::ResponseTemplate;

const ENGLISH_PARAGRAPH: &str = "The quick brown fox jumps over the lazy dog while the children \
watch from the garden and the sun slowly sets behind the old house.";

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_extract_pdf_through_gemini(ctx: &TestContext) {
    let model = ctx.config.gemini_text_model.clone();
    mount_model(
        &ctx.server,
        &model,
        ok_json(extraction_response("  Quarterly report.\nRevenue grew.  ", "English")),
    )
    .await;
    let file = pdf_file();
    let mut session = Session::new();

    let document = ctx.audiobook_service.extract(&mut session, &file).await.unwrap();

    assert_eq!(document.text, "Quarterly report.\nRevenue grew.");
    assert_eq!(document.detected_language, "English");
    assert_eq!(session.state(), &SessionState::Review);

    let requests = ctx.requests_for(&model).await;
    assert_eq!(requests.len(), 1);
    let parts = &requests[0]["contents"][0]["parts"];
    assert_eq!(parts[0]["inlineData"]["mimeType"], "application/pdf");
    assert_eq!(parts[0]["inlineData"]["data"], bytes_to_base64(&file.bytes));
    assert_eq!(
        requests[0]["generationConfig"]["responseMimeType"],
        "application/json"
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_clean_text_files_locally(ctx: &TestContext) {
    let contents = format!("Visit https://example.com today.\n\n\n{}", ENGLISH_PARAGRAPH);
    let mut session = Session::new();

    let document = ctx
        .audiobook_service
        .extract(&mut session, &text_file("notes.txt", &contents))
        .await
        .unwrap();

    assert_eq!(document.text, format!("Visit today.\n{}", ENGLISH_PARAGRAPH));
    assert_eq!(document.detected_language, "English");
    assert!(ctx.server.received_requests().await.unwrap_or_default().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_strip_html_markup_locally(ctx: &TestContext) {
    let html = format!(
        "<html><body><h1>Chapter</h1><p>{}</p></body></html>",
        ENGLISH_PARAGRAPH
    );
    let mut session = Session::new();

    let document = ctx
        .audiobook_service
        .extract(&mut session, &text_file("chapter.html", &html))
        .await
        .unwrap();

    assert!(!document.text.contains('<'));
    assert!(document.text.contains("quick brown fox"));
    assert!(ctx.server.received_requests().await.unwrap_or_default().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_detect_language_when_gemini_omits_it(ctx: &TestContext) {
    let model = ctx.config.gemini_text_model.clone();
    mount_model(&ctx.server, &model, ok_json(extraction_response(ENGLISH_PARAGRAPH, ""))).await;
    let mut session = Session::new();

    let document = ctx
        .audiobook_service
        .extract(&mut session, &pdf_file())
        .await
        .unwrap();

    assert_eq!(document.detected_language, "English");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_documents_without_text(ctx: &TestContext) {
    let model = ctx.config.gemini_text_model.clone();
    mount_model(&ctx.server, &model, ok_json(extraction_response("   ", "English"))).await;
    let mut session = Session::new();

    let err = ctx
        .audiobook_service
        .extract(&mut session, &pdf_file())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Extraction(ExtractionError::EmptyDocument)));
    assert_eq!(
        session.state(),
        &SessionState::Failed("The document does not contain any readable text.".to_string())
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_fail_on_malformed_extraction_json(ctx: &TestContext) {
    let model = ctx.config.gemini_text_model.clone();
    mount_model(&ctx.server, &model, ok_json(text_response("not json at all"))).await;
    let mut session = Session::new();

    let err = ctx
        .audiobook_service
        .extract(&mut session, &pdf_file())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Extraction(ExtractionError::Dependency(_))));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_surface_gemini_errors_as_extraction_failure(ctx: &TestContext) {
    let model = ctx.config.gemini_text_model.clone();
    mount_model(
        &ctx.server,
        &model,
        ResponseTemplate::new(503).set_body_string("overloaded"),
    )
    .await;
    let mut session = Session::new();

    let err = ctx
        .audiobook_service
        .extract(&mut session, &pdf_file())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Extraction(_)));
    assert_eq!(err.exit_code(), 3);
    assert_eq!(
        session.state(),
        &SessionState::Failed("Failed to extract text from the document.".to_string())
    );
}
