//! End-to-end tests of the HTTP routes with stubbed backends.
//!
//! Drives the axum `Router` directly with `tower::ServiceExt::oneshot`.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use paper_synth::client::ReferenceSource;
use paper_synth::composer::PaperComposer;
use paper_synth::error::{GenerationError, GenerationResult};
use paper_synth::generator::TextGenerator;
use paper_synth::models::Reference;
use paper_synth::server::routes::create_router;

/// Returns the same text for every prompt.
struct StubGenerator {
    text: &'static str,
    calls: AtomicUsize,
}

impl StubGenerator {
    fn new(text: &'static str) -> Arc<Self> {
        Arc::new(Self { text, calls: AtomicUsize::new(0) })
    }
}

#[async_trait::async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(&self, _prompt: &str, _max_length: u32) -> GenerationResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.text.to_string())
    }
}

/// Always fails, as an unreachable backend would.
struct FailingGenerator;

#[async_trait::async_trait]
impl TextGenerator for FailingGenerator {
    async fn generate(&self, _prompt: &str, _max_length: u32) -> GenerationResult<String> {
        Err(GenerationError::status(503, "model overloaded"))
    }
}

/// Returns a fixed list of references.
struct StubReferences {
    references: Vec<Reference>,
    calls: AtomicUsize,
}

impl StubReferences {
    fn new(references: Vec<Reference>) -> Arc<Self> {
        Arc::new(Self { references, calls: AtomicUsize::new(0) })
    }
}

#[async_trait::async_trait]
impl ReferenceSource for StubReferences {
    async fn fetch_references(&self, _query: &str, rows: usize) -> Vec<Reference> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.references.iter().take(rows).cloned().collect()
    }
}

fn reference(title: &str, author: &str, year: i32) -> Reference {
    Reference {
        title: title.to_string(),
        author: author.to_string(),
        year: Some(year),
        journal: "Physical Review".to_string(),
        link: format!("https://doi.org/10.1103/{}", title.to_lowercase().replace(' ', "-")),
    }
}

fn three_references() -> Vec<Reference> {
    vec![
        reference("Alpha entanglement", "Einstein, Podolsky, Rosen", 1935),
        reference("Beta inequality", "Bell", 1964),
        reference("Gamma teleportation", "Bennett", 1993),
    ]
}

fn router(generator: Arc<dyn TextGenerator>, references: Arc<dyn ReferenceSource>) -> axum::Router {
    create_router(PaperComposer::new(generator, references), false)
}

fn post_question(question: &str) -> Request<Body> {
    let body = serde_urlencoded::to_string([("question", question)]).unwrap();
    Request::post("/")
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

// =============================================================================
// Show Form
// =============================================================================

#[tokio::test]
async fn test_get_root_shows_form_only() {
    let generator = StubGenerator::new("STUB");
    let references = StubReferences::new(three_references());
    let app = router(generator.clone(), references.clone());

    let response = app.oneshot(Request::get("/").body(Body::empty()).unwrap()).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("<form"));
    assert!(html.contains(r#"name="question""#));
    assert!(!html.contains("STUB"));
    assert!(!html.contains("<section"));
    assert!(!html.contains(r#"class="reference""#));
    assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    assert_eq!(references.calls.load(Ordering::SeqCst), 0);
}

// =============================================================================
// Process Submission
// =============================================================================

#[tokio::test]
async fn test_post_renders_seven_sections_and_references_in_order() {
    let generator = StubGenerator::new("STUB");
    let references = StubReferences::new(three_references());
    let app = router(generator.clone(), references.clone());

    let response = app.oneshot(post_question("quantum entanglement")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;

    assert_eq!(html.matches("STUB").count(), 7);
    assert_eq!(html.matches(r#"<li class="reference">"#).count(), 3);

    let alpha = html.find("Alpha entanglement").unwrap();
    let beta = html.find("Beta inequality").unwrap();
    let gamma = html.find("Gamma teleportation").unwrap();
    assert!(alpha < beta && beta < gamma);

    assert!(html.contains("quantum entanglement"));
    for label in [
        "Abstract",
        "Introduction",
        "Theoretical background",
        "Development",
        "Tests",
        "Answer to the research question",
        "Conclusions",
    ] {
        assert!(html.contains(&format!("<h2>{label}</h2>")), "missing section {label}");
    }

    assert_eq!(generator.calls.load(Ordering::SeqCst), 7);
    assert_eq!(references.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_post_is_deterministic_with_stubs() {
    let app = router(StubGenerator::new("STUB"), StubReferences::new(three_references()));

    let first = body_string(app.clone().oneshot(post_question("same question")).await.unwrap()).await;
    let second = body_string(app.oneshot(post_question("same question")).await.unwrap()).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_post_without_references_still_renders() {
    let app = router(StubGenerator::new("STUB"), StubReferences::new(vec![]));

    let response = app.oneshot(post_question("obscure topic")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert_eq!(html.matches("STUB").count(), 7);
    assert!(html.contains("No references found."));
}

#[tokio::test]
async fn test_post_escapes_generated_text() {
    let app = router(
        StubGenerator::new("<script>alert(1)</script>"),
        StubReferences::new(vec![]),
    );

    let html = body_string(app.oneshot(post_question("<b>bold</b>")).await.unwrap()).await;

    assert!(!html.contains("<script>"));
    assert!(!html.contains("<b>bold</b>"));
    assert!(html.contains("&lt;script&gt;"));
}

// =============================================================================
// Empty question and failures
// =============================================================================

#[tokio::test]
async fn test_post_empty_question_returns_form_with_message() {
    let generator = StubGenerator::new("STUB");
    let references = StubReferences::new(three_references());
    let app = router(generator.clone(), references.clone());

    let response = app.oneshot(post_question("")).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = body_string(response).await;
    assert!(html.contains("<form"));
    assert!(html.contains("Please enter a research question."));
    assert!(!html.contains("STUB"));
    assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    assert_eq!(references.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_post_missing_question_field_returns_form_with_message() {
    let app = router(StubGenerator::new("STUB"), StubReferences::new(vec![]));

    let request = Request::post("/")
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(Body::from("other=1"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_string(response).await.contains("Please enter a research question."));
}

#[tokio::test]
async fn test_generation_failure_returns_bad_gateway() {
    let references = StubReferences::new(three_references());
    let app = router(Arc::new(FailingGenerator), references.clone());

    let response = app.oneshot(post_question("anything")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let html = body_string(response).await;
    assert!(html.contains("could not produce the paper"));
    // Details are hidden outside debug mode.
    assert!(!html.contains("model overloaded"));
    assert_eq!(references.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_generation_failure_shows_detail_in_debug_mode() {
    let composer = PaperComposer::new(Arc::new(FailingGenerator), StubReferences::new(vec![]));
    let app = create_router(composer, true);

    let response = app.oneshot(post_question("anything")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let html = body_string(response).await;
    assert!(html.contains("model overloaded"));
    assert!(html.contains("Abstract"));
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_check() {
    let app = router(StubGenerator::new("STUB"), StubReferences::new(vec![]));

    let response =
        app.oneshot(Request::get("/health").body(Body::empty()).unwrap()).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "paper-synth");
}
