//! HTTP routes.
//!
//! `/` shows the question form on GET and generates a paper on POST.

use std::sync::Arc;

use axum::{
    Form, Json, Router,
    extract::State,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::Instrument;

use super::pages;
use crate::composer::PaperComposer;
use crate::error::AppError;
use crate::models::Question;

/// Shared state for HTTP handlers.
pub struct AppState {
    pub composer: PaperComposer,
    /// Show error details on error pages.
    pub debug: bool,
}

/// Form body of a submission.
#[derive(Debug, Deserialize)]
pub struct SubmissionForm {
    #[serde(default)]
    pub question: Option<String>,
}

/// Create the HTTP router.
pub fn create_router(composer: PaperComposer, debug: bool) -> Router {
    let state = Arc::new(AppState { composer, debug });

    Router::new()
        .route("/", get(show_form).post(process_submission))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn show_form() -> Html<String> {
    Html(pages::render_form(None))
}

async fn process_submission(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SubmissionForm>,
) -> Response {
    let question = match Question::parse(form.question) {
        Ok(q) => q,
        Err(e) => return error_response(&e, state.debug),
    };

    let request_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("submission", %request_id);

    async move {
        tracing::info!(question_chars = question.as_str().len(), "Generating paper");

        match state.composer.compose(question).await {
            Ok(page) => Html(pages::render_result(&page)).into_response(),
            Err(e) => error_response(&e, state.debug),
        }
    }
    .instrument(span)
    .await
}

fn error_response(error: &AppError, debug: bool) -> Response {
    let status = error.status_code();

    let html = match error {
        AppError::EmptyQuestion => {
            tracing::debug!("Rejected empty question");
            pages::render_form(Some(&error.to_user_message()))
        }
        AppError::Generation { .. } => {
            tracing::error!(error = %error_chain(error), "Paper generation failed");
            let detail = debug.then(|| error_chain(error));
            pages::render_error(&error.to_user_message(), detail.as_deref())
        }
    };

    (status, Html(html)).into_response()
}

fn error_chain(error: &dyn std::error::Error) -> String {
    let mut chain = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        chain.push_str(&format!("\ncaused by: {cause}"));
        source = cause.source();
    }
    chain
}
