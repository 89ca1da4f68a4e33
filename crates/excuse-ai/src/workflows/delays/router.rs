use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::{DelayId, DelaySubmission};
use super::repository::{DelayRepository, RepositoryError};
use super::service::{DelayReviewError, DelayReviewService};
use super::signal::TextSignalProvider;

/// Router builder exposing HTTP endpoints for excuse intake and assessment
/// lookup.
pub fn delay_router<R, S>(service: Arc<DelayReviewService<R, S>>) -> Router
where
    R: DelayRepository + 'static,
    S: TextSignalProvider + 'static,
{
    Router::new()
        .route("/api/v1/delays", post(submit_handler::<R, S>))
        .route("/api/v1/delays/:delay_id", get(assessment_handler::<R, S>))
        .with_state(service)
}

pub(crate) async fn submit_handler<R, S>(
    State(service): State<Arc<DelayReviewService<R, S>>>,
    axum::Json(submission): axum::Json<DelaySubmission>,
) -> Response
where
    R: DelayRepository + 'static,
    S: TextSignalProvider + 'static,
{
    match service.review(submission) {
        Ok(assessment) => {
            let view = super::repository::AssessmentView::from_assessment(&assessment);
            (StatusCode::CREATED, axum::Json(view)).into_response()
        }
        Err(DelayReviewError::Repository(RepositoryError::Conflict)) => {
            let payload = json!({
                "error": "delay already recorded",
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn assessment_handler<R, S>(
    State(service): State<Arc<DelayReviewService<R, S>>>,
    Path(delay_id): Path<String>,
) -> Response
where
    R: DelayRepository + 'static,
    S: TextSignalProvider + 'static,
{
    let id = DelayId(delay_id);
    match service.get(&id) {
        Ok(record) => {
            let view = record.assessment_view();
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(DelayReviewError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "delay_id": id.0,
                "error": "no assessment recorded for this delay",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
