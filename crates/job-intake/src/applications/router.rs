use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use serde_json::json;
use tokio::task;

use super::boundary::{ErrorBoundary, Rendered};
use super::schema::{FieldKind, FIELDS};
use super::service::{ApplicationIntakeService, IntakeError};
use super::storage::BlobStorage;
use super::store::DEFAULT_EXPORT_FILE;
use super::validation::ApplicationDraft;
use super::views::{list_heading, SubmissionCard};

#[derive(Debug, Serialize)]
pub(crate) struct SubmissionListView {
    pub(crate) heading: &'static str,
    pub(crate) total: usize,
    pub(crate) submissions: Vec<SubmissionCard>,
}

#[derive(Debug, Serialize)]
pub(crate) struct FieldDescriptorView {
    pub(crate) key: &'static str,
    pub(crate) kind: FieldKind,
    pub(crate) label: &'static str,
}

/// Router builder exposing the intake form and submission list over HTTP.
pub fn application_router<S>(service: Arc<ApplicationIntakeService<S>>) -> Router
where
    S: BlobStorage + 'static,
{
    Router::new()
        .route(
            "/api/v1/applications",
            post(submit_handler::<S>)
                .get(list_handler::<S>)
                .delete(clear_handler::<S>),
        )
        .route("/api/v1/applications/export", get(export_handler::<S>))
        .route("/api/v1/applications/reset", post(reset_handler::<S>))
        .route("/api/v1/applications/fields", get(fields_handler::<S>))
        .with_state(service)
}

pub(crate) async fn submit_handler<S>(
    State(service): State<Arc<ApplicationIntakeService<S>>>,
    axum::Json(draft): axum::Json<ApplicationDraft>,
) -> Response
where
    S: BlobStorage + 'static,
{
    match task::spawn_blocking(move || service.submit(&draft)).await {
        Ok(Ok(record)) => (StatusCode::CREATED, axum::Json(record)).into_response(),
        Ok(Err(IntakeError::Validation(errors))) => {
            let payload = json!({ "errors": errors });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Ok(Err(other)) => internal_error(other),
        Err(err) => task_failed(err),
    }
}

pub(crate) async fn list_handler<S>(
    State(service): State<Arc<ApplicationIntakeService<S>>>,
) -> Response
where
    S: BlobStorage + 'static,
{
    let locale = service.locale();
    let rendered = task::spawn_blocking(move || {
        ErrorBoundary::new(locale).render(|| {
            let submissions = service.cards()?;
            Ok(SubmissionListView {
                heading: list_heading(locale),
                total: submissions.len(),
                submissions,
            })
        })
    })
    .await;

    match rendered {
        Ok(Rendered::View(view)) => (StatusCode::OK, axum::Json(view)).into_response(),
        Ok(Rendered::Fallback(notice)) => {
            let payload = json!({ "fault": notice });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
        Err(err) => task_failed(err),
    }
}

pub(crate) async fn export_handler<S>(
    State(service): State<Arc<ApplicationIntakeService<S>>>,
) -> Response
where
    S: BlobStorage + 'static,
{
    match service.export() {
        Ok(blob) => {
            let disposition = format!("attachment; filename=\"{DEFAULT_EXPORT_FILE}\"");
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, mime::APPLICATION_JSON.to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                blob,
            )
                .into_response()
        }
        Err(err) => internal_error(err),
    }
}

pub(crate) async fn clear_handler<S>(
    State(service): State<Arc<ApplicationIntakeService<S>>>,
) -> Response
where
    S: BlobStorage + 'static,
{
    match task::spawn_blocking(move || service.clear()).await {
        Ok(Ok(())) => StatusCode::NO_CONTENT.into_response(),
        Ok(Err(err)) => internal_error(err),
        Err(err) => task_failed(err),
    }
}

pub(crate) async fn reset_handler<S>(
    State(service): State<Arc<ApplicationIntakeService<S>>>,
) -> Response
where
    S: BlobStorage + 'static,
{
    match task::spawn_blocking(move || service.reset()).await {
        Ok(Ok(records)) => {
            let payload = json!({ "status": "reset", "total": records.len() });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Ok(Err(err)) => internal_error(err),
        Err(err) => task_failed(err),
    }
}

pub(crate) async fn fields_handler<S>(
    State(service): State<Arc<ApplicationIntakeService<S>>>,
) -> Response
where
    S: BlobStorage + 'static,
{
    let locale = service.locale();
    let fields: Vec<FieldDescriptorView> = FIELDS
        .iter()
        .map(|descriptor| FieldDescriptorView {
            key: descriptor.field.key(),
            kind: descriptor.kind,
            label: descriptor.label(locale),
        })
        .collect();
    (StatusCode::OK, axum::Json(fields)).into_response()
}

fn internal_error(err: IntakeError) -> Response {
    tracing::error!(error = %err, "intake request failed");
    let payload = json!({ "error": err.to_string() });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}

fn task_failed(err: task::JoinError) -> Response {
    tracing::error!(error = %err, "blocking storage task failed");
    let payload = json!({ "error": "storage task failed" });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}
