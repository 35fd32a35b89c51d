//! HTTP surface of the export service.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use statx_core::ExportPipeline;
use statx_model::{ErrorResponse, ExportError, ExportRequest, ExportResponse, ResourceKind};
use statx_output::{ArtifactStore, XLSX_CONTENT_TYPE, download_filename};

use crate::config::Settings;

const FILE_NOT_FOUND: &str = "File not found.";

/// Shared state of all handlers.
#[derive(Clone)]
pub struct AppState {
    pipeline: Arc<ExportPipeline>,
}

impl AppState {
    pub fn new(settings: &Settings) -> Self {
        Self {
            pipeline: Arc::new(ExportPipeline::new(
                &settings.data_dir,
                &settings.temp_dir,
            )),
        }
    }

    fn store(&self) -> &ArtifactStore {
        self.pipeline.store()
    }
}

/// Build the service router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/export/excel", post(export_excel))
        .route("/api/downloads/{file_id}", get(download))
        .route("/api/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(settings: &Settings, addr: SocketAddr) -> Result<()> {
    let app = router(AppState::new(settings));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind {addr}"))?;
    info!(
        %addr,
        data_dir = %settings.data_dir.display(),
        temp_dir = %settings.temp_dir.display(),
        "export service listening"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serve HTTP")?;
    info!("export service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
    }
}

/// A failed request: status plus `{"detail": ...}` body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }
}

impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        let status = StatusCode::from_u16(err.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let detail = match err {
            ExportError::NotFound {
                kind: ResourceKind::Artifact,
                ..
            } => FILE_NOT_FOUND.to_string(),
            ExportError::Processing(cause) => format!("Processing error: {cause}"),
            other => other.to_string(),
        };
        Self::new(status, detail)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse::new(self.detail))).into_response()
    }
}

async fn export_excel(
    State(state): State<AppState>,
    payload: Result<Json<ExportRequest>, JsonRejection>,
) -> Result<Json<ExportResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        ApiError::new(StatusCode::BAD_REQUEST, rejection.body_text())
    })?;
    let pipeline = Arc::clone(&state.pipeline);
    let outcome = tokio::task::spawn_blocking(move || pipeline.run(&request))
        .await
        .map_err(|err| {
            error!(error = %err, "export task panicked");
            ApiError::from(ExportError::Processing(err.to_string()))
        })??;
    Ok(Json(ExportResponse::success(outcome.artifact.id)))
}

async fn download(
    State(state): State<AppState>,
    Path(file_id): Path<String>,
) -> Result<Response, ApiError> {
    let path = state
        .store()
        .retrieve(&file_id)
        .map_err(ExportError::from)?;
    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(ExportError::artifact_not_found(file_id).into());
        }
        Err(err) => {
            return Err(ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Processing error: {err}"),
            ));
        }
    };
    let disposition = format!("attachment; filename=\"{}\"", download_filename());
    let disposition = HeaderValue::from_str(&disposition).map_err(|err| {
        ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Processing error: {err}"),
        )
    })?;
    info!(file_id = %file_id, bytes = bytes.len(), "artifact downloaded");
    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(XLSX_CONTENT_TYPE)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn processing_errors_get_prefixed_detail() {
        let api = ApiError::from(ExportError::Processing("boom".to_string()));
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.detail, "Processing error: boom");
    }

    #[test]
    fn missing_artifact_reads_file_not_found() {
        let store = ArtifactStore::new("/nonexistent/statx-exports");
        let err = store
            .retrieve("0b7c6f4e-2a4d-4f55-9a4e-8a3c9f1d2e10")
            .map_err(ExportError::from)
            .unwrap_err();
        assert!(matches!(
            err,
            ExportError::NotFound {
                kind: ResourceKind::Artifact,
                ..
            }
        ));
        let api = ApiError::from(err);
        assert_eq!(api.status, StatusCode::NOT_FOUND);
        assert_eq!(api.detail, FILE_NOT_FOUND);
    }

    #[test]
    fn client_faults_keep_their_status() {
        let api = ApiError::from(ExportError::dataset_not_found("A.parquet"));
        assert_eq!(api.status, StatusCode::NOT_FOUND);
        assert_eq!(ApiError::from(ExportError::NoData).status, StatusCode::BAD_REQUEST);
    }
}
