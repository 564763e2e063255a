use axum::extract::State;
use axum::response::Html;
use axum::Form;
use hunter_common::error::HunterError;
use hunter_detector::CsvTable;

use crate::error::ApiError;
use crate::extractors::CsvUpload;
use crate::view::{self, ScanView};
use crate::AppState;

use super::requests::{ManualScanRequest, UrlScanRequest};

pub async fn index() -> Html<String> {
    view::render(&ScanView::Empty)
}

pub async fn scan_manual(
    State(state): State<AppState>,
    Form(form): Form<ManualScanRequest>,
) -> Result<Html<String>, ApiError> {
    let vector = form.to_vector().inspect_err(|e| {
        tracing::warn!(error = %e, "manual scan rejected");
    })?;

    let result = state.scanner.scan_manual(vector)?;
    tracing::info!(
        model = state.scanner.model_name(),
        action = result.action.as_str(),
        probability = result.probability,
        "manual scan complete"
    );

    Ok(view::render(&ScanView::Manual(result)))
}

pub async fn scan_file(
    State(state): State<AppState>,
    upload: CsvUpload,
) -> Result<Html<String>, ApiError> {
    let table = CsvTable::from_bytes(&upload.bytes).inspect_err(|e| {
        tracing::warn!(file = ?upload.file_name, error = %e, "uploaded CSV rejected");
    })?;

    let summary = state.scanner.scan_table(&table)?;
    tracing::info!(
        file = ?upload.file_name,
        bytes = upload.bytes.len(),
        rows = summary.rows,
        action = summary.first_action.as_str(),
        probability = summary.first_prob,
        "file scan complete"
    );

    Ok(view::render(&ScanView::File {
        file_name: upload.file_name,
        summary,
    }))
}

pub async fn scan_url(
    State(state): State<AppState>,
    Form(form): Form<UrlScanRequest>,
) -> Result<Html<String>, ApiError> {
    let url = form.url.trim().to_owned();
    if url.is_empty() {
        return Err(HunterError::Validation("field url is required".to_string()).into());
    }

    // Fetch and parse failures share one generic message; detail stays in the log.
    let body = state.fetcher.fetch(&url).await.map_err(|e| {
        tracing::warn!(%url, error = %e, "csv fetch failed");
        HunterError::UnreachableSource
    })?;
    let table = CsvTable::from_bytes(&body).map_err(|e| {
        tracing::warn!(%url, error = %e, "fetched body is not CSV");
        HunterError::UnreachableSource
    })?;

    let summary = state.scanner.scan_table(&table)?;
    tracing::info!(
        %url,
        rows = summary.rows,
        action = summary.first_action.as_str(),
        probability = summary.first_prob,
        "url scan complete"
    );

    Ok(view::render(&ScanView::Url { url, summary }))
}
