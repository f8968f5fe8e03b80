use std::io::Write;
use std::path::Path;

use anyhow::Context;
use axum::{
    body::Bytes,
    extract::{
        multipart::MultipartRejection,
        rejection::JsonRejection,
        Multipart, State,
    },
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::analysis::{AnalysisReport, AnalysisResult};
use crate::state::AppState;

/// Multipart field carrying the résumé file.
const FILE_FIELD: &str = "file";

#[derive(Debug, Deserialize)]
pub struct AnalyzeTextRequest {
    pub raw_text: String,
}

/// POST /api/v1/analyze
pub async fn handle_analyze_upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<AnalysisReport, AppError> {
    let mut multipart = multipart?;
    let (file_name, data) = read_file_field(&mut multipart).await?;
    let analysis_id = Uuid::new_v4();
    info!(%analysis_id, file_name = %file_name, bytes = data.len(), "Analyzing uploaded résumé");

    // Extension decides the reader, so the temp file keeps it.
    let suffix = Path::new(&file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default();

    let analyzer = state.analyzer.clone();
    let extractor = state.extractor.clone();
    let result = tokio::task::spawn_blocking(move || -> Result<AnalysisResult, AppError> {
        let mut upload = tempfile::Builder::new()
            .prefix("screener-")
            .suffix(&suffix)
            .tempfile()
            .context("Failed to create temp file for upload")?;
        upload
            .write_all(&data)
            .context("Failed to write upload to temp file")?;
        Ok(analyzer.analyze_file(upload.path(), extractor.as_ref())?)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in analysis: {e}")))??;

    info!(
        %analysis_id,
        level = ?result.ai_analysis.experience.level,
        "Analysis complete"
    );
    Ok(result.into())
}

/// POST /api/v1/analyze/text
pub async fn handle_analyze_text(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeTextRequest>, JsonRejection>,
) -> Result<AnalysisReport, AppError> {
    let Json(req) = payload?;
    let analysis_id = Uuid::new_v4();
    info!(%analysis_id, chars = req.raw_text.len(), "Analyzing pasted résumé text");

    let analyzer = state.analyzer.clone();
    let result = tokio::task::spawn_blocking(move || analyzer.analyze_text(Some(&req.raw_text)))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in analysis: {e}")))??;

    info!(
        %analysis_id,
        level = ?result.ai_analysis.experience.level,
        "Analysis complete"
    );
    Ok(result.into())
}

/// Returns the first `file` field's name and contents. Other fields are skipped.
async fn read_file_field(multipart: &mut Multipart) -> Result<(String, Bytes), AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let data = field.bytes().await?;
        return Ok((file_name, data));
    }
    Err(AppError::Validation(format!(
        "Missing multipart field '{FILE_FIELD}'"
    )))
}
