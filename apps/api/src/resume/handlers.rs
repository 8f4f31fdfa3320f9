use axum::{extract::Multipart, extract::State, Json};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::resume::parser::{parse_resume, FileType};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UploadResumeResponse {
    pub resume_id: Uuid,
}

/// POST /api/v1/resumes
///
/// Accepts a multipart `file` field (pdf, docx or txt), parses it, and stores
/// the resume. The embedding is left empty — the matching engine computes and
/// caches it on first use, so uploads succeed even while the embedding
/// upstream is down.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResumeResponse>, AppError> {
    let mut upload: Option<(String, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::UnsupportedInput(format!("malformed multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or_default().to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::UnsupportedInput(format!("could not read upload: {e}")))?;
            upload = Some((filename, data));
        }
    }

    let (filename, data) = upload
        .ok_or_else(|| AppError::UnsupportedInput("missing multipart 'file' field".to_string()))?;

    let file_type = FileType::from_filename(&filename)
        .ok_or_else(|| AppError::UnsupportedInput(format!("unsupported file type: {filename}")))?;

    let parsed = parse_resume(&data, file_type).await?;
    let resume = state.resumes.insert(&parsed.text, &parsed.skills).await?;

    info!(
        "Stored resume {} ({} skills, {:?})",
        resume.id,
        parsed.skills.len(),
        parsed.seniority
    );

    Ok(Json(UploadResumeResponse {
        resume_id: resume.id,
    }))
}
