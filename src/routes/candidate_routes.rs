use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    dto::candidate_dto::{CandidatePatch, NewCandidate},
    error::{Error, Result},
    models::cv_upload::CvUpload,
    services::extraction_service,
    utils::validation::validate,
    AppState,
};

#[axum::debug_handler]
pub async fn upload_cv(mut multipart: Multipart) -> Result<impl IntoResponse> {
    let mut upload = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::error!("Failed to get next field: {}", e);
        Error::BadRequest(e.to_string())
    })? {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await.map_err(|e| {
            tracing::error!("Failed to read CV bytes: {}", e);
            Error::BadRequest("Failed to read file upload".into())
        })?;
        upload = Some(CvUpload::new(file_name, content_type, data));
    }

    let upload = match upload {
        Some(u) if !u.file_name.is_empty() && !u.bytes.is_empty() => u,
        _ => return Err(Error::BadRequest("No file provided".into())),
    };

    tracing::info!(file = %upload.file_name, size = upload.bytes.len(), "Parsing uploaded CV");
    let mut fields = extraction_service::extract(&upload);
    if let Ok(text) = upload.read_text() {
        extraction_service::enrich_from_text(&text, &mut fields);
    }

    Ok(Json(fields))
}

#[axum::debug_handler]
pub async fn create_candidate(
    State(state): State<AppState>,
    Json(payload): Json<NewCandidate>,
) -> Result<impl IntoResponse> {
    validate(&payload)?;
    let candidate = state.registry_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(candidate)))
}

#[axum::debug_handler]
pub async fn list_candidates(State(state): State<AppState>) -> Result<impl IntoResponse> {
    Ok(Json(state.registry_service.list().await))
}

#[axum::debug_handler]
pub async fn get_candidate(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let candidate = state.registry_service.get(&id).await?;
    Ok(Json(candidate))
}

#[axum::debug_handler]
pub async fn update_candidate(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<CandidatePatch>,
) -> Result<impl IntoResponse> {
    validate(&patch)?;
    let candidate = state.registry_service.update(&id, patch).await?;
    Ok(Json(candidate))
}
