use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use uuid::Uuid;

use linx_auth_types::identity::Identity;

use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::resume::{
    DownloadResumeUseCase, UploadResumeInput, UploadResumeUseCase, content_type_for_extension,
};

// ── POST /api/users/{id}/resume ──────────────────────────────────────────────

#[derive(Serialize)]
pub struct UploadResumeResponse {
    pub message: String,
    pub filename: String,
    pub original_name: String,
    #[serde(serialize_with = "linx_core::serde::to_rfc3339_ms")]
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
}

/// Multipart upload: the first file field (conventionally named `resume`)
/// is taken; one file per user.
pub async fn upload_resume(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResumeResponse>), ApiError> {
    let mut upload: Option<UploadResumeInput> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::Validation("malformed multipart body".into()))?
    {
        let Some(original_name) = field.file_name().map(str::to_owned) else {
            continue;
        };
        // Content type is authoritative for the stored extension; fall back
        // to the client filename's extension when the part omits it.
        let content_type = field
            .content_type()
            .map(str::to_owned)
            .or_else(|| {
                original_name
                    .rsplit_once('.')
                    .and_then(|(_, ext)| content_type_for_extension(&ext.to_ascii_lowercase()))
                    .map(str::to_owned)
            })
            .ok_or_else(|| ApiError::Validation("missing resume content type".into()))?;
        let data = field
            .bytes()
            .await
            .map_err(|_| ApiError::Validation("malformed multipart body".into()))?;
        upload = Some(UploadResumeInput {
            original_name,
            content_type,
            data: data.to_vec(),
        });
        break;
    }
    let input = upload.ok_or_else(|| ApiError::Validation("resume file is required".into()))?;

    let usecase = UploadResumeUseCase {
        users: state.user_repo(),
        store: state.resume_store(),
    };
    let out = usecase.execute(identity, id, input).await?;
    tracing::info!(user_id = %id, filename = %out.filename, "resume uploaded");
    Ok((
        StatusCode::CREATED,
        Json(UploadResumeResponse {
            message: "resume uploaded".into(),
            filename: out.filename,
            original_name: out.original_name,
            uploaded_at: out.uploaded_at,
        }),
    ))
}

// ── GET /api/users/{id}/resume ───────────────────────────────────────────────

pub async fn download_resume(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let usecase = DownloadResumeUseCase {
        users: state.user_repo(),
        store: state.resume_store(),
    };
    let out = usecase.execute(identity, id).await?;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        out.original_name.replace('"', "")
    );
    Ok((
        [
            (header::CONTENT_TYPE, out.content_type.to_owned()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        out.data,
    )
        .into_response())
}
