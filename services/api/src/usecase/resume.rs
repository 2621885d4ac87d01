use chrono::{DateTime, Utc};
use uuid::Uuid;

use linx_auth_types::identity::Identity;
use linx_domain::user::Role;

use crate::domain::repository::{ResumeStore, UserRepository};
use crate::error::ApiError;

/// Map an upload content type to the stored extension. Only the three
/// supported document types are accepted.
pub fn extension_for_content_type(content_type: &str) -> Option<&'static str> {
    match content_type {
        "application/pdf" => Some("pdf"),
        "application/msword" => Some("doc"),
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => Some("docx"),
        _ => None,
    }
}

/// Inverse of [`extension_for_content_type`], for the download response.
pub fn content_type_for_extension(extension: &str) -> Option<&'static str> {
    match extension {
        "pdf" => Some("application/pdf"),
        "doc" => Some("application/msword"),
        "docx" => {
            Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document")
        }
        _ => None,
    }
}

// ── UploadResume ─────────────────────────────────────────────────────────────

pub struct UploadResumeInput {
    pub original_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

#[derive(Debug)]
pub struct UploadResumeOutput {
    pub filename: String,
    pub original_name: String,
    pub uploaded_at: DateTime<Utc>,
}

pub struct UploadResumeUseCase<U: UserRepository, S: ResumeStore> {
    pub users: U,
    pub store: S,
}

impl<U: UserRepository, S: ResumeStore> UploadResumeUseCase<U, S> {
    pub async fn execute(
        &self,
        identity: Identity,
        target_id: Uuid,
        input: UploadResumeInput,
    ) -> Result<UploadResumeOutput, ApiError> {
        if !identity.can_manage(target_id) {
            return Err(ApiError::Forbidden);
        }
        let user = self
            .users
            .find_by_id(target_id)
            .await?
            .ok_or(ApiError::UserNotFound)?;
        if input.data.is_empty() {
            return Err(ApiError::Validation("resume file is empty".into()));
        }
        let extension = extension_for_content_type(&input.content_type).ok_or_else(|| {
            ApiError::Validation(format!(
                "unsupported resume content type: {}",
                input.content_type
            ))
        })?;

        // Write the file first; the user record's resume pointer moves only
        // after the filesystem write succeeds.
        self.store.save(target_id, extension, &input.data).await?;

        // One file per user: a prior upload under a different extension is
        // now stale and gets removed. The extension is persisted below, so
        // download never probes the filesystem.
        if let Some(old_ext) = user
            .resume_filename
            .as_deref()
            .and_then(|f| f.rsplit_once('.').map(|(_, ext)| ext.to_owned()))
            .filter(|old| old != extension)
        {
            if let Err(e) = self.store.remove(target_id, &old_ext).await {
                tracing::warn!(user_id = %target_id, error = %e, "failed to remove stale resume file");
            }
        }

        let filename = format!("{target_id}.{extension}");
        let uploaded_at = Utc::now();
        self.users
            .set_resume(target_id, &filename, &input.original_name, uploaded_at)
            .await?;

        Ok(UploadResumeOutput {
            filename,
            original_name: input.original_name,
            uploaded_at,
        })
    }
}

// ── DownloadResume ───────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct DownloadResumeOutput {
    pub data: Vec<u8>,
    pub original_name: String,
    pub content_type: &'static str,
}

pub struct DownloadResumeUseCase<U: UserRepository, S: ResumeStore> {
    pub users: U,
    pub store: S,
}

impl<U: UserRepository, S: ResumeStore> DownloadResumeUseCase<U, S> {
    pub async fn execute(
        &self,
        identity: Identity,
        target_id: Uuid,
    ) -> Result<DownloadResumeOutput, ApiError> {
        // The owner may fetch their own resume; otherwise only employer and
        // dev roles may read candidates' files.
        if identity.user_id != target_id && identity.role < Role::Employer {
            return Err(ApiError::Forbidden);
        }
        let user = self
            .users
            .find_by_id(target_id)
            .await?
            .ok_or(ApiError::UserNotFound)?;
        // Both halves of the resume reference must exist — a dangling
        // filename without metadata is not a resume.
        let (Some(filename), Some(original_name)) =
            (user.resume_filename, user.resume_original_name)
        else {
            return Err(ApiError::ResumeNotFound);
        };

        let extension = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .ok_or(ApiError::ResumeNotFound)?;
        let content_type =
            content_type_for_extension(extension).ok_or(ApiError::ResumeNotFound)?;

        let data = self
            .store
            .load(target_id, extension)
            .await?
            .ok_or(ApiError::ResumeNotFound)?;

        Ok(DownloadResumeOutput {
            data,
            original_name,
            content_type,
        })
    }
}
