use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use linx_auth_types::identity::Identity;
use linx_domain::pagination::PageRequest;
use linx_domain::user::{AccountStatus, Role};

use crate::domain::types::{User, UserProfilePatch};
use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::user::{
    DeleteUserUseCase, GetUserUseCase, ListCandidatesUseCase, UpdateUserUseCase,
};

/// Full user representation returned to the account owner (and dev).
/// There is no password field here by construction.
#[derive(Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub status: AccountStatus,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub skills: Option<String>,
    pub experience: Option<String>,
    pub education: Option<String>,
    pub resume: Option<ResumeInfoResponse>,
    pub has_resume: bool,
    pub version: i32,
    #[serde(serialize_with = "linx_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "linx_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Serialize)]
pub struct ResumeInfoResponse {
    pub filename: String,
    pub original_name: String,
    #[serde(serialize_with = "linx_core::serde::to_rfc3339_ms_opt")]
    pub uploaded_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let has_resume = user.has_resume();
        let resume = if has_resume {
            Some(ResumeInfoResponse {
                filename: user.resume_filename.clone().unwrap_or_default(),
                original_name: user.resume_original_name.clone().unwrap_or_default(),
                uploaded_at: user.resume_uploaded_at,
            })
        } else {
            None
        };
        Self {
            id: user.id.to_string(),
            username: user.username,
            email: user.email,
            name: user.name,
            role: user.role,
            status: user.status,
            phone: user.phone,
            location: user.location,
            title: user.title,
            bio: user.bio,
            skills: user.skills,
            experience: user.experience,
            education: user.education,
            resume,
            has_resume,
            version: user.version,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

// ── GET /api/users ───────────────────────────────────────────────────────────

/// Candidate summary for the employer-facing listing: a fixed public field
/// subset — no email, no phone, no password — plus the derived resume flag.
#[derive(Serialize)]
pub struct CandidateResponse {
    pub id: String,
    pub username: String,
    pub name: String,
    pub title: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub skills: Option<String>,
    pub experience: Option<String>,
    pub education: Option<String>,
    pub has_resume: bool,
    #[serde(serialize_with = "linx_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

pub async fn list_candidates(
    identity: Identity,
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Vec<CandidateResponse>>, ApiError> {
    let usecase = ListCandidatesUseCase {
        users: state.user_repo(),
    };
    let users = usecase.execute(identity, page).await?;
    let items = users
        .into_iter()
        .map(|u| CandidateResponse {
            id: u.id.to_string(),
            username: u.username.clone(),
            name: u.name.clone(),
            title: u.title.clone(),
            location: u.location.clone(),
            bio: u.bio.clone(),
            skills: u.skills.clone(),
            experience: u.experience.clone(),
            education: u.education.clone(),
            has_resume: u.has_resume(),
            created_at: u.created_at,
        })
        .collect();
    Ok(Json(items))
}

// ── GET /api/users/{id} ──────────────────────────────────────────────────────

pub async fn get_user(
    _identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserResponse>, ApiError> {
    let usecase = GetUserUseCase {
        users: state.user_repo(),
    };
    let user = usecase.execute(id).await?;
    Ok(Json(user.into()))
}

// ── PUT /api/users/{id} ──────────────────────────────────────────────────────

/// The typed allow-list: `role`, `status`, and resume fields do not exist
/// here, so any such JSON keys are dropped on deserialization.
#[derive(Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub skills: Option<String>,
    pub experience: Option<String>,
    pub education: Option<String>,
    /// Optional optimistic-concurrency token (entity `version` the client
    /// read). Stale value → 409.
    pub version: Option<i32>,
}

pub async fn update_user(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let patch = UserProfilePatch {
        name: body.name,
        email: body.email,
        phone: body.phone,
        location: body.location,
        title: body.title,
        bio: body.bio,
        skills: body.skills,
        experience: body.experience,
        education: body.education,
    };
    let usecase = UpdateUserUseCase {
        users: state.user_repo(),
    };
    let user = usecase.execute(identity, id, patch, body.version).await?;
    Ok(Json(user.into()))
}

// ── DELETE /api/users/{id} ───────────────────────────────────────────────────

#[derive(Serialize)]
pub struct DeleteUserResponse {
    pub message: String,
    pub deleted_jobs: u64,
}

pub async fn delete_user(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteUserResponse>, ApiError> {
    let usecase = DeleteUserUseCase {
        users: state.user_repo(),
        jobs: state.job_repo(),
    };
    let output = usecase.execute(identity, id).await?;
    Ok(Json(DeleteUserResponse {
        message: "account deleted".into(),
        deleted_jobs: output.deleted_jobs,
    }))
}
