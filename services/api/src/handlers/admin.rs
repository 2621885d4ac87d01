//! Dev-only moderation surface: full listings and bulk actions.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use linx_auth_types::identity::Identity;
use linx_domain::pagination::PageRequest;
use linx_domain::user::Role;

use crate::error::ApiError;
use crate::handlers::employer::EmployerResponse;
use crate::handlers::job::JobResponse;
use crate::handlers::user::UserResponse;
use crate::state::AppState;
use crate::usecase::admin::{
    BulkEmployersUseCase, BulkJobsUseCase, BulkUsersUseCase, EmployerBulkAction, JobBulkAction,
    ListAllEmployersUseCase, ListAllJobsUseCase, ListAllUsersUseCase, UserBulkAction,
};

fn require_dev(identity: &Identity) -> Result<(), ApiError> {
    if identity.role < Role::Dev {
        return Err(ApiError::Forbidden);
    }
    Ok(())
}

// ── Bulk request plumbing ────────────────────────────────────────────────────

/// Body of every bulk endpoint. `ids` stays a raw JSON value so a missing
/// or non-array field maps to 400 `VALIDATION_FAILED` rather than a
/// generic body-rejection.
#[derive(Deserialize)]
pub struct BulkActionRequest {
    pub action: String,
    #[serde(default)]
    pub ids: Option<serde_json::Value>,
}

#[derive(Serialize)]
pub struct BulkActionResponse {
    /// Rows actually modified/deleted — not the count requested.
    pub modified: u64,
}

fn parse_ids(ids: Option<serde_json::Value>) -> Result<Vec<Uuid>, ApiError> {
    let value = ids.ok_or_else(|| ApiError::Validation("ids is required".into()))?;
    if !value.is_array() {
        return Err(ApiError::Validation("ids must be an array".into()));
    }
    serde_json::from_value(value)
        .map_err(|_| ApiError::Validation("ids must be an array of resource ids".into()))
}

// ── GET /api/admin/users ─────────────────────────────────────────────────────

pub async fn list_users(
    identity: Identity,
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    require_dev(&identity)?;
    let usecase = ListAllUsersUseCase {
        users: state.user_repo(),
    };
    let users = usecase.execute(page).await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

// ── GET /api/admin/jobs ──────────────────────────────────────────────────────

pub async fn list_jobs(
    identity: Identity,
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Vec<JobResponse>>, ApiError> {
    require_dev(&identity)?;
    let usecase = ListAllJobsUseCase {
        jobs: state.job_repo(),
    };
    let jobs = usecase.execute(page).await?;
    Ok(Json(jobs.into_iter().map(Into::into).collect()))
}

// ── GET /api/admin/employers ─────────────────────────────────────────────────

pub async fn list_employers(
    identity: Identity,
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Vec<EmployerResponse>>, ApiError> {
    require_dev(&identity)?;
    let usecase = ListAllEmployersUseCase {
        employers: state.employer_repo(),
    };
    let employers = usecase.execute(page).await?;
    Ok(Json(employers.into_iter().map(Into::into).collect()))
}

// ── POST /api/admin/users/bulk ───────────────────────────────────────────────

pub async fn bulk_users(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<BulkActionRequest>,
) -> Result<Json<BulkActionResponse>, ApiError> {
    require_dev(&identity)?;
    let action = UserBulkAction::parse(&body.action)
        .ok_or_else(|| ApiError::Validation(format!("unknown user action: {}", body.action)))?;
    let ids = parse_ids(body.ids)?;
    let usecase = BulkUsersUseCase {
        users: state.user_repo(),
    };
    let modified = usecase.execute(action, &ids).await?;
    tracing::info!(action = %body.action, requested = ids.len(), modified, "bulk user action");
    Ok(Json(BulkActionResponse { modified }))
}

// ── POST /api/admin/jobs/bulk ────────────────────────────────────────────────

pub async fn bulk_jobs(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<BulkActionRequest>,
) -> Result<Json<BulkActionResponse>, ApiError> {
    require_dev(&identity)?;
    let action = JobBulkAction::parse(&body.action)
        .ok_or_else(|| ApiError::Validation(format!("unknown job action: {}", body.action)))?;
    let ids = parse_ids(body.ids)?;
    let usecase = BulkJobsUseCase {
        jobs: state.job_repo(),
    };
    let modified = usecase.execute(action, &ids).await?;
    tracing::info!(action = %body.action, requested = ids.len(), modified, "bulk job action");
    Ok(Json(BulkActionResponse { modified }))
}

// ── POST /api/admin/employers/bulk ───────────────────────────────────────────

pub async fn bulk_employers(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<BulkActionRequest>,
) -> Result<Json<BulkActionResponse>, ApiError> {
    require_dev(&identity)?;
    let action = EmployerBulkAction::parse(&body.action).ok_or_else(|| {
        ApiError::Validation(format!("unknown employer action: {}", body.action))
    })?;
    let ids = parse_ids(body.ids)?;
    let usecase = BulkEmployersUseCase {
        employers: state.employer_repo(),
    };
    let modified = usecase.execute(action, &ids).await?;
    tracing::info!(action = %body.action, requested = ids.len(), modified, "bulk employer action");
    Ok(Json(BulkActionResponse { modified }))
}
