use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use linx_auth_types::identity::Identity;
use linx_domain::job::{ExperienceLevel, JobStatus, JobType};
use linx_domain::pagination::PageRequest;

use crate::domain::types::{Job, JobPatch};
use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::job::{
    CreateJobInput, CreateJobUseCase, DeleteJobUseCase, ListEmployerJobsUseCase, ListJobsUseCase,
    UpdateJobUseCase,
};

#[derive(Serialize)]
pub struct JobResponse {
    pub id: String,
    pub title: String,
    pub company: String,
    pub description: String,
    pub location: String,
    pub job_type: JobType,
    pub salary: Option<String>,
    pub experience_level: Option<ExperienceLevel>,
    pub requirements: Option<String>,
    pub benefits: Option<String>,
    pub category: Option<String>,
    pub posted_by: String,
    pub status: JobStatus,
    pub version: i32,
    #[serde(serialize_with = "linx_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "linx_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Job> for JobResponse {
    fn from(job: Job) -> Self {
        Self {
            id: job.id.to_string(),
            title: job.title,
            company: job.company,
            description: job.description,
            location: job.location,
            job_type: job.job_type,
            salary: job.salary,
            experience_level: job.experience_level,
            requirements: job.requirements,
            benefits: job.benefits,
            category: job.category,
            posted_by: job.posted_by.to_string(),
            status: job.status,
            version: job.version,
            created_at: job.created_at,
            updated_at: job.updated_at,
        }
    }
}

// ── GET /api/jobs ────────────────────────────────────────────────────────────

pub async fn list_jobs(
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Vec<JobResponse>>, ApiError> {
    let usecase = ListJobsUseCase {
        jobs: state.job_repo(),
    };
    let jobs = usecase.execute(page).await?;
    Ok(Json(jobs.into_iter().map(Into::into).collect()))
}

// ── POST /api/jobs ───────────────────────────────────────────────────────────

/// Note: there is no `posted_by` field — the poster is always the caller,
/// and a client-supplied value is dropped on deserialization.
#[derive(Deserialize)]
pub struct CreateJobRequest {
    pub title: String,
    pub company: String,
    pub description: String,
    pub location: String,
    pub job_type: JobType,
    pub salary: Option<String>,
    pub experience_level: Option<ExperienceLevel>,
    pub requirements: Option<String>,
    pub benefits: Option<String>,
    pub category: Option<String>,
}

pub async fn create_job(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<CreateJobRequest>,
) -> Result<(StatusCode, Json<JobResponse>), ApiError> {
    let usecase = CreateJobUseCase {
        jobs: state.job_repo(),
    };
    let job = usecase
        .execute(
            identity,
            CreateJobInput {
                title: body.title,
                company: body.company,
                description: body.description,
                location: body.location,
                job_type: body.job_type,
                salary: body.salary,
                experience_level: body.experience_level,
                requirements: body.requirements,
                benefits: body.benefits,
                category: body.category,
            },
        )
        .await?;
    tracing::info!(job_id = %job.id, posted_by = %job.posted_by, "job created");
    Ok((StatusCode::CREATED, Json(job.into())))
}

// ── PUT /api/jobs/{id} ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateJobRequest {
    pub title: Option<String>,
    pub company: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<JobType>,
    pub salary: Option<String>,
    pub experience_level: Option<ExperienceLevel>,
    pub requirements: Option<String>,
    pub benefits: Option<String>,
    pub category: Option<String>,
    pub version: Option<i32>,
}

pub async fn update_job(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateJobRequest>,
) -> Result<Json<JobResponse>, ApiError> {
    let patch = JobPatch {
        title: body.title,
        company: body.company,
        description: body.description,
        location: body.location,
        job_type: body.job_type,
        salary: body.salary,
        experience_level: body.experience_level,
        requirements: body.requirements,
        benefits: body.benefits,
        category: body.category,
    };
    let usecase = UpdateJobUseCase {
        jobs: state.job_repo(),
    };
    let job = usecase.execute(identity, id, patch, body.version).await?;
    Ok(Json(job.into()))
}

// ── DELETE /api/jobs/{id} ────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct DeleteJobResponse {
    pub message: String,
}

pub async fn delete_job(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteJobResponse>, ApiError> {
    let usecase = DeleteJobUseCase {
        jobs: state.job_repo(),
    };
    usecase.execute(identity, id).await?;
    Ok(Json(DeleteJobResponse {
        message: "job deleted".into(),
    }))
}

// ── GET /api/jobs/employer/{employer_id} ─────────────────────────────────────

pub async fn list_employer_jobs(
    _identity: Identity,
    State(state): State<AppState>,
    Path(employer_id): Path<Uuid>,
) -> Result<Json<Vec<JobResponse>>, ApiError> {
    let usecase = ListEmployerJobsUseCase {
        jobs: state.job_repo(),
    };
    let jobs = usecase.execute(employer_id).await?;
    Ok(Json(jobs.into_iter().map(Into::into).collect()))
}
