use chrono::Utc;
use uuid::Uuid;

use linx_auth_types::identity::Identity;
use linx_domain::job::{ExperienceLevel, JobStatus, JobType};
use linx_domain::pagination::PageRequest;

use crate::domain::repository::JobRepository;
use crate::domain::types::{Job, JobPatch};
use crate::error::ApiError;

// ── ListJobs (public) ────────────────────────────────────────────────────────

pub struct ListJobsUseCase<R: JobRepository> {
    pub jobs: R,
}

impl<R: JobRepository> ListJobsUseCase<R> {
    pub async fn execute(&self, page: PageRequest) -> Result<Vec<Job>, ApiError> {
        self.jobs.list_public(page).await
    }
}

// ── ListEmployerJobs ─────────────────────────────────────────────────────────

pub struct ListEmployerJobsUseCase<R: JobRepository> {
    pub jobs: R,
}

impl<R: JobRepository> ListEmployerJobsUseCase<R> {
    pub async fn execute(&self, poster_id: Uuid) -> Result<Vec<Job>, ApiError> {
        self.jobs.list_by_poster(poster_id).await
    }
}

// ── CreateJob ────────────────────────────────────────────────────────────────

pub struct CreateJobInput {
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

pub struct CreateJobUseCase<R: JobRepository> {
    pub jobs: R,
}

impl<R: JobRepository> CreateJobUseCase<R> {
    /// `posted_by` is stamped from the authenticated identity — a
    /// client-supplied value never reaches this input.
    pub async fn execute(&self, identity: Identity, input: CreateJobInput) -> Result<Job, ApiError> {
        if input.title.trim().is_empty()
            || input.company.trim().is_empty()
            || input.description.trim().is_empty()
            || input.location.trim().is_empty()
        {
            return Err(ApiError::Validation(
                "title, company, description and location are required".into(),
            ));
        }

        let now = Utc::now();
        let job = Job {
            id: Uuid::now_v7(),
            title: input.title,
            company: input.company,
            description: input.description,
            location: input.location,
            job_type: input.job_type,
            salary: input.salary,
            experience_level: input.experience_level,
            requirements: input.requirements,
            benefits: input.benefits,
            category: input.category,
            posted_by: identity.user_id,
            status: JobStatus::Pending,
            version: 0,
            created_at: now,
            updated_at: now,
        };
        self.jobs.create(&job).await?;
        Ok(job)
    }
}

// ── UpdateJob ────────────────────────────────────────────────────────────────

pub struct UpdateJobUseCase<R: JobRepository> {
    pub jobs: R,
}

impl<R: JobRepository> UpdateJobUseCase<R> {
    pub async fn execute(
        &self,
        identity: Identity,
        job_id: Uuid,
        patch: JobPatch,
        expected_version: Option<i32>,
    ) -> Result<Job, ApiError> {
        let job = self
            .jobs
            .find_by_id(job_id)
            .await?
            .ok_or(ApiError::JobNotFound)?;
        if !identity.can_manage(job.posted_by) {
            return Err(ApiError::Forbidden);
        }
        if patch.is_empty() {
            return Err(ApiError::Validation("no updatable fields supplied".into()));
        }
        self.jobs.update(job_id, &patch, expected_version).await
    }
}

// ── DeleteJob ────────────────────────────────────────────────────────────────

pub struct DeleteJobUseCase<R: JobRepository> {
    pub jobs: R,
}

impl<R: JobRepository> DeleteJobUseCase<R> {
    pub async fn execute(&self, identity: Identity, job_id: Uuid) -> Result<(), ApiError> {
        let job = self
            .jobs
            .find_by_id(job_id)
            .await?
            .ok_or(ApiError::JobNotFound)?;
        if !identity.can_manage(job.posted_by) {
            return Err(ApiError::Forbidden);
        }
        let deleted = self.jobs.delete(job_id).await?;
        if !deleted {
            return Err(ApiError::JobNotFound);
        }
        Ok(())
    }
}
