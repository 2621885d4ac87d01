//! Dev-only moderation listings and bulk state transitions.
//!
//! Bulk semantics: the transition applies to every resource in the id set
//! that is eligible for it; unknown ids and ineligible rows are silently
//! skipped, and the returned count is rows actually modified — not rows
//! requested. Best-effort, no retries, no cross-row atomicity.

use uuid::Uuid;

use linx_domain::job::JobStatus;
use linx_domain::pagination::PageRequest;
use linx_domain::user::AccountStatus;

use crate::domain::repository::{EmployerRepository, JobRepository, UserRepository};
use crate::domain::types::{Employer, Job, User};
use crate::error::ApiError;

// ── Actions ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserBulkAction {
    Suspend,
    Activate,
    Delete,
}

impl UserBulkAction {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "suspend" => Some(Self::Suspend),
            "activate" => Some(Self::Activate),
            "delete" => Some(Self::Delete),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobBulkAction {
    Approve,
    Reject,
    Delete,
}

impl JobBulkAction {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "approve" => Some(Self::Approve),
            "reject" => Some(Self::Reject),
            "delete" => Some(Self::Delete),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmployerBulkAction {
    Verify,
    Suspend,
    Delete,
}

impl EmployerBulkAction {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "verify" => Some(Self::Verify),
            "suspend" => Some(Self::Suspend),
            "delete" => Some(Self::Delete),
            _ => None,
        }
    }
}

fn require_ids(ids: &[Uuid]) -> Result<(), ApiError> {
    if ids.is_empty() {
        return Err(ApiError::Validation("ids is required".into()));
    }
    Ok(())
}

// ── Listings ─────────────────────────────────────────────────────────────────

pub struct ListAllUsersUseCase<R: UserRepository> {
    pub users: R,
}

impl<R: UserRepository> ListAllUsersUseCase<R> {
    pub async fn execute(&self, page: PageRequest) -> Result<Vec<User>, ApiError> {
        self.users.list_all(page).await
    }
}

pub struct ListAllJobsUseCase<R: JobRepository> {
    pub jobs: R,
}

impl<R: JobRepository> ListAllJobsUseCase<R> {
    pub async fn execute(&self, page: PageRequest) -> Result<Vec<Job>, ApiError> {
        self.jobs.list_all(page).await
    }
}

pub struct ListAllEmployersUseCase<R: EmployerRepository> {
    pub employers: R,
}

impl<R: EmployerRepository> ListAllEmployersUseCase<R> {
    pub async fn execute(&self, page: PageRequest) -> Result<Vec<Employer>, ApiError> {
        self.employers.list(page).await
    }
}

// ── Bulk transitions ─────────────────────────────────────────────────────────

pub struct BulkUsersUseCase<R: UserRepository> {
    pub users: R,
}

impl<R: UserRepository> BulkUsersUseCase<R> {
    pub async fn execute(&self, action: UserBulkAction, ids: &[Uuid]) -> Result<u64, ApiError> {
        require_ids(ids)?;
        match action {
            UserBulkAction::Suspend => {
                self.users
                    .set_status_many(ids, AccountStatus::Suspended)
                    .await
            }
            UserBulkAction::Activate => {
                self.users.set_status_many(ids, AccountStatus::Active).await
            }
            // Jobs posted by deleted employer accounts go with them via the
            // posted_by FK cascade.
            UserBulkAction::Delete => self.users.delete_many(ids).await,
        }
    }
}

pub struct BulkJobsUseCase<R: JobRepository> {
    pub jobs: R,
}

impl<R: JobRepository> BulkJobsUseCase<R> {
    pub async fn execute(&self, action: JobBulkAction, ids: &[Uuid]) -> Result<u64, ApiError> {
        require_ids(ids)?;
        match action {
            JobBulkAction::Approve => self.jobs.moderate_many(ids, JobStatus::Active).await,
            JobBulkAction::Reject => self.jobs.moderate_many(ids, JobStatus::Rejected).await,
            JobBulkAction::Delete => self.jobs.delete_many(ids).await,
        }
    }
}

pub struct BulkEmployersUseCase<R: EmployerRepository> {
    pub employers: R,
}

impl<R: EmployerRepository> BulkEmployersUseCase<R> {
    pub async fn execute(
        &self,
        action: EmployerBulkAction,
        ids: &[Uuid],
    ) -> Result<u64, ApiError> {
        require_ids(ids)?;
        match action {
            EmployerBulkAction::Verify => self.employers.set_verified_many(ids).await,
            EmployerBulkAction::Suspend => {
                self.employers
                    .set_status_many(ids, AccountStatus::Suspended)
                    .await
            }
            EmployerBulkAction::Delete => self.employers.delete_many(ids).await,
        }
    }
}
