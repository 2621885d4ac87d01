#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use linx_domain::job::JobStatus;
use linx_domain::pagination::PageRequest;
use linx_domain::user::AccountStatus;

use crate::domain::types::{Employer, EmployerPatch, Job, JobPatch, User, UserProfilePatch};
use crate::error::ApiError;

/// Repository for user accounts.
///
/// `update_profile` applies an optimistic check when `expected_version` is
/// supplied: a stale version fails with `StaleVersion` and leaves the row
/// unchanged. Without it the write is last-write-wins.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ApiError>;
    async fn create(&self, user: &User) -> Result<(), ApiError>;
    /// Role-`user` records only, for the candidate listing.
    async fn list_candidates(&self, page: PageRequest) -> Result<Vec<User>, ApiError>;
    /// Every record regardless of role/status, for the admin listing.
    async fn list_all(&self, page: PageRequest) -> Result<Vec<User>, ApiError>;
    async fn update_profile(
        &self,
        id: Uuid,
        patch: &UserProfilePatch,
        expected_version: Option<i32>,
    ) -> Result<User, ApiError>;
    async fn set_resume(
        &self,
        id: Uuid,
        filename: &str,
        original_name: &str,
        uploaded_at: DateTime<Utc>,
    ) -> Result<(), ApiError>;
    /// Delete one user. Returns `true` if a row was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, ApiError>;
    /// Transition every listed user not already in `status`. Returns the
    /// number of rows actually modified; unknown ids are skipped.
    async fn set_status_many(&self, ids: &[Uuid], status: AccountStatus) -> Result<u64, ApiError>;
    /// Delete every listed user. Returns the number of rows deleted.
    async fn delete_many(&self, ids: &[Uuid]) -> Result<u64, ApiError>;
}

/// Repository for employer profiles.
pub trait EmployerRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Employer>, ApiError>;
    async fn create(&self, employer: &Employer) -> Result<(), ApiError>;
    async fn list(&self, page: PageRequest) -> Result<Vec<Employer>, ApiError>;
    async fn update(
        &self,
        id: Uuid,
        patch: &EmployerPatch,
        expected_version: Option<i32>,
    ) -> Result<Employer, ApiError>;
    async fn delete(&self, id: Uuid) -> Result<bool, ApiError>;
    /// Mark every listed unverified employer verified. Returns rows modified.
    async fn set_verified_many(&self, ids: &[Uuid]) -> Result<u64, ApiError>;
    async fn set_status_many(&self, ids: &[Uuid], status: AccountStatus) -> Result<u64, ApiError>;
    async fn delete_many(&self, ids: &[Uuid]) -> Result<u64, ApiError>;
}

/// Repository for job postings.
pub trait JobRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Job>, ApiError>;
    async fn create(&self, job: &Job) -> Result<(), ApiError>;
    /// Publicly visible postings (everything except rejected).
    async fn list_public(&self, page: PageRequest) -> Result<Vec<Job>, ApiError>;
    /// Every posting regardless of status, for the admin listing.
    async fn list_all(&self, page: PageRequest) -> Result<Vec<Job>, ApiError>;
    async fn list_by_poster(&self, poster_id: Uuid) -> Result<Vec<Job>, ApiError>;
    async fn update(
        &self,
        id: Uuid,
        patch: &JobPatch,
        expected_version: Option<i32>,
    ) -> Result<Job, ApiError>;
    async fn delete(&self, id: Uuid) -> Result<bool, ApiError>;
    /// Delete all postings by one user (the employer-delete cascade).
    /// Returns the number of rows deleted.
    async fn delete_by_poster(&self, poster_id: Uuid) -> Result<u64, ApiError>;
    /// Move every listed posting currently `pending` to `status`. Rows in
    /// any other state are skipped, so a rejected posting cannot be
    /// re-approved. Returns rows modified.
    async fn moderate_many(&self, ids: &[Uuid], status: JobStatus) -> Result<u64, ApiError>;
    async fn delete_many(&self, ids: &[Uuid]) -> Result<u64, ApiError>;
}

/// Store for resume binaries, keyed by user id plus extension — the client
/// filename never reaches the filesystem.
pub trait ResumeStore: Send + Sync {
    async fn save(&self, user_id: Uuid, extension: &str, data: &[u8]) -> Result<(), ApiError>;
    async fn load(&self, user_id: Uuid, extension: &str) -> Result<Option<Vec<u8>>, ApiError>;
    /// Remove a stored file. Returns `true` if a file existed.
    async fn remove(&self, user_id: Uuid, extension: &str) -> Result<bool, ApiError>;
}
