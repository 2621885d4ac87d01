use uuid::Uuid;

use linx_auth_types::identity::Identity;
use linx_domain::pagination::PageRequest;
use linx_domain::user::Role;

use crate::domain::repository::{JobRepository, UserRepository};
use crate::domain::types::{User, UserProfilePatch, validate_email};
use crate::error::ApiError;

// ── GetUser ──────────────────────────────────────────────────────────────────

pub struct GetUserUseCase<R: UserRepository> {
    pub users: R,
}

impl<R: UserRepository> GetUserUseCase<R> {
    pub async fn execute(&self, user_id: Uuid) -> Result<User, ApiError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(ApiError::UserNotFound)
    }
}

// ── ListCandidates ───────────────────────────────────────────────────────────

/// Candidate browse for employers: role-`user` records only; the handler
/// projects the public field subset.
pub struct ListCandidatesUseCase<R: UserRepository> {
    pub users: R,
}

impl<R: UserRepository> ListCandidatesUseCase<R> {
    pub async fn execute(
        &self,
        identity: Identity,
        page: PageRequest,
    ) -> Result<Vec<User>, ApiError> {
        if identity.role < Role::Employer {
            return Err(ApiError::Forbidden);
        }
        self.users.list_candidates(page).await
    }
}

// ── UpdateUser ───────────────────────────────────────────────────────────────

pub struct UpdateUserUseCase<R: UserRepository> {
    pub users: R,
}

impl<R: UserRepository> UpdateUserUseCase<R> {
    pub async fn execute(
        &self,
        identity: Identity,
        target_id: Uuid,
        mut patch: UserProfilePatch,
        expected_version: Option<i32>,
    ) -> Result<User, ApiError> {
        if !identity.can_manage(target_id) {
            return Err(ApiError::Forbidden);
        }
        if patch.is_empty() {
            return Err(ApiError::Validation("no updatable fields supplied".into()));
        }
        if let Some(ref email) = patch.email {
            let email = email.trim().to_lowercase();
            if !validate_email(&email) {
                return Err(ApiError::Validation("invalid email".into()));
            }
            patch.email = Some(email);
        }
        self.users
            .update_profile(target_id, &patch, expected_version)
            .await
    }
}

// ── DeleteUser ───────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct DeleteUserOutput {
    /// Jobs removed by the employer cascade; zero for non-employer users.
    pub deleted_jobs: u64,
}

pub struct DeleteUserUseCase<U: UserRepository, J: JobRepository> {
    pub users: U,
    pub jobs: J,
}

impl<U: UserRepository, J: JobRepository> DeleteUserUseCase<U, J> {
    pub async fn execute(
        &self,
        identity: Identity,
        target_id: Uuid,
    ) -> Result<DeleteUserOutput, ApiError> {
        // Self-service only — even dev goes through the bulk admin surface.
        if identity.user_id != target_id {
            return Err(ApiError::Forbidden);
        }
        let user = self
            .users
            .find_by_id(target_id)
            .await?
            .ok_or(ApiError::UserNotFound)?;

        // Cascade first; if the account delete then fails the job deletion
        // stays — accepted inconsistency window, no transaction spans both.
        let deleted_jobs = if user.role == Role::Employer {
            self.jobs.delete_by_poster(target_id).await?
        } else {
            0
        };

        let deleted = self.users.delete(target_id).await?;
        if !deleted {
            return Err(ApiError::UserNotFound);
        }
        Ok(DeleteUserOutput { deleted_jobs })
    }
}
