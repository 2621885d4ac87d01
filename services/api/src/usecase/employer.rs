use chrono::Utc;
use uuid::Uuid;

use linx_auth_types::identity::Identity;
use linx_domain::pagination::PageRequest;
use linx_domain::user::AccountStatus;

use crate::domain::repository::EmployerRepository;
use crate::domain::types::{Employer, EmployerPatch, validate_email};
use crate::error::ApiError;

// ── CreateEmployer ───────────────────────────────────────────────────────────

pub struct CreateEmployerInput {
    pub name: String,
    pub email: String,
    pub company_name: String,
    pub website: Option<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub description: Option<String>,
}

pub struct CreateEmployerUseCase<R: EmployerRepository> {
    pub employers: R,
}

impl<R: EmployerRepository> CreateEmployerUseCase<R> {
    /// Public signup: `owner` comes from an optional credential; without
    /// one the record is ownerless and manageable only by dev.
    pub async fn execute(
        &self,
        input: CreateEmployerInput,
        owner: Option<Uuid>,
    ) -> Result<Employer, ApiError> {
        let email = input.email.trim().to_lowercase();
        if !validate_email(&email) {
            return Err(ApiError::Validation("invalid email".into()));
        }
        if input.name.trim().is_empty() || input.company_name.trim().is_empty() {
            return Err(ApiError::Validation(
                "name and company_name are required".into(),
            ));
        }

        let now = Utc::now();
        let employer = Employer {
            id: Uuid::now_v7(),
            name: input.name,
            email,
            company_name: input.company_name,
            verified: false,
            status: AccountStatus::Active,
            website: input.website,
            location: input.location,
            phone: input.phone,
            description: input.description,
            owner_user_id: owner,
            version: 0,
            created_at: now,
            updated_at: now,
        };
        self.employers.create(&employer).await?;
        Ok(employer)
    }
}

// ── GetEmployer / ListEmployers ──────────────────────────────────────────────

pub struct GetEmployerUseCase<R: EmployerRepository> {
    pub employers: R,
}

impl<R: EmployerRepository> GetEmployerUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<Employer, ApiError> {
        self.employers
            .find_by_id(id)
            .await?
            .ok_or(ApiError::EmployerNotFound)
    }
}

pub struct ListEmployersUseCase<R: EmployerRepository> {
    pub employers: R,
}

impl<R: EmployerRepository> ListEmployersUseCase<R> {
    pub async fn execute(&self, page: PageRequest) -> Result<Vec<Employer>, ApiError> {
        self.employers.list(page).await
    }
}

// ── UpdateEmployer ───────────────────────────────────────────────────────────

pub struct UpdateEmployerUseCase<R: EmployerRepository> {
    pub employers: R,
}

impl<R: EmployerRepository> UpdateEmployerUseCase<R> {
    pub async fn execute(
        &self,
        identity: Identity,
        id: Uuid,
        mut patch: EmployerPatch,
        expected_version: Option<i32>,
    ) -> Result<Employer, ApiError> {
        let employer = self
            .employers
            .find_by_id(id)
            .await?
            .ok_or(ApiError::EmployerNotFound)?;
        if !identity.can_manage_opt(employer.owner_user_id) {
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
        self.employers.update(id, &patch, expected_version).await
    }
}

// ── DeleteEmployer ───────────────────────────────────────────────────────────

pub struct DeleteEmployerUseCase<R: EmployerRepository> {
    pub employers: R,
}

impl<R: EmployerRepository> DeleteEmployerUseCase<R> {
    pub async fn execute(&self, identity: Identity, id: Uuid) -> Result<(), ApiError> {
        let employer = self
            .employers
            .find_by_id(id)
            .await?
            .ok_or(ApiError::EmployerNotFound)?;
        if !identity.can_manage_opt(employer.owner_user_id) {
            return Err(ApiError::Forbidden);
        }
        let deleted = self.employers.delete(id).await?;
        if !deleted {
            return Err(ApiError::EmployerNotFound);
        }
        Ok(())
    }
}
