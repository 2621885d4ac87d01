use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, SqlErr,
    sea_query::{Expr, ExprTrait as _},
};
use uuid::Uuid;

use linx_api_schema::{employers, jobs, users};
use linx_domain::job::{ExperienceLevel, JobStatus, JobType};
use linx_domain::pagination::PageRequest;
use linx_domain::user::{AccountStatus, Role};

use crate::domain::repository::{EmployerRepository, JobRepository, UserRepository};
use crate::domain::types::{Employer, EmployerPatch, Job, JobPatch, User, UserProfilePatch};
use crate::error::ApiError;

/// Map an insert/update error to a Conflict when it is a unique-constraint
/// violation on `username`/`email`, Internal otherwise.
fn map_unique_violation(e: DbErr, op: &'static str) -> ApiError {
    if let Some(SqlErr::UniqueConstraintViolation(msg)) = e.sql_err() {
        if msg.contains("username") {
            return ApiError::UsernameTaken;
        }
        return ApiError::EmailTaken;
    }
    ApiError::Internal(anyhow::Error::new(e).context(op))
}

fn page_window(page: PageRequest) -> (u64, u64) {
    let PageRequest { per_page, page } = page.clamped();
    ((per_page as u64), (((page - 1) * per_page) as u64))
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

fn user_from_model(model: users::Model) -> Result<User, ApiError> {
    let role = Role::from_u8(model.role as u8)
        .ok_or_else(|| ApiError::Internal(anyhow::anyhow!("unknown role value {}", model.role)))?;
    let status = AccountStatus::from_u8(model.status as u8).ok_or_else(|| {
        ApiError::Internal(anyhow::anyhow!("unknown status value {}", model.status))
    })?;
    Ok(User {
        id: model.id,
        username: model.username,
        email: model.email,
        name: model.name,
        password_hash: model.password_hash,
        role,
        status,
        phone: model.phone,
        location: model.location,
        title: model.title,
        bio: model.bio,
        skills: model.skills,
        experience: model.experience,
        education: model.education,
        resume_filename: model.resume_filename,
        resume_original_name: model.resume_original_name,
        resume_uploaded_at: model.resume_uploaded_at,
        version: model.version,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await
            .context("find user by username")?;
        model.map(user_from_model).transpose()
    }

    async fn create(&self, user: &User) -> Result<(), ApiError> {
        users::ActiveModel {
            id: Set(user.id),
            username: Set(user.username.clone()),
            email: Set(user.email.clone()),
            name: Set(user.name.clone()),
            password_hash: Set(user.password_hash.clone()),
            role: Set(user.role.as_u8() as i16),
            status: Set(user.status.as_u8() as i16),
            phone: Set(user.phone.clone()),
            location: Set(user.location.clone()),
            title: Set(user.title.clone()),
            bio: Set(user.bio.clone()),
            skills: Set(user.skills.clone()),
            experience: Set(user.experience.clone()),
            education: Set(user.education.clone()),
            resume_filename: Set(user.resume_filename.clone()),
            resume_original_name: Set(user.resume_original_name.clone()),
            resume_uploaded_at: Set(user.resume_uploaded_at),
            version: Set(user.version),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
        .insert(&self.db)
        .await
        .map_err(|e| map_unique_violation(e, "create user"))?;
        Ok(())
    }

    async fn list_candidates(&self, page: PageRequest) -> Result<Vec<User>, ApiError> {
        let (limit, offset) = page_window(page);
        let models = users::Entity::find()
            .filter(users::Column::Role.eq(Role::User.as_u8() as i16))
            .order_by_desc(users::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .context("list candidate users")?;
        models.into_iter().map(user_from_model).collect()
    }

    async fn list_all(&self, page: PageRequest) -> Result<Vec<User>, ApiError> {
        let (limit, offset) = page_window(page);
        let models = users::Entity::find()
            .order_by_desc(users::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .context("list all users")?;
        models.into_iter().map(user_from_model).collect()
    }

    async fn update_profile(
        &self,
        id: Uuid,
        patch: &UserProfilePatch,
        expected_version: Option<i32>,
    ) -> Result<User, ApiError> {
        let mut update = users::Entity::update_many().filter(users::Column::Id.eq(id));
        if let Some(version) = expected_version {
            update = update.filter(users::Column::Version.eq(version));
        }
        if let Some(ref name) = patch.name {
            update = update.col_expr(users::Column::Name, Expr::value(name.clone()));
        }
        if let Some(ref email) = patch.email {
            update = update.col_expr(users::Column::Email, Expr::value(email.clone()));
        }
        if let Some(ref phone) = patch.phone {
            update = update.col_expr(users::Column::Phone, Expr::value(phone.clone()));
        }
        if let Some(ref location) = patch.location {
            update = update.col_expr(users::Column::Location, Expr::value(location.clone()));
        }
        if let Some(ref title) = patch.title {
            update = update.col_expr(users::Column::Title, Expr::value(title.clone()));
        }
        if let Some(ref bio) = patch.bio {
            update = update.col_expr(users::Column::Bio, Expr::value(bio.clone()));
        }
        if let Some(ref skills) = patch.skills {
            update = update.col_expr(users::Column::Skills, Expr::value(skills.clone()));
        }
        if let Some(ref experience) = patch.experience {
            update = update.col_expr(users::Column::Experience, Expr::value(experience.clone()));
        }
        if let Some(ref education) = patch.education {
            update = update.col_expr(users::Column::Education, Expr::value(education.clone()));
        }
        let result = update
            .col_expr(
                users::Column::Version,
                Expr::col(users::Column::Version).add(1),
            )
            .col_expr(users::Column::UpdatedAt, Expr::value(Utc::now()))
            .exec(&self.db)
            .await
            .map_err(|e| map_unique_violation(e, "update user profile"))?;

        if result.rows_affected == 0 {
            let exists = users::Entity::find_by_id(id)
                .one(&self.db)
                .await
                .context("re-check user after update")?
                .is_some();
            if exists && expected_version.is_some() {
                return Err(ApiError::StaleVersion);
            }
            return Err(ApiError::UserNotFound);
        }

        self.find_by_id(id).await?.ok_or(ApiError::UserNotFound)
    }

    async fn set_resume(
        &self,
        id: Uuid,
        filename: &str,
        original_name: &str,
        uploaded_at: chrono::DateTime<Utc>,
    ) -> Result<(), ApiError> {
        let result = users::Entity::update_many()
            .filter(users::Column::Id.eq(id))
            .col_expr(
                users::Column::ResumeFilename,
                Expr::value(filename.to_owned()),
            )
            .col_expr(
                users::Column::ResumeOriginalName,
                Expr::value(original_name.to_owned()),
            )
            .col_expr(users::Column::ResumeUploadedAt, Expr::value(uploaded_at))
            .col_expr(
                users::Column::Version,
                Expr::col(users::Column::Version).add(1),
            )
            .col_expr(users::Column::UpdatedAt, Expr::value(Utc::now()))
            .exec(&self.db)
            .await
            .context("set user resume")?;
        if result.rows_affected == 0 {
            return Err(ApiError::UserNotFound);
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let result = users::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete user")?;
        Ok(result.rows_affected > 0)
    }

    async fn set_status_many(
        &self,
        ids: &[Uuid],
        status: AccountStatus,
    ) -> Result<u64, ApiError> {
        let result = users::Entity::update_many()
            .filter(users::Column::Id.is_in(ids.iter().copied()))
            .filter(users::Column::Status.ne(status.as_u8() as i16))
            .col_expr(users::Column::Status, Expr::value(status.as_u8() as i16))
            .col_expr(
                users::Column::Version,
                Expr::col(users::Column::Version).add(1),
            )
            .col_expr(users::Column::UpdatedAt, Expr::value(Utc::now()))
            .exec(&self.db)
            .await
            .context("bulk set user status")?;
        Ok(result.rows_affected)
    }

    async fn delete_many(&self, ids: &[Uuid]) -> Result<u64, ApiError> {
        let result = users::Entity::delete_many()
            .filter(users::Column::Id.is_in(ids.iter().copied()))
            .exec(&self.db)
            .await
            .context("bulk delete users")?;
        Ok(result.rows_affected)
    }
}

// ── Employer repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbEmployerRepository {
    pub db: DatabaseConnection,
}

fn employer_from_model(model: employers::Model) -> Result<Employer, ApiError> {
    let status = AccountStatus::from_u8(model.status as u8).ok_or_else(|| {
        ApiError::Internal(anyhow::anyhow!("unknown status value {}", model.status))
    })?;
    Ok(Employer {
        id: model.id,
        name: model.name,
        email: model.email,
        company_name: model.company_name,
        verified: model.verified,
        status,
        website: model.website,
        location: model.location,
        phone: model.phone,
        description: model.description,
        owner_user_id: model.owner_user_id,
        version: model.version,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

impl EmployerRepository for DbEmployerRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Employer>, ApiError> {
        let model = employers::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find employer by id")?;
        model.map(employer_from_model).transpose()
    }

    async fn create(&self, employer: &Employer) -> Result<(), ApiError> {
        employers::ActiveModel {
            id: Set(employer.id),
            name: Set(employer.name.clone()),
            email: Set(employer.email.clone()),
            company_name: Set(employer.company_name.clone()),
            verified: Set(employer.verified),
            status: Set(employer.status.as_u8() as i16),
            website: Set(employer.website.clone()),
            location: Set(employer.location.clone()),
            phone: Set(employer.phone.clone()),
            description: Set(employer.description.clone()),
            owner_user_id: Set(employer.owner_user_id),
            version: Set(employer.version),
            created_at: Set(employer.created_at),
            updated_at: Set(employer.updated_at),
        }
        .insert(&self.db)
        .await
        .map_err(|e| map_unique_violation(e, "create employer"))?;
        Ok(())
    }

    async fn list(&self, page: PageRequest) -> Result<Vec<Employer>, ApiError> {
        let (limit, offset) = page_window(page);
        let models = employers::Entity::find()
            .order_by_desc(employers::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .context("list employers")?;
        models.into_iter().map(employer_from_model).collect()
    }

    async fn update(
        &self,
        id: Uuid,
        patch: &EmployerPatch,
        expected_version: Option<i32>,
    ) -> Result<Employer, ApiError> {
        let mut update = employers::Entity::update_many().filter(employers::Column::Id.eq(id));
        if let Some(version) = expected_version {
            update = update.filter(employers::Column::Version.eq(version));
        }
        if let Some(ref name) = patch.name {
            update = update.col_expr(employers::Column::Name, Expr::value(name.clone()));
        }
        if let Some(ref email) = patch.email {
            update = update.col_expr(employers::Column::Email, Expr::value(email.clone()));
        }
        if let Some(ref company_name) = patch.company_name {
            update = update.col_expr(
                employers::Column::CompanyName,
                Expr::value(company_name.clone()),
            );
        }
        if let Some(ref website) = patch.website {
            update = update.col_expr(employers::Column::Website, Expr::value(website.clone()));
        }
        if let Some(ref location) = patch.location {
            update = update.col_expr(employers::Column::Location, Expr::value(location.clone()));
        }
        if let Some(ref phone) = patch.phone {
            update = update.col_expr(employers::Column::Phone, Expr::value(phone.clone()));
        }
        if let Some(ref description) = patch.description {
            update = update.col_expr(
                employers::Column::Description,
                Expr::value(description.clone()),
            );
        }
        let result = update
            .col_expr(
                employers::Column::Version,
                Expr::col(employers::Column::Version).add(1),
            )
            .col_expr(employers::Column::UpdatedAt, Expr::value(Utc::now()))
            .exec(&self.db)
            .await
            .map_err(|e| map_unique_violation(e, "update employer"))?;

        if result.rows_affected == 0 {
            let exists = employers::Entity::find_by_id(id)
                .one(&self.db)
                .await
                .context("re-check employer after update")?
                .is_some();
            if exists && expected_version.is_some() {
                return Err(ApiError::StaleVersion);
            }
            return Err(ApiError::EmployerNotFound);
        }

        self.find_by_id(id).await?.ok_or(ApiError::EmployerNotFound)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let result = employers::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete employer")?;
        Ok(result.rows_affected > 0)
    }

    async fn set_verified_many(&self, ids: &[Uuid]) -> Result<u64, ApiError> {
        let result = employers::Entity::update_many()
            .filter(employers::Column::Id.is_in(ids.iter().copied()))
            .filter(employers::Column::Verified.eq(false))
            .col_expr(employers::Column::Verified, Expr::value(true))
            .col_expr(
                employers::Column::Version,
                Expr::col(employers::Column::Version).add(1),
            )
            .col_expr(employers::Column::UpdatedAt, Expr::value(Utc::now()))
            .exec(&self.db)
            .await
            .context("bulk verify employers")?;
        Ok(result.rows_affected)
    }

    async fn set_status_many(
        &self,
        ids: &[Uuid],
        status: AccountStatus,
    ) -> Result<u64, ApiError> {
        let result = employers::Entity::update_many()
            .filter(employers::Column::Id.is_in(ids.iter().copied()))
            .filter(employers::Column::Status.ne(status.as_u8() as i16))
            .col_expr(employers::Column::Status, Expr::value(status.as_u8() as i16))
            .col_expr(
                employers::Column::Version,
                Expr::col(employers::Column::Version).add(1),
            )
            .col_expr(employers::Column::UpdatedAt, Expr::value(Utc::now()))
            .exec(&self.db)
            .await
            .context("bulk set employer status")?;
        Ok(result.rows_affected)
    }

    async fn delete_many(&self, ids: &[Uuid]) -> Result<u64, ApiError> {
        let result = employers::Entity::delete_many()
            .filter(employers::Column::Id.is_in(ids.iter().copied()))
            .exec(&self.db)
            .await
            .context("bulk delete employers")?;
        Ok(result.rows_affected)
    }
}

// ── Job repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbJobRepository {
    pub db: DatabaseConnection,
}

fn job_from_model(model: jobs::Model) -> Result<Job, ApiError> {
    let job_type = JobType::from_u8(model.job_type as u8).ok_or_else(|| {
        ApiError::Internal(anyhow::anyhow!("unknown job type value {}", model.job_type))
    })?;
    let status = JobStatus::from_u8(model.status as u8).ok_or_else(|| {
        ApiError::Internal(anyhow::anyhow!("unknown job status value {}", model.status))
    })?;
    let experience_level = model
        .experience_level
        .map(|v| {
            ExperienceLevel::from_u8(v as u8)
                .ok_or_else(|| ApiError::Internal(anyhow::anyhow!("unknown experience level {v}")))
        })
        .transpose()?;
    Ok(Job {
        id: model.id,
        title: model.title,
        company: model.company,
        description: model.description,
        location: model.location,
        job_type,
        salary: model.salary,
        experience_level,
        requirements: model.requirements,
        benefits: model.benefits,
        category: model.category,
        posted_by: model.posted_by,
        status,
        version: model.version,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

impl JobRepository for DbJobRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Job>, ApiError> {
        let model = jobs::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find job by id")?;
        model.map(job_from_model).transpose()
    }

    async fn create(&self, job: &Job) -> Result<(), ApiError> {
        jobs::ActiveModel {
            id: Set(job.id),
            title: Set(job.title.clone()),
            company: Set(job.company.clone()),
            description: Set(job.description.clone()),
            location: Set(job.location.clone()),
            job_type: Set(job.job_type.as_u8() as i16),
            salary: Set(job.salary.clone()),
            experience_level: Set(job.experience_level.map(|l| l.as_u8() as i16)),
            requirements: Set(job.requirements.clone()),
            benefits: Set(job.benefits.clone()),
            category: Set(job.category.clone()),
            posted_by: Set(job.posted_by),
            status: Set(job.status.as_u8() as i16),
            version: Set(job.version),
            created_at: Set(job.created_at),
            updated_at: Set(job.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create job")?;
        Ok(())
    }

    async fn list_public(&self, page: PageRequest) -> Result<Vec<Job>, ApiError> {
        let (limit, offset) = page_window(page);
        let models = jobs::Entity::find()
            .filter(jobs::Column::Status.ne(JobStatus::Rejected.as_u8() as i16))
            .order_by_desc(jobs::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .context("list public jobs")?;
        models.into_iter().map(job_from_model).collect()
    }

    async fn list_all(&self, page: PageRequest) -> Result<Vec<Job>, ApiError> {
        let (limit, offset) = page_window(page);
        let models = jobs::Entity::find()
            .order_by_desc(jobs::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .context("list all jobs")?;
        models.into_iter().map(job_from_model).collect()
    }

    async fn list_by_poster(&self, poster_id: Uuid) -> Result<Vec<Job>, ApiError> {
        let models = jobs::Entity::find()
            .filter(jobs::Column::PostedBy.eq(poster_id))
            .order_by_desc(jobs::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list jobs by poster")?;
        models.into_iter().map(job_from_model).collect()
    }

    async fn update(
        &self,
        id: Uuid,
        patch: &JobPatch,
        expected_version: Option<i32>,
    ) -> Result<Job, ApiError> {
        let mut update = jobs::Entity::update_many().filter(jobs::Column::Id.eq(id));
        if let Some(version) = expected_version {
            update = update.filter(jobs::Column::Version.eq(version));
        }
        if let Some(ref title) = patch.title {
            update = update.col_expr(jobs::Column::Title, Expr::value(title.clone()));
        }
        if let Some(ref company) = patch.company {
            update = update.col_expr(jobs::Column::Company, Expr::value(company.clone()));
        }
        if let Some(ref description) = patch.description {
            update = update.col_expr(jobs::Column::Description, Expr::value(description.clone()));
        }
        if let Some(ref location) = patch.location {
            update = update.col_expr(jobs::Column::Location, Expr::value(location.clone()));
        }
        if let Some(job_type) = patch.job_type {
            update = update.col_expr(jobs::Column::JobType, Expr::value(job_type.as_u8() as i16));
        }
        if let Some(ref salary) = patch.salary {
            update = update.col_expr(jobs::Column::Salary, Expr::value(salary.clone()));
        }
        if let Some(level) = patch.experience_level {
            update = update.col_expr(
                jobs::Column::ExperienceLevel,
                Expr::value(level.as_u8() as i16),
            );
        }
        if let Some(ref requirements) = patch.requirements {
            update = update.col_expr(
                jobs::Column::Requirements,
                Expr::value(requirements.clone()),
            );
        }
        if let Some(ref benefits) = patch.benefits {
            update = update.col_expr(jobs::Column::Benefits, Expr::value(benefits.clone()));
        }
        if let Some(ref category) = patch.category {
            update = update.col_expr(jobs::Column::Category, Expr::value(category.clone()));
        }
        let result = update
            .col_expr(
                jobs::Column::Version,
                Expr::col(jobs::Column::Version).add(1),
            )
            .col_expr(jobs::Column::UpdatedAt, Expr::value(Utc::now()))
            .exec(&self.db)
            .await
            .context("update job")?;

        if result.rows_affected == 0 {
            let exists = jobs::Entity::find_by_id(id)
                .one(&self.db)
                .await
                .context("re-check job after update")?
                .is_some();
            if exists && expected_version.is_some() {
                return Err(ApiError::StaleVersion);
            }
            return Err(ApiError::JobNotFound);
        }

        self.find_by_id(id).await?.ok_or(ApiError::JobNotFound)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let result = jobs::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete job")?;
        Ok(result.rows_affected > 0)
    }

    async fn delete_by_poster(&self, poster_id: Uuid) -> Result<u64, ApiError> {
        let result = jobs::Entity::delete_many()
            .filter(jobs::Column::PostedBy.eq(poster_id))
            .exec(&self.db)
            .await
            .context("delete jobs by poster")?;
        Ok(result.rows_affected)
    }

    async fn moderate_many(&self, ids: &[Uuid], status: JobStatus) -> Result<u64, ApiError> {
        // Only pending postings transition; approve/reject of anything else
        // is skipped rather than reported.
        let result = jobs::Entity::update_many()
            .filter(jobs::Column::Id.is_in(ids.iter().copied()))
            .filter(jobs::Column::Status.eq(JobStatus::Pending.as_u8() as i16))
            .col_expr(jobs::Column::Status, Expr::value(status.as_u8() as i16))
            .col_expr(
                jobs::Column::Version,
                Expr::col(jobs::Column::Version).add(1),
            )
            .col_expr(jobs::Column::UpdatedAt, Expr::value(Utc::now()))
            .exec(&self.db)
            .await
            .context("bulk moderate jobs")?;
        Ok(result.rows_affected)
    }

    async fn delete_many(&self, ids: &[Uuid]) -> Result<u64, ApiError> {
        let result = jobs::Entity::delete_many()
            .filter(jobs::Column::Id.is_in(ids.iter().copied()))
            .exec(&self.db)
            .await
            .context("bulk delete jobs")?;
        Ok(result.rows_affected)
    }
}
