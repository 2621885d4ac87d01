use chrono::{DateTime, Utc};
use uuid::Uuid;

use linx_domain::job::{ExperienceLevel, JobStatus, JobType};
use linx_domain::user::{AccountStatus, Role};

/// A user account. `password_hash` stays inside the service — response
/// types never carry it.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub role: Role,
    pub status: AccountStatus,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub skills: Option<String>,
    pub experience: Option<String>,
    pub education: Option<String>,
    pub resume_filename: Option<String>,
    pub resume_original_name: Option<String>,
    pub resume_uploaded_at: Option<DateTime<Utc>>,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// A resume exists only when both the stored filename and the original
    /// filename are present — a dangling filename without metadata must not
    /// be reported as a resume.
    pub fn has_resume(&self) -> bool {
        self.resume_filename.is_some() && self.resume_original_name.is_some()
    }
}

/// An employer profile, optionally linked to an owning user account.
#[derive(Debug, Clone)]
pub struct Employer {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub company_name: String,
    pub verified: bool,
    pub status: AccountStatus,
    pub website: Option<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub description: Option<String>,
    pub owner_user_id: Option<Uuid>,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A job posting.
#[derive(Debug, Clone)]
pub struct Job {
    pub id: Uuid,
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
    pub posted_by: Uuid,
    pub status: JobStatus,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Profile fields a user may change about themselves. This struct *is* the
/// allow-list: `role`, `status`, and the resume reference have no field
/// here, so they cannot be smuggled through an update.
#[derive(Debug, Clone, Default)]
pub struct UserProfilePatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub skills: Option<String>,
    pub experience: Option<String>,
    pub education: Option<String>,
}

impl UserProfilePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.location.is_none()
            && self.title.is_none()
            && self.bio.is_none()
            && self.skills.is_none()
            && self.experience.is_none()
            && self.education.is_none()
    }
}

/// Employer fields the owner may change. `verified` and `status` are
/// deliberately absent — those transitions are dev-only bulk actions.
#[derive(Debug, Clone, Default)]
pub struct EmployerPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub company_name: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub description: Option<String>,
}

impl EmployerPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.company_name.is_none()
            && self.website.is_none()
            && self.location.is_none()
            && self.phone.is_none()
            && self.description.is_none()
    }
}

/// Job fields the poster may change. `posted_by` and `status` are absent:
/// ownership is immutable and status moves only through moderation.
#[derive(Debug, Clone, Default)]
pub struct JobPatch {
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
}

impl JobPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.company.is_none()
            && self.description.is_none()
            && self.location.is_none()
            && self.job_type.is_none()
            && self.salary.is_none()
            && self.experience_level.is_none()
            && self.requirements.is_none()
            && self.benefits.is_none()
            && self.category.is_none()
    }
}

/// Validate a username: alphanumeric + hyphen + underscore, 3-30 chars.
pub fn validate_username(username: &str) -> bool {
    if username.len() < 3 || username.len() > 30 {
        return false;
    }
    username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Minimal email shape check: one `@` with non-empty local part and a
/// dotted domain, no whitespace.
pub fn validate_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}
