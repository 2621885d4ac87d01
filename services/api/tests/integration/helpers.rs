use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use uuid::Uuid;

use linx_api::domain::repository::{
    EmployerRepository, JobRepository, ResumeStore, UserRepository,
};
use linx_api::domain::types::{Employer, EmployerPatch, Job, JobPatch, User, UserProfilePatch};
use linx_api::error::ApiError;
use linx_auth_types::identity::Identity;
use linx_domain::job::{JobStatus, JobType};
use linx_domain::pagination::PageRequest;
use linx_domain::user::{AccountStatus, Role};

pub const TEST_JWT_SECRET: &str = "integration-test-jwt-secret";

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn test_user(username: &str, role: Role) -> User {
    let now = Utc::now();
    User {
        id: Uuid::now_v7(),
        username: username.to_owned(),
        email: format!("{username}@example.com"),
        name: username.to_owned(),
        password_hash: "unused-hash".to_owned(),
        role,
        status: AccountStatus::Active,
        phone: None,
        location: None,
        title: None,
        bio: None,
        skills: None,
        experience: None,
        education: None,
        resume_filename: None,
        resume_original_name: None,
        resume_uploaded_at: None,
        version: 0,
        created_at: now,
        updated_at: now,
    }
}

pub fn test_job(posted_by: Uuid, status: JobStatus) -> Job {
    let now = Utc::now();
    Job {
        id: Uuid::now_v7(),
        title: "Backend Engineer".to_owned(),
        company: "Acme".to_owned(),
        description: "Build services".to_owned(),
        location: "Remote".to_owned(),
        job_type: JobType::FullTime,
        salary: None,
        experience_level: None,
        requirements: None,
        benefits: None,
        category: None,
        posted_by,
        status,
        version: 0,
        created_at: now,
        updated_at: now,
    }
}

pub fn test_employer(owner: Option<Uuid>) -> Employer {
    let now = Utc::now();
    Employer {
        id: Uuid::now_v7(),
        name: "Acme HR".to_owned(),
        email: format!("hr-{}@acme.example", Uuid::new_v4()),
        company_name: "Acme".to_owned(),
        verified: false,
        status: AccountStatus::Active,
        website: None,
        location: None,
        phone: None,
        description: None,
        owner_user_id: owner,
        version: 0,
        created_at: now,
        updated_at: now,
    }
}

pub fn identity_of(user: &User) -> Identity {
    Identity {
        user_id: user.id,
        role: user.role,
    }
}

fn window<T: Clone>(items: &[T], page: PageRequest) -> Vec<T> {
    let PageRequest { per_page, page } = page.clamped();
    items
        .iter()
        .skip(((page - 1) * per_page) as usize)
        .take(per_page as usize)
        .cloned()
        .collect()
}

// ── MockUserRepo ─────────────────────────────────────────────────────────────

pub struct MockUserRepo {
    pub users: Arc<Mutex<Vec<User>>>,
}

impl MockUserRepo {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(Mutex::new(users)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Shared handle for post-execution inspection.
    pub fn handle(&self) -> Arc<Mutex<Vec<User>>> {
        Arc::clone(&self.users)
    }

    pub fn shared(users: Arc<Mutex<Vec<User>>>) -> Self {
        Self { users }
    }
}

impl UserRepository for MockUserRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ApiError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn create(&self, user: &User) -> Result<(), ApiError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.username == user.username) {
            return Err(ApiError::UsernameTaken);
        }
        if users.iter().any(|u| u.email == user.email) {
            return Err(ApiError::EmailTaken);
        }
        users.push(user.clone());
        Ok(())
    }

    async fn list_candidates(&self, page: PageRequest) -> Result<Vec<User>, ApiError> {
        let users = self.users.lock().unwrap();
        let candidates: Vec<User> = users
            .iter()
            .filter(|u| u.role == Role::User)
            .cloned()
            .collect();
        Ok(window(&candidates, page))
    }

    async fn list_all(&self, page: PageRequest) -> Result<Vec<User>, ApiError> {
        let users = self.users.lock().unwrap();
        Ok(window(&users, page))
    }

    async fn update_profile(
        &self,
        id: Uuid,
        patch: &UserProfilePatch,
        expected_version: Option<i32>,
    ) -> Result<User, ApiError> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(ApiError::UserNotFound)?;
        if let Some(version) = expected_version {
            if version != user.version {
                return Err(ApiError::StaleVersion);
            }
        }
        if let Some(ref name) = patch.name {
            user.name = name.clone();
        }
        if let Some(ref email) = patch.email {
            user.email = email.clone();
        }
        if let Some(ref phone) = patch.phone {
            user.phone = Some(phone.clone());
        }
        if let Some(ref location) = patch.location {
            user.location = Some(location.clone());
        }
        if let Some(ref title) = patch.title {
            user.title = Some(title.clone());
        }
        if let Some(ref bio) = patch.bio {
            user.bio = Some(bio.clone());
        }
        if let Some(ref skills) = patch.skills {
            user.skills = Some(skills.clone());
        }
        if let Some(ref experience) = patch.experience {
            user.experience = Some(experience.clone());
        }
        if let Some(ref education) = patch.education {
            user.education = Some(education.clone());
        }
        user.version += 1;
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn set_resume(
        &self,
        id: Uuid,
        filename: &str,
        original_name: &str,
        uploaded_at: chrono::DateTime<Utc>,
    ) -> Result<(), ApiError> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(ApiError::UserNotFound)?;
        user.resume_filename = Some(filename.to_owned());
        user.resume_original_name = Some(original_name.to_owned());
        user.resume_uploaded_at = Some(uploaded_at);
        user.version += 1;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok(users.len() < before)
    }

    async fn set_status_many(
        &self,
        ids: &[Uuid],
        status: AccountStatus,
    ) -> Result<u64, ApiError> {
        let mut users = self.users.lock().unwrap();
        let mut modified = 0;
        for user in users.iter_mut() {
            if ids.contains(&user.id) && user.status != status {
                user.status = status;
                user.version += 1;
                modified += 1;
            }
        }
        Ok(modified)
    }

    async fn delete_many(&self, ids: &[Uuid]) -> Result<u64, ApiError> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| !ids.contains(&u.id));
        Ok((before - users.len()) as u64)
    }
}

// ── MockJobRepo ──────────────────────────────────────────────────────────────

pub struct MockJobRepo {
    pub jobs: Arc<Mutex<Vec<Job>>>,
}

impl MockJobRepo {
    pub fn new(jobs: Vec<Job>) -> Self {
        Self {
            jobs: Arc::new(Mutex::new(jobs)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn handle(&self) -> Arc<Mutex<Vec<Job>>> {
        Arc::clone(&self.jobs)
    }

    pub fn shared(jobs: Arc<Mutex<Vec<Job>>>) -> Self {
        Self { jobs }
    }
}

impl JobRepository for MockJobRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Job>, ApiError> {
        Ok(self.jobs.lock().unwrap().iter().find(|j| j.id == id).cloned())
    }

    async fn create(&self, job: &Job) -> Result<(), ApiError> {
        self.jobs.lock().unwrap().push(job.clone());
        Ok(())
    }

    async fn list_public(&self, page: PageRequest) -> Result<Vec<Job>, ApiError> {
        let jobs = self.jobs.lock().unwrap();
        let visible: Vec<Job> = jobs
            .iter()
            .filter(|j| j.status.publicly_visible())
            .cloned()
            .collect();
        Ok(window(&visible, page))
    }

    async fn list_all(&self, page: PageRequest) -> Result<Vec<Job>, ApiError> {
        let jobs = self.jobs.lock().unwrap();
        Ok(window(&jobs, page))
    }

    async fn list_by_poster(&self, poster_id: Uuid) -> Result<Vec<Job>, ApiError> {
        Ok(self
            .jobs
            .lock()
            .unwrap()
            .iter()
            .filter(|j| j.posted_by == poster_id)
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        id: Uuid,
        patch: &JobPatch,
        expected_version: Option<i32>,
    ) -> Result<Job, ApiError> {
        let mut jobs = self.jobs.lock().unwrap();
        let job = jobs
            .iter_mut()
            .find(|j| j.id == id)
            .ok_or(ApiError::JobNotFound)?;
        if let Some(version) = expected_version {
            if version != job.version {
                return Err(ApiError::StaleVersion);
            }
        }
        if let Some(ref title) = patch.title {
            job.title = title.clone();
        }
        if let Some(ref company) = patch.company {
            job.company = company.clone();
        }
        if let Some(ref description) = patch.description {
            job.description = description.clone();
        }
        if let Some(ref location) = patch.location {
            job.location = location.clone();
        }
        if let Some(job_type) = patch.job_type {
            job.job_type = job_type;
        }
        if let Some(ref salary) = patch.salary {
            job.salary = Some(salary.clone());
        }
        if let Some(level) = patch.experience_level {
            job.experience_level = Some(level);
        }
        if let Some(ref requirements) = patch.requirements {
            job.requirements = Some(requirements.clone());
        }
        if let Some(ref benefits) = patch.benefits {
            job.benefits = Some(benefits.clone());
        }
        if let Some(ref category) = patch.category {
            job.category = Some(category.clone());
        }
        job.version += 1;
        job.updated_at = Utc::now();
        Ok(job.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let mut jobs = self.jobs.lock().unwrap();
        let before = jobs.len();
        jobs.retain(|j| j.id != id);
        Ok(jobs.len() < before)
    }

    async fn delete_by_poster(&self, poster_id: Uuid) -> Result<u64, ApiError> {
        let mut jobs = self.jobs.lock().unwrap();
        let before = jobs.len();
        jobs.retain(|j| j.posted_by != poster_id);
        Ok((before - jobs.len()) as u64)
    }

    async fn moderate_many(&self, ids: &[Uuid], status: JobStatus) -> Result<u64, ApiError> {
        let mut jobs = self.jobs.lock().unwrap();
        let mut modified = 0;
        for job in jobs.iter_mut() {
            if ids.contains(&job.id) && job.status == JobStatus::Pending {
                job.status = status;
                job.version += 1;
                modified += 1;
            }
        }
        Ok(modified)
    }

    async fn delete_many(&self, ids: &[Uuid]) -> Result<u64, ApiError> {
        let mut jobs = self.jobs.lock().unwrap();
        let before = jobs.len();
        jobs.retain(|j| !ids.contains(&j.id));
        Ok((before - jobs.len()) as u64)
    }
}

// ── MockEmployerRepo ─────────────────────────────────────────────────────────

pub struct MockEmployerRepo {
    pub employers: Arc<Mutex<Vec<Employer>>>,
}

impl MockEmployerRepo {
    pub fn new(employers: Vec<Employer>) -> Self {
        Self {
            employers: Arc::new(Mutex::new(employers)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn handle(&self) -> Arc<Mutex<Vec<Employer>>> {
        Arc::clone(&self.employers)
    }
}

impl EmployerRepository for MockEmployerRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Employer>, ApiError> {
        Ok(self
            .employers
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == id)
            .cloned())
    }

    async fn create(&self, employer: &Employer) -> Result<(), ApiError> {
        let mut employers = self.employers.lock().unwrap();
        if employers.iter().any(|e| e.email == employer.email) {
            return Err(ApiError::EmailTaken);
        }
        employers.push(employer.clone());
        Ok(())
    }

    async fn list(&self, page: PageRequest) -> Result<Vec<Employer>, ApiError> {
        let employers = self.employers.lock().unwrap();
        Ok(window(&employers, page))
    }

    async fn update(
        &self,
        id: Uuid,
        patch: &EmployerPatch,
        expected_version: Option<i32>,
    ) -> Result<Employer, ApiError> {
        let mut employers = self.employers.lock().unwrap();
        let employer = employers
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(ApiError::EmployerNotFound)?;
        if let Some(version) = expected_version {
            if version != employer.version {
                return Err(ApiError::StaleVersion);
            }
        }
        if let Some(ref name) = patch.name {
            employer.name = name.clone();
        }
        if let Some(ref email) = patch.email {
            employer.email = email.clone();
        }
        if let Some(ref company_name) = patch.company_name {
            employer.company_name = company_name.clone();
        }
        if let Some(ref website) = patch.website {
            employer.website = Some(website.clone());
        }
        if let Some(ref location) = patch.location {
            employer.location = Some(location.clone());
        }
        if let Some(ref phone) = patch.phone {
            employer.phone = Some(phone.clone());
        }
        if let Some(ref description) = patch.description {
            employer.description = Some(description.clone());
        }
        employer.version += 1;
        employer.updated_at = Utc::now();
        Ok(employer.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let mut employers = self.employers.lock().unwrap();
        let before = employers.len();
        employers.retain(|e| e.id != id);
        Ok(employers.len() < before)
    }

    async fn set_verified_many(&self, ids: &[Uuid]) -> Result<u64, ApiError> {
        let mut employers = self.employers.lock().unwrap();
        let mut modified = 0;
        for employer in employers.iter_mut() {
            if ids.contains(&employer.id) && !employer.verified {
                employer.verified = true;
                employer.version += 1;
                modified += 1;
            }
        }
        Ok(modified)
    }

    async fn set_status_many(
        &self,
        ids: &[Uuid],
        status: AccountStatus,
    ) -> Result<u64, ApiError> {
        let mut employers = self.employers.lock().unwrap();
        let mut modified = 0;
        for employer in employers.iter_mut() {
            if ids.contains(&employer.id) && employer.status != status {
                employer.status = status;
                employer.version += 1;
                modified += 1;
            }
        }
        Ok(modified)
    }

    async fn delete_many(&self, ids: &[Uuid]) -> Result<u64, ApiError> {
        let mut employers = self.employers.lock().unwrap();
        let before = employers.len();
        employers.retain(|e| !ids.contains(&e.id));
        Ok((before - employers.len()) as u64)
    }
}

// ── MockResumeStore ──────────────────────────────────────────────────────────

pub struct MockResumeStore {
    pub files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MockResumeStore {
    pub fn empty() -> Self {
        Self {
            files: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn handle(&self) -> Arc<Mutex<HashMap<String, Vec<u8>>>> {
        Arc::clone(&self.files)
    }

    pub fn shared(files: Arc<Mutex<HashMap<String, Vec<u8>>>>) -> Self {
        Self { files }
    }

    fn key(user_id: Uuid, extension: &str) -> String {
        format!("{user_id}.{extension}")
    }
}

impl ResumeStore for MockResumeStore {
    async fn save(&self, user_id: Uuid, extension: &str, data: &[u8]) -> Result<(), ApiError> {
        self.files
            .lock()
            .unwrap()
            .insert(Self::key(user_id, extension), data.to_vec());
        Ok(())
    }

    async fn load(&self, user_id: Uuid, extension: &str) -> Result<Option<Vec<u8>>, ApiError> {
        Ok(self
            .files
            .lock()
            .unwrap()
            .get(&Self::key(user_id, extension))
            .cloned())
    }

    async fn remove(&self, user_id: Uuid, extension: &str) -> Result<bool, ApiError> {
        Ok(self
            .files
            .lock()
            .unwrap()
            .remove(&Self::key(user_id, extension))
            .is_some())
    }
}
