use chrono::Utc;
use uuid::Uuid;

use linx_auth_types::token::issue_access_token;
use linx_domain::user::{AccountStatus, Role};

use crate::domain::repository::UserRepository;
use crate::domain::types::{User, validate_email, validate_username};
use crate::error::ApiError;
use crate::password::{hash_password, verify_password};

// ── Signup ───────────────────────────────────────────────────────────────────

pub struct SignupInput {
    pub username: String,
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: Option<Role>,
}

pub struct SignupUseCase<R: UserRepository> {
    pub users: R,
}

impl<R: UserRepository> SignupUseCase<R> {
    pub async fn execute(&self, input: SignupInput) -> Result<User, ApiError> {
        let username = input.username.trim().to_owned();
        let email = input.email.trim().to_lowercase();

        if !validate_username(&username) {
            return Err(ApiError::Validation("invalid username".into()));
        }
        if !validate_email(&email) {
            return Err(ApiError::Validation("invalid email".into()));
        }
        if input.password.len() < 8 {
            return Err(ApiError::Validation("password too short".into()));
        }
        let role = input.role.unwrap_or(Role::User);
        if role == Role::Dev {
            // Dev accounts are seeded, never self-assigned.
            return Err(ApiError::Forbidden);
        }

        let password_hash = hash_password(&input.password)?;
        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            username,
            email,
            name: input.name,
            password_hash,
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
        };
        self.users.create(&user).await?;
        Ok(user)
    }
}

// ── Signin ───────────────────────────────────────────────────────────────────

pub struct SigninInput {
    pub username: String,
    pub password: String,
}

#[derive(Debug)]
pub struct SigninOutput {
    pub user: User,
    pub access_token: String,
    pub access_token_exp: u64,
}

pub struct SigninUseCase<R: UserRepository> {
    pub users: R,
    pub jwt_secret: String,
}

impl<R: UserRepository> SigninUseCase<R> {
    pub async fn execute(&self, input: SigninInput) -> Result<SigninOutput, ApiError> {
        let user = self
            .users
            .find_by_username(input.username.trim())
            .await?
            .ok_or(ApiError::InvalidCredentials)?;

        if !verify_password(&input.password, &user.password_hash)? {
            return Err(ApiError::InvalidCredentials);
        }
        if user.status == AccountStatus::Suspended {
            return Err(ApiError::Forbidden);
        }

        let (access_token, access_token_exp) =
            issue_access_token(user.id, user.role, &self.jwt_secret)
                .map_err(|e| ApiError::Internal(e.into()))?;

        Ok(SigninOutput {
            user,
            access_token,
            access_token_exp,
        })
    }
}
