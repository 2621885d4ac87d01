use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use linx_auth_types::identity::JwtVerifier;

use crate::config::ApiConfig;
use crate::infra::db::{DbEmployerRepository, DbJobRepository, DbUserRepository};
use crate::infra::storage::LocalResumeStore;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<ApiConfig>,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn employer_repo(&self) -> DbEmployerRepository {
        DbEmployerRepository {
            db: self.db.clone(),
        }
    }

    pub fn job_repo(&self) -> DbJobRepository {
        DbJobRepository {
            db: self.db.clone(),
        }
    }

    pub fn resume_store(&self) -> LocalResumeStore {
        LocalResumeStore {
            root: PathBuf::from(&self.config.resume_dir),
        }
    }
}

impl FromRef<AppState> for JwtVerifier {
    fn from_ref(state: &AppState) -> Self {
        JwtVerifier {
            secret: state.config.jwt_secret.clone(),
        }
    }
}
