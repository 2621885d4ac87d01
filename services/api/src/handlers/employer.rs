use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use linx_auth_types::identity::Identity;
use linx_domain::pagination::PageRequest;
use linx_domain::user::AccountStatus;

use crate::domain::types::{Employer, EmployerPatch};
use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::employer::{
    CreateEmployerInput, CreateEmployerUseCase, DeleteEmployerUseCase, GetEmployerUseCase,
    ListEmployersUseCase, UpdateEmployerUseCase,
};

#[derive(Serialize)]
pub struct EmployerResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub company_name: String,
    pub verified: bool,
    pub status: AccountStatus,
    pub website: Option<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub description: Option<String>,
    pub owner_user_id: Option<String>,
    pub version: i32,
    #[serde(serialize_with = "linx_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "linx_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Employer> for EmployerResponse {
    fn from(employer: Employer) -> Self {
        Self {
            id: employer.id.to_string(),
            name: employer.name,
            email: employer.email,
            company_name: employer.company_name,
            verified: employer.verified,
            status: employer.status,
            website: employer.website,
            location: employer.location,
            phone: employer.phone,
            description: employer.description,
            owner_user_id: employer.owner_user_id.map(|id| id.to_string()),
            version: employer.version,
            created_at: employer.created_at,
            updated_at: employer.updated_at,
        }
    }
}

// ── POST /api/employers ──────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateEmployerRequest {
    pub name: String,
    pub email: String,
    pub company_name: String,
    pub website: Option<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub description: Option<String>,
}

/// Creation is public; a valid bearer token, when present, links the new
/// record to the caller as its owner.
pub async fn create_employer(
    identity: Option<Identity>,
    State(state): State<AppState>,
    Json(body): Json<CreateEmployerRequest>,
) -> Result<(StatusCode, Json<EmployerResponse>), ApiError> {
    let usecase = CreateEmployerUseCase {
        employers: state.employer_repo(),
    };
    let employer = usecase
        .execute(
            CreateEmployerInput {
                name: body.name,
                email: body.email,
                company_name: body.company_name,
                website: body.website,
                location: body.location,
                phone: body.phone,
                description: body.description,
            },
            identity.map(|i| i.user_id),
        )
        .await?;
    tracing::info!(employer_id = %employer.id, "employer created");
    Ok((StatusCode::CREATED, Json(employer.into())))
}

// ── GET /api/employers ───────────────────────────────────────────────────────

pub async fn list_employers(
    _identity: Identity,
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Vec<EmployerResponse>>, ApiError> {
    let usecase = ListEmployersUseCase {
        employers: state.employer_repo(),
    };
    let employers = usecase.execute(page).await?;
    Ok(Json(employers.into_iter().map(Into::into).collect()))
}

// ── GET /api/employers/{id} ──────────────────────────────────────────────────

pub async fn get_employer(
    _identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EmployerResponse>, ApiError> {
    let usecase = GetEmployerUseCase {
        employers: state.employer_repo(),
    };
    let employer = usecase.execute(id).await?;
    Ok(Json(employer.into()))
}

// ── PUT /api/employers/{id} ──────────────────────────────────────────────────

/// `verified` and `status` are deliberately not deserialized — those
/// transitions belong to the dev bulk-action surface.
#[derive(Deserialize)]
pub struct UpdateEmployerRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub company_name: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub description: Option<String>,
    pub version: Option<i32>,
}

pub async fn update_employer(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateEmployerRequest>,
) -> Result<Json<EmployerResponse>, ApiError> {
    let patch = EmployerPatch {
        name: body.name,
        email: body.email,
        company_name: body.company_name,
        website: body.website,
        location: body.location,
        phone: body.phone,
        description: body.description,
    };
    let usecase = UpdateEmployerUseCase {
        employers: state.employer_repo(),
    };
    let employer = usecase.execute(identity, id, patch, body.version).await?;
    Ok(Json(employer.into()))
}

// ── DELETE /api/employers/{id} ───────────────────────────────────────────────

#[derive(Serialize)]
pub struct DeleteEmployerResponse {
    pub message: String,
}

pub async fn delete_employer(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteEmployerResponse>, ApiError> {
    let usecase = DeleteEmployerUseCase {
        employers: state.employer_repo(),
    };
    usecase.execute(identity, id).await?;
    Ok(Json(DeleteEmployerResponse {
        message: "employer deleted".into(),
    }))
}
