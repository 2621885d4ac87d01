use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use linx_auth_types::cookie::{clear_session_cookie, set_session_cookie};
use linx_auth_types::identity::Identity;
use linx_domain::user::Role;

use crate::error::ApiError;
use crate::handlers::user::UserResponse;
use crate::state::AppState;
use crate::usecase::auth::{SigninInput, SigninUseCase, SignupInput, SignupUseCase};
use crate::usecase::user::GetUserUseCase;

// ── POST /auth/signup ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub name: String,
    /// `user` (default) or `employer`; requesting `dev` is rejected.
    pub role: Option<Role>,
}

pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let usecase = SignupUseCase {
        users: state.user_repo(),
    };
    let user = usecase
        .execute(SignupInput {
            username: body.username,
            email: body.email,
            password: body.password,
            name: body.name,
            role: body.role,
        })
        .await?;
    tracing::info!(user_id = %user.id, username = %user.username, "user signed up");
    Ok((StatusCode::CREATED, Json(user.into())))
}

// ── POST /auth/signin ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SigninRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct SigninResponse {
    pub token: String,
    pub access_token_exp: u64,
    pub user: UserResponse,
}

pub async fn signin(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<SigninRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = SigninUseCase {
        users: state.user_repo(),
        jwt_secret: state.config.jwt_secret.clone(),
    };
    let out = usecase
        .execute(SigninInput {
            username: body.username,
            password: body.password,
        })
        .await?;

    tracing::info!(user_id = %out.user.id, "user signed in");

    // Legacy `t` cookie: a transport hint for the SPA; the middleware only
    // reads the Authorization header.
    let jar = set_session_cookie(
        jar,
        out.access_token.clone(),
        state.config.cookie_domain.clone(),
    );

    Ok((
        jar,
        Json(SigninResponse {
            token: out.access_token,
            access_token_exp: out.access_token_exp,
            user: out.user.into(),
        }),
    ))
}

// ── GET /auth/signout ────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct SignoutResponse {
    pub message: String,
}

pub async fn signout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let jar = clear_session_cookie(jar, state.config.cookie_domain.clone());
    (
        jar,
        Json(SignoutResponse {
            message: "signed out".into(),
        }),
    )
}

// ── GET /auth/me ─────────────────────────────────────────────────────────────

pub async fn me(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, ApiError> {
    let usecase = GetUserUseCase {
        users: state.user_repo(),
    };
    let user = usecase.execute(identity.user_id).await?;
    Ok(Json(user.into()))
}
