//! Bearer-token identity extractor and the ownership predicate.

use axum::extract::{FromRef, FromRequestParts, OptionalFromRequestParts};
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use http::request::Parts;
use uuid::Uuid;

use linx_domain::user::Role;

use crate::token::validate_access_token;

/// JWT verification context resolved from application state.
///
/// Services implement `FromRef<AppState> for JwtVerifier` so the
/// [`Identity`] extractor can reach the signing secret.
#[derive(Debug, Clone)]
pub struct JwtVerifier {
    pub secret: String,
}

/// Authenticated caller resolved from the `Authorization: Bearer` header.
///
/// Rejects with 401 `UNAUTHENTICATED` when the header is absent or not a
/// bearer credential, and 401 `INVALID_TOKEN` when a presented token fails
/// validation (bad signature, expired, malformed). Role enforcement (403)
/// is done by handlers after extraction.
#[derive(Debug, Clone, Copy)]
pub struct Identity {
    pub user_id: Uuid,
    pub role: Role,
}

impl Identity {
    /// The centralized ownership predicate: an identity may act on a
    /// resource when it owns it or holds the superuser role.
    pub fn can_manage(&self, owner: Uuid) -> bool {
        self.user_id == owner || self.role == Role::Dev
    }

    /// [`can_manage`](Self::can_manage) over an optional owner; an
    /// ownerless resource is manageable only by `dev`.
    pub fn can_manage_opt(&self, owner: Option<Uuid>) -> bool {
        match owner {
            Some(owner) => self.can_manage(owner),
            None => self.role == Role::Dev,
        }
    }
}

/// Rejection for [`Identity`]: distinguishes a missing credential from a
/// failing one.
#[derive(Debug, thiserror::Error)]
pub enum AuthRejection {
    #[error("missing bearer credentials")]
    Unauthenticated,
    #[error("invalid or expired token")]
    InvalidToken,
}

impl AuthRejection {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::InvalidToken => "INVALID_TOKEN",
        }
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": self.to_string(),
            "kind": self.kind(),
        });
        (StatusCode::UNAUTHORIZED, axum::Json(body)).into_response()
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    let header = parts
        .headers
        .get(http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())?;
    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
}

fn identity_from_parts(parts: &Parts, secret: &str) -> Result<Identity, AuthRejection> {
    let token = bearer_token(parts).ok_or(AuthRejection::Unauthenticated)?;
    let info = validate_access_token(token, secret).map_err(|e| {
        tracing::debug!(error = %e, "token validation failed");
        AuthRejection::InvalidToken
    })?;
    Ok(Identity {
        user_id: info.user_id,
        role: info.role,
    })
}

// axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
// Extraction is synchronous; return a 'static async move block.
impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
    JwtVerifier: FromRef<S>,
{
    type Rejection = AuthRejection;

    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let verifier = JwtVerifier::from_ref(state);
        let result = identity_from_parts(parts, &verifier.secret);
        async move { result }
    }
}

// `Option<Identity>` for endpoints that are public but personalize when a
// valid credential is presented (e.g. employer signup). A present-but-bad
// token yields `None` rather than a rejection.
impl<S> OptionalFromRequestParts<S> for Identity
where
    S: Send + Sync,
    JwtVerifier: FromRef<S>,
{
    type Rejection = std::convert::Infallible;

    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Option<Self>, Self::Rejection>> + Send {
        let verifier = JwtVerifier::from_ref(state);
        let result = identity_from_parts(parts, &verifier.secret).ok();
        async move { Ok(result) }
    }
}
