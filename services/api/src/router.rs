use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;

use linx_core::health::{healthz, readyz};
use linx_core::middleware::request_id_layer;

use crate::handlers::{admin, auth, employer, job, resume, user};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    // Resume uploads carry document files; everything else stays at the
    // default body limit.
    let resume_routes = Router::new()
        .route(
            "/api/users/{id}/resume",
            post(resume::upload_resume).get(resume::download_resume),
        )
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024));

    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Auth
        .route("/auth/signup", post(auth::signup))
        .route("/auth/signin", post(auth::signin))
        .route("/auth/signout", get(auth::signout))
        .route("/auth/me", get(auth::me))
        // Jobs
        .route("/api/jobs", get(job::list_jobs))
        .route("/api/jobs", post(job::create_job))
        .route("/api/jobs/employer/{employer_id}", get(job::list_employer_jobs))
        .route("/api/jobs/{id}", put(job::update_job))
        .route("/api/jobs/{id}", delete(job::delete_job))
        // Users
        .route("/api/users", get(user::list_candidates))
        .route("/api/users/{id}", get(user::get_user))
        .route("/api/users/{id}", put(user::update_user))
        .route("/api/users/{id}", delete(user::delete_user))
        .merge(resume_routes)
        // Employers
        .route("/api/employers", post(employer::create_employer))
        .route("/api/employers", get(employer::list_employers))
        .route("/api/employers/{id}", get(employer::get_employer))
        .route("/api/employers/{id}", put(employer::update_employer))
        .route("/api/employers/{id}", delete(employer::delete_employer))
        // Admin (dev only)
        .route("/api/admin/users", get(admin::list_users))
        .route("/api/admin/users/bulk", post(admin::bulk_users))
        .route("/api/admin/jobs", get(admin::list_jobs))
        .route("/api/admin/jobs/bulk", post(admin::bulk_jobs))
        .route("/api/admin/employers", get(admin::list_employers))
        .route("/api/admin/employers/bulk", post(admin::bulk_employers))
        .with_state(state)
        .layer(request_id_layer())
        .layer(TraceLayer::new_for_http())
}
