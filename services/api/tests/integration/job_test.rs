use linx_api::domain::types::JobPatch;
use linx_api::error::ApiError;
use linx_api::handlers::job::CreateJobRequest;
use linx_api::usecase::auth::{SigninInput, SigninUseCase, SignupInput, SignupUseCase};
use linx_api::usecase::job::{
    CreateJobInput, CreateJobUseCase, DeleteJobUseCase, ListJobsUseCase, UpdateJobUseCase,
};
use linx_auth_types::identity::Identity;
use linx_auth_types::token::validate_access_token;
use linx_domain::job::{JobStatus, JobType};
use linx_domain::pagination::PageRequest;
use linx_domain::user::Role;

use crate::helpers::{
    MockJobRepo, MockUserRepo, TEST_JWT_SECRET, identity_of, test_job, test_user,
};

fn create_input() -> CreateJobInput {
    CreateJobInput {
        title: "Backend Engineer".to_owned(),
        company: "Acme".to_owned(),
        description: "Build services".to_owned(),
        location: "Remote".to_owned(),
        job_type: JobType::FullTime,
        salary: Some("90k-120k".to_owned()),
        experience_level: None,
        requirements: None,
        benefits: None,
        category: Some("engineering".to_owned()),
    }
}

// ── CreateJob ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_stamp_posted_by_from_identity_and_start_pending() {
    let poster = test_user("acme", Role::Employer);
    let usecase = CreateJobUseCase {
        jobs: MockJobRepo::empty(),
    };

    let job = usecase
        .execute(identity_of(&poster), create_input())
        .await
        .unwrap();
    assert_eq!(job.posted_by, poster.id);
    assert_eq!(job.status, JobStatus::Pending);
    assert_eq!(job.version, 0);
}

#[tokio::test]
async fn should_reject_blank_required_fields() {
    let poster = test_user("acme", Role::Employer);
    let usecase = CreateJobUseCase {
        jobs: MockJobRepo::empty(),
    };
    let result = usecase
        .execute(
            identity_of(&poster),
            CreateJobInput {
                title: "  ".to_owned(),
                ..create_input()
            },
        )
        .await;
    assert!(matches!(result, Err(ApiError::Validation(_))));
}

#[test]
fn should_drop_client_supplied_posted_by_on_deserialization() {
    // There is no posted_by field on the request type; the key is ignored.
    let body: CreateJobRequest = serde_json::from_str(
        r#"{
            "title": "Backend Engineer",
            "company": "Acme",
            "description": "Build services",
            "location": "Remote",
            "job_type": "full-time",
            "posted_by": "11111111-1111-1111-1111-111111111111"
        }"#,
    )
    .unwrap();
    assert_eq!(body.title, "Backend Engineer");
    assert_eq!(body.job_type, JobType::FullTime);
}

// ── Update / Delete ownership ────────────────────────────────────────────────

#[tokio::test]
async fn should_forbid_update_by_non_owner_and_leave_job_unchanged() {
    let owner = test_user("owner", Role::Employer);
    let intruder = test_user("intruder", Role::User);
    let job = test_job(owner.id, JobStatus::Active);
    let repo = MockJobRepo::new(vec![job.clone()]);
    let handle = repo.handle();
    let usecase = UpdateJobUseCase { jobs: repo };

    let result = usecase
        .execute(
            identity_of(&intruder),
            job.id,
            JobPatch {
                title: Some("Defaced".to_owned()),
                ..Default::default()
            },
            None,
        )
        .await;
    assert!(matches!(result, Err(ApiError::Forbidden)));
    assert_eq!(handle.lock().unwrap()[0].title, job.title);
}

#[tokio::test]
async fn should_allow_update_by_owner_and_dev() {
    let owner = test_user("owner", Role::Employer);
    let admin = test_user("admin", Role::Dev);
    let job = test_job(owner.id, JobStatus::Active);
    let usecase = UpdateJobUseCase {
        jobs: MockJobRepo::new(vec![job.clone()]),
    };

    let updated = usecase
        .execute(
            identity_of(&owner),
            job.id,
            JobPatch {
                title: Some("Senior Backend Engineer".to_owned()),
                ..Default::default()
            },
            None,
        )
        .await
        .unwrap();
    assert_eq!(updated.title, "Senior Backend Engineer");
    assert_eq!(updated.version, 1);

    let updated = usecase
        .execute(
            identity_of(&admin),
            job.id,
            JobPatch {
                location: Some("Hybrid".to_owned()),
                ..Default::default()
            },
            None,
        )
        .await
        .unwrap();
    assert_eq!(updated.location, "Hybrid");
}

#[tokio::test]
async fn should_conflict_on_stale_job_version() {
    let owner = test_user("owner", Role::Employer);
    let job = test_job(owner.id, JobStatus::Active);
    let usecase = UpdateJobUseCase {
        jobs: MockJobRepo::new(vec![job.clone()]),
    };

    usecase
        .execute(
            identity_of(&owner),
            job.id,
            JobPatch {
                title: Some("v1".to_owned()),
                ..Default::default()
            },
            Some(0),
        )
        .await
        .unwrap();

    let result = usecase
        .execute(
            identity_of(&owner),
            job.id,
            JobPatch {
                title: Some("v2".to_owned()),
                ..Default::default()
            },
            Some(0),
        )
        .await;
    assert!(matches!(result, Err(ApiError::StaleVersion)));
}

#[tokio::test]
async fn should_forbid_delete_by_non_owner() {
    let owner = test_user("owner", Role::Employer);
    let intruder = test_user("intruder", Role::User);
    let job = test_job(owner.id, JobStatus::Active);
    let repo = MockJobRepo::new(vec![job.clone()]);
    let handle = repo.handle();
    let usecase = DeleteJobUseCase { jobs: repo };

    let result = usecase.execute(identity_of(&intruder), job.id).await;
    assert!(matches!(result, Err(ApiError::Forbidden)));
    assert_eq!(handle.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_return_not_found_for_unknown_job() {
    let someone = test_user("someone", Role::User);
    let usecase = DeleteJobUseCase {
        jobs: MockJobRepo::empty(),
    };
    let result = usecase
        .execute(identity_of(&someone), uuid::Uuid::now_v7())
        .await;
    assert!(matches!(result, Err(ApiError::JobNotFound)));
}

// ── Public listing ───────────────────────────────────────────────────────────

#[tokio::test]
async fn should_exclude_rejected_jobs_from_public_listing() {
    let poster = test_user("poster", Role::Employer);
    let active = test_job(poster.id, JobStatus::Active);
    let pending = test_job(poster.id, JobStatus::Pending);
    let rejected = test_job(poster.id, JobStatus::Rejected);
    let usecase = ListJobsUseCase {
        jobs: MockJobRepo::new(vec![active.clone(), pending.clone(), rejected.clone()]),
    };

    let listed = usecase.execute(PageRequest::default()).await.unwrap();
    let ids: Vec<_> = listed.iter().map(|j| j.id).collect();
    assert!(ids.contains(&active.id));
    assert!(ids.contains(&pending.id));
    assert!(!ids.contains(&rejected.id));
}

// ── End-to-end scenario ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_run_signup_signin_post_and_foreign_delete_scenario() {
    let users = MockUserRepo::empty();
    let users_handle = users.handle();
    let signup = SignupUseCase { users };

    // signup alice with role omitted → role is user
    let alice = signup
        .execute(SignupInput {
            username: "alice".to_owned(),
            email: "alice@x.com".to_owned(),
            password: "pw-longer-than-8".to_owned(),
            name: "Alice".to_owned(),
            role: None,
        })
        .await
        .unwrap();
    assert_eq!(alice.role, Role::User);

    // signin with the wrong password fails with 401 semantics
    let signin = SigninUseCase {
        users: MockUserRepo::shared(users_handle.clone()),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };
    let result = signin
        .execute(SigninInput {
            username: "alice".to_owned(),
            password: "wrongpw".to_owned(),
        })
        .await;
    assert!(matches!(result, Err(ApiError::InvalidCredentials)));

    // signin with the right password yields a valid token
    let out = signin
        .execute(SigninInput {
            username: "alice".to_owned(),
            password: "pw-longer-than-8".to_owned(),
        })
        .await
        .unwrap();
    let info = validate_access_token(&out.access_token, TEST_JWT_SECRET).unwrap();
    assert_eq!(info.user_id, alice.id);

    // create a job with that token; posted_by is alice regardless of payload
    let identity = Identity {
        user_id: info.user_id,
        role: info.role,
    };
    let jobs = MockJobRepo::empty();
    let jobs_handle = jobs.handle();
    let create = CreateJobUseCase { jobs };
    let job = create.execute(identity, create_input()).await.unwrap();
    assert_eq!(job.posted_by, alice.id);

    // a second unrelated user-role identity cannot delete it
    let bob = test_user("bob", Role::User);
    let delete = DeleteJobUseCase {
        jobs: MockJobRepo::shared(jobs_handle.clone()),
    };
    let result = delete.execute(identity_of(&bob), job.id).await;
    assert!(matches!(result, Err(ApiError::Forbidden)));

    // and the job is still publicly listed
    let list = ListJobsUseCase {
        jobs: MockJobRepo::shared(jobs_handle),
    };
    let listed = list.execute(PageRequest::default()).await.unwrap();
    assert!(listed.iter().any(|j| j.id == job.id));
}
