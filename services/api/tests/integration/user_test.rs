use linx_api::domain::types::UserProfilePatch;
use linx_api::error::ApiError;
use linx_api::handlers::user::UpdateUserRequest;
use linx_api::usecase::user::{DeleteUserUseCase, GetUserUseCase, UpdateUserUseCase};
use linx_domain::job::JobStatus;
use linx_domain::user::{AccountStatus, Role};
use uuid::Uuid;

use crate::helpers::{MockJobRepo, MockUserRepo, identity_of, test_job, test_user};

// ── GetUser ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_return_user_not_found_for_unknown_id() {
    let usecase = GetUserUseCase {
        users: MockUserRepo::empty(),
    };
    let result = usecase.execute(Uuid::now_v7()).await;
    assert!(matches!(result, Err(ApiError::UserNotFound)));
}

// ── UpdateUser ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_apply_own_profile_update() {
    let user = test_user("alice", Role::User);
    let usecase = UpdateUserUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
    };

    let updated = usecase
        .execute(
            identity_of(&user),
            user.id,
            UserProfilePatch {
                name: Some("Alice L.".to_owned()),
                title: Some("Engineer".to_owned()),
                ..Default::default()
            },
            None,
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Alice L.");
    assert_eq!(updated.title.as_deref(), Some("Engineer"));
    assert_eq!(updated.version, user.version + 1);
}

#[tokio::test]
async fn should_forbid_update_of_another_user_for_non_dev() {
    let alice = test_user("alice", Role::User);
    let mallory = test_user("mallory", Role::Employer);
    let usecase = UpdateUserUseCase {
        users: MockUserRepo::new(vec![alice.clone(), mallory.clone()]),
    };

    let result = usecase
        .execute(
            identity_of(&mallory),
            alice.id,
            UserProfilePatch {
                name: Some("Hacked".to_owned()),
                ..Default::default()
            },
            None,
        )
        .await;
    assert!(matches!(result, Err(ApiError::Forbidden)));
}

#[tokio::test]
async fn should_let_dev_update_any_user() {
    let alice = test_user("alice", Role::User);
    let admin = test_user("admin", Role::Dev);
    let usecase = UpdateUserUseCase {
        users: MockUserRepo::new(vec![alice.clone(), admin.clone()]),
    };

    let updated = usecase
        .execute(
            identity_of(&admin),
            alice.id,
            UserProfilePatch {
                location: Some("Berlin".to_owned()),
                ..Default::default()
            },
            None,
        )
        .await
        .unwrap();
    assert_eq!(updated.location.as_deref(), Some("Berlin"));
}

#[tokio::test]
async fn should_reject_empty_patch() {
    let user = test_user("alice", Role::User);
    let usecase = UpdateUserUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
    };
    let result = usecase
        .execute(
            identity_of(&user),
            user.id,
            UserProfilePatch::default(),
            None,
        )
        .await;
    assert!(matches!(result, Err(ApiError::Validation(_))));
}

#[tokio::test]
async fn should_drop_disallowed_fields_on_deserialization() {
    // The request type is the allow-list: role/status/resume keys in the
    // JSON body simply do not exist on the struct.
    let body: UpdateUserRequest = serde_json::from_str(
        r#"{
            "name": "Still Alice",
            "role": "dev",
            "status": "suspended",
            "resume_filename": "evil.pdf"
        }"#,
    )
    .unwrap();
    assert_eq!(body.name.as_deref(), Some("Still Alice"));

    // And the persisted record keeps its role/status whatever the payload said.
    let user = test_user("alice", Role::User);
    let repo = MockUserRepo::new(vec![user.clone()]);
    let handle = repo.handle();
    let usecase = UpdateUserUseCase { users: repo };
    usecase
        .execute(
            identity_of(&user),
            user.id,
            UserProfilePatch {
                name: body.name,
                email: body.email,
                phone: body.phone,
                location: body.location,
                title: body.title,
                bio: body.bio,
                skills: body.skills,
                experience: body.experience,
                education: body.education,
            },
            body.version,
        )
        .await
        .unwrap();

    let stored = handle.lock().unwrap()[0].clone();
    assert_eq!(stored.name, "Still Alice");
    assert_eq!(stored.role, Role::User);
    assert_eq!(stored.status, AccountStatus::Active);
    assert!(stored.resume_filename.is_none());
}

#[tokio::test]
async fn should_reject_stale_version_and_accept_current() {
    let user = test_user("alice", Role::User);
    let repo = MockUserRepo::new(vec![user.clone()]);
    let handle = repo.handle();
    let usecase = UpdateUserUseCase { users: repo };

    // First write with the version the client read.
    let updated = usecase
        .execute(
            identity_of(&user),
            user.id,
            UserProfilePatch {
                bio: Some("first".to_owned()),
                ..Default::default()
            },
            Some(0),
        )
        .await
        .unwrap();
    assert_eq!(updated.version, 1);

    // Replaying the same version now conflicts and changes nothing.
    let result = usecase
        .execute(
            identity_of(&user),
            user.id,
            UserProfilePatch {
                bio: Some("second".to_owned()),
                ..Default::default()
            },
            Some(0),
        )
        .await;
    assert!(matches!(result, Err(ApiError::StaleVersion)));
    assert_eq!(handle.lock().unwrap()[0].bio.as_deref(), Some("first"));
}

// ── DeleteUser ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_cascade_employer_delete_to_their_jobs() {
    let employer = test_user("acme", Role::Employer);
    let other = test_user("other", Role::Employer);
    let jobs = vec![
        test_job(employer.id, JobStatus::Active),
        test_job(employer.id, JobStatus::Pending),
        test_job(employer.id, JobStatus::Rejected),
        test_job(other.id, JobStatus::Active),
    ];
    let job_repo = MockJobRepo::new(jobs);
    let jobs_handle = job_repo.handle();
    let usecase = DeleteUserUseCase {
        users: MockUserRepo::new(vec![employer.clone(), other.clone()]),
        jobs: job_repo,
    };

    let out = usecase
        .execute(identity_of(&employer), employer.id)
        .await
        .unwrap();
    assert_eq!(out.deleted_jobs, 3);

    let remaining = jobs_handle.lock().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].posted_by, other.id);
}

#[tokio::test]
async fn should_not_touch_jobs_when_deleting_non_employer() {
    let alice = test_user("alice", Role::User);
    let poster = test_user("poster", Role::Employer);
    let job_repo = MockJobRepo::new(vec![test_job(poster.id, JobStatus::Active)]);
    let jobs_handle = job_repo.handle();
    let usecase = DeleteUserUseCase {
        users: MockUserRepo::new(vec![alice.clone(), poster]),
        jobs: job_repo,
    };

    let out = usecase.execute(identity_of(&alice), alice.id).await.unwrap();
    assert_eq!(out.deleted_jobs, 0);
    assert_eq!(jobs_handle.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_restrict_delete_to_the_account_owner() {
    let alice = test_user("alice", Role::User);
    let admin = test_user("admin", Role::Dev);
    let usecase = DeleteUserUseCase {
        users: MockUserRepo::new(vec![alice.clone(), admin.clone()]),
        jobs: MockJobRepo::empty(),
    };

    // Even dev must use the bulk admin surface for account deletion.
    let result = usecase.execute(identity_of(&admin), alice.id).await;
    assert!(matches!(result, Err(ApiError::Forbidden)));
}
