use linx_api::domain::types::EmployerPatch;
use linx_api::error::ApiError;
use linx_api::usecase::employer::{
    CreateEmployerInput, CreateEmployerUseCase, DeleteEmployerUseCase, GetEmployerUseCase,
    UpdateEmployerUseCase,
};
use linx_domain::user::{AccountStatus, Role};
use uuid::Uuid;

use crate::helpers::{MockEmployerRepo, identity_of, test_employer, test_user};

fn create_input() -> CreateEmployerInput {
    CreateEmployerInput {
        name: "Acme HR".to_owned(),
        email: "hr@acme.example".to_owned(),
        company_name: "Acme".to_owned(),
        website: None,
        location: None,
        phone: None,
        description: None,
    }
}

// ── Create ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_unverified_active_employer() {
    let usecase = CreateEmployerUseCase {
        employers: MockEmployerRepo::empty(),
    };
    let employer = usecase.execute(create_input(), None).await.unwrap();
    assert!(!employer.verified);
    assert_eq!(employer.status, AccountStatus::Active);
    assert!(employer.owner_user_id.is_none());
}

#[tokio::test]
async fn should_link_owner_when_credential_present() {
    let owner = test_user("acme", Role::Employer);
    let usecase = CreateEmployerUseCase {
        employers: MockEmployerRepo::empty(),
    };
    let employer = usecase
        .execute(create_input(), Some(owner.id))
        .await
        .unwrap();
    assert_eq!(employer.owner_user_id, Some(owner.id));
}

#[tokio::test]
async fn should_conflict_on_duplicate_employer_email() {
    let usecase = CreateEmployerUseCase {
        employers: MockEmployerRepo::empty(),
    };
    usecase.execute(create_input(), None).await.unwrap();
    let result = usecase.execute(create_input(), None).await;
    assert!(matches!(result, Err(ApiError::EmailTaken)));
}

#[tokio::test]
async fn should_reject_missing_required_fields() {
    let usecase = CreateEmployerUseCase {
        employers: MockEmployerRepo::empty(),
    };
    let result = usecase
        .execute(
            CreateEmployerInput {
                company_name: "  ".to_owned(),
                ..create_input()
            },
            None,
        )
        .await;
    assert!(matches!(result, Err(ApiError::Validation(_))));
}

// ── Ownership on update/delete ───────────────────────────────────────────────

#[tokio::test]
async fn should_let_owner_update_their_employer_profile() {
    let owner = test_user("acme", Role::Employer);
    let employer = test_employer(Some(owner.id));
    let usecase = UpdateEmployerUseCase {
        employers: MockEmployerRepo::new(vec![employer.clone()]),
    };

    let updated = usecase
        .execute(
            identity_of(&owner),
            employer.id,
            EmployerPatch {
                description: Some("We hire".to_owned()),
                ..Default::default()
            },
            None,
        )
        .await
        .unwrap();
    assert_eq!(updated.description.as_deref(), Some("We hire"));
    assert_eq!(updated.version, employer.version + 1);
}

#[tokio::test]
async fn should_forbid_update_by_unrelated_identity() {
    let owner = test_user("acme", Role::Employer);
    let stranger = test_user("stranger", Role::Employer);
    let employer = test_employer(Some(owner.id));
    let usecase = UpdateEmployerUseCase {
        employers: MockEmployerRepo::new(vec![employer.clone()]),
    };

    let result = usecase
        .execute(
            identity_of(&stranger),
            employer.id,
            EmployerPatch {
                name: Some("Defaced".to_owned()),
                ..Default::default()
            },
            None,
        )
        .await;
    assert!(matches!(result, Err(ApiError::Forbidden)));
}

#[tokio::test]
async fn should_restrict_ownerless_employer_to_dev() {
    let stranger = test_user("stranger", Role::Employer);
    let admin = test_user("admin", Role::Dev);
    let employer = test_employer(None);
    let usecase = UpdateEmployerUseCase {
        employers: MockEmployerRepo::new(vec![employer.clone()]),
    };

    let result = usecase
        .execute(
            identity_of(&stranger),
            employer.id,
            EmployerPatch {
                name: Some("Claimed".to_owned()),
                ..Default::default()
            },
            None,
        )
        .await;
    assert!(matches!(result, Err(ApiError::Forbidden)));

    let updated = usecase
        .execute(
            identity_of(&admin),
            employer.id,
            EmployerPatch {
                name: Some("Moderated".to_owned()),
                ..Default::default()
            },
            None,
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Moderated");
}

#[tokio::test]
async fn should_delete_only_via_owner_or_dev() {
    let owner = test_user("acme", Role::Employer);
    let stranger = test_user("stranger", Role::User);
    let employer = test_employer(Some(owner.id));
    let repo = MockEmployerRepo::new(vec![employer.clone()]);
    let handle = repo.handle();
    let usecase = DeleteEmployerUseCase { employers: repo };

    let result = usecase.execute(identity_of(&stranger), employer.id).await;
    assert!(matches!(result, Err(ApiError::Forbidden)));
    assert_eq!(handle.lock().unwrap().len(), 1);

    usecase
        .execute(identity_of(&owner), employer.id)
        .await
        .unwrap();
    assert!(handle.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_return_not_found_for_unknown_employer() {
    let usecase = GetEmployerUseCase {
        employers: MockEmployerRepo::empty(),
    };
    let result = usecase.execute(Uuid::now_v7()).await;
    assert!(matches!(result, Err(ApiError::EmployerNotFound)));
}
