use crate::common;
use std::sync::Arc;
use vidhub::application::accounts::get::GetAccountUseCase;
use vidhub::application::auth::change_password::{ChangePasswordRequest, ChangePasswordUseCase};
use vidhub::application::auth::credentials::CredentialVerifier;
use vidhub::application::auth::logout::LogoutUseCase;
use vidhub::application::auth::register::{RegisterRequest, RegisterUseCase};
use vidhub::domain::accounts::{AccountLookup, AccountProfile, AccountRepository};
use vidhub::domain::auth::{AuthError, SessionStore};
use vidhub::infrastructure::password::PasswordService;
use vidhub::infrastructure::repositories::memory::InMemoryAccountRepository;
use vidhub::shared::error::AppError;

async fn seeded(repo: &Arc<InMemoryAccountRepository>) -> AccountProfile {
    RegisterUseCase::new(repo.clone(), Arc::new(PasswordService::new()))
        .execute(RegisterRequest {
            user_name: "alice".to_string(),
            email: "alice@x.com".to_string(),
            full_name: "Alice Liddell".to_string(),
            password: common::PASSWORD.to_string(),
        })
        .await
        .unwrap()
}

#[tokio::test]
async fn test_logout_is_idempotent() {
    let repo = Arc::new(InMemoryAccountRepository::new());
    let profile = seeded(&repo).await;
    repo.persist(profile.id, "fingerprint").await.unwrap();

    let use_case = LogoutUseCase::new(repo.clone());
    use_case.execute(profile.id).await.unwrap();
    use_case.execute(profile.id).await.unwrap();

    let stored = repo.find_by_id(profile.id).await.unwrap().unwrap();
    assert!(stored.refresh_token_hash.is_none());
}

#[tokio::test]
async fn test_change_password() {
    let repo = Arc::new(InMemoryAccountRepository::new());
    let passwords = Arc::new(PasswordService::new());
    let profile = seeded(&repo).await;

    let use_case = ChangePasswordUseCase::new(repo.clone(), passwords.clone());

    let wrong_old = use_case
        .execute(
            profile.id,
            ChangePasswordRequest {
                old_password: "wrong-password".to_string(),
                new_password: "N3wP@ssword".to_string(),
            },
        )
        .await;
    assert!(matches!(
        wrong_old,
        Err(AppError::Auth(AuthError::InvalidCredentials))
    ));

    use_case
        .execute(
            profile.id,
            ChangePasswordRequest {
                old_password: common::PASSWORD.to_string(),
                new_password: "N3wP@ssword".to_string(),
            },
        )
        .await
        .expect("Failed to change password");

    let verifier = CredentialVerifier::new(repo.clone(), passwords);
    let lookup = AccountLookup::UserName("alice".to_string());
    assert!(verifier.verify(&lookup, "N3wP@ssword").await.is_ok());
    assert!(verifier.verify(&lookup, common::PASSWORD).await.is_err());

    let stored = repo.find_by_id(profile.id).await.unwrap().unwrap();
    assert_ne!(stored.password_hash, "N3wP@ssword");
}

#[tokio::test]
async fn test_get_account_by_user_name() {
    let repo = Arc::new(InMemoryAccountRepository::new());
    let profile = seeded(&repo).await;
    let use_case = GetAccountUseCase::new(repo);

    let found = use_case.by_user_name("Alice").await.unwrap();
    assert_eq!(found, profile);

    let missing = use_case.by_user_name("nobody").await;
    assert!(matches!(
        missing,
        Err(AppError::Auth(AuthError::AccountNotFound))
    ));
}
