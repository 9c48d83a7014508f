use crate::common;
use crate::setup_test_db_or_skip;

use axum::http::StatusCode;
use serial_test::serial;
use std::sync::Arc;
use uuid::Uuid;
use vidhub::domain::accounts::{Account, AccountLookup, AccountRepository, NewAccount};
use vidhub::domain::auth::SessionStore;
use vidhub::infrastructure::repositories::accounts::PostgresAccountRepository;
use vidhub::infrastructure::state::AppState;

async fn create_alice(repo: &PostgresAccountRepository) -> Account {
    repo.create(NewAccount {
        user_name: "alice".to_string(),
        email: "alice@x.com".to_string(),
        full_name: "Alice Liddell".to_string(),
        password_hash: "$argon2id$placeholder".to_string(),
    })
    .await
    .expect("Failed to create account")
    .expect("Account already exists")
}

#[tokio::test]
#[serial]
async fn test_postgres_account_crud() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;

    let repo = PostgresAccountRepository::new(pool.clone());
    let account = create_alice(&repo).await;
    assert!(account.refresh_token_hash.is_none());

    let by_name = repo
        .find_by_lookup(&AccountLookup::UserName("alice".to_string()))
        .await
        .unwrap()
        .expect("Account not found by handle");
    assert_eq!(by_name.id, account.id);

    let by_email = repo
        .find_by_lookup(&AccountLookup::Email("alice@x.com".to_string()))
        .await
        .unwrap();
    assert!(by_email.is_some());

    assert!(repo.exists("alice", "other@x.com").await.unwrap());
    assert!(!repo.exists("bob", "bob@x.com").await.unwrap());
    assert!(repo.find_by_id(Uuid::new_v4()).await.unwrap().is_none());

    assert!(
        repo.update_password(account.id, "$argon2id$new".to_string())
            .await
            .unwrap()
    );
    let updated = repo.find_by_id(account.id).await.unwrap().unwrap();
    assert_eq!(updated.password_hash, "$argon2id$new");

    repo.ping().await.expect("Ping failed");

    common::cleanup_test_db(&pool).await;
}

#[tokio::test]
#[serial]
async fn test_postgres_unique_constraints() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;

    let repo = PostgresAccountRepository::new(pool.clone());
    create_alice(&repo).await;

    let duplicate = repo
        .create(NewAccount {
            user_name: "alice".to_string(),
            email: "second@x.com".to_string(),
            full_name: "Second".to_string(),
            password_hash: "hash".to_string(),
        })
        .await
        .expect("Duplicate insert should not error");
    assert!(duplicate.is_none());

    common::cleanup_test_db(&pool).await;
}

#[tokio::test]
#[serial]
async fn test_postgres_session_slot() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;

    let repo = PostgresAccountRepository::new(pool.clone());
    let account = create_alice(&repo).await;

    repo.persist(account.id, "first").await.unwrap();
    assert!(repo.validate(account.id, "first").await.unwrap());
    assert!(!repo.validate(account.id, "other").await.unwrap());

    assert!(repo.rotate(account.id, "first", "second").await.unwrap());
    assert!(!repo.rotate(account.id, "first", "third").await.unwrap());
    assert!(repo.validate(account.id, "second").await.unwrap());

    repo.clear(account.id).await.unwrap();
    repo.clear(account.id).await.unwrap();
    assert!(!repo.validate(account.id, "second").await.unwrap());
    assert!(!repo.rotate(account.id, "second", "fourth").await.unwrap());

    common::cleanup_test_db(&pool).await;
}

#[tokio::test]
#[serial]
async fn test_postgres_concurrent_rotation_single_winner() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;

    let repo = Arc::new(PostgresAccountRepository::new(pool.clone()));
    let account = create_alice(&repo).await;
    repo.persist(account.id, "current").await.unwrap();

    let mut handles = Vec::new();
    for i in 0..8 {
        let repo = repo.clone();
        handles.push(tokio::spawn(async move {
            repo.rotate(account.id, "current", &format!("next-{}", i))
                .await
                .unwrap()
        }));
    }

    let mut winners = 0;
    for handle in handles {
        if handle.await.unwrap() {
            winners += 1;
        }
    }
    assert_eq!(winners, 1);

    common::cleanup_test_db(&pool).await;
}

#[tokio::test]
#[serial]
async fn test_postgres_backed_login_flow() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;

    let state = AppState::postgres(common::test_config(&[]), pool.clone()).unwrap();
    let app = common::app_with(state);

    let (access, refresh) = common::alice_session(&app).await;

    let me = common::send(
        &app,
        common::with_bearer("/api/v1/users/current-user", "GET", &access),
    )
    .await;
    assert_eq!(me.status, StatusCode::OK);

    let rotated = common::refresh_with_cookie(&app, &refresh).await;
    assert_eq!(rotated.status, StatusCode::OK);

    let replay = common::refresh_with_cookie(&app, &refresh).await;
    assert_eq!(replay.status, StatusCode::UNAUTHORIZED);

    common::cleanup_test_db(&pool).await;
}
