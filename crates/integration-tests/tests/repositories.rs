//! Repository tests against a real database.
//!
//! These tests require a migrated `PostgreSQL` database.
//!
//! Run with: cargo test -p edureach-integration-tests -- --ignored

use edureach_core::{AdminGate, AdminRole, MessageStatus, Rating};
use edureach_integration_tests::{pool, unique_email};
use edureach_web::db::{
    AdminProfileRepository, MessageRepository, RepositoryError, ServiceRepository,
    TestimonialRepository, UserTestimonialRepository,
};
use edureach_web::models::content::{ServiceInput, TestimonialInput};
use edureach_web::models::message::NewMessage;
use edureach_web::services::{AuthError, AuthService};

const PASSWORD: &str = "integration-pass-1";

fn service(title: &str) -> ServiceInput {
    ServiceInput::new(title, "Integration test service", "Plane", true)
        .expect("valid service input")
}

#[tokio::test]
#[ignore = "Requires PostgreSQL database"]
async fn test_toggle_changes_only_the_active_flag() {
    let pool = pool().await;
    let repo = TestimonialRepository::new(&pool);
    let input = TestimonialInput::new(
        "Priya",
        "MBA candidate",
        "Clear timelines",
        4,
        Some("https://img.example.com/p.png"),
        true,
    )
    .expect("valid testimonial input");

    let created = repo.create(&input).await.expect("create");
    repo.toggle_active(created.id).await.expect("toggle");
    let toggled = repo.get(created.id).await.expect("get").expect("exists");

    assert!(!toggled.is_active);
    assert_eq!(toggled.name, created.name);
    assert_eq!(toggled.role, created.role);
    assert_eq!(toggled.content, created.content);
    assert_eq!(toggled.rating, Rating::new(4).expect("rating"));
    assert_eq!(toggled.avatar_url, created.avatar_url);

    repo.delete(created.id).await.expect("cleanup");
}

#[tokio::test]
#[ignore = "Requires PostgreSQL database"]
async fn test_delete_leaves_siblings() {
    let pool = pool().await;
    let repo = ServiceRepository::new(&pool);

    let first = repo.create(&service("Sibling A")).await.expect("create");
    let second = repo.create(&service("Sibling B")).await.expect("create");

    repo.delete(first.id).await.expect("delete");

    let ids: Vec<_> = repo
        .list_all()
        .await
        .expect("list")
        .into_iter()
        .map(|s| s.id)
        .collect();
    assert!(!ids.contains(&first.id));
    assert!(ids.contains(&second.id));

    assert!(matches!(
        repo.delete(first.id).await,
        Err(RepositoryError::NotFound)
    ));
    repo.delete(second.id).await.expect("cleanup");
}

#[tokio::test]
#[ignore = "Requires PostgreSQL database"]
async fn test_inactive_service_is_hidden_from_public_list() {
    let pool = pool().await;
    let repo = ServiceRepository::new(&pool);

    let created = repo.create(&service("Hidden soon")).await.expect("create");
    repo.toggle_active(created.id).await.expect("toggle");

    let active = repo.list_active().await.expect("list");
    assert!(active.iter().all(|s| s.id != created.id));
    assert!(repo.get_active(created.id).await.expect("get").is_none());

    repo.delete(created.id).await.expect("cleanup");
}

#[tokio::test]
#[ignore = "Requires PostgreSQL database"]
async fn test_new_messages_are_unread_and_toggle() {
    let pool = pool().await;
    let repo = MessageRepository::new(&pool);

    let message = repo
        .create(&NewMessage {
            name: "Amara".to_string(),
            email: unique_email("msg"),
            phone: None,
            message: "Hello".to_string(),
        })
        .await
        .expect("create");
    assert_eq!(message.status, MessageStatus::Unread);

    repo.set_status(message.id, MessageStatus::Read)
        .await
        .expect("mark read");
    let stored = repo
        .list()
        .await
        .expect("list")
        .into_iter()
        .find(|m| m.id == message.id)
        .expect("message listed");
    assert_eq!(stored.status, MessageStatus::Read);

    repo.delete(message.id).await.expect("cleanup");
}

#[tokio::test]
#[ignore = "Requires PostgreSQL database"]
async fn test_user_testimonials_are_owner_scoped() {
    let pool = pool().await;
    let auth = AuthService::new(&pool);
    let owner = auth
        .sign_up(&unique_email("owner"), PASSWORD, None)
        .await
        .expect("owner sign-up");
    let other = auth
        .sign_up(&unique_email("other"), PASSWORD, None)
        .await
        .expect("other sign-up");

    let repo = UserTestimonialRepository::new(&pool);
    let input = TestimonialInput::new("Ana", "Student", "Great advice", 5, None, true)
        .expect("valid testimonial input");
    let created = repo.create(owner.id, &input).await.expect("create");

    assert!(
        repo.get_for_user(other.id, created.id)
            .await
            .expect("get")
            .is_none()
    );
    assert!(matches!(
        repo.update(other.id, created.id, &input).await,
        Err(RepositoryError::NotFound)
    ));
    assert!(matches!(
        repo.toggle_active(other.id, created.id).await,
        Err(RepositoryError::NotFound)
    ));
    assert!(matches!(
        repo.delete(other.id, created.id).await,
        Err(RepositoryError::NotFound)
    ));

    let untouched = repo
        .get_for_user(owner.id, created.id)
        .await
        .expect("get")
        .expect("owner still sees it");
    assert!(untouched.is_active);

    repo.delete(owner.id, created.id).await.expect("cleanup");
}

#[tokio::test]
#[ignore = "Requires PostgreSQL database"]
async fn test_failed_credential_update_changes_nothing() {
    let pool = pool().await;
    let auth = AuthService::new(&pool);
    let taken = unique_email("taken");
    auth.sign_up(&taken, PASSWORD, None)
        .await
        .expect("sign-up for taken email");

    let email = unique_email("pending");
    auth.create_admin(AdminRole::SuperAdmin, &email, "Pending", PASSWORD)
        .await
        .expect("create admin");
    let login = auth
        .admin_sign_in(&email, PASSWORD)
        .await
        .expect("provisioned login");
    assert_eq!(login.gate, AdminGate::CredentialUpdateRequired);

    let result = auth
        .update_admin_credentials(
            login.user.id,
            &login.user.email,
            PASSWORD,
            "a-brand-new-password",
            "a-brand-new-password",
            &taken,
        )
        .await;
    assert!(matches!(result, Err(AuthError::UserAlreadyExists)));

    let again = auth
        .admin_sign_in(&email, PASSWORD)
        .await
        .expect("old password still valid");
    assert_eq!(again.gate, AdminGate::CredentialUpdateRequired);
    assert!(auth.sign_in(&email, "a-brand-new-password").await.is_err());
}

#[tokio::test]
#[ignore = "Requires PostgreSQL database"]
async fn test_super_admin_cannot_be_removed() {
    let pool = pool().await;
    let auth = AuthService::new(&pool);
    let repo = AdminProfileRepository::new(&pool);

    // The server may already have bootstrapped one.
    let existing = repo
        .list()
        .await
        .expect("list")
        .into_iter()
        .find(|p| p.is_super_admin);
    let super_admin = match existing {
        Some(profile) => profile,
        None => auth
            .ensure_super_admin(&unique_email("root"), "Root", PASSWORD)
            .await
            .expect("bootstrap")
            .expect("no super admin yet"),
    };

    assert!(matches!(
        repo.delete(super_admin.id).await,
        Err(RepositoryError::NotFound)
    ));
    assert!(matches!(
        repo.toggle_active(super_admin.id).await,
        Err(RepositoryError::NotFound)
    ));

    let second = auth
        .ensure_super_admin(&unique_email("root2"), "Second", PASSWORD)
        .await
        .expect("second bootstrap");
    assert!(second.is_none());

    let kept = repo
        .get_by_id(super_admin.id)
        .await
        .expect("get")
        .expect("super admin still exists");
    assert!(kept.is_active);
}
