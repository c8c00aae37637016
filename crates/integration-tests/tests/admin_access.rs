//! Back-office gate tests.
//!
//! These tests require:
//! - A migrated `PostgreSQL` database
//! - The web server running against the same database
//!
//! Run with: cargo test -p edureach-integration-tests -- --ignored

use edureach_core::AdminRole;
use edureach_integration_tests::{admin_login, base_url, client, location, pool, unique_email};
use edureach_web::services::AuthService;
use reqwest::StatusCode;

const TEMP_PASSWORD: &str = "temporary-pass-1";

/// Provision a regular admin directly in the database.
async fn provision_admin(email: &str) {
    let pool = pool().await;
    AuthService::new(&pool)
        .create_admin(AdminRole::SuperAdmin, email, "Test Admin", TEMP_PASSWORD)
        .await
        .expect("Failed to provision admin");
}

#[tokio::test]
#[ignore = "Requires running web server"]
async fn test_dashboard_requires_sign_in() {
    let resp = client()
        .get(format!("{}/admin", base_url()))
        .send()
        .await
        .expect("Failed to get /admin");
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp).as_deref(), Some("/admin/login"));
}

#[tokio::test]
#[ignore = "Requires running web server"]
async fn test_plain_user_is_denied() {
    let client = client();
    let email = unique_email("user");
    let resp = client
        .post(format!("{}/auth/sign-up", base_url()))
        .form(&[
            ("email", email.as_str()),
            ("password", "long-enough-pass"),
            ("password_confirm", "long-enough-pass"),
        ])
        .send()
        .await
        .expect("Failed to sign up");
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let resp = client
        .get(format!("{}/admin/services", base_url()))
        .send()
        .await
        .expect("Failed to get admin page");
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&resp).as_deref(),
        Some("/admin/login?error=not_admin")
    );
}

#[tokio::test]
#[ignore = "Requires running web server and database"]
async fn test_forced_credential_update_comes_first() {
    let client = client();
    let email = unique_email("staff");
    provision_admin(&email).await;

    let resp = admin_login(&client, &email, TEMP_PASSWORD).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp).as_deref(), Some("/admin/credentials"));

    // Every admin page redirects back until the password is replaced
    for path in ["/admin", "/admin/messages", "/admin/services"] {
        let resp = client
            .get(format!("{}{path}", base_url()))
            .send()
            .await
            .expect("Failed to get admin page");
        assert_eq!(location(&resp).as_deref(), Some("/admin/credentials"), "{path}");
    }

    let resp = client
        .post(format!("{}/admin/credentials", base_url()))
        .form(&[
            ("current_password", TEMP_PASSWORD),
            ("new_password", "a-brand-new-pass"),
            ("confirm_password", "a-brand-new-pass"),
        ])
        .send()
        .await
        .expect("Failed to update credentials");
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert!(
        location(&resp)
            .expect("redirect location")
            .starts_with("/admin?notice=")
    );

    let resp = client
        .get(format!("{}/admin", base_url()))
        .send()
        .await
        .expect("Failed to get dashboard");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("body");
    assert!(body.contains("Dashboard"));
    assert!(!body.contains("Admin Management"));
}

#[tokio::test]
#[ignore = "Requires running web server and database"]
async fn test_regular_admin_cannot_manage_admins() {
    let client = client();
    let email = unique_email("staff");
    provision_admin(&email).await;

    admin_login(&client, &email, TEMP_PASSWORD).await;
    client
        .post(format!("{}/admin/credentials", base_url()))
        .form(&[
            ("current_password", TEMP_PASSWORD),
            ("new_password", "a-brand-new-pass"),
            ("confirm_password", "a-brand-new-pass"),
        ])
        .send()
        .await
        .expect("Failed to update credentials");

    let resp = client
        .get(format!("{}/admin/admins", base_url()))
        .send()
        .await
        .expect("Failed to get admin list");
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = client
        .post(format!("{}/admin/admins/{}/delete", base_url(), uuid::Uuid::new_v4()))
        .send()
        .await
        .expect("Failed to post delete");
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "Requires running web server"]
async fn test_wrong_password_shows_error() {
    let resp = admin_login(&client(), &unique_email("nobody"), "not-the-password").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert!(
        location(&resp)
            .expect("redirect location")
            .starts_with("/admin/login?error=")
    );
}
