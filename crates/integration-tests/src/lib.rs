//! Integration tests for EduReach.
//!
//! # Running Tests
//!
//! ```bash
//! # Migrate a scratch database and start the server
//! cargo run -p edureach-cli -- migrate
//! cargo run -p edureach-web
//!
//! # Run the ignored tests
//! cargo test -p edureach-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `public_site` - Landing page, detail pages, consultation intake (HTTP)
//! - `admin_access` - Back-office gate and forced credential update (HTTP + DB)
//! - `repositories` - Content and message repositories (DB only)
//!
//! # Environment Variables
//!
//! - `EDUREACH_TEST_URL` - Server under test (default: `http://localhost:3000`)
//! - `EDUREACH_DATABASE_URL` - Same database the server uses (falls back to `DATABASE_URL`)

use reqwest::Client;
use reqwest::redirect::Policy;
use secrecy::SecretString;
use sqlx::PgPool;
use uuid::Uuid;

/// Base URL of the server under test.
#[must_use]
pub fn base_url() -> String {
    std::env::var("EDUREACH_TEST_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// HTTP client with a cookie jar that does not follow redirects, so tests
/// can assert on `Location` headers.
///
/// # Panics
///
/// Panics if the client cannot be built.
#[must_use]
#[allow(clippy::expect_used)]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

/// Connect to the test database.
///
/// # Panics
///
/// Panics if no database URL is set or the connection fails.
#[allow(clippy::expect_used)]
pub async fn pool() -> PgPool {
    let url = std::env::var("EDUREACH_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .expect("EDUREACH_DATABASE_URL or DATABASE_URL must be set");
    edureach_web::db::create_pool(&SecretString::from(url))
        .await
        .expect("Failed to connect to test database")
}

/// An email address no other test run will use.
#[must_use]
pub fn unique_email(prefix: &str) -> String {
    format!("{prefix}-{}@edureach.test", Uuid::new_v4().simple())
}

/// The `Location` header of a redirect response.
#[must_use]
pub fn location(response: &reqwest::Response) -> Option<String> {
    response
        .headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(ToOwned::to_owned)
}

/// Sign in through the back-office login form.
///
/// # Panics
///
/// Panics if the request cannot be sent.
#[allow(clippy::expect_used)]
pub async fn admin_login(client: &Client, email: &str, password: &str) -> reqwest::Response {
    client
        .post(format!("{}/admin/login", base_url()))
        .form(&[("email", email), ("password", password)])
        .send()
        .await
        .expect("Failed to post admin login")
}
