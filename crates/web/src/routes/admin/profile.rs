//! The signed-in admin's own profile.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tracing::instrument;

use edureach_core::Email;

use crate::db::AdminProfileRepository;
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::models::AdminProfile;
use crate::models::admin_profile::AdminProfileUpdate;
use crate::routes::admin::AdminNav;
use crate::routes::{NoticeQuery, after_mutation, redirect_with_error};
use crate::state::AppState;

const PROFILE_PATH: &str = "/admin/profile";

/// Profile form data.
#[derive(Debug, Deserialize)]
pub struct ProfileForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub avatar_url: Option<String>,
}

impl ProfileForm {
    fn to_update(&self) -> std::result::Result<AdminProfileUpdate, &'static str> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Name is required");
        }
        let email = Email::parse(&self.email).map_err(|_| "Please enter a valid email address")?;
        let avatar_url = self
            .avatar_url
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToOwned::to_owned);
        Ok(AdminProfileUpdate {
            name: name.to_owned(),
            email: email.into_inner(),
            avatar_url,
        })
    }
}

/// Own profile template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/profile.html")]
pub struct ProfileTemplate {
    pub nav: AdminNav,
    pub profile: AdminProfile,
    pub notice: Option<String>,
    pub error: Option<String>,
}

/// Display the profile form.
pub async fn index(
    RequireAdmin(admin): RequireAdmin,
    Query(query): Query<NoticeQuery>,
) -> impl IntoResponse {
    ProfileTemplate {
        nav: AdminNav::new(&admin, PROFILE_PATH),
        profile: admin.profile,
        notice: query.notice,
        error: query.error,
    }
}

/// Update name, contact email, and avatar.
///
/// The profile email is a contact address; the sign-in email only changes
/// through the credential update.
#[instrument(skip(state, admin), fields(admin_id = %admin.profile.id))]
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Form(form): Form<ProfileForm>,
) -> Redirect {
    let update = match form.to_update() {
        Ok(update) => update,
        Err(message) => return redirect_with_error(PROFILE_PATH, message),
    };
    let result = AdminProfileRepository::new(state.pool())
        .update_profile(admin.profile.id, &update)
        .await
        .map(|_| ());
    after_mutation(PROFILE_PATH, result, "Profile updated")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, email: &str, avatar: Option<&str>) -> ProfileForm {
        ProfileForm {
            name: name.to_string(),
            email: email.to_string(),
            avatar_url: avatar.map(ToString::to_string),
        }
    }

    #[test]
    fn test_blank_avatar_is_cleared() {
        let update = form(" Ops ", "ops@edureach.test", Some("  ")).to_update();
        let update = update.unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(update.name, "Ops");
        assert!(update.avatar_url.is_none());
    }

    #[test]
    fn test_rejects_bad_email() {
        assert_eq!(
            form("Ops", "not-an-email", None).to_update().err(),
            Some("Please enter a valid email address")
        );
    }

    #[test]
    fn test_requires_name() {
        assert_eq!(
            form("  ", "ops@edureach.test", None).to_update().err(),
            Some("Name is required")
        );
    }
}
