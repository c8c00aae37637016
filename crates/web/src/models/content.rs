//! Site content types: services, testimonials, blog posts, program images.
//!
//! Each resource has a stored type (derived from its row) and an input type
//! built from a submitted form. Inputs trim their text and reject blank
//! required fields so handlers never write half-filled rows.

use chrono::{DateTime, Utc};
use thiserror::Error;

use edureach_core::{
    BlogPostId, ProgramImageId, Rating, RatingError, ServiceIcon, ServiceId, TestimonialId,
    UserId, UserTestimonialId,
};

/// Why a submitted content form was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("Rating must be between 1 and 5")]
    Rating(#[from] RatingError),
}

/// Trim a required field.
///
/// # Errors
///
/// Returns [`InputError::Missing`] naming the field when it is blank.
pub fn required(field: &'static str, value: &str) -> Result<String, InputError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(InputError::Missing(field));
    }
    Ok(trimmed.to_owned())
}

/// Trim an optional field; blank becomes `None`.
#[must_use]
pub fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToOwned::to_owned)
}

// =============================================================================
// Services
// =============================================================================

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Service {
    pub id: ServiceId,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Service {
    #[must_use]
    pub fn icon(&self) -> ServiceIcon {
        ServiceIcon::resolve(&self.icon)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceInput {
    pub title: String,
    pub description: String,
    pub icon: ServiceIcon,
    pub is_active: bool,
}

impl ServiceInput {
    /// # Errors
    ///
    /// Returns [`InputError`] if title or description is blank.
    pub fn new(
        title: &str,
        description: &str,
        icon: &str,
        is_active: bool,
    ) -> Result<Self, InputError> {
        Ok(Self {
            title: required("Title", title)?,
            description: required("Description", description)?,
            icon: ServiceIcon::resolve(icon),
            is_active,
        })
    }
}

// =============================================================================
// Testimonials
// =============================================================================

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Testimonial {
    pub id: TestimonialId,
    pub name: String,
    pub role: String,
    pub content: String,
    #[sqlx(try_from = "i32")]
    pub rating: Rating,
    pub avatar_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A testimonial submitted by a signed-in user from their profile.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserTestimonial {
    pub id: UserTestimonialId,
    pub user_id: UserId,
    pub name: String,
    pub role: String,
    pub content: String,
    #[sqlx(try_from = "i32")]
    pub rating: Rating,
    pub avatar_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Shared shape for public rendering of both testimonial kinds.
#[derive(Debug, Clone)]
pub struct TestimonialCard {
    pub name: String,
    pub role: String,
    pub content: String,
    pub rating: Rating,
    pub avatar_url: Option<String>,
}

impl From<Testimonial> for TestimonialCard {
    fn from(t: Testimonial) -> Self {
        Self {
            name: t.name,
            role: t.role,
            content: t.content,
            rating: t.rating,
            avatar_url: t.avatar_url,
        }
    }
}

impl From<UserTestimonial> for TestimonialCard {
    fn from(t: UserTestimonial) -> Self {
        Self {
            name: t.name,
            role: t.role,
            content: t.content,
            rating: t.rating,
            avatar_url: t.avatar_url,
        }
    }
}

/// Form input for either testimonial kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestimonialInput {
    pub name: String,
    pub role: String,
    pub content: String,
    pub rating: Rating,
    pub avatar_url: Option<String>,
    pub is_active: bool,
}

impl TestimonialInput {
    /// # Errors
    ///
    /// Returns [`InputError`] for blank required fields or a rating outside 1..=5.
    pub fn new(
        name: &str,
        role: &str,
        content: &str,
        rating: i32,
        avatar_url: Option<&str>,
        is_active: bool,
    ) -> Result<Self, InputError> {
        Ok(Self {
            name: required("Name", name)?,
            role: required("Role", role)?,
            content: required("Content", content)?,
            rating: Rating::new(rating)?,
            avatar_url: optional(avatar_url),
            is_active,
        })
    }
}

// =============================================================================
// Blog posts
// =============================================================================

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BlogPost {
    pub id: BlogPostId,
    pub title: String,
    pub description: String,
    /// Markdown body.
    pub content: String,
    pub category: String,
    pub video_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub author_name: String,
    pub author_avatar: Option<String>,
    pub is_active: bool,
    pub views: i64,
    pub likes: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogPostInput {
    pub title: String,
    pub description: String,
    pub content: String,
    pub category: String,
    pub video_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub author_name: String,
    pub author_avatar: Option<String>,
    pub is_active: bool,
}

/// Raw blog post form fields, borrowed from the request.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlogPostFields<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub content: &'a str,
    pub category: &'a str,
    pub video_url: Option<&'a str>,
    pub thumbnail_url: Option<&'a str>,
    pub author_name: &'a str,
    pub author_avatar: Option<&'a str>,
    pub is_active: bool,
}

impl BlogPostInput {
    /// # Errors
    ///
    /// Returns [`InputError`] if title, description, or author is blank.
    pub fn new(fields: BlogPostFields<'_>) -> Result<Self, InputError> {
        let category = fields.category.trim();
        Ok(Self {
            title: required("Title", fields.title)?,
            description: required("Description", fields.description)?,
            content: fields.content.trim().to_owned(),
            category: if category.is_empty() {
                "General".to_owned()
            } else {
                category.to_owned()
            },
            video_url: optional(fields.video_url),
            thumbnail_url: optional(fields.thumbnail_url),
            author_name: required("Author name", fields.author_name)?,
            author_avatar: optional(fields.author_avatar),
            is_active: fields.is_active,
        })
    }
}

// =============================================================================
// Program images
// =============================================================================

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProgramImage {
    pub id: ProgramImageId,
    pub title: String,
    pub description: Option<String>,
    pub image_url: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramImageInput {
    pub title: String,
    pub description: Option<String>,
    pub image_url: String,
    pub is_active: bool,
}

impl ProgramImageInput {
    /// # Errors
    ///
    /// Returns [`InputError`] if title or image URL is blank.
    pub fn new(
        title: &str,
        description: Option<&str>,
        image_url: &str,
        is_active: bool,
    ) -> Result<Self, InputError> {
        Ok(Self {
            title: required("Title", title)?,
            description: optional(description),
            image_url: required("Image URL", image_url)?,
            is_active,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_service_input_trims_and_resolves_icon() {
        let input = ServiceInput::new("  Visa Guidance ", "Help with visas", "Plane", true).unwrap();
        assert_eq!(input.title, "Visa Guidance");
        assert_eq!(input.icon, ServiceIcon::Plane);

        let legacy = ServiceInput::new("Coaching", "1:1 sessions", "Brain", false).unwrap();
        assert_eq!(legacy.icon, ServiceIcon::BookOpen);
    }

    #[test]
    fn test_service_input_requires_title() {
        assert_eq!(
            ServiceInput::new("   ", "desc", "Users", true),
            Err(InputError::Missing("Title"))
        );
    }

    #[test]
    fn test_testimonial_input_rejects_bad_rating() {
        let err = TestimonialInput::new("Ana", "Student", "Great help", 6, None, true).unwrap_err();
        assert!(matches!(err, InputError::Rating(_)));
        assert_eq!(err.to_string(), "Rating must be between 1 and 5");
    }

    #[test]
    fn test_testimonial_input_blank_avatar_is_none() {
        let input =
            TestimonialInput::new("Ana", "Student", "Great help", 5, Some("  "), true).unwrap();
        assert!(input.avatar_url.is_none());
    }

    #[test]
    fn test_blog_post_input_defaults_category() {
        let input = BlogPostInput::new(BlogPostFields {
            title: "Studying in Canada",
            description: "What to expect",
            author_name: "EduReach Team",
            ..BlogPostFields::default()
        })
        .unwrap();
        assert_eq!(input.category, "General");
        assert!(input.video_url.is_none());
    }

    #[test]
    fn test_blog_post_input_requires_author() {
        let err = BlogPostInput::new(BlogPostFields {
            title: "t",
            description: "d",
            ..BlogPostFields::default()
        })
        .unwrap_err();
        assert_eq!(err, InputError::Missing("Author name"));
    }

    #[test]
    fn test_program_image_input_requires_url() {
        assert_eq!(
            ProgramImageInput::new("Campus tour", None, "", true),
            Err(InputError::Missing("Image URL"))
        );
    }
}
