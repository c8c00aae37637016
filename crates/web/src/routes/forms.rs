//! Submitted content forms shared by the profile and back-office screens.

use serde::Deserialize;

use edureach_core::Rating;

use crate::models::content::{
    BlogPostFields, BlogPostInput, InputError, ProgramImageInput, ServiceInput, TestimonialInput,
};
use crate::routes::is_checked;

fn default_rating() -> i32 {
    Rating::default().get()
}

/// Service form data.
#[derive(Debug, Default, Deserialize)]
pub struct ServiceForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    pub is_active: Option<String>,
}

impl ServiceForm {
    /// # Errors
    ///
    /// Returns [`InputError`] if a required field is blank.
    pub fn to_input(&self) -> Result<ServiceInput, InputError> {
        ServiceInput::new(
            &self.title,
            &self.description,
            &self.icon,
            is_checked(self.is_active.as_deref()),
        )
    }
}

/// Testimonial form data, for curated and user testimonials alike.
#[derive(Debug, Deserialize)]
pub struct TestimonialForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub content: String,
    #[serde(default = "default_rating")]
    pub rating: i32,
    pub avatar_url: Option<String>,
    pub is_active: Option<String>,
}

impl TestimonialForm {
    /// # Errors
    ///
    /// Returns [`InputError`] for a blank required field or a rating outside 1..=5.
    pub fn to_input(&self) -> Result<TestimonialInput, InputError> {
        TestimonialInput::new(
            &self.name,
            &self.role,
            &self.content,
            self.rating,
            self.avatar_url.as_deref(),
            is_checked(self.is_active.as_deref()),
        )
    }
}

/// Blog post form data.
#[derive(Debug, Default, Deserialize)]
pub struct BlogPostForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub category: String,
    pub video_url: Option<String>,
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub author_name: String,
    pub author_avatar: Option<String>,
    pub is_active: Option<String>,
}

impl BlogPostForm {
    /// # Errors
    ///
    /// Returns [`InputError`] if a required field is blank.
    pub fn to_input(&self) -> Result<BlogPostInput, InputError> {
        BlogPostInput::new(BlogPostFields {
            title: &self.title,
            description: &self.description,
            content: &self.content,
            category: &self.category,
            video_url: self.video_url.as_deref(),
            thumbnail_url: self.thumbnail_url.as_deref(),
            author_name: &self.author_name,
            author_avatar: self.author_avatar.as_deref(),
            is_active: is_checked(self.is_active.as_deref()),
        })
    }
}

/// Program image form data.
#[derive(Debug, Default, Deserialize)]
pub struct ProgramImageForm {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: String,
    pub is_active: Option<String>,
}

impl ProgramImageForm {
    /// # Errors
    ///
    /// Returns [`InputError`] if title or image URL is blank.
    pub fn to_input(&self) -> Result<ProgramImageInput, InputError> {
        ProgramImageInput::new(
            &self.title,
            self.description.as_deref(),
            &self.image_url,
            is_checked(self.is_active.as_deref()),
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_unchecked_box_is_inactive() {
        let form = ProgramImageForm {
            title: "Campus tour".to_string(),
            image_url: "https://img.example.com/campus.jpg".to_string(),
            ..ProgramImageForm::default()
        };
        assert!(!form.to_input().unwrap().is_active);
    }

    #[test]
    fn test_testimonial_form_defaults_rating() {
        let form: TestimonialForm =
            serde_json::from_str(r#"{"name":"Ana","role":"Student","content":"Great"}"#).unwrap();
        assert_eq!(form.to_input().unwrap().rating, Rating::default());
    }

    #[test]
    fn test_blog_form_requires_author() {
        let form = BlogPostForm {
            title: "Visa timelines".to_string(),
            description: "What to expect".to_string(),
            ..BlogPostForm::default()
        };
        assert_eq!(form.to_input(), Err(InputError::Missing("Author name")));
    }
}
