//! Seed site content from a YAML file.
//!
//! # File format
//!
//! ```yaml
//! services:
//!   - title: University Admissions
//!     description: Shortlists, essays, and application reviews.
//!     icon: GraduationCap
//! testimonials:
//!   - name: Amara Okafor
//!     role: MSc Nursing, University of Leeds
//!     content: They made the whole process calm.
//!     rating: 5
//! program_images:
//!   - title: Campus tours
//!     image_url: https://images.example.com/campus.jpg
//! blog_posts:
//!   - title: Visa timelines
//!     description: What to expect after you apply.
//!     content: "## Before you apply\n..."
//!     author_name: EduReach Team
//! ```
//!
//! Every entry is active unless `is_active: false` is given. Entries are
//! validated the same way as the back-office forms before anything is written.

use std::path::Path;

use serde::Deserialize;
use sqlx::PgPool;
use thiserror::Error;

use edureach_core::Rating;
use edureach_web::db::{
    BlogPostRepository, ProgramImageRepository, RepositoryError, ServiceRepository,
    TestimonialRepository,
};
use edureach_web::models::content::{
    BlogPostFields, BlogPostInput, InputError, ProgramImageInput, ServiceInput, TestimonialInput,
};

use super::{CommandError, connect};

/// Errors that can occur while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("{section} entry {index}: {source}")]
    Invalid {
        section: &'static str,
        index: usize,
        source: InputError,
    },

    #[error(transparent)]
    Connect(#[from] CommandError),

    #[error("Database error: {0}")]
    Repository(#[from] RepositoryError),
}

const fn default_active() -> bool {
    true
}

const fn default_rating() -> i32 {
    Rating::MAX
}

/// Top-level seed file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SeedFile {
    pub services: Vec<ServiceSeed>,
    pub testimonials: Vec<TestimonialSeed>,
    pub program_images: Vec<ProgramImageSeed>,
    pub blog_posts: Vec<BlogPostSeed>,
}

#[derive(Debug, Deserialize)]
pub struct ServiceSeed {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

#[derive(Debug, Deserialize)]
pub struct TestimonialSeed {
    pub name: String,
    pub role: String,
    pub content: String,
    #[serde(default = "default_rating")]
    pub rating: i32,
    pub avatar_url: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

#[derive(Debug, Deserialize)]
pub struct ProgramImageSeed {
    pub title: String,
    pub description: Option<String>,
    pub image_url: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

#[derive(Debug, Deserialize)]
pub struct BlogPostSeed {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub category: String,
    pub video_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub author_name: String,
    pub author_avatar: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

/// Validated content ready to insert.
#[derive(Debug, Default)]
pub struct SeedContent {
    pub services: Vec<ServiceInput>,
    pub testimonials: Vec<TestimonialInput>,
    pub program_images: Vec<ProgramImageInput>,
    pub blog_posts: Vec<BlogPostInput>,
}

fn validate_all<T, I>(
    section: &'static str,
    entries: &[T],
    convert: impl Fn(&T) -> Result<I, InputError>,
) -> Result<Vec<I>, SeedError> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            convert(entry).map_err(|source| SeedError::Invalid {
                section,
                index: index + 1,
                source,
            })
        })
        .collect()
}

impl SeedFile {
    /// Validate every entry.
    ///
    /// # Errors
    ///
    /// Returns `SeedError::Invalid` naming the first bad entry (1-based).
    pub fn validate(&self) -> Result<SeedContent, SeedError> {
        Ok(SeedContent {
            services: validate_all("services", &self.services, |s| {
                ServiceInput::new(&s.title, &s.description, &s.icon, s.is_active)
            })?,
            testimonials: validate_all("testimonials", &self.testimonials, |t| {
                TestimonialInput::new(
                    &t.name,
                    &t.role,
                    &t.content,
                    t.rating,
                    t.avatar_url.as_deref(),
                    t.is_active,
                )
            })?,
            program_images: validate_all("program_images", &self.program_images, |p| {
                ProgramImageInput::new(
                    &p.title,
                    p.description.as_deref(),
                    &p.image_url,
                    p.is_active,
                )
            })?,
            blog_posts: validate_all("blog_posts", &self.blog_posts, |b| {
                BlogPostInput::new(BlogPostFields {
                    title: &b.title,
                    description: &b.description,
                    content: &b.content,
                    category: &b.category,
                    video_url: b.video_url.as_deref(),
                    thumbnail_url: b.thumbnail_url.as_deref(),
                    author_name: &b.author_name,
                    author_avatar: b.author_avatar.as_deref(),
                    is_active: b.is_active,
                })
            })?,
        })
    }
}

/// Rows inserted per resource.
#[derive(Debug, Default)]
pub struct SeedSummary {
    pub services: usize,
    pub testimonials: usize,
    pub program_images: usize,
    pub blog_posts: usize,
}

/// Seed content from a YAML file.
///
/// With `if_empty`, a resource that already has rows is left alone.
///
/// # Errors
///
/// Returns an error if the file is missing or invalid, or an insert fails.
pub async fn content(file_path: &str, if_empty: bool) -> Result<SeedSummary, SeedError> {
    let path = Path::new(file_path);
    if !path.exists() {
        return Err(SeedError::FileNotFound(file_path.to_owned()));
    }

    tracing::info!(path = %file_path, "Loading content from file");

    // Validate before connecting so a bad file never half-seeds
    let raw = tokio::fs::read_to_string(path).await?;
    let seed: SeedFile = serde_yaml::from_str(&raw)?;
    let content = seed.validate()?;

    let pool = connect().await?;
    let summary = insert(&pool, &content, if_empty).await?;

    tracing::info!("Seeding complete!");
    tracing::info!("  Services: {}", summary.services);
    tracing::info!("  Testimonials: {}", summary.testimonials);
    tracing::info!("  Program images: {}", summary.program_images);
    tracing::info!("  Blog posts: {}", summary.blog_posts);
    Ok(summary)
}

async fn insert(
    pool: &PgPool,
    content: &SeedContent,
    if_empty: bool,
) -> Result<SeedSummary, SeedError> {
    let mut summary = SeedSummary::default();

    let services = ServiceRepository::new(pool);
    if !(if_empty && services.count().await? > 0) {
        for input in &content.services {
            services.create(input).await?;
            summary.services += 1;
        }
    }

    let testimonials = TestimonialRepository::new(pool);
    if !(if_empty && testimonials.count().await? > 0) {
        for input in &content.testimonials {
            testimonials.create(input).await?;
            summary.testimonials += 1;
        }
    }

    let images = ProgramImageRepository::new(pool);
    if !(if_empty && images.count().await? > 0) {
        for input in &content.program_images {
            images.create(input).await?;
            summary.program_images += 1;
        }
    }

    let posts = BlogPostRepository::new(pool);
    if !(if_empty && !posts.list_all().await?.is_empty()) {
        for input in &content.blog_posts {
            posts.create(input).await?;
            summary.blog_posts += 1;
        }
    }

    Ok(summary)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use edureach_core::ServiceIcon;

    use super::*;

    #[test]
    fn test_defaults_applied() {
        let seed: SeedFile = serde_yaml::from_str(
            r"
services:
  - title: Visa Guidance
    description: Document checklists and interview prep.
    icon: Plane
testimonials:
  - name: Amara
    role: Student
    content: Great support.
",
        )
        .unwrap();
        let content = seed.validate().unwrap();
        assert_eq!(content.services[0].icon, ServiceIcon::Plane);
        assert!(content.services[0].is_active);
        assert_eq!(content.testimonials[0].rating.get(), 5);
        assert!(content.blog_posts.is_empty());
    }

    #[test]
    fn test_invalid_entry_is_named() {
        let seed: SeedFile = serde_yaml::from_str(
            r"
testimonials:
  - name: Amara
    role: Student
    content: Fine.
  - name: Ben
    role: Student
    content: Too many stars.
    rating: 9
",
        )
        .unwrap();
        let err = seed.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "testimonials entry 2: Rating must be between 1 and 5"
        );
    }

    #[test]
    fn test_bundled_seed_file_is_valid() {
        let raw = include_str!("../../seed/content.yaml");
        let seed: SeedFile = serde_yaml::from_str(raw).unwrap();
        let content = seed.validate().unwrap();
        assert!(!content.services.is_empty());
        assert!(!content.blog_posts.is_empty());
    }
}
