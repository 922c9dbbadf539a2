//! Store Models - record structs for every content kind plus the insert and
//! patch shapes accepted by the API (serialized camelCase on the wire).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Admin user credential
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password: String,
}

/// New user for insertion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
}

/// Site owner profile. Singleton: the store holds zero or one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: i64,
    pub name: String,
    pub bio: String,
    pub full_bio: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub profile_image: Option<String>,
    pub github_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub twitter_url: Option<String>,
    pub website_url: Option<String>,
}

/// Partial profile for upsert. Absent fields leave stored values untouched
/// (or default to empty when the upsert creates the record).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub full_bio: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub profile_image: Option<String>,
    pub github_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub twitter_url: Option<String>,
    pub website_url: Option<String>,
}

/// Skill entry shown in the about section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub icon: Option<String>,
    pub proficiency: i32,
    pub display_order: i32,
}

/// New skill for creation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSkill {
    pub name: String,
    pub category: String,
    pub icon: Option<String>,
    pub proficiency: i32,
    #[serde(default)]
    pub display_order: i32,
}

/// Skill update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub icon: Option<String>,
    pub proficiency: Option<i32>,
    pub display_order: Option<i32>,
}

/// Work experience entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: i64,
    pub company: String,
    pub role: String,
    pub duration: String,
    pub description: String,
    pub company_logo: Option<String>,
    pub technologies: Option<Vec<String>>,
    pub display_order: i32,
}

/// New experience for creation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExperience {
    pub company: String,
    pub role: String,
    pub duration: String,
    pub description: String,
    pub company_logo: Option<String>,
    pub technologies: Option<Vec<String>>,
    #[serde(default)]
    pub display_order: i32,
}

/// Experience update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperiencePatch {
    pub company: Option<String>,
    pub role: Option<String>,
    pub duration: Option<String>,
    pub description: Option<String>,
    pub company_logo: Option<String>,
    pub technologies: Option<Vec<String>>,
    pub display_order: Option<i32>,
}

/// Portfolio project
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub full_description: Option<String>,
    pub technologies: Option<Vec<String>>,
    pub cover_image: Option<String>,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    pub featured: bool,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
}

/// New project for creation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub full_description: Option<String>,
    pub technologies: Option<Vec<String>>,
    pub cover_image: Option<String>,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub display_order: i32,
}

/// Project update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub full_description: Option<String>,
    pub technologies: Option<Vec<String>>,
    pub cover_image: Option<String>,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    pub featured: Option<bool>,
    pub display_order: Option<i32>,
}

/// Blog post. `published_at` is stamped the first time the post is published
/// and never changes afterwards, even if the post is unpublished again.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub cover_image: Option<String>,
    pub tags: Option<Vec<String>>,
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New blog post for creation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBlogPost {
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub cover_image: Option<String>,
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub published: bool,
}

/// Blog post update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostPatch {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub cover_image: Option<String>,
    pub tags: Option<Vec<String>>,
    pub published: Option<bool>,
}

/// Message submitted through the public contact form
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// New contact message. `read` always starts false.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContactMessage {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}
