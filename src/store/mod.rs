//! In-memory data store.
//!
//! Owns every content record behind a single `RwLock`. Ids come from one
//! shared auto-increment counter, so they are unique across kinds and never
//! reused after deletion. The store is constructed once at startup and passed
//! to the router as application state; it is not a process-global.

pub mod models;

use std::collections::BTreeMap;

use chrono::Utc;
use tokio::sync::RwLock;

use models::{
    BlogPost, BlogPostPatch, ContactMessage, Experience, ExperiencePatch, NewBlogPost,
    NewContactMessage, NewExperience, NewProject, NewSkill, NewUser, Profile, ProfilePatch,
    Project, ProjectPatch, Skill, SkillPatch, User,
};

/// Collections keyed by id. BTreeMap keeps iteration in id order, which is
/// insertion order because ids only ever grow; the list reads below rely on
/// that as the tie-break baseline for their stable sorts.
#[derive(Debug)]
struct StoreInner {
    users: BTreeMap<i64, User>,
    profiles: BTreeMap<i64, Profile>,
    skills: BTreeMap<i64, Skill>,
    experiences: BTreeMap<i64, Experience>,
    projects: BTreeMap<i64, Project>,
    blog_posts: BTreeMap<i64, BlogPost>,
    contact_messages: BTreeMap<i64, ContactMessage>,
    next_id: i64,
}

impl StoreInner {
    fn new() -> Self {
        Self {
            users: BTreeMap::new(),
            profiles: BTreeMap::new(),
            skills: BTreeMap::new(),
            experiences: BTreeMap::new(),
            projects: BTreeMap::new(),
            blog_posts: BTreeMap::new(),
            contact_messages: BTreeMap::new(),
            next_id: 1,
        }
    }

    fn alloc_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// Volatile store for all portfolio content. Every operation touches exactly
/// one record (or reads one collection) and cannot fail; "not found" is the
/// only absent-success outcome and is reported through `Option`/`bool`.
#[derive(Debug)]
pub struct MemStore {
    inner: RwLock<StoreInner>,
}

impl MemStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(StoreInner::new()),
        }
    }

    // ------------------------------------------------------------------
    // Users
    // ------------------------------------------------------------------

    pub async fn create_user(&self, new: NewUser) -> User {
        let mut inner = self.inner.write().await;
        let id = inner.alloc_id();
        let user = User {
            id,
            username: new.username,
            password: new.password,
        };
        inner.users.insert(id, user.clone());
        user
    }

    pub async fn get_user_by_username(&self, username: &str) -> Option<User> {
        let inner = self.inner.read().await;
        inner
            .users
            .values()
            .find(|u| u.username == username)
            .cloned()
    }

    // ------------------------------------------------------------------
    // Profile (singleton)
    // ------------------------------------------------------------------

    pub async fn get_profile(&self) -> Option<Profile> {
        let inner = self.inner.read().await;
        inner.profiles.values().next().cloned()
    }

    /// Merges the patch over the existing profile, or creates one when the
    /// store holds none yet. Absent required fields default to empty strings
    /// on create.
    pub async fn upsert_profile(&self, patch: ProfilePatch) -> Profile {
        let mut inner = self.inner.write().await;
        match inner.profiles.values().next().cloned() {
            Some(existing) => {
                let updated = Profile {
                    id: existing.id,
                    name: patch.name.unwrap_or(existing.name),
                    bio: patch.bio.unwrap_or(existing.bio),
                    full_bio: patch.full_bio.unwrap_or(existing.full_bio),
                    email: patch.email.unwrap_or(existing.email),
                    phone: patch.phone.or(existing.phone),
                    location: patch.location.or(existing.location),
                    profile_image: patch.profile_image.or(existing.profile_image),
                    github_url: patch.github_url.or(existing.github_url),
                    linkedin_url: patch.linkedin_url.or(existing.linkedin_url),
                    twitter_url: patch.twitter_url.or(existing.twitter_url),
                    website_url: patch.website_url.or(existing.website_url),
                };
                inner.profiles.insert(updated.id, updated.clone());
                updated
            }
            None => {
                let id = inner.alloc_id();
                let profile = Profile {
                    id,
                    name: patch.name.unwrap_or_default(),
                    bio: patch.bio.unwrap_or_default(),
                    full_bio: patch.full_bio.unwrap_or_default(),
                    email: patch.email.unwrap_or_default(),
                    phone: patch.phone,
                    location: patch.location,
                    profile_image: patch.profile_image,
                    github_url: patch.github_url,
                    linkedin_url: patch.linkedin_url,
                    twitter_url: patch.twitter_url,
                    website_url: patch.website_url,
                };
                inner.profiles.insert(id, profile.clone());
                profile
            }
        }
    }

    // ------------------------------------------------------------------
    // Skills
    // ------------------------------------------------------------------

    pub async fn get_skills(&self) -> Vec<Skill> {
        let inner = self.inner.read().await;
        let mut skills: Vec<Skill> = inner.skills.values().cloned().collect();
        skills.sort_by_key(|s| s.display_order);
        skills
    }

    pub async fn get_skill(&self, id: i64) -> Option<Skill> {
        let inner = self.inner.read().await;
        inner.skills.get(&id).cloned()
    }

    pub async fn create_skill(&self, new: NewSkill) -> Skill {
        let mut inner = self.inner.write().await;
        let id = inner.alloc_id();
        let skill = Skill {
            id,
            name: new.name,
            category: new.category,
            icon: new.icon,
            proficiency: new.proficiency,
            display_order: new.display_order,
        };
        inner.skills.insert(id, skill.clone());
        skill
    }

    pub async fn update_skill(&self, id: i64, patch: SkillPatch) -> Option<Skill> {
        let mut inner = self.inner.write().await;
        let existing = inner.skills.get(&id).cloned()?;
        let updated = Skill {
            id,
            name: patch.name.unwrap_or(existing.name),
            category: patch.category.unwrap_or(existing.category),
            icon: patch.icon.or(existing.icon),
            proficiency: patch.proficiency.unwrap_or(existing.proficiency),
            display_order: patch.display_order.unwrap_or(existing.display_order),
        };
        inner.skills.insert(id, updated.clone());
        Some(updated)
    }

    pub async fn delete_skill(&self, id: i64) -> bool {
        let mut inner = self.inner.write().await;
        inner.skills.remove(&id).is_some()
    }

    // ------------------------------------------------------------------
    // Experiences
    // ------------------------------------------------------------------

    pub async fn get_experiences(&self) -> Vec<Experience> {
        let inner = self.inner.read().await;
        let mut experiences: Vec<Experience> = inner.experiences.values().cloned().collect();
        experiences.sort_by_key(|e| e.display_order);
        experiences
    }

    pub async fn get_experience(&self, id: i64) -> Option<Experience> {
        let inner = self.inner.read().await;
        inner.experiences.get(&id).cloned()
    }

    pub async fn create_experience(&self, new: NewExperience) -> Experience {
        let mut inner = self.inner.write().await;
        let id = inner.alloc_id();
        let experience = Experience {
            id,
            company: new.company,
            role: new.role,
            duration: new.duration,
            description: new.description,
            company_logo: new.company_logo,
            technologies: new.technologies,
            display_order: new.display_order,
        };
        inner.experiences.insert(id, experience.clone());
        experience
    }

    pub async fn update_experience(&self, id: i64, patch: ExperiencePatch) -> Option<Experience> {
        let mut inner = self.inner.write().await;
        let existing = inner.experiences.get(&id).cloned()?;
        let updated = Experience {
            id,
            company: patch.company.unwrap_or(existing.company),
            role: patch.role.unwrap_or(existing.role),
            duration: patch.duration.unwrap_or(existing.duration),
            description: patch.description.unwrap_or(existing.description),
            company_logo: patch.company_logo.or(existing.company_logo),
            technologies: patch.technologies.or(existing.technologies),
            display_order: patch.display_order.unwrap_or(existing.display_order),
        };
        inner.experiences.insert(id, updated.clone());
        Some(updated)
    }

    pub async fn delete_experience(&self, id: i64) -> bool {
        let mut inner = self.inner.write().await;
        inner.experiences.remove(&id).is_some()
    }

    // ------------------------------------------------------------------
    // Projects
    // ------------------------------------------------------------------

    pub async fn get_projects(&self) -> Vec<Project> {
        let inner = self.inner.read().await;
        let mut projects: Vec<Project> = inner.projects.values().cloned().collect();
        projects.sort_by_key(|p| p.display_order);
        projects
    }

    /// The featured subset of `get_projects`, in the same relative order.
    pub async fn get_featured_projects(&self) -> Vec<Project> {
        let inner = self.inner.read().await;
        let mut projects: Vec<Project> = inner
            .projects
            .values()
            .filter(|p| p.featured)
            .cloned()
            .collect();
        projects.sort_by_key(|p| p.display_order);
        projects
    }

    pub async fn get_project(&self, id: i64) -> Option<Project> {
        let inner = self.inner.read().await;
        inner.projects.get(&id).cloned()
    }

    pub async fn create_project(&self, new: NewProject) -> Project {
        let mut inner = self.inner.write().await;
        let id = inner.alloc_id();
        let project = Project {
            id,
            title: new.title,
            description: new.description,
            full_description: new.full_description,
            technologies: new.technologies,
            cover_image: new.cover_image,
            github_url: new.github_url,
            live_url: new.live_url,
            featured: new.featured,
            display_order: new.display_order,
            created_at: Utc::now(),
        };
        inner.projects.insert(id, project.clone());
        project
    }

    pub async fn update_project(&self, id: i64, patch: ProjectPatch) -> Option<Project> {
        let mut inner = self.inner.write().await;
        let existing = inner.projects.get(&id).cloned()?;
        let updated = Project {
            id,
            title: patch.title.unwrap_or(existing.title),
            description: patch.description.unwrap_or(existing.description),
            full_description: patch.full_description.or(existing.full_description),
            technologies: patch.technologies.or(existing.technologies),
            cover_image: patch.cover_image.or(existing.cover_image),
            github_url: patch.github_url.or(existing.github_url),
            live_url: patch.live_url.or(existing.live_url),
            featured: patch.featured.unwrap_or(existing.featured),
            display_order: patch.display_order.unwrap_or(existing.display_order),
            created_at: existing.created_at,
        };
        inner.projects.insert(id, updated.clone());
        Some(updated)
    }

    pub async fn delete_project(&self, id: i64) -> bool {
        let mut inner = self.inner.write().await;
        inner.projects.remove(&id).is_some()
    }

    // ------------------------------------------------------------------
    // Blog posts
    // ------------------------------------------------------------------

    /// Every post, newest first. Admin view.
    pub async fn get_blog_posts(&self) -> Vec<BlogPost> {
        let inner = self.inner.read().await;
        let mut posts: Vec<BlogPost> = inner.blog_posts.values().cloned().collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        posts
    }

    /// Published posts only, most recently published first. Public view.
    pub async fn get_published_blog_posts(&self) -> Vec<BlogPost> {
        let inner = self.inner.read().await;
        let mut posts: Vec<BlogPost> = inner
            .blog_posts
            .values()
            .filter(|p| p.published)
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        posts
    }

    pub async fn get_blog_post(&self, id: i64) -> Option<BlogPost> {
        let inner = self.inner.read().await;
        inner.blog_posts.get(&id).cloned()
    }

    pub async fn get_blog_post_by_slug(&self, slug: &str) -> Option<BlogPost> {
        let inner = self.inner.read().await;
        inner
            .blog_posts
            .values()
            .find(|p| p.slug == slug)
            .cloned()
    }

    pub async fn create_blog_post(&self, new: NewBlogPost) -> BlogPost {
        let mut inner = self.inner.write().await;
        let id = inner.alloc_id();
        let now = Utc::now();
        let post = BlogPost {
            id,
            title: new.title,
            slug: new.slug,
            excerpt: new.excerpt,
            content: new.content,
            cover_image: new.cover_image,
            tags: new.tags,
            published: new.published,
            published_at: if new.published { Some(now) } else { None },
            created_at: now,
            updated_at: now,
        };
        inner.blog_posts.insert(id, post.clone());
        post
    }

    /// Merges the patch and refreshes `updated_at`. `published_at` is stamped
    /// only on the unpublished-to-published transition and kept verbatim in
    /// every other case, including un-publishing.
    pub async fn update_blog_post(&self, id: i64, patch: BlogPostPatch) -> Option<BlogPost> {
        let mut inner = self.inner.write().await;
        let existing = inner.blog_posts.get(&id).cloned()?;
        let published = patch.published.unwrap_or(existing.published);
        let published_at = if published && !existing.published {
            Some(Utc::now())
        } else {
            existing.published_at
        };
        let updated = BlogPost {
            id,
            title: patch.title.unwrap_or(existing.title),
            slug: patch.slug.unwrap_or(existing.slug),
            excerpt: patch.excerpt.unwrap_or(existing.excerpt),
            content: patch.content.unwrap_or(existing.content),
            cover_image: patch.cover_image.or(existing.cover_image),
            tags: patch.tags.or(existing.tags),
            published,
            published_at,
            created_at: existing.created_at,
            updated_at: Utc::now(),
        };
        inner.blog_posts.insert(id, updated.clone());
        Some(updated)
    }

    pub async fn delete_blog_post(&self, id: i64) -> bool {
        let mut inner = self.inner.write().await;
        inner.blog_posts.remove(&id).is_some()
    }

    // ------------------------------------------------------------------
    // Contact messages
    // ------------------------------------------------------------------

    pub async fn get_contact_messages(&self) -> Vec<ContactMessage> {
        let inner = self.inner.read().await;
        let mut messages: Vec<ContactMessage> =
            inner.contact_messages.values().cloned().collect();
        messages.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        messages
    }

    pub async fn get_contact_message(&self, id: i64) -> Option<ContactMessage> {
        let inner = self.inner.read().await;
        inner.contact_messages.get(&id).cloned()
    }

    pub async fn create_contact_message(&self, new: NewContactMessage) -> ContactMessage {
        let mut inner = self.inner.write().await;
        let id = inner.alloc_id();
        let message = ContactMessage {
            id,
            first_name: new.first_name,
            last_name: new.last_name,
            email: new.email,
            subject: new.subject,
            message: new.message,
            read: false,
            created_at: Utc::now(),
        };
        inner.contact_messages.insert(id, message.clone());
        message
    }

    pub async fn mark_contact_message_read(&self, id: i64) -> bool {
        let mut inner = self.inner.write().await;
        match inner.contact_messages.get_mut(&id) {
            Some(message) => {
                message.read = true;
                true
            }
            None => false,
        }
    }

    pub async fn delete_contact_message(&self, id: i64) -> bool {
        let mut inner = self.inner.write().await;
        inner.contact_messages.remove(&id).is_some()
    }
}

impl Default for MemStore {
    fn default() -> Self {
        Self::new()
    }
}
