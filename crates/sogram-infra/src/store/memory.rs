//! In-process document store.
//!
//! The external document-database engine is an opaque collaborator; this
//! backend keeps the users and per-kind post collections in process memory
//! behind the same repository ports a remote backend would implement.
//! Note: Data is lost on process restart.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use sogram_core::domain::{Comment, FollowOutcome, LikeOutcome, MediaKind, Post, User};
use sogram_core::error::RepoError;
use sogram_core::ports::{PostRepository, UserRepository};

/// Users collection keyed by id.
pub struct MemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

/// Mask an email for logging to avoid PII in logs.
fn mask_email(email: &str) -> String {
    if let Some(at_pos) = email.find('@') {
        let (local, domain) = email.split_at(at_pos);
        let masked_local = if local.len() > 1 {
            format!("{}***", &local[..1])
        } else {
            "***".to_string()
        };
        format!("{}{}", masked_local, domain)
    } else {
        "***".to_string()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn save(&self, user: User) -> Result<User, RepoError> {
        let mut users = self.users.write().await;
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn list(&self) -> Result<Vec<User>, RepoError> {
        let users = self.users.read().await;
        Ok(users.values().cloned().collect())
    }

    async fn follow(&self, actor: Uuid, target: Uuid) -> Result<FollowOutcome, RepoError> {
        // Single write guard covers both documents; the two-sided update
        // cannot interleave with a concurrent unfollow.
        let mut users = self.users.write().await;

        if !users.contains_key(&actor) {
            return Err(RepoError::NotFound);
        }
        let (already, full_name) = match users.get(&target) {
            Some(t) => (t.followers.contains(&actor), t.full_name.clone()),
            None => return Err(RepoError::NotFound),
        };
        if already {
            return Ok(FollowOutcome {
                changed: false,
                full_name,
            });
        }

        let now = Utc::now();
        if let Some(t) = users.get_mut(&target) {
            t.followers.push(actor);
            t.updated_at = now;
        }
        if let Some(a) = users.get_mut(&actor) {
            a.following.push(target);
            a.updated_at = now;
        }

        Ok(FollowOutcome {
            changed: true,
            full_name,
        })
    }

    async fn unfollow(&self, actor: Uuid, target: Uuid) -> Result<FollowOutcome, RepoError> {
        let mut users = self.users.write().await;

        if !users.contains_key(&actor) {
            return Err(RepoError::NotFound);
        }
        let (related, full_name) = match users.get(&target) {
            Some(t) => (t.followers.contains(&actor), t.full_name.clone()),
            None => return Err(RepoError::NotFound),
        };
        if !related {
            return Ok(FollowOutcome {
                changed: false,
                full_name,
            });
        }

        let now = Utc::now();
        if let Some(t) = users.get_mut(&target) {
            t.followers.retain(|id| *id != actor);
            t.updated_at = now;
        }
        if let Some(a) = users.get_mut(&actor) {
            a.following.retain(|id| *id != target);
            a.updated_at = now;
        }

        Ok(FollowOutcome {
            changed: true,
            full_name,
        })
    }

    async fn remove_follower(
        &self,
        actor: Uuid,
        follower: Uuid,
    ) -> Result<FollowOutcome, RepoError> {
        let mut users = self.users.write().await;

        let full_name = match users.get(&follower) {
            Some(f) => f.full_name.clone(),
            None => return Err(RepoError::NotFound),
        };
        let a = users.get_mut(&actor).ok_or(RepoError::NotFound)?;
        if !a.followers.contains(&follower) {
            return Ok(FollowOutcome {
                changed: false,
                full_name,
            });
        }

        // Only the actor's side changes; the removed follower keeps their
        // `following` entry, matching the observed remove behavior.
        a.followers.retain(|id| *id != follower);
        a.updated_at = Utc::now();

        Ok(FollowOutcome {
            changed: true,
            full_name,
        })
    }
}

/// Post collections; a `Vec` keeps insertion order, so per-user queries
/// come back in upload order like a document-store scan would.
pub struct MemoryPostRepository {
    posts: RwLock<Vec<Post>>,
}

impl MemoryPostRepository {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(Vec::new()),
        }
    }
}

impl Default for MemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostRepository for MemoryPostRepository {
    async fn save(&self, post: Post) -> Result<Post, RepoError> {
        let mut posts = self.posts.write().await;
        match posts.iter_mut().find(|p| p.id == post.id) {
            Some(existing) => *existing = post.clone(),
            None => posts.push(post.clone()),
        }
        Ok(post)
    }

    async fn find_by_id(&self, kind: MediaKind, id: Uuid) -> Result<Option<Post>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| p.id == id && p.kind == kind).cloned())
    }

    async fn find_by_user(&self, kind: MediaKind, user_id: Uuid) -> Result<Vec<Post>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts
            .iter()
            .filter(|p| p.kind == kind && p.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn add_comment(
        &self,
        kind: MediaKind,
        post_id: Uuid,
        comment: Comment,
    ) -> Result<Option<Post>, RepoError> {
        let mut posts = self.posts.write().await;
        match posts.iter_mut().find(|p| p.id == post_id && p.kind == kind) {
            Some(post) => {
                post.comments.push(comment);
                post.updated_at = Utc::now();
                Ok(Some(post.clone()))
            }
            None => Ok(None),
        }
    }

    async fn toggle_like(
        &self,
        kind: MediaKind,
        post_id: Uuid,
        user_id: Uuid,
    ) -> Result<LikeOutcome, RepoError> {
        let mut posts = self.posts.write().await;
        let post = posts
            .iter_mut()
            .find(|p| p.id == post_id && p.kind == kind)
            .ok_or(RepoError::NotFound)?;

        post.updated_at = Utc::now();
        match post.likes.iter().position(|id| *id == user_id) {
            Some(pos) => {
                post.likes.remove(pos);
                Ok(LikeOutcome::Disliked)
            }
            None => {
                post.likes.push(user_id);
                Ok(LikeOutcome::Liked)
            }
        }
    }

    async fn delete(&self, kind: MediaKind, id: Uuid) -> Result<Option<Post>, RepoError> {
        let mut posts = self.posts.write().await;
        match posts.iter().position(|p| p.id == id && p.kind == kind) {
            Some(pos) => Ok(Some(posts.remove(pos))),
            None => Ok(None),
        }
    }
}
