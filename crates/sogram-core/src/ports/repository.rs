use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Comment, FollowOutcome, LikeOutcome, MediaKind, Post, User};
use crate::error::RepoError;

/// User repository over the users collection.
///
/// The follow-graph mutations touch two documents at once and must be
/// atomic: a follow that lands on one side only leaves the redundant
/// relation inconsistent.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their unique ID.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError>;

    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Save a user (create or update).
    async fn save(&self, user: User) -> Result<User, RepoError>;

    /// List every user in the collection.
    async fn list(&self) -> Result<Vec<User>, RepoError>;

    /// Add `actor` to `target`'s followers and `target` to `actor`'s
    /// following, atomically. No-op when the relation already exists.
    async fn follow(&self, actor: Uuid, target: Uuid) -> Result<FollowOutcome, RepoError>;

    /// Remove both sides of the relation, atomically. No-op when the
    /// relation does not exist.
    async fn unfollow(&self, actor: Uuid, target: Uuid) -> Result<FollowOutcome, RepoError>;

    /// Remove `follower` from `actor`'s followers only; the follower's
    /// `following` list keeps its (now dangling) entry, as observed in the
    /// original remove-follower behavior.
    async fn remove_follower(&self, actor: Uuid, follower: Uuid)
    -> Result<FollowOutcome, RepoError>;
}

/// Post repository over the per-kind media collections. Every operation
/// takes the `MediaKind`; an id that exists under the other kind behaves
/// as absent.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Save a post (create or update).
    async fn save(&self, post: Post) -> Result<Post, RepoError>;

    /// Find a post by its unique ID.
    async fn find_by_id(&self, kind: MediaKind, id: Uuid) -> Result<Option<Post>, RepoError>;

    /// All posts owned by one user, for one media kind.
    async fn find_by_user(&self, kind: MediaKind, user_id: Uuid) -> Result<Vec<Post>, RepoError>;

    /// Append a comment. Returns the updated post, or `None` (and appends
    /// nothing) when the post does not exist.
    async fn add_comment(
        &self,
        kind: MediaKind,
        post_id: Uuid,
        comment: Comment,
    ) -> Result<Option<Post>, RepoError>;

    /// Toggle the user's membership in the post's likes, atomically with
    /// the membership check.
    async fn toggle_like(
        &self,
        kind: MediaKind,
        post_id: Uuid,
        user_id: Uuid,
    ) -> Result<LikeOutcome, RepoError>;

    /// Remove a post. Returns the removed post, or `None` when it was
    /// already gone.
    async fn delete(&self, kind: MediaKind, id: Uuid) -> Result<Option<Post>, RepoError>;
}
