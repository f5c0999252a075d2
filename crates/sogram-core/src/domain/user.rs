use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity - an account plus both sides of its follow graph.
///
/// The follow relation is recorded redundantly on both endpoints:
/// `followers` holds who follows this user, `following` holds who this
/// user follows. A user's own id never appears in either list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub username: String,
    /// Never serialized to clients; handlers respond with `UserResponse`.
    pub password_hash: String,
    /// Filename reference for the avatar; empty until the first profile edit.
    pub avatar: String,
    pub bio: String,
    pub followers: Vec<Uuid>,
    pub following: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with generated ID and timestamps.
    pub fn new(email: String, full_name: String, username: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            full_name,
            username,
            password_hash,
            avatar: String::new(),
            bio: String::new(),
            followers: Vec::new(),
            following: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Result of a follow-graph mutation.
///
/// `changed` is false when the relation was already in the requested state
/// (follow an existing friend, unfollow a stranger); the store applies
/// nothing in that case. `full_name` is the counterpart's display name,
/// used for response messages.
#[derive(Debug, Clone)]
pub struct FollowOutcome {
    pub changed: bool,
    pub full_name: String,
}
