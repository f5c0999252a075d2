//! Domain entities - the core business objects.

mod post;

mod user;

pub use post::{Comment, LikeOutcome, MediaKind, Post};
pub use user::{FollowOutcome, User};
