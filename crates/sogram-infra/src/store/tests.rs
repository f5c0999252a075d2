use sogram_core::domain::{Comment, LikeOutcome, MediaKind, Post, User};
use sogram_core::ports::{PostRepository, UserRepository};

use crate::store::{MemoryPostRepository, MemoryUserRepository};

fn test_user(email: &str, full_name: &str, username: &str) -> User {
    User::new(
        email.to_string(),
        full_name.to_string(),
        username.to_string(),
        "argon2-hash".to_string(),
    )
}

#[tokio::test]
async fn test_save_and_find_by_email() {
    let repo = MemoryUserRepository::new();
    let user = test_user("a@x.com", "Alice", "alice");
    let saved = repo.save(user.clone()).await.unwrap();

    assert_eq!(saved.id, user.id);
    let found = repo.find_by_email("a@x.com").await.unwrap().unwrap();
    assert_eq!(found.username, "alice");
    assert!(repo.find_by_email("b@x.com").await.unwrap().is_none());
}

#[tokio::test]
async fn test_follow_records_both_sides() {
    let repo = MemoryUserRepository::new();
    let alice = repo
        .save(test_user("a@x.com", "Alice", "alice"))
        .await
        .unwrap();
    let bob = repo.save(test_user("b@x.com", "Bob", "bob")).await.unwrap();

    let outcome = repo.follow(alice.id, bob.id).await.unwrap();
    assert!(outcome.changed);
    assert_eq!(outcome.full_name, "Bob");

    let bob = repo.find_by_id(bob.id).await.unwrap().unwrap();
    let alice = repo.find_by_id(alice.id).await.unwrap().unwrap();
    assert!(bob.followers.contains(&alice.id));
    assert!(alice.following.contains(&bob.id));
}

#[tokio::test]
async fn test_follow_twice_is_a_no_op() {
    let repo = MemoryUserRepository::new();
    let alice = repo
        .save(test_user("a@x.com", "Alice", "alice"))
        .await
        .unwrap();
    let bob = repo.save(test_user("b@x.com", "Bob", "bob")).await.unwrap();

    assert!(repo.follow(alice.id, bob.id).await.unwrap().changed);
    assert!(!repo.follow(alice.id, bob.id).await.unwrap().changed);

    let bob = repo.find_by_id(bob.id).await.unwrap().unwrap();
    assert_eq!(bob.followers, vec![alice.id]);
}

#[tokio::test]
async fn test_unfollow_clears_both_sides() {
    let repo = MemoryUserRepository::new();
    let alice = repo
        .save(test_user("a@x.com", "Alice", "alice"))
        .await
        .unwrap();
    let bob = repo.save(test_user("b@x.com", "Bob", "bob")).await.unwrap();

    repo.follow(alice.id, bob.id).await.unwrap();
    let outcome = repo.unfollow(alice.id, bob.id).await.unwrap();
    assert!(outcome.changed);

    let bob = repo.find_by_id(bob.id).await.unwrap().unwrap();
    let alice = repo.find_by_id(alice.id).await.unwrap().unwrap();
    assert!(bob.followers.is_empty());
    assert!(alice.following.is_empty());

    // Unfollowing a stranger reports no change.
    assert!(!repo.unfollow(alice.id, bob.id).await.unwrap().changed);
}

#[tokio::test]
async fn test_remove_follower_touches_one_side_only() {
    let repo = MemoryUserRepository::new();
    let alice = repo
        .save(test_user("a@x.com", "Alice", "alice"))
        .await
        .unwrap();
    let bob = repo.save(test_user("b@x.com", "Bob", "bob")).await.unwrap();

    // Bob follows Alice; Alice then removes him from her followers.
    repo.follow(bob.id, alice.id).await.unwrap();
    let outcome = repo.remove_follower(alice.id, bob.id).await.unwrap();
    assert!(outcome.changed);

    let alice = repo.find_by_id(alice.id).await.unwrap().unwrap();
    let bob = repo.find_by_id(bob.id).await.unwrap().unwrap();
    assert!(alice.followers.is_empty());
    // The removed follower's own list is left as observed.
    assert!(bob.following.contains(&alice.id));
}

#[tokio::test]
async fn test_toggle_like_is_an_involution() {
    let repo = MemoryPostRepository::new();
    let owner = uuid::Uuid::new_v4();
    let liker = uuid::Uuid::new_v4();
    let post = repo
        .save(Post::new(
            MediaKind::Image,
            owner,
            "cat.png".to_string(),
            "a cat".to_string(),
        ))
        .await
        .unwrap();

    let first = repo
        .toggle_like(MediaKind::Image, post.id, liker)
        .await
        .unwrap();
    let second = repo
        .toggle_like(MediaKind::Image, post.id, liker)
        .await
        .unwrap();

    assert_eq!(first, LikeOutcome::Liked);
    assert_eq!(second, LikeOutcome::Disliked);
    let post = repo
        .find_by_id(MediaKind::Image, post.id)
        .await
        .unwrap()
        .unwrap();
    assert!(post.likes.is_empty());
}

#[tokio::test]
async fn test_comment_on_missing_post_appends_nothing() {
    let repo = MemoryPostRepository::new();
    let comment = Comment::new(uuid::Uuid::new_v4(), "alice".to_string(), "hi".to_string());

    let result = repo
        .add_comment(MediaKind::Image, uuid::Uuid::new_v4(), comment)
        .await
        .unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn test_comment_is_embedded() {
    let repo = MemoryPostRepository::new();
    let post = repo
        .save(Post::new(
            MediaKind::Video,
            uuid::Uuid::new_v4(),
            "clip.mp4".to_string(),
            String::new(),
        ))
        .await
        .unwrap();

    let commenter = uuid::Uuid::new_v4();
    let updated = repo
        .add_comment(
            MediaKind::Video,
            post.id,
            Comment::new(commenter, "bob".to_string(), "nice clip".to_string()),
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.comments.len(), 1);
    assert_eq!(updated.comments[0].username, "bob");
    assert_eq!(updated.comments[0].user_id, commenter);
}

#[tokio::test]
async fn test_delete_is_gone_on_second_call() {
    let repo = MemoryPostRepository::new();
    let post = repo
        .save(Post::new(
            MediaKind::Image,
            uuid::Uuid::new_v4(),
            "cat.png".to_string(),
            String::new(),
        ))
        .await
        .unwrap();

    let removed = repo.delete(MediaKind::Image, post.id).await.unwrap();
    assert_eq!(removed.unwrap().id, post.id);
    assert!(repo.delete(MediaKind::Image, post.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_kinds_are_isolated() {
    let repo = MemoryPostRepository::new();
    let owner = uuid::Uuid::new_v4();
    let image = repo
        .save(Post::new(
            MediaKind::Image,
            owner,
            "cat.png".to_string(),
            String::new(),
        ))
        .await
        .unwrap();

    // An image id behaves as absent through the video collection.
    assert!(
        repo.find_by_id(MediaKind::Video, image.id)
            .await
            .unwrap()
            .is_none()
    );
    assert!(repo.delete(MediaKind::Video, image.id).await.unwrap().is_none());
    assert!(
        repo.toggle_like(MediaKind::Video, image.id, owner)
            .await
            .is_err()
    );
    assert_eq!(
        repo.find_by_user(MediaKind::Image, owner).await.unwrap().len(),
        1
    );
    assert!(
        repo.find_by_user(MediaKind::Video, owner)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn test_find_by_user_keeps_upload_order() {
    let repo = MemoryPostRepository::new();
    let owner = uuid::Uuid::new_v4();
    for n in 0..3 {
        repo.save(Post::new(
            MediaKind::Image,
            owner,
            format!("photo-{n}.png"),
            String::new(),
        ))
        .await
        .unwrap();
    }

    let posts = repo.find_by_user(MediaKind::Image, owner).await.unwrap();
    let names: Vec<&str> = posts.iter().map(|p| p.media.as_str()).collect();
    assert_eq!(names, vec!["photo-0.png", "photo-1.png", "photo-2.png"]);
}
