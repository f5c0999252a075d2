//! Media post handlers - shared by the image and video route scopes.

use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};
use uuid::Uuid;

use sogram_core::domain::{Comment, LikeOutcome, MediaKind, Post};
use sogram_shared::dto::CommentRequest;

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::multipart::FormData;
use crate::state::AppState;

/// POST /image | POST /video - multipart upload (file + desc).
pub async fn upload(
    state: web::Data<AppState>,
    identity: Identity,
    kind: web::Data<MediaKind>,
    payload: Multipart,
) -> AppResult<HttpResponse> {
    let form = FormData::read(payload).await?;

    let media = form
        .filename()
        .ok_or_else(|| AppError::Validation("A media file is required.".to_string()))?
        .to_string();
    let desc = form.text("desc").unwrap_or_default().to_string();

    let post = Post::new(**kind, identity.user_id, media, desc);
    let saved = state.posts.save(post).await?;

    tracing::info!(post_id = %saved.id, kind = %saved.kind, "Post created");

    Ok(HttpResponse::Ok().json(saved))
}

/// GET /image/image_timeline | GET /video/video_timeline
///
/// The caller's own posts, then each followed user's posts fetched one
/// query at a time in following-list order. Concatenation order, not a
/// chronological merge.
pub async fn timeline(
    state: web::Data<AppState>,
    identity: Identity,
    kind: web::Data<MediaKind>,
) -> AppResult<HttpResponse> {
    let user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Unauthorized.".to_string()))?;

    let mut feed = state.posts.find_by_user(**kind, user.id).await?;
    for friend in &user.following {
        feed.extend(state.posts.find_by_user(**kind, *friend).await?);
    }

    Ok(HttpResponse::Ok().json(feed))
}

/// GET /image/image/{id} | GET /video/{id}/video - public.
/// Responds with the post, or null when absent.
pub async fn get_post(
    state: web::Data<AppState>,
    kind: web::Data<MediaKind>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state.posts.find_by_id(**kind, path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(post))
}

/// POST /image/{id}/comment_on_image | POST /video/{id}/comment_on_video
///
/// Embeds a snapshot of the commenter's current username. When the post
/// does not exist, nothing is appended and the response is null (the
/// silent failure is part of the observed contract).
pub async fn comment(
    state: web::Data<AppState>,
    identity: Identity,
    kind: web::Data<MediaKind>,
    path: web::Path<Uuid>,
    body: web::Json<CommentRequest>,
) -> AppResult<HttpResponse> {
    let commenter = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Unauthorized.".to_string()))?;

    let comment = Comment::new(identity.user_id, commenter.username, body.into_inner().comment);
    let updated = state.posts.add_comment(**kind, path.into_inner(), comment).await?;

    Ok(HttpResponse::Ok().json(updated))
}

/// PUT /image/{id}/like_an_image | PUT /video/{id}/like_a_video
///
/// Toggle: absent from the likes set adds the caller, present removes them.
pub async fn like(
    state: web::Data<AppState>,
    identity: Identity,
    kind: web::Data<MediaKind>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let outcome = state
        .posts
        .toggle_like(**kind, path.into_inner(), identity.user_id)
        .await?;

    let message = match outcome {
        LikeOutcome::Liked => format!("You liked this {}", kind.as_str()),
        LikeOutcome::Disliked => format!("You disliked this {}", kind.as_str()),
    };

    Ok(HttpResponse::Ok().json(message))
}

/// DELETE /image/{id}/delete_image | DELETE /video/{id}/delete_video
///
/// Deliberately unauthenticated, matching the observed surface: any caller
/// may delete any post by id. Hard delete; the removed post is echoed back.
pub async fn delete(
    state: web::Data<AppState>,
    kind: web::Data<MediaKind>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let label = match **kind {
        MediaKind::Image => "Image",
        MediaKind::Video => "Video",
    };

    let removed = state
        .posts
        .delete(**kind, path.into_inner())
        .await?
        .ok_or_else(|| AppError::AlreadyDeleted(format!("{} has already been deleted.", label)))?;

    Ok(HttpResponse::Ok().json(removed))
}
