//! Public profile handler.

use actix_web::{HttpResponse, web};
use serde::Serialize;
use uuid::Uuid;

use sogram_core::domain::{MediaKind, Post};
use sogram_shared::dto::UserResponse;

use super::user_response;
use crate::middleware::error::AppResult;
use crate::state::AppState;

#[derive(Serialize)]
struct ProfileResponse {
    user: Option<UserResponse>,
    images: Vec<Post>,
    videos: Vec<Post>,
}

/// GET /{id}/profile - a user's public record plus all of their posts.
/// Public route; `user` is null when the id does not resolve.
pub async fn profile(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let user = state.users.find_by_id(id).await?.map(user_response);
    let images = state.posts.find_by_user(MediaKind::Image, id).await?;
    let videos = state.posts.find_by_user(MediaKind::Video, id).await?;

    Ok(HttpResponse::Ok().json(ProfileResponse {
        user,
        images,
        videos,
    }))
}
