//! HTTP handlers and route configuration.
//!
//! Image and video posts share one handler set; the media kind is
//! scope-level app data and only the route paths differ per kind
//! (the paths are part of the observed API surface).

mod auth;
mod health;
mod posts;
mod profile;


use actix_web::web;

use sogram_core::domain::{MediaKind, User};
use sogram_shared::dto::UserResponse;

/// A user's public view - everything except the password hash.
pub(crate) fn user_response(user: User) -> UserResponse {
    UserResponse {
        id: user.id,
        email: user.email,
        full_name: user.full_name,
        username: user.username,
        avatar: user.avatar,
        bio: user.bio,
        followers: user.followers,
        following: user.following,
        created_at: user.created_at,
        updated_at: user.updated_at,
    }
}

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/auth")
                .route("", web::get().to(auth::list_users))
                .route("/register", web::post().to(auth::register))
                .route("/login", web::post().to(auth::login))
                .route("/log_in", web::get().to(auth::current_session))
                .route("/log_out", web::get().to(auth::log_out))
                .route("/loggedUser", web::get().to(auth::logged_user))
                .route("/edit", web::put().to(auth::edit_profile))
                .route("/following_timeline", web::get().to(auth::following_timeline))
                .route("/followers_timeline", web::get().to(auth::followers_timeline))
                .route("/{id}/follow", web::put().to(auth::follow))
                .route("/{id}/unfollow", web::put().to(auth::unfollow))
                .route("/{id}/remove", web::put().to(auth::remove_follower)),
        )
        .service(
            web::scope("/image")
                .app_data(web::Data::new(MediaKind::Image))
                .route("", web::post().to(posts::upload))
                .route("/image_timeline", web::get().to(posts::timeline))
                .route("/image/{id}", web::get().to(posts::get_post))
                .route("/{id}/comment_on_image", web::post().to(posts::comment))
                .route("/{id}/like_an_image", web::put().to(posts::like))
                .route("/{id}/delete_image", web::delete().to(posts::delete)),
        )
        .service(
            web::scope("/video")
                .app_data(web::Data::new(MediaKind::Video))
                .route("", web::post().to(posts::upload))
                .route("/video_timeline", web::get().to(posts::timeline))
                .route("/{id}/video", web::get().to(posts::get_post))
                .route("/{id}/comment_on_video", web::post().to(posts::comment))
                .route("/{id}/like_a_video", web::put().to(posts::like))
                .route("/{id}/delete_video", web::delete().to(posts::delete)),
        )
        .route("/{id}/profile", web::get().to(profile::profile));
}
