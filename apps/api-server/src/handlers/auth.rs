//! Account, session, and follow-graph handlers.

use std::sync::Arc;

use actix_multipart::Multipart;
use actix_web::cookie::{Cookie, SameSite, time::Duration};
use actix_web::{HttpResponse, web};
use chrono::Utc;
use uuid::Uuid;

use sogram_core::domain::User;
use sogram_core::ports::{PasswordService, TokenService};
use sogram_shared::dto::{LoginRequest, MessageResponse, RegisterRequest, UserResponse};

use super::user_response;
use crate::config::{AppConfig, Environment};
use crate::middleware::auth::{Identity, OptionalIdentity, SESSION_COOKIE};
use crate::middleware::error::{AppError, AppResult};
use crate::multipart::FormData;
use crate::state::AppState;

fn cookie_flags(environment: Environment) -> (SameSite, bool) {
    match environment {
        Environment::Development => (SameSite::Lax, false),
        Environment::Production => (SameSite::None, true),
    }
}

/// Build the httpOnly session cookie carrying the signed token.
fn session_cookie(token: String, hours: i64, environment: Environment) -> Cookie<'static> {
    let (same_site, secure) = cookie_flags(environment);

    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .max_age(Duration::hours(hours))
        .same_site(same_site)
        .secure(secure)
        .finish()
}

/// An expired, empty session cookie; setting it clears the session.
fn removal_cookie(environment: Environment) -> Cookie<'static> {
    let (same_site, secure) = cookie_flags(environment);

    let mut cookie = Cookie::build(SESSION_COOKIE, "")
        .path("/")
        .http_only(true)
        .same_site(same_site)
        .secure(secure)
        .finish();
    cookie.make_removal();
    cookie
}

/// POST /auth/register
pub async fn register(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    config: web::Data<AppConfig>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if req.email.is_empty()
        || req.full_name.is_empty()
        || req.username.is_empty()
        || req.password.is_empty()
    {
        return Err(AppError::Validation("Incomplete user data.".to_string()));
    }
    if req.password.len() < 6 {
        return Err(AppError::Validation(
            "Password must be at least six characters long.".to_string(),
        ));
    }

    // Check if the email is already taken
    if state.users.find_by_email(&req.email).await?.is_some() {
        return Err(AppError::Duplicate("Account already exists.".to_string()));
    }

    let password_hash = password_service.hash(&req.password)?;

    let user = User::new(req.email, req.full_name, req.username, password_hash);
    let saved = state.users.save(user).await?;

    let token = token_service.generate_token(saved.id)?;

    tracing::info!(user_id = %saved.id, "New account registered");

    Ok(HttpResponse::Ok()
        .cookie(session_cookie(
            token,
            token_service.session_hours(),
            config.environment,
        ))
        .finish())
}

/// POST /auth/login
pub async fn login(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    config: web::Data<AppConfig>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if req.email.is_empty() || req.password.is_empty() {
        return Err(AppError::Validation("Incomplete user data.".to_string()));
    }

    // Unknown email and wrong password answer the same way on purpose;
    // the response does not reveal which one it was.
    let user = state
        .users
        .find_by_email(&req.email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Incorrect email or password.".to_string()))?;

    let valid = password_service.verify(&req.password, &user.password_hash)?;
    if !valid {
        return Err(AppError::Unauthorized(
            "Incorrect email or password.".to_string(),
        ));
    }

    let token = token_service.generate_token(user.id)?;

    Ok(HttpResponse::Ok()
        .cookie(session_cookie(
            token,
            token_service.session_hours(),
            config.environment,
        ))
        .finish())
}

/// GET /auth/log_in - decode the current session to a user id, or null.
/// Never fails: verification errors are swallowed to null.
pub async fn current_session(identity: OptionalIdentity) -> HttpResponse {
    HttpResponse::Ok().json(identity.0.map(|i| i.user_id))
}

/// GET /auth/log_out - clears the session cookie unconditionally.
pub async fn log_out(config: web::Data<AppConfig>) -> HttpResponse {
    HttpResponse::Ok()
        .cookie(removal_cookie(config.environment))
        .finish()
}

/// GET /auth/loggedUser - the caller's record, minus the password hash.
pub async fn logged_user(
    state: web::Data<AppState>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    let user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Unauthorized.".to_string()))?;

    Ok(HttpResponse::Ok().json(user_response(user)))
}

/// GET /auth - list every account (public records only).
pub async fn list_users(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let users = state.users.list().await?;
    let users: Vec<UserResponse> = users.into_iter().map(user_response).collect();

    Ok(HttpResponse::Ok().json(users))
}

/// PUT /auth/edit - multipart profile edit (full_name, username, bio,
/// avatar file). All four fields are overwritten.
pub async fn edit_profile(
    state: web::Data<AppState>,
    identity: Identity,
    payload: Multipart,
) -> AppResult<HttpResponse> {
    let form = FormData::read(payload).await?;

    let avatar = form
        .filename()
        .ok_or_else(|| AppError::Validation("An avatar file is required.".to_string()))?
        .to_string();

    let mut user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Unauthorized.".to_string()))?;

    user.full_name = form.text("full_name").unwrap_or_default().to_string();
    user.username = form.text("username").unwrap_or_default().to_string();
    user.bio = form.text("bio").unwrap_or_default().to_string();
    user.avatar = avatar;
    user.updated_at = Utc::now();

    let saved = state.users.save(user).await?;

    Ok(HttpResponse::Ok().json(user_response(saved)))
}

/// PUT /auth/{id}/follow
pub async fn follow(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let target = path.into_inner();
    if target == identity.user_id {
        return Err(AppError::SelfReference(
            "You can't follow yourself.".to_string(),
        ));
    }

    let outcome = state.users.follow(identity.user_id, target).await?;
    if !outcome.changed {
        return Err(AppError::FollowState(format!(
            "You already follow {}.",
            outcome.full_name
        )));
    }

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: format!("You are following {}.", outcome.full_name),
    }))
}

/// PUT /auth/{id}/unfollow
pub async fn unfollow(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let target = path.into_inner();
    if target == identity.user_id {
        return Err(AppError::SelfReference(
            "You can't unfollow yourself.".to_string(),
        ));
    }

    let outcome = state.users.unfollow(identity.user_id, target).await?;
    if !outcome.changed {
        return Err(AppError::FollowState(format!(
            "You don't follow {}.",
            outcome.full_name
        )));
    }

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: format!("You have unfollowed {}.", outcome.full_name),
    }))
}

/// PUT /auth/{id}/remove - remove a follower from the caller's followers.
pub async fn remove_follower(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let follower = path.into_inner();
    if follower == identity.user_id {
        return Err(AppError::SelfReference(
            "You can't remove yourself.".to_string(),
        ));
    }

    let outcome = state
        .users
        .remove_follower(identity.user_id, follower)
        .await?;
    if !outcome.changed {
        return Err(AppError::FollowState(format!(
            "{} doesn't follow you.",
            outcome.full_name
        )));
    }

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: format!("You have removed {}.", outcome.full_name),
    }))
}

/// GET /auth/following_timeline - resolve everyone the caller follows.
pub async fn following_timeline(
    state: web::Data<AppState>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    let user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Unauthorized.".to_string()))?;

    Ok(HttpResponse::Ok().json(resolve_users(&state, &user.following).await?))
}

/// GET /auth/followers_timeline - resolve everyone following the caller.
pub async fn followers_timeline(
    state: web::Data<AppState>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    let user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Unauthorized.".to_string()))?;

    Ok(HttpResponse::Ok().json(resolve_users(&state, &user.followers).await?))
}

/// Resolve each id independently; ids that no longer resolve are skipped.
async fn resolve_users(state: &AppState, ids: &[Uuid]) -> AppResult<Vec<UserResponse>> {
    let mut users = Vec::with_capacity(ids.len());
    for id in ids {
        if let Some(user) = state.users.find_by_id(*id).await? {
            users.push(user_response(user));
        }
    }
    Ok(users)
}
