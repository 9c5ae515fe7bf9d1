use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::CookieJar;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{PublicUser, SignInRequest, SignUpRequest},
        extractors::CurrentUser,
        password::{burn_verify, hash_password, verify_password},
        repo_types::{Session, User},
        session::{clear_session_cookie, expiry_from_now, generate_token, session_cookie},
    },
    error::ApiError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(sign_up))
        .route("/auth/signin", post(sign_in))
        .route("/auth/signout", get(sign_out))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

async fn open_session(
    state: &AppState,
    jar: CookieJar,
    user: &User,
) -> Result<CookieJar, ApiError> {
    let token = generate_token();
    let expires_at = expiry_from_now(state.config.session.ttl_minutes);
    let session = Session::create(&state.db, user.id, &token, expires_at).await?;
    Ok(jar.add(session_cookie(&state.config.session, &session.token)))
}

#[instrument(skip(state, jar, payload))]
pub async fn sign_up(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<SignUpRequest>,
) -> Result<(CookieJar, Json<PublicUser>), ApiError> {
    let email = normalize_email(&payload.email);

    if !is_valid_email(&email) {
        warn!(%email, "invalid email");
        return Err(ApiError::Validation("Invalid email".into()));
    }
    if payload.password.len() < 8 {
        warn!("password too short");
        return Err(ApiError::Validation("Password too short".into()));
    }
    if User::find_by_email(&state.db, &email).await?.is_some() {
        warn!(%email, "email already registered");
        return Err(ApiError::EmailTaken);
    }

    let hash = hash_password(&payload.password)?;
    let user = User::create(&state.db, &email, &hash).await?;
    let jar = open_session(&state, jar, &user).await?;

    info!(user_id = %user.id, email = %user.email, "user signed up");
    Ok((jar, Json(PublicUser::from(user))))
}

#[instrument(skip(state, jar, payload))]
pub async fn sign_in(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<SignInRequest>,
) -> Result<(CookieJar, Json<PublicUser>), ApiError> {
    let email = normalize_email(&payload.email);

    let user = match User::find_by_email(&state.db, &email).await? {
        Some(user) => user,
        None => {
            // Same argon2 cost as the mismatch path, same generic message.
            burn_verify(&payload.password);
            warn!(%email, "sign-in unknown email");
            return Err(ApiError::InvalidCredentials);
        }
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(%email, user_id = %user.id, "sign-in invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    let jar = open_session(&state, jar, &user).await?;

    info!(user_id = %user.id, email = %user.email, "user signed in");
    Ok((jar, Json(PublicUser::from(user))))
}

/// Invalidates the session named by the cookie, if any, and clears the
/// cookie. Safe to call without a live session.
#[instrument(skip(state, jar))]
pub async fn sign_out(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, StatusCode), ApiError> {
    if let Some(cookie) = jar.get(&state.config.session.cookie_name) {
        Session::delete(&state.db, cookie.value()).await?;
        info!("session invalidated");
    }
    let jar = jar.add(clear_session_cookie(&state.config.session));
    Ok((jar, StatusCode::OK))
}

#[instrument(skip(user))]
pub async fn get_me(CurrentUser(user): CurrentUser) -> Json<PublicUser> {
    Json(PublicUser::from(user))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_validation() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("a.b+c@sub.domain.io"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("user@nodot"));
        assert!(!is_valid_email("spaces in@example.com"));
    }

    #[test]
    fn emails_normalize_to_lowercase() {
        assert_eq!(normalize_email("  User@Example.COM "), "user@example.com");
    }
}
