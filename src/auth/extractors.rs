use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use axum_extra::extract::CookieJar;
use tracing::warn;

use crate::{
    auth::repo_types::{Session, User},
    error::ApiError,
    state::AppState,
};

/// Resolve the request's session cookie to a user. Missing, unknown and
/// expired tokens all degrade to anonymous; only storage failures error.
pub async fn current_user(headers: &HeaderMap, state: &AppState) -> Result<Option<User>, ApiError> {
    let jar = CookieJar::from_headers(headers);
    let Some(cookie) = jar.get(&state.config.session.cookie_name) else {
        return Ok(None);
    };

    let Some(session) = Session::find_live(&state.db, cookie.value()).await? else {
        return Ok(None);
    };

    let user = User::find_by_id(&state.db, session.user_id).await?;
    if user.is_none() {
        warn!(user_id = %session.user_id, "session points at a missing user");
    }
    Ok(user)
}

/// Extracts the authenticated caller, rejecting anonymous requests with 401.
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match current_user(&parts.headers, state).await? {
            Some(user) => Ok(CurrentUser(user)),
            None => Err(ApiError::Unauthenticated),
        }
    }
}
