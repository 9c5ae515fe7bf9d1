use axum_extra::extract::cookie::{Cookie, SameSite};
use rand::{distributions::Alphanumeric, Rng};
use time::{Duration, OffsetDateTime};

use crate::config::SessionConfig;

pub const TOKEN_LEN: usize = 48;

/// Opaque session token: 48 alphanumeric chars from the OS RNG.
pub fn generate_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LEN)
        .map(char::from)
        .collect()
}

pub fn expiry_from_now(ttl_minutes: i64) -> OffsetDateTime {
    OffsetDateTime::now_utc() + Duration::minutes(ttl_minutes)
}

/// HTTP-only cookie carrying the session token.
pub fn session_cookie(config: &SessionConfig, token: &str) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), token.to_string()))
        .path("/")
        .http_only(true)
        .secure(config.cookie_secure)
        .same_site(SameSite::Lax)
        .max_age(Duration::minutes(config.ttl_minutes))
        .build()
}

/// Expired empty cookie with the same name and path, clearing the session.
pub fn clear_session_cookie(config: &SessionConfig) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), String::new()))
        .path("/")
        .http_only(true)
        .secure(config.cookie_secure)
        .same_site(SameSite::Lax)
        .expires(OffsetDateTime::UNIX_EPOCH)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SessionConfig {
        SessionConfig {
            cookie_name: "session".into(),
            ttl_minutes: 60,
            cookie_secure: false,
        }
    }

    #[test]
    fn tokens_are_opaque_and_distinct() {
        let a = generate_token();
        let b = generate_token();
        assert_eq!(a.len(), TOKEN_LEN);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(a, b);
    }

    #[test]
    fn expiry_is_in_the_future() {
        let exp = expiry_from_now(60);
        assert!(exp > OffsetDateTime::now_utc());
    }

    #[test]
    fn session_cookie_attributes() {
        let cookie = session_cookie(&test_config(), "tok123");
        assert_eq!(cookie.name(), "session");
        assert_eq!(cookie.value(), "tok123");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    }

    #[test]
    fn clear_cookie_expires_immediately() {
        let cookie = clear_session_cookie(&test_config());
        assert_eq!(cookie.name(), "session");
        assert!(cookie.value().is_empty());
        assert_eq!(
            cookie.expires().and_then(|e| e.datetime()),
            Some(OffsetDateTime::UNIX_EPOCH)
        );
    }
}
