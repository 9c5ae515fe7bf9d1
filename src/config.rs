use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub ttl_minutes: i64,
    pub cookie_secure: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub session: SessionConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let session = SessionConfig {
            cookie_name: std::env::var("SESSION_COOKIE_NAME")
                .unwrap_or_else(|_| "session".into()),
            ttl_minutes: std::env::var("SESSION_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60 * 24 * 7),
            // Secure unless plain-http local development opts out.
            cookie_secure: std::env::var("SESSION_COOKIE_SECURE")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(true),
        };
        Ok(Self {
            database_url,
            session,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The only test touching these env vars, so no cross-test races.
    #[test]
    fn cookie_secure_defaults_on_and_opts_out() {
        std::env::set_var("DATABASE_URL", "postgres://postgres@localhost/postgres");

        std::env::remove_var("SESSION_COOKIE_SECURE");
        let config = AppConfig::from_env().unwrap();
        assert!(config.session.cookie_secure);

        std::env::set_var("SESSION_COOKIE_SECURE", "false");
        let config = AppConfig::from_env().unwrap();
        assert!(!config.session.cookie_secure);

        std::env::set_var("SESSION_COOKIE_SECURE", "true");
        let config = AppConfig::from_env().unwrap();
        assert!(config.session.cookie_secure);
    }
}
