use std::{net::SocketAddr, time::Duration};

use anyhow::Context;
use networth_core::Error;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    /// The only email address allowed to sign in
    pub allowed_email: String,
    pub auth_url: String,
    pub auth_publishable_key: String,
    /// Public origin of this server, used to build the magic-link redirect
    pub public_url: String,
    pub cookie_secure: bool,
}

fn required(key: &str) -> anyhow::Result<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| Error::MissingConfigKey(key.to_string()).into())
}

fn flag(key: &str) -> bool {
    std::env::var(key)
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("NW_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .context("Invalid NW_LISTEN_ADDR")?;
        let db_path = std::env::var("NW_DB_PATH").unwrap_or_else(|_| "./db/app.db".into());
        let cors_allow = std::env::var("NW_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = std::env::var("NW_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".into())
            .parse()
            .unwrap_or(30000);
        let allowed_email = std::env::var("NW_ALLOWED_EMAIL")
            .map(|v| v.trim().to_string())
            .unwrap_or_default();
        let auth_url = required("NW_AUTH_URL")?;
        let auth_publishable_key = required("NW_AUTH_PUBLISHABLE_KEY")?;
        let public_url = std::env::var("NW_PUBLIC_URL")
            .unwrap_or_else(|_| "http://localhost:8080".into())
            .trim_end_matches('/')
            .to_string();
        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            allowed_email,
            auth_url,
            auth_publishable_key,
            public_url,
            cookie_secure: flag("NW_COOKIE_SECURE"),
        })
    }

    /// Where the provider sends the browser after the user clicks the emailed link.
    pub fn callback_url(&self) -> String {
        format!("{}/api/v1/auth/callback", self.public_url)
    }
}
