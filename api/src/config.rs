use std::env;

use anyhow::Context;

/// Name stamped into `created_by`/`updated_by` when none is configured
pub const DEFAULT_AUDITOR: &str = "Account Service";

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Recorded as the author of every write
    pub auditor: String,
    /// Create missing tables on start-up
    pub auto_migrate: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let port = match env::var("PORT") {
            Ok(p) => p
                .parse()
                .with_context(|| format!("PORT must be a valid port number, got '{}'", p))?,
            Err(_) => 8080,
        };

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port,
            auditor: env::var("AUDITOR_NAME")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_AUDITOR.to_string()),
            auto_migrate: env::var("AUTO_MIGRATE")
                .map(|v| parse_flag(&v))
                .unwrap_or(true),
        })
    }
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}
