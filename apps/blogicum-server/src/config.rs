//! Application configuration loaded from environment variables.

use std::env;

use blogicum_infra::{DatabaseConfig, JwtConfig};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `None` runs the blog on the in-memory store.
    pub database: Option<DatabaseConfig>,
    pub jwt: JwtConfig,
    pub seed: SeedConfig,
}

/// Reference data loaded into the in-memory store at startup.
///
/// `SEED_CATEGORIES` holds `slug:Title` pairs and `SEED_LOCATIONS` plain
/// names, both comma separated.
#[derive(Debug, Clone, Default)]
pub struct SeedConfig {
    /// `(slug, title)` pairs.
    pub categories: Vec<(String, String)>,
    pub locations: Vec<String>,
}

impl SeedConfig {
    pub fn from_env() -> Self {
        Self {
            categories: env::var("SEED_CATEGORIES")
                .map(|raw| parse_categories(&raw))
                .unwrap_or_default(),
            locations: env::var("SEED_LOCATIONS")
                .map(|raw| parse_list(&raw).map(str::to_string).collect())
                .unwrap_or_default(),
        }
    }
}

fn parse_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|item| !item.is_empty())
}

/// `travel:Travel notes` becomes `("travel", "Travel notes")`; a bare slug is
/// its own title.
fn parse_categories(raw: &str) -> Vec<(String, String)> {
    parse_list(raw)
        .map(|entry| match entry.split_once(':') {
            Some((slug, title)) if !title.trim().is_empty() => {
                (slug.trim().to_string(), title.trim().to_string())
            }
            Some((slug, _)) => (slug.trim().to_string(), slug.trim().to_string()),
            None => (entry.to_string(), entry.to_string()),
        })
        .collect()
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| {
            let mut config = DatabaseConfig::new(url);
            if let Some(max) = parse_var("DB_MAX_CONNECTIONS") {
                config.max_connections = max;
            }
            if let Some(min) = parse_var("DB_MIN_CONNECTIONS") {
                config.min_connections = min;
            }
            config
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_var("PORT").unwrap_or(8080),
            database,
            jwt: JwtConfig::from_env(),
            seed: SeedConfig::from_env(),
        }
    }
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.parse().ok())
}
