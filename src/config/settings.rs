use crate::config::league::LeagueSettings;

const DEFAULT_DATABASE_PATH: &str = "league.db";
const DEFAULT_CACHE_DIR: &str = "cache";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_path: String,
    pub cache_dir: String,
    /// Bearer token guarding the refresh endpoint; open when unset
    pub admin_token: Option<String>,
    /// Applied to imported leagues that carry no settings of their own
    pub default_league: LeagueSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            database_path: env_or("DATABASE_PATH", DEFAULT_DATABASE_PATH),
            cache_dir: env_or("CACHE_DIR", DEFAULT_CACHE_DIR),
            admin_token: std::env::var("ADMIN_TOKEN").ok().filter(|t| !t.is_empty()),
            default_league: LeagueSettings::default(),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
