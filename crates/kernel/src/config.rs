//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port (default: 3000).
    pub port: u16,

    /// PostgreSQL connection URL. When None, resources are kept in memory.
    pub database_url: Option<String>,

    /// Maximum database connections in pool (default: 10).
    pub database_max_connections: u32,

    /// Directory of theme templates overriding the built-in ones.
    pub templates_dir: Option<PathBuf>,

    /// CORS allowed origins (comma-separated, default: "*").
    pub cors_allowed_origins: Vec<String>,

    /// Title of the equipments theme page (default: "装备").
    pub equipments_title: String,

    /// Page size of the equipments theme page (default: 10).
    pub equipments_page_size: u32,

    /// JSON array of resources created at startup.
    pub seed_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            database_url: None,
            database_max_connections: 10,
            templates_dir: None,
            cors_allowed_origins: vec!["*".to_string()],
            equipments_title: "装备".to_string(),
            equipments_page_size: 10,
            seed_file: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .context("PORT must be a valid u16")?;

        let database_url = env::var("DATABASE_URL").ok().filter(|v| !v.trim().is_empty());

        let database_max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .context("DATABASE_MAX_CONNECTIONS must be a valid u32")?;

        let templates_dir = env::var("TEMPLATES_DIR").ok().map(PathBuf::from);

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .map(|v| v.split(',').map(|s| s.trim().to_string()).collect())
            .unwrap_or_else(|_| vec!["*".to_string()]);

        let equipments_title =
            env::var("EQUIPMENTS_TITLE").unwrap_or_else(|_| "装备".to_string());

        let equipments_page_size: u32 = env::var("EQUIPMENTS_PAGE_SIZE")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .context("EQUIPMENTS_PAGE_SIZE must be a valid u32")?;
        if equipments_page_size == 0 {
            anyhow::bail!("EQUIPMENTS_PAGE_SIZE must be at least 1");
        }

        let seed_file = env::var("SEED_FILE").ok().map(PathBuf::from);

        Ok(Self {
            port,
            database_url,
            database_max_connections,
            templates_dir,
            cors_allowed_origins,
            equipments_title,
            equipments_page_size,
            seed_file,
        })
    }
}
