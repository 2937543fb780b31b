/// Configuration management for the API server
///
/// This module loads configuration from environment variables (and a `.env`
/// file, if present) into a type-safe configuration struct.
///
/// # Environment Variables
///
/// - `DATABASE_URL`: PostgreSQL connection string (required)
/// - `DATABASE_MAX_CONNECTIONS`: pool size (default: 10)
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `API_PORT`: Port to bind to (default: 8080)
/// - `CORS_ORIGINS`: Comma-separated allowed origins, `*` for any (default: *)
/// - `TOTAL_ON_PAGE`: Users per page on `GET /users/` (default: 10)
/// - `RUST_LOG`: Log filter (default: userhub_api=debug,tower_http=debug)
///
/// # Example
///
/// ```no_run
/// use userhub_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// println!("{} users per page", config.pagination.total_on_page);
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use std::env;

/// Users per page when `TOTAL_ON_PAGE` is not set
pub const DEFAULT_TOTAL_ON_PAGE: u64 = 10;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// List pagination
    pub pagination: PaginationConfig,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Allowed CORS origins; `["*"]` allows any origin
    pub cors_origins: Vec<String>,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in pool
    pub max_connections: u32,
}

/// Pagination configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Users per page
    pub total_on_page: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            total_on_page: DEFAULT_TOTAL_ON_PAGE,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `DATABASE_URL` is missing
    /// - A numeric variable does not parse
    /// - `TOTAL_ON_PAGE` is zero
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let api_port = env::var("API_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()?;
        let cors_origins =
            parse_cors_origins(&env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string()));

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u32>()?;

        let total_on_page = parse_total_on_page(env::var("TOTAL_ON_PAGE").ok().as_deref())?;

        Ok(Self {
            api: ApiConfig {
                host: api_host,
                port: api_port,
                cors_origins,
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections,
            },
            pagination: PaginationConfig { total_on_page },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

/// Parses `TOTAL_ON_PAGE`, falling back to the default when unset
///
/// # Errors
///
/// Returns an error if the value is not a positive integer.
pub fn parse_total_on_page(raw: Option<&str>) -> anyhow::Result<u64> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_TOTAL_ON_PAGE);
    };

    let value = raw
        .trim()
        .parse::<u64>()
        .map_err(|e| anyhow::anyhow!("TOTAL_ON_PAGE must be a positive integer: {}", e))?;

    if value == 0 {
        anyhow::bail!("TOTAL_ON_PAGE must be at least 1");
    }

    Ok(value)
}

fn parse_cors_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> Config {
        Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                cors_origins: vec!["*".to_string()],
            },
            database: DatabaseConfig {
                url: "postgresql://localhost/userhub_test".to_string(),
                max_connections: 10,
            },
            pagination: PaginationConfig::default(),
        }
    }

    #[test]
    fn test_bind_address() {
        assert_eq!(sample_config().bind_address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_total_on_page_defaults() {
        assert_eq!(parse_total_on_page(None).unwrap(), DEFAULT_TOTAL_ON_PAGE);
        assert_eq!(sample_config().pagination.total_on_page, 10);
    }

    #[test]
    fn test_total_on_page_parses() {
        assert_eq!(parse_total_on_page(Some("5")).unwrap(), 5);
        assert_eq!(parse_total_on_page(Some(" 25 ")).unwrap(), 25);
    }

    #[test]
    fn test_total_on_page_rejects_bad_values() {
        assert!(parse_total_on_page(Some("0")).is_err());
        assert!(parse_total_on_page(Some("-3")).is_err());
        assert!(parse_total_on_page(Some("ten")).is_err());
    }

    #[test]
    fn test_cors_origins_split() {
        assert_eq!(
            parse_cors_origins("https://a.example, https://b.example,"),
            vec!["https://a.example", "https://b.example"]
        );
        assert_eq!(parse_cors_origins("*"), vec!["*"]);
    }
}
