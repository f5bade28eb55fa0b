//! API configuration

use serde::Deserialize;

use domain_claims::DEFAULT_CLAIM_LOG_LIMIT;

/// API configuration
///
/// Every field has a default, so a partially configured environment still
/// loads; unset keys keep the development values below.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// JWT secret for authentication
    pub jwt_secret: String,
    /// JWT expiration in seconds
    pub jwt_expiration_secs: u64,
    /// Database URL
    pub database_url: String,
    /// Maximum pooled database connections
    pub db_max_connections: u32,
    /// Seconds to wait for a pooled connection
    pub db_connect_timeout_secs: u64,
    /// Log level
    pub log_level: String,
    /// Number of audit entries returned by `GET /api/admin/claim-logs`
    pub claim_log_limit: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            jwt_secret: "change-me-in-production".to_string(),
            jwt_expiration_secs: 3600,
            database_url: "postgres://localhost/lost_found".to_string(),
            db_max_connections: 10,
            db_connect_timeout_secs: 30,
            log_level: "info".to_string(),
            claim_log_limit: DEFAULT_CLAIM_LOG_LIMIT,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `API_`-prefixed environment variables
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("API"))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.server_addr(), "0.0.0.0:8080");
        assert_eq!(config.claim_log_limit, 100);
    }

    #[test]
    fn test_partial_source_keeps_defaults() {
        let config: ApiConfig = config::Config::builder()
            .set_override("port", 9090)
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.port, 9090);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.db_max_connections, 10);
        assert_eq!(config.db_connect_timeout_secs, 30);
    }
}
