use anyhow::Result;
use serde::Deserialize;
use std::env;

/// Default arXiv query endpoint.
pub const DEFAULT_ARXIV_API_URL: &str = "http://export.arxiv.org/api/query";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .unwrap_or_else(|_| "3000".to_string())
                    .parse()?,
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                cors_allowed_origins: parse_origins(
                    &env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| "*".to_string()),
                ),
            },
            upstream: UpstreamConfig {
                base_url: env::var("ARXIV_API_URL")
                    .unwrap_or_else(|_| DEFAULT_ARXIV_API_URL.to_string()),
                timeout_secs: env::var("UPSTREAM_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse()?,
            },
        })
    }

    /// Configuration pointing the relay at a custom upstream, used by tests
    /// and embedders that don't read the environment.
    pub fn with_upstream(base_url: impl Into<String>) -> Self {
        Self {
            server: ServerConfig {
                port: 3000,
                host: "127.0.0.1".to_string(),
                cors_allowed_origins: vec!["*".to_string()],
            },
            upstream: UpstreamConfig {
                base_url: base_url.into(),
                timeout_secs: 30,
            },
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins_trims_and_skips_blanks() {
        assert_eq!(
            parse_origins(" http://a.test , ,http://b.test"),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
        assert_eq!(parse_origins("*"), vec!["*".to_string()]);
    }

    #[test]
    fn test_with_upstream() {
        let config = Config::with_upstream("http://127.0.0.1:9999/api/query");
        assert_eq!(config.upstream.base_url, "http://127.0.0.1:9999/api/query");
        assert_eq!(config.upstream.timeout_secs, 30);
        assert_eq!(config.server.port, 3000);
    }
}
