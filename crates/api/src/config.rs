use std::time::Duration;

use axum::http::HeaderValue;
use jobchat_core::ids::JobId;
use jobchat_jobs::api::{JobsApiConfig, DEFAULT_HTTP_TIMEOUT};
use jobchat_jobs::poller::{PollConfig, DEFAULT_POLL_INTERVAL, DEFAULT_POLL_TIMEOUT};

/// Extra time the front door grants a request beyond the poll timeout, so
/// output collection can finish after the run terminates.
const REQUEST_TIMEOUT_HEADROOM_SECS: u64 = 60;

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} has invalid value '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds. Always longer than the poll timeout.
    pub request_timeout_secs: u64,
}

/// Remote job service settings.
#[derive(Debug, Clone)]
pub struct JobsConfig {
    pub base_url: String,
    pub token: String,
    pub job_id: JobId,
    pub http_timeout: Duration,
    pub poll: PollConfig,
}

impl JobsConfig {
    pub fn api_config(&self) -> JobsApiConfig {
        JobsApiConfig {
            base_url: self.base_url.clone(),
            token: self.token.clone(),
            timeout: self.http_timeout,
        }
    }
}

/// Full process configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub jobs: JobsConfig,
}

impl AppConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                   |
    /// |--------------------------|---------------------------|
    /// | `JOBS_BASE_URL`          | required                  |
    /// | `JOBS_TOKEN`             | required                  |
    /// | `JOBS_JOB_ID`            | required                  |
    /// | `JOBS_HTTP_TIMEOUT_SECS` | `30`                      |
    /// | `POLL_INTERVAL_SECS`     | `3`                       |
    /// | `POLL_TIMEOUT_SECS`      | `600`                     |
    /// | `HOST`                   | `0.0.0.0`                 |
    /// | `PORT`                   | `5000`                    |
    /// | `CORS_ORIGINS`           | `http://localhost:8501`   |
    /// | `REQUEST_TIMEOUT_SECS`   | poll timeout + 60         |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |var: &'static str| {
            lookup(var)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(var))
        };

        let base_url = required("JOBS_BASE_URL")?;
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::Invalid {
                var: "JOBS_BASE_URL",
                value: base_url,
                reason: "must start with http:// or https://".into(),
            });
        }
        let token = required("JOBS_TOKEN")?;
        let job_id = JobId::parse(&required("JOBS_JOB_ID")?);

        let http_timeout = positive_secs(&lookup, "JOBS_HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT)?;
        let poll = PollConfig {
            interval: positive_secs(&lookup, "POLL_INTERVAL_SECS", DEFAULT_POLL_INTERVAL)?,
            timeout: positive_secs(&lookup, "POLL_TIMEOUT_SECS", DEFAULT_POLL_TIMEOUT)?,
        };

        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());

        let port: u16 = match lookup("PORT") {
            None => 5000,
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                var: "PORT",
                value: raw.clone(),
                reason: "must be a valid u16".into(),
            })?,
        };

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:8501".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if let Some(bad) = cors_origins
            .iter()
            .find(|o| o.parse::<HeaderValue>().is_err())
        {
            return Err(ConfigError::Invalid {
                var: "CORS_ORIGINS",
                value: bad.clone(),
                reason: "not a valid header value".into(),
            });
        }

        let poll_secs = poll.timeout.as_secs();
        let request_timeout_secs = match lookup("REQUEST_TIMEOUT_SECS") {
            None => poll_secs + REQUEST_TIMEOUT_HEADROOM_SECS,
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::Invalid {
                    var: "REQUEST_TIMEOUT_SECS",
                    value: raw.clone(),
                    reason: "must be a valid u64".into(),
                })?;
                if secs <= poll_secs {
                    return Err(ConfigError::Invalid {
                        var: "REQUEST_TIMEOUT_SECS",
                        value: raw,
                        reason: format!("must exceed POLL_TIMEOUT_SECS ({poll_secs})"),
                    });
                }
                secs
            }
        };

        Ok(Self {
            server: ServerConfig {
                host,
                port,
                cors_origins,
                request_timeout_secs,
            },
            jobs: JobsConfig {
                base_url,
                token,
                job_id,
                http_timeout,
                poll,
            },
        })
    }
}

/// Parse a whole number of seconds, rejecting zero.
fn positive_secs(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: Duration,
) -> Result<Duration, ConfigError> {
    let Some(raw) = lookup(var) else {
        return Ok(default);
    };
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(ConfigError::Invalid {
            var,
            value: raw,
            reason: "must be greater than 0".into(),
        }),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(_) => Err(ConfigError::Invalid {
            var,
            value: raw,
            reason: "must be a whole number of seconds".into(),
        }),
    }
}
