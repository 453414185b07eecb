use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Main configuration structure for the engine
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Engine tunables (latency budgets, fallback policy)
    #[serde(default)]
    pub engine: EngineConfig,

    /// External collaborator endpoints and timeouts
    #[serde(default)]
    pub services: ServicesConfig,

    /// Session store mirror configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Rate limiting for the adaptive question service
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Retry policy for asynchronous store mirror writes
    #[serde(default)]
    pub retry: RetryConfig,

    /// Defaults applied to sessions that do not override them
    #[serde(default)]
    pub session_defaults: SessionConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            services: ServicesConfig::default(),
            database: DatabaseConfig::default(),
            logging: LoggingConfig::default(),
            rate_limit: RateLimitConfig::default(),
            retry: RetryConfig::default(),
            session_defaults: SessionConfig::default(),
        }
    }
}

/// Engine tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EngineConfig {
    /// Budget for one adaptive question service call, in milliseconds
    #[serde(default = "default_question_budget_ms")]
    pub question_budget_ms: u64,

    /// Question index past which the local fallback pool is preferred
    #[serde(default = "default_fallback_after_index")]
    pub fallback_after_index: u32,
}

const fn default_question_budget_ms() -> u64 {
    800
}

const fn default_fallback_after_index() -> u32 {
    5
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            question_budget_ms: default_question_budget_ms(),
            fallback_after_index: default_fallback_after_index(),
        }
    }
}

/// External collaborator endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ServicesConfig {
    /// Base URL of the user directory
    #[serde(default = "default_directory_url")]
    pub directory_url: String,

    /// Base URL of the adaptive question service
    #[serde(default = "default_question_service_url")]
    pub question_service_url: String,

    /// Base URL of the response analyzer
    #[serde(default = "default_analyzer_url")]
    pub analyzer_url: String,

    /// Timeout for analyzer calls, in milliseconds
    #[serde(default = "default_analyzer_timeout_ms")]
    pub analyzer_timeout_ms: u64,
}

fn default_directory_url() -> String {
    "http://localhost:8081".to_string()
}

fn default_question_service_url() -> String {
    "http://localhost:8082".to_string()
}

fn default_analyzer_url() -> String {
    "http://localhost:8083".to_string()
}

const fn default_analyzer_timeout_ms() -> u64 {
    10_000
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            directory_url: default_directory_url(),
            question_service_url: default_question_service_url(),
            analyzer_url: default_analyzer_url(),
            analyzer_timeout_ms: default_analyzer_timeout_ms(),
        }
    }
}

/// Session store mirror configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DatabaseConfig {
    /// Path to the `SQLite` mirror database file
    #[serde(default = "default_database_path")]
    pub path: String,

    /// Maximum number of database connections in pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_database_path() -> String {
    ".socratic/sessions.db".to_string()
}

const fn default_max_connections() -> u32 {
    10
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            max_connections: default_max_connections(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Rate limiting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RateLimitConfig {
    /// Requests per second allowed against the question service
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: f64,
}

const fn default_requests_per_second() -> f64 {
    20.0
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_second: default_requests_per_second(),
        }
    }
}

/// Retry policy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RetryConfig {
    /// Maximum number of retry attempts
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Initial backoff delay in milliseconds
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,

    /// Maximum backoff delay in milliseconds
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
}

const fn default_max_retries() -> u32 {
    3
}

const fn default_initial_backoff_ms() -> u64 {
    100
}

const fn default_max_backoff_ms() -> u64 {
    5_000
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
        }
    }
}

/// Per-session tunables, supplied at initialization or defaulted.
///
/// Recognized keys are explicit fields; anything else a caller passes rides
/// along in `options` untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SessionConfig {
    /// Questions asked before confidence-based stopping is considered
    #[serde(default = "default_min_questions")]
    pub min_questions: u32,

    /// Hard ceiling on questions asked
    #[serde(default = "default_max_questions")]
    pub max_questions: u32,

    /// Standard-error threshold for confidence-based stopping
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f64,

    /// Wall-clock ceiling for the whole interview, in minutes
    #[serde(default = "default_time_limit_minutes")]
    pub time_limit_minutes: u64,

    /// Unrecognized caller-supplied options, passed through unmodified
    #[serde(default)]
    pub options: HashMap<String, serde_json::Value>,
}

const fn default_min_questions() -> u32 {
    5
}

const fn default_max_questions() -> u32 {
    20
}

const fn default_confidence_threshold() -> f64 {
    0.3
}

const fn default_time_limit_minutes() -> u64 {
    45
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            min_questions: default_min_questions(),
            max_questions: default_max_questions(),
            confidence_threshold: default_confidence_threshold(),
            time_limit_minutes: default_time_limit_minutes(),
            options: HashMap::new(),
        }
    }
}

impl SessionConfig {
    /// Checks internal consistency of the tunables.
    ///
    /// # Errors
    /// Returns a description of the first violated constraint.
    pub fn validate(&self) -> Result<(), String> {
        if self.min_questions == 0 {
            return Err("min_questions must be at least 1".to_string());
        }
        if self.max_questions < self.min_questions {
            return Err(format!(
                "max_questions ({}) must be >= min_questions ({})",
                self.max_questions, self.min_questions
            ));
        }
        if self.confidence_threshold <= 0.0 {
            return Err(format!(
                "confidence_threshold ({}) must be positive",
                self.confidence_threshold
            ));
        }
        if self.time_limit_minutes == 0 {
            return Err("time_limit_minutes must be at least 1".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.engine.question_budget_ms, 800);
        assert_eq!(config.engine.fallback_after_index, 5);
        assert_eq!(config.database.path, ".socratic/sessions.db");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_default_session_config() {
        let config = SessionConfig::default();
        assert_eq!(config.min_questions, 5);
        assert_eq!(config.max_questions, 20);
        assert!((config.confidence_threshold - 0.3).abs() < f64::EPSILON);
        assert_eq!(config.time_limit_minutes, 45);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_session_config_rejects_inverted_bounds() {
        let config = SessionConfig {
            min_questions: 10,
            max_questions: 5,
            ..SessionConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_session_config_rejects_zero_minimum() {
        let config = SessionConfig {
            min_questions: 0,
            ..SessionConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_session_config_rejects_nonpositive_threshold() {
        let config = SessionConfig {
            confidence_threshold: 0.0,
            ..SessionConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_session_config_deserializes_unknown_keys_into_options() {
        let json = r#"{
            "min_questions": 10,
            "max_questions": 30,
            "options": {"locale": "en-US"}
        }"#;
        let config: SessionConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.min_questions, 10);
        assert_eq!(config.max_questions, 30);
        assert_eq!(
            config.options.get("locale"),
            Some(&serde_json::json!("en-US"))
        );
    }
}
