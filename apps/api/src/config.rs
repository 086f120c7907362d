use std::str::FromStr;

use anyhow::{Context, Result};

use crate::validation::ValidationPolicy;

const DEFAULT_AI_GATEWAY_URL: &str = "https://ai.gateway.lovable.dev/v1/chat/completions";
const DEFAULT_AI_MODEL: &str = "google/gemini-2.5-flash";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Fails at startup if a numeric variable is present but malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub ai_gateway_url: String,
    /// Optional so the service can boot without AI access; the improvement
    /// endpoint reports the missing key per request.
    pub ai_gateway_api_key: Option<String>,
    pub ai_model: String,
    pub max_upload_bytes: usize,
    pub validation: ValidationPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = ValidationPolicy::default();

        Ok(Config {
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            ai_gateway_url: std::env::var("AI_GATEWAY_URL")
                .unwrap_or_else(|_| DEFAULT_AI_GATEWAY_URL.to_string()),
            ai_gateway_api_key: std::env::var("AI_GATEWAY_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            ai_model: std::env::var("AI_MODEL").unwrap_or_else(|_| DEFAULT_AI_MODEL.to_string()),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            validation: ValidationPolicy {
                min_chars: parse_env("VALIDATION_MIN_CHARS", defaults.min_chars)?,
                binary_pattern_limit: parse_env(
                    "VALIDATION_BINARY_PATTERN_LIMIT",
                    defaults.binary_pattern_limit,
                )?,
                min_resume_signals: parse_env(
                    "VALIDATION_MIN_RESUME_SIGNALS",
                    defaults.min_resume_signals,
                )?,
                max_noise_ratio: parse_env("VALIDATION_MAX_NOISE_RATIO", defaults.max_noise_ratio)?,
                min_meaningful_ratio: parse_env(
                    "VALIDATION_MIN_MEANINGFUL_RATIO",
                    defaults.min_meaningful_ratio,
                )?,
                ..defaults
            },
        })
    }
}

/// Reads `key` and parses it, falling back to `default` when the variable is unset.
fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let value: usize = parse_env("RESUME_API_TEST_SURELY_UNSET_VARIABLE", 42).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_parse_env_rejects_malformed_number() {
        std::env::set_var("RESUME_API_TEST_BAD_PORT", "not-a-port");
        let result: Result<u16> = parse_env("RESUME_API_TEST_BAD_PORT", 8080);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("RESUME_API_TEST_BAD_PORT"));
    }

    #[test]
    fn test_parse_env_reads_float() {
        std::env::set_var("RESUME_API_TEST_RATIO", " 0.25 ");
        let ratio: f64 = parse_env("RESUME_API_TEST_RATIO", 0.4).unwrap();
        assert!((ratio - 0.25).abs() < f64::EPSILON);
    }
}
