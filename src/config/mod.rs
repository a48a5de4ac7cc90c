// src/config/mod.rs
// Service configuration from the environment, with defaults for every value

use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_CORS_ORIGINS: &str =
    "http://localhost:5173,http://localhost:5174,https://aireadinessandpilotfrontend.vercel.app";

#[derive(Debug, Clone)]
pub struct AppConfig {
    // ── Provider
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub model: String,
    pub assessment_temperature: f32,
    pub report_temperature: f32,
    pub report_max_tokens: u32,
    pub provider_timeout_secs: u64,

    // ── Server
    pub host: String,
    pub port: u16,

    // ── CORS
    pub cors_origins: String,
    pub frontend_url: Option<String>,

    // ── Logging
    pub log_level: String,

    /// Force the scripted provider even when a key is present
    pub scripted: bool,

    /// `.env` file that was loaded, if any
    pub env_file: Option<PathBuf>,

    /// Values that failed to parse and fell back to their default.
    /// Collected here because config is read before logging is installed.
    fallbacks: Vec<String>,
}

/// Read `key` through `lookup` and parse it, falling back to `default`
/// when the variable is unset or does not parse
fn env_var_or<T, F>(lookup: &F, fallbacks: &mut Vec<String>, key: &str, default: T) -> T
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(val) => {
            // Allow trailing comments as in .env files
            let clean_val = val.split('#').next().unwrap_or("").trim();
            match clean_val.parse::<T>() {
                Ok(parsed) => parsed,
                Err(_) => {
                    fallbacks.push(format!("Config: {} = '{}' (parse failed, using default)", key, val));
                    default
                }
            }
        }
        None => default,
    }
}

fn env_opt<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl AppConfig {
    /// Load `.env` if present, then read the process environment
    pub fn from_env() -> Self {
        let env_file = dotenvy::dotenv().ok();
        let mut config = Self::from_lookup(|key| std::env::var(key).ok());
        config.env_file = env_file;
        config
    }

    /// Build from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut fallbacks = Vec::new();
        let f = &mut fallbacks;

        Self {
            openai_api_key: env_opt(&lookup, "OPENAI_API_KEY"),
            openai_base_url: env_var_or(&lookup, f, "OPENAI_BASE_URL", "https://api.openai.com".to_string()),
            model: env_var_or(&lookup, f, "ASSESSMENT_MODEL", "gpt-4.1-mini".to_string()),
            assessment_temperature: env_var_or(&lookup, f, "ASSESSMENT_TEMPERATURE", 0.7),
            report_temperature: env_var_or(&lookup, f, "REPORT_TEMPERATURE", 0.5),
            report_max_tokens: env_var_or(&lookup, f, "REPORT_MAX_TOKENS", 4000),
            provider_timeout_secs: env_var_or(&lookup, f, "PROVIDER_TIMEOUT_SECS", 120),
            host: env_var_or(&lookup, f, "HOST", "0.0.0.0".to_string()),
            port: env_var_or(&lookup, f, "PORT", 4000),
            cors_origins: env_var_or(&lookup, f, "CORS_ORIGINS", DEFAULT_CORS_ORIGINS.to_string()),
            frontend_url: env_opt(&lookup, "FRONTEND_URL"),
            log_level: env_var_or(&lookup, f, "LOG_LEVEL", "info".to_string()),
            scripted: false,
            env_file: None,
            fallbacks,
        }
    }

    /// Defaults only, scripted provider
    pub fn for_tests() -> Self {
        let mut config = Self::from_lookup(|_| None);
        config.scripted = true;
        config
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Whether requests go to the hosted model
    pub fn live_mode(&self) -> bool {
        !self.scripted && self.openai_api_key.is_some()
    }

    /// Allow-listed origins, with `FRONTEND_URL` appended when set
    pub fn cors_origins(&self) -> Vec<String> {
        let mut origins: Vec<String> = self
            .cors_origins
            .split(',')
            .map(|o| o.trim().trim_end_matches('/').to_string())
            .filter(|o| !o.is_empty())
            .collect();

        if let Some(url) = &self.frontend_url {
            let url = url.trim_end_matches('/').to_string();
            if !origins.contains(&url) {
                origins.push(url);
            }
        }
        origins
    }

    pub fn log_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::INFO)
    }

    /// Parse-failure messages gathered while loading, to be logged once a
    /// subscriber exists
    pub fn fallback_warnings(&self) -> &[String] {
        &self.fallbacks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with(vars: &[(&str, &str)]) -> AppConfig {
        let map: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppConfig::from_lookup(move |key| map.get(key).cloned())
    }

    #[test]
    fn test_config_defaults() {
        let config = config_with(&[]);

        assert_eq!(config.model, "gpt-4.1-mini");
        assert_eq!(config.assessment_temperature, 0.7);
        assert_eq!(config.report_temperature, 0.5);
        assert_eq!(config.report_max_tokens, 4000);
        assert_eq!(config.provider_timeout_secs, 120);
        assert_eq!(config.bind_address(), "0.0.0.0:4000");
        assert!(!config.live_mode());
        assert_eq!(config.cors_origins().len(), 3);
    }

    #[test]
    fn test_overrides_and_comments() {
        let config = config_with(&[
            ("PORT", "8080 # local"),
            ("ASSESSMENT_MODEL", "gpt-4o"),
            ("OPENAI_API_KEY", "sk-test"),
        ]);

        assert_eq!(config.port, 8080);
        assert_eq!(config.model, "gpt-4o");
        assert!(config.live_mode());
    }

    #[test]
    fn test_unparseable_falls_back() {
        let config = config_with(&[("PORT", "not-a-port"), ("REPORT_MAX_TOKENS", "-1")]);
        assert_eq!(config.port, 4000);
        assert_eq!(config.report_max_tokens, 4000);

        let warnings = config.fallback_warnings();
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("REPORT_MAX_TOKENS"));
        assert!(warnings[1].contains("PORT = 'not-a-port'"));
    }

    #[test]
    fn test_clean_config_has_no_warnings() {
        let config = config_with(&[("PORT", "8080"), ("LOG_LEVEL", "debug")]);
        assert!(config.fallback_warnings().is_empty());
        assert_eq!(config.log_level(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_blank_key_is_scripted() {
        let config = config_with(&[("OPENAI_API_KEY", "   ")]);
        assert!(config.openai_api_key.is_none());
        assert!(!config.live_mode());
    }

    #[test]
    fn test_frontend_url_appended_once() {
        let config = config_with(&[
            ("CORS_ORIGINS", "http://a.test, http://b.test/"),
            ("FRONTEND_URL", "https://app.test/"),
        ]);
        assert_eq!(
            config.cors_origins(),
            vec!["http://a.test", "http://b.test", "https://app.test"]
        );

        let config = config_with(&[("CORS_ORIGINS", "http://a.test"), ("FRONTEND_URL", "http://a.test")]);
        assert_eq!(config.cors_origins(), vec!["http://a.test"]);
    }

    #[test]
    fn test_scripted_flag_wins() {
        let mut config = config_with(&[("OPENAI_API_KEY", "sk-test")]);
        config.scripted = true;
        assert!(!config.live_mode());
    }
}
