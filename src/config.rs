use anyhow::{bail, Result};
use std::env;

/// Environment variable holding the backend base URL
pub const API_URL_VAR: &str = "RECIPE_API_URL";
/// Environment variable holding the backend API key
pub const API_KEY_VAR: &str = "RECIPE_API_KEY";

/// Connection settings for the hosted backend.
///
/// Credentials are never compiled in: they come from CLI flags or the
/// environment, and are checked before the first network call.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    pub base_url: String,
    pub api_key: String,
    pub retries: u32,
}

impl RemoteConfig {
    /// Resolve the config from flags, falling back to the environment
    pub fn resolve(
        url_flag: Option<String>,
        key_flag: Option<String>,
        retries: u32,
    ) -> Result<Self> {
        let base_url = match pick(url_flag, env::var(API_URL_VAR).ok()) {
            Some(url) => url,
            None => bail!("Backend URL not set: pass --url or set {}", API_URL_VAR),
        };
        let api_key = match pick(key_flag, env::var(API_KEY_VAR).ok()) {
            Some(key) => key,
            None => bail!("API key not set: pass --key or set {}", API_KEY_VAR),
        };

        let config = Self {
            base_url,
            api_key,
            retries,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            bail!("Backend URL must start with http:// or https://");
        }
        if self.api_key.trim().is_empty() {
            bail!("API key is empty");
        }
        Ok(())
    }
}

/// Flag wins over environment; empty values count as unset
fn pick(flag: Option<String>, env_val: Option<String>) -> Option<String> {
    let non_empty = |v: &String| !v.trim().is_empty();
    flag.filter(non_empty).or(env_val.filter(non_empty))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str, key: &str) -> RemoteConfig {
        RemoteConfig {
            base_url: url.to_string(),
            api_key: key.to_string(),
            retries: 0,
        }
    }

    #[test]
    fn test_flag_wins_over_env() {
        let picked = pick(Some("flag".into()), Some("env".into()));
        assert_eq!(picked.as_deref(), Some("flag"));
    }

    #[test]
    fn test_env_used_when_flag_absent() {
        let picked = pick(None, Some("env".into()));
        assert_eq!(picked.as_deref(), Some("env"));
    }

    #[test]
    fn test_empty_values_count_as_unset() {
        assert_eq!(pick(Some("  ".into()), None), None);
        assert_eq!(pick(None, None), None);
        // An empty flag still falls back to the environment
        assert_eq!(pick(Some("".into()), Some("env".into())).as_deref(), Some("env"));
    }

    #[test]
    fn test_validate_rejects_bad_scheme() {
        assert!(config("ftp://example", "key").validate().is_err());
        assert!(config("example.supabase.co", "key").validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_key() {
        assert!(config("https://example.supabase.co", " ").validate().is_err());
    }

    #[test]
    fn test_validate_accepts_https() {
        assert!(config("https://example.supabase.co", "key").validate().is_ok());
    }
}
