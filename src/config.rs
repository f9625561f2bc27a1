//! Runtime configuration: the Red List API credential and base URL.
//!
//! Values are resolved, in order of precedence, from
//! - explicit arguments (e.g. `--api-key` on the command line)
//! - the process environment (`IUCN_API_KEY`, `IUCN_API_URL`)
//! - the first `.env` file found among the candidates:
//!   `$IUCN_ENV_FILE` if set, otherwise `./.env` then `<config dir>/redlist-tracker/.env`
//!
//! `.env` files are read without touching the process environment. The resolved
//! [`Config`] is handed to [`crate::Client`]; the client itself never reads the environment.

use crate::error::LookupError;
use std::path::{Path, PathBuf};

pub const API_KEY_VAR: &str = "IUCN_API_KEY";
pub const API_URL_VAR: &str = "IUCN_API_URL";
pub const ENV_FILE_VAR: &str = "IUCN_ENV_FILE";
pub const DEFAULT_BASE_URL: &str = "https://apiv3.iucnredlist.org/api/v3";

#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    /// Red List API token, passed as the `token` query parameter.
    pub api_key: String,
    /// API root without trailing slash, e.g. `https://apiv3.iucnredlist.org/api/v3`.
    pub base_url: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[derive(Debug, Default)]
struct FileValues {
    api_key: Option<String>,
    base_url: Option<String>,
}

impl Config {
    /// Build a config from a known key, using the default base URL.
    pub fn new(api_key: impl Into<String>) -> Result<Self, LookupError> {
        Self::resolve(Some(api_key.into()), |_| None, &[])
    }

    /// Use a different API root (tests, proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Load from the process environment and `.env` candidates.
    pub fn load() -> Result<Self, LookupError> {
        Self::load_with_key(None)
    }

    /// Like [`Config::load`], but an explicit key wins over every other source.
    pub fn load_with_key(api_key: Option<String>) -> Result<Self, LookupError> {
        let env = |name: &str| std::env::var(name).ok();
        let candidates = env_file_candidates(env(ENV_FILE_VAR));
        Self::resolve(api_key, env, &candidates)
    }

    /// Injectable form of [`Config::load`]: `env` stands in for the process environment.
    pub fn load_with<F>(env: F, candidates: &[PathBuf]) -> Result<Self, LookupError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::resolve(None, env, candidates)
    }

    fn resolve<F>(
        api_key: Option<String>,
        env: F,
        candidates: &[PathBuf],
    ) -> Result<Self, LookupError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

        let mut api_key = present(api_key).or_else(|| present(env(API_KEY_VAR)));
        let mut base_url = present(env(API_URL_VAR));

        if api_key.is_none() || base_url.is_none() {
            for path in candidates {
                if !path.exists() {
                    continue;
                }
                let file = read_env_file(path)?;
                log::debug!("read configuration from {}", path.display());
                if api_key.is_none() {
                    api_key = present(file.api_key);
                }
                if base_url.is_none() {
                    base_url = present(file.base_url);
                }
                break;
            }
        }

        let api_key = match api_key {
            Some(k) => k.trim().to_string(),
            None if candidates.is_empty() => {
                return Err(LookupError::Configuration(format!(
                    "missing {} (set it in the environment or a .env file)",
                    API_KEY_VAR
                )));
            }
            None => {
                return Err(LookupError::Configuration(format!(
                    "missing {} (set it in the environment or in one of: {})",
                    API_KEY_VAR,
                    candidates
                        .iter()
                        .map(|p| p.display().to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                )));
            }
        };

        let base_url = base_url
            .map(|u| u.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self { api_key, base_url })
    }
}

fn read_env_file(path: &Path) -> Result<FileValues, LookupError> {
    let config_err = |e: dotenvy::Error| {
        LookupError::Configuration(format!("failed to read {}: {}", path.display(), e))
    };

    let mut values = FileValues::default();
    for item in dotenvy::from_path_iter(path).map_err(config_err)? {
        let (key, value) = item.map_err(config_err)?;
        match key.as_str() {
            API_KEY_VAR => values.api_key = Some(value),
            API_URL_VAR => values.base_url = Some(value),
            _ => {}
        }
    }
    Ok(values)
}

/// Files searched for `IUCN_API_KEY`, in order.
///
/// An explicit `IUCN_ENV_FILE` replaces the default search entirely.
pub fn env_file_candidates(explicit: Option<String>) -> Vec<PathBuf> {
    if let Some(p) = explicit.filter(|p| !p.trim().is_empty()) {
        return vec![PathBuf::from(p)];
    }

    let mut v = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        v.push(cwd.join(".env"));
    }
    if let Some(dir) = dirs::config_dir() {
        v.push(dir.join("redlist-tracker").join(".env"));
    }
    v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_env_file_replaces_search() {
        let c = env_file_candidates(Some("/tmp/custom.env".into()));
        assert_eq!(c, vec![PathBuf::from("/tmp/custom.env")]);
    }

    #[test]
    fn debug_redacts_key() {
        let cfg = Config::new("secret-token").unwrap();
        let dbg = format!("{:?}", cfg);
        assert!(!dbg.contains("secret-token"));
        assert!(dbg.contains("<redacted>"));
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let cfg = Config::new("k").unwrap().with_base_url("http://localhost:9/v3/");
        assert_eq!(cfg.base_url, "http://localhost:9/v3");
    }

    #[test]
    fn blank_key_is_missing() {
        let err = Config::new("   ").unwrap_err();
        assert!(matches!(err, LookupError::Configuration(_)));
    }
}
