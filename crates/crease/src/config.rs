//! Client configuration.

use std::path::PathBuf;
use std::time::Duration;

/// Environment variable overriding [`ClientConfig::base_url`].
pub const ENV_API_URL: &str = "CREASE_API_URL";
/// Environment variable overriding [`ClientConfig::storage_path`].
pub const ENV_STORAGE: &str = "CREASE_STORAGE";

/// How the client reaches the API and where it keeps the session.
///
/// Layering is defaults, then environment ([`from_env`]), then whatever
/// the caller sets on top (the CLI applies its flags last).
///
/// [`from_env`]: ClientConfig::from_env
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Root of the academy API, without a trailing slash.
    pub base_url: String,

    /// JSON file holding the persisted session.
    pub storage_path: PathBuf,

    /// Pause between a successful signup and the switch to the login page,
    /// so the success message can be read.
    pub signup_redirect_delay: Duration,

    /// Probe `GET /` before signup and the dedicated admin login.
    pub health_check: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            storage_path: default_storage_path(),
            signup_redirect_delay: Duration::from_millis(1500),
            health_check: true,
        }
    }
}

impl ClientConfig {
    /// Defaults with `CREASE_API_URL` / `CREASE_STORAGE` applied.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults with overrides read through `lookup`. Blank values are
    /// ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let var = |key: &str| lookup(key).filter(|v: &String| !v.trim().is_empty());

        if let Some(url) = var(ENV_API_URL) {
            config.base_url = url.trim().trim_end_matches('/').to_string();
        }
        if let Some(path) = var(ENV_STORAGE) {
            config.storage_path = PathBuf::from(path);
        }
        config
    }
}

/// `<data dir>/crease/session.json`, or `./.crease/session.json` on
/// platforms without a data directory.
pub fn default_storage_path() -> PathBuf {
    match dirs::data_dir() {
        Some(dir) => dir.join("crease").join("session.json"),
        None => PathBuf::from(".crease").join("session.json"),
    }
}
