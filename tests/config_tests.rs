//! Tests for loading configuration from the process environment.
//!
//! These go through `from_process_env` so a developer `.env` cannot leak in.

use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use roadmap_forge::config::ForgeConfig;
use roadmap_forge::error::ForgeError;
use roadmap_forge::models::GeminiModel;

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const CONFIG_ENV_VARS: [&str; 5] = [
    "GEMINI_API_KEY",
    "GOOGLE_API_KEY",
    "GEMINI_BASE_URL",
    "ROADMAP_FORGE_MODEL",
    "ROADMAP_FORGE_TIMEOUT_SECS",
];

struct EnvGuard {
    saved: Vec<(String, Option<String>)>,
}

impl EnvGuard {
    fn capture(keys: &[&str]) -> Self {
        let saved = keys
            .iter()
            .map(|key| ((*key).to_string(), std::env::var(key).ok()))
            .collect();
        Self { saved }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in &self.saved {
            match value {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
        }
    }
}

fn env_lock_guard() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn clear_config_env() {
    for key in CONFIG_ENV_VARS {
        std::env::remove_var(key);
    }
}

#[test]
fn process_env_reads_all_variables() {
    let _lock = env_lock_guard();
    let _env = EnvGuard::capture(&CONFIG_ENV_VARS);
    clear_config_env();

    std::env::set_var("GEMINI_API_KEY", "env-key");
    std::env::set_var("GEMINI_BASE_URL", "http://127.0.0.1:4010");
    std::env::set_var("ROADMAP_FORGE_MODEL", "gemini-1.5-pro");
    std::env::set_var("ROADMAP_FORGE_TIMEOUT_SECS", "30");

    let config = ForgeConfig::from_process_env().unwrap();
    assert_eq!(config.api_key(), "env-key");
    assert_eq!(config.base_url(), Some("http://127.0.0.1:4010"));
    assert_eq!(config.model(), &GeminiModel::Gemini15Pro);
    assert_eq!(config.request_timeout(), Duration::from_secs(30));
}

#[test]
fn process_env_without_key_fails_before_any_call() {
    let _lock = env_lock_guard();
    let _env = EnvGuard::capture(&CONFIG_ENV_VARS);
    clear_config_env();

    let err = ForgeConfig::from_process_env().unwrap_err();
    assert!(matches!(err, ForgeError::Configuration(_)));
}

#[test]
fn google_api_key_is_accepted() {
    let _lock = env_lock_guard();
    let _env = EnvGuard::capture(&CONFIG_ENV_VARS);
    clear_config_env();

    std::env::set_var("GOOGLE_API_KEY", "google-key");

    let config = ForgeConfig::from_process_env().unwrap();
    assert_eq!(config.api_key(), "google-key");
    assert_eq!(config.model(), &GeminiModel::Gemini20Flash);
}
