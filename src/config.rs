//! Runtime configuration
//!
//! Read once from the environment at startup.

use std::path::PathBuf;

use crate::llm::groq::{DEFAULT_API_BASE, DEFAULT_MODEL};

pub const API_KEY_ENV: &str = "GROQ_API_KEY";
pub const MODEL_ENV: &str = "FITPLAN_MODEL";
pub const API_BASE_ENV: &str = "FITPLAN_API_BASE";
pub const OUTPUT_DIR_ENV: &str = "FITPLAN_OUTPUT_DIR";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub model: String,
    pub api_base: String,
    pub output_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            api_key: get(API_KEY_ENV),
            model: get(MODEL_ENV).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_base: get(API_BASE_ENV).unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            output_dir: get(OUTPUT_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(default_output_dir),
        }
    }
}

/// `data/` under the project root when run from target/{debug,release},
/// otherwise next to the executable
fn default_output_dir() -> PathBuf {
    let mut path = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));

    if path.ends_with("release") || path.ends_with("debug") {
        if let Some(project_root) = path.parent().and_then(|p| p.parent()) {
            path = project_root.to_path_buf();
        }
    }

    path.push("data");
    path
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[]));
        assert_eq!(config.api_key, None);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert!(config.output_dir.ends_with("data"));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            (API_KEY_ENV, "gsk_test"),
            (MODEL_ENV, "llama-3.3-70b-versatile"),
            (OUTPUT_DIR_ENV, "/tmp/plans"),
        ]));
        assert_eq!(config.api_key.as_deref(), Some("gsk_test"));
        assert_eq!(config.model, "llama-3.3-70b-versatile");
        assert_eq!(config.output_dir, PathBuf::from("/tmp/plans"));
    }

    #[test]
    fn test_blank_key_is_unset() {
        let config = Config::from_lookup(lookup(&[(API_KEY_ENV, "  ")]));
        assert_eq!(config.api_key, None);
    }
}
