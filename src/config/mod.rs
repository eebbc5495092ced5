//! Configuration loading for Plainspeak

mod schema;

pub use schema::{Config, ProviderConfig, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_PAUSE_MS};

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = ".plainspeakrc.json";

/// Find and load the config file. Searches the work directory then its parents.
pub fn load_config(work_dir: &Path, custom_path: Option<&Path>) -> Result<Config> {
    let path = if let Some(p) = custom_path {
        let path = if p.is_absolute() {
            p.to_path_buf()
        } else {
            work_dir.join(p)
        };
        if path.exists() {
            Some(path)
        } else {
            anyhow::bail!("Config file not found: {}", path.display());
        }
    } else {
        find_config_in_parents(work_dir)
    };

    match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Invalid JSON in config: {}", path.display()))
        }
        None => Ok(Config::default()),
    }
}

/// Search for .plainspeakrc.json in directory and its parents
fn find_config_in_parents(mut dir: &Path) -> Option<PathBuf> {
    loop {
        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.exists() {
            return Some(candidate);
        }
        dir = dir.parent()?;
    }
}

/// Build a GlobSet from ignore patterns for path matching
pub fn build_ignore_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob =
            Glob::new(pattern).with_context(|| format!("Invalid ignore pattern: {}", pattern))?;
        builder.add(glob);
    }
    builder.build().map_err(|e| anyhow::anyhow!("{}", e))
}

/// Check if a path should be ignored based on config glob patterns
pub fn is_ignored(path: &Path, ignore_set: &GlobSet) -> bool {
    ignore_set.is_match(path)
}

/// Starter config written by `plainspeak init`
pub fn starter_config(threshold: u8) -> String {
    format!(
        r#"{{
  "threshold": {},
  "extensions": ["txt", "md"],
  "ignore": [
    "**/node_modules/**",
    "**/target/**"
  ],
  "provider": {{
    "baseUrl": "{}",
    "model": "{}",
    "temperature": 0.3,
    "maxOutputTokens": 1200
  }},
  "pauseMs": {}
}}
"#,
        threshold, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_PAUSE_MS
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_no_config_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = load_config(dir.path(), None).unwrap();
        assert_eq!(config.extensions, vec!["txt", "md"]);
    }

    #[test]
    fn test_config_found_in_parent() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), r#"{ "threshold": 85 }"#).unwrap();
        let nested = dir.path().join("responses").join("today");
        fs::create_dir_all(&nested).unwrap();

        let config = load_config(&nested, None).unwrap();
        assert_eq!(config.threshold, Some(85));
    }

    #[test]
    fn test_custom_path_missing() {
        let dir = TempDir::new().unwrap();
        let err = load_config(dir.path(), Some(Path::new("missing.json"))).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_invalid_json() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "{ not json").unwrap();
        let err = load_config(dir.path(), None).unwrap_err();
        assert!(err.to_string().contains("Invalid JSON"));
    }

    #[test]
    fn test_starter_config_parses() {
        let config: Config = serde_json::from_str(&starter_config(75)).unwrap();
        assert_eq!(config.threshold, Some(75));
        assert_eq!(config.provider.model, DEFAULT_MODEL);
        assert_eq!(config.pause_ms, Some(DEFAULT_PAUSE_MS));
    }

    #[test]
    fn test_is_ignored() {
        let set = build_ignore_set(&["**/drafts/**".to_string()]).unwrap();
        assert!(is_ignored(Path::new("responses/drafts/a.txt"), &set));
        assert!(!is_ignored(Path::new("responses/final/a.txt"), &set));
    }

    #[test]
    fn test_invalid_ignore_pattern() {
        assert!(build_ignore_set(&["a[".to_string()]).is_err());
    }
}
