use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indexer_core::SubmitterConfig;
use indexer_logging::indexer_info;

const DEFAULT_CONFIG_FILE: &str = "indexer.ron";

/// Load the configuration file, or fall back to defaults.
///
/// An explicit path must exist; the implicit `indexer.ron` is optional.
pub fn load(explicit: Option<&Path>) -> Result<SubmitterConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let implicit = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !implicit.exists() {
                return Ok(SubmitterConfig::default());
            }
            implicit
        }
    };
    let content = fs::read_to_string(&path)
        .with_context(|| format!("could not read config file {}", path.display()))?;
    let config = ron::from_str(&content)
        .with_context(|| format!("invalid config file {}", path.display()))?;
    indexer_info!("Loaded configuration from {:?}", path);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_file_is_parsed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("indexer.ron");
        fs::write(
            &path,
            r#"(credential_path: "keys/sa.json", max_requests_per_window: 100)"#,
        )
        .unwrap();

        let config = load(Some(&path)).unwrap();
        assert_eq!(config.credential_path, PathBuf::from("keys/sa.json"));
        assert_eq!(config.max_requests_per_window, 100);
        assert_eq!(config.pacing_interval_ms, 500);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(Some(&dir.path().join("absent.ron"))).unwrap_err();
        assert!(err.to_string().contains("absent.ron"));
    }

    #[test]
    fn unknown_syntax_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("indexer.ron");
        fs::write(&path, "(pacing_interval_ms: \"fast\")").unwrap();
        assert!(load(Some(&path)).is_err());
    }
}
