use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use keyscan::ScanConfig;
use serde::Deserialize;

/// Environment variable naming an explicit settings file.
const SETTINGS_ENV: &str = "TOPKEYS_CONFIG";
/// Implicit settings file consulted when the variable is unset.
const SETTINGS_FILE: &str = "topkeys.toml";

/// On-disk settings for a scan run.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct ScanSettings {
    /// Scan engine tuning.
    #[serde(default)]
    pub scan: ScanConfig,
}

/// Loads TOML settings, falling back to defaults when no file is present.
///
/// A path named by `TOPKEYS_CONFIG` must exist; the implicit `topkeys.toml`
/// in the working directory is optional.
pub fn load_settings() -> Result<ScanSettings> {
    match std::env::var_os(SETTINGS_ENV) {
        Some(path) => load_from(PathBuf::from(path), true),
        None => load_from(PathBuf::from(SETTINGS_FILE), false),
    }
}

fn load_from(candidate: PathBuf, explicit: bool) -> Result<ScanSettings> {
    if candidate.exists() {
        let raw = std::fs::read_to_string(&candidate)
            .with_context(|| format!("failed to read settings from {}", candidate.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("failed to parse TOML settings at {}", candidate.display()))
    } else if explicit {
        bail!("settings file not found at {}", candidate.display());
    } else {
        Ok(ScanSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn missing_implicit_file_returns_defaults() {
        let settings =
            load_from(PathBuf::from("definitely_missing.toml"), false).expect("default settings");
        assert_eq!(settings, ScanSettings::default());
        assert_eq!(settings.scan.count_hint, 1000);
        assert_eq!(settings.scan.progress_every, 10_000);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = load_from(PathBuf::from("definitely_missing.toml"), true);
        assert!(result.is_err());
    }

    #[test]
    fn toml_payload_overrides_defaults() {
        let file = NamedTempFile::new().expect("temp file");
        let path = file.into_temp_path();
        std::fs::write(
            &path,
            r#"[scan]
count_hint = 250
"#,
        )
        .expect("write settings");

        let settings = load_from(path.to_path_buf(), true).expect("parsed settings");
        assert_eq!(settings.scan.count_hint, 250);
        assert_eq!(settings.scan.progress_every, 10_000);
    }
}
