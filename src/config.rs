use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::importer::DEFAULT_URL;

/// Root configuration structure, deserialized from `.registry-sync/config.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Registry import settings.
    #[serde(default)]
    pub importer: ImporterConfig,
}

/// Where the registry comes from and where its local copies live.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ImporterConfig {
    /// Directory holding the raw document and the JSON snapshot.
    pub data_dir: PathBuf,
    /// Registry download URL.
    pub url: String,
    /// Request timeout for the download, in seconds. Must be positive.
    pub timeout_secs: u64,
}

impl ImporterConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ImporterConfig {
    fn default() -> Self {
        ImporterConfig {
            data_dir: default_data_dir(),
            url: DEFAULT_URL.to_string(),
            timeout_secs: 60,
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("registry-sync"))
        .unwrap_or_else(|| PathBuf::from(".registry-sync"))
        .join("external")
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<base_dir>/.registry-sync/config.toml`
/// 3. `~/.config/registry-sync/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(base_dir: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let local_config = base_dir.join(".registry-sync").join("config.toml");
    if local_config.exists() {
        return read_config(&local_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home
            .join(".config")
            .join("registry-sync")
            .join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config: Config =
        toml::from_str(&content).with_context(|| format!("invalid config {}", path.display()))?;
    if config.importer.timeout_secs == 0 {
        bail!(
            "invalid config {}: importer.timeout_secs must be greater than zero",
            path.display()
        );
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.importer.url, DEFAULT_URL);
        assert_eq!(config.importer.timeout(), Duration::from_secs(60));
        assert!(config.importer.data_dir.ends_with("external"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
[importer]
data_dir = "/srv/registry/external"
"#,
        )
        .unwrap();
        assert_eq!(config.importer.data_dir, PathBuf::from("/srv/registry/external"));
        assert_eq!(config.importer.url, DEFAULT_URL);
        assert_eq!(config.importer.timeout_secs, 60);

        let empty: Config = toml::from_str("").unwrap();
        assert_eq!(empty.importer.url, DEFAULT_URL);
    }

    #[test]
    fn test_override_path() {
        let mut f = NamedTempFile::new().unwrap();
        write!(
            f,
            "[importer]\nurl = \"http://localhost:8080/rdf\"\ntimeout_secs = 5\n"
        )
        .unwrap();

        let config = load_config(Path::new("."), Some(f.path())).unwrap();
        assert_eq!(config.importer.url, "http://localhost:8080/rdf");
        assert_eq!(config.importer.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_project_config() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(".registry-sync")).unwrap();
        std::fs::write(
            dir.path().join(".registry-sync").join("config.toml"),
            "[importer]\ntimeout_secs = 15\n",
        )
        .unwrap();

        let config = load_config(dir.path(), None).unwrap();
        assert_eq!(config.importer.timeout_secs, 15);
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let mut f = NamedTempFile::new().unwrap();
        write!(f, "[importer]\ntimeout_secs = \"soon\"\n").unwrap();
        assert!(load_config(Path::new("."), Some(f.path())).is_err());
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let mut f = NamedTempFile::new().unwrap();
        write!(f, "[importer]\ntimeout_secs = 0\n").unwrap();

        let err = load_config(Path::new("."), Some(f.path())).unwrap_err();
        assert!(err.to_string().contains("timeout_secs must be greater than zero"));
    }
}
