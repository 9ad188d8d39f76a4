//! Config file loading

use crate::domain::Config;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_SECTION: &str = "dirmerge";

const CANDIDATES: &[&str] = &[
    "dirmerge.toml",
    ".dirmerge.toml",
    "dirmerge.yml",
    ".dirmerge.yml",
    "dirmerge.yaml",
    ".dirmerge.yaml",
];

/// Load settings from `config_path`, or from a config file discovered in `source_dir`.
///
/// A file named explicitly must parse. An auto-discovered file that does not
/// parse is reported and ignored.
pub fn load_config(source_dir: &Path, config_path: Option<&Path>) -> Result<Config> {
    let config_path_provided = config_path.is_some();

    let discovered = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover_config(source_dir),
    };

    let Some(config_file) = discovered else {
        return Ok(Config::default());
    };

    let parsed = fs::read_to_string(&config_file)
        .with_context(|| format!("Failed reading config file: {}", config_file.display()))
        .and_then(|content| parse_config(&content, &config_file));

    match parsed {
        Ok(cfg) => {
            tracing::debug!("Loaded config from {}", config_file.display());
            Ok(cfg)
        }
        Err(e) if !config_path_provided => {
            tracing::warn!("Ignoring auto-discovered config {}: {:#}", config_file.display(), e);
            Ok(Config::default())
        }
        Err(e) => Err(e),
    }
}

fn parse_config(content: &str, config_file: &Path) -> Result<Config> {
    let ext = config_file.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();
    match ext.as_str() {
        "toml" => parse_toml_config(content, config_file),
        "yaml" | "yml" => parse_yaml_config(content, config_file),
        other => anyhow::bail!(
            "Unsupported config extension '.{}' for file {}",
            other,
            config_file.display()
        ),
    }
}

/// Parse TOML config, supporting a nested `[dirmerge]` table.
fn parse_toml_config(content: &str, config_file: &Path) -> Result<Config> {
    let raw: toml::Value = toml::from_str(content)
        .with_context(|| format!("Invalid TOML syntax: {}", config_file.display()))?;

    let config_val = match raw.get(CONFIG_SECTION) {
        Some(nested) => nested.clone(),
        None => raw,
    };

    config_val.try_into().with_context(|| format!("Invalid TOML config: {}", config_file.display()))
}

/// Parse YAML config, supporting a nested `dirmerge:` mapping.
fn parse_yaml_config(content: &str, config_file: &Path) -> Result<Config> {
    let raw: serde_yaml::Value = serde_yaml::from_str(content)
        .with_context(|| format!("Invalid YAML syntax: {}", config_file.display()))?;

    // An empty document parses as null.
    if raw.is_null() {
        return Ok(Config::default());
    }

    let config_val = match raw.get(CONFIG_SECTION) {
        Some(nested) => nested.clone(),
        None => raw,
    };

    serde_yaml::from_value(config_val)
        .with_context(|| format!("Invalid YAML config: {}", config_file.display()))
}

fn discover_config(source_dir: &Path) -> Option<PathBuf> {
    CANDIDATES.iter().map(|candidate| source_dir.join(candidate)).find(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SortKey;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_config_defaults_when_missing() {
        let tmp = TempDir::new().expect("tmp");
        let cfg = load_config(tmp.path(), None).expect("config");
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.sort_key(), SortKey::Name);
    }

    #[test]
    fn test_load_toml_config() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(
            tmp.path().join("dirmerge.toml"),
            "sort = 'size'\nreverse = true\nexclude = ['.git', 'target']\n",
        )
        .expect("write");

        let cfg = load_config(tmp.path(), None).expect("config");
        assert_eq!(cfg.sort_key(), SortKey::Size);
        assert!(cfg.reverse);
        assert_eq!(cfg.exclude, vec![".git", "target"]);
    }

    #[test]
    fn test_nested_toml_section() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join(".dirmerge.toml"), "[dirmerge]\nglob = true\n").expect("write");

        let cfg = load_config(tmp.path(), None).expect("config");
        assert!(cfg.glob);
    }

    #[test]
    fn test_load_yaml_config_with_comma_separated_exclude() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(
            tmp.path().join(".dirmerge.yml"),
            "sort: modification_time\nexclude: \"dist, build ,  node_modules\"\n",
        )
        .expect("write");

        let cfg = load_config(tmp.path(), None).expect("config");
        assert_eq!(cfg.sort_key(), SortKey::ModificationTime);
        assert_eq!(cfg.exclude, vec!["dist", "build", "node_modules"]);
    }

    #[test]
    fn test_unknown_sort_name_falls_back_to_name() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("dirmerge.toml"), "sort = 'popularity'\n").expect("write");

        let cfg = load_config(tmp.path(), None).expect("config");
        assert_eq!(cfg.sort_key(), SortKey::Name);
    }

    #[test]
    fn test_explicit_config_invalid_type_returns_err() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("bad.toml");
        fs::write(&path, "exclude = 123\n").expect("write");

        let result = load_config(tmp.path(), Some(&path));
        assert!(result.is_err(), "explicit config with invalid type should return Err");
    }

    #[test]
    fn test_explicit_config_unknown_key_returns_err() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("bad.yml");
        fs::write(&path, "sortt: size\n").expect("write");

        assert!(load_config(tmp.path(), Some(&path)).is_err());
    }

    #[test]
    fn test_explicit_config_unsupported_extension_returns_err() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("settings.ini");
        fs::write(&path, "sort=size\n").expect("write");

        assert!(load_config(tmp.path(), Some(&path)).is_err());
    }

    #[test]
    fn test_explicit_missing_config_returns_err() {
        let tmp = TempDir::new().expect("tmp");
        assert!(load_config(tmp.path(), Some(&tmp.path().join("absent.toml"))).is_err());
    }

    #[test]
    fn test_auto_discovered_invalid_config_returns_default() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("dirmerge.toml"), "exclude = [\".git\", 123]\n").expect("write");

        let cfg = load_config(tmp.path(), None).expect("should not error on auto-discovery");
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("dirmerge.yaml"), "").expect("write");

        let cfg = load_config(tmp.path(), None).expect("config");
        assert_eq!(cfg, Config::default());
    }
}
