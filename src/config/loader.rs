//! Config file loading

use crate::domain::Config;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Section name a config file may nest all keys under.
const SECTION: &str = "regdocs";

const CANDIDATES: [&str; 4] = ["regdocs.toml", ".regdocs.toml", "regdocs.yml", "regdocs.yaml"];

/// Load the explicit config file, or the first one discovered in
/// `search_dirs`. Explicit files fail hard; auto-discovered ones that cannot
/// be parsed are skipped with a warning.
pub fn load_config(search_dirs: &[&Path], config_path: Option<&Path>) -> Result<Config> {
    let config_path_provided = config_path.is_some();

    let discovered = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover_config(search_dirs),
    };

    let Some(config_file) = discovered else {
        return Ok(Config::default());
    };

    let parsed = fs::read_to_string(&config_file)
        .with_context(|| format!("Failed reading config file: {}", config_file.display()))
        .and_then(|content| parse_config_file(&content, &config_file));

    match parsed {
        Ok(cfg) => {
            tracing::info!("Loaded config from {}", config_file.display());
            Ok(cfg)
        }
        Err(e) if !config_path_provided => {
            tracing::warn!(
                "Failed to parse auto-discovered config {}: {:#}",
                config_file.display(),
                e
            );
            Ok(Config::default())
        }
        Err(e) => Err(e),
    }
}

fn parse_config_file(content: &str, config_file: &Path) -> Result<Config> {
    let ext = config_file.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();
    match ext.as_str() {
        "toml" => parse_toml_config(content, config_file),
        "yaml" | "yml" => parse_yaml_config(content, config_file),
        other => Err(anyhow::anyhow!(
            "Unsupported config extension '.{}' for file {}",
            other,
            config_file.display()
        )),
    }
}

/// Parse TOML config, supporting a nested `[regdocs]` section.
fn parse_toml_config(content: &str, config_file: &Path) -> Result<Config> {
    let raw: toml::Value = toml::from_str(content)
        .with_context(|| format!("Invalid TOML syntax: {}", config_file.display()))?;

    let config_val = match raw.get(SECTION) {
        Some(nested) => nested.clone(),
        None => raw,
    };

    config_val.try_into().with_context(|| format!("Invalid TOML config: {}", config_file.display()))
}

/// Parse YAML config, supporting a nested `regdocs:` mapping.
fn parse_yaml_config(content: &str, config_file: &Path) -> Result<Config> {
    let raw: serde_yaml::Value = serde_yaml::from_str(content)
        .with_context(|| format!("Invalid YAML syntax: {}", config_file.display()))?;

    let config_val = match raw.get(SECTION) {
        Some(nested) => nested.clone(),
        None => raw,
    };

    serde_yaml::from_value(config_val)
        .with_context(|| format!("Invalid YAML config: {}", config_file.display()))
}

fn discover_config(search_dirs: &[&Path]) -> Option<PathBuf> {
    search_dirs
        .iter()
        .flat_map(|dir| CANDIDATES.iter().map(move |candidate| dir.join(candidate)))
        .find(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::SchemeName;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_config_defaults_when_missing() {
        let tmp = TempDir::new().expect("tmp");
        let cfg = load_config(&[tmp.path()], None).expect("config");
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn test_load_toml_config() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(
            tmp.path().join("regdocs.toml"),
            "docs_base = 'letters'\n[flow]\nscheme = 'products'\nincrement = 2.0\n",
        )
        .expect("write");

        let cfg = load_config(&[tmp.path()], None).expect("config");
        assert_eq!(cfg.docs_base, "letters");
        assert_eq!(cfg.flow.scheme, SchemeName::Products);
        assert_eq!(cfg.flow.increment, 2.0);
    }

    #[test]
    fn test_nested_section_in_toml_and_yaml() {
        let tmp = TempDir::new().expect("tmp");
        let toml_path = tmp.path().join("custom.toml");
        fs::write(&toml_path, "[regdocs]\ndata_path = 'letters.json'\n").expect("write");
        let cfg = load_config(&[], Some(&toml_path)).expect("toml config");
        assert_eq!(cfg.data_path, PathBuf::from("letters.json"));

        let yaml_path = tmp.path().join("custom.yaml");
        fs::write(&yaml_path, "regdocs:\n  gateway:\n    model: llama3\n").expect("write");
        let cfg = load_config(&[], Some(&yaml_path)).expect("yaml config");
        assert_eq!(cfg.gateway.model, "llama3");
    }

    #[test]
    fn test_first_search_dir_wins() {
        let first = TempDir::new().expect("tmp");
        let second = TempDir::new().expect("tmp");
        fs::write(first.path().join(".regdocs.toml"), "docs_base = 'first'\n").expect("write");
        fs::write(second.path().join("regdocs.toml"), "docs_base = 'second'\n").expect("write");

        let cfg = load_config(&[first.path(), second.path()], None).expect("config");
        assert_eq!(cfg.docs_base, "first");
    }

    #[test]
    fn test_explicit_config_invalid_type_returns_err() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("bad.toml");
        fs::write(&path, "[flow]\nincrement = 'lots'\n").expect("write");

        let result = load_config(&[tmp.path()], Some(&path));
        assert!(result.is_err(), "explicit config with invalid type should return Err");
    }

    #[test]
    fn test_explicit_config_unknown_column_returns_err() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("bad.yml");
        fs::write(&path, "flow:\n  columns: [company, planet]\n").expect("write");

        let result = load_config(&[tmp.path()], Some(&path));
        assert!(result.is_err(), "unknown column type should return Err");
    }

    #[test]
    fn test_explicit_config_unsupported_extension_returns_err() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("regdocs.ini");
        fs::write(&path, "docs_base = x\n").expect("write");

        assert!(load_config(&[tmp.path()], Some(&path)).is_err());
    }

    #[test]
    fn test_auto_discovered_invalid_type_returns_default() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("regdocs.toml"), "[gateway]\ntimeout_secs = 'soon'\n")
            .expect("write");

        let cfg = load_config(&[tmp.path()], None).expect("should not error on auto-discovery");
        assert_eq!(cfg.gateway.timeout_secs, Config::default().gateway.timeout_secs);
    }
}
