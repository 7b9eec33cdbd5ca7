use anyhow::Context;
use relay_core::config::{Config, DEFAULT_CONFIG_FILE};
use std::path::{Path, PathBuf};

/// Resolve the effective configuration.
///
/// Priority, lowest to highest:
/// 1. Built-in defaults
/// 2. The YAML file: `explicit` (must exist) or `./relay.yaml` (if present)
/// 3. `--data-file` / `RELAY_DATA_FILE`
pub fn resolve_config(explicit: Option<&Path>, data_file: Option<PathBuf>) -> anyhow::Result<Config> {
    let config = match explicit {
        Some(path) => Config::load(path)
            .with_context(|| format!("cannot read config file {}", path.display()))?,
        None => Config::load_or_default(Path::new(DEFAULT_CONFIG_FILE))
            .with_context(|| format!("cannot read config file {DEFAULT_CONFIG_FILE}"))?,
    };
    Ok(config.with_data_file(data_file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn explicit_file_is_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.yaml");
        std::fs::write(&path, "data_file: /tmp/relay.json\nport: 9999\n").unwrap();
        let config = resolve_config(Some(&path), None).unwrap();
        assert_eq!(config.data_file, PathBuf::from("/tmp/relay.json"));
        assert_eq!(config.port, 9999);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(resolve_config(Some(&dir.path().join("nope.yaml")), None).is_err());
    }

    #[test]
    fn data_file_flag_wins() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.yaml");
        std::fs::write(&path, "data_file: from-file.json\n").unwrap();
        let config = resolve_config(Some(&path), Some(PathBuf::from("from-flag.json"))).unwrap();
        assert_eq!(config.data_file, PathBuf::from("from-flag.json"));
    }
}
