use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::core::BreathometerConfig;
use crate::core::{Error, Result};

pub const CONFIG_FILE_NAME: &str = ".breathometer.toml";
const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Pure function to read config file contents
pub(crate) fn read_config_file(path: &Path) -> std::result::Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Pure function to parse and validate config from TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<BreathometerConfig> {
    let config = toml::from_str::<BreathometerConfig>(contents)?;
    config.validate().map_err(Error::Configuration)?;
    Ok(config)
}

/// Load an explicitly named config file. Unlike discovery, every failure is an error.
pub fn load_config_from_path(path: &Path) -> Result<BreathometerConfig> {
    let contents = read_config_file(path).map_err(|e| {
        Error::Configuration(format!("failed to read {}: {}", path.display(), e))
    })?;
    let config = parse_and_validate_config(&contents).map_err(|e| {
        Error::Configuration(format!("invalid config {}: {}", path.display(), e))
    })?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Try loading a discovered config file; problems are logged and skipped
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<BreathometerConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!(
                "Ignoring invalid config {}: {}. Using defaults.",
                config_path.display(),
                e
            );
            Some(BreathometerConfig::default())
        }
    }
}

/// Handle file read errors with appropriate logging
pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Only log actual errors, not "file not found"
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// Pure function to generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search `start` and its ancestors for the nearest config file.
pub fn load_config_from(start: PathBuf) -> BreathometerConfig {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            BreathometerConfig::default()
        })
}

pub fn load_config() -> BreathometerConfig {
    match std::env::current_dir() {
        Ok(dir) => load_config_from(dir),
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            BreathometerConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::output::OutputFormat;
    use indoc::indoc;
    use tempfile::TempDir;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = parse_and_validate_config("").unwrap();
        assert_eq!(config, BreathometerConfig::default());
    }

    #[test]
    fn test_parse_full_file() {
        let config = parse_and_validate_config(indoc! {r#"
            [insights]
            remote_enabled = false
            timeout_secs = 5

            [simulation]
            seed = 42

            [output]
            default_format = "json"
        "#})
        .unwrap();

        assert!(!config.insights.remote_enabled);
        assert_eq!(config.insights.timeout_secs, 5);
        assert_eq!(config.insights.model, "llama3-70b-8192");
        assert_eq!(config.simulation.seed, Some(42));
        assert_eq!(config.output.default_format, Some(OutputFormat::Json));
    }

    #[test]
    fn test_invalid_value_names_field() {
        let err = parse_and_validate_config("[insights]\ntimeout_secs = 0\n").unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn test_directory_ancestors_is_bounded() {
        let deep = PathBuf::from("/a/b/c/d/e/f/g/h/i/j/k/l");
        assert_eq!(directory_ancestors(deep, 10).count(), 10);
        assert_eq!(directory_ancestors(PathBuf::from("/"), 10).count(), 1);
    }

    #[test]
    fn test_discovery_finds_parent_config() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            "[simulation]\nseed = 7\n",
        )
        .unwrap();
        let nested = temp.path().join("reports").join("march");
        fs::create_dir_all(&nested).unwrap();

        let config = load_config_from(nested);

        assert_eq!(config.simulation.seed, Some(7));
    }

    #[test]
    fn test_discovered_invalid_file_falls_back_to_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE_NAME), "[insights\nbroken").unwrap();

        let config = load_config_from(temp.path().to_path_buf());

        assert_eq!(config, BreathometerConfig::default());
    }

    #[test]
    fn test_explicit_invalid_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("custom.toml");
        fs::write(&path, "[insights]\ntemperature = 9.0\n").unwrap();

        let err = load_config_from_path(&path).unwrap_err();

        assert!(matches!(err, Error::Configuration(_)));
        assert!(err.to_string().contains("temperature"));
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        assert!(load_config_from_path(&temp.path().join("nope.toml")).is_err());
    }
}
