//! Conversion settings: built-in defaults, an optional `propconv.json` /
//! `propconv.toml` file, then CLI overrides (highest precedence).

use crate::converter;
use crate::error::{Error, Result};
use crate::utils::{io, validation};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_BASE_NAME: &str = "MessageBundle.properties";
pub const DEFAULT_SUFFIX: &str = "_en_alan_turing";
pub const DEFAULT_DICTIONARY: &str = "wordings.properties";

/// File names probed in the working directory when no `--config` is given.
pub const CONFIG_FILE_NAMES: &[&str] = &["propconv.json", "propconv.toml"];

/// Immutable settings for one conversion run.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ConvertConfig {
    pub root: PathBuf,
    pub base_name: String,
    pub suffix: String,
    pub dictionary: PathBuf,
    pub exclude: Vec<String>,
    pub timestamp_header: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            base_name: DEFAULT_BASE_NAME.to_string(),
            suffix: DEFAULT_SUFFIX.to_string(),
            dictionary: PathBuf::from(DEFAULT_DICTIONARY),
            exclude: Vec::new(),
            timestamp_header: true,
        }
    }
}

impl ConvertConfig {
    pub fn validate(&self) -> Result<()> {
        validation::require_file_name_fragment(&self.base_name, "base_name")?;
        validation::require_file_name_fragment(&self.suffix, "suffix")?;

        let Some(output_name) = converter::output_file_name(&self.base_name, &self.suffix) else {
            return Err(Error::config_invalid_value(
                "base_name",
                Some(self.base_name.clone()),
                format!(
                    "'{}' has no extension to insert the suffix before",
                    self.base_name
                ),
            ));
        };
        if output_name.contains(&self.base_name) {
            return Err(Error::config_invalid_value(
                "suffix",
                Some(self.suffix.clone()),
                format!(
                    "output name '{}' still contains '{}' and would be converted again",
                    output_name, self.base_name
                ),
            ));
        }

        Ok(())
    }
}

/// Shape of `propconv.json` / `propconv.toml`. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub root: Option<String>,
    pub base_name: Option<String>,
    pub suffix: Option<String>,
    pub dictionary: Option<String>,
    pub exclude: Option<Vec<String>>,
    pub timestamp_header: Option<bool>,
}

/// Values supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub root: Option<String>,
    pub base_name: Option<String>,
    pub suffix: Option<String>,
    pub dictionary: Option<String>,
    pub exclude: Vec<String>,
    pub no_timestamp: bool,
}

/// A validated config plus the file it came from, if any.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedConfig {
    #[serde(flatten)]
    pub config: ConvertConfig,
    pub source: Option<PathBuf>,
}

/// Resolve against the process working directory.
pub fn resolve(config_path: Option<&Path>, overrides: &ConfigOverrides) -> Result<ResolvedConfig> {
    let cwd = std::env::current_dir()
        .map_err(|e| Error::internal_io(e.to_string(), Some("read current dir".to_string())))?;
    resolve_in(&cwd, config_path, overrides)
}

/// Resolve with an explicit working directory.
///
/// Relative paths in a config file are taken relative to that file;
/// relative CLI paths are taken relative to `cwd`.
pub fn resolve_in(
    cwd: &Path,
    config_path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<ResolvedConfig> {
    let mut config = ConvertConfig {
        root: cwd.to_path_buf(),
        dictionary: cwd.join(DEFAULT_DICTIONARY),
        ..ConvertConfig::default()
    };

    let source = find_config_file(cwd, config_path)?;

    if let Some(path) = &source {
        let file = read_config_file(path)?;
        let base = path.parent().unwrap_or(cwd);
        apply_file(&mut config, file, base)?;
    }

    apply_overrides(&mut config, overrides, cwd)?;
    config.validate()?;

    Ok(ResolvedConfig { config, source })
}

fn find_config_file(cwd: &Path, explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        let path = cwd.join(path);
        if !path.is_file() {
            return Err(Error::validation_invalid_argument(
                "config",
                format!("Config file not found: {}", path.display()),
                None,
                None,
            ));
        }
        return Ok(Some(path));
    }

    Ok(CONFIG_FILE_NAMES
        .iter()
        .map(|name| cwd.join(name))
        .find(|candidate| candidate.is_file()))
}

/// Parse a config file; `.toml` is TOML, everything else JSON.
pub fn read_config_file(path: &Path) -> Result<ConfigFile> {
    let display = path.display().to_string();
    let content = io::read_file(path, &format!("read {}", display))?;

    let is_toml = path.extension().is_some_and(|ext| ext == "toml");
    if is_toml {
        toml::from_str(&content).map_err(|e| Error::config_invalid_toml(display, e))
    } else {
        serde_json::from_str(&content).map_err(|e| Error::config_invalid_json(display, e))
    }
}

fn apply_file(config: &mut ConvertConfig, file: ConfigFile, base: &Path) -> Result<()> {
    if let Some(root) = file.root {
        config.root = resolve_path(base, &root, "root")?;
    }
    if let Some(dictionary) = file.dictionary {
        config.dictionary = resolve_path(base, &dictionary, "dictionary")?;
    }
    if let Some(base_name) = file.base_name {
        config.base_name = base_name;
    }
    if let Some(suffix) = file.suffix {
        config.suffix = suffix;
    }
    if let Some(exclude) = file.exclude {
        config.exclude = exclude;
    }
    if let Some(timestamp_header) = file.timestamp_header {
        config.timestamp_header = timestamp_header;
    }
    Ok(())
}

fn apply_overrides(config: &mut ConvertConfig, overrides: &ConfigOverrides, cwd: &Path) -> Result<()> {
    if let Some(root) = &overrides.root {
        config.root = resolve_path(cwd, root, "root")?;
    }
    if let Some(dictionary) = &overrides.dictionary {
        config.dictionary = resolve_path(cwd, dictionary, "dictionary")?;
    }
    if let Some(base_name) = &overrides.base_name {
        config.base_name = base_name.clone();
    }
    if let Some(suffix) = &overrides.suffix {
        config.suffix = suffix.clone();
    }
    // CLI excludes add to the configured ones.
    config.exclude.extend(overrides.exclude.iter().cloned());
    if overrides.no_timestamp {
        config.timestamp_header = false;
    }
    Ok(())
}

/// Expand `~` / `$VAR` and anchor relative paths at `base`.
fn resolve_path(base: &Path, raw: &str, key: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full(raw).map_err(|e| {
        Error::config_invalid_value(key, Some(raw.to_string()), e.to_string())
    })?;

    let path = PathBuf::from(expanded.as_ref());
    if path.is_absolute() {
        Ok(path)
    } else {
        Ok(base.join(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_apply_without_config_file() {
        let dir = TempDir::new().unwrap();
        let resolved = resolve_in(dir.path(), None, &ConfigOverrides::default()).unwrap();

        assert!(resolved.source.is_none());
        assert_eq!(resolved.config.root, dir.path());
        assert_eq!(resolved.config.base_name, DEFAULT_BASE_NAME);
        assert_eq!(resolved.config.suffix, DEFAULT_SUFFIX);
        assert_eq!(resolved.config.dictionary, dir.path().join(DEFAULT_DICTIONARY));
        assert!(resolved.config.timestamp_header);
    }

    #[test]
    fn json_config_paths_resolve_against_file_dir() {
        let dir = TempDir::new().unwrap();
        let conf_dir = dir.path().join("conf");
        fs::create_dir_all(&conf_dir).unwrap();
        fs::write(
            conf_dir.join("propconv.json"),
            r#"{"root": "../bundles", "dictionary": "words.properties", "suffix": "_fr"}"#,
        )
        .unwrap();

        let resolved = resolve_in(
            dir.path(),
            Some(Path::new("conf/propconv.json")),
            &ConfigOverrides::default(),
        )
        .unwrap();

        assert_eq!(resolved.config.root, conf_dir.join("../bundles"));
        assert_eq!(resolved.config.dictionary, conf_dir.join("words.properties"));
        assert_eq!(resolved.config.suffix, "_fr");
    }

    #[test]
    fn toml_config_is_discovered_in_cwd() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("propconv.toml"),
            "base_name = \"Labels.properties\"\nexclude = [\"**/build/**\"]\ntimestamp_header = false\n",
        )
        .unwrap();

        let resolved = resolve_in(dir.path(), None, &ConfigOverrides::default()).unwrap();

        assert_eq!(resolved.source, Some(dir.path().join("propconv.toml")));
        assert_eq!(resolved.config.base_name, "Labels.properties");
        assert_eq!(resolved.config.exclude, vec!["**/build/**".to_string()]);
        assert!(!resolved.config.timestamp_header);
    }

    #[test]
    fn cli_overrides_win_over_file() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("propconv.json"),
            r#"{"suffix": "_fr", "exclude": ["a/**"]}"#,
        )
        .unwrap();

        let overrides = ConfigOverrides {
            suffix: Some("_de".to_string()),
            exclude: vec!["b/**".to_string()],
            no_timestamp: true,
            ..ConfigOverrides::default()
        };
        let resolved = resolve_in(dir.path(), None, &overrides).unwrap();

        assert_eq!(resolved.config.suffix, "_de");
        assert_eq!(resolved.config.exclude, vec!["a/**".to_string(), "b/**".to_string()]);
        assert!(!resolved.config.timestamp_header);
    }

    #[test]
    fn env_vars_expand_in_config_paths() {
        let dir = TempDir::new().unwrap();
        let bundles = dir.path().join("bundles");
        std::env::set_var("PROPCONV_TEST_BUNDLE_ROOT", &bundles);
        fs::write(
            dir.path().join("propconv.json"),
            r#"{"root": "$PROPCONV_TEST_BUNDLE_ROOT", "dictionary": "${PROPCONV_TEST_BUNDLE_ROOT}/words.properties"}"#,
        )
        .unwrap();

        let resolved = resolve_in(dir.path(), None, &ConfigOverrides::default()).unwrap();

        assert_eq!(resolved.config.root, bundles);
        assert_eq!(resolved.config.dictionary, bundles.join("words.properties"));
    }

    #[test]
    fn tilde_expands_in_cli_paths() {
        let dir = TempDir::new().unwrap();
        let overrides = ConfigOverrides {
            root: Some("~/bundles".to_string()),
            ..ConfigOverrides::default()
        };

        let resolved = resolve_in(dir.path(), None, &overrides).unwrap();

        let expected = shellexpand::tilde("~/bundles").into_owned();
        if !Path::new(&expected).is_absolute() {
            // No home directory in this environment.
            return;
        }
        assert_eq!(resolved.config.root, PathBuf::from(expected));
        assert!(!resolved.config.root.starts_with(dir.path()));
    }

    #[test]
    fn undefined_env_var_is_invalid_value() {
        let dir = TempDir::new().unwrap();
        let overrides = ConfigOverrides {
            dictionary: Some("$PROPCONV_TEST_UNSET_VARIABLE/words.properties".to_string()),
            ..ConfigOverrides::default()
        };

        let err = resolve_in(dir.path(), None, &overrides).unwrap_err();

        assert_eq!(err.code, ErrorCode::ConfigInvalidValue);
        assert_eq!(err.details["key"], "dictionary");
    }

    #[test]
    fn invalid_json_config_is_reported() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("propconv.json"), "{ not json").unwrap();

        let err = resolve_in(dir.path(), None, &ConfigOverrides::default()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigInvalidJson);
    }

    #[test]
    fn unknown_key_is_rejected() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("propconv.json"), r#"{"sufix": "_x"}"#).unwrap();

        let err = resolve_in(dir.path(), None, &ConfigOverrides::default()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigInvalidJson);
    }

    #[test]
    fn invalid_toml_config_is_reported() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("propconv.toml"), "suffix = ").unwrap();

        let err = resolve_in(dir.path(), None, &ConfigOverrides::default()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigInvalidToml);
    }

    #[test]
    fn missing_explicit_config_is_invalid_argument() {
        let dir = TempDir::new().unwrap();
        let err = resolve_in(
            dir.path(),
            Some(Path::new("nope.json")),
            &ConfigOverrides::default(),
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationInvalidArgument);
    }

    #[test]
    fn empty_suffix_is_rejected() {
        let config = ConvertConfig {
            suffix: String::new(),
            ..ConvertConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigInvalidValue);
    }

    #[test]
    fn suffix_that_rematches_base_name_is_rejected() {
        let config = ConvertConfig {
            base_name: "Bundle.properties".to_string(),
            suffix: ".properties".to_string(),
            ..ConvertConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigInvalidValue);
        assert_eq!(err.details["key"], "suffix");
    }

    #[test]
    fn base_name_without_extension_is_rejected() {
        let dir = TempDir::new().unwrap();
        let overrides = ConfigOverrides {
            base_name: Some("README".to_string()),
            ..ConfigOverrides::default()
        };

        let err = resolve_in(dir.path(), None, &overrides).unwrap_err();

        assert_eq!(err.code, ErrorCode::ConfigInvalidValue);
        assert_eq!(err.details["key"], "base_name");
        assert!(err.to_string().contains("no extension"));
    }

    #[test]
    fn base_name_with_separator_is_rejected() {
        let config = ConvertConfig {
            base_name: "dir/MessageBundle.properties".to_string(),
            ..ConvertConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
