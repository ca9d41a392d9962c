//! Runtime configuration for create-native-module.
//! A [`Config`] is built once at startup from defaults, an optional
//! configuration file and the environment, then passed down to every step.

use crate::constants::{
    DEFAULT_EXAMPLE_ARGS, DEFAULT_EXAMPLE_GENERATOR, DEFAULT_PACKAGE_PREFIX, DEFAULT_REGISTRY,
    DEFAULT_TEMPLATE_PACKAGE, IGNORED_NAMES, INIT_CWD_ENV, PRERELEASE_ENV, REGISTRY_ENV,
    USER_AGENT_ENV,
};
use crate::error::{Error, Result};
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use url::Url;

/// How the example application is generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleConfig {
    /// Package executed through the package manager's one-off runner
    pub generator: String,
    /// Arguments passed after the example directory name
    pub args: Vec<String>,
}

impl Default for ExampleConfig {
    fn default() -> Self {
        Self {
            generator: DEFAULT_EXAMPLE_GENERATOR.to_string(),
            args: DEFAULT_EXAMPLE_ARGS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Settings shared by all steps of a run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory relative target paths are resolved against
    pub base_dir: PathBuf,
    pub template_package: String,
    pub registry: Url,
    /// Use the `next` dist-tag instead of `latest`
    pub prerelease: bool,
    /// File names or glob patterns excluded from the template
    pub ignored: Vec<String>,
    /// Prefix of the default package identifier
    pub package_prefix: String,
    pub example: ExampleConfig,
    /// `npm_config_user_agent` of the invoking package manager, if any
    pub user_agent: Option<String>,
}

/// Optional overrides read from a configuration file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub template_package: Option<String>,
    pub registry: Option<String>,
    pub prerelease: Option<bool>,
    pub ignored: Option<Vec<String>>,
    pub package_prefix: Option<String>,
    pub example_generator: Option<String>,
    pub example_args: Option<Vec<String>>,
}

/// Parses configuration file content.
/// JSON is tried first, YAML second.
pub fn parse_file_config(content: &str) -> Result<FileConfig> {
    match serde_json::from_str(content) {
        Ok(config) => Ok(config),
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Invalid configuration format: {e}"))),
    }
}

/// Interprets an environment toggle such as `NATIVE_MODULE_BETA=1`.
pub fn parse_bool_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

fn parse_registry(value: &str) -> Result<Url> {
    // Url::join drops the last path segment unless the base ends with a slash.
    let normalized =
        if value.ends_with('/') { value.to_string() } else { format!("{value}/") };
    Url::parse(&normalized)
        .map_err(|e| Error::ConfigError(format!("invalid registry URL '{value}': {e}")))
}

impl Config {
    /// Builds the configuration from file overrides and an environment lookup.
    ///
    /// # Arguments
    /// * `file` - Overrides read from the configuration file, if any
    /// * `env` - Environment variable lookup
    /// * `cwd` - Current working directory, used unless `INIT_CWD` is set
    pub fn from_sources<F>(file: FileConfig, env: F, cwd: PathBuf) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_dir = env(INIT_CWD_ENV)
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
            .unwrap_or(cwd);

        let registry = match env(REGISTRY_ENV).filter(|r| !r.is_empty()).or(file.registry) {
            Some(registry) => parse_registry(&registry)?,
            None => parse_registry(DEFAULT_REGISTRY)?,
        };

        let prerelease = env(PRERELEASE_ENV)
            .map(|value| parse_bool_flag(&value))
            .or(file.prerelease)
            .unwrap_or(false);

        let defaults = ExampleConfig::default();
        let example = ExampleConfig {
            generator: file.example_generator.unwrap_or(defaults.generator),
            args: file.example_args.unwrap_or(defaults.args),
        };

        let config = Self {
            base_dir,
            template_package: file
                .template_package
                .unwrap_or_else(|| DEFAULT_TEMPLATE_PACKAGE.to_string()),
            registry,
            prerelease,
            ignored: file
                .ignored
                .unwrap_or_else(|| IGNORED_NAMES.iter().map(|s| s.to_string()).collect()),
            package_prefix: file
                .package_prefix
                .unwrap_or_else(|| DEFAULT_PACKAGE_PREFIX.to_string()),
            example,
            user_agent: env(USER_AGENT_ENV).filter(|agent| !agent.is_empty()),
        };
        debug!("Resolved configuration: {config:?}");
        Ok(config)
    }

    /// Loads the configuration for this process.
    ///
    /// # Arguments
    /// * `config_file` - Optional JSON or YAML file with overrides
    ///
    /// # Errors
    /// * `Error::ConfigError` if the file cannot be parsed or a value is invalid
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let file = match config_file {
            Some(path) => {
                debug!("Loading configuration from {}", path.display());
                let content = std::fs::read_to_string(path).map_err(|e| {
                    Error::ConfigError(format!("cannot read '{}': {e}", path.display()))
                })?;
                parse_file_config(&content)?
            }
            None => FileConfig::default(),
        };
        let cwd = std::env::current_dir()?;
        Self::from_sources(file, |key| std::env::var(key).ok(), cwd)
    }
}
