//! Common constants used throughout create-native-module.

/// Names excluded from template discovery at any depth.
/// `package.json` is produced from the `$package.json` template instead.
pub const IGNORED_NAMES: [&str; 5] = [".DS_Store", ".git", "build", "node_modules", "package.json"];

/// Registry package holding the module template
pub const DEFAULT_TEMPLATE_PACKAGE: &str = "native-module-template";

pub const DEFAULT_REGISTRY: &str = "https://registry.npmjs.org/";

pub const DEFAULT_PACKAGE_PREFIX: &str = "expo.modules";

/// Directory every registry tarball unpacks into
pub const DOWNLOAD_WRAPPER_DIR: &str = "package";

/// Leading marker stripped from template paths
pub const TEMPLATE_PATH_MARKER: char = '$';

pub const DEFAULT_SLUG: &str = "my-module";
pub const DEFAULT_DESCRIPTION: &str = "My new module";
pub const PROJECT_VERSION: &str = "0.1.0";
pub const LICENSE: &str = "MIT";

pub const README_FILE: &str = "README.md";
pub const CHANGELOG_FILE: &str = "CHANGELOG.md";

/// Directory the example application is generated into
pub const EXAMPLE_DIR: &str = "example";
pub const DEFAULT_EXAMPLE_GENERATOR: &str = "create-expo-app";
pub const DEFAULT_EXAMPLE_ARGS: [&str; 3] = ["--template", "blank-typescript", "--no-install"];

/// Environment toggle selecting the pre-release dist-tag
pub const PRERELEASE_ENV: &str = "NATIVE_MODULE_BETA";
/// Set by package-manager run-script wrappers to the invoking directory
pub const INIT_CWD_ENV: &str = "INIT_CWD";
pub const REGISTRY_ENV: &str = "npm_config_registry";
pub const USER_AGENT_ENV: &str = "npm_config_user_agent";
