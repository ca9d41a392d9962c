//! Package manager detection and invocation.

use crate::command::CommandSpec;
use clap::ValueEnum;
use std::fmt;
use std::path::Path;

/// Supported JavaScript package managers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PackageManager {
    Npm,
    Yarn,
    Pnpm,
    Bun,
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Bun => "bun",
        };
        f.write_str(name)
    }
}

/// Windows installs the Node based managers as `.cmd` shims.
fn executable(name: &str) -> String {
    if cfg!(windows) && name != "bun" && name != "bunx" {
        format!("{name}.cmd")
    } else {
        name.to_string()
    }
}

impl PackageManager {
    /// Picks the package manager.
    ///
    /// An explicit choice wins, then the manager named at the start of the
    /// `npm_config_user_agent` value set by run-script wrappers
    /// (e.g. `pnpm/8.6.0 npm/? node/v20.3.0`), then npm.
    pub fn resolve(explicit: Option<PackageManager>, user_agent: Option<&str>) -> Self {
        if let Some(manager) = explicit {
            return manager;
        }
        match user_agent.map(str::trim_start) {
            Some(agent) if agent.starts_with("yarn") => PackageManager::Yarn,
            Some(agent) if agent.starts_with("pnpm") => PackageManager::Pnpm,
            Some(agent) if agent.starts_with("bun") => PackageManager::Bun,
            _ => PackageManager::Npm,
        }
    }

    /// `<pm> install`
    pub fn install_command<P: AsRef<Path>>(&self, cwd: P) -> CommandSpec {
        CommandSpec::new(executable(&self.to_string()), cwd).args(["install"])
    }

    /// `<pm> run <script>`
    pub fn run_script_command<P: AsRef<Path>>(&self, script: &str, cwd: P) -> CommandSpec {
        CommandSpec::new(executable(&self.to_string()), cwd).args(["run", script])
    }

    /// One-off package execution: `npx`, `yarn dlx`, `pnpm dlx` or `bunx`.
    pub fn exec_command<P: AsRef<Path>>(&self, package: &str, cwd: P) -> CommandSpec {
        match self {
            PackageManager::Npm => CommandSpec::new(executable("npx"), cwd).args(["--yes", package]),
            PackageManager::Yarn => CommandSpec::new(executable("yarn"), cwd).args(["dlx", package]),
            PackageManager::Pnpm => CommandSpec::new(executable("pnpm"), cwd).args(["dlx", package]),
            PackageManager::Bun => CommandSpec::new(executable("bunx"), cwd).args([package]),
        }
    }
}
