//! Example application scaffolding.
//! The example app itself comes from an external generator package, run
//! through the package manager's one-off runner inside the module directory.

use crate::command::CommandRunner;
use crate::config::ExampleConfig;
use crate::constants::EXAMPLE_DIR;
use crate::data::SubstitutionData;
use crate::error::Result;
use crate::package_manager::PackageManager;
use log::debug;
use std::path::Path;

/// Trait for creating the example application of a new module.
pub trait ExampleGenerator {
    fn generate(&self, data: &SubstitutionData, target_dir: &Path) -> Result<()>;
}

/// Runs the configured generator package, e.g. `npx --yes create-expo-app example ...`.
pub struct CommandExampleGenerator<'a> {
    runner: &'a dyn CommandRunner,
    package_manager: PackageManager,
    config: &'a ExampleConfig,
}

impl<'a> CommandExampleGenerator<'a> {
    pub fn new(
        runner: &'a dyn CommandRunner,
        package_manager: PackageManager,
        config: &'a ExampleConfig,
    ) -> Self {
        Self { runner, package_manager, config }
    }
}

impl ExampleGenerator for CommandExampleGenerator<'_> {
    fn generate(&self, data: &SubstitutionData, target_dir: &Path) -> Result<()> {
        debug!("Creating example app for '{}'", data.project.slug);
        let command = self
            .package_manager
            .exec_command(&self.config.generator, target_dir)
            .args([EXAMPLE_DIR])
            .args(self.config.args.iter().cloned());
        self.runner.run(&command)
    }
}
