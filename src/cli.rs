//! Command-line interface implementation for create-native-module.
//! Provides argument parsing using clap.

use crate::collector::PresetAnswers;
use crate::package_manager::PackageManager;
use crate::pipeline::CommandOptions;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments structure.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Creates a new native module from a template",
    long_about = None
)]
pub struct Args {
    /// Directory for the new module (defaults to the package name)
    #[arg(value_name = "TARGET")]
    pub target: Option<PathBuf>,

    /// Local directory with the template to use instead of downloading it
    #[arg(long, value_name = "DIR")]
    pub source: Option<PathBuf>,

    /// Keep the README.md file from the template
    #[arg(long)]
    pub with_readme: bool,

    /// Keep the CHANGELOG.md file from the template
    #[arg(long)]
    pub with_changelog: bool,

    /// Do not create an example app
    #[arg(long)]
    pub no_example: bool,

    /// Native module name
    #[arg(long)]
    pub name: Option<String>,

    /// Module description
    #[arg(long)]
    pub description: Option<String>,

    /// Android package name, e.g. expo.modules.mymodule
    #[arg(long)]
    pub package: Option<String>,

    #[arg(long)]
    pub author_name: Option<String>,

    #[arg(long)]
    pub author_email: Option<String>,

    /// URL to the author's profile
    #[arg(long)]
    pub author_url: Option<String>,

    /// URL of the module's repository
    #[arg(long)]
    pub repo: Option<String>,

    /// Package manager used to install and build the module
    #[arg(long, value_enum)]
    pub package_manager: Option<PackageManager>,

    /// JSON or YAML file overriding the default configuration
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Converts the parsed arguments into pipeline options.
    pub fn command_options(&self) -> CommandOptions {
        CommandOptions {
            target: self.target.clone(),
            source: self.source.clone(),
            with_readme: self.with_readme,
            with_changelog: self.with_changelog,
            example: !self.no_example,
            package_manager: self.package_manager,
            answers: PresetAnswers {
                name: self.name.clone(),
                description: self.description.clone(),
                package: self.package.clone(),
                author_name: self.author_name.clone(),
                author_email: self.author_email.clone(),
                author_url: self.author_url.clone(),
                repo: self.repo.clone(),
            },
        }
    }
}

/// Parses command line arguments, exiting with clap's message on error.
pub fn get_args() -> Args {
    Args::parse()
}
