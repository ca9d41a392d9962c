//! Scaffolding orchestration.
//! Runs the ordered list of [`Step`]s, reporting each one and stopping at
//! the first failure. Nothing written before a failure is rolled back.

use crate::collector::{collect_slug, collect_substitution_data, GitIdentity, PresetAnswers};
use crate::command::CommandRunner;
use crate::config::Config;
use crate::constants::{CHANGELOG_FILE, README_FILE};
use crate::data::SubstitutionData;
use crate::error::{Error, Result};
use crate::example::{CommandExampleGenerator, ExampleGenerator};
use crate::ignore::build_ignore_set;
use crate::loader::{load_template, AcquiredTemplate};
use crate::package_manager::PackageManager;
use crate::processor::{discover_files, Processor};
use crate::prompt::Prompter;
use crate::renderer::{MiniJinjaRenderer, PathRenderer};
use log::debug;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// User supplied options for one run.
#[derive(Debug, Clone)]
pub struct CommandOptions {
    /// Target directory; replaced by the resolved absolute path once known
    pub target: Option<PathBuf>,
    /// Local template used instead of downloading one, relative to the base directory
    pub source: Option<PathBuf>,
    pub with_readme: bool,
    pub with_changelog: bool,
    /// Create the example application
    pub example: bool,
    pub package_manager: Option<PackageManager>,
    pub answers: PresetAnswers,
}

impl Default for CommandOptions {
    fn default() -> Self {
        Self {
            target: None,
            source: None,
            with_readme: false,
            with_changelog: false,
            example: true,
            package_manager: None,
            answers: PresetAnswers::default(),
        }
    }
}

/// The steps of a run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    CollectSlug,
    PrepareTarget,
    CollectAnswers,
    ResolvePackageManager,
    AcquireTemplate,
    RenderTemplate,
    InstallDependencies,
    Build,
    RemoveDownload,
    RemoveOptionalFiles,
    CreateExample,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::CollectSlug => "Choosing the package name",
            Step::PrepareTarget => "Preparing the target directory",
            Step::CollectAnswers => "Collecting module details",
            Step::ResolvePackageManager => "Resolving the package manager",
            Step::AcquireTemplate => "Fetching the module template",
            Step::RenderTemplate => "Rendering the module template",
            Step::InstallDependencies => "Installing dependencies",
            Step::Build => "Compiling TypeScript files",
            Step::RemoveDownload => "Removing the downloaded template",
            Step::RemoveOptionalFiles => "Cleaning up optional files",
            Step::CreateExample => "Creating the example app",
        };
        f.write_str(name)
    }
}

/// What a completed run produced.
#[derive(Debug)]
pub struct Summary {
    pub target_dir: PathBuf,
    pub data: SubstitutionData,
    pub package_manager: PackageManager,
    /// Files written by the render step
    pub files: Vec<PathBuf>,
    /// Steps that ran, in order
    pub steps: Vec<Step>,
}

/// Resolves the target directory against the base directory.
/// An absolute target is used as is.
pub fn resolve_target_dir(base_dir: &Path, target: Option<&Path>, slug: &str) -> PathBuf {
    match target {
        Some(target) => base_dir.join(target),
        None => base_dir.join(slug),
    }
}

/// Creates the target directory and, when it already has content, asks
/// whether to continue. Declining cancels the run.
pub fn prepare_target_dir(prompt: &dyn Prompter, target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir)?;
    if fs::read_dir(target_dir)?.next().is_none() {
        return Ok(());
    }
    let proceed = prompt.confirm(
        &format!(
            "The target directory '{}' is not empty, do you want to continue anyway?",
            target_dir.display()
        ),
        true,
    )?;
    if proceed {
        Ok(())
    } else {
        Err(Error::Cancelled)
    }
}

/// Renders the template tree into `target_dir`.
pub fn render_template(
    config: &Config,
    template_root: &Path,
    target_dir: &Path,
    data: &SubstitutionData,
) -> Result<Vec<PathBuf>> {
    let ignored = build_ignore_set(&config.ignored)?;
    let files = discover_files(template_root, &ignored)?;
    debug!("Found {} template files", files.len());

    let context = data.to_context()?;
    let engine = MiniJinjaRenderer::new();
    let paths = PathRenderer::new()?;
    Processor::new(&engine, &paths, template_root, target_dir, &context).render_all(&files)
}

fn remove_file_if_exists(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {
            debug!("Removed {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Removes README/CHANGELOG unless asked to keep them.
pub fn remove_optional_files(target_dir: &Path, with_readme: bool, with_changelog: bool) -> Result<()> {
    if !with_readme {
        remove_file_if_exists(&target_dir.join(README_FILE))?;
    }
    if !with_changelog {
        remove_file_if_exists(&target_dir.join(CHANGELOG_FILE))?;
    }
    Ok(())
}

/// The scaffolding pipeline and its collaborators.
pub struct Pipeline<'a> {
    config: &'a Config,
    prompt: &'a dyn Prompter,
    runner: &'a dyn CommandRunner,
    git: GitIdentity,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        config: &'a Config,
        prompt: &'a dyn Prompter,
        runner: &'a dyn CommandRunner,
        git: GitIdentity,
    ) -> Self {
        Self { config, prompt, runner, git }
    }

    fn step<T>(&self, steps: &mut Vec<Step>, step: Step, f: impl FnOnce() -> Result<T>) -> Result<T> {
        println!("- {step}");
        let value = f()?;
        steps.push(step);
        Ok(value)
    }

    /// Runs every step in order.
    ///
    /// # Errors
    /// * `Error::Cancelled` if a prompt is interrupted or the user declines to
    ///   write into a non-empty directory
    /// * Any error from a failing step; later steps do not run
    pub fn run(&self, mut options: CommandOptions) -> Result<Summary> {
        let mut steps = Vec::new();

        let slug = self.step(&mut steps, Step::CollectSlug, || {
            collect_slug(self.prompt, options.target.as_deref())
        })?;

        let target_dir =
            resolve_target_dir(&self.config.base_dir, options.target.as_deref(), &slug);
        options.target = Some(target_dir.clone());

        self.step(&mut steps, Step::PrepareTarget, || {
            prepare_target_dir(self.prompt, &target_dir)
        })?;

        let data = self.step(&mut steps, Step::CollectAnswers, || {
            collect_substitution_data(self.prompt, self.config, &slug, &options.answers, &self.git)
        })?;

        let package_manager = self.step(&mut steps, Step::ResolvePackageManager, || {
            Ok(PackageManager::resolve(options.package_manager, self.config.user_agent.as_deref()))
        })?;
        debug!("Using package manager {package_manager}");

        let source = options.source.as_deref().map(|source| self.config.base_dir.join(source));
        let template: AcquiredTemplate = self.step(&mut steps, Step::AcquireTemplate, || {
            load_template(source.as_deref(), self.config, &target_dir)
        })?;

        let files = self.step(&mut steps, Step::RenderTemplate, || {
            render_template(self.config, &template.root, &target_dir, &data)
        })?;

        self.step(&mut steps, Step::InstallDependencies, || {
            self.runner.run(&package_manager.install_command(&target_dir))
        })?;

        self.step(&mut steps, Step::Build, || {
            self.runner.run(&package_manager.run_script_command("build", &target_dir).quiet(true))
        })?;

        if let Some(download) = &template.cleanup {
            self.step(&mut steps, Step::RemoveDownload, || {
                fs::remove_dir_all(download).map_err(Error::from)
            })?;
        }

        self.step(&mut steps, Step::RemoveOptionalFiles, || {
            remove_optional_files(&target_dir, options.with_readme, options.with_changelog)
        })?;

        if options.example {
            self.step(&mut steps, Step::CreateExample, || {
                CommandExampleGenerator::new(self.runner, package_manager, &self.config.example)
                    .generate(&data, &target_dir)
            })?;
        }

        println!("Successfully created {} in {}", data.project.slug, target_dir.display());
        Ok(Summary { target_dir, data, package_manager, files, steps })
    }
}
