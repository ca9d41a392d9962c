mod common;

use common::{
    create_template, pack_template, serve_registry, test_config, write, RecordingRunner,
    ScriptedPrompter,
};
use create_native_module::collector::{GitIdentity, PresetAnswers};
use create_native_module::error::Error;
use create_native_module::package_manager::PackageManager;
use create_native_module::pipeline::{
    prepare_target_dir, remove_optional_files, resolve_target_dir, CommandOptions, Pipeline, Step,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

fn options(target: &str, source: &Path) -> CommandOptions {
    CommandOptions {
        target: Some(PathBuf::from(target)),
        source: Some(source.to_path_buf()),
        answers: PresetAnswers {
            package: Some("com.acme.widget".to_string()),
            ..Default::default()
        },
        ..Default::default()
    }
}

#[test_log::test]
fn test_full_run_with_local_template() {
    let template = TempDir::new().unwrap();
    let base = TempDir::new().unwrap();
    create_template(template.path());

    let config = test_config(base.path());
    let prompt = ScriptedPrompter::new();
    let runner = RecordingRunner::default();
    let pipeline = Pipeline::new(&config, &prompt, &runner, GitIdentity::default());

    let summary = pipeline.run(options("widget", template.path())).unwrap();
    let target = base.path().join("widget");

    assert_eq!(summary.target_dir, target);
    assert_eq!(summary.package_manager, PackageManager::Npm);
    assert_eq!(
        summary.steps,
        vec![
            Step::CollectSlug,
            Step::PrepareTarget,
            Step::CollectAnswers,
            Step::ResolvePackageManager,
            Step::AcquireTemplate,
            Step::RenderTemplate,
            Step::InstallDependencies,
            Step::Build,
            Step::RemoveOptionalFiles,
            Step::CreateExample,
        ]
    );

    assert!(target.join("package.json").exists());
    assert!(target.join("com/acme/widget/index.ts").exists());
    assert!(!target.join("README.md").exists());
    assert!(!target.join("CHANGELOG.md").exists());
    // A local template is never removed.
    assert!(template.path().join("README.md").exists());

    // Empty target directory: no confirmation needed.
    assert_eq!(*prompt.confirmations.borrow(), 0);

    let commands = runner.commands.borrow();
    assert_eq!(commands.len(), 3);
    assert!(commands.iter().all(|command| command.cwd == target));
    assert_eq!(commands[0].args, vec!["install"]);
    assert_eq!(commands[1].args, vec!["run", "build"]);
    assert!(commands[1].quiet);
    assert!(commands[2].args.contains(&"create-expo-app".to_string()));
    assert!(commands[2].args.contains(&"example".to_string()));
}

#[test_log::test]
fn test_full_run_with_registry_template() {
    let staging = TempDir::new().unwrap();
    let base = TempDir::new().unwrap();
    create_template(staging.path());

    let mut config = test_config(base.path());
    config.registry = serve_registry(pack_template(staging.path(), "package"), Duration::ZERO);
    let prompt = ScriptedPrompter::new();
    let runner = RecordingRunner::default();
    let pipeline = Pipeline::new(&config, &prompt, &runner, GitIdentity::default());

    let mut options = options("widget", staging.path());
    options.source = None;
    let summary = pipeline.run(options).unwrap();
    let target = base.path().join("widget");

    let download = summary.steps.iter().position(|step| *step == Step::RemoveDownload);
    let build = summary.steps.iter().position(|step| *step == Step::Build);
    assert!(download.is_some());
    assert!(download > build);

    assert!(!target.join("package").exists());
    assert!(target.join("package.json").exists());
    assert!(target.join("com/acme/widget/index.ts").exists());
    assert_eq!(runner.commands.borrow().len(), 3);
}

#[test]
fn test_relative_source_resolves_against_base_dir() {
    let base = TempDir::new().unwrap();
    create_template(&base.path().join("tmpl"));

    let config = test_config(base.path());
    let prompt = ScriptedPrompter::new();
    let runner = RecordingRunner::default();
    let pipeline = Pipeline::new(&config, &prompt, &runner, GitIdentity::default());

    let summary = pipeline.run(options("widget", Path::new("tmpl"))).unwrap();

    assert!(summary.steps.contains(&Step::RenderTemplate));
    assert!(summary.target_dir.join("com/acme/widget/index.ts").exists());
    assert!(base.path().join("tmpl/README.md").exists());
}

#[test]
fn test_flags_keep_docs_and_skip_example() {
    let template = TempDir::new().unwrap();
    let base = TempDir::new().unwrap();
    create_template(template.path());

    let config = test_config(base.path());
    let prompt = ScriptedPrompter::new();
    let runner = RecordingRunner::default();
    let pipeline = Pipeline::new(&config, &prompt, &runner, GitIdentity::default());

    let mut options = options("widget", template.path());
    options.with_readme = true;
    options.with_changelog = true;
    options.example = false;
    options.package_manager = Some(PackageManager::Yarn);

    let summary = pipeline.run(options).unwrap();

    assert!(summary.target_dir.join("README.md").exists());
    assert!(summary.target_dir.join("CHANGELOG.md").exists());
    assert!(!summary.steps.contains(&Step::CreateExample));
    assert_eq!(runner.commands.borrow().len(), 2);
    assert!(runner.commands.borrow()[0].program.starts_with("yarn"));
}

#[test]
fn test_declined_confirmation_writes_nothing() {
    let template = TempDir::new().unwrap();
    let base = TempDir::new().unwrap();
    create_template(template.path());
    write(base.path(), "widget/existing.txt", "keep me\n");

    let config = test_config(base.path());
    let prompt = ScriptedPrompter::new().confirming(Some(false));
    let runner = RecordingRunner::default();
    let pipeline = Pipeline::new(&config, &prompt, &runner, GitIdentity::default());

    let result = pipeline.run(options("widget", template.path()));

    assert!(matches!(result, Err(Error::Cancelled)));
    assert_eq!(*prompt.confirmations.borrow(), 1);
    let entries: Vec<_> = fs::read_dir(base.path().join("widget")).unwrap().collect();
    assert_eq!(entries.len(), 1);
    assert!(runner.commands.borrow().is_empty());
}

#[test]
fn test_confirmed_non_empty_target_is_overwritten() {
    let template = TempDir::new().unwrap();
    let base = TempDir::new().unwrap();
    create_template(template.path());
    write(base.path(), "widget/package.json", "old\n");
    write(base.path(), "widget/unrelated.txt", "untouched\n");

    let config = test_config(base.path());
    let prompt = ScriptedPrompter::new();
    let runner = RecordingRunner::default();
    let pipeline = Pipeline::new(&config, &prompt, &runner, GitIdentity::default());

    pipeline.run(options("widget", template.path())).unwrap();

    let target = base.path().join("widget");
    assert_eq!(*prompt.confirmations.borrow(), 1);
    assert_ne!(fs::read_to_string(target.join("package.json")).unwrap(), "old\n");
    assert_eq!(fs::read_to_string(target.join("unrelated.txt")).unwrap(), "untouched\n");
}

#[test]
fn test_interrupted_prompt_cancels() {
    let base = TempDir::new().unwrap();
    write(base.path(), "widget/existing.txt", "x");

    let prompt = ScriptedPrompter::new().confirming(None);
    let result = prepare_target_dir(&prompt, &base.path().join("widget"));
    assert!(matches!(result, Err(Error::Cancelled)));
}

#[test]
fn test_missing_source_aborts_before_install() {
    let base = TempDir::new().unwrap();
    let config = test_config(base.path());
    let prompt = ScriptedPrompter::new();
    let runner = RecordingRunner::default();
    let pipeline = Pipeline::new(&config, &prompt, &runner, GitIdentity::default());

    let missing = base.path().join("no-template");
    let result = pipeline.run(options("widget", &missing));

    assert!(matches!(result, Err(Error::TemplateDoesNotExistError { .. })));
    assert!(runner.commands.borrow().is_empty());
}

#[cfg(unix)]
#[test]
fn test_resolve_target_dir() {
    let base = Path::new("/work");
    assert_eq!(resolve_target_dir(base, None, "widget"), PathBuf::from("/work/widget"));
    assert_eq!(
        resolve_target_dir(base, Some(Path::new("modules/widget")), "widget"),
        PathBuf::from("/work/modules/widget")
    );
    assert_eq!(
        resolve_target_dir(base, Some(Path::new("/elsewhere/widget")), "widget"),
        PathBuf::from("/elsewhere/widget")
    );
}

#[test]
fn test_remove_optional_files_tolerates_missing() {
    let target = TempDir::new().unwrap();
    write(target.path(), "README.md", "# readme\n");

    remove_optional_files(target.path(), false, false).unwrap();
    assert!(!target.path().join("README.md").exists());
}
