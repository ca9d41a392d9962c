//! Input collection: the project slug and the substitution fields, taken
//! from command flags when supplied and asked for otherwise.

use crate::config::Config;
use crate::constants::{DEFAULT_DESCRIPTION, DEFAULT_SLUG};
use crate::data::{
    default_name, default_package, default_repo, validate_package, validate_slug, Author,
    SubstitutionData,
};
use crate::error::{Error, Result};
use crate::prompt::{Prompter, Question};
use log::debug;
use std::path::Path;

/// Answers supplied up front on the command line.
#[derive(Debug, Clone, Default)]
pub struct PresetAnswers {
    pub name: Option<String>,
    pub description: Option<String>,
    pub package: Option<String>,
    pub author_name: Option<String>,
    pub author_email: Option<String>,
    pub author_url: Option<String>,
    pub repo: Option<String>,
}

/// Author defaults read from the user's git configuration.
#[derive(Debug, Clone, Default)]
pub struct GitIdentity {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl GitIdentity {
    /// Reads `user.name` and `user.email` from the default git configuration.
    /// Missing configuration yields empty defaults.
    pub fn from_git_config() -> Self {
        match git2::Config::open_default() {
            Ok(config) => Self {
                name: config.get_string("user.name").ok(),
                email: config.get_string("user.email").ok(),
            },
            Err(e) => {
                debug!("Git configuration unavailable: {e}");
                Self::default()
            }
        }
    }
}

/// Resolves the project slug.
///
/// The final component of the positional target is used when it is a valid
/// slug; otherwise the user is asked, with that component (or `my-module`)
/// as the default.
pub fn collect_slug(prompt: &dyn Prompter, target: Option<&Path>) -> Result<String> {
    let from_target = target
        .and_then(|path| path.file_name())
        .and_then(|name| name.to_str())
        .map(str::to_string);

    if let Some(slug) = &from_target {
        if validate_slug(slug).is_ok() {
            debug!("Using slug '{slug}' from the target path");
            return Ok(slug.clone());
        }
    }

    let default = from_target
        .map(|name| name.to_lowercase())
        .filter(|name| validate_slug(name).is_ok())
        .unwrap_or_else(|| DEFAULT_SLUG.to_string());
    let question = Question::new("slug", "What is the name of the npm package?", default)
        .with_validator(validate_slug);
    prompt.input(&question)
}

fn answer_or_ask(
    prompt: &dyn Prompter,
    preset: Option<&String>,
    question: Question,
) -> Result<String> {
    match preset {
        Some(value) => {
            if let Some(validate) = question.validate {
                validate(value).map_err(Error::ValidationError)?;
            }
            Ok(value.clone())
        }
        None => prompt.input(&question),
    }
}

/// Collects the remaining substitution fields, skipping any supplied in
/// `preset`.
pub fn collect_substitution_data(
    prompt: &dyn Prompter,
    config: &Config,
    slug: &str,
    preset: &PresetAnswers,
    git: &GitIdentity,
) -> Result<SubstitutionData> {
    let name = answer_or_ask(
        prompt,
        preset.name.as_ref(),
        Question::new("name", "What is the native module name?", default_name(slug)),
    )?;
    let description = answer_or_ask(
        prompt,
        preset.description.as_ref(),
        Question::new("description", "How would you describe the module?", DEFAULT_DESCRIPTION),
    )?;
    let package = answer_or_ask(
        prompt,
        preset.package.as_ref(),
        Question::new(
            "package",
            "What is the Android package name?",
            default_package(&config.package_prefix, slug),
        )
        .with_validator(validate_package),
    )?;

    let author = Author {
        name: answer_or_ask(
            prompt,
            preset.author_name.as_ref(),
            Question::new(
                "author_name",
                "What is the name of the package author?",
                git.name.clone().unwrap_or_default(),
            ),
        )?,
        email: answer_or_ask(
            prompt,
            preset.author_email.as_ref(),
            Question::new(
                "author_email",
                "What is the email address of the author?",
                git.email.clone().unwrap_or_default(),
            ),
        )?,
        url: answer_or_ask(
            prompt,
            preset.author_url.as_ref(),
            Question::new("author_url", "What is the URL to the author's profile?", ""),
        )?,
    };

    let repo = answer_or_ask(
        prompt,
        preset.repo.as_ref(),
        Question::new(
            "repo",
            "What is the URL for the repository?",
            default_repo(&author.url, slug),
        ),
    )?;

    Ok(SubstitutionData::new(slug, name, description, package, &author, repo))
}
