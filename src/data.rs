//! Substitution data consumed by the renderer, plus the validation and
//! default-value rules applied while collecting it.

use crate::constants::{LICENSE, PROJECT_VERSION};
use crate::error::{Error, Result};
use cruet::Inflector;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// npm package names: optional scope, lowercase URL-safe characters,
/// not starting with `.` or `_`.
static SLUG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:@[a-z0-9\-*~][a-z0-9\-*._~]*/)?[a-z0-9\-~][a-z0-9\-._~]*$")
        .expect("slug pattern is valid")
});

/// Dot-separated identifiers such as `expo.modules.widget`.
static PACKAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z_][A-Za-z0-9_]*)*$")
        .expect("package pattern is valid")
});

const MAX_SLUG_LENGTH: usize = 214;

/// The `project` section of the rendering context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectData {
    pub slug: String,
    pub name: String,
    pub version: String,
    pub description: String,
    pub package: String,
}

/// Values substituted into template paths and contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubstitutionData {
    pub project: ProjectData,
    pub author: String,
    pub license: String,
    pub repo: String,
}

/// Author fields as collected from the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Author {
    pub name: String,
    pub email: String,
    pub url: String,
}

impl Author {
    /// Formats the author the way package manifests expect:
    /// `Name <email> (url)`, leaving out empty parts.
    pub fn format(&self) -> String {
        let mut author = self.name.trim().to_string();
        if !self.email.trim().is_empty() {
            author.push_str(&format!(" <{}>", self.email.trim()));
        }
        if !self.url.trim().is_empty() {
            author.push_str(&format!(" ({})", self.url.trim()));
        }
        author.trim().to_string()
    }
}

impl SubstitutionData {
    pub fn new(
        slug: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        package: impl Into<String>,
        author: &Author,
        repo: impl Into<String>,
    ) -> Self {
        Self {
            project: ProjectData {
                slug: slug.into(),
                name: name.into(),
                version: PROJECT_VERSION.to_string(),
                description: description.into(),
                package: package.into(),
            },
            author: author.format(),
            license: LICENSE.to_string(),
            repo: repo.into(),
        }
    }

    /// Serializes the data into the context handed to the renderers.
    pub fn to_context(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self).map_err(|e| Error::TemplateError(e.to_string()))
    }
}

/// Validates a project slug against npm package-name rules.
pub fn validate_slug(slug: &str) -> std::result::Result<(), String> {
    if slug.is_empty() {
        return Err("The package name cannot be empty".to_string());
    }
    if slug.len() > MAX_SLUG_LENGTH {
        return Err(format!("The package name cannot exceed {MAX_SLUG_LENGTH} characters"));
    }
    if slug.trim() != slug {
        return Err("The package name cannot contain leading or trailing spaces".to_string());
    }
    if slug.to_lowercase() != slug {
        return Err("The package name cannot contain capital letters".to_string());
    }
    if !SLUG_RE.is_match(slug) {
        return Err(format!("'{slug}' is not a valid package name"));
    }
    Ok(())
}

/// Validates a dot-separated package identifier.
pub fn validate_package(package: &str) -> std::result::Result<(), String> {
    if PACKAGE_RE.is_match(package) {
        Ok(())
    } else {
        Err(format!("'{package}' is not a valid package identifier"))
    }
}

/// Final path component of a possibly scoped slug.
fn unscoped(slug: &str) -> &str {
    slug.rsplit('/').next().unwrap_or(slug)
}

/// Default module name: `my-module` becomes `MyModule`.
pub fn default_name(slug: &str) -> String {
    unscoped(slug).to_pascal_case()
}

/// Default package identifier: `{prefix}.{slug letters and digits}`.
pub fn default_package(prefix: &str, slug: &str) -> String {
    let suffix: String = unscoped(slug)
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase();
    if prefix.is_empty() {
        suffix
    } else {
        format!("{prefix}.{suffix}")
    }
}

/// Default repository URL, derived from the author's profile URL.
pub fn default_repo(author_url: &str, slug: &str) -> String {
    let author_url = author_url.trim().trim_end_matches('/');
    if author_url.is_empty() {
        String::new()
    } else {
        format!("{author_url}/{}", unscoped(slug))
    }
}
