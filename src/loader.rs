//! Template acquisition for create-native-module.
//! Handles both local filesystem templates and template packages published
//! to an npm-compatible registry.
use crate::config::Config;
use crate::constants::DOWNLOAD_WRAPPER_DIR;
use crate::error::{Error, Result};
use flate2::read::GzDecoder;
use log::debug;
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Represents the source location of a template.
#[derive(Debug)]
pub enum TemplateSource {
    /// Local filesystem template path
    FileSystem(PathBuf),
    /// Registry package name and dist-tag
    Registry { package: String, tag: String },
}

impl std::fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateSource::FileSystem(path) => {
                write!(f, "local path: '{}'", path.display())
            }
            TemplateSource::Registry { package, tag } => {
                write!(f, "registry package: '{package}@{tag}'")
            }
        }
    }
}

impl TemplateSource {
    /// Local path when one is given, the configured registry package otherwise.
    pub fn new(source: Option<&Path>, config: &Config) -> Self {
        match source {
            Some(path) => Self::FileSystem(path.to_path_buf()),
            None => Self::Registry {
                package: config.template_package.clone(),
                tag: dist_tag(config.prerelease).to_string(),
            },
        }
    }
}

/// `next` for pre-releases, `latest` otherwise.
pub fn dist_tag(prerelease: bool) -> &'static str {
    if prerelease {
        "next"
    } else {
        "latest"
    }
}

/// A template ready to be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquiredTemplate {
    /// Root of the raw template tree
    pub root: PathBuf,
    /// Transient directory to delete once rendering is done
    pub cleanup: Option<PathBuf>,
}

/// Trait for loading templates from different sources.
pub trait TemplateLoader {
    /// Produces a directory containing the raw template tree.
    fn load(&self) -> Result<AcquiredTemplate>;
}

/// Loader for templates from the local filesystem.
pub struct LocalLoader<P: AsRef<Path>> {
    path: P,
}

impl<P: AsRef<Path>> LocalLoader<P> {
    /// Creates a new LocalLoader instance.
    pub fn new(path: P) -> Self {
        Self { path }
    }
}

impl<P: AsRef<Path>> TemplateLoader for LocalLoader<P> {
    /// Uses the directory in place.
    ///
    /// # Errors
    /// * `Error::TemplateDoesNotExistError` if the path is not a directory
    fn load(&self) -> Result<AcquiredTemplate> {
        let path = self.path.as_ref();
        if !path.is_dir() {
            return Err(Error::TemplateDoesNotExistError {
                template_dir: path.display().to_string(),
            });
        }
        Ok(AcquiredTemplate { root: path.to_path_buf(), cleanup: None })
    }
}

#[derive(Debug, Deserialize)]
struct PackageMetadata {
    #[serde(rename = "dist-tags", default)]
    dist_tags: HashMap<String, String>,
    #[serde(default)]
    versions: HashMap<String, VersionMetadata>,
}

#[derive(Debug, Deserialize)]
struct VersionMetadata {
    dist: DistMetadata,
}

#[derive(Debug, Deserialize)]
struct DistMetadata {
    tarball: String,
}

/// URL of a package's metadata document. Scoped names keep their `@` and
/// have the `/` percent-encoded, as registries expect.
pub fn metadata_url(registry: &Url, package: &str) -> Result<Url> {
    registry
        .join(&package.replace('/', "%2f"))
        .map_err(|e| Error::RegistryError(format!("invalid package URL for '{package}': {e}")))
}

/// Picks the tarball URL for `tag` out of a package metadata document.
///
/// # Errors
/// * `Error::RegistryError` if the document is malformed, the tag is not
///   published or its version has no tarball
pub fn select_tarball_url(metadata: &str, package: &str, tag: &str) -> Result<Url> {
    let metadata: PackageMetadata = serde_json::from_str(metadata)
        .map_err(|e| Error::RegistryError(format!("malformed metadata for '{package}': {e}")))?;

    let version = metadata.dist_tags.get(tag).ok_or_else(|| {
        Error::RegistryError(format!("'{package}' has no '{tag}' dist-tag"))
    })?;
    let release = metadata.versions.get(version).ok_or_else(|| {
        Error::RegistryError(format!("'{package}@{version}' is not published"))
    })?;

    Url::parse(&release.dist.tarball).map_err(|e| {
        Error::RegistryError(format!("invalid tarball URL '{}': {e}", release.dist.tarball))
    })
}

/// Unpacks a gzipped tarball into `dest`.
pub fn extract_tarball<R: Read, P: AsRef<Path>>(tarball: R, dest: P) -> Result<()> {
    let dest = dest.as_ref();
    std::fs::create_dir_all(dest)?;
    let mut archive = tar::Archive::new(GzDecoder::new(tarball));
    archive.unpack(dest)?;
    Ok(())
}

/// Loader for template packages published to a registry.
pub struct RegistryLoader<'a> {
    client: reqwest::blocking::Client,
    registry: &'a Url,
    package: String,
    tag: String,
    /// Directory the tarball is extracted into
    dest: PathBuf,
}

impl<'a> RegistryLoader<'a> {
    /// Creates a loader extracting into `dest`.
    ///
    /// # Errors
    /// * `Error::ReqwestError` if the HTTP client cannot be built
    pub fn new<P: AsRef<Path>>(
        registry: &'a Url,
        package: impl Into<String>,
        tag: impl Into<String>,
        dest: P,
    ) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(30))
            .timeout(None::<Duration>)
            .build()?;
        Ok(Self {
            client,
            registry,
            package: package.into(),
            tag: tag.into(),
            dest: dest.as_ref().to_path_buf(),
        })
    }

    fn get(&self, url: Url) -> Result<reqwest::blocking::Response> {
        debug!("GET {url}");
        let response = self.client.get(url.clone()).send()?;
        if !response.status().is_success() {
            return Err(Error::RegistryError(format!(
                "request to {url} failed: HTTP {}",
                response.status()
            )));
        }
        Ok(response)
    }

    /// Looks up the tarball URL of the configured tag.
    pub fn resolve_tarball_url(&self) -> Result<Url> {
        let url = metadata_url(self.registry, &self.package)?;
        let metadata = self.get(url)?.text()?;
        select_tarball_url(&metadata, &self.package, &self.tag)
    }
}

impl TemplateLoader for RegistryLoader<'_> {
    /// Downloads the package tarball and extracts it beneath the destination.
    ///
    /// # Errors
    /// * `Error::ReqwestError` / `Error::RegistryError` on network or
    ///   registry failures
    /// * `Error::IoError` if extraction fails
    fn load(&self) -> Result<AcquiredTemplate> {
        let tarball_url = self.resolve_tarball_url()?;
        debug!("Downloading template from {tarball_url}");
        let response = self.get(tarball_url)?;
        extract_tarball(response, &self.dest)?;

        let wrapper = self.dest.join(DOWNLOAD_WRAPPER_DIR);
        if !wrapper.is_dir() {
            return Err(Error::TemplateError(format!(
                "tarball of '{}' has no '{}' directory",
                self.package, DOWNLOAD_WRAPPER_DIR
            )));
        }
        Ok(AcquiredTemplate { root: wrapper.clone(), cleanup: Some(wrapper) })
    }
}

/// Returns the template for this run, downloading it into `target_dir`
/// unless a local source is given.
pub fn load_template(
    source: Option<&Path>,
    config: &Config,
    target_dir: &Path,
) -> Result<AcquiredTemplate> {
    let template_source = TemplateSource::new(source, config);
    debug!("Using template from the {template_source}");

    let loader: Box<dyn TemplateLoader + '_> = match template_source {
        TemplateSource::FileSystem(path) => Box::new(LocalLoader::new(path)),
        TemplateSource::Registry { package, tag } => {
            Box::new(RegistryLoader::new(&config.registry, package, tag, target_dir)?)
        }
    };

    loader.load()
}
