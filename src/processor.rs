//! Template tree processing.
//! Walks the template root, resolves destination paths and renders file
//! contents into the target directory.

use globset::GlobSet;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::ignore::is_ignored;
use crate::renderer::{PathRenderer, TemplateRenderer};

/// What happens to a single template file.
#[derive(Debug, PartialEq, Eq)]
pub enum FileOperation {
    /// Rendered text content
    Write { target: PathBuf, content: String },
    /// Content that is not UTF-8 text, copied as is
    Copy { target: PathBuf },
}

/// Result of processing one template file.
#[derive(Debug)]
pub struct ProcessResult {
    pub source: PathBuf,
    pub operation: FileOperation,
}

/// Lists template files as `/`-separated paths relative to `template_root`.
///
/// Entries matching `ignored` are skipped; ignored directories are not
/// descended into. The listing is sorted by file name.
pub fn discover_files<P: AsRef<Path>>(template_root: P, ignored: &GlobSet) -> Result<Vec<String>> {
    let template_root = template_root.as_ref();
    let mut files = Vec::new();

    let walker = WalkDir::new(template_root).sort_by_file_name().into_iter().filter_entry(|entry| {
        match entry.path().strip_prefix(template_root) {
            Ok(relative) if relative.as_os_str().is_empty() => true,
            Ok(relative) => {
                let skip = is_ignored(ignored, relative);
                if skip {
                    debug!("Skipping ignored entry: {}", relative.display());
                }
                !skip
            }
            Err(_) => true,
        }
    });

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(template_root)
            .map_err(|e| Error::TemplateError(e.to_string()))?;
        let relative = relative.to_str().ok_or_else(|| {
            Error::TemplateError(format!("Invalid path: {}", relative.display()))
        })?;
        files.push(relative.replace('\\', "/"));
    }

    Ok(files)
}

fn write_file(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

/// Renders template files into the output directory.
pub struct Processor<'a> {
    /// Renderer for file contents
    engine: &'a dyn TemplateRenderer,
    /// Renderer for relative paths
    paths: &'a PathRenderer,
    template_root: PathBuf,
    output_root: PathBuf,
    context: &'a serde_json::Value,
}

impl<'a> Processor<'a> {
    pub fn new<S: AsRef<Path>, T: AsRef<Path>>(
        engine: &'a dyn TemplateRenderer,
        paths: &'a PathRenderer,
        template_root: S,
        output_root: T,
        context: &'a serde_json::Value,
    ) -> Self {
        Self {
            engine,
            paths,
            template_root: template_root.as_ref().to_path_buf(),
            output_root: output_root.as_ref().to_path_buf(),
            context,
        }
    }

    /// Computes the destination of a template file.
    ///
    /// # Errors
    /// * `Error::TemplateError` if the rendered path is empty or escapes the
    ///   output directory
    pub fn resolve_target(&self, relative_path: &str) -> Result<PathBuf> {
        let rendered = self.paths.render_path(relative_path, self.context)?;
        if !is_rendered_path_valid(&rendered) {
            return Err(Error::TemplateError(format!(
                "'{relative_path}' renders to invalid path '{rendered}'"
            )));
        }
        Ok(self.output_root.join(rendered))
    }

    /// Decides what to do with one template file without touching the output.
    pub fn process(&self, relative_path: &str) -> Result<ProcessResult> {
        let source = self.template_root.join(relative_path);
        let target = self.resolve_target(relative_path)?;
        let bytes = fs::read(&source)?;

        let operation = match String::from_utf8(bytes) {
            Ok(text) => {
                let content = self.engine.render(&text, self.context)?;
                FileOperation::Write { target, content }
            }
            Err(_) => {
                debug!("Copying binary file: {relative_path}");
                FileOperation::Copy { target }
            }
        };

        Ok(ProcessResult { source, operation })
    }

    /// Renders every file and writes the results, returning the written paths.
    pub fn render_all(&self, files: &[String]) -> Result<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(files.len());
        for relative_path in files {
            let result = self.process(relative_path)?;
            let target = match result.operation {
                FileOperation::Write { target, content } => {
                    write_file(&target, content.as_bytes())?;
                    target
                }
                FileOperation::Copy { target } => {
                    if let Some(parent) = target.parent() {
                        fs::create_dir_all(parent)?;
                    }
                    fs::copy(&result.source, &target)?;
                    target
                }
            };
            debug!("Rendered '{}' to '{}'", relative_path, target.display());
            written.push(target);
        }
        Ok(written)
    }
}

/// Checks that a rendered relative path is usable as a destination.
///
/// Rejects empty paths, absolute paths, empty segments and `..` segments.
pub fn is_rendered_path_valid(path: &str) -> bool {
    if path.trim().is_empty() || path.starts_with('/') || path.starts_with('\\') {
        return false;
    }
    path.split(['/', '\\']).all(|segment| !segment.is_empty() && segment != "..")
}
