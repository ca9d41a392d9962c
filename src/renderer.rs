//! Template rendering for create-native-module.
//! File contents are rendered with MiniJinja's default `{{ }}` delimiters.
//! Template paths use `{ }` variable delimiters and an escape function that
//! turns dots in substituted values into path separators, so a package
//! identifier such as `com.example` becomes the nested directories
//! `com/example`.
use crate::error::Result;
use minijinja::syntax::SyntaxConfig;
use minijinja::{Environment, ErrorKind};
use std::fmt::Write as _;
use std::path::MAIN_SEPARATOR_STR;

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders a template string with the given context.
    ///
    /// # Arguments
    /// * `template` - Template string to render
    /// * `context` - Context variables for rendering
    ///
    /// # Returns
    /// * `Result<String>` - Rendered template string
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String>;
}

fn render_with(
    env: &Environment<'static>,
    template: &str,
    context: &serde_json::Value,
) -> Result<String> {
    let mut env = env.clone();
    env.add_template_owned("temp", template.to_string())?;
    let tmpl = env.get_template("temp")?;
    Ok(tmpl.render(context)?)
}

/// MiniJinja-based renderer for file contents.
pub struct MiniJinjaRenderer {
    /// MiniJinja environment instance
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates a new renderer with the default environment.
    pub fn new() -> Self {
        let mut env = Environment::new();
        // Source files must come out with their final newline intact.
        env.set_keep_trailing_newline(true);
        Self { env }
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        MiniJinjaRenderer::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    /// Renders file content using MiniJinja.
    ///
    /// # Errors
    /// * `Error::MinijinjaError` if the template cannot be parsed or rendered
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String> {
        render_with(&self.env, template, context)
    }
}

/// Replaces every `.` in a substituted value with the platform path separator.
pub fn escape_path_value(value: &str) -> String {
    value.replace('.', MAIN_SEPARATOR_STR)
}

/// Renderer for template paths.
pub struct PathRenderer {
    env: Environment<'static>,
}

impl PathRenderer {
    /// Creates a renderer using `{`/`}` as variable delimiters.
    ///
    /// # Errors
    /// * `Error::MinijinjaError` if the syntax configuration is rejected
    pub fn new() -> Result<Self> {
        let syntax = SyntaxConfig::builder()
            .block_delimiters("{%", "%}")
            .variable_delimiters("{", "}")
            .comment_delimiters("{#", "#}")
            .build()?;

        let mut env = Environment::new();
        env.set_syntax(syntax);
        env.set_formatter(|out, _state, value| {
            if value.is_undefined() || value.is_none() {
                return Ok(());
            }
            let rendered = match value.as_str() {
                Some(s) => escape_path_value(s),
                None => escape_path_value(&value.to_string()),
            };
            out.write_str(&rendered).map_err(|_| {
                minijinja::Error::new(ErrorKind::WriteFailure, "cannot write rendered path")
            })
        });
        Ok(Self { env })
    }

    /// Strips one leading `$` marker and renders the remaining path.
    pub fn render_path(&self, relative_path: &str, context: &serde_json::Value) -> Result<String> {
        let path = relative_path
            .strip_prefix(crate::constants::TEMPLATE_PATH_MARKER)
            .unwrap_or(relative_path);
        self.render(path, context)
    }
}

impl TemplateRenderer for PathRenderer {
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String> {
        render_with(&self.env, template, context)
    }
}
