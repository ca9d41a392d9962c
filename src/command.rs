//! External command execution.
//! Commands block until the child exits; a non-zero status is an error.

use crate::error::{Error, Result};
use log::debug;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// A command line to run in a working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    /// Discard the child's standard output
    pub quiet: bool,
}

impl CommandSpec {
    pub fn new<P: AsRef<Path>>(program: impl Into<String>, cwd: P) -> Self {
        Self { program: program.into(), args: Vec::new(), cwd: cwd.as_ref().to_path_buf(), quiet: false }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }
}

impl std::fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Trait for running external commands.
pub trait CommandRunner {
    fn run(&self, command: &CommandSpec) -> Result<()>;
}

/// Runs commands as child processes of this one.
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, command: &CommandSpec) -> Result<()> {
        debug!("Running `{}` in {}", command, command.cwd.display());

        let status = Command::new(&command.program)
            .args(&command.args)
            .current_dir(&command.cwd)
            .stdin(Stdio::inherit())
            .stdout(if command.quiet { Stdio::null() } else { Stdio::inherit() })
            .stderr(Stdio::inherit())
            .status()?;

        if !status.success() {
            return Err(Error::CommandError { command: command.to_string(), status });
        }
        Ok(())
    }
}
