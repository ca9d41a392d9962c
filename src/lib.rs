//! create-native-module scaffolds native mobile modules.
//! It collects project details, fetches the module template, renders it into
//! the target directory and prepares the result with the package manager.

/// Command-line interface module
pub mod cli;

/// Project slug and substitution field collection
pub mod collector;

/// External command execution
pub mod command;

/// Runtime configuration
pub mod config;

pub mod constants;

/// Substitution data and input validation
pub mod data;

/// Error types and handling
pub mod error;

/// Example application scaffolding
pub mod example;

/// Names excluded from template processing
pub mod ignore;

/// Template acquisition from local paths or a package registry
pub mod loader;

pub mod logger;

/// Package manager detection and commands
pub mod package_manager;

/// Ordered scaffolding steps
pub mod pipeline;

/// Template tree processing
pub mod processor;

/// User input and interaction handling
pub mod prompt;

/// Path and content renderers
pub mod renderer;
