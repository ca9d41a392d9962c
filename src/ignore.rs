//! Ignored template entries.
//! Every configured name is matched as a path component at any depth, so
//! `node_modules` excludes both `node_modules/` and `ios/node_modules/`.

use crate::error::Result;
use globset::{Glob, GlobSet, GlobSetBuilder};
use log::debug;
use std::path::Path;

/// Compiles ignored names (or glob patterns) into a set matched against
/// paths relative to the template root.
///
/// # Arguments
/// * `names` - Entries such as `.DS_Store` or `*.log`
///
/// # Errors
/// * `Error::GlobSetError` if an entry is not a valid glob
///
/// # Example
/// ```
/// use create_native_module::ignore::build_ignore_set;
///
/// let set = build_ignore_set(&["build"]).unwrap();
/// assert!(set.is_match("build"));
/// assert!(set.is_match("android/build"));
/// assert!(!set.is_match("android/build.gradle"));
/// ```
pub fn build_ignore_set<S: AsRef<str>>(names: &[S]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for name in names {
        let name = name.as_ref().trim_matches('/');
        if name.is_empty() {
            continue;
        }
        debug!("Ignoring '{name}' at any depth");
        builder.add(Glob::new(&format!("**/{name}"))?);
    }
    Ok(builder.build()?)
}

/// Returns true if the relative path of an entry is ignored.
pub fn is_ignored<P: AsRef<Path>>(ignored: &GlobSet, relative_path: P) -> bool {
    ignored.is_match(relative_path.as_ref())
}
