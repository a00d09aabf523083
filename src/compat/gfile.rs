//! Legacy `tf.gfile` translator.
//!
//! TF1 exposed capitalised file helpers (`Exists`, `MkDir`, ...) where TF2's
//! `tf.io.gfile` uses lower-case or renamed functions.

use crate::domain::{ApiSurface, ResolveError, Symbol};
use std::sync::Arc;

/// Legacy `tf.gfile` names and their `tf.io.gfile` replacements.
pub const GFILE_RENAMES: &[(&str, &str)] = &[
    ("Exists", "exists"),
    ("Open", "GFile"),
    ("MkDir", "makedirs"),
    ("MakeDirs", "makedirs"),
    ("Remove", "remove"),
    ("Rename", "rename"),
    ("Copy", "copy"),
    ("Glob", "glob"),
    ("IsDirectory", "isdir"),
    ("ListDirectory", "listdir"),
    ("Walk", "walk"),
    ("Stat", "stat"),
    ("DeleteRecursively", "rmtree"),
    ("FastGFile", "GFile"),
];

/// Modern name a legacy `tf.gfile` attribute maps to.
///
/// Table entries win; any other name starting with an uppercase letter is
/// lower-cased as a whole, everything else passes through unchanged.
pub fn translate(name: &str) -> String {
    if let Some((_, modern)) = GFILE_RENAMES.iter().find(|(legacy, _)| *legacy == name) {
        return (*modern).to_string();
    }

    if name.chars().next().is_some_and(char::is_uppercase) {
        name.to_lowercase()
    } else {
        name.to_string()
    }
}

/// Proxy that resolves legacy `tf.gfile` names against `tf.io.gfile`.
///
/// Every lookup goes to the target surface; nothing is cached.
#[derive(Clone)]
pub struct GFileTranslator {
    path: String,
    target: Arc<dyn ApiSurface>,
}

impl GFileTranslator {
    pub fn new(path: impl Into<String>, target: Arc<dyn ApiSurface>) -> Self {
        Self {
            path: path.into(),
            target,
        }
    }
}

impl ApiSurface for GFileTranslator {
    fn path(&self) -> &str {
        &self.path
    }

    fn resolve(&self, name: &str) -> Result<Symbol, ResolveError> {
        let modern = translate(name);
        log::debug!("{}.{} -> {}.{}", self.path, name, self.target.path(), modern);
        self.target.resolve(&modern)
    }

    /// Legacy names from the table that the target can actually serve.
    fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = GFILE_RENAMES
            .iter()
            .filter(|(_, modern)| self.target.has(modern))
            .map(|(legacy, _)| (*legacy).to_string())
            .collect();
        names.sort();
        names
    }
}
