//! Import patching use-case: expand patterns, rewrite files, report.

use crate::domain::{Insertion, PatchError, SourceLines};
use crate::infra::app_config::PatchConfig;
use crate::infra::glob;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Outcome of patching one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Patched { path: PathBuf, line: usize },
    AlreadyPatched { path: PathBuf },
}

impl FileOutcome {
    pub fn path(&self) -> &Path {
        match self {
            FileOutcome::Patched { path, .. } | FileOutcome::AlreadyPatched { path } => path,
        }
    }
}

/// Summary of a patch run, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchReport {
    pub outcomes: Vec<FileOutcome>,
}

impl PatchReport {
    pub fn patched(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, FileOutcome::Patched { .. }))
            .count()
    }

    pub fn already_patched(&self) -> usize {
        self.outcomes.len() - self.patched()
    }
}

/// Insert the configured import line into one file.
///
/// The file is rewritten in full, and only when the line is not already in
/// place after the last anchor line.
pub fn patch_file(path: &Path, config: &PatchConfig) -> Result<FileOutcome, PatchError> {
    let text = std::fs::read_to_string(path).map_err(|source| PatchError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut lines = SourceLines::parse(&text);
    match lines.insert_after_anchor(config.import_line(), &config.anchor_prefix) {
        Insertion::AlreadyPresent { index } => {
            log::debug!("{} already patched at line {}", path.display(), index + 1);
            Ok(FileOutcome::AlreadyPatched {
                path: path.to_path_buf(),
            })
        }
        Insertion::Inserted { index } => {
            std::fs::write(path, lines.to_text()).map_err(|source| PatchError::Write {
                path: path.to_path_buf(),
                source,
            })?;
            Ok(FileOutcome::Patched {
                path: path.to_path_buf(),
                line: index,
            })
        }
    }
}

/// Patch every file matched by `patterns`, writing `Patched: <path>` to
/// `out` for each file that changed.
///
/// Every pattern is expanded before any file is touched, so an invalid
/// pattern leaves the tree unchanged. After that the run stops at the first
/// file error; files patched before it stay patched.
pub fn patch_patterns<S, W>(
    patterns: &[S],
    config: &PatchConfig,
    out: &mut W,
) -> anyhow::Result<PatchReport>
where
    S: AsRef<str>,
    W: Write,
{
    let mut matched = Vec::new();
    for pattern in patterns {
        let pattern = pattern.as_ref();
        let paths = glob::expand(pattern)?;
        if paths.is_empty() {
            log::debug!("Pattern '{pattern}' matched no files");
        }
        matched.extend(paths);
    }

    let mut report = PatchReport::default();
    for path in matched {
        let outcome = patch_file(&path, config)?;
        if let FileOutcome::Patched { path, .. } = &outcome {
            writeln!(out, "Patched: {}", path.display())?;
        }
        report.outcomes.push(outcome);
    }

    log::info!(
        "Patched {} file(s), {} already patched",
        report.patched(),
        report.already_patched()
    );
    Ok(report)
}
