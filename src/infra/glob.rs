//! Shell-style glob expansion against the filesystem.
//!
//! Patterns follow the usual glob rules: wildcards never cross a `/`, only
//! `**` recurses, and names starting with `.` are only matched by pattern
//! components that start with `.` themselves. Like `fnmatch`, a `[` without
//! a closing `]` and the braces `{` `}` are plain characters.

use crate::domain::PatchError;
use globset::{GlobBuilder, GlobMatcher};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

const GLOB_META: &[char] = &['*', '?', '['];

/// One wildcard component of a pattern.
enum Segment {
    /// `**`: zero or more directories, none of them hidden.
    Recursive,
    Name {
        matcher: GlobMatcher,
        allows_hidden: bool,
    },
}

impl Segment {
    fn parse(component: &str, pattern: &str) -> Result<Self, PatchError> {
        if component == "**" {
            return Ok(Segment::Recursive);
        }

        let matcher = GlobBuilder::new(&escape_component(component))
            .literal_separator(true)
            .backslash_escape(false)
            .build()
            .map_err(|source| PatchError::Pattern {
                pattern: pattern.to_string(),
                source,
            })?
            .compile_matcher();

        Ok(Segment::Name {
            matcher,
            allows_hidden: component.starts_with('.'),
        })
    }
}

/// A pattern split at its first wildcard component.
struct PatternParts {
    /// Literal directory prefix, empty when the pattern starts with a wildcard.
    base: String,
    /// Components from the first wildcard on; empty for a literal path.
    segments: Vec<Segment>,
}

impl PatternParts {
    fn split(pattern: &str) -> Result<Self, PatchError> {
        let components: Vec<&str> = pattern.split('/').collect();
        let Some(first_wild) = components.iter().position(|c| c.contains(GLOB_META)) else {
            return Ok(Self {
                base: pattern.to_string(),
                segments: Vec::new(),
            });
        };

        let segments = components[first_wild..]
            .iter()
            .filter(|c| !c.is_empty())
            .map(|c| Segment::parse(c, pattern))
            .collect::<Result<Vec<_>, _>>()?;

        let mut base = components[..first_wild].join("/");
        if base.is_empty() && pattern.starts_with('/') {
            base = "/".to_string();
        }

        Ok(Self { base, segments })
    }

    fn literal(&self) -> bool {
        self.segments.is_empty()
    }

    fn recursive(&self) -> bool {
        self.segments
            .iter()
            .any(|s| matches!(s, Segment::Recursive))
    }

    fn walk_root(&self) -> PathBuf {
        if self.base.is_empty() {
            PathBuf::from(".")
        } else {
            PathBuf::from(&self.base)
        }
    }
}

/// Expand `pattern` into the regular files it matches.
///
/// Siblings come back sorted by file name. A pattern without matches yields
/// an empty list; an unreadable directory on the way is skipped.
pub fn expand(pattern: &str) -> Result<Vec<PathBuf>, PatchError> {
    let pattern = collapse_separators(pattern);
    let pattern = pattern.as_str();
    let parts = PatternParts::split(pattern)?;

    if parts.literal() {
        let path = PathBuf::from(pattern);
        return Ok(if path.is_file() { vec![path] } else { Vec::new() });
    }

    // A trailing `/` only selects directories, which are never patched.
    if pattern.len() > 1 && pattern.ends_with('/') {
        return Ok(Vec::new());
    }

    let root = parts.walk_root();
    if !root.is_dir() {
        log::debug!("No directory {} for pattern '{pattern}'", root.display());
        return Ok(Vec::new());
    }

    let mut builder = WalkBuilder::new(&root);
    builder
        .standard_filters(false)
        .follow_links(true)
        .sort_by_file_name(|a, b| a.cmp(b));
    if !parts.recursive() {
        builder.max_depth(Some(parts.segments.len()));
    }

    let mut matches = Vec::new();
    for entry in builder.build() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                log::warn!("Skipping unreadable entry while expanding '{pattern}': {err}");
                continue;
            }
        };

        if entry.depth() == 0 || !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }

        let names = relative_names(entry.path(), &root);
        let names: Vec<&str> = names.iter().map(String::as_str).collect();
        if !matches_segments(&parts.segments, &names) {
            continue;
        }

        let path = if parts.base.is_empty() {
            entry.path().strip_prefix(".").unwrap_or(entry.path())
        } else {
            entry.path()
        };
        matches.push(path.to_path_buf());
    }

    log::debug!("Pattern '{pattern}' matched {} file(s)", matches.len());
    Ok(matches)
}

/// Whether the path components below the walk root satisfy `segments`.
fn matches_segments(segments: &[Segment], names: &[&str]) -> bool {
    let Some((segment, rest)) = segments.split_first() else {
        return names.is_empty();
    };

    match segment {
        Segment::Recursive => {
            for skip in 0..=names.len() {
                if matches_segments(rest, &names[skip..]) {
                    return true;
                }
                if names.get(skip).is_some_and(|name| name.starts_with('.')) {
                    return false;
                }
            }
            false
        }
        Segment::Name {
            matcher,
            allows_hidden,
        } => {
            let Some((name, tail)) = names.split_first() else {
                return false;
            };
            if name.starts_with('.') && !allows_hidden {
                return false;
            }
            matcher.is_match(name) && matches_segments(rest, tail)
        }
    }
}

fn relative_names(path: &Path, root: &Path) -> Vec<String> {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect()
}

fn collapse_separators(pattern: &str) -> String {
    let mut collapsed = String::with_capacity(pattern.len());
    for ch in pattern.chars() {
        if ch == '/' && collapsed.ends_with('/') {
            continue;
        }
        collapsed.push(ch);
    }
    collapsed
}

/// Rewrite one component so globset reads it the way `fnmatch` does.
fn escape_component(component: &str) -> String {
    let chars: Vec<char> = component.chars().collect();
    let mut escaped = String::with_capacity(component.len());
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '[' => match class_end(&chars, i) {
                Some(end) => {
                    escaped.extend(&chars[i..=end]);
                    i = end + 1;
                    continue;
                }
                None => escaped.push_str("[[]"),
            },
            '{' => escaped.push_str("[{]"),
            '}' => escaped.push_str("[}]"),
            ch => escaped.push(ch),
        }
        i += 1;
    }

    escaped
}

/// Index of the `]` closing the class opened at `open`, if any.
fn class_end(chars: &[char], open: usize) -> Option<usize> {
    let mut j = open + 1;
    if chars.get(j) == Some(&'!') {
        j += 1;
    }
    if chars.get(j) == Some(&']') {
        j += 1;
    }
    while j < chars.len() && chars[j] != ']' {
        j += 1;
    }
    (j < chars.len()).then_some(j)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "x = 1\n").unwrap();
    }

    fn names(root: &Path, paths: Vec<PathBuf>) -> Vec<String> {
        paths
            .into_iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().into_owned())
            .collect()
    }

    fn fixture() -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        for rel in ["b.py", "a.py", ".hidden.py", "notes.txt", "sub/c.py", "sub/deep/d.py"] {
            touch(dir.path(), rel);
        }
        dir
    }

    #[test]
    fn star_does_not_recurse() {
        let dir = fixture();
        let pattern = format!("{}/*.py", dir.path().display());
        let found = expand(&pattern).unwrap();
        assert_eq!(names(dir.path(), found), vec!["a.py", "b.py"]);
    }

    #[test]
    fn nested_wildcard_matches_one_level() {
        let dir = fixture();
        let pattern = format!("{}/*/*.py", dir.path().display());
        let found = expand(&pattern).unwrap();
        assert_eq!(names(dir.path(), found), vec!["sub/c.py"]);
    }

    #[test]
    fn double_star_recurses() {
        let dir = fixture();
        let pattern = format!("{}/**/*.py", dir.path().display());
        let found = expand(&pattern).unwrap();
        assert_eq!(
            names(dir.path(), found),
            vec!["a.py", "b.py", "sub/c.py", "sub/deep/d.py"]
        );
    }

    #[test]
    fn double_star_skips_hidden_directories() {
        let dir = fixture();
        touch(dir.path(), ".git/hooks/x.py");
        let pattern = format!("{}/**/*.py", dir.path().display());
        let found = names(dir.path(), expand(&pattern).unwrap());
        assert!(!found.iter().any(|n| n.starts_with(".git")));
    }

    #[test]
    fn dot_pattern_matches_hidden_files() {
        let dir = fixture();
        let pattern = format!("{}/.*.py", dir.path().display());
        let found = expand(&pattern).unwrap();
        assert_eq!(names(dir.path(), found), vec![".hidden.py"]);
    }

    #[test]
    fn hidden_rule_applies_per_component() {
        let dir = tempdir().unwrap();
        touch(dir.path(), ".cfg/.x.py");
        touch(dir.path(), "pkg/.x.py");

        let pattern = format!("{}/*/.x.py", dir.path().display());
        let found = expand(&pattern).unwrap();
        assert_eq!(names(dir.path(), found), vec!["pkg/.x.py"]);

        let pattern = format!("{}/.*/.x.py", dir.path().display());
        let found = expand(&pattern).unwrap();
        assert_eq!(names(dir.path(), found), vec![".cfg/.x.py"]);
    }

    #[test]
    fn repeated_separators_are_collapsed() {
        let dir = fixture();
        let pattern = format!("{}//*.py", dir.path().display());
        let found = expand(&pattern).unwrap();
        assert_eq!(names(dir.path(), found), vec!["a.py", "b.py"]);

        let pattern = format!("{}//sub///*.py", dir.path().display());
        let found = expand(&pattern).unwrap();
        assert_eq!(names(dir.path(), found), vec!["sub/c.py"]);
    }

    #[test]
    fn trailing_separator_matches_no_files() {
        let dir = fixture();
        let pattern = format!("{}/*/", dir.path().display());
        assert!(expand(&pattern).unwrap().is_empty());
    }

    #[test]
    fn unclosed_bracket_is_literal() {
        let dir = fixture();
        touch(dir.path(), "foo[.py");
        let pattern = format!("{}/foo[.py", dir.path().display());
        let found = expand(&pattern).unwrap();
        assert_eq!(names(dir.path(), found), vec!["foo[.py"]);

        let pattern = format!("{}/*[.py", dir.path().display());
        let found = expand(&pattern).unwrap();
        assert_eq!(names(dir.path(), found), vec!["foo[.py"]);
    }

    #[test]
    fn braces_are_literal() {
        let dir = fixture();
        touch(dir.path(), "{a,b}.py");
        let pattern = format!("{}/{{a,b}}*", dir.path().display());
        let found = expand(&pattern).unwrap();
        assert_eq!(names(dir.path(), found), vec!["{a,b}.py"]);
    }

    #[test]
    fn character_classes_still_work() {
        let dir = fixture();
        let pattern = format!("{}/[ab].py", dir.path().display());
        let found = expand(&pattern).unwrap();
        assert_eq!(names(dir.path(), found), vec!["a.py", "b.py"]);

        let pattern = format!("{}/[!a].py", dir.path().display());
        let found = expand(&pattern).unwrap();
        assert_eq!(names(dir.path(), found), vec!["b.py"]);
    }

    #[test]
    fn literal_path_matches_existing_file_only() {
        let dir = fixture();
        let existing = dir.path().join("notes.txt");
        let pattern = existing.to_string_lossy().into_owned();
        assert_eq!(expand(&pattern).unwrap(), vec![existing]);

        let missing = dir.path().join("missing.py");
        assert!(expand(&missing.to_string_lossy()).unwrap().is_empty());

        let directory = dir.path().join("sub");
        assert!(expand(&directory.to_string_lossy()).unwrap().is_empty());
    }

    #[test]
    fn no_match_is_not_an_error() {
        let dir = fixture();
        let pattern = format!("{}/*.rs", dir.path().display());
        assert!(expand(&pattern).unwrap().is_empty());

        let pattern = format!("{}/nowhere/*.py", dir.path().display());
        assert!(expand(&pattern).unwrap().is_empty());
    }

    #[test]
    fn invalid_range_is_reported() {
        let dir = fixture();
        let pattern = format!("{}/[z-a].py", dir.path().display());
        let err = expand(&pattern).unwrap_err();
        assert!(matches!(err, PatchError::Pattern { .. }));
    }

    #[test]
    fn escapes_components_like_fnmatch() {
        assert_eq!(escape_component("foo[.py"), "foo[[].py");
        assert_eq!(escape_component("[ab]*.py"), "[ab]*.py");
        assert_eq!(escape_component("[]a]"), "[]a]");
        assert_eq!(escape_component("{x}"), "[{]x[}]");
        assert_eq!(collapse_separators("a//b///c"), "a/b/c");
    }

    #[test]
    fn splits_relative_and_absolute_patterns() {
        let parts = PatternParts::split("*.py").unwrap();
        assert_eq!(parts.base, "");
        assert_eq!(parts.segments.len(), 1);
        assert_eq!(parts.walk_root(), PathBuf::from("."));

        let parts = PatternParts::split("/*.py").unwrap();
        assert_eq!(parts.base, "/");

        let parts = PatternParts::split("models/official/**/*.py").unwrap();
        assert_eq!(parts.base, "models/official");
        assert!(parts.recursive());

        let parts = PatternParts::split("models/train.py").unwrap();
        assert!(parts.literal());
    }
}
