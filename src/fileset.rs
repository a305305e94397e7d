//! Deterministic glob expansion over the extensions directory
//! (`spec.md` §4.4: "Glob expansion is deterministic (lexicographic
//! descending per pattern; patterns concatenated in input order)").
//!
//! Patterns only ever need `*`/`?` wildcards against plain filenames (with
//! an optional `unratified/` directory component), so this translates a
//! glob into an anchored regex rather than pulling in a full glob crate.

use std::path::{Path, PathBuf};

use regex::Regex;

use crate::error::{OpcodesError, Result};

/// Expands each pattern (relative to `root`) into the files it selects,
/// sorted in reverse lexicographic order within the pattern, then
/// concatenates the per-pattern results in the order the patterns were
/// given.
pub fn resolve_files(root: &Path, patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    for pattern in patterns {
        out.extend(expand_pattern(root, pattern)?);
    }
    Ok(out)
}

fn expand_pattern(root: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let (dir_part, file_pattern) = match pattern.rsplit_once('/') {
        Some((dir, file)) => (dir, file),
        None => ("", pattern),
    };
    let dir = if dir_part.is_empty() {
        root.to_path_buf()
    } else {
        root.join(dir_part)
    };

    let regex = glob_to_regex(file_pattern);
    let mut matches: Vec<PathBuf> = std::fs::read_dir(&dir)
        .map_err(|e| OpcodesError::Io {
            path: dir.display().to_string(),
            message: e.to_string(),
        })?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .map(|name| regex.is_match(name))
                .unwrap_or(false)
        })
        .map(|entry| entry.path())
        .collect();

    matches.sort_by(|a, b| b.file_name().cmp(&a.file_name()));
    Ok(matches)
}

const REGEX_METACHARS: &str = r".+()[]{}|^$\";

fn glob_to_regex(pattern: &str) -> Regex {
    let mut re = String::from("^");
    for c in pattern.chars() {
        match c {
            '*' => re.push_str(".*"),
            '?' => re.push('.'),
            _ if REGEX_METACHARS.contains(c) => {
                re.push('\\');
                re.push(c);
            }
            _ => re.push(c),
        }
    }
    re.push('$');
    Regex::new(&re).expect("glob-derived regex is always well-formed")
}
