//! File reader (`spec.md` §4.2, C3): strips comments and blank lines.

use std::path::Path;

use crate::error::{OpcodesError, Result};

/// Reads `path` and returns every line whose trimmed content is non-empty
/// and does not start with `#`. Blank/comment stripping is identical for
/// all three builder passes (`spec.md` §4.2).
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path).map_err(|e| OpcodesError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    Ok(text
        .lines()
        .map(|line| line.trim_end().to_string())
        .filter(|line| {
            let trimmed = line.trim_start();
            !trimmed.is_empty() && !trimmed.starts_with('#')
        })
        .collect())
}
