//! Dictionary-inspection utilities backing the `riscv-opcodes-tools` binary.
//!
//! Each function here corresponds to one of the standalone scripts the
//! original project shipped alongside its main parser
//! (`original_source/print_opcodes.py`, `search_op.py`,
//! `count_extensions.py`, `opcode_frequencies.py`, `list_combinations.py`):
//! small, single-purpose scans over the same extension-file tree, kept
//! separate from the canonical dictionary builder because they answer
//! ad hoc questions rather than producing the dictionary itself.

use std::collections::BTreeMap;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use serde::Serialize;

use crate::error::{OpcodesError, Result};

/// Walks every file directly under `root` and `root/unratified`, in sorted
/// filename order, yielding `(file_name, lines)` pairs of already
/// comment/blank-stripped content.
fn walk_extension_files(root: &Path) -> Result<Vec<(String, Vec<String>)>> {
    let mut dirs = vec![root.to_path_buf()];
    let unratified = root.join("unratified");
    if unratified.is_dir() {
        dirs.push(unratified);
    }

    let mut out = Vec::new();
    for dir in dirs {
        let mut names: Vec<_> = std::fs::read_dir(&dir)
            .map_err(|e| OpcodesError::Io {
                path: dir.display().to_string(),
                message: e.to_string(),
            })?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .map(|entry| entry.path())
            .collect();
        names.sort();

        for path in names {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            let lines = crate::reader::read_lines(&path)?;
            out.push((name, lines));
        }
    }
    Ok(out)
}

/// `list`: every mnemonic across `root`, sorted case-insensitively, with
/// `$pseudo_op` declarations excluded (`original_source/print_opcodes.py`).
pub fn list_opcodes(root: &Path) -> Result<Vec<String>> {
    let mut opcodes = std::collections::BTreeSet::new();
    for (_, lines) in walk_extension_files(root)? {
        for line in lines {
            let Some(first) = line.split_whitespace().next() else {
                continue;
            };
            if first.starts_with("$pseudo_op") || first.starts_with("$import") {
                continue;
            }
            opcodes.insert(first.to_string());
        }
    }
    let mut sorted: Vec<String> = opcodes.into_iter().collect();
    sorted.sort_by_key(|s| s.to_lowercase());
    Ok(sorted)
}

/// One match from `search` (`original_source/search_op.py`).
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SearchHit {
    pub file: String,
    pub line: usize,
    pub text: String,
}

/// `search`: every non-blank, non-comment line across `root` whose text
/// matches `query`, treated literally unless `use_regex` is set.
pub fn search(root: &Path, query: &str, ignore_case: bool, use_regex: bool) -> Result<Vec<SearchHit>> {
    let pattern = if use_regex {
        query.to_string()
    } else {
        regex::escape(query)
    };
    let regex = RegexBuilder::new(&pattern)
        .case_insensitive(ignore_case)
        .build()
        .map_err(|e| OpcodesError::MalformedTable {
            path: "<query>".to_string(),
            message: e.to_string(),
        })?;

    let mut hits = Vec::new();
    for (file, lines) in walk_extension_files(root)? {
        for (idx, line) in lines.iter().enumerate() {
            if regex.is_match(line) {
                hits.push(SearchHit {
                    file: file.clone(),
                    line: idx + 1,
                    text: line.clone(),
                });
            }
        }
    }
    Ok(hits)
}

/// `count-extensions`: number of non-pseudo instruction lines per extension
/// file (`original_source/count_extensions.py`).
pub fn count_extensions(root: &Path) -> Result<BTreeMap<String, usize>> {
    let mut counts = BTreeMap::new();
    for (file, lines) in walk_extension_files(root)? {
        let count = lines
            .iter()
            .filter(|line| !line.starts_with("$pseudo_op"))
            .count();
        if count > 0 {
            counts.insert(file, count);
        }
    }
    Ok(counts)
}

static OPCODE_FIELD: Lazy<Regex> = Lazy::new(|| Regex::new(r"6\.\.2\s*=\s*([\w.xX]+)").unwrap());

/// `frequencies`: mnemonics grouped by their `6..2=` opcode field value
/// (`original_source/opcode_frequencies.py`).
pub fn opcode_frequencies(root: &Path) -> Result<BTreeMap<String, Vec<String>>> {
    let mut freq: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (_, lines) in walk_extension_files(root)? {
        for line in lines {
            if line.starts_with("$pseudo_op") {
                continue;
            }
            let Some(mnemonic) = line.split_whitespace().next() else {
                continue;
            };
            let Some(caps) = OPCODE_FIELD.captures(&line) else {
                continue;
            };
            let opcode = caps[1].to_string();
            let entry = freq.entry(opcode).or_default();
            if !entry.iter().any(|m| m == mnemonic) {
                entry.push(mnemonic.to_string());
            }
        }
    }
    for mnems in freq.values_mut() {
        mnems.sort();
    }
    Ok(freq)
}

static FUNCT7_FIELD: Lazy<Regex> = Lazy::new(|| Regex::new(r"31\.\.25\s*=\s*([\w.xX]+)").unwrap());
static FUNCT3_FIELD: Lazy<Regex> = Lazy::new(|| Regex::new(r"14\.\.12\s*=\s*([\w.xX]+)").unwrap());

/// One `(opcode, funct3, funct7)` combination (`original_source/list_combinations.py`).
#[derive(Debug, Clone, Serialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct FieldCombination {
    pub opcode: String,
    pub funct3: String,
    pub funct7: String,
}

/// `combinations`: unique `(opcode, funct3, funct7)` triplets per extension
/// file, sorted.
pub fn list_combinations(root: &Path) -> Result<BTreeMap<String, Vec<FieldCombination>>> {
    let mut result = BTreeMap::new();
    for (file, lines) in walk_extension_files(root)? {
        let mut combos = std::collections::BTreeSet::new();
        for line in &lines {
            if line.starts_with("$pseudo_op") {
                continue;
            }
            let opcode = OPCODE_FIELD
                .captures(line)
                .map(|c| c[1].to_string())
                .unwrap_or_default();
            let funct3 = FUNCT3_FIELD
                .captures(line)
                .map(|c| c[1].to_string())
                .unwrap_or_default();
            let funct7 = FUNCT7_FIELD
                .captures(line)
                .map(|c| c[1].to_string())
                .unwrap_or_default();
            if opcode.is_empty() && funct3.is_empty() && funct7.is_empty() {
                continue;
            }
            combos.insert(FieldCombination {
                opcode,
                funct3,
                funct7,
            });
        }
        if !combos.is_empty() {
            result.insert(file, combos.into_iter().collect());
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn list_excludes_pseudo_ops_and_sorts_case_insensitively() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("rv32_i"),
            "Beqz rd 1=1\n$pseudo_op rv32_i::addi nop 1=1\naddi rd 1=1\n",
        )
        .unwrap();
        let opcodes = list_opcodes(dir.path()).unwrap();
        assert_eq!(opcodes, vec!["addi".to_string(), "Beqz".to_string()]);
    }

    #[test]
    fn search_supports_literal_and_regex_queries() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("rv32_i"), "lw rd rs1 imm12\nsw rs1 rs2 imm12\n").unwrap();

        let literal = search(dir.path(), "lw", false, false).unwrap();
        assert_eq!(literal.len(), 1);
        assert_eq!(literal[0].file, "rv32_i");

        let regex_hits = search(dir.path(), "^[ls]w", true, true).unwrap();
        assert_eq!(regex_hits.len(), 2);
    }

    #[test]
    fn count_extensions_ignores_pseudo_ops() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("rv32_i"),
            "addi rd 1=1\n$pseudo_op rv32_i::addi nop 1=1\nslli rd 1=1\n",
        )
        .unwrap();
        let counts = count_extensions(dir.path()).unwrap();
        assert_eq!(counts["rv32_i"], 2);
    }

    #[test]
    fn frequencies_groups_by_opcode_field() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("rv32_i"),
            "lui rd imm20 6..2=0x0D 1=1 0=1\nauipc rd imm20 6..2=0x05 1=1 0=1\njal rd jimm20 6..2=0x1B 1=1 0=1\n",
        )
        .unwrap();
        let freq = opcode_frequencies(dir.path()).unwrap();
        assert_eq!(freq["0x0D"], vec!["lui".to_string()]);
        assert_eq!(freq.len(), 3);
    }

    #[test]
    fn combinations_collects_unique_triplets() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("rv32_m"),
            "mul rd rs1 rs2 31..25=1 14..12=0 6..2=0x0C 1..0=3\ndiv rd rs1 rs2 31..25=1 14..12=4 6..2=0x0C 1..0=3\n",
        )
        .unwrap();
        let combos = list_combinations(dir.path()).unwrap();
        assert_eq!(combos["rv32_m"].len(), 2);
    }
}
