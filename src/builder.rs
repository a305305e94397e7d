//! Dictionary builder (`spec.md` §4.4, C4): the three-pass loader.
//!
//! Pass 1 admits standard instructions and enforces the cross-instruction
//! overlap rule; pass 2 resolves `$pseudo_op` references; pass 3 resolves
//! `$import` references. All three passes walk the same resolved file list,
//! in the same order, because pass 2's admission decision depends on
//! whether pass 1 already installed the dependency (`spec.md` §9).

use std::path::{Path, PathBuf};

use crate::error::{OpcodesError, Result};
use crate::fileset::resolve_files;
use crate::instruction::{base_isa, overlaps, same_base_isa, Dictionary};
use crate::parser::parse_line;
use crate::reader::read_lines;
use crate::tables::{
    extension_overlap_allowed, instruction_overlap_allowed, ArgLut, IMPORT_LINE, PSEUDO_OP_LINE,
};

/// Options controlling how pseudo-ops are admitted (`spec.md` §4.4 pass 2).
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Admit every pseudo-op regardless of whether its dependency is
    /// already loaded (`-pseudo` on the CLI).
    pub include_pseudo: bool,
    /// Admit these specific pseudo-ops even when `include_pseudo` is false.
    pub include_pseudo_ops: Vec<String>,
}

/// Builds the canonical dictionary from the extension files selected by
/// `patterns`, relative to `extensions_root`.
pub fn create_inst_dict(
    extensions_root: &Path,
    patterns: &[String],
    options: &BuildOptions,
    arg_lut: &mut ArgLut,
) -> Result<Dictionary> {
    let files = resolve_files(extensions_root, patterns)?;
    let mut dict = Dictionary::new();

    for file in &files {
        let ext_name = basename(file);
        let lines = read_lines(file)?;
        process_standard_instructions(&lines, &ext_name, arg_lut, &mut dict)?;
    }

    for file in &files {
        let ext_name = basename(file);
        let lines = read_lines(file)?;
        process_pseudo_instructions(&lines, &ext_name, extensions_root, options, arg_lut, &mut dict)?;
    }

    for file in &files {
        let ext_name = basename(file);
        let lines = read_lines(file)?;
        process_imported_instructions(&lines, &ext_name, extensions_root, arg_lut, &mut dict)?;
    }

    Ok(dict)
}

fn basename(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Pass 1: standard instructions (`spec.md` §4.4 "Pass 1").
fn process_standard_instructions(
    lines: &[String],
    ext_name: &str,
    arg_lut: &mut ArgLut,
    dict: &mut Dictionary,
) -> Result<()> {
    for line in lines {
        if line.contains("$import") || line.contains("$pseudo") {
            continue;
        }
        let (name, new_inst) = parse_line(line, ext_name, arg_lut)?;

        if let Some(existing) = dict.get(&name) {
            if same_base_isa(ext_name, &existing.extensions) {
                return Err(OpcodesError::DuplicateSameBase {
                    mnemonic: name,
                    extension: ext_name.to_string(),
                    existing: existing.extensions.join(","),
                });
            }
            if existing.encoding != new_inst.encoding {
                return Err(OpcodesError::EncodingConflict {
                    mnemonic: name,
                    extension: ext_name.to_string(),
                });
            }
            dict.get_mut(&name).unwrap().add_extension(ext_name);
        } else {
            for (other_name, other) in dict.iter() {
                let extension_pair_allowed = other
                    .extensions
                    .iter()
                    .any(|e| extension_overlap_allowed(ext_name, e));
                if overlaps(&new_inst.encoding, &other.encoding)
                    && !extension_pair_allowed
                    && !instruction_overlap_allowed(&name, other_name)
                    && same_base_isa(ext_name, &other.extensions)
                {
                    return Err(OpcodesError::CrossInstructionOverlap {
                        mnemonic: name,
                        extension: ext_name.to_string(),
                        other: other_name.clone(),
                        other_extension: other.extensions.join(","),
                    });
                }
            }
            dict.insert(name, new_inst);
        }
    }
    Ok(())
}

/// Pass 2: `$pseudo_op` declarations (`spec.md` §4.4 "Pass 2").
fn process_pseudo_instructions(
    lines: &[String],
    ext_name: &str,
    extensions_root: &Path,
    options: &BuildOptions,
    arg_lut: &mut ArgLut,
    dict: &mut Dictionary,
) -> Result<()> {
    for line in lines {
        let Some(caps) = PSEUDO_OP_LINE.captures(line) else {
            continue;
        };
        let dep_file = caps["file"].to_string();
        let dep_inst = caps["orig"].to_string();
        let encoding_line = caps["rest"].trim();

        let dep_path = find_extension_file(&dep_file, extensions_root, ext_name)?;
        let dep_lines = read_lines(&dep_path)?;
        if !dep_lines
            .iter()
            .any(|l| first_token(l) == dep_inst.as_str())
        {
            return Err(OpcodesError::MissingDependencyInstruction {
                instruction: dep_inst,
                file: dep_file,
                referrer: ext_name.to_string(),
            });
        }

        let (name, new_inst) = parse_line(encoding_line, ext_name, arg_lut)?;

        let dep_key = dep_inst.replace('.', "_");
        let admit = !dict.contains_key(&dep_key)
            || options.include_pseudo
            || options.include_pseudo_ops.iter().any(|op| op == &name);
        if !admit {
            continue;
        }

        match dict.get_mut(&name) {
            None => {
                dict.insert(name, new_inst);
            }
            Some(existing) => {
                if existing.match_bits != new_inst.match_bits {
                    dict.insert(format!("{name}_pseudo"), new_inst);
                } else {
                    existing.add_extension(ext_name);
                }
            }
        }
    }
    Ok(())
}

/// Pass 3: `$import` references (`spec.md` §4.4 "Pass 3").
fn process_imported_instructions(
    lines: &[String],
    ext_name: &str,
    extensions_root: &Path,
    arg_lut: &mut ArgLut,
    dict: &mut Dictionary,
) -> Result<()> {
    for line in lines {
        let Some(caps) = IMPORT_LINE.captures(line) else {
            continue;
        };
        let import_ext = caps["file"].to_string();
        let import_inst = caps["name"].to_string();

        let import_path = find_extension_file(&import_ext, extensions_root, ext_name)?;
        let import_lines = read_lines(&import_path)?;
        let Some(source_line) = import_lines
            .iter()
            .find(|l| first_token(l) == import_inst.as_str())
        else {
            return Err(OpcodesError::MissingDependencyInstruction {
                instruction: import_inst,
                file: import_ext,
                referrer: ext_name.to_string(),
            });
        };

        let (name, new_inst) = parse_line(source_line, ext_name, arg_lut)?;
        if let Some(existing) = dict.get(&name) {
            if existing.encoding != new_inst.encoding {
                return Err(OpcodesError::EncodingConflict {
                    mnemonic: name,
                    extension: ext_name.to_string(),
                });
            }
            dict.get_mut(&name).unwrap().add_extension(ext_name);
        } else {
            dict.insert(name, new_inst);
        }
    }
    Ok(())
}

fn first_token(line: &str) -> &str {
    line.split_whitespace().next().unwrap_or("")
}

/// Locates an extension file, checking `extensions/` then
/// `extensions/unratified/` (`spec.md` §4.4, §6.2).
fn find_extension_file(name: &str, extensions_root: &Path, referrer: &str) -> Result<PathBuf> {
    let main = extensions_root.join(name);
    if main.is_file() {
        return Ok(main);
    }
    let unratified = extensions_root.join("unratified").join(name);
    if unratified.is_file() {
        return Ok(unratified);
    }
    Err(OpcodesError::MissingDependencyFile {
        file: name.to_string(),
        referrer: referrer.to_string(),
    })
}

/// Also exposes `base_isa` for callers that group instructions by ISA
/// without re-deriving the prefix rule.
pub fn base_isa_of(extension_file: &str) -> &str {
    base_isa(extension_file)
}
