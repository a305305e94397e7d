//! Static lookup tables: `arg_lut`, the overlap allow-lists, and the CSR /
//! trap-cause name tables (`spec.md` §2 C1, §6.3).
//!
//! Everything here is loaded once from CSV files under the extensions root
//! and is otherwise read-only; the one exception is `ArgLut`, which grows
//! when a source line installs an `alias=canonical` mapping (`spec.md` §4.3).

use std::collections::HashMap;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{OpcodesError, Result};

/// Bit range `(msb, lsb)`, `0 <= lsb <= msb <= 31`.
pub type ArgSpec = (u8, u8);

/// Pairs of extension/instruction names whose encodings are allowed to
/// overlap within the same base ISA (`spec.md` §4.4).
pub const OVERLAPPING_EXTENSIONS: &[(&str, &str)] = &[
    ("rv_zcmt", "rv_c_d"),
    ("rv_zcmp", "rv_c_d"),
    ("rv_c", "rv_zcmop"),
];

pub const OVERLAPPING_INSTRUCTIONS: &[(&str, &str)] = &[
    ("c_addi", "c_nop"),
    ("c_lui", "c_addi16sp"),
    ("c_mv", "c_jr"),
    ("c_jalr", "c_ebreak"),
    ("c_add", "c_ebreak"),
    ("c_add", "c_jalr"),
];

/// Checks the symmetric relation `(a, b) ∈ pairs ∨ (b, a) ∈ pairs`.
pub fn pair_allowed(pairs: &[(&str, &str)], a: &str, b: &str) -> bool {
    pairs
        .iter()
        .any(|&(x, y)| (x == a && y == b) || (x == b && y == a))
}

pub fn extension_overlap_allowed(a: &str, b: &str) -> bool {
    pair_allowed(OVERLAPPING_EXTENSIONS, a, b)
}

pub fn instruction_overlap_allowed(a: &str, b: &str) -> bool {
    pair_allowed(OVERLAPPING_INSTRUCTIONS, a, b)
}

/// Pseudo-ops that downstream emitters list even though pseudo-ops are
/// normally treated as aliases of their base instruction. Carried over from
/// `original_source/constants.py`'s `emitted_pseudo_ops`.
pub const DEFAULT_INCLUDE_PSEUDO_OPS: &[&str] = &[
    "pause",
    "prefetch_i",
    "prefetch_r",
    "prefetch_w",
    "rstsa16",
    "rstsa32",
    "zext_h_rv32",
    "rev8_h_rv32",
    "rori_rv32",
];

/// Argument name → bit range, with room to grow via `alias=canonical`
/// installs (`spec.md` §4.3). A plain owned map threaded by `&mut` through
/// the loader, rather than a process-global, per `spec.md` §9/§5: aliases
/// installed while parsing one file must still be visible to later files in
/// the same run, but the table itself is not a `static mut`.
#[derive(Debug, Clone, Default)]
pub struct ArgLut {
    fields: HashMap<String, ArgSpec>,
}

impl ArgLut {
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<ArgSpec> {
        self.fields.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Installs `alias` with the same bit range as `canonical`. Returns an
    /// error if `canonical` isn't already known.
    pub fn install_alias(&mut self, alias: &str, canonical: &str) -> Result<()> {
        let spec = self.get(canonical).ok_or_else(|| OpcodesError::UnknownArg {
            mnemonic: String::new(),
            arg: canonical.to_string(),
        })?;
        self.fields.insert(alias.to_string(), spec);
        Ok(())
    }

    pub fn insert(&mut self, name: impl Into<String>, spec: ArgSpec) {
        self.fields.insert(name.into(), spec);
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Loads `arg_lut.csv`: rows of `name,msb,lsb`. Also installs the `mop`
    /// field aliases the original tool hardcodes alongside the CSV-sourced
    /// table (`original_source/constants.py`).
    pub fn load(path: &Path) -> Result<Self> {
        let mut lut = Self::new();
        for (lineno, row) in read_csv_rows(path)? {
            if row.len() < 3 {
                return Err(OpcodesError::MalformedTable {
                    path: path.display().to_string(),
                    message: format!("line {lineno}: expected 3 columns, got {}", row.len()),
                });
            }
            let msb = parse_u8(&row[1], path, lineno)?;
            let lsb = parse_u8(&row[2], path, lineno)?;
            lut.insert(row[0].trim().to_string(), (msb, lsb));
        }

        lut.insert("mop_r_t_30", (30, 30));
        lut.insert("mop_r_t_27_26", (27, 26));
        lut.insert("mop_r_t_21_20", (21, 20));
        lut.insert("mop_rr_t_30", (30, 30));
        lut.insert("mop_rr_t_27_26", (27, 26));
        lut.insert("c_mop_t", (10, 8));

        Ok(lut)
    }
}

/// A `(number, name)` table: CSR registers or trap cause codes
/// (`spec.md` §6.3).
pub fn load_int_name_table(path: &Path) -> Result<Vec<(u32, String)>> {
    let mut out = Vec::new();
    for (lineno, row) in read_csv_rows(path)? {
        if row.len() < 2 {
            return Err(OpcodesError::MalformedTable {
                path: path.display().to_string(),
                message: format!("line {lineno}: expected 2 columns, got {}", row.len()),
            });
        }
        let number = parse_u32(&row[0], path, lineno)?;
        out.push((number, row[1].trim().to_string()));
    }
    Ok(out)
}

/// The four CSV-sourced static tables, loaded once at startup.
pub struct StaticTables {
    pub arg_lut: ArgLut,
    pub causes: Vec<(u32, String)>,
    pub csrs: Vec<(u32, String)>,
    pub csrs32: Vec<(u32, String)>,
}

impl StaticTables {
    pub fn load(root: &Path) -> Result<Self> {
        Ok(Self {
            arg_lut: ArgLut::load(&root.join("arg_lut.csv"))?,
            causes: load_int_name_table(&root.join("causes.csv"))?,
            csrs: load_int_name_table(&root.join("csrs.csv"))?,
            csrs32: load_int_name_table(&root.join("csrs32.csv"))?,
        })
    }
}

/// Reads non-blank lines of a CSV file as `skipinitialspace`d, unquoted
/// comma-separated fields — the CSVs this crate consumes never need real
/// quoting (`name,msb,lsb` / `number,name`), so a hand comma-split mirrors
/// `original_source/constants.py`'s `csv.reader(f, skipinitialspace=True)`
/// without pulling in a general CSV dialect parser.
fn read_csv_rows(path: &Path) -> Result<Vec<(usize, Vec<String>)>> {
    let text = std::fs::read_to_string(path).map_err(|e| OpcodesError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    Ok(text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            let row = line.split(',').map(|field| field.trim().to_string()).collect();
            (i + 1, row)
        })
        .collect())
}

fn parse_u8(field: &str, path: &Path, lineno: usize) -> Result<u8> {
    parse_int(field, path, lineno).and_then(|v| {
        u8::try_from(v).map_err(|_| OpcodesError::MalformedTable {
            path: path.display().to_string(),
            message: format!("line {lineno}: {v} does not fit in a bit index"),
        })
    })
}

fn parse_u32(field: &str, path: &Path, lineno: usize) -> Result<u32> {
    parse_int(field, path, lineno).and_then(|v| {
        u32::try_from(v).map_err(|_| OpcodesError::MalformedTable {
            path: path.display().to_string(),
            message: format!("line {lineno}: {v} does not fit in a u32"),
        })
    })
}

/// Parses a decimal, `0x`, or `0b` integer literal.
fn parse_int(field: &str, path: &Path, lineno: usize) -> Result<u64> {
    let field = field.trim();
    let result = if let Some(hex) = field.strip_prefix("0x").or_else(|| field.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16)
    } else if let Some(bin) = field.strip_prefix("0b").or_else(|| field.strip_prefix("0B")) {
        u64::from_str_radix(bin, 2)
    } else {
        field.parse::<u64>()
    };
    result.map_err(|e| OpcodesError::MalformedTable {
        path: path.display().to_string(),
        message: format!("line {lineno}: '{field}' is not an integer literal ({e})"),
    })
}

/// Matches a `MSB..LSB=VAL` token.
pub static RANGE_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<msb>\d+)\.\.(?P<lsb>\d+)=(?P<val>[0-9A-Za-z]+)$").unwrap());

/// Matches a `POS=VAL` token (POS numeric, to disambiguate from an
/// `alias=canonical` argument token where the left side is an identifier).
pub static SINGLE_BIT_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<pos>\d+)=(?P<val>[0-9A-Za-z]+)$").unwrap());

/// Matches an `alias=canonical` argument token.
pub static ALIAS_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<alias>[A-Za-z_][\w]*)=(?P<canonical>[A-Za-z_][\w]*)$").unwrap());

/// Matches a `$pseudo_op DEPFILE::DEPINST PSEUDO_NAME ENCODING...` line.
pub static PSEUDO_OP_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\$pseudo_op\s+(?P<file>\S+)::\s*(?P<orig>\S+)\s+(?P<rest>.+)$").unwrap()
});

/// Matches a `$import EXTFILE::INSTNAME` line.
pub static IMPORT_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\$import\s*(?P<file>\S+)\s*::\s*(?P<name>\S+)$").unwrap());
