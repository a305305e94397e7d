//! The `Instruction` record and the operations defined directly on an
//! encoding string (`spec.md` §3).

use std::collections::BTreeMap;

/// One instruction, as admitted into the dictionary.
///
/// `encoding` is always 32 characters over `{'0','1','-'}`; position 0 is
/// bit 31, position 31 is bit 0 (`spec.md` §3, §9 "hard-coded width 32").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub name: String,
    pub encoding: String,
    pub variable_fields: Vec<String>,
    pub extensions: Vec<String>,
    pub match_bits: u32,
    pub mask: u32,
}

/// The canonical dictionary: mnemonic → `Instruction`. A `BTreeMap` keeps
/// iteration in mnemonic order for free, which is the sort `spec.md` §4.4's
/// "post-pass ordering" requires before emission.
pub type Dictionary = BTreeMap<String, Instruction>;

impl Instruction {
    /// Builds an `Instruction` from a completed 32-character tri-state
    /// encoding, deriving `match`/`mask` from it.
    pub fn from_encoding(
        name: impl Into<String>,
        encoding: [char; 32],
        variable_fields: Vec<String>,
        extension: impl Into<String>,
    ) -> Self {
        let (match_bits, mask) = match_and_mask(&encoding);
        Self {
            name: name.into(),
            encoding: encoding.iter().collect(),
            variable_fields,
            extensions: vec![extension.into()],
            match_bits,
            mask,
        }
    }

    /// Adds `extension` to this instruction's extension list if not already
    /// present, preserving first-seen order (mirrors
    /// `instr_dict[name]['extension'].extend(...)` deduplication implied by
    /// the pass logic in `original_source/shared_utils.py`).
    pub fn add_extension(&mut self, extension: impl Into<String>) {
        let extension = extension.into();
        if !self.extensions.contains(&extension) {
            self.extensions.push(extension);
        }
    }
}

/// Computes `(match, mask)` from a 32-character tri-state encoding.
pub fn match_and_mask(encoding: &[char; 32]) -> (u32, u32) {
    let mut match_bits: u32 = 0;
    let mut mask: u32 = 0;
    for &c in encoding.iter() {
        match_bits <<= 1;
        mask <<= 1;
        match c {
            '1' => {
                match_bits |= 1;
                mask |= 1;
            }
            '0' => {
                mask |= 1;
            }
            _ => {}
        }
    }
    (match_bits, mask)
}

/// Two 32-character encodings overlap iff at every bit position they are
/// either equal or at least one is `-` (`spec.md` §4.4).
pub fn overlaps(a: &str, b: &str) -> bool {
    a.chars()
        .zip(b.chars())
        .all(|(x, y)| x == '-' || y == '-' || x == y)
}

/// Base-ISA key: the filename prefix up to the first `_`
/// (`spec.md` §4.4, §6.2).
pub fn base_isa(extension_file: &str) -> &str {
    extension_file.split('_').next().unwrap_or(extension_file)
}

/// `rv` is a wildcard that pairs with both `rv32` and `rv64`
/// (`spec.md` §4.4 "Base-ISA equivalence").
pub fn base_isa_equivalent(a: &str, b: &str) -> bool {
    a == b || (a == "rv" && (b == "rv32" || b == "rv64")) || (b == "rv" && (a == "rv32" || a == "rv64"))
}

/// True iff `extension_file`'s base ISA matches any extension in `others`.
pub fn same_base_isa<S: AsRef<str>>(extension_file: &str, others: &[S]) -> bool {
    let a = base_isa(extension_file);
    others
        .iter()
        .any(|other| base_isa_equivalent(a, base_isa(other.as_ref())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enc(s: &str) -> [char; 32] {
        let chars: Vec<char> = s.chars().collect();
        chars.try_into().unwrap()
    }

    #[test]
    fn match_and_mask_all_fixed() {
        let (m, mask) = match_and_mask(&enc("00000000000000000000000000110111"));
        assert_eq!(mask, 0x7f);
        assert_eq!(m, 0x37);
    }

    #[test]
    fn match_and_mask_all_dont_care() {
        let (m, mask) = match_and_mask(&enc(&"-".repeat(32)));
        assert_eq!(m, 0);
        assert_eq!(mask, 0);
    }

    #[test]
    fn overlaps_detects_conflict_and_compatibility() {
        assert!(overlaps("1-1", "101"));
        assert!(overlaps(&"-".repeat(32), &"1".repeat(32)));
        assert!(!overlaps("111", "101"));
    }

    #[test]
    fn base_isa_prefix() {
        assert_eq!(base_isa("rv32_i"), "rv32");
        assert_eq!(base_isa("rv64_a"), "rv64");
        assert_eq!(base_isa("rv_zicsr"), "rv");
    }

    #[test]
    fn base_isa_equivalence_wildcard() {
        assert!(base_isa_equivalent("rv", "rv32"));
        assert!(base_isa_equivalent("rv64", "rv"));
        assert!(!base_isa_equivalent("rv32", "rv64"));
        assert!(base_isa_equivalent("rv32", "rv32"));
    }

    #[test]
    fn same_base_isa_checks_all_extensions() {
        assert!(same_base_isa("rv32_i", &["rv32_m", "rv32_a"]));
        assert!(same_base_isa("rv_i", &["rv32_i", "rv64_i"]));
        assert!(!same_base_isa("rv32_i", &["rv64_m"]));
    }

    #[test]
    fn add_extension_deduplicates() {
        let mut inst = Instruction::from_encoding(
            "lui",
            enc("00000000000000000000000000110111"),
            vec![],
            "rv_i",
        );
        inst.add_extension("rv_i");
        inst.add_extension("rv32_i");
        assert_eq!(inst.extensions, vec!["rv_i", "rv32_i"]);
    }
}
