//! Rust constants emitter (`-rust`): `pub const` match/mask pairs.

use std::fmt::Write as _;

use crate::instruction::Dictionary;

use super::{hex32, safe_ident, sorted_instructions};

pub fn emit_rust(dict: &Dictionary) -> String {
    let mut out = String::new();
    out.push_str("// Auto-generated by riscv-opcodes. Do not edit.\n");
    out.push_str("#![allow(dead_code)]\n\n");

    for inst in sorted_instructions(dict) {
        let ident = safe_ident(&inst.name).to_uppercase();
        let _ = writeln!(out, "pub const MATCH_{ident}: u32 = {};", hex32(inst.match_bits));
        let _ = writeln!(out, "pub const MASK_{ident}: u32 = {};", hex32(inst.mask));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruction::Instruction;

    #[test]
    fn emits_pub_const_pairs() {
        let mut dict = Dictionary::new();
        dict.insert(
            "addi".to_string(),
            Instruction::from_encoding("addi", ['-'; 32], vec![], "rv_i"),
        );
        let out = emit_rust(&dict);
        assert!(out.contains("pub const MATCH_ADDI: u32 = 0x00000000;"));
        assert!(out.contains("pub const MASK_ADDI: u32 = 0x00000000;"));
    }
}
