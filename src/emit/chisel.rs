//! Chisel / SpinalHDL bit-pattern emitter (`-chisel`, `-spinalhdl`).
//!
//! Both targets want the same `name -> "mask'match"` pairing; only the
//! surrounding object/trait boilerplate differs
//! (`original_source/parse.py`'s `make_chisel(instr_dict, spinal_hdl=...)`).

use std::fmt::Write as _;

use crate::instruction::Dictionary;

use super::{safe_ident, sorted_instructions};

pub fn emit_chisel(dict: &Dictionary, spinal_hdl: bool) -> String {
    let mut out = String::new();
    if spinal_hdl {
        out.push_str("// Auto-generated by riscv-opcodes. Do not edit.\n");
        out.push_str("object RiscvOpcodes {\n");
        for inst in sorted_instructions(dict) {
            let ident = safe_ident(&inst.name).to_uppercase();
            let _ = writeln!(
                out,
                "  def {ident} = M\"b{}\"",
                bit_pattern(inst.mask, inst.match_bits)
            );
        }
        out.push_str("}\n");
    } else {
        out.push_str("// Auto-generated by riscv-opcodes. Do not edit.\n");
        out.push_str("object Instructions {\n");
        for inst in sorted_instructions(dict) {
            let ident = safe_ident(&inst.name).to_uppercase();
            let _ = writeln!(
                out,
                "  def {ident} = BitPat(\"b{}\")",
                bit_pattern(inst.mask, inst.match_bits)
            );
        }
        out.push_str("}\n");
    }
    out
}

/// Renders a 32-bit field as `0`/`1`/`?`, `?` wherever `mask` is clear.
fn bit_pattern(mask: u32, match_bits: u32) -> String {
    (0..32)
        .rev()
        .map(|bit| {
            if (mask >> bit) & 1 == 0 {
                '?'
            } else if (match_bits >> bit) & 1 == 1 {
                '1'
            } else {
                '0'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruction::Instruction;

    #[test]
    fn chisel_uses_bitpat() {
        let mut dict = Dictionary::new();
        dict.insert(
            "lui".to_string(),
            Instruction::from_encoding(
                "lui",
                [
                    '0', '0', '0', '0', '0', '0', '0', '0', '0', '0', '0', '0', '0', '0', '0',
                    '0', '0', '0', '0', '0', '0', '0', '0', '0', '0', '0', '0', '1', '1', '0',
                    '1', '1',
                ],
                vec![],
                "rv_i",
            ),
        );
        let out = emit_chisel(&dict, false);
        assert!(out.contains("object Instructions {"));
        assert!(out.contains("BitPat(\"b"));
    }

    #[test]
    fn spinal_hdl_uses_m_prefix() {
        let dict = Dictionary::new();
        let out = emit_chisel(&dict, true);
        assert!(out.contains("object RiscvOpcodes {"));
    }

    #[test]
    fn bit_pattern_marks_dont_cares() {
        assert_eq!(bit_pattern(0, 0), "?".repeat(32));
        assert_eq!(bit_pattern(0xFFFF_FFFF, 0), "0".repeat(32));
    }
}
