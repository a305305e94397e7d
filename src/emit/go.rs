//! Go encoder table emitter (`-go`): a `map[string]Inst` literal.

use std::fmt::Write as _;

use crate::instruction::Dictionary;

use super::{hex32, sorted_instructions};

pub fn emit_go(dict: &Dictionary) -> String {
    let mut out = String::new();
    out.push_str("// Code generated by riscv-opcodes. DO NOT EDIT.\n\n");
    out.push_str("package riscv\n\n");
    out.push_str("type Inst struct {\n\tMatch uint32\n\tMask  uint32\n}\n\n");
    out.push_str("var Instructions = map[string]Inst{\n");

    for inst in sorted_instructions(dict) {
        let _ = writeln!(
            out,
            "\t{:?}: {{Match: {}, Mask: {}}},",
            inst.name,
            hex32(inst.match_bits),
            hex32(inst.mask)
        );
    }

    out.push_str("}\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruction::Instruction;

    #[test]
    fn emits_go_map_literal() {
        let mut dict = Dictionary::new();
        dict.insert(
            "jal".to_string(),
            Instruction::from_encoding("jal", ['1'; 32], vec![], "rv_i"),
        );
        let out = emit_go(&dict);
        assert!(out.contains("var Instructions = map[string]Inst{"));
        assert!(out.contains("\"jal\": {Match: 0xffffffff, Mask: 0xffffffff},"));
    }
}
