//! SystemVerilog localparam emitter (`-sverilog`).

use std::fmt::Write as _;

use crate::instruction::Dictionary;

use super::{hex32, safe_ident, sorted_instructions};

pub fn emit_sverilog(dict: &Dictionary) -> String {
    let mut out = String::new();
    out.push_str("/* Auto-generated by riscv-opcodes. Do not edit. */\n");
    out.push_str("package riscv_instr;\n\n");

    for inst in sorted_instructions(dict) {
        let ident = safe_ident(&inst.name).to_uppercase();
        let _ = writeln!(
            out,
            "  localparam logic [31:0] MATCH_{ident} = {};",
            hex32(inst.match_bits)
        );
        let _ = writeln!(
            out,
            "  localparam logic [31:0] MASK_{ident} = {};",
            hex32(inst.mask)
        );
    }

    out.push_str("\nendpackage\n");
    out
}
