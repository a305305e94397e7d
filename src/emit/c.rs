//! C header emitter (`-c`): `#define`s for match/mask per mnemonic.

use std::fmt::Write as _;

use crate::instruction::Dictionary;

use super::{hex32, safe_ident, sorted_instructions};

pub fn emit_c(dict: &Dictionary) -> String {
    let mut out = String::new();
    out.push_str("/* Auto-generated by riscv-opcodes. Do not edit. */\n");
    out.push_str("#ifndef RISCV_ENCODING_H\n#define RISCV_ENCODING_H\n");

    for inst in sorted_instructions(dict) {
        let ident = safe_ident(&inst.name).to_uppercase();
        let _ = writeln!(out, "#define MATCH_{ident} {}", hex32(inst.match_bits));
        let _ = writeln!(out, "#define MASK_{ident} {}", hex32(inst.mask));
    }

    out.push_str("#endif /* RISCV_ENCODING_H */\n");
    out
}
