//! Downstream artifact emitters (`spec.md` §4.6, C6).
//!
//! Each emitter is a pure function from the sorted dictionary to a `String`;
//! the binaries decide where to write it. The contracts `spec.md` requires
//! of every emitter — stable hex `match`/`mask`, stable 32-char `encoding`,
//! stable sorted iteration, base-filename extension names — are upheld by
//! reading directly off `Instruction`, never by re-deriving them.

mod c;
mod chisel;
mod go;
mod latex;
mod rust;
mod sverilog;

pub use c::emit_c;
pub use chisel::emit_chisel;
pub use go::emit_go;
pub use latex::emit_latex;
pub use rust::emit_rust;
pub use sverilog::emit_sverilog;

use crate::instruction::Instruction;

/// A C-identifier-safe form of a mnemonic: lowercase, already underscored by
/// the parser, but emitters still route through this so a future mnemonic
/// with a stray character doesn't produce invalid output.
fn safe_ident(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// Formats `match`/`mask` the way every emitter wants them: `0x`-prefixed,
/// lowercase, zero-padded to 8 hex digits.
fn hex32(value: u32) -> String {
    format!("0x{value:08x}")
}

fn sorted_instructions(dict: &crate::instruction::Dictionary) -> Vec<&Instruction> {
    dict.values().collect()
}
