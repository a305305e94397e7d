//! LaTeX instruction-table emitter (`-latex`).
//!
//! Mirrors the shape of `original_source/latex_utils.py`'s
//! `make_ext_latex_table`: one row per instruction, the 32-bit encoding
//! rendered as a run of `\multicolumn` spans (one span per maximal run of
//! identical encoding characters), followed by the mnemonic.

use std::fmt::Write as _;

use crate::instruction::Dictionary;

use super::sorted_instructions;

pub fn emit_latex(dict: &Dictionary) -> String {
    let mut out = String::new();
    out.push_str("% Auto-generated by riscv-opcodes. Do not edit.\n");
    out.push_str("\\begin{table}[p]\n\\begin{center}\n");
    out.push_str("\\begin{tabular}{p{0.002in}*{32}{p{0.08in}}l}\n");

    for inst in sorted_instructions(dict) {
        let _ = writeln!(out, "{} \\\\\\hline", encoding_row(&inst.encoding, &inst.name));
    }

    out.push_str("\\end{tabular}\n\\end{center}\n\\end{table}\n");
    out
}

fn encoding_row(encoding: &str, name: &str) -> String {
    let chars: Vec<char> = encoding.chars().collect();
    let mut spans = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let mut j = i + 1;
        while j < chars.len() && chars[j] == chars[i] {
            j += 1;
        }
        spans.push((chars[i], j - i));
        i = j;
    }

    let mut row = String::new();
    for (ch, width) in spans {
        let label = if ch == '-' { "arg".to_string() } else { ch.to_string() };
        let _ = write!(row, "\\multicolumn{{{width}}}{{c|}}{{{label}}} & ");
    }
    let _ = write!(row, "{name}");
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruction::Instruction;

    #[test]
    fn groups_runs_of_identical_bits() {
        let mut dict = Dictionary::new();
        dict.insert(
            "lui".to_string(),
            Instruction::from_encoding(
                "lui",
                [
                    '-', '-', '-', '-', '-', '-', '-', '-', '-', '-', '-', '-', '-', '-', '-',
                    '-', '-', '-', '-', '-', '0', '0', '0', '0', '0', '0', '0', '1', '1', '0',
                    '1', '1',
                ],
                vec!["rd".to_string(), "imm20".to_string()],
                "rv_i",
            ),
        );
        let out = emit_latex(&dict);
        assert!(out.contains("\\multicolumn{20}{c|}{arg}"));
        assert!(out.contains("lui"));
    }
}
