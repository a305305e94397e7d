//! CLI argument definitions for the `riscv-opcodes` binary
//! (`spec.md` §6.5).
//!
//! `spec.md` §6.5 (following the original `argparse` CLI) spells the
//! emitter flags with a single dash, multi-character style (`-chisel`,
//! `-spinalhdl`, `-pseudo`, ...), which clap's `long` convention can't
//! produce directly (`long` always means a `--` prefix). `normalize_args`
//! rewrites those spellings to clap's `--` form before `clap::Parser`
//! ever sees them, so the on-the-wire flag surface still matches §6.5
//! exactly while the derive stays idiomatic clap.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

/// Parses RISC-V instruction encoding files into a canonical dictionary and
/// optionally emits downstream artifacts.
#[derive(Debug, Parser)]
#[command(name = "riscv-opcodes", version, about)]
pub struct Cli {
    /// Glob patterns selecting extension files, relative to `--root`'s
    /// `extensions/` directory (e.g. `rv32_i rv_c unratified/rv_b`).
    #[arg(required = true)]
    pub patterns: Vec<String>,

    /// Include every pseudo-op regardless of whether its base instruction
    /// is already loaded.
    #[arg(long = "pseudo", short = 'p')]
    pub pseudo: bool,

    /// Emit the C header.
    #[arg(short = 'c')]
    pub c: bool,

    /// Emit Chisel bit-patterns.
    #[arg(long)]
    pub chisel: bool,

    /// Emit SpinalHDL bit-patterns.
    #[arg(long = "spinalhdl")]
    pub spinal_hdl: bool,

    /// Emit SystemVerilog localparams.
    #[arg(long = "sverilog")]
    pub sverilog: bool,

    /// Emit Rust constants.
    #[arg(long)]
    pub rust: bool,

    /// Emit the Go encoder table.
    #[arg(long)]
    pub go: bool,

    /// Emit the LaTeX instruction table.
    #[arg(long)]
    pub latex: bool,

    /// Root directory containing `extensions/`, `extensions/unratified/`,
    /// and the CSV lookup tables.
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Directory emitters write their output files into.
    #[arg(short = 'o', long = "out", default_value = ".")]
    pub out: PathBuf,

    /// File the canonical JSON dictionary is written to.
    #[arg(long = "dict-out", default_value = "instr_dict.json")]
    pub dict_out: PathBuf,
}

/// The single-dash, multi-character flags `spec.md` §6.5 names, paired
/// with the double-dash spelling clap's derive actually recognizes.
const SINGLE_DASH_ALIASES: &[(&str, &str)] = &[
    ("-pseudo", "--pseudo"),
    ("-chisel", "--chisel"),
    ("-spinalhdl", "--spinalhdl"),
    ("-sverilog", "--sverilog"),
    ("-rust", "--rust"),
    ("-go", "--go"),
    ("-latex", "--latex"),
];

/// Rewrites any `spec.md`-spelled single-dash long flag to the `--`
/// spelling clap expects, leaving every other argument (including the
/// single-dash-single-char `-c`/`-p`/`-o` short flags) untouched.
fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(|arg| {
            let arg = arg.into();
            match arg.to_str() {
                Some(s) => match SINGLE_DASH_ALIASES.iter().find(|(spelling, _)| *spelling == s) {
                    Some((_, canonical)) => OsString::from(*canonical),
                    None => arg,
                },
                None => arg,
            }
        })
        .collect()
}

impl Cli {
    /// Parses `std::env::args_os()`, translating `spec.md` §6.5's
    /// single-dash flag spellings first.
    pub fn parse() -> Self {
        <Self as Parser>::parse_from(normalize_args(std::env::args_os()))
    }

    /// Parses an explicit argument list, translating `spec.md` §6.5's
    /// single-dash flag spellings first. Shadows `clap::Parser::parse_from`
    /// for every call site in this crate; use the fully-qualified
    /// `<Cli as clap::Parser>::parse_from` to bypass normalization.
    pub fn parse_from<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        <Self as Parser>::parse_from(normalize_args(args))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_patterns_and_flags() {
        let cli = Cli::parse_from(["riscv-opcodes", "rv32_i", "rv_c", "-c", "-rust"]);
        assert_eq!(cli.patterns, vec!["rv32_i", "rv_c"]);
        assert!(cli.c);
        assert!(cli.rust);
        assert!(!cli.go);
        assert_eq!(cli.root, PathBuf::from("."));
    }

    #[test]
    fn single_dash_spec_spellings_are_accepted() {
        let cli = Cli::parse_from([
            "riscv-opcodes",
            "rv32_i",
            "-pseudo",
            "-chisel",
            "-spinalhdl",
            "-sverilog",
            "-go",
            "-latex",
        ]);
        assert!(cli.pseudo);
        assert!(cli.chisel);
        assert!(cli.spinal_hdl);
        assert!(cli.sverilog);
        assert!(cli.go);
        assert!(cli.latex);
    }

    #[test]
    fn double_dash_spellings_still_work() {
        let cli = Cli::parse_from(["riscv-opcodes", "rv32_i", "--chisel", "--pseudo"]);
        assert!(cli.chisel);
        assert!(cli.pseudo);
    }

    #[test]
    fn root_and_out_are_overridable() {
        let cli = Cli::parse_from([
            "riscv-opcodes",
            "rv32_i",
            "--root",
            "/srv/opcodes",
            "-o",
            "/tmp/out",
            "--dict-out",
            "dict.json",
        ]);
        assert_eq!(cli.root, PathBuf::from("/srv/opcodes"));
        assert_eq!(cli.out, PathBuf::from("/tmp/out"));
        assert_eq!(cli.dict_out, PathBuf::from("dict.json"));
    }
}
