//! Reporting utilities over the same extension-file tree the main builder
//! consumes, as standalone subcommands (`SPEC_FULL.md` §6.5).

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use riscv_opcodes::tools;

#[derive(Debug, Parser)]
#[command(name = "riscv-opcodes-tools", version, about)]
struct Cli {
    /// Root directory containing `extensions/` and `extensions/unratified/`.
    #[arg(long, default_value = ".")]
    root: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print all non-pseudo mnemonics, sorted case-insensitively.
    List,
    /// Search instruction lines by mnemonic or line text.
    Search {
        query: String,
        #[arg(short = 'i', long = "ignore-case")]
        ignore_case: bool,
        #[arg(short = 'r', long = "regex")]
        regex: bool,
    },
    /// Print the instruction count per extension file.
    CountExtensions,
    /// Group mnemonics by their `6..2` opcode field.
    Frequencies,
    /// Print unique `(opcode, funct3, funct7)` triples per extension file.
    Combinations,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> riscv_opcodes::Result<()> {
    let root = cli.root.join("extensions");

    match &cli.command {
        Command::List => {
            for mnemonic in tools::list_opcodes(&root)? {
                println!("{mnemonic}");
            }
        }
        Command::Search {
            query,
            ignore_case,
            regex,
        } => {
            let hits = tools::search(&root, query, *ignore_case, *regex)?;
            for hit in &hits {
                println!("{}:{} -> {}", hit.file, hit.line, hit.text);
            }
            println!("{} matches", hits.len());
        }
        Command::CountExtensions => {
            let counts = tools::count_extensions(&root)?;
            for (ext, count) in &counts {
                println!("{ext:<25} | {count:>6}");
            }
        }
        Command::Frequencies => {
            let freq = tools::opcode_frequencies(&root)?;
            for (opcode, mnemonics) in &freq {
                println!("{opcode} ({} instructions): {}", mnemonics.len(), mnemonics.join(", "));
            }
        }
        Command::Combinations => {
            let combos = tools::list_combinations(&root)?;
            let json = serde_json::to_string_pretty(&combos).map_err(|e| {
                riscv_opcodes::OpcodesError::Json {
                    message: e.to_string(),
                }
            })?;
            println!("{json}");
        }
    }

    Ok(())
}
