//! Primary CLI: builds the canonical dictionary and writes the requested
//! emitter outputs (`spec.md` §6.5).

use std::fs;
use std::process::ExitCode;

use riscv_opcodes::cli::Cli;
use riscv_opcodes::emit;
use riscv_opcodes::tables::ArgLut;
use riscv_opcodes::{create_inst_dict, json, segment, BuildOptions};

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
    let extensions_root = cli.root.join("extensions");
    let options = BuildOptions {
        include_pseudo: cli.pseudo,
        include_pseudo_ops: riscv_opcodes::tables::DEFAULT_INCLUDE_PSEUDO_OPS
            .iter()
            .map(|s| s.to_string())
            .collect(),
    };

    let mut arg_lut = ArgLut::load(&cli.root.join("arg_lut.csv"))?;
    let mut dict = create_inst_dict(&extensions_root, &cli.patterns, &options, &mut arg_lut)?;

    let segmented_names: Vec<String> = dict
        .iter()
        .filter(|(_, inst)| inst.variable_fields.iter().any(|f| f == "nf"))
        .map(|(name, _)| name.clone())
        .collect();
    for name in segmented_names {
        let inst = dict.remove(&name).expect("name came from dict.iter()");
        for variant in segment::expand_segmented(&inst)? {
            dict.insert(variant.name.clone(), variant);
        }
    }

    fs::create_dir_all(&cli.out).map_err(|e| riscv_opcodes::OpcodesError::Io {
        path: cli.out.display().to_string(),
        message: e.to_string(),
    })?;

    let dict_out_path = cli.out.join(&cli.dict_out);
    fs::write(&dict_out_path, json::to_json_string(&dict)?).map_err(|e| {
        riscv_opcodes::OpcodesError::Io {
            path: dict_out_path.display().to_string(),
            message: e.to_string(),
        }
    })?;
    log::info!("wrote {} instructions to {}", dict.len(), dict_out_path.display());

    write_if(cli.c, &cli.out, "inst.h", || emit::emit_c(&dict))?;
    write_if(cli.chisel, &cli.out, "inst.chisel", || emit::emit_chisel(&dict, false))?;
    write_if(cli.spinal_hdl, &cli.out, "inst.spinalhdl", || {
        emit::emit_chisel(&dict, true)
    })?;
    write_if(cli.sverilog, &cli.out, "inst.sverilog", || emit::emit_sverilog(&dict))?;
    write_if(cli.rust, &cli.out, "inst.rs", || emit::emit_rust(&dict))?;
    write_if(cli.go, &cli.out, "inst.go", || emit::emit_go(&dict))?;
    write_if(cli.latex, &cli.out, "inst-table.tex", || emit::emit_latex(&dict))?;

    Ok(())
}

fn write_if(
    enabled: bool,
    out_dir: &std::path::Path,
    filename: &str,
    render: impl FnOnce() -> String,
) -> riscv_opcodes::Result<()> {
    if !enabled {
        return Ok(());
    }
    let path = out_dir.join(filename);
    fs::write(&path, render()).map_err(|e| riscv_opcodes::OpcodesError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    log::info!("{} generated successfully", path.display());
    Ok(())
}
