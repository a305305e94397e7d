//! Parses RISC-V instruction encoding files into a canonical instruction
//! dictionary, resolving pseudo-op and import cross-references and
//! expanding segmented vector load/store variants, so downstream tooling
//! (assemblers, disassemblers, HDL generators) can consume one
//! machine-readable source of truth instead of re-parsing the encoding
//! tables themselves.

pub mod builder;
pub mod cli;
pub mod emit;
pub mod error;
pub mod fileset;
pub mod instruction;
pub mod json;
pub mod parser;
pub mod reader;
pub mod segment;
pub mod tables;
pub mod tools;

pub use builder::{create_inst_dict, BuildOptions};
pub use error::{OpcodesError, Result};
pub use instruction::{Dictionary, Instruction};
