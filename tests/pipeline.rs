//! End-to-end pipeline tests: file reading, parsing, dictionary building,
//! and JSON emission, against the fixtures under `tests/fixtures/`.

use std::path::Path;

use riscv_opcodes::tables::{ArgLut, StaticTables};
use riscv_opcodes::{create_inst_dict, json, BuildOptions};

fn fixtures_root() -> &'static Path {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures"))
}

#[test]
fn builds_dictionary_from_fixture_extensions() {
    let root = fixtures_root();
    let mut tables = StaticTables::load(root).unwrap();
    assert!(!tables.arg_lut.is_empty());
    assert_eq!(tables.causes.len(), 3);

    let dict = create_inst_dict(
        &root.join("extensions"),
        &["rv32_i".to_string(), "rv32_m".to_string(), "rv_c".to_string()],
        &BuildOptions::default(),
        &mut tables.arg_lut,
    )
    .unwrap();

    assert!(dict.contains_key("lui"));
    assert!(dict.contains_key("jal"));
    assert!(dict.contains_key("addi"));
    assert!(dict.contains_key("mul"));
    assert!(dict.contains_key("c_addi"));
    assert!(dict.contains_key("c_nop"));

    // addi is shared between rv32_i (standard) and rv32_m (import).
    let addi = &dict["addi"];
    assert!(addi.extensions.contains(&"rv32_i".to_string()));
    assert!(addi.extensions.contains(&"rv32_m".to_string()));

    // nop's dependency (addi) is already loaded, so it is skipped by default.
    assert!(!dict.contains_key("nop"));
}

#[test]
fn pseudo_op_forced_inclusion_admits_nop() {
    let root = fixtures_root();
    let mut arg_lut = ArgLut::load(&root.join("arg_lut.csv")).unwrap();
    let options = BuildOptions {
        include_pseudo: true,
        include_pseudo_ops: vec![],
    };

    let dict = create_inst_dict(
        &root.join("extensions"),
        &["rv32_i".to_string()],
        &options,
        &mut arg_lut,
    )
    .unwrap();

    assert!(dict.contains_key("nop"));
}

#[test]
fn dictionary_serializes_to_sorted_canonical_json() {
    let root = fixtures_root();
    let mut arg_lut = ArgLut::load(&root.join("arg_lut.csv")).unwrap();
    let dict = create_inst_dict(
        &root.join("extensions"),
        &["rv32_i".to_string()],
        &BuildOptions::default(),
        &mut arg_lut,
    )
    .unwrap();

    let rendered = json::to_json_string(&dict).unwrap();
    let addi_pos = rendered.find("\"addi\"").unwrap();
    let auipc_pos = rendered.find("\"auipc\"").unwrap();
    let lui_pos = rendered.find("\"lui\"").unwrap();
    // BTreeMap iteration is mnemonic-sorted, and so is the emitted object.
    assert!(addi_pos < auipc_pos);
    assert!(auipc_pos < lui_pos);
    assert!(rendered.contains("\"match\": \"0x"));
    assert!(rendered.contains("\"mask\": \"0x"));
}
