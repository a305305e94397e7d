//! Canonical JSON dictionary serialization (`spec.md` §6.4).
//!
//! Field names and the `0x`-prefixed lowercase hex encoding of `match`/`mask`
//! mirror `original_source/parse.py`'s `instr_dict_2_json` output, so a
//! dictionary produced by this crate can be diffed against the reference
//! tool's output.

use serde::Serialize;

use crate::error::{OpcodesError, Result};
use crate::instruction::Dictionary;

#[derive(Serialize)]
struct InstructionJson<'a> {
    encoding: &'a str,
    variable_fields: &'a [String],
    extension: &'a [String],
    #[serde(rename = "match")]
    match_hex: String,
    mask: String,
}

/// Renders `dict` as a pretty-printed JSON object keyed by mnemonic, in the
/// dictionary's own (mnemonic-sorted) iteration order.
pub fn to_json_string(dict: &Dictionary) -> Result<String> {
    let mut entries = serde_json::Map::with_capacity(dict.len());
    for (name, inst) in dict {
        let json_inst = InstructionJson {
            encoding: &inst.encoding,
            variable_fields: &inst.variable_fields,
            extension: &inst.extensions,
            match_hex: format!("0x{:x}", inst.match_bits),
            mask: format!("0x{:x}", inst.mask),
        };
        let value = serde_json::to_value(&json_inst).map_err(|e| OpcodesError::Json {
            message: e.to_string(),
        })?;
        entries.insert(name.clone(), value);
    }
    serde_json::to_string_pretty(&entries).map_err(|e| OpcodesError::Json {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruction::Instruction;

    #[test]
    fn renders_match_and_mask_as_lowercase_hex() {
        let mut dict = Dictionary::new();
        dict.insert(
            "lui".to_string(),
            Instruction::from_encoding(
                "lui",
                [
                    '0', '0', '0', '0', '0', '0', '0', '0', '0', '0', '0', '0', '0', '0', '0',
                    '0', '0', '0', '0', '0', '0', '0', '0', '0', '0', '0', '0', '1', '1', '0',
                    '1', '1',
                ],
                vec!["rd".to_string(), "imm20".to_string()],
                "rv_i",
            ),
        );
        let json = to_json_string(&dict).unwrap();
        assert!(json.contains("\"lui\""));
        assert!(json.contains("\"match\": \"0x37\""));
        assert!(json.contains("\"mask\": \"0x7f\""));
        assert!(json.contains("\"extension\": ["));
    }
}
