//! Segmented-VLS `nf` field expansion (`spec.md` §5, C5).
//!
//! A segmented vector load/store instruction carries an `nf` field in bits
//! 31..29 and is expanded into 8 concrete variants, one per segment count,
//! each renamed by inserting `seg{nf+1}` immediately before the first `'e'`
//! in the mnemonic (`original_source/parse.py`'s `add_segmented_vls`).

use crate::error::{OpcodesError, Result};
use crate::instruction::{match_and_mask, Instruction};

/// Expands `inst` into its 8 `nf`-variants, removing `nf` from
/// `variable_fields` and fixing bits 31..29 to the segment count minus one.
///
/// Returns `CannotExpandNf` if the mnemonic has no `'e'` to splice the
/// `seg{n}` marker in front of (`spec.md` §9 Open Question: resolved as a
/// hard error rather than a silent fallback, since a segmented-VLS mnemonic
/// without an `'e'` indicates the table itself is malformed).
pub fn expand_segmented(inst: &Instruction) -> Result<Vec<Instruction>> {
    let Some(e_pos) = inst.name.find('e') else {
        return Err(OpcodesError::CannotExpandNf {
            mnemonic: inst.name.clone(),
        });
    };

    let mut variable_fields = inst.variable_fields.clone();
    variable_fields.retain(|f| f != "nf");

    let mut base_encoding: Vec<char> = inst.encoding.chars().collect();
    // nf occupies bits 31..29, i.e. encoding positions 0..=2.
    for pos in 0..=2 {
        base_encoding[pos] = '-';
    }

    let mut variants = Vec::with_capacity(8);
    for nf in 0u32..8 {
        let mut encoding = base_encoding.clone();
        encoding[0] = if (nf >> 2) & 1 == 1 { '1' } else { '0' };
        encoding[1] = if (nf >> 1) & 1 == 1 { '1' } else { '0' };
        encoding[2] = if nf & 1 == 1 { '1' } else { '0' };

        let encoding_array: [char; 32] = encoding
            .as_slice()
            .try_into()
            .expect("encoding is always 32 characters");
        let (match_bits, mask) = match_and_mask(&encoding_array);

        let mut name = inst.name.clone();
        if nf != 0 {
            name.insert_str(e_pos, &format!("seg{}", nf + 1));
        }

        variants.push(Instruction {
            name: name.clone(),
            encoding: encoding_array.iter().collect(),
            variable_fields: variable_fields.clone(),
            extensions: inst.extensions.clone(),
            match_bits,
            mask,
        });
    }
    Ok(variants)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg_inst() -> Instruction {
        Instruction::from_encoding(
            "vlsege",
            [
                '-', '-', '-', '0', '0', '0', '1', '0', '0', '0', '0', '0', '-', '-', '-', '-',
                '-', '0', '0', '0', '-', '-', '-', '-', '-', '0', '0', '0', '0', '1', '1', '1',
            ],
            vec!["nf".to_string(), "rd".to_string(), "rs1".to_string()],
            "rv_zve32x",
        )
    }

    #[test]
    fn expands_into_eight_variants_with_nf_removed() {
        let inst = seg_inst();
        let variants = expand_segmented(&inst).unwrap();
        assert_eq!(variants.len(), 8);
        for (nf, variant) in variants.iter().enumerate() {
            assert!(!variant.variable_fields.contains(&"nf".to_string()));
            if nf == 0 {
                assert_eq!(variant.name, "vlsege");
            } else {
                assert_eq!(variant.name, format!("vlseg{}e", nf + 1));
            }
            let top3 = &variant.encoding[0..3];
            let expected: String = format!("{:03b}", nf);
            assert_eq!(top3, expected);
        }
    }

    #[test]
    fn missing_e_in_mnemonic_is_an_error() {
        let mut inst = seg_inst();
        inst.name = "vlsg".to_string();
        let err = expand_segmented(&inst).unwrap_err();
        assert!(matches!(err, OpcodesError::CannotExpandNf { .. }));
    }
}
