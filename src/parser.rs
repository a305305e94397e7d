//! Line parser (`spec.md` §4.1, C2): turns one encoding line into an
//! `(name, Instruction)` pair.

use crate::error::{OpcodesError, Result};
use crate::instruction::Instruction;
use crate::tables::{ArgLut, ALIAS_TOKEN, RANGE_TOKEN, SINGLE_BIT_TOKEN};

/// Parses one non-blank, non-comment encoding line plus the owning
/// extension filename into `(name, Instruction)`.
///
/// `arg_lut` is threaded by `&mut` so that an `alias=canonical` token on
/// this line is visible to later lines and later files in the same run
/// (`spec.md` §4.3).
pub fn parse_line(line: &str, extension: &str, arg_lut: &mut ArgLut) -> Result<(String, Instruction)> {
    let mut tokens = line.split_whitespace();
    let raw_name = tokens.next().ok_or_else(|| OpcodesError::BadRange {
        mnemonic: String::new(),
        msb: 0,
        lsb: 0,
        line: line.to_string(),
    })?;
    let name = raw_name.replace('.', "_");

    let mut encoding = ['-'; 32];
    let mut claimed = [false; 32];
    let mut arg_tokens = Vec::new();

    // Ranges are matched first, then single-bit assignments, then whatever
    // tokens remain are treated as argument references (`spec.md` §4.1).
    let mut range_tokens = Vec::new();
    let mut single_tokens = Vec::new();
    for token in tokens {
        if RANGE_TOKEN.is_match(token) {
            range_tokens.push(token);
        } else if SINGLE_BIT_TOKEN.is_match(token) {
            single_tokens.push(token);
        } else {
            arg_tokens.push(token);
        }
    }

    for token in range_tokens {
        let caps = RANGE_TOKEN.captures(token).unwrap();
        let msb: u32 = caps["msb"].parse().unwrap();
        let lsb: u32 = caps["lsb"].parse().unwrap();
        if msb < lsb {
            return Err(OpcodesError::BadRange {
                mnemonic: name,
                msb,
                lsb,
                line: line.to_string(),
            });
        }
        let width = msb - lsb + 1;
        let value = parse_value(&caps["val"]).map_err(|_| OpcodesError::OutOfRange {
            mnemonic: name.clone(),
            value: 0,
            width: width as u8,
            line: line.to_string(),
        })?;
        if width < 64 && value >= (1u64 << width) {
            return Err(OpcodesError::OutOfRange {
                mnemonic: name,
                value,
                width: width as u8,
                line: line.to_string(),
            });
        }
        for bit in lsb..=msb {
            let pos = (31 - bit) as usize;
            if encoding[pos] != '-' {
                return Err(OpcodesError::BitAlreadyAssigned {
                    mnemonic: name,
                    bit: bit as u8,
                    line: line.to_string(),
                });
            }
            let bit_value = (value >> (bit - lsb)) & 1;
            encoding[pos] = if bit_value == 1 { '1' } else { '0' };
            claimed[pos] = true;
        }
    }

    for token in single_tokens {
        let caps = SINGLE_BIT_TOKEN.captures(token).unwrap();
        let pos_bit: u32 = caps["pos"].parse().unwrap();
        let value = parse_value(&caps["val"]).map_err(|_| OpcodesError::OutOfRange {
            mnemonic: name.clone(),
            value: 0,
            width: 1,
            line: line.to_string(),
        })?;
        if value >= 2 {
            return Err(OpcodesError::OutOfRange {
                mnemonic: name,
                value,
                width: 1,
                line: line.to_string(),
            });
        }
        let pos = (31 - pos_bit) as usize;
        if encoding[pos] != '-' {
            return Err(OpcodesError::BitAlreadyAssigned {
                mnemonic: name,
                bit: pos_bit as u8,
                line: line.to_string(),
            });
        }
        encoding[pos] = if value == 1 { '1' } else { '0' };
        claimed[pos] = true;
    }

    let mut variable_fields = Vec::with_capacity(arg_tokens.len());
    for token in arg_tokens {
        let arg_name = if let Some(caps) = ALIAS_TOKEN.captures(token) {
            let alias = caps["alias"].to_string();
            let canonical = caps["canonical"].to_string();
            if !arg_lut.contains(&canonical) {
                return Err(OpcodesError::UnknownArg {
                    mnemonic: name.clone(),
                    arg: canonical,
                });
            }
            arg_lut.install_alias(&alias, &canonical)?;
            alias
        } else {
            token.to_string()
        };

        let (msb, lsb) = arg_lut.get(&arg_name).ok_or_else(|| OpcodesError::UnknownArg {
            mnemonic: name.clone(),
            arg: arg_name.clone(),
        })?;

        for bit in lsb..=msb {
            let pos = (31 - bit) as usize;
            if claimed[pos] {
                return Err(OpcodesError::ArgOverlap {
                    mnemonic: name,
                    arg: arg_name,
                    bit,
                });
            }
            claimed[pos] = true;
        }
        variable_fields.push(arg_name);
    }

    let instruction = Instruction::from_encoding(name.clone(), encoding, variable_fields, extension);
    Ok((name, instruction))
}

/// Parses a decimal, `0x`, or `0b` integer literal (`spec.md` §4.1).
fn parse_value(token: &str) -> std::result::Result<u64, std::num::ParseIntError> {
    if let Some(hex) = token.strip_prefix("0x").or_else(|| token.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16)
    } else if let Some(bin) = token.strip_prefix("0b").or_else(|| token.strip_prefix("0B")) {
        u64::from_str_radix(bin, 2)
    } else {
        token.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rv32i_lut() -> ArgLut {
        let mut lut = ArgLut::new();
        lut.insert("rd", (11, 7));
        lut.insert("rs1", (19, 15));
        lut.insert("rs2", (24, 20));
        lut.insert("imm12", (31, 20));
        lut.insert("imm20", (31, 12));
        lut.insert("jimm20", (31, 12));
        lut
    }

    #[test]
    fn lui_baseline() {
        let mut lut = rv32i_lut();
        let (name, inst) =
            parse_line("lui rd imm20 6..2=0x0D 1=1 0=1", "rv_i", &mut lut).unwrap();
        assert_eq!(name, "lui");
        assert_eq!(inst.extensions, vec!["rv_i"]);
        assert_eq!(format!("0x{:x}", inst.match_bits), "0x37");
        assert_eq!(format!("0x{:x}", inst.mask), "0x7f");
    }

    #[test]
    fn bit_already_assigned_within_line() {
        let mut lut = rv32i_lut();
        let err = parse_line("jol rd jimm20 6..2=0x00 3=1", "rv_i", &mut lut).unwrap_err();
        assert!(matches!(err, OpcodesError::BitAlreadyAssigned { .. }));
    }

    #[test]
    fn bad_range_rejected() {
        let mut lut = rv32i_lut();
        let err = parse_line("jol 2..6=0x1b", "rv_i", &mut lut).unwrap_err();
        assert!(matches!(err, OpcodesError::BadRange { .. }));
    }

    #[test]
    fn illegal_value_out_of_range() {
        let mut lut = rv32i_lut();
        let err = parse_line("jol rd jimm20 2..0=10", "rv_i", &mut lut).unwrap_err();
        assert!(matches!(err, OpcodesError::OutOfRange { .. }));
    }

    #[test]
    fn unknown_arg_rejected() {
        let mut lut = rv32i_lut();
        let err = parse_line("jol rd jimm128 2..0=3", "rv_i", &mut lut).unwrap_err();
        assert!(matches!(err, OpcodesError::UnknownArg { .. }));
    }

    #[test]
    fn alias_installs_and_resolves() {
        let mut lut = rv32i_lut();
        let (_, inst) =
            parse_line("c_addi4spn rd_p=rd 6..2=0x00", "rv_c", &mut lut).unwrap();
        assert!(lut.contains("rd_p"));
        assert_eq!(inst.variable_fields, vec!["rd_p".to_string()]);
    }

    #[test]
    fn arg_overlapping_fixed_bit_rejected() {
        let mut lut = rv32i_lut();
        // rd occupies bits 11..7; pin bit 9 to a fixed value too.
        let err = parse_line("bogus rd 9=1", "rv_i", &mut lut).unwrap_err();
        assert!(matches!(err, OpcodesError::ArgOverlap { .. }));
    }

    #[test]
    fn full_width_range_boundaries() {
        let mut lut = ArgLut::new();
        let (_, inst) = parse_line("fence31 31..0=0xFFFFFFFF", "rv_i", &mut lut).unwrap();
        assert_eq!(inst.mask, 0xFFFF_FFFF);
        assert_eq!(inst.match_bits, 0xFFFF_FFFF);

        let err = parse_line("fence32 31..0=0x100000000", "rv_i", &mut lut).unwrap_err();
        assert!(matches!(err, OpcodesError::OutOfRange { .. }));
    }
}
