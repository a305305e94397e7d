//! Crate-wide error type.
//!
//! Every fatal condition the builder can hit (`spec.md` §7) is a distinct
//! variant here rather than a bare `String`, so callers can match on the
//! failure kind instead of parsing a message.

use thiserror::Error;

/// All ways the opcode pipeline can fail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OpcodesError {
    #[error("{mnemonic}: msb {msb} < lsb {lsb} in '{line}'")]
    BadRange {
        mnemonic: String,
        msb: u32,
        lsb: u32,
        line: String,
    },

    #[error("{mnemonic}: value {value} does not fit in {width}-bit field in '{line}'")]
    OutOfRange {
        mnemonic: String,
        value: u64,
        width: u8,
        line: String,
    },

    #[error("{mnemonic}: bit {bit} already assigned in '{line}'")]
    BitAlreadyAssigned {
        mnemonic: String,
        bit: u8,
        line: String,
    },

    #[error("{mnemonic}: argument '{arg}' not mapped in arg_lut")]
    UnknownArg { mnemonic: String, arg: String },

    #[error("{mnemonic}: argument '{arg}' overlaps another field at bit {bit}")]
    ArgOverlap {
        mnemonic: String,
        arg: String,
        bit: u8,
    },

    #[error("instruction {mnemonic} from {extension} is already added from {existing} in the same base ISA")]
    DuplicateSameBase {
        mnemonic: String,
        extension: String,
        existing: String,
    },

    #[error("instruction {mnemonic} from {extension} has different encodings in different base ISAs")]
    EncodingConflict { mnemonic: String, extension: String },

    #[error("instruction {mnemonic} in extension {extension} overlaps with {other} in {other_extension}")]
    CrossInstructionOverlap {
        mnemonic: String,
        extension: String,
        other: String,
        other_extension: String,
    },

    #[error("extension file '{file}' not found (required by {referrer})")]
    MissingDependencyFile { file: String, referrer: String },

    #[error("instruction '{instruction}' required by {referrer} not found in '{file}'")]
    MissingDependencyInstruction {
        instruction: String,
        file: String,
        referrer: String,
    },

    #[error("cannot expand nf field for instruction {mnemonic}: no 'e' in mnemonic")]
    CannotExpandNf { mnemonic: String },

    #[error("failed to read '{path}': {message}")]
    Io { path: String, message: String },

    #[error("malformed row in '{path}': {message}")]
    MalformedTable { path: String, message: String },

    #[error("failed to serialize dictionary to JSON: {message}")]
    Json { message: String },
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, OpcodesError>;
