//! RV32 Base Integer (I) funct7 discriminators.
//!
//! The `funct7` field (bits 31-25) selects between standard and alternate
//! register-register encodings sharing the same funct3.

/// Default funct7 encoding (ADD, SLL, SRL, etc.).
pub const DEFAULT: u32 = 0b0000000;

/// Alternate encoding selecting SUB under funct3 = 0.
pub const SUB: u32 = 0b0100000;
