//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the integer ALU used by the execute stage. It
//! handles arithmetic, logical operations, shifts, and the signed
//! multiply/divide/remainder subset, for both the register-register and
//! register-immediate instruction forms.
//!
//! Pathological inputs produce defined results rather than traps: division by
//! zero yields −1, remainder by zero yields the dividend, and all arithmetic
//! wraps on overflow (so `i32::MIN / -1` wraps instead of trapping).

use crate::common::constants::SHAMT_MASK;
use crate::isa::rv32i::{funct3, funct7};
use crate::isa::rv32m;

/// Executes a register-register ALU operation.
///
/// Dispatches on the `(funct3, funct7)` pair. Shift amounts use the low five
/// bits of `b`. Unknown combinations return 0.
///
/// # Arguments
///
/// * `f3` - The funct3 field of the instruction.
/// * `f7` - The funct7 field of the instruction.
/// * `a`  - First operand (rs1 value).
/// * `b`  - Second operand (rs2 value).
///
/// # Returns
///
/// The signed 32-bit result of the operation.
pub fn reg_op(f3: u32, f7: u32, a: i32, b: i32) -> i32 {
    match (f3, f7) {
        (funct3::ADD_SUB, funct7::DEFAULT) => a.wrapping_add(b),
        (funct3::ADD_SUB, funct7::SUB) => a.wrapping_sub(b),
        (rv32m::funct3::MUL, rv32m::M_EXTENSION) => (a as i64).wrapping_mul(b as i64) as i32,
        (rv32m::funct3::DIV, rv32m::M_EXTENSION) => {
            if b != 0 {
                a.wrapping_div(b)
            } else {
                -1
            }
        }
        (rv32m::funct3::REM, rv32m::M_EXTENSION) => {
            if b != 0 {
                a.wrapping_rem(b)
            } else {
                a
            }
        }
        (funct3::AND, funct7::DEFAULT) => a & b,
        (funct3::OR, funct7::DEFAULT) => a | b,
        (funct3::SLL, funct7::DEFAULT) => ((a as u32) << (b & SHAMT_MASK)) as i32,
        (funct3::SRL, funct7::DEFAULT) => ((a as u32) >> (b & SHAMT_MASK)) as i32,
        (funct3::SLT, funct7::DEFAULT) => (a < b) as i32,
        (funct3::SLTU, funct7::DEFAULT) => ((a as u32) < (b as u32)) as i32,
        _ => 0,
    }
}

/// Executes a register-immediate ALU operation.
///
/// Dispatches on funct3. When `alt_sub` is set (bit 30 of the instruction)
/// and funct3 selects add, the operation subtracts the immediate instead.
/// Shift amounts use the low five bits of the immediate. Unknown funct3
/// values return 0.
///
/// # Arguments
///
/// * `f3`      - The funct3 field of the instruction.
/// * `alt_sub` - Whether bit 30 of the instruction selects subtraction.
/// * `a`       - First operand (rs1 value).
/// * `imm`     - Sign-extended immediate operand.
///
/// # Returns
///
/// The signed 32-bit result of the operation.
pub fn imm_op(f3: u32, alt_sub: bool, a: i32, imm: i32) -> i32 {
    match f3 {
        funct3::ADD_SUB => {
            if alt_sub {
                a.wrapping_sub(imm)
            } else {
                a.wrapping_add(imm)
            }
        }
        funct3::AND => a & imm,
        funct3::OR => a | imm,
        funct3::SLL => ((a as u32) << (imm & SHAMT_MASK)) as i32,
        funct3::SRL => ((a as u32) >> (imm & SHAMT_MASK)) as i32,
        funct3::SLT => (a < imm) as i32,
        funct3::SLTU => ((a as u32) < (imm as u32)) as i32,
        _ => 0,
    }
}
