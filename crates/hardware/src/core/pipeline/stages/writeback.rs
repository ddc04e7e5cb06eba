//! Writeback (WB) Stage.
//!
//! This module implements the final stage of the instruction pipeline. It
//! commits results to the register file and advances the retired-instruction
//! counter. Bubbles do nothing: they are not counted as retired instructions.
//!
//! A non-standard extension of the modeled machine is reproduced here: for a
//! register-register signed multiply, the upper 32 bits of the full 64-bit
//! product are additionally written into `rd + 1` (when `rd < 31`). The
//! product is recomputed from the register file at writeback time, after the
//! low word has been committed to `rd`.

use crate::common::constants::NUM_REGISTERS;
use crate::core::Cpu;
use crate::isa::instruction::InstructionBits;
use crate::isa::{rv32i::opcodes, rv32m};

/// Executes the writeback stage.
///
/// On a bubble, does nothing. Otherwise commits the load data (for loads) or
/// the ALU result (for the register-writing opcodes) to `rd` when `rd` is
/// nonzero, applies the multiply upper-half write, and increments the
/// retired-instruction counter. Register `x0` stays zero throughout: the
/// register file drops every write to it.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state.
pub fn wb_stage(cpu: &mut Cpu) {
    if !cpu.mem_wb.valid {
        return;
    }

    let wb = cpu.mem_wb;
    let inst = wb.inst;
    let rd = inst.rd();
    cpu.stats.util_writeback += 1;

    if rd != 0 {
        match inst.opcode() {
            opcodes::OP_LOAD => {
                if cpu.trace {
                    eprintln!("WB  x{} <= {} (load)", rd, wb.lmd);
                }
                cpu.regs.write(rd, wb.lmd);
            }
            opcodes::OP_REG
            | opcodes::OP_IMM
            | opcodes::OP_LUI
            | opcodes::OP_JAL
            | opcodes::OP_JALR => {
                if cpu.trace {
                    eprintln!("WB  x{} <= {}", rd, wb.alu);
                }
                cpu.regs.write(rd, wb.alu);

                let is_mul = inst.opcode() == opcodes::OP_REG
                    && inst.funct3() == rv32m::funct3::MUL
                    && inst.funct7() == rv32m::M_EXTENSION;
                if is_mul && rd < NUM_REGISTERS - 1 {
                    let a = cpu.regs.read(inst.rs1()) as i64;
                    let b = cpu.regs.read(inst.rs2()) as i64;
                    let product = a.wrapping_mul(b);
                    cpu.regs.write(rd + 1, (product >> 32) as i32);
                }
            }
            _ => {}
        }
    }

    cpu.stats.instructions_retired += 1;
}
