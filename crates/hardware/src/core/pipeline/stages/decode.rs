//! Instruction Decode (ID) Stage.
//!
//! This module implements the second stage of the pipeline. It performs the
//! following:
//! 1. **Squash Consumption:** Discards the speculatively-fetched instruction
//!    after a control transfer resolved in execute.
//! 2. **Hazard Detection:** Scans ID/EX and EX/MEM for read-after-write
//!    hazards and asserts a stall when one is found.
//! 3. **Register Read:** Reads both source operands from the register file.
//! 4. **Immediate Formation:** Forms the sign-extended immediate for the
//!    instruction's encoding format.

use crate::core::Cpu;
use crate::core::pipeline::hazards;
use crate::core::pipeline::latches::IdEx;
use crate::isa::decode::decode;

/// Executes the instruction decode stage.
///
/// Consumes a pending squash by emitting a bubble. Otherwise, if IF/ID holds
/// a live instruction and a data hazard is detected (control transfers are
/// exempt), the stage emits a bubble downstream, holds the IF/ID latch, and
/// raises the stall flag for the cycle driver. In the normal case it
/// populates the next ID/EX latch with the operand values and immediate.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state.
pub fn decode_stage(cpu: &mut Cpu) {
    if cpu.squash_if_id {
        cpu.id_ex_next = IdEx::bubble();
        cpu.squash_if_id = false;
        if cpu.trace {
            eprintln!("ID  squashed fetched instruction after control transfer");
        }
        return;
    }

    if !cpu.if_id.valid {
        cpu.id_ex_next = IdEx::bubble();
        return;
    }

    let d = decode(cpu.if_id.inst);

    if hazards::raw_hazard(&cpu.if_id, &cpu.id_ex, &cpu.ex_mem)
        && !hazards::is_control_transfer(d.opcode)
    {
        if cpu.trace {
            eprintln!("ID  inst={:#010x} # RAW hazard, stalling", cpu.if_id.inst);
        }
        cpu.id_ex_next = IdEx::bubble();
        cpu.if_id_next = cpu.if_id;
        cpu.stall = true;
        cpu.stats.stalls_data += 1;
        return;
    }

    if cpu.trace {
        eprintln!(
            "ID  inst={:#010x} rs1=x{} rs2=x{} imm={}",
            cpu.if_id.inst, d.rs1, d.rs2, d.imm
        );
    }

    cpu.id_ex_next = IdEx {
        inst: cpu.if_id.inst,
        npc: cpu.if_id.npc,
        rv1: cpu.regs.read(d.rs1),
        rv2: cpu.regs.read(d.rs2),
        imm: d.imm,
        valid: true,
    };
    cpu.stats.util_decode += 1;
}
