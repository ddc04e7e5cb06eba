//! Execute (EX) Stage.
//!
//! This module implements the third stage of the pipeline. It performs the
//! following:
//! 1. **Arithmetic Execution:** ALU operations for register-register and
//!    register-immediate forms, and effective-address computation for memory
//!    operations.
//! 2. **Branch Resolution:** Evaluates branch conditions and jump targets.
//! 3. **PC Redirect:** Updates the program counter immediately on any control
//!    transfer and requests a one-slot squash of the instruction fetched
//!    behind it.
//!
//! Unknown opcode or function-code combinations pass through as no-ops with a
//! zero result; there is no illegal-instruction trap.

use crate::common::constants::{IMM_SUB_BIT_SHIFT, WORD_BYTES};
use crate::core::Cpu;
use crate::core::pipeline::latches::ExMem;
use crate::core::units::alu;
use crate::isa::instruction::InstructionBits;
use crate::isa::rv32i::{funct3, opcodes};

/// Bit mask ensuring JALR target addresses are 2-byte aligned.
const JALR_ALIGNMENT_MASK: u32 = !1;

/// Executes the instruction execute stage.
///
/// Consumes the ID/EX latch and produces the next EX/MEM value. Branches and
/// jumps mutate the PC directly and raise `branch_taken` (skip the sequential
/// PC advance this cycle) and `squash_if_id` (invalidate the instruction
/// fetched behind the transfer). Branch targets are computed relative to the
/// instruction's own address, `npc - 4`.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state.
pub fn execute_stage(cpu: &mut Cpu) {
    if !cpu.id_ex.valid {
        cpu.ex_mem_next = ExMem::bubble();
        return;
    }

    let id = cpu.id_ex;
    let inst = id.inst;
    let opcode = inst.opcode();

    let mut out = ExMem {
        inst,
        store_data: id.rv2,
        alu: 0,
        cond: false,
        valid: true,
    };
    cpu.stats.util_execute += 1;

    match opcode {
        opcodes::OP_REG => {
            out.alu = alu::reg_op(inst.funct3(), inst.funct7(), id.rv1, id.rv2);
        }
        opcodes::OP_IMM => {
            let alt_sub = ((inst >> IMM_SUB_BIT_SHIFT) & 1) != 0;
            out.alu = alu::imm_op(inst.funct3(), alt_sub, id.rv1, id.imm);
        }
        opcodes::OP_LOAD | opcodes::OP_STORE => {
            out.alu = id.rv1.wrapping_add(id.imm);
        }
        opcodes::OP_BRANCH => {
            if inst.funct3() == funct3::BEQ {
                out.cond = id.rv1 == id.rv2;
            }
            let target = id
                .npc
                .wrapping_sub(WORD_BYTES)
                .wrapping_add(id.imm as u32);

            cpu.pc = if out.cond { target } else { id.npc };
            cpu.branch_taken = true;
            cpu.squash_if_id = true;
            cpu.stats.flushes_control += 1;
            if cpu.trace {
                eprintln!(
                    "EX  branch cond={} redirect pc={:#010x}",
                    out.cond, cpu.pc
                );
            }
        }
        opcodes::OP_LUI => {
            out.alu = id.imm;
        }
        opcodes::OP_JAL => {
            out.alu = id.npc as i32;
            cpu.pc = id
                .npc
                .wrapping_sub(WORD_BYTES)
                .wrapping_add(id.imm as u32);
            cpu.branch_taken = true;
            cpu.squash_if_id = true;
            cpu.stats.flushes_control += 1;
            if cpu.trace {
                eprintln!("EX  jal redirect pc={:#010x}", cpu.pc);
            }
        }
        opcodes::OP_JALR => {
            out.alu = id.npc as i32;
            cpu.pc = (id.rv1.wrapping_add(id.imm) as u32) & JALR_ALIGNMENT_MASK;
            cpu.branch_taken = true;
            cpu.squash_if_id = true;
            cpu.stats.flushes_control += 1;
            if cpu.trace {
                eprintln!("EX  jalr redirect pc={:#010x}", cpu.pc);
            }
        }
        // Unknown opcodes pass through with a zero result.
        _ => {}
    }

    cpu.ex_mem_next = out;
}
