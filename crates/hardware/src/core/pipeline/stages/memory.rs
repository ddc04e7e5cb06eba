//! Memory Access (MEM) Stage.
//!
//! This module implements the fourth stage of the instruction pipeline. It
//! handles word-granularity load and store operations against the
//! word-addressed data memory. Accesses outside the memory are silently
//! ignored: a load leaves the load-memory-data register at zero and a store
//! is dropped. All other opcodes pass through with no memory activity.

use crate::common::constants::WORD_BYTES;
use crate::core::Cpu;
use crate::core::pipeline::latches::MemWb;
use crate::isa::instruction::InstructionBits;
use crate::isa::rv32i::opcodes;

/// Executes the memory stage.
///
/// Copies the instruction and ALU result into the next MEM/WB latch. Loads
/// read `dmem[alu / 4]` into the LMD field and stores write the latched rs2
/// value to `dmem[alu / 4]`, each only when the index is in range.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state.
pub fn mem_stage(cpu: &mut Cpu) {
    if !cpu.ex_mem.valid {
        cpu.mem_wb_next = MemWb::bubble();
        return;
    }

    let ex = cpu.ex_mem;
    let mut out = MemWb {
        inst: ex.inst,
        alu: ex.alu,
        lmd: 0,
        valid: true,
    };
    cpu.stats.util_memory += 1;

    // Effective addresses are byte addresses; memory is word-indexed.
    let index = ex.alu / WORD_BYTES as i32;
    let in_range = index >= 0 && (index as usize) < cpu.dmem.len();

    match ex.inst.opcode() {
        opcodes::OP_LOAD => {
            if in_range {
                out.lmd = cpu.dmem[index as usize];
            }
            if cpu.trace {
                eprintln!("MEM load addr={} lmd={}", ex.alu, out.lmd);
            }
        }
        opcodes::OP_STORE => {
            if in_range {
                cpu.dmem[index as usize] = ex.store_data;
            }
            if cpu.trace {
                eprintln!("MEM store addr={} data={}", ex.alu, ex.store_data);
            }
        }
        _ => {}
    }

    cpu.mem_wb_next = out;
}
