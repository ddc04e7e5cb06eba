//! Instruction Fetch (IF) Stage.
//!
//! This module implements the first stage of the instruction pipeline. It
//! fetches the word addressed by the current program counter from instruction
//! memory and deposits it, together with the next-sequential PC, into the
//! IF/ID latch. A control transfer resolved by the execute stage in the same
//! cycle suppresses the fetch, and a zero or out-of-range word produces a
//! bubble; a stored word of zero is how the end of the instruction stream is
//! detected without a dedicated halt instruction.

use crate::common::constants::WORD_BYTES;
use crate::core::Cpu;
use crate::core::pipeline::latches::IfId;

/// Executes the instruction fetch stage.
///
/// If the execute stage redirected the PC this cycle, the next IF/ID value is
/// a bubble. Otherwise the word at `pc / 4` is fetched; a nonzero in-range
/// word populates the latch and counts the stage as busy, anything else
/// produces a bubble.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state.
pub fn fetch_stage(cpu: &mut Cpu) {
    if cpu.branch_taken {
        cpu.if_id_next = IfId::bubble();
        return;
    }

    let index = (cpu.pc / WORD_BYTES) as usize;
    match cpu.imem.get(index) {
        Some(&inst) if inst != 0 => {
            if cpu.trace {
                eprintln!("IF  pc={:#010x} inst={:#010x}", cpu.pc, inst);
            }
            cpu.if_id_next = IfId {
                inst,
                npc: cpu.pc.wrapping_add(WORD_BYTES),
                valid: true,
            };
            cpu.stats.util_fetch += 1;
        }
        _ => {
            cpu.if_id_next = IfId::bubble();
        }
    }
}
