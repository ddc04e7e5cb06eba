//! Data Hazard Detection.
//!
//! This module implements the logic for maintaining pipeline consistency when
//! data dependencies exist between in-flight instructions. It provides:
//! 1. **Operand Usage:** Which opcodes actually read rs1 and rs2.
//! 2. **Producer Classification:** Which opcodes write a destination register.
//! 3. **RAW Scan:** Detection of read-after-write hazards against the ID/EX
//!    and EX/MEM latches.
//!
//! There is no operand forwarding: the only remedy for a detected hazard is a
//! pipeline stall. Control-transfer instructions (branches, JAL, JALR) are
//! never stalled; the execute stage resolves them against whatever operand
//! values were latched at decode time.

use crate::core::pipeline::latches::{ExMem, IdEx, IfId};
use crate::isa::instruction::InstructionBits;
use crate::isa::rv32i::opcodes;

/// Returns whether an instruction with this opcode reads its rs1 field.
///
/// Every supported instruction reads rs1 except LUI and JAL, whose rs1 bits
/// are part of the immediate.
pub fn reads_rs1(opcode: u32) -> bool {
    opcode != opcodes::OP_LUI && opcode != opcodes::OP_JAL
}

/// Returns whether an instruction with this opcode reads its rs2 field.
///
/// Only register-register arithmetic, stores, and branches carry a live rs2.
pub fn reads_rs2(opcode: u32) -> bool {
    matches!(
        opcode,
        opcodes::OP_REG | opcodes::OP_STORE | opcodes::OP_BRANCH
    )
}

/// Returns whether an instruction with this opcode writes a destination
/// register when it retires.
pub fn writes_register(opcode: u32) -> bool {
    matches!(
        opcode,
        opcodes::OP_REG
            | opcodes::OP_IMM
            | opcodes::OP_LOAD
            | opcodes::OP_LUI
            | opcodes::OP_JAL
            | opcodes::OP_JALR
    )
}

/// Returns whether this opcode is a control transfer (branch, JAL, or JALR).
///
/// Control transfers are exempt from hazard stalls: they proceed to execute
/// with the operand values available at decode time.
pub fn is_control_transfer(opcode: u32) -> bool {
    matches!(
        opcode,
        opcodes::OP_BRANCH | opcodes::OP_JAL | opcodes::OP_JALR
    )
}

/// Checks whether the instruction in IF/ID has a read-after-write hazard
/// against a producer still in flight in ID/EX or EX/MEM.
///
/// A hazard exists when a valid downstream instruction writes a nonzero
/// destination register that matches a register the IF/ID instruction reads.
/// A producer that has already reached MEM/WB is not a hazard: the stages
/// are evaluated back-to-front each cycle, so its writeback lands before the
/// consumer's decode runs.
///
/// # Arguments
///
/// * `if_id`  - The IF/ID latch holding the candidate consumer.
/// * `id_ex`  - The ID/EX latch (producer one stage ahead).
/// * `ex_mem` - The EX/MEM latch (producer two stages ahead).
///
/// # Returns
///
/// `true` if the consumer must not enter execute this cycle.
pub fn raw_hazard(if_id: &IfId, id_ex: &IdEx, ex_mem: &ExMem) -> bool {
    if !if_id.valid {
        return false;
    }

    let inst = if_id.inst;
    let opcode = inst.opcode();
    let rs1 = inst.rs1();
    let rs2 = inst.rs2();
    let uses_rs1 = reads_rs1(opcode);
    let uses_rs2 = reads_rs2(opcode);

    let conflicts = |producer: u32| -> bool {
        let rd = producer.rd();
        if rd == 0 || !writes_register(producer.opcode()) {
            return false;
        }
        (uses_rs1 && rd == rs1) || (uses_rs2 && rd == rs2)
    };

    (id_ex.valid && conflicts(id_ex.inst)) || (ex_mem.valid && conflicts(ex_mem.inst))
}
