//! Pipeline latch structures for inter-stage communication.
//!
//! This module defines the records carried between the five pipeline stages:
//! Fetch → Decode → Execute → Memory → Writeback.
//!
//! Each latch carries a `valid` flag alongside the fields its downstream stage
//! needs. An invalid latch is a *bubble*: it propagates as a no-op and never
//! retires. The default value of every latch type is a bubble.

/// The IF/ID pipeline latch (Fetch to Decode).
///
/// Holds the fetched instruction word together with the byte address of the
/// sequentially-following word.
#[derive(Clone, Copy, Default, Debug)]
pub struct IfId {
    /// Fetched 32-bit instruction encoding.
    pub inst: u32,
    /// Next-sequential program counter (fetch address + 4).
    pub npc: u32,
    /// Whether this latch holds a live instruction.
    pub valid: bool,
}

/// The ID/EX pipeline latch (Decode to Execute).
///
/// Holds the decoded operand values and the sign-extended immediate for the
/// instruction's encoding format.
#[derive(Clone, Copy, Default, Debug)]
pub struct IdEx {
    /// 32-bit instruction encoding.
    pub inst: u32,
    /// Next-sequential program counter carried from fetch.
    pub npc: u32,
    /// Value read from the first source register (rs1).
    pub rv1: i32,
    /// Value read from the second source register (rs2).
    pub rv2: i32,
    /// Sign-extended immediate value (0 when the format has none).
    pub imm: i32,
    /// Whether this latch holds a live instruction.
    pub valid: bool,
}

/// The EX/MEM pipeline latch (Execute to Memory).
#[derive(Clone, Copy, Default, Debug)]
pub struct ExMem {
    /// 32-bit instruction encoding.
    pub inst: u32,
    /// Data to be stored (the rs2 value, for store instructions).
    pub store_data: i32,
    /// Functional-unit result or effective byte address.
    pub alu: i32,
    /// Branch-taken flag (meaningful only for branch instructions).
    pub cond: bool,
    /// Whether this latch holds a live instruction.
    pub valid: bool,
}

/// The MEM/WB pipeline latch (Memory to Writeback).
#[derive(Clone, Copy, Default, Debug)]
pub struct MemWb {
    /// 32-bit instruction encoding.
    pub inst: u32,
    /// Functional-unit result carried through from execute.
    pub alu: i32,
    /// Load-memory-data: the value read by a load, awaiting writeback.
    pub lmd: i32,
    /// Whether this latch holds a live instruction.
    pub valid: bool,
}

impl IfId {
    /// Returns an invalid (bubble) latch value.
    pub fn bubble() -> Self {
        Self::default()
    }
}

impl IdEx {
    /// Returns an invalid (bubble) latch value.
    pub fn bubble() -> Self {
        Self::default()
    }
}

impl ExMem {
    /// Returns an invalid (bubble) latch value.
    pub fn bubble() -> Self {
        Self::default()
    }
}

impl MemWb {
    /// Returns an invalid (bubble) latch value.
    pub fn bubble() -> Self {
        Self::default()
    }
}
