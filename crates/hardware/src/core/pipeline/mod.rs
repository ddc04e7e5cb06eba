//! Instruction pipeline implementation.
//!
//! This module contains the implementation of the five-stage instruction
//! pipeline. It includes the following components:
//! 1. **Hazards:** Detection of read-after-write data hazards (resolved by stalling).
//! 2. **Latches:** Inter-stage buffers for communication between pipeline stages.
//! 3. **Stages:** Implementation of Fetch, Decode, Execute, Memory, and Writeback.

/// Pipeline hazard detection logic.
pub mod hazards;

/// Inter-stage pipeline latches (IF/ID, ID/EX, EX/MEM, MEM/WB).
pub mod latches;

/// Pipeline stage implementations (fetch, decode, execute, memory, writeback).
pub mod stages;
