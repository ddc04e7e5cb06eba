//! Core processor implementation.
//!
//! This module contains the main CPU implementation including the instruction
//! pipeline, the execution units, and the cycle driver that coordinates them.

/// CPU state ownership and the cycle driver.
pub mod cpu;

/// Instruction pipeline implementation (stages, latches, hazards).
pub mod pipeline;

/// Execution units (ALU).
pub mod units;

pub use self::cpu::Cpu;
