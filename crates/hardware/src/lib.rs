//! Cycle-accurate five-stage RV32 pipeline simulator library.
//!
//! This crate implements a classic in-order five-stage pipeline (IF, ID, EX,
//! MEM, WB) over a 32-bit RISC-V integer subset. It provides:
//! 1. **Core:** Stage functions, inter-stage latches, hazard detection, and the cycle driver.
//! 2. **ISA:** Field extraction and per-format immediate decoding for the RV32 subset.
//! 3. **Memory:** Word-addressed instruction and data memories with silent out-of-range handling.
//! 4. **Simulation:** Hex text program loader, configuration, and statistics collection.
//!
//! Data hazards are resolved purely by stalling (no operand forwarding), and
//! control transfers resolve in EX with a one-slot fetch squash. The pipeline
//! itself never raises runtime errors; every pathological input degrades to a
//! defined no-op so that simulation always progresses.

/// Common types and constants (memory geometry, register file, load errors).
pub mod common;
/// Simulator configuration (defaults and hierarchical config structures).
pub mod config;
/// CPU core (pipeline stages, latches, hazards, execution units, cycle driver).
pub mod core;
/// Instruction set (field extraction, immediate decoding, RV32I/M constants).
pub mod isa;
/// Hex text program loader.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Main CPU type; holds all architectural and microarchitectural state.
pub use crate::core::Cpu;
