//! Configuration system for the pipeline simulator.
//!
//! This module defines the configuration structures used to parameterize the
//! simulator. It provides:
//! 1. **Defaults:** Baseline hardware constants (memory geometry, start PC).
//! 2. **Structures:** Hierarchical config for general settings and memory.
//!
//! Configuration is supplied as JSON by an embedding application, or use
//! `Config::default()` for the CLI.

use serde::Deserialize;

use crate::common::constants;

/// Default configuration constants for the simulator.
mod defaults {
    use super::constants;

    /// Initial program counter at reset.
    pub const START_PC: u32 = 0;

    /// Instruction memory capacity in words.
    pub const IMEM_WORDS: usize = constants::IMEM_WORDS;

    /// Data memory capacity in words.
    pub const DMEM_WORDS: usize = constants::DMEM_WORDS;
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use rv32pipe_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.general.trace_cycles, false);
/// assert_eq!(config.memory.imem_words, 512);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// General simulation settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Memory geometry.
    #[serde(default)]
    pub memory: MemoryConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            memory: MemoryConfig::default(),
        }
    }
}

/// General simulation settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Emit a per-stage trace and pipeline diagram to stderr each cycle.
    #[serde(default)]
    pub trace_cycles: bool,

    /// Initial PC value (byte address).
    #[serde(default = "GeneralConfig::default_start_pc")]
    pub start_pc: u32,
}

impl GeneralConfig {
    /// Returns the default starting program counter.
    fn default_start_pc() -> u32 {
        defaults::START_PC
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_cycles: false,
            start_pc: defaults::START_PC,
        }
    }
}

/// Memory geometry configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    /// Instruction memory capacity in words.
    #[serde(default = "MemoryConfig::default_imem_words")]
    pub imem_words: usize,

    /// Data memory capacity in words.
    #[serde(default = "MemoryConfig::default_dmem_words")]
    pub dmem_words: usize,
}

impl MemoryConfig {
    /// Returns the default instruction memory capacity.
    fn default_imem_words() -> usize {
        defaults::IMEM_WORDS
    }

    /// Returns the default data memory capacity.
    fn default_dmem_words() -> usize {
        defaults::DMEM_WORDS
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            imem_words: defaults::IMEM_WORDS,
            dmem_words: defaults::DMEM_WORDS,
        }
    }
}
