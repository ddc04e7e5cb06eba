//! General-Purpose Register File.
//!
//! This module implements the 32-entry signed register file. It performs the
//! following:
//! 1. **Storage:** Maintains 32 signed 32-bit registers (`x0`-`x31`).
//! 2. **Invariant Enforcement:** Ensures that register `x0` is hardwired to zero.
//! 3. **Debugging:** Provides utilities for dumping the complete register state.

use crate::common::constants::NUM_REGISTERS;
use crate::isa::abi;

/// General-purpose register file.
///
/// Contains 32 signed 32-bit registers. Register `x0` is hardwired to zero:
/// reads return 0 and writes are silently dropped.
#[derive(Clone)]
pub struct RegisterFile {
    regs: [i32; NUM_REGISTERS],
}

impl RegisterFile {
    /// Creates a new register file with all registers initialized to zero.
    pub fn new() -> Self {
        Self {
            regs: [0; NUM_REGISTERS],
        }
    }

    /// Reads a register value.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31). Register `x0` always returns 0.
    pub fn read(&self, idx: usize) -> i32 {
        if idx == 0 { 0 } else { self.regs[idx] }
    }

    /// Writes a value to a register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31). Writes to `x0` are ignored.
    /// * `val` - The signed 32-bit value to write.
    pub fn write(&mut self, idx: usize, val: i32) {
        if idx != 0 {
            self.regs[idx] = val;
        }
    }

    /// Resets every register to zero.
    pub fn clear(&mut self) {
        self.regs = [0; NUM_REGISTERS];
    }

    /// Returns a copy of all 32 register values.
    pub fn snapshot(&self) -> [i32; NUM_REGISTERS] {
        self.regs
    }

    /// Dumps the contents of all registers to stdout.
    ///
    /// Displays registers four per row with their ABI names.
    pub fn dump(&self) {
        for row in (0..NUM_REGISTERS).step_by(4) {
            for reg in row..row + 4 {
                print!(
                    "x{:<2}({:>5}) = {:<11}",
                    reg,
                    abi::reg_name(reg),
                    self.regs[reg]
                );
            }
            println!();
        }
    }
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}
