//! Common utilities and types used throughout the pipeline simulator.
//!
//! This module provides fundamental building blocks that are shared across all
//! components of the simulator. It includes:
//! 1. **Constants:** Memory geometry and instruction field masks/shifts.
//! 2. **Register File:** The 32-entry signed register file with a hardwired zero register.
//! 3. **Error Handling:** The program-load error type (the only fallible surface).

/// Common constants used throughout the simulator.
pub mod constants;

/// Error types for program loading.
pub mod error;

/// Register file implementation.
pub mod reg;

pub use error::LoadError;
pub use reg::RegisterFile;
