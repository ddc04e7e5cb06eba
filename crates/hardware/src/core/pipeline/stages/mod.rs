//! Pipeline stage implementations.
//!
//! Each stage is a free function over `&mut Cpu` that reads the previous
//! cycle's upstream latch and writes the `_next` value of its downstream
//! latch. The cycle driver evaluates the stages in reverse pipeline order
//! (WB, MEM, EX, ID, IF) and commits all `_next` values at the end of the
//! cycle.

/// Instruction Decode (ID) stage.
pub mod decode;

/// Execute (EX) stage.
pub mod execute;

/// Instruction Fetch (IF) stage.
pub mod fetch;

/// Memory Access (MEM) stage.
pub mod memory;

/// Writeback (WB) stage.
pub mod writeback;

pub use decode::decode_stage;
pub use execute::execute_stage;
pub use fetch::fetch_stage;
pub use memory::mem_stage;
pub use writeback::wb_stage;
