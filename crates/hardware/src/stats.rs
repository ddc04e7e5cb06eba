//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for the pipeline simulator. It
//! provides:
//! 1. **Cycle and IPC:** Total cycles, retired instructions, and derived metrics (CPI, IPC).
//! 2. **Stage utilization:** Busy-cycle counts for each of the five stages.
//! 3. **Stalls and flushes:** Data-hazard stall cycles and control-transfer squashes.

use std::time::Instant;

/// Simulation statistics structure tracking all performance metrics.
#[derive(Clone)]
pub struct SimStats {
    start_time: Instant,

    /// Total simulator cycles elapsed.
    pub cycles: u64,
    /// Number of instructions committed (retired) in writeback.
    pub instructions_retired: u64,

    /// Cycles in which the fetch stage produced an instruction.
    pub util_fetch: u64,
    /// Cycles in which the decode stage produced an instruction.
    pub util_decode: u64,
    /// Cycles in which the execute stage processed an instruction.
    pub util_execute: u64,
    /// Cycles in which the memory stage processed an instruction.
    pub util_memory: u64,
    /// Cycles in which the writeback stage retired an instruction.
    pub util_writeback: u64,

    /// Stall cycles caused by read-after-write data hazards.
    pub stalls_data: u64,
    /// Control transfers that squashed a speculatively-fetched instruction.
    pub flushes_control: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_retired: 0,
            util_fetch: 0,
            util_decode: 0,
            util_execute: 0,
            util_memory: 0,
            util_writeback: 0,
            stalls_data: 0,
            flushes_control: 0,
        }
    }
}

impl SimStats {
    /// Prints all statistics to stdout.
    ///
    /// Reports totals, IPC/CPI, per-stage utilization percentages, and stall
    /// and flush counts. Percentage math is guarded against a zero cycle
    /// count.
    pub fn print(&self) {
        let seconds = self.start_time.elapsed().as_secs_f64();
        let cyc = if self.cycles == 0 { 1 } else { self.cycles };
        let instr = if self.instructions_retired == 0 {
            1
        } else {
            self.instructions_retired
        };

        let ipc = self.instructions_retired as f64 / cyc as f64;
        let cpi = cyc as f64 / instr as f64;

        println!("\n==========================================================");
        println!("PIPELINE SIMULATION STATISTICS");
        println!("==========================================================");
        println!("host_seconds             {:.4} s", seconds);
        println!("sim_cycles               {}", self.cycles);
        println!("sim_insts                {}", self.instructions_retired);
        println!("sim_ipc                  {:.4}", ipc);
        println!("sim_cpi                  {:.4}", cpi);
        println!("----------------------------------------------------------");
        println!("STAGE UTILIZATION");
        let pct = |busy: u64| (busy as f64 / cyc as f64) * 100.0;
        println!(
            "  stage.fetch            {} ({:.2}%)",
            self.util_fetch,
            pct(self.util_fetch)
        );
        println!(
            "  stage.decode           {} ({:.2}%)",
            self.util_decode,
            pct(self.util_decode)
        );
        println!(
            "  stage.execute          {} ({:.2}%)",
            self.util_execute,
            pct(self.util_execute)
        );
        println!(
            "  stage.memory           {} ({:.2}%)",
            self.util_memory,
            pct(self.util_memory)
        );
        println!(
            "  stage.writeback        {} ({:.2}%)",
            self.util_writeback,
            pct(self.util_writeback)
        );
        println!("----------------------------------------------------------");
        println!("HAZARDS");
        println!(
            "  stalls.data            {} ({:.2}%)",
            self.stalls_data,
            pct(self.stalls_data)
        );
        println!("  flushes.control        {}", self.flushes_control);
        println!("==========================================================");
    }
}
