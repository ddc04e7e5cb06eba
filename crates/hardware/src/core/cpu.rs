//! CPU state ownership and the cycle driver.
//!
//! This module defines the `Cpu`, which exclusively owns all architectural
//! state (register file, program counter, instruction and data memories) and
//! all microarchitectural state (the four inter-stage latches with their
//! `_next` shadows and the stall/redirect/squash signals). Its `tick` method
//! advances the machine by exactly one clock.
//!
//! The pipeline is a synchronous state machine, not a set of independently
//! scheduled actors: each cycle computes next-latch values from the current
//! latches and commits them atomically at the cycle boundary. Stages are
//! evaluated in reverse pipeline order (WB, MEM, EX, ID, IF) so that every
//! stage observes the previous cycle's view of its upstream latch, and a
//! value written back in cycle *n* is visible to decode in cycle *n + 1*.

use crate::common::RegisterFile;
use crate::common::constants::WORD_BYTES;
use crate::config::Config;
use crate::core::pipeline::latches::{ExMem, IdEx, IfId, MemWb};
use crate::core::pipeline::stages::{decode_stage, execute_stage, fetch_stage, mem_stage, wb_stage};
use crate::stats::SimStats;

/// The pipelined processor model.
///
/// All fields are public for observability: drivers and tests may inspect
/// every latch, flag, and counter between cycles, but mutation is expected to
/// go through `tick`, `reset`, and `load_words`.
pub struct Cpu {
    /// General-purpose register file (x0 hardwired to zero).
    pub regs: RegisterFile,
    /// Program counter (byte address, word-aligned).
    pub pc: u32,
    /// Emit a per-stage trace to stderr while running.
    pub trace: bool,

    /// Word-indexed instruction memory; a stored 0 ends the program.
    pub imem: Vec<u32>,
    /// Word-indexed data memory, initially zero.
    pub dmem: Vec<i32>,

    /// Current IF/ID latch.
    pub if_id: IfId,
    /// Current ID/EX latch.
    pub id_ex: IdEx,
    /// Current EX/MEM latch.
    pub ex_mem: ExMem,
    /// Current MEM/WB latch.
    pub mem_wb: MemWb,

    /// Next-cycle IF/ID value, committed at the cycle boundary.
    pub if_id_next: IfId,
    /// Next-cycle ID/EX value.
    pub id_ex_next: IdEx,
    /// Next-cycle EX/MEM value.
    pub ex_mem_next: ExMem,
    /// Next-cycle MEM/WB value.
    pub mem_wb_next: MemWb,

    /// Raised by decode when a data hazard forces the front end to hold.
    pub stall: bool,
    /// Raised by execute on a control transfer; suppresses this cycle's fetch
    /// and the sequential PC advance.
    pub branch_taken: bool,
    /// Raised by execute on a control transfer; consumed by decode to discard
    /// the instruction fetched behind the transfer.
    pub squash_if_id: bool,

    /// Performance counters.
    pub stats: SimStats,

    start_pc: u32,
}

impl Cpu {
    /// Creates a new CPU with the given configuration.
    ///
    /// Memories are sized per the configuration and zeroed; all latches start
    /// out invalid.
    pub fn new(config: &Config) -> Self {
        Self {
            regs: RegisterFile::new(),
            pc: config.general.start_pc,
            trace: config.general.trace_cycles,
            imem: vec![0; config.memory.imem_words],
            dmem: vec![0; config.memory.dmem_words],
            if_id: IfId::bubble(),
            id_ex: IdEx::bubble(),
            ex_mem: ExMem::bubble(),
            mem_wb: MemWb::bubble(),
            if_id_next: IfId::bubble(),
            id_ex_next: IdEx::bubble(),
            ex_mem_next: ExMem::bubble(),
            mem_wb_next: MemWb::bubble(),
            stall: false,
            branch_taken: false,
            squash_if_id: false,
            stats: SimStats::default(),
            start_pc: config.general.start_pc,
        }
    }

    /// Returns all architectural and microarchitectural state to its initial
    /// values.
    ///
    /// Registers and data memory are zeroed, the PC returns to the configured
    /// start address, every latch becomes a bubble, all signals drop, and the
    /// counters restart. The loaded program is kept.
    pub fn reset(&mut self) {
        self.regs.clear();
        self.pc = self.start_pc;
        self.dmem.fill(0);
        self.if_id = IfId::bubble();
        self.id_ex = IdEx::bubble();
        self.ex_mem = ExMem::bubble();
        self.mem_wb = MemWb::bubble();
        self.if_id_next = IfId::bubble();
        self.id_ex_next = IdEx::bubble();
        self.ex_mem_next = ExMem::bubble();
        self.mem_wb_next = MemWb::bubble();
        self.stall = false;
        self.branch_taken = false;
        self.squash_if_id = false;
        self.stats = SimStats::default();
    }

    /// Places a sequence of machine words into instruction memory starting at
    /// word index 0.
    ///
    /// Words beyond the instruction-memory capacity are ignored.
    pub fn load_words(&mut self, words: &[u32]) {
        for (index, &word) in words.iter().take(self.imem.len()).enumerate() {
            self.imem[index] = word;
        }
    }

    /// Advances the machine by exactly one clock cycle.
    ///
    /// One cycle follows a fixed discipline: snapshot and clear the stall
    /// flag; evaluate WB, MEM, EX, ID back-to-front; evaluate IF unless the
    /// stall was re-raised while already stalled; commit the `_next` latches
    /// (IF/ID only when not stalled); advance the PC sequentially unless
    /// stalled or redirected; clear the redirect flag; count the cycle.
    pub fn tick(&mut self) {
        let was_stalled = self.stall;
        self.stall = false;

        if self.trace {
            self.print_pipeline_diagram();
        }

        wb_stage(self);
        mem_stage(self);
        execute_stage(self);
        decode_stage(self);

        if !(was_stalled && self.stall) {
            fetch_stage(self);
        } else {
            self.if_id_next = self.if_id;
        }

        self.mem_wb = self.mem_wb_next;
        self.ex_mem = self.ex_mem_next;
        self.id_ex = self.id_ex_next;
        if !self.stall {
            self.if_id = self.if_id_next;
        }

        if !self.stall && !self.branch_taken {
            self.pc = self.pc.wrapping_add(WORD_BYTES);
        }
        self.branch_taken = false;

        self.stats.cycles += 1;
    }

    /// Returns whether the program has run to completion.
    ///
    /// Complete means every latch is invalid and the next fetch would fall
    /// out of range or read the zero end-of-program sentinel.
    pub fn is_program_complete(&self) -> bool {
        let drained = !self.if_id.valid && !self.id_ex.valid && !self.ex_mem.valid
            && !self.mem_wb.valid;
        let index = (self.pc / WORD_BYTES) as usize;
        drained && self.imem.get(index).is_none_or(|&word| word == 0)
    }

    /// Number of instructions that have retired in writeback.
    pub fn instructions_completed(&self) -> u64 {
        self.stats.instructions_retired
    }

    /// Number of clock cycles simulated since the last reset.
    pub fn total_cycles(&self) -> u64 {
        self.stats.cycles
    }

    /// Reads a word of instruction memory, if the index is in range.
    pub fn inst_word(&self, index: usize) -> Option<u32> {
        self.imem.get(index).copied()
    }

    /// Reads a word of data memory, if the index is in range.
    pub fn data_word(&self, index: usize) -> Option<i32> {
        self.dmem.get(index).copied()
    }

    /// Returns a copy of all 32 register values.
    pub fn registers(&self) -> [i32; 32] {
        self.regs.snapshot()
    }

    /// Dumps the PC and the full register file to stdout.
    pub fn dump_state(&self) {
        println!("PC = {} ({:#010x})", self.pc, self.pc);
        self.regs.dump();
    }

    /// Prints a compact five-slot occupancy diagram of the pipeline to
    /// stderr.
    pub fn print_pipeline_diagram(&self) {
        let slot = |valid: bool, inst: u32| -> String {
            if valid {
                format!("[{:08x}]", inst)
            } else {
                format!("[{:^8}]", "bubble")
            }
        };

        let fetch_index = (self.pc / WORD_BYTES) as usize;
        let fetching = self
            .imem
            .get(fetch_index)
            .is_some_and(|&word| word != 0 && !self.branch_taken);

        eprintln!(
            "IF{} ID{} EX{} MEM{} WB{}",
            slot(fetching, self.imem.get(fetch_index).copied().unwrap_or(0)),
            slot(self.if_id.valid, self.if_id.inst),
            slot(self.id_ex.valid, self.id_ex.inst),
            slot(self.ex_mem.valid, self.ex_mem.inst),
            slot(self.mem_wb.valid, self.mem_wb.inst),
        );
    }
}
