use rv32pipe_core::config::Config;
use rv32pipe_core::core::Cpu;

/// Upper bound on cycles for `run_to_completion`; a program that has not
/// drained by then is treated as a test failure rather than a hang.
const COMPLETION_CYCLE_LIMIT: u64 = 10_000;

pub struct TestContext {
    pub cpu: Cpu,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    pub fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let config = Config::default();
        Self {
            cpu: Cpu::new(&config),
        }
    }

    /// Load a sequence of 32-bit instructions into instruction memory at
    /// word index 0.
    pub fn load_program(mut self, instructions: &[u32]) -> Self {
        self.cpu.load_words(instructions);
        self
    }

    /// Set a general-purpose register value.
    pub fn set_reg(&mut self, reg: usize, val: i32) {
        self.cpu.regs.write(reg, val);
    }

    /// Read a general-purpose register value.
    pub fn get_reg(&self, reg: usize) -> i32 {
        self.cpu.regs.read(reg)
    }

    /// Run the CPU for a specific number of cycles.
    pub fn run(&mut self, cycles: u64) {
        for _ in 0..cycles {
            self.cpu.tick();
        }
    }

    /// Run the CPU until the program completes; returns the cycle count.
    pub fn run_to_completion(&mut self) -> u64 {
        while !self.cpu.is_program_complete() {
            assert!(
                self.cpu.total_cycles() < COMPLETION_CYCLE_LIMIT,
                "program did not complete within {} cycles",
                COMPLETION_CYCLE_LIMIT
            );
            self.cpu.tick();
        }
        self.cpu.total_cycles()
    }
}
