//! Five-stage pipeline simulator CLI.
//!
//! This binary provides the stepping driver around the simulation core. It
//! performs:
//! 1. **Batch run:** Execute a hex program to completion and print statistics.
//! 2. **Interactive stepping:** Step a chosen number of cycles or whole
//!    instructions at a time, inspect latches, registers, memory, and
//!    statistics between steps.
//!
//! All human-readable formatting lives here; the core exposes only state.

use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::process;

use rv32pipe_core::config::Config;
use rv32pipe_core::core::Cpu;
use rv32pipe_core::sim::loader;

/// Cap on batch-mode cycles so a malformed program cannot spin forever.
const DEFAULT_MAX_CYCLES: u64 = 1_000_000;

#[derive(Parser, Debug)]
#[command(
    name = "rv32pipe",
    author,
    version,
    about = "Cycle-accurate five-stage RV32 pipeline simulator",
    long_about = "Run a hex machine-code program through a classic five-stage in-order \
pipeline.\n\nPrograms are text files with one 32-bit hex word per line; '#' starts a \
comment line and a stored word of 0 ends the program.\n\nExamples:\n  rv32pipe run -f \
program.hex\n  rv32pipe run -f program.hex --trace\n  rv32pipe step -f program.hex \
--instructions"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a program to completion and print final state and statistics.
    Run {
        /// Hex machine-code file to execute.
        #[arg(short, long)]
        file: String,

        /// Emit a per-cycle pipeline trace to stderr.
        #[arg(long)]
        trace: bool,

        /// Abort after this many cycles.
        #[arg(long, default_value_t = DEFAULT_MAX_CYCLES)]
        max_cycles: u64,
    },

    /// Step through a program interactively, cycle by cycle.
    Step {
        /// Hex machine-code file to execute.
        #[arg(short, long)]
        file: String,

        /// Step whole instructions instead of single cycles.
        #[arg(long)]
        instructions: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            file,
            trace,
            max_cycles,
        } => cmd_run(&file, trace, max_cycles),
        Commands::Step { file, instructions } => cmd_step(&file, instructions),
    }
}

/// Builds a CPU and loads the program, exiting the process on failure.
fn load_or_exit(file: &str, trace: bool) -> Cpu {
    let mut config = Config::default();
    config.general.trace_cycles = trace;

    let mut cpu = Cpu::new(&config);
    match loader::load_program(&mut cpu, file) {
        Ok(words) => {
            println!("Loaded {} words from {}", words, file);
            cpu
        }
        Err(e) => {
            eprintln!("[!] FATAL: {}", e);
            process::exit(1);
        }
    }
}

/// Runs the simulator to completion and prints final state and statistics.
fn cmd_run(file: &str, trace: bool, max_cycles: u64) {
    let mut cpu = load_or_exit(file, trace);

    while !cpu.is_program_complete() {
        if cpu.total_cycles() >= max_cycles {
            eprintln!(
                "[!] Aborted: {} cycles elapsed without completion",
                max_cycles
            );
            break;
        }
        cpu.tick();
    }

    println!("\nProgram execution completed!");
    cpu.dump_state();
    cpu.stats.print();
}

/// Interactive stepping loop with an options menu between step groups.
fn cmd_step(file: &str, step_instructions: bool) {
    let mut cpu = load_or_exit(file, false);

    println!("========================================");
    println!("   Five-Stage Pipeline Simulator");
    println!("========================================");

    while !cpu.is_program_complete() {
        let unit = if step_instructions {
            "instructions"
        } else {
            "cycles"
        };
        let steps: u64 = prompt_parsed(&format!("\nNumber of {} to execute: ", unit));

        for _ in 0..steps {
            if cpu.is_program_complete() {
                break;
            }
            if step_instructions {
                // Run cycles until one more instruction retires.
                let before = cpu.instructions_completed();
                while cpu.instructions_completed() == before && !cpu.is_program_complete() {
                    cpu.tick();
                }
            } else {
                cpu.tick();
            }
            display_state(&cpu);
        }

        if cpu.is_program_complete() {
            break;
        }
        if !options_menu(&cpu) {
            break;
        }
    }

    println!("\nProgram execution completed!");
    cpu.stats.print();
}

/// Presents the options menu; returns false when the user quits.
fn options_menu(cpu: &Cpu) -> bool {
    loop {
        println!("\n  c - Continue execution");
        println!("  v - View pipeline visualization");
        println!("  m - View memory contents");
        println!("  s - View statistics");
        println!("  q - Quit and show final statistics");
        let choice = prompt("\nEnter your choice: ");

        match choice.trim().to_ascii_lowercase().as_str() {
            "c" => return true,
            "v" => display_pipeline(cpu),
            "m" => {
                let kind = prompt("Memory type (i=instruction, d=data): ");
                let start: usize = prompt_parsed("Start byte address: ");
                let count: usize = prompt_parsed("Number of words: ");
                display_memory(cpu, start, count, kind.trim().eq_ignore_ascii_case("d"));
            }
            "s" => cpu.stats.print(),
            "q" => return false,
            _ => {
                println!("Invalid choice. Continuing execution.");
                return true;
            }
        }
    }
}

/// Prints the latches, registers, PC, and stall flag after a step.
fn display_state(cpu: &Cpu) {
    println!("\n========== Cycle {} ==========", cpu.total_cycles());

    println!("\n--- Pipeline Latches ---");
    println!(
        "IF/ID:  valid={} IR={:#010x} NPC={}",
        cpu.if_id.valid, cpu.if_id.inst, cpu.if_id.npc
    );
    println!(
        "ID/EX:  valid={} IR={:#010x} A={} B={} Imm={}",
        cpu.id_ex.valid, cpu.id_ex.inst, cpu.id_ex.rv1, cpu.id_ex.rv2, cpu.id_ex.imm
    );
    println!(
        "EX/MEM: valid={} IR={:#010x} ALUOutput={} B={} cond={}",
        cpu.ex_mem.valid, cpu.ex_mem.inst, cpu.ex_mem.alu, cpu.ex_mem.store_data, cpu.ex_mem.cond
    );
    println!(
        "MEM/WB: valid={} IR={:#010x} ALUOutput={} LMD={}",
        cpu.mem_wb.valid, cpu.mem_wb.inst, cpu.mem_wb.alu, cpu.mem_wb.lmd
    );

    println!("\n--- Registers ---");
    cpu.dump_state();
    println!("Stall = {}", if cpu.stall { "YES" } else { "NO" });
}

/// Draws the five pipeline slots with their current occupants.
fn display_pipeline(cpu: &Cpu) {
    println!("\n   IF    ->    ID    ->    EX    ->   MEM    ->    WB");

    let slot = |label: &str, valid: bool, inst: u32| {
        if valid {
            println!("  {:<4} IR={:#010x}", label, inst);
        } else {
            println!("  {:<4} [bubble]", label);
        }
    };

    let fetch_index = (cpu.pc / 4) as usize;
    match cpu.inst_word(fetch_index) {
        Some(word) if word != 0 => println!("  IF   fetching {:#010x} at pc={}", word, cpu.pc),
        _ => println!("  IF   [no instruction to fetch]"),
    }
    slot("ID", cpu.if_id.valid, cpu.if_id.inst);
    slot("EX", cpu.id_ex.valid, cpu.id_ex.inst);
    slot("MEM", cpu.ex_mem.valid, cpu.ex_mem.inst);
    slot("WB", cpu.mem_wb.valid, cpu.mem_wb.inst);

    if cpu.stall {
        println!("\n*** Pipeline stalled on a data hazard ***");
    }
    if cpu.squash_if_id {
        println!("\n*** Control transfer: fetched instruction will be squashed ***");
    }
}

/// Dumps `count` words of instruction or data memory starting at `start`.
fn display_memory(cpu: &Cpu, start: usize, count: usize, data: bool) {
    println!(
        "\n========== {} Memory ==========",
        if data { "Data" } else { "Instruction" }
    );

    for i in 0..count {
        let addr = start + i * 4;
        let index = addr / 4;
        if data {
            match cpu.data_word(index) {
                Some(word) => {
                    println!("{:#06x} [{:>4}]: {:<11} ({:#010x})", addr, index, word, word as u32)
                }
                None => break,
            }
        } else {
            match cpu.inst_word(index) {
                Some(word) => println!("{:#06x} [{:>4}]: {:#010x}", addr, index, word),
                None => break,
            }
        }
    }
}

/// Prompts for a line of input on stdout/stdin.
fn prompt(message: &str) -> String {
    print!("{}", message);
    io::stdout().flush().ok();
    let mut line = String::new();
    if io::stdin().read_line(&mut line).is_err() {
        process::exit(1);
    }
    line
}

/// Prompts repeatedly until the input parses.
fn prompt_parsed<T: std::str::FromStr>(message: &str) -> T {
    loop {
        let line = prompt(message);
        let trimmed = line.trim();
        if trimmed.is_empty() {
            // EOF on stdin means the user is done.
            process::exit(0);
        }
        if let Ok(value) = trimmed.parse() {
            return value;
        }
        println!("Invalid number.");
    }
}
