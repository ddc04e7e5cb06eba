//! Whole-Pipeline Execution Tests.
//!
//! Runs complete programs through the cycle driver and checks architectural
//! results, cycle counts, stall behavior, squash behavior, and the
//! completion predicate.

use crate::common::builder::InstructionBuilder;
use crate::common::harness::TestContext;

// ══════════════════════════════════════════════════════════
// 1. Fill latency and throughput
// ══════════════════════════════════════════════════════════

#[test]
fn single_instruction_retires_in_five_cycles() {
    // addi x1, x0, 5
    let mut ctx = TestContext::new().load_program(&[0x0050_0093]);

    let cycles = ctx.run_to_completion();

    assert_eq!(ctx.get_reg(1), 5);
    assert_eq!(ctx.cpu.instructions_completed(), 1);
    assert_eq!(cycles, 5, "one instruction takes the full pipeline fill");
}

#[test]
fn independent_instructions_sustain_one_per_cycle() {
    // Six immediate adds with distinct destinations: no hazards, so the
    // program retires in N + 4 cycles.
    let program: Vec<u32> = (1..=6)
        .map(|reg| InstructionBuilder::new().addi(reg, 0, reg as i32).build())
        .collect();
    let mut ctx = TestContext::new().load_program(&program);

    let cycles = ctx.run_to_completion();

    for reg in 1..=6 {
        assert_eq!(ctx.get_reg(reg), reg as i32);
    }
    assert_eq!(ctx.cpu.instructions_completed(), 6);
    assert_eq!(cycles, 6 + 4);
    assert_eq!(ctx.cpu.stats.stalls_data, 0);
}

// ══════════════════════════════════════════════════════════
// 2. Data hazards
// ══════════════════════════════════════════════════════════

#[test]
fn dependent_chain_stalls_until_producer_retires() {
    // addi x1, x0, 5 ; addi x2, x0, 10 ; add x3, x1, x2
    let mut ctx = TestContext::new().load_program(&[0x0050_0093, 0x00A0_0113, 0x0020_81B3]);

    let cycles = ctx.run_to_completion();

    assert_eq!(ctx.get_reg(3), 15);
    assert_eq!(ctx.cpu.instructions_completed(), 3);
    assert!(
        ctx.cpu.stats.stalls_data >= 2,
        "the consumer must wait for both producers to clear the hazard window"
    );
    assert_eq!(cycles, 9, "two stall cycles on top of the 3 + 4 baseline");
}

#[test]
fn back_to_back_dependency_preserves_program_semantics() {
    let program = [
        InstructionBuilder::new().addi(2, 0, 20).build(),
        InstructionBuilder::new().addi(5, 0, 1).build(),
        InstructionBuilder::new().add(1, 2, 5).build(),
        InstructionBuilder::new().add(4, 1, 5).build(),
    ];
    let mut ctx = TestContext::new().load_program(&program);

    ctx.run_to_completion();

    assert_eq!(ctx.get_reg(1), 21);
    assert_eq!(ctx.get_reg(4), 22, "x4 sees the retired value of x1");
    assert!(ctx.cpu.stats.stalls_data >= 2);
}

#[test]
fn stall_holds_the_same_instruction_in_if_id() {
    // addi x1, x0, 5 ; add x3, x1, x2 — the add must wait in IF/ID.
    let producer = InstructionBuilder::new().addi(1, 0, 5).build();
    let reader = InstructionBuilder::new().add(3, 1, 2).build();
    let mut ctx = TestContext::new().load_program(&[producer, reader]);

    // After three cycles the reader sits in IF/ID and the stall is up.
    ctx.run(3);
    assert!(ctx.cpu.stall);
    assert_eq!(ctx.cpu.if_id.inst, reader);

    // The held instruction is still there on the next cycle.
    ctx.run(1);
    assert_eq!(ctx.cpu.if_id.inst, reader, "IF/ID must hold during a stall");

    ctx.run_to_completion();
    assert_eq!(ctx.get_reg(3), 5);
}

// ══════════════════════════════════════════════════════════
// 3. Control transfers
// ══════════════════════════════════════════════════════════

#[test]
fn taken_branch_squashes_the_following_fetch() {
    // addi x1, x0, 5 ; addi x2, x0, 5 ; beq x1, x2, +8
    // addi x3, x0, 10 (squashed) ; addi x4, x0, 20 (branch target)
    let mut ctx = TestContext::new().load_program(&[
        0x0050_0093,
        0x0050_0113,
        0x0020_8463,
        0x00A0_0193,
        0x0140_0213,
    ]);

    ctx.run_to_completion();

    assert_eq!(ctx.get_reg(3), 0, "the squashed instruction never retires");
    assert_eq!(ctx.get_reg(4), 20);
    assert_eq!(ctx.cpu.stats.flushes_control, 1);
}

#[test]
fn squash_takes_effect_on_the_next_cycle_boundary() {
    let program = [
        InstructionBuilder::new().jal(1, 8).build(),
        InstructionBuilder::new().addi(3, 0, 10).build(),
        InstructionBuilder::new().addi(4, 0, 20).build(),
    ];
    let mut ctx = TestContext::new().load_program(&program);

    // Cycle 3 resolves the jump in EX; the delay-slot instruction was in
    // IF/ID at that point.
    ctx.run(3);
    assert!(
        !ctx.cpu.if_id.valid,
        "IF/ID must be a bubble right after the transfer resolves"
    );
    assert_eq!(ctx.cpu.pc, 8, "fetch resumes at the redirected PC");

    ctx.run_to_completion();
    assert_eq!(ctx.get_reg(1), 4, "JAL links the return address");
    assert_eq!(ctx.get_reg(3), 0);
    assert_eq!(ctx.get_reg(4), 20);
}

#[test]
fn jal_links_and_redirects() {
    // jal x1, +8 from PC = 0: link 4, land on the word at byte 8.
    let program = [
        InstructionBuilder::new().jal(1, 8).build(),
        InstructionBuilder::new().addi(3, 0, 10).build(),
        InstructionBuilder::new().addi(4, 0, 20).build(),
    ];
    let mut ctx = TestContext::new().load_program(&program);

    ctx.run_to_completion();

    assert_eq!(ctx.get_reg(1), 4);
    assert_eq!(ctx.get_reg(3), 0, "the word at byte 4 is squashed");
    assert_eq!(ctx.get_reg(4), 20);
    assert_eq!(ctx.cpu.instructions_completed(), 2);
}

#[test]
fn jalr_jumps_through_a_register() {
    // x5 holds byte address 20, the last instruction. The jalr sits at byte
    // 12, so its link value is 16 and the word at byte 16 is squashed.
    let program = [
        InstructionBuilder::new().addi(5, 0, 20).build(),
        InstructionBuilder::new().nop().build(),
        InstructionBuilder::new().nop().build(),
        InstructionBuilder::new().jalr(1, 5, 0).build(),
        InstructionBuilder::new().addi(3, 0, 10).build(),
        InstructionBuilder::new().addi(4, 0, 20).build(),
    ];
    let mut ctx = TestContext::new().load_program(&program);

    ctx.run_to_completion();

    assert_eq!(ctx.get_reg(1), 16, "link value is the jalr's npc");
    assert_eq!(ctx.get_reg(3), 0, "the fall-through word is squashed");
    assert_eq!(ctx.get_reg(4), 20);
}

#[test]
fn branch_compares_operands_latched_at_decode() {
    // The branch reads x1 while its producer is still in flight (control
    // transfers never stall), so it compares the stale value 0 against x0
    // and takes the branch even though the retired value of x1 is nonzero.
    let program = [
        InstructionBuilder::new().addi(1, 0, 5).build(),
        InstructionBuilder::new().beq(1, 0, 8).build(),
        InstructionBuilder::new().addi(3, 0, 1).build(),
        InstructionBuilder::new().addi(4, 0, 1).build(),
    ];
    let mut ctx = TestContext::new().load_program(&program);

    ctx.run_to_completion();

    assert_eq!(ctx.get_reg(1), 5);
    assert_eq!(ctx.get_reg(3), 0, "the skipped word never retires");
    assert_eq!(ctx.get_reg(4), 1);
    assert_eq!(ctx.cpu.stats.stalls_data, 0, "branches do not stall");
}

// ══════════════════════════════════════════════════════════
// 4. Memory round trips
// ══════════════════════════════════════════════════════════

#[test]
fn store_then_load_round_trips_through_data_memory() {
    let program = [
        InstructionBuilder::new().addi(1, 0, 42).build(),
        InstructionBuilder::new().sw(0, 1, 0).build(),
        InstructionBuilder::new().lw(2, 0, 0).build(),
    ];
    let mut ctx = TestContext::new().load_program(&program);

    ctx.run_to_completion();

    assert_eq!(ctx.cpu.data_word(0), Some(42));
    assert_eq!(ctx.get_reg(2), 42);
}

// ══════════════════════════════════════════════════════════
// 5. Architectural invariants
// ══════════════════════════════════════════════════════════

#[test]
fn x0_write_is_dropped_but_counts_as_completed() {
    // addi x0, x0, 7
    let program = [InstructionBuilder::new().addi(0, 0, 7).build()];
    let mut ctx = TestContext::new().load_program(&program);

    ctx.run_to_completion();

    assert_eq!(ctx.get_reg(0), 0);
    assert_eq!(ctx.cpu.instructions_completed(), 1);
}

#[test]
fn invariants_hold_after_every_cycle() {
    let mut ctx = TestContext::new().load_program(&[
        0x0050_0093,
        0x0050_0113,
        0x0020_8463,
        0x00A0_0193,
        0x0140_0213,
    ]);

    let mut last_completed = 0;
    while !ctx.cpu.is_program_complete() {
        ctx.cpu.tick();
        assert_eq!(ctx.get_reg(0), 0, "x0 must read zero after every cycle");
        assert_eq!(ctx.cpu.pc % 4, 0, "PC must stay word-aligned");
        let completed = ctx.cpu.instructions_completed();
        assert!(
            completed == last_completed || completed == last_completed + 1,
            "at most one instruction retires per cycle"
        );
        last_completed = completed;
    }
}

// ══════════════════════════════════════════════════════════
// 6. Completion and reset
// ══════════════════════════════════════════════════════════

#[test]
fn empty_instruction_memory_is_complete_immediately() {
    let ctx = TestContext::new();
    assert!(ctx.cpu.is_program_complete());
}

#[test]
fn completion_requires_drained_latches() {
    let mut ctx = TestContext::new().load_program(&[0x0050_0093]);

    assert!(!ctx.cpu.is_program_complete());
    ctx.run(2);
    assert!(
        !ctx.cpu.is_program_complete(),
        "in-flight instructions keep the program alive"
    );
    ctx.run_to_completion();
    assert!(ctx.cpu.is_program_complete());
}

#[test]
fn reset_restores_initial_state_but_keeps_the_program() {
    let mut ctx = TestContext::new().load_program(&[0x0050_0093]);
    let cycles = ctx.run_to_completion();

    ctx.cpu.reset();

    assert_eq!(ctx.cpu.pc, 0);
    assert_eq!(ctx.cpu.registers(), [0; 32]);
    assert_eq!(ctx.cpu.total_cycles(), 0);
    assert_eq!(ctx.cpu.instructions_completed(), 0);
    assert!(!ctx.cpu.if_id.valid && !ctx.cpu.id_ex.valid);
    assert_eq!(ctx.cpu.inst_word(0), Some(0x0050_0093), "program survives");

    // Re-running reproduces the original result.
    assert_eq!(ctx.run_to_completion(), cycles);
    assert_eq!(ctx.get_reg(1), 5);
}
