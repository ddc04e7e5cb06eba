//! Decoder Tests.
//!
//! Verifies field extraction and per-format immediate sign extension against
//! hand-checked encodings and builder round trips.

use crate::common::builder::InstructionBuilder;
use rv32pipe_core::isa::decode::decode;
use rv32pipe_core::isa::instruction::InstructionBits;
use rv32pipe_core::isa::rv32i::opcodes;

// ══════════════════════════════════════════════════════════
// 1. Field extraction
// ══════════════════════════════════════════════════════════

#[test]
fn extracts_all_register_fields() {
    // add x3, x1, x2 == 0x002081B3
    let inst: u32 = 0x0020_81B3;
    assert_eq!(inst.opcode(), opcodes::OP_REG);
    assert_eq!(inst.rd(), 3);
    assert_eq!(inst.rs1(), 1);
    assert_eq!(inst.rs2(), 2);
    assert_eq!(inst.funct3(), 0);
    assert_eq!(inst.funct7(), 0);
}

#[test]
fn extracts_funct_fields() {
    let sub = InstructionBuilder::new().sub(3, 1, 2).build();
    assert_eq!(sub.funct3(), 0b000);
    assert_eq!(sub.funct7(), 0b0100000);

    let mul = InstructionBuilder::new().mul(3, 1, 2).build();
    assert_eq!(mul.funct7(), 0b0000001);
}

// ══════════════════════════════════════════════════════════
// 2. Immediate formats
// ══════════════════════════════════════════════════════════

#[test]
fn i_type_immediate_sign_extends() {
    // addi x1, x0, 5 == 0x00500093
    assert_eq!(decode(0x0050_0093).imm, 5);
    // addi x1, x0, -1 == 0xFFF00093
    assert_eq!(decode(0xFFF0_0093).imm, -1);
    assert_eq!(
        decode(InstructionBuilder::new().addi(1, 0, -2048).build()).imm,
        -2048,
        "the full negative I range must survive"
    );
}

#[test]
fn s_type_immediate_reassembles_split_fields() {
    for imm in [0, 4, -4, 2047, -2048] {
        let sw = InstructionBuilder::new().sw(1, 2, imm).build();
        assert_eq!(decode(sw).imm, imm, "S immediate {} must round-trip", imm);
    }
}

#[test]
fn b_type_immediate_reassembles_split_fields() {
    for imm in [8, -8, 16, 4094, -4096] {
        let beq = InstructionBuilder::new().beq(1, 2, imm).build();
        assert_eq!(decode(beq).imm, imm, "B immediate {} must round-trip", imm);
    }
}

#[test]
fn u_type_immediate_is_preshifted() {
    let lui = InstructionBuilder::new().lui(1, 0x12345).build();
    assert_eq!(decode(lui).imm, (0x12345u32 << 12) as i32);

    let negative = InstructionBuilder::new().lui(1, 0xFFFFF).build();
    assert_eq!(decode(negative).imm, 0xFFFF_F000u32 as i32);
}

#[test]
fn j_type_immediate_reassembles_split_fields() {
    for imm in [8, -8, 2048, -2048, 0xFFFE, -0x10000] {
        let jal = InstructionBuilder::new().jal(1, imm).build();
        assert_eq!(decode(jal).imm, imm, "J immediate {} must round-trip", imm);
    }
}

#[test]
fn jalr_uses_i_form() {
    let jalr = InstructionBuilder::new().jalr(1, 5, -16).build();
    assert_eq!(decode(jalr).imm, -16);
}

#[test]
fn formats_without_an_immediate_decode_zero() {
    let add = InstructionBuilder::new().add(3, 1, 2).build();
    assert_eq!(decode(add).imm, 0);
    // Unknown opcode.
    assert_eq!(decode(0x0000_000B).imm, 0);
}

// ══════════════════════════════════════════════════════════
// 3. Whole-record decoding
// ══════════════════════════════════════════════════════════

#[test]
fn decoded_record_carries_every_field() {
    let inst = InstructionBuilder::new().lw(7, 3, 20).build();
    let d = decode(inst);
    assert_eq!(d.raw, inst);
    assert_eq!(d.opcode, opcodes::OP_LOAD);
    assert_eq!(d.rd, 7);
    assert_eq!(d.rs1, 3);
    assert_eq!(d.funct3, 0b010);
    assert_eq!(d.imm, 20);
}
