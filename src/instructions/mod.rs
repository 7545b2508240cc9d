//! # 6502 Instruction Implementations
//!
//! This module contains the implementations of all 6502 and 65C02 instructions,
//! organized by category, and the opcode dispatch that routes a fetched opcode to
//! them. Each instruction is a standalone function that takes a mutable reference
//! to the CPU and, where it matters, the addressing mode.
//!
//! ## Categories
//!
//! - **alu**: Arithmetic and logic operations (ADC, SBC, AND, ORA, EOR, CMP, CPX, CPY, BIT)
//! - **branches**: Conditional branch instructions (BCC, BCS, BEQ, BNE, BMI, BPL, BVC, BVS, BRA)
//! - **shifts**: Shift and rotate operations (ASL, LSR, ROL, ROR)
//! - **load_store**: Load and store instructions (LDA, LDX, LDY, STA, STX, STY, STZ)
//! - **inc_dec**: Increment and decrement operations (INC, DEC, INX, INY, DEX, DEY)
//! - **control**: Control flow instructions (JMP, JSR, RTS, RTI, BRK, NOP)
//! - **stack**: Stack operations (PHA, PHP, PLA, PLP, PHX, PLX, PHY, PLY)
//! - **flags**: Status flag manipulation (CLC, SEC, CLI, SEI, CLD, SED, CLV)
//! - **transfer**: Register transfer operations (TAX, TAY, TXA, TYA, TSX, TXS)
//! - **cmos**: 65C02-only operations (TSB, TRB, RMB, SMB, BBR, BBS, WAI, STP)
//!
//! Cycle accounting is not done here: `CPU::step` charges the base cost before
//! dispatch and the page-crossing penalty after it. Instructions only add the
//! dynamic extras (taken branches, 65C02 decimal mode, 65C02 shift abs,X).

pub(crate) mod alu;
pub(crate) mod branches;
pub(crate) mod cmos;
pub(crate) mod control;
pub(crate) mod flags;
pub(crate) mod inc_dec;
pub(crate) mod load_store;
pub(crate) mod shifts;
pub(crate) mod stack;
pub(crate) mod transfer;

use crate::opcodes;
use crate::{AddressingMode, MemoryBus, CPU, LOG_TARGET};
use branches::Condition;
use flags::Flag;
use stack::StackRegister;

/// Executes one already-fetched opcode. PC points at its first operand byte.
pub(crate) fn execute<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    use AddressingMode::*;

    match opcode {
        // ADC
        0x69 => alu::execute_adc(cpu, Immediate),
        0x65 => alu::execute_adc(cpu, ZeroPage),
        0x75 => alu::execute_adc(cpu, ZeroPageX),
        0x6D => alu::execute_adc(cpu, Absolute),
        0x7D => alu::execute_adc(cpu, AbsoluteX),
        0x79 => alu::execute_adc(cpu, AbsoluteY),
        0x61 => alu::execute_adc(cpu, IndirectX),
        0x71 => alu::execute_adc(cpu, IndirectY),

        // AND
        0x29 => alu::execute_and(cpu, Immediate),
        0x25 => alu::execute_and(cpu, ZeroPage),
        0x35 => alu::execute_and(cpu, ZeroPageX),
        0x2D => alu::execute_and(cpu, Absolute),
        0x3D => alu::execute_and(cpu, AbsoluteX),
        0x39 => alu::execute_and(cpu, AbsoluteY),
        0x21 => alu::execute_and(cpu, IndirectX),
        0x31 => alu::execute_and(cpu, IndirectY),

        // ASL
        0x0A => shifts::execute_asl(cpu, Accumulator),
        0x06 => shifts::execute_asl(cpu, ZeroPage),
        0x16 => shifts::execute_asl(cpu, ZeroPageX),
        0x0E => shifts::execute_asl(cpu, Absolute),
        0x1E => shifts::execute_asl(cpu, AbsoluteX),

        // Branches
        0x90 => branches::execute_branch(cpu, Condition::CarryClear),
        0xB0 => branches::execute_branch(cpu, Condition::CarrySet),
        0xF0 => branches::execute_branch(cpu, Condition::Equal),
        0xD0 => branches::execute_branch(cpu, Condition::NotEqual),
        0x30 => branches::execute_branch(cpu, Condition::Minus),
        0x10 => branches::execute_branch(cpu, Condition::Plus),
        0x50 => branches::execute_branch(cpu, Condition::OverflowClear),
        0x70 => branches::execute_branch(cpu, Condition::OverflowSet),

        // BIT
        0x24 => alu::execute_bit(cpu, ZeroPage),
        0x2C => alu::execute_bit(cpu, Absolute),

        // BRK
        0x00 => control::execute_brk(cpu),

        // Flag instructions
        0x18 => flags::execute_set_flag(cpu, Flag::Carry, false),
        0x38 => flags::execute_set_flag(cpu, Flag::Carry, true),
        0x58 => flags::execute_set_flag(cpu, Flag::InterruptDisable, false),
        0x78 => flags::execute_set_flag(cpu, Flag::InterruptDisable, true),
        0xD8 => flags::execute_set_flag(cpu, Flag::Decimal, false),
        0xF8 => flags::execute_set_flag(cpu, Flag::Decimal, true),
        0xB8 => flags::execute_set_flag(cpu, Flag::Overflow, false),

        // CMP
        0xC9 => alu::execute_cmp(cpu, Immediate),
        0xC5 => alu::execute_cmp(cpu, ZeroPage),
        0xD5 => alu::execute_cmp(cpu, ZeroPageX),
        0xCD => alu::execute_cmp(cpu, Absolute),
        0xDD => alu::execute_cmp(cpu, AbsoluteX),
        0xD9 => alu::execute_cmp(cpu, AbsoluteY),
        0xC1 => alu::execute_cmp(cpu, IndirectX),
        0xD1 => alu::execute_cmp(cpu, IndirectY),

        // CPX / CPY
        0xE0 => alu::execute_cpx(cpu, Immediate),
        0xE4 => alu::execute_cpx(cpu, ZeroPage),
        0xEC => alu::execute_cpx(cpu, Absolute),
        0xC0 => alu::execute_cpy(cpu, Immediate),
        0xC4 => alu::execute_cpy(cpu, ZeroPage),
        0xCC => alu::execute_cpy(cpu, Absolute),

        // DEC / DEX / DEY
        0xC6 => inc_dec::execute_dec(cpu, ZeroPage),
        0xD6 => inc_dec::execute_dec(cpu, ZeroPageX),
        0xCE => inc_dec::execute_dec(cpu, Absolute),
        0xDE => inc_dec::execute_dec(cpu, AbsoluteX),
        0xCA => inc_dec::execute_dex(cpu),
        0x88 => inc_dec::execute_dey(cpu),

        // EOR
        0x49 => alu::execute_eor(cpu, Immediate),
        0x45 => alu::execute_eor(cpu, ZeroPage),
        0x55 => alu::execute_eor(cpu, ZeroPageX),
        0x4D => alu::execute_eor(cpu, Absolute),
        0x5D => alu::execute_eor(cpu, AbsoluteX),
        0x59 => alu::execute_eor(cpu, AbsoluteY),
        0x41 => alu::execute_eor(cpu, IndirectX),
        0x51 => alu::execute_eor(cpu, IndirectY),

        // INC / INX / INY
        0xE6 => inc_dec::execute_inc(cpu, ZeroPage),
        0xF6 => inc_dec::execute_inc(cpu, ZeroPageX),
        0xEE => inc_dec::execute_inc(cpu, Absolute),
        0xFE => inc_dec::execute_inc(cpu, AbsoluteX),
        0xE8 => inc_dec::execute_inx(cpu),
        0xC8 => inc_dec::execute_iny(cpu),

        // JMP / JSR
        0x4C => control::execute_jmp(cpu, Absolute),
        0x6C => control::execute_jmp(cpu, Indirect),
        0x20 => control::execute_jsr(cpu),

        // LDA
        0xA9 => load_store::execute_lda(cpu, Immediate),
        0xA5 => load_store::execute_lda(cpu, ZeroPage),
        0xB5 => load_store::execute_lda(cpu, ZeroPageX),
        0xAD => load_store::execute_lda(cpu, Absolute),
        0xBD => load_store::execute_lda(cpu, AbsoluteX),
        0xB9 => load_store::execute_lda(cpu, AbsoluteY),
        0xA1 => load_store::execute_lda(cpu, IndirectX),
        0xB1 => load_store::execute_lda(cpu, IndirectY),

        // LDX
        0xA2 => load_store::execute_ldx(cpu, Immediate),
        0xA6 => load_store::execute_ldx(cpu, ZeroPage),
        0xB6 => load_store::execute_ldx(cpu, ZeroPageY),
        0xAE => load_store::execute_ldx(cpu, Absolute),
        0xBE => load_store::execute_ldx(cpu, AbsoluteY),

        // LDY
        0xA0 => load_store::execute_ldy(cpu, Immediate),
        0xA4 => load_store::execute_ldy(cpu, ZeroPage),
        0xB4 => load_store::execute_ldy(cpu, ZeroPageX),
        0xAC => load_store::execute_ldy(cpu, Absolute),
        0xBC => load_store::execute_ldy(cpu, AbsoluteX),

        // LSR
        0x4A => shifts::execute_lsr(cpu, Accumulator),
        0x46 => shifts::execute_lsr(cpu, ZeroPage),
        0x56 => shifts::execute_lsr(cpu, ZeroPageX),
        0x4E => shifts::execute_lsr(cpu, Absolute),
        0x5E => shifts::execute_lsr(cpu, AbsoluteX),

        // NOP
        0xEA => control::execute_nop(cpu, 0),

        // ORA
        0x09 => alu::execute_ora(cpu, Immediate),
        0x05 => alu::execute_ora(cpu, ZeroPage),
        0x15 => alu::execute_ora(cpu, ZeroPageX),
        0x0D => alu::execute_ora(cpu, Absolute),
        0x1D => alu::execute_ora(cpu, AbsoluteX),
        0x19 => alu::execute_ora(cpu, AbsoluteY),
        0x01 => alu::execute_ora(cpu, IndirectX),
        0x11 => alu::execute_ora(cpu, IndirectY),

        // Stack
        0x48 => stack::execute_push(cpu, StackRegister::A),
        0x68 => stack::execute_pull(cpu, StackRegister::A),
        0x08 => stack::execute_php(cpu),
        0x28 => stack::execute_plp(cpu),

        // ROL
        0x2A => shifts::execute_rol(cpu, Accumulator),
        0x26 => shifts::execute_rol(cpu, ZeroPage),
        0x36 => shifts::execute_rol(cpu, ZeroPageX),
        0x2E => shifts::execute_rol(cpu, Absolute),
        0x3E => shifts::execute_rol(cpu, AbsoluteX),

        // ROR
        0x6A => shifts::execute_ror(cpu, Accumulator),
        0x66 => shifts::execute_ror(cpu, ZeroPage),
        0x76 => shifts::execute_ror(cpu, ZeroPageX),
        0x6E => shifts::execute_ror(cpu, Absolute),
        0x7E => shifts::execute_ror(cpu, AbsoluteX),

        // RTI / RTS
        0x40 => control::execute_rti(cpu),
        0x60 => control::execute_rts(cpu),

        // SBC
        0xE9 => alu::execute_sbc(cpu, Immediate),
        0xE5 => alu::execute_sbc(cpu, ZeroPage),
        0xF5 => alu::execute_sbc(cpu, ZeroPageX),
        0xED => alu::execute_sbc(cpu, Absolute),
        0xFD => alu::execute_sbc(cpu, AbsoluteX),
        0xF9 => alu::execute_sbc(cpu, AbsoluteY),
        0xE1 => alu::execute_sbc(cpu, IndirectX),
        0xF1 => alu::execute_sbc(cpu, IndirectY),

        // STA
        0x85 => load_store::execute_sta(cpu, ZeroPage),
        0x95 => load_store::execute_sta(cpu, ZeroPageX),
        0x8D => load_store::execute_sta(cpu, Absolute),
        0x9D => load_store::execute_sta(cpu, AbsoluteX),
        0x99 => load_store::execute_sta(cpu, AbsoluteY),
        0x81 => load_store::execute_sta(cpu, IndirectX),
        0x91 => load_store::execute_sta(cpu, IndirectY),

        // STX / STY
        0x86 => load_store::execute_stx(cpu, ZeroPage),
        0x96 => load_store::execute_stx(cpu, ZeroPageY),
        0x8E => load_store::execute_stx(cpu, Absolute),
        0x84 => load_store::execute_sty(cpu, ZeroPage),
        0x94 => load_store::execute_sty(cpu, ZeroPageX),
        0x8C => load_store::execute_sty(cpu, Absolute),

        // Transfers
        0xAA => transfer::execute_tax(cpu),
        0xA8 => transfer::execute_tay(cpu),
        0xBA => transfer::execute_tsx(cpu),
        0x8A => transfer::execute_txa(cpu),
        0x9A => transfer::execute_txs(cpu),
        0x98 => transfer::execute_tya(cpu),

        _ if cpu.variant.is_65c02() => execute_65c02(cpu, opcode),

        _ => {
            log::warn!(
                target: LOG_TARGET,
                "undocumented opcode ${:02X} at ${:04X} executed as NOP",
                opcode,
                cpu.pc.wrapping_sub(1)
            );
        }
    }
}

/// Dispatch for the opcodes the 65C02 added. Every byte value is defined on
/// this chip; whatever is not an instruction is a NOP of fixed length.
fn execute_65c02<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    use AddressingMode::*;

    match opcode {
        // (zp) forms of the accumulator group
        0x12 => alu::execute_ora(cpu, ZeroPageIndirect),
        0x32 => alu::execute_and(cpu, ZeroPageIndirect),
        0x52 => alu::execute_eor(cpu, ZeroPageIndirect),
        0x72 => alu::execute_adc(cpu, ZeroPageIndirect),
        0x92 => load_store::execute_sta(cpu, ZeroPageIndirect),
        0xB2 => load_store::execute_lda(cpu, ZeroPageIndirect),
        0xD2 => alu::execute_cmp(cpu, ZeroPageIndirect),
        0xF2 => alu::execute_sbc(cpu, ZeroPageIndirect),

        // BIT extensions
        0x89 => alu::execute_bit(cpu, Immediate),
        0x34 => alu::execute_bit(cpu, ZeroPageX),
        0x3C => alu::execute_bit(cpu, AbsoluteX),

        // INC A / DEC A
        0x1A => inc_dec::execute_inc(cpu, Accumulator),
        0x3A => inc_dec::execute_dec(cpu, Accumulator),

        // TSB / TRB
        0x04 => cmos::execute_tsb(cpu, ZeroPage),
        0x0C => cmos::execute_tsb(cpu, Absolute),
        0x14 => cmos::execute_trb(cpu, ZeroPage),
        0x1C => cmos::execute_trb(cpu, Absolute),

        // STZ
        0x64 => load_store::execute_stz(cpu, ZeroPage),
        0x74 => load_store::execute_stz(cpu, ZeroPageX),
        0x9C => load_store::execute_stz(cpu, Absolute),
        0x9E => load_store::execute_stz(cpu, AbsoluteX),

        // Index register stack operations
        0xDA => stack::execute_push(cpu, StackRegister::X),
        0xFA => stack::execute_pull(cpu, StackRegister::X),
        0x5A => stack::execute_push(cpu, StackRegister::Y),
        0x7A => stack::execute_pull(cpu, StackRegister::Y),

        0x7C => control::execute_jmp(cpu, AbsoluteIndexedIndirect),
        0x80 => branches::execute_branch(cpu, Condition::Always),

        0xCB => cmos::execute_wai(cpu),
        0xDB => cmos::execute_stp(cpu),

        // RMBn / SMBn: low nibble 7, bit number in bits 4-6, set/reset in bit 7
        op if op & 0x0F == 0x07 => {
            cmos::execute_memory_bit(cpu, (op >> 4) & 0x07, op & 0x80 != 0)
        }

        // BBRn / BBSn: same layout with low nibble F
        op if op & 0x0F == 0x0F => {
            cmos::execute_branch_on_bit(cpu, (op >> 4) & 0x07, op & 0x80 != 0)
        }

        op => {
            let length = opcodes::cmos_nop_bytes(op).unwrap_or(1);
            control::execute_nop(cpu, length - 1);
        }
    }
}
