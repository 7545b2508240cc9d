//! # Load and Store Instructions
//!
//! This module implements load and store operations:
//! - LDA: Load Accumulator
//! - LDX: Load X Register
//! - LDY: Load Y Register
//! - STA: Store Accumulator
//! - STX: Store X Register
//! - STY: Store Y Register
//! - STZ: Store Zero (65C02)

use crate::{AddressingMode, MemoryBus, CPU};

/// Executes the LDA (Load Accumulator) instruction.
///
/// Loads a byte of memory into the accumulator, setting the zero and negative
/// flags as appropriate.
///
/// # Flag Behavior
///
/// - Zero (Z): Set if A = 0
/// - Negative (N): Set if bit 7 of A is set
/// - Other flags: Not affected
pub(crate) fn execute_lda<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    cpu.a = cpu.read_operand(mode);
    cpu.set_zero_negative(cpu.a);
}

/// Executes the LDX (Load X Register) instruction.
pub(crate) fn execute_ldx<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    cpu.x = cpu.read_operand(mode);
    cpu.set_zero_negative(cpu.x);
}

/// Executes the LDY (Load Y Register) instruction.
pub(crate) fn execute_ldy<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    cpu.y = cpu.read_operand(mode);
    cpu.set_zero_negative(cpu.y);
}

/// Executes the STA (Store Accumulator) instruction.
///
/// Stores never pay the page-crossing penalty; their base cost already covers it.
/// No flags are affected.
pub(crate) fn execute_sta<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    let value = cpu.a;
    store(cpu, mode, value);
}

/// Executes the STX (Store X Register) instruction.
pub(crate) fn execute_stx<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    let value = cpu.x;
    store(cpu, mode, value);
}

/// Executes the STY (Store Y Register) instruction.
pub(crate) fn execute_sty<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    let value = cpu.y;
    store(cpu, mode, value);
}

/// Executes the 65C02 STZ (Store Zero) instruction.
pub(crate) fn execute_stz<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    store(cpu, mode, 0x00);
}

fn store<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, value: u8) {
    let addr = cpu.resolve(mode);
    cpu.memory.write(addr, value);
}
