//! # Shift and Rotate Instructions
//!
//! This module implements bit shift and rotate operations:
//! - ASL: Arithmetic Shift Left
//! - LSR: Logical Shift Right
//! - ROL: Rotate Left through carry
//! - ROR: Rotate Right through carry
//!
//! Each works either on the accumulator or as a read-modify-write on memory.

use crate::{AddressingMode, MemoryBus, CPU};

/// Executes the ASL (Arithmetic Shift Left) instruction.
///
/// Shifts all bits left one position. Bit 0 becomes 0 and bit 7 goes to carry.
///
/// Flags affected:
/// - C: Set to the old bit 7
/// - Z: Set if result == 0
/// - N: Set if bit 7 of result is set
pub(crate) fn execute_asl<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    read_modify_write(cpu, mode, |cpu, value| {
        cpu.flag_c = (value & 0x80) != 0;
        value << 1
    });
}

/// Executes the LSR (Logical Shift Right) instruction.
///
/// Shifts all bits right one position. Bit 7 becomes 0 and bit 0 goes to carry,
/// so N is always cleared.
pub(crate) fn execute_lsr<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    read_modify_write(cpu, mode, |cpu, value| {
        cpu.flag_c = (value & 0x01) != 0;
        value >> 1
    });
}

/// Executes the ROL (Rotate Left) instruction.
///
/// The old carry enters bit 0; the old bit 7 becomes the new carry.
pub(crate) fn execute_rol<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    read_modify_write(cpu, mode, |cpu, value| {
        let carry_in = cpu.flag_c as u8;
        cpu.flag_c = (value & 0x80) != 0;
        (value << 1) | carry_in
    });
}

/// Executes the ROR (Rotate Right) instruction.
///
/// The old carry enters bit 7; the old bit 0 becomes the new carry.
pub(crate) fn execute_ror<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    read_modify_write(cpu, mode, |cpu, value| {
        let carry_in = (cpu.flag_c as u8) << 7;
        cpu.flag_c = (value & 0x01) != 0;
        (value >> 1) | carry_in
    });
}

/// Applies `op` to the accumulator or to the byte at the effective address, then
/// sets Z and N from the result.
///
/// The 65C02 only spends the seventh cycle of a shift with Absolute,X addressing
/// when the index crosses a page.
fn read_modify_write<M, F>(cpu: &mut CPU<M>, mode: AddressingMode, op: F)
where
    M: MemoryBus,
    F: FnOnce(&mut CPU<M>, u8) -> u8,
{
    if mode == AddressingMode::Accumulator {
        let value = cpu.a;
        let result = op(cpu, value);
        cpu.a = result;
        cpu.set_zero_negative(result);
        return;
    }

    let addr = cpu.resolve(mode);
    let value = cpu.memory.read(addr);
    let result = op(cpu, value);
    cpu.memory.write(addr, result);
    cpu.set_zero_negative(result);

    if cpu.variant.is_65c02() && mode == AddressingMode::AbsoluteX && cpu.page_crossed {
        cpu.cycles += 1;
    }
}
