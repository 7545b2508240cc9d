//! # Increment and Decrement Instructions
//!
//! This module implements increment and decrement operations:
//! - INC, DEC: Increment / Decrement Memory (and the accumulator on the 65C02)
//! - INX, INY, DEX, DEY: Increment / Decrement index registers
//!
//! All wrap at the byte boundary and update Z and N from the result. Carry and
//! overflow are never touched.

use crate::{AddressingMode, MemoryBus, CPU};

/// Executes the INC (Increment) instruction.
///
/// With `Accumulator` addressing this is the 65C02 `INC A`.
pub(crate) fn execute_inc<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    modify(cpu, mode, |value| value.wrapping_add(1));
}

/// Executes the DEC (Decrement) instruction.
///
/// With `Accumulator` addressing this is the 65C02 `DEC A`.
pub(crate) fn execute_dec<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    modify(cpu, mode, |value| value.wrapping_sub(1));
}

fn modify<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, op: impl FnOnce(u8) -> u8) {
    let result = if mode == AddressingMode::Accumulator {
        cpu.a = op(cpu.a);
        cpu.a
    } else {
        let addr = cpu.resolve(mode);
        let result = op(cpu.memory.read(addr));
        cpu.memory.write(addr, result);
        result
    };

    cpu.set_zero_negative(result);
}

/// Executes the INX (Increment X Register) instruction.
pub(crate) fn execute_inx<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.x = cpu.x.wrapping_add(1);
    cpu.set_zero_negative(cpu.x);
}

/// Executes the INY (Increment Y Register) instruction.
pub(crate) fn execute_iny<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.y = cpu.y.wrapping_add(1);
    cpu.set_zero_negative(cpu.y);
}

/// Executes the DEX (Decrement X Register) instruction.
pub(crate) fn execute_dex<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.x = cpu.x.wrapping_sub(1);
    cpu.set_zero_negative(cpu.x);
}

/// Executes the DEY (Decrement Y Register) instruction.
pub(crate) fn execute_dey<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.y = cpu.y.wrapping_sub(1);
    cpu.set_zero_negative(cpu.y);
}
