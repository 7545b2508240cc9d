//! # Stack Operations
//!
//! This module implements stack manipulation instructions:
//! - PHA, PLA: Push / Pull Accumulator
//! - PHP, PLP: Push / Pull Processor Status
//! - PHX, PLX, PHY, PLY: Push / Pull index registers (65C02)
//!
//! The 6502 stack is located at memory addresses 0x0100-0x01FF and grows downward.
//! The stack pointer (SP) is an 8-bit register that serves as an offset into this
//! page. The full stack address is calculated as 0x0100 | SP.

use crate::{MemoryBus, CPU};

/// Register moved by a push or pull.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StackRegister {
    A,
    X,
    Y,
}

/// Executes PHA, PHX or PHY.
///
/// Writes the register to 0x0100 | SP, then decrements SP. Flags affected: None
pub(crate) fn execute_push<M: MemoryBus>(cpu: &mut CPU<M>, register: StackRegister) {
    let value = match register {
        StackRegister::A => cpu.a,
        StackRegister::X => cpu.x,
        StackRegister::Y => cpu.y,
    };
    cpu.push_byte(value);
}

/// Executes PLA, PLX or PLY.
///
/// Increments SP, then reads the register from 0x0100 | SP. Updates Z and N.
pub(crate) fn execute_pull<M: MemoryBus>(cpu: &mut CPU<M>, register: StackRegister) {
    let value = cpu.pull_byte();
    match register {
        StackRegister::A => cpu.a = value,
        StackRegister::X => cpu.x = value,
        StackRegister::Y => cpu.y = value,
    }
    cpu.set_zero_negative(value);
}

/// Executes the PHP (Push Processor Status) instruction.
///
/// The pushed byte always has B (bit 4) and bit 5 set.
pub(crate) fn execute_php<M: MemoryBus>(cpu: &mut CPU<M>) {
    let status = cpu.status_with_break(true);
    cpu.push_byte(status);
}

/// Executes the PLP (Pull Processor Status) instruction.
///
/// B and bit 5 of the pulled byte are ignored.
pub(crate) fn execute_plp<M: MemoryBus>(cpu: &mut CPU<M>) {
    let status = cpu.pull_byte();
    cpu.set_status(status);
}
