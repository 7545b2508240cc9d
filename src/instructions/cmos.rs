//! # 65C02 Extension Instructions
//!
//! Instructions with no NMOS counterpart that do not fit another family:
//! - TSB, TRB: Test and Set / Reset memory bits against the accumulator
//! - RMB0-7, SMB0-7: Reset / Set a single zero-page bit (Rockwell)
//! - BBR0-7, BBS0-7: Branch on a zero-page bit Reset / Set (Rockwell)
//! - WAI: Wait for Interrupt
//! - STP: Stop the processor
//!
//! The remaining 65C02 additions (BRA, PHX/PLX/PHY/PLY, STZ, INC A/DEC A, BIT #imm
//! and the new addressing forms) reuse the NMOS routines.

use super::branches::branch_if;
use crate::{AddressingMode, MemoryBus, CPU};

/// Executes the TSB (Test and Set Bits) instruction.
///
/// Z is set as by BIT (`(A & M) == 0`); the memory byte becomes `M | A`.
pub(crate) fn execute_tsb<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    let addr = cpu.resolve(mode);
    let value = cpu.memory.read(addr);
    cpu.flag_z = (value & cpu.a) == 0;
    cpu.memory.write(addr, value | cpu.a);
}

/// Executes the TRB (Test and Reset Bits) instruction.
///
/// Z is set as by BIT (`(A & M) == 0`); the memory byte becomes `M & !A`.
pub(crate) fn execute_trb<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    let addr = cpu.resolve(mode);
    let value = cpu.memory.read(addr);
    cpu.flag_z = (value & cpu.a) == 0;
    cpu.memory.write(addr, value & !cpu.a);
}

/// Executes RMBn (`set == false`) or SMBn (`set == true`) on bit `bit` of a
/// zero-page byte. No flags are affected.
pub(crate) fn execute_memory_bit<M: MemoryBus>(cpu: &mut CPU<M>, bit: u8, set: bool) {
    let addr = cpu.resolve(AddressingMode::ZeroPage);
    let value = cpu.memory.read(addr);
    let mask = 1u8 << bit;
    let result = if set { value | mask } else { value & !mask };
    cpu.memory.write(addr, result);
}

/// Executes BBRn (`set == false`) or BBSn (`set == true`).
///
/// Reads the zero-page byte named by the first operand, then branches by the
/// second operand if bit `bit` matches `set`. Timing follows the relative
/// branches.
pub(crate) fn execute_branch_on_bit<M: MemoryBus>(cpu: &mut CPU<M>, bit: u8, set: bool) {
    let addr = cpu.resolve(AddressingMode::ZeroPage);
    let value = cpu.memory.read(addr);
    let offset = cpu.fetch_relative();

    let bit_set = value & (1u8 << bit) != 0;
    branch_if(cpu, bit_set == set, offset);
}

/// Executes the WAI (Wait for Interrupt) instruction.
///
/// `step` becomes a no-op until NMI, IRQ or reset.
pub(crate) fn execute_wai<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.wait_for_interrupt();
}

/// Executes the STP (Stop) instruction.
///
/// `step` becomes a no-op until reset.
pub(crate) fn execute_stp<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.stop();
}
