//! # Branch Instructions
//!
//! This module implements the relative branches:
//! - BCC, BCS: Branch on Carry Clear / Set
//! - BEQ, BNE: Branch on Zero Set / Clear
//! - BMI, BPL: Branch on Negative Set / Clear
//! - BVC, BVS: Branch on Overflow Clear / Set
//! - BRA: Branch Always (65C02)
//!
//! All branch instructions use relative addressing with a signed 8-bit offset
//! measured from the address of the next instruction.
//!
//! Cycle timing:
//! - base cost if the branch is not taken
//! - +1 cycle if the branch is taken
//! - +1 more cycle if the target lies in a different page

use crate::addressing::crosses_page;
use crate::{MemoryBus, CPU};

/// Condition tested by a branch opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Condition {
    CarryClear,
    CarrySet,
    Equal,
    NotEqual,
    Minus,
    Plus,
    OverflowClear,
    OverflowSet,
    Always,
}

impl Condition {
    fn holds<M: MemoryBus>(self, cpu: &CPU<M>) -> bool {
        match self {
            Condition::CarryClear => !cpu.flag_c,
            Condition::CarrySet => cpu.flag_c,
            Condition::Equal => cpu.flag_z,
            Condition::NotEqual => !cpu.flag_z,
            Condition::Minus => cpu.flag_n,
            Condition::Plus => !cpu.flag_n,
            Condition::OverflowClear => !cpu.flag_v,
            Condition::OverflowSet => cpu.flag_v,
            Condition::Always => true,
        }
    }
}

/// Executes a branch instruction.
///
/// Always consumes the offset byte. If `condition` holds, PC moves by the signed
/// offset and the taken/page-crossing cycles are charged. No flags are affected.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU
/// * `condition` - Flag test that decides whether the branch is taken
pub(crate) fn execute_branch<M: MemoryBus>(cpu: &mut CPU<M>, condition: Condition) {
    let offset = cpu.fetch_relative();
    let taken = condition.holds(cpu);
    branch_if(cpu, taken, offset);
}

/// Moves PC by `offset` when `taken`, charging the branch penalties.
///
/// Shared with the 65C02 bit-branch instructions (BBR/BBS).
pub(crate) fn branch_if<M: MemoryBus>(cpu: &mut CPU<M>, taken: bool, offset: i8) {
    if !taken {
        return;
    }

    let next = cpu.pc;
    let target = next.wrapping_add_signed(offset as i16);

    cpu.cycles += 1;
    if crosses_page(next, target) {
        cpu.cycles += 1;
    }

    cpu.pc = target;
}
