//! # Status Flag Manipulation Instructions
//!
//! This module implements instructions that directly modify processor status flags:
//! - CLC / SEC: Clear / Set Carry Flag
//! - CLI / SEI: Clear / Set Interrupt Disable
//! - CLD / SED: Clear / Set Decimal Mode
//! - CLV: Clear Overflow Flag
//!
//! These instructions use implied addressing mode and execute in 2 cycles.

use crate::{MemoryBus, CPU};

/// Status flag that can be written by a dedicated instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flag {
    Carry,
    InterruptDisable,
    Decimal,
    Overflow,
}

/// Executes CLC, SEC, CLI, SEI, CLD, SED or CLV.
///
/// Writes `value` into `flag`; all other flags are unchanged.
pub(crate) fn execute_set_flag<M: MemoryBus>(cpu: &mut CPU<M>, flag: Flag, value: bool) {
    match flag {
        Flag::Carry => cpu.flag_c = value,
        Flag::InterruptDisable => cpu.flag_i = value,
        Flag::Decimal => cpu.flag_d = value,
        Flag::Overflow => cpu.flag_v = value,
    }
}
