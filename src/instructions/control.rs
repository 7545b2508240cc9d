//! # Control Flow Instructions
//!
//! This module implements control flow operations:
//! - BRK: Force Interrupt
//! - JMP: Jump to address
//! - JSR: Jump to Subroutine
//! - RTS: Return from Subroutine
//! - RTI: Return from Interrupt
//! - NOP: No Operation
//!
//! BRK is a software interrupt that:
//! 1. Skips the padding byte after the opcode
//! 2. Pushes PC (high byte first, then low byte)
//! 3. Pushes processor status to stack with B flag set
//! 4. Sets the I (interrupt disable) flag
//! 5. Loads PC from IRQ vector at $FFFE/F

use crate::{AddressingMode, MemoryBus, CPU};

/// Executes the BRK (Force Interrupt) instruction.
///
/// The pushed return address is the opcode address + 2, so RTI resumes after the
/// padding byte. Shares its entry sequence with the hardware interrupts; the 7
/// cycles come from the opcode's base cost.
///
/// Flags affected:
/// - B: Set to 1 in the pushed byte only
/// - I: Set to 1
/// - D: Cleared on the 65C02
pub(crate) fn execute_brk<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.brk();
}

/// Executes the JMP (Jump) instruction.
///
/// Addressing modes:
/// - Absolute (0x4C): JMP $1234
/// - Indirect (0x6C): JMP ($1234)
/// - Absolute indexed indirect (0x7C, 65C02): JMP ($1234,X)
///
/// Note: The Indirect addressing mode has a hardware bug in the NMOS 6502:
/// if the low byte of the pointer is 0xFF, the high byte is read from the start of
/// the same page. For example, JMP ($10FF) reads from $10FF and $1000 (not $1100).
/// The 65C02 fixes this.
///
/// Flags affected: None
pub(crate) fn execute_jmp<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    cpu.pc = cpu.resolve(mode);
}

/// Executes the JSR (Jump to Subroutine) instruction.
///
/// Pushes the address of the last byte of the JSR instruction (return address
/// minus one), then jumps to the absolute target.
///
/// Flags affected: None
pub(crate) fn execute_jsr<M: MemoryBus>(cpu: &mut CPU<M>) {
    let target = cpu.fetch_word();

    // PC now points past the operand; RTS adds the one back
    cpu.push_word(cpu.pc.wrapping_sub(1));
    cpu.pc = target;
}

/// Executes the RTS (Return from Subroutine) instruction.
///
/// Pulls the return address and adds one.
pub(crate) fn execute_rts<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.pc = cpu.pull_word().wrapping_add(1);
}

/// Executes the RTI (Return from Interrupt) instruction.
///
/// Pulls the status register (B and bit 5 are ignored) and then the program
/// counter. Unlike RTS, the pulled address is used as-is.
pub(crate) fn execute_rti<M: MemoryBus>(cpu: &mut CPU<M>) {
    let status = cpu.pull_byte();
    cpu.set_status(status);
    cpu.pc = cpu.pull_word();
}

/// Executes the NOP (No Operation) instruction.
///
/// Consumes `operand_bytes` bytes without using them. The documented NOP (0xEA)
/// has none; the 65C02 NOP-equivalents have up to two.
pub(crate) fn execute_nop<M: MemoryBus>(cpu: &mut CPU<M>, operand_bytes: u8) {
    cpu.pc = cpu.pc.wrapping_add(operand_bytes as u16);
}
