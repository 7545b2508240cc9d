//! # Opcode Cycle Tables
//!
//! This module contains the static, process-wide tables that drive cycle accounting:
//!
//! - **`NMOS_CYCLES`** - base cost of every opcode on the NMOS 6502. The 105
//!   undocumented opcodes are executed as 2-cycle NOPs and carry a cost of 2.
//! - **`CMOS_CYCLES`** - base cost of every opcode on the 65C02, where all 256 byte
//!   values are defined.
//! - **`PAGE_CROSS_CYCLES`** - extra cost added when an indexed read crosses a page.
//! - **`CMOS_NOP_BYTES`** - instruction length of the 65C02 NOP-equivalent opcodes.
//!
//! Base costs exclude page-crossing penalties, taken-branch penalties and the 65C02
//! decimal-mode cycle; those are added dynamically by the execution core.

use crate::Variant;

/// Base cycle cost per opcode on the NMOS 6502.
///
/// Indexed by opcode byte. Undocumented opcodes cost 2 cycles.
///
/// # Examples
///
/// ```
/// use lib6502::opcodes::NMOS_CYCLES;
///
/// assert_eq!(NMOS_CYCLES[0xA9], 2); // LDA #imm
/// assert_eq!(NMOS_CYCLES[0x6C], 5); // JMP (ind)
/// assert_eq!(NMOS_CYCLES[0x02], 2); // undocumented
/// ```
#[rustfmt::skip]
pub const NMOS_CYCLES: [u8; 256] = [
    7, 6, 2, 2, 2, 3, 5, 2, 3, 2, 2, 2, 2, 4, 6, 2, // 0x
    2, 5, 2, 2, 2, 4, 6, 2, 2, 4, 2, 2, 2, 4, 7, 2, // 1x
    6, 6, 2, 2, 3, 3, 5, 2, 4, 2, 2, 2, 4, 4, 6, 2, // 2x
    2, 5, 2, 2, 2, 4, 6, 2, 2, 4, 2, 2, 2, 4, 7, 2, // 3x
    6, 6, 2, 2, 2, 3, 5, 2, 3, 2, 2, 2, 3, 4, 6, 2, // 4x
    2, 5, 2, 2, 2, 4, 6, 2, 2, 4, 2, 2, 2, 4, 7, 2, // 5x
    6, 6, 2, 2, 2, 3, 5, 2, 4, 2, 2, 2, 5, 4, 6, 2, // 6x
    2, 5, 2, 2, 2, 4, 6, 2, 2, 4, 2, 2, 2, 4, 7, 2, // 7x
    2, 6, 2, 2, 3, 3, 3, 2, 2, 2, 2, 2, 4, 4, 4, 2, // 8x
    2, 6, 2, 2, 4, 4, 4, 2, 2, 5, 2, 2, 2, 5, 2, 2, // 9x
    2, 6, 2, 2, 3, 3, 3, 2, 2, 2, 2, 2, 4, 4, 4, 2, // Ax
    2, 5, 2, 2, 4, 4, 4, 2, 2, 4, 2, 2, 4, 4, 4, 2, // Bx
    2, 6, 2, 2, 3, 3, 5, 2, 2, 2, 2, 2, 4, 4, 6, 2, // Cx
    2, 5, 2, 2, 2, 4, 6, 2, 2, 4, 2, 2, 2, 4, 7, 2, // Dx
    2, 6, 2, 2, 3, 3, 5, 2, 2, 2, 2, 2, 4, 4, 6, 2, // Ex
    2, 5, 2, 2, 2, 4, 6, 2, 2, 4, 2, 2, 2, 4, 7, 2, // Fx
];

/// Base cycle cost per opcode on the 65C02.
///
/// Read-modify-write shifts with Absolute,X addressing (`0x1E`, `0x3E`, `0x5E`,
/// `0x7E`) cost 6 here; the shift routine adds the seventh cycle only when the
/// index crosses a page, which is how the 65C02 behaves.
#[rustfmt::skip]
pub const CMOS_CYCLES: [u8; 256] = [
    7, 6, 2, 1, 5, 3, 5, 5, 3, 2, 2, 1, 6, 4, 6, 5, // 0x
    2, 5, 5, 1, 5, 4, 6, 5, 2, 4, 2, 1, 6, 4, 6, 5, // 1x
    6, 6, 2, 1, 3, 3, 5, 5, 4, 2, 2, 1, 4, 4, 6, 5, // 2x
    2, 5, 5, 1, 4, 4, 6, 5, 2, 4, 2, 1, 4, 4, 6, 5, // 3x
    6, 6, 2, 1, 3, 3, 5, 5, 3, 2, 2, 1, 3, 4, 6, 5, // 4x
    2, 5, 5, 1, 4, 4, 6, 5, 2, 4, 3, 1, 8, 4, 6, 5, // 5x
    6, 6, 2, 1, 3, 3, 5, 5, 4, 2, 2, 1, 6, 4, 6, 5, // 6x
    2, 5, 5, 1, 4, 4, 6, 5, 2, 4, 4, 1, 6, 4, 6, 5, // 7x
    2, 6, 2, 1, 3, 3, 3, 5, 2, 2, 2, 1, 4, 4, 4, 5, // 8x
    2, 6, 5, 1, 4, 4, 4, 5, 2, 5, 2, 1, 4, 5, 5, 5, // 9x
    2, 6, 2, 1, 3, 3, 3, 5, 2, 2, 2, 1, 4, 4, 4, 5, // Ax
    2, 5, 5, 1, 4, 4, 4, 5, 2, 4, 2, 1, 4, 4, 4, 5, // Bx
    2, 6, 2, 1, 3, 3, 5, 5, 2, 2, 2, 3, 4, 4, 6, 5, // Cx
    2, 5, 5, 1, 4, 4, 6, 5, 2, 4, 3, 3, 4, 4, 7, 5, // Dx
    2, 6, 2, 1, 3, 3, 5, 5, 2, 2, 2, 1, 4, 4, 6, 5, // Ex
    2, 5, 5, 1, 4, 4, 6, 5, 2, 4, 4, 1, 4, 4, 7, 5, // Fx
];

/// Extra cycles added after dispatch when the addressing mode crossed a page.
///
/// Only read instructions using Absolute,X, Absolute,Y or (Indirect),Y pay the
/// penalty. Stores and read-modify-write instructions always take their worst-case
/// base time. Branches account for their own page crossing.
#[rustfmt::skip]
pub const PAGE_CROSS_CYCLES: [u8; 256] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, // 0x
    0, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, // 1x
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, // 2x
    0, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 1, 1, 0, 0, // 3x
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, // 4x
    0, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, // 5x
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, // 6x
    0, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, // 7x
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, // 8x
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, // 9x
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, // Ax
    0, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 1, 1, 1, 0, // Bx
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, // Cx
    0, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, // Dx
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, // Ex
    0, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, // Fx
];

/// Instruction length in bytes of the 65C02 NOP-equivalent opcodes.
///
/// Zero marks an opcode with a defined, non-NOP meaning. The operand bytes of a
/// NOP-equivalent are skipped without being used.
#[rustfmt::skip]
pub const CMOS_NOP_BYTES: [u8; 256] = [
    0, 0, 2, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, // 0x
    0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, // 1x
    0, 0, 2, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, // 2x
    0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, // 3x
    0, 0, 2, 1, 2, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, // 4x
    0, 0, 0, 1, 2, 0, 0, 0, 0, 0, 0, 1, 3, 0, 0, 0, // 5x
    0, 0, 2, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, // 6x
    0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, // 7x
    0, 0, 2, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, // 8x
    0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, // 9x
    0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, // Ax
    0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, // Bx
    0, 0, 2, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, // Cx
    0, 0, 0, 1, 2, 0, 0, 0, 0, 0, 0, 0, 3, 0, 0, 0, // Dx
    0, 0, 2, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, // Ex
    0, 0, 0, 1, 2, 0, 0, 0, 0, 0, 0, 1, 3, 0, 0, 0, // Fx
];

/// Returns the base cycle cost of `opcode` for the given variant.
pub fn base_cycles(variant: Variant, opcode: u8) -> u8 {
    match variant {
        Variant::Nmos6502 => NMOS_CYCLES[opcode as usize],
        Variant::Cmos65C02 => CMOS_CYCLES[opcode as usize],
    }
}

/// Returns the page-crossing penalty for `opcode`.
pub fn page_cross_penalty(opcode: u8) -> u8 {
    PAGE_CROSS_CYCLES[opcode as usize]
}

/// Returns the length of a 65C02 NOP-equivalent opcode, or `None` if the opcode
/// has a defined meaning.
///
/// # Examples
///
/// ```
/// use lib6502::opcodes::cmos_nop_bytes;
///
/// assert_eq!(cmos_nop_bytes(0x03), Some(1));
/// assert_eq!(cmos_nop_bytes(0x5C), Some(3));
/// assert_eq!(cmos_nop_bytes(0xEA), None); // the documented NOP
/// ```
pub fn cmos_nop_bytes(opcode: u8) -> Option<u8> {
    match CMOS_NOP_BYTES[opcode as usize] {
        0 => None,
        n => Some(n),
    }
}
