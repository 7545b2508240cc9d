//! # Addressing Modes
//!
//! This module defines the addressing modes of the 6502 and 65C02 and the resolvers
//! that turn the bytes following an opcode into an effective address.
//!
//! Each resolver consumes its operand bytes at PC (advancing PC) and returns the
//! effective address. Indexed modes whose index carries into the high byte record a
//! page crossing on the CPU; the execution core charges the penalty after dispatch.

use crate::{MemoryBus, CPU};

/// 6502 addressing mode enumeration.
///
/// The addressing mode determines how the CPU interprets the operand bytes
/// that follow an opcode and how it calculates the effective memory address
/// for the operation.
///
/// # Operand Sizes
///
/// - **0 bytes**: Implicit, Accumulator
/// - **1 byte**: Immediate, ZeroPage, ZeroPageX, ZeroPageY, Relative, IndirectX,
///   IndirectY, ZeroPageIndirect
/// - **2 bytes**: Absolute, AbsoluteX, AbsoluteY, Indirect, AbsoluteIndexedIndirect,
///   ZeroPageRelative
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    /// No operand, operation implied by instruction.
    ///
    /// Examples: CLC, RTS, NOP
    Implicit,

    /// Operates directly on the accumulator register.
    ///
    /// Examples: LSR A, ROL A, ASL A
    Accumulator,

    /// 8-bit constant operand in instruction.
    ///
    /// Example: LDA #$10 (load immediate value 0x10 into accumulator)
    Immediate,

    /// 8-bit address in zero page (0x00-0xFF).
    ///
    /// Example: LDA $80 (load from address 0x0080)
    ZeroPage,

    /// Zero page address indexed by X register.
    ///
    /// Example: LDA $80,X (load from address 0x0080 + X, wraps within zero page)
    ZeroPageX,

    /// Zero page address indexed by Y register.
    ///
    /// Example: LDX $80,Y (load from address 0x0080 + Y, wraps within zero page)
    ZeroPageY,

    /// Signed 8-bit offset for branch instructions.
    ///
    /// Example: BEQ label (branch if zero flag set, offset is relative to PC)
    Relative,

    /// Full 16-bit address.
    ///
    /// Example: JMP $1234 (jump to address 0x1234)
    Absolute,

    /// 16-bit address indexed by X register.
    ///
    /// Example: LDA $1234,X (load from address 0x1234 + X)
    /// May incur +1 cycle penalty if page boundary is crossed.
    AbsoluteX,

    /// 16-bit address indexed by Y register.
    ///
    /// Example: LDA $1234,Y (load from address 0x1234 + Y)
    /// May incur +1 cycle penalty if page boundary is crossed.
    AbsoluteY,

    /// Indirect jump through 16-bit pointer.
    ///
    /// Example: JMP ($FFFC) (jump to address stored at 0xFFFC/0xFFFD)
    /// Only used by JMP instruction. The NMOS part wraps the pointer's high-byte
    /// fetch within the page; the 65C02 does not.
    Indirect,

    /// Indexed indirect: (ZP + X) then dereference.
    ///
    /// Example: LDA ($40,X) (add X to 0x40, read 16-bit address from that ZP location, load from result)
    IndirectX,

    /// Indirect indexed: ZP dereference then + Y.
    ///
    /// Example: LDA ($40),Y (read 16-bit address from ZP 0x40, add Y, load from result)
    /// May incur +1 cycle penalty if page boundary is crossed.
    IndirectY,

    /// Zero page indirect (65C02 only).
    ///
    /// Example: LDA ($40) (read 16-bit address from ZP 0x40, load from result)
    ZeroPageIndirect,

    /// Absolute indexed indirect (65C02 only).
    ///
    /// Example: JMP ($1234,X) (read 16-bit address from 0x1234 + X, jump there)
    AbsoluteIndexedIndirect,

    /// Zero page address followed by a branch offset (65C02 only).
    ///
    /// Example: BBR0 $12,label (test bit 0 of 0x0012, branch if clear)
    ZeroPageRelative,
}

impl AddressingMode {
    /// Number of operand bytes following the opcode.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib6502::AddressingMode;
    ///
    /// assert_eq!(AddressingMode::Implicit.operand_bytes(), 0);
    /// assert_eq!(AddressingMode::IndirectY.operand_bytes(), 1);
    /// assert_eq!(AddressingMode::ZeroPageRelative.operand_bytes(), 2);
    /// ```
    pub fn operand_bytes(self) -> u8 {
        match self {
            AddressingMode::Implicit | AddressingMode::Accumulator => 0,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::Relative
            | AddressingMode::IndirectX
            | AddressingMode::IndirectY
            | AddressingMode::ZeroPageIndirect => 1,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect
            | AddressingMode::AbsoluteIndexedIndirect
            | AddressingMode::ZeroPageRelative => 2,
        }
    }
}

/// True when `base` and `addr` lie in different 256-byte pages.
#[inline]
pub(crate) fn crosses_page(base: u16, addr: u16) -> bool {
    (base & 0xFF00) != (addr & 0xFF00)
}

impl<M: MemoryBus> CPU<M> {
    /// Resolves the effective address for `mode`, consuming its operand bytes.
    ///
    /// For `Immediate` the address is the operand byte itself. `Indirect` and
    /// `AbsoluteIndexedIndirect` return the jump target. Modes without a memory
    /// operand (`Implicit`, `Accumulator`, `Relative`, `ZeroPageRelative`) consume
    /// nothing and return the current PC; their instructions fetch their operands
    /// themselves.
    pub(crate) fn resolve(&mut self, mode: AddressingMode) -> u16 {
        match mode {
            AddressingMode::Immediate => {
                let addr = self.pc;
                self.pc = self.pc.wrapping_add(1);
                addr
            }
            AddressingMode::ZeroPage => self.fetch_byte() as u16,
            AddressingMode::ZeroPageX => self.fetch_byte().wrapping_add(self.x) as u16,
            AddressingMode::ZeroPageY => self.fetch_byte().wrapping_add(self.y) as u16,
            AddressingMode::Absolute => self.fetch_word(),
            AddressingMode::AbsoluteX => {
                let base = self.fetch_word();
                self.index_with_penalty(base, self.x)
            }
            AddressingMode::AbsoluteY => {
                let base = self.fetch_word();
                self.index_with_penalty(base, self.y)
            }
            AddressingMode::Indirect => {
                let pointer = self.fetch_word();
                self.read_word_indirect(pointer)
            }
            AddressingMode::IndirectX => {
                let pointer = self.fetch_byte().wrapping_add(self.x);
                self.read_word_indirect(pointer as u16)
            }
            AddressingMode::IndirectY => {
                let pointer = self.fetch_byte();
                let base = self.read_word_indirect(pointer as u16);
                self.index_with_penalty(base, self.y)
            }
            AddressingMode::ZeroPageIndirect => {
                let pointer = self.fetch_byte();
                self.read_word(pointer as u16)
            }
            AddressingMode::AbsoluteIndexedIndirect => {
                let pointer = self.fetch_word().wrapping_add(self.x as u16);
                self.read_word(pointer)
            }
            AddressingMode::Implicit
            | AddressingMode::Accumulator
            | AddressingMode::Relative
            | AddressingMode::ZeroPageRelative => self.pc,
        }
    }

    /// Reads the operand for `mode`: the accumulator for `Accumulator`, otherwise
    /// the byte at the resolved effective address.
    pub(crate) fn read_operand(&mut self, mode: AddressingMode) -> u8 {
        if mode == AddressingMode::Accumulator {
            return self.a;
        }
        let addr = self.resolve(mode);
        self.memory.read(addr)
    }

    /// Fetches a signed branch displacement.
    pub(crate) fn fetch_relative(&mut self) -> i8 {
        self.fetch_byte() as i8
    }

    fn index_with_penalty(&mut self, base: u16, index: u8) -> u16 {
        let addr = base.wrapping_add(index as u16);
        if crosses_page(base, addr) {
            self.page_crossed = true;
        }
        addr
    }
}
