//! # CPU State and Execution
//!
//! This module contains the CPU struct representing the 6502/65C02 processor state and
//! the fetch-decode-execute loop.
//!
//! ## CPU State
//!
//! The CPU maintains:
//! - **Registers**: Accumulator (A), index registers (X, Y)
//! - **Program counter** (PC): 16-bit address of next instruction
//! - **Stack pointer** (SP): 8-bit offset into stack page (0x0100-0x01FF)
//! - **Status flags**: N, V, D, I, Z, C (individual bool fields; B exists only on the stack)
//! - **Cycle counter**: u64 monotonically increasing cycle count
//! - **Mode bits**: chip variant, BCD enable, and the WAI/STP latches
//!
//! ## Execution Model
//!
//! The CPU executes instructions via:
//! - `step()`: Execute one instruction
//! - `run_for_cycles()`: Execute until cycle budget exhausted
//!
//! Interrupts are never polled: the host calls `raise_nmi()`, `raise_irq()` and
//! `reset()` between steps (see the `interrupts` module).

use crate::instructions;
use crate::opcodes;
use crate::trace::TraceRecord;
use crate::{CpuConfig, MemoryBus, Variant, TRACE_TARGET};

/// Base address of the hardware stack page.
pub(crate) const STACK_BASE: u16 = 0x0100;

/// A 6502 or 65C02 processor bound to a memory port `M`.
///
/// Holds the architectural registers and flags, the cycle counter and the mode bits
/// selecting chip behavior. All bus traffic goes through `M`.
///
/// # Examples
///
/// ```
/// use lib6502::{FlatMemory, MemoryBus, CPU};
///
/// let mut memory = FlatMemory::new();
/// memory.write(0xFFFC, 0x00);
/// memory.write(0xFFFD, 0x80);
///
/// let mut cpu = CPU::new(memory);
/// assert_eq!(cpu.pc(), 0x0000); // nothing loaded until reset
///
/// cpu.reset();
/// assert_eq!(cpu.pc(), 0x8000);
/// assert_eq!(cpu.sp(), 0xFD);
/// assert_eq!(cpu.cycles(), 0);
/// ```
pub struct CPU<M: MemoryBus> {
    /// Accumulator register
    pub(crate) a: u8,

    /// X index register
    pub(crate) x: u8,

    /// Y index register
    pub(crate) y: u8,

    /// Program counter (address of next byte to fetch)
    pub(crate) pc: u16,

    /// Stack pointer (0x0100 + sp gives full stack address)
    pub(crate) sp: u8,

    /// Negative flag (set if bit 7 of result is 1)
    pub(crate) flag_n: bool,

    /// Overflow flag (set on signed overflow)
    pub(crate) flag_v: bool,

    /// Decimal mode flag (enables BCD arithmetic)
    pub(crate) flag_d: bool,

    /// Interrupt disable flag (blocks IRQ when set)
    pub(crate) flag_i: bool,

    /// Zero flag (set if result is zero)
    pub(crate) flag_z: bool,

    /// Carry flag (set on unsigned overflow/underflow)
    pub(crate) flag_c: bool,

    /// Total CPU cycles executed since the last reset
    pub(crate) cycles: u64,

    /// Chip being emulated
    pub(crate) variant: Variant,

    /// Whether the D flag selects BCD arithmetic
    pub(crate) bcd_enabled: bool,

    /// Latched by STP; only reset clears it
    pub(crate) stopped: bool,

    /// Latched by WAI; any interrupt or reset clears it
    pub(crate) waiting: bool,

    /// Set by an indexed resolver during the current instruction
    pub(crate) page_crossed: bool,

    /// Emit a trace record before every instruction
    pub(crate) trace_enabled: bool,

    /// Memory bus implementation
    pub(crate) memory: M,
}

impl<M: MemoryBus> CPU<M> {
    /// Creates a new NMOS 6502 with decimal mode enabled, bound to `memory`.
    ///
    /// The CPU starts in the power-on state:
    /// - A, X, Y, PC and all flags are zero
    /// - Stack pointer (SP) is 0xFD
    /// - Cycle counter is 0
    ///
    /// Nothing is read from memory; call [`CPU::reset`] to load PC from the reset vector.
    pub fn new(memory: M) -> Self {
        Self::with_config(memory, CpuConfig::default())
    }

    /// Creates a new CPU with an explicit configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib6502::{CpuConfig, FlatMemory, Variant, CPU};
    ///
    /// let config = CpuConfig {
    ///     variant: Variant::Cmos65C02,
    ///     ..CpuConfig::default()
    /// };
    /// let cpu = CPU::with_config(FlatMemory::new(), config);
    /// assert!(cpu.is_65c02());
    /// assert!(cpu.bcd_enabled());
    /// ```
    pub fn with_config(memory: M, config: CpuConfig) -> Self {
        Self {
            a: 0x00,
            x: 0x00,
            y: 0x00,
            pc: 0x0000,
            sp: 0xFD,
            flag_n: false,
            flag_v: false,
            flag_d: false,
            flag_i: false,
            flag_z: false,
            flag_c: false,
            cycles: 0,
            variant: config.variant,
            bcd_enabled: config.bcd_enabled,
            stopped: false,
            waiting: false,
            page_crossed: false,
            trace_enabled: false,
            memory,
        }
    }

    /// Installs a new memory port and returns the previous one.
    ///
    /// Processor state is untouched; the CPU simply starts talking to the new bus.
    pub fn bind_memory(&mut self, memory: M) -> M {
        std::mem::replace(&mut self.memory, memory)
    }

    /// Executes one instruction and advances the CPU state.
    ///
    /// Performs the fetch-decode-execute cycle:
    /// 1. Return immediately if the CPU is waiting (WAI) or stopped (STP)
    /// 2. Fetch opcode byte at PC and advance PC
    /// 3. Add the opcode's base cycle cost for the active variant
    /// 4. Dispatch: resolve the operand and perform the instruction
    /// 5. Add the page-crossing penalty if the addressing mode crossed a page
    ///
    /// Never fails: undocumented NMOS opcodes execute as 2-cycle NOPs.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib6502::{FlatMemory, MemoryBus, CPU};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.write(0xFFFC, 0x00);
    /// mem.write(0xFFFD, 0x80);
    /// mem.write(0x8000, 0xEA); // NOP
    ///
    /// let mut cpu = CPU::new(mem);
    /// cpu.reset();
    /// cpu.step();
    ///
    /// assert_eq!(cpu.pc(), 0x8001);
    /// assert_eq!(cpu.cycles(), 2);
    /// ```
    pub fn step(&mut self) {
        if self.stopped || self.waiting {
            return;
        }

        if self.trace_enabled && log::log_enabled!(target: TRACE_TARGET, log::Level::Trace) {
            log::trace!(target: TRACE_TARGET, "{}", self.debug_snapshot());
        }

        let opcode = self.fetch_byte();
        self.cycles += opcodes::base_cycles(self.variant, opcode) as u64;
        self.page_crossed = false;

        instructions::execute(self, opcode);

        if self.page_crossed {
            self.cycles += opcodes::page_cross_penalty(opcode) as u64;
            self.page_crossed = false;
        }
    }

    /// Runs the CPU for a specified number of cycles.
    ///
    /// Executes whole instructions until the cycle budget is exhausted, or until the
    /// CPU enters the waiting or stopped state. Returns the actual number of cycles
    /// consumed (may be slightly more than budget due to instruction granularity).
    ///
    /// This is useful for frame-locked execution models where the CPU must run for
    /// an exact number of cycles per frame (e.g., 29780 cycles for 60Hz NTSC).
    ///
    /// # Examples
    ///
    /// ```
    /// use lib6502::{FlatMemory, MemoryBus, CPU};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.load(0x8000, &[0xEA; 16]).unwrap(); // NOPs, 2 cycles each
    /// mem.write(0xFFFC, 0x00);
    /// mem.write(0xFFFD, 0x80);
    ///
    /// let mut cpu = CPU::new(mem);
    /// cpu.reset();
    ///
    /// assert_eq!(cpu.run_for_cycles(9), 10);
    /// assert_eq!(cpu.pc(), 0x8005);
    /// ```
    pub fn run_for_cycles(&mut self, cycle_budget: u64) -> u64 {
        let start_cycles = self.cycles;
        let target_cycles = start_cycles.saturating_add(cycle_budget);

        while self.cycles < target_cycles && !self.stopped && !self.waiting {
            self.step();
        }

        self.cycles - start_cycles
    }

    /// Takes a read-only snapshot of the registers for host-side logging.
    ///
    /// Reads the three bytes at PC through the memory bus but never mutates state.
    pub fn debug_snapshot(&self) -> TraceRecord {
        TraceRecord {
            pc: self.pc,
            a: self.a,
            x: self.x,
            y: self.y,
            sp: self.sp,
            p: self.status_with_break(false),
            bytes: [
                self.memory.read(self.pc),
                self.memory.read(self.pc.wrapping_add(1)),
                self.memory.read(self.pc.wrapping_add(2)),
            ],
            cyc: ((self.cycles * 3) % 341) as u16,
        }
    }

    /// Enables or disables the per-instruction trace.
    ///
    /// When enabled, `step()` logs the [`TraceRecord`] of every instruction at trace
    /// level on the `cpu6502::trace` target before executing it.
    pub fn set_trace(&mut self, enabled: bool) {
        self.trace_enabled = enabled;
    }

    // ========== Bus Helpers ==========

    /// Fetches the byte at PC and advances PC.
    pub(crate) fn fetch_byte(&mut self) -> u8 {
        let value = self.memory.read(self.pc);
        self.pc = self.pc.wrapping_add(1);
        value
    }

    /// Fetches a little-endian word at PC and advances PC by two.
    pub(crate) fn fetch_word(&mut self) -> u16 {
        let lo = self.fetch_byte() as u16;
        let hi = self.fetch_byte() as u16;
        (hi << 8) | lo
    }

    /// Reads a little-endian word; the high byte comes from `addr + 1`.
    pub(crate) fn read_word(&self, addr: u16) -> u16 {
        let lo = self.memory.read(addr) as u16;
        let hi = self.memory.read(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    /// Reads a little-endian word the way the NMOS part does for indirect pointers:
    /// the high-byte fetch wraps within the page, so `$10FF` pairs with `$1000`.
    pub(crate) fn read_word_page_wrapped(&self, addr: u16) -> u16 {
        let hi_addr = (addr & 0xFF00) | (addr.wrapping_add(1) & 0x00FF);
        let lo = self.memory.read(addr) as u16;
        let hi = self.memory.read(hi_addr) as u16;
        (hi << 8) | lo
    }

    /// Pointer read used by JMP (ind), (zp,X) and (zp),Y.
    ///
    /// NMOS reproduces the page-wrap defect; the 65C02 reads the pointer correctly.
    pub(crate) fn read_word_indirect(&self, addr: u16) -> u16 {
        if self.variant.is_65c02() {
            self.read_word(addr)
        } else {
            self.read_word_page_wrapped(addr)
        }
    }

    // ========== Stack Helpers ==========

    pub(crate) fn push_byte(&mut self, value: u8) {
        self.memory.write(STACK_BASE | self.sp as u16, value);
        self.sp = self.sp.wrapping_sub(1);
    }

    /// Pushes high byte first so the word sits little-endian in memory.
    pub(crate) fn push_word(&mut self, value: u16) {
        self.push_byte((value >> 8) as u8);
        self.push_byte(value as u8);
    }

    pub(crate) fn pull_byte(&mut self) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        self.memory.read(STACK_BASE | self.sp as u16)
    }

    pub(crate) fn pull_word(&mut self) -> u16 {
        let lo = self.pull_byte() as u16;
        let hi = self.pull_byte() as u16;
        (hi << 8) | lo
    }

    // ========== Flag Helpers ==========

    /// Sets Z if `value` is zero and N from bit 7 of `value`.
    pub(crate) fn set_zero_negative(&mut self, value: u8) {
        self.flag_z = value == 0;
        self.flag_n = (value & 0x80) != 0;
    }

    /// Packs the flags with an explicit B bit; bit 5 is always 1.
    pub(crate) fn status_with_break(&self, brk: bool) -> u8 {
        let mut status: u8 = 0b0010_0000;

        if self.flag_n {
            status |= 0b1000_0000;
        }
        if self.flag_v {
            status |= 0b0100_0000;
        }
        if brk {
            status |= 0b0001_0000;
        }
        if self.flag_d {
            status |= 0b0000_1000;
        }
        if self.flag_i {
            status |= 0b0000_0100;
        }
        if self.flag_z {
            status |= 0b0000_0010;
        }
        if self.flag_c {
            status |= 0b0000_0001;
        }

        status
    }

    // ========== Register Getters ==========

    /// Returns the accumulator register value.
    pub fn a(&self) -> u8 {
        self.a
    }

    /// Returns the X index register value.
    pub fn x(&self) -> u8 {
        self.x
    }

    /// Returns the Y index register value.
    pub fn y(&self) -> u8 {
        self.y
    }

    /// Returns the program counter value.
    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Returns the stack pointer value.
    ///
    /// Note: The full stack address is 0x0100 + SP. The stack grows downward from 0x01FF.
    pub fn sp(&self) -> u8 {
        self.sp
    }

    /// Returns the status register as a packed byte.
    ///
    /// Bit layout (NV-BDIZC):
    /// - Bit 7: N (Negative)
    /// - Bit 6: V (Overflow)
    /// - Bit 5: (unused, always 1)
    /// - Bit 4: B (only exists on the stack, always 0 here)
    /// - Bit 3: D (Decimal)
    /// - Bit 2: I (Interrupt Disable)
    /// - Bit 1: Z (Zero)
    /// - Bit 0: C (Carry)
    ///
    /// # Examples
    ///
    /// ```
    /// use lib6502::{FlatMemory, CPU};
    ///
    /// let mut cpu = CPU::new(FlatMemory::new());
    /// cpu.reset();
    ///
    /// // I flag set by reset (bit 2), bit 5 always 1
    /// assert_eq!(cpu.status(), 0b0010_0100);
    /// ```
    pub fn status(&self) -> u8 {
        self.status_with_break(false)
    }

    /// Returns the total number of CPU cycles executed since the last reset.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Returns the emulated chip.
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Returns true when emulating the 65C02.
    pub fn is_65c02(&self) -> bool {
        self.variant.is_65c02()
    }

    /// Returns true if the D flag selects BCD arithmetic on this CPU.
    pub fn bcd_enabled(&self) -> bool {
        self.bcd_enabled
    }

    /// Returns a shared reference to the memory bus.
    pub fn memory(&self) -> &M {
        &self.memory
    }

    /// Returns a mutable reference to the memory bus.
    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    // ========== Status Flag Getters ==========

    /// Returns true if the Negative flag is set.
    pub fn flag_n(&self) -> bool {
        self.flag_n
    }

    /// Returns true if the Overflow flag is set.
    pub fn flag_v(&self) -> bool {
        self.flag_v
    }

    /// Returns true if the Decimal mode flag is set.
    pub fn flag_d(&self) -> bool {
        self.flag_d
    }

    /// Returns true if the Interrupt Disable flag is set.
    pub fn flag_i(&self) -> bool {
        self.flag_i
    }

    /// Returns true if the Zero flag is set.
    pub fn flag_z(&self) -> bool {
        self.flag_z
    }

    /// Returns true if the Carry flag is set.
    pub fn flag_c(&self) -> bool {
        self.flag_c
    }

    // ========== Setters ==========

    /// Sets the accumulator.
    pub fn set_a(&mut self, value: u8) {
        self.a = value;
    }

    /// Sets the X register.
    pub fn set_x(&mut self, value: u8) {
        self.x = value;
    }

    /// Sets the Y register.
    pub fn set_y(&mut self, value: u8) {
        self.y = value;
    }

    /// Sets the program counter.
    pub fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }

    /// Sets the stack pointer.
    pub fn set_sp(&mut self, value: u8) {
        self.sp = value;
    }

    /// Loads all flags from a packed byte, the way PLP does.
    ///
    /// B and bit 5 are not latches and are ignored.
    pub fn set_status(&mut self, value: u8) {
        self.flag_n = value & 0b1000_0000 != 0;
        self.flag_v = value & 0b0100_0000 != 0;
        self.flag_d = value & 0b0000_1000 != 0;
        self.flag_i = value & 0b0000_0100 != 0;
        self.flag_z = value & 0b0000_0010 != 0;
        self.flag_c = value & 0b0000_0001 != 0;
    }

    /// Sets the Negative flag.
    pub fn set_flag_n(&mut self, value: bool) {
        self.flag_n = value;
    }

    /// Sets the Overflow flag.
    pub fn set_flag_v(&mut self, value: bool) {
        self.flag_v = value;
    }

    /// Sets the Decimal mode flag.
    pub fn set_flag_d(&mut self, value: bool) {
        self.flag_d = value;
    }

    /// Sets the Interrupt Disable flag.
    pub fn set_flag_i(&mut self, value: bool) {
        self.flag_i = value;
    }

    /// Sets the Zero flag.
    pub fn set_flag_z(&mut self, value: bool) {
        self.flag_z = value;
    }

    /// Sets the Carry flag.
    pub fn set_flag_c(&mut self, value: bool) {
        self.flag_c = value;
    }

    /// Switches the emulated chip.
    pub fn set_variant(&mut self, variant: Variant) {
        self.variant = variant;
    }

    /// Enables or disables BCD arithmetic.
    pub fn set_bcd_enabled(&mut self, enabled: bool) {
        self.bcd_enabled = enabled;
    }
}
