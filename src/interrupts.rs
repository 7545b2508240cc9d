//! Interrupt sequencing and the WAI/STP run states.
//!
//! # Interrupt Service Sequence
//!
//! NMI, IRQ and BRK share one entry sequence:
//!
//! 1. Push PC (high byte, then low byte)
//! 2. Push the status register with bit 5 set, B = 1 for BRK and B = 0 otherwise
//! 3. Set the I flag to block nested IRQs
//! 4. Load PC from the vector (0xFFFA for NMI, 0xFFFE for IRQ/BRK)
//! 5. On the 65C02, clear the D flag
//!
//! **Total: 7 cycles** for the hardware interrupts. BRK's 7 cycles come from its
//! opcode's base cost, so the sequence itself adds nothing for BRK.
//!
//! RESET pushes nothing. It sets I, clears D on the 65C02, loads PC from 0xFFFC,
//! clears the WAI/STP latches and zeroes the cycle counter.
//!
//! The core never polls an interrupt line: the host calls [`CPU::raise_nmi`] or
//! [`CPU::raise_irq`] between steps, exactly when its hardware model says the line
//! is asserted.

use crate::{MemoryBus, CPU, LOG_TARGET};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// NMI vector address.
pub const NMI_VECTOR: u16 = 0xFFFA;

/// Reset vector address.
pub const RESET_VECTOR: u16 = 0xFFFC;

/// IRQ/BRK vector address.
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// Cycles charged for an NMI or IRQ entry.
const INTERRUPT_CYCLES: u64 = 7;

/// Execution state of the processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RunState {
    /// Fetching and executing instructions.
    Running,

    /// Halted by WAI until an interrupt or reset arrives.
    Waiting,

    /// Halted by STP; only reset resumes execution.
    Stopped,
}

impl<M: MemoryBus> CPU<M> {
    /// Resets the CPU from any state.
    ///
    /// Nothing is pushed. The I flag is set, the 65C02 also clears D, PC is loaded
    /// from the reset vector at 0xFFFC/0xFFFD and the cycle counter returns to 0.
    /// A, X, Y and SP are left as they were.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib6502::{FlatMemory, MemoryBus, RunState, CPU};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.write(0xFFFC, 0x34);
    /// mem.write(0xFFFD, 0x12);
    ///
    /// let mut cpu = CPU::new(mem);
    /// cpu.reset();
    ///
    /// assert_eq!(cpu.pc(), 0x1234);
    /// assert!(cpu.flag_i());
    /// assert_eq!(cpu.run_state(), RunState::Running);
    /// ```
    pub fn reset(&mut self) {
        self.flag_i = true;
        if self.variant.is_65c02() {
            self.flag_d = false;
        }
        self.pc = self.read_word(RESET_VECTOR);
        self.stopped = false;
        self.waiting = false;
        self.page_crossed = false;
        self.cycles = 0;

        log::debug!(target: LOG_TARGET, "reset -> ${:04X}", self.pc);
    }

    /// Signals a non-maskable interrupt.
    ///
    /// Always taken unless the CPU is stopped. Wakes a CPU halted by WAI.
    pub fn raise_nmi(&mut self) {
        if self.stopped {
            log::debug!(target: LOG_TARGET, "NMI ignored while stopped");
            return;
        }

        self.waiting = false;
        self.enter_interrupt(NMI_VECTOR, false);
        self.cycles += INTERRUPT_CYCLES;

        log::debug!(target: LOG_TARGET, "NMI -> ${:04X}", self.pc);
    }

    /// Signals a maskable interrupt request.
    ///
    /// Taken only when the I flag is clear. A CPU halted by WAI resumes either way;
    /// with I set it simply continues after the WAI instruction.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib6502::{FlatMemory, MemoryBus, CPU};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.write(0xFFFE, 0x00);
    /// mem.write(0xFFFF, 0x90);
    ///
    /// let mut cpu = CPU::new(mem);
    /// cpu.reset(); // I = 1
    /// cpu.raise_irq();
    /// assert_eq!(cpu.pc(), 0x0000); // masked
    ///
    /// cpu.set_flag_i(false);
    /// cpu.raise_irq();
    /// assert_eq!(cpu.pc(), 0x9000);
    /// assert_eq!(cpu.cycles(), 7);
    /// ```
    pub fn raise_irq(&mut self) {
        if self.stopped {
            log::debug!(target: LOG_TARGET, "IRQ ignored while stopped");
            return;
        }

        self.waiting = false;
        if self.flag_i {
            return;
        }

        self.enter_interrupt(IRQ_VECTOR, false);
        self.cycles += INTERRUPT_CYCLES;

        log::debug!(target: LOG_TARGET, "IRQ -> ${:04X}", self.pc);
    }

    /// Returns the current execution state.
    pub fn run_state(&self) -> RunState {
        if self.stopped {
            RunState::Stopped
        } else if self.waiting {
            RunState::Waiting
        } else {
            RunState::Running
        }
    }

    /// Software interrupt entry used by the BRK opcode.
    ///
    /// PC already points past the opcode; the padding byte after it is skipped.
    pub(crate) fn brk(&mut self) {
        self.pc = self.pc.wrapping_add(1);
        self.enter_interrupt(IRQ_VECTOR, true);
    }

    /// Latches the WAI state.
    pub(crate) fn wait_for_interrupt(&mut self) {
        self.waiting = true;
        log::debug!(target: LOG_TARGET, "WAI at ${:04X}", self.pc);
    }

    /// Latches the STP state.
    pub(crate) fn stop(&mut self) {
        self.stopped = true;
        log::debug!(target: LOG_TARGET, "STP at ${:04X}", self.pc);
    }

    fn enter_interrupt(&mut self, vector: u16, brk: bool) {
        self.push_word(self.pc);
        self.push_byte(self.status_with_break(brk));
        self.flag_i = true;
        if self.variant.is_65c02() {
            self.flag_d = false;
        }
        self.pc = self.read_word(vector);
    }
}
