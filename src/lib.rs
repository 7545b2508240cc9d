//! # 6502 / 65C02 CPU Emulator Core
//!
//! A cycle-accurate MOS 6502 and WDC 65C02 instruction-set interpreter designed for
//! modularity, clarity, and WebAssembly portability.
//!
//! The crate reproduces, instruction by instruction, the register, flag, and timing
//! behavior of the physical chips, including the indirect `JMP` page-wrap bug of the
//! NMOS part, the decimal-mode flag quirks, and the RESET/NMI/IRQ/BRK sequencing
//! (plus `WAI`/`STP` on the 65C02).
//!
//! ## Quick Start
//!
//! ```rust
//! use lib6502::{FlatMemory, MemoryBus, CPU};
//!
//! // Create 64KB flat memory
//! let mut memory = FlatMemory::new();
//!
//! // Set reset vector to point to program start at 0x8000
//! memory.write(0xFFFC, 0x00); // Low byte
//! memory.write(0xFFFD, 0x80); // High byte
//! memory.write(0x8000, 0xA9); // LDA #$42
//! memory.write(0x8001, 0x42);
//!
//! let mut cpu = CPU::new(memory);
//! cpu.reset();
//! assert_eq!(cpu.pc(), 0x8000);
//!
//! cpu.step();
//! assert_eq!(cpu.a(), 0x42);
//! assert_eq!(cpu.cycles(), 2);
//! ```
//!
//! ## Architecture
//!
//! - **Modularity**: CPU state is separated from memory via the `MemoryBus` trait
//! - **WebAssembly Portability**: No OS dependencies, deterministic execution
//! - **Cycle Accuracy**: Base costs, page-crossing penalties and branch penalties
//! - **One core, two chips**: the [`Variant`] selects NMOS or 65C02 behavior at runtime
//!
//! ## Modules
//!
//! - `cpu` - CPU state and the fetch-decode-execute loop
//! - `memory` - MemoryBus trait and implementations
//! - `opcodes` - Cycle and page-crossing tables
//! - `addressing` - Addressing modes and effective address resolution
//! - `interrupts` - RESET/NMI/IRQ/BRK sequencing and the WAI/STP states
//! - `trace` - Read-only debug snapshots for host-side logging

pub mod addressing;
pub mod cpu;
pub mod interrupts;
pub mod memory;
pub mod opcodes;
pub mod trace;

// Internal instruction implementations (not part of public API)
mod instructions;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export public API
pub use addressing::AddressingMode;
pub use cpu::CPU;
pub use interrupts::RunState;
pub use memory::{FlatMemory, FnMemory, MemoryBus};
pub use trace::TraceRecord;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Log target used by every diagnostic the core emits.
pub const LOG_TARGET: &str = "cpu6502";

/// Log target used for per-instruction trace records.
pub const TRACE_TARGET: &str = "cpu6502::trace";

/// The chip being emulated.
///
/// The variant selects the base-cycle table, the buggy or fixed indirect word read,
/// the extended opcode set, and the decimal-mode extra cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Variant {
    /// Original MOS Technology NMOS 6502.
    #[default]
    Nmos6502,

    /// Western Design Center 65C02 (CMOS, with the Rockwell bit instructions).
    Cmos65C02,
}

impl Variant {
    /// Returns true for the 65C02.
    pub fn is_65c02(self) -> bool {
        self == Variant::Cmos65C02
    }
}

/// CPU configuration applied at construction time.
///
/// # Examples
///
/// ```
/// use lib6502::{CpuConfig, FlatMemory, Variant, CPU};
///
/// // A NES-style 2A03: NMOS core with decimal mode wired off
/// let config = CpuConfig {
///     variant: Variant::Nmos6502,
///     bcd_enabled: false,
/// };
/// let cpu = CPU::with_config(FlatMemory::new(), config);
/// assert!(!cpu.bcd_enabled());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CpuConfig {
    /// Which chip to emulate.
    pub variant: Variant,

    /// Whether the D flag switches ADC/SBC to BCD arithmetic.
    ///
    /// Some platforms disable decimal mode in hardware and must ignore D.
    pub bcd_enabled: bool,
}

impl Default for CpuConfig {
    fn default() -> Self {
        Self {
            variant: Variant::Nmos6502,
            bcd_enabled: true,
        }
    }
}

/// Errors returned by host-side helpers such as [`FlatMemory::load`].
///
/// The CPU core itself never fails: every instruction is a total function of the
/// current state and the bytes it fetches.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    /// The image does not fit between the load address and the top of memory.
    #[error("image of {len} bytes does not fit at ${addr:04X}")]
    ImageTooLarge {
        /// Requested load address.
        addr: u16,
        /// Length of the image in bytes.
        len: usize,
    },
}
