//! Read-only CPU snapshots for host-side logging.
//!
//! A [`TraceRecord`] captures the registers and the next three instruction bytes
//! without touching CPU state. Its `Display` impl renders one line per instruction
//! in a layout that lines up with common 6502 reference logs:
//!
//! ```text
//! PC:C000 (4C F5 C5) SP:FD A:00 X:00 Y:00 P:24 (..1..i..) CYC:0
//! ```

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Snapshot of the CPU taken before an instruction executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceRecord {
    /// Program counter
    pub pc: u16,
    /// Accumulator
    pub a: u8,
    /// X index register
    pub x: u8,
    /// Y index register
    pub y: u8,
    /// Stack pointer
    pub sp: u8,
    /// Packed status byte with bit 5 set and B clear
    pub p: u8,
    /// The three bytes at PC
    pub bytes: [u8; 3],
    /// `(cycles * 3) % 341`, the PPU dot of an NTSC NES at this cycle
    pub cyc: u16,
}

impl TraceRecord {
    /// Renders the flags as `nv1bdizc`, with `.` for each clear flag.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib6502::{FlatMemory, CPU};
    ///
    /// let mut cpu = CPU::new(FlatMemory::new());
    /// cpu.reset();
    /// cpu.set_flag_c(true);
    ///
    /// assert_eq!(cpu.debug_snapshot().flag_string(), "..1..i.c");
    /// ```
    pub fn flag_string(&self) -> String {
        const NAMES: [u8; 8] = *b"nv1bdizc";

        NAMES
            .iter()
            .enumerate()
            .map(|(i, &name)| {
                let mask = 0x80u8 >> i;
                if mask == 0x20 || self.p & mask != 0 {
                    name as char
                } else {
                    '.'
                }
            })
            .collect()
    }
}

impl fmt::Display for TraceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PC:{:04X} ({:02X} {:02X} {:02X}) SP:{:02X} A:{:02X} X:{:02X} Y:{:02X} P:{:02X} ({}) CYC:{}",
            self.pc,
            self.bytes[0],
            self.bytes[1],
            self.bytes[2],
            self.sp,
            self.a,
            self.x,
            self.y,
            self.p,
            self.flag_string(),
            self.cyc
        )
    }
}
