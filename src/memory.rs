//! # Memory Port
//!
//! Every bus access the CPU makes goes through [`MemoryBus`]. The host owns the
//! backing store and any I/O behind it; the CPU keeps no pointers into memory and
//! addresses it only by 16-bit address.
//!
//! Two ports ship with the crate:
//! - [`FlatMemory`]: 64KB of RAM, with a checked image loader
//! - [`FnMemory`]: a read closure and a write closure, for hosts that already have
//!   their own memory map

use crate::LoadError;

/// Byte-wide read/write port between the CPU and the host.
///
/// A real 6502 bus cannot fail, so neither can this trait: both methods must be
/// total over all 65536 addresses. What an unmapped read returns, or whether a
/// write to ROM sticks, is up to the implementation.
///
/// `read` takes `&self`; a port whose reads have side effects (I/O registers that
/// clear on read) needs interior mutability.
///
/// # Examples
///
/// A 32KB RAM / 32KB ROM split, with ROM writes dropped:
///
/// ```
/// use lib6502::{MemoryBus, CPU};
///
/// struct Board {
///     ram: [u8; 0x8000],
///     rom: [u8; 0x8000],
/// }
///
/// impl MemoryBus for Board {
///     fn read(&self, addr: u16) -> u8 {
///         match addr {
///             0x0000..=0x7FFF => self.ram[addr as usize],
///             _ => self.rom[(addr & 0x7FFF) as usize],
///         }
///     }
///
///     fn write(&mut self, addr: u16, value: u8) {
///         if addr < 0x8000 {
///             self.ram[addr as usize] = value;
///         }
///     }
/// }
///
/// let mut rom = [0xEA; 0x8000];
/// rom[0x7FFC] = 0x00; // reset vector -> $8000
/// rom[0x7FFD] = 0x80;
///
/// let mut cpu = CPU::new(Board { ram: [0; 0x8000], rom });
/// cpu.reset();
/// cpu.step();
/// assert_eq!(cpu.pc(), 0x8001);
/// ```
pub trait MemoryBus {
    /// Returns the byte at `addr`.
    fn read(&self, addr: u16) -> u8;

    /// Stores `value` at `addr`. Implementations may ignore the write.
    fn write(&mut self, addr: u16, value: u8);
}

impl<M: MemoryBus + ?Sized> MemoryBus for Box<M> {
    fn read(&self, addr: u16) -> u8 {
        (**self).read(addr)
    }

    fn write(&mut self, addr: u16, value: u8) {
        (**self).write(addr, value);
    }
}

/// 64KB of zero-initialized RAM covering the whole address space.
///
/// # Examples
///
/// ```
/// use lib6502::{FlatMemory, CPU};
///
/// let mut memory = FlatMemory::new();
/// memory.load(0xFFFC, &[0x00, 0x80]).unwrap(); // reset vector
/// memory.load(0x8000, &[0xEA, 0xEA]).unwrap(); // NOP NOP
///
/// let mut cpu = CPU::new(memory);
/// cpu.reset();
/// assert_eq!(cpu.pc(), 0x8000);
/// ```
pub struct FlatMemory {
    /// 64KB contiguous memory array
    data: Box<[u8; 65536]>,
}

impl FlatMemory {
    /// Creates a new FlatMemory instance with all bytes initialized to zero.
    pub fn new() -> Self {
        Self {
            data: Box::new([0; 65536]),
        }
    }

    /// Copies `image` into memory starting at `addr`.
    ///
    /// Fails without touching memory if the image would run past 0xFFFF.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib6502::{FlatMemory, LoadError, MemoryBus};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.load(0xFFFE, &[0x00, 0x90]).unwrap();
    /// assert_eq!(mem.read(0xFFFF), 0x90);
    ///
    /// assert_eq!(
    ///     mem.load(0xFFFF, &[1, 2]),
    ///     Err(LoadError::ImageTooLarge { addr: 0xFFFF, len: 2 })
    /// );
    /// ```
    pub fn load(&mut self, addr: u16, image: &[u8]) -> Result<(), LoadError> {
        let start = addr as usize;
        let end = start + image.len();
        if end > self.data.len() {
            return Err(LoadError::ImageTooLarge {
                addr,
                len: image.len(),
            });
        }

        self.data[start..end].copy_from_slice(image);
        log::debug!(
            target: crate::LOG_TARGET,
            "loaded {} bytes at ${:04X}",
            image.len(),
            addr
        );
        Ok(())
    }
}

impl Default for FlatMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBus for FlatMemory {
    fn read(&self, addr: u16) -> u8 {
        self.data[addr as usize]
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.data[addr as usize] = value;
    }
}

/// Memory port backed by a pair of host closures.
///
/// This is the closure form of the read/write callback pair a host installs on the
/// CPU. Any state the closures need is captured by them.
///
/// # Examples
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use lib6502::{FnMemory, MemoryBus};
///
/// let ram = Rc::new(RefCell::new(vec![0u8; 0x10000]));
/// let reader = Rc::clone(&ram);
/// let writer = Rc::clone(&ram);
///
/// let mut port = FnMemory::new(
///     move |addr| reader.borrow()[addr as usize],
///     move |addr, value| writer.borrow_mut()[addr as usize] = value,
/// );
///
/// port.write(0x0200, 0x55);
/// assert_eq!(port.read(0x0200), 0x55);
/// assert_eq!(ram.borrow()[0x0200], 0x55);
/// ```
pub struct FnMemory<R, W>
where
    R: Fn(u16) -> u8,
    W: FnMut(u16, u8),
{
    read_fn: R,
    write_fn: W,
}

impl<R, W> FnMemory<R, W>
where
    R: Fn(u16) -> u8,
    W: FnMut(u16, u8),
{
    /// Builds a port from a read callback and a write callback.
    pub fn new(read_fn: R, write_fn: W) -> Self {
        Self { read_fn, write_fn }
    }
}

impl<R, W> MemoryBus for FnMemory<R, W>
where
    R: Fn(u16) -> u8,
    W: FnMut(u16, u8),
{
    fn read(&self, addr: u16) -> u8 {
        (self.read_fn)(addr)
    }

    fn write(&mut self, addr: u16, value: u8) {
        (self.write_fn)(addr, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_memory_read_write() {
        let mut mem = FlatMemory::new();

        // Initially all zeros
        assert_eq!(mem.read(0x0000), 0x00);
        assert_eq!(mem.read(0xFFFF), 0x00);

        mem.write(0x1234, 0x42);
        assert_eq!(mem.read(0x1234), 0x42);

        // Neighbours untouched
        assert_eq!(mem.read(0x1233), 0x00);
        assert_eq!(mem.read(0x1235), 0x00);
    }

    #[test]
    fn test_flat_memory_load_fits_exactly() {
        let mut mem = FlatMemory::new();
        let image = vec![0xAB; 0xC000];

        mem.load(0x4000, &image).unwrap();

        assert_eq!(mem.read(0x3FFF), 0x00);
        assert_eq!(mem.read(0x4000), 0xAB);
        assert_eq!(mem.read(0xFFFF), 0xAB);
    }

    #[test]
    fn test_flat_memory_load_rejects_overflow() {
        let mut mem = FlatMemory::new();
        let image = vec![0xAB; 0xC001];

        let err = mem.load(0x4000, &image).unwrap_err();
        assert_eq!(
            err,
            LoadError::ImageTooLarge {
                addr: 0x4000,
                len: 0xC001
            }
        );
        // Nothing was written
        assert_eq!(mem.read(0x4000), 0x00);
        assert_eq!(err.to_string(), "image of 49153 bytes does not fit at $4000");
    }

    #[test]
    fn test_fn_memory_forwards_calls() {
        use std::cell::RefCell;

        let log = RefCell::new(Vec::new());
        let mut port = FnMemory::new(|addr| (addr & 0xFF) as u8, |addr, value| {
            log.borrow_mut().push((addr, value))
        });

        assert_eq!(port.read(0x12AB), 0xAB);
        port.write(0x0300, 0x07);
        drop(port);
        assert_eq!(log.into_inner(), vec![(0x0300, 0x07)]);
    }
}
