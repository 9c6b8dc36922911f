// RAM module - CPU internal RAM
//
// The 2KB of work RAM sits at $0000-$07FF and repeats three more times up to
// $1FFF. Only the low 11 address bits reach the chip.
//
// ```text
// $0000-$00FF: Zero page
// $0100-$01FF: Hardware stack
// $0200-$07FF: General purpose
// $0800-$1FFF: Mirrors of $0000-$07FF
// ```

use crate::bus::MemoryMappedDevice;

/// Size of the internal RAM in bytes (2KB)
pub const RAM_SIZE: usize = 0x0800;

/// Mask applied to every RAM address
pub const RAM_MIRROR_MASK: u16 = 0x07FF;

/// CPU internal RAM (2KB with mirroring)
///
/// # Examples
///
/// ```
/// use nes_core::ram::Ram;
/// use nes_core::bus::MemoryMappedDevice;
///
/// let mut ram = Ram::new();
/// ram.write(0x0042, 0x99);
/// assert_eq!(ram.read(0x0842), 0x99);
/// assert_eq!(ram.read(0x1842), 0x99);
/// ```
#[derive(Clone)]
pub struct Ram {
    memory: [u8; RAM_SIZE],
}

impl Ram {
    /// Create a zero-filled RAM
    pub fn new() -> Self {
        Ram {
            memory: [0; RAM_SIZE],
        }
    }
}

impl Default for Ram {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryMappedDevice for Ram {
    fn read(&mut self, addr: u16) -> u8 {
        self.peek(addr)
    }

    fn write(&mut self, addr: u16, data: u8) {
        self.memory[(addr & RAM_MIRROR_MASK) as usize] = data;
    }

    fn peek(&self, addr: u16) -> u8 {
        self.memory[(addr & RAM_MIRROR_MASK) as usize]
    }
}
