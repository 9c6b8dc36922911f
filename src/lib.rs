// NES core library
//
// Cycle-stepped 6502 CPU and 2C02 PPU joined by the system bus, with an
// iNES/NROM cartridge layer and a headless driver.

pub mod bus;
pub mod cartridge;
pub mod cpu;
pub mod debug;
pub mod display;
pub mod emulator;
pub mod ppu;
pub mod ram;

// Re-export main types for convenience
pub use bus::{Bus, CpuBus, FlatMemory, MemoryMappedDevice};
pub use cartridge::{Cartridge, CartridgeError, Mapper, Mirroring};
pub use cpu::Cpu;
pub use debug::{disassemble, format_listing, CpuState, DisassembledInstruction};
pub use display::FrameBuffer;
pub use emulator::{ConfigError, Emulator, EmulatorConfig, ScreenshotError};
pub use ppu::Ppu;
pub use ram::Ram;
