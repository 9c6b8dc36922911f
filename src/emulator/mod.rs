// Emulator module - Headless driver around the bus
//
// The bus advances one master clock tick at a time. This module layers the
// coarser stepping modes on top of it (one instruction, one frame) together
// with cartridge loading, configuration and frame dumps.

mod config;
mod screenshot;

pub use config::{
    ConfigError, EmulatorConfig, LoggingConfig, OutputConfig, RunConfig, DEFAULT_CONFIG_FILE,
};
pub use screenshot::{save_png, save_screenshot, ScreenshotError};

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::bus::Bus;
use crate::cartridge::{Cartridge, CartridgeError};
use crate::debug::{trace_line, CpuState};
use crate::display::FrameBuffer;
use crate::ppu::CYCLES_PER_FRAME;

/// Upper bound on master clock ticks for a single instruction step
///
/// The longest instruction plus a pending NMI fits comfortably; the bound
/// only matters when the CPU is wedged.
const MAX_TICKS_PER_INSTRUCTION: u32 = 3 * 64;

/// Main emulator structure
pub struct Emulator {
    bus: Bus,

    /// Path of the loaded image, if it came from a file
    rom_path: Option<PathBuf>,

    /// Emit a `CpuState` trace line per retired instruction
    trace_cpu: bool,
}

impl Emulator {
    /// Create an emulator with no cartridge inserted
    ///
    /// # Example
    ///
    /// ```
    /// use nes_core::emulator::Emulator;
    ///
    /// let mut emulator = Emulator::new();
    /// emulator.reset();
    /// ```
    pub fn new() -> Self {
        Emulator {
            bus: Bus::new(),
            rom_path: None,
            trace_cpu: false,
        }
    }

    /// Create an emulator using the logging options of `config`
    pub fn with_config(config: &EmulatorConfig) -> Self {
        let mut emulator = Self::new();
        emulator.trace_cpu = config.logging.trace_cpu;
        emulator
    }

    /// Load an iNES image from disk, insert it and reset
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not an iNES image
    ///
    /// # Example
    ///
    /// ```no_run
    /// use nes_core::emulator::Emulator;
    ///
    /// let mut emulator = Emulator::new();
    /// emulator.load_cartridge("game.nes").expect("Failed to load ROM");
    /// ```
    pub fn load_cartridge<P: AsRef<Path>>(&mut self, path: P) -> Result<(), CartridgeError> {
        let path = path.as_ref();
        let cartridge = Cartridge::from_ines_file(path)?;
        self.insert_cartridge(cartridge);
        self.rom_path = Some(path.to_path_buf());
        Ok(())
    }

    /// Insert an already parsed cartridge and reset
    pub fn insert_cartridge(&mut self, cartridge: Cartridge) {
        self.bus.insert_cartridge(cartridge);
        self.rom_path = None;
        self.reset();
    }

    /// Reset the console
    pub fn reset(&mut self) {
        self.bus.reset();
        tracing::debug!("Reset: PC={:04X}", self.bus.cpu().pc);
    }

    /// Override the program counter, e.g. to start a test ROM in automation mode
    pub fn set_program_counter(&mut self, pc: u16) {
        self.bus.cpu_mut().pc = pc;
    }

    /// Advance one master clock tick
    pub fn step_clock(&mut self) {
        self.bus.clock();
    }

    /// Advance `count` master clock ticks
    pub fn step_clocks(&mut self, count: u32) {
        for _ in 0..count {
            self.bus.clock();
        }
    }

    /// Run until one more instruction has retired
    ///
    /// Anything in flight (including the reset sequence or an interrupt
    /// entry) is finished first. Returns the state after retirement.
    pub fn step_instruction(&mut self) -> CpuState {
        let mut ticks = 0;
        while !self.bus.cpu().complete() && ticks < MAX_TICKS_PER_INSTRUCTION {
            self.bus.clock();
            ticks += 1;
        }

        if self.trace_cpu {
            self.trace_instruction();
        }

        let start = self.bus.cpu().total_cycles();
        for _ in 0..MAX_TICKS_PER_INSTRUCTION {
            self.bus.clock();
            let cpu = self.bus.cpu();
            if cpu.total_cycles() != start && cpu.complete() {
                break;
            }
        }

        self.cpu_state()
    }

    /// Run until the PPU completes a frame
    ///
    /// Returns the number of master clock ticks taken.
    pub fn run_frame(&mut self) -> u32 {
        self.bus.ppu_mut().clear_frame_complete();

        let mut ticks = 0;
        let mut last_traced = None;
        while !self.bus.ppu().frame_complete() {
            if self.trace_cpu && self.bus.cpu().complete() {
                let cycles = self.bus.cpu().total_cycles();
                if last_traced != Some(cycles) {
                    last_traced = Some(cycles);
                    self.trace_instruction();
                }
            }
            self.bus.clock();
            ticks += 1;

            // Frames are fixed length; this only trips on a broken PPU
            if ticks > CYCLES_PER_FRAME * 2 {
                tracing::error!("PPU did not complete a frame");
                break;
            }
        }

        self.bus.ppu_mut().clear_frame_complete();
        tracing::debug!("Frame done in {} ticks", ticks);
        ticks
    }

    /// Log the instruction about to execute together with the register state
    fn trace_instruction(&self) {
        tracing::trace!("{}", trace_line(self.bus.cpu(), self.bus.memory()));
    }

    /// Run `count` frames
    pub fn run_frames(&mut self, count: u32) {
        for _ in 0..count {
            self.run_frame();
        }
    }

    /// Snapshot of the CPU registers
    pub fn cpu_state(&self) -> CpuState {
        CpuState::capture(self.bus.cpu())
    }

    /// Disassemble `start..end` of the CPU address space
    pub fn disassemble(&self, start: u16, end: u16) -> BTreeMap<u16, String> {
        self.bus.disassemble(start, end)
    }

    /// Last rendered frame
    pub fn frame_buffer(&self) -> &FrameBuffer {
        self.bus.ppu().frame_buffer()
    }

    /// Save the current frame under `base_dir`
    pub fn screenshot(&self, base_dir: &Path) -> Result<PathBuf, ScreenshotError> {
        save_screenshot(self.frame_buffer(), base_dir, self.rom_path.as_deref())
    }

    pub fn set_trace_cpu(&mut self, enabled: bool) {
        self.trace_cpu = enabled;
    }

    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut Bus {
        &mut self.bus
    }

    pub fn rom_path(&self) -> Option<&Path> {
        self.rom_path.as_deref()
    }
}

impl Default for Emulator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// NROM image with `program` at $8000 and the reset vector pointing there
    fn cartridge_with_program(program: &[u8]) -> Cartridge {
        let mut data = vec![b'N', b'E', b'S', 0x1A, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        let mut prg = vec![0xEA; 16 * 1024];
        prg[..program.len()].copy_from_slice(program);
        prg[0x3FFC] = 0x00;
        prg[0x3FFD] = 0x80;
        data.extend_from_slice(&prg);
        data.extend(std::iter::repeat(0x00).take(8 * 1024));
        Cartridge::from_bytes(&data).unwrap()
    }

    #[test]
    fn test_emulator_new() {
        let emulator = Emulator::new();
        assert!(emulator.rom_path().is_none());
        assert!(emulator.bus().cartridge().is_none());
    }

    #[test]
    fn test_insert_cartridge_resets_to_vector() {
        let mut emulator = Emulator::new();
        emulator.insert_cartridge(cartridge_with_program(&[]));
        assert_eq!(emulator.cpu_state().pc, 0x8000);
        assert_eq!(emulator.cpu_state().sp, 0xFD);
    }

    #[test]
    fn test_step_instruction_finishes_reset_then_runs_one() {
        let mut emulator = Emulator::new();
        // LDA #$42; LDX #$07
        emulator.insert_cartridge(cartridge_with_program(&[0xA9, 0x42, 0xA2, 0x07]));

        let state = emulator.step_instruction();
        assert_eq!(state.a, 0x42);
        assert_eq!(state.x, 0x00);
        assert_eq!(state.pc, 0x8002);
        assert_eq!(state.cycles, 8 + 2);

        let state = emulator.step_instruction();
        assert_eq!(state.x, 0x07);
        assert_eq!(state.pc, 0x8004);
        assert_eq!(state.cycles, 8 + 2 + 2);
    }

    #[test]
    fn test_step_clock_ratio() {
        let mut emulator = Emulator::new();
        emulator.insert_cartridge(cartridge_with_program(&[]));
        emulator.step_clocks(3);
        assert_eq!(emulator.bus().cpu().total_cycles(), 2);
        assert_eq!(emulator.bus().system_clock_counter(), 3);
    }

    #[test]
    fn test_step_clock_advances_ppu_every_tick() {
        let mut emulator = Emulator::new();
        emulator.insert_cartridge(cartridge_with_program(&[]));
        emulator.step_clock();
        emulator.step_clock();
        assert_eq!(emulator.bus().ppu().cycle(), 2);
        assert_eq!(emulator.bus().cpu().total_cycles(), 1);
    }

    #[test]
    fn test_trace_does_not_change_execution() {
        let program = [0xA9, 0x42, 0xA2, 0x07, 0x4C, 0x04, 0x80];
        let mut plain = Emulator::new();
        plain.insert_cartridge(cartridge_with_program(&program));
        let mut traced = Emulator::new();
        traced.insert_cartridge(cartridge_with_program(&program));
        traced.set_trace_cpu(true);

        plain.run_frame();
        traced.run_frame();
        assert_eq!(plain.cpu_state(), traced.cpu_state());
        assert_eq!(traced.step_instruction(), plain.step_instruction());
    }

    #[test]
    fn test_run_frame_clears_flag() {
        let mut emulator = Emulator::new();
        emulator.insert_cartridge(cartridge_with_program(&[]));

        assert_eq!(emulator.run_frame(), 261 * 341);
        assert!(!emulator.bus().ppu().frame_complete());
        assert_eq!(emulator.run_frame(), CYCLES_PER_FRAME);
    }

    #[test]
    fn test_set_program_counter() {
        let mut emulator = Emulator::new();
        emulator.insert_cartridge(cartridge_with_program(&[]));
        emulator.set_program_counter(0xC000);
        assert_eq!(emulator.cpu_state().pc, 0xC000);
    }

    #[test]
    fn test_load_cartridge_missing_file() {
        let mut emulator = Emulator::new();
        let result = emulator.load_cartridge("definitely/not/here.nes");
        assert!(matches!(result, Err(CartridgeError::Io(_))));
        assert!(emulator.rom_path().is_none());
    }

    #[test]
    fn test_load_cartridge_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("program.nes");

        let mut data = vec![b'N', b'E', b'S', 0x1A, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        let mut prg = vec![0xEA; 16 * 1024];
        prg[0x3FFC] = 0x34;
        prg[0x3FFD] = 0xC2;
        data.extend_from_slice(&prg);
        std::fs::write(&path, &data).unwrap();

        let mut emulator = Emulator::new();
        emulator.load_cartridge(&path).unwrap();
        assert_eq!(emulator.rom_path(), Some(path.as_path()));
        assert_eq!(emulator.cpu_state().pc, 0xC234);
    }

    #[test]
    fn test_disassemble_through_emulator() {
        let mut emulator = Emulator::new();
        emulator.insert_cartridge(cartridge_with_program(&[0xA9, 0x42]));
        let listing = emulator.disassemble(0x8000, 0x8004);
        assert_eq!(listing.get(&0x8000).map(String::as_str), Some("LDA[A9] #$42"));
    }
}
