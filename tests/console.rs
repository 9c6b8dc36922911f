// Whole-console behavior: frame timing, NMI delivery, cartridge mapping and
// PPU port access from the CPU side.

mod common;

use common::InesBuilder;
use nes_core::ppu::{CYCLES_PER_FRAME, CYCLES_PER_SCANLINE};

/// LDA #$80; STA $2000; JMP * with an NMI handler of INX; RTI at $9000
fn nmi_counter() -> InesBuilder {
    InesBuilder::program(&[0xA9, 0x80, 0x8D, 0x00, 0x20, 0x4C, 0x05, 0x80])
        .bytes(0x9000, &[0xE8, 0x40])
        .vector(0xFFFA, 0x9000)
}

/// Busy loop at $8000
fn idle() -> InesBuilder {
    InesBuilder::program(&[0x4C, 0x00, 0x80])
}

// ========================================
// Timing
// ========================================

#[test]
fn test_frame_lengths() {
    let mut emulator = idle().emulator();

    let first = emulator.run_frame();
    assert_eq!(first, 261 * CYCLES_PER_SCANLINE as u32);
    for _ in 0..2 {
        assert_eq!(emulator.run_frame(), CYCLES_PER_FRAME);
    }
    assert_eq!(
        emulator.bus().system_clock_counter(),
        (first + 2 * CYCLES_PER_FRAME) as u64
    );
}

#[test]
fn test_cpu_runs_two_of_every_three_ticks() {
    let mut emulator = idle().emulator();
    let ticks = emulator.run_frame() as u64;

    // Ticks 0, 3, 6, ... skip the CPU
    let skipped = ticks.div_ceil(3);
    assert_eq!(emulator.cpu_state().cycles, ticks - skipped);
}

#[test]
fn test_step_clocks() {
    let mut emulator = idle().emulator();
    emulator.step_clocks(300);
    assert_eq!(emulator.bus().system_clock_counter(), 300);
    assert_eq!(emulator.bus().ppu().cycle(), 300);
    assert_eq!(emulator.cpu_state().cycles, 200);
}

// ========================================
// Interrupts
// ========================================

#[test]
fn test_one_nmi_per_frame() {
    let mut emulator = nmi_counter().emulator();
    emulator.run_frames(3);
    assert_eq!(emulator.cpu_state().x, 3);
}

#[test]
fn test_no_nmi_without_enable() {
    let mut emulator = idle().bytes(0x9000, &[0xE8, 0x40]).vector(0xFFFA, 0x9000).emulator();
    emulator.run_frames(2);
    assert_eq!(emulator.cpu_state().x, 0);
}

#[test]
fn test_reset_restarts_program() {
    let mut emulator = nmi_counter().emulator();
    emulator.run_frames(2);
    emulator.reset();

    let state = emulator.cpu_state();
    assert_eq!(state.pc, 0x8000);
    assert_eq!(state.x, 0);
    assert_eq!(state.cycles, 0);
    assert_eq!(emulator.bus().system_clock_counter(), 0);
}

// ========================================
// Cartridge mapping
// ========================================

#[test]
fn test_16k_prg_is_mirrored() {
    let mut emulator = InesBuilder::new(1)
        .bytes(0x8123, &[0x42])
        .vector(0xFFFC, 0x8000)
        .emulator();
    let bus = emulator.bus_mut();
    assert_eq!(bus.cpu_read(0x8123), 0x42);
    assert_eq!(bus.cpu_read(0xC123), 0x42);
}

#[test]
fn test_32k_prg_is_linear() {
    let mut emulator = InesBuilder::new(2)
        .bytes(0x8123, &[0x42])
        .bytes(0xC123, &[0x24])
        .vector(0xFFFC, 0x8000)
        .emulator();
    let bus = emulator.bus_mut();
    assert_eq!(bus.cpu_read(0x8123), 0x42);
    assert_eq!(bus.cpu_read(0xC123), 0x24);
}

#[test]
fn test_unsupported_mapper_reads_open_bus() {
    let mut emulator = InesBuilder::program(&[0xA9, 0x01]).mapper(4).emulator();
    assert!(!emulator.bus().cartridge().is_some_and(|c| c.borrow().has_mapper()));
    assert_eq!(emulator.bus_mut().cpu_read(0x8000), 0x00);
}

#[test]
fn test_load_cartridge_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("idle.nes");
    std::fs::write(&path, idle().build()).unwrap();

    let mut emulator = nes_core::Emulator::new();
    emulator.load_cartridge(&path).unwrap();
    assert_eq!(emulator.rom_path(), Some(path.as_path()));
    assert_eq!(emulator.cpu_state().pc, 0x8000);
}

#[test]
fn test_load_cartridge_rejects_garbage() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("garbage.nes");
    std::fs::write(&path, b"not an image").unwrap();

    let mut emulator = nes_core::Emulator::new();
    assert!(emulator.load_cartridge(&path).is_err());
    assert!(emulator.load_cartridge(dir.path().join("missing.nes")).is_err());
}

// ========================================
// PPU ports from the CPU side
// ========================================

fn set_vram_address(emulator: &mut nes_core::Emulator, addr: u16) {
    let bus = emulator.bus_mut();
    bus.cpu_write(0x2006, (addr >> 8) as u8);
    bus.cpu_write(0x2006, addr as u8);
}

#[test]
fn test_chr_rom_through_ppudata() {
    let mut emulator = idle().chr(0x0010, 0xAB).emulator();
    set_vram_address(&mut emulator, 0x0010);

    let bus = emulator.bus_mut();
    bus.cpu_read(0x2007);
    assert_eq!(bus.cpu_read(0x2007), 0xAB);
}

#[test]
fn test_chr_ram_is_writable() {
    let mut emulator = idle().chr_ram().emulator();
    set_vram_address(&mut emulator, 0x0400);
    emulator.bus_mut().cpu_write(0x2007, 0x5C);

    set_vram_address(&mut emulator, 0x0400);
    let bus = emulator.bus_mut();
    bus.cpu_read(0x2007);
    assert_eq!(bus.cpu_read(0x2007), 0x5C);
}

fn nametable_echo(builder: InesBuilder, mirror: u16) -> u8 {
    let mut emulator = builder.emulator();
    set_vram_address(&mut emulator, 0x2000);
    emulator.bus_mut().cpu_write(0x2007, 0x11);

    set_vram_address(&mut emulator, mirror);
    let bus = emulator.bus_mut();
    bus.cpu_read(0x2007);
    bus.cpu_read(0x2007)
}

#[test]
fn test_vertical_mirroring_from_header() {
    assert_eq!(nametable_echo(idle().vertical(), 0x2800), 0x11);
}

#[test]
fn test_horizontal_mirroring_from_header() {
    assert_eq!(nametable_echo(idle(), 0x2400), 0x11);
}

#[test]
fn test_ppu_registers_mirror_every_eight_bytes() {
    let mut emulator = idle().emulator();
    // $3F06 via the $200E mirror of PPUADDR
    let bus = emulator.bus_mut();
    bus.cpu_write(0x200E, 0x3F);
    bus.cpu_write(0x3FFE, 0x01);
    bus.cpu_write(0x2007, 0x2A);
    bus.cpu_write(0x2006, 0x3F);
    bus.cpu_write(0x2006, 0x01);
    assert_eq!(bus.cpu_read(0x200F), 0x2A);
}

// ========================================
// Frame output
// ========================================

#[test]
fn test_screenshot_after_frame() {
    let mut emulator = idle().emulator();
    emulator.run_frame();

    let dir = tempfile::tempdir().unwrap();
    let path = emulator.screenshot(dir.path()).unwrap();
    assert!(path.exists());
    assert_eq!(path.extension().and_then(|e| e.to_str()), Some("png"));
}
