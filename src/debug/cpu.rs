// CPU state snapshots and trace lines
//
// A snapshot is the tuple a trace comparison cares about: the registers,
// the status byte and the cumulative cycle count.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::disassembler::disassemble_instruction;
use crate::bus::MemoryMappedDevice;
use crate::cpu::{flags, Cpu};

/// CPU state snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpuState {
    /// Program Counter
    pub pc: u16,

    /// Accumulator
    pub a: u8,

    /// X register
    pub x: u8,

    /// Y register
    pub y: u8,

    /// Stack Pointer
    pub sp: u8,

    /// Status flags
    pub status: u8,

    /// Clock cycles since reset
    pub cycles: u64,
}

impl CpuState {
    /// Capture the registers of `cpu`
    pub fn capture(cpu: &Cpu) -> Self {
        CpuState {
            pc: cpu.pc,
            a: cpu.a,
            x: cpu.x,
            y: cpu.y,
            sp: cpu.sp,
            status: cpu.status,
            cycles: cpu.total_cycles(),
        }
    }

    /// Format the status flags, upper case when set (e.g. "nvUbdIzc")
    pub fn format_status(&self) -> String {
        const NAMES: [(u8, char); 8] = [
            (flags::NEGATIVE, 'N'),
            (flags::OVERFLOW, 'V'),
            (flags::UNUSED, 'U'),
            (flags::BREAK, 'B'),
            (flags::DECIMAL, 'D'),
            (flags::INTERRUPT_DISABLE, 'I'),
            (flags::ZERO, 'Z'),
            (flags::CARRY, 'C'),
        ];

        NAMES
            .iter()
            .map(|&(mask, name)| {
                if self.status & mask != 0 {
                    name
                } else {
                    name.to_ascii_lowercase()
                }
            })
            .collect()
    }
}

impl fmt::Display for CpuState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PC:{:04X} A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{}",
            self.pc, self.a, self.x, self.y, self.status, self.sp, self.cycles
        )
    }
}

/// One trace line: address, raw bytes, disassembly, then register state
///
/// ```text
/// 8000  A9 42     LDA[A9] #$42         PC:8000 A:00 X:00 Y:00 P:20 SP:FD CYC:8
/// ```
pub fn trace_line(cpu: &Cpu, bus: &impl MemoryMappedDevice) -> String {
    let instruction = disassemble_instruction(bus, cpu.pc);
    format!(
        "{:04X}  {:<8}  {:<20} {}",
        cpu.pc,
        instruction.format_bytes(),
        instruction.to_string(),
        CpuState::capture(cpu)
    )
}
