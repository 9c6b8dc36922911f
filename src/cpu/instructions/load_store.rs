// Load and Store instructions for 6502 CPU

use crate::bus::MemoryMappedDevice;
use crate::cpu::Cpu;

impl Cpu {
    // ========================================
    // Load Instructions
    // ========================================
    // Loads update Z and N and pay the page-crossing penalty.

    /// LDA - Load Accumulator
    pub(crate) fn lda(&mut self, bus: &mut impl MemoryMappedDevice) -> bool {
        self.a = self.fetch(bus);
        self.update_zero_and_negative_flags(self.a);
        true
    }

    /// LDX - Load X Register
    pub(crate) fn ldx(&mut self, bus: &mut impl MemoryMappedDevice) -> bool {
        self.x = self.fetch(bus);
        self.update_zero_and_negative_flags(self.x);
        true
    }

    /// LDY - Load Y Register
    pub(crate) fn ldy(&mut self, bus: &mut impl MemoryMappedDevice) -> bool {
        self.y = self.fetch(bus);
        self.update_zero_and_negative_flags(self.y);
        true
    }

    // ========================================
    // Store Instructions
    // ========================================
    // Stores do not affect flags and always take their full base cycles.

    /// STA - Store Accumulator
    pub(crate) fn sta(&mut self, bus: &mut impl MemoryMappedDevice) -> bool {
        bus.write(self.addr_abs, self.a);
        false
    }

    /// STX - Store X Register
    pub(crate) fn stx(&mut self, bus: &mut impl MemoryMappedDevice) -> bool {
        bus.write(self.addr_abs, self.x);
        false
    }

    /// STY - Store Y Register
    pub(crate) fn sty(&mut self, bus: &mut impl MemoryMappedDevice) -> bool {
        bus.write(self.addr_abs, self.y);
        false
    }
}
