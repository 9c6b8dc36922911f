// Compare instructions for 6502 CPU

use crate::bus::MemoryMappedDevice;
use crate::cpu::Cpu;

impl Cpu {
    /// Compare a register with M: C = reg >= M, Z and N from reg - M
    fn compare(&mut self, register: u8, value: u8) {
        self.set_carry(register >= value);
        self.update_zero_and_negative_flags(register.wrapping_sub(value));
    }

    /// CMP - Compare accumulator
    pub(crate) fn cmp(&mut self, bus: &mut impl MemoryMappedDevice) -> bool {
        let value = self.fetch(bus);
        self.compare(self.a, value);
        true
    }

    /// CPX - Compare X register
    pub(crate) fn cpx(&mut self, bus: &mut impl MemoryMappedDevice) -> bool {
        let value = self.fetch(bus);
        self.compare(self.x, value);
        false
    }

    /// CPY - Compare Y register
    pub(crate) fn cpy(&mut self, bus: &mut impl MemoryMappedDevice) -> bool {
        let value = self.fetch(bus);
        self.compare(self.y, value);
        false
    }
}
