// Shift and rotate instructions for 6502 CPU
//
// In accumulator mode the result goes back to A, otherwise to the latched
// effective address.

use crate::bus::MemoryMappedDevice;
use crate::cpu::{AddressingMode, Cpu};

impl Cpu {
    fn write_back(&mut self, bus: &mut impl MemoryMappedDevice, value: u8) {
        if self.mode == AddressingMode::Accumulator {
            self.a = value;
        } else {
            bus.write(self.addr_abs, value);
        }
        self.update_zero_and_negative_flags(value);
    }

    /// ASL - Arithmetic shift left; bit 7 goes to carry
    pub(crate) fn asl(&mut self, bus: &mut impl MemoryMappedDevice) -> bool {
        let value = self.fetch(bus);
        self.set_carry(value & 0x80 != 0);
        self.write_back(bus, value << 1);
        false
    }

    /// LSR - Logical shift right; bit 0 goes to carry
    pub(crate) fn lsr(&mut self, bus: &mut impl MemoryMappedDevice) -> bool {
        let value = self.fetch(bus);
        self.set_carry(value & 0x01 != 0);
        self.write_back(bus, value >> 1);
        false
    }

    /// ROL - Rotate left through carry
    pub(crate) fn rol(&mut self, bus: &mut impl MemoryMappedDevice) -> bool {
        let value = self.fetch(bus);
        let carry_in = self.get_carry() as u8;
        self.set_carry(value & 0x80 != 0);
        self.write_back(bus, (value << 1) | carry_in);
        false
    }

    /// ROR - Rotate right through carry
    pub(crate) fn ror(&mut self, bus: &mut impl MemoryMappedDevice) -> bool {
        let value = self.fetch(bus);
        let carry_in = (self.get_carry() as u8) << 7;
        self.set_carry(value & 0x01 != 0);
        self.write_back(bus, (value >> 1) | carry_in);
        false
    }
}

#[cfg(test)]
mod tests {
    use crate::bus::MemoryMappedDevice;
    use crate::cpu::test_support::boot;

    #[test]
    fn test_asl_accumulator() {
        let (mut cpu, mut memory) = boot(&[0x0A]);
        cpu.a = 0x81;
        assert_eq!(cpu.step(&mut memory), 2);
        assert_eq!(cpu.a, 0x02);
        assert!(cpu.get_carry());
        assert!(!cpu.get_negative());
    }

    #[test]
    fn test_lsr_memory_leaves_accumulator() {
        // LSR $10
        let (mut cpu, mut memory) = boot(&[0x46, 0x10]);
        memory.write(0x0010, 0x01);
        cpu.a = 0x55;
        cpu.step(&mut memory);
        assert_eq!(memory.peek(0x0010), 0x00);
        assert_eq!(cpu.a, 0x55);
        assert!(cpu.get_carry());
        assert!(cpu.get_zero());
    }

    #[test]
    fn test_rol_through_carry() {
        // ROL A twice
        let (mut cpu, mut memory) = boot(&[0x2A, 0x2A]);
        cpu.a = 0x80;
        cpu.set_carry(false);
        cpu.step(&mut memory);
        assert_eq!(cpu.a, 0x00);
        assert!(cpu.get_carry());
        assert!(cpu.get_zero());
        cpu.step(&mut memory);
        assert_eq!(cpu.a, 0x01);
        assert!(!cpu.get_carry());
    }

    #[test]
    fn test_ror_absolute_x() {
        // ROR $0200,X
        let (mut cpu, mut memory) = boot(&[0x7E, 0x00, 0x02]);
        cpu.x = 0x05;
        cpu.set_carry(true);
        memory.write(0x0205, 0x02);
        assert_eq!(cpu.step(&mut memory), 7);
        assert_eq!(memory.peek(0x0205), 0x81);
        assert!(!cpu.get_carry());
        assert!(cpu.get_negative());
    }
}
