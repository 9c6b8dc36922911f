// Logical instructions for 6502 CPU

use crate::bus::MemoryMappedDevice;
use crate::cpu::Cpu;

impl Cpu {
    /// AND - Logical AND with accumulator
    ///
    /// Flags affected: Z, N
    pub(crate) fn and(&mut self, bus: &mut impl MemoryMappedDevice) -> bool {
        self.a &= self.fetch(bus);
        self.update_zero_and_negative_flags(self.a);
        true
    }

    /// ORA - Logical inclusive OR with accumulator
    ///
    /// Flags affected: Z, N
    pub(crate) fn ora(&mut self, bus: &mut impl MemoryMappedDevice) -> bool {
        self.a |= self.fetch(bus);
        self.update_zero_and_negative_flags(self.a);
        true
    }

    /// EOR - Exclusive OR with accumulator
    ///
    /// Flags affected: Z, N
    pub(crate) fn eor(&mut self, bus: &mut impl MemoryMappedDevice) -> bool {
        self.a ^= self.fetch(bus);
        self.update_zero_and_negative_flags(self.a);
        true
    }

    /// BIT - Bit test
    ///
    /// Z comes from A & M; N and V are copied from bits 7 and 6 of M.
    /// The accumulator is not modified.
    pub(crate) fn bit(&mut self, bus: &mut impl MemoryMappedDevice) -> bool {
        let value = self.fetch(bus);
        self.set_zero(self.a & value == 0);
        self.set_negative(value & 0x80 != 0);
        self.set_overflow(value & 0x40 != 0);
        false
    }
}

#[cfg(test)]
mod tests {
    use crate::bus::MemoryMappedDevice;
    use crate::cpu::test_support::boot;

    #[test]
    fn test_and_ora_eor() {
        // AND #$0F; ORA #$80; EOR #$FF
        let (mut cpu, mut memory) = boot(&[0x29, 0x0F, 0x09, 0x80, 0x49, 0xFF]);
        cpu.a = 0x3C;
        cpu.step(&mut memory);
        assert_eq!(cpu.a, 0x0C);
        cpu.step(&mut memory);
        assert_eq!(cpu.a, 0x8C);
        assert!(cpu.get_negative());
        cpu.step(&mut memory);
        assert_eq!(cpu.a, 0x73);
        assert!(!cpu.get_negative());
    }

    #[test]
    fn test_and_zero_result() {
        let (mut cpu, mut memory) = boot(&[0x29, 0x00]);
        cpu.a = 0xFF;
        cpu.step(&mut memory);
        assert!(cpu.get_zero());
    }

    #[test]
    fn test_bit_copies_high_bits() {
        // BIT $40
        let (mut cpu, mut memory) = boot(&[0x24, 0x40]);
        memory.write(0x0040, 0xC0);
        cpu.a = 0x01;
        assert_eq!(cpu.step(&mut memory), 3);
        assert!(cpu.get_zero());
        assert!(cpu.get_negative());
        assert!(cpu.get_overflow());
        assert_eq!(cpu.a, 0x01);
    }

    #[test]
    fn test_eor_indirect_indexed_page_cross() {
        // EOR ($20),Y
        let (mut cpu, mut memory) = boot(&[0x51, 0x20]);
        memory.write(0x0020, 0xFF);
        memory.write(0x0021, 0x02);
        memory.write(0x0300, 0x0F);
        cpu.y = 0x01;
        cpu.a = 0xFF;
        assert_eq!(cpu.step(&mut memory), 6);
        assert_eq!(cpu.a, 0xF0);
    }
}
