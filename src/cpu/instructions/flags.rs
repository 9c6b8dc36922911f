// Status flag instructions for 6502 CPU

use crate::cpu::Cpu;

impl Cpu {
    /// CLC - Clear carry
    pub(crate) fn clc(&mut self) -> bool {
        self.set_carry(false);
        false
    }

    /// CLD - Clear decimal mode
    pub(crate) fn cld(&mut self) -> bool {
        self.set_decimal(false);
        false
    }

    /// CLI - Clear interrupt disable
    pub(crate) fn cli(&mut self) -> bool {
        self.set_interrupt_disable(false);
        false
    }

    /// CLV - Clear overflow
    pub(crate) fn clv(&mut self) -> bool {
        self.set_overflow(false);
        false
    }

    /// SEC - Set carry
    pub(crate) fn sec(&mut self) -> bool {
        self.set_carry(true);
        false
    }

    /// SED - Set decimal mode
    pub(crate) fn sed(&mut self) -> bool {
        self.set_decimal(true);
        false
    }

    /// SEI - Set interrupt disable
    pub(crate) fn sei(&mut self) -> bool {
        self.set_interrupt_disable(true);
        false
    }
}

#[cfg(test)]
mod tests {
    use crate::cpu::flags;
    use crate::cpu::test_support::boot;

    #[test]
    fn test_set_and_clear_flags() {
        // SEC SED SEI CLC CLD CLI
        let (mut cpu, mut memory) = boot(&[0x38, 0xF8, 0x78, 0x18, 0xD8, 0x58]);
        for _ in 0..3 {
            assert_eq!(cpu.step(&mut memory), 2);
        }
        assert_eq!(
            cpu.status,
            flags::UNUSED | flags::CARRY | flags::DECIMAL | flags::INTERRUPT_DISABLE
        );
        for _ in 0..3 {
            cpu.step(&mut memory);
        }
        assert_eq!(cpu.status, flags::UNUSED);
    }

    #[test]
    fn test_clv() {
        let (mut cpu, mut memory) = boot(&[0xB8]);
        cpu.set_overflow(true);
        cpu.step(&mut memory);
        assert!(!cpu.get_overflow());
    }
}
