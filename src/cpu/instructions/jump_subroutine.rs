// Jump, subroutine and interrupt-return instructions for 6502 CPU

use crate::bus::MemoryMappedDevice;
use crate::cpu::{flags, Cpu, IRQ_VECTOR};

impl Cpu {
    /// JMP - Jump to the latched address (absolute or indirect)
    pub(crate) fn jmp(&mut self) -> bool {
        self.pc = self.addr_abs;
        false
    }

    /// JSR - Jump to subroutine
    ///
    /// Pushes the address of the last byte of the JSR instruction (PC - 1).
    pub(crate) fn jsr(&mut self, bus: &mut impl MemoryMappedDevice) -> bool {
        let return_addr = self.pc.wrapping_sub(1);
        self.push_word(bus, return_addr);
        self.pc = self.addr_abs;
        false
    }

    /// RTS - Return from subroutine
    pub(crate) fn rts(&mut self, bus: &mut impl MemoryMappedDevice) -> bool {
        self.pc = self.pull_word(bus).wrapping_add(1);
        false
    }

    /// RTI - Return from interrupt
    ///
    /// Pulls status (B cleared, U set) and then PC.
    pub(crate) fn rti(&mut self, bus: &mut impl MemoryMappedDevice) -> bool {
        self.status = self.pull(bus);
        self.clear_flag(flags::BREAK);
        self.set_flag(flags::UNUSED);
        self.pc = self.pull_word(bus);
        false
    }

    /// BRK - Force interrupt
    ///
    /// Skips the padding byte after the opcode, pushes PC and status with B
    /// set, then clears B, sets I and jumps through the IRQ vector.
    pub(crate) fn brk(&mut self, bus: &mut impl MemoryMappedDevice) -> bool {
        self.pc = self.pc.wrapping_add(1);
        self.push_word(bus, self.pc);

        self.set_flag(flags::BREAK);
        self.push(bus, self.status | flags::UNUSED);
        self.clear_flag(flags::BREAK);
        self.set_flag(flags::INTERRUPT_DISABLE);

        let lo = bus.read(IRQ_VECTOR) as u16;
        let hi = bus.read(IRQ_VECTOR.wrapping_add(1)) as u16;
        self.pc = (hi << 8) | lo;
        false
    }
}

#[cfg(test)]
mod tests {
    use crate::bus::MemoryMappedDevice;
    use crate::cpu::test_support::boot;
    use crate::cpu::{flags, IRQ_VECTOR};

    #[test]
    fn test_jmp_absolute() {
        let (mut cpu, mut memory) = boot(&[0x4C, 0x34, 0x12]);
        assert_eq!(cpu.step(&mut memory), 3);
        assert_eq!(cpu.pc, 0x1234);
    }

    #[test]
    fn test_jmp_indirect_page_bug() {
        // JMP ($10FF): low from $10FF, high from $1000
        let (mut cpu, mut memory) = boot(&[0x6C, 0xFF, 0x10]);
        memory.write(0x10FF, 0x34);
        memory.write(0x1000, 0x12);
        memory.write(0x1100, 0x56);
        assert_eq!(cpu.step(&mut memory), 5);
        assert_eq!(cpu.pc, 0x1234);
    }

    #[test]
    fn test_jsr_rts_round_trip() {
        // JSR $8010 ... $8010: RTS
        let (mut cpu, mut memory) = boot(&[0x20, 0x10, 0x80]);
        memory.write(0x8010, 0x60);

        assert_eq!(cpu.step(&mut memory), 6);
        assert_eq!(cpu.pc, 0x8010);
        assert_eq!(cpu.sp, 0xFB);
        assert_eq!(memory.peek(0x01FD), 0x80);
        assert_eq!(memory.peek(0x01FC), 0x02);

        assert_eq!(cpu.step(&mut memory), 6);
        assert_eq!(cpu.pc, 0x8003);
        assert_eq!(cpu.sp, 0xFD);
    }

    #[test]
    fn test_brk_pushes_break_and_vectors() {
        let (mut cpu, mut memory) = boot(&[0x00, 0xFF]);
        memory.write(IRQ_VECTOR, 0x00);
        memory.write(IRQ_VECTOR + 1, 0x90);
        cpu.set_carry(true);

        assert_eq!(cpu.step(&mut memory), 7);
        assert_eq!(cpu.pc, 0x9000);
        assert_eq!(memory.peek(0x01FD), 0x80);
        assert_eq!(memory.peek(0x01FC), 0x02, "return skips the padding byte");
        assert_eq!(
            memory.peek(0x01FB),
            flags::CARRY | flags::BREAK | flags::UNUSED
        );
        assert!(!cpu.get_flag(flags::BREAK));
        assert!(cpu.get_interrupt_disable());
    }

    #[test]
    fn test_rti_restores_status_and_pc() {
        let (mut cpu, mut memory) = boot(&[0x40]);
        cpu.sp = 0xFA;
        memory.load(0x01FB, &[0xFF, 0x34, 0x12]);
        assert_eq!(cpu.step(&mut memory), 6);
        assert_eq!(cpu.pc, 0x1234);
        assert_eq!(cpu.sp, 0xFD);
        assert_eq!(cpu.status, 0xFF & !flags::BREAK);
    }
}
