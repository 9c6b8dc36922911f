// Miscellaneous instructions for 6502 CPU

use crate::cpu::Cpu;

impl Cpu {
    /// NOP - No operation
    ///
    /// The absolute,X forms (1C, 3C, 5C, 7C, DC, FC) pay for page crossings.
    pub(crate) fn nop(&mut self) -> bool {
        matches!(self.opcode, 0x1C | 0x3C | 0x5C | 0x7C | 0xDC | 0xFC)
    }

    /// Unimplemented opcode: does nothing for the table's 8 cycles
    pub(crate) fn xxx(&mut self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use crate::cpu::test_support::boot;

    #[test]
    fn test_nop_timing() {
        let (mut cpu, mut memory) = boot(&[0xEA]);
        let before = (cpu.a, cpu.x, cpu.y, cpu.sp, cpu.status);
        assert_eq!(cpu.step(&mut memory), 2);
        assert_eq!(before, (cpu.a, cpu.x, cpu.y, cpu.sp, cpu.status));
        assert_eq!(cpu.pc, 0x8001);
    }

    #[test]
    fn test_absolute_x_nop_page_penalty() {
        // NOP $80F0,X crossing, then not crossing
        let (mut cpu, mut memory) = boot(&[0xFC, 0xF0, 0x80, 0x1C, 0x00, 0x80]);
        cpu.x = 0x20;
        assert_eq!(cpu.step(&mut memory), 5);
        assert_eq!(cpu.step(&mut memory), 4);
        assert_eq!(cpu.pc, 0x8006);
    }
}
