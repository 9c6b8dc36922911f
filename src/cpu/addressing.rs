// Addressing modes module for 6502 CPU
// Implements all 13 addressing modes used by the 6502 processor
//
// Each mode consumes its operand bytes from PC and latches the effective
// address (or the branch displacement) into the CPU. The return value says
// whether an indexed calculation crossed a page; the instruction decides
// whether that costs a cycle.

use crate::bus::MemoryMappedDevice;

/// Addressing modes supported by the 6502
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    /// Implied - No operand (e.g., CLC, NOP)
    Implied,

    /// Accumulator - Operate on accumulator (e.g., LSR A)
    Accumulator,

    /// Immediate - 8-bit constant (e.g., LDA #$01)
    Immediate,

    /// Zero Page - Address in zero page $00-$FF (e.g., LDA $80)
    ZeroPage,

    /// Zero Page,X - Zero page address + X register (e.g., LDA $80,X)
    ZeroPageX,

    /// Zero Page,Y - Zero page address + Y register (e.g., LDX $80,Y)
    ZeroPageY,

    /// Relative - Signed 8-bit offset for branches (e.g., BNE label)
    Relative,

    /// Absolute - 16-bit address (e.g., LDA $8000)
    Absolute,

    /// Absolute,X - 16-bit address + X register (e.g., LDA $8000,X)
    AbsoluteX,

    /// Absolute,Y - 16-bit address + Y register (e.g., LDA $8000,Y)
    AbsoluteY,

    /// Indirect - 16-bit pointer (JMP only) (e.g., JMP ($FFFC))
    Indirect,

    /// Indexed Indirect - Zero page pointer + X (e.g., LDA ($40,X))
    IndexedIndirect,

    /// Indirect Indexed - Zero page pointer + Y (e.g., LDA ($40),Y)
    IndirectIndexed,
}

impl AddressingMode {
    /// Number of operand bytes following the opcode
    pub fn operand_bytes(self) -> u8 {
        match self {
            AddressingMode::Implied | AddressingMode::Accumulator => 0,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::Relative
            | AddressingMode::IndexedIndirect
            | AddressingMode::IndirectIndexed => 1,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 2,
        }
    }

    /// Three-letter tag used in instruction tables
    pub fn tag(self) -> &'static str {
        match self {
            AddressingMode::Implied => "IMP",
            AddressingMode::Accumulator => "ACC",
            AddressingMode::Immediate => "IMM",
            AddressingMode::ZeroPage => "ZP0",
            AddressingMode::ZeroPageX => "ZPX",
            AddressingMode::ZeroPageY => "ZPY",
            AddressingMode::Relative => "REL",
            AddressingMode::Absolute => "ABS",
            AddressingMode::AbsoluteX => "ABX",
            AddressingMode::AbsoluteY => "ABY",
            AddressingMode::Indirect => "IND",
            AddressingMode::IndexedIndirect => "IZX",
            AddressingMode::IndirectIndexed => "IZY",
        }
    }
}

/// Check whether adding `offset` to `base` lands on another page
#[inline]
fn page_crossed(base: u16, offset: u8) -> bool {
    let addr = base.wrapping_add(offset as u16);
    (base & 0xFF00) != (addr & 0xFF00)
}

impl super::Cpu {
    /// Resolve the operand for `mode`, latching the effective address
    ///
    /// # Returns
    /// `true` when an indexed mode crossed a page boundary
    pub(crate) fn resolve_address(
        &mut self,
        mode: AddressingMode,
        bus: &mut impl MemoryMappedDevice,
    ) -> bool {
        match mode {
            AddressingMode::Implied => false,
            AddressingMode::Accumulator => self.addr_accumulator(),
            AddressingMode::Immediate => self.addr_immediate(),
            AddressingMode::ZeroPage => self.addr_zero_page(bus),
            AddressingMode::ZeroPageX => self.addr_zero_page_x(bus),
            AddressingMode::ZeroPageY => self.addr_zero_page_y(bus),
            AddressingMode::Relative => self.addr_relative(bus),
            AddressingMode::Absolute => self.addr_absolute(bus),
            AddressingMode::AbsoluteX => self.addr_absolute_x(bus),
            AddressingMode::AbsoluteY => self.addr_absolute_y(bus),
            AddressingMode::Indirect => self.addr_indirect(bus),
            AddressingMode::IndexedIndirect => self.addr_indexed_indirect(bus),
            AddressingMode::IndirectIndexed => self.addr_indirect_indexed(bus),
        }
    }

    /// Read the byte at PC and advance PC
    #[inline]
    fn read_pc(&mut self, bus: &mut impl MemoryMappedDevice) -> u8 {
        let value = bus.read(self.pc);
        self.pc = self.pc.wrapping_add(1);
        value
    }

    /// Read a little-endian word at PC and advance PC past it
    #[inline]
    fn read_pc_word(&mut self, bus: &mut impl MemoryMappedDevice) -> u16 {
        let lo = self.read_pc(bus) as u16;
        let hi = self.read_pc(bus) as u16;
        (hi << 8) | lo
    }

    // ========================================
    // Register Modes
    // ========================================

    /// Accumulator: the operand is A itself
    fn addr_accumulator(&mut self) -> bool {
        self.fetched = self.a;
        false
    }

    /// Immediate: the operand is the byte after the opcode
    fn addr_immediate(&mut self) -> bool {
        self.addr_abs = self.pc;
        self.pc = self.pc.wrapping_add(1);
        false
    }

    // ========================================
    // Zero Page Modes
    // ========================================

    fn addr_zero_page(&mut self, bus: &mut impl MemoryMappedDevice) -> bool {
        self.addr_abs = self.read_pc(bus) as u16;
        false
    }

    /// Zero Page,X wraps within page 0: $FF + 2 = $01
    fn addr_zero_page_x(&mut self, bus: &mut impl MemoryMappedDevice) -> bool {
        self.addr_abs = self.read_pc(bus).wrapping_add(self.x) as u16;
        false
    }

    /// Zero Page,Y wraps within page 0
    fn addr_zero_page_y(&mut self, bus: &mut impl MemoryMappedDevice) -> bool {
        self.addr_abs = self.read_pc(bus).wrapping_add(self.y) as u16;
        false
    }

    // ========================================
    // Relative Mode
    // ========================================

    /// Relative: sign-extend the displacement; the branch applies it
    fn addr_relative(&mut self, bus: &mut impl MemoryMappedDevice) -> bool {
        self.addr_rel = self.read_pc(bus) as i8 as u16;
        false
    }

    // ========================================
    // Absolute Modes
    // ========================================

    fn addr_absolute(&mut self, bus: &mut impl MemoryMappedDevice) -> bool {
        self.addr_abs = self.read_pc_word(bus);
        false
    }

    fn addr_absolute_x(&mut self, bus: &mut impl MemoryMappedDevice) -> bool {
        let base = self.read_pc_word(bus);
        self.addr_abs = base.wrapping_add(self.x as u16);
        page_crossed(base, self.x)
    }

    fn addr_absolute_y(&mut self, bus: &mut impl MemoryMappedDevice) -> bool {
        let base = self.read_pc_word(bus);
        self.addr_abs = base.wrapping_add(self.y as u16);
        page_crossed(base, self.y)
    }

    // ========================================
    // Indirect Modes
    // ========================================

    /// Indirect (JMP only)
    ///
    /// Hardware bug: a pointer at $xxFF takes its high byte from $xx00
    /// instead of $(xx+1)00.
    fn addr_indirect(&mut self, bus: &mut impl MemoryMappedDevice) -> bool {
        let ptr = self.read_pc_word(bus);

        let hi_addr = if ptr & 0x00FF == 0x00FF {
            ptr & 0xFF00
        } else {
            ptr.wrapping_add(1)
        };

        let lo = bus.read(ptr) as u16;
        let hi = bus.read(hi_addr) as u16;
        self.addr_abs = (hi << 8) | lo;
        false
    }

    /// ($nn,X): X is added to the zero page pointer before the lookup
    fn addr_indexed_indirect(&mut self, bus: &mut impl MemoryMappedDevice) -> bool {
        let ptr = self.read_pc(bus).wrapping_add(self.x);

        let lo = bus.read(ptr as u16) as u16;
        let hi = bus.read(ptr.wrapping_add(1) as u16) as u16;
        self.addr_abs = (hi << 8) | lo;
        false
    }

    /// ($nn),Y: Y is added to the pointer fetched from zero page
    fn addr_indirect_indexed(&mut self, bus: &mut impl MemoryMappedDevice) -> bool {
        let ptr = self.read_pc(bus);

        let lo = bus.read(ptr as u16) as u16;
        let hi = bus.read(ptr.wrapping_add(1) as u16) as u16;
        let base = (hi << 8) | lo;
        self.addr_abs = base.wrapping_add(self.y as u16);
        page_crossed(base, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::FlatMemory;
    use crate::cpu::Cpu;

    fn setup(program: &[u8]) -> (Cpu, FlatMemory) {
        let mut memory = FlatMemory::new();
        memory.load(0x0200, program);
        let mut cpu = Cpu::new();
        cpu.pc = 0x0200;
        (cpu, memory)
    }

    #[test]
    fn test_operand_bytes() {
        assert_eq!(AddressingMode::Implied.operand_bytes(), 0);
        assert_eq!(AddressingMode::Accumulator.operand_bytes(), 0);
        assert_eq!(AddressingMode::Relative.operand_bytes(), 1);
        assert_eq!(AddressingMode::IndirectIndexed.operand_bytes(), 1);
        assert_eq!(AddressingMode::Indirect.operand_bytes(), 2);
        assert_eq!(AddressingMode::AbsoluteY.operand_bytes(), 2);
    }

    #[test]
    fn test_immediate_latches_pc() {
        let (mut cpu, mut memory) = setup(&[0x42]);
        assert!(!cpu.resolve_address(AddressingMode::Immediate, &mut memory));
        assert_eq!(cpu.addr_abs, 0x0200);
        assert_eq!(cpu.pc, 0x0201);
    }

    #[test]
    fn test_zero_page_x_wraps() {
        let (mut cpu, mut memory) = setup(&[0xFF]);
        cpu.x = 0x02;
        cpu.resolve_address(AddressingMode::ZeroPageX, &mut memory);
        assert_eq!(cpu.addr_abs, 0x0001);
    }

    #[test]
    fn test_relative_sign_extends() {
        let (mut cpu, mut memory) = setup(&[0xFE]);
        cpu.resolve_address(AddressingMode::Relative, &mut memory);
        assert_eq!(cpu.addr_rel, 0xFFFE);

        let (mut cpu, mut memory) = setup(&[0x7F]);
        cpu.resolve_address(AddressingMode::Relative, &mut memory);
        assert_eq!(cpu.addr_rel, 0x007F);
    }

    #[test]
    fn test_absolute_x_reports_page_cross() {
        let (mut cpu, mut memory) = setup(&[0xF0, 0x12, 0x10, 0x12]);
        cpu.x = 0x20;
        assert!(cpu.resolve_address(AddressingMode::AbsoluteX, &mut memory));
        assert_eq!(cpu.addr_abs, 0x1310);
        assert!(!cpu.resolve_address(AddressingMode::AbsoluteX, &mut memory));
        assert_eq!(cpu.addr_abs, 0x1230);
    }

    #[test]
    fn test_absolute_y_wraps_address_space() {
        let (mut cpu, mut memory) = setup(&[0xFF, 0xFF]);
        cpu.y = 0x01;
        assert!(cpu.resolve_address(AddressingMode::AbsoluteY, &mut memory));
        assert_eq!(cpu.addr_abs, 0x0000);
    }

    #[test]
    fn test_indirect_page_bug() {
        let (mut cpu, mut memory) = setup(&[0xFF, 0x02]);
        memory.load(0x02FF, &[0x34]);
        memory.load(0x0200, &[0xFF, 0x02]);
        memory.load(0x0300, &[0x56]);
        // High byte comes from $0200 (0xFF), not $0300
        cpu.resolve_address(AddressingMode::Indirect, &mut memory);
        assert_eq!(cpu.addr_abs, 0xFF34);
    }

    #[test]
    fn test_indirect_without_page_boundary() {
        let (mut cpu, mut memory) = setup(&[0x10, 0x03]);
        memory.load(0x0310, &[0xCD, 0xAB]);
        cpu.resolve_address(AddressingMode::Indirect, &mut memory);
        assert_eq!(cpu.addr_abs, 0xABCD);
    }

    #[test]
    fn test_indexed_indirect_wraps_in_zero_page() {
        let (mut cpu, mut memory) = setup(&[0xFE]);
        cpu.x = 0x01;
        memory.load(0x00FF, &[0x00]);
        memory.load(0x0000, &[0x80]);
        cpu.resolve_address(AddressingMode::IndexedIndirect, &mut memory);
        assert_eq!(cpu.addr_abs, 0x8000);
    }

    #[test]
    fn test_indirect_indexed_page_cross() {
        let (mut cpu, mut memory) = setup(&[0x40, 0x40]);
        memory.load(0x0040, &[0xF0, 0x30]);
        cpu.y = 0x10;
        assert!(cpu.resolve_address(AddressingMode::IndirectIndexed, &mut memory));
        assert_eq!(cpu.addr_abs, 0x3100);

        cpu.y = 0x0F;
        assert!(!cpu.resolve_address(AddressingMode::IndirectIndexed, &mut memory));
        assert_eq!(cpu.addr_abs, 0x30FF);
    }

    #[test]
    fn test_accumulator_latches_a() {
        let (mut cpu, mut memory) = setup(&[]);
        cpu.a = 0x81;
        cpu.resolve_address(AddressingMode::Accumulator, &mut memory);
        assert_eq!(cpu.fetched, 0x81);
        assert_eq!(cpu.pc, 0x0200);
    }
}
