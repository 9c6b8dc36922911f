// Arithmetic instructions for 6502 CPU

use crate::bus::MemoryMappedDevice;
use crate::cpu::Cpu;

impl Cpu {
    // ========================================
    // Add / Subtract
    // ========================================

    /// A + M + C through the binary adder, updating C, Z, V and N
    ///
    /// Overflow is set when both inputs share a sign that the result lacks:
    /// `(A ^ result) & (M ^ result) & 0x80`.
    fn add_with_carry(&mut self, value: u8) {
        let sum = self.a as u16 + value as u16 + self.get_carry() as u16;
        let result = sum as u8;

        self.set_carry(sum > 0xFF);
        self.set_overflow((self.a ^ result) & (value ^ result) & 0x80 != 0);
        self.a = result;
        self.update_zero_and_negative_flags(result);
    }

    /// ADC - Add with Carry
    ///
    /// Flags affected: C, Z, V, N
    pub(crate) fn adc(&mut self, bus: &mut impl MemoryMappedDevice) -> bool {
        let value = self.fetch(bus);
        self.add_with_carry(value);
        true
    }

    /// SBC - Subtract with Carry
    ///
    /// A - M - (1 - C) is A + !M + C, so the adder is reused with the
    /// operand inverted. Decimal mode is not wired on the 2A03.
    ///
    /// Flags affected: C, Z, V, N
    pub(crate) fn sbc(&mut self, bus: &mut impl MemoryMappedDevice) -> bool {
        let value = self.fetch(bus);
        self.add_with_carry(!value);
        true
    }

    // ========================================
    // Increment / Decrement
    // ========================================

    /// INC - Increment Memory
    pub(crate) fn inc(&mut self, bus: &mut impl MemoryMappedDevice) -> bool {
        let value = self.fetch(bus).wrapping_add(1);
        bus.write(self.addr_abs, value);
        self.update_zero_and_negative_flags(value);
        false
    }

    /// DEC - Decrement Memory
    pub(crate) fn dec(&mut self, bus: &mut impl MemoryMappedDevice) -> bool {
        let value = self.fetch(bus).wrapping_sub(1);
        bus.write(self.addr_abs, value);
        self.update_zero_and_negative_flags(value);
        false
    }

    /// INX - Increment X
    pub(crate) fn inx(&mut self) -> bool {
        self.x = self.x.wrapping_add(1);
        self.update_zero_and_negative_flags(self.x);
        false
    }

    /// INY - Increment Y
    pub(crate) fn iny(&mut self) -> bool {
        self.y = self.y.wrapping_add(1);
        self.update_zero_and_negative_flags(self.y);
        false
    }

    /// DEX - Decrement X
    pub(crate) fn dex(&mut self) -> bool {
        self.x = self.x.wrapping_sub(1);
        self.update_zero_and_negative_flags(self.x);
        false
    }

    /// DEY - Decrement Y
    pub(crate) fn dey(&mut self) -> bool {
        self.y = self.y.wrapping_sub(1);
        self.update_zero_and_negative_flags(self.y);
        false
    }
}
