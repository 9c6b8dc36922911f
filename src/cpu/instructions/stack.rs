// Stack instructions for 6502 CPU

use crate::bus::MemoryMappedDevice;
use crate::cpu::{flags, Cpu};

impl Cpu {
    /// PHA - Push accumulator
    pub(crate) fn pha(&mut self, bus: &mut impl MemoryMappedDevice) -> bool {
        self.push(bus, self.a);
        false
    }

    /// PHP - Push processor status
    ///
    /// The pushed copy always has B and U set.
    pub(crate) fn php(&mut self, bus: &mut impl MemoryMappedDevice) -> bool {
        self.push(bus, self.status | flags::BREAK | flags::UNUSED);
        self.clear_flag(flags::BREAK);
        false
    }

    /// PLA - Pull accumulator
    pub(crate) fn pla(&mut self, bus: &mut impl MemoryMappedDevice) -> bool {
        self.a = self.pull(bus);
        self.update_zero_and_negative_flags(self.a);
        false
    }

    /// PLP - Pull processor status
    ///
    /// B does not exist in the register; U always reads as 1.
    pub(crate) fn plp(&mut self, bus: &mut impl MemoryMappedDevice) -> bool {
        self.status = self.pull(bus);
        self.clear_flag(flags::BREAK);
        self.set_flag(flags::UNUSED);
        false
    }
}
