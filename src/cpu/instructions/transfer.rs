// Register transfer instructions for 6502 CPU

use crate::cpu::Cpu;

impl Cpu {
    /// TAX - Transfer A to X
    pub(crate) fn tax(&mut self) -> bool {
        self.x = self.a;
        self.update_zero_and_negative_flags(self.x);
        false
    }

    /// TAY - Transfer A to Y
    pub(crate) fn tay(&mut self) -> bool {
        self.y = self.a;
        self.update_zero_and_negative_flags(self.y);
        false
    }

    /// TXA - Transfer X to A
    pub(crate) fn txa(&mut self) -> bool {
        self.a = self.x;
        self.update_zero_and_negative_flags(self.a);
        false
    }

    /// TYA - Transfer Y to A
    pub(crate) fn tya(&mut self) -> bool {
        self.a = self.y;
        self.update_zero_and_negative_flags(self.a);
        false
    }

    /// TSX - Transfer SP to X
    pub(crate) fn tsx(&mut self) -> bool {
        self.x = self.sp;
        self.update_zero_and_negative_flags(self.x);
        false
    }

    /// TXS - Transfer X to SP (no flags)
    pub(crate) fn txs(&mut self) -> bool {
        self.sp = self.x;
        false
    }
}
