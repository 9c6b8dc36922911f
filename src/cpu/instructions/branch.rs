// Branch instructions for 6502 CPU
//
// A taken branch costs one extra cycle, and one more when the target is on a
// different page than the instruction that follows the branch.

use crate::cpu::Cpu;

impl Cpu {
    fn branch_if(&mut self, condition: bool) -> bool {
        if condition {
            self.cycles += 1;
            self.addr_abs = self.pc.wrapping_add(self.addr_rel);
            if (self.addr_abs & 0xFF00) != (self.pc & 0xFF00) {
                self.cycles += 1;
            }
            self.pc = self.addr_abs;
        }
        false
    }

    /// BCC - Branch if carry clear
    pub(crate) fn bcc(&mut self) -> bool {
        self.branch_if(!self.get_carry())
    }

    /// BCS - Branch if carry set
    pub(crate) fn bcs(&mut self) -> bool {
        self.branch_if(self.get_carry())
    }

    /// BEQ - Branch if equal (Z set)
    pub(crate) fn beq(&mut self) -> bool {
        self.branch_if(self.get_zero())
    }

    /// BNE - Branch if not equal (Z clear)
    pub(crate) fn bne(&mut self) -> bool {
        self.branch_if(!self.get_zero())
    }

    /// BMI - Branch if minus (N set)
    pub(crate) fn bmi(&mut self) -> bool {
        self.branch_if(self.get_negative())
    }

    /// BPL - Branch if plus (N clear)
    pub(crate) fn bpl(&mut self) -> bool {
        self.branch_if(!self.get_negative())
    }

    /// BVC - Branch if overflow clear
    pub(crate) fn bvc(&mut self) -> bool {
        self.branch_if(!self.get_overflow())
    }

    /// BVS - Branch if overflow set
    pub(crate) fn bvs(&mut self) -> bool {
        self.branch_if(self.get_overflow())
    }
}
