// Instructions module for 6502 CPU
// This module organizes CPU instructions by semantic grouping
//
// Every operation returns whether it is willing to pay the addressing mode's
// page-crossing penalty. Only the read-type instructions say yes.

mod arithmetic;
mod branch;
mod compare;
mod flags;
mod jump_subroutine;
mod load_store;
mod logic;
mod miscellaneous;
mod shift_rotate;
mod stack;
mod transfer;

use crate::bus::MemoryMappedDevice;
use crate::cpu::opcodes::Operation;
use crate::cpu::Cpu;

impl Cpu {
    /// Execute one decoded operation against the latched operand
    pub(crate) fn execute(
        &mut self,
        operation: Operation,
        bus: &mut impl MemoryMappedDevice,
    ) -> bool {
        match operation {
            // Load/Store
            Operation::Lda => self.lda(bus),
            Operation::Ldx => self.ldx(bus),
            Operation::Ldy => self.ldy(bus),
            Operation::Sta => self.sta(bus),
            Operation::Stx => self.stx(bus),
            Operation::Sty => self.sty(bus),

            // Arithmetic
            Operation::Adc => self.adc(bus),
            Operation::Sbc => self.sbc(bus),
            Operation::Inc => self.inc(bus),
            Operation::Dec => self.dec(bus),
            Operation::Inx => self.inx(),
            Operation::Iny => self.iny(),
            Operation::Dex => self.dex(),
            Operation::Dey => self.dey(),

            // Logic
            Operation::And => self.and(bus),
            Operation::Ora => self.ora(bus),
            Operation::Eor => self.eor(bus),
            Operation::Bit => self.bit(bus),

            // Shift/Rotate
            Operation::Asl => self.asl(bus),
            Operation::Lsr => self.lsr(bus),
            Operation::Rol => self.rol(bus),
            Operation::Ror => self.ror(bus),

            // Compare
            Operation::Cmp => self.cmp(bus),
            Operation::Cpx => self.cpx(bus),
            Operation::Cpy => self.cpy(bus),

            // Branch
            Operation::Bcc => self.bcc(),
            Operation::Bcs => self.bcs(),
            Operation::Beq => self.beq(),
            Operation::Bne => self.bne(),
            Operation::Bmi => self.bmi(),
            Operation::Bpl => self.bpl(),
            Operation::Bvc => self.bvc(),
            Operation::Bvs => self.bvs(),

            // Jump/Subroutine/Interrupt
            Operation::Jmp => self.jmp(),
            Operation::Jsr => self.jsr(bus),
            Operation::Rts => self.rts(bus),
            Operation::Rti => self.rti(bus),
            Operation::Brk => self.brk(bus),

            // Stack
            Operation::Pha => self.pha(bus),
            Operation::Php => self.php(bus),
            Operation::Pla => self.pla(bus),
            Operation::Plp => self.plp(bus),

            // Transfer
            Operation::Tax => self.tax(),
            Operation::Tay => self.tay(),
            Operation::Tsx => self.tsx(),
            Operation::Txa => self.txa(),
            Operation::Txs => self.txs(),
            Operation::Tya => self.tya(),

            // Flags
            Operation::Clc => self.clc(),
            Operation::Cld => self.cld(),
            Operation::Cli => self.cli(),
            Operation::Clv => self.clv(),
            Operation::Sec => self.sec(),
            Operation::Sed => self.sed(),
            Operation::Sei => self.sei(),

            // Miscellaneous
            Operation::Nop => self.nop(),
            Operation::Xxx => self.xxx(),
        }
    }
}
