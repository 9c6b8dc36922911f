// Opcode table for the 6502 CPU
//
// One entry per opcode byte. Entries the processor does not implement decode
// to `Xxx`, which does nothing for 8 cycles. The six unofficial absolute,X
// NOPs (1C, 3C, 5C, 7C, DC, FC) are real NOPs so that they read their operand
// and pay for page crossings like the official instructions do.

use super::addressing::AddressingMode;
use Operation::*;

/// Operation performed by an opcode, independent of its addressing mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Adc,
    And,
    Asl,
    Bcc,
    Bcs,
    Beq,
    Bit,
    Bmi,
    Bne,
    Bpl,
    Brk,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cli,
    Clv,
    Cmp,
    Cpx,
    Cpy,
    Dec,
    Dex,
    Dey,
    Eor,
    Inc,
    Inx,
    Iny,
    Jmp,
    Jsr,
    Lda,
    Ldx,
    Ldy,
    Lsr,
    Nop,
    Ora,
    Pha,
    Php,
    Pla,
    Plp,
    Rol,
    Ror,
    Rti,
    Rts,
    Sbc,
    Sec,
    Sed,
    Sei,
    Sta,
    Stx,
    Sty,
    Tax,
    Tay,
    Tsx,
    Txa,
    Txs,
    Tya,
    /// Unimplemented opcode
    Xxx,
}

/// One decoded opcode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    /// Mnemonic used by the disassembler ("???" for unimplemented opcodes)
    pub mnemonic: &'static str,
    /// Operation to execute
    pub operation: Operation,
    /// How the operand is located
    pub mode: AddressingMode,
    /// Base cycle count before page-crossing and branch penalties
    pub cycles: u8,
}

impl Instruction {
    /// Total instruction length in bytes, opcode included
    pub fn length(&self) -> u8 {
        1 + self.mode.operand_bytes()
    }

    /// Whether this entry is an unimplemented opcode
    pub fn is_unimplemented(&self) -> bool {
        self.operation == Xxx
    }
}

const IMP: AddressingMode = AddressingMode::Implied;
const ACC: AddressingMode = AddressingMode::Accumulator;
const IMM: AddressingMode = AddressingMode::Immediate;
const ZP0: AddressingMode = AddressingMode::ZeroPage;
const ZPX: AddressingMode = AddressingMode::ZeroPageX;
const ZPY: AddressingMode = AddressingMode::ZeroPageY;
const REL: AddressingMode = AddressingMode::Relative;
const ABS: AddressingMode = AddressingMode::Absolute;
const ABX: AddressingMode = AddressingMode::AbsoluteX;
const ABY: AddressingMode = AddressingMode::AbsoluteY;
const IND: AddressingMode = AddressingMode::Indirect;
const IZX: AddressingMode = AddressingMode::IndexedIndirect;
const IZY: AddressingMode = AddressingMode::IndirectIndexed;

const fn op(
    mnemonic: &'static str,
    operation: Operation,
    mode: AddressingMode,
    cycles: u8,
) -> Instruction {
    Instruction {
        mnemonic,
        operation,
        mode,
        cycles,
    }
}

/// The 256-entry instruction table, indexed by opcode byte
#[rustfmt::skip]
pub static OPCODE_TABLE: [Instruction; 256] = [
    op("BRK", Brk, IMP, 7), // 00
    op("ORA", Ora, IZX, 6), // 01
    op("???", Xxx, IMP, 8), // 02
    op("???", Xxx, IMP, 8), // 03
    op("???", Xxx, IMP, 8), // 04
    op("ORA", Ora, ZP0, 3), // 05
    op("ASL", Asl, ZP0, 5), // 06
    op("???", Xxx, IMP, 8), // 07
    op("PHP", Php, IMP, 3), // 08
    op("ORA", Ora, IMM, 2), // 09
    op("ASL", Asl, ACC, 2), // 0A
    op("???", Xxx, IMP, 8), // 0B
    op("???", Xxx, IMP, 8), // 0C
    op("ORA", Ora, ABS, 4), // 0D
    op("ASL", Asl, ABS, 6), // 0E
    op("???", Xxx, IMP, 8), // 0F

    op("BPL", Bpl, REL, 2), // 10
    op("ORA", Ora, IZY, 5), // 11
    op("???", Xxx, IMP, 8), // 12
    op("???", Xxx, IMP, 8), // 13
    op("???", Xxx, IMP, 8), // 14
    op("ORA", Ora, ZPX, 4), // 15
    op("ASL", Asl, ZPX, 6), // 16
    op("???", Xxx, IMP, 8), // 17
    op("CLC", Clc, IMP, 2), // 18
    op("ORA", Ora, ABY, 4), // 19
    op("???", Xxx, IMP, 8), // 1A
    op("???", Xxx, IMP, 8), // 1B
    op("NOP", Nop, ABX, 4), // 1C
    op("ORA", Ora, ABX, 4), // 1D
    op("ASL", Asl, ABX, 7), // 1E
    op("???", Xxx, IMP, 8), // 1F

    op("JSR", Jsr, ABS, 6), // 20
    op("AND", And, IZX, 6), // 21
    op("???", Xxx, IMP, 8), // 22
    op("???", Xxx, IMP, 8), // 23
    op("BIT", Bit, ZP0, 3), // 24
    op("AND", And, ZP0, 3), // 25
    op("ROL", Rol, ZP0, 5), // 26
    op("???", Xxx, IMP, 8), // 27
    op("PLP", Plp, IMP, 4), // 28
    op("AND", And, IMM, 2), // 29
    op("ROL", Rol, ACC, 2), // 2A
    op("???", Xxx, IMP, 8), // 2B
    op("BIT", Bit, ABS, 4), // 2C
    op("AND", And, ABS, 4), // 2D
    op("ROL", Rol, ABS, 6), // 2E
    op("???", Xxx, IMP, 8), // 2F

    op("BMI", Bmi, REL, 2), // 30
    op("AND", And, IZY, 5), // 31
    op("???", Xxx, IMP, 8), // 32
    op("???", Xxx, IMP, 8), // 33
    op("???", Xxx, IMP, 8), // 34
    op("AND", And, ZPX, 4), // 35
    op("ROL", Rol, ZPX, 6), // 36
    op("???", Xxx, IMP, 8), // 37
    op("SEC", Sec, IMP, 2), // 38
    op("AND", And, ABY, 4), // 39
    op("???", Xxx, IMP, 8), // 3A
    op("???", Xxx, IMP, 8), // 3B
    op("NOP", Nop, ABX, 4), // 3C
    op("AND", And, ABX, 4), // 3D
    op("ROL", Rol, ABX, 7), // 3E
    op("???", Xxx, IMP, 8), // 3F

    op("RTI", Rti, IMP, 6), // 40
    op("EOR", Eor, IZX, 6), // 41
    op("???", Xxx, IMP, 8), // 42
    op("???", Xxx, IMP, 8), // 43
    op("???", Xxx, IMP, 8), // 44
    op("EOR", Eor, ZP0, 3), // 45
    op("LSR", Lsr, ZP0, 5), // 46
    op("???", Xxx, IMP, 8), // 47
    op("PHA", Pha, IMP, 3), // 48
    op("EOR", Eor, IMM, 2), // 49
    op("LSR", Lsr, ACC, 2), // 4A
    op("???", Xxx, IMP, 8), // 4B
    op("JMP", Jmp, ABS, 3), // 4C
    op("EOR", Eor, ABS, 4), // 4D
    op("LSR", Lsr, ABS, 6), // 4E
    op("???", Xxx, IMP, 8), // 4F

    op("BVC", Bvc, REL, 2), // 50
    op("EOR", Eor, IZY, 5), // 51
    op("???", Xxx, IMP, 8), // 52
    op("???", Xxx, IMP, 8), // 53
    op("???", Xxx, IMP, 8), // 54
    op("EOR", Eor, ZPX, 4), // 55
    op("LSR", Lsr, ZPX, 6), // 56
    op("???", Xxx, IMP, 8), // 57
    op("CLI", Cli, IMP, 2), // 58
    op("EOR", Eor, ABY, 4), // 59
    op("???", Xxx, IMP, 8), // 5A
    op("???", Xxx, IMP, 8), // 5B
    op("NOP", Nop, ABX, 4), // 5C
    op("EOR", Eor, ABX, 4), // 5D
    op("LSR", Lsr, ABX, 7), // 5E
    op("???", Xxx, IMP, 8), // 5F

    op("RTS", Rts, IMP, 6), // 60
    op("ADC", Adc, IZX, 6), // 61
    op("???", Xxx, IMP, 8), // 62
    op("???", Xxx, IMP, 8), // 63
    op("???", Xxx, IMP, 8), // 64
    op("ADC", Adc, ZP0, 3), // 65
    op("ROR", Ror, ZP0, 5), // 66
    op("???", Xxx, IMP, 8), // 67
    op("PLA", Pla, IMP, 4), // 68
    op("ADC", Adc, IMM, 2), // 69
    op("ROR", Ror, ACC, 2), // 6A
    op("???", Xxx, IMP, 8), // 6B
    op("JMP", Jmp, IND, 5), // 6C
    op("ADC", Adc, ABS, 4), // 6D
    op("ROR", Ror, ABS, 6), // 6E
    op("???", Xxx, IMP, 8), // 6F

    op("BVS", Bvs, REL, 2), // 70
    op("ADC", Adc, IZY, 5), // 71
    op("???", Xxx, IMP, 8), // 72
    op("???", Xxx, IMP, 8), // 73
    op("???", Xxx, IMP, 8), // 74
    op("ADC", Adc, ZPX, 4), // 75
    op("ROR", Ror, ZPX, 6), // 76
    op("???", Xxx, IMP, 8), // 77
    op("SEI", Sei, IMP, 2), // 78
    op("ADC", Adc, ABY, 4), // 79
    op("???", Xxx, IMP, 8), // 7A
    op("???", Xxx, IMP, 8), // 7B
    op("NOP", Nop, ABX, 4), // 7C
    op("ADC", Adc, ABX, 4), // 7D
    op("ROR", Ror, ABX, 7), // 7E
    op("???", Xxx, IMP, 8), // 7F

    op("???", Xxx, IMP, 8), // 80
    op("STA", Sta, IZX, 6), // 81
    op("???", Xxx, IMP, 8), // 82
    op("???", Xxx, IMP, 8), // 83
    op("STY", Sty, ZP0, 3), // 84
    op("STA", Sta, ZP0, 3), // 85
    op("STX", Stx, ZP0, 3), // 86
    op("???", Xxx, IMP, 8), // 87
    op("DEY", Dey, IMP, 2), // 88
    op("???", Xxx, IMP, 8), // 89
    op("TXA", Txa, IMP, 2), // 8A
    op("???", Xxx, IMP, 8), // 8B
    op("STY", Sty, ABS, 4), // 8C
    op("STA", Sta, ABS, 4), // 8D
    op("STX", Stx, ABS, 4), // 8E
    op("???", Xxx, IMP, 8), // 8F

    op("BCC", Bcc, REL, 2), // 90
    op("STA", Sta, IZY, 6), // 91
    op("???", Xxx, IMP, 8), // 92
    op("???", Xxx, IMP, 8), // 93
    op("STY", Sty, ZPX, 4), // 94
    op("STA", Sta, ZPX, 4), // 95
    op("STX", Stx, ZPY, 4), // 96
    op("???", Xxx, IMP, 8), // 97
    op("TYA", Tya, IMP, 2), // 98
    op("STA", Sta, ABY, 5), // 99
    op("TXS", Txs, IMP, 2), // 9A
    op("???", Xxx, IMP, 8), // 9B
    op("???", Xxx, IMP, 8), // 9C
    op("STA", Sta, ABX, 5), // 9D
    op("???", Xxx, IMP, 8), // 9E
    op("???", Xxx, IMP, 8), // 9F

    op("LDY", Ldy, IMM, 2), // A0
    op("LDA", Lda, IZX, 6), // A1
    op("LDX", Ldx, IMM, 2), // A2
    op("???", Xxx, IMP, 8), // A3
    op("LDY", Ldy, ZP0, 3), // A4
    op("LDA", Lda, ZP0, 3), // A5
    op("LDX", Ldx, ZP0, 3), // A6
    op("???", Xxx, IMP, 8), // A7
    op("TAY", Tay, IMP, 2), // A8
    op("LDA", Lda, IMM, 2), // A9
    op("TAX", Tax, IMP, 2), // AA
    op("???", Xxx, IMP, 8), // AB
    op("LDY", Ldy, ABS, 4), // AC
    op("LDA", Lda, ABS, 4), // AD
    op("LDX", Ldx, ABS, 4), // AE
    op("???", Xxx, IMP, 8), // AF

    op("BCS", Bcs, REL, 2), // B0
    op("LDA", Lda, IZY, 5), // B1
    op("???", Xxx, IMP, 8), // B2
    op("???", Xxx, IMP, 8), // B3
    op("LDY", Ldy, ZPX, 4), // B4
    op("LDA", Lda, ZPX, 4), // B5
    op("LDX", Ldx, ZPY, 4), // B6
    op("???", Xxx, IMP, 8), // B7
    op("CLV", Clv, IMP, 2), // B8
    op("LDA", Lda, ABY, 4), // B9
    op("TSX", Tsx, IMP, 2), // BA
    op("???", Xxx, IMP, 8), // BB
    op("LDY", Ldy, ABX, 4), // BC
    op("LDA", Lda, ABX, 4), // BD
    op("LDX", Ldx, ABY, 4), // BE
    op("???", Xxx, IMP, 8), // BF

    op("CPY", Cpy, IMM, 2), // C0
    op("CMP", Cmp, IZX, 6), // C1
    op("???", Xxx, IMP, 8), // C2
    op("???", Xxx, IMP, 8), // C3
    op("CPY", Cpy, ZP0, 3), // C4
    op("CMP", Cmp, ZP0, 3), // C5
    op("DEC", Dec, ZP0, 5), // C6
    op("???", Xxx, IMP, 8), // C7
    op("INY", Iny, IMP, 2), // C8
    op("CMP", Cmp, IMM, 2), // C9
    op("DEX", Dex, IMP, 2), // CA
    op("???", Xxx, IMP, 8), // CB
    op("CPY", Cpy, ABS, 4), // CC
    op("CMP", Cmp, ABS, 4), // CD
    op("DEC", Dec, ABS, 6), // CE
    op("???", Xxx, IMP, 8), // CF

    op("BNE", Bne, REL, 2), // D0
    op("CMP", Cmp, IZY, 5), // D1
    op("???", Xxx, IMP, 8), // D2
    op("???", Xxx, IMP, 8), // D3
    op("???", Xxx, IMP, 8), // D4
    op("CMP", Cmp, ZPX, 4), // D5
    op("DEC", Dec, ZPX, 6), // D6
    op("???", Xxx, IMP, 8), // D7
    op("CLD", Cld, IMP, 2), // D8
    op("CMP", Cmp, ABY, 4), // D9
    op("???", Xxx, IMP, 8), // DA
    op("???", Xxx, IMP, 8), // DB
    op("NOP", Nop, ABX, 4), // DC
    op("CMP", Cmp, ABX, 4), // DD
    op("DEC", Dec, ABX, 7), // DE
    op("???", Xxx, IMP, 8), // DF

    op("CPX", Cpx, IMM, 2), // E0
    op("SBC", Sbc, IZX, 6), // E1
    op("???", Xxx, IMP, 8), // E2
    op("???", Xxx, IMP, 8), // E3
    op("CPX", Cpx, ZP0, 3), // E4
    op("SBC", Sbc, ZP0, 3), // E5
    op("INC", Inc, ZP0, 5), // E6
    op("???", Xxx, IMP, 8), // E7
    op("INX", Inx, IMP, 2), // E8
    op("SBC", Sbc, IMM, 2), // E9
    op("NOP", Nop, IMP, 2), // EA
    op("???", Xxx, IMP, 8), // EB
    op("CPX", Cpx, ABS, 4), // EC
    op("SBC", Sbc, ABS, 4), // ED
    op("INC", Inc, ABS, 6), // EE
    op("???", Xxx, IMP, 8), // EF

    op("BEQ", Beq, REL, 2), // F0
    op("SBC", Sbc, IZY, 5), // F1
    op("???", Xxx, IMP, 8), // F2
    op("???", Xxx, IMP, 8), // F3
    op("???", Xxx, IMP, 8), // F4
    op("SBC", Sbc, ZPX, 4), // F5
    op("INC", Inc, ZPX, 6), // F6
    op("???", Xxx, IMP, 8), // F7
    op("SED", Sed, IMP, 2), // F8
    op("SBC", Sbc, ABY, 4), // F9
    op("???", Xxx, IMP, 8), // FA
    op("???", Xxx, IMP, 8), // FB
    op("NOP", Nop, ABX, 4), // FC
    op("SBC", Sbc, ABX, 4), // FD
    op("INC", Inc, ABX, 7), // FE
    op("???", Xxx, IMP, 8), // FF
];
