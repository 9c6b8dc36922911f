// Disassembler - 6502 instruction disassembly
//
// Walks a CPU address range through `MemoryMappedDevice::peek`, so it never
// disturbs device state (PPU status, data buffer) and never needs a live CPU.

use std::collections::BTreeMap;
use std::fmt;

use crate::bus::MemoryMappedDevice;
use crate::cpu::{AddressingMode, OPCODE_TABLE};

/// Disassembled instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisassembledInstruction {
    /// Address where the instruction is located
    pub address: u16,

    /// Opcode byte
    pub opcode: u8,

    /// Mnemonic (e.g., "LDA", "???")
    pub mnemonic: &'static str,

    /// Addressing mode
    pub mode: AddressingMode,

    /// Operand bytes in memory order
    pub operands: Vec<u8>,
}

impl DisassembledInstruction {
    /// Total instruction length in bytes
    pub fn length(&self) -> u8 {
        1 + self.operands.len() as u8
    }

    /// Operand rendering for the listing format
    ///
    /// Operands print as they sit in memory: absolute addresses high byte
    /// first, branch displacements as the raw byte.
    pub fn format_operand(&self) -> String {
        let byte = |i: usize| self.operands.get(i).copied().unwrap_or(0);
        let word = || format!("{:02X}{:02X}", byte(1), byte(0));

        match self.mode {
            AddressingMode::Implied => String::new(),
            AddressingMode::Accumulator => "A".to_string(),
            AddressingMode::Immediate => format!("#${:02X}", byte(0)),
            AddressingMode::ZeroPage => format!("*{:02X}", byte(0)),
            AddressingMode::ZeroPageX => format!("*{:02X}, X", byte(0)),
            AddressingMode::ZeroPageY => format!("*{:02X}, Y", byte(0)),
            AddressingMode::Relative => format!("{:02X}", byte(0)),
            AddressingMode::Absolute => word(),
            AddressingMode::AbsoluteX => format!("{}, X", word()),
            AddressingMode::AbsoluteY => format!("{}, Y", word()),
            AddressingMode::Indirect => format!("({})", word()),
            AddressingMode::IndexedIndirect => format!("({:02X}, X)", byte(0)),
            AddressingMode::IndirectIndexed => format!("({:02X}), Y", byte(0)),
        }
    }

    /// Format the instruction bytes as hex, e.g. "A9 42"
    pub fn format_bytes(&self) -> String {
        let mut result = format!("{:02X}", self.opcode);
        for operand in &self.operands {
            result.push_str(&format!(" {:02X}", operand));
        }
        result
    }
}

impl fmt::Display for DisassembledInstruction {
    /// `MNEMONIC[OP] operand`, e.g. `LDA[A9] #$42`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{:02X}] {}",
            self.mnemonic,
            self.opcode,
            self.format_operand()
        )
    }
}

/// Decode the instruction at `address`
pub fn disassemble_instruction(
    bus: &impl MemoryMappedDevice,
    address: u16,
) -> DisassembledInstruction {
    let opcode = bus.peek(address);
    let instruction = &OPCODE_TABLE[opcode as usize];
    let operands = (1..=instruction.mode.operand_bytes() as u16)
        .map(|i| bus.peek(address.wrapping_add(i)))
        .collect();

    DisassembledInstruction {
        address,
        opcode,
        mnemonic: instruction.mnemonic,
        mode: instruction.mode,
        operands,
    }
}

/// Instruction-by-instruction walk over an address range
///
/// Decoding starts at `start` and continues while the next opcode lies
/// before `end - 1`. The walk owns nothing but its cursor, so a clone is an
/// independent walk over the same range.
#[derive(Clone)]
pub struct Disassembly<'a, B: MemoryMappedDevice> {
    bus: &'a B,
    position: u32,
    end: u32,
}

impl<'a, B: MemoryMappedDevice> Disassembly<'a, B> {
    pub fn new(bus: &'a B, start: u16, end: u16) -> Self {
        Disassembly {
            bus,
            position: start as u32,
            end: end as u32,
        }
    }
}

impl<B: MemoryMappedDevice> Iterator for Disassembly<'_, B> {
    type Item = DisassembledInstruction;

    fn next(&mut self) -> Option<Self::Item> {
        if self.position + 1 >= self.end {
            return None;
        }
        let instruction = disassemble_instruction(self.bus, self.position as u16);
        self.position += instruction.length() as u32;
        Some(instruction)
    }
}

/// Disassemble `start..end` into an ordered address -> text map
///
/// # Example
/// ```
/// use nes_core::bus::FlatMemory;
/// use nes_core::debug::disassemble;
///
/// let mut memory = FlatMemory::new();
/// memory.load(0x8000, &[0xA9, 0x42, 0x8D, 0x00, 0x02]);
/// let listing = disassemble(&memory, 0x8000, 0x8005);
/// assert_eq!(listing[&0x8000], "LDA[A9] #$42");
/// assert_eq!(listing[&0x8002], "STA[8D] 0200");
/// ```
pub fn disassemble(bus: &impl MemoryMappedDevice, start: u16, end: u16) -> BTreeMap<u16, String> {
    Disassembly::new(bus, start, end)
        .map(|instruction| (instruction.address, instruction.to_string()))
        .collect()
}

/// Render a listing with one `0xADDR: text` line per instruction
pub fn format_listing(listing: &BTreeMap<u16, String>) -> String {
    let mut out = String::new();
    for (address, text) in listing {
        out.push_str(&format!("0x{:04X}: {}\n", address, text));
    }
    out
}
