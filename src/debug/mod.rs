// Debug module - Diagnostic services over the emulated machine
//
// - Disassembler (side-effect free, range based)
// - CPU state snapshots and trace lines

pub mod cpu;
pub mod disassembler;

pub use cpu::{trace_line, CpuState};
pub use disassembler::{
    disassemble, disassemble_instruction, format_listing, DisassembledInstruction, Disassembly,
};
