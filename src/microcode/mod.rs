/*!
  The gate-level microcode layer: single-bit boolean instructions over six
  register banks, a tolerant per-line parser, and the combinational machine
  that backs each of the assembly layer's custom opcodes.
*/

mod instruction;
mod machine;
mod parser;

pub use instruction::{Bank, GateKind, MicroInstruction, RegisterRef};
pub use machine::{MicrocodeMachine, BANK_WIDTH, INPUT_WIDTH};
pub use parser::parse_microcode;
