/*!
  The 6-bit assembly layer: a pipe-composed instruction grammar, a tolerant
  per-line parser, and the machine that executes one line per step against a
  stack, an output list, and three microcode-backed custom opcodes.
*/

mod instruction;
mod machine;
mod parser;

pub use instruction::{AsmLine, Mnemonic, Op, Segment};
pub use machine::{AssemblyMachine, RunState};
pub use parser::parse_assembly;
