/*!

  A two-level educational virtual machine. The upper level is a 6-bit
  "assembly" language: lines of pipe-delimited segments, each segment one or
  two operations evaluated against the same input pair, feeding a stack, an
  output list, and a program counter. The lower level is a gate-level
  "microcode" language: lines of single-bit boolean gates wired between
  register banks. The two meet at the assembly layer's three custom opcodes
  (`cust1`..`cust3`), each backed by one microcode machine: the operands and
  program counter are packed into the microcode machine's input and address
  bits, and its output and jump bits come back as the result value and the
  next program counter.

  The crate is a pure, synchronous computation core. It parses program text
  one line at a time (bad lines are reported as data, never thrown, so an
  editor can highlight them), and executes one assembly line per `step`.
  Everything interactive (editors, screens, keyboards) lives outside and
  drives this core through `parse_assembly`, `parse_microcode`, and the two
  machine types.

*/

#[macro_use] extern crate prettytable;
#[macro_use] extern crate lazy_static;

mod display;

pub mod assembly;
pub mod errors;
pub mod microcode;
pub mod word;

pub use assembly::{parse_assembly, AsmLine, AssemblyMachine, Mnemonic, Op, RunState, Segment};
pub use errors::InvalidProgramError;
pub use microcode::{parse_microcode, Bank, GateKind, MicroInstruction, MicrocodeMachine, RegisterRef};
pub use word::{bits_from_str, bits_to_string, Word};
