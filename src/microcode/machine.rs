/*!
  The gate-level machine backing one custom opcode. Running a program is
  purely combinational: each instruction reads its argument bits from the
  current register state and writes one destination bit, top to bottom,
  with no control flow.
*/

use std::fmt::{Display, Formatter};

use prettytable::Table;

use crate::display;
use crate::errors::InvalidProgramError;
use crate::word::{bits_to_string, Word, WORD_BITS};

use super::instruction::{Bank, MicroInstruction, RegisterRef};

/// Bits in each 6-bit bank, and on each half of the input bank. One word
/// fills one bank exactly.
pub const BANK_WIDTH: usize = WORD_BITS;

/// The input bank holds both operand words side by side.
pub const INPUT_WIDTH: usize = 2 * BANK_WIDTH;

/**
  Register state plus a parsed program.

  Register reset is deliberately absent: the user, output, and jump banks
  keep their values across calls to `run`, and the jump bank starts at
  all-zero rather than defaulting to the following address. The surrounding
  tooling depends on this persistent behavior, documented descriptions of a
  per-call reset notwithstanding. This is a known ambiguity, resolved here in
  favor of what actually runs.
*/
pub struct MicrocodeMachine {
  program: Vec<MicroInstruction>,

  // Read-only banks, overwritten at the top of every `run`.
  input   : [bool; INPUT_WIDTH],
  address : [bool; BANK_WIDTH],

  // Read-write banks, persistent across runs.
  user   : [bool; BANK_WIDTH],
  output : [bool; BANK_WIDTH],
  jump   : [bool; BANK_WIDTH],
}

impl MicrocodeMachine {
  pub fn new(program: Vec<MicroInstruction>) -> MicrocodeMachine {
    MicrocodeMachine {
      program,
      input   : [false; INPUT_WIDTH],
      address : [false; BANK_WIDTH],
      user    : [false; BANK_WIDTH],
      output  : [false; BANK_WIDTH],
      jump    : [false; BANK_WIDTH],
    }
  }

  pub fn user(&self) -> &[bool; BANK_WIDTH] {
    &self.user
  }

  pub fn output(&self) -> &[bool; BANK_WIDTH] {
    &self.output
  }

  pub fn jump(&self) -> &[bool; BANK_WIDTH] {
    &self.jump
  }

  /**
    Runs the whole program once against fresh input and address bits,
    returning the user, output, and jump banks. Those three banks carry
    their state into the next call on the same instance.
  */
  pub fn run(
    &mut self,
    input1: [bool; BANK_WIDTH],
    input2: [bool; BANK_WIDTH],
    address: [bool; BANK_WIDTH]
  ) -> Result<([bool; BANK_WIDTH], [bool; BANK_WIDTH], [bool; BANK_WIDTH]), InvalidProgramError> {
    self.input[..BANK_WIDTH].copy_from_slice(&input1);
    self.input[BANK_WIDTH..].copy_from_slice(&input2);
    self.address = address;

    for line in 0..self.program.len() {
      let instruction = self.program[line].clone();
      match instruction {
        MicroInstruction::Blank => {}

        MicroInstruction::Invalid => {
          return Err(InvalidProgramError { line });
        }

        MicroInstruction::Gate { dest, gate, args } => {
          #[cfg(feature = "trace_execution")]
          println!("  {}", self.program[line]);

          let mut bits = [false; 3];
          for (i, argument) in args.iter().enumerate() {
            bits[i] = self.read(*argument);
          }
          let value = gate.apply(&bits[..args.len()]);
          self.write(dest, value);
        }
      }
    }

    Ok((self.user, self.output, self.jump))
  }

  /**
    Packs two words and the program counter into the input and address bits,
    runs the program, and unpacks the output and jump banks into words. This
    is the bridge the assembly machine's custom opcodes cross: the jump word
    always becomes the next program counter.
  */
  pub fn invoke(&mut self, a: Word, b: Word, pc: Word) -> Result<(Word, Word), InvalidProgramError> {
    let (_, output, jump) = self.run(a.bits(), b.bits(), pc.bits())?;
    Ok((Word::from_bits(&output), Word::from_bits(&jump)))
  }

  fn read(&self, reference: RegisterRef) -> bool {
    match reference.bank {
      Bank::Constant => reference.index != 0,
      Bank::Input    => self.input[reference.index],
      Bank::Address  => self.address[reference.index],
      Bank::User     => self.user[reference.index],
      Bank::Output   => self.output[reference.index],
      Bank::Jump     => self.jump[reference.index],
    }
  }

  fn write(&mut self, reference: RegisterRef, value: bool) {
    match reference.bank {
      Bank::User   => self.user[reference.index] = value,
      Bank::Output => self.output[reference.index] = value,
      Bank::Jump   => self.jump[reference.index] = value,

      Bank::Constant | Bank::Input | Bank::Address => {
        // The parser rejects read-only destinations.
        unreachable!("write to read-only register {}", reference);
      }
    }
  }
}

impl Display for MicrocodeMachine {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let mut table = Table::new();
    table.set_format(*display::TABLE_DISPLAY_FORMAT);
    table.set_titles(row![ubr->"Bank", ubl->"Bits"]);
    table.add_row(row![r->"input",   bits_to_string(&self.input)]);
    table.add_row(row![r->"address", bits_to_string(&self.address)]);
    table.add_row(row![r->"user",    bits_to_string(&self.user)]);
    table.add_row(row![r->"output",  bits_to_string(&self.output)]);
    table.add_row(row![r->"jump",    bits_to_string(&self.jump)]);
    write!(f, "{}", table)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::microcode::parse_microcode;

  const LOW: [bool; BANK_WIDTH] = [false; BANK_WIDTH];

  fn machine(lines: &[&str]) -> MicrocodeMachine {
    MicrocodeMachine::new(parse_microcode(lines))
  }

  #[test]
  fn constants_feed_fixed_values() {
    let mut machine = machine(&["u1 = buf c1", "u2 = buf c0"]);
    let (user, _, _) = machine.run(LOW, LOW, LOW).unwrap();
    assert!(user[0]);
    assert!(!user[1]);
  }

  #[test]
  fn inputs_split_across_both_halves_of_the_bank() {
    // Input 40 is 101000: i1 and i3 are the set bits of the first half,
    // i7 and i9 of the second.
    let mut machine = machine(&["u1 = buf i1", "u2 = buf i7", "u3 = buf i9"]);
    let word = Word::new(40);
    let (user, _, _) = machine.run(word.bits(), word.bits(), LOW).unwrap();
    assert!(user[0]);
    assert!(user[1]);
    assert!(user[2]);
  }

  #[test]
  fn address_bits_are_readable() {
    let mut machine = machine(&["u6 = buf a6"]);
    let (user, _, _) = machine.run(LOW, LOW, Word::new(1).bits()).unwrap();
    assert!(user[5]);
  }

  #[test]
  fn later_instructions_see_earlier_writes() {
    let mut machine = machine(&["u1 = buf c1", "o1 = buf u1"]);
    let (_, output, _) = machine.run(LOW, LOW, LOW).unwrap();
    assert!(output[0]);
  }

  #[test]
  fn buffered_and_gated_inputs_land_in_the_output_bank() {
    let mut machine = machine(&["o1 = buf i10", "o2 = buf i2", "o3 = and i3 i4"]);
    let input = Word::new(40).bits(); // 101000

    let (user, output, jump) = machine.run(input, input, input).unwrap();
    // i10 is bit 4 of the second input (0), i2 is bit 2 of the first (0),
    // and i3 AND i4 is 1 AND 0.
    assert_eq!(output, [false; BANK_WIDTH]);
    // Banks never written keep their pre-call values, all low on a fresh
    // machine.
    assert_eq!(user, [false; BANK_WIDTH]);
    assert_eq!(jump, [false; BANK_WIDTH]);
  }

  #[test]
  fn written_bits_persist_across_runs() {
    let mut machine = machine(&["o1 = or o1 i1"]);
    let mut high = LOW;
    high[0] = true;

    let (_, output, _) = machine.run(high, LOW, LOW).unwrap();
    assert!(output[0]);

    // The second run ORs the stale bit with a zero input: still set.
    let (_, output, jump) = machine.run(LOW, LOW, LOW).unwrap();
    assert!(output[0]);
    assert_eq!(jump, [false; BANK_WIDTH]);

    // The accessor views agree with what `run` handed back.
    assert!(machine.output()[0]);
    assert_eq!(machine.user(), &[false; BANK_WIDTH]);
    assert_eq!(machine.jump(), &[false; BANK_WIDTH]);
  }

  #[test]
  fn blank_lines_execute_as_no_ops() {
    let mut machine = machine(&["", "u1 = buf c1", ""]);
    let (user, _, _) = machine.run(LOW, LOW, LOW).unwrap();
    assert!(user[0]);
  }

  #[test]
  fn an_invalid_instruction_aborts_the_run() {
    let mut machine = machine(&["o1 = buf i1", "o2 = bogus i1"]);
    let error = machine.run(LOW, LOW, LOW).unwrap_err();
    assert_eq!(error, InvalidProgramError { line: 1 });
  }

  #[test]
  fn invoke_round_trips_words_through_the_bit_banks() {
    // Echo the low bit of the first operand and jump to line 1.
    let mut machine = machine(&["o6 = buf i6", "j6 = buf c1"]);
    let (value, jump) = machine.invoke(Word::new(1), Word::new(0), Word::new(0)).unwrap();
    assert_eq!(value, Word::new(1));
    assert_eq!(jump, Word::new(1));
  }
}
