/*!
  The assembly machine: a program counter over a fixed grid of lines, a
  stack, an append-only output list, and three owned microcode machines
  backing the custom opcodes. The machine is driven one line per `step` by
  an outside caller; a step is atomic and always completes.
*/

use std::fmt::{Display, Formatter};

use crate::display;
use crate::errors::InvalidProgramError;
use crate::microcode::MicrocodeMachine;
use crate::word::Word;

use super::instruction::{AsmLine, Mnemonic, Op};

/// Whether the machine still has a line to execute after a step.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum RunState {
  Running,
  Halted
}

impl Display for RunState {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      RunState::Running => {
        write!(f, "Running")
      }
      RunState::Halted => {
        write!(f, "Halted")
      }
    }
  }
}

pub struct AssemblyMachine {
  // The program grid. Always exactly `line_count` lines long.
  program    : Vec<AsmLine>,
  line_count : usize,

  // One microcode machine per custom opcode slot, owned for the machine's
  // whole lifetime.
  ucode : [MicrocodeMachine; 3],

  // Registers //
  pc     : usize,     // Index of the line about to execute
  stack  : Vec<Word>, // Top of stack at the end
  output : Vec<Word>, // Append-only

  // Pipe registers, meaningful only while a step is in flight.
  pipe1 : Word,
  pipe2 : Word,
}

impl AssemblyMachine {
  /**
    Creates a machine over a fixed grid of `line_count` lines. A shorter
    program is padded with blank lines and extra lines are dropped, so the
    halt check against `line_count` can never run off the program.
  */
  pub fn new(
    program: Vec<AsmLine>,
    ucode: [MicrocodeMachine; 3],
    line_count: usize
  ) -> AssemblyMachine {
    let mut program = program;
    program.truncate(line_count);
    program.resize(line_count, AsmLine::blank());

    AssemblyMachine {
      program,
      line_count,
      ucode,
      pc     : 0,
      stack  : vec![],
      output : vec![],
      pipe1  : Word::default(),
      pipe2  : Word::default(),
    }
  }

  pub fn pc(&self) -> usize {
    self.pc
  }

  /// Bottom of the stack first; the last entry is the top.
  pub fn stack(&self) -> &[Word] {
    &self.stack
  }

  pub fn output(&self) -> &[Word] {
    &self.output
  }

  /// Replaces the stack contents, bottom first. Used to load a test case.
  pub fn set_stack(&mut self, values: Vec<Word>) {
    self.stack = values;
  }

  /// Rewinds to the first line and discards the output, leaving the stack
  /// alone so the caller can load the next test case with `set_stack`.
  pub fn reset(&mut self) {
    self.pc = 0;
    self.output.clear();
  }

  /// True when every line from the current one onward is blank, the point
  /// at which a driver may stop stepping.
  pub fn remaining_is_blank(&self) -> bool {
    self.program[self.pc..].iter().all(AsmLine::is_blank)
  }

  /**
    Executes the line under the program counter: every segment in order,
    both operations of a segment against the same input pair, with the last
    jump written winning. Returns `Halted` (and rewinds to line zero) when
    control falls off the end of the grid.
  */
  pub fn step(&mut self) -> Result<RunState, InvalidProgramError> {
    if self.line_count == 0 {
      return Ok(RunState::Halted);
    }

    #[cfg(feature = "trace_execution")]
    println!("line {:>2}: {}", self.pc, self.program[self.pc]);

    let segments = match &self.program[self.pc] {
      AsmLine::Invalid => return Err(InvalidProgramError { line: self.pc }),
      AsmLine::Segments(segments) => segments.clone()
    };

    self.pipe1 = Word::default();
    self.pipe2 = Word::default();
    let mut next_pc = self.pc + 1;

    for segment in &segments {
      let (out1, jump1) = self.eval(segment.first)?;
      let (out2, jump2) = match segment.second {
        Some(op) => self.eval(op)?,
        None => (Word::default(), None)
      };

      self.pipe1 = out1;
      self.pipe2 = out2;

      if let Some(target) = jump1 {
        next_pc = target.value() as usize;
      }
      if let Some(target) = jump2 {
        next_pc = target.value() as usize;
      }
    }

    if self.line_count <= next_pc {
      self.pc = 0;
      return Ok(RunState::Halted);
    }
    self.pc = next_pc;
    Ok(RunState::Running)
  }

  /// Steps until the program halts.
  pub fn run(&mut self) -> Result<(), InvalidProgramError> {
    while self.step()? == RunState::Running {}
    Ok(())
  }

  /// Applies one operation to the current pipe pair, yielding its output
  /// word and optional jump target. Stack and output side effects happen
  /// here, sequenced left to right within the segment.
  fn eval(&mut self, op: Op) -> Result<(Word, Option<Word>), InvalidProgramError> {
    let (a, b) = (self.pipe1, self.pipe2);

    #[cfg(feature = "trace_execution")]
    println!("  {}({}, {})", op, a, b);

    let result = match op {
      Op::Literal(value) => (value, None),

      Op::Mnemonic(mnemonic) => match mnemonic {
        Mnemonic::First  => (a, None),
        Mnemonic::Second => (b, None),
        Mnemonic::Add    => (a + b, None),
        Mnemonic::Sub    => (a - b, None),

        Mnemonic::Jmp => (a, Some(a)),
        Mnemonic::JmpZero => {
          match b.value() {
            0 => (a, Some(a)),
            _ => (a, None)
          }
        }

        Mnemonic::Push => {
          self.stack.push(a);
          (a, None)
        }
        Mnemonic::Pop => {
          (self.stack.pop().unwrap_or_default(), None)
        }
        Mnemonic::Swap => {
          // Missing entries read as zero, so swapping a short stack grows
          // it rather than failing.
          let top    = self.stack.pop().unwrap_or_default();
          let second = self.stack.pop().unwrap_or_default();
          self.stack.push(top);
          self.stack.push(second);
          (a, None)
        }
        Mnemonic::Append => {
          self.stack.insert(0, a);
          (a, None)
        }
        Mnemonic::Output => {
          self.output.push(a);
          (a, None)
        }

        Mnemonic::Cust1 => self.bridge(0)?,
        Mnemonic::Cust2 => self.bridge(1)?,
        Mnemonic::Cust3 => self.bridge(2)?,
      }
    };

    Ok(result)
  }

  /**
    Bridges into the microcode machine bound to `slot`. The pipe pair and
    the program counter are packed onto the machine's input and address
    bits; its output and jump bits come back as the result word and the
    next program counter. The jump target is always concrete: a custom
    opcode always redirects control flow, even when the microcode program
    computed the line it would have fallen through to anyway.
  */
  fn bridge(&mut self, slot: usize) -> Result<(Word, Option<Word>), InvalidProgramError> {
    // A 6-bit address bus: a wider program counter truncates.
    let address = Word::new(self.pc as u16);
    let (value, jump) = self.ucode[slot].invoke(self.pipe1, self.pipe2, address)?;
    Ok((value, Some(jump)))
  }
}

impl Display for AssemblyMachine {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let stack_table  = display::word_table(self.stack.iter().rev().cloned());
    let output_table = display::word_table(self.output.iter().cloned());

    let mut combined_table = table!([stack_table, output_table]);
    combined_table.set_titles(row![ub->"Stack", ub->"Output"]);
    combined_table.set_format(*display::TABLE_DISPLAY_FORMAT);

    write!(f, "pc: {}\n{}", self.pc, combined_table)
  }
}
