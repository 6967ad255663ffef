use std::fmt::{Display, Formatter};

use strum_macros::{Display as StrumDisplay, EnumString, IntoStaticStr};

use crate::word::Word;

/**
  Named operations of the assembly layer.

  Source tokens resolve to this enum once, at parse time; execution
  dispatches over the enum, so no string comparison survives into the
  machine's hot loop. Every mnemonic maps an input pair to an output word
  and an optional jump target. `Push`, `Pop`, `Swap`, `Append`, and `Output`
  additionally touch the machine's stack or output list, and the three
  `Cust` opcodes delegate to the microcode machine bound to their slot.
*/
#[derive(
  StrumDisplay, IntoStaticStr, EnumString,
  Clone,        Copy,          Eq, PartialEq, Debug, Hash
)]
pub enum Mnemonic {
  #[strum(serialize = "first")]   First,
  #[strum(serialize = "second")]  Second,
  #[strum(serialize = "add")]     Add,
  #[strum(serialize = "sub")]     Sub,
  #[strum(serialize = "jmp")]     Jmp,
  #[strum(serialize = "jmpzero")] JmpZero,
  #[strum(serialize = "push")]    Push,
  #[strum(serialize = "pop")]     Pop,
  #[strum(serialize = "swap")]    Swap,
  #[strum(serialize = "append")]  Append,
  #[strum(serialize = "output")]  Output,
  #[strum(serialize = "cust1")]   Cust1,
  #[strum(serialize = "cust2")]   Cust2,
  #[strum(serialize = "cust3")]   Cust3,
}

/// A single operation cell: a constant or a named opcode. A literal ignores
/// its inputs and produces its constant, never a jump.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum Op {
  Literal(Word),
  Mnemonic(Mnemonic)
}

impl Display for Op {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Op::Literal(value) => {
        write!(f, "{}", value)
      }
      Op::Mnemonic(mnemonic) => {
        write!(f, "{}", mnemonic)
      }
    }
  }
}

/**
  A pipe-delimited group of one or two operations. Both operations of a
  segment are evaluated against the same input pair (the outputs of the
  previous segment), and their own outputs become the next segment's inputs.
*/
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub struct Segment {
  pub first: Op,
  pub second: Option<Op>
}

impl Display for Segment {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self.second {
      Some(second) => {
        write!(f, "{} {}", self.first, second)
      }
      None => {
        write!(f, "{}", self.first)
      }
    }
  }
}

/// One parsed source line. `Segments` with an empty vector is a blank or
/// whitespace-only line, which executes as a no-op.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum AsmLine {
  /// The line failed to parse. Recorded so an editor can highlight it;
  /// executing it is an `InvalidProgramError`.
  Invalid,
  Segments(Vec<Segment>)
}

impl AsmLine {
  pub fn blank() -> AsmLine {
    AsmLine::Segments(Vec::new())
  }

  pub fn is_valid(&self) -> bool {
    match self {
      AsmLine::Invalid => false,
      AsmLine::Segments(_) => true
    }
  }

  pub fn is_blank(&self) -> bool {
    match self {
      AsmLine::Segments(segments) => segments.is_empty(),
      AsmLine::Invalid => false
    }
  }
}

impl Display for AsmLine {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      AsmLine::Invalid => {
        write!(f, "<invalid>")
      }
      AsmLine::Segments(segments) => {
        let text = segments
          .iter()
          .map(|segment| format!("{}", segment))
          .collect::<Vec<String>>()
          .join(" | ");
        write!(f, "{}", text)
      }
    }
  }
}
