use std::fmt::{Display, Formatter};

use strum_macros::{Display as StrumDisplay, EnumString, IntoStaticStr};

/**
  Boolean gates of the microcode layer. Each instruction wires one gate from
  argument bits to a destination bit; a program is a flat list of such
  wirings with no control flow.
*/
#[derive(
  StrumDisplay, IntoStaticStr, EnumString,
  Clone,        Copy,          Eq, PartialEq, Debug, Hash
)]
pub enum GateKind {
  #[strum(serialize = "buf")]  Buf,
  #[strum(serialize = "not")]  Not,
  #[strum(serialize = "and")]  And,
  #[strum(serialize = "or")]   Or,
  #[strum(serialize = "nand")] Nand,
  #[strum(serialize = "nor")]  Nor,
  #[strum(serialize = "xor")]  Xor,
  #[strum(serialize = "xnor")] Xnor,
  #[strum(serialize = "if")]   If,
}

impl GateKind {
  /// Number of argument bits the gate reads.
  pub fn arity(self) -> usize {
    match self {
      GateKind::Buf | GateKind::Not => 1,
      GateKind::If => 3,
      _ => 2
    }
  }

  /// Truth table of the gate. `args` must hold exactly `arity()` values;
  /// the parser guarantees this for every instruction it accepts.
  pub fn apply(self, args: &[bool]) -> bool {
    match self {
      GateKind::Buf  => args[0],
      GateKind::Not  => !args[0],
      GateKind::And  => args[0] && args[1],
      GateKind::Or   => args[0] || args[1],
      GateKind::Nand => !(args[0] && args[1]),
      GateKind::Nor  => !(args[0] || args[1]),
      GateKind::Xor  => args[0] ^ args[1],
      GateKind::Xnor => !(args[0] ^ args[1]),
      GateKind::If   => {
        match args[0] {
          true  => args[1],
          false => args[2]
        }
      }
    }
  }
}

/// The six register groups visible to a microcode program.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum Bank {
  Constant,
  Input,
  Address,
  User,
  Output,
  Jump
}

impl Bank {
  pub fn from_letter(letter: char) -> Option<Bank> {
    match letter {
      'c' => Some(Bank::Constant),
      'i' => Some(Bank::Input),
      'a' => Some(Bank::Address),
      'u' => Some(Bank::User),
      'o' => Some(Bank::Output),
      'j' => Some(Bank::Jump),
      _   => None
    }
  }

  /// Bank letter used in source text.
  pub fn letter(self) -> char {
    match self {
      Bank::Constant => 'c',
      Bank::Input    => 'i',
      Bank::Address  => 'a',
      Bank::User     => 'u',
      Bank::Output   => 'o',
      Bank::Jump     => 'j'
    }
  }

  /// Number of bits in the bank.
  pub fn width(self) -> usize {
    match self {
      Bank::Constant => 2,
      Bank::Input    => 12,
      _              => 6
    }
  }

  /// Only `User`, `Output`, and `Jump` accept writes; naming any other bank
  /// as a destination is a parse error.
  pub fn is_writable(self) -> bool {
    match self {
      Bank::User | Bank::Output | Bank::Jump => true,
      _ => false
    }
  }
}

/**
  A parse-time-resolved reference to one bit of one bank.

  Indices are zero-based internally. In source text the constant bank is
  numbered from zero (`c0` is false, `c1` is true) while every other bank
  is numbered from one (`i1`..`i12`, `u1`..`u6`, ...).
*/
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub struct RegisterRef {
  pub bank: Bank,
  pub index: usize
}

impl Display for RegisterRef {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let numeral = match self.bank {
      Bank::Constant => self.index,
      _ => self.index + 1
    };
    write!(f, "{}{}", self.bank.letter(), numeral)
  }
}

/// One parsed microcode line.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum MicroInstruction {
  /// The line failed to parse; executing it is an `InvalidProgramError`.
  Invalid,
  /// An empty line, executed as a no-op.
  Blank,
  Gate {
    dest: RegisterRef,
    gate: GateKind,
    args: Vec<RegisterRef>
  }
}

impl MicroInstruction {
  pub fn is_valid(&self) -> bool {
    match self {
      MicroInstruction::Invalid => false,
      _ => true
    }
  }
}

impl Display for MicroInstruction {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      MicroInstruction::Invalid => {
        write!(f, "<invalid>")
      }
      MicroInstruction::Blank => {
        Ok(())
      }
      MicroInstruction::Gate { dest, gate, args } => {
        write!(f, "{} = {}", dest, gate)?;
        for argument in args {
          write!(f, " {}", argument)?;
        }
        Ok(())
      }
    }
  }
}
