//! Execution-time precondition errors. Parse failures are not errors; they
//! are data (`AsmLine::Invalid`, `MicroInstruction::Invalid`) so an editor
//! can keep running while lines are broken.

use std::error::Error;
use std::fmt::{Display, Formatter};

/**
  Raised when `step` or `run` reaches a line that failed to parse. Reaching
  one at execution time means the caller skipped validation; the run must be
  abandoned and the program validated before executing again.
*/
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct InvalidProgramError {
  /// Zero-based index of the offending line within its own program.
  pub line: usize
}

impl Display for InvalidProgramError {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "cannot execute line {}: it failed to parse", self.line)
  }
}

impl Error for InvalidProgramError {}
