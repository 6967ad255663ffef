/*!
  Parses editor text into `AsmLine`s, one result per input line. Parsing
  never fails as a whole: a bad token invalidates only its own line, so the
  editor can highlight it while the rest of the program keeps parsing.
*/

use std::str::FromStr;

use crate::word::Word;

use super::instruction::{AsmLine, Mnemonic, Op, Segment};

/// One `AsmLine` per input line, `AsmLine::Invalid` where parsing failed.
pub fn parse_assembly<S: AsRef<str>>(lines: &[S]) -> Vec<AsmLine> {
  lines.iter().map(|line| parse_line(line.as_ref())).collect()
}

fn parse_line(line: &str) -> AsmLine {
  let line = line.trim_end();
  if line.is_empty() {
    return AsmLine::blank();
  }

  // Mnemonics are case-insensitive.
  let line = line.to_lowercase();

  let mut segments = Vec::new();
  for segment_text in line.split('|') {
    match parse_segment(segment_text) {
      Some(segment) => segments.push(segment),
      None => return AsmLine::Invalid
    }
  }
  AsmLine::Segments(segments)
}

// A segment is exactly one or two single-space-separated tokens.
fn parse_segment(text: &str) -> Option<Segment> {
  let tokens: Vec<&str> = text.trim().split(' ').collect();
  match tokens.as_slice() {
    [first] => Some(Segment {
      first: parse_op(first)?,
      second: None
    }),
    [first, second] => Some(Segment {
      first: parse_op(first)?,
      second: Some(parse_op(second)?)
    }),
    _ => None
  }
}

fn parse_op(token: &str) -> Option<Op> {
  if let Some(literal) = Word::parse_literal(token) {
    return Some(Op::Literal(literal));
  }
  Mnemonic::from_str(token).ok().map(Op::Mnemonic)
}
