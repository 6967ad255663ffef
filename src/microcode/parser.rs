/*!
  Parses microcode text into `MicroInstruction`s, one result per input line.
  Like the assembly parser, a violation invalidates only its own line; the
  rest of the program keeps parsing so the editor can highlight exactly the
  broken lines.
*/

use std::str::FromStr;

use nom::character::complete::{digit1, one_of};
use nom::combinator::all_consuming;
use nom::sequence::pair;
use nom::IResult;

use super::instruction::{Bank, GateKind, MicroInstruction, RegisterRef};

/// One `MicroInstruction` per input line.
pub fn parse_microcode<S: AsRef<str>>(lines: &[S]) -> Vec<MicroInstruction> {
  lines.iter().map(|line| parse_line(line.as_ref())).collect()
}

// `dest = gate arg...`, with the argument count fixed by the gate's arity.
fn parse_line(line: &str) -> MicroInstruction {
  let line = line.trim_end();
  if line.is_empty() {
    return MicroInstruction::Blank;
  }

  let tokens: Vec<&str> = line.split(' ').collect();
  if tokens.len() < 2 || tokens[1] != "=" {
    return MicroInstruction::Invalid;
  }

  let dest = match register_ref(tokens[0]) {
    Some(reference) if reference.bank.is_writable() => reference,
    _ => return MicroInstruction::Invalid
  };

  let gate = match tokens.get(2).map(|name| GateKind::from_str(name)) {
    Some(Ok(gate)) => gate,
    _ => return MicroInstruction::Invalid
  };

  let arg_tokens = &tokens[3..];
  if arg_tokens.len() != gate.arity() {
    return MicroInstruction::Invalid;
  }

  let mut args = Vec::with_capacity(gate.arity());
  for token in arg_tokens {
    match register_ref(token) {
      Some(reference) => args.push(reference),
      None => return MicroInstruction::Invalid
    }
  }

  MicroInstruction::Gate { dest, gate, args }
}

fn register_name(text: &str) -> IResult<&str, (char, &str)> {
  all_consuming(pair(one_of("ciauoj"), digit1))(text)
}

/**
  Resolves a textual register name (one bank letter plus one or two digits)
  against its bank's width. The constant bank is numbered from zero; every
  other bank from one.
*/
fn register_ref(token: &str) -> Option<RegisterRef> {
  let (_, (letter, digits)) = register_name(token).ok()?;
  if digits.len() > 2 {
    return None;
  }

  let bank = Bank::from_letter(letter)?;
  let numeral: usize = digits.parse().ok()?;
  let index = match bank {
    Bank::Constant => numeral,
    _ => numeral.checked_sub(1)?
  };
  if index >= bank.width() {
    return None;
  }
  Some(RegisterRef { bank, index })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn reference(bank: Bank, index: usize) -> RegisterRef {
    RegisterRef { bank, index }
  }

  #[test]
  fn gate_lines_resolve_dest_gate_and_args() {
    let program = parse_microcode(&["o3 = and i3 i4"]);
    assert_eq!(
      program[0],
      MicroInstruction::Gate {
        dest: reference(Bank::Output, 2),
        gate: GateKind::And,
        args: vec![reference(Bank::Input, 2), reference(Bank::Input, 3)]
      }
    );
  }

  #[test]
  fn blank_lines_parse_to_blank() {
    let program = parse_microcode(&["", "  ", "u1 = buf c1"]);
    assert_eq!(program[0], MicroInstruction::Blank);
    assert_eq!(program[1], MicroInstruction::Blank);
    assert!(program[2].is_valid());
  }

  #[test]
  fn the_equals_sign_is_mandatory() {
    assert_eq!(parse_microcode(&["o1 buf i1"]), vec![MicroInstruction::Invalid]);
    assert_eq!(parse_microcode(&["o1"]), vec![MicroInstruction::Invalid]);
  }

  #[test]
  fn argument_count_must_match_the_gate_arity() {
    assert_eq!(parse_microcode(&["o1 = buf i1 i2"]), vec![MicroInstruction::Invalid]);
    assert_eq!(parse_microcode(&["o1 = and i1"]), vec![MicroInstruction::Invalid]);
    assert_eq!(parse_microcode(&["o1 = if i1 i2"]), vec![MicroInstruction::Invalid]);
    assert!(parse_microcode(&["o1 = if c1 i1 i2"])[0].is_valid());
  }

  #[test]
  fn only_user_output_and_jump_accept_writes() {
    assert!(parse_microcode(&["u6 = buf c1"])[0].is_valid());
    assert!(parse_microcode(&["j1 = buf c1"])[0].is_valid());
    assert_eq!(parse_microcode(&["i1 = buf c1"]), vec![MicroInstruction::Invalid]);
    assert_eq!(parse_microcode(&["a1 = buf c1"]), vec![MicroInstruction::Invalid]);
    assert_eq!(parse_microcode(&["c1 = buf c1"]), vec![MicroInstruction::Invalid]);
  }

  #[test]
  fn register_indices_validate_against_bank_widths() {
    assert!(parse_microcode(&["o1 = buf i12"])[0].is_valid());
    assert_eq!(parse_microcode(&["o1 = buf i13"]), vec![MicroInstruction::Invalid]);
    assert_eq!(parse_microcode(&["o1 = buf i0"]), vec![MicroInstruction::Invalid]);
    assert_eq!(parse_microcode(&["o7 = buf i1"]), vec![MicroInstruction::Invalid]);
    assert!(parse_microcode(&["o1 = buf c0"])[0].is_valid());
    assert_eq!(parse_microcode(&["o1 = buf c2"]), vec![MicroInstruction::Invalid]);
    assert_eq!(parse_microcode(&["o1 = buf a7"]), vec![MicroInstruction::Invalid]);
  }

  #[test]
  fn malformed_register_names_invalidate_the_line() {
    assert_eq!(parse_microcode(&["o1 = buf x1"]), vec![MicroInstruction::Invalid]);
    assert_eq!(parse_microcode(&["o1 = buf i"]), vec![MicroInstruction::Invalid]);
    assert_eq!(parse_microcode(&["o1 = buf i1x"]), vec![MicroInstruction::Invalid]);
    assert_eq!(parse_microcode(&["o1 = buf i123"]), vec![MicroInstruction::Invalid]);
    // Bank letters are lowercase; this is not the assembly layer.
    assert_eq!(parse_microcode(&["O1 = buf i1"]), vec![MicroInstruction::Invalid]);
  }

  #[test]
  fn one_bad_line_leaves_the_others_parsed() {
    let program = parse_microcode(&["o1 = buf i1", "o2 = bogus i1", "o3 = buf i2"]);
    assert!(program[0].is_valid());
    assert_eq!(program[1], MicroInstruction::Invalid);
    assert!(program[2].is_valid());
  }
}
