use ucasm::{parse_assembly, parse_microcode, AssemblyMachine, MicrocodeMachine, Word};

fn main() {
  let source = [
    "1 1 | add | push",
    "pop 2 | add | jmp",
    "3 | push",
    "5 | push",
  ];

  println!("Assembly program:");
  let program = parse_assembly(&source);
  for (number, line) in program.iter().enumerate() {
    println!("{:>2}: {}", number, line);
  }

  let ucode = [
    MicrocodeMachine::new(vec![]),
    MicrocodeMachine::new(vec![]),
    MicrocodeMachine::new(vec![]),
  ];
  let mut machine = AssemblyMachine::new(program, ucode, source.len());
  match machine.run() {
    Ok(()) => println!("\n{}", machine),
    Err(error) => eprintln!("{}", error)
  }

  let ucode_source = [
    "o1 = buf i10",
    "o2 = buf i2",
    "o3 = and i3 i4",
  ];

  println!("Microcode program:");
  let ucode_program = parse_microcode(&ucode_source);
  for (number, instruction) in ucode_program.iter().enumerate() {
    println!("{:>2}: {}", number, instruction);
  }

  let mut preview = MicrocodeMachine::new(ucode_program);
  let input = Word::new(40).bits();
  match preview.run(input, input, input) {
    Ok(_) => println!("\n{}", preview),
    Err(error) => eprintln!("{}", error)
  }
}
