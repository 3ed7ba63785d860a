/*!

  An intcode program is a flat array of signed words. Code and data share the same
  memory, so an instruction is just a word at the instruction pointer followed by its
  operand words. The instruction word packs the opcode and the addressing mode of every
  operand as decimal digits:

    ABCDE
     1002

    DE: two-digit opcode       (02 = mul)
     C: mode of 1st operand    (0 = positional)
     B: mode of 2nd operand    (1 = immediate)
     A: mode of 3rd operand    (0 = positional, leading zero omitted)

  Operand words are kept raw in memory and only turned into values or addresses when
  the instruction executes, since an earlier instruction may have rewritten them.

*/

mod binary;
mod text;

pub use binary::{decode, encode, DecodedInstruction, Word, MAX_OPERANDS};
pub use text::parse_program;

use std::convert::TryFrom;
use std::fmt::{Display, Formatter};

use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum_macros::Display as StrumDisplay;

use crate::address::AddressNumberType;
use crate::errors::VmError;

/**
  Operations of the virtual machine. The discriminant is the opcode as it appears in the
  low two decimal digits of an instruction word, so opcodes are not consecutive.
*/
#[derive(
StrumDisplay, TryFromPrimitive, IntoPrimitive,
Clone,        Copy,             Eq, PartialEq,  Debug,  Hash
)]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum Operation {
  Add          =  1, // add( a, b, dst )
  Mul          =  2, // mul( a, b, dst )
  Input        =  3, // input( dst )
  Output       =  4, // output( a )
  JumpIfTrue   =  5, // jump_if_true( a, target )
  JumpIfFalse  =  6, // jump_if_false( a, target )
  LessThan     =  7, // less_than( a, b, dst )
  Equals       =  8, // equals( a, b, dst )
  AdjustBase   =  9, // adjust_base( a )
  Halt         = 99, // halt
}

impl Operation {
  pub fn code(&self) -> u8 {
    Into::<u8>::into(*self)
  }

  /// Number of operand words following the instruction word.
  pub fn arity(&self) -> usize {
    match self {
      | Operation::Add
      | Operation::Mul
      | Operation::LessThan
      | Operation::Equals => 3,

      | Operation::JumpIfTrue
      | Operation::JumpIfFalse => 2,

      | Operation::Input
      | Operation::Output
      | Operation::AdjustBase => 1,

      Operation::Halt => 0,
    }
  }

  /// Size in words of the whole instruction, i.e. how far a non-jumping instruction
  /// advances the instruction pointer.
  pub fn width(&self) -> usize {
    self.arity() + 1
  }

  /// Looks up the operation for a decoded opcode. `address` is only used for the error.
  pub fn from_opcode(opcode: Word, address: AddressNumberType) -> Result<Operation, VmError> {
    u8::try_from(opcode)
      .ok()
      .and_then(|code| Operation::try_from(code).ok())
      .ok_or(VmError::UnknownOpcode { opcode, address })
  }
}

/// Addressing mode of a single operand.
#[derive(
StrumDisplay, TryFromPrimitive, IntoPrimitive,
Clone,        Copy,             Eq, PartialEq,  Debug,  Hash
)]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum Mode {
  /// The operand is the address of the value.
  Positional = 0,
  /// The operand is the value.
  Immediate  = 1,
  /// The operand is an offset from the relative base.
  Relative   = 2,
}

impl Mode {
  /// Prefix used when printing an operand in this mode.
  pub fn sigil(&self) -> char {
    match self {
      Mode::Positional => '@',
      Mode::Immediate  => '#',
      Mode::Relative   => '~',
    }
  }

  pub fn from_digit(digit: Word, address: AddressNumberType) -> Result<Mode, VmError> {
    u8::try_from(digit)
      .ok()
      .and_then(|code| Mode::try_from(code).ok())
      .ok_or(VmError::UnknownMode { mode: digit, address })
  }
}

/**
  A fully decoded instruction: the operation, the mode of each operand it uses, and the
  raw operand words as they were in memory when it was decoded. Only used for display;
  execution resolves operands straight from memory.
*/
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Instruction {
  pub operation : Operation,
  pub operands  : Vec<(Mode, Word)>,
}

impl Display for Instruction {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.operation)?;
    for (i, (mode, raw)) in self.operands.iter().enumerate() {
      let separator = if i == 0 { " " } else { ", " };
      write!(f, "{}{}{}", separator, mode.sigil(), raw)?;
    }
    Ok(())
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn opcode_lookup(){
    assert_eq!(Operation::from_opcode(1, 0), Ok(Operation::Add));
    assert_eq!(Operation::from_opcode(9, 0), Ok(Operation::AdjustBase));
    assert_eq!(Operation::from_opcode(99, 0), Ok(Operation::Halt));
    assert_eq!(
      Operation::from_opcode(42, 7),
      Err(VmError::UnknownOpcode { opcode: 42, address: 7 })
    );
    assert_eq!(
      Operation::from_opcode(0, 3),
      Err(VmError::UnknownOpcode { opcode: 0, address: 3 })
    );
  }

  #[test]
  fn arity_matches_width(){
    assert_eq!(Operation::Add.width(), 4);
    assert_eq!(Operation::Input.width(), 2);
    assert_eq!(Operation::JumpIfFalse.width(), 3);
    assert_eq!(Operation::Halt.arity(), 0);
  }

  #[test]
  fn mode_lookup(){
    assert_eq!(Mode::from_digit(0, 0), Ok(Mode::Positional));
    assert_eq!(Mode::from_digit(2, 0), Ok(Mode::Relative));
    assert_eq!(Mode::from_digit(3, 5), Err(VmError::UnknownMode { mode: 3, address: 5 }));
  }

  #[test]
  fn display_instruction(){
    let instruction = Instruction {
      operation: Operation::Mul,
      operands: vec![(Mode::Positional, 4), (Mode::Immediate, 3), (Mode::Relative, -4)]
    };
    assert_eq!(format!("{}", instruction), "mul @4, #3, ~-4");
    assert_eq!(format!("{}", Operation::JumpIfTrue), "jump_if_true");
  }
}
