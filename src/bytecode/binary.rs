/*!
  This module is responsible for splitting an instruction word into its opcode and
  operand modes, and for building instruction words from those parts.
*/

use super::{Mode, Operation};

// Intcode programs routinely produce values well beyond 32 bits.
pub type Word = i64;

/// The most operands any operation takes, and so the number of mode digits decoded.
pub const MAX_OPERANDS: usize = 3;

/// The raw decimal fields of an instruction word. Nothing here is validated yet; see
/// `Operation::from_opcode` and `Mode::from_digit`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct DecodedInstruction {
  pub opcode : Word,
  pub modes  : [Word; MAX_OPERANDS],
}

/**
  Splits an instruction word into `(opcode, mode1, mode2, mode3)`. Total over all words:
  euclidean division keeps every field in range even for negative words, so a garbage
  word decodes to a garbage opcode rather than a panic.
*/
pub fn decode(word: Word) -> DecodedInstruction {
  let digit = |place: Word| word.div_euclid(place).rem_euclid(10);
  DecodedInstruction {
    opcode : word.rem_euclid(100),
    modes  : [digit(100), digit(1_000), digit(10_000)],
  }
}

/**
  Builds an instruction word. Modes past the operation's arity are ignored. It is the
  caller's responsibility to give a mode for every operand the operation uses; missing
  modes are positional.
*/
pub fn encode(operation: Operation, modes: &[Mode]) -> Word {
  let mut place: Word = 100;
  let mut word = operation.code() as Word;
  for mode in modes.iter().take(operation.arity()) {
    word += Into::<u8>::into(*mode) as Word * place;
    place *= 10;
  }
  word
}
