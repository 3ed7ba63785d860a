use thiserror::Error;

use crate::address::AddressNumberType;
use crate::bytecode::Word;

/// Faults raised while executing a program. Every one of them is fatal to the step that
/// raised it; the machine is deterministic, so retrying without changing the program or
/// its input would fault the same way.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum VmError {
  #[error("unknown opcode {opcode} at address {address}")]
  UnknownOpcode { opcode: Word, address: AddressNumberType },

  #[error("unknown addressing mode {mode} in instruction at address {address}")]
  UnknownMode { mode: Word, address: AddressNumberType },

  /// The input instruction at `address` found the input channel empty. The instruction
  /// has not executed; supplying input and stepping again resumes the program.
  #[error("input instruction at address {address} found no input")]
  InputStarved { address: AddressNumberType },

  #[error("negative address {address}")]
  NegativeAddress { address: Word },

  /// The address is past the largest memory a machine may grow to, or the host could not
  /// supply the memory.
  #[error("address {address} is out of range")]
  AddressOutOfRange { address: Word },

  #[error("arithmetic overflow in instruction at address {address}")]
  ArithmeticOverflow { address: AddressNumberType },

  #[error("machine has already halted")]
  AlreadyHalted,
}

/// Failures turning program text into words.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum ProgramError {
  #[error("expected a comma-separated list of integers; stopped at byte {offset}")]
  Syntax { offset: usize },

  #[error("program is empty")]
  Empty,
}

/// Failures while driving a game program.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum ArcadeError {
  #[error("unknown tile code {code}")]
  UnknownTile { code: Word },

  #[error(transparent)]
  Vm(#[from] VmError),
}
