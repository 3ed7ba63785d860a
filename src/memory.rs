//! The machine's memory store. Code and data live in the same cells.

use std::convert::TryFrom;
use std::fmt::{Display, Formatter};

use crate::address::AddressNumberType;
use crate::bytecode::Word;
use crate::errors::VmError;

/// Memory never grows past this many cells (512 MiB of words). Reads beyond it still
/// see zeros; writes beyond it fail with `AddressOutOfRange`.
pub const MAX_CELLS: usize = 1 << 26;

/**
  A conceptually infinite array of words. Cells past the stored extent read as zero; a
  write past the extent grows the store, zero-filling the gap. The stored length never
  shrinks.
*/
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Memory {
  cells: Vec<Word>,
}

impl Memory {
  pub fn new() -> Memory {
    Memory { cells: vec![] }
  }

  pub fn read(&self, address: AddressNumberType) -> Word {
    self.cells.get(address).copied().unwrap_or(0)
  }

  /**
    Makes room for a later write to `address` without changing what memory holds. Once
    this succeeds, `write` to the same address cannot fail.
  */
  pub fn reserve(&mut self, address: AddressNumberType) -> Result<(), VmError> {
    let out_of_range = || VmError::AddressOutOfRange {
      address: Word::try_from(address).unwrap_or(Word::MAX)
    };
    if address >= MAX_CELLS {
      return Err(out_of_range());
    }
    if address >= self.cells.len() {
      self.cells
          .try_reserve(address + 1 - self.cells.len())
          .map_err(|_| out_of_range())?;
    }
    Ok(())
  }

  /// Sets the word at the given address, dynamically growing the store if the address is
  /// past its end.
  pub fn write(&mut self, address: AddressNumberType, value: Word) -> Result<(), VmError> {
    self.reserve(address)?;
    if address >= self.cells.len() {
      self.cells.resize(address + 1, 0);
    }
    self.cells[address] = value;
    Ok(())
  }

  /// Length of the stored extent, not of the conceptual memory.
  pub fn len(&self) -> usize {
    self.cells.len()
  }

  pub fn is_empty(&self) -> bool {
    self.cells.is_empty()
  }

  pub fn as_slice(&self) -> &[Word] {
    &self.cells
  }
}

impl From<&[Word]> for Memory {
  fn from(program: &[Word]) -> Memory {
    Memory { cells: program.to_vec() }
  }
}

impl Display for Memory {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(
      f,
      "{}",
      self.cells
          .iter()
          .map(Word::to_string)
          .collect::<Vec<String>>()
          .join(",")
    )
  }
}
