//! Addresses into machine memory, and the conversions from program words to addresses.

use std::convert::TryFrom;

use crate::bytecode::Word;
use crate::errors::VmError;

// `AddressNumberType` is `usize`, as it is naturally an index into a memory store.
pub type AddressNumberType = usize;

/// Interprets a program word as an address. Negative words have no cell to name.
pub fn to_address(word: Word) -> Result<AddressNumberType, VmError> {
  if word < 0 {
    return Err(VmError::NegativeAddress { address: word });
  }
  // Only fails where `usize` is narrower than a word.
  AddressNumberType::try_from(word).map_err(|_| VmError::AddressOutOfRange { address: word })
}

/// Computes `base + offset` as an address, as relative-mode operands do.
pub fn offset_address(base: Word, offset: Word, instruction: AddressNumberType)
  -> Result<AddressNumberType, VmError>
{
  let word = base
    .checked_add(offset)
    .ok_or(VmError::ArithmeticOverflow { address: instruction })?;
  to_address(word)
}
