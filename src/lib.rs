/*!
  An intcode virtual machine.

  A program is a flat array of signed words. The machine fetches the instruction word at
  its instruction pointer, splits it into an opcode and operand modes, resolves the
  operands against memory and the relative base, and executes. It talks to the outside
  world only through two FIFO channels of words.

  ```text
  program text -> [`parse_program`] -> words -> [`Machine`] <-> input/output `Channel`s
  ```

  The `arcade` module drives a game program one instruction at a time, drawing its output
  and feeding it joystick input.
*/

#[macro_use] extern crate prettytable;
#[macro_use] extern crate lazy_static;

pub mod address;
pub mod arcade;
pub mod bytecode;
pub mod channel;
pub mod errors;
pub mod logger;
pub mod machine;
pub mod memory;

pub use bytecode::{decode, parse_program, Word};
pub use channel::Channel;
pub use errors::{ArcadeError, ProgramError, VmError};
pub use machine::{patch, Machine, State};
pub use memory::Memory;
