//! The intcode virtual machine: operand resolution, the instruction set, and the
//! fetch-decode-execute loop.

use std::fmt::{Display, Formatter};

use prettytable::{format as TableFormat, Table};
use strum_macros::Display as StrumDisplay;

use crate::address::*;
use crate::bytecode::*;
use crate::channel::Channel;
use crate::errors::VmError;
use crate::memory::Memory;

/// Number of memory cells shown on either side of the instruction pointer when a machine
/// is displayed.
const DISPLAY_WINDOW: usize = 6;

/// `Running` until a halt instruction executes; `Halted` is terminal.
#[derive(StrumDisplay, Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum State {
  Running,
  Halted
}

pub struct Machine {

  // Flags
  state: State,

  // Memory Store
  memory: Memory, // Code and data

  // Registers //
  ip            : AddressNumberType, // Instruction pointer, a cursor
  relative_base : Word,              // Offset for relative-mode operands

  // Conduits
  input  : Channel,
  output : Channel,

  /// Number of instructions executed so far.
  steps: u64,

}

impl Machine {

  // region Display methods

  fn make_memory_table(memory: &Memory, highlight: AddressNumberType) -> Table {
    let mut table = Table::new();

    table.set_format(*TABLE_DISPLAY_FORMAT);
    table.set_titles(row![ubr->"Address", ubl->"Contents"]);

    let start = highlight.saturating_sub(DISPLAY_WINDOW);
    let end   = (highlight + DISPLAY_WINDOW).min(memory.len().max(highlight + 1));

    for address in start..end {
      match address == highlight {

        true  => {
          table.add_row(
            row![r->format!("* --> M[{}] =", address), format!("{}", memory.read(address))]
          );
        }

        false => {
          table.add_row(
            row![r->format!("M[{}] =", address), format!("{}", memory.read(address))]
          );
        }

      } // end match on highlight
    } // end for
    table
  }

  fn make_register_table(&self) -> Table {
    let mut table = Table::new();

    table.set_format(*TABLE_DISPLAY_FORMAT);
    table.set_titles(row![ubr->"Register", ubl->"Contents"]);
    table.add_row(row![r->"ip =",            self.ip]);
    table.add_row(row![r->"relative base =", self.relative_base]);
    table.add_row(row![r->"steps =",         self.steps]);
    table.add_row(row![r->"input =",         self.input]);
    table.add_row(row![r->"output =",        self.output]);
    table
  }

  // endregion

  /// Creates a machine running its own copy of `program`, reading from `input` and
  /// writing to `output`.
  pub fn new(program: &[Word], input: Channel, output: Channel) -> Machine {
    Machine {
      state         :  State::Running,
      memory        :  Memory::from(program),
      ip            :  0,
      relative_base :  0,
      input,
      output,
      steps         :  0,
    }
  }

  /// Creates a machine with fresh, empty channels.
  pub fn from_program(program: &[Word]) -> Machine {
    Machine::new(program, Channel::new(), Channel::new())
  }

  // region Accessors

  pub fn memory(&self) -> &Memory {
    &self.memory
  }

  pub fn ip(&self) -> AddressNumberType {
    self.ip
  }

  pub fn relative_base(&self) -> Word {
    self.relative_base
  }

  pub fn state(&self) -> State {
    self.state
  }

  pub fn is_halted(&self) -> bool {
    self.state == State::Halted
  }

  pub fn steps(&self) -> u64 {
    self.steps
  }

  pub fn input(&self) -> &Channel {
    &self.input
  }

  pub fn output(&self) -> &Channel {
    &self.output
  }

  // endregion

  // region Operand resolution

  /// Address of the `n`th operand word of the current instruction.
  fn slot(&self, n: usize) -> AddressNumberType {
    self.ip + 1 + n
  }

  /**
    Resolves the operand stored at `slot` to the address it designates:

      positional: the operand word is the address
      immediate:  the operand slot itself, so a write lands on the operand word
      relative:   the operand word is an offset from the relative base
  */
  pub fn address_of(&self, slot: AddressNumberType, mode: Mode) -> Result<AddressNumberType, VmError> {
    match mode {
      Mode::Positional => to_address(self.memory.read(slot)),
      Mode::Immediate  => Ok(slot),
      Mode::Relative   => offset_address(self.relative_base, self.memory.read(slot), self.ip),
    }
  }

  /// Resolves the operand stored at `slot` to a value. An immediate operand is its own
  /// value.
  pub fn value_of(&self, slot: AddressNumberType, mode: Mode) -> Result<Word, VmError> {
    Ok(self.memory.read(self.address_of(slot, mode)?))
  }

  fn operand_value(&self, decoded: &DecodedInstruction, n: usize) -> Result<Word, VmError> {
    self.value_of(self.slot(n), Mode::from_digit(decoded.modes[n], self.ip)?)
  }

  fn operand_address(&self, decoded: &DecodedInstruction, n: usize) -> Result<AddressNumberType, VmError> {
    self.address_of(self.slot(n), Mode::from_digit(decoded.modes[n], self.ip)?)
  }

  // endregion

  /// The operation at the instruction pointer, without executing it.
  pub fn next_operation(&self) -> Result<Operation, VmError> {
    Operation::from_opcode(decode(self.memory.read(self.ip)).opcode, self.ip)
  }

  /// The instruction at the instruction pointer with its raw operands, without executing it.
  pub fn next_instruction(&self) -> Result<Instruction, VmError> {
    let decoded   = decode(self.memory.read(self.ip));
    let operation = Operation::from_opcode(decoded.opcode, self.ip)?;
    let operands  =
      (0..operation.arity())
        .map(|n| -> Result<(Mode, Word), VmError> {
          Ok((Mode::from_digit(decoded.modes[n], self.ip)?, self.memory.read(self.slot(n))))
        })
        .collect::<Result<Vec<(Mode, Word)>, VmError>>()?;
    Ok(Instruction { operation, operands })
  }

  /**
    Executes exactly one instruction and returns the resulting state.

    A faulting instruction has no effect: memory, registers, and channels are as they were
    before the call. In particular an input instruction that finds the input channel empty
    fails with `InputStarved` and can be retried once input has been pushed.
  */
  pub fn step(&mut self) -> Result<State, VmError> {
    if self.is_halted() {
      return Err(VmError::AlreadyHalted);
    }

    let ip        = self.ip;
    let decoded   = decode(self.memory.read(ip));
    let operation = Operation::from_opcode(decoded.opcode, ip)?;

    if log::log_enabled!(log::Level::Trace) {
      if let Ok(instruction) = self.next_instruction() {
        log::trace!("{:>6}: {}", ip, instruction);
      }
    }

    let mut next_ip = ip + operation.width();

    match operation {

      Operation::Add => {
        let a   = self.operand_value(&decoded, 0)?;
        let b   = self.operand_value(&decoded, 1)?;
        let dst = self.operand_address(&decoded, 2)?;
        let sum = a.checked_add(b).ok_or(VmError::ArithmeticOverflow { address: ip })?;
        self.memory.write(dst, sum)?;
      }

      Operation::Mul => {
        let a       = self.operand_value(&decoded, 0)?;
        let b       = self.operand_value(&decoded, 1)?;
        let dst     = self.operand_address(&decoded, 2)?;
        let product = a.checked_mul(b).ok_or(VmError::ArithmeticOverflow { address: ip })?;
        self.memory.write(dst, product)?;
      }

      Operation::Input => {
        let dst = self.operand_address(&decoded, 0)?;
        // Room first, so a failed write never consumes the input.
        self.memory.reserve(dst)?;
        match self.input.pop() {

          Some(value) => self.memory.write(dst, value)?,

          None => {
            log::debug!("Input instruction at {} found the input channel empty.", ip);
            return Err(VmError::InputStarved { address: ip });
          }

        }
      }

      Operation::Output => {
        let value = self.operand_value(&decoded, 0)?;
        self.output.push(value);
      }

      | Operation::JumpIfTrue
      | Operation::JumpIfFalse => {
        let condition = self.operand_value(&decoded, 0)?;
        let target    = self.operand_value(&decoded, 1)?;
        if (condition != 0) == (operation == Operation::JumpIfTrue) {
          next_ip = to_address(target)?;
        }
      }

      Operation::LessThan => {
        let a   = self.operand_value(&decoded, 0)?;
        let b   = self.operand_value(&decoded, 1)?;
        let dst = self.operand_address(&decoded, 2)?;
        self.memory.write(dst, (a < b) as Word)?;
      }

      Operation::Equals => {
        let a   = self.operand_value(&decoded, 0)?;
        let b   = self.operand_value(&decoded, 1)?;
        let dst = self.operand_address(&decoded, 2)?;
        self.memory.write(dst, (a == b) as Word)?;
      }

      Operation::AdjustBase => {
        let offset = self.operand_value(&decoded, 0)?;
        self.relative_base =
          self.relative_base
              .checked_add(offset)
              .ok_or(VmError::ArithmeticOverflow { address: ip })?;
      }

      Operation::Halt => {
        self.state = State::Halted;
      }

    } // end match on operation

    self.ip = next_ip;
    self.steps += 1;

    #[cfg(feature = "trace_computation")] log::trace!("\n{}", self);

    if self.is_halted() {
      log::debug!("Halted at address {} after {} steps.", ip, self.steps);
    }

    Ok(self.state)
  }

  /// Steps until the machine halts. Input must already be in the input channel.
  pub fn run(&mut self) -> Result<(), VmError> {
    while !self.is_halted() {
      self.step()?;
    }
    Ok(())
  }

}

/// Returns a copy of `program` with its noun (cell 1) and verb (cell 2) replaced.
pub fn patch(program: &[Word], noun: Word, verb: Word) -> Vec<Word> {
  let mut patched = program.to_vec();
  if patched.len() < 3 {
    patched.resize(3, 0);
  }
  patched[1] = noun;
  patched[2] = verb;
  patched
}


lazy_static! {
  static ref TABLE_DISPLAY_FORMAT: TableFormat::TableFormat =
    TableFormat::FormatBuilder::new()
      .column_separator('│')
      .borders(' ')
      .separator(
        TableFormat::LinePosition::Title,
        TableFormat::LineSeparator::new('─', '┼', ' ', ' ')
      )
      .separator(
        TableFormat::LinePosition::Bottom,
        TableFormat::LineSeparator::new('─', '┴', ' ', ' ')
      )
      .padding(1, 1)
      .build();
}

impl Display for Machine {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let m_table = Machine::make_memory_table(&self.memory, self.ip);
    let r_table = self.make_register_table();

    let mut combined_table = table!([m_table, r_table]);

    combined_table.set_titles(row![ub->"Memory", ub->"Registers"]);
    combined_table.set_format(*TABLE_DISPLAY_FORMAT);

    let next = match self.next_instruction() {
      Ok(instruction) if !self.is_halted() => format!("{}", instruction),
      _                                     => "-".to_string()
    };

    write!(f, "State: {}\tNext: {}\n{}", self.state, next, combined_table)
  }
}
