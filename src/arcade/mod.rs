/*!
  An arcade cabinet around a game program. The program draws by writing `(x, y, tile)`
  triples to its output and reads the joystick from its input. The cabinet owns the
  screen; the machine never sees tiles or coordinates.
*/

mod joystick;
mod screen;

pub use joystick::{joystick, Tilt};
pub use screen::{Position, Screen, Tile, SCORE_POSITION};

use crate::bytecode::{Operation, Word};
use crate::errors::ArcadeError;
use crate::machine::Machine;

/// Returns a copy of a game program set to play without quarters.
pub fn free_play(program: &[Word]) -> Vec<Word> {
  let mut patched = program.to_vec();
  match patched.first_mut() {
    Some(first) => *first = 2,
    None        => patched.push(2),
  }
  patched
}

pub struct Cabinet {
  machine : Machine,
  screen  : Screen,
}

impl Cabinet {
  pub fn new(program: &[Word]) -> Cabinet {
    Cabinet {
      machine : Machine::from_program(program),
      screen  : Screen::new(),
    }
  }

  pub fn machine(&self) -> &Machine {
    &self.machine
  }

  pub fn screen(&self) -> &Screen {
    &self.screen
  }

  /// Draws every complete triple waiting in the machine's output.
  fn refresh(&mut self) -> Result<(), ArcadeError> {
    let output = self.machine.output().clone();
    while output.len() >= 3 {
      if let (Some(x), Some(y), Some(value)) = (output.pop(), output.pop(), output.pop()) {
        self.screen.draw(x, y, value)?;
      }
    }
    Ok(())
  }

  /// Runs the program to completion without touching the joystick, then draws what it
  /// produced.
  pub fn boot(&mut self) -> Result<&Screen, ArcadeError> {
    self.machine.run()?;
    self.refresh()?;
    Ok(&self.screen)
  }

  /**
    Plays the game one instruction at a time. Whenever the next instruction is about to
    read the joystick and nothing is queued, the joystick is tilted toward the ball as the
    screen currently shows it. Returns the last score displayed.
  */
  pub fn play(&mut self) -> Result<Option<Word>, ArcadeError> {
    while !self.machine.is_halted() {
      if self.machine.input().is_empty() && self.machine.next_operation()? == Operation::Input {
        let tilt = joystick(&self.screen);
        log::trace!("Joystick: {}", tilt);
        self.machine.input().push(tilt.word());
      }
      self.machine.step()?;
      self.refresh()?;
    }
    log::info!(
      "Game over after {} steps; {} blocks left.",
      self.machine.steps(),
      self.screen.count(Tile::Block)
    );
    Ok(self.screen.score())
  }
}
