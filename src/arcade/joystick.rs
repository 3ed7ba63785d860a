//! Autoplay: keep the paddle under the ball.

use std::fmt::{Display, Formatter};

use super::screen::{Screen, Tile};
use crate::bytecode::Word;

/// A joystick position, as the game program reads it from its input.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum Tilt {
  Left,
  Neutral,
  Right,
}

impl Tilt {
  pub fn word(&self) -> Word {
    match self {
      Tilt::Left    => -1,
      Tilt::Neutral =>  0,
      Tilt::Right   =>  1,
    }
  }
}

impl From<Tilt> for Word {
  fn from(tilt: Tilt) -> Word {
    tilt.word()
  }
}

impl Display for Tilt {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.word())
  }
}

/// Tilts toward the ball. A paddle or ball that has not been drawn yet counts as being
/// in column 0.
pub fn joystick(screen: &Screen) -> Tilt {
  let column = |tile| screen.find(tile).map(|(x, _)| x).unwrap_or(0);
  let paddle = column(Tile::Paddle);
  let ball   = column(Tile::Ball);

  if paddle < ball {
    Tilt::Right
  } else if paddle > ball {
    Tilt::Left
  } else {
    Tilt::Neutral
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  fn screen_with(paddle: Option<Word>, ball: Option<Word>) -> Screen {
    let mut screen = Screen::new();
    if let Some(x) = paddle {
      screen.draw(x, 20, Tile::Paddle as Word).unwrap();
    }
    if let Some(x) = ball {
      screen.draw(x, 10, Tile::Ball as Word).unwrap();
    }
    screen
  }

  #[test]
  fn follows_the_ball(){
    assert_eq!(joystick(&screen_with(Some(3), Some(8))), Tilt::Right);
    assert_eq!(joystick(&screen_with(Some(8), Some(3))), Tilt::Left);
    assert_eq!(joystick(&screen_with(Some(5), Some(5))), Tilt::Neutral);
  }

  #[test]
  fn missing_tiles_count_as_column_zero(){
    assert_eq!(joystick(&Screen::new()), Tilt::Neutral);
    assert_eq!(joystick(&screen_with(None, Some(4))), Tilt::Right);
    assert_eq!(joystick(&screen_with(Some(4), None)), Tilt::Left);
  }

  #[test]
  fn tilt_words(){
    assert_eq!(Word::from(Tilt::Left), -1);
    assert_eq!(Tilt::Neutral.word(), 0);
    assert_eq!(format!("{}", Tilt::Right), "1");
  }
}
