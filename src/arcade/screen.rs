//! The arcade screen: the tiles a game program has drawn, and its score display.

use std::collections::HashMap;
use std::convert::TryFrom;
use std::fmt::{Display, Formatter};

use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum::IntoEnumIterator;
use strum_macros::{Display as StrumDisplay, EnumIter};

use crate::bytecode::Word;
use crate::errors::ArcadeError;

pub type Position = (Word, Word);

/// Drawing at this position updates the score display instead of a tile.
pub const SCORE_POSITION: Position = (-1, 0);

#[derive(
StrumDisplay, EnumIter, TryFromPrimitive, IntoPrimitive,
Clone,        Copy,     Eq, PartialEq,    Debug,         Hash
)]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum Tile {
  Empty  = 0,
  Wall   = 1,
  Block  = 2,
  Paddle = 3, // horizontal
  Ball   = 4,
}

impl Tile {
  pub fn glyph(&self) -> char {
    match self {
      Tile::Empty  => ' ',
      Tile::Wall   => '#',
      Tile::Block  => '=',
      Tile::Paddle => 'T',
      Tile::Ball   => '*',
    }
  }

  pub fn from_code(code: Word) -> Result<Tile, ArcadeError> {
    u8::try_from(code)
      .ok()
      .and_then(|code| Tile::try_from(code).ok())
      .ok_or(ArcadeError::UnknownTile { code })
  }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Screen {
  tiles: HashMap<Position, Tile>,
  score: Option<Word>,
}

impl Screen {
  pub fn new() -> Screen {
    Screen::default()
  }

  /// Applies one `(x, y, value)` draw command.
  pub fn draw(&mut self, x: Word, y: Word, value: Word) -> Result<(), ArcadeError> {
    if (x, y) == SCORE_POSITION {
      log::debug!("Score: {}", value);
      self.score = Some(value);
    } else {
      self.tiles.insert((x, y), Tile::from_code(value)?);
    }
    Ok(())
  }

  pub fn score(&self) -> Option<Word> {
    self.score
  }

  pub fn tile_at(&self, position: Position) -> Tile {
    self.tiles.get(&position).copied().unwrap_or(Tile::Empty)
  }

  pub fn count(&self, tile: Tile) -> usize {
    self.tiles.values().filter(|&&t| t == tile).count()
  }

  /// How many of each kind of tile are on screen, in tile-code order.
  pub fn census(&self) -> Vec<(Tile, usize)> {
    Tile::iter().map(|tile| (tile, self.count(tile))).collect()
  }

  /// Position of some tile of the given kind. Meant for tiles that appear once.
  pub fn find(&self, tile: Tile) -> Option<Position> {
    self.tiles
        .iter()
        .find(|(_, t)| **t == tile)
        .map(|(&position, _)| position)
  }
}

impl Display for Screen {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    if let Some(score) = self.score {
      writeln!(f, "Score: {}", score)?;
    }
    if self.tiles.is_empty() {
      return Ok(());
    }

    let x_max = self.tiles.keys().map(|&(x, _)| x).max().unwrap_or(0);
    let x_min = self.tiles.keys().map(|&(x, _)| x).min().unwrap_or(0);
    let y_max = self.tiles.keys().map(|&(_, y)| y).max().unwrap_or(0);
    let y_min = self.tiles.keys().map(|&(_, y)| y).min().unwrap_or(0);

    for y in y_min..=y_max {
      let line: String = (x_min..=x_max).map(|x| self.tile_at((x, y)).glyph()).collect();
      writeln!(f, "{}", line.trim_end())?;
    }
    Ok(())
  }
}
