use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use intcode::arcade::{self, Cabinet, Tile};
use intcode::logger::{self, Logger};
use intcode::{parse_program, patch, Channel, Machine, Word};

static LOGGER: Logger = Logger;

#[derive(Parser)]
#[clap(version, about = "Runs intcode programs")]
struct Args {
  /// Log more; repeat for more detail
  #[clap(short, long, global = true, parse(from_occurrences))]
  verbose: u64,

  #[clap(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Runs a program to completion, then prints its output and memory cell 0
  Run {
    /// File holding the program as comma-separated integers
    #[clap(value_name = "FILE")]
    program: PathBuf,

    /// Words to queue on the input channel, comma-separated
    #[clap(short, long, value_name = "WORDS", allow_hyphen_values = true)]
    input: Option<String>,

    /// Replaces memory cell 1 before running
    #[clap(long, value_name = "NUM", requires = "verb")]
    noun: Option<Word>,

    /// Replaces memory cell 2 before running
    #[clap(long, value_name = "NUM", requires = "noun")]
    verb: Option<Word>,
  },

  /// Runs a game program in the arcade cabinet
  Arcade {
    /// File holding the game program as comma-separated integers
    #[clap(value_name = "FILE")]
    program: PathBuf,

    /// Plays for free, with the joystick following the ball, and prints the final score
    #[clap(long)]
    play: bool,

    /// Prints the final screen
    #[clap(long)]
    show: bool,
  },
}

fn load(path: &Path) -> Result<Vec<Word>, Box<dyn Error>> {
  let text = fs::read_to_string(path)?;
  Ok(parse_program(&text)?)
}

fn run(path: &Path, input: Option<&str>, noun_verb: Option<(Word, Word)>) -> Result<(), Box<dyn Error>> {
  let mut program = load(path)?;
  if let Some((noun, verb)) = noun_verb {
    program = patch(&program, noun, verb);
  }
  let input = match input {
    Some(text) => parse_program(text)?,
    None       => vec![],
  };

  let output      = Channel::new();
  let mut machine = Machine::new(&program, Channel::from(input), output.clone());
  machine.run()?;

  let words = output.drain();
  log::info!("Program wrote {} words.", words.len());
  println!(
    "Output: {}",
    words.iter().map(Word::to_string).collect::<Vec<String>>().join(",")
  );
  println!("Memory[0]: {}", machine.memory().read(0));
  Ok(())
}

fn run_arcade(path: &Path, play: bool, show: bool) -> Result<(), Box<dyn Error>> {
  let program = load(path)?;

  match play {

    true  => {
      let mut cabinet = Cabinet::new(&arcade::free_play(&program));
      let score = cabinet.play()?;
      if show {
        print!("{}", cabinet.screen());
      }
      match score {
        Some(score) => println!("Score: {}", score),
        None        => println!("The game never displayed a score."),
      }
    }

    false => {
      let mut cabinet = Cabinet::new(&program);
      let screen = cabinet.boot()?;
      for (tile, count) in screen.census() {
        log::info!("{:>6}: {}", tile, count);
      }
      if show {
        print!("{}", screen);
      }
      println!("Blocks: {}", screen.count(Tile::Block));
    }

  }
  Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
  let args = Args::parse();

  log::set_logger(&LOGGER)?;
  log::set_max_level(logger::level_for_verbosity(args.verbose));

  match args.command {
    Command::Run { program, input, noun, verb } => run(&program, input.as_deref(), noun.zip(verb)),
    Command::Arcade { program, play, show }     => run_arcade(&program, play, show),
  }
}
