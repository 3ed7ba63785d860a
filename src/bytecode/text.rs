/*!
  The textual form of a program is a comma-separated list of signed decimal words,
  usually on a single line. This module parses it with `nom`.
*/

use nom::{
  IResult,
  character::complete::{
    char as one_char,
    digit1,
    multispace0
  },
  combinator::{all_consuming, map_res, opt, recognize},
  multi::separated_list,
  sequence::{delimited, pair},
};

use super::Word;
use crate::errors::ProgramError;

fn word_p(input: &str) -> IResult<&str, Word> {
  map_res(
    recognize(pair(opt(one_char('-')), digit1)),
    |text: &str| text.parse::<Word>()
  )(input)
}

fn program_p(input: &str) -> IResult<&str, Vec<Word>> {
  delimited(
    multispace0,
    separated_list(
      delimited(multispace0, one_char(','), multispace0),
      word_p
    ),
    multispace0
  )(input)
}

/// Parses program text into its words. Fails on anything but words, commas, and
/// whitespace, and on a program with no words at all.
pub fn parse_program(text: &str) -> Result<Vec<Word>, ProgramError> {
  match all_consuming(program_p)(text) {

    Ok((_rest, words)) if words.is_empty() => Err(ProgramError::Empty),

    Ok((_rest, words)) => {
      log::debug!("Parsed a program of {} words.", words.len());
      Ok(words)
    }

    Err(nom::Err::Error((rest, _kind))) | Err(nom::Err::Failure((rest, _kind))) => {
      Err(ProgramError::Syntax { offset: text.len() - rest.len() })
    }

    // Only streaming parsers report `Incomplete`.
    Err(nom::Err::Incomplete(_)) => Err(ProgramError::Syntax { offset: text.len() }),

  }
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn single_line(){
    assert_eq!(parse_program("1,0,0,0,99"), Ok(vec![1, 0, 0, 0, 99]));
  }

  #[test]
  fn negatives_and_whitespace(){
    assert_eq!(
      parse_program("  109, -1,\n204 ,-1 ,99\n"),
      Ok(vec![109, -1, 204, -1, 99])
    );
  }

  #[test]
  fn large_words(){
    assert_eq!(parse_program("104,1125899906842624,99"), Ok(vec![104, 1125899906842624, 99]));
  }

  #[test]
  fn empty_program(){
    assert_eq!(parse_program(""), Err(ProgramError::Empty));
    assert_eq!(parse_program(" \n"), Err(ProgramError::Empty));
  }

  #[test]
  fn rejects_garbage(){
    assert!(matches!(parse_program("1,2,x"), Err(ProgramError::Syntax { .. })));
    assert!(matches!(parse_program("1;2"), Err(ProgramError::Syntax { .. })));
    // Out of range for a word.
    assert!(matches!(parse_program("99999999999999999999"), Err(ProgramError::Syntax { .. })));
  }
}
