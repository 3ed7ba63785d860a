/*!
  Channels connect a machine to whatever drives it. A `Channel` is a handle: clones share
  the same queue, so the driver keeps one clone and the machine another.
*/

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

use crate::bytecode::Word;

type RcRefCell<T> = Rc<RefCell<T>>;

/// An unbounded FIFO queue of words.
#[derive(Clone, Debug, Default)]
pub struct Channel {
  queue: RcRefCell<VecDeque<Word>>,
}

impl Channel {
  pub fn new() -> Channel {
    Channel::default()
  }

  /// Appends at the tail.
  pub fn push(&self, value: Word) {
    self.queue.borrow_mut().push_back(value);
  }

  /// Removes and returns the head, if any.
  pub fn pop(&self) -> Option<Word> {
    self.queue.borrow_mut().pop_front()
  }

  pub fn len(&self) -> usize {
    self.queue.borrow().len()
  }

  pub fn is_empty(&self) -> bool {
    self.queue.borrow().is_empty()
  }

  /// Removes everything, head first.
  pub fn drain(&self) -> Vec<Word> {
    self.queue.borrow_mut().drain(..).collect()
  }

  /// Copies the queue's contents, head first, without consuming them.
  pub fn to_vec(&self) -> Vec<Word> {
    self.queue.borrow().iter().copied().collect()
  }
}

impl From<Vec<Word>> for Channel {
  fn from(values: Vec<Word>) -> Channel {
    Channel { queue: Rc::new(RefCell::new(values.into())) }
  }
}

impl Display for Channel {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(
      f,
      "[{}]",
      self.queue
          .borrow()
          .iter()
          .map(Word::to_string)
          .collect::<Vec<String>>()
          .join(", ")
    )
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn first_in_first_out(){
    let channel = Channel::new();
    channel.push(1);
    channel.push(2);
    channel.push(3);
    assert_eq!(channel.len(), 3);
    assert_eq!(channel.pop(), Some(1));
    assert_eq!(channel.pop(), Some(2));
    channel.push(4);
    assert_eq!(channel.pop(), Some(3));
    assert_eq!(channel.pop(), Some(4));
    assert_eq!(channel.pop(), None);
    assert!(channel.is_empty());
  }

  #[test]
  fn clones_share_the_queue(){
    let producer = Channel::new();
    let consumer = producer.clone();
    producer.push(7);
    assert_eq!(consumer.pop(), Some(7));
    assert!(producer.is_empty());
  }

  #[test]
  fn drain_and_copy(){
    let channel = Channel::from(vec![5, -6, 7]);
    assert_eq!(channel.to_vec(), vec![5, -6, 7]);
    assert_eq!(format!("{}", channel), "[5, -6, 7]");
    assert_eq!(channel.drain(), vec![5, -6, 7]);
    assert!(channel.is_empty());
    assert_eq!(format!("{}", channel), "[]");
  }
}
