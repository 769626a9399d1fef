//! Joke source selection: network fetch vs. offline rotation of stored jokes.

use std::collections::VecDeque;
use std::fmt;

use crate::joke::types::Joke;

/// How many recently fetched jokes are kept for saving
pub const VIEWED_WINDOW: usize = 3;

/// Where the next joke should come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
  Network,
  Rotation,
}

/// Decide the joke source. The user's online toggle wins over actual connectivity.
pub fn decide(online: bool, connected: bool) -> Source {
  if online || connected {
    Source::Network
  } else {
    Source::Rotation
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectError {
  NoStoredJokes,
}

impl fmt::Display for SelectError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SelectError::NoStoredJokes => write!(
        f,
        "No stored jokes available. Please check your internet connection."
      ),
    }
  }
}

impl std::error::Error for SelectError {}

/// Viewed-jokes window plus the offline rotation
#[derive(Debug, Default)]
pub struct JokeSelector {
  viewed: VecDeque<Joke>,
  rotation: Vec<Joke>,
  index: usize,
}

impl JokeSelector {
  pub fn new() -> Self {
    Self::default()
  }

  /// Remember a joke fetched from the network, keeping only the last few
  pub fn record_fetched(&mut self, joke: Joke) {
    self.viewed.push_back(joke);
    while self.viewed.len() > VIEWED_WINDOW {
      self.viewed.pop_front();
    }
  }

  /// Recently fetched jokes, oldest first
  pub fn viewed(&self) -> Vec<Joke> {
    self.viewed.iter().cloned().collect()
  }

  /// Replace the rotation (after loading from the store).
  ///
  /// The cursor keeps counting; it is reduced modulo the new length on use.
  pub fn set_rotation(&mut self, jokes: Vec<Joke>) {
    self.rotation = jokes;
  }

  pub fn rotation_len(&self) -> usize {
    self.rotation.len()
  }

  /// Serve the next stored joke, cycling through the rotation
  pub fn next_from_rotation(&mut self) -> Result<Joke, SelectError> {
    if self.rotation.is_empty() {
      return Err(SelectError::NoStoredJokes);
    }

    let joke = self.rotation[self.index % self.rotation.len()].clone();
    self.index = self.index.wrapping_add(1);
    Ok(joke)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn joke(id: i64) -> Joke {
    Joke {
      id,
      setup: format!("setup {}", id),
      punchline: format!("punchline {}", id),
    }
  }

  fn ids(jokes: &[Joke]) -> Vec<i64> {
    jokes.iter().map(|j| j.id).collect()
  }

  #[test]
  fn test_decide() {
    assert_eq!(decide(true, true), Source::Network);
    assert_eq!(decide(true, false), Source::Network);
    assert_eq!(decide(false, true), Source::Network);
    assert_eq!(decide(false, false), Source::Rotation);
  }

  #[test]
  fn test_window_keeps_last_three_in_order() {
    let mut selector = JokeSelector::new();
    for id in 1..=10 {
      selector.record_fetched(joke(id));
      assert!(selector.viewed().len() <= VIEWED_WINDOW);
    }
    assert_eq!(ids(&selector.viewed()), vec![8, 9, 10]);
  }

  #[test]
  fn test_window_below_capacity() {
    let mut selector = JokeSelector::new();
    selector.record_fetched(joke(4));
    selector.record_fetched(joke(2));
    assert_eq!(ids(&selector.viewed()), vec![4, 2]);
  }

  #[test]
  fn test_rotation_cycles() {
    let mut selector = JokeSelector::new();
    selector.set_rotation(vec![joke(1), joke(2), joke(3)]);

    let served: Vec<i64> = (0..7)
      .map(|_| selector.next_from_rotation().unwrap().id)
      .collect();
    assert_eq!(served, vec![1, 2, 3, 1, 2, 3, 1]);
  }

  #[test]
  fn test_rotation_visits_every_joke_per_period() {
    for n in 1..=5 {
      let mut selector = JokeSelector::new();
      selector.set_rotation((1..=n).map(joke).collect());

      let mut served: Vec<i64> = (0..n)
        .map(|_| selector.next_from_rotation().unwrap().id)
        .collect();
      served.sort();
      assert_eq!(served, (1..=n).collect::<Vec<_>>());
    }
  }

  #[test]
  fn test_empty_rotation_is_error() {
    let mut selector = JokeSelector::new();
    assert_eq!(
      selector.next_from_rotation(),
      Err(SelectError::NoStoredJokes)
    );
    assert!(SelectError::NoStoredJokes
      .to_string()
      .starts_with("No stored jokes available"));
  }

  #[test]
  fn test_reloaded_rotation_keeps_cursor() {
    let mut selector = JokeSelector::new();
    selector.set_rotation(vec![joke(1), joke(2), joke(3)]);
    selector.next_from_rotation().unwrap();

    selector.set_rotation(vec![joke(5), joke(6)]);
    assert_eq!(selector.next_from_rotation().unwrap().id, 6);
    assert_eq!(selector.next_from_rotation().unwrap().id, 5);
  }

  #[test]
  fn test_fetching_does_not_touch_rotation() {
    let mut selector = JokeSelector::new();
    selector.set_rotation(vec![joke(1)]);
    selector.record_fetched(joke(2));
    assert_eq!(selector.rotation_len(), 1);
    assert_eq!(selector.next_from_rotation().unwrap().id, 1);
  }
}
