//! State of the joke screen.
//!
//! Every change goes through a method here; the app redraws after each
//! handled event, so there is no hidden re-render path.

use chrono::{DateTime, Local};

use crate::joke::types::Joke;
use crate::selector::JokeSelector;

pub const FETCH_FAILED: &str = "Failed to fetch joke. Please check your internet connection.";

/// Outcome of a background joke request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
  /// A fresh joke from the API
  Fetched(Joke),
  /// Offline and disconnected: serve from the stored rotation
  UseRotation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveStatus {
  pub count: usize,
  pub at: DateTime<Local>,
}

#[derive(Debug)]
pub struct Screen {
  joke: Option<Joke>,
  error: Option<String>,
  loading: bool,
  online: bool,
  /// Last reported device connectivity, unknown until the first probe
  connected: Option<bool>,
  selector: JokeSelector,
  last_save: Option<SaveStatus>,
}

impl Screen {
  pub fn new(online: bool) -> Self {
    Self {
      joke: None,
      error: None,
      loading: false,
      online,
      connected: None,
      selector: JokeSelector::new(),
      last_save: None,
    }
  }

  pub fn begin_fetch(&mut self) {
    self.loading = true;
  }

  /// Apply the result of a joke request
  pub fn resolve(&mut self, result: Result<Resolution, String>) {
    match result {
      Ok(Resolution::Fetched(joke)) => {
        self.selector.record_fetched(joke.clone());
        self.joke = Some(joke);
        self.error = None;
      }
      Ok(Resolution::UseRotation) => match self.selector.next_from_rotation() {
        Ok(joke) => self.joke = Some(joke),
        Err(e) => self.error = Some(e.to_string()),
      },
      Err(message) => {
        self.error = Some(message);
      }
    }
    self.loading = false;
  }

  pub fn toggle_online(&mut self) {
    self.online = !self.online;
  }

  pub fn set_connected(&mut self, connected: bool) {
    self.connected = Some(connected);
  }

  /// Replace the offline rotation with freshly loaded jokes
  pub fn set_rotation(&mut self, jokes: Vec<Joke>) {
    self.selector.set_rotation(jokes);
  }

  pub fn rotation_len(&self) -> usize {
    self.selector.rotation_len()
  }

  /// Jokes that a save would persist
  pub fn viewed(&self) -> Vec<Joke> {
    self.selector.viewed()
  }

  pub fn mark_saved(&mut self, count: usize, at: DateTime<Local>) {
    self.last_save = Some(SaveStatus { count, at });
  }

  pub fn joke(&self) -> Option<&Joke> {
    self.joke.as_ref()
  }

  pub fn error(&self) -> Option<&str> {
    self.error.as_deref()
  }

  pub fn is_loading(&self) -> bool {
    self.loading
  }

  pub fn is_online(&self) -> bool {
    self.online
  }

  pub fn connected(&self) -> Option<bool> {
    self.connected
  }

  pub fn last_save(&self) -> Option<SaveStatus> {
    self.last_save
  }
}
