//! Serde-deserializable types matching the joke API responses.
//!
//! The API returns a few fields we don't use (e.g. `type`); serde ignores
//! them, only the three below are required.

use serde::Deserialize;

use super::types::Joke;

#[derive(Debug, Deserialize)]
pub struct ApiJoke {
  pub id: i64,
  pub setup: String,
  pub punchline: String,
}

impl From<ApiJoke> for Joke {
  fn from(joke: ApiJoke) -> Self {
    Joke {
      id: joke.id,
      setup: joke.setup,
      punchline: joke.punchline,
    }
  }
}

/// Decode a `/random_joke` response body.
pub fn parse_joke(body: &str) -> serde_json::Result<Joke> {
  serde_json::from_str::<ApiJoke>(body).map(Joke::from)
}
