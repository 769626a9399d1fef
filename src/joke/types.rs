/// A single joke as shown on screen and kept in the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Joke {
  pub id: i64,
  pub setup: String,
  pub punchline: String,
}
