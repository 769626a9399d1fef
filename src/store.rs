//! Local joke store: the persisted copy of the viewed-jokes window.

use color_eyre::{eyre::eyre, Result};
use rusqlite::params;
use std::path::Path;

use crate::db::Database;
use crate::joke::types::Joke;

/// SQLite-backed joke collection.
///
/// Owned by the app for its whole lifetime; `close` releases the handle.
pub struct JokeStore {
  db: Database,
}

impl JokeStore {
  /// Open (or create) the store at `path`.
  pub fn open(path: &Path) -> Result<Self> {
    Ok(Self {
      db: Database::open(path)?,
    })
  }

  #[cfg(test)]
  pub fn open_in_memory() -> Result<Self> {
    Ok(Self {
      db: Database::open_in_memory()?,
    })
  }

  /// Replace the whole collection with `jokes` in a single transaction.
  pub fn replace_all(&mut self, jokes: &[Joke]) -> Result<()> {
    let tx = self
      .db
      .conn_mut()
      .transaction()
      .map_err(|e| eyre!("Failed to begin transaction: {}", e))?;

    tx.execute("DELETE FROM joke", [])
      .map_err(|e| eyre!("Failed to clear stored jokes: {}", e))?;

    for joke in jokes {
      tx.execute(
        "INSERT OR REPLACE INTO joke (id, setup, punchline) VALUES (?, ?, ?)",
        params![joke.id, joke.setup, joke.punchline],
      )
      .map_err(|e| eyre!("Failed to store joke {}: {}", joke.id, e))?;
    }

    tx.commit()
      .map_err(|e| eyre!("Failed to commit transaction: {}", e))?;

    tracing::info!(count = jokes.len(), "saved jokes");
    Ok(())
  }

  /// Insert a joke, replacing any stored joke with the same id.
  pub fn upsert(&self, joke: &Joke) -> Result<()> {
    self
      .db
      .conn()
      .execute(
        "INSERT OR REPLACE INTO joke (id, setup, punchline) VALUES (?, ?, ?)",
        params![joke.id, joke.setup, joke.punchline],
      )
      .map_err(|e| eyre!("Failed to store joke {}: {}", joke.id, e))?;
    Ok(())
  }

  /// All stored jokes, ordered by id.
  pub fn load_all(&self) -> Result<Vec<Joke>> {
    let mut stmt = self
      .db
      .conn()
      .prepare("SELECT id, setup, punchline FROM joke ORDER BY id")
      .map_err(|e| eyre!("Failed to prepare query: {}", e))?;

    let jokes = stmt
      .query_map([], |row| {
        Ok(Joke {
          id: row.get(0)?,
          setup: row.get(1)?,
          punchline: row.get(2)?,
        })
      })
      .map_err(|e| eyre!("Failed to query jokes: {}", e))?
      .collect::<rusqlite::Result<Vec<_>>>()
      .map_err(|e| eyre!("Failed to read joke row: {}", e))?;

    Ok(jokes)
  }

  pub fn close(self) -> Result<()> {
    self.db.close()
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

  #[test]
  fn test_empty_store() {
    let store = JokeStore::open_in_memory().unwrap();
    assert!(store.load_all().unwrap().is_empty());
  }

  #[test]
  fn test_replace_all_orders_by_id() {
    let mut store = JokeStore::open_in_memory().unwrap();
    let window = vec![joke(30), joke(4), joke(17)];

    store.replace_all(&window).unwrap();

    assert_eq!(store.load_all().unwrap(), vec![joke(4), joke(17), joke(30)]);
  }

  #[test]
  fn test_replace_all_drops_previous_rows() {
    let mut store = JokeStore::open_in_memory().unwrap();
    store.replace_all(&[joke(1), joke(2), joke(3)]).unwrap();
    store.replace_all(&[joke(9)]).unwrap();

    assert_eq!(store.load_all().unwrap(), vec![joke(9)]);
  }

  #[test]
  fn test_replace_all_with_duplicate_ids() {
    let mut store = JokeStore::open_in_memory().unwrap();
    let newer = Joke {
      setup: "again".to_string(),
      ..joke(5)
    };
    store.replace_all(&[joke(5), newer.clone()]).unwrap();

    assert_eq!(store.load_all().unwrap(), vec![newer]);
  }

  #[test]
  fn test_replace_all_with_empty_window_clears() {
    let mut store = JokeStore::open_in_memory().unwrap();
    store.replace_all(&[joke(1)]).unwrap();
    store.replace_all(&[]).unwrap();

    assert!(store.load_all().unwrap().is_empty());
  }

  #[test]
  fn test_upsert_keeps_other_rows() {
    let mut store = JokeStore::open_in_memory().unwrap();
    store.replace_all(&[joke(1), joke(2)]).unwrap();
    store.upsert(&joke(3)).unwrap();
    store.upsert(&joke(1)).unwrap();

    assert_eq!(store.load_all().unwrap(), vec![joke(1), joke(2), joke(3)]);
  }

  #[test]
  fn test_saved_jokes_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jokes.db");

    let mut store = JokeStore::open(&path).unwrap();
    store.replace_all(&[joke(2), joke(1)]).unwrap();
    store.close().unwrap();

    let store = JokeStore::open(&path).unwrap();
    assert_eq!(store.load_all().unwrap(), vec![joke(1), joke(2)]);
  }
}
