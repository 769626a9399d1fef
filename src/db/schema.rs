/// Schema version stored in `PRAGMA user_version`
pub const SCHEMA_VERSION: i64 = 1;

pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS joke (
    id INTEGER PRIMARY KEY,
    setup TEXT NOT NULL,
    punchline TEXT NOT NULL
);

PRAGMA user_version = 1;
"#;
