//! SQLite persistence for notes.

use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use tracing::debug;

use crate::error::{NoteError, Result};
use crate::note::Note;

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS notes (\
        id INTEGER PRIMARY KEY AUTOINCREMENT, \
        character_id TEXT NOT NULL, \
        character_name TEXT NOT NULL, \
        content TEXT NOT NULL, \
        embedding BLOB, \
        created_at TEXT NOT NULL\
    )",
    "CREATE INDEX IF NOT EXISTS idx_notes_character ON notes(character_id)",
];

/// Append-only note storage. Notes are never updated or deleted.
#[derive(Debug, Clone)]
pub struct NoteStore {
    pool: SqlitePool,
}

impl NoteStore {
    /// Open (creating if needed) the database file at `path`.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let options = SqliteConnectOptions::new().filename(path).create_if_missing(true);
        let pool = SqlitePoolOptions::new().max_connections(5).connect_with(options).await?;
        debug!(path = %path.display(), "opened note store");
        Self::from_pool(pool).await
    }

    /// Private in-memory database, gone when the store is dropped.
    pub async fn in_memory() -> Result<Self> {
        // every connection to :memory: is its own database
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new().max_connections(1).connect_with(options).await?;
        Self::from_pool(pool).await
    }

    /// Use an existing pool, creating the schema if missing.
    pub async fn from_pool(pool: SqlitePool) -> Result<Self> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&pool).await?;
        }
        Ok(Self { pool })
    }

    /// Store a note and return its id.
    ///
    /// Content is trimmed first.
    ///
    /// # Errors
    ///
    /// [`NoteError::EmptyContent`] when nothing is left after trimming.
    pub async fn add_note(
        &self,
        character_id: &str,
        character_name: &str,
        content: &str,
        embedding: Option<Vec<u8>>,
    ) -> Result<i64> {
        let content = content.trim();
        if content.is_empty() {
            return Err(NoteError::EmptyContent);
        }
        let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);

        let result = sqlx::query(
            "INSERT INTO notes (character_id, character_name, content, embedding, created_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(character_id)
        .bind(character_name)
        .bind(content)
        .bind(embedding)
        .bind(&created_at)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        debug!(id, character_id, "added note");
        Ok(id)
    }

    /// Notes about one character, newest first.
    pub async fn list_by_character(&self, character_id: &str) -> Result<Vec<Note>> {
        let rows = sqlx::query(
            "SELECT id, character_id, character_name, content, embedding, created_at \
             FROM notes WHERE character_id = ? ORDER BY id DESC",
        )
        .bind(character_id)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(note_from_row).collect()
    }

    /// Every note, newest first.
    pub async fn list_all(&self) -> Result<Vec<Note>> {
        let rows = sqlx::query(
            "SELECT id, character_id, character_name, content, embedding, created_at \
             FROM notes ORDER BY id DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(note_from_row).collect()
    }
}

fn note_from_row(row: &SqliteRow) -> Result<Note> {
    let id: i64 = row.get("id");
    let created_at: String = row.get("created_at");
    let created_at = parse_timestamp(&created_at)
        .ok_or_else(|| NoteError::InvalidTimestamp { id, value: created_at.clone() })?;
    Ok(Note {
        id,
        character_id: row.get("character_id"),
        character_name: row.get("character_name"),
        content: row.get("content"),
        embedding: row.get("embedding"),
        created_at,
    })
}

/// RFC 3339, or an ISO-8601 timestamp without offset taken as UTC.
fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").ok().map(|naive| naive.and_utc())
}
