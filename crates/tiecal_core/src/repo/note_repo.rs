//! Note repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist, list and hard-delete notes.
//! - Keep timestamp encoding (epoch milliseconds) inside the storage boundary.
//!
//! # Invariants
//! - Note list is always sorted by `date ASC, id ASC`.
//! - No pagination: listing materializes the full set.

use crate::model::note::{Note, NoteId};
use crate::repo::{checked_count, parse_uuid, RepoError, RepoResult};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};

const NOTE_SELECT_SQL: &str = "SELECT id, title, content, date, category_id FROM notes";

/// Repository interface for note persistence.
pub trait NoteRepository {
    fn create_note(&self, note: &Note) -> RepoResult<NoteId>;
    fn get_note(&self, id: NoteId) -> RepoResult<Option<Note>>;
    /// Lists all notes, oldest first.
    fn list_notes(&self) -> RepoResult<Vec<Note>>;
    fn count_notes(&self) -> RepoResult<u64>;
    fn delete_note(&self, id: NoteId) -> RepoResult<()>;
}

/// SQLite-backed note repository.
pub struct SqliteNoteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoteRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn create_note(&self, note: &Note) -> RepoResult<NoteId> {
        note.validate()
            .map_err(|err| RepoError::InvalidData(err.to_string()))?;

        self.conn.execute(
            "INSERT INTO notes (id, title, content, date, category_id)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                note.id.to_string(),
                note.title.as_str(),
                note.content.as_str(),
                note.date.timestamp_millis(),
                note.category.map(|id| id.to_string()),
            ],
        )?;
        Ok(note.id)
    }

    fn get_note(&self, id: NoteId) -> RepoResult<Option<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_note_row(row)?)),
            None => Ok(None),
        }
    }

    fn list_notes(&self) -> RepoResult<Vec<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} ORDER BY date ASC, id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(parse_note_row(row)?);
        }
        Ok(notes)
    }

    fn count_notes(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM notes;", [], |row| row.get(0))?;
        checked_count(count)
    }

    fn delete_note(&self, id: NoteId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM notes WHERE id = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::not_found("note", id));
        }
        Ok(())
    }
}

fn parse_note_row(row: &Row<'_>) -> RepoResult<Note> {
    let id_text: String = row.get("id")?;
    let id = parse_uuid(&id_text, "notes.id")?;

    let millis: i64 = row.get("date")?;
    let date = DateTime::<Utc>::from_timestamp_millis(millis).ok_or_else(|| {
        RepoError::InvalidData(format!("out-of-range timestamp `{millis}` in notes.date"))
    })?;

    let category = match row.get::<_, Option<String>>("category_id")? {
        Some(value) => Some(parse_uuid(&value, "notes.category_id")?),
        None => None,
    };

    let note = Note {
        id,
        title: row.get("title")?,
        content: row.get("content")?,
        date,
        category,
    };
    note.validate()
        .map_err(|err| RepoError::InvalidData(format!("{err} (notes.id={id})")))?;
    Ok(note)
}
