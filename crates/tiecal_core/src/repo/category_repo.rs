//! Category repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist and list categories in creation order.
//! - Provide the seed-if-empty primitive used at bootstrap.
//!
//! # Invariants
//! - Listing order is `created_at ASC, rowid ASC`, so seeded defaults keep
//!   their seed order even when they share a timestamp.
//! - Deleting a category nulls `notes.category_id` through the foreign key.

use crate::model::category::{Category, CategoryColor, CategoryId};
use crate::repo::{checked_count, parse_uuid, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const CATEGORY_SELECT_SQL: &str = "SELECT id, name, color, created_at FROM categories";

/// Repository interface for category persistence.
pub trait CategoryRepository {
    fn create_category(&self, category: &Category) -> RepoResult<CategoryId>;
    fn get_category(&self, id: CategoryId) -> RepoResult<Option<Category>>;
    fn list_categories(&self) -> RepoResult<Vec<Category>>;
    fn count_categories(&self) -> RepoResult<u64>;
    fn delete_category(&self, id: CategoryId) -> RepoResult<()>;
    /// Inserts `categories` only when the table is empty.
    ///
    /// Returns how many rows were written (0 when the store was not empty).
    fn seed_if_empty(&self, categories: &[Category]) -> RepoResult<usize>;
}

/// SQLite-backed category repository.
pub struct SqliteCategoryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCategoryRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl CategoryRepository for SqliteCategoryRepository<'_> {
    fn create_category(&self, category: &Category) -> RepoResult<CategoryId> {
        insert_category(self.conn, category)?;
        Ok(category.id)
    }

    fn get_category(&self, id: CategoryId) -> RepoResult<Option<Category>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CATEGORY_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_category_row(row)?)),
            None => Ok(None),
        }
    }

    fn list_categories(&self) -> RepoResult<Vec<Category>> {
        let mut stmt = self.conn.prepare(&format!(
            "{CATEGORY_SELECT_SQL} ORDER BY created_at ASC, rowid ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut categories = Vec::new();
        while let Some(row) = rows.next()? {
            categories.push(parse_category_row(row)?);
        }
        Ok(categories)
    }

    fn count_categories(&self) -> RepoResult<u64> {
        count_rows(self.conn)
    }

    fn delete_category(&self, id: CategoryId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM categories WHERE id = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::not_found("category", id));
        }
        Ok(())
    }

    fn seed_if_empty(&self, categories: &[Category]) -> RepoResult<usize> {
        let tx = self.conn.unchecked_transaction()?;
        if count_rows(&tx)? > 0 {
            return Ok(0);
        }
        for category in categories {
            insert_category(&tx, category)?;
        }
        tx.commit()?;
        Ok(categories.len())
    }
}

fn insert_category(conn: &Connection, category: &Category) -> RepoResult<()> {
    category
        .validate()
        .map_err(|err| RepoError::InvalidData(err.to_string()))?;
    conn.execute(
        "INSERT INTO categories (id, name, color, created_at) VALUES (?1, ?2, ?3, ?4);",
        params![
            category.id.to_string(),
            category.name.as_str(),
            category.color.token(),
            category.created_at,
        ],
    )?;
    Ok(())
}

fn count_rows(conn: &Connection) -> RepoResult<u64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM categories;", [], |row| row.get(0))?;
    checked_count(count)
}

fn parse_category_row(row: &Row<'_>) -> RepoResult<Category> {
    let id_text: String = row.get("id")?;
    let id = parse_uuid(&id_text, "categories.id")?;

    let color_text: String = row.get("color")?;
    let color = CategoryColor::from_token(&color_text).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid color token `{color_text}` in categories.color"
        ))
    })?;

    Category::with_id(id, row.get::<_, String>("name")?, color, row.get("created_at")?)
        .map_err(|err| RepoError::InvalidData(format!("{err} (categories.id={id})")))
}

#[cfg(test)]
mod tests {
    use super::{CategoryRepository, SqliteCategoryRepository};
    use crate::db::open_db_in_memory;
    use crate::model::category::{Category, CategoryColor};
    use crate::repo::RepoError;

    #[test]
    fn same_timestamp_rows_keep_insertion_order() {
        let conn = open_db_in_memory().unwrap();
        let repo = SqliteCategoryRepository::new(&conn);
        let first = Category::new("b", CategoryColor::NoteRed, 10).unwrap();
        let second = Category::new("a", CategoryColor::NoteGray, 10).unwrap();
        repo.create_category(&first).unwrap();
        repo.create_category(&second).unwrap();

        let names: Vec<_> = repo
            .list_categories()
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn unknown_color_in_storage_is_reported_as_invalid_data() {
        let conn = open_db_in_memory().unwrap();
        // Bypass the CHECK constraint to simulate a row written by a foreign tool.
        conn.execute_batch(
            "PRAGMA ignore_check_constraints = ON;
             INSERT INTO categories (id, name, color, created_at)
             VALUES ('11111111-2222-4333-8444-555555555555', 'x', 'blue', 0);",
        )
        .unwrap();

        let repo = SqliteCategoryRepository::new(&conn);
        let err = repo.list_categories().unwrap_err();
        assert!(matches!(err, RepoError::InvalidData(_)));
    }

    #[test]
    fn seed_if_empty_writes_once() {
        let conn = open_db_in_memory().unwrap();
        let repo = SqliteCategoryRepository::new(&conn);
        let seed = vec![Category::new("x", CategoryColor::NoteBlue, 0).unwrap()];

        assert_eq!(repo.seed_if_empty(&seed).unwrap(), 1);
        assert_eq!(repo.seed_if_empty(&seed).unwrap(), 0);
        assert_eq!(repo.count_categories().unwrap(), 1);
    }
}
