use rusqlite::{params, Connection};
use std::path::Path;

use super::ddl::{generate_create_table, generate_indexes};
use super::{NewRecipe, RecipeId, RecipeStore, StoreError};
use crate::schema::ALL_TABLES;

/// Local SQLite backend.
///
/// The write-set boundary is a plain SQL transaction: child rows for a
/// recipe either land together with their parent or not at all.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) a database file. With `fresh`, any existing file is
    /// removed first; otherwise new rows append to whatever is already there.
    pub fn open(db_path: &Path, fresh: bool) -> Result<Self, StoreError> {
        if fresh && db_path.exists() {
            std::fs::remove_file(db_path)?;
        }

        let conn = Connection::open(db_path)?;
        Self::init(conn)
    }

    /// In-memory database, used by the test suites
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        // Enable foreign keys and tune for bulk insert
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )?;

        for schema in ALL_TABLES {
            conn.execute(&generate_create_table(schema), [])?;
            for index_sql in generate_indexes(schema) {
                conn.execute(&index_sql, [])?;
            }
        }

        Ok(Self { conn })
    }

    pub fn into_connection(self) -> Connection {
        self.conn
    }
}

impl RecipeStore for SqliteStore {
    fn begin_recipe(&mut self) -> Result<(), StoreError> {
        self.conn.execute_batch("BEGIN")?;
        Ok(())
    }

    fn insert_recipe(&mut self, recipe: &NewRecipe) -> Result<RecipeId, StoreError> {
        let mut stmt = self.conn.prepare_cached(
            "INSERT INTO recipes (name, description, image, category) VALUES (?1, ?2, ?3, ?4)",
        )?;
        stmt.execute(params![
            recipe.name,
            recipe.description,
            recipe.image,
            recipe.category
        ])?;

        Ok(RecipeId(self.conn.last_insert_rowid()))
    }

    fn insert_ingredient(
        &mut self,
        recipe_id: RecipeId,
        ingredient: &str,
    ) -> Result<(), StoreError> {
        let mut stmt = self
            .conn
            .prepare_cached("INSERT INTO ingredients (recipe_id, ingredient) VALUES (?1, ?2)")?;
        stmt.execute(params![recipe_id.0, ingredient])?;
        Ok(())
    }

    fn insert_instruction(
        &mut self,
        recipe_id: RecipeId,
        step_number: u32,
        instruction: &str,
    ) -> Result<(), StoreError> {
        let mut stmt = self.conn.prepare_cached(
            "INSERT INTO instructions (recipe_id, step_number, instruction) VALUES (?1, ?2, ?3)",
        )?;
        stmt.execute(params![recipe_id.0, step_number, instruction])?;
        Ok(())
    }

    fn commit_recipe(&mut self) -> Result<(), StoreError> {
        self.conn.execute_batch("COMMIT")?;
        Ok(())
    }

    fn abort_recipe(&mut self, _recipe_id: Option<RecipeId>) -> Result<(), StoreError> {
        self.conn.execute_batch("ROLLBACK")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tea<'a>() -> NewRecipe<'a> {
        NewRecipe {
            name: "Tea",
            description: "Hot drink",
            image: "tea.jpg",
            category: "drink",
        }
    }

    #[test]
    fn test_insert_returns_generated_id() {
        let mut store = SqliteStore::open_in_memory().unwrap();

        store.begin_recipe().unwrap();
        let first = store.insert_recipe(&tea()).unwrap();
        store.commit_recipe().unwrap();

        store.begin_recipe().unwrap();
        let second = store.insert_recipe(&tea()).unwrap();
        store.commit_recipe().unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_children_reference_parent() {
        let mut store = SqliteStore::open_in_memory().unwrap();

        store.begin_recipe().unwrap();
        let id = store.insert_recipe(&tea()).unwrap();
        store.insert_ingredient(id, "Water").unwrap();
        store.insert_instruction(id, 1, "Boil water").unwrap();
        store.commit_recipe().unwrap();

        let conn = store.into_connection();
        let recipe_id: i64 = conn
            .query_row("SELECT recipe_id FROM ingredients", [], |row| row.get(0))
            .unwrap();
        assert_eq!(recipe_id, id.0);
    }

    #[test]
    fn test_abort_discards_write_set() {
        let mut store = SqliteStore::open_in_memory().unwrap();

        store.begin_recipe().unwrap();
        let id = store.insert_recipe(&tea()).unwrap();
        store.insert_ingredient(id, "Water").unwrap();
        store.abort_recipe(Some(id)).unwrap();

        let conn = store.into_connection();
        let recipes: i64 = conn
            .query_row("SELECT COUNT(*) FROM recipes", [], |row| row.get(0))
            .unwrap();
        let ingredients: i64 = conn
            .query_row("SELECT COUNT(*) FROM ingredients", [], |row| row.get(0))
            .unwrap();
        assert_eq!(recipes, 0);
        assert_eq!(ingredients, 0);
    }

    #[test]
    fn test_orphan_child_rejected() {
        let mut store = SqliteStore::open_in_memory().unwrap();

        store.begin_recipe().unwrap();
        let result = store.insert_ingredient(RecipeId(999), "Water");
        assert!(result.is_err());
        store.abort_recipe(None).unwrap();
    }
}
