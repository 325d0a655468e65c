pub mod ddl;
pub mod rest;
pub mod sqlite;

pub use rest::RestStore;
pub use sqlite::SqliteStore;

use thiserror::Error;

/// Identifier generated by the backend when a recipe row is inserted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecipeId(pub i64);

impl std::fmt::Display for RecipeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Scalar fields of a recipe row, borrowed from the parsed dataset
#[derive(Debug, Clone, Copy)]
pub struct NewRecipe<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub image: &'a str,
    pub category: &'a str,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("http transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend rejected write: {status} {body}")]
    Rejected { status: u16, body: String },

    #[error("backend did not return a generated id")]
    MissingId,

    #[error("{0}")]
    Other(String),
}

/// Storage backend for the three recipe tables.
///
/// Writes for one recipe happen between `begin_recipe` and either
/// `commit_recipe` or `abort_recipe`, so a backend can bound the recipe's
/// write set (a SQL transaction, or compensating deletes for backends
/// without one). Child rows must only ever reference an id returned by
/// `insert_recipe` within the current scope.
pub trait RecipeStore {
    /// Open the write-set boundary for the next recipe
    fn begin_recipe(&mut self) -> Result<(), StoreError>;

    /// Insert the parent row, returning the generated identifier
    fn insert_recipe(&mut self, recipe: &NewRecipe) -> Result<RecipeId, StoreError>;

    fn insert_ingredient(&mut self, recipe_id: RecipeId, ingredient: &str)
        -> Result<(), StoreError>;

    fn insert_instruction(
        &mut self,
        recipe_id: RecipeId,
        step_number: u32,
        instruction: &str,
    ) -> Result<(), StoreError>;

    /// Make the current recipe's rows permanent
    fn commit_recipe(&mut self) -> Result<(), StoreError>;

    /// Discard the current recipe's rows. `recipe_id` is the parent id if the
    /// parent insert succeeded; backends without transactions need it to
    /// issue compensating deletes.
    fn abort_recipe(&mut self, recipe_id: Option<RecipeId>) -> Result<(), StoreError>;
}
