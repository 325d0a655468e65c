pub mod cli;
pub mod config;
pub mod dataset;
pub mod loader;
pub mod schema;
pub mod store;
pub mod ui;

pub use cli::{Cli, Commands};
pub use dataset::{load_dataset, Recipe, RecipeBook};
pub use loader::{load_recipes, LoadReport};
pub use store::{RecipeStore, RestStore, SqliteStore};
pub use ui::{ConsoleUi, Phase, SilentUi, Ui};
