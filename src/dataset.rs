use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Top-level input document: `{"recipes": [...]}`
#[derive(Debug, Clone, Deserialize)]
pub struct RecipeBook {
    pub recipes: Vec<Recipe>,
}

/// A single recipe record as it appears in the source JSON
#[derive(Debug, Clone, Deserialize)]
pub struct Recipe {
    pub name: String,
    pub description: String,
    pub image: String,
    pub category: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
}

/// Parse the recipe dataset from a JSON file.
///
/// A malformed document or a record missing a required scalar field is a
/// hard error: nothing gets written downstream of a parse failure.
pub fn load_dataset(path: &Path) -> Result<RecipeBook> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset: {:?}", path))?;

    let book: RecipeBook = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse dataset: {:?}", path))?;

    Ok(book)
}

/// A problem found in an otherwise well-formed dataset
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationIssue {
    /// Zero-based index of the recipe in the input array
    pub recipe_index: usize,
    pub message: String,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "recipe #{}: {}", self.recipe_index, self.message)
    }
}

/// Check a parsed dataset for empty fields the backend would accept silently
pub fn validate(book: &RecipeBook) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for (idx, recipe) in book.recipes.iter().enumerate() {
        if recipe.name.trim().is_empty() {
            issues.push(ValidationIssue {
                recipe_index: idx,
                message: "empty name".to_string(),
            });
        }

        for (i, ingredient) in recipe.ingredients.iter().enumerate() {
            if ingredient.trim().is_empty() {
                issues.push(ValidationIssue {
                    recipe_index: idx,
                    message: format!("empty ingredient at position {}", i),
                });
            }
        }

        for (i, instruction) in recipe.instructions.iter().enumerate() {
            if instruction.trim().is_empty() {
                issues.push(ValidationIssue {
                    recipe_index: idx,
                    message: format!("empty instruction at step {}", i + 1),
                });
            }
        }
    }

    issues
}
