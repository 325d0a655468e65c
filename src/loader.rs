//! Core load pass: one recipe at a time, parent row before children.

use crate::dataset::Recipe;
use crate::store::{NewRecipe, RecipeStore, StoreError};
use crate::ui::Ui;

/// Where in a recipe's write set the first failure happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureStage {
    /// The parent row was never written; no children were attempted
    Recipe,
    /// The parent row went in but one or more child rows failed
    Children,
    /// Everything was written but the final commit failed
    Commit,
}

#[derive(Debug)]
pub struct RecipeFailure {
    pub name: String,
    pub stage: FailureStage,
    pub errors: Vec<StoreError>,
}

/// Outcome of a full load pass
#[derive(Debug, Default)]
pub struct LoadReport {
    pub attempted: usize,
    pub loaded: usize,
    pub ingredient_rows: u64,
    pub instruction_rows: u64,
    pub failures: Vec<RecipeFailure>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Write every recipe in input order.
///
/// A failed recipe is reported and skipped; the pass always attempts all N
/// recipes. Errors from child writes are collected per recipe, and a recipe
/// whose children could not all be written is aborted so no partial recipe
/// survives.
pub fn load_recipes<S: RecipeStore, U: Ui>(
    store: &mut S,
    recipes: &[Recipe],
    ui: &mut U,
) -> LoadReport {
    let mut report = LoadReport::default();
    let total = recipes.len() as u64;

    for (idx, recipe) in recipes.iter().enumerate() {
        ui.set_progress(idx as u64 + 1, total, recipe.name.as_str());
        report.attempted += 1;

        if let Err(e) = store.begin_recipe() {
            ui.warn(format!(
                "Error starting write set for recipe {}: {}",
                recipe.name, e
            ));
            report.failures.push(RecipeFailure {
                name: recipe.name.clone(),
                stage: FailureStage::Recipe,
                errors: vec![e],
            });
            continue;
        }

        // Parent row first; children may only reference a persisted id
        let new_recipe = NewRecipe {
            name: &recipe.name,
            description: &recipe.description,
            image: &recipe.image,
            category: &recipe.category,
        };
        let recipe_id = match store.insert_recipe(&new_recipe) {
            Ok(id) => id,
            Err(e) => {
                ui.warn(format!("Error inserting recipe {}: {}", recipe.name, e));
                discard(store, None, &recipe.name, ui);
                report.failures.push(RecipeFailure {
                    name: recipe.name.clone(),
                    stage: FailureStage::Recipe,
                    errors: vec![e],
                });
                continue;
            }
        };

        // Collect errors from all child writes before deciding the recipe's fate
        let mut child_errors = Vec::new();

        for ingredient in &recipe.ingredients {
            if let Err(e) = store.insert_ingredient(recipe_id, ingredient) {
                child_errors.push(e);
            }
        }

        for (pos, instruction) in recipe.instructions.iter().enumerate() {
            let step_number = pos as u32 + 1;
            if let Err(e) = store.insert_instruction(recipe_id, step_number, instruction) {
                child_errors.push(e);
            }
        }

        if !child_errors.is_empty() {
            for e in &child_errors {
                ui.warn(format!(
                    "Error inserting child row for recipe {}: {}",
                    recipe.name, e
                ));
            }
            discard(store, Some(recipe_id), &recipe.name, ui);
            report.failures.push(RecipeFailure {
                name: recipe.name.clone(),
                stage: FailureStage::Children,
                errors: child_errors,
            });
            continue;
        }

        match store.commit_recipe() {
            Ok(()) => {
                report.loaded += 1;
                report.ingredient_rows += recipe.ingredients.len() as u64;
                report.instruction_rows += recipe.instructions.len() as u64;
            }
            Err(e) => {
                ui.warn(format!("Error committing recipe {}: {}", recipe.name, e));
                discard(store, Some(recipe_id), &recipe.name, ui);
                report.failures.push(RecipeFailure {
                    name: recipe.name.clone(),
                    stage: FailureStage::Commit,
                    errors: vec![e],
                });
            }
        }
    }

    report
}

fn discard<S: RecipeStore, U: Ui>(
    store: &mut S,
    recipe_id: Option<crate::store::RecipeId>,
    name: &str,
    ui: &mut U,
) {
    if let Err(e) = store.abort_recipe(recipe_id) {
        ui.warn(format!(
            "Error discarding write set for recipe {}: {}",
            name, e
        ));
    }
}
