use reqwest::blocking::{Client, RequestBuilder, Response};
use serde_json::{json, Value};
use std::time::Duration;

use super::{NewRecipe, RecipeId, RecipeStore, StoreError};
use crate::config::RemoteConfig;

/// Hosted PostgREST-style backend (Supabase and compatible).
///
/// There is no transaction across HTTP calls, so the write-set boundary is
/// a compensating delete: `abort_recipe` removes whatever child rows were
/// written before deleting the parent row itself.
pub struct RestStore {
    client: Client,
    base_url: String,
    api_key: String,
    retries: u32,
}

impl RestStore {
    pub fn new(config: &RemoteConfig) -> Result<Self, StoreError> {
        let client = Client::builder()
            .user_agent("recipe-loader")
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            retries: config.retries,
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// Send a request, retrying transport errors and 5xx responses a bounded
    /// number of times. 4xx responses are final.
    fn send_with_retry(
        &self,
        build: impl Fn() -> RequestBuilder,
    ) -> Result<Response, StoreError> {
        let mut attempt: u32 = 0;
        loop {
            match build().send() {
                Ok(response) if response.status().is_server_error() && attempt < self.retries => {}
                Ok(response) => return check_status(response),
                Err(_) if attempt < self.retries => {}
                Err(e) => return Err(e.into()),
            }

            attempt += 1;
            std::thread::sleep(Duration::from_millis(200 * u64::from(attempt)));
        }
    }

    fn post_rows(&self, table: &str, body: &Value, prefer: &str) -> Result<Response, StoreError> {
        self.send_with_retry(|| {
            self.authed(self.client.post(self.table_url(table)))
                .header("Prefer", prefer)
                .json(body)
        })
    }

    fn delete_where(&self, table: &str, filter: &str) -> Result<(), StoreError> {
        let url = format!("{}?{}", self.table_url(table), filter);
        self.send_with_retry(|| self.authed(self.client.delete(&url)))?;
        Ok(())
    }
}

impl RecipeStore for RestStore {
    fn begin_recipe(&mut self) -> Result<(), StoreError> {
        Ok(())
    }

    fn insert_recipe(&mut self, recipe: &NewRecipe) -> Result<RecipeId, StoreError> {
        let response = self.post_rows(
            "recipes",
            &recipe_payload(recipe),
            "return=representation",
        )?;

        let rows: Value = serde_json::from_str(&response.text()?)
            .map_err(|_| StoreError::MissingId)?;
        extract_id(&rows).ok_or(StoreError::MissingId)
    }

    fn insert_ingredient(
        &mut self,
        recipe_id: RecipeId,
        ingredient: &str,
    ) -> Result<(), StoreError> {
        self.post_rows(
            "ingredients",
            &ingredient_payload(recipe_id, ingredient),
            "return=minimal",
        )?;
        Ok(())
    }

    fn insert_instruction(
        &mut self,
        recipe_id: RecipeId,
        step_number: u32,
        instruction: &str,
    ) -> Result<(), StoreError> {
        self.post_rows(
            "instructions",
            &instruction_payload(recipe_id, step_number, instruction),
            "return=minimal",
        )?;
        Ok(())
    }

    fn commit_recipe(&mut self) -> Result<(), StoreError> {
        Ok(())
    }

    fn abort_recipe(&mut self, recipe_id: Option<RecipeId>) -> Result<(), StoreError> {
        // Nothing was written yet if the parent insert itself failed
        let Some(id) = recipe_id else { return Ok(()) };

        // Children first, then the parent row
        self.delete_where("ingredients", &eq_filter("recipe_id", id))?;
        self.delete_where("instructions", &eq_filter("recipe_id", id))?;
        self.delete_where("recipes", &eq_filter("id", id))?;
        Ok(())
    }
}

fn check_status(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().unwrap_or_default();
    Err(StoreError::Rejected {
        status: status.as_u16(),
        body,
    })
}

fn recipe_payload(recipe: &NewRecipe) -> Value {
    json!([{
        "name": recipe.name,
        "description": recipe.description,
        "image": recipe.image,
        "category": recipe.category,
    }])
}

fn ingredient_payload(recipe_id: RecipeId, ingredient: &str) -> Value {
    json!([{ "recipe_id": recipe_id.0, "ingredient": ingredient }])
}

fn instruction_payload(recipe_id: RecipeId, step_number: u32, instruction: &str) -> Value {
    json!([{
        "recipe_id": recipe_id.0,
        "step_number": step_number,
        "instruction": instruction,
    }])
}

fn eq_filter(column: &str, id: RecipeId) -> String {
    format!("{}=eq.{}", column, id.0)
}

/// Pull the generated id out of a `return=representation` response body
fn extract_id(rows: &Value) -> Option<RecipeId> {
    rows.get(0)?.get("id")?.as_i64().map(RecipeId)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipe_payload_shape() {
        let payload = recipe_payload(&NewRecipe {
            name: "Tea",
            description: "Hot drink",
            image: "tea.jpg",
            category: "drink",
        });

        assert_eq!(payload[0]["name"], "Tea");
        assert_eq!(payload[0]["category"], "drink");
        assert_eq!(payload.as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_instruction_payload_carries_step_number() {
        let payload = instruction_payload(RecipeId(7), 2, "Steep leaves");
        assert_eq!(payload[0]["recipe_id"], 7);
        assert_eq!(payload[0]["step_number"], 2);
        assert_eq!(payload[0]["instruction"], "Steep leaves");
    }

    #[test]
    fn test_eq_filter() {
        assert_eq!(eq_filter("recipe_id", RecipeId(42)), "recipe_id=eq.42");
    }

    #[test]
    fn test_extract_id() {
        let rows: Value = serde_json::from_str(r#"[{"id": 7, "name": "Tea"}]"#).unwrap();
        assert_eq!(extract_id(&rows), Some(RecipeId(7)));

        let empty: Value = serde_json::from_str("[]").unwrap();
        assert_eq!(extract_id(&empty), None);

        let no_id: Value = serde_json::from_str(r#"[{"name": "Tea"}]"#).unwrap();
        assert_eq!(extract_id(&no_id), None);
    }
}
