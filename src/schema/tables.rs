//! Table definitions for the recipe dataset

use super::types::*;

pub static RECIPES: TableSchema = TableSchema {
    name: "recipes",
    columns: &[
        Column::required("id", ColumnType::Integer),
        Column::required("name", ColumnType::Text),
        Column::required("description", ColumnType::Text),
        Column::required("image", ColumnType::Text),
        Column::required("category", ColumnType::Text),
    ],
    foreign_keys: &[],
};

pub static INGREDIENTS: TableSchema = TableSchema {
    name: "ingredients",
    columns: &[
        Column::required("id", ColumnType::Integer),
        Column::required("recipe_id", ColumnType::Integer),
        Column::required("ingredient", ColumnType::Text),
    ],
    foreign_keys: &[ForeignKey::new("recipe_id", "recipes")],
};

pub static INSTRUCTIONS: TableSchema = TableSchema {
    name: "instructions",
    columns: &[
        Column::required("id", ColumnType::Integer),
        Column::required("recipe_id", ColumnType::Integer),
        Column::required("step_number", ColumnType::Integer),
        Column::required("instruction", ColumnType::Text),
    ],
    foreign_keys: &[ForeignKey::new("recipe_id", "recipes")],
};

/// All tables in write order (parents before children)
pub static ALL_TABLES: &[&TableSchema] = &[&RECIPES, &INGREDIENTS, &INSTRUCTIONS];

/// Get table names in write order
pub fn table_names() -> Vec<&'static str> {
    ALL_TABLES.iter().map(|t| t.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipes_table_first() {
        let names = table_names();
        assert_eq!(names, vec!["recipes", "ingredients", "instructions"]);
    }

    #[test]
    fn test_child_tables_reference_recipes() {
        for table in &[&INGREDIENTS, &INSTRUCTIONS] {
            assert_eq!(table.foreign_keys.len(), 1);
            assert_eq!(table.foreign_keys[0].references_table, "recipes");
            assert_eq!(table.foreign_keys[0].column, "recipe_id");
        }
    }
}
