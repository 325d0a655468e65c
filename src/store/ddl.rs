use crate::schema::{ColumnType, TableSchema};

/// Generate CREATE TABLE SQL for a table schema.
///
/// `IF NOT EXISTS` so reruns append to an existing database; nothing here
/// enforces uniqueness, so rerunning a load duplicates rows.
pub fn generate_create_table(schema: &TableSchema) -> String {
    let mut sql = format!("CREATE TABLE IF NOT EXISTS {} (\n", schema.name);
    let mut columns = Vec::new();

    for col in schema.columns {
        let sql_type = match col.col_type {
            ColumnType::Integer => "INTEGER",
            ColumnType::Text => "TEXT",
        };

        // id is the rowid alias; SQLite assigns it on insert
        let pk = if col.name == "id" { " PRIMARY KEY" } else { "" };
        let null_constraint = if !col.nullable && col.name != "id" {
            " NOT NULL"
        } else {
            ""
        };

        columns.push(format!(
            "    {} {}{}{}",
            col.name, sql_type, pk, null_constraint
        ));
    }

    for fk in schema.foreign_keys {
        columns.push(format!(
            "    FOREIGN KEY ({}) REFERENCES {}({})",
            fk.column, fk.references_table, fk.references_column
        ));
    }

    sql.push_str(&columns.join(",\n"));
    sql.push_str("\n)");

    sql
}

/// Generate CREATE INDEX statements for foreign key columns
pub fn generate_indexes(schema: &TableSchema) -> Vec<String> {
    schema
        .foreign_keys
        .iter()
        .map(|fk| {
            format!(
                "CREATE INDEX IF NOT EXISTS idx_{}_{} ON {}({})",
                schema.name, fk.column, schema.name, fk.column
            )
        })
        .collect()
}
