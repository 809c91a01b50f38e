//! Seed import for the ingredient catalog. Reads a headerless two-column
//! CSV (`name,measurement_unit`) and bulk-inserts with ON CONFLICT DO
//! NOTHING, so re-running the same file is a no-op for rows that already
//! exist. Returns the number of newly created rows only.

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use diesel::prelude::*;

use crate::db::DbConn;
use crate::models::NewIngredient;
use crate::schema::ingredients;

pub fn load_ingredients(conn: &mut DbConn, path: &Path) -> anyhow::Result<usize> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    let rows = parse_ingredient_csv(file)?;

    tracing::info!("Importing {} ingredient rows from {}", rows.len(), path.display());

    let created = diesel::insert_into(ingredients::table)
        .values(&rows)
        .on_conflict_do_nothing()
        .execute(conn)
        .context("Failed to insert ingredients")?;

    Ok(created)
}

fn parse_ingredient_csv<R: Read>(reader: R) -> anyhow::Result<Vec<NewIngredient>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record.context("Malformed CSV record")?;
        let name = record.get(0).unwrap_or("").trim();
        let unit = record.get(1).unwrap_or("").trim();
        if name.is_empty() || unit.is_empty() {
            continue;
        }
        rows.push(NewIngredient {
            name: name.to_string(),
            measurement_unit: unit.to_string(),
        });
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_rows() {
        let csv = "flour,g\negg,pcs\n";
        let rows = parse_ingredient_csv(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "flour");
        assert_eq!(rows[0].measurement_unit, "g");
        assert_eq!(rows[1].name, "egg");
        assert_eq!(rows[1].measurement_unit, "pcs");
    }

    #[test]
    fn test_skips_incomplete_rows() {
        let csv = "flour,g\nonly-a-name\n,ml\n  ,  \nmilk,ml\n";
        let rows = parse_ingredient_csv(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].name, "milk");
    }

    #[test]
    fn test_trims_whitespace() {
        let csv = " butter , g \n";
        let rows = parse_ingredient_csv(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].name, "butter");
        assert_eq!(rows[0].measurement_unit, "g");
    }

    #[test]
    fn test_quoted_name_with_comma() {
        let csv = "\"salt, coarse\",g\n";
        let rows = parse_ingredient_csv(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].name, "salt, coarse");
    }
}
