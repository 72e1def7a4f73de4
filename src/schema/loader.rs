//! Schema loader for reading an application schema from disk
//!
//! One JSON file holds the whole schema. Saving never overwrites an
//! existing file.

use std::fs;
use std::path::Path;

use super::errors::{SchemaError, SchemaResult};
use super::types::AppSchema;
use crate::observability::{log_event_with_fields, Event};

/// Loads and saves application schemas
pub struct SchemaLoader;

impl SchemaLoader {
    /// Parses a schema from a JSON string.
    pub fn from_json(content: &str) -> SchemaResult<AppSchema> {
        serde_json::from_str(content)
            .map_err(|e| SchemaError::malformed(format!("Invalid schema JSON: {}", e)))
    }

    /// Loads a schema file.
    pub fn load(path: &Path) -> SchemaResult<AppSchema> {
        let content =
            fs::read_to_string(path).map_err(|e| SchemaError::io(path.display().to_string(), e))?;

        let schema = Self::from_json(&content)?;

        let path_str = path.display().to_string();
        let tables = schema.table_count().to_string();
        let version = schema.version().to_string();
        log_event_with_fields(
            Event::SchemaLoaded,
            &[
                ("path", path_str.as_str()),
                ("tables", tables.as_str()),
                ("version", version.as_str()),
            ],
        );

        Ok(schema)
    }

    /// Saves a schema to `path`, creating parent directories as needed.
    pub fn save(schema: &AppSchema, path: &Path) -> SchemaResult<()> {
        if path.exists() {
            return Err(SchemaError::malformed(format!(
                "Refusing to overwrite existing schema file '{}'",
                path.display()
            )));
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .map_err(|e| SchemaError::io(parent.display().to_string(), e))?;
            }
        }

        let content = serde_json::to_string_pretty(schema)
            .map_err(|e| SchemaError::malformed(format!("Failed to serialize schema: {}", e)))?;

        fs::write(path, content).map_err(|e| SchemaError::io(path.display().to_string(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::types::{ColumnSchema, SchemaLookup, TableSchema};
    use tempfile::TempDir;

    fn sample_schema() -> AppSchema {
        let tasks = TableSchema::new(
            "tasks",
            vec![
                ColumnSchema::string("title"),
                ColumnSchema::string("project_id").indexed(),
            ],
        )
        .unwrap();
        AppSchema::new(1, vec![tasks]).unwrap()
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("metadata").join("schema.json");

        SchemaLoader::save(&sample_schema(), &path).unwrap();
        let loaded = SchemaLoader::load(&path).unwrap();

        assert_eq!(loaded, sample_schema());
        assert!(loaded.lookup_column("tasks", "project_id").unwrap().is_indexed);
    }

    #[test]
    fn test_save_refuses_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("schema.json");

        SchemaLoader::save(&sample_schema(), &path).unwrap();
        let result = SchemaLoader::save(&sample_schema(), &path);

        assert_eq!(result.unwrap_err().code().code(), "AERO_SCHEMA_MALFORMED");
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = SchemaLoader::load(&temp_dir.path().join("nope.json"));

        assert_eq!(result.unwrap_err().code().code(), "AERO_SCHEMA_IO");
    }

    #[test]
    fn test_malformed_json() {
        let result = SchemaLoader::from_json("{ \"version\": 1, \"tables\": ");
        assert_eq!(result.unwrap_err().code().code(), "AERO_SCHEMA_MALFORMED");
    }
}
