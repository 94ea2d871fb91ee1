//! Database: a named, ordered mapping of table name to table.

use indexmap::IndexMap;

use crate::error::{DbError, DbResult};
use crate::table::Table;

/// A named collection of tables
#[derive(Debug, Clone, PartialEq)]
pub struct Database {
    name: String,
    tables: IndexMap<String, Table>,
}

impl Database {
    /// Creates an empty database. The name must be non-empty after trimming.
    pub fn new(name: impl Into<String>) -> DbResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DbError::structural("database name must not be empty"));
        }
        Ok(Self {
            name,
            tables: IndexMap::new(),
        })
    }

    /// Reconstructs a database from snapshot parts.
    pub(crate) fn from_parts(name: String, tables: IndexMap<String, Table>) -> Self {
        Self { name, tables }
    }

    /// Returns the database name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Creates an empty table under a unique, non-blank name.
    pub fn create_table(&mut self, name: &str) -> DbResult<&mut Table> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DbError::structural("table name must not be empty"));
        }
        if self.tables.contains_key(name) {
            return Err(DbError::already_exists(format!(
                "table '{name}' in database '{}'",
                self.name
            )));
        }
        let entry = self
            .tables
            .entry(name.to_string())
            .or_insert_with(|| Table::new(name));
        Ok(entry)
    }

    /// Deletes a table and every row in it.
    pub fn delete_table(&mut self, name: &str) -> DbResult<()> {
        self.tables
            .shift_remove(name)
            .map(|_| ())
            .ok_or_else(|| {
                DbError::not_found(format!("table '{name}' in database '{}'", self.name))
            })
    }

    /// Looks up a table by name.
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    /// Looks up a table by name for mutation.
    pub fn table_mut(&mut self, name: &str) -> Option<&mut Table> {
        self.tables.get_mut(name)
    }

    /// Iterates table names in creation order.
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// Iterates tables in creation order.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.values()
    }

    /// Returns the number of tables.
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_name_rejected() {
        assert!(Database::new("  ").is_err());
        assert!(Database::new("inventory").is_ok());
    }

    #[test]
    fn test_create_and_delete_table() {
        let mut db = Database::new("inventory").unwrap();
        db.create_table("parts").unwrap();
        assert!(db.table("parts").is_some());

        db.delete_table("parts").unwrap();
        assert!(db.table("parts").is_none());
        assert_eq!(db.delete_table("parts").unwrap_err().code(), "NOT_FOUND");
    }

    #[test]
    fn test_duplicate_table_name_rejected() {
        let mut db = Database::new("inventory").unwrap();
        db.create_table("parts").unwrap();
        let err = db.create_table("parts").unwrap_err();
        assert_eq!(err.code(), "ALREADY_EXISTS");
    }

    #[test]
    fn test_blank_table_name_rejected() {
        let mut db = Database::new("inventory").unwrap();
        let err = db.create_table("   ").unwrap_err();
        assert_eq!(err.code(), "STRUCTURAL_ERROR");
    }

    #[test]
    fn test_table_names_in_creation_order() {
        let mut db = Database::new("inventory").unwrap();
        db.create_table("zoo").unwrap();
        db.create_table("arc").unwrap();
        let names: Vec<_> = db.table_names().collect();
        assert_eq!(names, vec!["zoo", "arc"]);
    }
}
