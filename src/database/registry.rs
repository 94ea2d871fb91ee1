//! Registry of named databases over a snapshot directory.
//!
//! An explicitly owned repository with caller-controlled lifetime, never a
//! process-wide singleton. Each database persists as `<name>.json` under the
//! registry root; opening the registry loads every snapshot found there.
//! Mutating calls are serialized by the caller (single logical writer per
//! database); the registry itself holds no locks.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::map::Entry;
use indexmap::IndexMap;

use crate::error::{DbError, DbResult};
use crate::observability::Logger;

use super::database::Database;

/// Owned repository mapping database name to live database
#[derive(Debug)]
pub struct DatabaseRegistry {
    root: PathBuf,
    databases: IndexMap<String, Database>,
}

impl DatabaseRegistry {
    /// Opens a registry over the given root directory, creating it if
    /// missing and loading every `*.json` snapshot inside.
    ///
    /// A malformed snapshot file fails the open; rows dropped during
    /// re-validation do not, and are logged per database.
    pub fn open(root: impl Into<PathBuf>) -> DbResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;

        let mut paths = Vec::new();
        for entry in fs::read_dir(&root)? {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut databases = IndexMap::new();
        for path in paths {
            let (database, report) = Database::load_from_file(&path)?;
            for dropped in &report.dropped {
                Logger::warn(
                    "row_dropped_on_load",
                    &[
                        ("database", database.name()),
                        ("table", &dropped.table),
                        ("row_id", &dropped.row_id.to_string()),
                        ("columns", &dropped.columns.join(",")),
                    ],
                );
            }
            Logger::info(
                "database_loaded",
                &[
                    ("name", database.name()),
                    ("tables", &database.table_count().to_string()),
                ],
            );
            databases.insert(database.name().to_string(), database);
        }

        Ok(Self { root, databases })
    }

    /// Creates an empty database and persists its first snapshot.
    pub fn create(&mut self, name: &str) -> DbResult<&mut Database> {
        let name = name.trim();
        if name.contains(['/', '\\']) {
            return Err(DbError::structural(
                "database name must not contain path separators",
            ));
        }
        let path = self.root.join(format!("{name}.json"));
        match self.databases.entry(name.to_string()) {
            Entry::Occupied(_) => Err(DbError::already_exists(format!("database '{name}'"))),
            Entry::Vacant(slot) => {
                let database = Database::new(name)?;
                database.save_to_file(&path)?;
                Logger::info("database_created", &[("name", name)]);
                Ok(slot.insert(database))
            }
        }
    }

    /// Looks up a database by name.
    pub fn get(&self, name: &str) -> Option<&Database> {
        self.databases.get(name)
    }

    /// Looks up a database by name for mutation.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Database> {
        self.databases.get_mut(name)
    }

    /// Deletes a database and its snapshot file.
    pub fn delete(&mut self, name: &str) -> DbResult<()> {
        if self.databases.shift_remove(name).is_none() {
            return Err(DbError::not_found(format!("database '{name}'")));
        }
        let path = self.path_for(name);
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Logger::info("database_deleted", &[("name", name)]);
        Ok(())
    }

    /// Persists the named database's current state.
    pub fn save(&self, name: &str) -> DbResult<()> {
        let database = self
            .databases
            .get(name)
            .ok_or_else(|| DbError::not_found(format!("database '{name}'")))?;
        database.save_to_file(&self.path_for(name))
    }

    /// Iterates database names in load/creation order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.databases.keys().map(String::as_str)
    }

    /// Returns the number of live databases.
    pub fn len(&self) -> usize {
        self.databases.len()
    }

    /// True when no databases are registered.
    pub fn is_empty(&self) -> bool {
        self.databases.is_empty()
    }

    /// Returns the registry root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_persists_snapshot() {
        let tmp = TempDir::new().unwrap();
        let mut registry = DatabaseRegistry::open(tmp.path()).unwrap();

        registry.create("depot").unwrap();
        assert!(tmp.path().join("depot.json").exists());
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["depot"]);
    }

    #[test]
    fn test_duplicate_database_rejected() {
        let tmp = TempDir::new().unwrap();
        let mut registry = DatabaseRegistry::open(tmp.path()).unwrap();

        registry.create("depot").unwrap();
        let err = registry.create("depot").unwrap_err();
        assert_eq!(err.code(), "ALREADY_EXISTS");
    }

    #[test]
    fn test_blank_name_rejected() {
        let tmp = TempDir::new().unwrap();
        let mut registry = DatabaseRegistry::open(tmp.path()).unwrap();
        assert!(registry.create("  ").is_err());
        assert!(registry.create("a/b").is_err());
    }

    #[test]
    fn test_delete_removes_file() {
        let tmp = TempDir::new().unwrap();
        let mut registry = DatabaseRegistry::open(tmp.path()).unwrap();

        registry.create("depot").unwrap();
        registry.delete("depot").unwrap();
        assert!(!tmp.path().join("depot.json").exists());
        assert!(registry.is_empty());

        assert_eq!(registry.delete("depot").unwrap_err().code(), "NOT_FOUND");
    }

    #[test]
    fn test_reopen_loads_existing_snapshots() {
        let tmp = TempDir::new().unwrap();
        {
            let mut registry = DatabaseRegistry::open(tmp.path()).unwrap();
            registry.create("alpha").unwrap();
            registry.create("beta").unwrap();
        }

        let registry = DatabaseRegistry::open(tmp.path()).unwrap();
        assert_eq!(registry.len(), 2);
        assert!(registry.get("alpha").is_some());
        assert!(registry.get("beta").is_some());
    }

    #[test]
    fn test_non_json_files_ignored() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("notes.txt"), "not a snapshot").unwrap();

        let registry = DatabaseRegistry::open(tmp.path()).unwrap();
        assert!(registry.is_empty());
    }
}
