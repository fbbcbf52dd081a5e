//! Workspace - the store plus its backing data file
//!
//! Callers mutate through the workspace so that every successful change is
//! persisted in full before the result is returned. Reads go straight to
//! the store reference.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::error::CoreError;
use crate::core::material::{BomItem, MaterialId};
use crate::core::mutate::{ComponentRef, LineEdit};
use crate::core::persist::{self, PersistError};
use crate::core::store::Store;

/// A store bound to its data file
#[derive(Debug)]
pub struct Workspace {
    path: PathBuf,
    store: Store,
}

impl Workspace {
    /// Create a new data file, optionally seeded with the demo data set
    pub fn init(path: &Path, seed: bool, force: bool) -> Result<Self, WorkspaceError> {
        if path.exists() && !force {
            return Err(PersistError::AlreadyExists(path.to_path_buf()).into());
        }
        let store = if seed { Store::seed() } else { Store::new() };
        let ws = Self {
            path: path.to_path_buf(),
            store,
        };
        ws.save()?;
        Ok(ws)
    }

    /// Open an existing data file
    pub fn open(path: &Path) -> Result<Self, WorkspaceError> {
        let store = persist::load(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            store,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn add_material(&mut self, name: &str, base_cost: f64) -> Result<MaterialId, WorkspaceError> {
        let id = self.store.add_material(name, base_cost)?;
        self.save()?;
        Ok(id)
    }

    pub fn set_base_cost(&mut self, id: MaterialId, value: f64) -> Result<(), WorkspaceError> {
        self.store.set_base_cost(id, value)?;
        self.save()
    }

    pub fn set_override(&mut self, id: MaterialId, value: f64) -> Result<(), WorkspaceError> {
        self.store.set_override(id, value)?;
        self.save()
    }

    pub fn clear_override(&mut self, id: MaterialId) -> Result<(), WorkspaceError> {
        self.store.clear_override(id)?;
        self.save()
    }

    pub fn add_line_item(
        &mut self,
        parent: MaterialId,
        component: ComponentRef,
        quantity: u32,
        unit_cost: f64,
    ) -> Result<MaterialId, WorkspaceError> {
        let id = self.store.add_line_item(parent, component, quantity, unit_cost)?;
        self.save()?;
        Ok(id)
    }

    pub fn edit_line_item(
        &mut self,
        parent: MaterialId,
        index: usize,
        edit: LineEdit,
    ) -> Result<(), WorkspaceError> {
        self.store.edit_line_item(parent, index, edit)?;
        self.save()
    }

    pub fn delete_line_item(
        &mut self,
        parent: MaterialId,
        index: usize,
    ) -> Result<BomItem, WorkspaceError> {
        let item = self.store.delete_line_item(parent, index)?;
        self.save()?;
        Ok(item)
    }

    fn save(&self) -> Result<(), WorkspaceError> {
        persist::save(&self.path, &self.store)?;
        Ok(())
    }
}

/// Errors from workspace operations: a rejected mutation or a failed
/// read/write of the data file
#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Persist(#[from] PersistError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_init_then_open() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("materials.json");

        Workspace::init(&path, true, false).unwrap();
        let ws = Workspace::open(&path).unwrap();
        assert_eq!(ws.store().material_count(), 5);
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("materials.json");

        Workspace::init(&path, false, false).unwrap();
        let err = Workspace::init(&path, false, false).unwrap_err();
        assert!(matches!(
            err,
            WorkspaceError::Persist(PersistError::AlreadyExists(_))
        ));

        // --force replaces the file.
        let ws = Workspace::init(&path, true, true).unwrap();
        assert_eq!(ws.store().material_count(), 5);
    }

    #[test]
    fn test_open_missing_file() {
        let tmp = tempdir().unwrap();
        let err = Workspace::open(&tmp.path().join("materials.json")).unwrap_err();
        assert!(matches!(
            err,
            WorkspaceError::Persist(PersistError::Missing { .. })
        ));
    }

    #[test]
    fn test_mutations_persist_immediately() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("materials.json");

        let mut ws = Workspace::init(&path, true, false).unwrap();
        ws.set_override(1, 6500.0).unwrap();
        ws.delete_line_item(3, 1).unwrap();

        let reopened = Workspace::open(&path).unwrap();
        assert_eq!(reopened.store().override_for(1), Some(6500.0));
        assert_eq!(reopened.store().bom_items(3).len(), 1);
    }

    #[test]
    fn test_rejected_mutation_is_not_persisted() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("materials.json");

        let mut ws = Workspace::init(&path, true, false).unwrap();
        assert!(ws.set_override(1, -1.0).is_err());

        let reopened = Workspace::open(&path).unwrap();
        assert!(reopened.store().override_for(1).is_none());
    }
}
