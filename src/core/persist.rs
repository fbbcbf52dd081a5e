//! Data file persistence
//!
//! The full state (materials, BOM edges grouped by parent, the override map,
//! and the id counter) lives in one JSON document. It is hydrated once per
//! invocation and rewritten after every successful mutation.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::material::{Bom, BomItem, Material, MaterialId};
use crate::core::store::Store;

/// On-disk shape of the store
#[derive(Debug, Serialize, Deserialize)]
struct StateFile {
    materials: Vec<Material>,
    boms: Vec<SavedBom>,
    #[serde(default)]
    overrides: BTreeMap<MaterialId, f64>,
    next_id: MaterialId,
}

/// One material's BOM edges, grouped by parent
#[derive(Debug, Serialize, Deserialize)]
struct SavedBom {
    parent_id: MaterialId,
    items: Vec<BomItem>,
}

/// Default data file location in the per-user data directory
pub fn default_data_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "bomtally")
        .map(|dirs| dirs.data_dir().join("materials.json"))
}

/// Hydrate a store from the data file at `path`
pub fn load(path: &Path) -> Result<Store, PersistError> {
    if !path.exists() {
        return Err(PersistError::Missing {
            path: path.to_path_buf(),
        });
    }
    let content = fs::read_to_string(path)?;
    let state: StateFile = serde_json::from_str(&content)?;

    let mut store = Store::new();
    for material in state.materials {
        store.materials.insert(material.id, material);
    }
    for bom in state.boms {
        store.boms.insert(bom.parent_id, Bom { items: bom.items });
    }
    store.overrides = state.overrides;
    // Hand-edited files may lag the counter behind existing ids.
    store.next_id = state
        .next_id
        .max(store.materials.keys().next_back().map_or(0, |id| id + 1))
        .max(1);
    Ok(store)
}

/// Write the full state to `path`, creating parent directories as needed
pub fn save(path: &Path, store: &Store) -> Result<(), PersistError> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }
    }
    let state = StateFile {
        materials: store.materials.values().cloned().collect(),
        boms: store
            .boms
            .iter()
            .map(|(parent_id, bom)| SavedBom {
                parent_id: *parent_id,
                items: bom.items.clone(),
            })
            .collect(),
        overrides: store.overrides.clone(),
        next_id: store.next_id,
    };
    let json = serde_json::to_string_pretty(&state)?;
    fs::write(path, json)?;
    Ok(())
}

/// Errors that can occur reading or writing the data file
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("no data file at {path:?}. Run 'bomtally init' to create one.")]
    Missing { path: PathBuf },

    #[error("data file already exists at {0:?}")]
    AlreadyExists(PathBuf),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed data file: {0}")]
    Format(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::mutate::ComponentRef;
    use tempfile::tempdir;

    #[test]
    fn test_roundtrip() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("materials.json");

        let mut store = Store::seed();
        store.set_override(1, 6500.0).unwrap();
        save(&path, &store).unwrap();

        let loaded = load(&path).unwrap();
        assert_eq!(loaded.material_count(), 5);
        assert_eq!(loaded.material(3).unwrap().name, "Engine");
        assert_eq!(loaded.bom_items(1), store.bom_items(1));
        assert_eq!(loaded.override_for(1), Some(6500.0));
        assert_eq!(loaded.next_id, store.next_id);
    }

    #[test]
    fn test_ids_stay_monotonic_across_reload() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("materials.json");

        let mut store = Store::seed();
        store
            .add_line_item(3, ComponentRef::Name("Gasket".to_string()), 1, 5.0)
            .unwrap();
        save(&path, &store).unwrap();

        let mut loaded = load(&path).unwrap();
        let id = loaded.add_material("Bolt", 0.10).unwrap();
        assert_eq!(id, 7);
    }

    #[test]
    fn test_missing_file() {
        let tmp = tempdir().unwrap();
        let err = load(&tmp.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, PersistError::Missing { .. }));
    }

    #[test]
    fn test_malformed_file() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("materials.json");
        fs::write(&path, "not json").unwrap();
        let err = load(&path).unwrap_err();
        assert!(matches!(err, PersistError::Format(_)));
    }

    #[test]
    fn test_counter_clamped_to_existing_ids() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("materials.json");
        fs::write(
            &path,
            r#"{
                "materials": [
                    {"id": 9, "name": "Widget", "base_cost": 1.0,
                     "created": "2026-01-01T00:00:00Z"}
                ],
                "boms": [],
                "overrides": {},
                "next_id": 2
            }"#,
        )
        .unwrap();

        let mut store = load(&path).unwrap();
        assert_eq!(store.add_material("Fresh", 0.0).unwrap(), 10);
    }
}
