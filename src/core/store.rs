//! In-memory material store - storage and lookup only
//!
//! The store holds the universe of materials, their BOMs, and the cost
//! override map, keyed by integer id. It allocates ids and answers lookups;
//! all changes go through the mutation methods in [`crate::core::mutate`].

use std::collections::BTreeMap;

use chrono::Utc;

use crate::core::error::CoreError;
use crate::core::material::{Bom, BomItem, Material, MaterialId};

/// The universe of materials, their BOMs, and cost overrides
#[derive(Debug, Clone)]
pub struct Store {
    pub(crate) materials: BTreeMap<MaterialId, Material>,
    pub(crate) boms: BTreeMap<MaterialId, Bom>,
    pub(crate) overrides: BTreeMap<MaterialId, f64>,
    pub(crate) next_id: MaterialId,
}

impl Store {
    /// Create an empty store. Ids start at 1.
    pub fn new() -> Self {
        Self {
            materials: BTreeMap::new(),
            boms: BTreeMap::new(),
            overrides: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Build the demo data set: a Car assembled from a Frame and an Engine,
    /// with the Engine built from Pistons and Valves.
    pub fn seed() -> Self {
        let mut store = Self::new();

        for (name, base_cost) in [
            ("Car", 0.0),
            ("Frame", 2000.0),
            ("Engine", 0.0),
            ("Piston", 250.0),
            ("Valve", 75.0),
        ] {
            let id = store.allocate_id();
            store.materials.insert(
                id,
                Material {
                    id,
                    name: name.to_string(),
                    base_cost,
                    created: Utc::now(),
                },
            );
        }

        store.boms.insert(
            1,
            Bom {
                items: vec![
                    BomItem { component_id: 2, quantity: 1, unit_cost: 2000.0 },
                    BomItem { component_id: 3, quantity: 1, unit_cost: 5000.0 },
                ],
            },
        );
        store.boms.insert(
            3,
            Bom {
                items: vec![
                    BomItem { component_id: 4, quantity: 4, unit_cost: 250.0 },
                    BomItem { component_id: 5, quantity: 16, unit_cost: 75.0 },
                ],
            },
        );

        store
    }

    /// Take the next id off the counter. Ids are never reused, even after
    /// a reload (the counter is persisted with the rest of the state).
    pub(crate) fn allocate_id(&mut self) -> MaterialId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Look up a material by id
    pub fn material(&self, id: MaterialId) -> Result<&Material, CoreError> {
        self.materials
            .get(&id)
            .ok_or_else(|| CoreError::unknown_material(id))
    }

    /// First material with the exact given name, in ascending-id order.
    /// A best-effort convenience for lookup-or-create; names are not unique.
    pub fn find_by_name(&self, name: &str) -> Option<&Material> {
        self.materials.values().find(|m| m.name == name)
    }

    /// All materials in ascending-id order
    pub fn materials(&self) -> impl Iterator<Item = &Material> {
        self.materials.values()
    }

    /// A material's BOM line items, in display order. Empty when the
    /// material has no BOM (or an emptied one).
    pub fn bom_items(&self, id: MaterialId) -> &[BomItem] {
        self.boms
            .get(&id)
            .map(|bom| bom.items.as_slice())
            .unwrap_or(&[])
    }

    /// The manual cost override for a material, if one is stored
    pub fn override_for(&self, id: MaterialId) -> Option<f64> {
        self.overrides.get(&id).copied()
    }

    /// Number of materials in the store
    pub fn material_count(&self) -> usize {
        self.materials.len()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store() {
        let store = Store::new();
        assert_eq!(store.material_count(), 0);
        assert!(store.material(1).is_err());
        assert!(store.bom_items(1).is_empty());
        assert!(store.override_for(1).is_none());
    }

    #[test]
    fn test_seed_data() {
        let store = Store::seed();
        assert_eq!(store.material_count(), 5);
        assert_eq!(store.material(1).unwrap().name, "Car");
        assert_eq!(store.material(2).unwrap().base_cost, 2000.0);
        assert_eq!(store.bom_items(1).len(), 2);
        assert_eq!(store.bom_items(3).len(), 2);
        assert!(store.bom_items(2).is_empty());
        assert_eq!(store.next_id, 6);
    }

    #[test]
    fn test_find_by_name() {
        let store = Store::seed();
        assert_eq!(store.find_by_name("Engine").unwrap().id, 3);
        assert!(store.find_by_name("engine").is_none());
        assert!(store.find_by_name("Widget").is_none());
    }

    #[test]
    fn test_unknown_material_is_not_found() {
        let store = Store::seed();
        let err = store.material(99).unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));
    }
}
