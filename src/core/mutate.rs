//! Mutation API - the only legal way to change the store
//!
//! Every operation validates its inputs fully before touching state, so a
//! rejected call leaves the store exactly as it was.

use std::collections::BTreeSet;

use chrono::Utc;

use crate::core::error::CoreError;
use crate::core::material::{BomItem, Material, MaterialId};
use crate::core::store::Store;

/// Resolves the component side of a new BOM line
#[derive(Debug, Clone)]
pub enum ComponentRef {
    /// An existing material id
    Id(MaterialId),
    /// A material name; creates a new leaf when no exact match exists
    Name(String),
}

/// Editable fields of an existing BOM line
#[derive(Debug, Clone, Copy)]
pub enum LineEdit {
    Quantity(u32),
    UnitCost(f64),
}

impl Store {
    /// Create a material with a fresh id
    pub fn add_material(
        &mut self,
        name: impl Into<String>,
        base_cost: f64,
    ) -> Result<MaterialId, CoreError> {
        if base_cost < 0.0 {
            return Err(CoreError::InvalidArgument(format!(
                "base cost must be >= 0, got {}",
                base_cost
            )));
        }
        let id = self.allocate_id();
        self.materials.insert(
            id,
            Material {
                id,
                name: name.into(),
                base_cost,
                created: Utc::now(),
            },
        );
        Ok(id)
    }

    /// Set a material's base (leaf) cost. Stored even for assemblies, where
    /// the cost engine ignores it until the BOM empties again.
    pub fn set_base_cost(&mut self, id: MaterialId, value: f64) -> Result<(), CoreError> {
        if value < 0.0 {
            return Err(CoreError::InvalidArgument(format!(
                "base cost must be >= 0, got {}",
                value
            )));
        }
        let material = self
            .materials
            .get_mut(&id)
            .ok_or_else(|| CoreError::unknown_material(id))?;
        material.base_cost = value;
        Ok(())
    }

    /// Set a manual cost override. Allowed even on a currently-leaf
    /// material; it stays dormant until the material gains BOM items.
    pub fn set_override(&mut self, id: MaterialId, value: f64) -> Result<(), CoreError> {
        if value < 0.0 {
            return Err(CoreError::InvalidArgument(format!(
                "override must be >= 0, got {}",
                value
            )));
        }
        if !self.materials.contains_key(&id) {
            return Err(CoreError::unknown_material(id));
        }
        self.overrides.insert(id, value);
        Ok(())
    }

    /// Clear a cost override; a no-op when none is stored
    pub fn clear_override(&mut self, id: MaterialId) -> Result<(), CoreError> {
        if !self.materials.contains_key(&id) {
            return Err(CoreError::unknown_material(id));
        }
        self.overrides.remove(&id);
        Ok(())
    }

    /// Append a BOM line under `parent`, returning the component's id.
    ///
    /// A `Name` component that matches no existing material creates a new
    /// leaf with `base_cost = unit_cost` as part of the same call; all
    /// validation happens first, so a rejected call never leaves an orphan.
    pub fn add_line_item(
        &mut self,
        parent: MaterialId,
        component: ComponentRef,
        quantity: u32,
        unit_cost: f64,
    ) -> Result<MaterialId, CoreError> {
        if quantity < 1 {
            return Err(CoreError::InvalidArgument(
                "quantity must be >= 1".to_string(),
            ));
        }
        if unit_cost < 0.0 {
            return Err(CoreError::InvalidArgument(format!(
                "unit cost must be >= 0, got {}",
                unit_cost
            )));
        }
        if !self.materials.contains_key(&parent) {
            return Err(CoreError::unknown_material(parent));
        }

        let component_id = match component {
            ComponentRef::Id(id) => {
                if !self.materials.contains_key(&id) {
                    return Err(CoreError::unknown_material(id));
                }
                self.check_acyclic(parent, id)?;
                id
            }
            ComponentRef::Name(name) => {
                if let Some(id) = self.find_by_name(&name).map(|m| m.id) {
                    self.check_acyclic(parent, id)?;
                    id
                } else {
                    // A brand-new leaf cannot contain the parent.
                    self.add_material(name, unit_cost)?
                }
            }
        };

        self.boms.entry(parent).or_default().items.push(BomItem {
            component_id,
            quantity,
            unit_cost,
        });
        Ok(component_id)
    }

    /// Edit one field of an existing line
    pub fn edit_line_item(
        &mut self,
        parent: MaterialId,
        index: usize,
        edit: LineEdit,
    ) -> Result<(), CoreError> {
        match edit {
            LineEdit::Quantity(q) if q < 1 => {
                return Err(CoreError::InvalidArgument(
                    "quantity must be >= 1".to_string(),
                ));
            }
            LineEdit::UnitCost(c) if c < 0.0 => {
                return Err(CoreError::InvalidArgument(format!(
                    "unit cost must be >= 0, got {}",
                    c
                )));
            }
            _ => {}
        }

        let item = self.line_item_mut(parent, index)?;
        match edit {
            LineEdit::Quantity(q) => item.quantity = q,
            LineEdit::UnitCost(c) => item.unit_cost = c,
        }
        Ok(())
    }

    /// Remove a line by position, returning it.
    ///
    /// Deleting the last line leaves the BOM present-but-empty; the cost
    /// engine then treats the material as a leaf again and any override
    /// goes dormant.
    pub fn delete_line_item(
        &mut self,
        parent: MaterialId,
        index: usize,
    ) -> Result<BomItem, CoreError> {
        if !self.materials.contains_key(&parent) {
            return Err(CoreError::unknown_material(parent));
        }
        let bom = self
            .boms
            .get_mut(&parent)
            .filter(|bom| index < bom.items.len())
            .ok_or_else(|| CoreError::unknown_line(parent, index))?;
        Ok(bom.items.remove(index))
    }

    fn line_item_mut(
        &mut self,
        parent: MaterialId,
        index: usize,
    ) -> Result<&mut BomItem, CoreError> {
        if !self.materials.contains_key(&parent) {
            return Err(CoreError::unknown_material(parent));
        }
        self.boms
            .get_mut(&parent)
            .and_then(|bom| bom.items.get_mut(index))
            .ok_or_else(|| CoreError::unknown_line(parent, index))
    }

    /// Reject a parent -> component edge that would let a material contain
    /// itself, directly or transitively
    fn check_acyclic(
        &self,
        parent: MaterialId,
        component: MaterialId,
    ) -> Result<(), CoreError> {
        if component == parent || self.contains(component, parent) {
            return Err(CoreError::CycleDetected { parent, component });
        }
        Ok(())
    }

    /// Whether `target` is reachable from `from` by following BOM edges
    fn contains(&self, from: MaterialId, target: MaterialId) -> bool {
        let mut stack = vec![from];
        let mut visited = BTreeSet::new();
        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }
            for item in self.bom_items(id) {
                if item.component_id == target {
                    return true;
                }
                stack.push(item.component_id);
            }
        }
        false
    }
}
