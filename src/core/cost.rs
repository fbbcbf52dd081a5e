//! Cost engine - shallow roll-up with override precedence
//!
//! An assembly's cost is the sum of quantity x cached unit cost over its
//! direct line items, never a recursive walk of descendants. Line costs are
//! snapshots: editing a nested component's own cost does not ripple upward
//! until someone re-enters the parent's line. Costs are recomputed from the
//! store on every call, so they always reflect the latest edits.

use crate::core::error::CoreError;
use crate::core::material::MaterialId;
use crate::core::store::Store;

/// Computed roll-up for a material, or `None` when it has no BOM items
pub fn computed_cost(store: &Store, id: MaterialId) -> Option<f64> {
    let items = store.bom_items(id);
    if items.is_empty() {
        return None;
    }
    Some(items.iter().map(|item| item.line_cost()).sum())
}

/// Effective cost of a material.
///
/// Assemblies get the manual override when one is set, otherwise the
/// computed roll-up. Leaves (no BOM items) get their base cost; an override
/// stored for a leaf stays dormant.
pub fn cost(store: &Store, id: MaterialId) -> Result<f64, CoreError> {
    let material = store.material(id)?;
    match computed_cost(store, id) {
        Some(computed) => Ok(store.override_for(id).unwrap_or(computed)),
        None => Ok(material.base_cost),
    }
}
