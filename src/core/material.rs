//! Material entity and BOM line items

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Integer identifier for a material, assigned by the store from a
/// monotonically increasing counter and never reused.
pub type MaterialId = u32;

/// A material: a raw part, a purchased piece, or an assembly
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    /// Unique identifier
    pub id: MaterialId,

    /// Display name (no uniqueness enforced)
    pub name: String,

    /// Cost used while the material has no BOM items (a leaf).
    /// Retained but ignored once the material becomes an assembly.
    pub base_cost: f64,

    /// Creation timestamp
    pub created: DateTime<Utc>,
}

/// BOM line item - references a component with quantity and a unit-cost snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BomItem {
    /// Component material id
    pub component_id: MaterialId,

    /// Quantity of this component consumed (>= 1)
    pub quantity: u32,

    /// Unit cost captured when the line was added or last edited.
    /// Deliberately not kept in sync with the component's own live cost;
    /// a parent's roll-up only moves when someone re-enters the line.
    pub unit_cost: f64,
}

impl BomItem {
    /// Extended cost of this line (quantity x unit cost)
    pub fn line_cost(&self) -> f64 {
        f64::from(self.quantity) * self.unit_cost
    }
}

/// Bill of materials for one material. Item order is display order.
///
/// A BOM that has had all its items deleted stays present-but-empty; the
/// cost engine treats it the same as no BOM at all.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Bom {
    /// Ordered line items
    #[serde(default)]
    pub items: Vec<BomItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_cost() {
        let item = BomItem {
            component_id: 4,
            quantity: 4,
            unit_cost: 250.0,
        };
        assert_eq!(item.line_cost(), 1000.0);
    }

    #[test]
    fn test_material_roundtrip() {
        let material = Material {
            id: 2,
            name: "Frame".to_string(),
            base_cost: 2000.0,
            created: Utc::now(),
        };

        let json = serde_json::to_string(&material).unwrap();
        let parsed: Material = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.id, 2);
        assert_eq!(parsed.name, "Frame");
        assert_eq!(parsed.base_cost, 2000.0);
    }

    #[test]
    fn test_bom_items_default_empty() {
        let bom: Bom = serde_json::from_str("{}").unwrap();
        assert!(bom.items.is_empty());
    }
}
