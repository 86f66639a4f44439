//! Property projection for unit views.

use crate::models::Unit;
use crate::views::PropertyView;

/// Name/value pairs of a unit's properties in repository order. Duplicates are kept.
pub fn properties_for_unit(unit: &Unit) -> Vec<PropertyView> {
    unit.properties
        .iter()
        .map(|pv| PropertyView {
            name: pv.name.clone(),
            value: pv.value.clone(),
        })
        .collect()
}
