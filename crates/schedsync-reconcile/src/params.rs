//! Flattening of ordered parameter lists into lookup maps.

use std::collections::HashMap;

use schedsync_core::{JobParam, LineageId, ParamValue, LINEAGE_ID_PARAM};

/// Flattens an ordered parameter list into a name-to-value map.
///
/// Duplicate names are not expected in well-formed bundles but must not
/// fail; the last occurrence wins.
#[must_use]
pub fn param_map(params: &[JobParam]) -> HashMap<String, ParamValue> {
    let mut map = HashMap::with_capacity(params.len());
    for param in params {
        map.insert(param.name.clone(), param.value.clone());
    }
    map
}

/// The typed lineage key of a desired parameter map, when it carries one.
///
/// A definition without a lineage key can never match a live job and is
/// always treated as new.
#[must_use]
pub fn lineage_key(map: &HashMap<String, ParamValue>) -> Option<LineageId> {
    map.get(LINEAGE_ID_PARAM).and_then(LineageId::from_value)
}
