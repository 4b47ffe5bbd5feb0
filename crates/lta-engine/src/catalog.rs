use std::collections::BTreeMap;

use lta_types::{ReasonTag, ReasonTagInfo};

/// Operator-facing registry of every reason tag the engine can emit, for
/// UI/diagnostic consumption (§6). Built fresh on each call from the
/// closed `ReasonTag` enumeration — there is nothing to cache.
pub fn reason_tag_catalog() -> BTreeMap<ReasonTag, ReasonTagInfo> {
    ReasonTag::all()
        .iter()
        .map(|tag| {
            (
                *tag,
                ReasonTagInfo {
                    executability_level: tag.executability(),
                    human_explanation: tag.human_explanation().to_string(),
                },
            )
        })
        .collect()
}
