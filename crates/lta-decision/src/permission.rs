use lta_types::{ExecutabilityLevel, ExecutionPermission, ReasonTag};

/// Stage G — Execution Permission. Derived from the tag set alone, never
/// from confidence: any `Block` tag denies outright, any remaining
/// `Degrade` tag reduces, otherwise the signal is fully allowed.
pub fn from_tags(tags: &[ReasonTag]) -> ExecutionPermission {
    if tags.iter().any(|t| t.executability() == ExecutabilityLevel::Block) {
        ExecutionPermission::Deny
    } else if tags.iter().any(|t| t.executability() == ExecutabilityLevel::Degrade) {
        ExecutionPermission::AllowReduced
    } else {
        ExecutionPermission::Allow
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_tags_is_full_allow() {
        assert_eq!(from_tags(&[]), ExecutionPermission::Allow);
    }

    #[test]
    fn degrade_tag_reduces_permission() {
        assert_eq!(from_tags(&[ReasonTag::RotationRisk]), ExecutionPermission::AllowReduced);
    }

    #[test]
    fn block_tag_always_denies_even_alongside_degrade_tags() {
        assert_eq!(from_tags(&[ReasonTag::RotationRisk, ReasonTag::ExtremeRegime]), ExecutionPermission::Deny);
    }
}
