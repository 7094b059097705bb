use common::types::kafka::{CLEANUP_POLICY_COMPACT, CLEANUP_POLICY_CONFIG};
use common::types::{SourceKind, TopicConfigOverrides};

/// Topic configs implied by the sink's kind. Non-windowed tables are
/// changelogs and get a compacted topic; everything else keeps the broker
/// default.
pub fn cleanup_policy_overrides(kind: SourceKind, windowed: bool) -> TopicConfigOverrides {
    let mut overrides = TopicConfigOverrides::new();
    if kind == SourceKind::Table && !windowed {
        overrides.insert(
            CLEANUP_POLICY_CONFIG.to_string(),
            CLEANUP_POLICY_COMPACT.to_string(),
        );
    }
    overrides
}
