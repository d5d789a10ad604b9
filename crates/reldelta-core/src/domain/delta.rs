//! The release delta: final aggregate of one transition.

use serde::{Deserialize, Serialize};

use crate::domain::commit::Commit;
use crate::domain::snapshot::ReleaseSnapshot;
use crate::domain::work_item::WorkItem;

/// The computed delta between a previously deployed release and the release
/// in progress.
///
/// Immutable once constructed. `work_items` keeps the upstream order with
/// duplicates collapsed; `commits` is grouped by backend (distributed first,
/// then centralized), each group in API order, never interleaved by
/// timestamp across backends.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReleaseDelta {
    /// The previously deployed snapshot.
    pub baseline: ReleaseSnapshot,

    /// The snapshot being deployed.
    pub target: ReleaseSnapshot,

    /// Work items introduced by the transition.
    pub work_items: Vec<WorkItem>,

    /// Source-control changes introduced by the transition.
    pub commits: Vec<Commit>,
}

impl ReleaseDelta {
    /// `true` when the transition carries no work items and no commits.
    pub fn is_empty(&self) -> bool {
        self.work_items.is_empty() && self.commits.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reldelta_api::{RawArtifact, RawEnvironment, RawRelease};

    fn snapshot(id: i64) -> ReleaseSnapshot {
        let raw = RawRelease {
            id,
            definition_name: "svc".to_string(),
            web_link: format!("https://rm.example.com/release/{id}"),
            artifacts: vec![RawArtifact {
                is_primary: true,
                build_version: "1.0.0".to_string(),
                build_link: "https://ci.example.com/build/1".to_string(),
            }],
            environments: vec![RawEnvironment {
                definition_environment_id: 1,
                name: "Prod".to_string(),
            }],
        };
        ReleaseSnapshot::from_raw(&raw, 1).expect("snapshot")
    }

    #[test]
    fn test_is_empty_reflects_contents() {
        let delta = ReleaseDelta {
            baseline: snapshot(10),
            target: snapshot(11),
            work_items: vec![],
            commits: vec![],
        };
        assert!(delta.is_empty());
    }

    #[test]
    fn test_delta_serde_roundtrip() {
        let delta = ReleaseDelta {
            baseline: snapshot(10),
            target: snapshot(11),
            work_items: vec![],
            commits: vec![],
        };
        let json = serde_json::to_string(&delta).expect("serialize");
        let back: ReleaseDelta = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(delta, back);
    }
}
