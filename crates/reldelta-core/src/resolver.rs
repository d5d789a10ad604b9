//! Snapshot resolution: picking the baseline and target releases out of a
//! candidate list.

use reldelta_api::RawRelease;

use crate::domain::error::{DeltaError, Result};
use crate::domain::snapshot::{ReleaseSnapshot, SnapshotRole};

/// The resolved pair of snapshots for one transition.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotPair {
    /// The previously deployed release.
    pub baseline: ReleaseSnapshot,
    /// The release in progress.
    pub target: ReleaseSnapshot,
}

/// Resolve the target and baseline snapshots from `candidates`.
///
/// The target is the candidate whose id matches `requested_id`; the baseline
/// is the first candidate with any other id. Resolution is independent of
/// candidate order.
///
/// Caller contract: the candidate list is expected to already be narrowed to
/// the two most recent non-failed deployments of one environment. With more
/// than two candidates the first non-matching one wins; no heuristic choice
/// is attempted here.
pub fn resolve_snapshots(
    candidates: &[RawRelease],
    requested_id: i64,
    environment_id: i64,
) -> Result<SnapshotPair> {
    let target = candidates
        .iter()
        .find(|r| r.id == requested_id)
        .ok_or(DeltaError::SnapshotNotFound {
            role: SnapshotRole::Target,
            requested_id,
        })?;

    let baseline = candidates
        .iter()
        .find(|r| r.id != requested_id)
        .ok_or(DeltaError::SnapshotNotFound {
            role: SnapshotRole::Baseline,
            requested_id,
        })?;

    Ok(SnapshotPair {
        baseline: ReleaseSnapshot::from_raw(baseline, environment_id)?,
        target: ReleaseSnapshot::from_raw(target, environment_id)?,
    })
}
