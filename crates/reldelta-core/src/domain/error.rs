//! Domain-level error taxonomy for delta resolution.

use reldelta_api::RemoteError;

use crate::domain::commit::BackendKind;
use crate::domain::snapshot::SnapshotRole;

/// Errors produced while computing a release delta.
///
/// Every variant is fatal to the current `compute` call: there are no
/// internal retries and no partial delta is ever surfaced. An empty
/// work-item reference set is a valid outcome, not an error.
#[derive(Debug, thiserror::Error)]
pub enum DeltaError {
    /// The target or baseline release could not be identified among the
    /// candidates.
    #[error("no {role} release found among candidates (requested release {requested_id})")]
    SnapshotNotFound {
        role: SnapshotRole,
        requested_id: i64,
    },

    /// A release payload was missing a field required to build a snapshot.
    #[error("release {release_id} is malformed: {detail}")]
    MalformedRelease { release_id: i64, detail: String },

    /// A backend reported zero changes for a non-empty request.
    #[error("{backend} backend returned no changes for a non-empty request")]
    ChangeFetchInconsistency { backend: BackendKind },

    /// A raw change ref carried a backend tag the aggregator does not
    /// recognize.
    #[error("unrecognized change backend tag: {tag}")]
    UnknownBackend { tag: String },

    /// A centralized change ref did not contain a changeset number.
    #[error("change ref '{id}' is not a valid changeset number")]
    InvalidChangesetId { id: String },

    /// Bubbled-up remote collaborator failure.
    #[error("remote error: {0}")]
    Remote(#[from] RemoteError),
}

/// Result type for delta operations.
pub type Result<T> = std::result::Result<T, DeltaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_not_found_displays_role_and_id() {
        let err = DeltaError::SnapshotNotFound {
            role: SnapshotRole::Baseline,
            requested_id: 42,
        };
        let msg = err.to_string();
        assert!(msg.contains("baseline"));
        assert!(msg.contains("42"));
    }

    #[test]
    fn test_inconsistency_names_backend() {
        let err = DeltaError::ChangeFetchInconsistency {
            backend: BackendKind::Centralized,
        };
        assert!(err.to_string().contains("centralized"));
    }

    #[test]
    fn test_unknown_backend_displays_tag() {
        let err = DeltaError::UnknownBackend {
            tag: "Subversion".to_string(),
        };
        assert!(err.to_string().contains("Subversion"));
    }

    #[test]
    fn test_remote_error_wraps() {
        let err: DeltaError = RemoteError::Unavailable("down".to_string()).into();
        assert!(err.to_string().contains("down"));
    }
}
