//! Raw record types returned by the remote contracts.
//!
//! These are the shapes the release, work-item, and VCS services hand back
//! before the engine normalizes them. They are deserialized straight off the
//! wire and never mutated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Backend tag carried by [`RawChangeRef`] for distributed (git-style)
/// version control.
pub const BACKEND_TAG_GIT: &str = "TfsGit";

/// Backend tag carried by [`RawChangeRef`] for centralized
/// (sequential-changeset) version control.
pub const BACKEND_TAG_TFVC: &str = "TfsVersionControl";

/// Deployment status of a release environment, used to filter candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentStatus {
    Succeeded,
    InProgress,
    Failed,
    NotDeployed,
}

/// One release as returned by the release service, prior to snapshot
/// construction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawRelease {
    /// Release identifier, unique within a project.
    pub id: i64,

    /// Name of the release definition this release was created from.
    pub definition_name: String,

    /// Browser link to the release.
    pub web_link: String,

    /// Artifacts consumed by the release; exactly one is expected to be
    /// primary.
    pub artifacts: Vec<RawArtifact>,

    /// Environments of the release definition with their deployment state.
    pub environments: Vec<RawEnvironment>,
}

/// An artifact attached to a release.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawArtifact {
    /// Whether this is the primary artifact of the release.
    pub is_primary: bool,

    /// Version label of the build that produced the artifact.
    pub build_version: String,

    /// Browser link to the build.
    pub build_link: String,
}

/// An environment entry on a release.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawEnvironment {
    /// Identifier of the environment on the release definition (stable
    /// across releases, unlike the per-release environment id).
    pub definition_environment_id: i64,

    /// Display name of the environment.
    pub name: String,
}

/// Unresolved pointer to a work item associated with a release transition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkItemRef {
    /// Work item id as the release service reports it (stringly typed on
    /// the wire).
    pub id: String,

    /// API link to the work item, when the service provides one.
    pub url: Option<String>,
}

/// Unresolved pointer to a commit or changeset, tagged with the kind of
/// backend that owns it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawChangeRef {
    /// Commit sha or changeset number (possibly prefixed, e.g. `C100`).
    pub id: String,

    /// Open wire tag naming the owning backend. Known values are
    /// [`BACKEND_TAG_GIT`] and [`BACKEND_TAG_TFVC`].
    pub backend_tag: String,
}

/// A fully expanded work item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawWorkItem {
    pub id: i64,
    pub title: String,
    pub state: String,
    pub item_type: String,
    pub url: String,
}

/// A commit as returned by the distributed (git-style) backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawGitCommit {
    /// Full commit sha.
    pub commit_id: String,

    /// Commit message (first line or full, as the service returns it).
    pub message: String,

    /// Author name.
    pub author_name: String,

    /// Author timestamp.
    pub authored_at: DateTime<Utc>,

    /// Browser link to the commit.
    pub remote_url: String,
}

/// A changeset as returned by the centralized backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawChangeset {
    /// Sequential changeset number.
    pub changeset_id: i64,

    /// Checkin comment, truncated server-side to the requested length.
    pub message: String,

    /// Display name of the checkin author.
    pub author_display_name: String,

    /// Checkin timestamp.
    pub created_at: DateTime<Utc>,

    /// Browser link to the changeset.
    pub web_link: String,
}

/// Options for the batched changeset lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChangesetLookupOptions {
    /// Maximum comment length to return per changeset.
    pub comment_length: u32,

    /// Whether to include browser links in the response.
    pub include_links: bool,
}

impl Default for ChangesetLookupOptions {
    fn default() -> Self {
        Self {
            comment_length: 100,
            include_links: true,
        }
    }
}
