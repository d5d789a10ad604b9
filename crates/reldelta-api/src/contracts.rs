//! Remote contract definitions for the release delta engine.
//!
//! These traits are the engine's only view of the outside world:
//! - `ReleaseApi`: release candidates, work-item refs, raw change refs
//! - `WorkItemApi`: batched work-item expansion
//! - `GitApi`: distributed-backend commit range lookup
//! - `TfvcApi`: centralized-backend batched changeset lookup
//!
//! All traits are async and transport-agnostic. In-memory fakes are provided
//! for testing via the `fakes` module.

use async_trait::async_trait;

use crate::error::RemoteResult;
use crate::records::{
    ChangesetLookupOptions, DeploymentStatus, RawChangeRef, RawChangeset, RawGitCommit,
    RawRelease, RawWorkItem, WorkItemRef,
};

/// Release-service operations consumed by the engine.
#[async_trait]
pub trait ReleaseApi: Send + Sync {
    /// List release candidates for one environment of a release definition,
    /// newest first, filtered to the given deployment statuses.
    ///
    /// The engine queries with `limit = 2` so that the result is exactly the
    /// release in progress plus the previously deployed release.
    async fn list_release_candidates(
        &self,
        project: &str,
        definition_id: i64,
        environment_id: i64,
        status_filter: &[DeploymentStatus],
        limit: usize,
    ) -> RemoteResult<Vec<RawRelease>>;

    /// Work-item refs associated with the transition from `baseline_release_id`
    /// to `target_release_id`, most-recently-changed first.
    async fn work_item_refs_between(
        &self,
        project: &str,
        target_release_id: i64,
        baseline_release_id: i64,
    ) -> RemoteResult<Vec<WorkItemRef>>;

    /// Raw change refs for the transition, each tagged with its backend.
    async fn changes_between(
        &self,
        project: &str,
        baseline_release_id: i64,
        target_release_id: i64,
        limit: usize,
    ) -> RemoteResult<Vec<RawChangeRef>>;
}

/// Work-item tracking operations consumed by the engine.
#[async_trait]
pub trait WorkItemApi: Send + Sync {
    /// Expand the referenced work items into full records, preserving the
    /// order of `refs`. Callers must not pass an empty slice; they are
    /// expected to short-circuit instead.
    async fn expand_work_items(
        &self,
        refs: &[WorkItemRef],
        limit: usize,
    ) -> RemoteResult<Vec<RawWorkItem>>;
}

/// Distributed-backend (git-style) operations consumed by the engine.
#[async_trait]
pub trait GitApi: Send + Sync {
    /// Commits in the inclusive range `from_id..=to_id`, in API order.
    async fn commits_in_range(
        &self,
        project: &str,
        from_id: &str,
        to_id: &str,
    ) -> RemoteResult<Vec<RawGitCommit>>;
}

/// Centralized-backend operations consumed by the engine.
#[async_trait]
pub trait TfvcApi: Send + Sync {
    /// Batched lookup of changesets by number, in API order.
    async fn changesets_by_ids(
        &self,
        ids: &[i64],
        options: &ChangesetLookupOptions,
    ) -> RemoteResult<Vec<RawChangeset>>;
}
