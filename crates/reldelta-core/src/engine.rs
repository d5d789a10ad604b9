//! Delta engine: orchestrates snapshot resolution, work-item fetching, and
//! change aggregation into one `ReleaseDelta`.

use std::sync::Arc;
use std::time::Instant;

use reldelta_api::{DeploymentStatus, GitApi, RawRelease, ReleaseApi, TfvcApi, WorkItemApi};

use crate::changes::{ChangeAggregator, EmptyResultPolicy};
use crate::domain::delta::ReleaseDelta;
use crate::domain::error::Result;
use crate::obs::{
    emit_delta_computed, emit_delta_failed, emit_delta_started, emit_snapshots_resolved, DeltaSpan,
};
use crate::resolver::resolve_snapshots;
use crate::work_items::WorkItemFetcher;

/// The candidate query covers the release in progress plus the previously
/// deployed release.
const CANDIDATE_LIMIT: usize = 2;

/// Candidates must not be failed deployments.
const CANDIDATE_STATUSES: &[DeploymentStatus] =
    &[DeploymentStatus::Succeeded, DeploymentStatus::InProgress];

/// Upstream cap on the change-ref listing.
const CHANGE_LIST_LIMIT: usize = 1000;

/// Computes the release delta between a deployed release and a release in
/// progress.
///
/// One `compute` call is a single self-contained operation: it builds an
/// immutable [`ReleaseDelta`] directly from the collaborator responses, with
/// no cached state between invocations. The engine never retries and never
/// returns a partial delta; the first error aborts the whole call.
pub struct DeltaEngine {
    release_api: Arc<dyn ReleaseApi>,
    work_item_api: Arc<dyn WorkItemApi>,
    git_api: Arc<dyn GitApi>,
    tfvc_api: Arc<dyn TfvcApi>,
    policy: EmptyResultPolicy,
}

impl DeltaEngine {
    pub fn new(
        release_api: Arc<dyn ReleaseApi>,
        work_item_api: Arc<dyn WorkItemApi>,
        git_api: Arc<dyn GitApi>,
        tfvc_api: Arc<dyn TfvcApi>,
        policy: EmptyResultPolicy,
    ) -> Self {
        Self {
            release_api,
            work_item_api,
            git_api,
            tfvc_api,
            policy,
        }
    }

    /// Compute the delta for `requested_release_id`, querying the release
    /// service for the candidate pair first.
    pub async fn compute(
        &self,
        project: &str,
        definition_id: i64,
        environment_id: i64,
        requested_release_id: i64,
    ) -> Result<ReleaseDelta> {
        let _span = DeltaSpan::enter(requested_release_id);
        emit_delta_started(project, requested_release_id);

        let result = async {
            let candidates = self
                .release_api
                .list_release_candidates(
                    project,
                    definition_id,
                    environment_id,
                    CANDIDATE_STATUSES,
                    CANDIDATE_LIMIT,
                )
                .await?;

            self.compute_from_candidates(project, &candidates, requested_release_id, environment_id)
                .await
        }
        .await;

        if let Err(ref e) = result {
            emit_delta_failed(e);
        }
        result
    }

    /// Compute the delta from an already-listed candidate set.
    ///
    /// Snapshot resolution runs first and fails fast. The work-item fetch
    /// and the change aggregation have no data dependency on each other, so
    /// they run concurrently; the first observed error aborts both.
    pub async fn compute_from_candidates(
        &self,
        project: &str,
        candidates: &[RawRelease],
        requested_release_id: i64,
        environment_id: i64,
    ) -> Result<ReleaseDelta> {
        let started = Instant::now();

        let pair = resolve_snapshots(candidates, requested_release_id, environment_id)?;
        emit_snapshots_resolved(pair.baseline.id, pair.target.id);

        let fetcher = WorkItemFetcher::new(
            Arc::clone(&self.release_api),
            Arc::clone(&self.work_item_api),
        );
        let aggregator = ChangeAggregator::new(
            Arc::clone(&self.git_api),
            Arc::clone(&self.tfvc_api),
            self.policy,
        );

        let work_items_fut = fetcher.fetch(project, pair.baseline.id, pair.target.id);
        let changes_fut = async {
            let refs = self
                .release_api
                .changes_between(project, pair.baseline.id, pair.target.id, CHANGE_LIST_LIMIT)
                .await?;
            aggregator.aggregate(project, &refs).await
        };

        let (work_items, commits) = tokio::try_join!(work_items_fut, changes_fut)?;

        emit_delta_computed(
            work_items.len(),
            commits.len(),
            started.elapsed().as_millis() as u64,
        );

        Ok(ReleaseDelta {
            baseline: pair.baseline,
            target: pair.target,
            work_items,
            commits,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::DeltaError;
    use reldelta_api::fakes::{FakeGitApi, FakeReleaseApi, FakeTfvcApi, FakeWorkItemApi};
    use reldelta_api::{RawArtifact, RawEnvironment, WorkItemRef};
    use std::sync::atomic::Ordering;

    const ENV_ID: i64 = 7;

    fn candidate(id: i64, version: &str) -> RawRelease {
        RawRelease {
            id,
            definition_name: "web-frontend".to_string(),
            web_link: format!("https://rm.example.com/release/{id}"),
            artifacts: vec![RawArtifact {
                is_primary: true,
                build_version: version.to_string(),
                build_link: format!("https://ci.example.com/build/{id}"),
            }],
            environments: vec![RawEnvironment {
                definition_environment_id: ENV_ID,
                name: "Production".to_string(),
            }],
        }
    }

    fn engine(release_api: Arc<FakeReleaseApi>) -> DeltaEngine {
        DeltaEngine::new(
            release_api,
            Arc::new(FakeWorkItemApi::new(vec![])),
            Arc::new(FakeGitApi::new(vec![])),
            Arc::new(FakeTfvcApi::new(vec![])),
            EmptyResultPolicy::Lenient,
        )
    }

    #[tokio::test]
    async fn test_compute_lists_candidates_once() {
        let release_api = Arc::new(FakeReleaseApi::new(
            vec![candidate(10, "1.2.3"), candidate(11, "1.2.4")],
            vec![],
            vec![],
        ));
        let eng = engine(Arc::clone(&release_api));

        let delta = eng.compute("proj", 3, ENV_ID, 11).await.expect("compute");
        assert_eq!(release_api.list_calls.load(Ordering::SeqCst), 1);
        assert_eq!(delta.baseline.id, 10);
        assert_eq!(delta.target.id, 11);
        assert!(delta.is_empty());
    }

    #[tokio::test]
    async fn test_resolution_failure_aborts_before_fetches() {
        let release_api = Arc::new(FakeReleaseApi::new(
            vec![candidate(10, "1.2.3")],
            vec![WorkItemRef {
                id: "55".to_string(),
                url: None,
            }],
            vec![],
        ));
        let eng = engine(Arc::clone(&release_api));

        let err = eng.compute("proj", 3, ENV_ID, 11).await.unwrap_err();
        assert!(matches!(err, DeltaError::SnapshotNotFound { .. }));
        // Neither downstream fetch was attempted.
        assert_eq!(release_api.refs_calls.load(Ordering::SeqCst), 0);
        assert_eq!(release_api.changes_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_work_item_branch_failure_aborts_compute() {
        let release_api = Arc::new(FakeReleaseApi::new(
            vec![candidate(10, "1.2.3"), candidate(11, "1.2.4")],
            vec![WorkItemRef {
                id: "55".to_string(),
                url: None,
            }],
            vec![],
        ));
        let work_item_api = Arc::new(FakeWorkItemApi::new(vec![]));
        work_item_api.set_failure("tracker offline");

        let eng = DeltaEngine::new(
            release_api,
            work_item_api,
            Arc::new(FakeGitApi::new(vec![])),
            Arc::new(FakeTfvcApi::new(vec![])),
            EmptyResultPolicy::Lenient,
        );

        let err = eng.compute("proj", 3, ENV_ID, 11).await.unwrap_err();
        assert!(err.to_string().contains("tracker offline"));
    }
}
