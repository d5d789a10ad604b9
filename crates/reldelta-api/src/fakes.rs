//! In-memory fakes for the remote contracts (testing only)
//!
//! Provides `FakeReleaseApi`, `FakeWorkItemApi`, `FakeGitApi`, and
//! `FakeTfvcApi` that satisfy the trait contracts without any network. Each
//! fake counts its calls and records the arguments of the last call so tests
//! can assert on call shape as well as results.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::contracts::{GitApi, ReleaseApi, TfvcApi, WorkItemApi};
use crate::error::{RemoteError, RemoteResult};
use crate::records::{
    ChangesetLookupOptions, DeploymentStatus, RawChangeRef, RawChangeset, RawGitCommit,
    RawRelease, RawWorkItem, WorkItemRef,
};

fn check_failure(slot: &Mutex<Option<String>>) -> RemoteResult<()> {
    match slot.lock().unwrap().as_ref() {
        Some(msg) => Err(RemoteError::Unavailable(msg.clone())),
        None => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// FakeReleaseApi
// ---------------------------------------------------------------------------

/// In-memory release service: canned candidates, work-item refs, and change
/// refs.
#[derive(Debug, Default)]
pub struct FakeReleaseApi {
    candidates: Vec<RawRelease>,
    work_item_refs: Vec<WorkItemRef>,
    change_refs: Vec<RawChangeRef>,
    fail_with: Mutex<Option<String>>,
    pub list_calls: AtomicUsize,
    pub refs_calls: AtomicUsize,
    pub changes_calls: AtomicUsize,
}

impl FakeReleaseApi {
    pub fn new(
        candidates: Vec<RawRelease>,
        work_item_refs: Vec<WorkItemRef>,
        change_refs: Vec<RawChangeRef>,
    ) -> Self {
        Self {
            candidates,
            work_item_refs,
            change_refs,
            ..Self::default()
        }
    }

    /// Make every subsequent call fail with `RemoteError::Unavailable(msg)`.
    pub fn set_failure(&self, msg: &str) {
        *self.fail_with.lock().unwrap() = Some(msg.to_string());
    }
}

#[async_trait]
impl ReleaseApi for FakeReleaseApi {
    async fn list_release_candidates(
        &self,
        _project: &str,
        _definition_id: i64,
        _environment_id: i64,
        _status_filter: &[DeploymentStatus],
        limit: usize,
    ) -> RemoteResult<Vec<RawRelease>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        check_failure(&self.fail_with)?;
        Ok(self.candidates.iter().take(limit).cloned().collect())
    }

    async fn work_item_refs_between(
        &self,
        _project: &str,
        _target_release_id: i64,
        _baseline_release_id: i64,
    ) -> RemoteResult<Vec<WorkItemRef>> {
        self.refs_calls.fetch_add(1, Ordering::SeqCst);
        check_failure(&self.fail_with)?;
        Ok(self.work_item_refs.clone())
    }

    async fn changes_between(
        &self,
        _project: &str,
        _baseline_release_id: i64,
        _target_release_id: i64,
        limit: usize,
    ) -> RemoteResult<Vec<RawChangeRef>> {
        self.changes_calls.fetch_add(1, Ordering::SeqCst);
        check_failure(&self.fail_with)?;
        Ok(self.change_refs.iter().take(limit).cloned().collect())
    }
}

// ---------------------------------------------------------------------------
// FakeWorkItemApi
// ---------------------------------------------------------------------------

/// In-memory work-item tracker: expansion resolves against a canned item set,
/// in request order.
#[derive(Debug, Default)]
pub struct FakeWorkItemApi {
    items: Vec<RawWorkItem>,
    fail_with: Mutex<Option<String>>,
    pub expand_calls: AtomicUsize,
}

impl FakeWorkItemApi {
    pub fn new(items: Vec<RawWorkItem>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    pub fn set_failure(&self, msg: &str) {
        *self.fail_with.lock().unwrap() = Some(msg.to_string());
    }
}

#[async_trait]
impl WorkItemApi for FakeWorkItemApi {
    async fn expand_work_items(
        &self,
        refs: &[WorkItemRef],
        limit: usize,
    ) -> RemoteResult<Vec<RawWorkItem>> {
        self.expand_calls.fetch_add(1, Ordering::SeqCst);
        check_failure(&self.fail_with)?;

        let mut expanded = Vec::new();
        for r in refs.iter().take(limit) {
            if let Some(item) = self
                .items
                .iter()
                .find(|i| r.id.parse::<i64>().is_ok_and(|id| id == i.id))
            {
                expanded.push(item.clone());
            }
        }
        Ok(expanded)
    }
}

// ---------------------------------------------------------------------------
// FakeGitApi
// ---------------------------------------------------------------------------

/// In-memory distributed backend: returns canned commits and records the
/// requested range endpoints.
#[derive(Debug, Default)]
pub struct FakeGitApi {
    commits: Vec<RawGitCommit>,
    fail_with: Mutex<Option<String>>,
    pub range_calls: AtomicUsize,
    pub last_range: Mutex<Option<(String, String)>>,
}

impl FakeGitApi {
    pub fn new(commits: Vec<RawGitCommit>) -> Self {
        Self {
            commits,
            ..Self::default()
        }
    }

    pub fn set_failure(&self, msg: &str) {
        *self.fail_with.lock().unwrap() = Some(msg.to_string());
    }
}

#[async_trait]
impl GitApi for FakeGitApi {
    async fn commits_in_range(
        &self,
        _project: &str,
        from_id: &str,
        to_id: &str,
    ) -> RemoteResult<Vec<RawGitCommit>> {
        self.range_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_range.lock().unwrap() = Some((from_id.to_string(), to_id.to_string()));
        check_failure(&self.fail_with)?;
        Ok(self.commits.clone())
    }
}

// ---------------------------------------------------------------------------
// FakeTfvcApi
// ---------------------------------------------------------------------------

/// In-memory centralized backend: returns canned changesets and records the
/// requested id batch.
#[derive(Debug, Default)]
pub struct FakeTfvcApi {
    changesets: Vec<RawChangeset>,
    fail_with: Mutex<Option<String>>,
    pub lookup_calls: AtomicUsize,
    pub last_ids: Mutex<Option<Vec<i64>>>,
}

impl FakeTfvcApi {
    pub fn new(changesets: Vec<RawChangeset>) -> Self {
        Self {
            changesets,
            ..Self::default()
        }
    }

    pub fn set_failure(&self, msg: &str) {
        *self.fail_with.lock().unwrap() = Some(msg.to_string());
    }
}

#[async_trait]
impl TfvcApi for FakeTfvcApi {
    async fn changesets_by_ids(
        &self,
        ids: &[i64],
        _options: &ChangesetLookupOptions,
    ) -> RemoteResult<Vec<RawChangeset>> {
        self.lookup_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_ids.lock().unwrap() = Some(ids.to_vec());
        check_failure(&self.fail_with)?;
        Ok(self.changesets.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn test_fake_release_api_counts_calls() {
        let api = FakeReleaseApi::new(vec![], vec![], vec![]);
        api.work_item_refs_between("proj", 11, 10).await.unwrap();
        api.work_item_refs_between("proj", 11, 10).await.unwrap();
        assert_eq!(api.refs_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_fake_work_item_api_resolves_in_request_order() {
        let api = FakeWorkItemApi::new(vec![
            RawWorkItem {
                id: 1,
                title: "one".to_string(),
                state: "Active".to_string(),
                item_type: "Bug".to_string(),
                url: "https://wit.example.com/1".to_string(),
            },
            RawWorkItem {
                id: 2,
                title: "two".to_string(),
                state: "Closed".to_string(),
                item_type: "Task".to_string(),
                url: "https://wit.example.com/2".to_string(),
            },
        ]);

        let refs = vec![
            WorkItemRef {
                id: "2".to_string(),
                url: None,
            },
            WorkItemRef {
                id: "1".to_string(),
                url: None,
            },
        ];
        let items = api.expand_work_items(&refs, 1000).await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, 2);
        assert_eq!(items[1].id, 1);
    }

    #[tokio::test]
    async fn test_fake_git_api_records_range() {
        let api = FakeGitApi::new(vec![RawGitCommit {
            commit_id: "a".repeat(40),
            message: "m".to_string(),
            author_name: "dev".to_string(),
            authored_at: Utc::now(),
            remote_url: "https://git.example.com/a".to_string(),
        }]);
        api.commits_in_range("proj", "sha1", "sha2").await.unwrap();
        assert_eq!(
            api.last_range.lock().unwrap().clone(),
            Some(("sha1".to_string(), "sha2".to_string()))
        );
    }

    #[tokio::test]
    async fn test_failure_injection() {
        let api = FakeTfvcApi::new(vec![]);
        api.set_failure("maintenance window");
        let err = api
            .changesets_by_ids(&[100], &ChangesetLookupOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, RemoteError::Unavailable(_)));
    }
}
