//! Work-item resolution for a release transition.

use std::collections::HashSet;
use std::sync::Arc;

use reldelta_api::{ReleaseApi, WorkItemApi, WorkItemRef};
use tracing::debug;

use crate::domain::error::Result;
use crate::domain::work_item::WorkItem;
use crate::obs::emit_work_items_fetched;

/// Upstream cap on a single expansion request.
const EXPANSION_LIMIT: usize = 1000;

/// Resolves and expands the work items associated with a release transition.
pub struct WorkItemFetcher {
    release_api: Arc<dyn ReleaseApi>,
    work_item_api: Arc<dyn WorkItemApi>,
}

impl WorkItemFetcher {
    pub fn new(release_api: Arc<dyn ReleaseApi>, work_item_api: Arc<dyn WorkItemApi>) -> Self {
        Self {
            release_api,
            work_item_api,
        }
    }

    /// Fetch the work items introduced between `baseline_id` and `target_id`.
    ///
    /// An empty reference set is a valid outcome: it returns `[]` without
    /// making the expansion call. Duplicate refs collapse to their first
    /// occurrence; upstream order is preserved otherwise.
    pub async fn fetch(
        &self,
        project: &str,
        baseline_id: i64,
        target_id: i64,
    ) -> Result<Vec<WorkItem>> {
        let refs = self
            .release_api
            .work_item_refs_between(project, target_id, baseline_id)
            .await?;

        if refs.is_empty() {
            debug!(event = "work_items.no_refs", target_id = target_id);
            emit_work_items_fetched(0);
            return Ok(Vec::new());
        }

        let deduped = dedup_refs(refs);
        let items: Vec<WorkItem> = self
            .work_item_api
            .expand_work_items(&deduped, EXPANSION_LIMIT)
            .await?
            .into_iter()
            .map(WorkItem::from)
            .collect();

        emit_work_items_fetched(items.len());
        Ok(items)
    }
}

/// Collapse duplicate refs to their first occurrence, keeping order.
fn dedup_refs(refs: Vec<WorkItemRef>) -> Vec<WorkItemRef> {
    let mut seen = HashSet::new();
    refs.into_iter()
        .filter(|r| seen.insert(r.id.clone()))
        .collect()
}
