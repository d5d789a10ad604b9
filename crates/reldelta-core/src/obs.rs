//! Structured observability hooks for delta computation.
//!
//! This module provides:
//! - A compute-scoped tracing span via the `DeltaSpan` RAII guard
//! - Emission functions for the lifecycle of one `compute` call
//!
//! Events are emitted at `info!` level; failures at `warn!`. Filtering is
//! controlled through the standard `RUST_LOG` environment variable.

use tracing::{info, warn};

use crate::domain::commit::BackendKind;

/// RAII guard that enters a compute-scoped tracing span.
///
/// All tracing calls made while the guard is alive carry the target release
/// id.
pub struct DeltaSpan {
    _span: tracing::span::EnteredSpan,
}

impl DeltaSpan {
    /// Create and enter a span tagged with the requested release id.
    pub fn enter(target_release_id: i64) -> Self {
        let span = tracing::info_span!("reldelta.compute", release_id = target_release_id);
        Self {
            _span: span.entered(),
        }
    }
}

/// Emit event: delta computation started.
pub fn emit_delta_started(project: &str, requested_release_id: i64) {
    info!(
        event = "delta.started",
        project = %project,
        release_id = requested_release_id,
    );
}

/// Emit event: baseline and target snapshots resolved.
pub fn emit_snapshots_resolved(baseline_id: i64, target_id: i64) {
    info!(
        event = "delta.snapshots_resolved",
        baseline_id = baseline_id,
        target_id = target_id,
    );
}

/// Emit event: work items resolved for the transition.
pub fn emit_work_items_fetched(count: usize) {
    info!(event = "delta.work_items_fetched", count = count as u64);
}

/// Emit event: one backend's changes resolved.
pub fn emit_changes_fetched(backend: BackendKind, count: usize) {
    info!(
        event = "delta.changes_fetched",
        backend = %backend,
        count = count as u64,
    );
}

/// Emit event: delta computed successfully.
pub fn emit_delta_computed(work_items: usize, commits: usize, duration_ms: u64) {
    info!(
        event = "delta.computed",
        work_items = work_items as u64,
        commits = commits as u64,
        duration_ms = duration_ms,
    );
}

/// Emit event: delta computation aborted (warning level).
pub fn emit_delta_failed(error: &dyn std::fmt::Display) {
    warn!(event = "delta.failed", error = %error);
}
