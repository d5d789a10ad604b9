//! Release Delta Engine
//!
//! Computes the set of work items and source-control changes introduced
//! between a previously deployed release and a release currently in
//! progress. The result is one immutable [`ReleaseDelta`] per invocation,
//! ready for a downstream renderer; this crate performs no rendering, no
//! persistence, and defines no wire protocol.
//!
//! ## Key Components
//!
//! - [`DeltaEngine`]: orchestrates one `compute` call end to end
//! - [`resolver`]: picks the baseline/target snapshot pair
//! - [`WorkItemFetcher`]: resolves and expands linked work items
//! - [`ChangeAggregator`]: merges commit history across VCS backends

pub mod changes;
pub mod domain;
pub mod engine;
pub mod obs;
pub mod resolver;
pub mod telemetry;
pub mod work_items;

pub use changes::{
    ChangeAggregator, ChangeBackend, EmptyResultPolicy, GitChangeBackend, TfvcChangeBackend,
};
pub use domain::{
    BackendKind, Commit, DeltaError, ReleaseDelta, ReleaseSnapshot, Result, SnapshotRole, WorkItem,
};
pub use engine::DeltaEngine;
pub use resolver::{resolve_snapshots, SnapshotPair};
pub use work_items::WorkItemFetcher;

pub use obs::{
    emit_changes_fetched, emit_delta_computed, emit_delta_failed, emit_delta_started,
    emit_snapshots_resolved, emit_work_items_fetched, DeltaSpan,
};
pub use telemetry::init_tracing;

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
