//! Domain models for the release delta engine.
//!
//! Canonical definitions for the core entities:
//! - `ReleaseSnapshot`: Immutable metadata of one deployment attempt
//! - `WorkItem`: A tracked unit of work linked to the deployed code
//! - `Commit`: Normalized, backend-agnostic unit of source-control change
//! - `ReleaseDelta`: The final aggregate for one release transition

pub mod commit;
pub mod delta;
pub mod error;
pub mod snapshot;
pub mod work_item;

// Re-export main types and errors
pub use commit::{BackendKind, Commit};
pub use delta::ReleaseDelta;
pub use error::{DeltaError, Result};
pub use snapshot::{ReleaseSnapshot, SnapshotRole};
pub use work_item::WorkItem;
