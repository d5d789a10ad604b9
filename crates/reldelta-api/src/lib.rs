//! Remote collaborator contracts for the release delta engine.
//!
//! This crate defines the engine's only view of the outside world: the
//! abstract release, work-item, and VCS operations it consumes, the raw
//! record types they return, and the transport-agnostic error surface.
//! Credential handling, endpoints, and wire formats live behind concrete
//! implementations and are out of scope here.
//!
//! ## Key Components
//!
//! - `ReleaseApi` / `WorkItemApi` / `GitApi` / `TfvcApi`: async contracts
//! - `RawRelease`, `RawChangeRef`, `RawGitCommit`, `RawChangeset`: raw records
//! - `fakes`: in-memory implementations for testing

mod contracts;
mod error;
pub mod fakes;
mod records;

pub use contracts::{GitApi, ReleaseApi, TfvcApi, WorkItemApi};
pub use error::{RemoteError, RemoteResult};
pub use records::{
    ChangesetLookupOptions, DeploymentStatus, RawArtifact, RawChangeRef, RawChangeset,
    RawEnvironment, RawGitCommit, RawRelease, RawWorkItem, WorkItemRef, BACKEND_TAG_GIT,
    BACKEND_TAG_TFVC,
};
