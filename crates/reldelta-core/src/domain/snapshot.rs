//! Release snapshot: metadata describing one deployment attempt.

use std::fmt;

use reldelta_api::RawRelease;
use serde::{Deserialize, Serialize};

use crate::domain::error::{DeltaError, Result};

/// The role a snapshot plays within a delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotRole {
    /// The release currently being deployed.
    Target,
    /// The previously deployed release.
    Baseline,
}

impl fmt::Display for SnapshotRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotRole::Target => write!(f, "target"),
            SnapshotRole::Baseline => write!(f, "baseline"),
        }
    }
}

/// Immutable metadata of one deployment attempt, built from a raw release
/// payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReleaseSnapshot {
    /// Release identifier.
    pub id: i64,

    /// Name of the release definition.
    pub definition_name: String,

    /// Version label of the primary artifact's build.
    pub build_version: String,

    /// Browser link to the primary artifact's build.
    pub build_link: String,

    /// Browser link to the release.
    pub release_link: String,

    /// Display name of the environment being deployed to.
    pub environment_name: String,

    /// Definition-level identifier of that environment.
    pub environment_id: i64,
}

impl ReleaseSnapshot {
    /// Build a snapshot from a raw release payload.
    ///
    /// The primary artifact supplies the build version and link; the
    /// environment is looked up by `environment_id` against the
    /// definition-level environment ids on the payload. A payload missing
    /// either is rejected as [`DeltaError::MalformedRelease`].
    pub fn from_raw(raw: &RawRelease, environment_id: i64) -> Result<Self> {
        let primary = raw
            .artifacts
            .iter()
            .find(|a| a.is_primary)
            .ok_or_else(|| DeltaError::MalformedRelease {
                release_id: raw.id,
                detail: "no primary artifact".to_string(),
            })?;

        let environment = raw
            .environments
            .iter()
            .find(|e| e.definition_environment_id == environment_id)
            .ok_or_else(|| DeltaError::MalformedRelease {
                release_id: raw.id,
                detail: format!("no environment with definition environment id {environment_id}"),
            })?;

        Ok(Self {
            id: raw.id,
            definition_name: raw.definition_name.clone(),
            build_version: primary.build_version.clone(),
            build_link: primary.build_link.clone(),
            release_link: raw.web_link.clone(),
            environment_name: environment.name.clone(),
            environment_id,
        })
    }
}
