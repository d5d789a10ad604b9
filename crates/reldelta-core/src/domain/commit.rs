//! Normalized commits and the backend kinds they come from.

use std::fmt;

use chrono::{DateTime, Utc};
use reldelta_api::{RawChangeset, RawGitCommit, BACKEND_TAG_GIT, BACKEND_TAG_TFVC};
use serde::{Deserialize, Serialize};

use crate::domain::error::{DeltaError, Result};

/// Length of the short commit id used for display.
const SHORT_ID_LEN: usize = 8;

/// Kind of version-control backend a change originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Branch/history-based VCS addressed by commit sha.
    Distributed,
    /// Sequential-changeset VCS addressed by changeset number.
    Centralized,
}

impl BackendKind {
    /// Map an open wire tag onto a backend kind.
    pub fn from_tag(tag: &str) -> Result<Self> {
        match tag {
            BACKEND_TAG_GIT => Ok(BackendKind::Distributed),
            BACKEND_TAG_TFVC => Ok(BackendKind::Centralized),
            other => Err(DeltaError::UnknownBackend {
                tag: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Distributed => write!(f, "distributed"),
            BackendKind::Centralized => write!(f, "centralized"),
        }
    }
}

/// A normalized, backend-agnostic unit of source-control change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Commit {
    /// Display id: 8-char short sha for distributed changes, changeset
    /// number for centralized ones. The full sha is retained nowhere else.
    pub id: String,

    /// Commit message or checkin comment.
    pub message: String,

    /// Author name.
    pub author: String,

    /// Author or checkin timestamp.
    pub timestamp: DateTime<Utc>,

    /// Browser link to the change.
    pub link: String,

    /// Backend the change originates from.
    pub backend: BackendKind,
}

impl Commit {
    /// Normalize a distributed-backend commit, shortening the sha for
    /// display.
    pub fn from_git(raw: RawGitCommit) -> Self {
        let short = raw.commit_id[..SHORT_ID_LEN.min(raw.commit_id.len())].to_string();
        Self {
            id: short,
            message: raw.message,
            author: raw.author_name,
            timestamp: raw.authored_at,
            link: raw.remote_url,
            backend: BackendKind::Distributed,
        }
    }

    /// Normalize a centralized-backend changeset.
    pub fn from_changeset(raw: RawChangeset) -> Self {
        Self {
            id: raw.changeset_id.to_string(),
            message: raw.message,
            author: raw.author_display_name,
            timestamp: raw.created_at,
            link: raw.web_link,
            backend: BackendKind::Centralized,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tag_recognizes_known_tags() {
        assert_eq!(
            BackendKind::from_tag(BACKEND_TAG_GIT).unwrap(),
            BackendKind::Distributed
        );
        assert_eq!(
            BackendKind::from_tag(BACKEND_TAG_TFVC).unwrap(),
            BackendKind::Centralized
        );
    }

    #[test]
    fn test_from_tag_rejects_unknown_tag() {
        let err = BackendKind::from_tag("Mercurial").unwrap_err();
        assert!(matches!(err, DeltaError::UnknownBackend { .. }));
    }

    #[test]
    fn test_from_git_shortens_sha_to_eight_chars() {
        let commit = Commit::from_git(RawGitCommit {
            commit_id: "0123456789abcdef0123456789abcdef01234567".to_string(),
            message: "Fix login redirect".to_string(),
            author_name: "dev".to_string(),
            authored_at: Utc::now(),
            remote_url: "https://git.example.com/c/0123456789abcdef".to_string(),
        });
        assert_eq!(commit.id, "01234567");
        assert_eq!(commit.backend, BackendKind::Distributed);
    }

    #[test]
    fn test_from_git_tolerates_short_input_id() {
        let commit = Commit::from_git(RawGitCommit {
            commit_id: "abc".to_string(),
            message: String::new(),
            author_name: String::new(),
            authored_at: Utc::now(),
            remote_url: String::new(),
        });
        assert_eq!(commit.id, "abc");
    }

    #[test]
    fn test_from_changeset_uses_number_as_id() {
        let commit = Commit::from_changeset(RawChangeset {
            changeset_id: 4711,
            message: "Update config".to_string(),
            author_display_name: "Dev Eloper".to_string(),
            created_at: Utc::now(),
            web_link: "https://tfs.example.com/cs/4711".to_string(),
        });
        assert_eq!(commit.id, "4711");
        assert_eq!(commit.backend, BackendKind::Centralized);
    }
}
