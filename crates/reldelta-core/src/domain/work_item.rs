//! Work items linked to a release transition.

use reldelta_api::RawWorkItem;
use serde::{Deserialize, Serialize};

/// A tracked unit of work (bug, task, story) linked to the deployed code.
///
/// Unique by `id` within a delta; ordering follows the upstream resolution
/// (typically most-recently-changed first).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkItem {
    pub id: i64,
    pub title: String,
    pub state: String,
    pub item_type: String,
    pub url: String,
}

impl From<RawWorkItem> for WorkItem {
    fn from(raw: RawWorkItem) -> Self {
        Self {
            id: raw.id,
            title: raw.title,
            state: raw.state,
            item_type: raw.item_type,
            url: raw.url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_work_item_from_raw_preserves_fields() {
        let item = WorkItem::from(RawWorkItem {
            id: 55,
            title: "Fix bug".to_string(),
            state: "Closed".to_string(),
            item_type: "Bug".to_string(),
            url: "https://wit.example.com/55".to_string(),
        });
        assert_eq!(item.id, 55);
        assert_eq!(item.title, "Fix bug");
        assert_eq!(item.state, "Closed");
        assert_eq!(item.item_type, "Bug");
    }
}
