//! Activity log vocabulary (append-only audit of admin CRUD mutations).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ActivityAction {
    Insert,
    Update,
    Delete,
}

impl ActivityAction {
    pub fn as_str(self) -> &'static str {
        match self {
            ActivityAction::Insert => "INSERT",
            ActivityAction::Update => "UPDATE",
            ActivityAction::Delete => "DELETE",
        }
    }

    fn verb(self) -> &'static str {
        match self {
            ActivityAction::Insert => "Added",
            ActivityAction::Update => "Updated",
            ActivityAction::Delete => "Deleted",
        }
    }
}

/// Human-readable detail line, e.g. `Added student 2021-CSE-001`.
pub fn describe(action: ActivityAction, entity_type: &str, label: &str) -> String {
    let noun = entity_type.replace('_', " ");
    if label.is_empty() {
        format!("{} {noun}", action.verb())
    } else {
        format!("{} {noun} {label}", action.verb())
    }
}
