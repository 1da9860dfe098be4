use serde::{Deserialize, Serialize};

/// Lifecycle status of a catalog item or order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleStatus {
    Active,
    /// Trashed; restorable until purged.
    Draft,
    /// Terminal.
    Purged,
}

impl LifecycleStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            LifecycleStatus::Active => "active",
            LifecycleStatus::Draft => "draft",
            LifecycleStatus::Purged => "purged",
        }
    }

    /// Transition table. `None` means the action is illegal from this status.
    pub fn apply(self, action: LifecycleAction) -> Option<LifecycleStatus> {
        match (self, action) {
            (LifecycleStatus::Active, LifecycleAction::Trash) => Some(LifecycleStatus::Draft),
            (LifecycleStatus::Draft, LifecycleAction::Restore) => Some(LifecycleStatus::Active),
            (LifecycleStatus::Draft, LifecycleAction::HardDelete) => Some(LifecycleStatus::Purged),
            _ => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        LifecycleAction::ALL
            .iter()
            .all(|action| self.apply(*action).is_none())
    }
}

impl core::fmt::Display for LifecycleStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Admin actions on a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleAction {
    Trash,
    Restore,
    HardDelete,
}

impl LifecycleAction {
    pub const ALL: [LifecycleAction; 3] = [
        LifecycleAction::Trash,
        LifecycleAction::Restore,
        LifecycleAction::HardDelete,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LifecycleAction::Trash => "trash",
            LifecycleAction::Restore => "restore",
            LifecycleAction::HardDelete => "hard_delete",
        }
    }
}

impl core::fmt::Display for LifecycleAction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
