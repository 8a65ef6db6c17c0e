//! Request lifecycle status shared by every feature slice.

use serde::{Deserialize, Serialize};

/// Loading status of a feature slice.
///
/// Exactly one value is held per slice at any time. Terminal states are only
/// reachable from `Pending`; `Idle` is reachable from anywhere via a clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadingStatus {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

impl LoadingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Pending => "pending",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl std::fmt::Display for LoadingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
