//! Long-term strategies selectable in the final phase.

use serde::{Deserialize, Serialize};

use super::delta::MeterDelta;
use super::roles::{RoleKey, visible_to};

/// A long-term intervention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strategy {
    /// Identifier, unique across the catalog.
    pub id: String,
    /// Card heading.
    pub title: String,
    /// One-line description.
    #[serde(default)]
    pub summary: String,
    /// Raw meter change before role weighting.
    #[serde(default)]
    pub delta: MeterDelta,
    /// Roles that may pick this strategy; `None` means everyone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<RoleKey>>,
}

impl Strategy {
    /// Whether a player holding `role` is offered this strategy.
    #[must_use]
    pub fn is_visible_to(&self, role: Option<RoleKey>) -> bool {
        visible_to(self.roles.as_deref(), role)
    }
}
