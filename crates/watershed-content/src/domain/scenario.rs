//! Scenarios, their options, and the acts that group them.

use serde::{Deserialize, Serialize};

use super::delta::MeterDelta;
use super::roles::{RoleKey, visible_to};

/// A content act. Act index 2 is the strategy phase and has no scenarios,
/// so it is not represented here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Act {
    /// Act I: programs that worked.
    Successes,
    /// Act II: pressures on the system.
    Challenges,
}

impl Act {
    /// Both content acts, in play order.
    pub const ALL: [Act; 2] = [Act::Successes, Act::Challenges];

    /// Zero-based act index.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Act::Successes => 0,
            Act::Challenges => 1,
        }
    }

    /// The content act at `index`, if any.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Act> {
        match index {
            0 => Some(Act::Successes),
            1 => Some(Act::Challenges),
            _ => None,
        }
    }

    /// Heading shown above the act's scenarios.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Act::Successes => "Act I: Successes",
            Act::Challenges => "Act II: Challenges",
        }
    }
}

impl TryFrom<u8> for Act {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Act::from_index(usize::from(value)).ok_or_else(|| format!("act must be 0 or 1, got {value}"))
    }
}

impl From<Act> for u8 {
    fn from(act: Act) -> u8 {
        match act {
            Act::Successes => 0,
            Act::Challenges => 1,
        }
    }
}

/// One selectable answer to a scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOption {
    /// Identifier, unique within its scenario.
    pub id: String,
    /// Button text.
    pub label: String,
    /// What happens if the player picks it.
    #[serde(default)]
    pub consequence: String,
    /// Raw meter change before role weighting.
    #[serde(default)]
    pub delta: MeterDelta,
    /// Roles that may see this option; `None` means everyone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<RoleKey>>,
}

impl ScenarioOption {
    /// Whether a player holding `role` is shown this option.
    #[must_use]
    pub fn is_visible_to(&self, role: Option<RoleKey>) -> bool {
        visible_to(self.roles.as_deref(), role)
    }
}

/// A decision point with a fixed, ordered set of options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Identifier, unique across the catalog.
    pub id: String,
    /// The act this scenario belongs to.
    pub act: Act,
    /// Scenario heading.
    pub title: String,
    /// The question put to the player.
    #[serde(default)]
    pub prompt: String,
    /// Options in display order.
    pub options: Vec<ScenarioOption>,
}

impl Scenario {
    /// Looks up an option by identifier.
    #[must_use]
    pub fn option(&self, option_id: &str) -> Option<&ScenarioOption> {
        self.options.iter().find(|option| option.id == option_id)
    }

    /// Options shown to a player holding `role`, in display order.
    pub fn visible_options(&self, role: Option<RoleKey>) -> impl Iterator<Item = &ScenarioOption> {
        self.options
            .iter()
            .filter(move |option| option.is_visible_to(role))
    }
}
