//! Stakeholder roles and their meter multipliers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use watershed_core::error::DomainError;

use super::delta::Meter;

/// The four stakeholder roles a player can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoleKey {
    /// City water department official.
    Nycdep,
    /// Watershed town supervisor.
    Town,
    /// Farmer implementing best management practices.
    Farmer,
    /// Environmental advocacy organization.
    Ngo,
}

impl RoleKey {
    /// Every role, in catalog order.
    pub const ALL: [RoleKey; 4] = [
        RoleKey::Nycdep,
        RoleKey::Town,
        RoleKey::Farmer,
        RoleKey::Ngo,
    ];

    /// The wire/content form of the key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            RoleKey::Nycdep => "NYCDEP",
            RoleKey::Town => "TOWN",
            RoleKey::Farmer => "FARMER",
            RoleKey::Ngo => "NGO",
        }
    }
}

impl fmt::Display for RoleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoleKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RoleKey::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::Validation(format!("unknown role key: {s:?}")))
    }
}

/// Display content for a role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleProfile {
    /// The role this profile describes.
    pub key: RoleKey,
    /// Display name.
    pub name: String,
    /// One-sentence description of the role's responsibilities.
    pub blurb: String,
    /// Short motto shown above each scenario.
    #[serde(default)]
    pub tagline: String,
}

fn unit_factor() -> f64 {
    1.0
}

/// Per-role scaling applied to every raw delta before it reaches the meters.
///
/// Omitted factors load as `1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoleMultiplier {
    /// Factor applied to water-quality deltas.
    #[serde(default = "unit_factor")]
    pub water: f64,
    /// Factor applied to equity deltas.
    #[serde(default = "unit_factor")]
    pub equity: f64,
    /// Factor applied to cost deltas.
    #[serde(default = "unit_factor")]
    pub cost: f64,
}

impl RoleMultiplier {
    /// The multiplier that leaves deltas unchanged.
    pub const IDENTITY: RoleMultiplier = RoleMultiplier {
        water: 1.0,
        equity: 1.0,
        cost: 1.0,
    };

    /// Builds a multiplier from its three factors.
    #[must_use]
    pub const fn new(water: f64, equity: f64, cost: f64) -> Self {
        Self {
            water,
            equity,
            cost,
        }
    }

    /// Returns the factor for `meter`.
    #[must_use]
    pub const fn factor(&self, meter: Meter) -> f64 {
        match meter {
            Meter::Water => self.water,
            Meter::Equity => self.equity,
            Meter::Cost => self.cost,
        }
    }

    /// True when no factor is NaN or infinite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        Meter::ALL.iter().all(|&meter| self.factor(meter).is_finite())
    }
}

impl Default for RoleMultiplier {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Whether content restricted to `allowed` roles is shown to `role`.
///
/// No restriction means visible to everyone; a restriction hides the item
/// from a player who has not picked a role yet.
pub(crate) fn visible_to(allowed: Option<&[RoleKey]>, role: Option<RoleKey>) -> bool {
    match (allowed, role) {
        (None, _) => true,
        (Some(allowed), Some(role)) => allowed.contains(&role),
        (Some(_), None) => false,
    }
}
