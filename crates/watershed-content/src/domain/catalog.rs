//! The content catalog consumed by the session store.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::roles::{RoleKey, RoleMultiplier, RoleProfile};
use super::scenario::{Act, Scenario};
use super::strategy::Strategy;

/// Source form of a catalog, as written in YAML or JSON content files.
///
/// `acts` is a list of scenario lists: index 0 holds Act I, index 1 Act II.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogDocument {
    /// Selectable roles in display order.
    pub roles: Vec<RoleProfile>,
    /// Role → multiplier. Roles without an entry use the identity multiplier.
    #[serde(default)]
    pub multipliers: BTreeMap<RoleKey, RoleMultiplier>,
    /// Scenarios grouped by act.
    #[serde(default)]
    pub acts: Vec<Vec<Scenario>>,
    /// Long-term strategies in display order.
    #[serde(default)]
    pub strategies: Vec<Strategy>,
    /// What actually happened, shown beside the player's results.
    #[serde(default)]
    pub historical_notes: Vec<String>,
    /// Closing question put to the player on the summary.
    #[serde(default)]
    pub reflection_prompt: String,
}

/// Validated, immutable game content.
#[derive(Debug, Clone)]
pub struct ContentCatalog {
    roles: Vec<RoleProfile>,
    multipliers: BTreeMap<RoleKey, RoleMultiplier>,
    acts: [Vec<Scenario>; 2],
    strategies: Vec<Strategy>,
    historical_notes: Vec<String>,
    reflection_prompt: String,
    version_hash: String,
}

impl ContentCatalog {
    /// Builds a catalog from an already validated document.
    pub(crate) fn compile(document: CatalogDocument, version_hash: String) -> Self {
        let mut acts: [Vec<Scenario>; 2] = [Vec::new(), Vec::new()];
        for (slot, scenarios) in acts.iter_mut().zip(document.acts) {
            *slot = scenarios;
        }
        Self {
            roles: document.roles,
            multipliers: document.multipliers,
            acts,
            strategies: document.strategies,
            historical_notes: document.historical_notes,
            reflection_prompt: document.reflection_prompt,
            version_hash,
        }
    }

    /// Roles in display order.
    #[must_use]
    pub fn roles(&self) -> &[RoleProfile] {
        &self.roles
    }

    /// Display content for `key`, if the catalog defines it.
    #[must_use]
    pub fn role(&self, key: RoleKey) -> Option<&RoleProfile> {
        self.roles.iter().find(|profile| profile.key == key)
    }

    /// The multiplier for `role`; identity when the role is unset or has
    /// no entry in the table.
    #[must_use]
    pub fn multiplier(&self, role: Option<RoleKey>) -> RoleMultiplier {
        role.and_then(|key| self.multipliers.get(&key).copied())
            .unwrap_or_default()
    }

    /// Scenarios of `act` in play order.
    #[must_use]
    pub fn scenarios_in(&self, act: Act) -> &[Scenario] {
        &self.acts[act.index()]
    }

    /// Number of scenarios at `act_index`; zero for the strategy phase.
    #[must_use]
    pub fn scenario_count(&self, act_index: usize) -> usize {
        Act::from_index(act_index).map_or(0, |act| self.scenarios_in(act).len())
    }

    /// The scenario under a cursor, if the cursor points at content.
    #[must_use]
    pub fn scenario_at(&self, act_index: usize, scenario_index: usize) -> Option<&Scenario> {
        Act::from_index(act_index).and_then(|act| self.scenarios_in(act).get(scenario_index))
    }

    /// Looks up a scenario by identifier across both acts.
    #[must_use]
    pub fn scenario(&self, scenario_id: &str) -> Option<&Scenario> {
        self.acts
            .iter()
            .flatten()
            .find(|scenario| scenario.id == scenario_id)
    }

    /// Strategies in display order.
    #[must_use]
    pub fn strategies(&self) -> &[Strategy] {
        &self.strategies
    }

    /// Looks up a strategy by identifier.
    #[must_use]
    pub fn strategy(&self, strategy_id: &str) -> Option<&Strategy> {
        self.strategies
            .iter()
            .find(|strategy| strategy.id == strategy_id)
    }

    /// Historical notes for the summary.
    #[must_use]
    pub fn historical_notes(&self) -> &[String] {
        &self.historical_notes
    }

    /// Reflection question for the summary.
    #[must_use]
    pub fn reflection_prompt(&self) -> &str {
        &self.reflection_prompt
    }

    /// Hex SHA-256 of the source this catalog was ingested from.
    #[must_use]
    pub fn version_hash(&self) -> &str {
        &self.version_hash
    }
}
