//! Query handlers for the content catalog.
//!
//! These return read-only view DTOs, filtered by role visibility where the
//! player should only see part of the catalog.

use serde::Serialize;
use watershed_core::error::DomainError;

use crate::domain::catalog::ContentCatalog;
use crate::domain::delta::MeterDelta;
use crate::domain::roles::{RoleKey, RoleMultiplier};
use crate::domain::scenario::{Scenario, ScenarioOption};
use crate::domain::strategy::Strategy;

/// Read-only view of a role for the role picker.
#[derive(Debug, Clone, Serialize)]
pub struct RoleView {
    /// Role key.
    pub key: RoleKey,
    /// Display name.
    pub name: String,
    /// Description.
    pub blurb: String,
    /// Motto.
    pub tagline: String,
    /// How this role weights outcomes.
    pub multiplier: RoleMultiplier,
}

/// Read-only view of a scenario option.
#[derive(Debug, Clone, Serialize)]
pub struct OptionView {
    /// Option identifier.
    pub id: String,
    /// Button text.
    pub label: String,
    /// Consequence text.
    pub consequence: String,
    /// Raw delta.
    pub delta: MeterDelta,
}

impl From<&ScenarioOption> for OptionView {
    fn from(option: &ScenarioOption) -> Self {
        Self {
            id: option.id.clone(),
            label: option.label.clone(),
            consequence: option.consequence.clone(),
            delta: option.delta,
        }
    }
}

/// Read-only view of a scenario as a given role sees it.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioView {
    /// Scenario identifier.
    pub id: String,
    /// Zero-based act index.
    pub act: usize,
    /// Act heading.
    pub act_label: &'static str,
    /// Role motto, when a role is set.
    pub tagline: Option<String>,
    /// Scenario heading.
    pub title: String,
    /// Question text.
    pub prompt: String,
    /// Options visible to the role. May be empty.
    pub options: Vec<OptionView>,
}

/// Read-only view of a strategy card.
#[derive(Debug, Clone, Serialize)]
pub struct StrategyView {
    /// Strategy identifier.
    pub id: String,
    /// Heading.
    pub title: String,
    /// Description.
    pub summary: String,
    /// Raw delta.
    pub delta: MeterDelta,
}

impl From<&Strategy> for StrategyView {
    fn from(strategy: &Strategy) -> Self {
        Self {
            id: strategy.id.clone(),
            title: strategy.title.clone(),
            summary: strategy.summary.clone(),
            delta: strategy.delta,
        }
    }
}

/// Lists every role with its multiplier.
#[must_use]
pub fn list_roles(catalog: &ContentCatalog) -> Vec<RoleView> {
    catalog
        .roles()
        .iter()
        .map(|profile| RoleView {
            key: profile.key,
            name: profile.name.clone(),
            blurb: profile.blurb.clone(),
            tagline: profile.tagline.clone(),
            multiplier: catalog.multiplier(Some(profile.key)),
        })
        .collect()
}

/// Retrieves one role.
///
/// # Errors
///
/// Returns `DomainError::ContentNotFound` if the catalog does not define `key`.
pub fn get_role(catalog: &ContentCatalog, key: RoleKey) -> Result<RoleView, DomainError> {
    list_roles(catalog)
        .into_iter()
        .find(|view| view.key == key)
        .ok_or_else(|| DomainError::not_found("role", key.as_str()))
}

/// Builds the scenario card shown to `role`.
#[must_use]
pub fn scenario_view(
    catalog: &ContentCatalog,
    scenario: &Scenario,
    role: Option<RoleKey>,
) -> ScenarioView {
    ScenarioView {
        id: scenario.id.clone(),
        act: scenario.act.index(),
        act_label: scenario.act.label(),
        tagline: role
            .and_then(|key| catalog.role(key))
            .map(|profile| profile.tagline.clone()),
        title: scenario.title.clone(),
        prompt: scenario.prompt.clone(),
        options: scenario.visible_options(role).map(OptionView::from).collect(),
    }
}

/// Retrieves a scenario by identifier as `role` sees it.
///
/// # Errors
///
/// Returns `DomainError::ContentNotFound` if no scenario has that identifier.
pub fn get_scenario(
    catalog: &ContentCatalog,
    scenario_id: &str,
    role: Option<RoleKey>,
) -> Result<ScenarioView, DomainError> {
    catalog
        .scenario(scenario_id)
        .map(|scenario| scenario_view(catalog, scenario, role))
        .ok_or_else(|| DomainError::not_found("scenario", scenario_id))
}

/// Strategies offered to `role`, in display order.
#[must_use]
pub fn available_strategies(catalog: &ContentCatalog, role: Option<RoleKey>) -> Vec<StrategyView> {
    catalog
        .strategies()
        .iter()
        .filter(|strategy| strategy.is_visible_to(role))
        .map(StrategyView::from)
        .collect()
}
