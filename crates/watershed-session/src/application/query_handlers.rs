//! Read-only views over the current session.

use serde::Serialize;
use uuid::Uuid;
use watershed_content::RoleKey;
use watershed_content::application::query_handlers::{
    ScenarioView, StrategyView, available_strategies, scenario_view,
};
use watershed_core::error::DomainError;

use super::store::GameStore;
use crate::domain::meters::{MeterReading, Meters, RoundedMeters};
use crate::domain::state::{ChoiceRecord, Phase};

/// The session snapshot as handed to callers.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    /// Current play session.
    pub session_id: Uuid,
    /// Events recorded in this session so far.
    pub sequence: i64,
    /// Chosen role.
    pub role: Option<RoleKey>,
    /// Derived navigation phase.
    pub phase: Phase,
    /// Raw meter values.
    pub meters: Meters,
    /// Meters labelled for display.
    pub gauges: Vec<MeterReading>,
    /// Act cursor.
    pub act_index: usize,
    /// Scenario cursor.
    pub scenario_index: usize,
    /// Resolved choices, oldest first.
    pub chosen_options: Vec<ChoiceRecord>,
    /// Chosen strategy ids in selection order.
    pub chosen_strategies: Vec<String>,
    /// Player reflections.
    pub reflections: Vec<String>,
    /// Whether the strategy slate has been applied.
    pub finalized: bool,
    /// Whether enough strategies are chosen to finish.
    pub ready_to_finish: bool,
}

/// Builds the view of the store's current snapshot.
#[must_use]
pub fn get_session_view(store: &GameStore) -> SessionView {
    let state = store.snapshot();
    SessionView {
        session_id: store.session_id(),
        sequence: store.sequence(),
        role: state.role(),
        phase: state.phase(),
        meters: *state.meters(),
        gauges: state.meters().readings(),
        act_index: state.act_index(),
        scenario_index: state.scenario_index(),
        chosen_options: state.chosen_options().to_vec(),
        chosen_strategies: state.chosen_strategies().ids().to_vec(),
        reflections: state.reflections().to_vec(),
        finalized: state.is_finalized(),
        ready_to_finish: state.chosen_strategies().is_ready(),
    }
}

/// The scenario at the cursor, with options filtered for the current role.
///
/// # Errors
///
/// Returns `DomainError::ContentNotFound` once scenario traversal is over,
/// or if the current act has no scenario at the cursor.
pub fn get_current_scenario(store: &GameStore) -> Result<ScenarioView, DomainError> {
    let state = store.snapshot();
    let catalog = store.catalog();
    catalog
        .scenario_at(state.act_index(), state.scenario_index())
        .map(|scenario| scenario_view(catalog, scenario, state.role()))
        .ok_or_else(|| {
            DomainError::not_found(
                "scenario",
                format!("act {} #{}", state.act_index(), state.scenario_index()),
            )
        })
}

/// Strategies offered to the current role.
#[must_use]
pub fn get_available_strategies(store: &GameStore) -> Vec<StrategyView> {
    available_strategies(store.catalog(), store.snapshot().role())
}

/// Closing screen contents.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryView {
    /// Chosen role.
    pub role: Option<RoleKey>,
    /// Display name of the role.
    pub role_name: Option<String>,
    /// Meters rounded to whole numbers.
    pub meters: RoundedMeters,
    /// Titles of the chosen strategies in selection order.
    pub chosen_strategies: Vec<String>,
    /// Closing question for the player.
    pub reflection_prompt: String,
    /// What actually happened.
    pub historical_notes: Vec<String>,
    /// Whether the strategy slate has been applied.
    pub finalized: bool,
}

/// Builds the summary of the current session.
#[must_use]
pub fn get_summary(store: &GameStore) -> SummaryView {
    let state = store.snapshot();
    let catalog = store.catalog();
    SummaryView {
        role: state.role(),
        role_name: state
            .role()
            .and_then(|key| catalog.role(key))
            .map(|profile| profile.name.clone()),
        meters: state.meters().rounded(),
        chosen_strategies: state
            .chosen_strategies()
            .ids()
            .iter()
            .filter_map(|id| catalog.strategy(id))
            .map(|strategy| strategy.title.clone())
            .collect(),
        reflection_prompt: catalog.reflection_prompt().to_owned(),
        historical_notes: catalog.historical_notes().to_vec(),
        finalized: state.is_finalized(),
    }
}
