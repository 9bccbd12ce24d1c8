//! Domain events for the game session.
//!
//! One event is emitted per accepted transition. Ignored inputs emit none.

use serde::Serialize;
use watershed_content::{MeterDelta, RoleKey};
use watershed_core::event::{DomainEvent, EventMetadata};

use super::meters::Meters;

/// Emitted when a role is picked and a fresh session begins.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleSelected {
    /// The chosen role.
    pub role: RoleKey,
}

/// Emitted when a scenario option is resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionApplied {
    /// The scenario answered.
    pub scenario_id: String,
    /// The option picked.
    pub option_id: String,
    /// The option's delta after role weighting.
    pub weighted_delta: MeterDelta,
    /// Meters after clamping.
    pub meters: Meters,
}

/// Emitted when the cursor moves to the next scenario of the same act.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioAdvanced {
    /// Current act.
    pub act_index: usize,
    /// New position within the act.
    pub scenario_index: usize,
}

/// Emitted when the cursor moves from Act I to Act II.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActAdvanced {
    /// The act now being played.
    pub act_index: usize,
}

/// Emitted when scenario traversal ends.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyPhaseEntered {
    /// Act the player was in when traversal ended.
    pub from_act_index: usize,
    /// True when the player skipped remaining scenarios.
    pub skipped: bool,
}

/// Emitted when a strategy is added to or removed from the slate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyToggled {
    /// The strategy toggled.
    pub strategy_id: String,
    /// Whether it is now selected.
    pub selected: bool,
    /// Slate size afterwards.
    pub selection_size: usize,
}

/// Emitted when the strategy slate is applied to the meters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameFinished {
    /// Strategies applied, in selection order.
    pub strategy_ids: Vec<String>,
    /// Sum of their raw deltas.
    pub aggregate_delta: MeterDelta,
    /// The aggregate after one round of role weighting.
    pub weighted_delta: MeterDelta,
    /// Final meters.
    pub meters: Meters,
}

/// Event type identifier for [`RoleSelected`].
pub const ROLE_SELECTED_EVENT_TYPE: &str = "session.role_selected";

/// Event type identifier for [`OptionApplied`].
pub const OPTION_APPLIED_EVENT_TYPE: &str = "session.option_applied";

/// Event type identifier for [`ScenarioAdvanced`].
pub const SCENARIO_ADVANCED_EVENT_TYPE: &str = "session.scenario_advanced";

/// Event type identifier for [`ActAdvanced`].
pub const ACT_ADVANCED_EVENT_TYPE: &str = "session.act_advanced";

/// Event type identifier for [`StrategyPhaseEntered`].
pub const STRATEGY_PHASE_ENTERED_EVENT_TYPE: &str = "session.strategy_phase_entered";

/// Event type identifier for [`StrategyToggled`].
pub const STRATEGY_TOGGLED_EVENT_TYPE: &str = "session.strategy_toggled";

/// Event type identifier for [`GameFinished`].
pub const GAME_FINISHED_EVENT_TYPE: &str = "session.game_finished";

/// Event type identifier for a session reset.
pub const SESSION_RESET_EVENT_TYPE: &str = "session.session_reset";

/// Event payload variants for the game session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SessionEventKind {
    /// A role was chosen.
    RoleSelected(RoleSelected),
    /// A scenario option was applied.
    OptionApplied(OptionApplied),
    /// The scenario cursor moved within an act.
    ScenarioAdvanced(ScenarioAdvanced),
    /// The act cursor moved to Act II.
    ActAdvanced(ActAdvanced),
    /// Scenario traversal ended.
    StrategyPhaseEntered(StrategyPhaseEntered),
    /// A strategy was toggled.
    StrategyToggled(StrategyToggled),
    /// The strategy slate was applied.
    GameFinished(GameFinished),
    /// The session was cleared back to role selection.
    SessionReset,
}

impl SessionEventKind {
    /// Event type name for this payload.
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self {
            SessionEventKind::RoleSelected(_) => ROLE_SELECTED_EVENT_TYPE,
            SessionEventKind::OptionApplied(_) => OPTION_APPLIED_EVENT_TYPE,
            SessionEventKind::ScenarioAdvanced(_) => SCENARIO_ADVANCED_EVENT_TYPE,
            SessionEventKind::ActAdvanced(_) => ACT_ADVANCED_EVENT_TYPE,
            SessionEventKind::StrategyPhaseEntered(_) => STRATEGY_PHASE_ENTERED_EVENT_TYPE,
            SessionEventKind::StrategyToggled(_) => STRATEGY_TOGGLED_EVENT_TYPE,
            SessionEventKind::GameFinished(_) => GAME_FINISHED_EVENT_TYPE,
            SessionEventKind::SessionReset => SESSION_RESET_EVENT_TYPE,
        }
    }
}

/// Domain event envelope for the game session.
#[derive(Debug, Clone)]
pub struct SessionEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: SessionEventKind,
}

impl DomainEvent for SessionEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(&self.kind).expect("SessionEventKind serialization is infallible")
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
