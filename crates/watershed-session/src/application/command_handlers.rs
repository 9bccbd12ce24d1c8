//! Command handlers for the game session.
//!
//! Each handler runs a pure transition against the store's current snapshot
//! and, when the transition applies, commits the new snapshot and returns the
//! event it produced. Ignored commands leave the snapshot untouched.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};
use watershed_core::clock::Clock;
use watershed_core::command::Command;

use super::store::GameStore;
use crate::domain::commands::{
    AdvanceScenario, ApplyScenarioOption, FinishGame, JumpToStrategyPhase, ResetSession,
    SelectRole, ToggleStrategy,
};
use crate::domain::events::SessionEvent;
use crate::domain::state::GameState;
use crate::domain::transitions::{self, NoOp, Transition};

/// Outcome of a session command.
#[derive(Debug, Clone)]
pub struct SessionCommandResult {
    /// Snapshot after the command.
    pub state: Arc<GameState>,
    /// The event produced, or `None` when the command was ignored.
    pub event: Option<SessionEvent>,
}

impl SessionCommandResult {
    /// Whether the command changed the session.
    #[must_use]
    pub fn was_applied(&self) -> bool {
        self.event.is_some()
    }
}

fn settle(
    store: &mut GameStore,
    transition: Transition,
    command: &dyn Command,
    clock: &dyn Clock,
) -> SessionCommandResult {
    let event = match transition {
        Transition::Applied { state, kind } => {
            let event = store.commit(state, kind, command.correlation_id(), clock);
            info!(
                event_type = %event.metadata.event_type,
                session_id = %event.metadata.session_id,
                sequence_number = event.metadata.sequence_number,
                "session transition applied"
            );
            Some(event)
        }
        Transition::Ignored(reason) => {
            debug!(command_type = command.command_type(), %reason, "command ignored");
            None
        }
    };
    SessionCommandResult {
        state: store.snapshot(),
        event,
    }
}

/// Handles the `SelectRole` command: starts a fresh session for the role.
#[instrument(skip(clock, store), fields(correlation_id = %command.correlation_id, role = %command.role))]
pub fn handle_select_role(
    command: &SelectRole,
    clock: &dyn Clock,
    store: &mut GameStore,
) -> SessionCommandResult {
    let transition = transitions::select_role(command.role);
    settle(store, transition, command, clock)
}

/// Handles the `ApplyScenarioOption` command: resolves the scenario against
/// the catalog and applies the option with the current role's multiplier.
#[instrument(
    skip(clock, store),
    fields(
        correlation_id = %command.correlation_id,
        scenario_id = %command.scenario_id,
        option_id = %command.option_id
    )
)]
pub fn handle_apply_scenario_option(
    command: &ApplyScenarioOption,
    clock: &dyn Clock,
    store: &mut GameStore,
) -> SessionCommandResult {
    let catalog = store.catalog_handle();
    let state = store.snapshot();
    let transition = match catalog.scenario(&command.scenario_id) {
        Some(scenario) => transitions::apply_scenario_option(
            &state,
            scenario,
            &command.option_id,
            &catalog.multiplier(state.role()),
        ),
        None => {
            warn!("scenario is not in the catalog");
            Transition::Ignored(NoOp::UnknownScenario)
        }
    };
    settle(store, transition, command, clock)
}

/// Handles the `AdvanceScenario` command.
#[instrument(skip(clock, store), fields(correlation_id = %command.correlation_id))]
pub fn handle_advance_scenario(
    command: &AdvanceScenario,
    clock: &dyn Clock,
    store: &mut GameStore,
) -> SessionCommandResult {
    let transition = transitions::advance_scenario(&store.snapshot(), store.catalog());
    settle(store, transition, command, clock)
}

/// Handles the `JumpToStrategyPhase` command.
#[instrument(skip(clock, store), fields(correlation_id = %command.correlation_id))]
pub fn handle_jump_to_strategy_phase(
    command: &JumpToStrategyPhase,
    clock: &dyn Clock,
    store: &mut GameStore,
) -> SessionCommandResult {
    let transition = transitions::jump_to_strategy_phase(&store.snapshot());
    settle(store, transition, command, clock)
}

/// Handles the `ToggleStrategy` command.
#[instrument(
    skip(clock, store),
    fields(correlation_id = %command.correlation_id, strategy_id = %command.strategy_id)
)]
pub fn handle_toggle_strategy(
    command: &ToggleStrategy,
    clock: &dyn Clock,
    store: &mut GameStore,
) -> SessionCommandResult {
    let transition =
        transitions::toggle_strategy(&store.snapshot(), &command.strategy_id, store.catalog());
    settle(store, transition, command, clock)
}

/// Handles the `FinishGame` command: applies the strategy slate once.
#[instrument(skip(clock, store), fields(correlation_id = %command.correlation_id))]
pub fn handle_finish_game(
    command: &FinishGame,
    clock: &dyn Clock,
    store: &mut GameStore,
) -> SessionCommandResult {
    let state = store.snapshot();
    let catalog = store.catalog();
    let transition =
        transitions::finish_game(&state, catalog, &catalog.multiplier(state.role()));
    settle(store, transition, command, clock)
}

/// Handles the `ResetSession` command.
#[instrument(skip(clock, store), fields(correlation_id = %command.correlation_id))]
pub fn handle_reset_session(
    command: &ResetSession,
    clock: &dyn Clock,
    store: &mut GameStore,
) -> SessionCommandResult {
    let transition = transitions::reset_session();
    settle(store, transition, command, clock)
}
