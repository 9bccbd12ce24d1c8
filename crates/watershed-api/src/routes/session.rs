//! Routes for the game session.
//!
//! Every command route returns the session view after the command, whether
//! or not the command changed anything.

use axum::extract::State;
use axum::{
    Json, Router,
    routing::{get, post},
};
use serde::Deserialize;
use tracing::{info, instrument};
use watershed_content::RoleKey;
use watershed_content::application::query_handlers::{ScenarioView, StrategyView};
use watershed_core::clock::Clock;
use watershed_core::command::new_correlation_id;
use watershed_session::application::command_handlers::{self, SessionCommandResult};
use watershed_session::application::query_handlers::{self, SessionView, SummaryView};
use watershed_session::application::store::GameStore;
use watershed_session::domain::commands;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /select-role.
#[derive(Debug, Deserialize)]
pub struct SelectRoleRequest {
    /// Role key, case-insensitive.
    pub role: String,
}

/// Request body for POST /apply-option.
#[derive(Debug, Deserialize)]
pub struct ApplyOptionRequest {
    /// The scenario being answered.
    pub scenario_id: String,
    /// The option picked.
    pub option_id: String,
}

/// Request body for POST /toggle-strategy.
#[derive(Debug, Deserialize)]
pub struct ToggleStrategyRequest {
    /// The strategy to add or remove.
    pub strategy_id: String,
}

/// Runs a command handler against the session and returns the new view.
fn dispatch(
    state: &AppState,
    handle: impl FnOnce(&dyn Clock, &mut GameStore) -> SessionCommandResult,
) -> Result<Json<SessionView>, ApiError> {
    let view = state.session.with_store(|store| {
        let result = handle(state.clock.as_ref(), store);
        if !result.was_applied() {
            info!("command left the session unchanged");
        }
        Ok(query_handlers::get_session_view(store))
    })?;
    Ok(Json(view))
}

/// GET /
#[instrument(skip(state))]
async fn get_session(State(state): State<AppState>) -> Result<Json<SessionView>, ApiError> {
    let view = state
        .session
        .with_store(|store| Ok(query_handlers::get_session_view(store)))?;
    Ok(Json(view))
}

/// GET /scenario
#[instrument(skip(state))]
async fn get_current_scenario(
    State(state): State<AppState>,
) -> Result<Json<ScenarioView>, ApiError> {
    let view = state
        .session
        .with_store(|store| query_handlers::get_current_scenario(store))?;
    Ok(Json(view))
}

/// GET /strategies
#[instrument(skip(state))]
async fn get_available_strategies(
    State(state): State<AppState>,
) -> Result<Json<Vec<StrategyView>>, ApiError> {
    let views = state
        .session
        .with_store(|store| Ok(query_handlers::get_available_strategies(store)))?;
    Ok(Json(views))
}

/// GET /summary
#[instrument(skip(state))]
async fn get_summary(State(state): State<AppState>) -> Result<Json<SummaryView>, ApiError> {
    let view = state
        .session
        .with_store(|store| Ok(query_handlers::get_summary(store)))?;
    Ok(Json(view))
}

/// POST /select-role
#[instrument(skip(state, request), fields(role = %request.role))]
async fn select_role(
    State(state): State<AppState>,
    Json(request): Json<SelectRoleRequest>,
) -> Result<Json<SessionView>, ApiError> {
    let role: RoleKey = request.role.parse()?;
    let command = commands::SelectRole {
        correlation_id: new_correlation_id(),
        role,
    };

    info!(correlation_id = %command.correlation_id, "handling select_role command");

    dispatch(&state, |clock, store| {
        command_handlers::handle_select_role(&command, clock, store)
    })
}

/// POST /apply-option
#[instrument(
    skip(state, request),
    fields(scenario_id = %request.scenario_id, option_id = %request.option_id)
)]
async fn apply_option(
    State(state): State<AppState>,
    Json(request): Json<ApplyOptionRequest>,
) -> Result<Json<SessionView>, ApiError> {
    let command = commands::ApplyScenarioOption {
        correlation_id: new_correlation_id(),
        scenario_id: request.scenario_id,
        option_id: request.option_id,
    };

    info!(correlation_id = %command.correlation_id, "handling apply_scenario_option command");

    dispatch(&state, |clock, store| {
        command_handlers::handle_apply_scenario_option(&command, clock, store)
    })
}

/// POST /advance
#[instrument(skip(state))]
async fn advance(State(state): State<AppState>) -> Result<Json<SessionView>, ApiError> {
    let command = commands::AdvanceScenario {
        correlation_id: new_correlation_id(),
    };

    info!(correlation_id = %command.correlation_id, "handling advance_scenario command");

    dispatch(&state, |clock, store| {
        command_handlers::handle_advance_scenario(&command, clock, store)
    })
}

/// POST /jump-to-strategies
#[instrument(skip(state))]
async fn jump_to_strategies(
    State(state): State<AppState>,
) -> Result<Json<SessionView>, ApiError> {
    let command = commands::JumpToStrategyPhase {
        correlation_id: new_correlation_id(),
    };

    info!(correlation_id = %command.correlation_id, "handling jump_to_strategy_phase command");

    dispatch(&state, |clock, store| {
        command_handlers::handle_jump_to_strategy_phase(&command, clock, store)
    })
}

/// POST /toggle-strategy
#[instrument(skip(state, request), fields(strategy_id = %request.strategy_id))]
async fn toggle_strategy(
    State(state): State<AppState>,
    Json(request): Json<ToggleStrategyRequest>,
) -> Result<Json<SessionView>, ApiError> {
    let command = commands::ToggleStrategy {
        correlation_id: new_correlation_id(),
        strategy_id: request.strategy_id,
    };

    info!(correlation_id = %command.correlation_id, "handling toggle_strategy command");

    dispatch(&state, |clock, store| {
        command_handlers::handle_toggle_strategy(&command, clock, store)
    })
}

/// POST /finish
#[instrument(skip(state))]
async fn finish(State(state): State<AppState>) -> Result<Json<SessionView>, ApiError> {
    let command = commands::FinishGame {
        correlation_id: new_correlation_id(),
    };

    info!(correlation_id = %command.correlation_id, "handling finish_game command");

    dispatch(&state, |clock, store| {
        command_handlers::handle_finish_game(&command, clock, store)
    })
}

/// POST /reset
#[instrument(skip(state))]
async fn reset(State(state): State<AppState>) -> Result<Json<SessionView>, ApiError> {
    let command = commands::ResetSession {
        correlation_id: new_correlation_id(),
    };

    info!(correlation_id = %command.correlation_id, "handling reset_session command");

    dispatch(&state, |clock, store| {
        command_handlers::handle_reset_session(&command, clock, store)
    })
}

/// Returns the router for the game session.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_session))
        .route("/scenario", get(get_current_scenario))
        .route("/strategies", get(get_available_strategies))
        .route("/summary", get(get_summary))
        .route("/select-role", post(select_role))
        .route("/apply-option", post(apply_option))
        .route("/advance", post(advance))
        .route("/jump-to-strategies", post(jump_to_strategies))
        .route("/toggle-strategy", post(toggle_strategy))
        .route("/finish", post(finish))
        .route("/reset", post(reset))
}
