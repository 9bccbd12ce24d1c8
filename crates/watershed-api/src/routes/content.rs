//! Routes for the content catalog.

use axum::extract::{Path, Query, State};
use axum::{Json, Router, routing::get};
use serde::Deserialize;
use tracing::instrument;
use watershed_content::RoleKey;
use watershed_content::application::query_handlers::{
    self, RoleView, ScenarioView, StrategyView,
};

use crate::error::ApiError;
use crate::state::AppState;

/// Optional `?role=` filter.
#[derive(Debug, Default, Deserialize)]
pub struct RoleFilter {
    /// Role key, case-insensitive. Absent means no role.
    pub role: Option<String>,
}

impl RoleFilter {
    fn parse(&self) -> Result<Option<RoleKey>, ApiError> {
        self.role
            .as_deref()
            .map(str::parse::<RoleKey>)
            .transpose()
            .map_err(ApiError::from)
    }
}

/// GET /roles
#[instrument(skip(state))]
async fn list_roles(State(state): State<AppState>) -> Json<Vec<RoleView>> {
    Json(query_handlers::list_roles(&state.catalog))
}

/// GET /roles/{role}
#[instrument(skip(state))]
async fn get_role(
    State(state): State<AppState>,
    Path(role): Path<String>,
) -> Result<Json<RoleView>, ApiError> {
    let key: RoleKey = role.parse()?;
    let view = query_handlers::get_role(&state.catalog, key)?;
    Ok(Json(view))
}

/// GET /scenarios/{scenario_id}
#[instrument(skip(state, filter))]
async fn get_scenario(
    State(state): State<AppState>,
    Path(scenario_id): Path<String>,
    Query(filter): Query<RoleFilter>,
) -> Result<Json<ScenarioView>, ApiError> {
    let role = filter.parse()?;
    let view = query_handlers::get_scenario(&state.catalog, &scenario_id, role)?;
    Ok(Json(view))
}

/// GET /strategies
#[instrument(skip(state, filter), fields(role = ?filter.role))]
async fn list_strategies(
    State(state): State<AppState>,
    Query(filter): Query<RoleFilter>,
) -> Result<Json<Vec<StrategyView>>, ApiError> {
    let role = filter.parse()?;
    Ok(Json(query_handlers::available_strategies(&state.catalog, role)))
}

/// Returns the router for the content catalog.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/roles", get(list_roles))
        .route("/roles/{role}", get(get_role))
        .route("/scenarios/{scenario_id}", get(get_scenario))
        .route("/strategies", get(list_strategies))
}
