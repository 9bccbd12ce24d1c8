//! Commands for the game session.

use watershed_content::RoleKey;
use watershed_core::command::Command;
use uuid::Uuid;

/// Command to pick a role, discarding the current session.
#[derive(Debug, Clone)]
pub struct SelectRole {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The role to play.
    pub role: RoleKey,
}

impl Command for SelectRole {
    fn command_type(&self) -> &'static str {
        "session.select_role"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to resolve a scenario with one of its options.
#[derive(Debug, Clone)]
pub struct ApplyScenarioOption {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The scenario being answered.
    pub scenario_id: String,
    /// The option picked.
    pub option_id: String,
}

impl Command for ApplyScenarioOption {
    fn command_type(&self) -> &'static str {
        "session.apply_scenario_option"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to move the cursor to the next scenario, act, or the strategy phase.
#[derive(Debug, Clone)]
pub struct AdvanceScenario {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for AdvanceScenario {
    fn command_type(&self) -> &'static str {
        "session.advance_scenario"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to skip the remaining scenarios.
#[derive(Debug, Clone)]
pub struct JumpToStrategyPhase {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for JumpToStrategyPhase {
    fn command_type(&self) -> &'static str {
        "session.jump_to_strategy_phase"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to add or remove a strategy from the slate.
#[derive(Debug, Clone)]
pub struct ToggleStrategy {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The strategy to toggle.
    pub strategy_id: String,
}

impl Command for ToggleStrategy {
    fn command_type(&self) -> &'static str {
        "session.toggle_strategy"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to apply the strategy slate and close the session.
#[derive(Debug, Clone)]
pub struct FinishGame {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for FinishGame {
    fn command_type(&self) -> &'static str {
        "session.finish_game"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to clear the session back to role selection.
#[derive(Debug, Clone)]
pub struct ResetSession {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for ResetSession {
    fn command_type(&self) -> &'static str {
        "session.reset_session"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
