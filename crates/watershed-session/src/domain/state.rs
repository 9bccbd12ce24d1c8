//! The session snapshot.

use serde::Serialize;
use watershed_content::{Act, RoleKey};

use super::meters::Meters;

/// Act index of the terminal strategy phase. It has no scenarios.
pub const STRATEGY_PHASE_ACT: usize = 2;

/// Most strategies a player may hold at once.
pub const MAX_STRATEGIES: usize = 3;

/// Fewest strategies before the summary is worth showing.
pub const MIN_STRATEGIES_FOR_SUMMARY: usize = 2;

/// One resolved scenario choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceRecord {
    /// The scenario that was answered.
    pub scenario_id: String,
    /// The option the player picked.
    pub option_id: String,
}

/// Outcome of toggling a strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Toggle {
    Added,
    Removed,
    Full,
}

/// Ordered, duplicate-free set of chosen strategy ids, at most
/// [`MAX_STRATEGIES`] long.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct StrategySelection(Vec<String>);

impl StrategySelection {
    /// Whether `strategy_id` is selected.
    #[must_use]
    pub fn contains(&self, strategy_id: &str) -> bool {
        self.0.iter().any(|id| id == strategy_id)
    }

    /// Number of selected strategies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether another strategy would exceed the cap.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.0.len() >= MAX_STRATEGIES
    }

    /// Whether enough strategies are chosen to move on to the summary.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.0.len() >= MIN_STRATEGIES_FOR_SUMMARY
    }

    /// Selected ids in the order they were picked.
    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.0
    }

    pub(crate) fn toggle(&mut self, strategy_id: &str) -> Toggle {
        if let Some(pos) = self.0.iter().position(|id| id == strategy_id) {
            self.0.remove(pos);
            Toggle::Removed
        } else if self.is_full() {
            Toggle::Full
        } else {
            self.0.push(strategy_id.to_owned());
            Toggle::Added
        }
    }
}

/// Where the player is, derived from the snapshot.
///
/// `Finished` is reported once the strategy slate has been applied; the
/// caller decides what screen that means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    /// No role chosen yet.
    RoleSelection,
    /// Working through the scenarios of a content act.
    Scenarios {
        /// Current act.
        act: Act,
        /// Position within the act.
        scenario_index: usize,
    },
    /// Picking long-term strategies.
    StrategySelection,
    /// Strategies applied; the session is read-only.
    Finished,
}

/// Immutable snapshot of one play session.
///
/// Snapshots are never edited in place: every transition builds a new
/// value from the previous one.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct GameState {
    pub(crate) role: Option<RoleKey>,
    pub(crate) meters: Meters,
    pub(crate) act_index: usize,
    pub(crate) scenario_index: usize,
    pub(crate) chosen_options: Vec<ChoiceRecord>,
    pub(crate) chosen_strategies: StrategySelection,
    pub(crate) reflections: Vec<String>,
    pub(crate) finalized: bool,
}

impl GameState {
    /// The initial state: no role, 60/60/60, act 0, scenario 0, empty logs.
    #[must_use]
    pub fn initial() -> Self {
        Self::default()
    }

    /// Chosen role, if any.
    #[must_use]
    pub fn role(&self) -> Option<RoleKey> {
        self.role
    }

    /// Current meters.
    #[must_use]
    pub fn meters(&self) -> &Meters {
        &self.meters
    }

    /// Act cursor: 0, 1, or [`STRATEGY_PHASE_ACT`].
    #[must_use]
    pub fn act_index(&self) -> usize {
        self.act_index
    }

    /// Scenario cursor within the current act. Meaningless once the act
    /// cursor reaches the strategy phase.
    #[must_use]
    pub fn scenario_index(&self) -> usize {
        self.scenario_index
    }

    /// Every resolved scenario choice, oldest first.
    #[must_use]
    pub fn chosen_options(&self) -> &[ChoiceRecord] {
        &self.chosen_options
    }

    /// Chosen strategies.
    #[must_use]
    pub fn chosen_strategies(&self) -> &StrategySelection {
        &self.chosen_strategies
    }

    /// Reserved for player reflections; currently always empty.
    #[must_use]
    pub fn reflections(&self) -> &[String] {
        &self.reflections
    }

    /// Whether the strategy slate has been applied.
    #[must_use]
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Whether scenario traversal is over.
    #[must_use]
    pub fn in_strategy_phase(&self) -> bool {
        self.act_index >= STRATEGY_PHASE_ACT
    }

    /// Derived phase for navigation.
    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.finalized {
            return Phase::Finished;
        }
        if self.role.is_none() {
            return Phase::RoleSelection;
        }
        match Act::from_index(self.act_index) {
            Some(act) => Phase::Scenarios {
                act,
                scenario_index: self.scenario_index,
            },
            None => Phase::StrategySelection,
        }
    }
}
