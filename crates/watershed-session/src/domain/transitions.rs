//! Pure session transitions.
//!
//! Each function maps the current snapshot plus an input to either a new
//! snapshot with a description of the change, or [`Transition::Ignored`]
//! when the input is one the store deliberately tolerates without effect.
//! None of them touch the previous snapshot.

use std::fmt;

use watershed_content::{ContentCatalog, MeterDelta, RoleKey, RoleMultiplier, Scenario};

use super::events::{
    ActAdvanced, GameFinished, OptionApplied, RoleSelected, ScenarioAdvanced, SessionEventKind,
    StrategyPhaseEntered, StrategyToggled,
};
use super::state::{ChoiceRecord, GameState, STRATEGY_PHASE_ACT, Toggle};

/// Why an input left the snapshot untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoOp {
    /// The option is not part of the scenario.
    UnknownOption,
    /// The scenario is not part of the catalog.
    UnknownScenario,
    /// The strategy is not part of the catalog.
    UnknownStrategy,
    /// The slate already holds the maximum number of strategies.
    SelectionFull,
    /// Scenario traversal has already ended.
    AlreadyInStrategyPhase,
    /// The strategy slate has already been applied.
    AlreadyFinalized,
}

impl fmt::Display for NoOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            NoOp::UnknownOption => "option is not part of the scenario",
            NoOp::UnknownScenario => "scenario is not in the catalog",
            NoOp::UnknownStrategy => "strategy is not in the catalog",
            NoOp::SelectionFull => "strategy slate is full",
            NoOp::AlreadyInStrategyPhase => "already in the strategy phase",
            NoOp::AlreadyFinalized => "game already finished",
        };
        f.write_str(reason)
    }
}

/// Result of a transition function.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// A new snapshot and what changed.
    Applied {
        /// The next snapshot.
        state: GameState,
        /// Event payload describing the change.
        kind: SessionEventKind,
    },
    /// Input tolerated without effect.
    Ignored(NoOp),
}

impl Transition {
    fn applied(state: GameState, kind: SessionEventKind) -> Self {
        Transition::Applied { state, kind }
    }

    /// The snapshot after this transition, given the one before it.
    #[must_use]
    pub fn into_state(self, previous: &GameState) -> GameState {
        match self {
            Transition::Applied { state, .. } => state,
            Transition::Ignored(_) => previous.clone(),
        }
    }
}

/// Starts a fresh session for `role`. Always applies.
#[must_use]
pub fn select_role(role: RoleKey) -> Transition {
    let state = GameState {
        role: Some(role),
        ..GameState::initial()
    };
    Transition::applied(state, SessionEventKind::RoleSelected(RoleSelected { role }))
}

/// Resolves `scenario` with `option_id`.
///
/// The option's raw delta is scaled by `multiplier`, added to the meters,
/// and clamped; the choice is appended to the log. An option id that the
/// scenario does not contain is ignored.
#[must_use]
pub fn apply_scenario_option(
    state: &GameState,
    scenario: &Scenario,
    option_id: &str,
    multiplier: &RoleMultiplier,
) -> Transition {
    let Some(option) = scenario.option(option_id) else {
        return Transition::Ignored(NoOp::UnknownOption);
    };

    let weighted_delta = option.delta.weighted(multiplier);
    let meters = state.meters.apply(&weighted_delta);

    let mut chosen_options = state.chosen_options.clone();
    chosen_options.push(ChoiceRecord {
        scenario_id: scenario.id.clone(),
        option_id: option.id.clone(),
    });

    let next = GameState {
        meters,
        chosen_options,
        ..state.clone()
    };
    Transition::applied(
        next,
        SessionEventKind::OptionApplied(OptionApplied {
            scenario_id: scenario.id.clone(),
            option_id: option.id.clone(),
            weighted_delta,
            meters,
        }),
    )
}

/// Moves the cursor forward one step.
///
/// Within an act the scenario index advances; past the last scenario of
/// Act I the cursor moves to the start of Act II; past the last scenario
/// of Act II it enters the strategy phase, which it never leaves.
#[must_use]
pub fn advance_scenario(state: &GameState, catalog: &ContentCatalog) -> Transition {
    if state.in_strategy_phase() {
        return Transition::Ignored(NoOp::AlreadyInStrategyPhase);
    }

    let next_scenario_index = state.scenario_index + 1;
    if next_scenario_index < catalog.scenario_count(state.act_index) {
        let next = GameState {
            scenario_index: next_scenario_index,
            ..state.clone()
        };
        return Transition::applied(
            next,
            SessionEventKind::ScenarioAdvanced(ScenarioAdvanced {
                act_index: state.act_index,
                scenario_index: next_scenario_index,
            }),
        );
    }

    let next_act_index = state.act_index + 1;
    if next_act_index < STRATEGY_PHASE_ACT {
        let next = GameState {
            act_index: next_act_index,
            scenario_index: 0,
            ..state.clone()
        };
        return Transition::applied(
            next,
            SessionEventKind::ActAdvanced(ActAdvanced {
                act_index: next_act_index,
            }),
        );
    }

    enter_strategy_phase(state, false)
}

/// Skips any remaining scenarios. Repeat calls are ignored.
#[must_use]
pub fn jump_to_strategy_phase(state: &GameState) -> Transition {
    if state.in_strategy_phase() {
        return Transition::Ignored(NoOp::AlreadyInStrategyPhase);
    }
    enter_strategy_phase(state, true)
}

fn enter_strategy_phase(state: &GameState, skipped: bool) -> Transition {
    let next = GameState {
        act_index: STRATEGY_PHASE_ACT,
        ..state.clone()
    };
    Transition::applied(
        next,
        SessionEventKind::StrategyPhaseEntered(StrategyPhaseEntered {
            from_act_index: state.act_index,
            skipped,
        }),
    )
}

/// Adds `strategy_id` to the slate, or removes it if already chosen.
///
/// Removal always applies. Adding to a full slate, or toggling an id the
/// catalog does not know, is ignored.
/// The phase is not checked; callers decide when selection is offered.
#[must_use]
pub fn toggle_strategy(state: &GameState, strategy_id: &str, catalog: &ContentCatalog) -> Transition {
    if !state.chosen_strategies.contains(strategy_id) && catalog.strategy(strategy_id).is_none() {
        return Transition::Ignored(NoOp::UnknownStrategy);
    }

    let mut chosen_strategies = state.chosen_strategies.clone();
    let selected = match chosen_strategies.toggle(strategy_id) {
        Toggle::Added => true,
        Toggle::Removed => false,
        Toggle::Full => return Transition::Ignored(NoOp::SelectionFull),
    };

    let selection_size = chosen_strategies.len();
    let next = GameState {
        chosen_strategies,
        ..state.clone()
    };
    Transition::applied(
        next,
        SessionEventKind::StrategyToggled(StrategyToggled {
            strategy_id: strategy_id.to_owned(),
            selected,
            selection_size,
        }),
    )
}

/// Applies the strategy slate once.
///
/// The raw deltas of the chosen strategies are summed first and the role
/// multiplier is applied to that total, not to each strategy. The session
/// is then marked finalized and later calls are ignored.
#[must_use]
pub fn finish_game(
    state: &GameState,
    catalog: &ContentCatalog,
    multiplier: &RoleMultiplier,
) -> Transition {
    if state.finalized {
        return Transition::Ignored(NoOp::AlreadyFinalized);
    }

    let strategy_ids: Vec<String> = state.chosen_strategies.ids().to_vec();
    let aggregate_delta: MeterDelta = strategy_ids
        .iter()
        .filter_map(|id| catalog.strategy(id))
        .map(|strategy| strategy.delta)
        .sum();
    let weighted_delta = aggregate_delta.weighted(multiplier);
    let meters = state.meters.apply(&weighted_delta);

    let next = GameState {
        meters,
        finalized: true,
        ..state.clone()
    };
    Transition::applied(
        next,
        SessionEventKind::GameFinished(GameFinished {
            strategy_ids,
            aggregate_delta,
            weighted_delta,
            meters,
        }),
    )
}

/// Clears everything, role included. Always applies.
#[must_use]
pub fn reset_session() -> Transition {
    Transition::applied(GameState::initial(), SessionEventKind::SessionReset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::meters::Meters;
    use crate::domain::state::{MAX_STRATEGIES, Phase};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use watershed_content::Meter;
    use watershed_test_support::{assert_close, fixture_catalog};

    fn applied(transition: Transition) -> GameState {
        match transition {
            Transition::Applied { state, .. } => state,
            Transition::Ignored(reason) => panic!("expected Applied, got Ignored({reason})"),
        }
    }

    fn started(role: RoleKey) -> GameState {
        applied(select_role(role))
    }

    #[test]
    fn test_farmer_option_is_weighted_by_role_multiplier() {
        // Arrange
        let catalog = fixture_catalog();
        let state = started(RoleKey::Farmer);
        let scenario = catalog.scenario("fx-easements").unwrap();
        let multiplier = catalog.multiplier(state.role());

        // Act
        let next = applied(apply_scenario_option(
            &state,
            scenario,
            "fx-farm-pilots",
            &multiplier,
        ));

        // Assert
        assert_close(next.meters().water(), 66.3);
        assert_close(next.meters().equity(), 65.5);
        assert_close(next.meters().cost(), 57.0);
        assert_eq!(
            next.chosen_options(),
            [ChoiceRecord {
                scenario_id: "fx-easements".to_owned(),
                option_id: "fx-farm-pilots".to_owned(),
            }]
        );
    }

    #[test]
    fn test_option_delta_clamps_at_both_bounds() {
        // Arrange
        let catalog = fixture_catalog();
        let state = GameState {
            meters: Meters::new(98.0, 99.0, 2.0),
            ..GameState::initial()
        };
        let scenario = catalog.scenario("fx-turbidity").unwrap();

        // Act
        let next = applied(apply_scenario_option(
            &state,
            scenario,
            "fx-adaptive-ops",
            &RoleMultiplier::IDENTITY,
        ));

        // Assert
        assert_eq!(*next.meters(), Meters::new(100.0, 99.0, 0.0));
    }

    #[test]
    fn test_weighted_delta_formula_holds_for_every_role() {
        let catalog = fixture_catalog();
        let scenario = catalog.scenario("fx-easements").unwrap();
        for role in RoleKey::ALL {
            for option in &scenario.options {
                // Arrange
                let state = started(role);
                let multiplier = catalog.multiplier(Some(role));

                // Act
                let next = applied(apply_scenario_option(&state, scenario, &option.id, &multiplier));

                // Assert
                for meter in Meter::ALL {
                    let expected = (60.0 + option.delta.get(meter) * multiplier.factor(meter))
                        .clamp(0.0, 100.0);
                    assert_close(next.meters().get(meter), expected);
                }
            }
        }
    }

    #[test]
    fn test_unknown_option_is_ignored() {
        // Arrange
        let catalog = fixture_catalog();
        let state = started(RoleKey::Town);
        let scenario = catalog.scenario("fx-easements").unwrap();

        // Act
        let transition =
            apply_scenario_option(&state, scenario, "no-such-option", &RoleMultiplier::IDENTITY);

        // Assert
        assert_eq!(transition, Transition::Ignored(NoOp::UnknownOption));
        assert_eq!(transition.into_state(&state), state);
    }

    #[test]
    fn test_select_role_discards_previous_progress() {
        // Arrange
        let catalog = fixture_catalog();
        let mut state = started(RoleKey::Ngo);
        let scenario = catalog.scenario("fx-easements").unwrap();
        state = apply_scenario_option(&state, scenario, "fx-targeted", &RoleMultiplier::IDENTITY)
            .into_state(&state);
        state = advance_scenario(&state, &catalog).into_state(&state);
        state = jump_to_strategy_phase(&state).into_state(&state);
        state = toggle_strategy(&state, "fx-retrofits", &catalog).into_state(&state);
        assert_eq!(state.chosen_strategies().len(), 1);

        // Act
        let fresh = applied(select_role(RoleKey::Farmer));

        // Assert
        assert_eq!(fresh.role(), Some(RoleKey::Farmer));
        assert_eq!(*fresh.meters(), Meters::new(60.0, 60.0, 60.0));
        assert!(fresh.chosen_options().is_empty());
        assert!(fresh.chosen_strategies().is_empty());
        assert_eq!(fresh.act_index(), 0);
        assert_eq!(fresh.scenario_index(), 0);
        assert!(!fresh.is_finalized());
    }

    #[test]
    fn test_advance_reaches_strategy_phase_after_exactly_all_scenarios() {
        // Arrange
        let catalog = fixture_catalog();
        let total = catalog.scenario_count(0) + catalog.scenario_count(1);
        let mut state = started(RoleKey::Town);

        // Act / Assert
        for step in 1..=total {
            state = applied(advance_scenario(&state, &catalog));
            if step < total {
                assert!(state.act_index() < STRATEGY_PHASE_ACT, "left early at step {step}");
            }
        }
        assert_eq!(state.act_index(), STRATEGY_PHASE_ACT);
        assert_eq!(
            advance_scenario(&state, &catalog),
            Transition::Ignored(NoOp::AlreadyInStrategyPhase)
        );
    }

    #[test]
    fn test_advance_moves_to_next_act_with_index_reset() {
        // Arrange
        let catalog = fixture_catalog();
        let state = GameState {
            role: Some(RoleKey::Town),
            scenario_index: catalog.scenario_count(0) - 1,
            ..GameState::initial()
        };

        // Act
        let transition = advance_scenario(&state, &catalog);

        // Assert
        match transition {
            Transition::Applied { state, kind } => {
                assert_eq!(state.act_index(), 1);
                assert_eq!(state.scenario_index(), 0);
                assert_eq!(kind, SessionEventKind::ActAdvanced(ActAdvanced { act_index: 1 }));
            }
            Transition::Ignored(reason) => panic!("unexpected no-op: {reason}"),
        }
    }

    #[test]
    fn test_jump_to_strategy_phase_is_idempotent() {
        // Arrange
        let state = started(RoleKey::Nycdep);

        // Act
        let jumped = applied(jump_to_strategy_phase(&state));
        let again = jump_to_strategy_phase(&jumped);

        // Assert
        assert_eq!(jumped.act_index(), STRATEGY_PHASE_ACT);
        assert_eq!(jumped.scenario_index(), state.scenario_index());
        assert_eq!(again.into_state(&jumped), jumped);
    }

    #[test]
    fn test_fourth_strategy_rejected_until_one_is_removed() {
        // Arrange
        let catalog = fixture_catalog();
        let mut state = applied(jump_to_strategy_phase(&started(RoleKey::Town)));
        for id in ["fx-retrofits", "fx-incentives", "fx-co-management"] {
            state = applied(toggle_strategy(&state, id, &catalog));
        }

        // Act / Assert: fourth is rejected.
        let rejected = toggle_strategy(&state, "fx-permitting", &catalog);
        assert_eq!(rejected, Transition::Ignored(NoOp::SelectionFull));
        assert_eq!(
            state.chosen_strategies().ids(),
            ["fx-retrofits", "fx-incentives", "fx-co-management"]
        );

        // Removing one frees a slot.
        state = applied(toggle_strategy(&state, "fx-incentives", &catalog));
        assert_eq!(state.chosen_strategies().len(), 2);
        state = applied(toggle_strategy(&state, "fx-permitting", &catalog));
        assert_eq!(
            state.chosen_strategies().ids(),
            ["fx-retrofits", "fx-co-management", "fx-permitting"]
        );
    }

    #[test]
    fn test_unknown_strategy_is_ignored() {
        let catalog = fixture_catalog();
        let state = started(RoleKey::Town);

        let transition = toggle_strategy(&state, "strat-made-up", &catalog);

        assert_eq!(transition, Transition::Ignored(NoOp::UnknownStrategy));
    }

    #[test]
    fn test_toggle_strategy_applies_outside_strategy_phase() {
        // Arrange
        let catalog = fixture_catalog();
        let state = started(RoleKey::Town);
        assert!(matches!(state.phase(), Phase::Scenarios { .. }));

        // Act
        let next = applied(toggle_strategy(&state, "fx-retrofits", &catalog));

        // Assert
        assert_eq!(next.chosen_strategies().ids(), ["fx-retrofits"]);
        assert!(matches!(next.phase(), Phase::Scenarios { .. }));
    }

    #[test]
    fn test_finish_weights_aggregate_once_and_is_one_shot() {
        // Arrange
        let catalog = fixture_catalog();
        let mut state = applied(jump_to_strategy_phase(&started(RoleKey::Nycdep)));
        state = applied(toggle_strategy(&state, "fx-retrofits", &catalog));
        state = applied(toggle_strategy(&state, "fx-permitting", &catalog));
        let multiplier = catalog.multiplier(state.role());

        // Act
        let finished = applied(finish_game(&state, &catalog, &multiplier));
        let repeat = finish_game(&finished, &catalog, &multiplier);

        // Assert
        // retrofits {7, 2, -3} + permitting {5, 0, -2} = {12, 2, -5};
        // weighted by NYCDEP {1.15, 1.0, 0.95}.
        assert_close(finished.meters().water(), 60.0 + 12.0 * 1.15);
        assert_close(finished.meters().equity(), 62.0);
        assert_close(finished.meters().cost(), 60.0 - 5.0 * 0.95);
        assert!(finished.is_finalized());
        assert_eq!(repeat, Transition::Ignored(NoOp::AlreadyFinalized));
    }

    #[test]
    fn test_finish_with_empty_slate_only_finalizes() {
        let catalog = fixture_catalog();
        let state = started(RoleKey::Farmer);

        let finished = applied(finish_game(&state, &catalog, &catalog.multiplier(state.role())));

        assert_eq!(finished.meters(), state.meters());
        assert!(finished.is_finalized());
    }

    #[test]
    fn test_reset_clears_role() {
        let state = started(RoleKey::Ngo);

        let reset = reset_session().into_state(&state);

        assert_eq!(reset, GameState::initial());
    }

    #[test]
    fn test_act_index_never_decreases_without_reset() {
        // Arrange
        let catalog = fixture_catalog();
        let mut state = started(RoleKey::Farmer);
        let mut previous_act = state.act_index();

        // Act / Assert
        for _ in 0..10 {
            state = advance_scenario(&state, &catalog).into_state(&state);
            assert!(state.act_index() >= previous_act);
            previous_act = state.act_index();
        }
    }

    #[test]
    fn test_invariants_hold_under_random_operation_sequences() {
        let catalog = fixture_catalog();
        let strategy_ids: Vec<&str> = catalog.strategies().iter().map(|s| s.id.as_str()).collect();
        let mut rng = StdRng::seed_from_u64(0x5eed_cafe);

        for _ in 0..200 {
            let mut state = GameState::initial();
            for _ in 0..60 {
                let transition = match rng.random_range(0..7) {
                    0 => select_role(RoleKey::ALL[rng.random_range(0..RoleKey::ALL.len())]),
                    1 | 2 => match catalog.scenario_at(state.act_index(), state.scenario_index()) {
                        Some(scenario) => {
                            let option = &scenario.options[rng.random_range(0..scenario.options.len())];
                            apply_scenario_option(
                                &state,
                                scenario,
                                &option.id,
                                &catalog.multiplier(state.role()),
                            )
                        }
                        None => jump_to_strategy_phase(&state),
                    },
                    3 => advance_scenario(&state, &catalog),
                    4 => toggle_strategy(
                        &state,
                        strategy_ids[rng.random_range(0..strategy_ids.len())],
                        &catalog,
                    ),
                    5 => finish_game(&state, &catalog, &catalog.multiplier(state.role())),
                    _ => jump_to_strategy_phase(&state),
                };
                state = transition.into_state(&state);

                assert!(state.meters().in_bounds(), "meters out of bounds: {:?}", state.meters());
                assert!(state.chosen_strategies().len() <= MAX_STRATEGIES);
                let mut ids = state.chosen_strategies().ids().to_vec();
                ids.sort();
                ids.dedup();
                assert_eq!(ids.len(), state.chosen_strategies().len());
                assert!(state.act_index() <= STRATEGY_PHASE_ACT);
            }
        }
    }
}
