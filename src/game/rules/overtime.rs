//! Overtime rules provider (spec §4.9): NFL Regular and NFL Playoff share a
//! base encoding defensive-touchdown-ends-game, first-possession-TD-ends-
//! game (pre-2025 rule), and sudden death once both teams have possessed.

use std::collections::HashMap;
use std::sync::RwLock;

use lazy_static::lazy_static;

use crate::game::overtime::OvertimeState;
use crate::game::score::ScoreResult;
use crate::game::{Down, Possession};

/// Why an overtime possession ended, fed to `next_possession_action`.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum PossessionEndReason {
    Touchdown,
    FieldGoal,
    Safety,
    TurnoverOnDowns,
    Turnover,
    QuarterExpired,
}

/// What happens to the ball after a possession ends in overtime.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum NextPossessionAction {
    /// Give the ball to the other team via kickoff or a fixed spot.
    OtherTeamPossesses,
    /// The game is over; no further possession.
    GameOver,
    /// Start a fresh period (both teams tied after each possessed once).
    NewPeriod,
}

pub trait OvertimeProvider: Send + Sync {
    fn name(&self) -> &'static str;

    fn period_duration_seconds(&self) -> u32;

    fn timeouts_per_team(&self) -> u32;

    /// `None` means possession starts via kickoff rather than a fixed spot.
    fn fixed_starting_field_position(&self) -> Option<u32>;

    fn has_coin_toss(&self) -> bool {
        true
    }

    fn allows_ties(&self) -> bool;

    /// `0` means unlimited periods.
    fn max_periods(&self) -> u32;

    fn uses_kickoff(&self, _state: &OvertimeState) -> bool {
        true
    }

    fn starting_down_and_distance(&self) -> (Down, u32) {
        (Down::First, 10)
    }

    fn starting_field_position(&self, _state: &OvertimeState, _possession: Possession) -> u32 {
        self.fixed_starting_field_position().unwrap_or(25)
    }

    fn is_two_point_conversion_required(&self, _state: &OvertimeState) -> bool {
        false
    }

    fn is_two_point_play_only(&self, _state: &OvertimeState) -> bool {
        false
    }

    /// Base rule shared by both NFL variants: defensive TD ends it, a TD on
    /// the very first possession ends it (pre-2025 rule), FG/safety on the
    /// first possession hands the ball over, and once both teams have had a
    /// possession the higher score wins.
    fn should_game_end(&self, state: &OvertimeState, score: ScoreResult, scorer: Possession) -> bool {
        let scoring_team_has_ball = scorer == state.current_possession();
        if !scoring_team_has_ball && score == ScoreResult::Touchdown {
            return true;
        }
        if !state.first_possession_complete() && score == ScoreResult::Touchdown {
            return true;
        }
        if state.second_possession_complete() {
            return state.home_period_score() != state.away_period_score();
        }
        false
    }

    fn next_possession_action(
        &self,
        state: &OvertimeState,
        reason: PossessionEndReason,
    ) -> NextPossessionAction {
        if reason == PossessionEndReason::Touchdown && !state.first_possession_complete() {
            return NextPossessionAction::GameOver;
        }
        if state.second_possession_complete() {
            if state.home_period_score() != state.away_period_score() {
                return NextPossessionAction::GameOver;
            }
            return NextPossessionAction::NewPeriod;
        }
        NextPossessionAction::OtherTeamPossesses
    }

    fn should_start_new_period(&self, state: &OvertimeState) -> bool {
        state.second_possession_complete() && state.home_period_score() == state.away_period_score()
    }
}

/// Regular-season OT: one 10-minute period, ties stand if still even.
pub struct NflRegularOvertime;

impl OvertimeProvider for NflRegularOvertime {
    fn name(&self) -> &'static str {
        "nfl-regular"
    }

    fn period_duration_seconds(&self) -> u32 {
        600
    }

    fn timeouts_per_team(&self) -> u32 {
        2
    }

    fn fixed_starting_field_position(&self) -> Option<u32> {
        None
    }

    fn allows_ties(&self) -> bool {
        true
    }

    fn max_periods(&self) -> u32 {
        1
    }
}

/// Playoff OT: full 15-minute periods, no ties — keep playing.
pub struct NflPlayoffOvertime;

impl OvertimeProvider for NflPlayoffOvertime {
    fn name(&self) -> &'static str {
        "nfl-playoff"
    }

    fn period_duration_seconds(&self) -> u32 {
        900
    }

    fn timeouts_per_team(&self) -> u32 {
        3
    }

    fn fixed_starting_field_position(&self) -> Option<u32> {
        None
    }

    fn allows_ties(&self) -> bool {
        false
    }

    fn max_periods(&self) -> u32 {
        0
    }
}

lazy_static! {
    static ref OVERTIME_REGISTRY: RwLock<HashMap<String, &'static (dyn OvertimeProvider)>> = {
        let mut registry: HashMap<String, &'static (dyn OvertimeProvider)> = HashMap::new();
        registry.insert("nfl-regular".to_string(), &NflRegularOvertime);
        registry.insert("nfl-playoff".to_string(), &NflPlayoffOvertime);
        RwLock::new(registry)
    };
}

pub fn lookup(name: &str) -> &'static dyn OvertimeProvider {
    let registry = OVERTIME_REGISTRY.read().expect("registry lock poisoned");
    registry
        .get(&name.to_lowercase())
        .copied()
        .unwrap_or(&NflRegularOvertime)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defensive_touchdown_ends_game_immediately() {
        let provider = NflRegularOvertime;
        let mut state = OvertimeState::new(Possession::Home, Possession::Home);
        state.set_current_possession(Possession::Home);
        assert!(provider.should_game_end(&state, ScoreResult::Touchdown, Possession::Away));
    }

    #[test]
    fn first_possession_touchdown_ends_game() {
        let provider = NflRegularOvertime;
        let state = OvertimeState::new(Possession::Home, Possession::Home);
        assert!(provider.should_game_end(&state, ScoreResult::Touchdown, Possession::Home));
    }

    #[test]
    fn tied_after_both_possessions_starts_sudden_death() {
        let provider = NflRegularOvertime;
        let mut state = OvertimeState::new(Possession::Home, Possession::Home);
        state.complete_possession(Possession::Home);
        state.complete_possession(Possession::Away);
        assert!(!provider.should_game_end(&state, ScoreResult::None, Possession::None));
        assert!(provider.should_start_new_period(&state));
    }

    #[test]
    fn lookup_defaults_to_regular() {
        assert_eq!(lookup("nonsense").name(), "nfl-regular");
        assert_eq!(lookup("NFL-PLAYOFF").name(), "nfl-playoff");
    }
}
