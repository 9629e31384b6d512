//! Event checks run by the flow state machine's `PostPlay` state, in order:
//! score, quarter-expire, half-expire, two-minute warning, game-expire
//! (spec §4.11).

use crate::game::clock::Quarter;
use crate::game::overtime::OvertimeState;
use crate::game::play::Play;
use crate::game::rules::end_of_half::EndOfHalfProvider;
use crate::game::rules::overtime::OvertimeProvider;
use crate::game::rules::two_minute_warning::TwoMinuteWarningProvider;
use crate::game::score::{apply_score, ScoreResult};
use crate::game::{Game, Possession};

/// Inspect a finished play's outcome flags and apply at most one primary
/// scoring event via the Game's mutators. PATs/2-pt conversions are
/// separate plays, applied directly by the flow via [`apply_score`] rather
/// than discovered here.
pub fn score_check(game: &mut Game, play: &Play) {
    let common = play.common();
    let snap_team = common.possession_at_snap;
    if common.touchdown {
        let scoring_team = if common.possession_changed { snap_team.opponent() } else { snap_team };
        apply_score(game, scoring_team, ScoreResult::Touchdown);
        return;
    }
    if common.safety {
        apply_score(game, snap_team.opponent(), ScoreResult::Safety);
        return;
    }
    if let Play::FieldGoal(fg) = play {
        if fg.made {
            apply_score(game, snap_team, ScoreResult::FieldGoal);
        }
    }
}

/// Result of running the quarter clock forward by a play's elapsed time.
#[derive(Clone, Copy, Debug)]
pub struct QuarterExpireResult {
    pub quarter: Quarter,
    pub seconds_before: u32,
    pub seconds_after: u32,
    pub quarter_expired: bool,
}

/// Subtract `elapsed_seconds` from the current quarter; if it hits zero and
/// this isn't a half-ending quarter, advance the quarter pointer (spec
/// §4.11 "Quarter-expire"). Half-ending quarters (2nd, 4th) are left at
/// zero for the half/game-expire checks to handle.
pub fn quarter_expire_check(game: &mut Game, elapsed_seconds: u32) -> QuarterExpireResult {
    let quarter = game.time().quarter();
    let seconds_before = game.time().seconds_remaining();
    game.time_mut().elapse(elapsed_seconds);
    let seconds_after = game.time().seconds_remaining();
    let quarter_expired = game.time().quarter_expired();
    if quarter_expired && !quarter.is_half_ending() {
        game.time_mut().advance_quarter();
    }
    QuarterExpireResult {
        quarter,
        seconds_before,
        seconds_after,
        quarter_expired,
    }
}

/// Consult the two-minute-warning provider after the clock mutation; if it
/// fires, latch the per-quarter flag. Caller is responsible for stopping
/// the clock on the current play when this returns `true`.
pub fn two_minute_warning_check(
    game: &mut Game,
    provider: &dyn TwoMinuteWarningProvider,
    result: &QuarterExpireResult,
) -> bool {
    let already_called = game.two_minute_warning_called();
    let fires = provider.should_call(result.quarter, result.seconds_before, result.seconds_after, already_called);
    if fires {
        game.set_two_minute_warning_called(true);
    }
    fires
}

/// At the end of the second quarter, consult the end-of-half provider: a
/// defensive accepted foul on the final snap grants one untimed down
/// instead of letting the half end outright (spec §4.11 "Half-expire").
/// Returns `true` if an untimed down should be granted before halftime.
pub fn half_expire_check(
    result: &QuarterExpireResult,
    play: &Play,
    provider: &dyn EndOfHalfProvider,
) -> bool {
    if !matches!(result.quarter, Quarter::Second) || !result.quarter_expired {
        return false;
    }
    let defense = play.common().possession_at_snap.opponent();
    let defensive_accepted_foul = play
        .common()
        .penalties
        .iter()
        .any(|p| p.accepted && p.team == defense);
    defensive_accepted_foul && !provider.allows_half_to_end_on_defensive_penalty()
}

/// What should happen next once the fourth quarter's clock reaches zero
/// (spec §4.11 "Game-expire").
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum GameExpireOutcome {
    Continue,
    PostGame,
    OvertimeCoinToss,
}

/// At Q4 with no time left, check whether the game is tied; if so,
/// regulation routes to a fresh overtime coin toss.
pub fn game_expire_check(game: &Game, result: &QuarterExpireResult) -> GameExpireOutcome {
    if !matches!(result.quarter, Quarter::Fourth) || !result.quarter_expired {
        return GameExpireOutcome::Continue;
    }
    if game.score_tied() {
        GameExpireOutcome::OvertimeCoinToss
    } else {
        GameExpireOutcome::PostGame
    }
}

/// Consult the overtime provider on whether the just-finished overtime
/// possession ends the game, feeding the same decision into
/// [`OvertimeState`] bookkeeping the flow state machine drives.
pub fn overtime_score_check(
    state: &mut OvertimeState,
    provider: &dyn OvertimeProvider,
    scoring_team: Possession,
    result: ScoreResult,
) -> bool {
    let ends = provider.should_game_end(state, result, scoring_team);
    state.complete_possession(scoring_team);
    ends
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::play::{PlayCommon, PlayerId, RunDirection, RunPlay};
    use crate::game::rules::{end_of_half, two_minute_warning};
    use crate::game::Down;

    fn touchdown_run() -> Play {
        let mut common = PlayCommon::new(0, Down::First, Possession::Home, vec![], vec![]);
        common.touchdown = true;
        Play::Run(RunPlay {
            common,
            carrier: PlayerId { team: Possession::Home, index: 0 },
            direction: RunDirection::Middle,
            tackle_break: false,
            breakaway: false,
        })
    }

    #[test]
    fn score_check_credits_touchdown_to_snap_team() {
        let mut game = Game::new();
        score_check(&mut game, &touchdown_run());
        assert_eq!(game.home_score(), 6);
    }

    #[test]
    fn quarter_expire_advances_first_quarter_not_second() {
        let mut game = Game::new();
        let result = quarter_expire_check(&mut game, 900);
        assert!(result.quarter_expired);
        assert_eq!(game.time().quarter(), crate::game::clock::Quarter::Second);
    }

    #[test]
    fn two_minute_warning_fires_once_per_quarter() {
        let mut game = Game::new();
        game.time_mut().advance_quarter();
        game.time_mut().advance_quarter();
        game.time_mut().advance_quarter();
        game.time_mut().elapse(779);
        let result = quarter_expire_check(&mut game, 2);
        let provider = two_minute_warning::lookup("nfl");
        assert!(two_minute_warning_check(&mut game, provider, &result));
        assert!(game.two_minute_warning_called());
    }

    #[test]
    fn half_expire_grants_untimed_down_on_defensive_foul() {
        use crate::game::play::penalty::{Penalty, PenaltyKind, PenaltyPhase};
        let mut game = Game::new();
        game.time_mut().advance_quarter();
        let result = quarter_expire_check(&mut game, 900);
        let mut play = touchdown_run();
        play.common_mut().penalties.push(Penalty {
            kind: PenaltyKind::DefensiveHolding,
            team: Possession::Away,
            player: None,
            phase: PenaltyPhase::During,
            yards: 10,
            accepted: true,
        });
        let provider = end_of_half::lookup("nfl");
        assert!(half_expire_check(&result, &play, provider));
    }
}
