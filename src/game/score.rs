//! Scoring outcomes and the score mutators that apply them to a [`Game`]
//! (spec §4.11 "Event checks": the scoring half of each event check).

use crate::game::{Game, Possession};

/// The ways a team can put points on the board (spec §3 "Score").
#[derive(PartialEq, Eq, Clone, Copy, Ord, PartialOrd, Debug, Default, Hash)]
pub enum ScoreResult {
    #[default]
    None,
    ExtraPoint,
    TwoPointConversion,
    Safety,
    FieldGoal,
    Touchdown,
}

impl ScoreResult {
    pub fn points(self) -> u32 {
        match self {
            ScoreResult::None => 0,
            ScoreResult::ExtraPoint => 1,
            ScoreResult::TwoPointConversion => 2,
            ScoreResult::Safety => 2,
            ScoreResult::FieldGoal => 3,
            ScoreResult::Touchdown => 6,
        }
    }
}

/// Apply `result` for `scoring_team` to `game`, crediting points and logging
/// the event. A no-op for `ScoreResult::None`.
pub fn apply_score(game: &mut Game, scoring_team: Possession, result: ScoreResult) {
    if result == ScoreResult::None || scoring_team == Possession::None {
        return;
    }
    log::info!("{:?} scores via {:?}", scoring_team, result);
    game.add_score(scoring_team, result.points());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_table_matches_rulebook() {
        assert_eq!(ScoreResult::Touchdown.points(), 6);
        assert_eq!(ScoreResult::Safety.points(), 2);
        assert_eq!(ScoreResult::FieldGoal.points(), 3);
        assert_eq!(ScoreResult::ExtraPoint.points(), 1);
        assert_eq!(ScoreResult::TwoPointConversion.points(), 2);
        assert_eq!(ScoreResult::None.points(), 0);
    }

    #[test]
    fn apply_score_credits_the_scoring_team() {
        let mut game = Game::new();
        apply_score(&mut game, Possession::Away, ScoreResult::Touchdown);
        assert_eq!(game.away_score(), 6);
        assert_eq!(game.home_score(), 0);
    }

    #[test]
    fn none_result_is_a_no_op() {
        let mut game = Game::new();
        apply_score(&mut game, Possession::Home, ScoreResult::None);
        assert_eq!(game.home_score(), 0);
    }
}
