//! Situational snapshot consumed by the decision engines (spec §4.8's
//! "Context → Decision → Mechanic" design note). Unlike the teacher's
//! `GameContext`/`PlayContext`, this is not threaded through an immutable
//! `next_context` transform — it is computed on demand from a `&Game` that
//! owns its state across the whole run.

use crate::game::clock::Quarter;
use crate::game::{Down, Game, Possession};

/// A read-only snapshot of `Game` from the offense's point of view, built
/// fresh before every decision-engine call.
#[derive(Clone, Copy, Debug)]
pub struct GameContext {
    quarter: Quarter,
    seconds_remaining: u32,
    down: Down,
    distance: u32,
    yards_to_touchdown: u32,
    score_diff: i32,
    offense_timeouts: u32,
    defense_timeouts: u32,
    offense: Possession,
}

impl GameContext {
    /// Snapshot `game` from `offense`'s perspective.
    pub fn from_game(game: &Game, offense: Possession) -> GameContext {
        let defense = offense.opponent();
        let (off_score, def_score) = match offense {
            Possession::Home => (game.home_score(), game.away_score()),
            Possession::Away => (game.away_score(), game.home_score()),
            Possession::None => (0, 0),
        };
        GameContext {
            quarter: game.time().quarter(),
            seconds_remaining: game.time().seconds_remaining(),
            down: game.down(),
            distance: game.yards_to_go(),
            yards_to_touchdown: game.yards_to_touchdown(offense),
            score_diff: off_score as i32 - def_score as i32,
            offense_timeouts: game.timeouts(offense),
            defense_timeouts: game.timeouts(defense),
            offense,
        }
    }

    pub fn quarter(&self) -> Quarter {
        self.quarter
    }

    pub fn seconds_remaining(&self) -> u32 {
        self.seconds_remaining
    }

    pub fn down(&self) -> Down {
        self.down
    }

    pub fn distance(&self) -> u32 {
        self.distance
    }

    pub fn yards_to_touchdown(&self) -> u32 {
        self.yards_to_touchdown
    }

    pub fn score_diff(&self) -> i32 {
        self.score_diff
    }

    pub fn offense_timeouts(&self) -> u32 {
        self.offense_timeouts
    }

    pub fn defense_timeouts(&self) -> u32 {
        self.defense_timeouts
    }

    pub fn offense(&self) -> Possession {
        self.offense
    }

    /// Whether the offense, leading, should be running clock rather than
    /// throwing downfield.
    pub fn drain_clock(&self) -> bool {
        if self.score_diff <= 0 {
            return false;
        }
        let scores_up_by = self.score_diff as f64 / 8.0;
        let drain_threshold = (scores_up_by * 4.0 * 60.0) as u32;
        matches!(self.quarter, Quarter::Fourth) && self.seconds_remaining < drain_threshold
    }

    /// Whether the trailing offense should speed up its play calls.
    pub fn up_tempo(&self) -> bool {
        matches!(self.quarter, Quarter::Fourth)
            && self.seconds_remaining <= 180
            && self.score_diff < 0
            && self.score_diff >= -17
    }

    /// Whether this is a pressure third down late in a close half.
    pub fn critical_down(&self) -> bool {
        matches!(self.down, Down::Third) && self.seconds_remaining <= 180 && self.score_diff.abs() < 9
    }

    /// Whether the leading offense should run out the clock.
    pub fn offense_conserve_clock(&self) -> bool {
        matches!(self.quarter, Quarter::Fourth)
            && self.seconds_remaining <= 180
            && self.score_diff < 0
            && self.score_diff > -18
    }

    /// Whether the trailing defense should conserve its own clock resources.
    pub fn defense_conserve_clock(&self) -> bool {
        matches!(self.quarter, Quarter::Fourth)
            && self.seconds_remaining <= 180
            && self.score_diff > 0
            && self.score_diff < 18
    }

    pub fn last_play(&self) -> bool {
        matches!(self.quarter, Quarter::Fourth) && self.seconds_remaining < 6
    }

    pub fn last_play_need_td(&self) -> bool {
        self.score_diff < -3
    }

    /// Whether the offense can kneel out the clock without the defense's
    /// timeouts mattering.
    pub fn can_kneel(&self) -> bool {
        let downs_remaining = 4_i64 - down_number(self.down) as i64;
        let runoff = 42 * 0.max(downs_remaining - self.defense_timeouts as i64);
        runoff as u32 >= self.seconds_remaining
    }

    /// Whether the offense is desperate enough that it must score on this
    /// drive to stay in the game.
    pub fn must_score(&self) -> bool {
        if self.score_diff >= 0 {
            return false;
        }
        let timeout_drive_time = 42 * (3 - self.offense_timeouts) + 8;
        if self.seconds_remaining <= timeout_drive_time {
            return true;
        }
        let non_timeout_drive_time = 42 * 3 + 8;
        let remaining = self.seconds_remaining.saturating_sub(timeout_drive_time);
        let non_timeout_drives = (remaining as f64 / non_timeout_drive_time as f64).ceil() as u32;
        let scores_needed = (self.score_diff as f64 / 8.0).round().unsigned_abs() as u32;
        1 + non_timeout_drives <= scores_needed
    }

    /// Whether field position and down/distance favor going for it on 4th.
    pub fn can_go_for_it(&self) -> bool {
        let field_position = 100 - self.yards_to_touchdown;
        self.distance <= 4 && (field_position >= 80 || (40..=60).contains(&field_position))
    }

    pub fn in_field_goal_range(&self) -> bool {
        self.yards_to_touchdown <= 35
    }
}

fn down_number(down: Down) -> u32 {
    match down {
        Down::First => 1,
        Down::Second => 2,
        Down::Third => 3,
        Down::Fourth => 4,
        Down::None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_context_is_not_must_score() {
        let game = Game::new();
        let ctx = GameContext::from_game(&game, Possession::Home);
        assert!(!ctx.must_score());
        assert_eq!(ctx.score_diff(), 0);
    }

    #[test]
    fn trailing_team_late_drains_tempo_flags() {
        let mut game = Game::new();
        game.add_score(Possession::Away, 14);
        game.time_mut().advance_quarter();
        game.time_mut().advance_quarter();
        game.time_mut().advance_quarter();
        game.time_mut().elapse(720);
        let ctx = GameContext::from_game(&game, Possession::Home);
        assert!(ctx.up_tempo());
        assert!(ctx.must_score() || ctx.score_diff() == -14);
    }

    #[test]
    fn field_goal_range_follows_yards_to_touchdown() {
        let mut game = Game::new();
        game.set_field_position(70).unwrap();
        let ctx = GameContext::from_game(&game, Possession::Home);
        assert!(ctx.in_field_goal_range());
    }
}
