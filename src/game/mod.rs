//! The game: mutable state exclusively owned by a single simulation run
//! (spec §3 "Game").
//!
//! Unlike the teacher's purely-immutable `GameContext::next_context`
//! transform, `Game` is a plain struct mutated in place through `&mut`
//! methods — see DESIGN.md "Open Questions" for why.

pub mod clock;
pub mod context;
pub mod decision;
pub mod event_checks;
pub mod flow;
pub mod overtime;
pub mod play;
pub mod rules;
pub mod score;
pub mod stats;

use crate::error::EngineError;
use clock::TimeStructure;
use overtime::OvertimeState;
use play::Play;

/// Ball possession, or `None` before the opening kickoff.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum Possession {
    None,
    Home,
    Away,
}

impl Possession {
    /// The other team, or `None` if there is no possession yet.
    pub fn opponent(self) -> Possession {
        match self {
            Possession::Home => Possession::Away,
            Possession::Away => Possession::Home,
            Possession::None => Possession::None,
        }
    }
}

/// Current down, or `None` between series (kickoffs, conversions).
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum Down {
    First,
    Second,
    Third,
    Fourth,
    None,
}

impl Down {
    pub fn next(self) -> Option<Down> {
        match self {
            Down::First => Some(Down::Second),
            Down::Second => Some(Down::Third),
            Down::Third => Some(Down::Fourth),
            Down::Fourth => None,
            Down::None => None,
        }
    }
}

/// The mutable state of a single game, exclusively owned by the simulation
/// run driving it (spec §3 "Game", invariants 1-5).
#[derive(Clone, Debug)]
pub struct Game {
    field_position: u32,
    yards_to_go: u32,
    down: Down,
    home_score: u32,
    away_score: u32,
    possession: Possession,
    home_timeouts: u32,
    away_timeouts: u32,
    plays: Vec<Play>,
    current_play: Option<Play>,
    time: TimeStructure,
    coin_toss_winner: Possession,
    coin_toss_deferred: bool,
    overtime: Option<OvertimeState>,
    two_minute_warning_called: [bool; 4],
}

impl Game {
    pub fn new() -> Game {
        Game {
            field_position: 25,
            yards_to_go: 10,
            down: Down::None,
            home_score: 0,
            away_score: 0,
            possession: Possession::None,
            home_timeouts: 3,
            away_timeouts: 3,
            plays: Vec::new(),
            current_play: None,
            time: TimeStructure::new(),
            coin_toss_winner: Possession::None,
            coin_toss_deferred: false,
            overtime: None,
            two_minute_warning_called: [false; 4],
        }
    }

    pub fn field_position(&self) -> u32 {
        self.field_position
    }

    /// Set absolute field position, enforcing spec invariant 1.
    pub fn set_field_position(&mut self, value: u32) -> Result<(), EngineError> {
        if value > 100 {
            return Err(EngineError::InvariantViolation {
                detail: format!("field position {value} outside [0, 100]"),
            });
        }
        log::trace!("field position {} -> {}", self.field_position, value);
        self.field_position = value;
        Ok(())
    }

    pub fn yards_to_go(&self) -> u32 {
        self.yards_to_go
    }

    pub fn set_yards_to_go(&mut self, value: u32) {
        self.yards_to_go = value.min(99);
    }

    pub fn down(&self) -> Down {
        self.down
    }

    pub fn set_down(&mut self, down: Down) {
        self.down = down;
    }

    pub fn home_score(&self) -> u32 {
        self.home_score
    }

    pub fn away_score(&self) -> u32 {
        self.away_score
    }

    /// Add points for `team`. Scores are never decreased.
    pub fn add_score(&mut self, team: Possession, points: u32) {
        match team {
            Possession::Home => {
                self.home_score += points;
                log::info!("home scores {points}, now {}-{}", self.home_score, self.away_score);
            }
            Possession::Away => {
                self.away_score += points;
                log::info!("away scores {points}, now {}-{}", self.home_score, self.away_score);
            }
            Possession::None => {}
        }
        if let Some(ot) = self.overtime.as_mut() {
            ot.record_score(team, points);
        }
    }

    pub fn score_tied(&self) -> bool {
        self.home_score == self.away_score
    }

    pub fn possession(&self) -> Possession {
        self.possession
    }

    pub fn set_possession(&mut self, possession: Possession) {
        self.possession = possession;
        if let Some(ot) = self.overtime.as_mut() {
            ot.set_current_possession(possession);
        }
    }

    pub fn timeouts(&self, team: Possession) -> u32 {
        match team {
            Possession::Home => self.home_timeouts,
            Possession::Away => self.away_timeouts,
            Possession::None => 0,
        }
    }

    /// Spend a timeout for `team`. Returns `false` (decision ambiguity, not
    /// an error) if none remain.
    pub fn use_timeout(&mut self, team: Possession) -> bool {
        match team {
            Possession::Home if self.home_timeouts > 0 => {
                self.home_timeouts -= 1;
                true
            }
            Possession::Away if self.away_timeouts > 0 => {
                self.away_timeouts -= 1;
                true
            }
            _ => false,
        }
    }

    /// Reset both teams' timeouts to `count` (3 at halftime, 2 entering OT).
    pub fn reset_timeouts(&mut self, count: u32) {
        self.home_timeouts = count;
        self.away_timeouts = count;
    }

    pub fn plays(&self) -> &[Play] {
        &self.plays
    }

    pub fn current_play(&self) -> Option<&Play> {
        self.current_play.as_ref()
    }

    pub fn set_current_play(&mut self, play: Option<Play>) {
        self.current_play = play;
    }

    /// Append the current play to the completed list exactly once, per spec
    /// invariant 5; the current play slot is cleared.
    pub fn finalize_current_play(&mut self) {
        if let Some(play) = self.current_play.take() {
            self.plays.push(play);
        }
    }

    pub fn time(&self) -> &TimeStructure {
        &self.time
    }

    pub fn time_mut(&mut self) -> &mut TimeStructure {
        &mut self.time
    }

    pub fn coin_toss_winner(&self) -> Possession {
        self.coin_toss_winner
    }

    pub fn coin_toss_deferred(&self) -> bool {
        self.coin_toss_deferred
    }

    pub fn set_coin_toss(&mut self, winner: Possession, deferred: bool) {
        self.coin_toss_winner = winner;
        self.coin_toss_deferred = deferred;
    }

    pub fn overtime(&self) -> Option<&OvertimeState> {
        self.overtime.as_ref()
    }

    pub fn overtime_mut(&mut self) -> Option<&mut OvertimeState> {
        self.overtime.as_mut()
    }

    pub fn start_overtime(&mut self, state: OvertimeState) {
        self.overtime = Some(state);
    }

    fn quarter_index(&self) -> usize {
        match self.time.quarter() {
            clock::Quarter::First => 0,
            clock::Quarter::Second => 1,
            clock::Quarter::Third => 2,
            clock::Quarter::Fourth => 3,
        }
    }

    pub fn two_minute_warning_called(&self) -> bool {
        self.two_minute_warning_called[self.quarter_index()]
    }

    pub fn set_two_minute_warning_called(&mut self, value: bool) {
        let idx = self.quarter_index();
        self.two_minute_warning_called[idx] = value;
    }

    /// Yards remaining to the offense's touchdown, given `possession`'s
    /// attacking direction (home attacks toward 100, away toward 0).
    pub fn yards_to_touchdown(&self, possession: Possession) -> u32 {
        match possession {
            Possession::Home => 100 - self.field_position,
            Possession::Away => self.field_position,
            Possession::None => 0,
        }
    }

    pub fn yards_to_safety(&self, possession: Possession) -> u32 {
        self.yards_to_touchdown(possession.opponent())
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_position_rejects_out_of_range() {
        let mut game = Game::new();
        assert!(game.set_field_position(101).is_err());
    }

    #[test]
    fn score_never_decreases() {
        let mut game = Game::new();
        game.add_score(Possession::Home, 7);
        game.add_score(Possession::Home, 3);
        assert_eq!(game.home_score(), 10);
    }

    #[test]
    fn finalize_current_play_appends_once() {
        let mut game = Game::new();
        game.finalize_current_play();
        assert_eq!(game.plays().len(), 0);
    }
}
