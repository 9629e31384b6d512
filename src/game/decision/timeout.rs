//! Timeout decision (spec §4.8 "Timeout decision"), split into pre-play and
//! post-play calls.

use crate::error::EngineError;
use crate::game::context::GameContext;
use crate::rng::RandomSource;

#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum TimeoutDecision {
    CallTimeout,
    NoTimeout,
}

fn gate(rng: &mut dyn RandomSource, name: &str, timeouts_remaining: u32, p: f64) -> Result<TimeoutDecision, EngineError> {
    if timeouts_remaining == 0 {
        return Ok(TimeoutDecision::NoTimeout);
    }
    if rng.chance(name, p)? {
        Ok(TimeoutDecision::CallTimeout)
    } else {
        Ok(TimeoutDecision::NoTimeout)
    }
}

/// Pre-play: avoid a delay-of-game penalty when the play clock is almost
/// expired.
pub fn decide_delay_of_game(
    rng: &mut dyn RandomSource,
    offense_timeouts: u32,
    play_clock_seconds: u32,
) -> Result<TimeoutDecision, EngineError> {
    if play_clock_seconds > 3 {
        return Ok(TimeoutDecision::NoTimeout);
    }
    gate(rng, "timeout_avoid_delay_of_game", offense_timeouts, 0.95)
}

/// Pre-play: the defense tries to ice the kicker ahead of a long field goal.
pub fn decide_ice_the_kicker(
    rng: &mut dyn RandomSource,
    defense_timeouts: u32,
    upcoming_field_goal_distance: Option<u32>,
) -> Result<TimeoutDecision, EngineError> {
    match upcoming_field_goal_distance {
        Some(distance) if distance >= 45 => gate(rng, "timeout_ice_the_kicker", defense_timeouts, 0.30),
        _ => Ok(TimeoutDecision::NoTimeout),
    }
}

/// Post-play: the trailing offense stops the clock late in a half.
pub fn decide_stop_clock(
    rng: &mut dyn RandomSource,
    ctx: &GameContext,
    clock_running: bool,
) -> Result<TimeoutDecision, EngineError> {
    if !clock_running || ctx.score_diff() >= 0 || ctx.seconds_remaining() > 120 {
        return Ok(TimeoutDecision::NoTimeout);
    }
    gate(rng, "timeout_stop_clock", ctx.offense_timeouts(), 0.85)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Game, Possession};
    use crate::rng::SeededSource;

    #[test]
    fn no_timeouts_remaining_never_calls() {
        let mut rng = SeededSource::new(1);
        assert_eq!(
            decide_delay_of_game(&mut rng, 0, 1).unwrap(),
            TimeoutDecision::NoTimeout
        );
    }

    #[test]
    fn ice_the_kicker_only_on_long_attempts() {
        let mut rng = SeededSource::new(2);
        assert_eq!(
            decide_ice_the_kicker(&mut rng, 2, Some(40)).unwrap(),
            TimeoutDecision::NoTimeout
        );
    }

    #[test]
    fn trailing_late_offense_can_stop_the_clock() {
        let mut game = Game::new();
        game.add_score(Possession::Away, 3);
        game.time_mut().advance_quarter();
        game.time_mut().advance_quarter();
        game.time_mut().advance_quarter();
        game.time_mut().elapse(850);
        let ctx = GameContext::from_game(&game, Possession::Home);
        let mut calls = 0;
        for seed in 0..40u64 {
            let mut rng = SeededSource::new(seed);
            if decide_stop_clock(&mut rng, &ctx, true).unwrap() == TimeoutDecision::CallTimeout {
                calls += 1;
            }
        }
        assert!(calls > 0);
    }
}
