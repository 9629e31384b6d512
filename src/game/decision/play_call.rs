//! Play-call decision (spec §4.8 "Play-call decision").

use crate::error::EngineError;
use crate::game::context::GameContext;
use crate::game::Down;
use crate::rng::RandomSource;
use crate::team::coach::Coach;

#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum PlayCall {
    Kneel,
    Spike,
    Run,
    Pass,
}

fn should_kneel(ctx: &GameContext) -> bool {
    if !matches!(ctx.quarter(), crate::game::clock::Quarter::Fourth) || ctx.score_diff() <= 0 {
        return false;
    }
    let downs_remaining = match ctx.down() {
        Down::First => 4,
        Down::Second => 3,
        Down::Third => 2,
        Down::Fourth => 1,
        Down::None => 4,
    };
    downs_remaining * 40 >= ctx.seconds_remaining()
}

fn should_spike(ctx: &GameContext, offense_timeouts: u32, clock_running: bool) -> bool {
    matches!(ctx.quarter(), crate::game::clock::Quarter::Fourth)
        && ctx.seconds_remaining() <= 120
        && ctx.score_diff() < 0
        && offense_timeouts == 0
        && clock_running
        && !matches!(ctx.down(), Down::Fourth | Down::None)
}

/// Decide a play call, given whether the clock is presently running (kneel
/// and spike only apply once the ball is live) and the coach calling plays.
pub fn decide(
    rng: &mut dyn RandomSource,
    ctx: &GameContext,
    coach: &Coach,
    clock_running: bool,
) -> Result<PlayCall, EngineError> {
    if should_kneel(ctx) {
        return Ok(PlayCall::Kneel);
    }
    if should_spike(ctx, ctx.offense_timeouts(), clock_running) {
        return Ok(PlayCall::Spike);
    }

    let run_pass_lean = (coach.run_pass() as f64 - 50.0) / 200.0;
    let run_prob = (0.50 + run_pass_lean).clamp(0.20, 0.80);
    if rng.chance("play_call_run_vs_pass", run_prob)? {
        Ok(PlayCall::Run)
    } else {
        Ok(PlayCall::Pass)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Game, Possession};
    use crate::rng::SeededSource;

    #[test]
    fn leading_team_late_kneels() {
        let mut game = Game::new();
        game.add_score(Possession::Home, 7);
        game.time_mut().advance_quarter();
        game.time_mut().advance_quarter();
        game.time_mut().advance_quarter();
        game.time_mut().elapse(865);
        let ctx = GameContext::from_game(&game, Possession::Home);
        let coach = Coach::new();
        let mut rng = SeededSource::new(1);
        assert_eq!(decide(&mut rng, &ctx, &coach, true).unwrap(), PlayCall::Kneel);
    }

    #[test]
    fn default_coach_is_roughly_balanced() {
        let game = Game::new();
        let ctx = GameContext::from_game(&game, Possession::Home);
        let coach = Coach::new();
        let mut runs = 0;
        for seed in 0..40u64 {
            let mut rng = SeededSource::new(seed);
            if decide(&mut rng, &ctx, &coach, false).unwrap() == PlayCall::Run {
                runs += 1;
            }
        }
        assert!((10..30).contains(&runs));
    }
}
