//! Fourth-down decision (spec §4.8 "Fourth-down decision").

use crate::error::EngineError;
use crate::game::context::GameContext;
use crate::rng::RandomSource;

#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum FourthDownDecision {
    GoForIt,
    FieldGoal,
    Punt,
}

/// Base go-for-it probability by distance-to-go bucket.
fn base_go_for_it_probability(distance: u32) -> f64 {
    match distance {
        1 => 0.65,
        2 => 0.35,
        3 => 0.20,
        4..=5 => 0.08,
        6..=10 => 0.03,
        _ => 0.01,
    }
}

/// Whether the situation mandates going for it regardless of distance: a
/// trailing team racing the clock, or one that has nothing left to lose.
fn mandatory_go(ctx: &GameContext) -> bool {
    let trailing = ctx.score_diff() < 0;
    if !trailing {
        return false;
    }
    let desperation = ctx.score_diff() <= -9 && ctx.seconds_remaining() < 120;
    let last_chance = ctx.seconds_remaining() < 30;
    let aggressive = ctx.yards_to_touchdown() <= 50
        && ctx.seconds_remaining() <= 300
        && ctx.distance() <= 3;
    desperation || last_chance || aggressive
}

fn chip_shot_available(ctx: &GameContext) -> bool {
    ctx.yards_to_touchdown() + 17 <= 35
}

/// Decide whether to go for it, kick a field goal, or punt on 4th down.
pub fn decide(rng: &mut dyn RandomSource, ctx: &GameContext) -> Result<FourthDownDecision, EngineError> {
    if mandatory_go(ctx) {
        return Ok(FourthDownDecision::GoForIt);
    }

    let mut go_for_it_prob = base_go_for_it_probability(ctx.distance());
    if ctx.yards_to_touchdown() <= 40 {
        go_for_it_prob += 0.05;
    }
    if ctx.score_diff() < 0 {
        go_for_it_prob += 0.04;
    }
    if ctx.up_tempo() || ctx.must_score() {
        go_for_it_prob += 0.08;
    }
    if chip_shot_available(ctx) {
        go_for_it_prob -= 0.10;
    }
    let go_for_it_prob = go_for_it_prob.clamp(0.0, 0.95);

    if rng.chance("fourth_down_go_for_it", go_for_it_prob)? {
        return Ok(FourthDownDecision::GoForIt);
    }

    let fg_distance = ctx.yards_to_touchdown() + 17;
    let decision = if fg_distance <= 35 {
        FourthDownDecision::FieldGoal
    } else if fg_distance <= 45 {
        if rng.chance("fourth_down_normal_fg", 0.80)? {
            FourthDownDecision::FieldGoal
        } else {
            FourthDownDecision::Punt
        }
    } else if fg_distance <= 55 {
        let p = if ctx.score_diff() <= -3 { 1.0 } else { 0.50 };
        if rng.chance("fourth_down_long_fg", p)? {
            FourthDownDecision::FieldGoal
        } else {
            FourthDownDecision::Punt
        }
    } else {
        FourthDownDecision::Punt
    };
    Ok(decision)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Game, Possession};
    use crate::rng::SeededSource;

    #[test]
    fn desperation_mode_forces_go_for_it() {
        let mut game = Game::new();
        game.add_score(Possession::Away, 14);
        game.time_mut().advance_quarter();
        game.time_mut().advance_quarter();
        game.time_mut().advance_quarter();
        game.time_mut().elapse(810);
        game.set_field_position(70).unwrap();
        game.set_yards_to_go(8);
        let ctx = GameContext::from_game(&game, Possession::Home);
        let mut rng = SeededSource::new(1);
        assert_eq!(decide(&mut rng, &ctx).unwrap(), FourthDownDecision::GoForIt);
    }

    #[test]
    fn chip_shot_range_prefers_field_goal() {
        let mut game = Game::new();
        game.set_field_position(82).unwrap();
        game.set_yards_to_go(8);
        let ctx = GameContext::from_game(&game, Possession::Home);
        let mut rng = SeededSource::new(4);
        let decision = decide(&mut rng, &ctx).unwrap();
        assert!(matches!(decision, FourthDownDecision::FieldGoal | FourthDownDecision::GoForIt));
    }
}
