//! Yardage/possession-result checks (spec §4.5, "Yardage results").

use crate::distributions::{self, PassType};
use crate::error::EngineError;
use crate::rng::RandomSource;

/// Air yards for a completed/intercepted pass, clamped to remaining field.
pub fn air_yards(
    rng: &mut dyn RandomSource,
    pass_type: PassType,
    skill_mod: f64,
    yards_to_goal: u32,
) -> Result<i32, EngineError> {
    let yards = distributions::pass_yards(rng, pass_type, skill_mod)?;
    Ok(yards.min(yards_to_goal as i32))
}

/// Yards after catch: `3 + (speed+agility+rushing)/30 + U(-2,6)`, with a 3%
/// chance of a 15-40 yard bonus if `receiver_speed > 85`.
pub fn yards_after_catch(
    rng: &mut dyn RandomSource,
    speed: f64,
    agility: f64,
    rushing: f64,
) -> Result<i32, EngineError> {
    let base = 3.0 + (speed + agility + rushing) / 30.0;
    let jitter = distributions::uniform_range(rng, "yac_jitter", -2.0, 6.0)?;
    let mut yards = (base + jitter).round() as i32;

    if speed > 85.0 {
        let bonus_roll = rng.uniform("yac_bonus_roll")?;
        if bonus_roll < 0.03 {
            let bonus = distributions::uniform_range(rng, "yac_bonus", 15.0, 40.0)?;
            yards += bonus.round() as i32;
        }
    }
    Ok(yards)
}

/// Run base yards — delegates to [`distributions::run_yards`].
pub fn run_base_yards(rng: &mut dyn RandomSource, skill_mod: f64) -> Result<i32, EngineError> {
    distributions::run_yards(rng, skill_mod)
}

/// Tackle-break bonus yards: `U{3..8}` inclusive.
pub fn tackle_break_yards(rng: &mut dyn RandomSource) -> Result<i32, EngineError> {
    Ok(rng.integer("tackle_break_yards", 3, 9)? as i32)
}

/// Breakaway bonus yards: `U{15..44}` inclusive.
pub fn breakaway_yards(rng: &mut dyn RandomSource) -> Result<i32, EngineError> {
    Ok(rng.integer("breakaway_yards", 15, 45)? as i32)
}

/// Sack yardage loss, clamped so the ball never crosses the possessor's own
/// goal line.
pub fn sack_yards(rng: &mut dyn RandomSource, field_position_from_own_goal: u32) -> Result<i32, EngineError> {
    let drawn = distributions::sack_yards(rng)?;
    Ok(drawn.max(-(field_position_from_own_goal as i32)))
}

/// Kickoff distance: `40 + 30*kicking/100 + U(-10,10)`, clamped `[30, 80]`.
pub fn kickoff_distance(rng: &mut dyn RandomSource, kicking: f64) -> Result<i32, EngineError> {
    let jitter = distributions::uniform_range(rng, "kickoff_distance", -10.0, 10.0)?;
    let yards = 40.0 + 30.0 * kicking / 100.0 + jitter;
    Ok((yards.round() as i32).clamp(30, 80))
}

/// Kickoff return yards: `10 + 20*(speed+agility)/200 + U(-60,60)`, clamped
/// `[-5, 85]`.
pub fn kickoff_return_yards(rng: &mut dyn RandomSource, speed: f64, agility: f64) -> Result<i32, EngineError> {
    let jitter = distributions::uniform_range(rng, "kickoff_return_yards", -60.0, 60.0)?;
    let yards = 10.0 + 20.0 * (speed + agility) / 200.0 + jitter;
    Ok((yards.round() as i32).clamp(-5, 85))
}

/// Punt distance: `30 + 25*kicking/100 + U(-10,15)`, floored at 10 and
/// capped at `110 - field_position`.
pub fn punt_distance(rng: &mut dyn RandomSource, kicking: f64, field_position: u32) -> Result<i32, EngineError> {
    let jitter = distributions::uniform_range(rng, "punt_distance", -10.0, 15.0)?;
    let yards = 30.0 + 25.0 * kicking / 100.0 + jitter;
    let ceiling = 110_i32 - field_position as i32;
    Ok((yards.round() as i32).max(10).min(ceiling))
}

/// Punt hang time (s): `0.08*distance + U(-0.5,0.5)`, floored at 2.0.
pub fn punt_hang_time(rng: &mut dyn RandomSource, distance: i32) -> Result<f64, EngineError> {
    let jitter = distributions::uniform_range(rng, "punt_hang_time", -0.5, 0.5)?;
    let seconds = 0.08 * distance as f64 + jitter;
    Ok(seconds.max(2.0))
}

/// Punt return yards: `5 + (returner_skill-coverage)/10 + U(-5,15)`,
/// floored at -3.
pub fn punt_return_yards(rng: &mut dyn RandomSource, returner_skill: f64, coverage: f64) -> Result<i32, EngineError> {
    let jitter = distributions::uniform_range(rng, "punt_return_yards", -5.0, 15.0)?;
    let yards = 5.0 + (returner_skill - coverage) / 10.0 + jitter;
    Ok((yards.round() as i32).max(-3))
}

/// Which direction a loose ball bounces.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum FumbleBounce {
    Backward,
    Forward,
    Sideways,
}

/// Draw the bounce direction (0.4/0.4/0.2) and its yardage from the spot of
/// the fumble.
pub fn fumble_bounce(rng: &mut dyn RandomSource) -> Result<(FumbleBounce, i32), EngineError> {
    let roll = rng.uniform("fumble_bounce_direction")?;
    if roll < 0.4 {
        let yards = rng.integer("fumble_bounce_backward", -8, 1)? as i32;
        Ok((FumbleBounce::Backward, yards))
    } else if roll < 0.8 {
        let yards = rng.integer("fumble_bounce_forward", 0, 9)? as i32;
        Ok((FumbleBounce::Forward, yards))
    } else {
        let yards = rng.integer("fumble_bounce_sideways", -2, 3)? as i32;
        Ok((FumbleBounce::Sideways, yards))
    }
}

/// Whether the offense (fumbling team) recovers its own fumble: baseline
/// 0.35/0.35/0.50 by bounce direction, shifted by
/// `0.30*(offense_awareness - defense_awareness)/100`, clamped
/// `[0.10, 0.85]`. A 5% chance the ball goes out of bounds first, retained
/// by the fumbler's team, short-circuiting the recovery roll.
pub fn fumble_recovery(
    rng: &mut dyn RandomSource,
    bounce: FumbleBounce,
    offense_awareness: f64,
    defense_awareness: f64,
) -> Result<(bool, bool), EngineError> {
    let out_of_bounds_roll = rng.uniform("fumble_out_of_bounds")?;
    if out_of_bounds_roll < 0.05 {
        return Ok((true, true));
    }

    let baseline = match bounce {
        FumbleBounce::Backward => 0.35,
        FumbleBounce::Forward => 0.35,
        FumbleBounce::Sideways => 0.50,
    };
    let p = (baseline + 0.30 * (offense_awareness - defense_awareness) / 100.0).clamp(0.10, 0.85);
    let offense_recovers = rng.chance("fumble_recovery", p)?;
    Ok((offense_recovers, false))
}

/// Return yards for a defensive fumble recovery: `returner_skill`-based
/// base of 5-20 plus `U(-30,50)`.
pub fn fumble_return_yards(rng: &mut dyn RandomSource, returner_skill: f64) -> Result<i32, EngineError> {
    let base = 5.0 + 15.0 * returner_skill / 100.0;
    let jitter = distributions::uniform_range(rng, "fumble_return_yards", -30.0, 50.0)?;
    Ok((base + jitter).round() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SeededSource;

    #[test]
    fn tackle_break_yards_in_range() {
        let mut rng = SeededSource::new(3);
        for _ in 0..500 {
            let y = tackle_break_yards(&mut rng).unwrap();
            assert!((3..=8).contains(&y));
        }
    }

    #[test]
    fn kickoff_distance_clamped() {
        let mut rng = SeededSource::new(4);
        for _ in 0..500 {
            let y = kickoff_distance(&mut rng, 50.0).unwrap();
            assert!((30..=80).contains(&y));
        }
    }

    #[test]
    fn fumble_recovery_probability_clamped_in_practice() {
        let mut rng = SeededSource::new(5);
        for _ in 0..500 {
            let (_, oob) = fumble_recovery(&mut rng, FumbleBounce::Sideways, 100.0, 0.0).unwrap();
            let _ = oob;
        }
    }

    #[test]
    fn punt_hang_time_floored() {
        let mut rng = SeededSource::new(6);
        for _ in 0..500 {
            let t = punt_hang_time(&mut rng, 5).unwrap();
            assert!(t >= 2.0);
        }
    }
}
