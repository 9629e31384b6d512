//! Boolean occurrence checks (spec §4.5 table).

use crate::attributes::modifier::{attribute_modifier, clamp_probability};
use crate::error::EngineError;
use crate::rng::RandomSource;

/// Pass completion: base 0.60, `+(off-cov)/250`, `-0.20` if pressured,
/// clamped to `[0.25, 0.85]`.
pub fn pass_completion(
    rng: &mut dyn RandomSource,
    offense_skill: f64,
    coverage_power: f64,
    pressured: bool,
) -> Result<bool, EngineError> {
    let mut p = 0.60 + (offense_skill - coverage_power) / 250.0;
    if pressured {
        p -= 0.20;
    }
    let p = clamp_probability(p, (0.25, 0.85));
    rng.chance("pass_completion", p)
}

/// Pass protection (no sack): base 0.75, `+modifier(block-rush)`, clamped
/// `[0.30, 0.95]`.
pub fn pass_protection(
    rng: &mut dyn RandomSource,
    block_power: f64,
    rush_power: f64,
) -> Result<bool, EngineError> {
    let p = 0.75 + attribute_modifier(block_power - rush_power);
    let p = clamp_probability(p, (0.30, 0.95));
    rng.chance("pass_protection", p)
}

/// Interception given an incomplete pass: base 0.04, `+(cov-off)/300`, plus
/// a flat pressure bump, clamped `[0.00, 0.15]`.
pub fn interception_on_incomplete(
    rng: &mut dyn RandomSource,
    coverage_power: f64,
    offense_skill: f64,
    pressured: bool,
) -> Result<bool, EngineError> {
    let mut p = 0.04 + (coverage_power - offense_skill) / 300.0;
    if pressured {
        p += 0.03;
    }
    let p = clamp_probability(p, (0.00, 0.15));
    rng.chance("interception_on_incomplete", p)
}

/// Tackle break: base 0.25, `+(carrier-tackle)/250`, clamped `[0.05, 0.50]`.
pub fn tackle_break(
    rng: &mut dyn RandomSource,
    carrier_skill: f64,
    tackle_power: f64,
) -> Result<bool, EngineError> {
    let p = 0.25 + (carrier_skill - tackle_power) / 250.0;
    let p = clamp_probability(p, (0.05, 0.50));
    rng.chance("tackle_break", p)
}

/// Big-run/breakaway: base 0.05, `+speed/500`, clamped `[0.01, 0.15]`.
pub fn breakaway(rng: &mut dyn RandomSource, carrier_speed: f64) -> Result<bool, EngineError> {
    let p = 0.05 + carrier_speed / 500.0;
    let p = clamp_probability(p, (0.01, 0.15));
    rng.chance("breakaway", p)
}

/// Fumble on a normal (non-sack) play: base 0.015, scaled by
/// `(1 - awareness/200)` and `(0.5 + defensive_pressure/200)`, times 1.3 if
/// gang-tackled, clamped `[0.003, 0.25]`.
pub fn fumble_normal(
    rng: &mut dyn RandomSource,
    carrier_awareness: f64,
    defensive_pressure: f64,
    gang_tackled: bool,
) -> Result<bool, EngineError> {
    let mut p = 0.015 * (1.0 - carrier_awareness / 200.0) * (0.5 + defensive_pressure / 200.0);
    if gang_tackled {
        p *= 1.3;
    }
    let p = clamp_probability(p, (0.003, 0.25));
    rng.chance("fumble_normal", p)
}

/// Fumble on a sack: same factors as [`fumble_normal`], different base
/// (0.12) and clamp range `[0.01, 0.35]`.
pub fn fumble_sack(
    rng: &mut dyn RandomSource,
    passer_awareness: f64,
    defensive_pressure: f64,
    gang_tackled: bool,
) -> Result<bool, EngineError> {
    let mut p = 0.12 * (1.0 - passer_awareness / 200.0) * (0.5 + defensive_pressure / 200.0);
    if gang_tackled {
        p *= 1.3;
    }
    let p = clamp_probability(p, (0.01, 0.35));
    rng.chance("fumble_sack", p)
}

/// Injury: a per-play-and-position base, scaled by
/// `(0.5 + fragility/100)` and a contact-severity multiplier, clamped
/// `[0.0, 0.05]`.
pub fn injury(
    rng: &mut dyn RandomSource,
    base: f64,
    fragility: f64,
    contact_multiplier: f64,
) -> Result<bool, EngineError> {
    let p = base * (0.5 + fragility / 100.0) * contact_multiplier;
    let p = clamp_probability(p, (0.0, 0.05));
    rng.chance("injury", p)
}

/// Field-goal make probability, piecewise in distance, nudged by the
/// kicker's `kicking` skill, clamped `[0.35, 0.99]`.
pub fn field_goal_make_probability(distance: u32, kicking: f64) -> f64 {
    let base = if distance <= 30 {
        0.97
    } else if distance <= 40 {
        0.92
    } else if distance <= 50 {
        0.80
    } else if distance <= 55 {
        0.65
    } else {
        0.45
    };
    let p = base + (kicking - 50.0) / 400.0;
    p.clamp(0.35, 0.99)
}

pub fn field_goal_make(rng: &mut dyn RandomSource, distance: u32, kicking: f64) -> Result<bool, EngineError> {
    let p = field_goal_make_probability(distance, kicking);
    rng.chance("field_goal_make", p)
}

/// Field-goal or punt block: base ≈0.015, `+(rush-block)/400`, clamped
/// `[0.002, 0.05]`.
pub fn kick_block(rng: &mut dyn RandomSource, rush_power: f64, block_power: f64) -> Result<bool, EngineError> {
    let p = 0.015 + (rush_power - block_power) / 400.0;
    let p = clamp_probability(p, (0.002, 0.05));
    rng.chance("kick_block", p)
}

/// Muffed catch on a return: base 0.03, `-catching/400`, clamped
/// `[0.005, 0.10]`.
pub fn muffed_catch(rng: &mut dyn RandomSource, returner_catching: f64) -> Result<bool, EngineError> {
    let p = 0.03 - returner_catching / 400.0;
    let p = clamp_probability(p, (0.005, 0.10));
    rng.chance("muffed_catch", p)
}

/// Whether a pre-snap penalty of a candidate kind occurs: its base
/// probability, `-discipline/300`, clamped `[0.0, 0.05]`.
pub fn pre_snap_penalty(
    rng: &mut dyn RandomSource,
    base_probability: f64,
    discipline: f64,
) -> Result<bool, EngineError> {
    let p = base_probability - discipline / 300.0;
    let p = clamp_probability(p, (0.0, 0.05));
    rng.chance("pre_snap_penalty", p)
}

/// QB-scramble gate at the top of the run executor: fixed threshold 0.10.
pub fn qb_scramble(rng: &mut dyn RandomSource) -> Result<bool, EngineError> {
    rng.chance("qb_scramble", 0.10)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SeededSource;

    #[test]
    fn pass_completion_clamped_low_by_pressure() {
        let mut rng = SeededSource::new(1);
        for _ in 0..200 {
            // sanity: doesn't panic across many draws, stays a valid bool
            let _ = pass_completion(&mut rng, 0.0, 100.0, true).unwrap();
        }
    }

    #[test]
    fn field_goal_make_probability_decreases_with_distance() {
        let short = field_goal_make_probability(25, 50.0);
        let long = field_goal_make_probability(58, 50.0);
        assert!(short > long);
    }

    #[test]
    fn fumble_normal_respects_clamp_floor() {
        // even with huge awareness and zero pressure, floor is 0.003
        let p_base = 0.015 * (1.0 - 100.0 / 200.0) * (0.5 + 0.0 / 200.0);
        assert!(p_base < 0.003);
    }
}
