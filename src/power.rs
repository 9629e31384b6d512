//! Power / line calculators (spec §4.4).
//!
//! Aggregate offensive/defensive power from a lineup of players on the
//! field. Every calculator is a weighted average over an eligible position
//! set, defaulting to league-average (50) if that set is empty on the
//! lineup passed in (spec §3 invariant 4).

use crate::attributes::modifier::attribute_modifier;
use crate::attributes::{Player, Position};

const DEFAULT_POWER: f64 = 50.0;

fn mean_over<F>(lineup: &[&Player], eligible: &[Position], value_of: F) -> f64
where
    F: Fn(&Player) -> f64,
{
    let mut total = 0.0;
    let mut count = 0u32;
    for player in lineup {
        if eligible.contains(&player.position()) {
            total += value_of(player);
            count += 1;
        }
    }
    if count == 0 {
        DEFAULT_POWER
    } else {
        total / count as f64
    }
}

const PASS_BLOCK_ELIGIBLE: [Position; 6] = [
    Position::C,
    Position::G,
    Position::T,
    Position::Te,
    Position::Rb,
    Position::Fb,
];
const RUN_BLOCK_ELIGIBLE: [Position; 5] =
    [Position::C, Position::G, Position::T, Position::Te, Position::Fb];
const PASS_RUSH_ELIGIBLE: [Position; 4] = [Position::Dt, Position::De, Position::Lb, Position::Olb];
const COVERAGE_ELIGIBLE: [Position; 4] = [Position::Cb, Position::S, Position::Fs, Position::Lb];

/// Mean blocking skill over `{C, G, T, TE, RB, FB}`.
pub fn pass_blocking_power(lineup: &[&Player]) -> f64 {
    mean_over(lineup, &PASS_BLOCK_ELIGIBLE, |p| p.skill().blocking() as f64)
}

/// Mean blocking skill over `{C, G, T, TE, FB}` — excludes RB.
pub fn run_blocking_power(lineup: &[&Player]) -> f64 {
    mean_over(lineup, &RUN_BLOCK_ELIGIBLE, |p| p.skill().blocking() as f64)
}

/// Mean of `(tackling + speed + strength) / 3` over `{DT, DE, LB, OLB}`.
pub fn pass_rush_power(lineup: &[&Player]) -> f64 {
    mean_over(lineup, &PASS_RUSH_ELIGIBLE, |p| {
        (p.skill().tackling() as f64 + p.physical().speed() as f64 + p.physical().strength() as f64) / 3.0
    })
}

/// Run defense mirrors pass rush: same eligible set, same formula.
pub fn run_defense_power(lineup: &[&Player]) -> f64 {
    pass_rush_power(lineup)
}

/// Mean of `(coverage + speed + awareness) / 3` over `{CB, S, FS, LB}`.
pub fn coverage_power(lineup: &[&Player]) -> f64 {
    mean_over(lineup, &COVERAGE_ELIGIBLE, |p| {
        (p.skill().coverage() as f64 + p.physical().speed() as f64 + p.physical().awareness() as f64) / 3.0
    })
}

/// Mean physical awareness across every player in the lineup, regardless of
/// position — used where a check needs a defense's general recovery/return
/// aptitude rather than one of the position-scoped power figures above.
pub fn lineup_awareness(lineup: &[&Player]) -> f64 {
    if lineup.is_empty() {
        return DEFAULT_POWER;
    }
    let total: f64 = lineup.iter().map(|p| p.physical().awareness() as f64).sum();
    total / lineup.len() as f64
}

/// Defensive pressure factor applied to pass plays:
/// `1.0 + modifier(rush - block) + 0.15*(rush_count - 4)`, clamped to
/// `[0.0, 2.5]`.
pub fn defensive_pressure_factor(rush_power: f64, block_power: f64, rush_count: u32) -> f64 {
    let factor = 1.0
        + attribute_modifier(rush_power - block_power)
        + 0.15 * (rush_count as f64 - 4.0);
    factor.clamp(0.0, 2.5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::SkillAttributesBuilder;

    fn lineman(blocking: u32) -> Player {
        let skill = SkillAttributesBuilder::new().blocking(blocking).build().unwrap();
        Player::from_attributes(
            "Lineman",
            Position::G,
            Default::default(),
            skill,
            Default::default(),
        )
    }

    #[test]
    fn empty_lineup_defaults_to_fifty() {
        let lineup: Vec<&Player> = vec![];
        assert_eq!(pass_blocking_power(&lineup), 50.0);
    }

    #[test]
    fn averages_eligible_positions_only() {
        let a = lineman(80);
        let b = lineman(60);
        let rb = {
            let skill = SkillAttributesBuilder::new().blocking(0).build().unwrap();
            Player::from_attributes("RB", Position::Rb, Default::default(), skill, Default::default())
        };
        let lineup = vec![&a, &b, &rb];
        // run blocking excludes RB
        assert_eq!(run_blocking_power(&lineup), 70.0);
        // pass blocking includes RB
        assert!(pass_blocking_power(&lineup) < 70.0);
    }

    #[test]
    fn lineup_awareness_defaults_to_fifty_when_empty() {
        let lineup: Vec<&Player> = vec![];
        assert_eq!(lineup_awareness(&lineup), 50.0);
    }

    #[test]
    fn pressure_factor_clamped() {
        let f = defensive_pressure_factor(100.0, 0.0, 10);
        assert!(f <= 2.5);
        let f2 = defensive_pressure_factor(0.0, 100.0, 0);
        assert!(f2 >= 0.0);
    }
}
