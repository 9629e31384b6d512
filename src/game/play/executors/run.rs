//! Run play executor (spec §4.6 "Run play").

use crate::attributes::modifier::attribute_modifier;
use crate::error::EngineError;
use crate::game::play::checks::{occurrence, yardage};
use crate::game::play::penalty::{Penalty, PenaltyKind, PenaltyPhase};
use crate::game::play::{FumbleRecord, InjuryRecord, PlayCommon, PlayerId, RunDirection, RunPlay};
use crate::game::{Down, Possession};
use crate::rng::RandomSource;

/// Attribute inputs the run executor needs, already reduced to the power
/// figures [`crate::power`] computes over the on-field lineups.
pub struct RunInputs {
    pub carrier: PlayerId,
    pub carrier_rushing: f64,
    pub carrier_speed: f64,
    pub carrier_awareness: f64,
    pub run_block_power: f64,
    pub run_defense_power: f64,
    pub defense_awareness: f64,
    pub tacklers: Vec<(PlayerId, f64)>,
    pub down: Down,
    pub possession: Possession,
    pub field_position: u32,
    pub offensive_players: Vec<PlayerId>,
    pub defensive_players: Vec<PlayerId>,
}

/// Run the ordered run-play check sequence and assemble a [`RunPlay`].
pub fn execute(rng: &mut dyn RandomSource, inputs: RunInputs) -> Result<RunPlay, EngineError> {
    let mut common = PlayCommon::new(
        inputs.field_position,
        inputs.down,
        inputs.possession,
        inputs.offensive_players,
        inputs.defensive_players,
    );

    // (1) QB-scramble gate — consumed for replay parity even though the
    // engine does not yet branch run mechanics on a scramble.
    let _scramble = occurrence::qb_scramble(rng)?;

    // (2) direction, enumerated over 5 buckets.
    let direction = RunDirection::from_index(rng.integer("run_direction", 0, 5)?);

    // (3) blocking-success check.
    let blocking_success = occurrence::pass_protection(rng, inputs.run_block_power, inputs.run_defense_power)?;

    // (4) blocking-penalty check.
    let blocking_penalty = occurrence::pre_snap_penalty(
        rng,
        PenaltyKind::OffensiveHolding.base_probability(),
        50.0,
    )?;
    if blocking_penalty {
        common.penalties.push(Penalty {
            kind: PenaltyKind::OffensiveHolding,
            team: inputs.possession,
            player: None,
            phase: PenaltyPhase::During,
            yards: PenaltyKind::OffensiveHolding.yards(),
            accepted: false,
        });
    }

    // (5) base run yards.
    let skill_mod = attribute_modifier(inputs.carrier_rushing - inputs.run_defense_power)
        + if blocking_success { 0.05 } else { -0.05 };
    let mut yards = yardage::run_base_yards(rng, skill_mod)?;

    // (6) tackle-break check, then tackle-break yards if true.
    let best_tackler = inputs
        .tacklers
        .iter()
        .cloned()
        .fold((None, 0.0_f64), |acc, (id, skill)| if skill > acc.1 { (Some(id), skill) } else { acc });
    let best_tackler_skill = best_tackler.1;
    let tackle_break = occurrence::tackle_break(rng, inputs.carrier_rushing, best_tackler_skill)?;
    if tackle_break {
        yards += yardage::tackle_break_yards(rng)?;
    }

    // (7) breakaway check, then breakaway yards if true.
    let breakaway = occurrence::breakaway(rng, inputs.carrier_speed)?;
    if breakaway {
        yards += yardage::breakaway_yards(rng)?;
    }

    // (8) tackle-penalty check.
    let tackle_penalty = occurrence::pre_snap_penalty(
        rng,
        PenaltyKind::FaceMaskDefense.base_probability(),
        50.0,
    )?;
    if tackle_penalty {
        common.penalties.push(Penalty {
            kind: PenaltyKind::FaceMaskDefense,
            team: inputs.possession.opponent(),
            player: None,
            phase: PenaltyPhase::After,
            yards: PenaltyKind::FaceMaskDefense.yards(),
            accepted: false,
        });
    }

    // (9) injury checks for the carrier, then up to two tacklers, each
    // preceded by a skip-gate draw (spec §9 open question: preserved for
    // replay-log compatibility).
    let carrier_contact = if tackle_break { 1.3 } else { 1.0 };
    if occurrence::injury(rng, 0.004, inputs.carrier_awareness, carrier_contact)? {
        common.injuries.push(InjuryRecord {
            player: inputs.carrier,
            severe: rng.chance("injury_severity", 0.15)?,
        });
    }
    for (tackler, tackler_skill) in inputs.tacklers.iter().take(2) {
        let skip = rng.chance("tackler_injury_skip_gate", 0.85)?;
        if skip {
            continue;
        }
        if occurrence::injury(rng, 0.003, *tackler_skill, 1.0)? {
            common.injuries.push(InjuryRecord {
                player: *tackler,
                severe: rng.chance("injury_severity", 0.15)?,
            });
        }
    }

    // (10) fumble check.
    let gang_tackled = inputs.tacklers.len() >= 2;
    let fumble = occurrence::fumble_normal(rng, inputs.carrier_awareness, 50.0, gang_tackled)?;
    if fumble {
        let (bounce, bounce_yards) = yardage::fumble_bounce(rng)?;
        let (offense_recovers, fumble_out_of_bounds) =
            yardage::fumble_recovery(rng, bounce, inputs.carrier_awareness, inputs.defense_awareness)?;
        if offense_recovers {
            common.fumbles.push(FumbleRecord {
                carrier: inputs.carrier,
                recovered_by: None,
                recovery_team: inputs.possession,
                out_of_bounds: fumble_out_of_bounds,
                return_yards: bounce_yards,
            });
        } else {
            let recoverer = best_tackler.0.or_else(|| common.defensive_players.first().copied());
            let return_yards = bounce_yards + yardage::fumble_return_yards(rng, best_tackler_skill)?;
            common.fumbles.push(FumbleRecord {
                carrier: inputs.carrier,
                recovered_by: recoverer,
                recovery_team: inputs.possession.opponent(),
                out_of_bounds: fumble_out_of_bounds,
                return_yards,
            });
            common.possession_changed = true;
        }
    }

    // (11) out-of-bounds check.
    let out_of_bounds = rng.chance("run_out_of_bounds", 0.08)?;

    // (12) elapsed-time draw.
    let elapsed = rng.integer("run_elapsed_time", 4, 8)? as u32;
    common.elapsed_seconds = elapsed;
    common.clock_stopped = out_of_bounds;

    // (13) if clock keeps running, a runoff-time draw covers the play
    // clock between snaps.
    if !out_of_bounds {
        let runoff = rng.integer("run_runoff_time", 25, 40)? as u32;
        common.elapsed_seconds += runoff;
    }

    common.yards_gained = yards;
    common.end_field_position = match inputs.possession {
        Possession::Home => (inputs.field_position as i32 + yards).clamp(0, 100) as u32,
        _ => (inputs.field_position as i32 - yards).clamp(0, 100) as u32,
    };

    Ok(RunPlay {
        common,
        carrier: inputs.carrier,
        direction,
        tackle_break,
        breakaway,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SeededSource;

    #[test]
    fn produces_a_play_with_consistent_end_position() {
        let mut rng = SeededSource::new(42);
        let inputs = RunInputs {
            carrier: PlayerId { team: Possession::Home, index: 0 },
            carrier_rushing: 60.0,
            carrier_speed: 70.0,
            carrier_awareness: 60.0,
            run_block_power: 55.0,
            run_defense_power: 50.0,
            defense_awareness: 50.0,
            tacklers: vec![(PlayerId { team: Possession::Away, index: 1 }, 55.0)],
            down: Down::First,
            possession: Possession::Home,
            field_position: 25,
            offensive_players: vec![],
            defensive_players: vec![],
        };
        let play = execute(&mut rng, inputs).unwrap();
        assert!(play.common.end_field_position <= 100);
    }
}
