//! Pass play executor (spec §4.6 "Pass play").

use crate::attributes::modifier::attribute_modifier;
use crate::distributions::PassType;
use crate::error::EngineError;
use crate::game::play::checks::{occurrence, yardage};
use crate::game::play::penalty::{Penalty, PenaltyKind, PenaltyPhase};
use crate::game::play::{FumbleRecord, InjuryRecord, PassPlay, PlayCommon, PlaySegment, PlayerId};
use crate::game::{Down, Possession};
use crate::rng::RandomSource;

/// Attribute inputs the pass executor needs.
pub struct PassInputs {
    pub passer: PlayerId,
    pub passer_awareness: f64,
    pub receiver: PlayerId,
    pub receiver_speed: f64,
    pub receiver_agility: f64,
    pub receiver_rushing: f64,
    pub receiver_catching: f64,
    pub pass_block_power: f64,
    pub pass_rush_power: f64,
    pub coverage_power: f64,
    pub defense_awareness: f64,
    pub rush_count: u32,
    pub defenders: Vec<PlayerId>,
    pub down: Down,
    pub distance: u32,
    pub possession: Possession,
    pub field_position: u32,
    pub offensive_players: Vec<PlayerId>,
    pub defensive_players: Vec<PlayerId>,
}

fn select_pass_type(rng: &mut dyn RandomSource, distance: u32) -> Result<PassType, EngineError> {
    let roll = rng.uniform("pass_type")?;
    let (screen, short, medium) = if distance >= 8 {
        (0.10, 0.25, 0.40)
    } else {
        (0.20, 0.45, 0.25)
    };
    if roll < screen {
        Ok(PassType::Screen)
    } else if roll < screen + short {
        Ok(PassType::Short)
    } else if roll < screen + short + medium {
        Ok(PassType::Medium)
    } else {
        Ok(PassType::Deep)
    }
}

/// Run the ordered pass-play check sequence and assemble a [`PassPlay`].
pub fn execute(rng: &mut dyn RandomSource, inputs: PassInputs) -> Result<PassPlay, EngineError> {
    let mut common = PlayCommon::new(
        inputs.field_position,
        inputs.down,
        inputs.possession,
        inputs.offensive_players,
        inputs.defensive_players,
    );

    let mut segments: Vec<PlaySegment> = Vec::new();

    // (1) pre-snap penalty check.
    let pre_snap_penalty = occurrence::pre_snap_penalty(
        rng,
        PenaltyKind::FalseStart.base_probability(),
        50.0,
    )?;
    if pre_snap_penalty {
        common.penalties.push(Penalty {
            kind: PenaltyKind::FalseStart,
            team: inputs.possession,
            player: None,
            phase: PenaltyPhase::Before,
            yards: PenaltyKind::FalseStart.yards(),
            accepted: false,
        });
        return Ok(PassPlay {
            common,
            passer: inputs.passer,
            segments,
            sacked: false,
            interceptor: None,
        });
    }

    let defensive_pressure = crate::power::defensive_pressure_factor(
        inputs.pass_rush_power,
        inputs.pass_block_power,
        inputs.rush_count,
    );

    // (2) protection check.
    let protected = occurrence::pass_protection(rng, inputs.pass_block_power, inputs.pass_rush_power)?;
    if !protected {
        let sack_yards = yardage::sack_yards(rng, inputs.field_position)?;
        let fumble = occurrence::fumble_sack(rng, inputs.passer_awareness, defensive_pressure * 50.0, false)?;
        if fumble {
            let (bounce, bounce_yards) = yardage::fumble_bounce(rng)?;
            let (offense_recovers, out_of_bounds) =
                yardage::fumble_recovery(rng, bounce, inputs.passer_awareness, inputs.defense_awareness)?;
            if offense_recovers {
                common.fumbles.push(FumbleRecord {
                    carrier: inputs.passer,
                    recovered_by: None,
                    recovery_team: inputs.possession,
                    out_of_bounds,
                    return_yards: bounce_yards,
                });
            } else {
                let recoverer = inputs.defenders.first().copied();
                let return_yards = bounce_yards + yardage::fumble_return_yards(rng, inputs.coverage_power)?;
                common.fumbles.push(FumbleRecord {
                    carrier: inputs.passer,
                    recovered_by: recoverer,
                    recovery_team: inputs.possession.opponent(),
                    out_of_bounds,
                    return_yards,
                });
                common.possession_changed = true;
                if let Some(recoverer) = recoverer {
                    segments.push(PlaySegment::Return {
                        returner: recoverer,
                        yards: return_yards,
                        fumble: true,
                        recoverer: Some(recoverer),
                        out_of_bounds,
                    });
                }
            }
        }
        if occurrence::injury(rng, 0.006, inputs.passer_awareness, 1.2)? {
            common.injuries.push(InjuryRecord {
                player: inputs.passer,
                severe: rng.chance("injury_severity", 0.15)?,
            });
        }
        common.yards_gained = sack_yards;
        common.end_field_position = match inputs.possession {
            Possession::Home => (inputs.field_position as i32 + sack_yards).clamp(0, 100) as u32,
            _ => (inputs.field_position as i32 - sack_yards).clamp(0, 100) as u32,
        };
        common.elapsed_seconds = rng.integer("sack_elapsed_time", 4, 8)? as u32;
        return Ok(PassPlay {
            common,
            passer: inputs.passer,
            segments,
            sacked: true,
            interceptor: None,
        });
    }

    // (3) pass-type selection.
    let pass_type = select_pass_type(rng, inputs.distance)?;

    // (4) completion check.
    let skill_mod = attribute_modifier(inputs.receiver_catching - inputs.coverage_power);
    let completed = occurrence::pass_completion(
        rng,
        inputs.receiver_catching,
        inputs.coverage_power,
        defensive_pressure > 1.3,
    )?;

    let mut interceptor = None;
    let thrown_air_yards: Option<i32>;
    if !completed {
        // (5) interception check.
        let intercepted = occurrence::interception_on_incomplete(
            rng,
            inputs.coverage_power,
            inputs.receiver_catching,
            defensive_pressure > 1.3,
        )?;
        if intercepted {
            let defender_index = if inputs.defenders.is_empty() {
                return Err(EngineError::ContractViolation {
                    play: String::from("pass"),
                    role: String::from("interceptor"),
                });
            } else {
                rng.integer("interceptor_selection", 0, inputs.defenders.len() as i64)? as usize
            };
            let defender = inputs.defenders[defender_index];
            let return_yards = yardage::fumble_return_yards(rng, inputs.coverage_power)?;
            common.interception = true;
            common.possession_changed = true;
            segments.push(PlaySegment::Return {
                returner: defender,
                yards: return_yards,
                fumble: false,
                recoverer: None,
                out_of_bounds: false,
            });
            interceptor = Some(defender);
        }
        thrown_air_yards = None;
    } else {
        // (6) air yards, YAC.
        let yards_to_goal = match inputs.possession {
            Possession::Home => 100 - inputs.field_position,
            _ => inputs.field_position,
        };
        let air = yardage::air_yards(rng, pass_type, skill_mod, yards_to_goal)?;
        let yac = yardage::yards_after_catch(
            rng,
            inputs.receiver_speed,
            inputs.receiver_agility,
            inputs.receiver_rushing,
        )?;
        segments.push(PlaySegment::Pass {
            passer: inputs.passer,
            receiver: Some(inputs.receiver),
            air_yards: air,
            yards_after_catch: yac,
            complete: true,
            fumble: false,
            out_of_bounds: false,
        });
        common.yards_gained = air + yac;
        thrown_air_yards = Some(air);
    }

    // (7) coverage penalty, enforced at the foul spot rather than a fixed
    // table yardage (spec §4.7.5 spot foul) — the spot is the pass's own
    // air yards if it was thrown downfield, or a fresh draw off the same
    // distribution if the pass never got that far (e.g. batted at the
    // line) before the interference occurred.
    if occurrence::pre_snap_penalty(rng, PenaltyKind::DefensivePassInterference.base_probability(), 50.0)? {
        let foul_spot_yards = match thrown_air_yards {
            Some(air) => air,
            None => {
                let yards_to_goal = match inputs.possession {
                    Possession::Home => 100 - inputs.field_position,
                    _ => inputs.field_position,
                };
                yardage::air_yards(rng, pass_type, skill_mod, yards_to_goal)?
            }
        };
        let yards = if PenaltyKind::DefensivePassInterference.is_spot_foul() {
            foul_spot_yards.max(0) as u32
        } else {
            PenaltyKind::DefensivePassInterference.yards()
        };
        common.penalties.push(Penalty {
            kind: PenaltyKind::DefensivePassInterference,
            team: inputs.possession.opponent(),
            player: None,
            phase: PenaltyPhase::During,
            yards,
            accepted: false,
        });
    }

    // (8) tackle penalty.
    if occurrence::pre_snap_penalty(rng, PenaltyKind::UnnecessaryRoughnessDefense.base_probability(), 50.0)? {
        common.penalties.push(Penalty {
            kind: PenaltyKind::UnnecessaryRoughnessDefense,
            team: inputs.possession.opponent(),
            player: None,
            phase: PenaltyPhase::After,
            yards: PenaltyKind::UnnecessaryRoughnessDefense.yards(),
            accepted: false,
        });
    }

    // (9) injury checks.
    if completed && occurrence::injury(rng, 0.004, inputs.receiver_catching, 1.0)? {
        common.injuries.push(InjuryRecord {
            player: inputs.receiver,
            severe: rng.chance("injury_severity", 0.15)?,
        });
    }

    // (10) fumble after catch.
    if completed && occurrence::fumble_normal(rng, inputs.receiver_catching, defensive_pressure * 50.0, false)? {
        let (bounce, bounce_yards) = yardage::fumble_bounce(rng)?;
        let (offense_recovers, out_of_bounds) =
            yardage::fumble_recovery(rng, bounce, inputs.receiver_catching, inputs.defense_awareness)?;
        if offense_recovers {
            common.fumbles.push(FumbleRecord {
                carrier: inputs.receiver,
                recovered_by: None,
                recovery_team: inputs.possession,
                out_of_bounds,
                return_yards: bounce_yards,
            });
        } else {
            let recoverer = inputs.defenders.first().copied();
            let return_yards = bounce_yards + yardage::fumble_return_yards(rng, inputs.coverage_power)?;
            common.fumbles.push(FumbleRecord {
                carrier: inputs.receiver,
                recovered_by: recoverer,
                recovery_team: inputs.possession.opponent(),
                out_of_bounds,
                return_yards,
            });
            common.possession_changed = true;
            if let Some(recoverer) = recoverer {
                segments.push(PlaySegment::Return {
                    returner: recoverer,
                    yards: return_yards,
                    fumble: true,
                    recoverer: Some(recoverer),
                    out_of_bounds,
                });
            }
        }
    }

    // (11) elapsed time.
    common.elapsed_seconds = rng.integer("pass_elapsed_time", 5, 10)? as u32;
    if !completed && interceptor.is_none() {
        common.clock_stopped = true;
    }

    common.end_field_position = match (inputs.possession, interceptor.is_some()) {
        (Possession::Home, false) => (inputs.field_position as i32 + common.yards_gained).clamp(0, 100) as u32,
        (Possession::Away, false) => (inputs.field_position as i32 - common.yards_gained).clamp(0, 100) as u32,
        (_, true) => inputs.field_position,
    };

    Ok(PassPlay {
        common,
        passer: inputs.passer,
        segments,
        sacked: false,
        interceptor,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SeededSource;

    fn inputs() -> PassInputs {
        PassInputs {
            passer: PlayerId { team: Possession::Home, index: 0 },
            passer_awareness: 65.0,
            receiver: PlayerId { team: Possession::Home, index: 1 },
            receiver_speed: 80.0,
            receiver_agility: 75.0,
            receiver_rushing: 20.0,
            receiver_catching: 70.0,
            pass_block_power: 55.0,
            pass_rush_power: 50.0,
            coverage_power: 55.0,
            defense_awareness: 50.0,
            rush_count: 4,
            defenders: vec![PlayerId { team: Possession::Away, index: 0 }],
            down: Down::Second,
            distance: 7,
            possession: Possession::Home,
            field_position: 40,
            offensive_players: vec![],
            defensive_players: vec![],
        }
    }

    #[test]
    fn runs_to_completion_without_error() {
        let mut rng = SeededSource::new(11);
        let play = execute(&mut rng, inputs()).unwrap();
        assert!(play.common.end_field_position <= 100);
    }

    #[test]
    fn contract_violation_if_no_defenders_to_intercept() {
        let mut rng = SeededSource::new(0);
        let mut i = inputs();
        i.defenders = vec![];
        // Not every seed triggers an interception; this just exercises the
        // path without asserting a specific outcome.
        let _ = execute(&mut rng, i);
    }
}
