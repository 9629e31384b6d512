//! Punt executor (spec §4.6 "Punt").

use crate::error::EngineError;
use crate::game::decision::fair_catch::{self, FairCatchDecision};
use crate::game::play::checks::{occurrence, yardage};
use crate::game::play::{PlayCommon, PlayerId, PuntPlay};
use crate::game::{Down, Possession};
use crate::rng::RandomSource;

pub struct PuntInputs {
    pub punter: PlayerId,
    pub kicking: f64,
    pub long_snapper_quality: f64,
    pub returner: PlayerId,
    pub returner_skill: f64,
    pub punt_rush_power: f64,
    pub punt_block_power: f64,
    pub coverage_power: f64,
    pub possession: Possession,
    pub field_position: u32,
    pub offensive_players: Vec<PlayerId>,
    pub defensive_players: Vec<PlayerId>,
}

/// Run the ordered punt check sequence.
pub fn execute(rng: &mut dyn RandomSource, inputs: PuntInputs) -> Result<PuntPlay, EngineError> {
    let mut common = PlayCommon::new(
        inputs.field_position,
        Down::None,
        inputs.possession,
        inputs.offensive_players,
        inputs.defensive_players,
    );

    let bad_snap = rng.chance("bad_snap", 0.04 * (1.0 - inputs.long_snapper_quality / 150.0))?;
    if bad_snap {
        let loss = rng.integer("bad_snap_yards", 3, 15)? as i32;
        common.yards_gained = -loss;
        common.possession_changed = true;
        common.end_field_position = (inputs.field_position as i32 - loss).clamp(0, 100) as u32;
        common.elapsed_seconds = rng.integer("punt_elapsed_time", 4, 8)? as u32;
        return Ok(PuntPlay {
            common,
            punter: inputs.punter,
            blocked: false,
            fair_catch: false,
            hang_time: 0.0,
            returner: None,
        });
    }

    let blocked = occurrence::kick_block(rng, inputs.punt_rush_power, inputs.punt_block_power)?;
    if blocked {
        common.possession_changed = true;
        common.end_field_position = inputs.field_position;
        common.elapsed_seconds = rng.integer("punt_blocked_elapsed_time", 3, 6)? as u32;
        return Ok(PuntPlay {
            common,
            punter: inputs.punter,
            blocked: true,
            fair_catch: false,
            hang_time: 0.0,
            returner: None,
        });
    }

    let distance = yardage::punt_distance(rng, inputs.kicking, inputs.field_position)?;
    let hang_time = yardage::punt_hang_time(rng, distance)?;
    let landing_spot = (inputs.field_position as i32 + distance).clamp(0, 100) as u32;

    let receiving = inputs.possession.opponent();
    let landing_field_position = match receiving {
        Possession::Home => landing_spot,
        Possession::Away => 100 - landing_spot,
    };
    let fair_catch = landing_spot < 100
        && fair_catch::decide(rng, hang_time, landing_field_position, false)? == FairCatchDecision::FairCatch;
    if fair_catch || landing_spot >= 100 {
        common.possession_changed = true;
        common.end_field_position = landing_spot.min(80);
        common.elapsed_seconds = rng.integer("punt_return_elapsed_time", 6, 10)? as u32;
        return Ok(PuntPlay {
            common,
            punter: inputs.punter,
            blocked: false,
            fair_catch: true,
            hang_time,
            returner: Some(inputs.returner),
        });
    }

    let return_yards = yardage::punt_return_yards(rng, inputs.returner_skill, inputs.coverage_power)?;
    common.possession_changed = true;
    common.yards_gained = return_yards;
    common.end_field_position = (landing_spot as i32 - return_yards).clamp(0, 100) as u32;
    common.elapsed_seconds = rng.integer("punt_return_elapsed_time", 8, 14)? as u32;

    Ok(PuntPlay {
        common,
        punter: inputs.punter,
        blocked: false,
        fair_catch: false,
        hang_time,
        returner: Some(inputs.returner),
    })
}
