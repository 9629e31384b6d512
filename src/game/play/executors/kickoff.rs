//! Kickoff executor (spec §4.6 "Kickoff").

use crate::error::EngineError;
use crate::game::decision::fair_catch::{self, FairCatchDecision};
use crate::game::play::checks::{occurrence, yardage};
use crate::game::play::{InjuryRecord, KickoffPlay, PlayCommon, PlayerId};
use crate::game::{Down, Possession};
use crate::rng::RandomSource;

pub struct KickoffInputs {
    pub kicker: PlayerId,
    pub kicking: f64,
    pub returner: PlayerId,
    pub returner_speed: f64,
    pub returner_agility: f64,
    pub returner_catching: f64,
    pub onside_attempt: bool,
    pub touchback_spot: u32,
    pub possession: Possession,
    pub field_position: u32,
    pub coverage_team: Vec<(PlayerId, f64)>,
    pub offensive_players: Vec<PlayerId>,
    pub defensive_players: Vec<PlayerId>,
}

/// Run the ordered kickoff check sequence. `possession` is the *kicking*
/// team; the play flips possession unless the onside attempt fails.
pub fn execute(rng: &mut dyn RandomSource, inputs: KickoffInputs) -> Result<KickoffPlay, EngineError> {
    let mut common = PlayCommon::new(
        inputs.field_position,
        Down::None,
        inputs.possession,
        inputs.offensive_players,
        inputs.defensive_players,
    );

    if inputs.onside_attempt {
        let recovered = rng.chance("onside_recovery", 0.12)?;
        common.possession_changed = !recovered;
        common.elapsed_seconds = rng.integer("onside_elapsed_time", 4, 8)? as u32;
        common.end_field_position = 45;
        return Ok(KickoffPlay {
            common,
            kicker: inputs.kicker,
            onside: true,
            onside_recovered_by_kicking_team: recovered,
            touchback: false,
            returner: None,
        });
    }

    let distance = yardage::kickoff_distance(rng, inputs.kicking)?;
    let landing_spot = (inputs.field_position as i32 + distance).clamp(0, 100) as u32;
    let hang_time = yardage::punt_hang_time(rng, distance)?;

    let receiving = inputs.possession.opponent();
    let landing_field_position = match receiving {
        Possession::Home => landing_spot,
        Possession::Away => 100 - landing_spot,
    };
    let fair_catch = landing_spot < 100
        && fair_catch::decide(rng, hang_time, landing_field_position, true)? == FairCatchDecision::FairCatch;
    if fair_catch || landing_spot >= 100 {
        common.possession_changed = true;
        common.end_field_position = inputs.touchback_spot;
        common.elapsed_seconds = rng.integer("kickoff_elapsed_time", 4, 6)? as u32;
        return Ok(KickoffPlay {
            common,
            kicker: inputs.kicker,
            onside: false,
            onside_recovered_by_kicking_team: false,
            touchback: true,
            returner: None,
        });
    }

    let muffed = occurrence::muffed_catch(rng, inputs.returner_catching)?;
    let return_yards = if muffed {
        0
    } else {
        yardage::kickoff_return_yards(rng, inputs.returner_speed, inputs.returner_agility)?
    };

    let best_coverage = inputs.coverage_team.iter().map(|(_, p)| *p).fold(0.0_f64, f64::max);
    for (player, _) in inputs.coverage_team.iter().take(2) {
        if occurrence::injury(rng, 0.003, best_coverage, 1.1)? {
            common.injuries.push(InjuryRecord {
                player: *player,
                severe: rng.chance("injury_severity", 0.15)?,
            });
        }
    }

    common.possession_changed = true;
    common.yards_gained = return_yards;
    common.end_field_position = (landing_spot as i32 - return_yards).clamp(0, 100) as u32;
    common.elapsed_seconds = rng.integer("kickoff_return_elapsed_time", 8, 15)? as u32;

    Ok(KickoffPlay {
        common,
        kicker: inputs.kicker,
        onside: false,
        onside_recovered_by_kicking_team: false,
        touchback: false,
        returner: Some(inputs.returner),
    })
}
