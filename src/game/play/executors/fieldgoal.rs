//! Field goal executor (spec §4.6 "Field goal").

use crate::error::EngineError;
use crate::game::play::checks::occurrence;
use crate::game::play::{FieldGoalPlay, PlayCommon, PlayerId};
use crate::game::{Down, Possession};
use crate::rng::RandomSource;

pub struct FieldGoalInputs {
    pub kicker: PlayerId,
    pub kicking: f64,
    pub distance: u32,
    pub block_power: f64,
    pub rush_power: f64,
    pub possession: Possession,
    pub field_position: u32,
    pub offensive_players: Vec<PlayerId>,
    pub defensive_players: Vec<PlayerId>,
}

/// Run the ordered field-goal check sequence.
pub fn execute(rng: &mut dyn RandomSource, inputs: FieldGoalInputs) -> Result<FieldGoalPlay, EngineError> {
    let mut common = PlayCommon::new(
        inputs.field_position,
        Down::None,
        inputs.possession,
        inputs.offensive_players,
        inputs.defensive_players,
    );

    let blocked = occurrence::kick_block(rng, inputs.rush_power, inputs.block_power)?;
    if blocked {
        let recovered_by_defense = rng.chance("fg_block_recovery", 0.60)?;
        common.possession_changed = recovered_by_defense;
        if recovered_by_defense {
            let return_yards = rng.integer("fg_block_return_yards", 0, 40)? as i32;
            common.yards_gained = return_yards;
            common.end_field_position =
                (inputs.field_position as i32 - return_yards).clamp(0, 100) as u32;
        } else {
            common.end_field_position = inputs.field_position;
        }
        common.elapsed_seconds = rng.integer("fg_elapsed_time", 4, 8)? as u32;
        common.clock_stopped = true;
        return Ok(FieldGoalPlay {
            common,
            kicker: inputs.kicker,
            distance: inputs.distance,
            made: false,
            blocked: true,
        });
    }

    let made = occurrence::field_goal_make(rng, inputs.distance, inputs.kicking)?;
    common.possession_changed = !made;
    common.end_field_position = if made { inputs.field_position } else { 100 - inputs.field_position };
    common.clock_stopped = true;
    common.elapsed_seconds = rng.integer("fg_elapsed_time", 4, 8)? as u32;

    Ok(FieldGoalPlay {
        common,
        kicker: inputs.kicker,
        distance: inputs.distance,
        made,
        blocked: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SeededSource;

    fn inputs(distance: u32) -> FieldGoalInputs {
        FieldGoalInputs {
            kicker: PlayerId { team: Possession::Home, index: 0 },
            kicking: 70.0,
            distance,
            block_power: 55.0,
            rush_power: 50.0,
            possession: Possession::Home,
            field_position: 100 - distance + 17,
            offensive_players: vec![],
            defensive_players: vec![],
        }
    }

    #[test]
    fn short_kick_is_usually_good() {
        let mut makes = 0;
        for seed in 0..50u64 {
            let mut rng = SeededSource::new(seed);
            let play = execute(&mut rng, inputs(25)).unwrap();
            if play.made {
                makes += 1;
            }
        }
        assert!(makes > 30);
    }

    #[test]
    fn blocked_kick_is_never_made() {
        let mut rng = SeededSource::new(3);
        let play = execute(&mut rng, inputs(52)).unwrap();
        if play.blocked {
            assert!(!play.made);
        }
    }
}
