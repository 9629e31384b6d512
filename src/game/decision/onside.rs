//! Onside-kick decision (spec §4.8 "Onside-kick decision").

use crate::error::EngineError;
use crate::rng::RandomSource;

#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum OnsideDecision {
    Onside,
    Normal,
}

const DEFAULT_ATTEMPT_PROBABILITY: f64 = 0.80;

/// `kicking_team_score_diff` is the kicking team's score minus the
/// receiving team's. Onside is only ever on the table when the kicker
/// trails by at least a score (7).
pub fn decide(
    rng: &mut dyn RandomSource,
    kicking_team_score_diff: i32,
    attempt_probability: f64,
) -> Result<OnsideDecision, EngineError> {
    if kicking_team_score_diff > -7 {
        return Ok(OnsideDecision::Normal);
    }
    if attempt_probability <= 0.0 {
        // Short-circuit without drawing, to preserve stream position when
        // onside kicks are configured off entirely.
        return Ok(OnsideDecision::Normal);
    }
    if rng.chance("onside_kick_attempt", attempt_probability.clamp(0.0, 1.0))? {
        Ok(OnsideDecision::Onside)
    } else {
        Ok(OnsideDecision::Normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SeededSource;

    #[test]
    fn never_onside_unless_trailing_by_a_score() {
        let mut rng = SeededSource::new(1);
        assert_eq!(
            decide(&mut rng, -3, DEFAULT_ATTEMPT_PROBABILITY).unwrap(),
            OnsideDecision::Normal
        );
    }

    #[test]
    fn zero_probability_short_circuits_without_drawing() {
        let mut rng = SeededSource::new(1);
        let decision = decide(&mut rng, -10, 0.0).unwrap();
        assert_eq!(decision, OnsideDecision::Normal);

        let mut fresh = SeededSource::new(1);
        assert_eq!(rng.uniform("probe").unwrap(), fresh.uniform("probe").unwrap());
    }
}
