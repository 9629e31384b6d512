//! Fair-catch decision (spec §4.8 "Fair-catch decision").

use crate::error::EngineError;
use crate::rng::RandomSource;

const BASE_FAIR_CATCH_PROBABILITY: f64 = 0.35;

#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum FairCatchDecision {
    FairCatch,
    Return,
}

/// `landing_field_position` is the receiving team's own absolute field
/// position the ball lands at (low values are deep in their own territory).
pub fn decide(
    rng: &mut dyn RandomSource,
    hang_time: f64,
    landing_field_position: u32,
    is_kickoff: bool,
) -> Result<FairCatchDecision, EngineError> {
    let mut p = BASE_FAIR_CATCH_PROBABILITY;
    if hang_time > 4.5 {
        p += 0.20;
    } else if hang_time > 4.0 {
        p += 0.10;
    }
    if landing_field_position <= 10 {
        p += 0.15;
    }
    if is_kickoff {
        p += 0.05;
    }
    let p = p.clamp(0.0, 1.0);
    if rng.chance("fair_catch", p)? {
        Ok(FairCatchDecision::FairCatch)
    } else {
        Ok(FairCatchDecision::Return)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SeededSource;

    #[test]
    fn high_hang_time_deep_increases_fair_catch_rate() {
        let mut fair_catches = 0;
        for seed in 0..100u64 {
            let mut rng = SeededSource::new(seed);
            if decide(&mut rng, 5.0, 5, false).unwrap() == FairCatchDecision::FairCatch {
                fair_catches += 1;
            }
        }
        assert!(fair_catches > 50);
    }
}
