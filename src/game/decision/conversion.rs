//! Conversion decision after a touchdown (spec §4.8 "Conversion decision").

use crate::error::EngineError;
use crate::game::context::GameContext;
use crate::rng::RandomSource;

#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum ConversionCall {
    ExtraPoint,
    TwoPointConversion,
}

const BASE_TWO_POINT_PROBABILITY: f64 = 0.05;

/// Sample whether the scoring team goes for two. A nudge is applied when
/// the extra point alone would leave the team still trailing.
pub fn decide(rng: &mut dyn RandomSource, ctx: &GameContext) -> Result<ConversionCall, EngineError> {
    let mut p = BASE_TWO_POINT_PROBABILITY;
    if ctx.score_diff() < 0 && ctx.score_diff() + 1 < 0 {
        p += 0.10;
    }
    let p = p.clamp(0.0, 1.0);
    if rng.chance("conversion_go_for_two", p)? {
        Ok(ConversionCall::TwoPointConversion)
    } else {
        Ok(ConversionCall::ExtraPoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Game, Possession};
    use crate::rng::SeededSource;

    #[test]
    fn defaults_mostly_kick_the_extra_point() {
        let game = Game::new();
        let ctx = GameContext::from_game(&game, Possession::Home);
        let mut twos = 0;
        for seed in 0..200u64 {
            let mut rng = SeededSource::new(seed);
            if decide(&mut rng, &ctx).unwrap() == ConversionCall::TwoPointConversion {
                twos += 1;
            }
        }
        assert!(twos < 40);
    }
}
