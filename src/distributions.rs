//! Statistical distributions used by skill checks (spec §4.2).
//!
//! Every distribution here draws exclusively from a [`RandomSource`] so
//! draw order stays part of the replay contract — none of this delegates to
//! `rand_distr`'s own sampling, since that would consume entropy through a
//! channel the replay log cannot see.

use crate::error::EngineError;
use crate::rng::RandomSource;

/// Draw from `Normal(mu, sigma)` via Box–Muller, consuming exactly two
/// uniform draws. Rejects and redraws `u1` if it lands on exactly `0.0`
/// (which would make `ln(u1)` diverge).
pub fn normal(rng: &mut dyn RandomSource, name: &str, mu: f64, sigma: f64) -> Result<f64, EngineError> {
    let mut u1 = rng.uniform(name)?;
    while u1 == 0.0 {
        u1 = rng.uniform(name)?;
    }
    let u2 = rng.uniform(name)?;
    let z0 = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    Ok(mu + sigma * z0)
}

/// Draw from `LogNormal(mu, sigma) = exp(Normal(mu, sigma))`.
pub fn log_normal(rng: &mut dyn RandomSource, name: &str, mu: f64, sigma: f64) -> Result<f64, EngineError> {
    Ok(normal(rng, name, mu, sigma)?.exp())
}

/// Draw a uniform real in `[lo, hi)` — used by several yardage formulas
/// (`U(-2,6)` etc) that aren't integer draws.
pub fn uniform_range(rng: &mut dyn RandomSource, name: &str, lo: f64, hi: f64) -> Result<f64, EngineError> {
    let u = rng.uniform(name)?;
    Ok(lo + u * (hi - lo))
}

/// Run-play base yardage: `LogNormal(mu=1.1, sigma=0.7) - 1 + 2*skill_mod`,
/// rounded. Targets mean ≈ 4.3, median ≈ 3, ≈15% negative, ≈5% ≥15 yards.
pub fn run_yards(rng: &mut dyn RandomSource, skill_mod: f64) -> Result<i32, EngineError> {
    let base = log_normal(rng, "run_yards", 1.1, 0.7)?;
    Ok(((base - 1.0) + 2.0 * skill_mod).round() as i32)
}

/// Categorization of a called pass by target depth (spec §4.2/§4.6).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PassType {
    Screen,
    Short,
    Medium,
    Deep,
}

impl PassType {
    fn params(self) -> (f64, f64) {
        match self {
            PassType::Screen => (4.0, 3.0),
            PassType::Short => (7.0, 3.5),
            PassType::Medium => (14.0, 5.0),
            PassType::Deep => (30.0, 10.0),
        }
    }
}

/// Air yards for a completed/intercepted pass: `Normal` with per-type
/// parameters, mean shifted by `3*skill_mod`, floored at 1.
pub fn pass_yards(rng: &mut dyn RandomSource, pass_type: PassType, skill_mod: f64) -> Result<i32, EngineError> {
    let (mu, sigma) = pass_type.params();
    let drawn = normal(rng, "pass_yards", mu + 3.0 * skill_mod, sigma)?;
    Ok((drawn.round() as i32).max(1))
}

/// Sack yardage loss: `Normal(7, 2)`, clamped to `[1, 15]`, returned
/// negative (yards lost).
pub fn sack_yards(rng: &mut dyn RandomSource) -> Result<i32, EngineError> {
    let drawn = normal(rng, "sack_yards", 7.0, 2.0)?.round() as i32;
    Ok(-drawn.clamp(1, 15))
}

/// Tackle-for-loss yardage: `Normal(2, 1)`, clamped to `[1, 5]`, returned
/// negative.
pub fn tackle_for_loss_yards(rng: &mut dyn RandomSource) -> Result<i32, EngineError> {
    let drawn = normal(rng, "tfl_yards", 2.0, 1.0)?.round() as i32;
    Ok(-drawn.clamp(1, 5))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SeededSource;

    #[test]
    fn run_yards_distribution_targets() {
        let mut rng = SeededSource::new(12345);
        let n = 20_000;
        let mut total = 0i64;
        let mut negative = 0;
        let mut big = 0;
        let mut samples = Vec::with_capacity(n);
        for _ in 0..n {
            let y = run_yards(&mut rng, 0.0).unwrap();
            samples.push(y);
            total += y as i64;
            if y < 0 {
                negative += 1;
            }
            if y >= 15 {
                big += 1;
            }
        }
        let mean = total as f64 / n as f64;
        samples.sort();
        let median = samples[n / 2];
        assert!((mean - 4.3).abs() < 0.6, "mean was {mean}");
        assert!((median - 3).abs() <= 1, "median was {median}");
        let neg_frac = negative as f64 / n as f64;
        assert!((neg_frac - 0.15).abs() < 0.05, "neg frac was {neg_frac}");
        let big_frac = big as f64 / n as f64;
        assert!((big_frac - 0.05).abs() < 0.05, "big frac was {big_frac}");
    }

    #[test]
    fn sack_yards_always_negative_and_clamped() {
        let mut rng = SeededSource::new(1);
        for _ in 0..1000 {
            let y = sack_yards(&mut rng).unwrap();
            assert!((-15..=-1).contains(&y));
        }
    }

    #[test]
    fn pass_yards_floored_at_one() {
        let mut rng = SeededSource::new(2);
        for _ in 0..1000 {
            let y = pass_yards(&mut rng, PassType::Screen, -1.0).unwrap();
            assert!(y >= 1);
        }
    }
}
