//! Attribute modifier (spec §4.3).
//!
//! Converts a skill differential (offense minus defense) into a small
//! probability/mean nudge via a logarithmic curve, so a 10-point edge
//! matters a lot more near parity than a 10-point edge on top of an
//! existing 80-point gap.

/// `modifier(delta) = sign(delta) * ln(1 + |delta|/10) * 0.15`.
///
/// Returns `0.0` if `|delta| < 1e-3`. Practical magnitude tops out around
/// `±0.18` for realistic attribute spreads (`delta` in `[-100, 100]`).
/// Callers are responsible for clamping composed probabilities to
/// `[0.01, 0.99]` and modifiers to `±0.35` individually, `±0.50` summed.
pub fn attribute_modifier(delta: f64) -> f64 {
    if delta.abs() < 1e-3 {
        return 0.0;
    }
    delta.signum() * (1.0 + delta.abs() / 10.0).ln() * 0.15
}

/// Clamp a single modifier contribution to `±0.35`.
pub fn clamp_modifier(value: f64) -> f64 {
    value.clamp(-0.35, 0.35)
}

/// Clamp a sum of modifier contributions to `±0.50`.
pub fn clamp_modifier_sum(value: f64) -> f64 {
    value.clamp(-0.50, 0.50)
}

/// Clamp a composed probability to the universal `[0.01, 0.99]` bound,
/// then to a tighter, check-specific `range` documented in spec §4.5.
pub fn clamp_probability(p: f64, range: (f64, f64)) -> f64 {
    p.clamp(0.01, 0.99).clamp(range.0, range.1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_near_parity() {
        assert_eq!(attribute_modifier(0.0), 0.0);
        assert_eq!(attribute_modifier(0.0005), 0.0);
    }

    #[test]
    fn sign_follows_delta() {
        assert!(attribute_modifier(10.0) > 0.0);
        assert!(attribute_modifier(-10.0) < 0.0);
    }

    #[test]
    fn magnitude_bounded_in_practice() {
        let m = attribute_modifier(100.0);
        assert!(m.abs() <= 0.18 + 1e-9);
    }
}
