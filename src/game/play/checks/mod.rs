//! Skill checks (spec §4.5): pure functions of random draw + attributes +
//! situation, returning either an occurrence boolean or a typed yardage
//! result. Every check documents its base rate, modifiers, and clamp range;
//! draw order at each call site is part of the replay contract (spec §5).

pub mod occurrence;
pub mod yardage;
