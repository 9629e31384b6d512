//! Rule providers: abstractions the engine queries instead of branching on
//! league type (spec §4.9 "Rule Providers"). Each provider kind has a
//! process-wide registry keyed by case-insensitive name, mirroring the
//! teacher's `lazy_static!`-backed static lookup tables (see
//! `game/score.rs`'s `SCORE_FREQ_LUT`).

pub mod end_of_half;
pub mod overtime;
pub mod two_minute_warning;

pub use end_of_half::EndOfHalfProvider;
pub use overtime::OvertimeProvider;
pub use two_minute_warning::TwoMinuteWarningProvider;
