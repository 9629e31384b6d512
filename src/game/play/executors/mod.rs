//! Play executors (spec §4.6): each is a strict, ordered sequence of skill
//! checks producing a [`crate::game::play::Play`] of the matching variant.
//! Ordering is a behavioral contract — it is externally observable via the
//! random stream, so do not reorder draws even when it would read more
//! naturally.

pub mod fieldgoal;
pub mod kickoff;
pub mod pass;
pub mod punt;
pub mod run;
