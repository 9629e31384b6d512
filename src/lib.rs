//! An outcome-oriented American football play-by-play simulation engine.
//!
//! The entry point is [`sim::simulate_game`]: give it two [`team::Team`]s
//! and a [`config::Configuration`], get back a finished [`sim::GameResult`].
//! Everything underneath — the flow state machine, skill-check resolvers,
//! penalty enforcement, coaching decision engines, and pluggable rule
//! providers — is reachable for callers who want to drive the simulation a
//! play at a time instead.

pub mod attributes;
pub mod config;
pub mod distributions;
pub mod error;
pub mod game;
pub mod power;
pub mod replay;
pub mod rng;
pub mod sim;
pub mod team;
