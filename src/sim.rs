//! Public simulation facade (spec §6).
//!
//! [`simulate_game`] is the single entry point a host binary calls: it owns
//! the random source for the run, drives [`crate::game::flow::Flow`] to
//! completion, and hands back a [`GameResult`] bundling the final score,
//! full play log, per-player stats, and (optionally) a replay log a caller
//! can persist and feed back through [`crate::replay::ReplaySource`].

use crate::config::Configuration;
use crate::error::EngineError;
use crate::game::flow::Flow;
use crate::game::play::Play;
use crate::game::stats::StatLedger;
use crate::replay::{RecordingSource, ReplayLog};
use crate::rng::SeededSource;
use crate::team::Team;

/// Caller-supplied knobs for a single `simulate_game` call.
#[derive(Clone, Debug, Default)]
pub struct GameOptions {
    /// Explicit seed; `None` draws one from entropy and reports it back on
    /// [`GameResult::seed`].
    pub seed: Option<u64>,
    /// Rule-provider selection and tunables for this run.
    pub config: Configuration,
    /// When `true`, every draw is recorded into [`GameResult::replay_log`].
    pub record_replay: bool,
}

/// Everything a caller gets back from one completed simulation.
#[derive(Debug)]
pub struct GameResult {
    pub home_score: u32,
    pub away_score: u32,
    pub plays: Vec<Play>,
    pub stats: StatLedger,
    pub seed: u64,
    pub replay_log: Option<ReplayLog>,
}

/// Run one full game between `home` and `away`, returning the completed
/// [`GameResult`]. Only [`EngineError::ContractViolation`],
/// [`EngineError::InvariantViolation`], and [`EngineError::ReplayExhausted`]
/// propagate out of here (spec §7) — decision ambiguity is handled locally
/// by the decision engines and never surfaces as an error.
pub fn simulate_game(home: &Team, away: &Team, options: GameOptions) -> Result<GameResult, EngineError> {
    let seed = options.seed.unwrap_or_else(|| SeededSource::from_entropy().seed());
    let seeded = SeededSource::new(seed);

    let mut flow = Flow::new(home, away, options.config);

    if options.record_replay {
        let mut recording = RecordingSource::new(seeded, seed as i64);
        flow.run(&mut recording)?;
        let replay_log = Some(recording.into_log());
        Ok(finish(flow, seed, replay_log))
    } else {
        let mut rng = seeded;
        flow.run(&mut rng)?;
        Ok(finish(flow, seed, None))
    }
}

/// Replay a previously-recorded game bit-for-bit, using the seed and draw
/// sequence captured in `log` rather than drawing fresh randomness.
pub fn replay_game(home: &Team, away: &Team, config: Configuration, log: ReplayLog) -> Result<GameResult, EngineError> {
    let seed = log.seed as u64;
    let mut replay = crate::replay::ReplaySource::new(log);
    let mut flow = Flow::new(home, away, config);
    flow.run(&mut replay)?;
    Ok(finish(flow, seed, None))
}

fn finish(flow: Flow<'_>, seed: u64, replay_log: Option<ReplayLog>) -> GameResult {
    let (game, stats) = flow.into_game_and_stats();
    let home_score = game.home_score();
    let away_score = game.away_score();
    let plays = game.plays().to_vec();
    log::info!("simulation complete: home {home_score} away {away_score} ({} plays)", plays.len());
    GameResult {
        home_score,
        away_score,
        plays,
        stats,
        seed,
        replay_log,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::Position;
    use crate::team::coach::Coach;
    use crate::team::roster::{DepthChartUnit, Roster};
    use crate::attributes::Player;

    fn build_roster() -> Roster {
        let mut roster = Roster::new();
        let positions = [
            Position::Qb,
            Position::Rb,
            Position::Wr,
            Position::Wr,
            Position::Te,
            Position::C,
            Position::G,
            Position::G,
            Position::T,
            Position::T,
            Position::Dt,
            Position::De,
            Position::Lb,
            Position::Olb,
            Position::Cb,
            Position::Cb,
            Position::S,
            Position::Fs,
            Position::K,
            Position::P,
        ];
        let mut indices = Vec::new();
        for (i, pos) in positions.iter().enumerate() {
            let idx = roster.add_player(Player::new(&format!("Player {i}"), *pos));
            indices.push((idx, *pos));
        }
        for &(idx, pos) in &indices {
            match pos {
                Position::Qb | Position::Rb | Position::Wr | Position::Te | Position::C | Position::G | Position::T => {
                    roster.depth_chart_mut(DepthChartUnit::Offense).assign(pos, idx);
                }
                Position::Dt | Position::De | Position::Lb | Position::Olb | Position::Cb | Position::S | Position::Fs => {
                    roster.depth_chart_mut(DepthChartUnit::Defense).assign(pos, idx);
                    roster.depth_chart_mut(DepthChartUnit::KickoffCoverage).assign(pos, idx);
                    roster.depth_chart_mut(DepthChartUnit::PuntCoverage).assign(pos, idx);
                    roster.depth_chart_mut(DepthChartUnit::FieldGoalBlock).assign(pos, idx);
                }
                Position::K => {
                    roster.depth_chart_mut(DepthChartUnit::FieldGoal).assign(pos, idx);
                    roster.depth_chart_mut(DepthChartUnit::KickoffCoverage).assign(pos, idx);
                }
                Position::P => {
                    roster.depth_chart_mut(DepthChartUnit::PuntCoverage).assign(pos, idx);
                }
                _ => {}
            }
            if matches!(pos, Position::Rb | Position::Wr) {
                roster.depth_chart_mut(DepthChartUnit::KickoffReturn).assign(pos, idx);
                roster.depth_chart_mut(DepthChartUnit::PuntReturn).assign(pos, idx);
            }
            if matches!(pos, Position::C | Position::G | Position::T) {
                roster.depth_chart_mut(DepthChartUnit::FieldGoal).assign(pos, idx);
            }
        }
        roster
    }

    fn build_team(name: &str, short_name: &str) -> Team {
        Team::from_parts(name, short_name, Coach::new(), build_roster())
    }

    #[test]
    fn simulate_game_reaches_a_final_score_deterministically() {
        let home = build_team("Home City Hawks", "HCH");
        let away = build_team("Away Town Otters", "ATO");
        let options = GameOptions {
            seed: Some(12345),
            config: Configuration::default(),
            record_replay: true,
        };
        let result = simulate_game(&home, &away, options).expect("simulation succeeds");
        assert_eq!(result.seed, 12345);
        assert!(!result.plays.is_empty());
        assert!(result.replay_log.is_some());
    }

    #[test]
    fn same_seed_produces_identical_scores() {
        let home = build_team("Home City Hawks", "HCH");
        let away = build_team("Away Town Otters", "ATO");
        let a = simulate_game(
            &home,
            &away,
            GameOptions { seed: Some(7), config: Configuration::default(), record_replay: false },
        )
        .unwrap();
        let b = simulate_game(
            &home,
            &away,
            GameOptions { seed: Some(7), config: Configuration::default(), record_replay: false },
        )
        .unwrap();
        assert_eq!(a.home_score, b.home_score);
        assert_eq!(a.away_score, b.away_score);
        assert_eq!(a.plays.len(), b.plays.len());
    }

    #[test]
    fn recorded_replay_reproduces_the_same_game() {
        let home = build_team("Home City Hawks", "HCH");
        let away = build_team("Away Town Otters", "ATO");
        let recorded = simulate_game(
            &home,
            &away,
            GameOptions { seed: Some(42), config: Configuration::default(), record_replay: true },
        )
        .unwrap();
        let log = recorded.replay_log.clone().expect("replay was recorded");
        let replayed = replay_game(&home, &away, Configuration::default(), log).unwrap();
        assert_eq!(recorded.home_score, replayed.home_score);
        assert_eq!(recorded.away_score, replayed.away_score);
        assert_eq!(recorded.plays.len(), replayed.plays.len());
    }
}
