//! Per-player stat counters, generalized from the teacher's team-aggregate
//! `RushingStats`/`PassingStats`/`ReceivingStats` to counters keyed by the
//! acting [`PlayerId`] (spec §3 "Player... per-game stat counters"; §4.1
//! "no hidden randomness... deterministic defensive-player selection in
//! stats... must consume from the engine's stream").

use std::collections::HashMap;

use crate::error::EngineError;
use crate::game::play::{Play, PlayerId, PlaySegment};
use crate::rng::RandomSource;

#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct RushingStats {
    rushes: u32,
    fumbles: u32,
    touchdowns: u32,
    yards: i32,
}

impl RushingStats {
    pub fn rushes(&self) -> u32 {
        self.rushes
    }

    pub fn fumbles(&self) -> u32 {
        self.fumbles
    }

    pub fn touchdowns(&self) -> u32 {
        self.touchdowns
    }

    pub fn yards(&self) -> i32 {
        self.yards
    }
}

#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct PassingStats {
    attempts: u32,
    completions: u32,
    touchdowns: u32,
    interceptions: u32,
    yards: i32,
}

impl PassingStats {
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn completions(&self) -> u32 {
        self.completions
    }

    pub fn touchdowns(&self) -> u32 {
        self.touchdowns
    }

    pub fn interceptions(&self) -> u32 {
        self.interceptions
    }

    pub fn yards(&self) -> i32 {
        self.yards
    }
}

#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct ReceivingStats {
    targets: u32,
    receptions: u32,
    touchdowns: u32,
    fumbles: u32,
    yards: i32,
}

impl ReceivingStats {
    pub fn targets(&self) -> u32 {
        self.targets
    }

    pub fn receptions(&self) -> u32 {
        self.receptions
    }

    pub fn touchdowns(&self) -> u32 {
        self.touchdowns
    }

    pub fn fumbles(&self) -> u32 {
        self.fumbles
    }

    pub fn yards(&self) -> i32 {
        self.yards
    }
}

/// Counters credited to a player who never touches the ball — tackles,
/// sacks, takeaways.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct DefensiveStats {
    tackles: u32,
    sacks: u32,
    interceptions: u32,
    forced_fumbles: u32,
    fumble_recoveries: u32,
}

impl DefensiveStats {
    pub fn tackles(&self) -> u32 {
        self.tackles
    }

    pub fn sacks(&self) -> u32 {
        self.sacks
    }

    pub fn interceptions(&self) -> u32 {
        self.interceptions
    }

    pub fn forced_fumbles(&self) -> u32 {
        self.forced_fumbles
    }

    pub fn fumble_recoveries(&self) -> u32 {
        self.fumble_recoveries
    }
}

/// One player's full per-game counter set.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct PlayerStats {
    rushing: RushingStats,
    passing: PassingStats,
    receiving: ReceivingStats,
    defense: DefensiveStats,
}

impl PlayerStats {
    pub fn rushing(&self) -> &RushingStats {
        &self.rushing
    }

    pub fn passing(&self) -> &PassingStats {
        &self.passing
    }

    pub fn receiving(&self) -> &ReceivingStats {
        &self.receiving
    }

    pub fn defense(&self) -> &DefensiveStats {
        &self.defense
    }
}

/// The full-game stat book, keyed by [`PlayerId`].
#[derive(Clone, Debug, Default)]
pub struct StatLedger {
    by_player: HashMap<PlayerId, PlayerStats>,
}

impl StatLedger {
    pub fn new() -> StatLedger {
        StatLedger::default()
    }

    pub fn player(&self, id: PlayerId) -> Option<&PlayerStats> {
        self.by_player.get(&id)
    }

    fn entry(&mut self, id: PlayerId) -> &mut PlayerStats {
        self.by_player.entry(id).or_default()
    }

    /// Pick a credited tackler from `defenders`, drawing from the engine's
    /// random stream rather than any ambient source (spec §4.1).
    fn credit_tackle(
        &mut self,
        rng: &mut dyn RandomSource,
        defenders: &[PlayerId],
    ) -> Result<(), EngineError> {
        if defenders.is_empty() {
            return Ok(());
        }
        let index = rng.integer("stat_tackle_credit", 0, defenders.len() as i64)? as usize;
        self.entry(defenders[index]).defense.tackles += 1;
        Ok(())
    }

    /// Fold one completed play's outcome into the ledger.
    pub fn record_play(&mut self, rng: &mut dyn RandomSource, play: &Play) -> Result<(), EngineError> {
        match play {
            Play::Run(run) => {
                let carrier = self.entry(run.carrier);
                carrier.rushing.rushes += 1;
                carrier.rushing.yards += run.common.yards_gained;
                if run.common.touchdown {
                    carrier.rushing.touchdowns += 1;
                }
                if !run.common.fumbles.is_empty() {
                    carrier.rushing.fumbles += 1;
                }
                self.credit_tackle(rng, &run.common.defensive_players)?;
            }
            Play::Pass(pass) => {
                if pass.sacked {
                    let passer = self.entry(pass.passer);
                    passer.passing.yards += pass.common.yards_gained;
                    self.credit_tackle(rng, &pass.common.defensive_players)?;
                    let index = rng.integer("stat_sack_credit", 0, pass.common.defensive_players.len().max(1) as i64)? as usize;
                    if let Some(&defender) = pass.common.defensive_players.get(index) {
                        self.entry(defender).defense.sacks += 1;
                    }
                } else {
                    self.entry(pass.passer).passing.attempts += 1;
                    if let Some(interceptor) = pass.interceptor {
                        self.entry(pass.passer).passing.interceptions += 1;
                        self.entry(interceptor).defense.interceptions += 1;
                    } else {
                        for segment in &pass.segments {
                            if let PlaySegment::Pass { receiver: Some(receiver), air_yards, yards_after_catch, complete, fumble, .. } = segment {
                                let stats = self.entry(*receiver);
                                stats.receiving.targets += 1;
                                if *complete {
                                    stats.receiving.receptions += 1;
                                    stats.receiving.yards += air_yards + yards_after_catch;
                                    if pass.common.touchdown {
                                        stats.receiving.touchdowns += 1;
                                    }
                                    if *fumble {
                                        stats.receiving.fumbles += 1;
                                    }
                                }
                            }
                        }
                        let passer = self.entry(pass.passer);
                        passer.passing.completions += 1;
                        passer.passing.yards += pass.common.yards_gained;
                        if pass.common.touchdown {
                            passer.passing.touchdowns += 1;
                        }
                    }
                }
            }
            Play::Kickoff(kickoff) => {
                if let Some(returner) = kickoff.returner {
                    let stats = self.entry(returner);
                    stats.rushing.yards += kickoff.common.yards_gained;
                    if kickoff.common.touchdown {
                        stats.rushing.touchdowns += 1;
                    }
                }
            }
            Play::Punt(punt) => {
                if let Some(returner) = punt.returner {
                    let stats = self.entry(returner);
                    stats.rushing.yards += punt.common.yards_gained;
                    if punt.common.touchdown {
                        stats.rushing.touchdowns += 1;
                    }
                }
            }
            Play::FieldGoal(fg) => {
                if fg.blocked && fg.common.possession_changed {
                    self.credit_tackle(rng, &fg.common.offensive_players)?;
                }
            }
        }
        for fumble in &play.common().fumbles {
            if let Some(recovered_by) = fumble.recovered_by {
                self.entry(recovered_by).defense.fumble_recoveries += 1;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::clock::{Quarter, TimeStructure};
    use crate::game::play::{PlayCommon, RunDirection, RunPlay};
    use crate::game::{Down, Possession};
    use crate::rng::SeededSource;

    fn sample_run(yards: i32, touchdown: bool) -> Play {
        let mut common = PlayCommon::new(
            50,
            Down::First,
            Possession::Home,
            vec![PlayerId { team: Possession::Home, index: 0 }],
            vec![PlayerId { team: Possession::Away, index: 0 }, PlayerId { team: Possession::Away, index: 1 }],
        );
        common.yards_gained = yards;
        common.touchdown = touchdown;
        Play::Run(RunPlay {
            common,
            carrier: PlayerId { team: Possession::Home, index: 0 },
            direction: RunDirection::Middle,
            tackle_break: false,
            breakaway: false,
        })
    }

    #[test]
    fn run_play_credits_carrier_and_a_tackler() {
        let mut ledger = StatLedger::new();
        let mut rng = SeededSource::new(3);
        let play = sample_run(7, false);
        ledger.record_play(&mut rng, &play).unwrap();
        let carrier = PlayerId { team: Possession::Home, index: 0 };
        let stats = ledger.player(carrier).unwrap();
        assert_eq!(stats.rushing().rushes(), 1);
        assert_eq!(stats.rushing().yards(), 7);

        let total_tackles: u32 = [0_usize, 1]
            .iter()
            .filter_map(|&i| ledger.player(PlayerId { team: Possession::Away, index: i }))
            .map(|s| s.defense().tackles())
            .sum();
        assert_eq!(total_tackles, 1);
    }

    #[test]
    fn touchdown_run_credits_a_rushing_touchdown() {
        let mut ledger = StatLedger::new();
        let mut rng = SeededSource::new(1);
        let play = sample_run(15, true);
        ledger.record_play(&mut rng, &play).unwrap();
        let carrier = PlayerId { team: Possession::Home, index: 0 };
        assert_eq!(ledger.player(carrier).unwrap().rushing().touchdowns(), 1);
    }

    #[test]
    fn unused_import_guard() {
        let _ = TimeStructure::new();
        let _ = Quarter::First;
    }
}
