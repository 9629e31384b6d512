//! Polymorphic play records (spec §3 "Play", "PlaySegment"; §9 "Polymorphic
//! Plays": a tagged variant rather than an inheritance hierarchy, common
//! fields in the outer record, per-variant data in the tag payload).

pub mod checks;
pub mod executors;
pub mod penalty;

use crate::game::{Down, Possession};
use penalty::Penalty;

/// Identifies a player without borrowing from the `Team`/`Roster` that owns
/// them — `Game` outlives any single `Team` reference passed into
/// `simulate_game`, so plays address players by (team, roster index)
/// instead of holding a `&Player`. See DESIGN.md "Open Questions".
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub struct PlayerId {
    pub team: Possession,
    pub index: usize,
}

/// The five run-direction buckets a run play enumerates over (spec §4.6
/// run-play step 2).
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum RunDirection {
    Left,
    LeftGuard,
    Middle,
    RightGuard,
    Right,
}

impl RunDirection {
    /// Map a `[0, 5)` integer draw to a bucket.
    pub fn from_index(index: i64) -> RunDirection {
        match index {
            0 => RunDirection::Left,
            1 => RunDirection::LeftGuard,
            2 => RunDirection::Middle,
            3 => RunDirection::RightGuard,
            _ => RunDirection::Right,
        }
    }
}

/// A fumble and its resolution.
#[derive(Clone, Debug)]
pub struct FumbleRecord {
    pub carrier: PlayerId,
    pub recovered_by: Option<PlayerId>,
    pub recovery_team: Possession,
    pub out_of_bounds: bool,
    pub return_yards: i32,
}

/// An injury sustained during a play.
#[derive(Clone, Debug)]
pub struct InjuryRecord {
    pub player: PlayerId,
    pub severe: bool,
}

/// A subdivision of a play where the ball changes hands during continuation
/// — laterals, fumbles, returns (spec §3 "PlaySegment").
#[derive(Clone, Debug)]
pub enum PlaySegment {
    Run {
        carrier: PlayerId,
        yards: i32,
        fumble: bool,
        out_of_bounds: bool,
    },
    Pass {
        passer: PlayerId,
        receiver: Option<PlayerId>,
        air_yards: i32,
        yards_after_catch: i32,
        complete: bool,
        fumble: bool,
        out_of_bounds: bool,
    },
    Return {
        returner: PlayerId,
        yards: i32,
        fumble: bool,
        recoverer: Option<PlayerId>,
        out_of_bounds: bool,
    },
}

/// Fields common to every play variant (spec §3 "Play").
#[derive(Clone, Debug)]
pub struct PlayCommon {
    pub start_field_position: u32,
    pub end_field_position: u32,
    pub yards_gained: i32,
    pub down: Down,
    pub possession_at_snap: Possession,
    pub possession_changed: bool,
    pub interception: bool,
    pub elapsed_seconds: u32,
    pub penalties: Vec<Penalty>,
    pub fumbles: Vec<FumbleRecord>,
    pub injuries: Vec<InjuryRecord>,
    pub first_down: bool,
    pub touchdown: bool,
    pub safety: bool,
    pub offensive_players: Vec<PlayerId>,
    pub defensive_players: Vec<PlayerId>,
    pub clock_stopped: bool,
    pub quarter_expired: bool,
    pub half_expired: bool,
    pub game_expired: bool,
}

impl PlayCommon {
    pub fn new(
        start_field_position: u32,
        down: Down,
        possession_at_snap: Possession,
        offensive_players: Vec<PlayerId>,
        defensive_players: Vec<PlayerId>,
    ) -> PlayCommon {
        PlayCommon {
            start_field_position,
            end_field_position: start_field_position,
            yards_gained: 0,
            down,
            possession_at_snap,
            possession_changed: false,
            interception: false,
            elapsed_seconds: 0,
            penalties: Vec::new(),
            fumbles: Vec::new(),
            injuries: Vec::new(),
            first_down: false,
            touchdown: false,
            safety: false,
            offensive_players,
            defensive_players,
            clock_stopped: false,
            quarter_expired: false,
            half_expired: false,
            game_expired: false,
        }
    }
}

/// A run play and its outcome.
#[derive(Clone, Debug)]
pub struct RunPlay {
    pub common: PlayCommon,
    pub carrier: PlayerId,
    pub direction: RunDirection,
    pub tackle_break: bool,
    pub breakaway: bool,
}

/// A pass play and its outcome.
#[derive(Clone, Debug)]
pub struct PassPlay {
    pub common: PlayCommon,
    pub passer: PlayerId,
    pub segments: Vec<PlaySegment>,
    pub sacked: bool,
    pub interceptor: Option<PlayerId>,
}

/// A kickoff and its outcome.
#[derive(Clone, Debug)]
pub struct KickoffPlay {
    pub common: PlayCommon,
    pub kicker: PlayerId,
    pub onside: bool,
    pub onside_recovered_by_kicking_team: bool,
    pub touchback: bool,
    pub returner: Option<PlayerId>,
}

/// A punt and its outcome.
#[derive(Clone, Debug)]
pub struct PuntPlay {
    pub common: PlayCommon,
    pub punter: PlayerId,
    pub blocked: bool,
    pub fair_catch: bool,
    pub hang_time: f64,
    pub returner: Option<PlayerId>,
}

/// A field goal attempt and its outcome.
#[derive(Clone, Debug)]
pub struct FieldGoalPlay {
    pub common: PlayCommon,
    pub kicker: PlayerId,
    pub distance: u32,
    pub made: bool,
    pub blocked: bool,
}

/// A tagged variant over the five play types the engine resolves (spec §3
/// "Play"). Common fields are reached uniformly via [`Play::common`].
#[derive(Clone, Debug)]
pub enum Play {
    Run(RunPlay),
    Pass(PassPlay),
    Kickoff(KickoffPlay),
    Punt(PuntPlay),
    FieldGoal(FieldGoalPlay),
}

impl Play {
    pub fn common(&self) -> &PlayCommon {
        match self {
            Play::Run(p) => &p.common,
            Play::Pass(p) => &p.common,
            Play::Kickoff(p) => &p.common,
            Play::Punt(p) => &p.common,
            Play::FieldGoal(p) => &p.common,
        }
    }

    pub fn common_mut(&mut self) -> &mut PlayCommon {
        match self {
            Play::Run(p) => &mut p.common,
            Play::Pass(p) => &mut p.common,
            Play::Kickoff(p) => &mut p.common,
            Play::Punt(p) => &mut p.common,
            Play::FieldGoal(p) => &mut p.common,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_direction_maps_five_buckets() {
        assert_eq!(RunDirection::from_index(0), RunDirection::Left);
        assert_eq!(RunDirection::from_index(4), RunDirection::Right);
    }

    #[test]
    fn common_accessor_dispatches_by_variant() {
        let common = PlayCommon::new(25, Down::First, Possession::Home, Vec::new(), Vec::new());
        let play = Play::Run(RunPlay {
            common,
            carrier: PlayerId { team: Possession::Home, index: 0 },
            direction: RunDirection::Middle,
            tackle_break: false,
            breakaway: false,
        });
        assert_eq!(play.common().start_field_position, 25);
    }
}
