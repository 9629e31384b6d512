//! Penalty enforcement mechanic (spec §4.7).
//!
//! A [`Penalty`] is produced, tagged accepted/declined, by the skill checks
//! and the penalty-accept decision engine (`game::decision::penalty_accept`);
//! [`enforce`] is the pure mechanic that turns a play's raw yards plus its
//! accepted penalties into net yards, down, and yards-to-go.

use crate::game::play::PlayerId;
use crate::game::Possession;

/// When during the play a foul occurred; used only to break ties among a
/// single team's accepted penalties (Before < During < After, spec §4.7.3).
#[derive(Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Debug)]
pub enum PenaltyPhase {
    Before,
    During,
    After,
}

/// The ~50 penalty kinds the engine models. Grouped offense/defense in
/// source order; behavior (dead-ball, spot, auto-first-down, loss-of-down)
/// is queried through the methods below rather than scattered `match`
/// arms at every call site.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum PenaltyKind {
    // Offensive, dead-ball / pre-snap
    FalseStart,
    DelayOfGame,
    IllegalFormation,
    IllegalShift,
    IllegalMotion,
    IllegalSubstitutionOffense,
    // Offensive, live-ball
    OffensiveHolding,
    IllegalUseOfHands,
    IllegalBlockAboveWaist,
    ChopBlock,
    ClippingPenalty,
    IntentionalGrounding,
    IllegalForwardPass,
    IneligibleReceiverDownfield,
    OffensivePassInterference,
    IllegalTouching,
    UnnecessaryRoughnessOffense,
    UnsportsmanlikeConductOffense,
    FaceMaskOffense,
    LowBlock,
    IllegalCrackback,
    TripleTeamBlock,
    PersonalFoulOffense,
    IntentionalFumble,
    // Defensive, dead-ball / pre-snap
    DefensiveOffside,
    Encroachment,
    NeutralZoneInfraction,
    DefensiveDelayOfGame,
    IllegalSubstitutionDefense,
    Defensive12OnField,
    RunningIntoKicker,
    // Defensive, live-ball
    DefensiveHolding,
    DefensivePassInterference,
    IllegalContact,
    Roughing,
    RoughingTheKicker,
    RoughingThePasser,
    RoughingTheHolder,
    UnnecessaryRoughnessDefense,
    UnsportsmanlikeConductDefense,
    FaceMaskDefense,
    HorseCollarTackle,
    LateHit,
    LeapingPenalty,
    DefensiveOffsideOnKick,
    IllegalBlockInTheBack,
    InvalidFairCatchSignal,
    TripStripPenalty,
    PersonalFoulDefense,
    KickCatchInterference,
    ClubbingPenalty,
    Targeting,
}

impl PenaltyKind {
    /// Base per-play call probability; the decision layer around the
    /// pre-snap penalty check samples this before any modifiers.
    pub fn base_probability(self) -> f64 {
        use PenaltyKind::*;
        match self {
            FalseStart => 0.020,
            DelayOfGame => 0.004,
            IllegalFormation => 0.003,
            IllegalShift => 0.002,
            IllegalMotion => 0.003,
            IllegalSubstitutionOffense => 0.001,
            OffensiveHolding => 0.035,
            IllegalUseOfHands => 0.004,
            IllegalBlockAboveWaist => 0.003,
            ChopBlock => 0.001,
            ClippingPenalty => 0.001,
            IntentionalGrounding => 0.003,
            IllegalForwardPass => 0.001,
            IneligibleReceiverDownfield => 0.002,
            OffensivePassInterference => 0.004,
            IllegalTouching => 0.001,
            UnnecessaryRoughnessOffense => 0.002,
            UnsportsmanlikeConductOffense => 0.002,
            FaceMaskOffense => 0.002,
            LowBlock => 0.001,
            IllegalCrackback => 0.001,
            TripleTeamBlock => 0.0005,
            PersonalFoulOffense => 0.002,
            IntentionalFumble => 0.0005,
            DefensiveOffside => 0.010,
            Encroachment => 0.006,
            NeutralZoneInfraction => 0.004,
            DefensiveDelayOfGame => 0.001,
            IllegalSubstitutionDefense => 0.001,
            Defensive12OnField => 0.002,
            RunningIntoKicker => 0.001,
            DefensiveHolding => 0.010,
            DefensivePassInterference => 0.012,
            IllegalContact => 0.006,
            Roughing => 0.002,
            RoughingTheKicker => 0.001,
            RoughingThePasser => 0.006,
            RoughingTheHolder => 0.0005,
            UnnecessaryRoughnessDefense => 0.003,
            UnsportsmanlikeConductDefense => 0.002,
            FaceMaskDefense => 0.003,
            HorseCollarTackle => 0.001,
            LateHit => 0.002,
            LeapingPenalty => 0.0005,
            DefensiveOffsideOnKick => 0.001,
            IllegalBlockInTheBack => 0.002,
            InvalidFairCatchSignal => 0.0005,
            TripStripPenalty => 0.0005,
            PersonalFoulDefense => 0.002,
            KickCatchInterference => 0.001,
            ClubbingPenalty => 0.0005,
            Targeting => 0.0008,
        }
    }

    /// Default enforcement yardage for this kind (before the half-distance
    /// rule is applied).
    pub fn yards(self) -> u32 {
        use PenaltyKind::*;
        match self {
            FalseStart | DelayOfGame | IllegalFormation | IllegalShift | IllegalMotion
            | IllegalSubstitutionOffense | DefensiveOffside | Encroachment
            | NeutralZoneInfraction | DefensiveDelayOfGame | IllegalSubstitutionDefense
            | Defensive12OnField | RunningIntoKicker | IllegalTouching
            | InvalidFairCatchSignal | TripStripPenalty => 5,
            OffensiveHolding | IllegalUseOfHands | IntentionalGrounding
            | IneligibleReceiverDownfield | OffensivePassInterference | DefensiveHolding
            | DefensivePassInterference | IllegalContact | DefensiveOffsideOnKick
            | IllegalBlockInTheBack | KickCatchInterference => 10,
            IllegalBlockAboveWaist | ChopBlock | ClippingPenalty | UnnecessaryRoughnessOffense
            | UnsportsmanlikeConductOffense | FaceMaskOffense | LowBlock | IllegalCrackback
            | TripleTeamBlock | PersonalFoulOffense | Roughing | RoughingTheKicker
            | RoughingThePasser | RoughingTheHolder | UnnecessaryRoughnessDefense
            | UnsportsmanlikeConductDefense | FaceMaskDefense | HorseCollarTackle | LateHit
            | LeapingPenalty | PersonalFoulDefense | ClubbingPenalty | Targeting => 15,
            IllegalForwardPass | IntentionalFumble => 5,
        }
    }

    /// Dead-ball fouls suppress the play entirely (spec §4.7.7).
    pub fn is_dead_ball(self) -> bool {
        matches!(
            self,
            PenaltyKind::FalseStart
                | PenaltyKind::Encroachment
                | PenaltyKind::DelayOfGame
                | PenaltyKind::DefensiveDelayOfGame
                | PenaltyKind::Defensive12OnField
                | PenaltyKind::IllegalSubstitutionOffense
                | PenaltyKind::IllegalSubstitutionDefense
        )
    }

    /// Spot fouls are enforced at the foul location, replacing the play's
    /// yardage (spec §4.7.5). Only defensive pass interference is modeled
    /// as a spot foul.
    pub fn is_spot_foul(self) -> bool {
        matches!(self, PenaltyKind::DefensivePassInterference)
    }

    /// Is this penalty in the closed defensive set that does *not* grant an
    /// automatic first down (spec §4.7.6)?
    pub fn suppresses_automatic_first_down(self) -> bool {
        matches!(
            self,
            PenaltyKind::DefensiveOffside
                | PenaltyKind::Encroachment
                | PenaltyKind::NeutralZoneInfraction
                | PenaltyKind::DefensiveDelayOfGame
                | PenaltyKind::IllegalSubstitutionDefense
                | PenaltyKind::Defensive12OnField
                | PenaltyKind::RunningIntoKicker
        )
    }

    /// Offensive penalties that impose loss of down instead of (or with)
    /// yardage (spec §4.7.6).
    pub fn is_loss_of_down(self) -> bool {
        matches!(self, PenaltyKind::IntentionalGrounding | PenaltyKind::IllegalForwardPass)
    }

    /// `true` for kinds that are by construction only ever called on the
    /// defense; used by the pre-snap check to filter candidate kinds by
    /// the team under consideration.
    pub fn is_defensive(self) -> bool {
        use PenaltyKind::*;
        matches!(
            self,
            DefensiveOffside
                | Encroachment
                | NeutralZoneInfraction
                | DefensiveDelayOfGame
                | IllegalSubstitutionDefense
                | Defensive12OnField
                | RunningIntoKicker
                | DefensiveHolding
                | DefensivePassInterference
                | IllegalContact
                | Roughing
                | RoughingTheKicker
                | RoughingThePasser
                | RoughingTheHolder
                | UnnecessaryRoughnessDefense
                | UnsportsmanlikeConductDefense
                | FaceMaskDefense
                | HorseCollarTackle
                | LateHit
                | LeapingPenalty
                | DefensiveOffsideOnKick
                | IllegalBlockInTheBack
                | InvalidFairCatchSignal
                | TripStripPenalty
                | PersonalFoulDefense
                | KickCatchInterference
                | ClubbingPenalty
                | Targeting
        )
    }
}

/// A single penalty instance (spec §3 "Penalty").
#[derive(Clone, Debug)]
pub struct Penalty {
    pub kind: PenaltyKind,
    /// The team the penalty is called on.
    pub team: Possession,
    pub player: Option<PlayerId>,
    pub phase: PenaltyPhase,
    pub yards: u32,
    pub accepted: bool,
}

/// Outcome of applying §4.7's algorithm to a play's accepted penalties.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnforcementResult {
    pub net_yards: i32,
    pub automatic_first_down: bool,
    pub loss_of_down: bool,
    pub offsetting: bool,
    pub replay_down: bool,
    pub dead_ball: bool,
}

/// Apply the penalty enforcement algorithm (spec §4.7) for `offense`'s
/// possession. `raw_yards` is what the play would have gained with no
/// penalty; `field_position` is the offense-relative spot *before* the
/// play (used for the half-distance rule).
pub fn enforce(
    penalties: &[Penalty],
    offense: Possession,
    raw_yards: i32,
    field_position: u32,
) -> EnforcementResult {
    let accepted: Vec<&Penalty> = penalties.iter().filter(|p| p.accepted).collect();
    let defense = offense.opponent();

    let offense_fouls: Vec<&&Penalty> = accepted.iter().filter(|p| p.team == offense).collect();
    let defense_fouls: Vec<&&Penalty> = accepted.iter().filter(|p| p.team == defense).collect();

    if accepted.iter().any(|p| p.kind.is_dead_ball()) {
        return EnforcementResult {
            net_yards: 0,
            automatic_first_down: false,
            loss_of_down: false,
            offsetting: false,
            replay_down: true,
            dead_ball: true,
        };
    }

    if !offense_fouls.is_empty() && !defense_fouls.is_empty() {
        let major_offense_no_turnover = offense_fouls
            .iter()
            .any(|p| p.yards >= 15 && !matches!(p.kind, PenaltyKind::IntentionalFumble));
        let only_minor_defense = defense_fouls.iter().all(|p| p.yards <= 5);

        if major_offense_no_turnover && only_minor_defense {
            let worst = select_worst(&offense_fouls);
            return apply_single(worst, offense, field_position);
        }

        return EnforcementResult {
            net_yards: 0,
            automatic_first_down: false,
            loss_of_down: false,
            offsetting: true,
            replay_down: true,
            dead_ball: false,
        };
    }

    if !offense_fouls.is_empty() {
        let worst = select_worst(&offense_fouls);
        return apply_single(worst, offense, field_position);
    }

    if !defense_fouls.is_empty() {
        let worst = select_worst(&defense_fouls);
        return apply_single(worst, offense, field_position);
    }

    EnforcementResult {
        net_yards: raw_yards,
        automatic_first_down: false,
        loss_of_down: false,
        offsetting: false,
        replay_down: false,
        dead_ball: false,
    }
}

fn select_worst<'a>(fouls: &[&&'a Penalty]) -> &'a Penalty {
    fouls
        .iter()
        .copied()
        .copied()
        .max_by(|a, b| a.yards.cmp(&b.yards).then(a.phase.cmp(&b.phase)))
        .expect("select_worst called with an empty slice")
}

fn apply_single(penalty: &Penalty, offense: Possession, field_position: u32) -> EnforcementResult {
    let is_offense_foul = penalty.team == offense;
    let cap = if is_offense_foul {
        field_position / 2
    } else {
        (100 - field_position) / 2
    };
    let applied = penalty.yards.min(cap);

    let net_yards = if is_offense_foul {
        -(applied as i32)
    } else {
        applied as i32
    };

    EnforcementResult {
        net_yards,
        automatic_first_down: !is_offense_foul && !penalty.kind.suppresses_automatic_first_down(),
        loss_of_down: is_offense_foul && penalty.kind.is_loss_of_down(),
        offsetting: false,
        replay_down: false,
        dead_ball: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn penalty(kind: PenaltyKind, team: Possession, phase: PenaltyPhase) -> Penalty {
        Penalty {
            kind,
            team,
            player: None,
            phase,
            yards: kind.yards(),
            accepted: true,
        }
    }

    #[test]
    fn offsetting_exception_enforces_major_offensive_foul_alone() {
        let penalties = vec![
            penalty(PenaltyKind::IllegalBlockAboveWaist, Possession::Home, PenaltyPhase::During),
            penalty(PenaltyKind::DefensiveOffside, Possession::Away, PenaltyPhase::Before),
        ];
        let result = enforce(&penalties, Possession::Home, 6, 50);
        assert_eq!(result.net_yards, -15);
        assert!(!result.offsetting);
        assert!(!result.replay_down);
    }

    #[test]
    fn symmetric_fouls_offset() {
        let penalties = vec![
            penalty(PenaltyKind::OffensiveHolding, Possession::Home, PenaltyPhase::During),
            penalty(PenaltyKind::DefensiveHolding, Possession::Away, PenaltyPhase::During),
        ];
        let result = enforce(&penalties, Possession::Home, 6, 50);
        assert!(result.offsetting);
        assert!(result.replay_down);
        assert_eq!(result.net_yards, 0);
    }

    #[test]
    fn half_distance_rule_caps_yardage() {
        let penalties = vec![penalty(PenaltyKind::DefensiveHolding, Possession::Away, PenaltyPhase::During)];
        let result = enforce(&penalties, Possession::Home, 2, 6);
        // cap = floor((100-6)/2) = 47, so full 10 yards applies
        assert_eq!(result.net_yards, 10);

        let result_close = enforce(&penalties, Possession::Home, 2, 96);
        // cap = floor((100-96)/2) = 2
        assert_eq!(result_close.net_yards, 2);
    }

    #[test]
    fn dead_ball_fouls_suppress_the_play() {
        let penalties = vec![penalty(PenaltyKind::FalseStart, Possession::Home, PenaltyPhase::Before)];
        let result = enforce(&penalties, Possession::Home, 6, 50);
        assert!(result.dead_ball);
        assert_eq!(result.net_yards, 0);
    }

    #[test]
    fn defensive_foul_not_in_closed_set_grants_automatic_first_down() {
        let penalties = vec![penalty(PenaltyKind::DefensiveHolding, Possession::Away, PenaltyPhase::During)];
        let result = enforce(&penalties, Possession::Home, 2, 50);
        assert!(result.automatic_first_down);
    }

    #[test]
    fn closed_set_defensive_foul_does_not_grant_automatic_first_down() {
        let penalties = vec![penalty(PenaltyKind::DefensiveOffside, Possession::Away, PenaltyPhase::Before)];
        let result = enforce(&penalties, Possession::Home, 2, 50);
        assert!(!result.automatic_first_down);
    }
}
