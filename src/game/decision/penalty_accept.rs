//! Penalty accept/decline decision (spec §4.8, last bullet).
//!
//! Unlike the other engines here this one is not randomized: accept/decline
//! is a deterministic comparison of outcomes, mirroring a real coordinator's
//! sideline chart rather than a coin flip.

use crate::game::play::penalty::Penalty;

#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum AcceptDecision {
    Accept,
    Decline,
}

/// What the play itself produced, independent of any penalty — enough
/// context for both accept/decline branches below.
pub struct PlayOutcomeSummary {
    pub yards_gained: i32,
    pub turnover: bool,
    pub turnover_on_downs: bool,
    pub first_down_earned: bool,
    pub touchdown_by_fouled_team: bool,
}

/// Decide whether the offense accepts a penalty called on the defense.
pub fn decide_defensive_foul(penalty: &Penalty, outcome: &PlayOutcomeSummary) -> AcceptDecision {
    if outcome.touchdown_by_fouled_team {
        return AcceptDecision::Decline;
    }
    if outcome.turnover {
        return AcceptDecision::Accept;
    }
    if !penalty.kind.suppresses_automatic_first_down() && !outcome.first_down_earned {
        return AcceptDecision::Accept;
    }
    if penalty.yards as i32 > outcome.yards_gained {
        AcceptDecision::Accept
    } else {
        AcceptDecision::Decline
    }
}

/// Decide whether the defense accepts a penalty called on the offense.
pub fn decide_offensive_foul(penalty: &Penalty, outcome: &PlayOutcomeSummary) -> AcceptDecision {
    if outcome.turnover || outcome.turnover_on_downs {
        return AcceptDecision::Decline;
    }
    if penalty.kind.is_loss_of_down() {
        return AcceptDecision::Accept;
    }
    if -outcome.yards_gained > penalty.yards as i32 {
        AcceptDecision::Decline
    } else {
        AcceptDecision::Accept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::play::penalty::PenaltyPhase;
    use crate::game::play::penalty::PenaltyKind;
    use crate::game::Possession;

    fn penalty(kind: PenaltyKind, team: Possession) -> Penalty {
        Penalty {
            kind,
            team,
            player: None,
            phase: PenaltyPhase::During,
            yards: kind.yards(),
            accepted: false,
        }
    }

    #[test]
    fn touchdown_by_fouled_team_declines_defensive_penalty() {
        let p = penalty(PenaltyKind::DefensiveHolding, Possession::Away);
        let outcome = PlayOutcomeSummary {
            yards_gained: 60,
            turnover: false,
            turnover_on_downs: false,
            first_down_earned: true,
            touchdown_by_fouled_team: true,
        };
        assert_eq!(decide_defensive_foul(&p, &outcome), AcceptDecision::Decline);
    }

    #[test]
    fn bigger_penalty_yardage_than_play_gain_is_accepted() {
        let p = penalty(PenaltyKind::DefensiveHolding, Possession::Away);
        let outcome = PlayOutcomeSummary {
            yards_gained: 2,
            turnover: false,
            turnover_on_downs: false,
            first_down_earned: true,
            touchdown_by_fouled_team: false,
        };
        assert_eq!(decide_defensive_foul(&p, &outcome), AcceptDecision::Accept);
    }

    #[test]
    fn offense_foul_declined_after_a_turnover() {
        let p = penalty(PenaltyKind::OffensiveHolding, Possession::Home);
        let outcome = PlayOutcomeSummary {
            yards_gained: -3,
            turnover: true,
            turnover_on_downs: false,
            first_down_earned: false,
            touchdown_by_fouled_team: false,
        };
        assert_eq!(decide_offensive_foul(&p, &outcome), AcceptDecision::Decline);
    }

    #[test]
    fn loss_of_down_foul_always_accepted_absent_a_turnover() {
        let p = penalty(PenaltyKind::IntentionalGrounding, Possession::Home);
        let outcome = PlayOutcomeSummary {
            yards_gained: 0,
            turnover: false,
            turnover_on_downs: false,
            first_down_earned: false,
            touchdown_by_fouled_team: false,
        };
        assert_eq!(decide_offensive_foul(&p, &outcome), AcceptDecision::Accept);
    }
}
