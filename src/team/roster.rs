//! Roster and depth charts (spec §3 "Team").
//!
//! A [`Roster`] is a flat player list; a [`DepthChart`] orders player indices
//! by position for a particular unit. Eight units are modeled — offense,
//! defense, and the kicking/receiving side of each of kickoff, punt, and
//! field goal — see DESIGN.md "Open Questions" for why eight rather than the
//! six named explicitly in the source text.

use crate::attributes::{Player, Position};

/// Which of the eight depth charts a lookup is for.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub enum DepthChartUnit {
    Offense,
    Defense,
    KickoffCoverage,
    KickoffReturn,
    PuntCoverage,
    PuntReturn,
    FieldGoal,
    FieldGoalBlock,
}

/// An ordered assignment of roster indices to positions for one unit.
/// Index 0 at a position is the starter; later indices are backups.
#[derive(Clone, Debug, Default)]
pub struct DepthChart {
    entries: Vec<(Position, usize)>,
}

impl DepthChart {
    pub fn new() -> DepthChart {
        DepthChart::default()
    }

    /// Append a roster index to the bottom of a position's depth list.
    pub fn assign(&mut self, position: Position, roster_index: usize) {
        self.entries.push((position, roster_index));
    }

    /// Roster indices at `position`, in depth order (starter first).
    pub fn at(&self, position: Position) -> Vec<usize> {
        self.entries
            .iter()
            .filter(|(p, _)| *p == position)
            .map(|(_, idx)| *idx)
            .collect()
    }

    /// The starter at `position`, if the unit carries one.
    pub fn starter(&self, position: Position) -> Option<usize> {
        self.at(position).first().copied()
    }

    /// All roster indices on this unit's depth chart, across positions.
    pub fn all(&self) -> Vec<usize> {
        self.entries.iter().map(|(_, idx)| *idx).collect()
    }
}

/// A team's player pool: flat player list plus the eight depth charts that
/// select which players are on the field for a given unit.
#[derive(Clone, Debug, Default)]
pub struct Roster {
    players: Vec<Player>,
    offense: DepthChart,
    defense: DepthChart,
    kickoff_coverage: DepthChart,
    kickoff_return: DepthChart,
    punt_coverage: DepthChart,
    punt_return: DepthChart,
    field_goal: DepthChart,
    field_goal_block: DepthChart,
    staff: Vec<String>,
}

impl Roster {
    pub fn new() -> Roster {
        Roster::default()
    }

    pub fn add_player(&mut self, player: Player) -> usize {
        self.players.push(player);
        self.players.len() - 1
    }

    pub fn player(&self, index: usize) -> Option<&Player> {
        self.players.get(index)
    }

    pub fn player_mut(&mut self, index: usize) -> Option<&mut Player> {
        self.players.get_mut(index)
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn staff(&self) -> &[String] {
        &self.staff
    }

    pub fn add_staff(&mut self, name: &str) {
        self.staff.push(String::from(name));
    }

    pub fn depth_chart(&self, unit: DepthChartUnit) -> &DepthChart {
        match unit {
            DepthChartUnit::Offense => &self.offense,
            DepthChartUnit::Defense => &self.defense,
            DepthChartUnit::KickoffCoverage => &self.kickoff_coverage,
            DepthChartUnit::KickoffReturn => &self.kickoff_return,
            DepthChartUnit::PuntCoverage => &self.punt_coverage,
            DepthChartUnit::PuntReturn => &self.punt_return,
            DepthChartUnit::FieldGoal => &self.field_goal,
            DepthChartUnit::FieldGoalBlock => &self.field_goal_block,
        }
    }

    pub fn depth_chart_mut(&mut self, unit: DepthChartUnit) -> &mut DepthChart {
        match unit {
            DepthChartUnit::Offense => &mut self.offense,
            DepthChartUnit::Defense => &mut self.defense,
            DepthChartUnit::KickoffCoverage => &mut self.kickoff_coverage,
            DepthChartUnit::KickoffReturn => &mut self.kickoff_return,
            DepthChartUnit::PuntCoverage => &mut self.punt_coverage,
            DepthChartUnit::PuntReturn => &mut self.punt_return,
            DepthChartUnit::FieldGoal => &mut self.field_goal,
            DepthChartUnit::FieldGoalBlock => &mut self.field_goal_block,
        }
    }

    /// Active players assigned to `unit`, in depth-chart order, excluding
    /// anyone currently out with a severe injury.
    pub fn lineup(&self, unit: DepthChartUnit) -> Vec<&Player> {
        self.depth_chart(unit)
            .all()
            .into_iter()
            .filter_map(|idx| self.players.get(idx))
            .filter(|p| p.is_active())
            .collect()
    }

    /// The first active player at `position` on `unit`'s depth chart.
    pub fn starter(&self, unit: DepthChartUnit, position: Position) -> Option<&Player> {
        self.depth_chart(unit)
            .at(position)
            .into_iter()
            .filter_map(|idx| self.players.get(idx))
            .find(|p| p.is_active())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lineup_excludes_injured_players() {
        let mut roster = Roster::new();
        let mut hurt = Player::new("Hurt Guy", Position::Rb);
        hurt.set_injury(Some(crate::attributes::Injury {
            description: String::from("ACL tear"),
            severe: true,
        }));
        let idx = roster.add_player(hurt);
        roster.depth_chart_mut(DepthChartUnit::Offense).assign(Position::Rb, idx);

        let healthy = roster.add_player(Player::new("Healthy Guy", Position::Rb));
        roster.depth_chart_mut(DepthChartUnit::Offense).assign(Position::Rb, healthy);

        let lineup = roster.lineup(DepthChartUnit::Offense);
        assert_eq!(lineup.len(), 1);
        assert_eq!(lineup[0].name(), "Healthy Guy");
    }

    #[test]
    fn starter_is_first_active_at_position() {
        let mut roster = Roster::new();
        let qb1 = roster.add_player(Player::new("QB1", Position::Qb));
        let qb2 = roster.add_player(Player::new("QB2", Position::Qb));
        roster.depth_chart_mut(DepthChartUnit::Offense).assign(Position::Qb, qb1);
        roster.depth_chart_mut(DepthChartUnit::Offense).assign(Position::Qb, qb2);

        assert_eq!(
            roster.starter(DepthChartUnit::Offense, Position::Qb).unwrap().name(),
            "QB1"
        );
    }
}
