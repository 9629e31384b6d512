//! Teams: roster, depth charts, and coaching tendencies (spec §3 "Team").

pub mod coach;
pub mod roster;

use coach::Coach;
use roster::Roster;

pub const DEFAULT_TEAM_NAME: &str = "Null Island Defaults";
pub const DEFAULT_TEAM_SHORT_NAME: &str = "NULL";

/// A football team: name, coaching tendencies, and the roster/depth-chart
/// pool the play executors and power calculators read from. Construction and
/// depth-chart building are deliberately thin here — the interesting logic
/// lives downstream in `game::*`.
#[derive(Clone, Debug)]
pub struct Team {
    name: String,
    short_name: String,
    coach: Coach,
    roster: Roster,
}

impl Team {
    /// A team with no players and a league-average coach, named
    /// [`DEFAULT_TEAM_NAME`].
    pub fn new() -> Team {
        Team {
            name: String::from(DEFAULT_TEAM_NAME),
            short_name: String::from(DEFAULT_TEAM_SHORT_NAME),
            coach: Coach::new(),
            roster: Roster::new(),
        }
    }

    pub fn from_parts(name: &str, short_name: &str, coach: Coach, roster: Roster) -> Team {
        Team {
            name: String::from(name),
            short_name: String::from(short_name),
            coach,
            roster,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    pub fn coach(&self) -> &Coach {
        &self.coach
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn roster_mut(&mut self) -> &mut Roster {
        &mut self.roster
    }
}

impl Default for Team {
    fn default() -> Self {
        Team::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_team_has_defaults() {
        let team = Team::new();
        assert_eq!(team.name(), DEFAULT_TEAM_NAME);
        assert_eq!(team.coach().risk_taking(), 50);
        assert!(team.roster().players().is_empty());
    }
}
