//! Players and their attributes (spec §3 "Player").
//!
//! Mirrors the teacher's `FootballTeamOffense`/`FootballTeamCoach`
//! raw/validated/builder triad: each attribute group is a flat `u32` bag in
//! `[0, 100]`, validated on construction, with a builder for ergonomic
//! test/fixture setup.

pub mod modifier;

use serde::{Deserialize, Deserializer, Serialize};

/// Offensive/defensive/special-teams position, used to select eligible
/// players for power calculators (spec §4.4) and depth charts.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Serialize, Deserialize)]
pub enum Position {
    Qb,
    Rb,
    Fb,
    Wr,
    Te,
    C,
    G,
    T,
    Dt,
    De,
    Lb,
    Olb,
    Cb,
    S,
    Fs,
    K,
    P,
    Ls,
}

macro_rules! attribute_group {
    (
        $(#[$meta:meta])*
        $name:ident, $raw:ident, $builder:ident { $($field:ident),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Serialize, Deserialize)]
        pub struct $raw {
            $(pub $field: u32),+
        }

        impl $raw {
            pub fn validate(&self) -> Result<(), String> {
                $(
                    if self.$field > 100 {
                        return Err(format!(
                            "{} attribute is out of range [0, 100]: {}",
                            stringify!($field), self.$field
                        ));
                    }
                )+
                Ok(())
            }
        }

        $(#[$meta])*
        #[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Serialize)]
        pub struct $name {
            $($field: u32),+
        }

        impl TryFrom<$raw> for $name {
            type Error = String;

            fn try_from(item: $raw) -> Result<Self, Self::Error> {
                item.validate()?;
                Ok($name { $($field: item.$field),+ })
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let raw = $raw::deserialize(deserializer)?;
                $name::try_from(raw).map_err(serde::de::Error::custom)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name { $($field: 50_u32),+ }
            }
        }

        impl $name {
            /// Construct with every field defaulted to league-average (50).
            pub fn new() -> $name {
                $name::default()
            }

            /// Construct with every field set to the same overall value.
            pub fn from_overall(overall: u32) -> Result<$name, String> {
                $name::try_from($raw { $($field: overall),+ })
            }

            $(
                pub fn $field(&self) -> u32 {
                    self.$field
                }
            )+
        }

        #[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default)]
        pub struct $builder {
            $($field: u32),+
        }

        impl $builder {
            pub fn new() -> $builder {
                $builder { $($field: 50_u32),+ }
            }

            $(
                pub fn $field(mut self, value: u32) -> Self {
                    self.$field = value;
                    self
                }
            )+

            pub fn build(self) -> Result<$name, String> {
                $name::try_from($raw { $($field: self.$field),+ })
            }
        }
    };
}

attribute_group!(
    /// Physical traits shared by every player.
    PhysicalAttributes, PhysicalAttributesRaw, PhysicalAttributesBuilder {
        speed, strength, agility, awareness, fragility
    }
);

attribute_group!(
    /// Football-skill traits shared by every player; not every skill is
    /// relevant to every position (e.g. a lineman's `kicking` is inert).
    SkillAttributes, SkillAttributesRaw, SkillAttributesBuilder {
        passing, catching, rushing, blocking, tackling, coverage, kicking
    }
);

attribute_group!(
    /// Mental/intangible traits.
    MentalAttributes, MentalAttributesRaw, MentalAttributesBuilder {
        discipline, morale
    }
);

/// An in-game injury sustained by a player.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Serialize, Deserialize)]
pub struct Injury {
    pub description: String,
    /// Whether the player must leave the current play's remainder / game.
    pub severe: bool,
}

/// Per-game counters a player accrues; referenced by play outcomes (spec
/// §3 "per-game stat counters"), not derived/aggregated stats like DVOA.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Serialize, Deserialize)]
pub struct PlayerStatLine {
    pub rush_attempts: u32,
    pub rush_yards: i32,
    pub pass_attempts: u32,
    pub pass_completions: u32,
    pub pass_yards: i32,
    pub pass_touchdowns: u32,
    pub interceptions_thrown: u32,
    pub receptions: u32,
    pub receiving_yards: i32,
    pub tackles: u32,
    pub sacks: u32,
    pub interceptions: u32,
    pub fumbles: u32,
    pub fumbles_forced: u32,
    pub fumbles_recovered: u32,
    pub penalties: u32,
    pub touchdowns: u32,
}

/// A football player: physical/skill/mental attributes plus current
/// injury status and this game's counters (spec §3 "Player").
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct Player {
    name: String,
    position: Position,
    physical: PhysicalAttributes,
    skill: SkillAttributes,
    mental: MentalAttributes,
    injury: Option<Injury>,
    #[serde(default)]
    stats: PlayerStatLine,
}

impl Player {
    /// Construct a league-average player at the given position.
    pub fn new(name: &str, position: Position) -> Player {
        Player {
            name: String::from(name),
            position,
            physical: PhysicalAttributes::new(),
            skill: SkillAttributes::new(),
            mental: MentalAttributes::new(),
            injury: None,
            stats: PlayerStatLine::default(),
        }
    }

    /// Construct with explicit attribute groups.
    pub fn from_attributes(
        name: &str,
        position: Position,
        physical: PhysicalAttributes,
        skill: SkillAttributes,
        mental: MentalAttributes,
    ) -> Player {
        Player {
            name: String::from(name),
            position,
            physical,
            skill,
            mental,
            injury: None,
            stats: PlayerStatLine::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn physical(&self) -> &PhysicalAttributes {
        &self.physical
    }

    pub fn skill(&self) -> &SkillAttributes {
        &self.skill
    }

    pub fn mental(&self) -> &MentalAttributes {
        &self.mental
    }

    pub fn injury(&self) -> Option<&Injury> {
        self.injury.as_ref()
    }

    pub fn set_injury(&mut self, injury: Option<Injury>) {
        self.injury = injury;
    }

    pub fn is_active(&self) -> bool {
        !self.injury.as_ref().map(|i| i.severe).unwrap_or(false)
    }

    pub fn stats(&self) -> &PlayerStatLine {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut PlayerStatLine {
        &mut self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overall_rejects_out_of_range() {
        let result = PhysicalAttributes::from_overall(150);
        assert!(result.is_err());
    }

    #[test]
    fn defaults_to_league_average() {
        let p = PhysicalAttributes::new();
        assert_eq!(p.speed(), 50);
        assert_eq!(p.fragility(), 50);
    }

    #[test]
    fn builder_sets_fields() {
        let skill = SkillAttributesBuilder::new().passing(90).blocking(20).build().unwrap();
        assert_eq!(skill.passing(), 90);
        assert_eq!(skill.blocking(), 20);
        assert_eq!(skill.catching(), 50);
    }

    #[test]
    fn player_defaults_are_active() {
        let p = Player::new("Test Player", Position::Qb);
        assert!(p.is_active());
        assert_eq!(p.stats().rush_attempts, 0);
    }
}
