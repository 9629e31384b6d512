//! Coaching tendencies consulted by the decision engines (spec §4.8).

use serde::{Deserialize, Deserializer, Serialize};

/// A `CoachRaw` is a `Coach` before its properties have been validated.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Serialize, Deserialize)]
pub struct CoachRaw {
    risk_taking: u32,
    run_pass: u32,
    up_tempo: u32,
}

impl CoachRaw {
    pub fn validate(&self) -> Result<(), String> {
        if self.risk_taking > 100 {
            return Err(format!(
                "Risk taking attribute is out of range [0, 100]: {}",
                self.risk_taking
            ));
        }
        if self.run_pass > 100 {
            return Err(format!(
                "Run-pass attribute is out of range [0, 100]: {}",
                self.run_pass
            ));
        }
        if self.up_tempo > 100 {
            return Err(format!(
                "Up-tempo attribute is out of range [0, 100]: {}",
                self.up_tempo
            ));
        }
        Ok(())
    }
}

/// A coach's tendencies: risk-taking (fourth-down/onside aggressiveness),
/// run-pass balance, and up-tempo pacing. Read by the decision engines, never
/// mutated mid-game.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Serialize)]
pub struct Coach {
    risk_taking: u32,
    run_pass: u32,
    up_tempo: u32,
}

impl TryFrom<CoachRaw> for Coach {
    type Error = String;

    fn try_from(item: CoachRaw) -> Result<Self, Self::Error> {
        item.validate()?;
        Ok(Coach {
            risk_taking: item.risk_taking,
            run_pass: item.run_pass,
            up_tempo: item.up_tempo,
        })
    }
}

impl<'de> Deserialize<'de> for Coach {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = CoachRaw::deserialize(deserializer)?;
        Coach::try_from(raw).map_err(serde::de::Error::custom)
    }
}

impl Default for Coach {
    fn default() -> Self {
        Coach {
            risk_taking: 50,
            run_pass: 50,
            up_tempo: 50,
        }
    }
}

impl Coach {
    pub fn new() -> Coach {
        Coach::default()
    }

    pub fn risk_taking(&self) -> u32 {
        self.risk_taking
    }

    pub fn run_pass(&self) -> u32 {
        self.run_pass
    }

    pub fn up_tempo(&self) -> u32 {
        self.up_tempo
    }
}

/// Builder for [`Coach`].
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default)]
pub struct CoachBuilder {
    risk_taking: u32,
    run_pass: u32,
    up_tempo: u32,
}

impl CoachBuilder {
    pub fn new() -> CoachBuilder {
        CoachBuilder {
            risk_taking: 50,
            run_pass: 50,
            up_tempo: 50,
        }
    }

    pub fn risk_taking(mut self, value: u32) -> Self {
        self.risk_taking = value;
        self
    }

    pub fn run_pass(mut self, value: u32) -> Self {
        self.run_pass = value;
        self
    }

    pub fn up_tempo(mut self, value: u32) -> Self {
        self.up_tempo = value;
        self
    }

    pub fn build(self) -> Result<Coach, String> {
        Coach::try_from(CoachRaw {
            risk_taking: self.risk_taking,
            run_pass: self.run_pass,
            up_tempo: self.up_tempo,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_league_average() {
        let c = Coach::new();
        assert_eq!(c.risk_taking(), 50);
        assert_eq!(c.up_tempo(), 50);
    }

    #[test]
    fn rejects_out_of_range() {
        let result = CoachBuilder::new().risk_taking(200).build();
        assert!(result.is_err());
    }
}
