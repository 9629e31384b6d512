//! Process-wide-immutable simulation configuration (spec §5).
//!
//! A [`Configuration`] bundles the rule-provider selection and the handful
//! of tunable probabilities the decision engines don't hardcode themselves.
//! It is built once, then threaded by value into [`crate::sim::simulate_game`]
//! and [`crate::game::flow::Flow::new`] — never read from a runtime-mutable
//! global, mirroring the teacher's builder-pattern construction idiom
//! (`team/coach.rs`'s `CoachBuilder`).

/// Tunable knobs plus rule-provider selection for one simulation run.
#[derive(Clone, Debug, PartialEq)]
pub struct Configuration {
    overtime_rules: String,
    two_minute_warning_rules: String,
    end_of_half_rules: String,
    onside_kick_attempt_probability: f64,
    starting_timeouts: u32,
}

impl Configuration {
    pub fn builder() -> ConfigurationBuilder {
        ConfigurationBuilder::default()
    }

    pub fn overtime_rules(&self) -> &str {
        &self.overtime_rules
    }

    pub fn two_minute_warning_rules(&self) -> &str {
        &self.two_minute_warning_rules
    }

    pub fn end_of_half_rules(&self) -> &str {
        &self.end_of_half_rules
    }

    pub fn onside_kick_attempt_probability(&self) -> f64 {
        self.onside_kick_attempt_probability
    }

    pub fn starting_timeouts(&self) -> u32 {
        self.starting_timeouts
    }
}

impl Default for Configuration {
    fn default() -> Configuration {
        Configuration {
            overtime_rules: String::from("nfl-regular"),
            two_minute_warning_rules: String::from("nfl"),
            end_of_half_rules: String::from("nfl"),
            onside_kick_attempt_probability: 0.80,
            starting_timeouts: 3,
        }
    }
}

/// Builds a [`Configuration`], defaulting every field to the NFL regular
/// season rule set until overridden.
#[derive(Clone, Debug)]
pub struct ConfigurationBuilder {
    inner: Configuration,
}

impl Default for ConfigurationBuilder {
    fn default() -> ConfigurationBuilder {
        ConfigurationBuilder { inner: Configuration::default() }
    }
}

impl ConfigurationBuilder {
    pub fn overtime_rules(mut self, name: impl Into<String>) -> ConfigurationBuilder {
        self.inner.overtime_rules = name.into();
        self
    }

    pub fn two_minute_warning_rules(mut self, name: impl Into<String>) -> ConfigurationBuilder {
        self.inner.two_minute_warning_rules = name.into();
        self
    }

    pub fn end_of_half_rules(mut self, name: impl Into<String>) -> ConfigurationBuilder {
        self.inner.end_of_half_rules = name.into();
        self
    }

    pub fn onside_kick_attempt_probability(mut self, p: f64) -> ConfigurationBuilder {
        self.inner.onside_kick_attempt_probability = p.clamp(0.0, 1.0);
        self
    }

    pub fn starting_timeouts(mut self, count: u32) -> ConfigurationBuilder {
        self.inner.starting_timeouts = count;
        self
    }

    pub fn build(self) -> Configuration {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_configuration_selects_nfl_rule_sets() {
        let config = Configuration::default();
        assert_eq!(config.overtime_rules(), "nfl-regular");
        assert_eq!(config.two_minute_warning_rules(), "nfl");
        assert_eq!(config.end_of_half_rules(), "nfl");
    }

    #[test]
    fn builder_overrides_take_effect() {
        let config = Configuration::builder()
            .overtime_rules("nfl-playoff")
            .onside_kick_attempt_probability(1.5)
            .build();
        assert_eq!(config.overtime_rules(), "nfl-playoff");
        assert_eq!(config.onside_kick_attempt_probability(), 1.0);
    }
}
