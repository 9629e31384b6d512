//! Two-minute warning provider (spec §4.9): a pure function of the clock
//! transition, queried rather than branched on by league.

use std::collections::HashMap;
use std::sync::RwLock;

use lazy_static::lazy_static;

use crate::game::clock::Quarter;

/// `ShouldCall(quarter, timeBefore, timeAfter, alreadyCalled) -> bool`.
pub trait TwoMinuteWarningProvider: Send + Sync {
    fn name(&self) -> &'static str;

    fn should_call(&self, quarter: Quarter, before: u32, after: u32, already_called: bool) -> bool;
}

/// NFL rule: fires crossing 120s in the second or fourth quarter, once per
/// quarter.
pub struct NflTwoMinuteWarning;

impl TwoMinuteWarningProvider for NflTwoMinuteWarning {
    fn name(&self) -> &'static str {
        "nfl"
    }

    fn should_call(&self, quarter: Quarter, before: u32, after: u32, already_called: bool) -> bool {
        if already_called {
            return false;
        }
        matches!(quarter, Quarter::Second | Quarter::Fourth) && before > 120 && after <= 120
    }
}

/// NCAA rule: no two-minute warning exists.
pub struct NcaaTwoMinuteWarning;

impl TwoMinuteWarningProvider for NcaaTwoMinuteWarning {
    fn name(&self) -> &'static str {
        "ncaa"
    }

    fn should_call(&self, _quarter: Quarter, _before: u32, _after: u32, _already_called: bool) -> bool {
        false
    }
}

lazy_static! {
    static ref TWO_MINUTE_WARNING_REGISTRY: RwLock<HashMap<String, &'static (dyn TwoMinuteWarningProvider)>> = {
        let mut registry: HashMap<String, &'static (dyn TwoMinuteWarningProvider)> = HashMap::new();
        registry.insert("nfl".to_string(), &NflTwoMinuteWarning);
        registry.insert("ncaa".to_string(), &NcaaTwoMinuteWarning);
        RwLock::new(registry)
    };
}

/// Look up a provider by case-insensitive name, defaulting to `"nfl"` when
/// unknown.
pub fn lookup(name: &str) -> &'static dyn TwoMinuteWarningProvider {
    let registry = TWO_MINUTE_WARNING_REGISTRY.read().expect("registry lock poisoned");
    registry
        .get(&name.to_lowercase())
        .copied()
        .unwrap_or(&NflTwoMinuteWarning)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nfl_fires_once_crossing_the_threshold() {
        let provider = NflTwoMinuteWarning;
        assert!(provider.should_call(Quarter::Fourth, 125, 115, false));
        assert!(!provider.should_call(Quarter::Fourth, 125, 115, true));
        assert!(!provider.should_call(Quarter::First, 125, 115, false));
    }

    #[test]
    fn ncaa_never_fires() {
        let provider = NcaaTwoMinuteWarning;
        assert!(!provider.should_call(Quarter::Second, 125, 115, false));
    }

    #[test]
    fn lookup_is_case_insensitive_with_nfl_default() {
        assert_eq!(lookup("NFL").name(), "nfl");
        assert_eq!(lookup("NCAA").name(), "ncaa");
        assert_eq!(lookup("unknown-league").name(), "nfl");
    }
}
