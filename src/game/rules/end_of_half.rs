//! End-of-half provider (spec §4.9): two booleans governing whether a
//! penalty can end a half outright or whether an untimed down is granted.

use std::collections::HashMap;
use std::sync::RwLock;

use lazy_static::lazy_static;

pub trait EndOfHalfProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// If `false`, a defensive penalty at the final snap grants an untimed
    /// down rather than letting the half expire.
    fn allows_half_to_end_on_defensive_penalty(&self) -> bool;

    /// If `true`, an offensive penalty at the final snap still lets the
    /// half end (no untimed down granted to the offense).
    fn allows_half_to_end_on_offensive_penalty(&self) -> bool;
}

/// NFL and NCAA agree on both booleans.
pub struct StandardEndOfHalf;

impl EndOfHalfProvider for StandardEndOfHalf {
    fn name(&self) -> &'static str {
        "standard"
    }

    fn allows_half_to_end_on_defensive_penalty(&self) -> bool {
        false
    }

    fn allows_half_to_end_on_offensive_penalty(&self) -> bool {
        true
    }
}

lazy_static! {
    static ref END_OF_HALF_REGISTRY: RwLock<HashMap<String, &'static (dyn EndOfHalfProvider)>> = {
        let mut registry: HashMap<String, &'static (dyn EndOfHalfProvider)> = HashMap::new();
        registry.insert("standard".to_string(), &StandardEndOfHalf);
        registry.insert("nfl".to_string(), &StandardEndOfHalf);
        registry.insert("ncaa".to_string(), &StandardEndOfHalf);
        RwLock::new(registry)
    };
}

pub fn lookup(name: &str) -> &'static dyn EndOfHalfProvider {
    let registry = END_OF_HALF_REGISTRY.read().expect("registry lock poisoned");
    registry
        .get(&name.to_lowercase())
        .copied()
        .unwrap_or(&StandardEndOfHalf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defensive_penalty_grants_untimed_down() {
        let provider = StandardEndOfHalf;
        assert!(!provider.allows_half_to_end_on_defensive_penalty());
        assert!(provider.allows_half_to_end_on_offensive_penalty());
    }

    #[test]
    fn lookup_defaults_to_standard() {
        assert_eq!(lookup("anything").name(), "standard");
    }
}
