//! Immutable per-process state handed to every handler.

use lri_core::ScoringRules;

use crate::config::Config;

/// Application state - configuration and scoring rules, fixed at startup.
///
/// Nothing here changes after construction; each request is scored
/// independently.
pub struct AppState {
    config: Config,
    rules: ScoringRules,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self::with_rules(config, ScoringRules::default())
    }

    pub fn with_rules(config: Config, rules: ScoringRules) -> Self {
        Self { config, rules }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn rules(&self) -> &ScoringRules {
        &self.rules
    }
}
