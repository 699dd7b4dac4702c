//! Built-in AI decision policy.

use crate::core::{Choice, RandomSource, RulesConfig};
use crate::effects::DecisionKind;

/// Accepts offers with fixed probabilities.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoinFlipPolicy {
    pub purchase: f64,
    pub upgrade: f64,
}

impl CoinFlipPolicy {
    #[must_use]
    pub fn new(purchase: f64, upgrade: f64) -> Self {
        Self { purchase, upgrade }
    }

    #[must_use]
    pub fn from_rules(rules: &RulesConfig) -> Self {
        Self::new(rules.ai_purchase_probability, rules.ai_upgrade_probability)
    }

    /// Pick an answer. Oracle readings are always acknowledged.
    pub fn decide<R: RandomSource + ?Sized>(&self, kind: &DecisionKind, rng: &mut R) -> Choice {
        let probability = match kind {
            DecisionKind::Purchase { .. } => self.purchase,
            DecisionKind::Upgrade { .. } => self.upgrade,
            DecisionKind::Oracle(_) => return Choice::Acknowledge,
        };
        if rng.gen_bool(probability) {
            Choice::Accept
        } else {
            Choice::Decline
        }
    }
}
