//! Oracle requests, readings and the generator's reply format.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::service::OracleError;
use crate::core::{PlayerId, ResourceKind, Resources};

/// What the generator is told about the player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleRequest {
    pub player: PlayerId,
    pub name: String,
    pub resources: Resources,
}

/// Flavor text plus a resource delta.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleReading {
    pub text: String,
    pub reward: String,
    /// Resource key to delta, exactly as the generator returned it.
    pub delta: FxHashMap<String, i64>,
}

impl OracleReading {
    /// The reading used when the generator is unavailable or fails.
    #[must_use]
    pub fn fallback(gold: i64) -> Self {
        Self::fallback_with_text("The spirits are quiet today.", gold)
    }

    pub(crate) fn fallback_with_text(text: &str, gold: i64) -> Self {
        let mut delta = FxHashMap::default();
        delta.insert(ResourceKind::Gold.key().to_string(), gold);
        Self {
            text: text.to_string(),
            reward: format!("Gain {gold} Gold."),
            delta,
        }
    }

    /// Recognised deltas in resource order; unknown keys are dropped.
    #[must_use]
    pub fn resource_deltas(&self) -> Vec<(ResourceKind, i64)> {
        let mut deltas: Vec<(ResourceKind, i64)> = Vec::with_capacity(self.delta.len());
        for (key, &amount) in &self.delta {
            match ResourceKind::from_key(key) {
                Some(kind) => deltas.push((kind, amount)),
                None => warn!(key = key.as_str(), amount, "ignoring unknown oracle resource"),
            }
        }
        deltas.sort_by_key(|&(kind, _)| kind);
        deltas
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireReply {
    #[serde(default)]
    wisdom: Option<String>,
    #[serde(default)]
    effect_description: Option<String>,
    #[serde(default)]
    resource_delta: Option<FxHashMap<String, f64>>,
}

/// Parse the generator's JSON reply.
///
/// Expected shape:
/// `{"wisdom": "...", "effectDescription": "...", "resourceDelta": {"gold": 20}}`.
/// Missing fields get neutral defaults; fractional deltas are truncated.
pub fn parse_reply(json: &str) -> Result<OracleReading, OracleError> {
    let wire: WireReply =
        serde_json::from_str(json).map_err(|e| OracleError::Malformed(e.to_string()))?;

    let delta = wire
        .resource_delta
        .unwrap_or_default()
        .into_iter()
        .filter(|(_, amount)| amount.is_finite())
        .map(|(key, amount)| (key, amount.trunc() as i64))
        .collect();

    Ok(OracleReading {
        text: wire.wisdom.unwrap_or_else(|| "The sands shift...".to_string()),
        reward: wire
            .effect_description
            .unwrap_or_else(|| "Fate is uncertain.".to_string()),
        delta,
    })
}
