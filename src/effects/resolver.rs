//! Tile effect resolution - what happens where a player lands.
//!
//! The `TileEffectResolver` runs the confrontation with any opponent on the
//! landing tile, then dispatches on the tile kind. Mutations are committed
//! to state as they are produced; the returned [`Effect`] tells the turn
//! controller whether it can advance, must wait, or the game is over.
//!
//! AI-controlled players never get a prompt: purchase and upgrade offers are
//! answered on the spot by the coin-flip policy.

use tracing::{debug, info};

use super::effect::{DecisionKind, Effect, PendingDecision, Prompt};
use super::mutation::{Debt, Mutation, MutationBatch};
use crate::core::{
    role_modifier, BankruptcyRule, Choice, GameState, LogTone, Modifier, PlayerId,
    RandomSource, ResourceKind, Role, RoleEffect, RulesConfig, TileId, TileKind, TileType,
};
use crate::oracle::{OracleReading, OracleRequest};
use crate::rules::{CoinFlipPolicy, GameResult};

/// Purchase price after the role discount.
#[must_use]
pub fn purchase_cost(role: Role, base_price: i64) -> i64 {
    role_modifier(role, RoleEffect::PurchaseCost).apply(base_price)
}

/// Cost of raising a city from `level` to `level + 1`:
/// `floor(base_price * level * rate% * role%)`, saturating at `i64::MAX`.
#[must_use]
pub fn upgrade_cost(rules: &RulesConfig, role: Role, base_price: i64, level: u8) -> i64 {
    let role_pct = role_modifier(role, RoleEffect::UpgradeCost).percent().0;
    base_price
        .saturating_mul(i64::from(level))
        .saturating_mul(i64::from(rules.upgrade_rate_pct))
        .saturating_mul(i64::from(role_pct))
        .div_euclid(10_000)
}

/// Rent at a given level: `floor(base_rent * growth%^(level - 1))`, saturating.
#[must_use]
pub fn rent(rules: &RulesConfig, base_rent: i64, level: u8) -> i64 {
    let exp = u32::from(level.max(1) - 1);
    let growth = i64::from(rules.rent_growth_pct);
    base_rent
        .saturating_mul(growth.saturating_pow(exp))
        .div_euclid(100_i64.pow(exp))
}

/// Resolves landings and decisions against game state.
pub struct TileEffectResolver<'a> {
    rules: &'a RulesConfig,
    policy: CoinFlipPolicy,
}

impl<'a> TileEffectResolver<'a> {
    #[must_use]
    pub fn new(rules: &'a RulesConfig) -> Self {
        Self {
            rules,
            policy: CoinFlipPolicy::from_rules(rules),
        }
    }

    /// Resolve `actor` landing on their current position.
    pub fn resolve<R: RandomSource + ?Sized>(
        &self,
        state: &mut GameState,
        actor: PlayerId,
        rng: &mut R,
    ) -> Effect {
        let mut applied = MutationBatch::new();

        if let Some(result) = self.confront(state, actor, rng, &mut applied) {
            return Effect::GameOver { applied, result };
        }
        if !state.players[actor].is_active() {
            return Effect::Resolved { applied };
        }

        let position = state.players[actor].position;
        let tile = state.board.tile_at(position).clone();
        let name = state.players[actor].name.clone();
        let role = state.players[actor].role;
        debug!(%actor, tile = %tile.name, kind = ?tile.tile_type(), "resolving tile");

        match &tile.kind {
            TileKind::Start => Effect::Resolved { applied },

            TileKind::City(city) => match city.owner() {
                None => {
                    let cost = purchase_cost(role, city.base_price);
                    if !state.players[actor].resources.can_afford(cost) {
                        state.note(
                            Some(actor),
                            LogTone::Info,
                            format!("{name} cannot afford {} ({cost} gold).", tile.name),
                        );
                        return Effect::Resolved { applied };
                    }
                    self.offer(state, PendingDecision::purchase(actor, tile.id, cost), rng, applied)
                }
                Some(owner) if owner == actor => {
                    if !city.can_upgrade() {
                        return Effect::Resolved { applied };
                    }
                    let cost = upgrade_cost(self.rules, role, city.base_price, city.level());
                    if !state.players[actor].resources.can_afford(cost) {
                        state.note(
                            Some(actor),
                            LogTone::Info,
                            format!("{name} cannot afford to upgrade {} ({cost} gold).", tile.name),
                        );
                        return Effect::Resolved { applied };
                    }
                    let decision = PendingDecision::upgrade(actor, tile.id, cost, city.level());
                    self.offer(state, decision, rng, applied)
                }
                Some(owner) => {
                    let amount = rent(self.rules, city.base_rent, city.level());
                    let owner_name = state.players[owner].name.clone();
                    state.note(
                        Some(actor),
                        LogTone::Negative,
                        format!("{name} paid {amount} gold rent to {owner_name} for {}.", tile.name),
                    );
                    let batch = vec![Mutation::Transfer {
                        from: actor,
                        to: owner,
                        amount,
                    }];
                    self.finish(state, batch.into(), applied)
                }
            },

            TileKind::Tax => {
                let amount = role_modifier(role, RoleEffect::Tax).apply(self.rules.tax);
                state.note(
                    Some(actor),
                    LogTone::Negative,
                    format!("{name} paid {amount} gold at {}.", tile.name),
                );
                self.finish(state, vec![Mutation::gold(actor, -amount)].into(), applied)
            }

            TileKind::Oasis => {
                let water = self.rules.oasis_water;
                state.note(
                    Some(actor),
                    LogTone::Positive,
                    format!("{name} rested at {} and gathered {water} water.", tile.name),
                );
                let batch = vec![Mutation::Adjust {
                    player: actor,
                    kind: ResourceKind::Water,
                    delta: water,
                }];
                self.finish(state, batch.into(), applied)
            }

            TileKind::Event => {
                let range = self.rules.event_reward;
                let base = rng.gen_range(range.min..range.end());
                let reward = role_modifier(role, RoleEffect::RandomReward).apply(base);
                state.note(
                    Some(actor),
                    LogTone::Event,
                    format!("{}: {name} earned {reward} gold.", tile.name),
                );
                self.finish(state, vec![Mutation::gold(actor, reward)].into(), applied)
            }

            TileKind::Treasure => {
                let range = self.rules.treasure_reward;
                let reward = rng.gen_range(range.min..range.end());
                state.note(
                    Some(actor),
                    LogTone::Positive,
                    format!("{name} dug up {reward} gold at {}!", tile.name),
                );
                self.finish(state, vec![Mutation::gold(actor, reward)].into(), applied)
            }

            TileKind::Swamp => {
                if role_modifier(role, RoleEffect::SwampPenalty) == Modifier::Immune {
                    state.note(
                        Some(actor),
                        LogTone::Info,
                        format!("{name} knows the way through {}.", tile.name),
                    );
                    return Effect::Resolved { applied };
                }
                let value = self.rules.swamp_penalty;
                state.note(
                    Some(actor),
                    LogTone::Negative,
                    format!("{name} is caught in {}: {value} to the next roll.", tile.name),
                );
                let batch = vec![Mutation::SetMovementModifier { player: actor, value }];
                self.finish(state, batch.into(), applied)
            }

            TileKind::Jail => {
                let turns = self.rules.jail_turns;
                state.note(
                    Some(actor),
                    LogTone::Negative,
                    format!("{name} was thrown into {} for {turns} turns.", tile.name),
                );
                let batch = vec![Mutation::Imprison { player: actor, turns }];
                self.finish(state, batch.into(), applied)
            }

            TileKind::Oracle => {
                state.note(
                    Some(actor),
                    LogTone::Event,
                    format!("{name} consults {}.", tile.name),
                );
                let request = OracleRequest {
                    player: actor,
                    name,
                    resources: state.players[actor].resources,
                };
                Effect::RequiresDecision {
                    applied,
                    prompt: Prompt::Oracle(request),
                }
            }
        }
    }

    /// Apply the answer to a pending decision. The choice must be one the
    /// decision offers.
    pub fn decide(&self, state: &mut GameState, decision: &PendingDecision, choice: Choice) -> Effect {
        let actor = decision.player;
        let applied = MutationBatch::new();
        let name = state.players[actor].name.clone();

        match (&decision.kind, choice) {
            (DecisionKind::Purchase { tile, cost }, Choice::Accept) => {
                if !state.players[actor].resources.can_afford(*cost) {
                    return Effect::Resolved { applied };
                }
                let tile_name = self.tile_name(state, *tile);
                info!(%actor, tile = %tile_name, cost, "city purchased");
                state.note(
                    Some(actor),
                    LogTone::Positive,
                    format!("{name} bought {tile_name} for {cost} gold."),
                );
                let batch = vec![Mutation::Acquire { player: actor, tile: *tile, cost: *cost }];
                self.finish(state, batch.into(), applied)
            }
            (DecisionKind::Upgrade { tile, cost, level }, Choice::Accept) => {
                if !state.players[actor].resources.can_afford(*cost) {
                    return Effect::Resolved { applied };
                }
                let tile_name = self.tile_name(state, *tile);
                info!(%actor, tile = %tile_name, cost, level = level + 1, "city upgraded");
                state.note(
                    Some(actor),
                    LogTone::Positive,
                    format!("{name} upgraded {tile_name} to level {} for {cost} gold.", level + 1),
                );
                let batch = vec![Mutation::Upgrade { player: actor, tile: *tile, cost: *cost }];
                self.finish(state, batch.into(), applied)
            }
            (DecisionKind::Purchase { tile, .. } | DecisionKind::Upgrade { tile, .. }, _) => {
                let tile_name = self.tile_name(state, *tile);
                state.note(Some(actor), LogTone::Info, format!("{name} passed on {tile_name}."));
                Effect::Resolved { applied }
            }
            (DecisionKind::Oracle(reading), _) => self.apply_reading(state, actor, reading),
        }
    }

    /// Apply an oracle reading's resource delta. Debits only clamp at zero;
    /// they never bankrupt.
    pub fn apply_reading(&self, state: &mut GameState, actor: PlayerId, reading: &OracleReading) -> Effect {
        let mut applied = MutationBatch::new();
        for (kind, delta) in reading.resource_deltas() {
            let mutation = Mutation::Adjust { player: actor, kind, delta };
            state.apply(&mutation);
            applied.push(mutation);
        }
        state.note(Some(actor), LogTone::Event, reading.reward.clone());
        Effect::Resolved { applied }
    }

    fn offer<R: RandomSource + ?Sized>(
        &self,
        state: &mut GameState,
        decision: PendingDecision,
        rng: &mut R,
        applied: MutationBatch,
    ) -> Effect {
        if !state.players[decision.player].is_ai {
            return Effect::RequiresDecision {
                applied,
                prompt: Prompt::Decision(decision),
            };
        }

        let choice = self.policy.decide(&decision.kind, rng);
        debug!(player = %decision.player, ?choice, "AI decided");
        match self.decide(state, &decision, choice) {
            Effect::Resolved { applied: more } => Effect::Resolved {
                applied: merged(applied, more),
            },
            Effect::GameOver { applied: more, result } => Effect::GameOver {
                applied: merged(applied, more),
                result,
            },
            Effect::RequiresDecision { applied: more, prompt } => Effect::RequiresDecision {
                applied: merged(applied, more),
                prompt,
            },
        }
    }

    /// Duel the first opponent in seat order sharing the landing tile.
    fn confront<R: RandomSource + ?Sized>(
        &self,
        state: &mut GameState,
        actor: PlayerId,
        rng: &mut R,
        applied: &mut MutationBatch,
    ) -> Option<GameResult> {
        let position = state.players[actor].position;
        if matches!(state.board.tile_at(position).tile_type(), TileType::Start | TileType::Jail) {
            return None;
        }
        let opponent = state.opponents_at(position, actor).next()?;

        let actor_name = state.players[actor].name.clone();
        let opponent_name = state.players[opponent].name.clone();
        let role = state.players[actor].role;

        let transfer = if role_modifier(role, RoleEffect::Confrontation) == Modifier::Authority {
            let amount = self.rules.authority_duel_stake;
            state.note(
                Some(actor),
                LogTone::Event,
                format!("{actor_name} used authority over {opponent_name} and took {amount} gold."),
            );
            Mutation::Transfer { from: opponent, to: actor, amount }
        } else {
            let amount = self.rules.duel_stake;
            let ours = rng.roll_die();
            let theirs = rng.roll_die();
            debug!(%actor, %opponent, ours, theirs, "confrontation");
            if ours >= theirs {
                state.note(
                    Some(actor),
                    LogTone::Event,
                    format!("{actor_name} ({ours}) beat {opponent_name} ({theirs}) and took {amount} gold."),
                );
                Mutation::Transfer { from: opponent, to: actor, amount }
            } else {
                state.note(
                    Some(actor),
                    LogTone::Event,
                    format!("{opponent_name} ({theirs}) beat {actor_name} ({ours}) and took {amount} gold."),
                );
                Mutation::Transfer { from: actor, to: opponent, amount }
            }
        };

        self.commit(state, vec![transfer].into(), applied)
    }

    fn finish(&self, state: &mut GameState, batch: MutationBatch, mut applied: MutationBatch) -> Effect {
        match self.commit(state, batch, &mut applied) {
            Some(result) => Effect::GameOver { applied, result },
            None => Effect::Resolved { applied },
        }
    }

    /// Apply a batch, settling any uncovered gold debit per the bankruptcy
    /// rule. Returns a result if bankruptcy left one or no player standing.
    pub(crate) fn commit(
        &self,
        state: &mut GameState,
        batch: MutationBatch,
        applied: &mut MutationBatch,
    ) -> Option<GameResult> {
        let mut eliminated = false;
        for mutation in batch {
            // Eliminated players take no further part.
            if state.player(mutation.subject()).map_or(true, |p| !p.is_active()) {
                continue;
            }
            let debt = state.apply(&mutation);
            applied.push(mutation);
            if let Some(debt) = debt {
                eliminated |= self.settle(state, debt);
            }
        }

        if !eliminated {
            return None;
        }
        match state.active_players().as_slice() {
            [] => Some(GameResult::Draw),
            [last] => Some(GameResult::Winner(*last)),
            _ => None,
        }
    }

    fn settle(&self, state: &mut GameState, debt: Debt) -> bool {
        match self.rules.bankruptcy {
            BankruptcyRule::Ignore => {
                debug!(player = %debt.player, shortfall = debt.shortfall, "debt floored");
                false
            }
            BankruptcyRule::Eliminate => {
                state.players[debt.player].bankrupt = true;
                let released = state.release_cities(debt.player);
                let name = state.players[debt.player].name.clone();
                info!(player = %debt.player, shortfall = debt.shortfall, released = released.len(), "player bankrupt");
                state.note(
                    Some(debt.player),
                    LogTone::Negative,
                    format!(
                        "{name} went bankrupt, {} gold short. {} cities return to the bank.",
                        debt.shortfall,
                        released.len()
                    ),
                );
                true
            }
        }
    }

    fn tile_name(&self, state: &GameState, tile: TileId) -> String {
        state
            .board
            .tile(tile)
            .map_or_else(|| tile.to_string(), |t| t.name.clone())
    }
}

fn merged(mut first: MutationBatch, second: MutationBatch) -> MutationBatch {
    first.extend(second);
    first
}
