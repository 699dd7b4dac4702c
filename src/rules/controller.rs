//! The turn controller: roll, move, resolve, decide, advance.
//!
//! ## Driving a game
//!
//! - [`TurnController::submit_roll`] starts the active player's turn.
//! - [`TurnController::submit_decision`] answers a pending purchase, upgrade
//!   or oracle prompt.
//! - [`TurnController::resolve_oracle`] delivers the narrative generator's
//!   result for an outstanding [`OracleTicket`]; [`TurnController::consult_oracle`]
//!   does the call and the delivery in one step for in-process services.
//! - [`TurnController::play_ai_turn`] runs a whole turn for an AI seat.
//!
//! Every entry point either succeeds or returns an [`EngineError`] with the
//! game untouched.

use tracing::{debug, info, instrument, warn};

use super::error::EngineError;
use super::movement::{Movement, MovementResolver};
use super::outcome::{EndReason, GameResult};
use super::phase::{OracleTicket, TurnPhase};
use crate::core::{
    Board, Choice, Command, ConfigError, GameConfig, GameRng, GameSnapshot, GameState, LogTone,
    Player, PlayerId, RandomSource, Role, RulesConfig,
};
use crate::effects::{Effect, MutationBatch, PendingDecision, Prompt, TileEffectResolver};
use crate::oracle::{OracleError, OracleReading, OracleRequest, OracleService};

/// What one command did.
#[derive(Clone, Debug, PartialEq)]
pub struct TurnReport {
    /// The player the command acted for.
    pub player: PlayerId,
    /// Raw die face, when the command rolled.
    pub roll: Option<u8>,
    pub movement: Option<Movement>,
    /// Mutations committed by this command.
    pub applied: MutationBatch,
    /// Phase after the command.
    pub phase: TurnPhase,
}

impl TurnReport {
    fn new(player: PlayerId) -> Self {
        Self {
            player,
            roll: None,
            movement: None,
            applied: MutationBatch::new(),
            phase: TurnPhase::AwaitingRoll,
        }
    }

    /// Whether the command ended the acting player's turn.
    #[must_use]
    pub fn turn_ended(&self) -> bool {
        matches!(self.phase, TurnPhase::AwaitingRoll | TurnPhase::GameOver { .. })
    }
}

/// Owns a game and enforces its turn order.
pub struct TurnController<R: RandomSource = GameRng> {
    config: GameConfig,
    initial: GameState,
    state: GameState,
    rng: R,
    epoch: u64,
}

impl<R: RandomSource> TurnController<R> {
    /// Validate `config`, seat the players and open the first turn.
    ///
    /// Seats without a role draw one at random from the roles no earlier
    /// seat holds (any role once all are taken).
    pub fn start(config: GameConfig, mut rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let board = Board::from_specs(&config.board)?;

        let mut taken: Vec<Role> = config.players.iter().filter_map(|p| p.role).collect();
        let mut players = Vec::with_capacity(config.players.len());
        for (index, setup) in config.players.iter().enumerate() {
            let role = match setup.role {
                Some(role) => role,
                None => {
                    let open: Vec<Role> = Role::ALL.into_iter().filter(|r| !taken.contains(r)).collect();
                    let pool = if open.is_empty() { Role::ALL.to_vec() } else { open };
                    let pick = rng.gen_range(0..pool.len() as i64);
                    let role = pool[pick as usize];
                    taken.push(role);
                    role
                }
            };
            let mut player = Player::new(
                PlayerId::new(index as u8),
                setup.name.clone(),
                role,
                config.rules.starting_resources,
            );
            player.is_ai = setup.is_ai;
            players.push(player);
        }

        let mut state = GameState::new(board, players);
        for player in state.players.values().cloned().collect::<Vec<_>>() {
            state.note(
                Some(player.id),
                LogTone::Info,
                format!("{} joins as {}: {}.", player.name, player.role, player.role.perk()),
            );
        }
        info!(players = state.player_count(), tiles = state.board.len(), "game started");

        Ok(Self {
            config,
            initial: state.clone(),
            state,
            rng,
            epoch: 0,
        })
    }

    // === Accessors ===

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable state, for arranging positions and balances before a turn.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn rules(&self) -> &RulesConfig {
        &self.config.rules
    }

    #[must_use]
    pub fn phase(&self) -> &TurnPhase {
        &self.state.phase
    }

    #[must_use]
    pub fn current_player(&self) -> &Player {
        self.state.current_player()
    }

    /// Game generation; bumps on every restart.
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state.phase.is_terminal()
    }

    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        match self.state.phase {
            TurnPhase::GameOver { result, .. } => Some(result),
            _ => None,
        }
    }

    #[must_use]
    pub fn pending_decision(&self) -> Option<&PendingDecision> {
        self.state.phase.pending_decision()
    }

    /// The outstanding oracle consultation, if the turn is waiting on one.
    #[must_use]
    pub fn pending_oracle(&self) -> Option<(OracleTicket, &OracleRequest)> {
        match &self.state.phase {
            TurnPhase::AwaitingOracle { ticket, request } => Some((*ticket, request)),
            _ => None,
        }
    }

    #[must_use]
    pub fn rng(&self) -> &R {
        &self.rng
    }

    /// Mutable RNG, for queuing scripted draws.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Presentation snapshot.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        self.state.snapshot(self.epoch)
    }

    // === Commands ===

    /// Roll for `player` and play the turn up to the next suspension point.
    #[instrument(skip(self), fields(epoch = self.epoch, turn = self.state.turn_number))]
    pub fn submit_roll(&mut self, player: PlayerId) -> Result<TurnReport, EngineError> {
        self.check_actor(player, "roll")?;
        if self.state.phase != TurnPhase::AwaitingRoll {
            return Err(self.reject("roll"));
        }

        self.state.record(player, Command::Roll);
        let mut report = TurnReport::new(player);

        let jailed = &mut self.state.players[player];
        if jailed.in_jail {
            if jailed.jail_turns > 0 {
                jailed.jail_turns -= 1;
                let (name, left) = (jailed.name.clone(), jailed.jail_turns);
                debug!(%player, left, "turn skipped in jail");
                self.state.note(
                    Some(player),
                    LogTone::Negative,
                    format!("{name} sits in jail ({left} turns left)."),
                );
                self.end_turn(player);
                report.phase = self.state.phase.clone();
                return Ok(report);
            }
            jailed.in_jail = false;
            let name = jailed.name.clone();
            self.state
                .note(Some(player), LogTone::Positive, format!("{name} is released from jail."));
        }

        self.transition(TurnPhase::Rolling);
        let raw = self.rng.roll_die();
        report.roll = Some(raw);

        self.transition(TurnPhase::Moving);
        let mover = MovementResolver::new(self.state.board.len(), self.config.rules.pass_start_bonus);
        report.movement = Some(mover.resolve(&mut self.state, player, raw));

        self.transition(TurnPhase::ResolvingTile);
        let effect = TileEffectResolver::new(&self.config.rules).resolve(&mut self.state, player, &mut self.rng);
        self.settle(player, effect, &mut report);
        Ok(report)
    }

    /// Answer the pending decision.
    #[instrument(skip(self), fields(epoch = self.epoch, turn = self.state.turn_number))]
    pub fn submit_decision(&mut self, player: PlayerId, choice: Choice) -> Result<TurnReport, EngineError> {
        self.check_actor(player, "decide")?;
        let Some(decision) = self.state.phase.pending_decision().cloned() else {
            return Err(self.reject("decide"));
        };
        if !decision.offers(choice) {
            warn!(%player, choice = choice.id(), "choice not offered");
            return Err(EngineError::ChoiceNotOffered(choice));
        }

        self.state.record(player, Command::Decide(choice));
        let mut report = TurnReport::new(player);
        let effect = TileEffectResolver::new(&self.config.rules).decide(&mut self.state, &decision, choice);
        self.settle(player, effect, &mut report);
        Ok(report)
    }

    /// Deliver the narrative generator's result for `ticket`.
    ///
    /// Any error degrades to the fallback reading. A human then has to
    /// acknowledge the reading; an AI takes it at once.
    #[instrument(skip(self, result), fields(epoch = self.epoch))]
    pub fn resolve_oracle(
        &mut self,
        ticket: OracleTicket,
        result: Result<OracleReading, OracleError>,
    ) -> Result<TurnReport, EngineError> {
        if self.is_over() {
            return Err(EngineError::GameOver);
        }
        if ticket.epoch != self.epoch {
            warn!(?ticket, "oracle ticket from a previous game");
            return Err(EngineError::StaleTicket(ticket));
        }
        let expected = match &self.state.phase {
            TurnPhase::AwaitingOracle { ticket, .. } => *ticket,
            _ => return Err(self.reject("resolve oracle")),
        };
        if ticket != expected {
            warn!(?ticket, ?expected, "stale oracle ticket");
            return Err(EngineError::StaleTicket(ticket));
        }

        let player = ticket.player;
        self.state.record(player, Command::OracleAnswered);
        let fallback_gold = self.config.rules.oracle_fallback_gold;
        let reading = match result {
            Ok(reading) => reading,
            Err(OracleError::Unavailable) => {
                debug!("no oracle service; using fallback");
                OracleReading::fallback_with_text("The Oracle is silent.", fallback_gold)
            }
            Err(err) => {
                warn!(error = %err, "oracle failed; using fallback");
                OracleReading::fallback(fallback_gold)
            }
        };
        self.state.note(Some(player), LogTone::Event, reading.text.clone());

        let mut report = TurnReport::new(player);
        if self.state.players[player].is_ai {
            let effect = TileEffectResolver::new(&self.config.rules).apply_reading(&mut self.state, player, &reading);
            self.settle(player, effect, &mut report);
        } else {
            self.transition(TurnPhase::DecisionPending(PendingDecision::oracle(player, reading)));
            report.phase = self.state.phase.clone();
        }
        Ok(report)
    }

    /// Consult `service` for the outstanding oracle ticket and deliver the
    /// result.
    pub fn consult_oracle(&mut self, service: &mut dyn OracleService) -> Result<TurnReport, EngineError> {
        let Some((ticket, request)) = self.pending_oracle().map(|(t, r)| (t, r.clone())) else {
            return Err(self.reject("consult oracle"));
        };
        let result = service.consult(&request);
        self.resolve_oracle(ticket, result)
    }

    /// Play the active AI player's whole turn.
    #[instrument(skip(self, oracle), fields(epoch = self.epoch, turn = self.state.turn_number))]
    pub fn play_ai_turn(&mut self, oracle: &mut dyn OracleService) -> Result<TurnReport, EngineError> {
        if self.is_over() {
            return Err(EngineError::GameOver);
        }
        let player = self.state.current;
        if !self.state.players[player].is_ai {
            return Err(EngineError::NotAiControlled(player));
        }

        let mut report = self.submit_roll(player)?;
        while matches!(self.state.phase, TurnPhase::AwaitingOracle { .. }) {
            let next = self.consult_oracle(oracle)?;
            report.applied.extend(next.applied);
            report.phase = next.phase;
        }
        Ok(report)
    }

    /// Discard the current game and start over from the same configuration.
    ///
    /// Outstanding oracle tickets become stale.
    #[instrument(skip(self), fields(epoch = self.epoch))]
    pub fn restart(&mut self) {
        self.epoch += 1;
        self.state = self.initial.clone();
        info!(epoch = self.epoch, "game restarted");
    }

    // === Internals ===

    fn check_actor(&self, player: PlayerId, action: &'static str) -> Result<(), EngineError> {
        if self.is_over() {
            warn!(%player, action, "command after game over");
            return Err(EngineError::GameOver);
        }
        if self.state.player(player).is_none() {
            warn!(%player, action, "unknown player");
            return Err(EngineError::UnknownPlayer(player));
        }
        if player != self.state.current {
            warn!(%player, expected = %self.state.current, action, "out of turn");
            return Err(EngineError::NotYourTurn {
                player,
                expected: self.state.current,
            });
        }
        Ok(())
    }

    fn reject(&self, action: &'static str) -> EngineError {
        let phase = self.state.phase.name();
        warn!(action, phase, "command rejected in this phase");
        EngineError::InvalidPhase { action, phase }
    }

    fn transition(&mut self, next: TurnPhase) {
        debug!(from = self.state.phase.name(), to = next.name(), "phase transition");
        self.state.phase = next;
    }

    /// Move on from a resolution result.
    fn settle(&mut self, player: PlayerId, effect: Effect, report: &mut TurnReport) {
        match effect {
            Effect::Resolved { applied } => {
                report.applied.extend(applied);
                self.end_turn(player);
            }
            Effect::RequiresDecision { applied, prompt } => {
                report.applied.extend(applied);
                match prompt {
                    Prompt::Decision(decision) => self.transition(TurnPhase::DecisionPending(decision)),
                    Prompt::Oracle(request) => {
                        let ticket = OracleTicket {
                            epoch: self.epoch,
                            turn: self.state.turn_number,
                            player,
                        };
                        self.transition(TurnPhase::AwaitingOracle { ticket, request });
                    }
                }
            }
            Effect::GameOver { applied, result } => {
                report.applied.extend(applied);
                self.finish(result, EndReason::LastSolvent);
            }
        }
        report.phase = self.state.phase.clone();
    }

    /// Win check for the acting player, then hand over to the next seat.
    fn end_turn(&mut self, actor: PlayerId) {
        self.transition(TurnPhase::TurnAdvancing);

        let acting = &self.state.players[actor];
        if acting.is_active() && acting.gold() >= self.config.rules.win_gold {
            self.finish(GameResult::Winner(actor), EndReason::WealthThreshold);
            return;
        }

        match self.state.next_active_after(actor) {
            Some(next) => {
                self.state.current = next;
                self.state.turn_number += 1;
                self.transition(TurnPhase::AwaitingRoll);
            }
            None if self.state.players[actor].is_active() => {
                self.finish(GameResult::Winner(actor), EndReason::LastSolvent);
            }
            None => self.finish(GameResult::Draw, EndReason::LastSolvent),
        }
    }

    fn finish(&mut self, result: GameResult, reason: EndReason) {
        let message = match result {
            GameResult::Winner(winner) => format!("{} wins the game!", self.state.players[winner].name),
            GameResult::Draw => "Nobody is left standing.".to_string(),
        };
        info!(?result, ?reason, "game over");
        self.state.note(result.winner(), LogTone::Event, message);
        self.transition(TurnPhase::GameOver { result, reason });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{PlayerSetup, TileSpec};
    use crate::core::{ScriptedRandom, TileType};

    fn config() -> GameConfig {
        GameConfig::new(vec![
            TileSpec::new("Start", TileType::Start),
            TileSpec::city("Damascus", 100, 20),
            TileSpec::new("Sultan's Tax", TileType::Tax),
            TileSpec::new("The Sage", TileType::Oracle),
            TileSpec::new("The Dungeon", TileType::Jail),
            TileSpec::new("Palm Oasis", TileType::Oasis),
        ])
        .with_player(PlayerSetup::human("You", Role::Builder))
        .with_player(PlayerSetup::ai("Rival").with_role(Role::Merchant))
    }

    fn controller(dice: impl IntoIterator<Item = u8>) -> TurnController<ScriptedRandom> {
        TurnController::start(config(), ScriptedRandom::new().dice(dice)).unwrap()
    }

    #[test]
    fn test_start_seats_players() {
        let game = controller([]);

        assert_eq!(game.state().player_count(), 2);
        assert_eq!(game.current_player().name, "You");
        assert_eq!(game.phase(), &TurnPhase::AwaitingRoll);
        assert_eq!(game.state().players[PlayerId::new(0)].gold(), 500);
        assert!(game.state().players[PlayerId::new(1)].is_ai);
    }

    #[test]
    fn test_start_rejects_invalid_config() {
        let config = GameConfig::new(vec![TileSpec::new("Start", TileType::Start)]);
        let result = TurnController::start(config, ScriptedRandom::new());
        assert!(matches!(result, Err(ConfigError::BoardTooSmall(1))));
    }

    #[test]
    fn test_random_role_avoids_taken() {
        let config = GameConfig::new(config().board)
            .with_player(PlayerSetup::human("You", Role::Explorer))
            .with_player(PlayerSetup::ai("Rival"));
        // Index 0 of the open roles [Builder, Merchant, Politician].
        let game = TurnController::start(config, ScriptedRandom::new()).unwrap();

        assert_eq!(game.state().players[PlayerId::new(1)].role, Role::Builder);
    }

    #[test]
    fn test_purchase_decision_flow() {
        let mut game = controller([1]);
        let you = PlayerId::new(0);

        let report = game.submit_roll(you).unwrap();
        assert_eq!(report.roll, Some(1));
        assert!(matches!(report.phase, TurnPhase::DecisionPending(_)));

        let report = game.submit_decision(you, Choice::Accept).unwrap();
        assert!(report.turn_ended());
        assert_eq!(game.state().players[you].gold(), 430);
        assert_eq!(game.state().current, PlayerId::new(1));
        assert_eq!(game.state().turn_number, 2);
    }

    #[test]
    fn test_rejections_leave_state_untouched() {
        let mut game = controller([1]);
        let before = game.snapshot();

        assert_eq!(
            game.submit_roll(PlayerId::new(1)),
            Err(EngineError::NotYourTurn { player: PlayerId::new(1), expected: PlayerId::new(0) })
        );
        assert!(matches!(
            game.submit_decision(PlayerId::new(0), Choice::Accept),
            Err(EngineError::InvalidPhase { .. })
        ));
        assert_eq!(game.submit_roll(PlayerId::new(9)), Err(EngineError::UnknownPlayer(PlayerId::new(9))));
        assert_eq!(game.snapshot(), before);

        game.submit_roll(PlayerId::new(0)).unwrap();
        let pending = game.snapshot();
        assert_eq!(
            game.submit_decision(PlayerId::new(0), Choice::Acknowledge),
            Err(EngineError::ChoiceNotOffered(Choice::Acknowledge))
        );
        assert!(matches!(game.submit_roll(PlayerId::new(0)), Err(EngineError::InvalidPhase { .. })));
        assert_eq!(game.snapshot(), pending);
    }

    #[test]
    fn test_oracle_suspends_and_resumes() {
        let mut game = controller([3]);
        let you = PlayerId::new(0);

        game.submit_roll(you).unwrap();
        let (ticket, request) = game.pending_oracle().unwrap();
        assert_eq!(request.name, "You");
        assert_eq!(ticket.player, you);

        let report = game.resolve_oracle(ticket, Err(OracleError::Failed("timeout".into()))).unwrap();
        let Some(decision) = report.phase.pending_decision() else {
            panic!("expected an acknowledgment prompt");
        };
        assert_eq!(decision.options.as_slice(), &[Choice::Acknowledge]);

        game.submit_decision(you, Choice::Acknowledge).unwrap();
        assert_eq!(game.state().players[you].gold(), 510);
        assert_eq!(game.state().current, PlayerId::new(1));
    }

    #[test]
    fn test_win_checked_at_end_of_turn() {
        let mut game = controller([1]);
        let you = PlayerId::new(0);
        game.state_mut().players[you].resources = crate::core::Resources::new(2400, 0, 0, 0);
        game.state_mut().players[you].position = 5;

        let report = game.submit_roll(you).unwrap();

        // Passing start pays 100 and lands on Start.
        assert_eq!(game.state().players[you].gold(), 2500);
        assert_eq!(
            report.phase,
            TurnPhase::GameOver { result: GameResult::Winner(you), reason: EndReason::WealthThreshold }
        );
        assert_eq!(game.submit_roll(PlayerId::new(1)), Err(EngineError::GameOver));
    }

    #[test]
    fn test_restart_invalidates_ticket() {
        let mut game = controller([3]);
        game.submit_roll(PlayerId::new(0)).unwrap();
        let (ticket, _) = game.pending_oracle().unwrap();

        game.restart();

        assert_eq!(game.epoch(), 1);
        assert_eq!(game.phase(), &TurnPhase::AwaitingRoll);
        assert_eq!(
            game.resolve_oracle(ticket, Ok(OracleReading::fallback(999))),
            Err(EngineError::StaleTicket(ticket))
        );
        assert_eq!(game.state().players[PlayerId::new(0)].gold(), 500);
    }
}
