//! Turn controller verification tests.
//!
//! Turn order, jail, confrontations, the win check, bankruptcy and command
//! authorization.

use sands_engine::core::{GameConfig, PlayerSetup, Resources, TileId};
use sands_engine::effects::Mutation;
use sands_engine::games::sands::{stock_board, SandsGameBuilder};
use sands_engine::{
    BankruptcyRule, Choice, EndReason, EngineError, GameResult, PlayerId, Role, RulesConfig,
    ScriptedRandom, SilentOracle, TurnController, TurnPhase,
};

const YOU: PlayerId = PlayerId(0);
const RIVAL: PlayerId = PlayerId(1);

fn table(seats: Vec<PlayerSetup>, rules: RulesConfig, rng: ScriptedRandom) -> TurnController<ScriptedRandom> {
    let config = seats
        .into_iter()
        .fold(GameConfig::new(stock_board()), GameConfig::with_player)
        .with_rules(rules);
    TurnController::start(config, rng).unwrap()
}

fn duo(you: Role, rival: Role, rng: ScriptedRandom) -> TurnController<ScriptedRandom> {
    table(
        vec![PlayerSetup::human("You", you), PlayerSetup::human("Rival", rival)],
        RulesConfig::default(),
        rng,
    )
}

/// Test that jail skips two turns, then releases and rolls.
#[test]
fn test_jail_skips_then_releases() {
    // You: 9 -> Dungeon. Rival: Oasis, Sultan's Tax, Trade Caravan. You: Dubai.
    let rng = ScriptedRandom::new().dice([1, 4, 2, 6, 1]);
    let mut game = duo(Role::Merchant, Role::Builder, rng);
    game.state_mut().players[YOU].position = 9;

    game.submit_roll(YOU).unwrap();
    assert!(game.state().players[YOU].in_jail);
    assert_eq!(game.state().players[YOU].jail_turns, 2);

    game.submit_roll(RIVAL).unwrap();
    let report = game.submit_roll(YOU).unwrap();
    assert_eq!(report.roll, None);
    assert!(report.turn_ended());
    assert_eq!(game.state().players[YOU].jail_turns, 1);
    assert_eq!(game.state().current, RIVAL);

    game.submit_roll(RIVAL).unwrap();
    let report = game.submit_roll(YOU).unwrap();
    assert_eq!(report.roll, None);
    assert_eq!(game.state().players[YOU].jail_turns, 0);
    assert!(game.state().players[YOU].in_jail);

    game.submit_roll(RIVAL).unwrap();
    let report = game.submit_roll(YOU).unwrap();
    assert_eq!(report.roll, Some(1));
    assert!(!game.state().players[YOU].in_jail);
    assert_eq!(game.state().players[YOU].position, 11);
    assert!(game.rng().is_exhausted());
}

/// Test that turn numbers advance once per turn, jail skips included.
#[test]
fn test_turn_numbers() {
    let mut game = duo(Role::Merchant, Role::Builder, ScriptedRandom::new().dice([4, 4]));
    assert_eq!(game.state().turn_number, 1);

    game.submit_roll(YOU).unwrap();
    assert_eq!(game.state().turn_number, 2);
    game.submit_roll(RIVAL).unwrap();
    assert_eq!(game.state().turn_number, 3);
    assert_eq!(game.state().current, YOU);
}

/// Test that a tied duel goes to the acting player.
#[test]
fn test_duel_tie_favors_actor() {
    let mut game = duo(Role::Merchant, Role::Builder, ScriptedRandom::new().dice([1, 3, 3]));
    game.state_mut().players[YOU].position = 4;
    game.state_mut().players[RIVAL].position = 5;

    game.submit_roll(YOU).unwrap();

    assert_eq!(game.state().players[YOU].gold(), 550);
    assert_eq!(game.state().players[RIVAL].gold(), 450);
    // The city is still offered after the duel.
    assert!(game.pending_decision().is_some());
}

/// Test that the defender takes the stake on a higher roll.
#[test]
fn test_duel_lost() {
    let mut game = duo(Role::Merchant, Role::Builder, ScriptedRandom::new().dice([1, 2, 6]));
    game.state_mut().players[YOU].position = 4;
    game.state_mut().players[RIVAL].position = 5;

    game.submit_roll(YOU).unwrap();

    assert_eq!(game.state().players[YOU].gold(), 450);
    assert_eq!(game.state().players[RIVAL].gold(), 550);
}

/// Test that a politician takes 100 without a roll.
#[test]
fn test_politician_authority() {
    let mut game = duo(Role::Politician, Role::Builder, ScriptedRandom::new().dice([1]));
    game.state_mut().players[YOU].position = 4;
    game.state_mut().players[RIVAL].position = 5;

    game.submit_roll(YOU).unwrap();

    assert_eq!(game.state().players[YOU].gold(), 600);
    assert_eq!(game.state().players[RIVAL].gold(), 400);
    assert!(game.rng().is_exhausted());
}

/// Test that only the first opponent in seat order is challenged.
#[test]
fn test_duel_first_opponent_only() {
    let seats = vec![
        PlayerSetup::human("You", Role::Merchant),
        PlayerSetup::human("Second", Role::Builder),
        PlayerSetup::human("Third", Role::Explorer),
    ];
    let mut game = table(seats, RulesConfig::default(), ScriptedRandom::new().dice([1, 6, 1]));
    for player in [PlayerId(1), PlayerId(2)] {
        game.state_mut().players[player].position = 5;
    }
    game.state_mut().players[YOU].position = 4;

    game.submit_roll(YOU).unwrap();

    assert_eq!(game.state().players[YOU].gold(), 550);
    assert_eq!(game.state().players[PlayerId(1)].gold(), 450);
    assert_eq!(game.state().players[PlayerId(2)].gold(), 500);
}

/// Test that there is no duel on Start.
#[test]
fn test_no_duel_on_start() {
    let mut game = duo(Role::Politician, Role::Builder, ScriptedRandom::new().dice([2]));
    game.state_mut().players[YOU].position = 18;

    game.submit_roll(YOU).unwrap();

    assert_eq!(game.state().players[YOU].gold(), 600);
    assert_eq!(game.state().players[RIVAL].gold(), 500);
}

/// Test that the win threshold triggers game over at end of turn.
#[test]
fn test_wealth_wins_at_end_of_turn() {
    let mut game = duo(Role::Merchant, Role::Builder, ScriptedRandom::new().dice([3]).values([60]));
    game.state_mut().players[YOU].position = 9;
    game.state_mut().players[YOU].resources = Resources::new(2440, 0, 0, 0);

    let report = game.submit_roll(YOU).unwrap();

    assert_eq!(
        report.phase,
        TurnPhase::GameOver { result: GameResult::Winner(YOU), reason: EndReason::WealthThreshold }
    );
    assert_eq!(game.result(), Some(GameResult::Winner(YOU)));
    assert_eq!(game.submit_roll(RIVAL), Err(EngineError::GameOver));
}

/// Test that one gold short of the threshold keeps the game going.
#[test]
fn test_below_threshold_continues() {
    let mut game = duo(Role::Merchant, Role::Builder, ScriptedRandom::new().dice([3]).values([59]));
    game.state_mut().players[YOU].position = 9;
    game.state_mut().players[YOU].resources = Resources::new(2440, 0, 0, 0);

    game.submit_roll(YOU).unwrap();

    assert_eq!(game.state().players[YOU].gold(), 2499);
    assert!(!game.is_over());
    assert_eq!(game.state().current, RIVAL);
}

/// Test that crossing the threshold mid-turn does not end the game.
#[test]
fn test_threshold_mid_turn_does_not_win() {
    // Salary takes You to 2520, then the duel costs 50.
    let mut game = duo(Role::Builder, Role::Merchant, ScriptedRandom::new().dice([2, 1, 6]));
    game.state_mut().players[YOU].position = 19;
    game.state_mut().players[YOU].resources = Resources::new(2420, 0, 0, 0);
    game.state_mut().players[RIVAL].position = 1;

    game.submit_roll(YOU).unwrap();
    assert!(!game.is_over());
    game.submit_decision(YOU, Choice::Decline).unwrap();

    assert_eq!(game.state().players[YOU].gold(), 2470);
    assert!(!game.is_over());
}

/// Test that the win check only looks at the acting player.
#[test]
fn test_win_check_only_for_actor() {
    let mut game = duo(Role::Merchant, Role::Builder, ScriptedRandom::new().dice([4]));
    game.state_mut().players[RIVAL].resources = Resources::new(9999, 0, 0, 0);

    game.submit_roll(YOU).unwrap();

    assert!(!game.is_over());
}

/// Test that unpaid rent eliminates the payer and the last solvent player wins.
#[test]
fn test_bankruptcy_ends_two_player_game() {
    let mut game = duo(Role::Merchant, Role::Builder, ScriptedRandom::new().dice([1]));
    game.state_mut().players[YOU].position = 18;
    game.state_mut().players[YOU].resources = Resources::new(30, 0, 0, 0);
    game.state_mut()
        .apply(&Mutation::Acquire { player: RIVAL, tile: TileId::new(19), cost: 0 });
    game.state_mut()
        .apply(&Mutation::Acquire { player: YOU, tile: TileId::new(1), cost: 0 });

    let report = game.submit_roll(YOU).unwrap();

    assert_eq!(
        report.phase,
        TurnPhase::GameOver { result: GameResult::Winner(RIVAL), reason: EndReason::LastSolvent }
    );
    assert!(game.state().players[YOU].bankrupt);
    assert!(game.state().players[YOU].properties().is_empty());
    assert_eq!(game.state().board.tile(TileId::new(1)).unwrap().owner(), None);
    assert_eq!(game.state().players[RIVAL].gold(), 560);
}

/// Test that an eliminated player is skipped when more than one remains.
#[test]
fn test_bankrupt_player_skipped() {
    let seats = vec![
        PlayerSetup::human("You", Role::Merchant),
        PlayerSetup::human("Second", Role::Builder),
        PlayerSetup::human("Third", Role::Explorer),
    ];
    let mut game = table(seats, RulesConfig::default(), ScriptedRandom::new().dice([6, 4, 4]));
    game.state_mut().players[YOU].resources = Resources::new(10, 0, 0, 0);

    let report = game.submit_roll(YOU).unwrap();

    assert!(report.turn_ended());
    assert!(!game.is_over());
    assert!(game.state().players[YOU].bankrupt);
    assert_eq!(game.state().current, PlayerId(1));

    game.submit_roll(PlayerId(1)).unwrap();
    game.submit_roll(PlayerId(2)).unwrap();
    assert_eq!(game.state().current, PlayerId(1));
    assert_eq!(game.state().active_players(), vec![PlayerId(1), PlayerId(2)]);
}

/// Test that the ignore rule only floors gold.
#[test]
fn test_ignore_bankruptcy_rule() {
    let rules = RulesConfig::default().with_bankruptcy(BankruptcyRule::Ignore);
    let seats = vec![PlayerSetup::human("You", Role::Merchant), PlayerSetup::human("Rival", Role::Builder)];
    let mut game = table(seats, rules, ScriptedRandom::new().dice([6]));
    game.state_mut().players[YOU].resources = Resources::new(10, 0, 0, 0);

    game.submit_roll(YOU).unwrap();

    assert_eq!(game.state().players[YOU].gold(), 0);
    assert!(!game.state().players[YOU].bankrupt);
    assert!(!game.is_over());
}

/// Test that decisions are only accepted from the active player.
#[test]
fn test_decision_from_wrong_player_rejected() {
    let mut game = duo(Role::Merchant, Role::Builder, ScriptedRandom::new().dice([1]));
    game.submit_roll(YOU).unwrap();
    let before = game.snapshot();

    assert_eq!(
        game.submit_decision(RIVAL, Choice::Accept),
        Err(EngineError::NotYourTurn { player: RIVAL, expected: YOU })
    );
    assert_eq!(game.snapshot(), before);
    assert_eq!(game.state().history.len(), 1);
}

/// Test that an AI seat never waits on a decision.
#[test]
fn test_ai_never_pending() {
    let mut game = SandsGameBuilder::new()
        .player(PlayerSetup::ai("North"))
        .player(PlayerSetup::ai("South"))
        .player(PlayerSetup::ai("East"))
        .build(2024)
        .unwrap();

    for _ in 0..300 {
        if game.is_over() {
            break;
        }
        let report = game.play_ai_turn(&mut SilentOracle).unwrap();
        assert!(report.turn_ended(), "AI turn stopped in {}", report.phase.name());
        assert!(game.pending_decision().is_none());

        for (id, player) in game.state().players.iter() {
            let owned: Vec<TileId> = game.state().board.cities_owned_by(id).map(|t| t.id).collect();
            let recorded: Vec<TileId> = player.properties().iter().copied().collect();
            assert_eq!(owned, recorded);
        }
    }
}

/// Test that a human seat cannot be driven by the AI.
#[test]
fn test_play_ai_turn_requires_ai_seat() {
    let mut game = SandsGameBuilder::new().role(Role::Builder).build(1).unwrap();

    assert_eq!(game.play_ai_turn(&mut SilentOracle).map(|_| ()), Err(EngineError::NotAiControlled(YOU)));
}
