//! Selfplay command - seeded random playouts
//!
//! Drives the engine end to end with a deterministic RNG: every legal move
//! is taken from the engine's own move list, so a run doubles as a soak
//! test of the rules.

use anyhow::Result;
use clap::Args;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use draughts_core::{Draughts, Game, PlayOutcome, Player, Side, STANDARD_SIZE};

#[derive(Args)]
pub struct SelfplayArgs {
    /// Number of games to play
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// RNG seed (runs are reproducible per seed)
    #[arg(long, default_value = "0")]
    pub seed: u64,

    /// Board size (even, at least 6)
    #[arg(long, default_value_t = STANDARD_SIZE)]
    pub size: u8,

    /// Abandon a game after this many plies
    #[arg(long, default_value = "400")]
    pub max_plies: usize,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single playout
#[derive(Clone, Debug)]
struct GameRecord {
    winner: Option<Side>,
    plies: usize,
    captures: usize,
    promotions: usize,
}

#[derive(Clone, Debug, Default, Serialize)]
struct Summary {
    games: usize,
    light_wins: usize,
    dark_wins: usize,
    unfinished: usize,
    total_plies: usize,
    total_captures: usize,
    total_promotions: usize,
}

pub fn run(args: &SelfplayArgs) -> Result<()> {
    tracing::info!(
        "Starting selfplay: games={}, seed={}, size={}",
        args.games,
        args.seed,
        args.size
    );

    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut summary = Summary {
        games: args.games,
        ..Summary::default()
    };

    for index in 0..args.games {
        let record = play_single_game(&mut rng, args)?;
        match record.winner {
            Some(Side::Light) => summary.light_wins += 1,
            Some(Side::Dark) => summary.dark_wins += 1,
            None => summary.unfinished += 1,
        }
        summary.total_plies += record.plies;
        summary.total_captures += record.captures;
        summary.total_promotions += record.promotions;

        tracing::info!(
            "Game {}: winner={:?}, plies={}, captures={}",
            index + 1,
            record.winner,
            record.plies,
            record.captures
        );
    }

    report(&summary, args.json)?;
    Ok(())
}

fn play_single_game(rng: &mut ChaCha8Rng, args: &SelfplayArgs) -> Result<GameRecord> {
    let mut game = Game::new(
        Player::new(1, "light"),
        Player::new(2, "dark"),
        Draughts::new(args.size)?,
    );

    let mut record = GameRecord {
        winner: None,
        plies: 0,
        captures: 0,
        promotions: 0,
    };

    while record.plies < args.max_plies {
        let moves = game.legal_moves();
        let mv = match moves.choose(rng) {
            Some(mv) => *mv,
            None => break,
        };

        let side = game.turn_holder();
        let before = game.player(side).spoils().len();
        let outcome = game.play(side, &mv)?;
        record.plies += 1;
        record.captures += game.player(side).spoils().len() - before;

        match outcome {
            PlayOutcome::Won(winner) => {
                record.winner = Some(winner);
                break;
            }
            PlayOutcome::Drawn => break,
            PlayOutcome::TurnEnds | PlayOutcome::ContinueCapture(_) => {}
        }
    }

    record.promotions = count_promoted(&game);
    Ok(record)
}

fn count_promoted(game: &Game<Draughts>) -> usize {
    let crowned_on_board = game
        .rules()
        .board()
        .pieces()
        .filter(|(_, p)| p.promoted)
        .count();
    let crowned_in_spoils = [Side::Light, Side::Dark]
        .iter()
        .flat_map(|&side| game.player(side).spoils())
        .filter(|p| p.promoted)
        .count();
    crowned_on_board + crowned_in_spoils
}

fn report(summary: &Summary, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
        return Ok(());
    }

    println!("games:      {}", summary.games);
    println!("light wins: {}", summary.light_wins);
    println!("dark wins:  {}", summary.dark_wins);
    println!("unfinished: {}", summary.unfinished);
    if summary.games > 0 {
        println!(
            "avg plies:  {:.1}",
            summary.total_plies as f64 / summary.games as f64
        );
    }
    println!("captures:   {}", summary.total_captures);
    println!("promotions: {}", summary.total_promotions);
    Ok(())
}
