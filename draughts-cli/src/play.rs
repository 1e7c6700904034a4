//! Hotseat play: render the board, validate input against the engine's
//! destination query, submit moves.

use anyhow::Result;
use clap::Args;
use std::io::{self, BufRead, Write};

use draughts_core::{
    Draughts, DraughtsMove, Game, GameStatus, PlayOutcome, Player, Side, Square, STANDARD_SIZE,
};

#[derive(Args)]
pub struct PlayArgs {
    /// Board size (even, at least 6)
    #[arg(long, default_value_t = STANDARD_SIZE)]
    pub size: u8,
}

pub fn run(args: &PlayArgs) -> Result<()> {
    let engine = Draughts::new(args.size)?;
    let mut game = Game::new(
        Player::new(1, "light"),
        Player::new(2, "dark"),
        engine,
    );

    println!("Enter `x y` to list a square's moves, `x y x y` to move, `quit` to stop.");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        render(&game);
        if game.status().is_terminal() {
            break;
        }

        let side = game.turn_holder();
        print!("{side:?}> ");
        io::stdout().flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" {
            break;
        }

        match parse_input(line) {
            Some(Input::Probe(only)) => match game.rules().destinations(only) {
                Ok(dests) if dests.is_empty() => println!("no moves from {only}"),
                Ok(dests) => {
                    let listed: Vec<String> = dests.iter().map(Square::to_string).collect();
                    println!("{only} can reach {}", listed.join(", "));
                }
                Err(err) => println!("{err}"),
            },
            Some(Input::Move(from, to)) => match game.play(side, &DraughtsMove::new(from, to)) {
                Ok(PlayOutcome::TurnEnds) => {}
                Ok(PlayOutcome::ContinueCapture(dests)) => {
                    let listed: Vec<String> = dests.iter().map(Square::to_string).collect();
                    println!("capture chain: the same piece must jump on to {}", listed.join(", "));
                }
                Ok(PlayOutcome::Won(winner)) => {
                    tracing::info!(?winner, "game over");
                }
                Ok(PlayOutcome::Drawn) => {
                    tracing::info!("game drawn");
                }
                Err(err) => println!("{err}"),
            },
            None => println!("could not read that; use `x y` or `x y x y`"),
        }
    }

    match game.status() {
        GameStatus::Won(winner) => {
            let player = game.player(winner);
            println!(
                "{winner:?} ({}) wins with {} captures.",
                player.username,
                player.spoils().len()
            );
        }
        GameStatus::Drawn => println!("Drawn."),
        _ => println!("Game abandoned."),
    }
    Ok(())
}

enum Input {
    Probe(Square),
    Move(Square, Square),
}

/// Parse one or two squares from whitespace/comma separated coordinates.
fn parse_input(line: &str) -> Option<Input> {
    let nums: Vec<i8> = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|tok| !tok.is_empty())
        .map(|tok| tok.parse().ok())
        .collect::<Option<_>>()?;
    match nums.as_slice() {
        &[x, y] => Some(Input::Probe(Square::new(x, y))),
        &[x1, y1, x2, y2] => Some(Input::Move(Square::new(x1, y1), Square::new(x2, y2))),
        _ => None,
    }
}

fn render(game: &Game<Draughts>) {
    let board = game.rules().board();
    let size = board.size() as i8;

    for y in (1..=size).rev() {
        print!("{y:>2} ");
        for x in 1..=size {
            let glyph = match board.piece_at(Square::new(x, y)) {
                Some(p) => match (p.side, p.promoted) {
                    (Side::Light, false) => 'l',
                    (Side::Light, true) => 'L',
                    (Side::Dark, false) => 'd',
                    (Side::Dark, true) => 'D',
                },
                None => '.',
            };
            print!(" {glyph}");
        }
        println!();
    }
    print!("   ");
    for x in 1..=size {
        print!("{x:>2}");
    }
    println!();
    println!(
        "light: {} in hand, {} spoils | dark: {} in hand, {} spoils",
        game.player(Side::Light).hand().len(),
        game.player(Side::Light).spoils().len(),
        game.player(Side::Dark).hand().len(),
        game.player(Side::Dark).spoils().len(),
    );
}
