//! Turnwright - headless driver
//!
//! Builds a random scenario with one human seat and plays it from the
//! terminal. Every command that ends the human's turn runs the computer
//! players, barbarians and cities until the human is up again.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use turnwright::core::error::Result;
use turnwright::scenario::{build_game, ScenarioConfig};
use turnwright::turn::{RecordingListener, TurnEngine, TurnOutcome};
use turnwright::{EngineConfig, GameData};

#[derive(Parser, Debug)]
#[command(name = "turnwright")]
#[command(about = "Play a turn-based strategy game from the terminal")]
struct Args {
    /// Random seed for map generation and every in-game roll
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of computer players
    #[arg(long, default_value_t = 3)]
    players: u32,

    /// Number of barbarian camps
    #[arg(long, default_value_t = 4)]
    camps: u32,

    /// End this many turns without prompting, then exit
    #[arg(long)]
    turns: Option<u32>,

    /// Engine tunables (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the event log as JSON on exit
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("turnwright=info")),
        )
        .init();

    let args = Args::parse();

    let engine_config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    let scenario = ScenarioConfig {
        seed: args.seed,
        ai_players: args.players,
        camps: args.camps,
        ..ScenarioConfig::default()
    };
    let mut game = build_game(&scenario, engine_config)?;
    let mut engine = TurnEngine::with_listener(RecordingListener::new());

    let outcome = engine.advance_turn(&mut game)?;
    report(&game, outcome);

    match args.turns {
        Some(n) => {
            for _ in 0..n {
                let outcome = engine.end_turn(&mut game)?;
                report(&game, outcome);
            }
        }
        None => repl(&mut engine, &mut game)?,
    }

    let violations = game.invariant_violations();
    for violation in &violations {
        tracing::error!("World invariant broken: {}", violation);
    }

    if args.json {
        println!("{}", game.log.to_json()?);
    } else {
        println!(
            "\nFinal state: turn {}, {} units, {} cities, {} logged errors.",
            game.turn,
            game.units.len(),
            game.cities.len(),
            game.log.errors().count()
        );
    }
    Ok(())
}

fn repl(engine: &mut TurnEngine<RecordingListener>, game: &mut GameData) -> Result<()> {
    println!("\n=== TURNWRIGHT ===");
    println!("Commands:");
    println!("  end / e         - End your turn");
    println!("  run <n>         - End n turns in a row");
    println!("  status / s      - Show players and cities");
    println!("  units           - List your units");
    println!("  log             - Show this turn's events");
    println!("  quit / q        - Exit");
    println!();

    loop {
        print!("[turn {}] > ", game.turn);
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        match input {
            "" => continue,
            "quit" | "q" => break,
            "end" | "e" => {
                let outcome = engine.end_turn(game)?;
                report(game, outcome);
            }
            "status" | "s" => display_status(game),
            "units" => display_units(game),
            "log" => display_log(game),
            _ => {
                if let Some(arg) = input.strip_prefix("run ") {
                    match arg.trim().parse::<u32>() {
                        Ok(n) => {
                            for _ in 0..n {
                                let outcome = engine.end_turn(game)?;
                                report(game, outcome);
                            }
                        }
                        Err(_) => println!("Usage: run <number>"),
                    }
                } else {
                    println!("Unknown command. Available: end, run <n>, status, units, log, quit");
                }
            }
        }
    }
    Ok(())
}

fn report(game: &GameData, outcome: TurnOutcome) {
    match outcome {
        TurnOutcome::AwaitingPlayer(player) => {
            let name = game.player(player).map(|p| p.name.as_str()).unwrap_or("?");
            println!("Turn {}: your move, {}.", game.turn, name);
        }
        TurnOutcome::TurnCompleted { turn } => println!("Turn {} complete.", turn),
    }
}

fn display_status(game: &GameData) {
    println!("Turn {}", game.turn);
    for player in &game.players {
        let marker = if Some(player.id) == game.ui_controller { "*" } else { " " };
        println!(
            " {} {:<12} units: {:>3}  cities: {:>2}",
            marker,
            player.name,
            game.units_of(player.id).len(),
            game.cities_of(player.id).len()
        );
    }
    for (_, city) in game.cities.iter_ordered() {
        println!(
            "   {:<16} size {:>2}  food {:>3}  shields {:>3}  building {:?}",
            city.name,
            city.size(),
            city.food_stored,
            city.shields_stored,
            city.producing
        );
    }
}

fn display_units(game: &GameData) {
    let Some(player) = game.ui_controller else {
        println!("No player at the UI.");
        return;
    };
    for id in game.units_of(player) {
        let Ok(unit) = game.unit(id) else { continue };
        let name = game
            .rules
            .unit_type(unit.unit_type)
            .map(|p| p.name.as_str())
            .unwrap_or("?");
        let coord = game.map.tile(unit.location).map(|t| t.coord);
        println!(
            "  {:<10} at {:?}  hp {}  moves {}{}",
            name,
            coord,
            unit.hit_points_remaining,
            unit.movement_points_remaining,
            if unit.is_fortified { "  (fortified)" } else { "" }
        );
    }
    if let Some(next) = game.next_unit_awaiting_orders(player) {
        println!("  next awaiting orders: {:?}", next);
    }
}

fn display_log(game: &GameData) {
    let shown = game.turn.saturating_sub(1);
    for turn in shown..=game.turn {
        for event in game.log.events_for_turn(turn) {
            println!("  [{}] {:?}", turn, event);
        }
    }
}
