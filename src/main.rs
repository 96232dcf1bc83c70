use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use elemental_chess::game_state::chess_types::*;
use elemental_chess::move_generation::perft::{perft, perft_divide};
use elemental_chess::session::game_config::{BotKind, GameConfig, GameMode, Variant};
use elemental_chess::session::game_events::GameEvent;
use elemental_chess::session::game_session::{GameSession, SessionPhase};
use elemental_chess::utils::algebraic::{
    coordinate_to_index, index_to_coordinate, move_to_coordinates, parse_move_request,
};
use elemental_chess::utils::render_game_state::{render_game_state, render_with_highlights};

#[derive(Parser, Debug)]
#[command(author, version, about = "Chess with fire, water, earth and air pieces", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play in the terminal
    Play(PlayArgs),
    /// Count legal-move tree nodes
    Perft {
        #[arg(long, default_value_t = 3)]
        depth: u8,

        /// Position string; defaults to the variant's start
        #[arg(long)]
        position: Option<String>,

        #[arg(long, value_enum, default_value_t = Variant::Elemental)]
        variant: Variant,

        /// Print per-move counts
        #[arg(long)]
        divide: bool,
    },
    /// Print the default configuration as JSON
    Config,
}

#[derive(clap::Args, Debug)]
struct PlayArgs {
    /// JSON configuration file; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum)]
    mode: Option<GameMode>,

    #[arg(long, value_enum)]
    variant: Option<Variant>,

    /// Starting layout or position string
    #[arg(long)]
    layout: Option<String>,

    /// Side played by the bot: 'w' or 'b'
    #[arg(long)]
    bot_side: Option<String>,

    #[arg(long, value_enum)]
    bot_kind: Option<BotKind>,

    #[arg(long)]
    bot_depth: Option<u8>,

    #[arg(long)]
    think_delay_ms: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    match args.command {
        Command::Play(play_args) => play(load_config(play_args)?),
        Command::Perft {
            depth,
            position,
            variant,
            divide,
        } => run_perft(depth, position, variant, divide),
        Command::Config => {
            println!("{}", GameConfig::default().to_json()?);
            Ok(())
        }
    }
}

fn parse_color(color_str: &str) -> Result<Color> {
    match color_str.to_lowercase().as_str() {
        "w" | "white" | "light" => Ok(Color::Light),
        "b" | "black" | "dark" => Ok(Color::Dark),
        _ => bail!("Invalid color: use 'w' or 'b'"),
    }
}

fn load_config(args: PlayArgs) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            GameConfig::from_json(&json)?
        }
        None => GameConfig::default(),
    };

    if let Some(mode) = args.mode {
        config.mode = mode;
    }
    if let Some(variant) = args.variant {
        config.variant = variant;
    }
    if let Some(layout) = args.layout {
        config.layout = Some(layout);
    }
    if let Some(side) = args.bot_side.as_deref() {
        config.bot_side = parse_color(side)?;
    }
    if let Some(kind) = args.bot_kind {
        config.bot_kind = kind;
    }
    if let Some(depth) = args.bot_depth {
        config.bot_depth = depth;
    }
    if let Some(delay) = args.think_delay_ms {
        config.think_delay_ms = delay;
    }

    config.validate()?;
    Ok(config)
}

fn run_perft(depth: u8, position: Option<String>, variant: Variant, divide: bool) -> Result<()> {
    let game = match position {
        Some(position) => GameState::from_position(&position)?,
        None => GameState::from_layout(variant.layout())?,
    };

    let start = Instant::now();
    if divide {
        let mut total = 0usize;
        for (mv, nodes) in perft_divide(&game, depth)? {
            let (from, to) = move_to_coordinates(mv)?;
            let promo = mv.promotion.map(|k| k.letter().to_string()).unwrap_or_default();
            println!("{from}{to}{promo}: {nodes}");
            total += nodes;
        }
        println!("\nNodes: {total}");
    } else {
        let counts = perft(&game, depth)?;
        println!("{counts:#?}");
    }
    println!("Time: {:.3}s", start.elapsed().as_secs_f64());
    Ok(())
}

const HELP: &str = "\
Commands:
  e2e4 | e2 e4      move (append a letter to pick a promotion: a7a8q)
  select e2         show the destinations of a piece
  promote <letter>  finish a promotion (q r b n f w e a)
  undo | redo       step through the history
  history           print the move list
  new               start over
  quit";

fn play(config: GameConfig) -> Result<()> {
    let mut session = GameSession::new(config)?;
    println!("{HELP}\n");
    println!("{}", render_game_state(session.game()));
    print_events(&mut session);

    let stdin = io::stdin();
    loop {
        if *session.phase() == SessionPhase::BotPending {
            println!("{} is thinking...", session.game().side_to_move.name());
            session.run_bot_turn()?;
            println!("{}", render_game_state(session.game()));
            print_events(&mut session);
            continue;
        }
        if let SessionPhase::GameOver(_) = session.phase() {
            println!("Game over. Type 'new', 'undo' or 'quit'.");
        }

        print!("{}> ", session.game().side_to_move.name());
        io::stdout().flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            return Ok(());
        }
        let input = input.trim();
        let mut words = input.split_whitespace();

        let outcome = match (words.next(), words.next()) {
            (None, _) => continue,
            (Some("quit" | "exit"), _) => return Ok(()),
            (Some("help"), _) => {
                println!("{HELP}");
                continue;
            }
            (Some("history"), _) => {
                println!("{}", session.history_text()?);
                continue;
            }
            (Some("undo"), _) => session.undo().map(|_| ()),
            (Some("redo"), _) => session.redo().map(|_| ()),
            (Some("new"), _) => session.new_game(),
            (Some("select"), Some(coord)) => match coordinate_to_index(coord) {
                Ok(square) => match session.select(square).map(|d| d.to_vec()) {
                    Ok(destinations) => {
                        println!("{}", render_with_highlights(session.game(), &destinations));
                        Ok(())
                    }
                    Err(err) => Err(err),
                },
                Err(err) => Err(err),
            },
            (Some("promote"), Some(letter)) => {
                match letter.chars().next().and_then(PieceKind::from_letter) {
                    Some(kind) => session.promote(kind),
                    None => {
                        println!("Unknown piece letter '{letter}'");
                        continue;
                    }
                }
            }
            _ => parse_move_request(input).and_then(|mv| session.request_move(mv)),
        };

        match outcome {
            Ok(()) => {
                if !input.starts_with("select") {
                    println!("{}", render_game_state(session.game()));
                }
                print_events(&mut session);
            }
            Err(err) => println!("{err}"),
        }
    }
}

fn print_events(session: &mut GameSession) {
    for event in session.drain_events() {
        match event {
            GameEvent::MoveRecorded(line) => println!("{}. {line}", session.game().history.len()),
            GameEvent::PromotionRequired { square, .. } => {
                let coord = index_to_coordinate(square).unwrap_or_default();
                println!("Pawn on {coord} promotes: type 'promote <q|r|b|n|f|w|e|a>'");
            }
            GameEvent::Check(color) => println!("{} is in check!", color.name()),
            GameEvent::Checkmate { winner } => println!("Checkmate! {} wins.", winner.name()),
            GameEvent::Stalemate => println!("Stalemate. The game is drawn."),
            GameEvent::NewGame => println!("New game."),
            GameEvent::SquaresChanged(_)
            | GameEvent::Selected { .. }
            | GameEvent::SelectionCleared
            | GameEvent::TurnChanged(_)
            | GameEvent::BotThinking(_) => {}
        }
    }
}
