use std::env;
use std::process;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use chess_game::board::Color;
use chess_game::game::Game;

const USAGE: &str =
    "usage: chess_game [--depth N] [--fen FEN] [--plies N] [--random-opening N] [--seed S]";

struct Options {
    depth: u32,
    fen: Option<String>,
    plies: usize,
    random_opening: usize,
    seed: u64,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            depth: 3,
            fen: None,
            plies: 200,
            random_opening: 0,
            seed: 0,
        }
    }
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    fn number<T: std::str::FromStr>(flag: &str, value: Option<&String>) -> Result<T, String> {
        let value = value.ok_or_else(|| format!("{flag} needs a value"))?;
        value
            .parse()
            .map_err(|_| format!("{flag}: not a number: {value}"))
    }

    let mut options = Options::default();
    let mut iter = args.iter();
    while let Some(flag) = iter.next() {
        match flag.as_str() {
            "--depth" => options.depth = number(flag, iter.next())?,
            "--plies" => options.plies = number(flag, iter.next())?,
            "--random-opening" => options.random_opening = number(flag, iter.next())?,
            "--seed" => options.seed = number(flag, iter.next())?,
            "--fen" => {
                let fen = iter.next().ok_or("--fen needs a value")?;
                options.fen = Some(fen.clone());
            }
            "-h" | "--help" => return Err(USAGE.to_string()),
            other => return Err(format!("unknown argument: {other}\n{USAGE}")),
        }
    }
    Ok(options)
}

fn print_move(game: &Game, san: &str) {
    let Some(last) = game.history().last() else {
        return;
    };
    let number = game.position().fullmove_number();
    match last.color {
        Color::White => print!("{number}. {san} "),
        // Black's move has already advanced the counter.
        Color::Black if game.history().len() == 1 => print!("{}... {san} ", number - 1),
        Color::Black => print!("{san} "),
    }
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{message}");
            process::exit(2);
        }
    };

    let mut game = match options.fen.as_deref() {
        Some(fen) => match Game::from_fen(fen) {
            Ok(game) => game,
            Err(err) => {
                eprintln!("invalid FEN: {err}");
                process::exit(2);
            }
        },
        None => Game::new(),
    };

    let mut rng = StdRng::seed_from_u64(options.seed);
    for ply in 0..options.plies {
        if game.result().is_some() {
            break;
        }
        let mv = if ply < options.random_opening {
            game.position().legal_moves().choose(&mut rng).copied()
        } else {
            game.best_move(options.depth)
        };
        let Some(mv) = mv else {
            break;
        };
        match game.make_move(mv.from(), mv.to(), mv.promotion()) {
            Ok(outcome) => print_move(&game, &outcome.san),
            Err(err) => {
                eprintln!("engine produced a rejected move {mv}: {err}");
                process::exit(1);
            }
        }
    }
    println!();
    println!("{}", game.to_fen());
    match game.result() {
        Some(result) => println!("{result}"),
        None => println!("Unfinished after {} plies", game.history().len()),
    }
}
