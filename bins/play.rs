use snake_env::{Config, Error, Game, Renderer, SnakeGame, Status, TextRenderer, Turn};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use std::io::Read;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "play")]
#[command(version, about = "Steer the snake from the terminal: a/d to turn, q to quit (then Enter)")]
struct Cli {
    /// JSON board configuration; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board width in board units
    #[arg(long)]
    width: Option<i32>,

    /// Board height in board units
    #[arg(long)]
    height: Option<i32>,

    /// Obstacle runs per episode
    #[arg(long)]
    obstacles: Option<u32>,

    /// Seed for the board layout; random if unset
    #[arg(long)]
    seed: Option<u64>,

    /// Milliseconds between ticks
    #[arg(long, default_value = "250")]
    tick_ms: u64,

    /// Stop after this many episodes
    #[arg(long)]
    episodes: Option<u32>,
}

enum Input {
    Turn(Turn),
    Quit,
}

fn read_keys(tx: Sender<Input>) {
    let stdin = std::io::stdin();
    let mut handle = stdin.lock();

    let mut buf = [0; 256];

    loop {
        let num = match handle.read(&mut buf) {
            Ok(0) | Err(_) => {
                let _ = tx.send(Input::Quit);
                return;
            }
            Ok(num) => num,
        };

        for b in buf[0..num].iter() {
            let input = match <char as From<u8>>::from(*b).to_ascii_lowercase() {
                'a' => Input::Turn(Turn::CounterClockwise),
                'd' => Input::Turn(Turn::Clockwise),
                'q' => Input::Quit,
                _ => continue,
            };

            if tx.send(input).is_err() {
                return;
            }
        }
    }
}

/// Runs one tick. Returns `true` once the episode is over, which includes the
/// snake filling the board so that food has nowhere left to go.
fn advance<G: SnakeGame>(game: &mut G, turn: Turn) -> Result<bool> {
    match game.step(turn) {
        Ok(step) => {
            if step.done {
                info!(score = game.score(), outcome = ?step.outcome, "game over");
            }

            Ok(step.done)
        }
        Err(Error::NoFreeCell { width, height }) => {
            info!(score = game.score(), width, height, "board full, game over");
            Ok(true)
        }
        Err(err) => Err(err.into()),
    }
}

/// Plays one episode. Returns `false` if the player quit.
fn play(game: &mut Game, rx: &Receiver<Input>, tick: Duration) -> Result<bool> {
    let mut renderer = TextRenderer::new(std::io::stdout()).clearing();

    while let Status::Running = game.status() {
        let mut turn = Turn::Straight;

        // Only the latest key pressed since the last tick counts.
        while let Ok(input) = rx.try_recv() {
            match input {
                Input::Turn(t) => turn = t,
                Input::Quit => return Ok(false),
            }
        }

        let over = advance(game, turn)?;
        renderer.draw(&game.frame())?;

        if over {
            break;
        }

        std::thread::sleep(tick);
    }

    Ok(true)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::from_json_file(path)?,
        None => Config::default(),
    };
    if let Some(width) = cli.width { config.width = width }
    if let Some(height) = cli.height { config.height = height }
    if let Some(obstacles) = cli.obstacles { config.obstacle_count = obstacles }

    let seed = cli.seed.unwrap_or_else(rand::random);
    info!(seed, ?config, "starting");

    let mut game = Game::with_seed(config, seed).context("building the board")?;

    let (tx, rx) = channel();
    std::thread::spawn(move || read_keys(tx));

    let tick = Duration::from_millis(cli.tick_ms);

    loop {
        if !play(&mut game, &rx, tick)? {
            break;
        }

        if let Some(limit) = cli.episodes {
            if game.episode_number() >= limit {
                break;
            }
        }

        game.reset()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filling_the_board_ends_the_episode() {
        // One column, two rows: the snake starts on the bottom cell and the
        // only place for food is the top one.
        let mut game = Game::with_seed(Config::new(20, 40, 0), 5).unwrap();

        assert!(advance(&mut game, Turn::CounterClockwise).unwrap());
        assert_eq!(game.status(), Status::Terminated);
        assert_eq!(game.score(), 1);

        game.reset().unwrap();
        assert_eq!(game.status(), Status::Running);
        assert_eq!(game.episode_number(), 2);
    }

    #[test]
    fn collisions_end_the_episode() {
        let mut game = Game::with_seed(Config::new(20, 40, 0), 5).unwrap();

        assert!(advance(&mut game, Turn::Straight).unwrap());
        assert_eq!(game.status(), Status::Terminated);
    }

    #[test]
    fn stepping_a_finished_game_is_still_an_error() {
        let mut game = Game::with_seed(Config::new(20, 40, 0), 5).unwrap();
        advance(&mut game, Turn::Straight).unwrap();

        let err = advance(&mut game, Turn::Straight).unwrap_err();
        assert_eq!(err.downcast_ref::<Error>(), Some(&Error::Terminated));
    }
}
