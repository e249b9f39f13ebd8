//! Animate a grid search in the terminal.
//!
//! Run: cargo run --bin animate -- --algorithm cost --weight-chance 0.2
//!
//! Press `q` or Esc to stop the search early.

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use crossterm::{cursor, execute, terminal};
use log::info;
use rand::prelude::*;
use wayfind_core::GridBoard;
use wayfind_demos::{BoardSpec, TerminalBoard, random_board};
use wayfind_paths::{CancelToken, Outcome, SearchConfig, Strategy};

#[derive(Parser)]
#[command(name = "animate")]
#[command(author, version, about = "Animate a grid search in the terminal")]
struct Args {
    /// Search to run: stack (dfs) or cost (astar)
    #[arg(short, long, default_value = "stack")]
    algorithm: Strategy,

    /// Board text file; a random board is generated when absent
    #[arg(short, long)]
    map: Option<PathBuf>,

    /// Rows of a random board
    #[arg(long, default_value = "20")]
    rows: i32,

    /// Columns of a random board
    #[arg(long, default_value = "40")]
    cols: i32,

    /// Seed for the random board
    #[arg(short, long, default_value = "1")]
    seed: u64,

    /// Chance of a wall on each random cell
    #[arg(long, default_value = "0.25")]
    walls: f64,

    /// Chance of a weighted floor on each random cell
    #[arg(long, default_value = "0.0")]
    weight_chance: f64,

    /// Pause per tick in milliseconds
    #[arg(short, long, default_value = "20")]
    delay_ms: u64,

    /// Stop after this many expansions
    #[arg(long)]
    max_steps: Option<usize>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn load_board(args: &Args) -> Result<GridBoard, Box<dyn std::error::Error>> {
    if let Some(path) = &args.map {
        let text = std::fs::read_to_string(path)?;
        return Ok(text.parse::<GridBoard>()?);
    }
    let spec = BoardSpec {
        rows: args.rows,
        cols: args.cols,
        wall_density: args.walls,
        weight_chance: args.weight_chance,
        ..BoardSpec::default()
    };
    let mut rng = StdRng::seed_from_u64(args.seed);
    Ok(random_board(&spec, &mut rng)?)
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let grid = load_board(args)?;
    info!(
        "{} search on a {} board with {} walls",
        args.algorithm,
        grid.bounds(),
        grid.wall_count()
    );
    let config = SearchConfig {
        max_steps: args.max_steps,
    };
    let token = CancelToken::new();
    let delay = Duration::from_millis(args.delay_ms);
    let mut board = TerminalBoard::new(grid, io::stdout(), delay).with_input(token.clone());

    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        terminal::EnterAlternateScreen,
        cursor::Hide,
        terminal::Clear(terminal::ClearType::All)
    )?;

    let result = animate(&mut board, args.algorithm, config, &token);

    let _ = execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    let outcome = result?;
    if let Some(e) = board.take_error() {
        return Err(e.into());
    }
    let (grid, _) = board.into_parts();
    let mut stdout = stdout.lock();
    writeln!(stdout, "{}", grid.render(outcome.path().unwrap_or(&[])))?;
    match &outcome {
        Outcome::Found(path) => writeln!(stdout, "path of {} cells", path.len())?,
        Outcome::Exhausted => writeln!(stdout, "no path")?,
        Outcome::Stopped(reason) => writeln!(stdout, "stopped: {reason:?}")?,
    }
    Ok(())
}

/// Draw the board, run the search on it and draw the result. Waits for a key
/// before returning so the final frame stays visible.
fn animate(
    board: &mut TerminalBoard<io::Stdout>,
    strategy: Strategy,
    config: SearchConfig,
    token: &CancelToken,
) -> io::Result<Outcome> {
    board.draw_board()?;
    let outcome = strategy.search(&mut *board, config).run_until(token);
    info!("search finished: {outcome:?}");
    if let Outcome::Found(path) = &outcome {
        board.draw_path(path)?;
    }
    if !token.is_cancelled() {
        wait_for_key()?;
    }
    Ok(outcome)
}

fn wait_for_key() -> io::Result<()> {
    use crossterm::event::{self, Event, KeyEventKind};
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(());
            }
        }
    }
}
