//! A [`Board`] that draws search progress to a terminal with crossterm.

use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind},
    queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
};
use log::warn;
use wayfind_core::{Board, GridBoard, Position, Tile};
use wayfind_paths::CancelToken;

const WALL: Color = Color::DarkGrey;
const START: Color = Color::Green;
const END: Color = Color::Red;
const QUEUED: Color = Color::Yellow;
const FOUND: Color = Color::DarkCyan;
const PATH: Color = Color::Magenta;

/// Wraps a [`GridBoard`] and paints every notification it receives.
///
/// Each cell is two terminal columns wide. Output is queued and flushed once
/// per [`sleep`](Board::sleep) tick. Write errors cannot be returned through
/// the board hooks, so the first one is kept for [`take_error`](Self::take_error)
/// and later drawing is skipped.
pub struct TerminalBoard<W: Write> {
    grid: GridBoard,
    out: W,
    delay: Duration,
    cancel: Option<CancelToken>,
    error: Option<io::Error>,
}

impl<W: Write> TerminalBoard<W> {
    /// Create a board drawing to `out`, pausing `delay` per tick.
    pub fn new(grid: GridBoard, out: W, delay: Duration) -> Self {
        Self {
            grid,
            out,
            delay,
            cancel: None,
            error: None,
        }
    }

    /// Poll the keyboard on every tick and cancel `token` on `q` or Esc.
    ///
    /// The terminal must be in raw mode for key presses to arrive.
    pub fn with_input(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// The wrapped grid.
    pub fn grid(&self) -> &GridBoard {
        &self.grid
    }

    /// Split back into the grid and the writer.
    pub fn into_parts(self) -> (GridBoard, W) {
        (self.grid, self.out)
    }

    /// The first write error met while drawing, if any.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    /// Draw the whole board.
    pub fn draw_board(&mut self) -> io::Result<()> {
        for p in self.grid.cells() {
            let color = match self.grid.tile(p) {
                _ if self.grid.is_start(p) => START,
                _ if self.grid.is_end(p) => END,
                Some(Tile::Wall) | None => WALL,
                Some(Tile::Floor(_)) => Color::Reset,
            };
            self.paint(p, color)?;
        }
        self.out.flush()
    }

    /// Draw `path` over the board.
    pub fn draw_path(&mut self, path: &[Position]) -> io::Result<()> {
        for &p in path {
            self.paint(p, PATH)?;
        }
        let rows = self.grid.bounds().rows.max(0) as u16;
        queue!(self.out, cursor::MoveTo(0, rows), ResetColor)?;
        self.out.flush()
    }

    fn paint(&mut self, p: Position, bg: Color) -> io::Result<()> {
        let label = match self.grid.tile(p) {
            Some(Tile::Floor(w)) if w > 1 => format!("{w:>2}"),
            _ => "  ".to_string(),
        };
        queue!(
            self.out,
            cursor::MoveTo((p.col * 2) as u16, p.row as u16),
            SetBackgroundColor(bg),
            SetForegroundColor(Color::Black),
            Print(label),
            ResetColor
        )
    }

    fn keep(&mut self, result: io::Result<()>) {
        if let Err(e) = result {
            if self.error.is_none() {
                warn!("terminal output failed: {e}");
                self.error = Some(e);
            }
        }
    }

    fn poll_quit() -> io::Result<bool> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press
                    && matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
                {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }
}

impl<W: Write> Board for TerminalBoard<W> {
    fn start(&self) -> Position {
        self.grid.start()
    }

    fn end(&self) -> Position {
        self.grid.end()
    }

    fn empty(&self, p: Position) -> bool {
        self.grid.empty(p)
    }

    fn weight(&self, p: Position) -> u32 {
        self.grid.weight(p)
    }

    fn cells(&self) -> Vec<Position> {
        self.grid.cells()
    }

    fn next(&mut self, p: Position) {
        self.grid.next(p);
        if self.error.is_none() {
            let r = self.paint(p, QUEUED);
            self.keep(r);
        }
    }

    fn found(&mut self, p: Position) {
        self.grid.found(p);
        if self.error.is_none() {
            let r = self.paint(p, FOUND);
            self.keep(r);
        }
    }

    fn sleep(&mut self) {
        self.grid.sleep();
        if self.error.is_none() {
            let r = self.out.flush();
            self.keep(r);
        }
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        if let Some(token) = &self.cancel {
            match Self::poll_quit() {
                Ok(true) => token.cancel(),
                Ok(false) => {}
                Err(e) => warn!("keyboard poll failed: {e}"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfind_core::BoardEvent;
    use wayfind_paths::{CostSearch, Search, StackSearch};

    const MAP: &str = "\
S..#
.#2.
...E";

    #[test]
    fn draws_and_journals_a_run() {
        let grid = GridBoard::parse(MAP).unwrap();
        let mut board = TerminalBoard::new(grid, Vec::new(), Duration::ZERO);
        board.draw_board().unwrap();
        let drawn = board.out.len();
        assert!(drawn > 0);

        let path = StackSearch::new(&mut board).run().into_path();
        assert!(!path.is_empty());
        board.draw_path(&path).unwrap();
        assert!(board.take_error().is_none());

        let (grid, out) = board.into_parts();
        assert!(out.len() > drawn);
        assert!(grid.events().contains(&BoardEvent::Tick));
    }

    #[test]
    fn delegates_queries_to_grid() {
        let grid = GridBoard::parse(MAP).unwrap();
        let board = TerminalBoard::new(grid, io::sink(), Duration::ZERO);
        assert_eq!(board.start(), Position::new(0, 0));
        assert_eq!(board.end(), Position::new(2, 3));
        assert!(!board.empty(Position::new(0, 3)));
        assert_eq!(board.weight(Position::new(1, 2)), 2);
        assert_eq!(board.cells().len(), 12);
        assert_eq!(board.grid().wall_count(), 2);
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::other("closed"))
        }
    }

    #[test]
    fn write_errors_do_not_stop_the_search() {
        let grid = GridBoard::parse(MAP).unwrap();
        let mut board = TerminalBoard::new(grid, Broken, Duration::ZERO);
        let outcome = CostSearch::new(&mut board).run();
        assert!(outcome.is_found());
        assert!(board.take_error().is_some());
        assert!(board.take_error().is_none());
    }
}
