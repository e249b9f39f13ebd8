use std::collections::HashSet;

use log::{debug, trace};
use wayfind_core::{Board, Position};

use crate::config::SearchConfig;
use crate::neighbors::Neighbors;
use crate::reconstruct::trim_movable;
use crate::traits::{Outcome, Phase, Search, StopReason};

/// Depth-first reachability search with a last-in-first-out frontier.
///
/// The search does not record parents. Instead it keeps the *movable path*:
/// every visited cell that still had an open, unseen neighbour when it was
/// visited. Once the end cell tops the frontier that list is trimmed into
/// the final path (see [`crate::reconstruct`]).
pub struct StackSearch<B: Board> {
    board: B,
    config: SearchConfig,
    frontier: Vec<Position>,
    queued: HashSet<Position>,
    visited: HashSet<Position>,
    movable: Vec<Position>,
    nbuf: Neighbors,
    steps: usize,
    outcome: Option<Outcome>,
}

impl<B: Board> StackSearch<B> {
    /// Create a search over `board` with the default config.
    pub fn new(board: B) -> Self {
        Self::with_config(board, SearchConfig::default())
    }

    /// Create a search over `board`.
    pub fn with_config(board: B, config: SearchConfig) -> Self {
        let start = board.start();
        Self {
            board,
            config,
            frontier: vec![start],
            queued: HashSet::from([start]),
            visited: HashSet::from([start]),
            movable: Vec::new(),
            nbuf: Neighbors::new(),
            steps: 0,
            outcome: None,
        }
    }

    /// The board this search runs on.
    pub fn board(&self) -> &B {
        &self.board
    }

    /// Give the board back.
    pub fn into_board(self) -> B {
        self.board
    }

    /// Cells awaiting expansion; the last one is expanded next.
    pub fn frontier(&self) -> &[Position] {
        &self.frontier
    }

    /// Whether `p` was visited.
    pub fn visited(&self, p: Position) -> bool {
        self.visited.contains(&p)
    }

    /// Visited cells that had somewhere left to go, in visiting order.
    pub fn movable_path(&self) -> &[Position] {
        &self.movable
    }

    /// Whether `p` is open and neither visited nor waiting on the frontier.
    fn unseen(&self, p: Position) -> bool {
        self.board.empty(p) && !self.visited.contains(&p) && !self.queued.contains(&p)
    }

    fn can_move(&self, p: Position) -> bool {
        p.neighbors().into_iter().any(|n| self.unseen(n))
    }

    fn finish(&mut self, outcome: Outcome) -> Outcome {
        debug!(
            "stack search finished after {} steps: {:?}",
            self.steps, outcome
        );
        self.outcome = Some(outcome.clone());
        outcome
    }
}

impl<B: Board> Search for StackSearch<B> {
    fn step(&mut self) -> Option<Outcome> {
        if let Some(outcome) = &self.outcome {
            return Some(outcome.clone());
        }
        let end = self.board.end();
        if self.steps == 0 {
            debug!(
                "stack search from {} to {}",
                self.board.start(),
                end
            );
            if self.board.is_start(end) {
                return Some(self.finish(Outcome::Found(Vec::new())));
            }
        }
        if self.config.max_steps.is_some_and(|max| self.steps >= max) {
            return Some(self.finish(Outcome::Stopped(StopReason::StepLimit)));
        }
        let Some(p) = self.frontier.pop() else {
            return Some(self.finish(Outcome::Exhausted));
        };
        self.steps += 1;
        self.queued.remove(&p);

        let mut nbuf = std::mem::take(&mut self.nbuf);
        for &n in nbuf.cardinal(p, |n| self.unseen(n)) {
            self.frontier.push(n);
            self.queued.insert(n);
            if !self.board.is_end(n) {
                self.board.next(n);
            }
        }
        self.nbuf = nbuf;

        let Some(&head) = self.frontier.last() else {
            return Some(self.finish(Outcome::Exhausted));
        };
        if self.board.is_end(head) {
            let path = trim_movable(&self.movable, end);
            return Some(self.finish(Outcome::Found(path)));
        }

        self.board.found(head);
        self.visited.insert(head);
        if self.can_move(head) {
            self.movable.push(head);
        }
        trace!(
            "expanded {p}, next {head}, frontier {}",
            self.frontier.len()
        );
        None
    }

    fn phase(&self) -> Phase {
        if self.outcome.is_some() {
            Phase::Done
        } else if self.steps == 0 {
            Phase::Ready
        } else {
            Phase::Running
        }
    }

    fn steps(&self) -> usize {
        self.steps
    }

    fn tick(&mut self) {
        self.board.sleep();
    }

    fn stop(&mut self, reason: StopReason) -> Outcome {
        match &self.outcome {
            Some(outcome) => outcome.clone(),
            None => self.finish(Outcome::Stopped(reason)),
        }
    }
}
