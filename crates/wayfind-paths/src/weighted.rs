use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use log::{debug, trace};
use wayfind_core::{Board, Position};

use crate::config::{CostModel, SearchConfig};
use crate::distance::{Cost, octile, weight_cost};
use crate::neighbors::Neighbors;
use crate::reconstruct::follow_parents;
use crate::traits::{Outcome, Phase, Search, StopReason};

/// A row of the cost table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostEntry {
    /// Best known total estimate through this cell.
    pub distance: Cost,
    pub parent: Option<Position>,
}

impl Default for CostEntry {
    fn default() -> Self {
        Self {
            distance: Cost::INFINITY,
            parent: None,
        }
    }
}

/// Frontier entry, ordered for use in `BinaryHeap`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Queued {
    pos: Position,
    total: Cost,
    to_end: Cost,
    seq: u64,
}

impl Ord for Queued {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (max-heap) pops the smallest total first,
        // then the smallest remaining estimate, then the oldest entry.
        other
            .total
            .cmp(&self.total)
            .then(other.to_end.cmp(&self.to_end))
            .then(other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Weighted best-first search.
///
/// Each cell is priced as `to_start_cost + to_end_cost`, both octile-style
/// estimates; the first also carries the cell's own weight. The frontier is
/// expanded cheapest first. When a cell is settled it is re-parented to its
/// cheapest already-settled neighbour, and the final path is read back by
/// following parent links from the end cell.
pub struct CostSearch<B: Board> {
    board: B,
    config: SearchConfig,
    model: CostModel,
    table: HashMap<Position, CostEntry>,
    frontier: BinaryHeap<Queued>,
    queued: HashSet<Position>,
    visited: HashSet<Position>,
    seq: u64,
    nbuf: Neighbors,
    steps: usize,
    outcome: Option<Outcome>,
}

impl<B: Board> CostSearch<B> {
    /// Create a search over `board` with the default config and cost model.
    pub fn new(board: B) -> Self {
        Self::with_config(board, SearchConfig::default(), CostModel::default())
    }

    /// Create a search over `board`.
    ///
    /// The cost table holds every open cell at infinite distance, and the
    /// start cell at zero.
    pub fn with_config(board: B, config: SearchConfig, model: CostModel) -> Self {
        let start = board.start();
        let mut table: HashMap<Position, CostEntry> = board
            .cells()
            .into_iter()
            .filter(|&p| board.empty(p))
            .map(|p| (p, CostEntry::default()))
            .collect();
        table.insert(
            start,
            CostEntry {
                distance: Cost::ZERO,
                parent: None,
            },
        );
        let mut search = Self {
            board,
            config,
            model,
            table,
            frontier: BinaryHeap::new(),
            queued: HashSet::new(),
            visited: HashSet::new(),
            seq: 0,
            nbuf: Neighbors::new(),
            steps: 0,
            outcome: None,
        };
        search.enqueue(start);
        search
    }

    /// The board this search runs on.
    pub fn board(&self) -> &B {
        &self.board
    }

    /// Give the board back.
    pub fn into_board(self) -> B {
        self.board
    }

    /// The cost table row of `p`, if `p` is an open cell.
    pub fn entry(&self, p: Position) -> Option<CostEntry> {
        self.table.get(&p).copied()
    }

    /// Whether `p` was settled.
    pub fn visited(&self, p: Position) -> bool {
        self.visited.contains(&p)
    }

    /// Whether `p` is waiting on the frontier.
    pub fn queued(&self, p: Position) -> bool {
        self.queued.contains(&p)
    }

    /// Number of cells waiting on the frontier.
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Estimate from the start to `p`, plus the weight of `p`.
    pub fn to_start_cost(&self, p: Position) -> Cost {
        octile(self.board.start(), p, &self.model) + weight_cost(self.board.weight(p), &self.model)
    }

    /// Estimate from `p` to the end.
    pub fn to_end_cost(&self, p: Position) -> Cost {
        octile(p, self.board.end(), &self.model)
    }

    pub fn total_cost(&self, p: Position) -> Cost {
        self.to_start_cost(p) + self.to_end_cost(p)
    }

    /// Sum of [`total_cost`](Self::total_cost) along `path`.
    pub fn estimated_cost(&self, path: &[Position]) -> Cost {
        path.iter().map(|&p| self.total_cost(p)).sum()
    }

    fn enqueue(&mut self, p: Position) {
        self.queued.insert(p);
        self.frontier.push(Queued {
            pos: p,
            total: self.total_cost(p),
            to_end: self.to_end_cost(p),
            seq: self.seq,
        });
        self.seq += 1;
    }

    fn open(&self, p: Position) -> bool {
        self.table.contains_key(&p) && self.board.empty(p)
    }

    /// Re-parent `p` to its cheapest settled neighbour.
    fn adopt_closest_neighbour(&mut self, p: Position) {
        let Some(mut entry) = self.entry(p) else {
            return;
        };
        for n in p.neighbors() {
            if !self.open(n) || !self.visited.contains(&n) {
                continue;
            }
            let Some(neighbour) = self.entry(n) else {
                continue;
            };
            let closer = neighbour.distance < entry.distance
                || (neighbour.distance == entry.distance
                    && entry
                        .parent
                        .is_some_and(|parent| self.to_start_cost(n) < self.to_start_cost(parent)));
            if closer {
                entry.distance = if neighbour.distance != Cost::ZERO {
                    neighbour.distance
                } else {
                    self.total_cost(p)
                };
                entry.parent = Some(n);
            }
        }
        self.table.insert(p, entry);
    }

    fn trace_path(&self) -> Vec<Position> {
        follow_parents(
            self.board.end(),
            |p| self.board.is_start(p),
            |p| self.table.get(&p).and_then(|e| e.parent),
            self.table.len(),
        )
    }

    fn finish(&mut self, outcome: Outcome) -> Outcome {
        debug!(
            "cost search finished after {} steps: {:?}",
            self.steps, outcome
        );
        self.outcome = Some(outcome.clone());
        outcome
    }
}

impl<B: Board> Search for CostSearch<B> {
    fn step(&mut self) -> Option<Outcome> {
        if let Some(outcome) = &self.outcome {
            return Some(outcome.clone());
        }
        let end = self.board.end();
        if self.steps == 0 {
            debug!(
                "cost search from {} to {} over {} open cells",
                self.board.start(),
                end,
                self.table.len()
            );
            if self.board.is_start(end) {
                return Some(self.finish(Outcome::Found(Vec::new())));
            }
        }
        if self.config.max_steps.is_some_and(|max| self.steps >= max) {
            return Some(self.finish(Outcome::Stopped(StopReason::StepLimit)));
        }
        let Some(head) = self.frontier.pop() else {
            return Some(self.finish(Outcome::Exhausted));
        };
        self.steps += 1;
        let p = head.pos;

        let mut nbuf = std::mem::take(&mut self.nbuf);
        for &n in nbuf.cardinal(p, |n| self.open(n) && !self.visited.contains(&n)) {
            let distance = self.total_cost(n);
            self.table.insert(
                n,
                CostEntry {
                    distance,
                    parent: Some(p),
                },
            );
            if !self.queued.contains(&n) {
                self.enqueue(n);
            }
            if !self.board.is_end(n) {
                self.board.next(n);
            }
        }
        self.nbuf = nbuf;

        // Settle.
        self.queued.remove(&p);
        self.visited.insert(p);
        let is_start = self.board.is_start(p);
        if !is_start {
            self.adopt_closest_neighbour(p);
        }
        if !is_start && !self.board.is_end(p) {
            self.board.found(p);
        }
        trace!(
            "settled {p} at {} (total {}, to end {}), frontier {}",
            self.entry(p).map_or(Cost::INFINITY, |e| e.distance),
            head.total,
            head.to_end,
            self.frontier.len()
        );

        if self.queued.contains(&end) {
            let path = self.trace_path();
            return Some(self.finish(Outcome::Found(path)));
        }
        if self.frontier.is_empty() {
            return Some(self.finish(Outcome::Exhausted));
        }
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
