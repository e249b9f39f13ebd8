use wayfind_core::{Direction, Position};

/// Cached neighbor computation helper.
///
/// Enumerates the cardinal (4-way) neighbors of a grid position in
/// [`Direction::ALL`] order, filtered by a predicate.
#[derive(Debug, Clone)]
pub struct Neighbors {
    buf: Vec<Position>,
}

impl Default for Neighbors {
    fn default() -> Self {
        Self::new()
    }
}

impl Neighbors {
    /// Create a new `Neighbors` helper.
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(4),
        }
    }

    /// Return the cardinal neighbors of `p`, keeping only those for which
    /// `keep` returns `true`.
    pub fn cardinal(&mut self, p: Position, keep: impl Fn(Position) -> bool) -> &[Position] {
        self.buf.clear();
        for d in Direction::ALL {
            let n = p.step(d);
            if keep(n) {
                self.buf.push(n);
            }
        }
        &self.buf
    }
}
