//! Path reconstruction for both searches.
//!
//! The stack search has no parent links. It keeps the list of cells that
//! still had somewhere to go when they were visited and trims that list in
//! two passes, always in this order: [`truncate_to_end`] then
//! [`prune_detours`].
//!
//! The cost search records a parent per cell and is rebuilt with
//! [`follow_parents`].

use wayfind_core::Position;

/// Cut `movable` right after its first entry bordering `end`.
///
/// Returns `None` when no entry borders `end`.
pub fn truncate_to_end(movable: &[Position], end: Position) -> Option<&[Position]> {
    let i = movable.iter().position(|p| p.is_adjacent(end))?;
    Some(&movable[..=i])
}

/// Remove cells from abandoned branches.
///
/// Walks `path` backwards from its last entry and keeps a cell only if it
/// borders the previously kept one. The result is in the same order as the
/// input and every consecutive pair is 4-adjacent, so pruning an already
/// pruned path returns it unchanged.
pub fn prune_detours(path: &[Position]) -> Vec<Position> {
    let mut kept: Vec<Position> = Vec::with_capacity(path.len());
    for &p in path.iter().rev() {
        match kept.last() {
            Some(&last) if !last.is_adjacent(p) => {}
            _ => kept.push(p),
        }
    }
    kept.reverse();
    kept
}

/// Rebuild the stack search path from its movable-position list.
///
/// When no entry borders `end`, the end was pushed straight from the start
/// cell (which never enters the list) and the path between them is empty.
pub fn trim_movable(movable: &[Position], end: Position) -> Vec<Position> {
    match truncate_to_end(movable, end) {
        Some(prefix) => prune_detours(prefix),
        None => Vec::new(),
    }
}

/// Walk parent links from `end` until `is_root` holds.
///
/// A cell without a parent ends the walk early and is treated as the root.
/// Root cells are not part of the result, which runs from the cell after
/// the root to the cell before `end`. At most `limit` links are followed.
pub fn follow_parents(
    end: Position,
    is_root: impl Fn(Position) -> bool,
    parent: impl Fn(Position) -> Option<Position>,
    limit: usize,
) -> Vec<Position> {
    let mut path = Vec::new();
    let mut cur = end;
    for _ in 0..limit {
        if is_root(cur) {
            break;
        }
        let Some(p) = parent(cur) else {
            break;
        };
        path.push(p);
        cur = p;
    }
    if path.last().is_some_and(|&p| is_root(p) || parent(p).is_none()) {
        path.pop();
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn p(row: i32, col: i32) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn truncate_keeps_first_end_neighbour() {
        let movable = [p(1, 0), p(2, 0), p(2, 1), p(3, 1), p(2, 2)];
        let end = p(2, 3);
        assert_eq!(truncate_to_end(&movable, end), Some(&movable[..]));
        let end = p(3, 0);
        assert_eq!(truncate_to_end(&movable, end), Some(&movable[..2]));
        assert_eq!(truncate_to_end(&movable, p(9, 9)), None);
        assert_eq!(truncate_to_end(&[], end), None);
    }

    #[test]
    fn prune_drops_dead_ends() {
        // Down the left column to a dead end at (3,0), then back up and right.
        let path = [p(1, 0), p(2, 0), p(3, 0), p(1, 1), p(1, 2)];
        assert_eq!(prune_detours(&path), vec![p(1, 0), p(1, 1), p(1, 2)]);
    }

    #[test]
    fn prune_keeps_adjacent_chain() {
        let path = [p(0, 1), p(0, 2), p(1, 2), p(2, 2)];
        assert_eq!(prune_detours(&path), path.to_vec());
    }

    #[test]
    fn prune_is_idempotent() {
        let path = [p(1, 0), p(2, 0), p(3, 0), p(3, 1), p(1, 1), p(1, 2), p(2, 2)];
        let once = prune_detours(&path);
        let twice = prune_detours(&once);
        assert_eq!(once, twice);
        assert!(once.windows(2).all(|w| w[0].is_adjacent(w[1])));
    }

    #[test]
    fn prune_empty() {
        assert!(prune_detours(&[]).is_empty());
        assert_eq!(prune_detours(&[p(4, 4)]), vec![p(4, 4)]);
    }

    #[test]
    fn trim_truncates_then_prunes() {
        let movable = [p(1, 0), p(2, 0), p(3, 0), p(1, 1), p(1, 2), p(0, 2)];
        assert_eq!(trim_movable(&movable, p(1, 3)), vec![p(1, 0), p(1, 1), p(1, 2)]);
    }

    #[test]
    fn trim_without_end_neighbour_is_empty() {
        assert!(trim_movable(&[p(5, 5)], p(0, 1)).is_empty());
    }

    #[test]
    fn follow_parents_walks_to_root() {
        let start = p(0, 0);
        let parents: HashMap<_, _> = [
            (p(0, 3), p(0, 2)),
            (p(0, 2), p(0, 1)),
            (p(0, 1), start),
        ]
        .into_iter()
        .collect();
        let path = follow_parents(p(0, 3), |q| q == start, |q| parents.get(&q).copied(), 10);
        assert_eq!(path, vec![p(0, 1), p(0, 2)]);
    }

    #[test]
    fn follow_parents_stops_at_missing_link() {
        let start = p(0, 0);
        let parents: HashMap<_, _> = [(p(0, 3), p(0, 2)), (p(0, 2), p(0, 1))]
            .into_iter()
            .collect();
        let path = follow_parents(p(0, 3), |q| q == start, |q| parents.get(&q).copied(), 10);
        assert_eq!(path, vec![p(0, 2)]);
    }

    #[test]
    fn follow_parents_from_root_is_empty() {
        let path = follow_parents(p(0, 0), |q| q == p(0, 0), |_| Some(p(9, 9)), 10);
        assert!(path.is_empty());
    }

    #[test]
    fn follow_parents_respects_limit() {
        // A two-cell loop never reaches the root.
        let path = follow_parents(
            p(0, 1),
            |q| q == p(5, 5),
            |q| Some(if q == p(0, 1) { p(0, 2) } else { p(0, 1) }),
            4,
        );
        assert_eq!(path.len(), 4);
    }
}
