//! Search configuration and cancellation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Options shared by every search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchConfig {
    /// Stop with [`StopReason::StepLimit`](crate::StopReason::StepLimit)
    /// after this many expansions. `None` searches until the grid is
    /// exhausted.
    pub max_steps: Option<usize>,
}

impl SearchConfig {
    /// Config with a step limit.
    pub fn with_max_steps(max_steps: usize) -> Self {
        Self {
            max_steps: Some(max_steps),
        }
    }
}

/// Constants of the cost search estimate, in hundredths of a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostModel {
    /// Cost of one straight step.
    pub straight: i64,
    /// Cost of one diagonal-equivalent step (two straight steps sharing a
    /// row and a column change).
    pub diagonal: i64,
    /// A cell weight of `w` adds `w / weight_divisor` steps to the cost from
    /// the start. Zero disables the weight term.
    pub weight_divisor: i64,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            straight: 100,
            diagonal: 140,
            weight_divisor: 10,
        }
    }
}

/// Cooperative cancellation flag, checked between expansions.
///
/// Clones share the same flag, so one clone can be handed to another thread
/// (or an input handler) while the search runs.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// A fresh, uncancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}
