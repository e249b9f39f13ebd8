//! Grid searches that report their progress step by step.
//!
//! Two interchangeable strategies find a path between the start and end
//! cells of a [`Board`](wayfind_core::Board):
//!
//! - **Stack search** ([`StackSearch`]): unweighted, last-in-first-out
//!   frontier; the path is rebuilt by trimming the list of visited cells.
//! - **Cost search** ([`CostSearch`]): weighted best-first with an
//!   octile-style estimate; the path is rebuilt from parent links.
//!
//! Both implement [`Search`], so a caller can drive them one expansion at a
//! time or [`run`](Search::run) them to completion. Progress is reported
//! through the board's `next`, `found` and `sleep` hooks.
//!
//! Paths exclude the start and end cells and run from start to end.

mod config;
mod distance;
mod neighbors;
pub mod reconstruct;
mod stack;
mod strategy;
mod traits;
mod weighted;

pub use config::{CancelToken, CostModel, SearchConfig};
pub use distance::{Cost, manhattan, octile, weight_cost};
pub use neighbors::Neighbors;
pub use stack::StackSearch;
pub use strategy::{ParseStrategyError, Strategy, find_path};
pub use traits::{Outcome, Phase, Search, StopReason};
pub use weighted::{CostEntry, CostSearch};
