use std::fmt;
use std::str::FromStr;

use wayfind_core::Board;

use crate::config::{CostModel, SearchConfig};
use crate::stack::StackSearch;
use crate::traits::{Outcome, Search};
use crate::weighted::CostSearch;

/// Which search to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    /// [`StackSearch`]: unweighted, depth first.
    Stack,
    /// [`CostSearch`]: weighted, best first.
    Cost,
}

impl Strategy {
    pub const ALL: [Strategy; 2] = [Strategy::Stack, Strategy::Cost];

    /// Build the search for this strategy over `board`.
    pub fn search<'a, B: Board + 'a>(self, board: B, config: SearchConfig) -> Box<dyn Search + 'a> {
        match self {
            Strategy::Stack => Box::new(StackSearch::with_config(board, config)),
            Strategy::Cost => Box::new(CostSearch::with_config(board, config, CostModel::default())),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Stack => write!(f, "stack"),
            Strategy::Cost => write!(f, "cost"),
        }
    }
}

/// Error for an unknown strategy name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStrategyError(String);

impl fmt::Display for ParseStrategyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown strategy '{}' (expected 'stack' or 'cost')", self.0)
    }
}

impl std::error::Error for ParseStrategyError {}

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "stack" | "dfs" => Ok(Strategy::Stack),
            "cost" | "astar" => Ok(Strategy::Cost),
            _ => Err(ParseStrategyError(s.to_string())),
        }
    }
}

/// Run `strategy` over `board` to completion.
pub fn find_path<B: Board>(board: B, strategy: Strategy) -> Outcome {
    strategy.search(board, SearchConfig::default()).run()
}
