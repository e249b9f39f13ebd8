use wayfind_core::Position;

use crate::config::CancelToken;

/// Where a search is in its life cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Constructed, no expansion made yet.
    Ready,
    Running,
    /// An [`Outcome`] was produced; further steps return it again.
    Done,
}

/// Why a search stopped before reaching a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StopReason {
    Cancelled,
    StepLimit,
}

/// Result of a finished search.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// The end cell was reached. The path runs from the cell after the start
    /// to the cell before the end; it is empty when start and end touch.
    Found(Vec<Position>),
    /// Every reachable cell was expanded without meeting the end cell.
    Exhausted,
    Stopped(StopReason),
}

impl Outcome {
    pub fn is_found(&self) -> bool {
        matches!(self, Outcome::Found(_))
    }

    /// The path, if one was found.
    pub fn path(&self) -> Option<&[Position]> {
        match self {
            Outcome::Found(path) => Some(path),
            _ => None,
        }
    }

    /// The path, or an empty one when none was found.
    pub fn into_path(self) -> Vec<Position> {
        match self {
            Outcome::Found(path) => path,
            _ => Vec::new(),
        }
    }
}

/// A step-wise grid search bound to a board.
///
/// [`step`](Search::step) performs one expansion and returns `Some` once the
/// search is over. [`run`](Search::run) drives it to completion, giving the
/// board one [`sleep`](wayfind_core::Board::sleep) tick between expansions.
pub trait Search {
    /// Expand once. Returns the outcome when the search is over.
    fn step(&mut self) -> Option<Outcome>;

    /// Current phase.
    fn phase(&self) -> Phase;

    /// Number of expansions made so far.
    fn steps(&self) -> usize;

    /// Pause between expansions; forwards to the board's `sleep`.
    fn tick(&mut self);

    /// End the search early and record `reason` as its outcome.
    fn stop(&mut self, reason: StopReason) -> Outcome;

    /// Run until a result is reached.
    fn run(&mut self) -> Outcome {
        self.run_until(&CancelToken::new())
    }

    /// Run until a result is reached or `cancel` is set. The token is checked
    /// before the first expansion and after every tick.
    fn run_until(&mut self, cancel: &CancelToken) -> Outcome {
        loop {
            if cancel.is_cancelled() {
                return self.stop(StopReason::Cancelled);
            }
            if let Some(outcome) = self.step() {
                return outcome;
            }
            self.tick();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_accessors() {
        let found = Outcome::Found(vec![Position::new(0, 1)]);
        assert!(found.is_found());
        assert_eq!(found.path(), Some(&[Position::new(0, 1)][..]));
        assert_eq!(found.into_path(), vec![Position::new(0, 1)]);

        assert!(!Outcome::Exhausted.is_found());
        assert_eq!(Outcome::Exhausted.path(), None);
        assert!(Outcome::Stopped(StopReason::Cancelled).into_path().is_empty());
    }

    /// Counts down and finishes after `left` steps.
    struct Countdown {
        left: usize,
        steps: usize,
        ticks: usize,
        done: Option<Outcome>,
    }

    impl Search for Countdown {
        fn step(&mut self) -> Option<Outcome> {
            if let Some(o) = &self.done {
                return Some(o.clone());
            }
            self.steps += 1;
            self.left = self.left.saturating_sub(1);
            if self.left == 0 {
                self.done = Some(Outcome::Exhausted);
            }
            self.done.clone()
        }

        fn phase(&self) -> Phase {
            if self.done.is_some() {
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
            self.ticks += 1;
        }

        fn stop(&mut self, reason: StopReason) -> Outcome {
            let outcome = Outcome::Stopped(reason);
            self.done = Some(outcome.clone());
            outcome
        }
    }

    #[test]
    fn run_ticks_between_steps() {
        let mut s = Countdown {
            left: 3,
            steps: 0,
            ticks: 0,
            done: None,
        };
        assert_eq!(s.phase(), Phase::Ready);
        assert_eq!(s.run(), Outcome::Exhausted);
        assert_eq!(s.steps(), 3);
        assert_eq!(s.ticks, 2);
        assert_eq!(s.phase(), Phase::Done);
    }

    #[test]
    fn run_until_honours_cancelled_token() {
        let mut s = Countdown {
            left: 3,
            steps: 0,
            ticks: 0,
            done: None,
        };
        let token = CancelToken::new();
        token.cancel();
        assert_eq!(
            s.run_until(&token),
            Outcome::Stopped(StopReason::Cancelled)
        );
        assert_eq!(s.steps(), 0);
        assert_eq!(s.step(), Some(Outcome::Stopped(StopReason::Cancelled)));
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn outcome_round_trip() {
        for o in [
            Outcome::Found(vec![Position::new(1, 2), Position::new(1, 3)]),
            Outcome::Exhausted,
            Outcome::Stopped(StopReason::StepLimit),
        ] {
            let json = serde_json::to_string(&o).unwrap();
            let back: Outcome = serde_json::from_str(&json).unwrap();
            assert_eq!(o, back);
        }
    }
}
