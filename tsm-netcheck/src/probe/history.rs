use std::collections::VecDeque;
use std::fmt;

use crate::probe::Outcome;


/// Per-probe outcome history, oldest first.
/// With a limit, only the newest `limit` outcomes are kept.
#[derive(Debug, Clone)]
pub struct History {
    outcomes: VecDeque<Outcome>,
    limit: Option<usize>,
    recorded: u64,
}


impl History {
    pub fn new() -> History {
        return History {
            outcomes: VecDeque::new(),
            limit: None,
            recorded: 0,
        };
    }

    pub fn with_limit(limit: Option<usize>) -> History {
        return History {
            outcomes: VecDeque::new(),
            limit,
            recorded: 0,
        };
    }

    pub fn push(&mut self, outcome: Outcome) {
        if let Some(limit) = self.limit {
            if limit == 0 {
                self.recorded += 1;
                return;
            }

            while self.outcomes.len() >= limit {
                self.outcomes.pop_front();
            }
        }

        self.outcomes.push_back(outcome);
        self.recorded += 1;
    }

    /// Number of retained outcomes
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Number of cycles recorded since startup, including dropped ones
    pub fn recorded(&self) -> u64 {
        self.recorded
    }

    /// The newest `width` outcomes, oldest first
    pub fn tail(&self, width: usize) -> impl Iterator<Item = &Outcome> {
        let start = self.outcomes.len().saturating_sub(width);
        self.outcomes.range(start..)
    }
}


impl Default for History {
    fn default() -> Self {
        History::new()
    }
}


impl fmt::Display for History {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for outcome in &self.outcomes {
            write!(f, "{}", outcome.symbol())?;
        }
        Ok(())
    }
}
