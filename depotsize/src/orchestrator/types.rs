//! Orchestrator result types

use std::fmt;

/// Final state of one strategy for one `run`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptState {
    /// Not reached because an earlier strategy answered.
    NotTried,
    /// Did not finish within the bound; treated as zero.
    TimedOut,
    /// Raised an error; the message was sent to the notifier.
    Failed(String),
    /// Finished with no answer or zero.
    Empty,
    /// Finished with a non-zero size in bytes.
    Found(u64),
}

impl AttemptState {
    /// Size carried by a `Found` state.
    pub fn size(&self) -> Option<u64> {
        match self {
            AttemptState::Found(size) => Some(*size),
            _ => None,
        }
    }

    /// True once the strategy was invoked.
    pub fn was_tried(&self) -> bool {
        !matches!(self, AttemptState::NotTried)
    }
}

impl fmt::Display for AttemptState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttemptState::NotTried => write!(f, "not tried"),
            AttemptState::TimedOut => write!(f, "timed out"),
            AttemptState::Failed(msg) => write!(f, "failed: {}", msg),
            AttemptState::Empty => write!(f, "no answer"),
            AttemptState::Found(size) => write!(f, "{} bytes", size),
        }
    }
}

/// Why the orchestrator did not invoke any strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No strategies are configured.
    NoStrategies,
    /// The game is neither installed nor a PC title.
    NotEligible,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoStrategies => write!(f, "no size strategies configured"),
            SkipReason::NotEligible => write!(f, "game is neither installed nor a PC title"),
        }
    }
}

/// One strategy's entry in a [`SizeReport`], in the order tried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyAttempt {
    /// Strategy name.
    pub strategy: String,
    /// Whether the strategy was preferred for this game.
    pub preferred: bool,
    /// Final state.
    pub state: AttemptState,
}

/// Outcome of one orchestrated size query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SizeReport {
    /// Every configured strategy, preferred ones first.
    pub attempts: Vec<StrategyAttempt>,
    /// Set when no strategy was invoked.
    pub skipped: Option<SkipReason>,
}

impl SizeReport {
    pub(crate) fn skipped(reason: SkipReason) -> Self {
        Self {
            attempts: Vec::new(),
            skipped: Some(reason),
        }
    }

    /// The exposed install size: the first `Found` value, else `None`.
    pub fn size(&self) -> Option<u64> {
        self.attempts.iter().find_map(|a| a.state.size())
    }

    /// Name of the strategy that answered.
    pub fn answered_by(&self) -> Option<&str> {
        self.attempts
            .iter()
            .find(|a| a.state.size().is_some())
            .map(|a| a.strategy.as_str())
    }

    /// Number of strategies that timed out.
    pub fn timeouts(&self) -> usize {
        self.attempts
            .iter()
            .filter(|a| a.state == AttemptState::TimedOut)
            .count()
    }

    /// Number of strategies that failed with an error.
    pub fn failures(&self) -> usize {
        self.attempts
            .iter()
            .filter(|a| matches!(a.state, AttemptState::Failed(_)))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attempt(name: &str, state: AttemptState) -> StrategyAttempt {
        StrategyAttempt {
            strategy: name.to_string(),
            preferred: false,
            state,
        }
    }

    #[test]
    fn test_report_size_is_first_found() {
        let report = SizeReport {
            attempts: vec![
                attempt("a", AttemptState::TimedOut),
                attempt("b", AttemptState::Found(42)),
                attempt("c", AttemptState::NotTried),
            ],
            skipped: None,
        };

        assert_eq!(report.size(), Some(42));
        assert_eq!(report.answered_by(), Some("b"));
        assert_eq!(report.timeouts(), 1);
        assert_eq!(report.failures(), 0);
    }

    #[test]
    fn test_report_without_answer() {
        let report = SizeReport {
            attempts: vec![
                attempt("a", AttemptState::Empty),
                attempt("b", AttemptState::Failed("boom".into())),
            ],
            skipped: None,
        };

        assert_eq!(report.size(), None);
        assert_eq!(report.answered_by(), None);
        assert_eq!(report.failures(), 1);
    }

    #[test]
    fn test_state_display() {
        assert_eq!(AttemptState::Found(10).to_string(), "10 bytes");
        assert_eq!(AttemptState::Failed("x".into()).to_string(), "failed: x");
        assert!(!AttemptState::NotTried.was_tried());
        assert!(AttemptState::Empty.was_tried());
    }
}
