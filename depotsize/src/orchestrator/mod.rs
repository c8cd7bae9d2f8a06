//! Size-provider orchestration
//!
//! Chains the configured [`SizeCalculator`](crate::calculator::SizeCalculator)
//! strategies for one game: preferred strategies first, then the rest, each
//! bounded by a timeout, stopping at the first non-zero answer.

mod chain;
mod notify;
mod types;

pub use chain::{SizeProviderOrchestrator, DEFAULT_STRATEGY_TIMEOUT};
pub use notify::{ErrorNotifier, Notification, NotificationBoard, NotificationKey};
pub use types::{AttemptState, SizeReport, SkipReason, StrategyAttempt};
