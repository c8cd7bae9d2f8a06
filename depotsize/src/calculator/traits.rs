//! Size strategy trait.

use futures::future::BoxFuture;

use super::error::CalculatorError;
use crate::game::Game;

/// Outcome of one strategy call.
///
/// `Ok(None)` means "no authoritative answer", which is distinct from an
/// error: the orchestrator moves on silently instead of notifying.
pub type CalculatorResult = Result<Option<u64>, CalculatorError>;

/// A named, pluggable install-size strategy.
///
/// Dyn-compatible so the orchestrator can hold `Arc<dyn SizeCalculator>`.
pub trait SizeCalculator: Send + Sync {
    /// Strategy name, shown to the user and used to key notifications.
    fn name(&self) -> &str;

    /// True if this strategy should be tried before the others for `game`.
    fn is_preferred(&self, game: &Game) -> bool;

    /// Compute the install size of `game` in bytes.
    fn compute<'a>(&'a self, game: &'a Game) -> BoxFuture<'a, CalculatorResult>;
}
