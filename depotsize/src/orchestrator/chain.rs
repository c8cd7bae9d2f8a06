//! Strategy chain with per-call timeouts

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::notify::{ErrorNotifier, Notification, NotificationBoard, NotificationKey};
use super::types::{AttemptState, SizeReport, SkipReason, StrategyAttempt};
use crate::calculator::{CalculatorError, SizeCalculator};
use crate::game::Game;

/// Bound on a single strategy call.
pub const DEFAULT_STRATEGY_TIMEOUT: Duration = Duration::from_secs(7);

/// Tries size strategies in order until one answers.
///
/// Strategies run one at a time. Each call is spawned onto the runtime and
/// awaited under a timeout; a call that overruns is abandoned (left to
/// finish on its own) and counts as zero. Errors and panics are logged,
/// surfaced through the [`ErrorNotifier`] and skipped.
pub struct SizeProviderOrchestrator {
    strategies: Vec<Arc<dyn SizeCalculator>>,
    timeout: Duration,
    notifier: Arc<dyn ErrorNotifier>,
}

impl SizeProviderOrchestrator {
    /// Create an orchestrator over `strategies` in configured order.
    ///
    /// Failures go to a private [`NotificationBoard`] until
    /// [`with_notifier`](Self::with_notifier) replaces it.
    pub fn new(strategies: Vec<Arc<dyn SizeCalculator>>) -> Self {
        Self {
            strategies,
            timeout: DEFAULT_STRATEGY_TIMEOUT,
            notifier: Arc::new(NotificationBoard::new()),
        }
    }

    /// Set the per-strategy timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Send strategy failures to `notifier`.
    pub fn with_notifier(mut self, notifier: Arc<dyn ErrorNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Configured strategy names, in configured order.
    pub fn strategy_names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Strategy indices in try order: preferred for `game` first, then the
    /// rest, each group in configured order.
    pub fn ordered(&self, game: &Game) -> Vec<(usize, bool)> {
        let (preferred, rest): (Vec<_>, Vec<_>) = self
            .strategies
            .iter()
            .enumerate()
            .map(|(i, s)| (i, s.is_preferred(game)))
            .partition(|(_, preferred)| *preferred);

        preferred.into_iter().chain(rest).collect()
    }

    /// Install size of `game` in bytes, or `None` if unknown.
    pub async fn get_size(&self, game: &Game) -> Option<u64> {
        self.run(game).await.size()
    }

    /// Run the chain and report every strategy's outcome.
    pub async fn run(&self, game: &Game) -> SizeReport {
        if self.strategies.is_empty() {
            debug!(game = %game.name, "No size strategies configured");
            return SizeReport::skipped(SkipReason::NoStrategies);
        }
        if !game.is_installed && !game.is_pc() {
            debug!(game = %game.name, "Skipping game that is neither installed nor PC");
            return SizeReport::skipped(SkipReason::NotEligible);
        }

        let order = self.ordered(game);
        let mut attempts: Vec<StrategyAttempt> = order
            .iter()
            .map(|&(i, preferred)| StrategyAttempt {
                strategy: self.strategies[i].name().to_string(),
                preferred,
                state: AttemptState::NotTried,
            })
            .collect();

        let shared = Arc::new(game.clone());

        for (slot, (index, _)) in order.into_iter().enumerate() {
            let strategy = Arc::clone(&self.strategies[index]);
            let state = self.attempt(strategy, Arc::clone(&shared)).await;
            let found = state.size().is_some();
            attempts[slot].state = state;
            if found {
                break;
            }
        }

        let report = SizeReport {
            attempts,
            skipped: None,
        };
        match (report.size(), report.answered_by()) {
            (Some(size), Some(strategy)) => {
                info!(game = %game.name, strategy, size, "Install size found")
            }
            _ => info!(game = %game.name, "Install size unknown"),
        }
        report
    }

    async fn attempt(&self, strategy: Arc<dyn SizeCalculator>, game: Arc<Game>) -> AttemptState {
        let name = strategy.name().to_string();
        let task_game = Arc::clone(&game);
        let handle = tokio::spawn(async move { strategy.compute(&task_game).await });

        let error = match tokio::time::timeout(self.timeout, handle).await {
            Err(_) => {
                warn!(
                    game = %game.name,
                    strategy = %name,
                    timeout_secs = self.timeout.as_secs(),
                    "Size strategy timed out"
                );
                return AttemptState::TimedOut;
            }
            Ok(Ok(Ok(Some(size)))) if size > 0 => return AttemptState::Found(size),
            Ok(Ok(Ok(_))) => {
                debug!(game = %game.name, strategy = %name, "Size strategy had no answer");
                return AttemptState::Empty;
            }
            Ok(Ok(Err(e))) => e,
            Ok(Err(join)) => CalculatorError::Task(join.to_string()),
        };

        warn!(game = %game.name, strategy = %name, error = %error, "Size strategy failed");
        let message = error.to_string();
        self.notifier.notify(Notification {
            key: NotificationKey::new(game.id.clone(), name),
            game_name: game.name.clone(),
            message: message.clone(),
        });
        AttemptState::Failed(message)
    }
}
