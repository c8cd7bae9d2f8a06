//! Install-size strategies.
//!
//! A [`SizeCalculator`] answers two questions for a game: "am I the right
//! strategy to try first?" and "how big is it?". The orchestrator chains
//! several of them.
//!
//! - [`SteamSizeCalculator`] - catalog depot aggregation
//! - [`DiscImageCalculator`] - size of a physical-media image on disk

mod disc;
mod error;
mod steam;
mod traits;

pub use disc::{DiscImageCalculator, DISC_IMAGE_EXTENSIONS};
pub use error::CalculatorError;
pub use steam::SteamSizeCalculator;
pub use traits::{CalculatorResult, SizeCalculator};
