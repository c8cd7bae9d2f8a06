//! Disc and ROM image strategy.

use futures::future::BoxFuture;
use tracing::debug;

use super::traits::{CalculatorResult, SizeCalculator};
use crate::game::Game;

/// Image extensions the strategy recognizes (lowercase, without the dot).
pub const DISC_IMAGE_EXTENSIONS: &[&str] = &[
    "iso", "bin", "cue", "chd", "cso", "img", "gcm", "rvz", "wbfs",
];

/// Sizes physical-media titles by the size of their image file.
///
/// Preferred for games that carry a recognized image path. A missing file
/// is an error; an unrecognized or absent path is "unknown".
#[derive(Debug, Default, Clone)]
pub struct DiscImageCalculator;

impl DiscImageCalculator {
    pub fn new() -> Self {
        Self
    }

    fn has_image(game: &Game) -> bool {
        game.image()
            .and_then(|p| p.extension())
            .and_then(|e| e.to_str())
            .is_some_and(|ext| {
                let ext = ext.to_ascii_lowercase();
                DISC_IMAGE_EXTENSIONS.contains(&ext.as_str())
            })
    }
}

impl SizeCalculator for DiscImageCalculator {
    fn name(&self) -> &str {
        "Disc Image"
    }

    fn is_preferred(&self, game: &Game) -> bool {
        Self::has_image(game)
    }

    fn compute<'a>(&'a self, game: &'a Game) -> BoxFuture<'a, CalculatorResult> {
        Box::pin(async move {
            if !Self::has_image(game) {
                return Ok(None);
            }
            let Some(path) = game.image() else {
                return Ok(None);
            };

            let meta = tokio::fs::metadata(path).await?;
            if !meta.is_file() || meta.len() == 0 {
                debug!(path = %path.display(), "Image is not a sized file");
                return Ok(None);
            }
            Ok(Some(meta.len()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_preferred_only_for_known_extensions() {
        let calc = DiscImageCalculator::new();
        assert!(calc.is_preferred(&Game::new("1", "a").with_image_path("/roms/a.ISO")));
        assert!(calc.is_preferred(&Game::new("1", "a").with_image_path("/roms/a.chd")));
        assert!(!calc.is_preferred(&Game::new("1", "a").with_image_path("/roms/a.txt")));
        assert!(!calc.is_preferred(&Game::new("1", "a")));
    }

    #[tokio::test]
    async fn test_compute_returns_file_size() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("game.iso");
        fs::write(&path, vec![0u8; 2048]).unwrap();

        let game = Game::new("1", "a").with_image_path(&path);
        let size = DiscImageCalculator::new().compute(&game).await.unwrap();
        assert_eq!(size, Some(2048));
    }

    #[tokio::test]
    async fn test_compute_missing_file_is_error() {
        let dir = TempDir::new().unwrap();
        let game = Game::new("1", "a").with_image_path(dir.path().join("gone.iso"));

        let result = DiscImageCalculator::new().compute(&game).await;
        assert!(matches!(result, Err(crate::calculator::CalculatorError::Io(_))));
    }

    #[tokio::test]
    async fn test_compute_without_image_is_none() {
        let game = Game::new("1", "a");
        assert_eq!(DiscImageCalculator::new().compute(&game).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_compute_empty_file_is_none() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("blank.bin");
        fs::write(&path, b"").unwrap();

        let game = Game::new("1", "a").with_image_path(&path);
        assert_eq!(DiscImageCalculator::new().compute(&game).await.unwrap(), None);
    }
}
