//! Library game record as seen by the size strategies.

use std::path::{Path, PathBuf};

/// Platform names that identify a PC title.
const PC_PLATFORM_MARKERS: &[&str] = &["pc", "windows", "pc (windows)", "pc_windows"];

/// A game from the host library.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Game {
    /// Host library id, used to key notifications.
    pub id: String,
    /// Display title.
    pub name: String,
    /// Library source the game came from (e.g. "Steam").
    pub source: Option<String>,
    /// Identifier the source stores for the game (the catalog app id for Steam).
    pub store_id: Option<String>,
    /// Platform names as the host records them.
    pub platforms: Vec<String>,
    /// Whether the game is installed.
    pub is_installed: bool,
    /// Disc or ROM image, for physical-media titles.
    pub image_path: Option<PathBuf>,
}

impl Game {
    /// Create a game record with an id and title.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the library source.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Set the source's stored id.
    pub fn with_store_id(mut self, store_id: impl Into<String>) -> Self {
        self.store_id = Some(store_id.into());
        self
    }

    /// Add a platform name.
    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platforms.push(platform.into());
        self
    }

    /// Set the installed flag.
    pub fn with_installed(mut self, installed: bool) -> Self {
        self.is_installed = installed;
        self
    }

    /// Set the disc image path.
    pub fn with_image_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.image_path = Some(path.into());
        self
    }

    /// True if any platform name marks the game as a PC title.
    pub fn is_pc(&self) -> bool {
        self.platforms.iter().any(|p| {
            let p = p.trim().to_lowercase();
            PC_PLATFORM_MARKERS.contains(&p.as_str())
        })
    }

    /// True if the game came from `source` (case-insensitive).
    pub fn is_from_source(&self, source: &str) -> bool {
        self.source
            .as_deref()
            .is_some_and(|s| s.trim().eq_ignore_ascii_case(source))
    }

    /// Disc image path, if any.
    pub fn image(&self) -> Option<&Path> {
        self.image_path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_pc() {
        assert!(Game::new("1", "a").with_platform("PC (Windows)").is_pc());
        assert!(Game::new("1", "a").with_platform("pc").is_pc());
        assert!(!Game::new("1", "a").with_platform("Nintendo Switch").is_pc());
        assert!(!Game::new("1", "a").is_pc());
    }

    #[test]
    fn test_is_from_source() {
        let game = Game::new("1", "a").with_source("Steam");
        assert!(game.is_from_source("steam"));
        assert!(!game.is_from_source("gog"));
        assert!(!Game::new("1", "a").is_from_source("steam"));
    }

    #[test]
    fn test_builder() {
        let game = Game::new("id", "Watch_Dogs")
            .with_store_id("243470")
            .with_installed(true)
            .with_image_path("/roms/game.iso");
        assert_eq!(game.store_id.as_deref(), Some("243470"));
        assert!(game.is_installed);
        assert_eq!(game.image(), Some(Path::new("/roms/game.iso")));
    }
}
