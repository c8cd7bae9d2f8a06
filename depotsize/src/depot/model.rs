//! Depot tree data types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Catalog application identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AppId(pub u32);

impl AppId {
    /// Raw numeric value.
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AppId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(AppId)
    }
}

impl From<u32> for AppId {
    fn from(id: u32) -> Self {
        AppId(id)
    }
}

/// Platform tag carried by a content unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
    /// Any tag the catalog uses that we do not model.
    Other(String),
}

impl Platform {
    /// Parse a catalog platform tag. Unknown tags are kept verbatim.
    pub fn parse(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "windows" | "win" | "win32" | "win64" => Platform::Windows,
            "macos" | "mac" | "osx" => Platform::MacOs,
            "linux" | "steamos" => Platform::Linux,
            other => Platform::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Windows => write!(f, "windows"),
            Platform::MacOs => write!(f, "macos"),
            Platform::Linux => write!(f, "linux"),
            Platform::Other(tag) => write!(f, "{}", tag),
        }
    }
}

/// One addressable chunk of a title's installable content.
///
/// Immutable once built; construct with [`ContentUnit::new`] and the
/// `with_*` methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentUnit {
    id: u32,
    name: String,
    max_size: Option<u64>,
    manifest_size: Option<u64>,
    platforms: Vec<Platform>,
    optional: bool,
}

impl ContentUnit {
    /// Create a unit with no size information, no platform tags and not optional.
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            max_size: None,
            manifest_size: None,
            platforms: Vec::new(),
            optional: false,
        }
    }

    /// Set the authoritative maximum size.
    pub fn with_max_size(mut self, bytes: u64) -> Self {
        self.max_size = Some(bytes);
        self
    }

    /// Set the size recorded by the published build's manifest.
    pub fn with_manifest_size(mut self, bytes: u64) -> Self {
        self.manifest_size = Some(bytes);
        self
    }

    /// Add a platform tag.
    pub fn with_platform(mut self, platform: Platform) -> Self {
        if !self.platforms.contains(&platform) {
            self.platforms.push(platform);
        }
        self
    }

    /// Mark the unit optional (or not).
    pub fn with_optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    /// Unit id, unique within its app.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Display name, carrying free-text region hints.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Authoritative maximum size, if the catalog provides one.
    pub fn max_size(&self) -> Option<u64> {
        self.max_size
    }

    /// Fallback size from the published manifest, if present.
    pub fn manifest_size(&self) -> Option<u64> {
        self.manifest_size
    }

    /// Platform tags. Empty means every platform.
    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    /// Whether the catalog flags this unit optional.
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// True if the unit installs on `platform`.
    pub fn applies_to(&self, platform: &Platform) -> bool {
        self.platforms.is_empty() || self.platforms.contains(platform)
    }

    /// Size this unit contributes: maximum size, else manifest size, else 0.
    ///
    /// This is the single place that resolves missing size fields.
    pub fn resolved_size(&self) -> u64 {
        self.max_size.or(self.manifest_size).unwrap_or(0)
    }
}

/// Content units of one catalog app plus references to its owned extra apps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepotTree {
    app_id: AppId,
    units: Vec<ContentUnit>,
    extra_apps: Vec<AppId>,
}

impl DepotTree {
    /// Create a tree. Duplicate extra-app references and self references are dropped.
    pub fn new(app_id: AppId, units: Vec<ContentUnit>, extra_apps: Vec<AppId>) -> Self {
        let mut deduped = Vec::with_capacity(extra_apps.len());
        for extra in extra_apps {
            if extra != app_id && !deduped.contains(&extra) {
                deduped.push(extra);
            }
        }

        Self {
            app_id,
            units,
            extra_apps: deduped,
        }
    }

    /// Owning app id.
    pub fn app_id(&self) -> AppId {
        self.app_id
    }

    /// All content units, in catalog order.
    pub fn units(&self) -> &[ContentUnit] {
        &self.units
    }

    /// Owned extra (DLC) apps referenced by this title.
    pub fn extra_apps(&self) -> &[AppId] {
        &self.extra_apps
    }

    /// True if the tree has no content units.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}
