use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a region. Ids are positive and handed out by [`crate::RegionMap`]
/// from an incrementing counter.
pub type RegionId = u32;

/// Maximum number of colors a single region's domain may hold.
pub const MAX_DOMAIN_COLORS: usize = 10;

/// The full palette, in trial order.
const STANDARD_COLORS: [&str; 15] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FECA57", "#FF9FF3", "#54A0FF", "#5F27CD",
    "#00D2D3", "#FF9F43", "#FD79A8", "#A29BFE", "#6C5CE7", "#74B9FF", "#00B894",
];

/// Errors building colors and palettes.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TypeError {
    #[error("invalid color '{0}': expected #RRGGBB")]
    InvalidColor(String),

    #[error("palette is empty")]
    EmptyPalette,

    #[error("palette lists color {0} more than once")]
    DuplicateColor(Color),
}

/// An RGB color, normalised to uppercase `#RRGGBB`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(String);

impl Color {
    /// Parse `#RRGGBB` or `RRGGBB` (any case).
    pub fn parse(text: &str) -> Result<Self, TypeError> {
        let trimmed = text.trim();
        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(TypeError::InvalidColor(text.to_string()));
        }
        Ok(Color(format!("#{}", hex.to_ascii_uppercase())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Color {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.0
    }
}

/// Ordered, duplicate-free list of colors. Order is the color trial order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Color>", into = "Vec<Color>")]
pub struct Palette(Vec<Color>);

impl Palette {
    pub fn new(colors: Vec<Color>) -> Result<Self, TypeError> {
        if colors.is_empty() {
            return Err(TypeError::EmptyPalette);
        }
        for (i, color) in colors.iter().enumerate() {
            if colors[..i].contains(color) {
                return Err(TypeError::DuplicateColor(color.clone()));
            }
        }
        Ok(Palette(colors))
    }

    /// The 15-color palette.
    pub fn standard() -> Self {
        Palette(
            STANDARD_COLORS
                .iter()
                .map(|hex| Color(hex.to_string()))
                .collect(),
        )
    }

    /// The first ten colors of the standard palette.
    pub fn compact() -> Self {
        Palette(
            STANDARD_COLORS[..MAX_DOMAIN_COLORS]
                .iter()
                .map(|hex| Color(hex.to_string()))
                .collect(),
        )
    }

    pub fn colors(&self) -> &[Color] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Look up a color by its 1-based palette index.
    pub fn by_index(&self, index: usize) -> Option<&Color> {
        index.checked_sub(1).and_then(|i| self.0.get(i))
    }

    /// 1-based palette index of `color`, if present.
    pub fn index_of(&self, color: &Color) -> Option<usize> {
        self.0.iter().position(|c| c == color).map(|i| i + 1)
    }

    pub fn contains(&self, color: &Color) -> bool {
        self.0.contains(color)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::standard()
    }
}

impl TryFrom<Vec<Color>> for Palette {
    type Error = TypeError;

    fn try_from(colors: Vec<Color>) -> Result<Self, Self::Error> {
        Palette::new(colors)
    }
}

impl From<Palette> for Vec<Color> {
    fn from(palette: Palette) -> Self {
        palette.0
    }
}

// ── Map documents ────────────────────────────────────────────────────

/// A map as exchanged with the outside world (JSON).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapDocument {
    /// Palette shared by every region; the standard palette when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub palette: Option<Palette>,
    pub regions: Vec<RegionDef>,
    /// Undirected borders as `[a, b]` pairs.
    #[serde(default)]
    pub borders: Vec<(RegionId, RegionId)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heuristics: Option<HeuristicToggles>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionDef {
    pub id: RegionId,
    /// Restricted domain; the full palette when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<Vec<Color>>,
    /// Pre-assigned color. Fixes the region's domain to this single color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

/// Variable-ordering toggles stored alongside a map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeuristicToggles {
    #[serde(default = "enabled")]
    pub use_mrv: bool,
    #[serde(default = "enabled")]
    pub use_degree: bool,
}

fn enabled() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_normalises_case_and_hash() {
        let color = Color::parse("45b7d1").unwrap();
        assert_eq!(color.as_str(), "#45B7D1");
        assert_eq!(Color::parse("#45B7D1").unwrap(), color);
    }

    #[test]
    fn test_color_rejects_bad_hex() {
        assert!(Color::parse("#12345").is_err());
        assert!(Color::parse("#GGGGGG").is_err());
        assert!(Color::parse("").is_err());
    }

    #[test]
    fn test_standard_and_compact_palettes() {
        assert_eq!(Palette::standard().len(), 15);
        assert_eq!(Palette::compact().len(), 10);
        assert_eq!(
            Palette::compact().colors(),
            &Palette::standard().colors()[..10]
        );
    }

    #[test]
    fn test_palette_index_is_one_based() {
        let palette = Palette::standard();
        assert_eq!(palette.by_index(1).unwrap().as_str(), "#FF6B6B");
        assert!(palette.by_index(0).is_none());
        assert!(palette.by_index(16).is_none());
        let teal = Color::parse("#4ECDC4").unwrap();
        assert_eq!(palette.index_of(&teal), Some(2));
    }

    #[test]
    fn test_palette_rejects_empty_and_duplicates() {
        assert_eq!(Palette::new(vec![]), Err(TypeError::EmptyPalette));
        let red = Color::parse("#FF0000").unwrap();
        assert!(matches!(
            Palette::new(vec![red.clone(), red]),
            Err(TypeError::DuplicateColor(_))
        ));
    }

    #[test]
    fn test_heuristic_toggles_default_on() {
        let toggles: HeuristicToggles = serde_json::from_str(r#"{"use_mrv": false}"#).unwrap();
        assert!(!toggles.use_mrv);
        assert!(toggles.use_degree);
    }
}
