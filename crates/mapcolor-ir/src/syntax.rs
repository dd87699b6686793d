//! Text syntax used by map editors.
//!
//! - Region lists: `1,2,3`
//! - Border pairs: `1-2, 2-3 3-4` (commas and/or whitespace separate pairs)
//! - Color tokens: a 1-based palette index (`3`) or a hex color (`#45B7D1`, `45b7d1`)

use crate::types::{Color, Palette, RegionId, MAX_DOMAIN_COLORS};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SyntaxError {
    #[error("invalid region id '{0}'")]
    InvalidRegion(String),

    #[error("invalid border pair '{0}': expected A-B")]
    InvalidPair(String),

    #[error("border pair '{0}' joins a region to itself")]
    SelfPair(String),

    #[error("invalid color token '{0}'")]
    InvalidColor(String),

    #[error("no colors given")]
    EmptyDomain,
}

fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
}

fn parse_region(token: &str) -> Result<RegionId, SyntaxError> {
    match token.trim().parse::<RegionId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(SyntaxError::InvalidRegion(token.to_string())),
    }
}

/// Parse a comma/whitespace separated list of region ids. Repeats are dropped.
pub fn parse_region_list(text: &str) -> Result<Vec<RegionId>, SyntaxError> {
    let mut ids = Vec::new();
    for token in tokens(text) {
        let id = parse_region(token)?;
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    Ok(ids)
}

/// Parse border pairs such as `1-2,2-3`. Whitespace around the dash is allowed.
pub fn parse_border_pairs(text: &str) -> Result<Vec<(RegionId, RegionId)>, SyntaxError> {
    let compact = squeeze_dashes(text);
    let mut pairs = Vec::new();
    for token in tokens(&compact) {
        let (a, b) = token
            .split_once('-')
            .ok_or_else(|| SyntaxError::InvalidPair(token.to_string()))?;
        let a = parse_region(a).map_err(|_| SyntaxError::InvalidPair(token.to_string()))?;
        let b = parse_region(b).map_err(|_| SyntaxError::InvalidPair(token.to_string()))?;
        if a == b {
            return Err(SyntaxError::SelfPair(token.to_string()));
        }
        pairs.push((a, b));
    }
    Ok(pairs)
}

/// Remove whitespace on either side of every `-`.
fn squeeze_dashes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '-' {
            while out.ends_with(char::is_whitespace) {
                out.pop();
            }
            out.push('-');
            while chars.peek().is_some_and(|n| n.is_whitespace()) {
                chars.next();
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Resolve one color token against `palette`.
pub fn parse_color_token(token: &str, palette: &Palette) -> Result<Color, SyntaxError> {
    let token = token.trim();
    if !token.is_empty() && token.chars().all(|c| c.is_ascii_digit()) {
        return token
            .parse::<usize>()
            .ok()
            .and_then(|i| palette.by_index(i))
            .cloned()
            .ok_or_else(|| SyntaxError::InvalidColor(token.to_string()));
    }
    Color::parse(token).map_err(|_| SyntaxError::InvalidColor(token.to_string()))
}

/// Parse a domain restriction such as `1, 3, #FF9F43`.
///
/// Duplicates are dropped keeping first occurrence; at most
/// [`MAX_DOMAIN_COLORS`] colors are kept.
pub fn parse_domain(text: &str, palette: &Palette) -> Result<Vec<Color>, SyntaxError> {
    let mut colors: Vec<Color> = Vec::new();
    for token in tokens(text) {
        let color = parse_color_token(token, palette)?;
        if !colors.contains(&color) {
            colors.push(color);
        }
    }
    if colors.is_empty() {
        return Err(SyntaxError::EmptyDomain);
    }
    colors.truncate(MAX_DOMAIN_COLORS);
    Ok(colors)
}
