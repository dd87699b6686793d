//! Host-side data model for map coloring: regions, colors, palettes,
//! the editable region map and its JSON/text input formats.

pub mod map;
pub mod parse;
pub mod syntax;
pub mod types;

pub use map::{MapError, Region, RegionMap};
pub use types::{Color, MapDocument, Palette, RegionId};
