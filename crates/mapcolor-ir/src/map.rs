//! The editable region map.
//!
//! Holds regions, their symmetric borders and per-region domains. Every edit
//! keeps borders symmetric: if A borders B, B borders A.

use std::collections::{BTreeMap, BTreeSet};

use crate::types::{
    Color, HeuristicToggles, MapDocument, Palette, RegionDef, RegionId, TypeError,
    MAX_DOMAIN_COLORS,
};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MapError {
    #[error("unknown region {0}")]
    UnknownRegion(RegionId),

    #[error("region {0} cannot border itself")]
    SelfBorder(RegionId),

    #[error("region id must be positive")]
    ZeroRegionId,

    #[error("no region ids left to assign")]
    RegionIdExhausted,

    #[error("region {0} is defined more than once")]
    DuplicateRegion(RegionId),

    #[error("region {0} has an empty domain")]
    EmptyDomain(RegionId),

    #[error("color {color} is not in the domain of region {region}")]
    ColorOutsideDomain { region: RegionId, color: Color },

    #[error(transparent)]
    Type(#[from] TypeError),
}

/// A single region of the map.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    /// Admissible colors, in trial order.
    pub domain: Vec<Color>,
    /// Color fixed by the user before solving.
    pub pinned: Option<Color>,
    /// Color currently shown for the region (last coloring applied).
    pub color: Option<Color>,
    borders: BTreeSet<RegionId>,
}

impl Region {
    fn new(domain: Vec<Color>) -> Self {
        Self {
            domain,
            pinned: None,
            color: None,
            borders: BTreeSet::new(),
        }
    }

    /// Drop a shown or pinned color the domain no longer holds.
    fn clear_colors_outside_domain(&mut self) {
        if self.color.as_ref().is_some_and(|c| !self.domain.contains(c)) {
            self.color = None;
        }
        if self.pinned.as_ref().is_some_and(|c| !self.domain.contains(c)) {
            self.pinned = None;
        }
    }

    pub fn borders(&self) -> &BTreeSet<RegionId> {
        &self.borders
    }

    /// Domain handed to the solver: the pinned color alone, or the full domain.
    pub fn initial_domain(&self) -> Vec<Color> {
        match &self.pinned {
            Some(color) => vec![color.clone()],
            None => self.domain.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegionMap {
    palette: Palette,
    regions: BTreeMap<RegionId, Region>,
    /// `None` once `RegionId::MAX` has been handed out.
    next_id: Option<RegionId>,
}

impl RegionMap {
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            regions: BTreeMap::new(),
            next_id: Some(1),
        }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn region(&self, id: RegionId) -> Option<&Region> {
        self.regions.get(&id)
    }

    pub fn region_ids(&self) -> Vec<RegionId> {
        self.regions.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    fn get_mut(&mut self, id: RegionId) -> Result<&mut Region, MapError> {
        self.regions.get_mut(&id).ok_or(MapError::UnknownRegion(id))
    }

    fn check_pair(&self, a: RegionId, b: RegionId) -> Result<(), MapError> {
        if a == b {
            return Err(MapError::SelfBorder(a));
        }
        for id in [a, b] {
            if !self.regions.contains_key(&id) {
                return Err(MapError::UnknownRegion(id));
            }
        }
        Ok(())
    }

    fn link(&mut self, a: RegionId, b: RegionId) {
        if let Some(region) = self.regions.get_mut(&a) {
            region.borders.insert(b);
        }
        if let Some(region) = self.regions.get_mut(&b) {
            region.borders.insert(a);
        }
    }

    fn unlink(&mut self, a: RegionId, b: RegionId) {
        if let Some(region) = self.regions.get_mut(&a) {
            region.borders.remove(&b);
        }
        if let Some(region) = self.regions.get_mut(&b) {
            region.borders.remove(&a);
        }
    }

    /// Add a region bordering `borders`. Ids that do not exist yet are ignored.
    pub fn add_region(&mut self, borders: &[RegionId]) -> Result<RegionId, MapError> {
        let id = self.next_id.ok_or(MapError::RegionIdExhausted)?;
        self.next_id = id.checked_add(1);
        self.regions
            .insert(id, Region::new(self.palette.colors().to_vec()));

        let existing: Vec<RegionId> = borders
            .iter()
            .copied()
            .filter(|b| *b != id && self.regions.contains_key(b))
            .collect();
        for other in existing {
            self.link(id, other);
        }
        Ok(id)
    }

    /// Add the border `a-b` if absent, remove it if present.
    /// Returns whether the border exists afterwards.
    pub fn toggle_border(&mut self, a: RegionId, b: RegionId) -> Result<bool, MapError> {
        self.check_pair(a, b)?;
        if self.regions[&a].borders.contains(&b) {
            self.unlink(a, b);
            Ok(false)
        } else {
            self.link(a, b);
            Ok(true)
        }
    }

    /// Border every region with every other region.
    pub fn connect_all(&mut self) {
        let ids = self.region_ids();
        for (i, a) in ids.iter().enumerate() {
            for b in &ids[i + 1..] {
                self.link(*a, *b);
            }
        }
    }

    pub fn clear_borders(&mut self) {
        for region in self.regions.values_mut() {
            region.borders.clear();
        }
    }

    /// Replace all borders with `pairs`. Nothing changes if any pair is invalid.
    pub fn set_borders(&mut self, pairs: &[(RegionId, RegionId)]) -> Result<(), MapError> {
        for (a, b) in pairs {
            self.check_pair(*a, *b)?;
        }
        self.clear_borders();
        for (a, b) in pairs {
            self.link(*a, *b);
        }
        Ok(())
    }

    /// Every border once, as `(low, high)`.
    pub fn border_pairs(&self) -> Vec<(RegionId, RegionId)> {
        self.regions
            .iter()
            .flat_map(|(a, region)| {
                region
                    .borders
                    .iter()
                    .filter(move |b| *b > a)
                    .map(move |b| (*a, *b))
            })
            .collect()
    }

    /// Restrict a region's domain. Repeats are dropped and at most
    /// [`MAX_DOMAIN_COLORS`] colors are kept. A shown or pinned color that
    /// falls outside the new domain is cleared.
    pub fn restrict_domain(&mut self, id: RegionId, colors: Vec<Color>) -> Result<(), MapError> {
        let mut domain: Vec<Color> = Vec::with_capacity(colors.len());
        for color in colors {
            if !domain.contains(&color) {
                domain.push(color);
            }
        }
        domain.truncate(MAX_DOMAIN_COLORS);
        if domain.is_empty() {
            return Err(MapError::EmptyDomain(id));
        }

        let region = self.get_mut(id)?;
        region.domain = domain;
        region.clear_colors_outside_domain();
        Ok(())
    }

    /// Give a region the full palette again. A pin or shown color outside
    /// the palette is cleared.
    pub fn reset_domain(&mut self, id: RegionId) -> Result<(), MapError> {
        let full = self.palette.colors().to_vec();
        let region = self.get_mut(id)?;
        region.domain = full;
        region.clear_colors_outside_domain();
        Ok(())
    }

    pub fn reset_all_domains(&mut self) {
        for region in self.regions.values_mut() {
            region.domain = self.palette.colors().to_vec();
            region.clear_colors_outside_domain();
        }
    }

    /// Fix a region to `color` before solving.
    pub fn pin_color(&mut self, id: RegionId, color: Color) -> Result<(), MapError> {
        let region = self.get_mut(id)?;
        if !region.domain.contains(&color) {
            return Err(MapError::ColorOutsideDomain { region: id, color });
        }
        region.color = Some(color.clone());
        region.pinned = Some(color);
        Ok(())
    }

    pub fn unpin(&mut self, id: RegionId) -> Result<(), MapError> {
        self.get_mut(id)?.pinned = None;
        Ok(())
    }

    /// Clear shown colors; pinned regions keep their pinned color.
    pub fn clear_colors(&mut self) {
        for region in self.regions.values_mut() {
            region.color = region.pinned.clone();
        }
    }

    /// Remove every region and restart numbering at 1.
    pub fn clear_all(&mut self) {
        self.regions.clear();
        self.next_id = Some(1);
    }

    pub fn initial_domains(&self) -> BTreeMap<RegionId, Vec<Color>> {
        self.regions
            .iter()
            .map(|(id, region)| (*id, region.initial_domain()))
            .collect()
    }

    pub fn adjacency(&self) -> BTreeMap<RegionId, BTreeSet<RegionId>> {
        self.regions
            .iter()
            .map(|(id, region)| (*id, region.borders.clone()))
            .collect()
    }

    /// Show a coloring. Regions missing from `coloring` are left untouched.
    pub fn apply_coloring(&mut self, coloring: &BTreeMap<RegionId, Option<Color>>) {
        for (id, color) in coloring {
            if let Some(region) = self.regions.get_mut(id) {
                region.color = color.clone();
            }
        }
    }

    /// Number of distinct colors currently shown.
    pub fn colors_used(&self) -> usize {
        self.regions
            .values()
            .filter_map(|r| r.color.as_ref())
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Build a map from a document, validating ids, borders and domains.
    pub fn from_document(document: &MapDocument) -> Result<Self, MapError> {
        let palette = document.palette.clone().unwrap_or_default();
        let mut map = RegionMap::new(palette);

        for def in &document.regions {
            if def.id == 0 {
                return Err(MapError::ZeroRegionId);
            }
            if map.regions.contains_key(&def.id) {
                return Err(MapError::DuplicateRegion(def.id));
            }
            map.regions
                .insert(def.id, Region::new(map.palette.colors().to_vec()));
            if let Some(domain) = &def.domain {
                map.restrict_domain(def.id, domain.clone())?;
            }
            if let Some(color) = &def.color {
                map.pin_color(def.id, color.clone())?;
            }
        }
        map.next_id = match map.regions.keys().next_back() {
            Some(max) => max.checked_add(1),
            None => Some(1),
        };

        for (a, b) in &document.borders {
            map.check_pair(*a, *b)?;
            map.link(*a, *b);
        }
        Ok(map)
    }

    pub fn to_document(&self, heuristics: Option<HeuristicToggles>) -> MapDocument {
        let regions = self
            .regions
            .iter()
            .map(|(id, region)| RegionDef {
                id: *id,
                domain: (region.domain.as_slice() != self.palette.colors())
                    .then(|| region.domain.clone()),
                color: region.pinned.clone(),
            })
            .collect();
        MapDocument {
            palette: Some(self.palette.clone()),
            regions,
            borders: self.border_pairs(),
            heuristics,
        }
    }
}

impl Default for RegionMap {
    fn default() -> Self {
        Self::new(Palette::standard())
    }
}
