use std::fmt;

use indexmap::IndexMap;
use tracing::debug;

use crate::error::AxisResult;

use super::AxisAppearance;

/// Identity over the appearance fields that affect measured label size.
///
/// Fields outside this set (domain stroke, outer tick size, transform,
/// zoom flags, ...) never invalidate cached measurements.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StyleKey(String);

impl StyleKey {
    #[must_use]
    pub fn from_appearance(appearance: &AxisAppearance) -> Self {
        let parts = [
            appearance.tick_padding.to_string(),
            appearance.inner_tick_size.to_string(),
            appearance.label_fill().to_hex_rgba(),
            appearance.tick_stroke.to_hex_rgba(),
            appearance.tick_stroke_opacity.to_string(),
            appearance.tick_stroke_width.to_string(),
            appearance.orientation.to_string(),
            appearance.show_tick_labels.to_string(),
            appearance.font_size.to_string(),
            appearance.font_family.clone(),
            appearance.font_weight.to_string(),
            appearance.show_ticks.to_string(),
            appearance.flex_ticks.to_string(),
        ];
        Self(parts.join("-"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StyleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Footprint of one label including the tick-spacing padding on the axis
/// side (width for vertical axes, height for horizontal axes).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LabelExtent {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MeasurementCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
}

/// Label text to measured extent, scoped to one [`StyleKey`]. Entries are
/// only ever added.
#[derive(Debug, Default)]
pub struct MeasurementCache {
    entries: IndexMap<String, LabelExtent>,
    hits: u64,
    misses: u64,
}

impl MeasurementCache {
    pub fn get(&mut self, text: &str) -> Option<LabelExtent> {
        let value = self.entries.get(text).copied();
        if value.is_some() {
            self.hits = self.hits.saturating_add(1);
        }
        value
    }

    pub fn insert(&mut self, text: impl Into<String>, extent: LabelExtent) {
        self.misses = self.misses.saturating_add(1);
        self.entries.insert(text.into(), extent);
    }

    /// Returns the cached extent of `text`, measuring it on a miss.
    pub fn get_or_measure(
        &mut self,
        text: &str,
        measure: impl FnOnce(&str) -> AxisResult<LabelExtent>,
    ) -> AxisResult<LabelExtent> {
        if let Some(extent) = self.get(text) {
            return Ok(extent);
        }
        let extent = measure(text)?;
        self.insert(text, extent);
        Ok(extent)
    }

    #[must_use]
    pub fn contains(&self, text: &str) -> bool {
        self.entries.contains_key(text)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-measured order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, LabelExtent)> {
        self.entries
            .iter()
            .map(|(text, extent)| (text.as_str(), *extent))
    }

    #[must_use]
    pub fn stats(&self) -> MeasurementCacheStats {
        MeasurementCacheStats {
            hits: self.hits,
            misses: self.misses,
            size: self.entries.len(),
        }
    }
}

/// Holds at most one [`MeasurementCache`], tagged with the style it was
/// measured under.
#[derive(Debug, Default)]
pub struct LabelMeasurementCache {
    current: Option<(StyleKey, MeasurementCache)>,
    invalidations: u64,
}

impl LabelMeasurementCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops the live cache when `key` differs from the one it was built
    /// for. Returns `true` when entries were discarded.
    pub fn invalidate_if_style_changed(&mut self, key: &StyleKey) -> bool {
        match &self.current {
            Some((current, _)) if current == key => false,
            Some((previous, cache)) => {
                debug!(
                    previous = %previous,
                    next = %key,
                    discarded = cache.len(),
                    "label measurement cache invalidated"
                );
                self.invalidations = self.invalidations.saturating_add(1);
                self.current = Some((key.clone(), MeasurementCache::default()));
                true
            }
            None => {
                self.current = Some((key.clone(), MeasurementCache::default()));
                false
            }
        }
    }

    /// Cache handle for `key`, replacing any cache built for another key.
    pub fn get(&mut self, key: &StyleKey) -> &mut MeasurementCache {
        self.invalidate_if_style_changed(key);
        let (_, cache) = self
            .current
            .get_or_insert_with(|| (key.clone(), MeasurementCache::default()));
        cache
    }

    #[must_use]
    pub fn style_key(&self) -> Option<&StyleKey> {
        self.current.as_ref().map(|(key, _)| key)
    }

    #[must_use]
    pub fn current(&self) -> Option<&MeasurementCache> {
        self.current.as_ref().map(|(_, cache)| cache)
    }

    #[must_use]
    pub fn invalidations(&self) -> u64 {
        self.invalidations
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}
