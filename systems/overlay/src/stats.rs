use std::{collections::BTreeMap, fmt};

use tileseam_core::{LayerName, OverlayGrid};

/// Summary counts of a generated overlay.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OverlayStats {
    /// Overlay width in sub-cells.
    pub width: u32,
    /// Overlay height in sub-cells.
    pub height: u32,
    /// Sub-cells holding a tile.
    pub filled: usize,
    /// Sub-cells no layer claimed.
    pub empty: usize,
    /// Tiles written per layer.
    pub per_layer: BTreeMap<LayerName, usize>,
}

impl OverlayStats {
    /// Counts the tiles of `overlay`.
    #[must_use]
    pub fn collect(overlay: &OverlayGrid) -> Self {
        let mut stats = Self {
            width: overlay.width(),
            height: overlay.height(),
            ..Self::default()
        };
        for cell in overlay.cells() {
            match cell {
                Some(tile) => {
                    stats.filled += 1;
                    *stats.per_layer.entry(tile.layer().clone()).or_insert(0) += 1;
                }
                None => stats.empty += 1,
            }
        }
        stats
    }

    /// Tiles written for `layer`.
    #[must_use]
    pub fn layer_count(&self, layer: &str) -> usize {
        self.per_layer.get(layer).copied().unwrap_or(0)
    }
}

impl fmt::Display for OverlayStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "overlay {}x{}", self.width, self.height)?;
        writeln!(f, "filled {}", self.filled)?;
        write!(f, "empty {}", self.empty)?;
        for (layer, count) in &self.per_layer {
            write!(f, "\nlayer {layer} {count}")?;
        }
        Ok(())
    }
}
