use std::io::{self, Write};

use tileseam_core::OverlayGrid;

/// Cell written for an overlay sub-cell without a tile.
pub(crate) const EMPTY_CELL: &str = ".";

/// Writes one overlay row per line, keys separated by single spaces.
pub(crate) fn write_keys(overlay: &OverlayGrid, out: &mut impl Write) -> io::Result<()> {
    let keys = overlay.keys();
    for row in keys.rows() {
        let line = row
            .iter()
            .map(|key| key.as_deref().unwrap_or(EMPTY_CELL))
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(out, "{line}")?;
    }
    Ok(())
}
