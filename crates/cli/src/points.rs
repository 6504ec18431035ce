//! The `points` command: outline point listing.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use log::info;
use stemfit_hint_model::PointIndex;
use stemfit_outline::glyph_outline;

/// Print each outline point's index, coordinate label, contour and
/// curve flag, in outline order.
pub fn print_points(font: &Path, glyph: &str, named_only: bool) -> Result<()> {
    let data = fs::read(font).with_context(|| format!("reading {}", font.display()))?;
    let outline = glyph_outline(&data, glyph)
        .with_context(|| format!("extracting outline for '{glyph}'"))?;

    info!(
        "glyph {} ({} points, {} upem)",
        outline.glyph_id,
        outline.len(),
        outline.units_per_em
    );
    match &outline.name {
        Some(name) => println!("glyph {} ({name})", outline.glyph_id),
        None => println!("glyph {}", outline.glyph_id),
    }

    let index = PointIndex::from_coords(outline.coords());
    for point in index.points() {
        let id = point.id();
        if named_only && index.symbolic_name(id).is_none() {
            continue;
        }
        let label = index.coord_label(id).unwrap_or_default();
        let curve = if point.on_curve() { "on" } else { "off" };
        match index.symbolic_name(id) {
            Some(name) => {
                println!(
                    "{:>4}  {label:<14} contour {:>2}  {curve:<3}  {name}",
                    id.to_u16(),
                    point.contour()
                );
            }
            None => {
                println!(
                    "{:>4}  {label:<14} contour {:>2}  {curve}",
                    id.to_u16(),
                    point.contour()
                );
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_font_reports_path() {
        let err = print_points(Path::new("/nonexistent/font.ttf"), "A", false).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/font.ttf"));
    }
}
