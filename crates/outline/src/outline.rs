//! Glyph outline point extraction.
//!
//! Reads a TrueType glyph's points in outline order, the order hint
//! point indices refer to. Composite glyphs are flattened one level,
//! with each component's 2x2 transform and offset applied, matching
//! what an editor shows for the composed outline.

use log::warn;
use read_fonts::{
    FontRef, TableProvider,
    tables::glyf::{Anchor, CompositeGlyph, Glyf, Glyph, SimpleGlyph},
    types::{GlyphId, GlyphId16},
};
use skrifa::MetadataProvider;

use crate::error::{Error, Result};

/// One outline point, in font units.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OutlinePoint {
    pub x: i32,
    pub y: i32,
    pub on_curve: bool,
    /// Contour number within the composed outline
    pub contour: u16,
}

/// A glyph's points in outline order.
#[derive(Clone, Debug)]
pub struct GlyphOutline {
    pub glyph_id: u32,
    /// Postscript name from the post table, when present
    pub name: Option<String>,
    pub units_per_em: u16,
    pub points: Vec<OutlinePoint>,
}

impl GlyphOutline {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points as `(x, y, on_curve, contour)` tuples in outline order.
    pub fn coords(&self) -> impl Iterator<Item = (i32, i32, bool, u16)> + '_ {
        self.points.iter().map(|p| (p.x, p.y, p.on_curve, p.contour))
    }
}

/// Extract the outline of one glyph from raw font bytes.
///
/// The glyph may be named by decimal glyph id, by a single character
/// (looked up through cmap), or by postscript name.
pub fn glyph_outline(data: &[u8], glyph: &str) -> Result<GlyphOutline> {
    let font = FontRef::new(data)?;
    let gid = resolve_glyph(&font, glyph)?;

    let glyf = font.glyf().map_err(|_| Error::NoGlyfTable)?;
    let loca = font.loca(None).map_err(|_| Error::NoGlyfTable)?;
    let units_per_em = font.head()?.units_per_em();

    let mut points = Vec::new();
    match loca.get_glyf(GlyphId::new(gid), &glyf)? {
        Some(Glyph::Simple(simple)) => {
            collect_simple(&simple, 0, None, &mut points);
        }
        Some(Glyph::Composite(composite)) => {
            collect_composite(&composite, &glyf, &loca, &mut points)?;
        }
        // Empty glyph, e.g. space: no points
        None => {}
    }

    Ok(GlyphOutline {
        glyph_id: gid,
        name: glyph_name(&font, gid),
        units_per_em,
        points,
    })
}

fn resolve_glyph(font: &FontRef, glyph: &str) -> Result<u32> {
    let num_glyphs = font.maxp()?.num_glyphs() as u32;

    if let Ok(gid) = glyph.parse::<u32>() {
        if gid < num_glyphs {
            return Ok(gid);
        }
        return Err(Error::GlyphNotFound(glyph.to_string()));
    }

    let mut chars = glyph.chars();
    if let (Some(ch), None) = (chars.next(), chars.next()) {
        if let Some(gid) = font.charmap().map(ch) {
            return Ok(gid.to_u32());
        }
    }

    if let Ok(post) = font.post() {
        for gid in 0..num_glyphs as u16 {
            if post.glyph_name(GlyphId16::new(gid)) == Some(glyph) {
                return Ok(gid as u32);
            }
        }
    }

    Err(Error::GlyphNotFound(glyph.to_string()))
}

fn glyph_name(font: &FontRef, gid: u32) -> Option<String> {
    let post = font.post().ok()?;
    u16::try_from(gid)
        .ok()
        .and_then(|gid| post.glyph_name(GlyphId16::new(gid)))
        .map(str::to_string)
}

/// 2x2 component transform, row-major as in the glyf table.
#[derive(Copy, Clone, Debug)]
struct Affine {
    xx: f32,
    xy: f32,
    yx: f32,
    yy: f32,
    dx: i32,
    dy: i32,
}

impl Affine {
    fn apply(&self, x: i32, y: i32) -> (i32, i32) {
        let fx = x as f32;
        let fy = y as f32;
        (
            (self.xx * fx + self.xy * fy).round() as i32 + self.dx,
            (self.yx * fx + self.yy * fy).round() as i32 + self.dy,
        )
    }
}

fn collect_simple(
    simple: &SimpleGlyph,
    contour_base: u16,
    transform: Option<&Affine>,
    out: &mut Vec<OutlinePoint>,
) -> u16 {
    let end_pts = simple.end_pts_of_contours();
    let mut points_iter = simple.points();
    let mut current_point = 0usize;
    let mut contour = contour_base;

    for end_pt in end_pts {
        let end = end_pt.get() as usize;
        while current_point <= end {
            if let Some(pt) = points_iter.next() {
                let (x, y) = match transform {
                    Some(affine) => affine.apply(pt.x as i32, pt.y as i32),
                    None => (pt.x as i32, pt.y as i32),
                };
                out.push(OutlinePoint { x, y, on_curve: pt.on_curve, contour });
            }
            current_point += 1;
        }
        contour += 1;
    }
    contour
}

fn collect_composite(
    composite: &CompositeGlyph,
    glyf: &Glyf,
    loca: &read_fonts::tables::loca::Loca,
    out: &mut Vec<OutlinePoint>,
) -> Result<()> {
    let mut contour = 0u16;
    for comp in composite.components() {
        let (dx, dy) = match comp.anchor {
            Anchor::Offset { x, y } => (x as i32, y as i32),
            // Point-matching anchors need the composed outline to
            // align against; rare in practice, treated as unanchored.
            Anchor::Point { .. } => {
                warn!("point-anchored component in composite glyph; ignoring anchor");
                (0, 0)
            }
        };
        let affine = Affine {
            xx: comp.transform.xx.to_f32(),
            xy: comp.transform.xy.to_f32(),
            yx: comp.transform.yx.to_f32(),
            yy: comp.transform.yy.to_f32(),
            dx,
            dy,
        };

        match loca.get_glyf(GlyphId::from(comp.glyph), glyf)? {
            Some(Glyph::Simple(simple)) => {
                contour = collect_simple(&simple, contour, Some(&affine), out);
            }
            Some(Glyph::Composite(_)) => {
                // One level of composition is enough for every hinted
                // glyph we have seen; deeper nesting is skipped.
                warn!(
                    "skipping nested composite component {}",
                    comp.glyph.to_u32()
                );
            }
            None => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_bytes_fail_to_parse() {
        assert!(matches!(
            glyph_outline(&[0u8; 16], "A"),
            Err(Error::Parse(_))
        ));
    }

    #[test]
    fn test_empty_data_fails_to_parse() {
        assert!(matches!(glyph_outline(&[], "0"), Err(Error::Parse(_))));
    }

    #[test]
    fn test_identity_transform() {
        let affine = Affine { xx: 1.0, xy: 0.0, yx: 0.0, yy: 1.0, dx: 0, dy: 0 };
        assert_eq!(affine.apply(120, -40), (120, -40));
    }

    #[test]
    fn test_offset_and_scale() {
        let affine = Affine { xx: 0.5, xy: 0.0, yx: 0.0, yy: 0.5, dx: 100, dy: -20 };
        assert_eq!(affine.apply(200, 60), (200, 10));
    }

    #[test]
    fn test_mirror_transform() {
        let affine = Affine { xx: -1.0, xy: 0.0, yx: 0.0, yy: 1.0, dx: 500, dy: 0 };
        assert_eq!(affine.apply(120, 300), (380, 300));
    }
}
