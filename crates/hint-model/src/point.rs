//! Outline points as seen by the hint model.

use crate::types::PointId;

/// How a point prefers to be labelled in diagnostics and exports.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum LabelPref {
    #[default]
    Index,
    Name,
    Coord,
}

/// One on-curve or off-curve outline point.
///
/// Geometry is fixed when the glyph is loaded; only the display
/// attributes (symbolic name, label preference) mutate afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Point {
    id: PointId,
    contour: u16,
    index_in_contour: u16,
    x: i32,
    y: i32,
    on_curve: bool,
    name: Option<String>,
    pref: LabelPref,
}

impl Point {
    pub fn new(
        id: PointId,
        contour: u16,
        index_in_contour: u16,
        x: i32,
        y: i32,
        on_curve: bool,
    ) -> Self {
        Self {
            id,
            contour,
            index_in_contour,
            x,
            y,
            on_curve,
            name: None,
            pref: LabelPref::default(),
        }
    }

    pub fn id(&self) -> PointId {
        self.id
    }

    pub fn contour(&self) -> u16 {
        self.contour
    }

    pub fn index_in_contour(&self) -> u16 {
        self.index_in_contour
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn on_curve(&self) -> bool {
        self.on_curve
    }

    /// Symbolic name assigned in the glyph's name table, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub(crate) fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    pub fn label_pref(&self) -> LabelPref {
        self.pref
    }

    pub fn set_label_pref(&mut self, pref: LabelPref) {
        self.pref = pref;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_basics() {
        let p = Point::new(PointId::new(3), 0, 3, 120, -40, true);
        assert_eq!(p.id(), PointId::new(3));
        assert_eq!((p.x(), p.y()), (120, -40));
        assert!(p.on_curve());
        assert_eq!(p.name(), None);
        assert_eq!(p.label_pref(), LabelPref::Index);
    }
}
