//! Identifier resolution against a glyph's point list.
//!
//! Built once per glyph load: an array of points in outline order, a
//! coordinate-label map over offset-adjusted positions, and a name
//! table mapping symbolic names to identifiers (which may themselves
//! be symbolic, hence the recursion limit).

use std::collections::HashMap;

use indexmap::IndexMap;
use log::warn;

use crate::{
    error::{Error, Result},
    identifier::Identifier,
    point::Point,
    types::PointId,
};

/// Resolution recursion limit; guards against cyclic name tables.
const MAX_DEPTH: usize = 20;

/// A resolved identifier: a concrete point or a composite of them.
#[derive(Clone, Debug, PartialEq)]
pub enum Resolved {
    Point(PointId),
    /// Ordered multi-point set
    Set(Vec<PointId>),
    /// Named point parameters, key order preserved
    Group(IndexMap<String, Resolved>),
}

impl Resolved {
    /// All concrete points, in order. Groups flatten in key order.
    pub fn flatten(&self) -> Vec<PointId> {
        let mut out = Vec::new();
        self.collect(&mut out);
        out
    }

    fn collect(&self, out: &mut Vec<PointId>) {
        match self {
            Resolved::Point(p) => out.push(*p),
            Resolved::Set(points) => out.extend_from_slice(points),
            Resolved::Group(map) => {
                for value in map.values() {
                    value.collect(out);
                }
            }
        }
    }

    /// The first concrete point, if any.
    pub fn first(&self) -> Option<PointId> {
        match self {
            Resolved::Point(p) => Some(*p),
            Resolved::Set(points) => points.first().copied(),
            Resolved::Group(map) => map.values().find_map(Resolved::first),
        }
    }
}

/// Point lookup for one glyph: by index, coordinate label, or symbolic
/// name.
#[derive(Clone, Debug, Default)]
pub struct PointIndex {
    points: Vec<Point>,
    coords: HashMap<String, PointId>,
    names: IndexMap<String, Identifier>,
    x_offset: i32,
    y_offset: i32,
}

impl PointIndex {
    /// Build the index. Coordinate labels use offset-adjusted
    /// positions, matching how the outline source reports them.
    pub fn new(points: Vec<Point>, x_offset: i32, y_offset: i32) -> Self {
        let coords = points
            .iter()
            .map(|p| (coord_key(p.x() - x_offset, p.y() - y_offset), p.id()))
            .collect();
        Self { points, coords, names: IndexMap::new(), x_offset, y_offset }
    }

    /// Build from raw `(x, y, on_curve, contour)` tuples in outline
    /// order, with no coordinate offsets.
    pub fn from_coords(coords: impl IntoIterator<Item = (i32, i32, bool, u16)>) -> Self {
        let mut points = Vec::new();
        let mut contour_pos: HashMap<u16, u16> = HashMap::new();
        for (i, (x, y, on_curve, contour)) in coords.into_iter().enumerate() {
            let pos = contour_pos.entry(contour).or_insert(0);
            points.push(Point::new(PointId::new(i as u16), contour, *pos, x, y, on_curve));
            *pos += 1;
        }
        Self::new(points, 0, 0)
    }

    /// Bind a symbolic name. A scalar index binding also names the
    /// point itself, for display.
    pub fn define_name(&mut self, name: impl Into<String>, value: Identifier) {
        let name = name.into();
        if let Identifier::Index(i) = value {
            if let Some(point) = self.points.get_mut(i as usize) {
                point.set_name(Some(name.clone()));
            }
        }
        self.names.insert(name, value);
    }

    pub fn point(&self, id: PointId) -> Option<&Point> {
        self.points.get(id.as_usize())
    }

    pub fn point_mut(&mut self, id: PointId) -> Option<&mut Point> {
        self.points.get_mut(id.as_usize())
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The `{x;y}` label for a point, in offset-adjusted coordinates.
    pub fn coord_label(&self, id: PointId) -> Option<String> {
        self.point(id)
            .map(|p| coord_key(p.x() - self.x_offset, p.y() - self.y_offset))
    }

    pub fn symbolic_name(&self, id: PointId) -> Option<&str> {
        self.point(id).and_then(Point::name)
    }

    /// Resolve an identifier to a point or composite.
    ///
    /// Fails with [`Error::CyclicIdentifier`] past the recursion limit
    /// and [`Error::PointRange`]/[`Error::UnknownName`] on bad lookups.
    pub fn resolve(&self, id: &Identifier) -> Result<Resolved> {
        self.resolve_at(id, 0)
    }

    fn resolve_at(&self, id: &Identifier, depth: usize) -> Result<Resolved> {
        if depth > MAX_DEPTH {
            return Err(Error::CyclicIdentifier { name: id.to_string() });
        }
        match id {
            Identifier::Index(i) => {
                let index = *i as usize;
                if index >= self.points.len() {
                    return Err(Error::PointRange { index, count: self.points.len() });
                }
                Ok(Resolved::Point(PointId::new(*i)))
            }
            Identifier::Coord(label) => self
                .coords
                .get(label)
                .map(|p| Resolved::Point(*p))
                .ok_or_else(|| Error::UnknownName(label.clone())),
            Identifier::Name(name) => {
                let value = self
                    .names
                    .get(name)
                    .ok_or_else(|| Error::UnknownName(name.clone()))?;
                self.resolve_at(value, depth + 1)
            }
            Identifier::List(items) => {
                let mut set = Vec::with_capacity(items.len());
                for item in items {
                    set.extend(self.resolve_at(item, depth + 1)?.flatten());
                }
                Ok(Resolved::Set(set))
            }
            Identifier::Group(map) => {
                let mut out = IndexMap::with_capacity(map.len());
                for (key, value) in map {
                    out.insert(key.clone(), self.resolve_at(value, depth + 1)?);
                }
                Ok(Resolved::Group(out))
            }
        }
    }

    /// Resolve, substituting the glyph's first point when lookup fails.
    ///
    /// This is the recovery path for user-typed identifiers that no
    /// longer match anything; the session must never abort on them.
    pub fn resolve_or_first(&self, id: &Identifier) -> Resolved {
        match self.resolve(id) {
            Ok(resolved) => resolved,
            Err(err) => {
                if self.points.is_empty() {
                    warn!("cannot resolve {id} in empty glyph: {err}");
                    return Resolved::Set(Vec::new());
                }
                warn!("substituting first point for unresolvable identifier {id}: {err}");
                Resolved::Point(PointId::new(0))
            }
        }
    }

    /// Concrete points for an identifier; empty when it does not
    /// resolve. Used wherever an unresolvable reference should simply
    /// fail to match rather than raise.
    pub fn points_of(&self, id: &Identifier) -> Vec<PointId> {
        self.resolve(id).map(|r| r.flatten()).unwrap_or_default()
    }
}

fn coord_key(x: i32, y: i32) -> String {
    format!("{{{x};{y}}}")
}
