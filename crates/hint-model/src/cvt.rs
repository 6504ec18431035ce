//! Named control values from the font's control-value table.
//!
//! The table itself is owned by a collaborator; the model only checks
//! that hints name entries that exist and hands the values to the
//! compiler boundary.

use indexmap::IndexMap;

use crate::types::Axis;

/// Whether a control value is an absolute position or a distance.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ControlValueKind {
    Position,
    Distance,
}

/// A named constant usable in place of a literal hint parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ControlValue {
    pub value: i32,
    pub kind: ControlValueKind,
    pub axis: Axis,
}

impl ControlValue {
    pub fn position(value: i32, axis: Axis) -> Self {
        Self { value, kind: ControlValueKind::Position, axis }
    }

    pub fn distance(value: i32, axis: Axis) -> Self {
        Self { value, kind: ControlValueKind::Distance, axis }
    }
}

/// Name-ordered control value table.
#[derive(Clone, Debug, Default)]
pub struct ControlValues {
    entries: IndexMap<String, ControlValue>,
}

impl ControlValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: ControlValue) {
        self.entries.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&ControlValue> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ControlValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_order_preserved() {
        let mut cvt = ControlValues::new();
        cvt.insert("xheight", ControlValue::position(520, Axis::Y));
        cvt.insert("stem", ControlValue::distance(92, Axis::Y));
        cvt.insert("cap", ControlValue::position(700, Axis::Y));

        let names: Vec<&str> = cvt.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["xheight", "stem", "cap"]);
        assert!(cvt.contains("stem"));
        assert_eq!(cvt.get("cap").map(|cv| cv.value), Some(700));
    }
}
