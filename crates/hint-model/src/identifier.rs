//! Point identifiers as written by hint authors.
//!
//! A hint names its points by outline index, coordinate label
//! (`{x;y}`), or symbolic name; lists and named groups compose these
//! for multi-point sets and macro/function point parameters. All
//! resolution to concrete points happens lazily in
//! [`crate::PointIndex`].

use std::fmt;

use indexmap::IndexMap;

/// A reference to one or more outline points, resolved lazily.
#[derive(Clone, Debug, PartialEq)]
pub enum Identifier {
    /// Outline point index
    Index(u16),
    /// Coordinate label, `{x;y}` in offset-adjusted font units
    Coord(String),
    /// Symbolic name from the glyph's name table
    Name(String),
    /// Ordered multi-point set
    List(Vec<Identifier>),
    /// Named point parameters for a macro or function call
    Group(IndexMap<String, Identifier>),
}

impl Identifier {
    /// Coordinate identifier for a point at `(x, y)`.
    pub fn coord(x: i32, y: i32) -> Self {
        Self::Coord(format!("{{{x};{y}}}"))
    }

    pub fn list(items: impl IntoIterator<Item = Identifier>) -> Self {
        Self::List(items.into_iter().collect())
    }

    pub fn group(
        entries: impl IntoIterator<Item = (impl Into<String>, Identifier)>,
    ) -> Self {
        Self::Group(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Classify a string label as a coordinate or a symbolic name.
    pub fn from_label(s: &str) -> Self {
        if parse_coord(s).is_some() {
            Self::Coord(s.to_string())
        } else {
            Self::Name(s.to_string())
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// A scalar identifier names a single point (possibly indirectly).
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Self::List(_) | Self::Group(_))
    }
}

impl From<u16> for Identifier {
    fn from(index: u16) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for Identifier {
    fn from(s: &str) -> Self {
        Self::from_label(s)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "{i}"),
            Self::Coord(s) | Self::Name(s) => f.write_str(s),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Group(map) => {
                f.write_str("{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                f.write_str("}")
            }
        }
    }
}

/// Parse a `{x;y}` coordinate label.
pub fn parse_coord(s: &str) -> Option<(i32, i32)> {
    let inner = s.strip_prefix('{')?.strip_suffix('}')?;
    let (x, y) = inner.split_once(';')?;
    Some((x.trim().parse().ok()?, y.trim().parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coord() {
        assert_eq!(parse_coord("{12;-34}"), Some((12, -34)));
        assert_eq!(parse_coord("{ 5 ; 7 }"), Some((5, 7)));
        assert_eq!(parse_coord("{12;34"), None);
        assert_eq!(parse_coord("12;34"), None);
        assert_eq!(parse_coord("{a;b}"), None);
    }

    #[test]
    fn test_label_classification() {
        assert_eq!(Identifier::from_label("{0;512}"), Identifier::coord(0, 512));
        assert_eq!(
            Identifier::from_label("topserif"),
            Identifier::Name("topserif".to_string())
        );
    }

    #[test]
    fn test_scalar() {
        assert!(Identifier::Index(3).is_scalar());
        assert!(Identifier::from_label("cap").is_scalar());
        assert!(!Identifier::list([Identifier::Index(1)]).is_scalar());
        assert!(!Identifier::group([("pt", Identifier::Index(1))]).is_scalar());
    }

    #[test]
    fn test_display() {
        let id = Identifier::list([Identifier::Index(1), Identifier::from_label("{3;4}")]);
        assert_eq!(format!("{id}"), "[1 {3;4}]");
    }
}
