//! Domain-specific newtypes for type safety
//!
//! These types prevent mixing up point and hint indices and provide
//! self-documenting APIs.

use std::{
    fmt,
    fmt::{Display, Formatter},
};

macro_rules! u16_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[repr(transparent)]
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub u16);

        impl $name {
            pub const fn new(id: u16) -> Self {
                Self(id)
            }

            pub const fn to_u16(self) -> u16 {
                self.0
            }

            pub const fn as_usize(self) -> usize {
                self.0 as usize
            }
        }

        impl From<u16> for $name {
            fn from(id: u16) -> Self {
                Self(id)
            }
        }

        impl From<$name> for u16 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $label, self.0)
            }
        }
    };
}

u16_id!(
    /// An outline point, in glyph point order
    PointId,
    "P"
);

/// Index into a document's hint arena
///
/// Ids are stable for the lifetime of the document; deleted slots are
/// tombstoned, never reused.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HintId(pub usize);

impl HintId {
    pub const fn new(idx: usize) -> Self {
        Self(idx)
    }

    pub const fn as_usize(self) -> usize {
        self.0
    }
}

impl From<usize> for HintId {
    fn from(idx: usize) -> Self {
        Self(idx)
    }
}

impl From<HintId> for usize {
    fn from(HintId(idx): HintId) -> Self {
        idx
    }
}

impl Display for HintId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "H{}", self.0)
    }
}

/// Hinting dimension
///
/// Each glyph carries two independent hint documents, one per axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub const fn label(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
        }
    }
}

impl Display for Axis {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
