//! Hint records: the nodes of the dependency forest.

use crate::{identifier::Identifier, types::HintId};

/// Distance class of a stem hint.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StemColor {
    Black,
    White,
    Gray,
}

/// What a hint does with its points.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum HintKind {
    /// Position a point independently of other hints
    Anchor,
    /// Move a point to its reference's grid position
    Align,
    /// Move a point by its reference's rounding shift
    Shift,
    /// Place a point between two reference points
    Interpolate,
    /// Control a stem distance from the reference point
    Stem(StemColor),
    /// Call into a glyph-level macro
    Macro,
    /// Call into an fpgm function
    Function,
}

impl HintKind {
    /// Expected reference arity before point parameters are known:
    /// anchors take none, interpolations take two, everything else one.
    pub fn base_reference_arity(&self) -> usize {
        match self {
            HintKind::Anchor => 0,
            HintKind::Interpolate => 2,
            _ => 1,
        }
    }

    /// Whether hints of this kind round their targets to the grid when
    /// no explicit override is present.
    pub fn rounds_by_default(&self) -> bool {
        matches!(self, HintKind::Anchor | HintKind::Stem(_))
    }

    /// Macro and function calls: arbitrary named point parameters,
    /// never reversible, always re-added at top scope on promotion.
    pub fn is_callable(&self) -> bool {
        matches!(self, HintKind::Macro | HintKind::Function)
    }
}

/// A hint as supplied by the parser collaborator: the structural
/// schema of the input document, before arena placement.
#[derive(Clone, Debug, PartialEq)]
pub struct RawHint {
    pub target: Identifier,
    pub reference: Option<Identifier>,
    pub kind: HintKind,
    pub round: Option<bool>,
    pub cv: Option<String>,
    pub children: Vec<RawHint>,
}

impl RawHint {
    pub fn new(kind: HintKind, target: impl Into<Identifier>) -> Self {
        Self {
            target: target.into(),
            reference: None,
            kind,
            round: None,
            cv: None,
            children: Vec::new(),
        }
    }

    pub fn with_reference(mut self, reference: impl Into<Identifier>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    pub fn with_round(mut self, round: bool) -> Self {
        self.round = Some(round);
        self
    }

    pub fn with_cv(mut self, cv: impl Into<String>) -> Self {
        self.cv = Some(cv.into());
        self
    }

    pub fn with_child(mut self, child: RawHint) -> Self {
        self.children.push(child);
        self
    }

    /// Total node count including this one.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(RawHint::count).sum::<usize>()
    }
}

/// One hint in a document's arena.
///
/// Does not own its points: targets and references are weak
/// [`Identifier`]s resolved through the document's point index.
/// Parent/child structure is expressed as arena ids, so records never
/// form ownership cycles.
#[derive(Clone, Debug)]
pub struct HintRecord {
    pub(crate) target: Identifier,
    pub(crate) reference: Option<Identifier>,
    pub(crate) kind: HintKind,
    pub(crate) round: Option<bool>,
    pub(crate) cv: Option<String>,
    pub(crate) parent: Option<HintId>,
    pub(crate) children: Vec<HintId>,
    /// Reference derived purely from tree position; stripped on export.
    pub(crate) implicit_ref: bool,
}

impl HintRecord {
    pub(crate) fn new(
        kind: HintKind,
        target: Identifier,
        reference: Option<Identifier>,
        round: Option<bool>,
        cv: Option<String>,
        implicit_ref: bool,
    ) -> Self {
        Self {
            target,
            reference,
            kind,
            round,
            cv,
            parent: None,
            children: Vec::new(),
            implicit_ref,
        }
    }

    pub fn kind(&self) -> &HintKind {
        &self.kind
    }

    pub fn target(&self) -> &Identifier {
        &self.target
    }

    pub fn reference(&self) -> Option<&Identifier> {
        self.reference.as_ref()
    }

    pub fn control_value(&self) -> Option<&str> {
        self.cv.as_deref()
    }

    pub fn parent(&self) -> Option<HintId> {
        self.parent
    }

    pub fn children(&self) -> &[HintId] {
        &self.children
    }

    /// Whether the reference exists only because of tree position.
    pub fn has_implicit_reference(&self) -> bool {
        self.implicit_ref
    }

    /// The hint's target identifiers as a flat list, without recursing
    /// into child hints. A list target yields its elements; a group
    /// target yields its values (element lists flattened one level).
    pub fn target_list(&self) -> Vec<&Identifier> {
        flatten_shallow(&self.target)
    }

    /// The reference identifiers as a flat list; empty for anchors.
    pub fn reference_list(&self) -> Vec<&Identifier> {
        match &self.reference {
            Some(reference) => flatten_shallow(reference),
            None => Vec::new(),
        }
    }

    /// Expected number of reference points, accounting for declared
    /// point parameters on macro and function calls.
    pub fn reference_arity(&self) -> usize {
        if self.kind.is_callable() {
            match &self.target {
                Identifier::Group(map) => map.len(),
                _ => 1,
            }
        } else {
            self.kind.base_reference_arity()
        }
    }

    /// A hint can swap target and reference only when both are single
    /// points and it is not a macro/function call.
    pub fn can_reverse(&self) -> bool {
        !self.kind.is_callable()
            && self.target.is_scalar()
            && self.reference.as_ref().is_some_and(Identifier::is_scalar)
    }

    /// Swap target and reference in place. The caller must re-touch
    /// and re-sort, since the dependency direction changed.
    pub(crate) fn reverse(&mut self) {
        if let Some(reference) = self.reference.take() {
            self.reference = Some(std::mem::replace(&mut self.target, reference));
            // A reversed reference was chosen by the user, keep it.
            self.implicit_ref = false;
        }
    }

    /// Effective rounding: explicit override, else the kind default.
    pub fn rounds(&self) -> bool {
        self.round.unwrap_or_else(|| self.kind.rounds_by_default())
    }

    /// The deterministic representative identifier used for structural
    /// matching: a scalar target is itself; a list contributes its
    /// first element; a group contributes its first non-list value in
    /// key order, else the first element of its first list value.
    pub fn single_target(&self) -> Option<&Identifier> {
        single_of(&self.target)
    }
}

pub(crate) fn single_of(id: &Identifier) -> Option<&Identifier> {
    match id {
        Identifier::List(items) => items.first(),
        Identifier::Group(map) => map
            .values()
            .find(|v| !v.is_list())
            .or_else(|| {
                map.values().find_map(|v| match v {
                    Identifier::List(items) => items.first(),
                    _ => None,
                })
            }),
        other => Some(other),
    }
}

fn flatten_shallow(id: &Identifier) -> Vec<&Identifier> {
    match id {
        Identifier::List(items) => items.iter().collect(),
        Identifier::Group(map) => map
            .values()
            .flat_map(|v| match v {
                Identifier::List(items) => items.iter().collect::<Vec<_>>(),
                other => vec![other],
            })
            .collect(),
        other => vec![other],
    }
}
