//! The per-glyph, per-axis hint document.
//!
//! Hints live in an arena addressed by [`HintId`]; parent/child links
//! are ids, never embedded object graphs, so the mutable tree cannot
//! form ownership cycles. Every mutation restores the ordering and
//! touch invariants before observers are notified, making each edit
//! atomic from the caller's perspective.

use log::{debug, warn};

use crate::{
    builder,
    cvt::ControlValues,
    error::Result,
    hint::{HintRecord, RawHint},
    identifier::Identifier,
    order::{self, Precedence},
    resolver::PointIndex,
    schema::Validator,
    touch::TouchTracker,
    types::{Axis, HintId, PointId},
};

/// Change notifications delivered to subscribers after each mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DocumentEvent {
    HintAdded(HintId),
    HintRemoved(HintId),
    HintChanged(HintId),
    Rebuilt,
}

type Observer = Box<dyn FnMut(&DocumentEvent)>;

/// The ordered hint forest for one glyph and one axis.
pub struct Document {
    axis: Axis,
    index: PointIndex,
    cvt: ControlValues,
    arena: Vec<Option<HintRecord>>,
    roots: Vec<HintId>,
    touch: TouchTracker,
    observers: Vec<Observer>,
}

impl Document {
    /// An empty document over a glyph's point index.
    pub fn new(axis: Axis, index: PointIndex) -> Self {
        Self {
            axis,
            index,
            cvt: ControlValues::new(),
            arena: Vec::new(),
            roots: Vec::new(),
            touch: TouchTracker::new(),
            observers: Vec::new(),
        }
    }

    /// Attach the font's control value table, used to check the names
    /// hints refer to.
    pub fn with_control_values(mut self, cvt: ControlValues) -> Self {
        self.cvt = cvt;
        self
    }

    /// Load a parsed document, keeping its nesting as given. Children
    /// without an explicit reference inherit one from their parent's
    /// target; such references are implicit and are stripped again on
    /// export.
    pub fn load(axis: Axis, index: PointIndex, nodes: Vec<RawHint>) -> Self {
        let mut doc = Self::new(axis, index);
        for node in nodes {
            let id = doc.import_node(node, None);
            doc.push_root(id);
        }
        doc.retouch_all();
        doc.sort_forest();
        doc
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn point_index(&self) -> &PointIndex {
        &self.index
    }

    pub fn control_values(&self) -> &ControlValues {
        &self.cvt
    }

    pub fn hint(&self, id: HintId) -> Option<&HintRecord> {
        self.arena.get(id.as_usize()).and_then(Option::as_ref)
    }

    pub fn roots(&self) -> &[HintId] {
        &self.roots
    }

    /// Number of live hints.
    pub fn len(&self) -> usize {
        self.arena.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn touched(&self, point: PointId) -> bool {
        self.touch.touched(point)
    }

    /// Hints currently targeting a point, in id order.
    pub fn owners(&self, point: PointId) -> Vec<HintId> {
        self.touch.owners(point)
    }

    /// Register a change listener. No UI toolkit involved: listeners
    /// are plain callbacks run synchronously after each mutation.
    pub fn subscribe(&mut self, observer: impl FnMut(&DocumentEvent) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Pairwise compile-order relation between two hints.
    pub fn compare(&self, a: HintId, b: HintId) -> Precedence {
        order::precedence(self, a, b)
    }

    /// Insert a new hint, nesting it under the hint that defines its
    /// reference when one exists.
    pub fn add_hint(&mut self, raw: RawHint) -> HintId {
        let id = self.import_node(raw, None);
        if !builder::try_place(self, id) {
            self.push_root(id);
        }
        for node in self.subtree(id) {
            let points = self.own_target_points(node);
            self.touch.touch(&points, node);
        }
        self.sort_forest();
        self.notify(DocumentEvent::HintAdded(id));
        id
    }

    /// Delete a hint. Its direct children are promoted individually:
    /// each is re-placed against the remaining forest, except macro and
    /// function calls, which always return to top scope.
    pub fn delete_hint(&mut self, id: HintId) -> bool {
        if self.hint(id).is_none() {
            return false;
        }
        self.detach(id);
        let children = match self.record_mut(id) {
            Some(record) => std::mem::take(&mut record.children),
            None => Vec::new(),
        };

        let points = self.own_target_points(id);
        self.touch.untouch(&points, id);
        self.arena[id.as_usize()] = None;

        for child in children {
            if let Some(record) = self.record_mut(child) {
                record.parent = None;
            }
            let callable = self
                .hint(child)
                .is_some_and(|record| record.kind().is_callable());
            if callable {
                self.push_root(child);
            } else if !builder::try_place(self, child) {
                self.push_root(child);
            }
        }

        self.sort_forest();
        self.notify(DocumentEvent::HintRemoved(id));
        true
    }

    /// Swap a hint's target and reference. No-op unless the hint is
    /// reversible; the dependency direction changes, so touch state is
    /// redone and siblings re-sorted.
    pub fn reverse_hint(&mut self, id: HintId) -> bool {
        if !self.hint(id).is_some_and(HintRecord::can_reverse) {
            debug!("ignoring reverse request for non-reversible hint {id}");
            return false;
        }
        let old = self.own_target_points(id);
        self.touch.untouch(&old, id);
        if let Some(record) = self.record_mut(id) {
            record.reverse();
        }
        let new = self.own_target_points(id);
        self.touch.touch(&new, id);
        self.sort_forest();
        self.notify(DocumentEvent::HintChanged(id));
        true
    }

    /// Build a multi-point set from a selection, replacing the single
    /// touched point's scalar target in its owning hint.
    ///
    /// Workflow guard, not a data-integrity check: the selection must
    /// contain exactly one touched point and at least one untouched
    /// point, otherwise this silently does nothing.
    pub fn make_set(&mut self, selection: &[PointId]) -> bool {
        if selection.len() < 2 {
            return false;
        }
        let touched: Vec<PointId> = selection
            .iter()
            .copied()
            .filter(|point| self.touch.touched(*point))
            .collect();
        if touched.len() != 1 || touched.len() == selection.len() {
            return false;
        }
        let pivot = touched[0];
        let owner = match self.touch.owners(pivot).into_iter().next() {
            Some(owner) => owner,
            None => return false,
        };
        if !self.hint(owner).is_some_and(|record| record.target().is_scalar()) {
            return false;
        }

        let old = self.own_target_points(owner);
        self.touch.untouch(&old, owner);
        let set = Identifier::list(
            selection.iter().map(|point| Identifier::Index(point.to_u16())),
        );
        if let Some(record) = self.record_mut(owner) {
            record.target = set;
        }
        let new = self.own_target_points(owner);
        self.touch.touch(&new, owner);
        self.sort_forest();
        self.notify(DocumentEvent::HintChanged(owner));
        true
    }

    /// Replace the whole document with externally edited content.
    /// The validator runs first; on rejection the previous state is
    /// left untouched.
    pub fn replace_all(
        &mut self,
        nodes: Vec<RawHint>,
        validator: &dyn Validator,
    ) -> Result<()> {
        validator.validate(&nodes)?;
        self.arena.clear();
        self.roots.clear();
        self.touch.clear();
        for node in nodes {
            let id = self.import_node(node, None);
            self.push_root(id);
        }
        self.retouch_all();
        self.sort_forest();
        self.notify(DocumentEvent::Rebuilt);
        Ok(())
    }

    /// Flatten the forest and reconstruct nesting and order from the
    /// hints' references alone. Idempotent on well-formed documents.
    pub fn rebuild(&mut self) {
        let flat = self.flatten();
        for &id in &flat {
            if let Some(record) = self.record_mut(id) {
                record.parent = None;
                record.children.clear();
            }
        }
        self.roots.clear();
        builder::place_all(self, flat);
        self.retouch_all();
        self.sort_forest();
        self.notify(DocumentEvent::Rebuilt);
    }

    /// All live hints in traversal (pre-)order: every parent before
    /// its children, siblings in sorted order.
    pub fn flatten(&self) -> Vec<HintId> {
        let mut out = Vec::new();
        for &root in &self.roots {
            self.collect_subtree(root, &mut out);
        }
        out
    }

    /// The order in which hints must be handed to the bytecode
    /// compiler: traversal order, where every hint's reference points
    /// are already touched by an earlier hint.
    pub fn compile_order(&self) -> Vec<HintId> {
        self.flatten()
    }

    /// The document as raw nodes, in final nested order. References
    /// that exist only as artifacts of tree position are stripped;
    /// only explicit user-written references survive the round-trip.
    pub fn export(&self) -> Vec<RawHint> {
        self.roots
            .iter()
            .filter_map(|&root| self.export_node(root))
            .collect()
    }

    fn export_node(&self, id: HintId) -> Option<RawHint> {
        let record = self.hint(id)?;
        Some(RawHint {
            target: record.target.clone(),
            reference: if record.implicit_ref {
                None
            } else {
                record.reference.clone()
            },
            kind: record.kind.clone(),
            round: record.round,
            cv: record.cv.clone(),
            children: record
                .children
                .iter()
                .filter_map(|&child| self.export_node(child))
                .collect(),
        })
    }

    // --- internals -----------------------------------------------------

    fn import_node(&mut self, raw: RawHint, parent: Option<HintId>) -> HintId {
        let RawHint { target, reference, kind, round, cv, children } = raw;

        if let Some(name) = &cv {
            if !self.cvt.is_empty() && !self.cvt.contains(name) {
                warn!("hint names unknown control value '{name}'");
            }
        }

        let mut reference = reference;
        let mut implicit = false;
        if reference.is_none() && kind.base_reference_arity() > 0 {
            if let Some(parent_id) = parent {
                reference = self
                    .hint(parent_id)
                    .and_then(|record| record.single_target().cloned());
                implicit = reference.is_some();
            }
        }

        let record = HintRecord::new(kind, target, reference, round, cv, implicit);
        let id = self.alloc(record);
        if let Some(parent_id) = parent {
            self.attach_child(parent_id, id);
        }
        for child in children {
            self.import_node(child, Some(id));
        }
        id
    }

    fn alloc(&mut self, record: HintRecord) -> HintId {
        let id = HintId::new(self.arena.len());
        self.arena.push(Some(record));
        id
    }

    fn record_mut(&mut self, id: HintId) -> Option<&mut HintRecord> {
        self.arena.get_mut(id.as_usize()).and_then(Option::as_mut)
    }

    fn detach(&mut self, id: HintId) {
        let parent = self.hint(id).and_then(HintRecord::parent);
        match parent {
            Some(parent_id) => {
                if let Some(record) = self.record_mut(parent_id) {
                    record.children.retain(|&child| child != id);
                }
            }
            None => self.roots.retain(|&root| root != id),
        }
    }

    pub(crate) fn push_root(&mut self, id: HintId) {
        if let Some(record) = self.record_mut(id) {
            record.parent = None;
        }
        if !self.roots.contains(&id) {
            self.roots.push(id);
        }
    }

    pub(crate) fn attach_child(&mut self, parent: HintId, child: HintId) {
        if let Some(record) = self.record_mut(child) {
            record.parent = Some(parent);
        }
        if let Some(record) = self.record_mut(parent) {
            if !record.children.contains(&child) {
                record.children.push(child);
            }
        }
    }

    fn collect_subtree(&self, id: HintId, out: &mut Vec<HintId>) {
        out.push(id);
        if let Some(record) = self.hint(id) {
            for &child in record.children() {
                self.collect_subtree(child, out);
            }
        }
    }

    pub(crate) fn subtree(&self, id: HintId) -> Vec<HintId> {
        let mut out = Vec::new();
        self.collect_subtree(id, &mut out);
        out
    }

    /// Points a hint's own target resolves to; empty when unresolvable.
    pub(crate) fn own_target_points(&self, id: HintId) -> Vec<PointId> {
        self.hint(id)
            .map(|record| self.index.points_of(&record.target))
            .unwrap_or_default()
    }

    /// The hint's target points plus every descendant's: a nested hint
    /// operates inside its ancestor's scope.
    pub(crate) fn scope_target_points(&self, id: HintId) -> Vec<PointId> {
        let mut out = Vec::new();
        for node in self.subtree(id) {
            out.extend(self.own_target_points(node));
        }
        out
    }

    /// Points a hint's reference resolves to; empty for anchors and
    /// unresolvable references.
    pub(crate) fn reference_points(&self, id: HintId) -> Vec<PointId> {
        match self.hint(id).and_then(HintRecord::reference) {
            Some(reference) => self.index.points_of(reference),
            None => Vec::new(),
        }
    }

    /// One representative point per reference element, used for
    /// structural matching. An interpolation's two-point reference
    /// yields two candidates, tried in source order.
    pub(crate) fn reference_match_points(&self, id: HintId) -> Vec<PointId> {
        let record = match self.hint(id) {
            Some(record) => record,
            None => return Vec::new(),
        };
        record
            .reference_list()
            .into_iter()
            .filter_map(|element| self.index.points_of(element).first().copied())
            .collect()
    }

    /// First hint in traversal order whose own target list contains
    /// `point`, skipping `exclude`.
    pub(crate) fn find_target_owner(&self, point: PointId, exclude: HintId) -> Option<HintId> {
        for &root in &self.roots {
            if let Some(found) = self.search_owner(root, point, exclude) {
                return Some(found);
            }
        }
        None
    }

    fn search_owner(&self, id: HintId, point: PointId, exclude: HintId) -> Option<HintId> {
        if id != exclude && self.own_target_points(id).contains(&point) {
            return Some(id);
        }
        let record = self.hint(id)?;
        for &child in record.children() {
            if let Some(found) = self.search_owner(child, point, exclude) {
                return Some(found);
            }
        }
        None
    }

    fn retouch_all(&mut self) {
        self.touch.clear();
        for id in self.flatten() {
            let points = self.own_target_points(id);
            self.touch.touch(&points, id);
        }
    }

    fn sort_forest(&mut self) {
        let roots = std::mem::take(&mut self.roots);
        self.roots = order::sort_level(self, &roots);

        let ids = self.flatten();
        for id in ids {
            let children = match self.record_mut(id) {
                Some(record) => std::mem::take(&mut record.children),
                None => continue,
            };
            let sorted = if children.len() > 1 {
                order::sort_level(self, &children)
            } else {
                children
            };
            if let Some(record) = self.record_mut(id) {
                record.children = sorted;
            }
        }
    }

    fn notify(&mut self, event: DocumentEvent) {
        let mut observers = std::mem::take(&mut self.observers);
        for observer in &mut observers {
            observer(&event);
        }
        self.observers = observers;
    }
}
