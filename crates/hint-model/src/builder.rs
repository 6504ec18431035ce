//! Fixpoint placement: reconstructing hint nesting from a flat list.
//!
//! Given hints with no structure — a freshly parsed flat buffer, or a
//! document being rebuilt after edits — each hint whose reference
//! matches another hint's target becomes that hint's child. Matching
//! runs in repeated passes until a full pass places nothing, because a
//! hint can only nest once its owner is itself part of the forest.
//! Leftovers go to the top level for user cleanup; nothing is dropped.

use log::{debug, warn};

use crate::{document::Document, types::HintId};

/// Place every hint in `unplaced` into the document's forest.
///
/// Idempotent: running it over the flattened output of a previous run
/// reproduces the same structure.
pub(crate) fn place_all(doc: &mut Document, mut unplaced: Vec<HintId>) {
    loop {
        let before = unplaced.len();
        unplaced.retain(|&id| !try_place(doc, id));
        if unplaced.is_empty() || unplaced.len() == before {
            break;
        }
    }
    if !unplaced.is_empty() {
        warn!(
            "{} hint(s) without a matching owner; placing at top level",
            unplaced.len()
        );
        for id in unplaced {
            doc.push_root(id);
        }
    }
}

/// Try to place one hint: at the top level when it has no reference
/// points to match, else under the hint that defines its reference.
///
/// An interpolation tries both of its reference points; when they
/// belong to different owners it nests under the first in source
/// order.
pub(crate) fn try_place(doc: &mut Document, id: HintId) -> bool {
    let candidates = doc.reference_match_points(id);
    if candidates.is_empty() {
        doc.push_root(id);
        return true;
    }
    for point in candidates {
        if let Some(owner) = doc.find_target_owner(point, id) {
            debug!("nesting {id} under {owner}");
            doc.attach_child(owner, id);
            return true;
        }
    }
    false
}
