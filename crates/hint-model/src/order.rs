//! Pairwise dependency ordering between hints.
//!
//! A hint must precede another when the second's reference points
//! include one of the first's target points. Transitivity is not
//! assumed of the comparator; the sibling sort below terminates on any
//! input, including contradictory reference chains.

use log::warn;

use crate::{document::Document, types::HintId};

/// Outcome of comparing two hints for compile order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Precedence {
    Before,
    After,
    Unordered,
}

/// `a` must precede `b` iff one of `b`'s reference points is among
/// `a`'s scope targets — its own target plus every descendant's, since
/// a nested hint operates inside its ancestor's scope. References are
/// taken as written, never recursively.
pub(crate) fn precedence(doc: &Document, a: HintId, b: HintId) -> Precedence {
    let a_targets = doc.scope_target_points(a);
    if doc.reference_points(b).iter().any(|p| a_targets.contains(p)) {
        return Precedence::Before;
    }
    let b_targets = doc.scope_target_points(b);
    if doc.reference_points(a).iter().any(|p| b_targets.contains(p)) {
        return Precedence::After;
    }
    Precedence::Unordered
}

/// Stable best-effort ordering of one sibling level.
///
/// Emits, at each step, the earliest remaining hint with no remaining
/// predecessor, so unordered pairs keep their original relative order.
/// When every remaining hint has a predecessor the references are
/// contradictory; the earliest remaining one is emitted so the sort
/// always terminates.
pub(crate) fn sort_level(doc: &Document, ids: &[HintId]) -> Vec<HintId> {
    let n = ids.len();
    if n < 2 {
        return ids.to_vec();
    }

    // preds[j] holds every i with ids[i] strictly before ids[j].
    let mut preds: Vec<Vec<usize>> = vec![Vec::new(); n];
    for i in 0..n {
        for j in (i + 1)..n {
            match precedence(doc, ids[i], ids[j]) {
                Precedence::Before => preds[j].push(i),
                Precedence::After => preds[i].push(j),
                Precedence::Unordered => {}
            }
        }
    }

    let mut out = Vec::with_capacity(n);
    let mut placed = vec![false; n];
    let mut warned = false;
    while out.len() < n {
        let ready = (0..n).find(|&j| !placed[j] && preds[j].iter().all(|&i| placed[i]));
        let next = match ready {
            Some(j) => j,
            None => {
                if !warned {
                    warn!("contradictory hint references; keeping source order for the remainder");
                    warned = true;
                }
                match (0..n).find(|&j| !placed[j]) {
                    Some(j) => j,
                    None => break,
                }
            }
        };
        placed[next] = true;
        out.push(ids[next]);
    }
    out
}
