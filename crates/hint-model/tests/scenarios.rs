//! End-to-end placement and ordering scenarios.

use stemfit_hint_model::{
    Axis, Document, HintId, HintKind, Identifier, PointId, PointIndex, RawHint, reorder,
};

fn index(points: usize) -> PointIndex {
    PointIndex::from_coords((0..points).map(|i| (i as i32 * 10, i as i32 * 10, true, 0)))
}

fn flat_kinds(doc: &Document) -> Vec<HintKind> {
    doc.compile_order()
        .iter()
        .filter_map(|&id| doc.hint(id).map(|record| record.kind().clone()))
        .collect()
}

/// No hint may refer forward to a target defined later.
fn assert_no_forward_references(doc: &Document) {
    let order = doc.compile_order();
    for (i, &a) in order.iter().enumerate() {
        let a_record = doc.hint(a).unwrap();
        let a_refs: Vec<PointId> = a_record
            .reference()
            .map(|r| doc.point_index().points_of(r))
            .unwrap_or_default();
        for &b in &order[i + 1..] {
            let b_record = doc.hint(b).unwrap();
            let b_targets = doc.point_index().points_of(b_record.target());
            for p in &a_refs {
                assert!(
                    !b_targets.contains(p),
                    "{a} precedes {b} but references {p}, which {b} targets"
                );
            }
        }
    }
}

#[test]
fn anchor_then_align_nests() {
    // Scenario: anchor on 10, align 12 against 10
    let mut doc = Document::load(
        Axis::Y,
        index(16),
        vec![
            RawHint::new(HintKind::Anchor, 10u16),
            RawHint::new(HintKind::Align, 12u16).with_reference(10u16),
        ],
    );
    doc.rebuild();

    assert_eq!(doc.roots().len(), 1);
    let anchor = doc.roots()[0];
    assert_eq!(doc.hint(anchor).unwrap().kind(), &HintKind::Anchor);
    assert_eq!(doc.hint(anchor).unwrap().children().len(), 1);
    assert_eq!(flat_kinds(&doc), vec![HintKind::Anchor, HintKind::Align]);
    assert_no_forward_references(&doc);
}

#[test]
fn reference_before_definition_in_source_order() {
    // The shift names its reference before the anchor defining it
    // appears; rebuild must order the anchor first anyway.
    let mut doc = Document::load(
        Axis::Y,
        index(8),
        vec![
            RawHint::new(HintKind::Shift, 5u16).with_reference(3u16),
            RawHint::new(HintKind::Anchor, 3u16),
        ],
    );
    doc.rebuild();

    assert_eq!(flat_kinds(&doc), vec![HintKind::Anchor, HintKind::Shift]);
    let anchor = doc.roots()[0];
    assert_eq!(doc.hint(anchor).unwrap().children().len(), 1);
    assert_no_forward_references(&doc);
}

#[test]
fn deleting_owner_promotes_dependent() {
    let mut doc = Document::load(
        Axis::Y,
        index(8),
        vec![
            RawHint::new(HintKind::Shift, 5u16).with_reference(3u16),
            RawHint::new(HintKind::Anchor, 3u16),
        ],
    );
    doc.rebuild();

    let anchor = doc.roots()[0];
    let shift = doc.hint(anchor).unwrap().children()[0];
    assert!(doc.delete_hint(anchor));

    assert_eq!(doc.len(), 1);
    assert_eq!(doc.roots(), &[shift]);
    assert_eq!(doc.hint(shift).unwrap().parent(), None);
    // References are point-based, so the promoted hint's explicit
    // reference stays valid.
    assert_eq!(doc.hint(shift).unwrap().reference(), Some(&Identifier::Index(3)));
}

#[test]
fn unmatched_interpolation_converges_to_top_level() {
    // Nothing targets 7 or 9; placement must converge, not loop.
    let mut doc = Document::load(
        Axis::Y,
        index(12),
        vec![
            RawHint::new(HintKind::Anchor, 1u16),
            RawHint::new(HintKind::Interpolate, 8u16).with_reference(Identifier::list([
                Identifier::Index(7),
                Identifier::Index(9),
            ])),
        ],
    );
    doc.rebuild();

    assert_eq!(doc.roots().len(), 2);
    assert_eq!(doc.len(), 2);
}

#[test]
fn interpolation_nests_once_under_shared_owner() {
    let mut doc = Document::load(
        Axis::Y,
        index(12),
        vec![
            RawHint::new(
                HintKind::Anchor,
                Identifier::list([Identifier::Index(7), Identifier::Index(9)]),
            ),
            RawHint::new(HintKind::Interpolate, 8u16).with_reference(Identifier::list([
                Identifier::Index(7),
                Identifier::Index(9),
            ])),
        ],
    );
    doc.rebuild();

    assert_eq!(doc.roots().len(), 1);
    let anchor = doc.roots()[0];
    assert_eq!(doc.hint(anchor).unwrap().children().len(), 1);
}

#[test]
fn interpolation_with_two_owners_follows_first_reference() {
    let mut doc = Document::load(
        Axis::Y,
        index(12),
        vec![
            RawHint::new(HintKind::Anchor, 7u16),
            RawHint::new(HintKind::Anchor, 9u16),
            RawHint::new(HintKind::Interpolate, 8u16).with_reference(Identifier::list([
                Identifier::Index(9),
                Identifier::Index(7),
            ])),
        ],
    );
    doc.rebuild();

    // First reference element is 9, so the interpolation nests under
    // the anchor on 9.
    let owner = doc
        .roots()
        .iter()
        .copied()
        .find(|&id| !doc.hint(id).unwrap().children().is_empty())
        .expect("one anchor should own the interpolation");
    assert_eq!(doc.hint(owner).unwrap().target(), &Identifier::Index(9));
}

#[test]
fn rebuild_is_idempotent() {
    let nodes = vec![
        RawHint::new(HintKind::Shift, 5u16).with_reference(3u16),
        RawHint::new(HintKind::Anchor, 3u16),
        RawHint::new(HintKind::Align, 6u16).with_reference(5u16),
        RawHint::new(HintKind::Anchor, 1u16),
        RawHint::new(HintKind::Interpolate, 2u16).with_reference(Identifier::list([
            Identifier::Index(1),
            Identifier::Index(3),
        ])),
    ];
    let index_a = index(8);
    let once = reorder(index_a.clone(), Axis::Y, nodes.clone());
    let twice = reorder(index_a, Axis::Y, once.clone());
    assert_eq!(once, twice);
}

#[test]
fn rebuild_loses_no_hints() {
    let nodes = vec![
        RawHint::new(HintKind::Shift, 1u16).with_reference(2u16),
        RawHint::new(HintKind::Shift, 2u16).with_reference(1u16),
        RawHint::new(HintKind::Anchor, 4u16),
        RawHint::new(HintKind::Align, 5u16).with_reference(60u16),
        RawHint::new(HintKind::Function, Identifier::group([
            ("a", Identifier::Index(6)),
            ("b", Identifier::Index(7)),
        ])),
    ];
    let count: usize = nodes.iter().map(RawHint::count).sum();

    let mut doc = Document::load(Axis::X, index(8), nodes);
    doc.rebuild();
    assert_eq!(doc.len(), count);
    assert_eq!(doc.compile_order().len(), count);
}

#[test]
fn contradictory_references_terminate() {
    // 1 and 2 reference each other; the sort must neither crash nor
    // loop, and both hints survive.
    let mut doc = Document::load(
        Axis::Y,
        index(4),
        vec![
            RawHint::new(HintKind::Shift, 1u16).with_reference(2u16),
            RawHint::new(HintKind::Shift, 2u16).with_reference(1u16),
        ],
    );
    doc.rebuild();
    assert_eq!(doc.len(), 2);
}

#[test]
fn touch_state_matches_live_hints() {
    let mut doc = Document::load(
        Axis::Y,
        index(10),
        vec![
            RawHint::new(HintKind::Anchor, 3u16),
            RawHint::new(HintKind::Shift, 5u16).with_reference(3u16),
            RawHint::new(
                HintKind::Align,
                Identifier::list([Identifier::Index(6), Identifier::Index(7)]),
            )
            .with_reference(5u16),
        ],
    );
    doc.rebuild();

    let shift = doc.owners(PointId::new(5))[0];
    doc.delete_hint(shift);
    doc.add_hint(RawHint::new(HintKind::Anchor, 9u16));

    for raw in 0..10u16 {
        let point = PointId::new(raw);
        let expected: Vec<HintId> = doc
            .compile_order()
            .into_iter()
            .filter(|&id| {
                doc.point_index()
                    .points_of(doc.hint(id).unwrap().target())
                    .contains(&point)
            })
            .collect();
        assert_eq!(doc.touched(point), !expected.is_empty(), "point {point}");
        let mut owners = doc.owners(point);
        owners.sort();
        let mut expected_sorted = expected;
        expected_sorted.sort();
        assert_eq!(owners, expected_sorted, "owners of {point}");
    }
}

#[test]
fn reversal_round_trip_in_document() {
    let mut doc = Document::load(
        Axis::Y,
        index(8),
        vec![
            RawHint::new(HintKind::Anchor, 3u16),
            RawHint::new(HintKind::Align, 5u16).with_reference(3u16),
        ],
    );
    doc.rebuild();

    let align = doc.owners(PointId::new(5))[0];
    assert!(doc.reverse_hint(align));
    assert!(doc.reverse_hint(align));
    let record = doc.hint(align).unwrap();
    assert_eq!(record.target(), &Identifier::Index(5));
    assert_eq!(record.reference(), Some(&Identifier::Index(3)));
    assert_no_forward_references(&doc);
}

#[test]
fn deep_chain_orders_fully() {
    // anchor <- align <- shift <- align, declared in reverse
    let mut doc = Document::load(
        Axis::Y,
        index(8),
        vec![
            RawHint::new(HintKind::Align, 6u16).with_reference(4u16),
            RawHint::new(HintKind::Shift, 4u16).with_reference(2u16),
            RawHint::new(HintKind::Align, 2u16).with_reference(0u16),
            RawHint::new(HintKind::Anchor, 0u16),
        ],
    );
    doc.rebuild();

    assert_eq!(doc.roots().len(), 1);
    let order = doc.compile_order();
    let targets: Vec<&Identifier> = order
        .iter()
        .map(|&id| doc.hint(id).unwrap().target())
        .collect();
    assert_eq!(
        targets,
        vec![
            &Identifier::Index(0),
            &Identifier::Index(2),
            &Identifier::Index(4),
            &Identifier::Index(6)
        ]
    );
    assert_no_forward_references(&doc);
}
