//! Property-based invariant tests for the editing engine.
//!
//! 1. Table column widths always sum to 100.
//! 2. Elements stay inside the canvas after drags, resizes and table edits.
//! 3. Serialized documents decode to the same document.
//! 4. N undos return to the start, N redos return to the end.
//! 5. The undo stack never exceeds its capacity and evicts oldest first.

use formdesign_core::elements::{ColumnLimits, TableProps, WIDTH_TOLERANCE};
use formdesign_core::{
    Document, EditorSession, ElementKind, ElementType, GeometryPatch, MAX_UNDO_HISTORY, PageSize,
    PropertyEdit, ResizeHandle,
};
use kurbo::{Point, Rect, Vec2};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum TableOp {
    Columns(usize),
    Width(usize, f64),
    Boundary(usize, f64),
}

fn table_op_strategy() -> impl Strategy<Value = TableOp> {
    prop_oneof![
        (1usize..=12).prop_map(TableOp::Columns),
        (0usize..12, -10.0f64..120.0).prop_map(|(i, w)| TableOp::Width(i, w)),
        (0usize..12, -80.0f64..80.0).prop_map(|(i, d)| TableOp::Boundary(i, d)),
    ]
}

fn element_type_strategy() -> impl Strategy<Value = ElementType> {
    (0usize..ElementType::ALL.len()).prop_map(|i| ElementType::ALL[i])
}

fn point_strategy() -> impl Strategy<Value = Point> {
    (-200.0f64..1200.0, -200.0f64..1400.0).prop_map(|(x, y)| Point::new(x, y))
}

fn handle_strategy() -> impl Strategy<Value = ResizeHandle> {
    (0usize..8).prop_map(|i| ResizeHandle::ALL[i])
}

#[derive(Debug, Clone)]
enum Action {
    Add(ElementType, Point),
    Nudge(f64, f64),
    Delete,
    Duplicate,
    Resize(f64, f64),
    Rows(usize),
    RowHeight(f64),
}

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        (element_type_strategy(), point_strategy()).prop_map(|(t, p)| Action::Add(t, p)),
        (-1.0f64..=1.0, -1.0f64..=1.0).prop_map(|(x, y)| Action::Nudge(x.round(), y.round())),
        Just(Action::Delete),
        Just(Action::Duplicate),
        (1.0f64..400.0, 1.0f64..400.0).prop_map(|(w, h)| Action::Resize(w, h)),
        (1usize..=40).prop_map(Action::Rows),
        (10.0f64..300.0).prop_map(Action::RowHeight),
    ]
}

fn apply(session: &mut EditorSession, action: &Action) {
    match action {
        Action::Add(t, p) => {
            session.add_element(*t, *p);
        }
        Action::Nudge(x, y) => {
            session.nudge(Vec2::new(*x, *y), false);
        }
        Action::Delete => {
            session.delete_selection();
        }
        Action::Duplicate => {
            session.duplicate_selection();
        }
        Action::Resize(w, h) => {
            if let Some(id) = session.selection().primary().cloned() {
                let patch = GeometryPatch {
                    width: Some(*w),
                    height: Some(*h),
                    ..GeometryPatch::default()
                };
                let _ = session.update_geometry(&id, patch);
            }
        }
        Action::Rows(rows) => {
            if let Some(id) = session.selection().primary().cloned() {
                let _ = session.update_property(&id, PropertyEdit::Rows(*rows));
            }
        }
        Action::RowHeight(height) => {
            if let Some(id) = session.selection().primary().cloned() {
                let _ = session.update_property(&id, PropertyEdit::RowHeight(*height));
            }
        }
    }
}

fn assert_table_heights(session: &EditorSession) -> Result<(), TestCaseError> {
    for element in session.document().iter() {
        if let ElementKind::Table(table) = &element.kind {
            prop_assert_eq!(element.height, table.derived_height());
        }
    }
    Ok(())
}

fn assert_contained(session: &EditorSession) -> Result<(), TestCaseError> {
    let canvas = session.document().canvas_size();
    for element in session.document().iter() {
        let b = session.bounds_of(&element.id).unwrap_or(Rect::ZERO);
        prop_assert!(b.x0 >= 0.0 && b.y0 >= 0.0, "{:?} starts outside the page", b);
        prop_assert!(
            b.x1 <= canvas.width + 1e-9 && b.y1 <= canvas.height + 1e-9,
            "{:?} extends past {:?}",
            b,
            canvas
        );
    }
    Ok(())
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Column widths sum to 100
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn column_widths_sum_to_100(ops in prop::collection::vec(table_op_strategy(), 1..40)) {
        let limits = ColumnLimits::default();
        let mut table = TableProps::default();
        for op in &ops {
            match *op {
                TableOp::Columns(n) => { let _ = table.set_columns(n, &limits); }
                TableOp::Width(i, w) => { let _ = table.set_column_width(i, w, &limits); }
                TableOp::Boundary(i, d) => { table.resize_boundary(i, d, limits.min); }
            }
            prop_assert_eq!(table.column_widths.len(), table.columns);
            prop_assert!(
                (table.width_sum() - 100.0).abs() <= WIDTH_TOLERANCE,
                "widths {:?} after {:?}",
                table.column_widths,
                op
            );
            prop_assert!(table.column_widths.iter().all(|w| *w > 0.0));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Canvas containment after gestures
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn drag_keeps_elements_on_page(
        types in prop::collection::vec(element_type_strategy(), 1..6),
        start in point_strategy(),
        moves in prop::collection::vec(point_strategy(), 1..8),
    ) {
        let mut session = EditorSession::default();
        for (i, t) in types.iter().enumerate() {
            session.add_element(*t, Point::new(40.0 * i as f64, 30.0 * i as f64));
        }
        session.select_all();
        session.begin_drag(start).unwrap();
        for point in &moves {
            session.update_drag(*point).unwrap();
        }
        session.end_drag().unwrap();
        assert_contained(&session)?;
    }

    #[test]
    fn resize_keeps_elements_on_page(
        element_type in element_type_strategy(),
        at in point_strategy(),
        handle in handle_strategy(),
        moves in prop::collection::vec(point_strategy(), 1..8),
        page in 0usize..3,
    ) {
        let mut session = EditorSession::default();
        let page_size = [PageSize::A4, PageSize::Letter, PageSize::Legal][page];
        session.set_page_size(page_size).unwrap();
        let id = session.add_element(element_type, at);
        if session.begin_resize(&id, handle, Point::ZERO).unwrap_or(false) {
            for point in &moves {
                session.update_resize(*point).unwrap();
            }
            session.end_resize().unwrap();
        }
        assert_contained(&session)?;
        assert_table_heights(&session)?;
        let element = session.document().get(&id).unwrap();
        if !element.is_auto_sized() {
            let min = session.config().min_element_size;
            prop_assert!(element.width >= min || element.element_type() == ElementType::VLine);
            prop_assert!(element.height >= min || element.element_type() == ElementType::HLine);
        }
    }
}

proptest! {
    #[test]
    fn table_edits_keep_height_in_sync(
        at in point_strategy(),
        actions in prop::collection::vec(
            prop_oneof![
                (1usize..=40).prop_map(Action::Rows),
                (10.0f64..300.0).prop_map(Action::RowHeight),
                (-1.0f64..=1.0, -1.0f64..=1.0).prop_map(|(x, y)| Action::Nudge(x.round(), y.round())),
            ],
            1..20,
        ),
        page in 0usize..3,
    ) {
        let mut session = EditorSession::default();
        let page_size = [PageSize::A4, PageSize::Letter, PageSize::Legal][page];
        session.set_page_size(page_size).unwrap();
        session.add_element(ElementType::Table, at);
        for action in &actions {
            apply(&mut session, action);
            assert_contained(&session)?;
            assert_table_heights(&session)?;
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Serialize / deserialize round trip
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn document_round_trip(actions in prop::collection::vec(action_strategy(), 0..25)) {
        let mut session = EditorSession::default();
        for action in &actions {
            apply(&mut session, action);
        }
        let json = session.export_data().unwrap();
        let decoded = Document::from_json(&json).unwrap();
        prop_assert_eq!(&decoded, session.document());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Undo / redo symmetry
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn undo_redo_symmetry(actions in prop::collection::vec(action_strategy(), 1..30)) {
        let mut session = EditorSession::default();
        let initial = session.document().clone();
        for action in &actions {
            apply(&mut session, action);
        }
        let last = session.document().clone();
        let captured = session.history().undo_len();

        for _ in 0..captured {
            prop_assert!(session.undo());
        }
        prop_assert!(!session.undo());
        prop_assert_eq!(session.document(), &initial);

        for _ in 0..captured {
            prop_assert!(session.redo());
        }
        prop_assert!(!session.redo());
        prop_assert_eq!(session.document(), &last);

        if captured > 0 {
            session.undo();
            session.add_element(ElementType::Label, Point::ZERO);
            prop_assert!(!session.history().can_redo());
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. History bound
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn history_is_bounded(count in (MAX_UNDO_HISTORY + 1)..(MAX_UNDO_HISTORY + 30)) {
        let mut session = EditorSession::default();
        for i in 0..count {
            session.add_element(ElementType::Label, Point::new((i % 50) as f64, 0.0));
            prop_assert!(session.history().undo_len() <= MAX_UNDO_HISTORY);
        }
        prop_assert_eq!(session.history().undo_len(), MAX_UNDO_HISTORY);
        let oldest = session.history().entries().next().unwrap();
        prop_assert_eq!(oldest.document.len(), count - MAX_UNDO_HISTORY);
    }
}
