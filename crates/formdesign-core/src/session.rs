//! The editing session: one document plus everything needed to edit it.
//!
//! `EditorSession` is the entry point for hosts. It owns the document,
//! selection, history, view and active gestures, and routes every mutating
//! command through a single path that snapshots history before the change
//! and rolls back on validation failure.
//!
//! Pointer positions passed to gesture and hit-test methods are in screen
//! coordinates and are converted through the current view.

use crate::config::EditorConfig;
use crate::document::{Constraints, Document, GeometryPatch, PageSize, ZOrder, constrain_element};
use crate::elements::{
    Element, ElementId, ElementKind, ElementType, FontWeight, PropertyEdit, SerializableColor,
    TextAlign, headers_from_csv,
};
use crate::error::{DocumentResult, EditError, EditResult};
use crate::geometry::{Measurer, NoMeasurer, bounds};
use crate::handles::{
    HANDLE_HIT_TOLERANCE, HandleKind, ResizeHandle, hit_test_handles, resize_handles_for,
};
use crate::history::HistoryManager;
use crate::manipulation::{
    Alignment, ColumnResizeGesture, DistributeAxis, DragGesture, GestureContext, GestureKind,
    Gestures, MarqueeGesture, ResizeGesture, align, distribute,
};
use crate::selection::{SelectMode, Selection};
use crate::snap::Grid;
use crate::storage::{Storage, StorageError, StorageResult, load_document, save_document};
use crate::view::View;
use kurbo::{Point, Rect, Vec2};

/// Style changes applied to every selected text-bearing element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextStylePatch {
    pub font_size: Option<f64>,
    pub font_weight: Option<FontWeight>,
    pub text_align: Option<TextAlign>,
    pub color: Option<SerializableColor>,
}

impl TextStylePatch {
    fn edits(&self) -> Vec<PropertyEdit> {
        let mut edits = Vec::new();
        if let Some(size) = self.font_size {
            edits.push(PropertyEdit::FontSize(size));
        }
        if let Some(weight) = self.font_weight {
            edits.push(PropertyEdit::FontWeight(weight));
        }
        if let Some(align) = self.text_align {
            edits.push(PropertyEdit::TextAlign(align));
        }
        if let Some(color) = self.color {
            edits.push(PropertyEdit::Color(color));
        }
        edits
    }
}

fn constraints<'a>(config: &EditorConfig, measurer: &'a dyn Measurer) -> Constraints<'a> {
    Constraints::new(measurer)
        .with_min_size(config.min_element_size)
        .with_column_limits(config.column_limits())
}

fn plural(count: usize) -> String {
    format!("{count} element(s)")
}

/// An editing session over one form document.
pub struct EditorSession {
    document: Document,
    selection: Selection,
    history: HistoryManager,
    view: View,
    grid: Grid,
    config: EditorConfig,
    gestures: Gestures,
    measurer: Box<dyn Measurer>,
    storage: Option<Box<dyn Storage>>,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl EditorSession {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            document: Document::new(),
            selection: Selection::new(),
            history: HistoryManager::new(config.history_capacity),
            view: View::new(config.zoom),
            grid: Self::grid_from(&config),
            config,
            gestures: Gestures::default(),
            measurer: Box::new(NoMeasurer),
            storage: None,
        }
    }

    pub fn with_measurer(mut self, measurer: Box<dyn Measurer>) -> Self {
        self.measurer = measurer;
        self
    }

    pub fn with_storage(mut self, storage: Box<dyn Storage>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Start from an existing document without recording history.
    pub fn with_document(mut self, document: Document) -> Self {
        self.document = document;
        self.reclamp_all();
        self
    }

    fn grid_from(config: &EditorConfig) -> Grid {
        Grid {
            size: config.grid_size,
            snap_enabled: config.snap_enabled,
            visible: config.show_grid,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn gestures(&self) -> &Gestures {
        &self.gestures
    }

    pub fn measurer(&self) -> &dyn Measurer {
        self.measurer.as_ref()
    }

    /// Replace the measurer, e.g. after the host has laid out checkboxes.
    pub fn set_measurer(&mut self, measurer: Box<dyn Measurer>) {
        self.measurer = measurer;
    }

    /// Resolved bounds of an element.
    pub fn bounds_of(&self, id: &ElementId) -> Option<Rect> {
        self.document.get(id).map(|e| bounds(e, self.measurer.as_ref()))
    }

    fn reclamp_all(&mut self) {
        let c = constraints(&self.config, self.measurer.as_ref());
        let canvas = self.document.canvas_size();
        for element in &mut self.document.elements {
            constrain_element(element, canvas, &c);
        }
    }

    /// Run a document mutation with history capture and rollback.
    ///
    /// History is captured only when `changed` reports a change. On error
    /// the document is restored and nothing is recorded.
    fn mutate<T>(
        &mut self,
        label: &str,
        f: impl FnOnce(&mut Document, &Constraints<'_>) -> EditResult<T>,
        changed: impl FnOnce(&T) -> bool,
    ) -> EditResult<T> {
        let before = self.document.clone();
        let c = constraints(&self.config, self.measurer.as_ref());
        match f(&mut self.document, &c) {
            Ok(value) => {
                if changed(&value) {
                    self.history.capture(label, &before, &self.selection);
                    self.selection.prune(&self.document);
                }
                Ok(value)
            }
            Err(err) => {
                self.document = before;
                log::warn!("{label} rejected: {err}");
                Err(err)
            }
        }
    }

    // Element commands

    /// Add an element with its kind defaults at `at` (page units) and
    /// select it.
    pub fn add_element(&mut self, element_type: ElementType, at: Point) -> ElementId {
        let at = self.grid.snap_point(at).point;
        self.history
            .capture(&format!("Add {element_type}"), &self.document, &self.selection);
        let c = constraints(&self.config, self.measurer.as_ref());
        let id = self.document.add_element(element_type, at, &c);
        self.selection.select(id.clone(), SelectMode::Replace);
        id
    }

    pub fn update_geometry(&mut self, id: &ElementId, patch: GeometryPatch) -> EditResult<bool> {
        let id = id.clone();
        self.mutate(
            "Edit geometry",
            |doc, c| doc.update_geometry(&id, patch, c),
            |changed| *changed,
        )
    }

    pub fn update_property(&mut self, id: &ElementId, edit: PropertyEdit) -> EditResult<bool> {
        let label = format!("Edit {}", edit.name());
        let id = id.clone();
        self.mutate(
            &label,
            |doc, c| doc.update_property(&id, edit, c),
            |changed| *changed,
        )
    }

    pub fn set_custom_id(&mut self, id: &ElementId, custom_id: Option<&str>) -> EditResult<bool> {
        let id = id.clone();
        self.mutate(
            "Edit element id",
            |doc, _| doc.set_custom_id(&id, custom_id),
            |changed| *changed,
        )
    }

    /// Set table headers from a comma separated list.
    pub fn set_table_headers_from_csv(&mut self, id: &ElementId, csv: &str) -> EditResult<bool> {
        self.update_property(id, PropertyEdit::Headers(headers_from_csv(csv)))
    }

    /// Apply a style patch to every selected element with text. Other
    /// kinds are skipped. Returns how many elements changed.
    pub fn apply_text_style(&mut self, patch: &TextStylePatch) -> EditResult<usize> {
        let edits = patch.edits();
        let targets: Vec<ElementId> = self
            .selection
            .ids()
            .iter()
            .filter(|id| {
                self.document
                    .get(id)
                    .is_some_and(|e| e.kind.text_style().is_some())
            })
            .cloned()
            .collect();
        self.mutate(
            "Apply text style",
            |doc, c| {
                let mut changed = 0;
                for id in &targets {
                    let mut any = false;
                    for edit in &edits {
                        any |= doc.update_property(id, edit.clone(), c)?;
                    }
                    changed += usize::from(any);
                }
                Ok(changed)
            },
            |changed| *changed > 0,
        )
    }

    pub fn delete_elements(&mut self, ids: &[ElementId]) -> usize {
        let present = ids.iter().filter(|id| self.document.contains(id)).count();
        let label = format!("Delete {}", plural(present));
        let removed = self
            .mutate(&label, |doc, _| Ok(doc.delete_elements(ids)), |n| *n > 0)
            .unwrap_or(0);
        self.selection.prune(&self.document);
        removed
    }

    pub fn delete_selection(&mut self) -> usize {
        let ids = self.selection.to_vec();
        self.delete_elements(&ids)
    }

    /// Duplicate the selection with the configured offset and select the
    /// copies.
    pub fn duplicate_selection(&mut self) -> Vec<ElementId> {
        let ids = self.selection.to_vec();
        let offset = Vec2::new(self.config.duplicate_offset, self.config.duplicate_offset);
        let label = format!("Duplicate {}", plural(ids.len()));
        let copies = self
            .mutate(
                &label,
                |doc, c| Ok(doc.duplicate_elements(&ids, offset, c)),
                |copies| !copies.is_empty(),
            )
            .unwrap_or_default();
        if !copies.is_empty() {
            self.selection.set(copies.clone());
        }
        copies
    }

    pub fn set_element_order(&mut self, id: &ElementId, order: ZOrder) -> bool {
        let label = match order {
            ZOrder::Front => "Bring to front",
            ZOrder::Back => "Send to back",
            ZOrder::Forward => "Bring forward",
            ZOrder::Backward => "Send backward",
        };
        self.mutate(label, |doc, _| Ok(doc.set_element_order(id, order)), |m| *m)
            .unwrap_or(false)
    }

    /// Re-order every selected element, keeping their relative order.
    pub fn order_selection(&mut self, order: ZOrder) -> bool {
        let mut ids: Vec<ElementId> = self
            .document
            .iter()
            .filter(|e| self.selection.contains(&e.id))
            .map(|e| e.id.clone())
            .collect();
        // Keep the selected elements' relative order.
        if matches!(order, ZOrder::Forward | ZOrder::Back) {
            ids.reverse();
        }
        let label = format!("Reorder {}", plural(ids.len()));
        self.mutate(
            &label,
            |doc, _| {
                let mut moved = false;
                for id in &ids {
                    moved |= doc.set_element_order(id, order);
                }
                Ok(moved)
            },
            |m| *m,
        )
        .unwrap_or(false)
    }

    fn move_to(&mut self, label: &str, targets: Vec<(ElementId, Point)>) -> usize {
        if targets.is_empty() {
            return 0;
        }
        self.mutate(
            label,
            |doc, c| {
                let mut moved = 0;
                for (id, origin) in &targets {
                    moved += usize::from(doc.update_geometry(id, GeometryPatch::position(*origin), c)?);
                }
                Ok(moved)
            },
            |n| *n > 0,
        )
        .unwrap_or(0)
    }

    fn selected_bounds(&self) -> Vec<(ElementId, Rect)> {
        self.selection
            .ids()
            .iter()
            .filter_map(|id| self.bounds_of(id).map(|r| (id.clone(), r)))
            .collect()
    }

    /// Align the selection (two or more elements). Returns how many moved.
    pub fn align_selection(&mut self, alignment: Alignment) -> usize {
        let targets = align(&self.selected_bounds(), alignment);
        self.move_to(&format!("Align {alignment:?}").to_lowercase(), targets)
    }

    /// Space the selection (three or more elements) evenly.
    pub fn distribute_selection(&mut self, axis: DistributeAxis) -> usize {
        let targets = distribute(&self.selected_bounds(), axis);
        self.move_to(&format!("Distribute {axis:?}").to_lowercase(), targets)
    }

    /// Move the selection one step in `direction` (components -1, 0 or 1).
    /// The step is the grid size when snapping, else the nudge step; `large`
    /// multiplies it by ten.
    pub fn nudge(&mut self, direction: Vec2, large: bool) -> usize {
        let step = if self.grid.snap_enabled {
            self.grid.size * if large { 10.0 } else { 1.0 }
        } else if large {
            self.config.nudge_step_large
        } else {
            self.config.nudge_step
        };
        let grid = self.grid;
        let targets: Vec<(ElementId, Point)> = self
            .selection
            .ids()
            .iter()
            .filter_map(|id| self.document.get(id))
            .map(|e| (e.id.clone(), grid.snap_point(e.origin() + direction * step).point))
            .collect();
        let label = format!("Move {}", plural(targets.len()));
        self.move_to(&label, targets)
    }

    pub fn set_page_size(&mut self, page_size: PageSize) -> EditResult<bool> {
        if self.document.page_size == page_size {
            return Ok(false);
        }
        self.mutate(
            "Change page size",
            |doc, c| doc.set_page_size(page_size, c).map(|_| true),
            |changed| *changed,
        )
    }

    /// Remove every element and restart ids. Undoable. Returns false when
    /// the document was already empty.
    pub fn clear_all(&mut self) -> EditResult<bool> {
        self.gestures.cancel_all();
        let changed = self.mutate(
            "Clear all",
            |doc, _| {
                let had_content = !doc.is_empty() || doc.next_id != 1;
                doc.clear();
                Ok(had_content)
            },
            |changed| *changed,
        )?;
        self.selection.clear();
        if changed {
            log::info!("Cleared document");
        }
        Ok(changed)
    }

    // Selection

    /// Select an element. Unknown ids are ignored.
    pub fn select(&mut self, id: &ElementId, mode: SelectMode) -> bool {
        if !self.document.contains(id) {
            return false;
        }
        self.selection.select(id.clone(), mode);
        true
    }

    pub fn select_all(&mut self) {
        self.selection.set(self.document.ids());
    }

    /// Replace the selection with every element intersecting `rect`
    /// (page units).
    pub fn select_within_rect(&mut self, rect: Rect) -> Vec<ElementId> {
        let hits = self.document.elements_in_rect(rect, self.measurer.as_ref());
        self.selection.set(hits.clone());
        hits
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // History

    pub fn undo(&mut self) -> bool {
        self.gestures.cancel_all();
        self.history.undo(&mut self.document, &mut self.selection)
    }

    pub fn redo(&mut self) -> bool {
        self.gestures.cancel_all();
        self.history.redo(&mut self.document, &mut self.selection)
    }

    // View

    pub fn zoom_in(&mut self) {
        self.view.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.view.zoom_out();
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.view.set_zoom(zoom);
    }

    pub fn reset_zoom(&mut self) {
        self.view.reset_zoom();
    }

    pub fn set_view_origin(&mut self, origin: Vec2) {
        self.view.origin = origin;
    }

    pub fn screen_to_page(&self, screen_point: Point) -> Point {
        self.view.screen_to_page(screen_point)
    }

    pub fn page_to_screen(&self, page_point: Point) -> Point {
        self.view.page_to_screen(page_point)
    }

    pub fn toggle_grid(&mut self) -> bool {
        self.grid.visible = !self.grid.visible;
        self.grid.visible
    }

    pub fn toggle_snap(&mut self) -> bool {
        self.grid.snap_enabled = !self.grid.snap_enabled;
        self.grid.snap_enabled
    }

    pub fn set_snap(&mut self, enabled: bool) {
        self.grid.snap_enabled = enabled;
    }

    // Hit testing

    /// Topmost element under a screen point.
    pub fn element_at(&self, screen_point: Point) -> Option<ElementId> {
        let point = self.screen_to_page(screen_point);
        self.document
            .element_at(point, self.measurer.as_ref())
            .map(|e| e.id.clone())
    }

    /// Handle of a selected element under a screen point, topmost element
    /// first.
    pub fn handle_at(&self, screen_point: Point) -> Option<(ElementId, HandleKind)> {
        let point = self.screen_to_page(screen_point);
        let tolerance = HANDLE_HIT_TOLERANCE / self.view.zoom;
        self.document
            .iter()
            .rev()
            .filter(|e| self.selection.contains(&e.id))
            .find_map(|e| {
                let rect = bounds(e, self.measurer.as_ref());
                hit_test_handles(e, rect, point, tolerance).map(|kind| (e.id.clone(), kind))
            })
    }

    // Gestures

    fn gesture_context(&self) -> GestureContext<'_> {
        GestureContext {
            canvas: self.document.canvas_size(),
            grid: self.grid,
            constraints: constraints(&self.config, self.measurer.as_ref()),
        }
    }

    fn ensure_idle(&self, kind: GestureKind) -> EditResult<()> {
        if self.gestures.is_active(kind) {
            Err(EditError::GestureActive(kind))
        } else {
            Ok(())
        }
    }

    /// Start dragging the selected elements. Returns false when nothing is
    /// selected.
    pub fn begin_drag(&mut self, screen_point: Point) -> EditResult<bool> {
        self.ensure_idle(GestureKind::Drag)?;
        let elements: Vec<Element> = self
            .document
            .iter()
            .filter(|e| self.selection.contains(&e.id))
            .cloned()
            .collect();
        if elements.is_empty() {
            return Ok(false);
        }
        let start = self.screen_to_page(screen_point);
        self.gestures.drag = Some(DragGesture::begin(elements, start));
        Ok(true)
    }

    pub fn update_drag(&mut self, screen_point: Point) -> EditResult<()> {
        let point = self.screen_to_page(screen_point);
        let mut drag = self
            .gestures
            .drag
            .take()
            .ok_or(EditError::NoActiveGesture(GestureKind::Drag))?;
        drag.update(point, &self.gesture_context());
        self.gestures.drag = Some(drag);
        Ok(())
    }

    /// Commit the drag. Returns true if anything moved.
    pub fn end_drag(&mut self) -> EditResult<bool> {
        let drag = self
            .gestures
            .drag
            .take()
            .ok_or(EditError::NoActiveGesture(GestureKind::Drag))?;
        if !drag.has_moved() {
            return Ok(false);
        }
        let label = format!("Move {}", plural(drag.preview().len()));
        self.history.capture(&label, &self.document, &self.selection);
        for moved in drag.into_preview() {
            if let Some(element) = self.document.get_mut(&moved.id) {
                element.x = moved.x;
                element.y = moved.y;
            }
        }
        Ok(true)
    }

    /// Start resizing an element from one of its handles. Unknown ids
    /// return false.
    pub fn begin_resize(
        &mut self,
        id: &ElementId,
        handle: ResizeHandle,
        screen_point: Point,
    ) -> EditResult<bool> {
        self.ensure_idle(GestureKind::Resize)?;
        let Some(element) = self.document.get(id) else {
            return Ok(false);
        };
        if !resize_handles_for(element).contains(&handle) {
            return Err(EditError::InvalidValue {
                property: "handle",
                reason: format!("{} elements have no {} handle", element.element_type(), handle.name()),
            });
        }
        let start = self.screen_to_page(screen_point);
        self.gestures.resize = Some(ResizeGesture::begin(element.clone(), handle, start));
        Ok(true)
    }

    pub fn update_resize(&mut self, screen_point: Point) -> EditResult<()> {
        let point = self.screen_to_page(screen_point);
        let mut resize = self
            .gestures
            .resize
            .take()
            .ok_or(EditError::NoActiveGesture(GestureKind::Resize))?;
        resize.update(point, &self.gesture_context());
        self.gestures.resize = Some(resize);
        Ok(())
    }

    pub fn end_resize(&mut self) -> EditResult<bool> {
        let resize = self
            .gestures
            .resize
            .take()
            .ok_or(EditError::NoActiveGesture(GestureKind::Resize))?;
        if !resize.has_changed() || !self.document.contains(resize.id()) {
            return Ok(false);
        }
        self.history.capture("Resize element", &self.document, &self.selection);
        let resized = resize.into_preview();
        if let Some(element) = self.document.get_mut(&resized.id) {
            element.x = resized.x;
            element.y = resized.y;
            element.width = resized.width;
            element.height = resized.height;
        }
        Ok(true)
    }

    /// Start dragging the border right of table column `boundary`.
    pub fn begin_column_resize(
        &mut self,
        id: &ElementId,
        boundary: usize,
        screen_point: Point,
    ) -> EditResult<bool> {
        self.ensure_idle(GestureKind::ColumnResize)?;
        let Some(element) = self.document.get(id) else {
            return Ok(false);
        };
        let start = self.screen_to_page(screen_point);
        let gesture = ColumnResizeGesture::begin(element.clone(), boundary, start).ok_or_else(|| {
            EditError::ColumnIndexOutOfRange {
                index: boundary + 1,
                columns: element.kind.as_table().map_or(0, |t| t.columns),
            }
        })?;
        self.gestures.column_resize = Some(gesture);
        Ok(true)
    }

    pub fn update_column_resize(&mut self, screen_point: Point) -> EditResult<()> {
        let point = self.screen_to_page(screen_point);
        let mut gesture = self
            .gestures
            .column_resize
            .take()
            .ok_or(EditError::NoActiveGesture(GestureKind::ColumnResize))?;
        gesture.update(point, &self.gesture_context());
        self.gestures.column_resize = Some(gesture);
        Ok(())
    }

    pub fn end_column_resize(&mut self) -> EditResult<bool> {
        let gesture = self
            .gestures
            .column_resize
            .take()
            .ok_or(EditError::NoActiveGesture(GestureKind::ColumnResize))?;
        if !gesture.has_changed() || !self.document.contains(gesture.id()) {
            return Ok(false);
        }
        self.history.capture("Resize column", &self.document, &self.selection);
        let resized = gesture.into_preview();
        if let ElementKind::Table(preview) = resized.kind {
            if let Some(ElementKind::Table(table)) =
                self.document.get_mut(&resized.id).map(|e| &mut e.kind)
            {
                table.column_widths = preview.column_widths;
            }
        }
        Ok(true)
    }

    pub fn begin_marquee(&mut self, screen_point: Point) -> EditResult<()> {
        self.ensure_idle(GestureKind::Marquee)?;
        let start = self.screen_to_page(screen_point);
        self.gestures.marquee = Some(MarqueeGesture::begin(start));
        Ok(())
    }

    pub fn update_marquee(&mut self, screen_point: Point) -> EditResult<()> {
        let point = self.screen_to_page(screen_point);
        self.gestures
            .marquee
            .as_mut()
            .ok_or(EditError::NoActiveGesture(GestureKind::Marquee))?
            .update(point);
        Ok(())
    }

    /// Finish the marquee and select what it covers.
    pub fn end_marquee(&mut self) -> EditResult<Vec<ElementId>> {
        let marquee = self
            .gestures
            .marquee
            .take()
            .ok_or(EditError::NoActiveGesture(GestureKind::Marquee))?;
        Ok(self.select_within_rect(marquee.rect()))
    }

    /// Marquee rectangle in page units while one is being drawn.
    pub fn marquee_rect(&self) -> Option<Rect> {
        self.gestures.marquee.map(|m| m.rect())
    }

    /// Drop the active gesture without committing. Returns false if none
    /// was active.
    pub fn cancel_gesture(&mut self) -> bool {
        let active = self.gestures.any_active();
        self.gestures.cancel_all();
        active
    }

    /// Escape: cancel a gesture, or clear the selection when idle.
    pub fn escape(&mut self) {
        if !self.cancel_gesture() {
            self.selection.clear();
        }
    }

    /// Elements as they should be displayed: document order, with gesture
    /// previews standing in for the elements being changed.
    pub fn display_elements(&self) -> Vec<&Element> {
        let previews = self.gestures.previews();
        self.document
            .iter()
            .map(|e| {
                previews
                    .iter()
                    .find(|p| p.id == e.id)
                    .copied()
                    .unwrap_or(e)
            })
            .collect()
    }

    /// Ids of elements being changed by a geometry gesture.
    pub fn gesture_targets(&self) -> Vec<ElementId> {
        self.gestures.previews().iter().map(|e| e.id.clone()).collect()
    }

    // Persistence

    fn storage(&self) -> StorageResult<&dyn Storage> {
        self.storage
            .as_deref()
            .ok_or_else(|| StorageError::Other("No storage configured".to_string()))
    }

    pub fn has_storage(&self) -> bool {
        self.storage.is_some()
    }

    /// Remove the saved document. Returns false if nothing was saved.
    pub fn discard_saved(&self) -> StorageResult<bool> {
        let storage = self.storage()?;
        let key = &self.config.storage_key;
        if !storage.exists(key)? {
            return Ok(false);
        }
        storage.delete(key)?;
        log::info!("Discarded saved document \"{key}\"");
        Ok(true)
    }

    /// Save the document under the configured storage key.
    pub fn save(&self) -> StorageResult<()> {
        let storage = self.storage()?;
        save_document(storage, &self.config.storage_key, &self.document).inspect_err(|e| {
            log::warn!("Failed to save document: {e}");
        })?;
        log::info!(
            "Saved {} element(s) to \"{}\"",
            self.document.len(),
            self.config.storage_key
        );
        Ok(())
    }

    /// Replace the document with the saved one. View preferences reset to
    /// their configured defaults and history starts over. Returns false if
    /// nothing was saved.
    pub fn load_saved(&mut self) -> StorageResult<bool> {
        let storage = self.storage()?;
        let document = match load_document(storage, &self.config.storage_key) {
            Ok(document) => document,
            Err(StorageError::NotFound(_)) => return Ok(false),
            Err(e) => {
                log::warn!("Failed to load saved document: {e}");
                return Err(e);
            }
        };
        log::info!("Loaded {} element(s) from \"{}\"", document.len(), self.config.storage_key);
        self.gestures.cancel_all();
        self.document = document;
        self.reclamp_all();
        self.selection.clear();
        self.history.clear();
        self.grid = Self::grid_from(&self.config);
        self.view.reset_zoom();
        Ok(true)
    }

    /// Replace the document with serialized data. Nothing changes unless
    /// the whole blob is valid. Undoable.
    pub fn import_data(&mut self, blob: &str) -> DocumentResult<()> {
        let imported = Document::from_json(blob).inspect_err(|e| {
            log::warn!("Import rejected: {e}");
        })?;
        self.gestures.cancel_all();
        self.history.capture("Import", &self.document, &self.selection);
        self.document = imported;
        self.reclamp_all();
        self.selection.clear();
        log::info!("Imported {} element(s)", self.document.len());
        Ok(())
    }

    /// Serialized `{elements, nextId, pageSize}`.
    pub fn export_data(&self) -> Result<String, serde_json::Error> {
        self.document.to_json()
    }
}
