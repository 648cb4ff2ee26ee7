//! The form document: an ordered list of elements plus page settings.

use crate::elements::{ColumnLimits, Element, ElementId, ElementKind, ElementType, PropertyEdit};
use crate::error::{DocumentError, DocumentResult, EditError, EditResult};
use crate::geometry::{Measurer, bounds, clamp_origin, rects_intersect};
use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Screen pixels per millimetre at 96 DPI.
const PX_PER_MM: f64 = 96.0 / 25.4;

/// Paper size the form is laid out on.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    #[default]
    A4,
    Letter,
    Legal,
    Custom { width_mm: f64, height_mm: f64 },
}

impl PageSize {
    /// Paper dimensions in millimetres.
    pub fn size_mm(&self) -> (f64, f64) {
        match *self {
            PageSize::A4 => (210.0, 297.0),
            PageSize::Letter => (216.0, 279.0),
            PageSize::Legal => (216.0, 356.0),
            PageSize::Custom {
                width_mm,
                height_mm,
            } => (width_mm, height_mm),
        }
    }

    /// Canvas size in page units (CSS pixels).
    pub fn canvas_size(&self) -> Size {
        let (w, h) = self.size_mm();
        Size::new((w * PX_PER_MM).round(), (h * PX_PER_MM).round())
    }

    /// Short name used for the paper CSS class.
    pub fn name(&self) -> &'static str {
        match self {
            PageSize::A4 => "a4",
            PageSize::Letter => "letter",
            PageSize::Legal => "legal",
            PageSize::Custom { .. } => "custom",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "a4" => Some(PageSize::A4),
            "letter" => Some(PageSize::Letter),
            "legal" => Some(PageSize::Legal),
            _ => None,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        let (w, h) = self.size_mm();
        if w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0 {
            Ok(())
        } else {
            Err(format!("invalid page size {w}x{h} mm"))
        }
    }
}

/// Partial geometry update.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GeometryPatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl GeometryPatch {
    pub fn position(origin: Point) -> Self {
        Self {
            x: Some(origin.x),
            y: Some(origin.y),
            ..Self::default()
        }
    }

    pub fn rect(rect: Rect) -> Self {
        Self {
            x: Some(rect.x0),
            y: Some(rect.y0),
            width: Some(rect.width()),
            height: Some(rect.height()),
        }
    }

    fn is_finite(&self) -> bool {
        [self.x, self.y, self.width, self.height]
            .iter()
            .flatten()
            .all(|v| v.is_finite())
    }
}

/// Paint-order change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZOrder {
    Front,
    Back,
    Forward,
    Backward,
}

/// Limits every geometry mutation is held to.
#[derive(Clone, Copy)]
pub struct Constraints<'a> {
    pub min_size: f64,
    pub column_limits: ColumnLimits,
    pub measurer: &'a dyn Measurer,
}

impl<'a> Constraints<'a> {
    pub fn new(measurer: &'a dyn Measurer) -> Self {
        Self {
            min_size: 20.0,
            column_limits: ColumnLimits::default(),
            measurer,
        }
    }

    pub fn with_min_size(mut self, min_size: f64) -> Self {
        self.min_size = min_size;
        self
    }

    pub fn with_column_limits(mut self, column_limits: ColumnLimits) -> Self {
        self.column_limits = column_limits;
        self
    }
}

/// Reject a table whose rows cannot fit on a page of `canvas` height.
pub fn check_fits(element: &Element, canvas: Size) -> EditResult<()> {
    if let ElementKind::Table(table) = &element.kind {
        let height = table.derived_height();
        if height > canvas.height + 1e-9 {
            return Err(EditError::TableTooTall {
                height,
                canvas_height: canvas.height,
            });
        }
    }
    Ok(())
}

/// Drop trailing rows (and shrink the row height when even one row is too
/// tall) until the table fits, then sync the stored height.
fn fit_table_rows(element: &mut Element, canvas_height: f64) {
    let ElementKind::Table(table) = &mut element.kind else {
        return;
    };
    if table.derived_height() > canvas_height + 1e-9 {
        if table.row_height > canvas_height {
            table.row_height = canvas_height;
        }
        let rows = ((canvas_height + 1e-9) / table.row_height).floor() as usize;
        log::warn!(
            "Table {} does not fit the page; keeping {} of {} rows",
            element.id,
            rows.max(1),
            table.rows
        );
        table.rows = rows.max(1);
    }
    element.height = table.derived_height();
}

/// Enforce minimum size, per-kind fixed dimensions and canvas containment.
pub fn constrain_element(element: &mut Element, canvas: Size, constraints: &Constraints<'_>) {
    let min = constraints.min_size;
    match &element.kind {
        ElementKind::VLine(line) => {
            element.width = line.thickness;
            element.height = element.height.max(min);
        }
        ElementKind::HLine(line) => {
            element.height = line.thickness;
            element.width = element.width.max(min);
        }
        ElementKind::Table(_) => {
            element.width = element.width.max(min);
            fit_table_rows(element, canvas.height);
        }
        _ => {
            element.width = element.width.max(min);
            element.height = element.height.max(min);
        }
    }
    element.width = element.width.min(canvas.width);
    element.height = element.height.min(canvas.height);

    let extent = bounds(element, constraints.measurer).size();
    let origin = clamp_origin(element.origin(), extent, canvas);
    element.x = origin.x;
    element.y = origin.y;
}

/// A form document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Elements in paint order (later elements are drawn on top).
    pub elements: Vec<Element>,
    /// Counter for the next element id. Never decreases except on clear.
    #[serde(default = "first_id")]
    pub next_id: u64,
    #[serde(default)]
    pub page_size: PageSize,
}

fn first_id() -> u64 {
    1
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            next_id: first_id(),
            page_size: PageSize::default(),
        }
    }

    pub fn canvas_size(&self) -> Size {
        self.page_size.canvas_size()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Element> {
        self.elements.iter()
    }

    pub fn ids(&self) -> Vec<ElementId> {
        self.elements.iter().map(|e| e.id.clone()).collect()
    }

    pub fn contains(&self, id: &ElementId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn index_of(&self, id: &ElementId) -> Option<usize> {
        self.elements.iter().position(|e| &e.id == id)
    }

    pub fn get(&self, id: &ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| &e.id == id)
    }

    pub fn get_mut(&mut self, id: &ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| &e.id == id)
    }

    fn mint_id(&mut self) -> ElementId {
        let id = ElementId::from_counter(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add an element of the given kind with its default size and
    /// properties, placed at `at` and clamped into the page.
    pub fn add_element(
        &mut self,
        element_type: ElementType,
        at: Point,
        constraints: &Constraints<'_>,
    ) -> ElementId {
        let id = self.mint_id();
        let mut element = Element::new(id.clone(), element_type, at);
        constrain_element(&mut element, self.canvas_size(), constraints);
        self.elements.push(element);
        id
    }

    /// Update position and/or size of an element.
    ///
    /// Unknown ids are a no-op returning `Ok(false)`. Non-finite values are
    /// rejected without touching the element.
    pub fn update_geometry(
        &mut self,
        id: &ElementId,
        patch: GeometryPatch,
        constraints: &Constraints<'_>,
    ) -> EditResult<bool> {
        if !patch.is_finite() {
            return Err(EditError::invalid("geometry", "values must be finite numbers"));
        }
        let canvas = self.canvas_size();
        let Some(element) = self.get_mut(id) else {
            log::debug!("Ignoring geometry update for unknown element {id}");
            return Ok(false);
        };
        let mut updated = element.clone();
        if let Some(x) = patch.x {
            updated.x = x;
        }
        if let Some(y) = patch.y {
            updated.y = y;
        }
        if let Some(width) = patch.width {
            updated.width = width;
        }
        if let Some(height) = patch.height {
            updated.height = height;
        }
        constrain_element(&mut updated, canvas, constraints);
        let changed = updated != *element;
        *element = updated;
        Ok(changed)
    }

    /// Apply a typed property edit. All-or-nothing: a rejected edit leaves
    /// the element untouched.
    pub fn update_property(
        &mut self,
        id: &ElementId,
        edit: PropertyEdit,
        constraints: &Constraints<'_>,
    ) -> EditResult<bool> {
        let canvas = self.canvas_size();
        let Some(element) = self.get_mut(id) else {
            log::debug!("Ignoring property update for unknown element {id}");
            return Ok(false);
        };
        let mut updated = element.clone();
        updated.apply_edit(edit, &constraints.column_limits)?;
        check_fits(&updated, canvas)?;
        constrain_element(&mut updated, canvas, constraints);
        let changed = updated != *element;
        *element = updated;
        Ok(changed)
    }

    /// Whether any element other than `except` already uses `custom_id`.
    pub fn custom_id_in_use(&self, custom_id: &str, except: Option<&ElementId>) -> bool {
        self.elements
            .iter()
            .filter(|e| Some(&e.id) != except)
            .any(|e| e.custom_id.as_deref() == Some(custom_id))
    }

    /// Assign or clear the user-facing element id.
    ///
    /// The value is trimmed; an empty value clears it. A value already used
    /// by another element is rejected.
    pub fn set_custom_id(&mut self, id: &ElementId, custom_id: Option<&str>) -> EditResult<bool> {
        let value = custom_id
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string);
        if let Some(value) = &value {
            if value.chars().any(char::is_whitespace) {
                return Err(EditError::invalid("elementId", "ids cannot contain whitespace"));
            }
            if self.custom_id_in_use(value, Some(id)) {
                return Err(EditError::DuplicateCustomId(value.clone()));
            }
        }
        let Some(element) = self.get_mut(id) else {
            return Ok(false);
        };
        if element.custom_id == value {
            return Ok(false);
        }
        element.custom_id = value;
        Ok(true)
    }

    /// Remove the given elements. Returns how many were removed.
    pub fn delete_elements(&mut self, ids: &[ElementId]) -> usize {
        let doomed: HashSet<&ElementId> = ids.iter().collect();
        let before = self.elements.len();
        self.elements.retain(|e| !doomed.contains(&e.id));
        before - self.elements.len()
    }

    /// Copy the given elements (in paint order) with fresh ids, shifted by
    /// `offset`. Custom ids are not copied since they must stay unique.
    pub fn duplicate_elements(
        &mut self,
        ids: &[ElementId],
        offset: Vec2,
        constraints: &Constraints<'_>,
    ) -> Vec<ElementId> {
        let wanted: HashSet<&ElementId> = ids.iter().collect();
        let originals: Vec<Element> = self
            .elements
            .iter()
            .filter(|e| wanted.contains(&e.id))
            .cloned()
            .collect();
        let canvas = self.canvas_size();
        let mut created = Vec::with_capacity(originals.len());
        for original in originals {
            let mut copy = original;
            copy.id = self.mint_id();
            copy.custom_id = None;
            copy.x += offset.x;
            copy.y += offset.y;
            constrain_element(&mut copy, canvas, constraints);
            created.push(copy.id.clone());
            self.elements.push(copy);
        }
        created
    }

    /// Change an element's place in paint order.
    /// Returns false if the element is unknown or already in place.
    pub fn set_element_order(&mut self, id: &ElementId, order: ZOrder) -> bool {
        let Some(pos) = self.index_of(id) else {
            return false;
        };
        let last = self.elements.len() - 1;
        match order {
            ZOrder::Front if pos < last => {
                let element = self.elements.remove(pos);
                self.elements.push(element);
                true
            }
            ZOrder::Back if pos > 0 => {
                let element = self.elements.remove(pos);
                self.elements.insert(0, element);
                true
            }
            ZOrder::Forward if pos < last => {
                self.elements.swap(pos, pos + 1);
                true
            }
            ZOrder::Backward if pos > 0 => {
                self.elements.swap(pos, pos - 1);
                true
            }
            _ => false,
        }
    }

    /// Remove every element and restart id assignment.
    pub fn clear(&mut self) {
        self.elements.clear();
        self.next_id = first_id();
    }

    /// Switch paper size, pulling elements back inside the new page.
    pub fn set_page_size(&mut self, page_size: PageSize, constraints: &Constraints<'_>) -> EditResult<()> {
        page_size
            .validate()
            .map_err(|reason| EditError::invalid("pageSize", reason))?;
        let canvas = page_size.canvas_size();
        for element in &self.elements {
            check_fits(element, canvas)?;
        }
        self.page_size = page_size;
        for element in &mut self.elements {
            constrain_element(element, canvas, constraints);
        }
        Ok(())
    }

    /// Topmost element under a point.
    pub fn element_at(&self, point: Point, measurer: &dyn Measurer) -> Option<&Element> {
        self.elements
            .iter()
            .rev()
            .find(|e| bounds(e, measurer).contains(point))
    }

    /// Elements whose bounds strictly overlap `rect`, in paint order.
    pub fn elements_in_rect(&self, rect: Rect, measurer: &dyn Measurer) -> Vec<ElementId> {
        self.elements
            .iter()
            .filter(|e| rects_intersect(bounds(e, measurer), rect))
            .map(|e| e.id.clone())
            .collect()
    }

    /// Check structural invariants and repair the id counter.
    pub fn validate(&mut self) -> DocumentResult<()> {
        self.page_size.validate().map_err(DocumentError::Invalid)?;
        let mut ids = HashSet::new();
        let mut custom_ids = HashSet::new();
        for element in &self.elements {
            element.validate().map_err(DocumentError::Invalid)?;
            if !ids.insert(element.id.as_str()) {
                return Err(DocumentError::Invalid(format!(
                    "duplicate element id {}",
                    element.id
                )));
            }
            if let Some(custom_id) = &element.custom_id {
                if !custom_ids.insert(custom_id.as_str()) {
                    return Err(DocumentError::Invalid(format!(
                        "duplicate element id \"{custom_id}\""
                    )));
                }
            }
        }
        let highest = self.elements.iter().filter_map(|e| e.id.counter()).max();
        if let Some(highest) = highest {
            if self.next_id <= highest {
                log::warn!(
                    "Document id counter {} is behind element-{}; advancing",
                    self.next_id,
                    highest
                );
                self.next_id = highest + 1;
            }
        }
        self.next_id = self.next_id.max(first_id());
        Ok(())
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Decode and validate a document. Nothing is returned unless the whole
    /// document is well formed.
    pub fn from_json(json: &str) -> DocumentResult<Self> {
        let mut document: Document = serde_json::from_str(json)?;
        document.validate()?;
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::NoMeasurer;

    fn constraints() -> Constraints<'static> {
        Constraints::new(&NoMeasurer)
    }

    #[test]
    fn test_document_creation() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.next_id, 1);
        assert_eq!(doc.canvas_size(), Size::new(794.0, 1123.0));
    }

    #[test]
    fn test_page_sizes() {
        assert_eq!(PageSize::Letter.canvas_size(), Size::new(816.0, 1054.0));
        assert_eq!(PageSize::Legal.canvas_size(), Size::new(816.0, 1346.0));
        assert_eq!(PageSize::parse("LEGAL"), Some(PageSize::Legal));
        let custom = PageSize::Custom {
            width_mm: 100.0,
            height_mm: 0.0,
        };
        assert!(custom.validate().is_err());
    }

    #[test]
    fn test_add_element_assigns_sequential_ids() {
        let mut doc = Document::new();
        let a = doc.add_element(ElementType::TextField, Point::new(50.0, 50.0), &constraints());
        let b = doc.add_element(ElementType::Label, Point::new(0.0, 0.0), &constraints());
        assert_eq!(a.as_str(), "element-1");
        assert_eq!(b.as_str(), "element-2");
        assert_eq!(doc.next_id, 3);
        let field = doc.get(&a).unwrap();
        assert_eq!((field.x, field.y, field.width, field.height), (50.0, 50.0, 200.0, 25.0));
    }

    #[test]
    fn test_add_element_clamped_into_page() {
        let mut doc = Document::new();
        let id = doc.add_element(ElementType::Rectangle, Point::new(5000.0, -10.0), &constraints());
        let rect = doc.get(&id).unwrap();
        assert_eq!(rect.x, 794.0 - 150.0);
        assert_eq!(rect.y, 0.0);
    }

    #[test]
    fn test_update_geometry_enforces_minimum() {
        let mut doc = Document::new();
        let id = doc.add_element(ElementType::Rectangle, Point::new(10.0, 10.0), &constraints());
        let patch = GeometryPatch {
            width: Some(3.0),
            height: Some(-40.0),
            ..GeometryPatch::default()
        };
        assert!(doc.update_geometry(&id, patch, &constraints()).unwrap());
        let rect = doc.get(&id).unwrap();
        assert_eq!((rect.width, rect.height), (20.0, 20.0));
    }

    #[test]
    fn test_update_geometry_rejects_nan() {
        let mut doc = Document::new();
        let id = doc.add_element(ElementType::Rectangle, Point::new(10.0, 10.0), &constraints());
        let before = doc.clone();
        let patch = GeometryPatch {
            x: Some(f64::NAN),
            ..GeometryPatch::default()
        };
        assert!(doc.update_geometry(&id, patch, &constraints()).is_err());
        assert_eq!(doc, before);
    }

    #[test]
    fn test_stale_id_is_noop() {
        let mut doc = Document::new();
        let ghost = ElementId::from_counter(99);
        let patch = GeometryPatch::position(Point::new(1.0, 1.0));
        assert_eq!(doc.update_geometry(&ghost, patch, &constraints()), Ok(false));
        assert_eq!(
            doc.update_property(&ghost, PropertyEdit::Text("x".into()), &constraints()),
            Ok(false)
        );
        assert!(!doc.set_element_order(&ghost, ZOrder::Front));
    }

    #[test]
    fn test_line_keeps_thickness() {
        let mut doc = Document::new();
        let id = doc.add_element(ElementType::VLine, Point::new(10.0, 10.0), &constraints());
        let patch = GeometryPatch {
            width: Some(80.0),
            height: Some(5.0),
            ..GeometryPatch::default()
        };
        doc.update_geometry(&id, patch, &constraints()).unwrap();
        let line = doc.get(&id).unwrap();
        assert_eq!((line.width, line.height), (2.0, 20.0));
    }

    #[test]
    fn test_failed_property_edit_leaves_element_untouched() {
        let mut doc = Document::new();
        let id = doc.add_element(ElementType::Table, Point::new(10.0, 10.0), &constraints());
        let before = doc.clone();
        let edit = PropertyEdit::ColumnWidth {
            index: 0,
            percent: 2.0,
        };
        let err = doc.update_property(&id, edit, &constraints()).unwrap_err();
        assert!(matches!(err, EditError::ColumnWidthOutOfRange { .. }));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_custom_id_uniqueness() {
        let mut doc = Document::new();
        let a = doc.add_element(ElementType::TextField, Point::ZERO, &constraints());
        let b = doc.add_element(ElementType::TextField, Point::ZERO, &constraints());
        assert_eq!(doc.set_custom_id(&a, Some("  email ")), Ok(true));
        assert_eq!(doc.get(&a).unwrap().custom_id.as_deref(), Some("email"));
        // Re-assigning the same value to the same element is fine.
        assert_eq!(doc.set_custom_id(&a, Some("email")), Ok(false));
        assert_eq!(
            doc.set_custom_id(&b, Some("email")),
            Err(EditError::DuplicateCustomId("email".to_string()))
        );
        // Internal ids are not part of the check.
        assert_eq!(doc.set_custom_id(&b, Some("element-1")), Ok(true));
        assert_eq!(doc.set_custom_id(&a, Some("")), Ok(true));
        assert_eq!(doc.get(&a).unwrap().custom_id, None);
    }

    #[test]
    fn test_delete_preserves_relative_order() {
        let mut doc = Document::new();
        let ids: Vec<ElementId> = (0..5)
            .map(|i| doc.add_element(ElementType::Label, Point::new(i as f64 * 10.0, 0.0), &constraints()))
            .collect();
        let removed = doc.delete_elements(&[ids[0].clone(), ids[2].clone(), ids[4].clone()]);
        assert_eq!(removed, 3);
        assert_eq!(doc.ids(), vec![ids[1].clone(), ids[3].clone()]);
    }

    #[test]
    fn test_duplicate_offsets_and_renames() {
        let mut doc = Document::new();
        let a = doc.add_element(ElementType::TextField, Point::new(50.0, 60.0), &constraints());
        doc.set_custom_id(&a, Some("name")).unwrap();
        let copies = doc.duplicate_elements(&[a.clone()], Vec2::new(20.0, 20.0), &constraints());
        assert_eq!(copies.len(), 1);
        let copy = doc.get(&copies[0]).unwrap();
        assert_eq!(copy.id.as_str(), "element-2");
        assert_eq!((copy.x, copy.y), (70.0, 80.0));
        assert_eq!(copy.custom_id, None);
        assert_eq!(copy.kind, doc.get(&a).unwrap().kind);
    }

    #[test]
    fn test_z_order() {
        let mut doc = Document::new();
        let a = doc.add_element(ElementType::Rectangle, Point::ZERO, &constraints());
        let b = doc.add_element(ElementType::Rectangle, Point::ZERO, &constraints());
        let c = doc.add_element(ElementType::Rectangle, Point::ZERO, &constraints());

        assert!(doc.set_element_order(&a, ZOrder::Front));
        assert_eq!(doc.ids(), vec![b.clone(), c.clone(), a.clone()]);
        assert!(!doc.set_element_order(&a, ZOrder::Front));

        assert!(doc.set_element_order(&a, ZOrder::Back));
        assert_eq!(doc.ids(), vec![a.clone(), b.clone(), c.clone()]);

        assert!(doc.set_element_order(&a, ZOrder::Forward));
        assert_eq!(doc.ids(), vec![b.clone(), a.clone(), c.clone()]);
        assert!(doc.set_element_order(&a, ZOrder::Backward));
        assert_eq!(doc.ids(), vec![a, b, c]);
    }

    #[test]
    fn test_clear_resets_counter() {
        let mut doc = Document::new();
        doc.add_element(ElementType::Label, Point::ZERO, &constraints());
        doc.clear();
        assert!(doc.is_empty());
        assert_eq!(doc.next_id, 1);
    }

    #[test]
    fn test_elements_in_rect() {
        let mut doc = Document::new();
        let a = doc.add_element(ElementType::Rectangle, Point::new(0.0, 0.0), &constraints());
        let b = doc.add_element(ElementType::Rectangle, Point::new(60.0, 0.0), &constraints());
        let _c = doc.add_element(ElementType::Rectangle, Point::new(400.0, 400.0), &constraints());
        let hits = doc.elements_in_rect(Rect::new(0.0, 0.0, 120.0, 60.0), &NoMeasurer);
        assert_eq!(hits, vec![a.clone(), b.clone()]);
        assert_eq!(doc.element_at(Point::new(100.0, 10.0), &NoMeasurer).map(|e| &e.id), Some(&b));
        assert_eq!(doc.element_at(Point::new(10.0, 10.0), &NoMeasurer).map(|e| &e.id), Some(&a));
    }

    #[test]
    fn test_table_rows_must_fit_page() {
        let mut doc = Document::new();
        let id = doc.add_element(ElementType::Table, Point::new(0.0, 0.0), &constraints());
        let before = doc.get(&id).unwrap().clone();
        let result = doc.update_property(&id, PropertyEdit::Rows(30), &constraints());
        assert!(matches!(result, Err(EditError::TableTooTall { .. })));
        assert_eq!(doc.get(&id), Some(&before));

        assert!(matches!(
            doc.update_property(&id, PropertyEdit::RowHeight(600.0), &constraints()),
            Err(EditError::TableTooTall { .. })
        ));

        assert_eq!(doc.update_property(&id, PropertyEdit::Rows(18), &constraints()), Ok(true));
        let table = doc.get(&id).unwrap();
        assert_eq!(table.height, 1080.0);
        assert_eq!(table.y, 0.0);
    }

    #[test]
    fn test_page_size_rejected_when_table_would_not_fit() {
        let mut doc = Document::new();
        let id = doc.add_element(ElementType::Table, Point::new(0.0, 0.0), &constraints());
        doc.update_property(&id, PropertyEdit::Rows(18), &constraints()).unwrap();
        let result = doc.set_page_size(PageSize::Letter, &constraints());
        assert!(matches!(result, Err(EditError::TableTooTall { .. })));
        assert_eq!(doc.page_size, PageSize::A4);
        assert_eq!(doc.get(&id).unwrap().height, 1080.0);
    }

    #[test]
    fn test_constrain_drops_rows_that_overflow() {
        let mut doc = Document::new();
        let id = doc.add_element(ElementType::Table, Point::new(0.0, 0.0), &constraints());
        let element = doc.get_mut(&id).unwrap();
        if let ElementKind::Table(table) = &mut element.kind {
            table.rows = 30;
        }
        constrain_element(element, PageSize::A4.canvas_size(), &constraints());
        let ElementKind::Table(table) = &element.kind else {
            panic!("not a table");
        };
        assert_eq!(table.rows, 18);
        assert_eq!(element.height, table.derived_height());
    }

    #[test]
    fn test_json_round_trip() {
        let mut doc = Document::new();
        doc.add_element(ElementType::Table, Point::new(30.0, 40.0), &constraints());
        doc.add_element(ElementType::Checkbox, Point::new(10.0, 300.0), &constraints());
        doc.page_size = PageSize::Custom {
            width_mm: 150.0,
            height_mm: 200.0,
        };
        let json = doc.to_json().unwrap();
        let loaded = Document::from_json(&json).unwrap();
        assert_eq!(loaded, doc);
    }

    #[test]
    fn test_from_json_repairs_counter() {
        let json = r#"{"elements":[{"id":"element-7","type":"label","x":0,"y":0,"width":120,"height":24}],"nextId":2}"#;
        let doc = Document::from_json(json).unwrap();
        assert_eq!(doc.next_id, 8);
        assert_eq!(doc.page_size, PageSize::A4);
    }

    #[test]
    fn test_from_json_rejects_invalid() {
        assert!(Document::from_json("{}").is_err());
        assert!(Document::from_json("not json").is_err());
        let duplicate = r#"{"elements":[
            {"id":"element-1","type":"label","x":0,"y":0,"width":120,"height":24},
            {"id":"element-1","type":"label","x":0,"y":0,"width":120,"height":24}]}"#;
        assert!(matches!(
            Document::from_json(duplicate),
            Err(DocumentError::Invalid(_))
        ));
        let bad_table = r#"{"elements":[{"id":"element-1","type":"table","x":0,"y":0,"width":300,"height":120,
            "properties":{"columns":2,"columnWidths":[10,10],"headers":["a","b"]}}]}"#;
        assert!(Document::from_json(bad_table).is_err());
    }
}
