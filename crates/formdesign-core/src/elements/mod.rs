//! Form elements and their per-kind properties.

mod checkbox;
mod line;
mod rectangle;
mod signature;
mod style;
mod table;
mod text;

pub use checkbox::CheckboxProps;
pub use line::LineProps;
pub use rectangle::RectangleProps;
pub use signature::SignatureProps;
pub use style::{BoxStyle, FontWeight, LabelPosition, SerializableColor, TextAlign, TextStyle};
pub use table::{
    ColumnLimits, MAX_ROWS, TableProps, WIDTH_TOLERANCE, equal_widths, headers_from_csv,
    normalize_widths,
};
pub use text::{LabelProps, TextFieldProps};

use crate::error::{EditError, EditResult};
use kurbo::{Point, Rect, Size};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Internal element identifier, `element-<n>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    const PREFIX: &'static str = "element-";

    /// Identifier for the given counter value.
    pub fn from_counter(counter: u64) -> Self {
        Self(format!("{}{}", Self::PREFIX, counter))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The counter this id was minted from, if it follows the usual format.
    pub fn counter(&self) -> Option<u64> {
        self.0.strip_prefix(Self::PREFIX)?.parse().ok()
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// The closed set of element kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementType {
    #[serde(rename = "text-field")]
    TextField,
    #[serde(rename = "label")]
    Label,
    #[serde(rename = "rectangle")]
    Rectangle,
    #[serde(rename = "vline")]
    VLine,
    #[serde(rename = "hline")]
    HLine,
    #[serde(rename = "table")]
    Table,
    #[serde(rename = "checkbox")]
    Checkbox,
    #[serde(rename = "signature")]
    Signature,
}

impl ElementType {
    pub const ALL: [ElementType; 8] = [
        ElementType::TextField,
        ElementType::Label,
        ElementType::Rectangle,
        ElementType::VLine,
        ElementType::HLine,
        ElementType::Table,
        ElementType::Checkbox,
        ElementType::Signature,
    ];

    /// Name used in serialized documents and CSS class names.
    pub fn as_str(self) -> &'static str {
        match self {
            ElementType::TextField => "text-field",
            ElementType::Label => "label",
            ElementType::Rectangle => "rectangle",
            ElementType::VLine => "vline",
            ElementType::HLine => "hline",
            ElementType::Table => "table",
            ElementType::Checkbox => "checkbox",
            ElementType::Signature => "signature",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }

    /// Size given to a freshly added element.
    pub fn default_size(self) -> Size {
        match self {
            ElementType::TextField => Size::new(200.0, 25.0),
            ElementType::Label => Size::new(120.0, 24.0),
            ElementType::Rectangle => Size::new(150.0, 100.0),
            ElementType::VLine => Size::new(2.0, 100.0),
            ElementType::HLine => Size::new(200.0, 2.0),
            ElementType::Table => Size::new(300.0, 120.0),
            ElementType::Checkbox => Size::new(150.0, 24.0),
            ElementType::Signature => Size::new(200.0, 80.0),
        }
    }

    /// Kinds whose stored size is advisory and whose real extent comes from
    /// measurement.
    pub fn is_auto_sized(self) -> bool {
        matches!(self, ElementType::Checkbox)
    }

    pub fn default_kind(self) -> ElementKind {
        match self {
            ElementType::TextField => ElementKind::TextField(TextFieldProps::default()),
            ElementType::Label => ElementKind::Label(LabelProps::default()),
            ElementType::Rectangle => ElementKind::Rectangle(RectangleProps::default()),
            ElementType::VLine => ElementKind::VLine(LineProps::default()),
            ElementType::HLine => ElementKind::HLine(LineProps::default()),
            ElementType::Table => ElementKind::Table(TableProps::default()),
            ElementType::Checkbox => ElementKind::Checkbox(CheckboxProps::default()),
            ElementType::Signature => ElementKind::Signature(SignatureProps::default()),
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind-specific properties of an element.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    TextField(TextFieldProps),
    Label(LabelProps),
    Rectangle(RectangleProps),
    VLine(LineProps),
    HLine(LineProps),
    Table(TableProps),
    Checkbox(CheckboxProps),
    Signature(SignatureProps),
}

impl ElementKind {
    pub fn element_type(&self) -> ElementType {
        match self {
            ElementKind::TextField(_) => ElementType::TextField,
            ElementKind::Label(_) => ElementType::Label,
            ElementKind::Rectangle(_) => ElementType::Rectangle,
            ElementKind::VLine(_) => ElementType::VLine,
            ElementKind::HLine(_) => ElementType::HLine,
            ElementKind::Table(_) => ElementType::Table,
            ElementKind::Checkbox(_) => ElementType::Checkbox,
            ElementKind::Signature(_) => ElementType::Signature,
        }
    }

    pub fn text_style(&self) -> Option<&TextStyle> {
        match self {
            ElementKind::TextField(p) => Some(&p.text),
            ElementKind::Label(p) => Some(&p.text),
            ElementKind::Checkbox(p) => Some(&p.text),
            ElementKind::Signature(p) => Some(&p.text),
            ElementKind::Rectangle(_)
            | ElementKind::VLine(_)
            | ElementKind::HLine(_)
            | ElementKind::Table(_) => None,
        }
    }

    pub fn text_style_mut(&mut self) -> Option<&mut TextStyle> {
        match self {
            ElementKind::TextField(p) => Some(&mut p.text),
            ElementKind::Label(p) => Some(&mut p.text),
            ElementKind::Checkbox(p) => Some(&mut p.text),
            ElementKind::Signature(p) => Some(&mut p.text),
            ElementKind::Rectangle(_)
            | ElementKind::VLine(_)
            | ElementKind::HLine(_)
            | ElementKind::Table(_) => None,
        }
    }

    pub fn box_style(&self) -> Option<&BoxStyle> {
        match self {
            ElementKind::TextField(p) => Some(&p.box_style),
            ElementKind::Label(p) => Some(&p.box_style),
            ElementKind::Rectangle(p) => Some(&p.box_style),
            ElementKind::Signature(p) => Some(&p.box_style),
            ElementKind::VLine(_)
            | ElementKind::HLine(_)
            | ElementKind::Table(_)
            | ElementKind::Checkbox(_) => None,
        }
    }

    pub fn box_style_mut(&mut self) -> Option<&mut BoxStyle> {
        match self {
            ElementKind::TextField(p) => Some(&mut p.box_style),
            ElementKind::Label(p) => Some(&mut p.box_style),
            ElementKind::Rectangle(p) => Some(&mut p.box_style),
            ElementKind::Signature(p) => Some(&mut p.box_style),
            ElementKind::VLine(_)
            | ElementKind::HLine(_)
            | ElementKind::Table(_)
            | ElementKind::Checkbox(_) => None,
        }
    }

    pub fn as_table(&self) -> Option<&TableProps> {
        match self {
            ElementKind::Table(t) => Some(t),
            _ => None,
        }
    }

    fn serialize_properties<S: SerializeStruct>(&self, state: &mut S) -> Result<(), S::Error> {
        match self {
            ElementKind::TextField(p) => state.serialize_field("properties", p),
            ElementKind::Label(p) => state.serialize_field("properties", p),
            ElementKind::Rectangle(p) => state.serialize_field("properties", p),
            ElementKind::VLine(p) | ElementKind::HLine(p) => state.serialize_field("properties", p),
            ElementKind::Table(p) => state.serialize_field("properties", p),
            ElementKind::Checkbox(p) => state.serialize_field("properties", p),
            ElementKind::Signature(p) => state.serialize_field("properties", p),
        }
    }

    fn from_properties(
        element_type: ElementType,
        properties: serde_json::Value,
    ) -> Result<Self, serde_json::Error> {
        use serde_json::from_value;
        Ok(match element_type {
            ElementType::TextField => ElementKind::TextField(from_value(properties)?),
            ElementType::Label => ElementKind::Label(from_value(properties)?),
            ElementType::Rectangle => ElementKind::Rectangle(from_value(properties)?),
            ElementType::VLine => ElementKind::VLine(from_value(properties)?),
            ElementType::HLine => ElementKind::HLine(from_value(properties)?),
            ElementType::Table => ElementKind::Table(from_value(properties)?),
            ElementType::Checkbox => ElementKind::Checkbox(from_value(properties)?),
            ElementType::Signature => ElementKind::Signature(from_value(properties)?),
        })
    }
}

/// A single typed edit to an element's properties.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyEdit {
    Text(String),
    Placeholder(String),
    FontSize(f64),
    Color(SerializableColor),
    TextAlign(TextAlign),
    FontWeight(FontWeight),
    BackgroundColor(SerializableColor),
    BorderColor(SerializableColor),
    BorderWidth(f64),
    Thickness(f64),
    TableLabel(String),
    Rows(usize),
    Columns(usize),
    Header { index: usize, text: String },
    Headers(Vec<String>),
    ColumnWidth { index: usize, percent: f64 },
    RowHeight(f64),
    ShowHeader(bool),
    ShowBorders(bool),
    Checked(bool),
    LabelPosition(LabelPosition),
    Gap(f64),
}

impl PropertyEdit {
    /// Property name as it appears in serialized documents.
    pub fn name(&self) -> &'static str {
        match self {
            PropertyEdit::Text(_) => "text",
            PropertyEdit::Placeholder(_) => "placeholder",
            PropertyEdit::FontSize(_) => "fontSize",
            PropertyEdit::Color(_) => "color",
            PropertyEdit::TextAlign(_) => "textAlign",
            PropertyEdit::FontWeight(_) => "fontWeight",
            PropertyEdit::BackgroundColor(_) => "backgroundColor",
            PropertyEdit::BorderColor(_) => "borderColor",
            PropertyEdit::BorderWidth(_) => "borderWidth",
            PropertyEdit::Thickness(_) => "thickness",
            PropertyEdit::TableLabel(_) => "label",
            PropertyEdit::Rows(_) => "rows",
            PropertyEdit::Columns(_) => "columns",
            PropertyEdit::Header { .. } | PropertyEdit::Headers(_) => "headers",
            PropertyEdit::ColumnWidth { .. } => "columnWidths",
            PropertyEdit::RowHeight(_) => "rowHeight",
            PropertyEdit::ShowHeader(_) => "showHeader",
            PropertyEdit::ShowBorders(_) => "showBorders",
            PropertyEdit::Checked(_) => "checked",
            PropertyEdit::LabelPosition(_) => "labelPosition",
            PropertyEdit::Gap(_) => "gap",
        }
    }
}

fn positive(property: &'static str, value: f64) -> EditResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(EditError::invalid(property, format!("{value} is not a positive number")))
    }
}

fn non_negative(property: &'static str, value: f64) -> EditResult<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(EditError::invalid(property, format!("{value} is negative")))
    }
}

/// One placeable design unit on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub id: ElementId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// User supplied id used in exported markup instead of `id`.
    pub custom_id: Option<String>,
    pub kind: ElementKind,
}

impl Element {
    /// Create an element of the given type with its default size and
    /// properties.
    pub fn new(id: ElementId, element_type: ElementType, origin: Point) -> Self {
        let size = element_type.default_size();
        Self {
            id,
            x: origin.x,
            y: origin.y,
            width: size.width,
            height: size.height,
            custom_id: None,
            kind: element_type.default_kind(),
        }
    }

    pub fn element_type(&self) -> ElementType {
        self.kind.element_type()
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Stored geometry. See [`crate::geometry::bounds`] for the resolved
    /// extent of auto-sized kinds.
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.origin(), self.size())
    }

    /// Id written into exported markup.
    pub fn markup_id(&self) -> &str {
        self.custom_id.as_deref().unwrap_or(self.id.as_str())
    }

    pub fn is_auto_sized(&self) -> bool {
        self.element_type().is_auto_sized()
    }

    /// Apply a property edit in place.
    ///
    /// Callers that need all-or-nothing behavior apply the edit to a clone
    /// and commit it on success.
    pub fn apply_edit(&mut self, edit: PropertyEdit, limits: &ColumnLimits) -> EditResult<()> {
        let kind = self.element_type().as_str();
        let property = edit.name();
        let not_applicable = || EditError::PropertyNotApplicable { property, kind };

        match edit {
            PropertyEdit::Text(text) => {
                self.kind.text_style_mut().ok_or_else(not_applicable)?.text = text;
            }
            PropertyEdit::Placeholder(placeholder) => match &mut self.kind {
                ElementKind::TextField(p) => p.placeholder = placeholder,
                _ => return Err(not_applicable()),
            },
            PropertyEdit::FontSize(size) => {
                let size = positive(property, size)?;
                match &mut self.kind {
                    ElementKind::Table(t) => t.font_size = size,
                    other => other.text_style_mut().ok_or_else(not_applicable)?.font_size = size,
                }
            }
            PropertyEdit::Color(color) => match &mut self.kind {
                ElementKind::VLine(l) | ElementKind::HLine(l) => l.color = color,
                other => other.text_style_mut().ok_or_else(not_applicable)?.color = color,
            },
            PropertyEdit::TextAlign(align) => {
                self.kind.text_style_mut().ok_or_else(not_applicable)?.text_align = align;
            }
            PropertyEdit::FontWeight(weight) => {
                self.kind.text_style_mut().ok_or_else(not_applicable)?.font_weight = weight;
            }
            PropertyEdit::BackgroundColor(color) => {
                self.kind.box_style_mut().ok_or_else(not_applicable)?.background_color = color;
            }
            PropertyEdit::BorderColor(color) => match &mut self.kind {
                ElementKind::Table(t) => t.border_color = color,
                other => other.box_style_mut().ok_or_else(not_applicable)?.border_color = color,
            },
            PropertyEdit::BorderWidth(width) => {
                let width = non_negative(property, width)?;
                self.kind.box_style_mut().ok_or_else(not_applicable)?.border_width = width;
            }
            PropertyEdit::Thickness(thickness) => {
                let thickness = positive(property, thickness)?;
                match &mut self.kind {
                    ElementKind::VLine(l) => {
                        l.thickness = thickness;
                        self.width = thickness;
                    }
                    ElementKind::HLine(l) => {
                        l.thickness = thickness;
                        self.height = thickness;
                    }
                    _ => return Err(not_applicable()),
                }
            }
            PropertyEdit::TableLabel(label) => self.table_mut(not_applicable)?.label = label,
            PropertyEdit::Rows(rows) => {
                let table = self.table_mut(not_applicable)?;
                table.set_rows(rows)?;
                self.height = table.derived_height();
            }
            PropertyEdit::Columns(columns) => self.table_mut(not_applicable)?.set_columns(columns, limits)?,
            PropertyEdit::Header { index, text } => self.table_mut(not_applicable)?.set_header(index, text)?,
            PropertyEdit::Headers(headers) => self.table_mut(not_applicable)?.set_headers(headers),
            PropertyEdit::ColumnWidth { index, percent } => {
                self.table_mut(not_applicable)?
                    .set_column_width(index, percent, limits)?;
            }
            PropertyEdit::RowHeight(height) => {
                let height = positive(property, height)?;
                let table = self.table_mut(not_applicable)?;
                table.row_height = height;
                self.height = table.derived_height();
            }
            PropertyEdit::ShowHeader(show) => self.table_mut(not_applicable)?.show_header = show,
            PropertyEdit::ShowBorders(show) => self.table_mut(not_applicable)?.show_borders = show,
            PropertyEdit::Checked(checked) => self.checkbox_mut(not_applicable)?.checked = checked,
            PropertyEdit::LabelPosition(position) => {
                self.checkbox_mut(not_applicable)?.label_position = position;
            }
            PropertyEdit::Gap(gap) => {
                let gap = non_negative(property, gap)?;
                self.checkbox_mut(not_applicable)?.gap = gap;
            }
        }
        Ok(())
    }

    fn table_mut(&mut self, not_applicable: impl FnOnce() -> EditError) -> EditResult<&mut TableProps> {
        match &mut self.kind {
            ElementKind::Table(t) => Ok(t),
            _ => Err(not_applicable()),
        }
    }

    fn checkbox_mut(
        &mut self,
        not_applicable: impl FnOnce() -> EditError,
    ) -> EditResult<&mut CheckboxProps> {
        match &mut self.kind {
            ElementKind::Checkbox(c) => Ok(c),
            _ => Err(not_applicable()),
        }
    }

    /// Structural checks applied when a document is loaded.
    pub fn validate(&self) -> Result<(), String> {
        let geometry = [self.x, self.y, self.width, self.height];
        if geometry.iter().any(|v| !v.is_finite()) {
            return Err(format!("{} has non-finite geometry", self.id));
        }
        if self.width < 0.0 || self.height < 0.0 {
            return Err(format!("{} has a negative size", self.id));
        }
        if let ElementKind::Table(table) = &self.kind {
            table.validate().map_err(|e| format!("{}: {e}", self.id))?;
        }
        Ok(())
    }
}

impl Serialize for Element {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields = if self.custom_id.is_some() { 8 } else { 7 };
        let mut state = serializer.serialize_struct("Element", fields)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("type", &self.element_type())?;
        state.serialize_field("x", &self.x)?;
        state.serialize_field("y", &self.y)?;
        state.serialize_field("width", &self.width)?;
        state.serialize_field("height", &self.height)?;
        if let Some(custom_id) = &self.custom_id {
            state.serialize_field("elementId", custom_id)?;
        }
        self.kind.serialize_properties(&mut state)?;
        state.end()
    }
}

/// Wire form of an element; properties are decoded once the type is known.
#[derive(Deserialize)]
struct ElementRecord {
    id: ElementId,
    #[serde(rename = "type")]
    element_type: ElementType,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    #[serde(default, rename = "elementId")]
    custom_id: Option<String>,
    #[serde(default)]
    properties: serde_json::Value,
}

impl<'de> Deserialize<'de> for Element {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let record = ElementRecord::deserialize(deserializer)?;
        let properties = match record.properties {
            serde_json::Value::Null => serde_json::Value::Object(Default::default()),
            other => other,
        };
        let kind = ElementKind::from_properties(record.element_type, properties)
            .map_err(serde::de::Error::custom)?;
        Ok(Element {
            id: record.id,
            x: record.x,
            y: record.y,
            width: record.width,
            height: record.height,
            custom_id: record.custom_id.filter(|id| !id.trim().is_empty()),
            kind,
        })
    }
}
