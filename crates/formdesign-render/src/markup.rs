//! Per-kind styling and content shared by the canvas renderer and the
//! static exporter.

use crate::node::VisualNode;
use formdesign_core::elements::{
    CheckboxProps, LabelPosition, LineProps, SignatureProps, TableProps, TextStyle,
};
use formdesign_core::{Element, ElementKind};

/// Content placed inside every empty data cell.
const EMPTY_CELL: &str = "\u{a0}";

/// Format a number for CSS, dropping a trailing `.0`.
pub fn css_num(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

pub fn px(value: f64) -> String {
    format!("{}px", css_num(value))
}

/// Class naming an element's kind, e.g. `text-field-element`.
pub fn kind_class(element: &Element) -> String {
    format!("{}-element", element.element_type().as_str())
}

/// Which surface the markup is produced for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// The interactive design canvas.
    Canvas,
    /// Standalone exported markup.
    Export,
}

/// Inputs the content subtree of an element depends on. Two elements with
/// equal keys produce identical content.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentKey {
    Empty,
    Text(String),
    TextField { text: String, placeholder: String },
    Table(TableProps),
    Checkbox(CheckboxProps),
}

pub fn content_key(element: &Element) -> ContentKey {
    match &element.kind {
        ElementKind::TextField(props) => ContentKey::TextField {
            text: props.text.text.clone(),
            placeholder: props.placeholder.clone(),
        },
        ElementKind::Label(props) => ContentKey::Text(props.text.text.clone()),
        ElementKind::Signature(props) => ContentKey::Text(props.text.text.clone()),
        ElementKind::Table(table) => ContentKey::Table(table.clone()),
        ElementKind::Checkbox(props) => ContentKey::Checkbox(props.clone()),
        ElementKind::Rectangle(_) | ElementKind::VLine(_) | ElementKind::HLine(_) => {
            ContentKey::Empty
        }
    }
}

/// Absolute placement on the page.
pub fn position_styles(element: &Element, surface: Surface) -> Vec<(String, String)> {
    let mut styles = vec![
        ("position".to_string(), "absolute".to_string()),
        ("left".to_string(), px(element.x)),
        ("top".to_string(), px(element.y)),
    ];
    match &element.kind {
        // Tables take their height from their rows.
        ElementKind::Table(_) => styles.push(("width".to_string(), px(element.width))),
        ElementKind::VLine(line) => {
            styles.push(("width".to_string(), px(line.thickness)));
            styles.push(("height".to_string(), px(element.height)));
        }
        ElementKind::HLine(line) => {
            styles.push(("width".to_string(), px(element.width)));
            styles.push(("height".to_string(), px(line.thickness)));
        }
        // On the canvas a checkbox sizes itself to its content.
        ElementKind::Checkbox(_) if surface == Surface::Canvas => {}
        _ => {
            styles.push(("width".to_string(), px(element.width)));
            styles.push(("height".to_string(), px(element.height)));
        }
    }
    styles
}

/// Cosmetic styles of the element's outer box.
pub fn kind_styles(element: &Element) -> Vec<(String, String)> {
    let mut styles = Vec::new();
    let mut push = |k: &str, v: String| styles.push((k.to_string(), v));
    match &element.kind {
        ElementKind::TextField(props) => {
            text_styles(&props.text, element.height, &mut push);
            if !props.box_style.background_color.is_transparent() {
                push("background-color", props.box_style.background_color.to_css());
            }
        }
        ElementKind::Label(props) => {
            text_styles(&props.text, element.height, &mut push);
            if !props.box_style.background_color.is_transparent() {
                push("background-color", props.box_style.background_color.to_css());
            }
        }
        ElementKind::Rectangle(props) => {
            push("background", props.box_style.background_color.to_css());
            push(
                "border",
                format!(
                    "{} solid {}",
                    px(props.box_style.border_width),
                    props.box_style.border_color.to_css()
                ),
            );
        }
        ElementKind::VLine(line) => line_styles(line, "border-left", &mut push),
        ElementKind::HLine(line) => line_styles(line, "border-top", &mut push),
        ElementKind::Table(table) => {
            let border = if table.show_borders {
                divider(table)
            } else {
                "none".to_string()
            };
            push("border", border);
        }
        ElementKind::Checkbox(props) => {
            push("overflow", "hidden".to_string());
            push("white-space", "nowrap".to_string());
            push("font-size", format!("{}pt", css_num(props.text.font_size)));
            push("color", props.text.color.to_css());
        }
        ElementKind::Signature(props) => signature_styles(props, element.height, &mut push),
    }
    styles
}

fn text_styles(text: &TextStyle, height: f64, push: &mut impl FnMut(&str, String)) {
    push("font-size", format!("{}pt", css_num(text.font_size)));
    push("color", text.color.to_css());
    push("text-align", text.text_align.as_css().to_string());
    push("font-weight", text.font_weight.as_css().to_string());
    push("padding", "4px 8px".to_string());
    push("line-height", px((height - 8.0).max(12.0)));
    push("overflow", "hidden".to_string());
}

fn line_styles(line: &LineProps, side: &str, push: &mut impl FnMut(&str, String)) {
    push("background", "transparent".to_string());
    push(
        side,
        format!("{} solid {}", px(line.thickness), line.color.to_css()),
    );
}

fn signature_styles(props: &SignatureProps, height: f64, push: &mut impl FnMut(&str, String)) {
    push(
        "border",
        format!("1px dashed {}", props.box_style.border_color.to_css()),
    );
    if !props.box_style.background_color.is_transparent() {
        push("background-color", props.box_style.background_color.to_css());
    }
    push("color", props.text.color.to_css());
    push("font-size", format!("{}pt", css_num(props.text.font_size)));
    push("font-weight", props.text.font_weight.as_css().to_string());
    push("text-align", "center".to_string());
    push("padding-top", px(SignatureProps::caption_padding(height)));
    push("font-style", "italic".to_string());
}

/// The element's content subtree.
pub fn element_content(element: &Element, surface: Surface) -> Vec<VisualNode> {
    match &element.kind {
        ElementKind::TextField(props) => {
            if props.text.text.is_empty() && surface == Surface::Canvas {
                vec![
                    VisualNode::new("span")
                        .with_class("placeholder")
                        .with_text(props.placeholder.clone()),
                ]
            } else {
                text_node(&props.text.text)
            }
        }
        ElementKind::Label(props) => text_node(&props.text.text),
        ElementKind::Signature(props) => text_node(&props.text.text),
        ElementKind::Table(table) => table_content(table),
        ElementKind::Checkbox(props) => checkbox_content(props, surface),
        ElementKind::Rectangle(_) | ElementKind::VLine(_) | ElementKind::HLine(_) => Vec::new(),
    }
}

fn text_node(text: &str) -> Vec<VisualNode> {
    if text.is_empty() {
        Vec::new()
    } else {
        vec![VisualNode::new("span").with_class("element-text").with_text(text)]
    }
}

fn clear_div() -> VisualNode {
    VisualNode::div().with_style("clear", "both")
}

fn divider(table: &TableProps) -> String {
    format!("1px solid {}", table.border_color.to_css())
}

fn table_cell(table: &TableProps, column: usize, text: &str) -> VisualNode {
    let width = table.column_widths.get(column).copied().unwrap_or(0.0);
    let border = if !table.show_borders || column + 1 == table.columns {
        "none".to_string()
    } else {
        divider(table)
    };
    VisualNode::div()
        .with_class("table-cell")
        .with_style("width", format!("{}%", css_num(width)))
        .with_style("font-size", format!("{}pt", css_num(table.font_size)))
        .with_style("float", "left")
        .with_style("box-sizing", "border-box")
        .with_style("border-right", border)
        .with_text(text)
}

fn table_row(table: &TableProps, header: bool, last: bool) -> VisualNode {
    let mut row = VisualNode::div()
        .with_class("table-row")
        .with_style("height", px(table.row_height));
    if header {
        row = row.with_class("table-header");
    }
    let border = if !table.show_borders || last {
        "none".to_string()
    } else {
        divider(table)
    };
    row.with_style("border-bottom", border)
}

fn table_content(table: &TableProps) -> Vec<VisualNode> {
    let mut rows = Vec::with_capacity(table.rows);
    let body_rows = table.body_rows();

    if table.show_header {
        let mut header = table_row(table, true, body_rows == 0).with_style("font-weight", "bold");
        for column in 0..table.columns {
            let text = table.headers.get(column).map(String::as_str).unwrap_or("");
            header.children.push(table_cell(table, column, text));
        }
        header.children.push(clear_div());
        rows.push(header);
    }

    for i in 0..body_rows {
        let mut row = table_row(table, false, i + 1 == body_rows);
        for column in 0..table.columns {
            row.children.push(table_cell(table, column, EMPTY_CELL));
        }
        row.children.push(clear_div());
        rows.push(row);
    }
    rows
}

fn checkbox_content(props: &CheckboxProps, surface: Surface) -> Vec<VisualNode> {
    let mut control = VisualNode::new("input").with_attr("type", "checkbox");
    if props.checked {
        control = control.with_attr("checked", "checked");
    }
    if surface == Surface::Canvas {
        control = control.with_attr("disabled", "disabled");
    }
    control = control
        .with_style("float", "left")
        .with_style("margin-top", "2px")
        .with_style("width", px(CheckboxProps::CONTROL_SIZE))
        .with_style("height", px(CheckboxProps::CONTROL_SIZE));

    let caption = VisualNode::new("span")
        .with_class("checkbox-label")
        .with_style("display", "inline-block")
        .with_style("float", "left")
        .with_style("font-size", format!("{}pt", css_num(props.text.font_size)))
        .with_style("color", props.text.color.to_css())
        .with_text(props.text.text.clone());

    let gap = px(props.gap);
    match props.label_position {
        LabelPosition::Right => vec![
            control.with_style("margin-right", gap),
            caption,
            clear_div(),
        ],
        LabelPosition::Left => vec![
            caption.with_style("margin-right", gap),
            control,
            clear_div(),
        ],
    }
}
