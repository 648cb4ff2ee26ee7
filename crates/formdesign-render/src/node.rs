//! A small retained visual tree that serializes to HTML.

use std::fmt::Write;

/// Tags written without a closing tag.
const VOID_TAGS: &[&str] = &["input", "meta", "br"];

/// One node of the visual tree.
///
/// Attributes and styles keep insertion order so output is deterministic.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VisualNode {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub classes: Vec<String>,
    pub styles: Vec<(String, String)>,
    pub text: Option<String>,
    pub children: Vec<VisualNode>,
}

impl VisualNode {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn div() -> Self {
        Self::new("div")
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    pub fn with_style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_style(property, value);
        self
    }

    pub fn with_styles<K, V>(mut self, styles: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        for (k, v) in styles {
            self.set_style(k, v);
        }
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_child(mut self, child: VisualNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = VisualNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Set a style property, replacing an earlier value in place.
    pub fn set_style(&mut self, property: impl Into<String>, value: impl Into<String>) {
        let property = property.into();
        let value = value.into();
        match self.styles.iter_mut().find(|(k, _)| *k == property) {
            Some(slot) => slot.1 = value,
            None => self.styles.push((property, value)),
        }
    }

    pub fn style(&self, property: &str) -> Option<&str> {
        self.styles
            .iter()
            .find(|(k, _)| k == property)
            .map(|(_, v)| v.as_str())
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// All nodes below this one, depth first.
    pub fn descendants(&self) -> Vec<&VisualNode> {
        let mut out = Vec::new();
        for child in &self.children {
            out.push(child);
            out.extend(child.descendants());
        }
        out
    }

    /// Descendants carrying `class`.
    pub fn find_by_class(&self, class: &str) -> Vec<&VisualNode> {
        self.descendants()
            .into_iter()
            .filter(|n| n.has_class(class))
            .collect()
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    pub fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attrs {
            let _ = write!(out, " {}=\"{}\"", name, escape(value));
        }
        if !self.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", escape(&self.classes.join(" ")));
        }
        if !self.styles.is_empty() {
            let style: Vec<String> = self.styles.iter().map(|(k, v)| format!("{k}: {v};")).collect();
            let _ = write!(out, " style=\"{}\"", escape(&style.join(" ")));
        }
        out.push('>');
        if VOID_TAGS.contains(&self.tag.as_str()) {
            return;
        }
        if let Some(text) = &self.text {
            out.push_str(&escape(text));
        }
        for child in &self.children {
            child.write_html(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

/// Escape text for use in HTML content or a quoted attribute.
/// Non-breaking spaces are written as `&nbsp;`.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_output_is_ordered() {
        let node = VisualNode::div()
            .with_attr("id", "a")
            .with_class("x")
            .with_class("y")
            .with_style("left", "1px")
            .with_style("top", "2px")
            .with_text("hi");
        assert_eq!(
            node.to_html(),
            r#"<div id="a" class="x y" style="left: 1px; top: 2px;">hi</div>"#
        );
    }

    #[test]
    fn test_set_style_replaces() {
        let mut node = VisualNode::div().with_style("width", "1px");
        node.set_style("width", "5px");
        assert_eq!(node.styles.len(), 1);
        assert_eq!(node.style("width"), Some("5px"));
    }

    #[test]
    fn test_escaping() {
        let node = VisualNode::div().with_attr("title", "a\"b").with_text("<b>&\u{a0}");
        assert_eq!(node.to_html(), r#"<div title="a&quot;b">&lt;b&gt;&amp;&nbsp;</div>"#);
    }

    #[test]
    fn test_void_tags() {
        let node = VisualNode::new("input").with_attr("type", "checkbox");
        assert_eq!(node.to_html(), r#"<input type="checkbox">"#);
    }

    #[test]
    fn test_find_by_class() {
        let tree = VisualNode::div()
            .with_child(VisualNode::div().with_class("cell"))
            .with_child(VisualNode::div().with_child(VisualNode::div().with_class("cell")));
        assert_eq!(tree.find_by_class("cell").len(), 2);
    }
}
