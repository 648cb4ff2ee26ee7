//! Incremental renderer producing the design canvas visual tree.

use crate::markup::{self, ContentKey, Surface, px};
use crate::node::VisualNode;
use formdesign_core::handles::{HandleKind, handles_for};
use formdesign_core::{EditorSession, Element, ElementId};
use kurbo::Rect;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Counters for the last render pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Elements whose content subtree was regenerated.
    pub rebuilt: usize,
    /// Elements whose cached content was reused unchanged.
    pub reused: usize,
    /// Gesture targets whose content regeneration was postponed.
    pub deferred: usize,
    /// Cache entries dropped because their element is gone.
    pub evicted: usize,
}

#[derive(Debug, Clone)]
struct CachedContent {
    key: ContentKey,
    nodes: Vec<VisualNode>,
}

/// Keeps the canvas tree in sync with an [`EditorSession`].
///
/// Content subtrees are cached per element and only regenerated when the
/// inputs they depend on change. Geometry and cosmetic styles are cheap and
/// recomputed every pass.
#[derive(Debug, Default)]
pub struct CanvasRenderer {
    cache: HashMap<ElementId, CachedContent>,
    tree: VisualNode,
    stats: RenderStats,
}

impl CanvasRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The tree produced by the last call to [`CanvasRenderer::render`].
    pub fn tree(&self) -> &VisualNode {
        &self.tree
    }

    pub fn stats(&self) -> RenderStats {
        self.stats
    }

    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    /// Drop every cached subtree; the next pass rebuilds everything.
    pub fn invalidate(&mut self) {
        self.cache.clear();
    }

    /// Bring the tree up to date with the session and return it.
    pub fn render(&mut self, session: &EditorSession) -> &VisualNode {
        let mut stats = RenderStats::default();
        let deferred_ids: HashSet<ElementId> = session.gesture_targets().into_iter().collect();

        let mut root = canvas_root(session);
        let elements = session.display_elements();
        let mut present = HashSet::with_capacity(elements.len());

        for element in elements {
            present.insert(element.id.clone());
            let content = self.content_for(element, deferred_ids.contains(&element.id), &mut stats);
            let selected = session.selection().contains(&element.id);
            let bounds = session.bounds_of(&element.id).unwrap_or_else(|| element.rect());
            root.children
                .push(element_node(element, content, selected, bounds));
        }

        if let Some(rect) = session.marquee_rect() {
            root.children.push(marquee_node(rect));
        }

        let before = self.cache.len();
        self.cache.retain(|id, _| present.contains(id));
        stats.evicted = before - self.cache.len();

        if stats.rebuilt > 0 || stats.evicted > 0 {
            log::trace!(
                "Render pass: {} rebuilt, {} reused, {} deferred, {} evicted",
                stats.rebuilt,
                stats.reused,
                stats.deferred,
                stats.evicted
            );
        }
        self.stats = stats;
        self.tree = root;
        &self.tree
    }

    fn content_for(&mut self, element: &Element, defer: bool, stats: &mut RenderStats) -> Vec<VisualNode> {
        let key = markup::content_key(element);
        if let Some(cached) = self.cache.get(&element.id) {
            if cached.key == key {
                stats.reused += 1;
                return cached.nodes.clone();
            }
            if defer {
                stats.deferred += 1;
                return cached.nodes.clone();
            }
        }
        let nodes = markup::element_content(element, Surface::Canvas);
        stats.rebuilt += 1;
        self.cache.insert(
            element.id.clone(),
            CachedContent {
                key,
                nodes: nodes.clone(),
            },
        );
        nodes
    }
}

fn canvas_root(session: &EditorSession) -> VisualNode {
    let document = session.document();
    let canvas = document.canvas_size();
    let mut root = VisualNode::div()
        .with_class("design-canvas")
        .with_class(format!("{}-paper", document.page_size.name()))
        .with_style("position", "relative")
        .with_style("width", px(canvas.width))
        .with_style("height", px(canvas.height));
    let grid = session.grid();
    if grid.visible {
        root = root
            .with_class("show-grid")
            .with_style("background-size", format!("{0} {0}", px(grid.size)));
    }
    root
}

fn element_node(element: &Element, content: Vec<VisualNode>, selected: bool, bounds: Rect) -> VisualNode {
    let mut node = VisualNode::div()
        .with_attr("id", element.id.as_str())
        .with_attr("data-type", element.element_type().as_str())
        .with_class("design-element")
        .with_class(markup::kind_class(element))
        .with_styles(markup::position_styles(element, Surface::Canvas))
        .with_styles(markup::kind_styles(element))
        .with_children(content);

    if selected {
        node = node.with_class("selected");
        for handle in handles_for(element, bounds) {
            let offset = handle.position - bounds.origin();
            let child = match handle.kind {
                HandleKind::Resize(dir) => VisualNode::div()
                    .with_class("resize-handle")
                    .with_class(dir.name())
                    .with_attr("data-handle", dir.name()),
                HandleKind::ColumnBoundary(i) => VisualNode::div()
                    .with_class("column-resize-handle")
                    .with_attr("data-column", i.to_string()),
            };
            node.children.push(
                child
                    .with_style("position", "absolute")
                    .with_style("left", px(offset.x))
                    .with_style("top", px(offset.y)),
            );
        }
    }
    node
}

fn marquee_node(rect: Rect) -> VisualNode {
    VisualNode::div()
        .with_class("selection-marquee")
        .with_style("position", "absolute")
        .with_style("left", px(rect.x0))
        .with_style("top", px(rect.y0))
        .with_style("width", px(rect.width()))
        .with_style("height", px(rect.height()))
}
