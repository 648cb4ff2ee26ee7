//! FormDesign Render Library
//!
//! Visual tree, incremental canvas renderer and static export for the
//! form layout editor.

mod export;
pub mod markup;
mod measure;
pub mod node;
mod renderer;

pub use export::{DOCUMENT_TITLE, export_data, to_static_markup, write_static_markup};
pub use measure::EstimatingMeasurer;
pub use node::VisualNode;
pub use renderer::{CanvasRenderer, RenderResult, RenderStats, RendererError};
