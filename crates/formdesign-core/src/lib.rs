//! FormDesign Core Library
//!
//! Platform-agnostic document model, manipulation engine and history for
//! the form layout editor.

pub mod config;
pub mod document;
pub mod elements;
pub mod error;
pub mod geometry;
pub mod handles;
pub mod history;
pub mod manipulation;
pub mod selection;
pub mod session;
pub mod snap;
pub mod storage;
pub mod view;

pub use config::{ConfigError, EditorConfig, MAX_UNDO_HISTORY};
pub use document::{Constraints, Document, GeometryPatch, PageSize, ZOrder};
pub use elements::{Element, ElementId, ElementKind, ElementType, PropertyEdit};
pub use error::{DocumentError, DocumentResult, EditError, EditResult};
pub use geometry::{FALLBACK_AUTO_SIZE, MeasurementCache, Measurer, NoMeasurer, bounds};
pub use handles::{Handle, HandleKind, ResizeHandle};
pub use history::{HistoryEntry, HistoryManager};
pub use manipulation::{Alignment, DistributeAxis, GestureKind};
pub use selection::{SelectMode, Selection};
pub use session::{EditorSession, TextStylePatch};
pub use snap::{GRID_SIZE, Grid, SnapResult, snap_to_grid};
pub use storage::{MemoryStorage, Storage, StorageError, StorageResult};
pub use view::{View, ZoomConfig};
