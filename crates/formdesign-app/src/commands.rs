//! User-facing commands and their dispatch onto an [`EditorSession`].

use formdesign_core::{
    Alignment, DistributeAxis, DocumentError, EditError, EditorSession, ElementId, ElementType,
    PageSize, StorageError, ZOrder,
};
use formdesign_render::{RendererError, export_data, to_static_markup};
use kurbo::{Point, Vec2};
use thiserror::Error;

/// Failures surfaced by command dispatch.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Edit(#[from] EditError),
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Render(#[from] RendererError),
}

pub type CommandResult<T> = Result<T, CommandError>;

/// Everything a toolbar, menu or shortcut can ask the editor to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Drop a new element at a page position.
    AddElement { element_type: ElementType, at: Point },
    DeleteSelection,
    DuplicateSelection,
    SelectAll,
    /// Cancel the active gesture, or clear the selection when idle.
    Escape,
    Undo,
    Redo,
    /// Move the selection one step; `large` uses the big step.
    Nudge { direction: Vec2, large: bool },
    Align(Alignment),
    Distribute(DistributeAxis),
    Order(ZOrder),
    SetPageSize(PageSize),
    /// Empty the document and remove its saved copy.
    ClearAll,
    ZoomIn,
    ZoomOut,
    ResetZoom,
    ToggleGrid,
    ToggleSnap,
    Save,
    Load,
    Import(String),
    ExportHtml,
    ExportData,
    /// Produce print-ready markup for the host's print facility.
    Print,
}

impl Command {
    /// Whether the command can change the persisted document.
    pub fn edits_document(&self) -> bool {
        matches!(
            self,
            Command::AddElement { .. }
                | Command::DeleteSelection
                | Command::DuplicateSelection
                | Command::Undo
                | Command::Redo
                | Command::Nudge { .. }
                | Command::Align(_)
                | Command::Distribute(_)
                | Command::Order(_)
                | Command::SetPageSize(_)
                | Command::ClearAll
                | Command::Import(_)
        )
    }
}

/// What a command produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Editor state changed.
    Changed,
    /// The command applied but had nothing to do.
    Unchanged,
    Added(ElementId),
    Markup(String),
    Print(String),
    Data(String),
}

impl Outcome {
    fn from_changed(changed: bool) -> Self {
        if changed { Outcome::Changed } else { Outcome::Unchanged }
    }

    fn from_count(count: usize) -> Self {
        Self::from_changed(count > 0)
    }
}

/// Applies commands to a session, optionally saving after each document
/// edit.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandDispatcher {
    pub autosave: bool,
}

impl CommandDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_autosave(mut self, autosave: bool) -> Self {
        self.autosave = autosave;
        self
    }

    pub fn execute(&self, session: &mut EditorSession, command: Command) -> CommandResult<Outcome> {
        // Clearing removes the saved copy instead.
        let save_after = command.edits_document() && command != Command::ClearAll;
        let outcome = execute(session, command)?;
        if self.autosave && save_after && outcome != Outcome::Unchanged {
            if let Err(e) = session.save() {
                log::warn!("Autosave failed: {e}");
            }
        }
        Ok(outcome)
    }
}

/// Apply one command to the session.
pub fn execute(session: &mut EditorSession, command: Command) -> CommandResult<Outcome> {
    log::debug!("Executing {command:?}");
    let outcome = match command {
        Command::AddElement { element_type, at } => {
            Outcome::Added(session.add_element(element_type, at))
        }
        Command::DeleteSelection => Outcome::from_count(session.delete_selection()),
        Command::DuplicateSelection => Outcome::from_count(session.duplicate_selection().len()),
        Command::SelectAll => {
            session.select_all();
            Outcome::Changed
        }
        Command::Escape => {
            session.escape();
            Outcome::Changed
        }
        Command::Undo => Outcome::from_changed(session.undo()),
        Command::Redo => Outcome::from_changed(session.redo()),
        Command::Nudge { direction, large } => Outcome::from_count(session.nudge(direction, large)),
        Command::Align(alignment) => Outcome::from_count(session.align_selection(alignment)),
        Command::Distribute(axis) => Outcome::from_count(session.distribute_selection(axis)),
        Command::Order(order) => Outcome::from_changed(session.order_selection(order)),
        Command::SetPageSize(page_size) => Outcome::from_changed(session.set_page_size(page_size)?),
        Command::ClearAll => {
            let changed = session.clear_all()?;
            if session.has_storage() {
                session.discard_saved()?;
            }
            Outcome::from_changed(changed)
        }
        Command::ZoomIn => {
            session.zoom_in();
            Outcome::Changed
        }
        Command::ZoomOut => {
            session.zoom_out();
            Outcome::Changed
        }
        Command::ResetZoom => {
            session.reset_zoom();
            Outcome::Changed
        }
        Command::ToggleGrid => {
            session.toggle_grid();
            Outcome::Changed
        }
        Command::ToggleSnap => {
            session.toggle_snap();
            Outcome::Changed
        }
        Command::Save => {
            session.save()?;
            Outcome::Unchanged
        }
        Command::Load => Outcome::from_changed(session.load_saved()?),
        Command::Import(blob) => {
            session.import_data(&blob)?;
            Outcome::Changed
        }
        Command::ExportHtml => Outcome::Markup(to_static_markup(session.document())),
        Command::ExportData => Outcome::Data(export_data(session.document())?),
        Command::Print => Outcome::Print(to_static_markup(session.document())),
    };
    Ok(outcome)
}
