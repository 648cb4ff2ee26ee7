//! Keyboard shortcut registry and key-to-command mapping.

use crate::commands::Command;
use kurbo::Vec2;

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub shift: bool,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        ctrl: bool,
        shift: bool,
        description: &'static str,
    ) -> Self {
        Self {
            key,
            ctrl,
            shift,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+S").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key);
        parts.join("+")
    }
}

/// Keys the editor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Delete,
    Backspace,
    Escape,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
}

/// A key with its modifier state. Cmd on macOS counts as `ctrl`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub ctrl: bool,
    pub shift: bool,
}

impl KeyPress {
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            ctrl: false,
            shift: false,
        }
    }

    pub fn ctrl(key: Key) -> Self {
        Self {
            key,
            ctrl: true,
            shift: false,
        }
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("A", true, false, "Select all elements"),
            Shortcut::new("D", true, false, "Duplicate selected elements"),
            Shortcut::new("S", true, false, "Save template"),
            Shortcut::new("E", true, false, "Export to HTML"),
            Shortcut::new("P", true, false, "Print"),
            Shortcut::new("Z", true, false, "Undo"),
            Shortcut::new("Z", true, true, "Redo"),
            Shortcut::new("Y", true, false, "Redo"),
            Shortcut::new("Delete", false, false, "Delete selected elements"),
            Shortcut::new("Backspace", false, false, "Delete selected elements"),
            Shortcut::new("Arrows", false, false, "Nudge selection"),
            Shortcut::new("Arrows", false, true, "Nudge selection by a large step"),
            Shortcut::new("+", false, false, "Zoom in"),
            Shortcut::new("-", false, false, "Zoom out"),
            Shortcut::new("Escape", false, false, "Cancel current action or deselect"),
            Shortcut::new("Ctrl+Click", false, false, "Toggle element in selection"),
        ]
    }

    /// Print all shortcuts to console.
    pub fn print_all() {
        println!("\n=== Keyboard Shortcuts ===");
        for shortcut in Self::all() {
            println!("  {:20} {}", shortcut.format(), shortcut.description);
        }
        println!();
    }

    /// Command bound to a key press, if any.
    pub fn command_for(press: KeyPress) -> Option<Command> {
        let arrow = |x: f64, y: f64| {
            Some(Command::Nudge {
                direction: Vec2::new(x, y),
                large: press.shift,
            })
        };
        match press.key {
            Key::Delete | Key::Backspace => Some(Command::DeleteSelection),
            Key::Escape => Some(Command::Escape),
            Key::ArrowUp => arrow(0.0, -1.0),
            Key::ArrowDown => arrow(0.0, 1.0),
            Key::ArrowLeft => arrow(-1.0, 0.0),
            Key::ArrowRight => arrow(1.0, 0.0),
            Key::Char(c) if press.ctrl => match (c.to_ascii_lowercase(), press.shift) {
                ('a', _) => Some(Command::SelectAll),
                ('d', _) => Some(Command::DuplicateSelection),
                ('s', _) => Some(Command::Save),
                ('e', _) => Some(Command::ExportHtml),
                ('p', _) => Some(Command::Print),
                ('z', false) => Some(Command::Undo),
                ('z', true) | ('y', _) => Some(Command::Redo),
                _ => None,
            },
            Key::Char('+' | '=') => Some(Command::ZoomIn),
            Key::Char('-') => Some(Command::ZoomOut),
            Key::Char(_) => None,
        }
    }
}
