//! Pointer event routing onto session gestures.

use formdesign_core::{
    EditResult, EditorSession, ElementId, GestureKind, HandleKind, SelectMode,
};
use kurbo::Point;

/// Modifier keys held during a pointer event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Ctrl, or Cmd on macOS.
    pub ctrl: bool,
    pub shift: bool,
}

/// What a pointer press started.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerOutcome {
    /// Nothing under the pointer reacted.
    Ignored,
    /// Ctrl-click toggled an element in or out of the selection.
    Toggled(ElementId),
    Gesture(GestureKind),
}

/// Translates press/move/release into session gestures.
///
/// Press priority: handles of selected elements, then elements, then
/// empty canvas (marquee).
#[derive(Debug, Default)]
pub struct EventHandler {
    last_point: Option<Point>,
}

impl EventHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a gesture is in progress.
    pub fn is_manipulating(&self, session: &EditorSession) -> bool {
        session.gestures().any_active()
    }

    /// Last pointer position seen, in screen coordinates.
    pub fn last_point(&self) -> Option<Point> {
        self.last_point
    }

    pub fn press(
        &mut self,
        session: &mut EditorSession,
        screen_point: Point,
        modifiers: Modifiers,
    ) -> EditResult<PointerOutcome> {
        self.last_point = Some(screen_point);

        if !modifiers.ctrl {
            if let Some((id, handle)) = session.handle_at(screen_point) {
                let kind = match handle {
                    HandleKind::Resize(dir) => {
                        session.begin_resize(&id, dir, screen_point)?;
                        GestureKind::Resize
                    }
                    HandleKind::ColumnBoundary(boundary) => {
                        session.begin_column_resize(&id, boundary, screen_point)?;
                        GestureKind::ColumnResize
                    }
                };
                return Ok(PointerOutcome::Gesture(kind));
            }
        }

        if let Some(id) = session.element_at(screen_point) {
            if modifiers.ctrl {
                session.select(&id, SelectMode::Toggle);
                return Ok(PointerOutcome::Toggled(id));
            }
            if !session.selection().contains(&id) {
                session.select(&id, SelectMode::Replace);
            }
            session.begin_drag(screen_point)?;
            return Ok(PointerOutcome::Gesture(GestureKind::Drag));
        }

        if modifiers.ctrl {
            return Ok(PointerOutcome::Ignored);
        }
        session.begin_marquee(screen_point)?;
        Ok(PointerOutcome::Gesture(GestureKind::Marquee))
    }

    /// Feed a pointer move to the active gesture. Moves with no gesture
    /// are ignored.
    pub fn move_to(&mut self, session: &mut EditorSession, screen_point: Point) -> EditResult<()> {
        self.last_point = Some(screen_point);
        match session.gestures().active() {
            Some(GestureKind::Drag) => session.update_drag(screen_point),
            Some(GestureKind::Resize) => session.update_resize(screen_point),
            Some(GestureKind::ColumnResize) => session.update_column_resize(screen_point),
            Some(GestureKind::Marquee) => session.update_marquee(screen_point),
            None => Ok(()),
        }
    }

    /// Finish the active gesture at `screen_point`. Returns the gesture
    /// that ended, if any.
    pub fn release(
        &mut self,
        session: &mut EditorSession,
        screen_point: Point,
    ) -> EditResult<Option<GestureKind>> {
        let Some(kind) = session.gestures().active() else {
            self.last_point = None;
            return Ok(None);
        };
        self.move_to(session, screen_point)?;
        match kind {
            GestureKind::Drag => {
                session.end_drag()?;
            }
            GestureKind::Resize => {
                session.end_resize()?;
            }
            GestureKind::ColumnResize => {
                session.end_column_resize()?;
            }
            GestureKind::Marquee => {
                session.end_marquee()?;
            }
        }
        self.last_point = None;
        Ok(Some(kind))
    }

    /// Abandon the active gesture without committing it.
    pub fn cancel(&mut self, session: &mut EditorSession) -> bool {
        self.last_point = None;
        session.cancel_gesture()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formdesign_core::ElementType;

    fn session_with_rect() -> (EditorSession, ElementId) {
        let mut session = EditorSession::default();
        let id = session.add_element(ElementType::Rectangle, Point::new(100.0, 100.0));
        session.clear_selection();
        (session, id)
    }

    #[test]
    fn test_press_on_element_drags() {
        let (mut session, id) = session_with_rect();
        let mut handler = EventHandler::new();
        let outcome = handler
            .press(&mut session, Point::new(150.0, 150.0), Modifiers::default())
            .unwrap();
        assert_eq!(outcome, PointerOutcome::Gesture(GestureKind::Drag));
        assert!(session.selection().contains(&id));

        handler.move_to(&mut session, Point::new(170.0, 160.0)).unwrap();
        assert_eq!(
            handler.release(&mut session, Point::new(180.0, 170.0)).unwrap(),
            Some(GestureKind::Drag)
        );
        let element = session.document().get(&id).unwrap();
        assert_eq!((element.x, element.y), (130.0, 120.0));
        assert_eq!(session.history().undo_label(), Some("Move 1 element(s)"));
    }

    #[test]
    fn test_press_on_handle_resizes() {
        let (mut session, id) = session_with_rect();
        session.select(&id, SelectMode::Replace);
        let mut handler = EventHandler::new();
        // South-east corner of the 150x100 rectangle.
        let outcome = handler
            .press(&mut session, Point::new(250.0, 200.0), Modifiers::default())
            .unwrap();
        assert_eq!(outcome, PointerOutcome::Gesture(GestureKind::Resize));
        handler.release(&mut session, Point::new(300.0, 240.0)).unwrap();
        let element = session.document().get(&id).unwrap();
        assert_eq!((element.width, element.height), (200.0, 140.0));
    }

    #[test]
    fn test_press_on_empty_canvas_marquee() {
        let (mut session, id) = session_with_rect();
        let mut handler = EventHandler::new();
        let outcome = handler
            .press(&mut session, Point::new(10.0, 10.0), Modifiers::default())
            .unwrap();
        assert_eq!(outcome, PointerOutcome::Gesture(GestureKind::Marquee));
        handler.release(&mut session, Point::new(120.0, 120.0)).unwrap();
        assert_eq!(session.selection().ids(), &[id]);
    }

    #[test]
    fn test_click_on_empty_canvas_deselects() {
        let (mut session, id) = session_with_rect();
        session.select(&id, SelectMode::Replace);
        let mut handler = EventHandler::new();
        handler
            .press(&mut session, Point::new(600.0, 600.0), Modifiers::default())
            .unwrap();
        handler.release(&mut session, Point::new(600.0, 600.0)).unwrap();
        assert!(session.selection().is_empty());
    }

    #[test]
    fn test_ctrl_click_toggles() {
        let (mut session, id) = session_with_rect();
        let other = session.add_element(ElementType::Label, Point::new(400.0, 400.0));
        let ctrl = Modifiers {
            ctrl: true,
            shift: false,
        };
        let mut handler = EventHandler::new();
        assert_eq!(
            handler.press(&mut session, Point::new(150.0, 150.0), ctrl).unwrap(),
            PointerOutcome::Toggled(id.clone())
        );
        assert_eq!(session.selection().len(), 2);
        assert!(!handler.is_manipulating(&session));
        handler.press(&mut session, Point::new(150.0, 150.0), ctrl).unwrap();
        assert_eq!(session.selection().ids(), &[other]);
        assert_eq!(
            handler.press(&mut session, Point::new(700.0, 700.0), ctrl).unwrap(),
            PointerOutcome::Ignored
        );
    }

    #[test]
    fn test_cancel_leaves_document() {
        let (mut session, id) = session_with_rect();
        let mut handler = EventHandler::new();
        handler
            .press(&mut session, Point::new(150.0, 150.0), Modifiers::default())
            .unwrap();
        handler.move_to(&mut session, Point::new(300.0, 300.0)).unwrap();
        assert!(handler.cancel(&mut session));
        assert_eq!(session.document().get(&id).unwrap().x, 100.0);
        assert_eq!(handler.release(&mut session, Point::ZERO).unwrap(), None);
    }
}
