use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::game::Direction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Turn(Direction),
    Restart,
    Quit,
    /// Primary button pressed at a terminal cell
    Pointer { column: u16, row: u16 },
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    /// Translate a terminal event. Only key presses count.
    pub fn handle_event(&self, event: &Event) -> KeyAction {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key_event(*key),
            Event::Mouse(mouse) => self.handle_mouse_event(*mouse),
            _ => KeyAction::None,
        }
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => KeyAction::Turn(Direction::Up),
            KeyCode::Down => KeyAction::Turn(Direction::Down),
            KeyCode::Left => KeyAction::Turn(Direction::Left),
            KeyCode::Right => KeyAction::Turn(Direction::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => KeyAction::Turn(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => KeyAction::Turn(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => KeyAction::Turn(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => KeyAction::Turn(Direction::Right),

            // Controls
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Restart,

            _ => KeyAction::None,
        }
    }

    pub fn handle_mouse_event(&self, mouse: MouseEvent) -> KeyAction {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => KeyAction::Pointer {
                column: mouse.column,
                row: mouse.row,
            },
            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_arrow_keys() {
        let handler = InputHandler::new();

        assert_eq!(handler.handle_key_event(key(KeyCode::Up)), KeyAction::Turn(Direction::Up));
        assert_eq!(handler.handle_key_event(key(KeyCode::Down)), KeyAction::Turn(Direction::Down));
        assert_eq!(handler.handle_key_event(key(KeyCode::Left)), KeyAction::Turn(Direction::Left));
        assert_eq!(handler.handle_key_event(key(KeyCode::Right)), KeyAction::Turn(Direction::Right));
    }

    #[test]
    fn test_wasd_keys() {
        let handler = InputHandler::new();

        assert_eq!(handler.handle_key_event(key(KeyCode::Char('w'))), KeyAction::Turn(Direction::Up));
        assert_eq!(handler.handle_key_event(key(KeyCode::Char('a'))), KeyAction::Turn(Direction::Left));
        assert_eq!(handler.handle_key_event(key(KeyCode::Char('s'))), KeyAction::Turn(Direction::Down));
        assert_eq!(handler.handle_key_event(key(KeyCode::Char('d'))), KeyAction::Turn(Direction::Right));

        let w_upper = KeyEvent::new(KeyCode::Char('W'), KeyModifiers::SHIFT);
        assert_eq!(handler.handle_key_event(w_upper), KeyAction::Turn(Direction::Up));
    }

    #[test]
    fn test_quit_keys() {
        let handler = InputHandler::new();

        assert_eq!(handler.handle_key_event(key(KeyCode::Char('q'))), KeyAction::Quit);
        assert_eq!(handler.handle_key_event(key(KeyCode::Esc)), KeyAction::Quit);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handler.handle_key_event(ctrl_c), KeyAction::Quit);
    }

    #[test]
    fn test_restart_key() {
        let handler = InputHandler::new();

        assert_eq!(handler.handle_key_event(key(KeyCode::Char('r'))), KeyAction::Restart);

        let r_upper = KeyEvent::new(KeyCode::Char('R'), KeyModifiers::SHIFT);
        assert_eq!(handler.handle_key_event(r_upper), KeyAction::Restart);
    }

    #[test]
    fn test_unknown_key() {
        let handler = InputHandler::new();
        assert_eq!(handler.handle_key_event(key(KeyCode::Char('x'))), KeyAction::None);
    }

    #[test]
    fn test_key_release_ignored() {
        let handler = InputHandler::new();
        let mut release = key(KeyCode::Up);
        release.kind = KeyEventKind::Release;

        assert_eq!(handler.handle_event(&Event::Key(release)), KeyAction::None);
        assert_eq!(
            handler.handle_event(&Event::Key(key(KeyCode::Up))),
            KeyAction::Turn(Direction::Up)
        );
    }

    #[test]
    fn test_left_click_is_pointer() {
        let handler = InputHandler::new();
        let click = mouse(MouseEventKind::Down(MouseButton::Left), 12, 7);

        assert_eq!(
            handler.handle_event(&Event::Mouse(click)),
            KeyAction::Pointer { column: 12, row: 7 }
        );
    }

    #[test]
    fn test_other_mouse_events_ignored() {
        let handler = InputHandler::new();

        let right = mouse(MouseEventKind::Down(MouseButton::Right), 1, 1);
        assert_eq!(handler.handle_mouse_event(right), KeyAction::None);

        let moved = mouse(MouseEventKind::Moved, 1, 1);
        assert_eq!(handler.handle_mouse_event(moved), KeyAction::None);
    }

    #[test]
    fn test_resize_ignored() {
        let handler = InputHandler::new();
        assert_eq!(handler.handle_event(&Event::Resize(80, 24)), KeyAction::None);
    }
}
