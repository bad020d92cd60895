use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use dictators_client::coord::Direction;


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum UserAction {
    Premove(Direction),
    CancelPremoves,
    // Cursor stands in for the mouse: it picks a tile for `SelectCursor`.
    MoveCursor(Direction),
    SelectCursor,
    Quit,
}

pub fn action_for_key(key: KeyEvent) -> Option<UserAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(UserAction::Quit),
            _ => None,
        };
    }
    use Direction::*;
    match key.code {
        KeyCode::Char(ch) => match ch.to_ascii_lowercase() {
            'w' => Some(UserAction::Premove(Up)),
            's' => Some(UserAction::Premove(Down)),
            'a' => Some(UserAction::Premove(Left)),
            'd' => Some(UserAction::Premove(Right)),
            'q' => Some(UserAction::CancelPremoves),
            ' ' => Some(UserAction::SelectCursor),
            _ => None,
        },
        KeyCode::Up => Some(UserAction::MoveCursor(Up)),
        KeyCode::Down => Some(UserAction::MoveCursor(Down)),
        KeyCode::Left => Some(UserAction::MoveCursor(Left)),
        KeyCode::Right => Some(UserAction::MoveCursor(Right)),
        KeyCode::Enter => Some(UserAction::SelectCursor),
        KeyCode::Esc => Some(UserAction::Quit),
        _ => None,
    }
}
