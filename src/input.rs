use crossterm::event::{self, Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Action {
    Quit,
    TogglePause,
    ToggleOrbits,
    ToggleLabels,
    ReseedStars,
    PointerMoved { col: u16, row: u16 },
    Click { col: u16, row: u16 },
}

pub(crate) fn collect_actions(max_frame_time: Duration) -> anyhow::Result<Vec<Action>> {
    let mut out = Vec::new();

    // tiny poll timeout so the loop stays responsive
    let timeout = std::cmp::min(Duration::from_millis(1), max_frame_time);
    while event::poll(timeout)? {
        if let Some(action) = map_event(event::read()?) {
            out.push(action);
            if out.len() >= 32 {
                break;
            }
        }
    }
    Ok(out)
}

fn map_event(ev: Event) -> Option<Action> {
    match ev {
        Event::Key(k) if k.kind == KeyEventKind::Press => match k.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Action::Quit),
            KeyCode::Char(' ') => Some(Action::TogglePause),
            KeyCode::Char('o') | KeyCode::Char('O') => Some(Action::ToggleOrbits),
            KeyCode::Char('l') | KeyCode::Char('L') => Some(Action::ToggleLabels),
            KeyCode::Char('r') | KeyCode::Char('R') => Some(Action::ReseedStars),
            _ => None,
        },
        Event::Mouse(m) => match m.kind {
            MouseEventKind::Moved => Some(Action::PointerMoved { col: m.column, row: m.row }),
            MouseEventKind::Down(MouseButton::Left) => {
                Some(Action::Click { col: m.column, row: m.row })
            }
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers, MouseEvent};

    fn press(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    #[test]
    fn keys_map_to_actions() {
        assert_eq!(map_event(press('q')), Some(Action::Quit));
        assert_eq!(map_event(press(' ')), Some(Action::TogglePause));
        assert_eq!(map_event(press('o')), Some(Action::ToggleOrbits));
        assert_eq!(map_event(press('z')), None);
    }

    #[test]
    fn mouse_maps_to_pointer_actions() {
        let moved = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Moved,
            column: 10,
            row: 4,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(map_event(moved), Some(Action::PointerMoved { col: 10, row: 4 }));

        let click = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 3,
            row: 7,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(map_event(click), Some(Action::Click { col: 3, row: 7 }));

        let scroll = Event::Mouse(MouseEvent {
            kind: MouseEventKind::ScrollUp,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(map_event(scroll), None);
    }
}
