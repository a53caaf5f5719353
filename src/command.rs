use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use powersnake::{Command, Direction, Phase, PowerUpKind};

/// Translate a key press into a game command.  Which keys mean what depends
/// on the phase the game is in.
pub(crate) fn command_for_key(phase: Phase, ev: KeyEvent) -> Option<Command> {
    let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
    if (ev.modifiers, ev.code) == (KeyModifiers::CONTROL, KeyCode::Char('c')) {
        return Some(Command::Quit);
    } else if !normal_modifiers.contains(ev.modifiers) {
        return None;
    }
    match (phase, ev.code) {
        (_, KeyCode::Char('q')) | (Phase::Menu, KeyCode::Esc) => Some(Command::Quit),
        (Phase::Menu, KeyCode::Char(' ') | KeyCode::Enter) => Some(Command::Start),
        (Phase::GameOver, KeyCode::Char(' ') | KeyCode::Enter)
        | (Phase::Playing | Phase::GameOver, KeyCode::Esc) => Some(Command::ToMenu),
        (Phase::Playing | Phase::GameOver, KeyCode::Char('r')) => Some(Command::Reset),
        (Phase::Playing, code) => direction_for_key(code)
            .map(Command::Move)
            .or_else(|| power_up_for_key(code).map(Command::ActivatePowerUp)),
        _ => None,
    }
}

fn direction_for_key(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Char('w' | 'k') | KeyCode::Up => Some(Direction::Up),
        KeyCode::Char('s' | 'j') | KeyCode::Down => Some(Direction::Down),
        KeyCode::Char('a' | 'h') | KeyCode::Left => Some(Direction::Left),
        KeyCode::Char('d' | 'l') | KeyCode::Right => Some(Direction::Right),
        _ => None,
    }
}

fn power_up_for_key(code: KeyCode) -> Option<PowerUpKind> {
    let KeyCode::Char(c) = code else {
        return None;
    };
    let slot = u8::try_from(c.to_digit(10)?).ok()?;
    PowerUpKind::from_slot(slot)
}
