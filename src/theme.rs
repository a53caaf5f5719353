//! Glyphs, styles, and layout constants for the terminal front end
use powersnake::PowerUpKind;
use ratatui::{
    layout::Size,
    style::{Color, Modifier, Style},
};

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 80,
    height: 24,
};

/// Ticks per second below which a round is never driven
pub(crate) const MIN_TICK_RATE: f64 = 15.0;

/// Number of high scores listed on the menu screen
pub(crate) const MENU_SCORES: u16 = 5;

/// Glyph for the snake's head when it is moving north/up
pub(crate) const SNAKE_HEAD_NORTH_SYMBOL: char = 'v';

/// Glyph for the snake's head when it is moving south/down
pub(crate) const SNAKE_HEAD_SOUTH_SYMBOL: char = '^';

/// Glyph for the snake's head when it is moving east/right
pub(crate) const SNAKE_HEAD_EAST_SYMBOL: char = '<';

/// Glyph for the snake's head when it is moving west/left
pub(crate) const SNAKE_HEAD_WEST_SYMBOL: char = '>';

/// Glyph for the parts of the snake's body
pub(crate) const SNAKE_BODY_SYMBOL: char = '⚬';

/// Glyph for the snake's head when it's collided with a wall or itself
pub(crate) const COLLISION_SYMBOL: char = '×';

pub(crate) const FOOD_SYMBOL: char = '●';

pub(crate) const SPECIAL_FOOD_SYMBOL: char = '◆';

pub(crate) const COIN_SYMBOL: char = '$';

pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Style for the snake while a shield is running
pub(crate) const SHIELDED_SNAKE_STYLE: Style =
    Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);

pub(crate) const FOOD_STYLE: Style = Style::new().fg(Color::LightRed);

/// Special food alternates between this and [`FOOD_STYLE`]
pub(crate) const SPECIAL_FOOD_STYLE: Style = Style::new()
    .fg(Color::LightMagenta)
    .add_modifier(Modifier::BOLD);

pub(crate) const COIN_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);

pub(crate) const POWER_UP_STYLE: Style = Style::new().fg(Color::LightBlue);

/// Style for [`COLLISION_SYMBOL`]
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Style for the top high score and the new-high-score notice
pub(crate) const HIGHLIGHT_STYLE: Style = Style::new()
    .fg(Color::LightYellow)
    .add_modifier(Modifier::BOLD);

/// Style for power-up slots that are empty
pub(crate) const DIM_STYLE: Style = Style::new().fg(Color::DarkGray);

/// Number of ticks that each frame of an item's blink animation lasts
pub(crate) const BLINK_TICKS: u32 = 4;

pub(crate) fn power_up_symbol(kind: PowerUpKind) -> char {
    match kind {
        PowerUpKind::TimeSlow => '◷',
        PowerUpKind::Zoom => '⊕',
        PowerUpKind::SpeedBoost => '»',
        PowerUpKind::Shield => '◈',
    }
}
