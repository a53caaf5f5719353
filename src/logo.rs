use crate::theme;
use ratatui::{
    buffer::Buffer,
    layout::{Offset, Rect},
    text::Text,
    widgets::Widget,
};

/// The title banner on the menu screen
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Logo;

impl Logo {
    const POWER_WIDTH: u16 = 29;
    const SNAKE_WIDTH: u16 = 28;
    pub(crate) const HEIGHT: u16 = 5;
    pub(crate) const WIDTH: u16 = Self::POWER_WIDTH + Self::SNAKE_WIDTH;
}

#[rustfmt::skip]
static POWER: &[&str] = &[
     " ____                        ",
    r"|  _ \ _____      _____ _ __ ",
    r"| |_) / _ \ \ /\ / / _ \ '__|",
    r"|  __/ (_) \ V  V /  __/ |   ",
    r"|_|   \___/ \_/\_/ \___|_|   ",
];

#[rustfmt::skip]
static SNAKE: &[&str] = &[
     " ____              _        ",
     "/ ___| _ __   __ _| | _____ ",
    r"\___ \| '_ \ / _` | |/ / _ \",
     " ___) | | | | (_| |   <  __/",
    r"|____/|_| |_|\__,_|_|\_\___|",
];

impl Widget for Logo {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Text::from_iter(POWER.iter().copied())
            .style(theme::COIN_STYLE)
            .render(area, buf);
        let snake_area = area
            .offset(Offset {
                x: Self::POWER_WIDTH.into(),
                y: 0,
            })
            .intersection(area);
        Text::from_iter(SNAKE.iter().copied())
            .style(theme::SNAKE_STYLE)
            .render(snake_area, buf);
    }
}
