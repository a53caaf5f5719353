use crate::theme;
use powersnake::{Cell, Pacing};
use ratatui::{
    buffer::Buffer,
    layout::{Flex, Layout, Rect, Size},
    style::Style,
};
use std::time::Duration;

pub(crate) fn get_display_area(buffer_area: Rect) -> Rect {
    center_rect(buffer_area, theme::DISPLAY_SIZE)
}

/// Return a rectangle of the given size centered in `area`, shrunk to fit if
/// `area` is too small
pub(crate) fn center_rect(area: Rect, size: Size) -> Rect {
    let [area] = Layout::horizontal([size.width])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([size.height])
        .flex(Flex::Center)
        .areas(area);
    area
}

/// Time between ticks of a round played at the given pace
pub(crate) fn tick_period(pacing: Pacing) -> Duration {
    Duration::from_secs_f64(1.0 / pacing.effective_rate().max(theme::MIN_TICK_RATE))
}

/// A view of a buffer in which grid cells are addressed relative to the
/// top-left corner of `area`
#[derive(Debug, Eq, PartialEq)]
pub(crate) struct Canvas<'a> {
    pub(crate) area: Rect,
    pub(crate) buf: &'a mut Buffer,
}

impl Canvas<'_> {
    pub(crate) fn draw_cell(&mut self, cell: Cell, symbol: char, style: Style) {
        if cell.x >= self.area.width || cell.y >= self.area.height {
            return;
        }
        let Some(x) = self.area.x.checked_add(cell.x) else {
            return;
        };
        let Some(y) = self.area.y.checked_add(cell.y) else {
            return;
        };
        if let Some(c) = self.buf.cell_mut((x, y)) {
            c.set_char(symbol);
            c.set_style(Style::reset().patch(style));
        }
    }
}

/// The symbols on one row of a buffer, for checking rendered text
#[cfg(test)]
pub(crate) fn row_text(buf: &Buffer, y: u16) -> String {
    (buf.area.left()..buf.area.right())
        .map(|x| buf[(x, y)].symbol())
        .collect()
}
