use crate::logo::Logo;
use crate::theme;
use crate::util::get_display_area;
use powersnake::ScoreRecord;
use ratatui::{
    buffer::Buffer,
    layout::{Flex, Layout, Rect},
    style::Style,
    text::{Line, Span, Text},
    widgets::Widget,
};

/// The title screen: banner, instructions, and the best scores so far
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct MenuScreen<'a> {
    pub(crate) high_scores: &'a [ScoreRecord],
}

static INSTRUCTIONS: &[&str] = &[
    "Steer with ← ↓ ↑ →, h j k l, or a s w d",
    "Eat the food, and grab coins ($) for a bonus round",
    "Use collected power-ups with keys 1-4",
];

impl MenuScreen<'_> {
    const INSTRUCTIONS_HEIGHT: u16 = 3;
    const SCORES_HEIGHT: u16 = theme::MENU_SCORES + 1;

    fn score_lines(&self) -> Vec<Line<'_>> {
        let mut lines = vec![Line::from("HIGH SCORES").centered()];
        if self.high_scores.is_empty() {
            lines.push(Line::from("No scores yet").centered());
        }
        for (i, record) in self
            .high_scores
            .iter()
            .take(usize::from(theme::MENU_SCORES))
            .enumerate()
        {
            let rank = i + 1;
            let score = record.score;
            // Only the date part of the timestamp
            let date = record
                .timestamp
                .split_once(' ')
                .map_or(record.timestamp.as_str(), |(date, _)| date);
            let style = if i == 0 {
                theme::HIGHLIGHT_STYLE
            } else {
                Style::new()
            };
            lines.push(Line::styled(format!("{rank:>2}. {score:>6}   {date}"), style).centered());
        }
        lines
    }
}

impl Widget for MenuScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [logo_area, instructions_area, scores_area, keys_area] = Layout::vertical([
            Logo::HEIGHT,
            Self::INSTRUCTIONS_HEIGHT,
            Self::SCORES_HEIGHT,
            1,
        ])
        .flex(Flex::Start)
        .spacing(1)
        .areas(display);

        let [logo_area] = Layout::horizontal([Logo::WIDTH])
            .flex(Flex::Center)
            .areas(logo_area);
        Logo.render(logo_area, buf);

        Text::from_iter(INSTRUCTIONS.iter().copied())
            .centered()
            .render(instructions_area, buf);
        Text::from(self.score_lines()).render(scores_area, buf);
        Line::from_iter([
            Span::raw("Start ("),
            Span::styled("Space", theme::KEY_STYLE),
            Span::raw(") · Quit ("),
            Span::styled("Esc", theme::KEY_STYLE),
            Span::raw(")"),
        ])
        .centered()
        .render(keys_area, buf);
    }
}
