use crate::theme;
use crate::util::{get_display_area, tick_period, Canvas};
use powersnake::game::{PowerUpStatus, Snake};
use powersnake::{Direction, GameOverReason, Phase, PowerUpKind, Snapshot};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Rect},
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Widget},
};
use std::time::Duration;

/// The board, the sidebar, and a message line: shown while playing and
/// after the round ends
#[derive(Clone, Copy, Debug)]
pub(crate) struct PlayScreen<'a> {
    pub(crate) snapshot: Snapshot<'a>,
}

impl PlayScreen<'_> {
    fn snake_style(&self) -> Style {
        if self.snapshot.power_ups.is_active(PowerUpKind::Shield) {
            theme::SHIELDED_SNAKE_STYLE
        } else {
            theme::SNAKE_STYLE
        }
    }

    fn render_board(&self, area: Rect, buf: &mut Buffer) {
        let snap = &self.snapshot;
        let mut block = Block::bordered();
        if snap.power_ups.is_active(PowerUpKind::Zoom) {
            block = block.border_type(BorderType::Double);
        }
        block.render(area, buf);

        let mut board = Canvas {
            area: area.inner(Margin::new(1, 1)),
            buf,
        };
        for coin in snap.coins {
            let style = blink(coin.age, theme::COIN_STYLE, theme::FOOD_STYLE);
            board.draw_cell(coin.cell, theme::COIN_SYMBOL, style);
        }
        for p in snap.field_power_ups {
            board.draw_cell(p.cell, theme::power_up_symbol(p.kind), theme::POWER_UP_STYLE);
        }
        let food = snap.food;
        if food.is_special() {
            let style = blink(food.age(), theme::SPECIAL_FOOD_STYLE, theme::FOOD_STYLE);
            board.draw_cell(food.cell(), theme::SPECIAL_FOOD_SYMBOL, style);
        } else {
            board.draw_cell(food.cell(), theme::FOOD_SYMBOL, theme::FOOD_STYLE);
        }
        let snake_style = self.snake_style();
        for &cell in snap.snake.body().iter().skip(1) {
            board.draw_cell(cell, theme::SNAKE_BODY_SYMBOL, snake_style);
        }
        // Draw the head last so that, if it's a collision, we overwrite
        // whatever it's colliding with
        if let Some(GameOverReason::Collision(_)) = snap.game_over {
            board.draw_cell(
                snap.snake.head(),
                theme::COLLISION_SYMBOL,
                theme::COLLISION_STYLE,
            );
        } else {
            board.draw_cell(snap.snake.head(), head_symbol(snap.snake), snake_style);
        }
    }

    fn sidebar(&self) -> Text<'static> {
        let snap = &self.snapshot;
        let period = tick_period(snap.pacing);
        let mut speed = snap.pacing.speed.to_string();
        if snap.power_ups.is_active(PowerUpKind::TimeSlow) {
            speed.push_str(" (slowed)");
        }
        let mut lines = vec![
            Line::from(format!("Score       {}", snap.score)),
            Line::from(format!("High Score  {}", snap.high_score.max(snap.score))),
            Line::from(format!("Speed       {speed}")),
            Line::default(),
            Line::from("Power-Ups"),
        ];
        lines.extend(
            snap.power_ups
                .iter()
                .map(|(kind, status)| power_up_line(kind, status, period)),
        );
        lines.push(Line::default());
        let mini_game = snap.mini_game;
        if mini_game.is_active() {
            lines.push(Line::styled("BONUS ROUND", theme::COIN_STYLE));
            lines.push(Line::from(format!(
                "{} left, {}/{} points",
                seconds(period, mini_game.remaining()),
                mini_game.bonus_score(),
                mini_game.target()
            )));
        }
        if snap.phase == Phase::GameOver && snap.new_high_score {
            lines.push(Line::styled("NEW HIGH SCORE!", theme::HIGHLIGHT_STYLE));
        }
        Text::from(lines)
    }

    fn message(&self) -> Line<'static> {
        if self.snapshot.phase == Phase::GameOver {
            let msg = match self.snapshot.game_over {
                Some(GameOverReason::BoardFilled) => " BOARD FILLED · ",
                _ => " GAME OVER · ",
            };
            Line::from_iter([
                Span::raw(msg),
                Span::raw("Restart ("),
                Span::styled("r", theme::KEY_STYLE),
                Span::raw(") · Menu ("),
                Span::styled("Space", theme::KEY_STYLE),
                Span::raw(") · Quit ("),
                Span::styled("q", theme::KEY_STYLE),
                Span::raw(")"),
            ])
        } else {
            Line::from_iter([
                Span::raw(" Power-ups ("),
                Span::styled("1-4", theme::KEY_STYLE),
                Span::raw(") · Restart ("),
                Span::styled("r", theme::KEY_STYLE),
                Span::raw(") · Menu ("),
                Span::styled("Esc", theme::KEY_STYLE),
                Span::raw(")"),
            ])
        }
    }
}

impl Widget for PlayScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [score_area, main_area, msg_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(display);
        Line::styled(
            format!(" Score: {}", self.snapshot.score),
            theme::SCORE_BAR_STYLE,
        )
        .render(score_area, buf);

        let grid = self.snapshot.grid;
        let [_, board_area, _, sidebar_area] = Layout::horizontal([
            Constraint::Length(1),
            Constraint::Length(grid.width().saturating_add(2)),
            Constraint::Length(2),
            Constraint::Fill(1),
        ])
        .areas(main_area);
        let board_area = Rect {
            height: grid.height().saturating_add(2),
            ..board_area
        }
        .intersection(main_area);
        self.render_board(board_area, buf);
        self.sidebar().render(sidebar_area, buf);
        self.message().render(msg_area, buf);
    }
}

fn head_symbol(snake: &Snake) -> char {
    match snake.direction() {
        Direction::Up => theme::SNAKE_HEAD_NORTH_SYMBOL,
        Direction::Down => theme::SNAKE_HEAD_SOUTH_SYMBOL,
        Direction::Left => theme::SNAKE_HEAD_WEST_SYMBOL,
        Direction::Right => theme::SNAKE_HEAD_EAST_SYMBOL,
    }
}

/// Pick one of two styles based on how many ticks an item has been around
fn blink(age: u32, on: Style, off: Style) -> Style {
    if (age / theme::BLINK_TICKS) % 2 == 0 {
        on
    } else {
        off
    }
}

/// Format the time that `ticks` ticks take, rounded up to whole seconds
fn seconds(period: Duration, ticks: u32) -> String {
    let millis = period.saturating_mul(ticks).as_millis();
    format!("{}s", millis.div_ceil(1000))
}

fn power_up_line(kind: PowerUpKind, status: PowerUpStatus, period: Duration) -> Line<'static> {
    let (status, style) = match status {
        PowerUpStatus::Absent => (String::from("-"), theme::DIM_STYLE),
        PowerUpStatus::Collected => (String::from("ready"), theme::KEY_STYLE),
        PowerUpStatus::Active { remaining } => {
            (seconds(period, remaining), theme::HIGHLIGHT_STYLE)
        }
    };
    Line::from_iter([
        Span::styled(format!("{} ", kind.slot()), theme::KEY_STYLE),
        Span::styled(
            format!("{} {kind:<12} ", theme::power_up_symbol(kind)),
            style,
        ),
        Span::styled(status, style),
    ])
}
