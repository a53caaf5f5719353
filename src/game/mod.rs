//! The game simulation: one [`GameSession`] owns every piece of state and
//! advances it one tick at a time.
pub mod direction;
pub mod grid;
pub mod items;
pub mod minigame;
pub mod powerups;
pub mod snake;
pub mod spawn;

pub use self::direction::Direction;
pub use self::grid::{Cell, GridWorld};
pub use self::items::{Coin, FieldPowerUp, Food};
pub use self::minigame::MiniGameSession;
pub use self::powerups::{Modifiers, PowerUpKind, PowerUpRegistry, PowerUpStatus};
pub use self::snake::{Collision, Snake};
pub use self::spawn::SpawnPlacer;
use crate::consts;
use crate::highscores::{ScoreRecord, ScoreStore};
use rand::{seq::IteratorRandom, Rng};
use std::collections::HashSet;

/// An instruction from the player
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Command {
    /// Steer the snake
    Move(Direction),

    /// Use a held power-up
    ActivatePowerUp(PowerUpKind),

    /// Abandon the current round and start a new one
    Reset,

    /// Leave the menu and start playing
    Start,

    /// Abandon the current round and go back to the menu
    ToMenu,

    /// Exit the program
    Quit,
}

/// Which screen the session is on
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Phase {
    #[default]
    Menu,
    Playing,
    GameOver,
    /// The player asked to exit; the session accepts no further commands
    Quit,
}

/// Why a round ended
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum GameOverReason {
    /// The snake ran into a wall or itself without a shield
    Collision(Collision),

    /// The snake and items cover the whole board, leaving nowhere to put
    /// the next food
    BoardFilled,
}

/// Something that happened during a tick, for driving sound and visual
/// effects
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum GameEvent {
    FoodEaten { points: u32, special: bool },
    PowerUpSpawned(PowerUpKind),
    PowerUpCollected(PowerUpKind),
    PowerUpActivated(PowerUpKind),
    PowerUpExpired(PowerUpKind),
    CoinSpawned,
    CoinCollected,
    MiniGameCompleted { bonus: u32 },
    ShieldAbsorbed,
    GameOver(GameOverReason),
    NewHighScore,
}

/// How fast the front end should call [`GameSession::tick()`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pacing {
    /// Snake speed, in moves per second
    pub speed: u32,

    /// Multiplier to apply to `speed` while time is slowed
    pub time_slow_factor: f64,
}

impl Pacing {
    /// `speed` scaled by `time_slow_factor`
    pub fn effective_rate(&self) -> f64 {
        f64::from(self.speed) * self.time_slow_factor
    }
}

/// Everything a front end needs to present the game after a tick
#[derive(Clone, Copy, Debug)]
pub struct Snapshot<'a> {
    pub phase: Phase,
    pub grid: GridWorld,
    pub snake: &'a Snake,
    pub food: &'a Food,
    pub coins: &'a [Coin],
    pub field_power_ups: &'a [FieldPowerUp],
    pub power_ups: &'a PowerUpRegistry,
    pub mini_game: &'a MiniGameSession,
    pub score: u32,
    pub high_score: u32,
    pub high_scores: &'a [ScoreRecord],
    pub game_over: Option<GameOverReason>,
    pub new_high_score: bool,
    pub pacing: Pacing,
    pub target_zoom: f64,
    /// Events since the previous tick, oldest first
    pub events: &'a [GameEvent],
    /// Ticks played in the current round
    pub ticks: u64,
}

impl Snapshot<'_> {
    pub fn is_over(&self) -> bool {
        self.game_over.is_some()
    }
}

/// The state of a single round of play
#[derive(Clone, Debug)]
struct Round {
    snake: Snake,
    food: Food,
    field_power_ups: Vec<FieldPowerUp>,
    coins: Vec<Coin>,
    power_ups: PowerUpRegistry,
    mini_game: MiniGameSession,
    modifiers: Modifiers,
    score: u32,
    power_up_timer: u32,
    coin_timer: u32,
    game_over: Option<GameOverReason>,
    new_high_score: bool,
    ticks: u64,
}

impl Round {
    fn new<R: Rng>(rng: &mut R, placer: &SpawnPlacer) -> Round {
        let snake = Snake::new(placer.grid().center(), Direction::Right);
        let occupied = HashSet::from([snake.head()]);
        let cell = placer
            .place_avoiding(rng, &occupied)
            .expect("a grid of two or more cells should have room for the first food");
        let food = Food::new(cell, false);
        Round {
            snake,
            food,
            field_power_ups: Vec::new(),
            coins: Vec::new(),
            power_ups: PowerUpRegistry::new(),
            mini_game: MiniGameSession::new(),
            modifiers: Modifiers::default(),
            score: 0,
            power_up_timer: 0,
            coin_timer: 0,
            game_over: None,
            new_high_score: false,
            ticks: 0,
        }
    }

    /// All cells taken by the snake or an item
    fn occupied(&self) -> HashSet<Cell> {
        let mut occupied = self.snake.body().iter().copied().collect::<HashSet<_>>();
        occupied.insert(self.food.cell());
        occupied.extend(self.coins.iter().map(|c| c.cell));
        occupied.extend(self.field_power_ups.iter().map(|p| p.cell));
        occupied
    }

    /// Recompute the speed from the score, keeping any active speed boost
    fn ramp_speed(&mut self) {
        let ramp = (consts::BASE_SPEED + self.score / consts::SPEED_RAMP_INTERVAL)
            .min(consts::MAX_RAMP_SPEED);
        self.modifiers.speed = ramp;
        if self.power_ups.is_active(PowerUpKind::SpeedBoost) {
            self.modifiers = powerups::apply_effect(PowerUpKind::SpeedBoost, self.modifiers);
        }
    }
}

/// A game from start-up to quitting: the menu, any number of rounds, and
/// the high-score table they feed.
#[derive(Clone, Debug)]
pub struct GameSession<R = rand::rngs::ThreadRng> {
    rng: R,
    placer: SpawnPlacer,
    scores: ScoreStore,
    phase: Phase,
    round: Round,
    events: Vec<GameEvent>,
    /// Number of entries at the front of `events` already reported by a
    /// previous tick
    reported: usize,
}

impl GameSession<rand::rngs::ThreadRng> {
    pub fn new(scores: ScoreStore) -> Self {
        GameSession::with_rng(scores, rand::rng())
    }
}

impl<R: Rng> GameSession<R> {
    /// Create a session on the standard grid, drawing all randomness from
    /// `rng`
    pub fn with_rng(scores: ScoreStore, rng: R) -> GameSession<R> {
        GameSession::with_grid(GridWorld::default(), scores, rng)
    }

    /// Create a session on a custom grid.
    ///
    /// # Panics
    ///
    /// Panics if the grid has fewer than two cells.
    pub fn with_grid(grid: GridWorld, scores: ScoreStore, mut rng: R) -> GameSession<R> {
        assert!(
            grid.cell_count() >= 2,
            "grid must have room for both the snake and the food"
        );
        let placer = SpawnPlacer::new(grid);
        let round = Round::new(&mut rng, &placer);
        GameSession {
            rng,
            placer,
            scores,
            phase: Phase::Menu,
            round,
            events: Vec::new(),
            reported: 0,
        }
    }

    /// Carry out a player command.  Commands that make no sense in the
    /// current phase are ignored.  Returns whether the command had any
    /// effect.
    pub fn apply_command(&mut self, cmd: Command) -> bool {
        match (self.phase, cmd) {
            (Phase::Quit, _) => false,
            (_, Command::Quit) => {
                self.phase = Phase::Quit;
                true
            }
            (Phase::Menu, Command::Start)
            | (Phase::Playing | Phase::GameOver, Command::Reset) => {
                self.new_round();
                self.phase = Phase::Playing;
                true
            }
            (Phase::Playing | Phase::GameOver, Command::ToMenu) => {
                self.new_round();
                self.phase = Phase::Menu;
                true
            }
            (Phase::Playing, Command::Move(direction)) => {
                self.round.snake.change_direction(direction)
            }
            (Phase::Playing, Command::ActivatePowerUp(kind)) => {
                let activated = self
                    .round
                    .power_ups
                    .activate(kind, &mut self.round.modifiers);
                if activated {
                    log::debug!("{kind} activated");
                    self.events.push(GameEvent::PowerUpActivated(kind));
                }
                activated
            }
            _ => false,
        }
    }

    /// Advance the simulation by one step if a round is in play, and return
    /// the resulting state.  Outside of play this changes nothing.
    pub fn tick(&mut self) -> Snapshot<'_> {
        let _ = self.events.drain(..self.reported);
        if self.phase == Phase::Playing {
            self.step();
        }
        self.reported = self.events.len();
        self.snapshot()
    }

    fn new_round(&mut self) {
        self.round = Round::new(&mut self.rng, &self.placer);
        self.events.clear();
        self.reported = 0;
    }

    fn step(&mut self) {
        let start_score = self.round.score;
        self.round.ticks += 1;

        for kind in self.round.power_ups.tick(&mut self.round.modifiers) {
            log::debug!("{kind} expired");
            self.events.push(GameEvent::PowerUpExpired(kind));
        }

        self.spawn_power_up();
        self.spawn_coin();
        self.round.food.tick();
        self.round.coins.iter_mut().for_each(Coin::tick);
        self.round
            .field_power_ups
            .iter_mut()
            .for_each(FieldPowerUp::tick);

        let mut ending = None;
        match self.round.snake.advance(self.placer.grid()) {
            Ok(()) => ending = self.resolve_pickups(),
            Err(_) if self.round.power_ups.is_active(PowerUpKind::Shield) => {
                self.events.push(GameEvent::ShieldAbsorbed);
            }
            Err(collision) => ending = Some(GameOverReason::Collision(collision)),
        }

        if self.round.mini_game.tick() {
            let bonus = self.round.mini_game.completion_bonus();
            log::debug!(
                "Mini-game finished with {} points; awarding {bonus}",
                self.round.mini_game.bonus_score()
            );
            self.round.score += bonus;
            self.events.push(GameEvent::MiniGameCompleted { bonus });
        }

        if self.round.score / consts::SPEED_RAMP_INTERVAL
            != start_score / consts::SPEED_RAMP_INTERVAL
        {
            self.round.ramp_speed();
        }

        if let Some(reason) = ending {
            self.finish(reason);
        }
    }

    fn spawn_power_up(&mut self) {
        self.round.power_up_timer += 1;
        if self.round.power_up_timer < consts::POWER_UP_SPAWN_INTERVAL
            || self.round.field_power_ups.len() >= consts::MAX_FIELD_POWER_UPS
        {
            return;
        }
        self.round.power_up_timer = 0;
        let Some(kind) = PowerUpKind::iter().choose(&mut self.rng) else {
            return;
        };
        let occupied = self.round.occupied();
        if let Some(cell) = self.placer.place_avoiding(&mut self.rng, &occupied) {
            log::debug!("Spawned {kind} power-up at {cell}");
            self.round
                .field_power_ups
                .push(FieldPowerUp::new(cell, kind));
            self.events.push(GameEvent::PowerUpSpawned(kind));
        }
    }

    fn spawn_coin(&mut self) {
        self.round.coin_timer += 1;
        if self.round.coin_timer < consts::COIN_SPAWN_INTERVAL {
            return;
        }
        self.round.coin_timer = 0;
        let occupied = self.round.occupied();
        if let Some(cell) = self.placer.place_avoiding(&mut self.rng, &occupied) {
            log::debug!("Spawned coin at {cell}");
            self.round.coins.push(Coin::new(cell));
            self.events.push(GameEvent::CoinSpawned);
        }
    }

    /// Handle whatever is under the snake's head after a move.  Returns
    /// `Some` if the round can't go on.
    fn resolve_pickups(&mut self) -> Option<GameOverReason> {
        let head = self.round.snake.head();

        if let Some(i) = self.round.coins.iter().position(|c| c.cell == head) {
            let _ = self.round.coins.remove(i);
            log::debug!("Coin collected; starting mini-game");
            self.round.mini_game.start();
            self.events.push(GameEvent::CoinCollected);
        }

        if let Some(i) = self
            .round
            .field_power_ups
            .iter()
            .position(|p| p.cell == head)
        {
            let kind = self.round.field_power_ups.remove(i).kind;
            log::debug!("{kind} collected; activate with {}", kind.slot());
            self.round.power_ups.collect(kind);
            self.events.push(GameEvent::PowerUpCollected(kind));
        }

        if self.round.food.cell() == head {
            self.round.snake.mark_growth();
            let special = self.round.food.is_special();
            let mut points = self.round.food.points();
            if self.round.mini_game.is_active() {
                points *= consts::MINI_GAME_MULTIPLIER;
                self.round.mini_game.add_bonus(points);
            }
            self.round.score += points;
            self.events.push(GameEvent::FoodEaten { points, special });
            let occupied = self.round.occupied();
            if !self
                .round
                .food
                .respawn(&mut self.rng, &self.placer, &occupied, false)
            {
                return Some(GameOverReason::BoardFilled);
            }
        }

        None
    }

    fn finish(&mut self, reason: GameOverReason) {
        log::debug!(
            "Game over ({reason:?}) with score {} after {} ticks",
            self.round.score,
            self.round.ticks
        );
        self.round.game_over = Some(reason);
        self.phase = Phase::GameOver;
        self.events.push(GameEvent::GameOver(reason));
        if self.round.score > 0 {
            self.round.new_high_score = self.scores.submit(self.round.score);
            if self.round.new_high_score {
                self.events.push(GameEvent::NewHighScore);
            }
        }
    }
}

impl<R> GameSession<R> {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn quitting(&self) -> bool {
        self.phase == Phase::Quit
    }

    pub fn score(&self) -> u32 {
        self.round.score
    }

    pub fn pacing(&self) -> Pacing {
        Pacing {
            speed: self.round.modifiers.speed,
            time_slow_factor: self.round.modifiers.time_slow_factor,
        }
    }

    pub fn scores(&self) -> &ScoreStore {
        &self.scores
    }

    /// The current state, as last returned by [`GameSession::tick()`]
    pub fn snapshot(&self) -> Snapshot<'_> {
        let round = &self.round;
        Snapshot {
            phase: self.phase,
            grid: self.placer.grid(),
            snake: &round.snake,
            food: &round.food,
            coins: &round.coins,
            field_power_ups: &round.field_power_ups,
            power_ups: &round.power_ups,
            mini_game: &round.mini_game,
            score: round.score,
            high_score: self.scores.high_score(),
            high_scores: self.scores.records(),
            game_over: round.game_over,
            new_high_score: round.new_high_score,
            pacing: self.pacing(),
            target_zoom: round.modifiers.target_zoom,
            events: &self.events,
            ticks: round.ticks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use rstest::rstest;
    use std::collections::VecDeque;

    const WALL: GameOverReason = GameOverReason::Collision(Collision::Wall);

    fn session() -> GameSession<ChaCha12Rng> {
        GameSession::with_rng(
            ScoreStore::in_memory(),
            ChaCha12Rng::seed_from_u64(0x0123456789ABCDEF),
        )
    }

    /// A session in play with the food parked in a corner, out of the way
    fn playing() -> GameSession<ChaCha12Rng> {
        let mut game = session();
        assert!(game.apply_command(Command::Start));
        game.round.food = Food::new(Cell::new(0, 0), false);
        game
    }

    fn clockwise(direction: Direction) -> Direction {
        match direction {
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
            Direction::Up => Direction::Right,
        }
    }

    /// Steer the snake around a two-by-two square for `ticks` ticks
    fn circle(game: &mut GameSession<ChaCha12Rng>, ticks: usize) {
        for _ in 0..ticks {
            let turn = clockwise(game.round.snake.direction());
            assert!(game.apply_command(Command::Move(turn)));
            assert!(!game.tick().is_over());
        }
    }

    #[test]
    fn menu_ignores_play_commands() {
        let mut game = session();
        assert_eq!(game.phase(), Phase::Menu);
        assert!(!game.apply_command(Command::Move(Direction::Up)));
        assert!(!game.apply_command(Command::ActivatePowerUp(PowerUpKind::Shield)));
        assert!(!game.apply_command(Command::Reset));
        assert!(!game.apply_command(Command::ToMenu));
        let snap = game.tick();
        assert_eq!(snap.phase, Phase::Menu);
        assert_eq!(snap.ticks, 0);
        assert_eq!(snap.snake.head(), Cell::new(10, 10));
        assert!(snap.events.is_empty());
    }

    #[test]
    fn new_round_layout() {
        let game = playing();
        let snap = game.snapshot();
        assert_eq!(snap.phase, Phase::Playing);
        assert_eq!(snap.snake.body(), &VecDeque::from([Cell::new(10, 10)]));
        assert_eq!(snap.snake.direction(), Direction::Right);
        assert_eq!(snap.score, 0);
        assert_eq!(
            snap.pacing,
            Pacing {
                speed: 3,
                time_slow_factor: 1.0
            }
        );
        assert!(snap.coins.is_empty());
        assert!(snap.field_power_ups.is_empty());
        assert!(!snap.mini_game.is_active());
    }

    #[test]
    fn reverse_move_ignored() {
        let mut game = playing();
        assert!(!game.apply_command(Command::Move(Direction::Left)));
        assert_eq!(game.round.snake.direction(), Direction::Right);
        assert!(game.apply_command(Command::Move(Direction::Up)));
        assert_eq!(game.tick().snake.head(), Cell::new(10, 9));
    }

    #[test]
    fn opening_food_is_never_special() {
        let mut game = session();
        assert!(game.apply_command(Command::Start));
        for _ in 0..500 {
            let snap = game.snapshot();
            assert!(!snap.food.is_special());
            assert_ne!(snap.food.cell(), snap.snake.head());
            assert!(game.apply_command(Command::Reset));
        }
    }

    #[test]
    fn wall_after_crossing_grid() {
        let mut game = playing();
        game.round.snake = Snake::new(Cell::new(0, 10), Direction::Right);
        for _ in 0..19 {
            assert!(!game.tick().is_over());
        }
        let snap = game.tick();
        assert_eq!(snap.phase, Phase::GameOver);
        assert_eq!(snap.game_over, Some(WALL));
        assert_eq!(snap.snake.head(), Cell::new(19, 10));
        assert_eq!(snap.events, [GameEvent::GameOver(WALL)]);
        assert!(!snap.new_high_score);
        assert!(snap.high_scores.is_empty());
    }

    #[test]
    fn wall_from_center() {
        let mut game = playing();
        for _ in 0..9 {
            assert!(!game.tick().is_over());
        }
        let snap = game.tick();
        assert_eq!(snap.game_over, Some(WALL));
        assert_eq!(snap.ticks, 10);
    }

    #[test]
    fn game_over_records_score() {
        let mut game = playing();
        game.round.snake = Snake::new(Cell::new(19, 10), Direction::Right);
        game.round.score = 30;
        let snap = game.tick();
        assert!(snap.new_high_score);
        assert_eq!(snap.high_score, 30);
        assert_eq!(snap.high_scores.len(), 1);
        assert_eq!(
            snap.events,
            [GameEvent::GameOver(WALL), GameEvent::NewHighScore]
        );
    }

    #[test]
    fn tying_the_best_score_is_not_a_high_score() {
        let mut game = playing();
        let _ = game.scores.submit_at(30, "2024-01-01 00:00:00".into());
        game.round.snake = Snake::new(Cell::new(19, 10), Direction::Right);
        game.round.score = 30;
        let snap = game.tick();
        assert!(!snap.new_high_score);
        assert_eq!(snap.events, [GameEvent::GameOver(WALL)]);
        assert_eq!(snap.high_scores[0].timestamp, "2024-01-01 00:00:00");
        assert_eq!(snap.high_scores.len(), 2);
    }

    #[test]
    fn lower_score_is_not_a_high_score() {
        let mut game = playing();
        let _ = game.scores.submit_at(100, "2024-01-01 00:00:00".into());
        game.round.snake = Snake::new(Cell::new(19, 10), Direction::Right);
        game.round.score = 30;
        let snap = game.tick();
        assert!(!snap.new_high_score);
        assert_eq!(snap.high_score, 100);
        assert_eq!(
            snap.high_scores
                .iter()
                .map(|r| r.score)
                .collect::<Vec<_>>(),
            [100, 30]
        );
    }

    #[rstest]
    #[case(false, 10)]
    #[case(true, 25)]
    fn eating_food(#[case] special: bool, #[case] points: u32) {
        let mut game = playing();
        game.round.food = Food::new(Cell::new(11, 10), special);
        let snap = game.tick();
        assert_eq!(snap.score, points);
        assert_eq!(snap.events, [GameEvent::FoodEaten { points, special }]);
        assert_eq!(snap.snake.len(), 1);
        assert!(snap.snake.growth_pending());
        assert!(!snap.snake.occupies(snap.food.cell()));
        let snap = game.tick();
        assert_eq!(snap.snake.len(), 2);
    }

    #[test]
    fn collecting_field_power_up() {
        let mut game = playing();
        game.round
            .field_power_ups
            .push(FieldPowerUp::new(Cell::new(11, 10), PowerUpKind::Zoom));
        let snap = game.tick();
        assert_eq!(snap.events, [GameEvent::PowerUpCollected(PowerUpKind::Zoom)]);
        assert!(snap.field_power_ups.is_empty());
        assert_eq!(
            snap.power_ups.status(PowerUpKind::Zoom),
            PowerUpStatus::Collected
        );
    }

    #[test]
    fn activating_power_ups() {
        let mut game = playing();
        assert!(!game.apply_command(Command::ActivatePowerUp(PowerUpKind::TimeSlow)));
        for kind in PowerUpKind::iter() {
            game.round.power_ups.collect(kind);
        }
        assert!(game.apply_command(Command::ActivatePowerUp(PowerUpKind::TimeSlow)));
        assert!(game.apply_command(Command::ActivatePowerUp(PowerUpKind::SpeedBoost)));
        assert!(!game.apply_command(Command::ActivatePowerUp(PowerUpKind::TimeSlow)));
        assert_eq!(
            game.pacing(),
            Pacing {
                speed: 5,
                time_slow_factor: 0.5
            }
        );
        let snap = game.tick();
        assert_eq!(
            snap.events,
            [
                GameEvent::PowerUpActivated(PowerUpKind::TimeSlow),
                GameEvent::PowerUpActivated(PowerUpKind::SpeedBoost),
            ]
        );
        assert!(snap.power_ups.is_collected(PowerUpKind::Zoom));
        assert!(snap.power_ups.is_active(PowerUpKind::TimeSlow));
    }

    #[test]
    fn shield_absorbs_until_expiry() {
        let mut game = playing();
        game.round.snake = Snake::new(Cell::new(19, 10), Direction::Right);
        game.round.power_ups.collect(PowerUpKind::Shield);
        assert!(game.apply_command(Command::ActivatePowerUp(PowerUpKind::Shield)));
        let snap = game.tick();
        assert_eq!(
            snap.events,
            [
                GameEvent::PowerUpActivated(PowerUpKind::Shield),
                GameEvent::ShieldAbsorbed,
            ]
        );
        for _ in 1..299 {
            let snap = game.tick();
            assert_eq!(snap.events, [GameEvent::ShieldAbsorbed]);
            assert_eq!(snap.snake.head(), Cell::new(19, 10));
        }
        assert_eq!(game.round.power_ups.remaining(PowerUpKind::Shield), Some(1));
        let snap = game.tick();
        assert_eq!(
            snap.events,
            [
                GameEvent::PowerUpExpired(PowerUpKind::Shield),
                GameEvent::GameOver(WALL),
            ]
        );
        assert_eq!(snap.ticks, 300);
    }

    #[test]
    fn mini_game_doubles_food_and_awards_bonus() {
        let mut game = playing();
        game.round.coins.push(Coin::new(Cell::new(11, 10)));
        game.round.food = Food::new(Cell::new(12, 10), true);
        let snap = game.tick();
        assert_eq!(snap.events, [GameEvent::CoinCollected]);
        assert!(snap.coins.is_empty());
        assert!(snap.mini_game.is_active());
        let snap = game.tick();
        assert_eq!(
            snap.events,
            [GameEvent::FoodEaten {
                points: 50,
                special: true
            }]
        );
        assert_eq!(snap.score, 50);
        assert_eq!(snap.mini_game.bonus_score(), 50);
        assert_eq!(snap.pacing.speed, 4);
        game.round.food = Food::new(Cell::new(0, 0), false);
        circle(&mut game, 177);
        assert!(game.round.mini_game.is_active());
        let turn = clockwise(game.round.snake.direction());
        assert!(game.apply_command(Command::Move(turn)));
        let snap = game.tick();
        assert_eq!(snap.events, [GameEvent::MiniGameCompleted { bonus: 50 }]);
        assert!(!snap.mini_game.is_active());
        assert_eq!(snap.score, 100);
        assert_eq!(snap.pacing.speed, 5);
    }

    #[test]
    fn mini_game_below_target_awards_nothing() {
        let mut game = playing();
        game.round.coins.push(Coin::new(Cell::new(11, 10)));
        assert!(game.tick().mini_game.is_active());
        circle(&mut game, 178);
        assert!(game.round.mini_game.is_active());
        let turn = clockwise(game.round.snake.direction());
        assert!(game.apply_command(Command::Move(turn)));
        let snap = game.tick();
        assert_eq!(snap.events, [GameEvent::MiniGameCompleted { bonus: 0 }]);
        assert_eq!(snap.score, 0);
    }

    #[rstest]
    #[case(0, 3)]
    #[case(40, 4)]
    #[case(90, 5)]
    #[case(290, 6)]
    fn speed_ramps_on_crossing(#[case] start: u32, #[case] speed: u32) {
        let mut game = playing();
        game.round.score = start;
        game.round.food = Food::new(Cell::new(11, 10), false);
        assert_eq!(game.tick().pacing.speed, speed);
    }

    #[test]
    fn speed_ramp_keeps_boost() {
        let mut game = playing();
        game.round.power_ups.collect(PowerUpKind::SpeedBoost);
        assert!(game.apply_command(Command::ActivatePowerUp(PowerUpKind::SpeedBoost)));
        assert_eq!(game.pacing().speed, 5);
        game.round.score = 40;
        game.round.food = Food::new(Cell::new(11, 10), false);
        let snap = game.tick();
        assert_eq!(snap.score, 50);
        assert_eq!(snap.pacing.speed, 6);
    }

    #[test]
    fn power_ups_spawn_up_to_cap() {
        let mut game = playing();
        for expected in [1, 2] {
            game.round.power_up_timer = consts::POWER_UP_SPAWN_INTERVAL - 1;
            game.spawn_power_up();
            assert_eq!(game.round.power_up_timer, 0);
            assert_eq!(game.round.field_power_ups.len(), expected);
        }
        game.round.power_up_timer = consts::POWER_UP_SPAWN_INTERVAL - 1;
        game.spawn_power_up();
        assert_eq!(game.round.field_power_ups.len(), 2);
        assert_eq!(
            game.round.power_up_timer,
            consts::POWER_UP_SPAWN_INTERVAL
        );
        let &[a, b] = game.round.field_power_ups.as_slice() else {
            panic!("expected exactly two power-ups on the field");
        };
        assert_ne!(a.cell, b.cell);
        for p in [a, b] {
            assert!(!game.round.snake.occupies(p.cell));
            assert_ne!(p.cell, game.round.food.cell());
        }
        assert_eq!(game.events.len(), 2);
        assert!(game
            .events
            .iter()
            .all(|ev| matches!(ev, GameEvent::PowerUpSpawned(_))));
    }

    #[test]
    fn power_up_timer_counts_ticks() {
        let mut game = playing();
        // Park the snake against a wall so it can't pick anything up
        game.round.snake = Snake::new(Cell::new(19, 10), Direction::Right);
        game.round.power_ups.collect(PowerUpKind::Shield);
        assert!(game.apply_command(Command::ActivatePowerUp(PowerUpKind::Shield)));
        game.round.power_up_timer = consts::POWER_UP_SPAWN_INTERVAL - 2;
        assert!(game.tick().field_power_ups.is_empty());
        let snap = game.tick();
        assert_eq!(snap.field_power_ups.len(), 1);
        assert!(matches!(
            snap.events,
            [GameEvent::PowerUpSpawned(_), GameEvent::ShieldAbsorbed]
        ));
    }

    #[test]
    fn coins_spawn_on_interval() {
        let mut game = playing();
        for expected in [1, 2, 3] {
            game.round.coin_timer = consts::COIN_SPAWN_INTERVAL - 1;
            game.spawn_coin();
            assert_eq!(game.round.coin_timer, 0);
            assert_eq!(game.round.coins.len(), expected);
        }
        let cells = game.round.coins.iter().map(|c| c.cell).collect::<HashSet<_>>();
        assert_eq!(cells.len(), 3);
        assert!(!cells.contains(&game.round.snake.head()));
        assert!(!cells.contains(&game.round.food.cell()));
        assert_eq!(game.events, [GameEvent::CoinSpawned; 3]);
    }

    #[test]
    fn full_board_ends_round() {
        let mut game = GameSession::with_grid(
            GridWorld::new(2, 1),
            ScoreStore::in_memory(),
            ChaCha12Rng::seed_from_u64(0x0123456789ABCDEF),
        );
        assert!(game.apply_command(Command::Start));
        game.round.snake = Snake {
            body: VecDeque::from([Cell::new(0, 0)]),
            direction: Direction::Right,
            grow_pending: true,
        };
        game.round.food = Food::new(Cell::new(1, 0), false);
        let snap = game.tick();
        assert_eq!(snap.game_over, Some(GameOverReason::BoardFilled));
        assert_eq!(snap.snake.len(), 2);
        assert_eq!(
            snap.events,
            [
                GameEvent::FoodEaten {
                    points: 10,
                    special: false
                },
                GameEvent::GameOver(GameOverReason::BoardFilled),
                GameEvent::NewHighScore,
            ]
        );
    }

    #[test]
    fn phase_transitions() {
        let mut game = playing();
        game.round.snake = Snake::new(Cell::new(19, 10), Direction::Right);
        game.round.score = 20;
        assert!(game.tick().is_over());
        assert_eq!(game.phase(), Phase::GameOver);
        assert!(!game.apply_command(Command::Move(Direction::Up)));
        assert!(!game.apply_command(Command::Start));
        assert_eq!(game.tick().ticks, 1);

        assert!(game.apply_command(Command::Reset));
        let snap = game.snapshot();
        assert_eq!(snap.phase, Phase::Playing);
        assert_eq!(snap.score, 0);
        assert_eq!(snap.game_over, None);
        assert_eq!(snap.snake.head(), Cell::new(10, 10));
        assert!(snap.events.is_empty());
        assert_eq!(snap.high_score, 20);

        assert!(game.apply_command(Command::ToMenu));
        assert_eq!(game.phase(), Phase::Menu);
        assert!(!game.apply_command(Command::Reset));
        assert!(game.apply_command(Command::Quit));
        assert!(game.quitting());
        assert!(!game.apply_command(Command::Start));
        assert!(!game.apply_command(Command::Quit));
    }

    #[test]
    fn random_play_keeps_board_consistent() {
        let mut game = session();
        let mut player = ChaCha12Rng::seed_from_u64(0xFEDCBA9876543210);
        let directions = [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ];
        assert!(game.apply_command(Command::Start));
        for _ in 0..5000 {
            if player.random_bool(0.3) {
                let d = directions[player.random_range(0..directions.len())];
                let _ = game.apply_command(Command::Move(d));
            }
            if player.random_bool(0.01) {
                if let Some(kind) = PowerUpKind::iter().choose(&mut player) {
                    let _ = game.apply_command(Command::ActivatePowerUp(kind));
                }
            }
            let snap = game.tick();
            let body = snap.snake.body().iter().copied().collect::<HashSet<_>>();
            assert_eq!(body.len(), snap.snake.len());
            assert!(body.iter().all(|&c| snap.grid.contains(c)));
            assert!((consts::BASE_SPEED..=consts::MAX_BOOSTED_SPEED).contains(&snap.pacing.speed));
            assert!(snap.field_power_ups.len() <= consts::MAX_FIELD_POWER_UPS);
            if snap.is_over() {
                assert!(game.apply_command(Command::Reset));
            } else {
                assert!(!body.contains(&snap.food.cell()));
                assert!(snap.coins.iter().all(|c| !body.contains(&c.cell)));
                assert!(snap.field_power_ups.iter().all(|p| !body.contains(&p.cell)));
            }
        }
    }
}
