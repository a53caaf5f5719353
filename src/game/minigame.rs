use crate::consts;

/// A timed bonus round started by picking up a coin.  While it runs, food is
/// worth more and those points are tallied towards a target; reaching the
/// target earns a one-time completion bonus.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct MiniGameSession {
    active: bool,
    elapsed: u32,
    duration: u32,
    bonus_score: u32,
    target: u32,
}

impl MiniGameSession {
    pub fn new() -> MiniGameSession {
        MiniGameSession {
            active: false,
            elapsed: 0,
            duration: consts::MINI_GAME_DURATION,
            bonus_score: 0,
            target: consts::MINI_GAME_TARGET,
        }
    }

    /// Begin a new mini-game, abandoning any one already in progress
    pub fn start(&mut self) {
        self.active = true;
        self.elapsed = 0;
        self.bonus_score = 0;
    }

    /// Advance the mini-game by one tick.  Returns `true` if this tick
    /// finished it.
    pub fn tick(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.elapsed += 1;
        if self.elapsed >= self.duration {
            self.active = false;
            true
        } else {
            false
        }
    }

    /// Credit points scored during the mini-game.  Ignored when inactive.
    pub fn add_bonus(&mut self, points: u32) {
        if self.active {
            self.bonus_score += points;
        }
    }

    /// The points to award for a mini-game that has just finished
    pub fn completion_bonus(&self) -> u32 {
        if self.bonus_score >= self.target {
            consts::MINI_GAME_COMPLETION_BONUS
        } else {
            0
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    /// Ticks left before the mini-game ends, or 0 if none is running
    pub fn remaining(&self) -> u32 {
        if self.active {
            self.duration.saturating_sub(self.elapsed)
        } else {
            0
        }
    }

    pub fn bonus_score(&self) -> u32 {
        self.bonus_score
    }

    pub fn target(&self) -> u32 {
        self.target
    }
}

impl Default for MiniGameSession {
    fn default() -> MiniGameSession {
        MiniGameSession::new()
    }
}
