use crate::consts;
use enum_map::{Enum, EnumMap};
use std::fmt;

/// The kinds of power-up
#[derive(Clone, Copy, Debug, Enum, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum PowerUpKind {
    /// Halves the tick rate
    TimeSlow,
    /// Asks the renderer to zoom in
    Zoom,
    /// Raises the speed
    SpeedBoost,
    /// Survive collisions
    Shield,
}

impl PowerUpKind {
    /// Iterate over all kinds in slot order
    pub fn iter() -> impl Iterator<Item = PowerUpKind> {
        (0..Self::LENGTH).map(Self::from_usize)
    }

    /// The activation slot (1 through 4) for this kind
    pub fn slot(self) -> u8 {
        match self {
            PowerUpKind::TimeSlow => 1,
            PowerUpKind::Zoom => 2,
            PowerUpKind::SpeedBoost => 3,
            PowerUpKind::Shield => 4,
        }
    }

    pub fn from_slot(slot: u8) -> Option<PowerUpKind> {
        match slot {
            1 => Some(PowerUpKind::TimeSlow),
            2 => Some(PowerUpKind::Zoom),
            3 => Some(PowerUpKind::SpeedBoost),
            4 => Some(PowerUpKind::Shield),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PowerUpKind::TimeSlow => "Time Slow",
            PowerUpKind::Zoom => "Zoom",
            PowerUpKind::SpeedBoost => "Speed Boost",
            PowerUpKind::Shield => "Shield",
        }
    }
}

impl fmt::Display for PowerUpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Where a single kind of power-up is in its lifecycle
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum PowerUpStatus {
    #[default]
    Absent,

    /// Picked up and waiting to be activated
    Collected,

    /// In effect for `remaining` more ticks
    Active { remaining: u32 },
}

/// Gameplay values that power-ups alter
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Modifiers {
    /// Snake speed in moves per second, before time slowing
    pub speed: u32,

    /// Multiplier on the tick rate
    pub time_slow_factor: f64,

    /// Zoom level the renderer should approach
    pub target_zoom: f64,
}

impl Default for Modifiers {
    fn default() -> Modifiers {
        Modifiers {
            speed: consts::BASE_SPEED,
            time_slow_factor: 1.0,
            target_zoom: 1.0,
        }
    }
}

/// Return `modifiers` with the effect of `kind` switched on
pub fn apply_effect(kind: PowerUpKind, modifiers: Modifiers) -> Modifiers {
    match kind {
        PowerUpKind::TimeSlow => Modifiers {
            time_slow_factor: consts::TIME_SLOW_FACTOR,
            ..modifiers
        },
        PowerUpKind::Zoom => Modifiers {
            target_zoom: consts::ZOOM_TARGET,
            ..modifiers
        },
        PowerUpKind::SpeedBoost => Modifiers {
            speed: (modifiers.speed + consts::SPEED_BOOST_AMOUNT).min(consts::MAX_BOOSTED_SPEED),
            ..modifiers
        },
        PowerUpKind::Shield => modifiers,
    }
}

/// Return `modifiers` with the effect of `kind` switched off
pub fn revert_effect(kind: PowerUpKind, modifiers: Modifiers) -> Modifiers {
    match kind {
        PowerUpKind::TimeSlow => Modifiers {
            time_slow_factor: 1.0,
            ..modifiers
        },
        PowerUpKind::Zoom => Modifiers {
            target_zoom: 1.0,
            ..modifiers
        },
        PowerUpKind::SpeedBoost => Modifiers {
            speed: modifiers
                .speed
                .saturating_sub(consts::SPEED_BOOST_AMOUNT)
                .max(consts::BASE_SPEED),
            ..modifiers
        },
        PowerUpKind::Shield => modifiers,
    }
}

/// Tracks which power-ups the player holds and which are running
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PowerUpRegistry {
    status: EnumMap<PowerUpKind, PowerUpStatus>,
}

impl PowerUpRegistry {
    pub fn new() -> PowerUpRegistry {
        PowerUpRegistry::default()
    }

    pub fn status(&self, kind: PowerUpKind) -> PowerUpStatus {
        self.status[kind]
    }

    pub fn is_collected(&self, kind: PowerUpKind) -> bool {
        self.status[kind] == PowerUpStatus::Collected
    }

    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        matches!(self.status[kind], PowerUpStatus::Active { .. })
    }

    /// Ticks left on an active power-up
    pub fn remaining(&self, kind: PowerUpKind) -> Option<u32> {
        match self.status[kind] {
            PowerUpStatus::Active { remaining } => Some(remaining),
            _ => None,
        }
    }

    /// Iterate over every kind and its status in slot order
    pub fn iter(&self) -> impl Iterator<Item = (PowerUpKind, PowerUpStatus)> + '_ {
        self.status.iter().map(|(kind, &status)| (kind, status))
    }

    /// Record picking up a power-up from the field.
    ///
    /// A kind that is already held stays held.  A kind that is already
    /// running has its countdown restarted from the full duration without
    /// its effect being applied a second time.
    pub fn collect(&mut self, kind: PowerUpKind) {
        self.status[kind] = match self.status[kind] {
            PowerUpStatus::Absent | PowerUpStatus::Collected => PowerUpStatus::Collected,
            PowerUpStatus::Active { .. } => PowerUpStatus::Active {
                remaining: consts::POWER_UP_DURATION,
            },
        };
    }

    /// Start a held power-up, applying its effect to `modifiers`.  Returns
    /// `false` and does nothing if `kind` is not held.
    pub fn activate(&mut self, kind: PowerUpKind, modifiers: &mut Modifiers) -> bool {
        if !self.is_collected(kind) {
            return false;
        }
        self.status[kind] = PowerUpStatus::Active {
            remaining: consts::POWER_UP_DURATION,
        };
        *modifiers = apply_effect(kind, *modifiers);
        true
    }

    /// Count down every active power-up by one tick.  Power-ups whose
    /// countdown reaches zero become absent and have their effects reverted.
    /// Returns the kinds that expired.
    pub fn tick(&mut self, modifiers: &mut Modifiers) -> Vec<PowerUpKind> {
        let mut expired = Vec::new();
        for (kind, status) in &mut self.status {
            if let PowerUpStatus::Active { remaining } = status {
                *remaining = remaining.saturating_sub(1);
                if *remaining == 0 {
                    *status = PowerUpStatus::Absent;
                    expired.push(kind);
                }
            }
        }
        for &kind in &expired {
            *modifiers = revert_effect(kind, *modifiers);
        }
        expired
    }
}
