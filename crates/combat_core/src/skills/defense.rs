//! Defensive windows: dodge, parry, sword break.

use rand::Rng;

/// Sidestep with a level-scaled chance to avoid the hit entirely.
#[derive(Debug, Default)]
pub struct Dodge {
    pub level: u32,
    active_timer: u32,
}

impl Dodge {
    fn window(&self) -> u32 {
        2 + self.level
    }

    fn chance(&self) -> f32 {
        (0.1 + 0.1 * self.level as f32).min(1.0)
    }

    pub fn activate(&mut self) -> bool {
        if self.level == 0 || self.active_timer > 0 {
            return false;
        }
        self.active_timer = self.window();
        true
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active_timer > 0
    }

    /// Roll the dodge. Consumes the window either way.
    pub fn attempt<R: Rng>(&mut self, rng: &mut R) -> bool {
        self.active_timer = 0;
        rng.random::<f32>() < self.chance()
    }

    pub fn tick(&mut self) {
        self.active_timer = self.active_timer.saturating_sub(1);
    }
}

/// Knock the incoming weapon aside; may disarm the attacker.
#[derive(Debug, Default)]
pub struct Parry {
    pub level: u32,
    active_timer: u32,
}

impl Parry {
    fn window(&self) -> u32 {
        3 + self.level
    }

    fn disarm_chance(&self) -> f32 {
        0.1 * self.level as f32
    }

    pub fn activate(&mut self) -> bool {
        if self.level == 0 || self.active_timer > 0 {
            return false;
        }
        self.active_timer = self.window();
        true
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active_timer > 0
    }

    pub fn roll_disarm<R: Rng>(&mut self, rng: &mut R) -> bool {
        self.active_timer = 0;
        rng.random::<f32>() < self.disarm_chance()
    }

    pub fn tick(&mut self) {
        self.active_timer = self.active_timer.saturating_sub(1);
    }
}

/// Block that damages the attacker's weapon instead of the defender.
#[derive(Debug, Default)]
pub struct SwordBreak {
    pub level: u32,
    active_timer: u32,
}

impl SwordBreak {
    fn window(&self) -> u32 {
        2 + self.level
    }

    pub fn activate(&mut self) -> bool {
        if self.level == 0 || self.active_timer > 0 {
            return false;
        }
        self.active_timer = self.window();
        true
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active_timer > 0
    }

    pub fn tick(&mut self) {
        self.active_timer = self.active_timer.saturating_sub(1);
    }
}
