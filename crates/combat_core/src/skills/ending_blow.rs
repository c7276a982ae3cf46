//! Combo finisher: bonus experience on a kill, defense penalty on a miss.

use rand::Rng;

use super::{Combo, SkillEffect};

/// Kill check deferred one tick so armor and buffs have settled.
#[derive(Clone, Copy, Debug)]
struct PendingStrike {
    target: u32,
    xp: u32,
}

/// Training cap; levels past this grant no further scaling.
const MAX_LEVEL: u32 = 5;

#[derive(Debug, Default)]
pub struct EndingBlow {
    pub level: u32,
    active: bool,
    /// Combo size when the skill last fired; gates re-use until the chain
    /// has grown by three more hits.
    last_num_hits: u32,
    pending: Option<PendingStrike>,
}

impl EndingBlow {
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Ticks of the defense-down penalty on a failed strike.
    pub fn duration(&self) -> u32 {
        110 - self.level.min(MAX_LEVEL) * 10
    }

    /// Target whose health the owner must report on the next tick.
    pub fn pending_target(&self) -> Option<u32> {
        self.pending.map(|p| p.target)
    }

    pub fn can_use(&self, combo: &Combo) -> bool {
        if self.level == 0 || self.active || !combo.in_progress() {
            return false;
        }
        if combo.consecutive_hits() < 2 {
            return false;
        }
        self.last_num_hits == 0 || combo.size() as u32 > self.last_num_hits + 2
    }

    pub fn activate(&mut self, combo: &Combo) -> bool {
        if self.can_use(combo) {
            self.active = true;
            self.last_num_hits = combo.size() as u32;
        }
        self.active
    }

    /// Damage multiplier when the strike lands on the combo's target.
    pub fn on_impact<R: Rng>(
        &mut self,
        combo: &Combo,
        target: u32,
        target_health: f32,
        rng: &mut R,
    ) -> f32 {
        self.active = false;
        if combo.in_progress() && combo.last_target() == Some(target) {
            let cap = (target_health.ceil() as u32).max(2);
            self.pending = Some(PendingStrike {
                target,
                xp: self.level + 1 + rng.random_range(0..cap),
            });
            1.0 + 0.2 * self.level as f32
        } else {
            1.0
        }
    }

    /// Resolve a pending strike and expire an unspent activation. An
    /// activation that never connected costs a doubled defense penalty.
    pub fn tick(&mut self, combo: &Combo, pending_target_health: Option<f32>) -> Vec<SkillEffect> {
        let mut out = Vec::new();
        if self.last_num_hits > 0 {
            if let Some(pending) = self.pending.take() {
                match pending_target_health {
                    Some(h) if h <= 0.0 => out.push(SkillEffect::BonusXp(pending.xp)),
                    _ => out.push(SkillEffect::DefenseDown {
                        duration: self.duration(),
                        amplifier: 50,
                    }),
                }
            }
            if !combo.in_progress() {
                self.last_num_hits = 0;
            }
        }
        if self.active {
            self.active = false;
            out.push(SkillEffect::DefenseDown {
                duration: self.duration() * 2,
                amplifier: 50,
            });
        }
        out
    }
}
