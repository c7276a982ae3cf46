//! Battoujutsu strike: sword drawn at the last instant for double damage.

use super::Loadout;

/// Re-sheath cooldown after the window closes or the blow lands.
const DELAY: u32 = 30;

/// Armed while `attack_timer > DELAY`; the trailing DELAY ticks are the
/// cooldown during which activation is refused.
#[derive(Debug, Default)]
pub struct MortalDraw {
    pub level: u32,
    attack_timer: u32,
    sword_slot: Option<usize>,
}

impl MortalDraw {
    fn attack_time(&self) -> u32 {
        self.level + DELAY + 2
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.attack_timer > DELAY
    }

    /// Arm the draw. Requires an empty hand, a sword somewhere on the
    /// hotbar, and no pending cooldown.
    pub fn activate(&mut self, loadout: &Loadout) -> bool {
        if self.level == 0 || self.attack_timer != 0 || loadout.held.is_some() {
            return false;
        }
        match loadout.first_sword_slot() {
            Some(slot) => {
                self.sword_slot = Some(slot);
                self.attack_timer = self.attack_time();
                true
            }
            None => false,
        }
    }

    /// Count the window down; at the window/cooldown boundary the sword is
    /// drawn automatically. Returns the emptied hotbar slot when that
    /// happens.
    pub fn tick(&mut self, loadout: &mut Loadout) -> Option<usize> {
        if self.attack_timer > 0 {
            self.attack_timer -= 1;
            if self.attack_timer == DELAY {
                return self.draw_sword(loadout);
            }
        }
        None
    }

    /// Move the marked sword into the (empty) hand. Used both by the
    /// automatic window expiry and by the counter-guard when attacked.
    pub fn draw_sword(&mut self, loadout: &mut Loadout) -> Option<usize> {
        let slot = self.sword_slot.take()?;
        if loadout.held.is_some() {
            return None;
        }
        loadout.held = loadout.hotbar[slot].take();
        loadout.held.is_some().then_some(slot)
    }

    /// Damage multiplier when the strike connects; starts the cooldown.
    pub fn on_impact(&mut self) -> f32 {
        self.attack_timer = DELAY;
        2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skills::ItemKind;

    fn loadout_with_sword(slot: usize) -> Loadout {
        let mut l = Loadout::default();
        l.hotbar[slot] = Some(ItemKind::Sword);
        l
    }

    #[test]
    fn requires_empty_hand_and_hotbar_sword() {
        let mut md = MortalDraw {
            level: 1,
            ..Default::default()
        };
        assert!(!md.activate(&Loadout::default()));
        let mut armed = loadout_with_sword(0);
        armed.held = Some(ItemKind::Shield);
        assert!(!md.activate(&armed));
        assert!(md.activate(&loadout_with_sword(0)));
        assert!(md.is_active());
    }

    #[test]
    fn window_lasts_level_plus_two_ticks() {
        let mut md = MortalDraw {
            level: 3,
            ..Default::default()
        };
        let mut loadout = loadout_with_sword(2);
        assert!(md.activate(&loadout));
        for _ in 0..4 {
            assert!(md.is_active());
            assert_eq!(md.tick(&mut loadout), None);
        }
        assert!(md.is_active());
        // fifth tick crosses into the cooldown and draws the sword
        assert_eq!(md.tick(&mut loadout), Some(2));
        assert!(!md.is_active());
        assert_eq!(loadout.held, Some(ItemKind::Sword));
    }

    #[test]
    fn cooldown_blocks_reactivation_for_thirty_ticks() {
        let mut md = MortalDraw {
            level: 1,
            ..Default::default()
        };
        let mut loadout = loadout_with_sword(0);
        assert!(md.activate(&loadout));
        let _ = md.on_impact();
        // hand stays empty in this scenario; only the timer gates re-use
        assert!(!md.activate(&loadout));
        for _ in 0..29 {
            md.tick(&mut loadout);
            assert!(!md.activate(&loadout));
        }
        md.tick(&mut loadout);
        assert!(md.activate(&loadout));
    }

    #[test]
    fn impact_doubles_damage() {
        let mut md = MortalDraw {
            level: 1,
            ..Default::default()
        };
        assert_eq!(md.on_impact(), 2.0);
    }
}
