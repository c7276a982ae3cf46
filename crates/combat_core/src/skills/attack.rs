//! Offensive hooks: armor break, rising cut, spin attack.

/// Training caps; levels past this grant no further scaling.
const MAX_LEVEL: u32 = 5;

/// Charged strike that ignores the target's armor and damage modifiers
/// entirely. Charging requires a held sword; releasing early cancels.
#[derive(Debug, Default)]
pub struct ArmorBreak {
    pub level: u32,
    charge: u32,
    active: bool,
}

impl ArmorBreak {
    fn charge_time(&self) -> u32 {
        50 - self.level.min(MAX_LEVEL) * 5
    }

    pub fn begin_charge(&mut self) -> bool {
        if self.level == 0 || self.active || self.charge > 0 {
            return false;
        }
        self.charge = self.charge_time();
        true
    }

    #[inline]
    pub fn is_charging(&self) -> bool {
        self.charge > 0
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Run the charge down while the sword is held; letting go resets it.
    pub fn tick(&mut self, holding_sword: bool) {
        if self.charge == 0 {
            return;
        }
        if !holding_sword {
            self.charge = 0;
            return;
        }
        self.charge -= 1;
        if self.charge == 0 {
            self.active = true;
        }
    }

    /// Consume the charged strike. True means this hit bypasses armor.
    pub fn on_impact(&mut self) -> bool {
        std::mem::take(&mut self.active)
    }
}

/// Upward slash that launches the target.
#[derive(Debug, Default)]
pub struct RisingCut {
    pub level: u32,
    active_timer: u32,
}

impl RisingCut {
    fn window(&self) -> u32 {
        4 + self.level
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

    /// Upward velocity applied to the struck entity.
    pub fn launch_power(&self) -> f32 {
        0.3 + 0.1 * self.level as f32
    }

    /// Consume the window on a landed hit.
    pub fn on_impact(&mut self) -> bool {
        std::mem::take(&mut self.active_timer) > 0
    }

    pub fn tick(&mut self) {
        self.active_timer = self.active_timer.saturating_sub(1);
    }
}

/// Sweeping strike hitting everything in an arc around the user. The
/// owning system queries `is_active` and `radius` to select targets.
#[derive(Debug, Default)]
pub struct SpinAttack {
    pub level: u32,
    active_timer: u32,
}

impl SpinAttack {
    fn duration(&self) -> u32 {
        8 + 2 * self.level
    }

    pub fn activate(&mut self) -> bool {
        if self.level == 0 || self.active_timer > 0 {
            return false;
        }
        self.active_timer = self.duration();
        true
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active_timer > 0
    }

    /// Reach of the sweep.
    pub fn radius(&self) -> f32 {
        1.5 + 0.5 * self.level as f32
    }

    pub fn tick(&mut self) {
        self.active_timer = self.active_timer.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn armor_break_charges_while_sword_held() {
        let mut ab = ArmorBreak {
            level: 2,
            ..Default::default()
        };
        assert!(ab.begin_charge());
        for _ in 0..40 {
            ab.tick(true);
        }
        assert!(ab.is_active());
        assert!(ab.on_impact());
        assert!(!ab.is_active());
        assert!(!ab.on_impact());
    }

    #[test]
    fn overleveled_charge_clamps_at_max_level() {
        let mut ab = ArmorBreak {
            level: 11,
            ..Default::default()
        };
        assert!(ab.begin_charge());
        for _ in 0..25 {
            ab.tick(true);
        }
        assert!(ab.is_active());
    }

    #[test]
    fn releasing_sword_cancels_charge() {
        let mut ab = ArmorBreak {
            level: 1,
            ..Default::default()
        };
        ab.begin_charge();
        ab.tick(true);
        ab.tick(false);
        assert!(!ab.is_charging());
        assert!(!ab.is_active());
    }

    #[test]
    fn rising_cut_consumed_on_impact() {
        let mut rc = RisingCut {
            level: 2,
            ..Default::default()
        };
        assert!(rc.activate());
        assert!(rc.on_impact());
        assert!(!rc.is_active());
        assert_eq!(rc.launch_power(), 0.5);
    }

    #[test]
    fn spin_attack_window_scales_with_level() {
        let mut sa = SpinAttack {
            level: 3,
            ..Default::default()
        };
        assert!(sa.activate());
        for _ in 0..14 {
            sa.tick();
        }
        assert!(!sa.is_active());
        assert_eq!(sa.radius(), 3.0);
    }
}
