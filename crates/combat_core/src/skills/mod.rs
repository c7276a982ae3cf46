//! Combat skill state machines.
//!
//! Each skill is a small struct of integer tick timers with level 0 meaning
//! not learned. Activation is a silent no-op when requirements are unmet;
//! callers observe the returned bool or later `is_active` state.

mod attack;
mod combo;
mod defense;
mod ending_blow;
mod mortal_draw;

pub use attack::{ArmorBreak, RisingCut, SpinAttack};
pub use combo::Combo;
pub use defense::{Dodge, Parry, SwordBreak};
pub use ending_blow::EndingBlow;
pub use mortal_draw::MortalDraw;

use rand::Rng;

/// Coarse item categories the skill layer cares about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemKind {
    Sword,
    Shield,
    Bomb,
    Tool,
}

/// Held item plus hotbar, the slice of inventory skills interact with.
#[derive(Clone, Debug, Default)]
pub struct Loadout {
    pub held: Option<ItemKind>,
    pub hotbar: [Option<ItemKind>; 9],
}

impl Loadout {
    #[inline]
    pub fn holding(&self, kind: ItemKind) -> bool {
        self.held == Some(kind)
    }

    /// First hotbar slot containing a sword.
    pub fn first_sword_slot(&self) -> Option<usize> {
        self.hotbar.iter().position(|s| *s == Some(ItemKind::Sword))
    }
}

/// Side effects emitted by skill ticks, applied by the owning entity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SkillEffect {
    /// Mortal draw pulled a sword out of the given hotbar slot.
    SwordDrawn { slot: usize },
    /// Ending blow penalty on the user.
    DefenseDown { duration: u32, amplifier: u32 },
    /// Ending blow finished the target.
    BonusXp(u32),
}

/// How a victim's defensive skill resolved an incoming attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interception {
    Dodged,
    Parried { disarm: bool },
    SwordBroken,
    /// Mortal draw counter: sword drawn as the blow arrives.
    GuardDrawn,
}

/// All per-entity skill state.
#[derive(Debug, Default)]
pub struct SkillSet {
    pub combo: Combo,
    pub dodge: Dodge,
    pub parry: Parry,
    pub sword_break: SwordBreak,
    pub mortal_draw: MortalDraw,
    pub armor_break: ArmorBreak,
    pub ending_blow: EndingBlow,
    pub rising_cut: RisingCut,
    pub spin_attack: SpinAttack,
}

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// One game tick for every skill timer. `pending_target_health` is the
    /// current health of the entity ending blow last struck, if any.
    pub fn tick<R: Rng>(
        &mut self,
        loadout: &mut Loadout,
        pending_target_health: Option<f32>,
        _rng: &mut R,
    ) -> Vec<SkillEffect> {
        let mut out = Vec::new();
        self.combo.tick();
        self.dodge.tick();
        self.parry.tick();
        self.sword_break.tick();
        if let Some(slot) = self.mortal_draw.tick(loadout) {
            out.push(SkillEffect::SwordDrawn { slot });
        }
        self.armor_break.tick(loadout.holding(ItemKind::Sword));
        self.rising_cut.tick();
        self.spin_attack.tick();
        out.extend(self.ending_blow.tick(&self.combo, pending_target_health));
        out
    }

    /// Defensive interception of an incoming entity attack. The first active
    /// skill in priority order decides the outcome; if its roll fails the
    /// chain stops and the attack lands.
    pub fn intercept<R: Rng>(
        &mut self,
        loadout: &mut Loadout,
        rng: &mut R,
    ) -> Option<Interception> {
        if self.dodge.is_active() {
            return self.dodge.attempt(rng).then_some(Interception::Dodged);
        }
        if self.parry.is_active() {
            let disarm = self.parry.roll_disarm(rng);
            return Some(Interception::Parried { disarm });
        }
        if self.sword_break.is_active() {
            return Some(Interception::SwordBroken);
        }
        if self.mortal_draw.is_active() && self.mortal_draw.draw_sword(loadout).is_some() {
            return Some(Interception::GuardDrawn);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn sword_loadout() -> Loadout {
        let mut l = Loadout::default();
        l.hotbar[3] = Some(ItemKind::Sword);
        l
    }

    #[test]
    fn first_sword_slot_scans_hotbar() {
        assert_eq!(sword_loadout().first_sword_slot(), Some(3));
        assert_eq!(Loadout::default().first_sword_slot(), None);
    }

    #[test]
    fn parry_intercepts_before_sword_break() {
        let mut s = SkillSet::new();
        s.parry.level = 1;
        s.sword_break.level = 1;
        s.parry.activate();
        s.sword_break.activate();
        let mut rng = SmallRng::seed_from_u64(7);
        let mut loadout = Loadout::default();
        match s.intercept(&mut loadout, &mut rng) {
            Some(Interception::Parried { .. }) => {}
            other => panic!("expected parry, got {other:?}"),
        }
    }

    #[test]
    fn no_active_skill_means_no_interception() {
        let mut s = SkillSet::new();
        let mut rng = SmallRng::seed_from_u64(7);
        let mut loadout = Loadout::default();
        assert_eq!(s.intercept(&mut loadout, &mut rng), None);
    }

    #[test]
    fn armed_mortal_draw_guards_when_attacked() {
        let mut s = SkillSet::new();
        s.mortal_draw.level = 2;
        let mut loadout = sword_loadout();
        assert!(s.mortal_draw.activate(&loadout));
        let mut rng = SmallRng::seed_from_u64(7);
        assert_eq!(
            s.intercept(&mut loadout, &mut rng),
            Some(Interception::GuardDrawn)
        );
        assert_eq!(loadout.held, Some(ItemKind::Sword));
        assert_eq!(loadout.hotbar[3], None);
    }
}
