//! Per-entity status effects and their merge/tick lifecycle.
//!
//! A [`BuffMap`] owns at most one instance per buff kind. Re-applying an
//! active kind merges via the kind's combine policy instead of stacking.
//! Amplifiers are percent-like scalars (0-100).

use std::collections::BTreeMap;

/// Status effect kinds. `*Up`/`*Down` pairs are flat multipliers in the
/// damage pipeline; `Resist*`/`Weakness*` are keyed by damage type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Buff {
    AttackUp,
    AttackDown,
    DefenseUp,
    DefenseDown,
    EvadeUp,
    EvadeDown,
    Stun,
    ResistFire,
    ResistIce,
    ResistMagic,
    ResistShock,
    ResistQuake,
    ResistStun,
    WeaknessFire,
    WeaknessIce,
    WeaknessMagic,
    WeaknessShock,
    WeaknessQuake,
    WeaknessStun,
}

impl Buff {
    /// Debuffs are the kinds an entity would want cleansed.
    pub fn is_debuff(self) -> bool {
        use Buff::*;
        matches!(
            self,
            AttackDown
                | DefenseDown
                | EvadeDown
                | Stun
                | WeaknessFire
                | WeaknessIce
                | WeaknessMagic
                | WeaknessShock
                | WeaknessQuake
                | WeaknessStun
        )
    }
}

/// One active status effect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BuffInstance {
    pub buff: Buff,
    pub duration: u32,
    /// Percent-like scalar, usually 0-100.
    pub amplifier: u32,
    pub permanent: bool,
}

impl BuffInstance {
    pub fn new(buff: Buff, duration: u32, amplifier: u32) -> Self {
        Self {
            buff,
            duration,
            amplifier,
            permanent: false,
        }
    }

    pub fn permanent(buff: Buff, amplifier: u32) -> Self {
        Self {
            buff,
            duration: 0,
            amplifier,
            permanent: true,
        }
    }

    /// Merge a fresh application into this active instance.
    ///
    /// Policy per kind (recorded in DESIGN.md): stun keeps the longer of
    /// the two durations; every other kind refreshes to the incoming
    /// duration and keeps the stronger amplifier. A permanent instance
    /// absorbs anything; an incoming permanent instance wins outright.
    pub fn combine(&mut self, incoming: &BuffInstance) {
        debug_assert_eq!(self.buff, incoming.buff);
        if self.permanent {
            self.amplifier = self.amplifier.max(incoming.amplifier);
            return;
        }
        if incoming.permanent {
            *self = *incoming;
            return;
        }
        self.duration = match self.buff {
            Buff::Stun => self.duration.max(incoming.duration),
            _ => incoming.duration,
        };
        self.amplifier = self.amplifier.max(incoming.amplifier);
    }
}

/// Lifecycle notifications drained by the owning entity (e.g. for HUD sync).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuffEvent {
    Added(Buff),
    Changed(Buff),
    Removed(Buff),
}

/// Ticks of stun immunity granted right after a stun wears off.
const STUN_IMMUNITY_TICKS: u32 = 40;

/// Per-entity map of active buffs. Owned by the entity record, mutated only
/// on the authoritative tick.
#[derive(Default, Debug)]
pub struct BuffMap {
    active: BTreeMap<Buff, BuffInstance>,
    stun_immunity: u32,
    events: Vec<BuffEvent>,
}

impl BuffMap {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_active(&self, buff: Buff) -> bool {
        self.active.contains_key(&buff)
    }

    #[inline]
    pub fn get(&self, buff: Buff) -> Option<&BuffInstance> {
        self.active.get(&buff)
    }

    /// Amplifier of an active buff, or 0.
    #[inline]
    pub fn amplifier(&self, buff: Buff) -> u32 {
        self.get(buff).map(|b| b.amplifier).unwrap_or(0)
    }

    pub fn is_permanent(&self, buff: Buff) -> bool {
        self.get(buff).map(|b| b.permanent).unwrap_or(false)
    }

    #[inline]
    pub fn is_stunned(&self) -> bool {
        self.is_active(Buff::Stun)
    }

    /// Apply a buff, merging with any active instance of the same kind.
    pub fn apply(&mut self, instance: BuffInstance) {
        match self.active.get_mut(&instance.buff) {
            Some(existing) => {
                existing.combine(&instance);
                self.events.push(BuffEvent::Changed(instance.buff));
            }
            None => {
                self.active.insert(instance.buff, instance);
                self.events.push(BuffEvent::Added(instance.buff));
            }
        }
    }

    pub fn apply_simple(&mut self, buff: Buff, duration: u32, amplifier: u32) {
        self.apply(BuffInstance::new(buff, duration, amplifier));
    }

    pub fn remove(&mut self, buff: Buff) {
        if self.active.remove(&buff).is_some() {
            self.events.push(BuffEvent::Removed(buff));
        }
    }

    pub fn remove_all(&mut self) {
        let kinds: Vec<Buff> = self.active.keys().copied().collect();
        for k in kinds {
            self.remove(k);
        }
    }

    /// Stun for `ticks`, subject to the immunity window and resist/weakness
    /// scaling. `force` overrides kind-level immunity (e.g. players with
    /// stun disabled in config) but never the post-stun window.
    pub fn stun(&mut self, ticks: u32, force: bool, kind_immune: bool) {
        if self.stun_immunity > 0 || (!force && kind_immune) {
            return;
        }
        let mut t = ticks as f32;
        t *= 1.0 + self.amplifier(Buff::WeaknessStun) as f32 * 0.01;
        t *= 1.0 - self.amplifier(Buff::ResistStun) as f32 * 0.01;
        let t = t as u32;
        if t > 0 {
            self.stun_immunity = STUN_IMMUNITY_TICKS;
            self.apply(BuffInstance::new(Buff::Stun, t, 0));
        }
    }

    /// One game tick: count down durations, evict expired buffs, and run
    /// down the stun-immunity window once the stun itself is gone.
    pub fn tick(&mut self) {
        let mut expired = Vec::new();
        for (kind, b) in self.active.iter_mut() {
            if b.permanent {
                continue;
            }
            b.duration = b.duration.saturating_sub(1);
            if b.duration == 0 {
                expired.push(*kind);
            }
        }
        for k in expired {
            self.remove(k);
        }
        if self.stun_immunity > 0 && !self.is_stunned() {
            self.stun_immunity -= 1;
        }
    }

    /// Drain pending lifecycle events.
    pub fn drain_events(&mut self) -> Vec<BuffEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BuffInstance> {
        self.active.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_then_tick_to_expiry_fires_events() {
        let mut m = BuffMap::new();
        m.apply_simple(Buff::AttackUp, 2, 25);
        assert!(m.is_active(Buff::AttackUp));
        assert_eq!(m.amplifier(Buff::AttackUp), 25);
        m.tick();
        assert!(m.is_active(Buff::AttackUp));
        m.tick();
        assert!(!m.is_active(Buff::AttackUp));
        assert_eq!(
            m.drain_events(),
            vec![BuffEvent::Added(Buff::AttackUp), BuffEvent::Removed(Buff::AttackUp)]
        );
    }

    #[test]
    fn reapply_refreshes_duration_and_is_idempotent() {
        let mut m = BuffMap::new();
        m.apply_simple(Buff::DefenseUp, 10, 30);
        for _ in 0..6 {
            m.tick();
        }
        m.apply_simple(Buff::DefenseUp, 10, 30);
        let b = m.get(Buff::DefenseUp).unwrap();
        assert_eq!(b.duration, 10);
        assert_eq!(b.amplifier, 30);
        // identical re-application changes nothing further
        m.apply_simple(Buff::DefenseUp, 10, 30);
        assert_eq!(*m.get(Buff::DefenseUp).unwrap(), BuffInstance::new(Buff::DefenseUp, 10, 30));
    }

    #[test]
    fn combine_keeps_stronger_amplifier() {
        let mut m = BuffMap::new();
        m.apply_simple(Buff::AttackUp, 5, 50);
        m.apply_simple(Buff::AttackUp, 8, 20);
        let b = m.get(Buff::AttackUp).unwrap();
        assert_eq!(b.duration, 8);
        assert_eq!(b.amplifier, 50);
    }

    #[test]
    fn permanent_buffs_never_expire() {
        let mut m = BuffMap::new();
        m.apply(BuffInstance::permanent(Buff::ResistFire, 100));
        for _ in 0..1000 {
            m.tick();
        }
        assert!(m.is_permanent(Buff::ResistFire));
        // non-permanent re-application is absorbed
        m.apply_simple(Buff::ResistFire, 5, 10);
        assert!(m.is_permanent(Buff::ResistFire));
        assert_eq!(m.amplifier(Buff::ResistFire), 100);
    }

    #[test]
    fn stun_immunity_window_prevents_stun_lock() {
        let mut m = BuffMap::new();
        m.stun(10, false, false);
        assert!(m.is_stunned());
        // re-stun while stunned: blocked by the immunity window
        m.stun(10, false, false);
        assert_eq!(m.get(Buff::Stun).unwrap().duration, 10);
        for _ in 0..10 {
            m.tick();
        }
        assert!(!m.is_stunned());
        // window still counting down after expiry
        m.stun(10, false, false);
        assert!(!m.is_stunned());
        for _ in 0..40 {
            m.tick();
        }
        m.stun(10, false, false);
        assert!(m.is_stunned());
    }

    #[test]
    fn stun_scaling_respects_resist_and_weakness() {
        let mut m = BuffMap::new();
        m.apply_simple(Buff::ResistStun, 100, 100);
        m.stun(20, false, false);
        assert!(!m.is_stunned(), "fully resisted stun must not apply");

        let mut w = BuffMap::new();
        w.apply_simple(Buff::WeaknessStun, 100, 50);
        w.stun(20, false, false);
        assert_eq!(w.get(Buff::Stun).unwrap().duration, 30);
    }

    #[test]
    fn kind_immunity_skipped_unless_forced() {
        let mut m = BuffMap::new();
        m.stun(10, false, true);
        assert!(!m.is_stunned());
        m.stun(10, true, true);
        assert!(m.is_stunned());
    }
}
